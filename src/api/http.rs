use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::api::types::{Match, StreamRecord};
use crate::api::MatchApi;
use crate::error::{Error, Result};

/// [MatchApi] backed by the HTTP endpoints under a base URL.
#[derive(Clone)]
pub struct HttpMatchApi {
    client: Client,
    base_url: String,
}

impl HttpMatchApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("livecast/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MatchApi for HttpMatchApi {
    #[instrument(skip_all)]
    async fn live_matches(&self) -> Vec<Match> {
        let url = format!("{}/matches/live", self.base_url);

        match self.get_json(&url).await {
            Ok(records) => decode_each(records, "match"),
            Err(e) => {
                warn!(error = %e, "Failed to fetch live matches");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    async fn streams(&self, source: &str, match_id: &str) -> Vec<StreamRecord> {
        let url = format!("{}/stream/{source}/{match_id}", self.base_url);

        match self.get_json(&url).await {
            Ok(records) => decode_each(records, "stream"),
            Err(e) => {
                warn!(error = %e, "Failed to fetch streams for {match_id}");
                Vec::new()
            }
        }
    }
}

/// Decode records one at a time so a single odd record does not cost the rest.
fn decode_each<T: DeserializeOwned>(records: Vec<Value>, kind: &str) -> Vec<T> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(index, error = %e, "skipping undecodable {kind} record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use serde_json::json;
    use warp::http::StatusCode;
    use warp::{Filter, Rejection, Reply};

    use crate::api::http::HttpMatchApi;
    use crate::api::MatchApi;
    use crate::execution::PlaylistBuilder;

    async fn serve<F, R>(routes: F) -> String
    where
        F: Filter<Extract = (R,), Error = Rejection> + Clone + Send + Sync + 'static,
        R: Reply,
    {
        let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        format!("http://{addr}/api")
    }

    fn api(base_url: String) -> HttpMatchApi {
        HttpMatchApi::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    pub async fn test_live_matches() {
        let routes = warp::path!("api" / "matches" / "live").map(|| {
            warp::reply::json(&json!([
                {
                    "title": "Real Madrid vs Bayern Munich",
                    "teams": {"home": {"name": "Real Madrid"}, "away": {"name": "Bayern Munich"}},
                    "sources": [{"source": "alpha", "id": "rm-bm"}]
                },
                {"title": "TBD"}
            ]))
        });
        let api = api(serve(routes).await);

        let matches = api.live_matches().await;

        assert_eq!(matches.len(), 2);
        let teams = matches[0].teams.as_ref().unwrap();
        assert_eq!(teams.home.as_ref().unwrap().name.as_deref(), Some("Real Madrid"));
        assert!(matches[1].teams.is_none());
    }

    #[tokio::test]
    pub async fn test_live_matches_error_status() {
        let routes = warp::path!("api" / "matches" / "live")
            .map(|| warp::reply::with_status("upstream down", StatusCode::SERVICE_UNAVAILABLE));
        let api = api(serve(routes).await);

        assert!(api.live_matches().await.is_empty());
    }

    #[tokio::test]
    pub async fn test_live_matches_bad_body() {
        let routes = warp::path!("api" / "matches" / "live").map(|| "definitely not json");
        let api = api(serve(routes).await);

        assert!(api.live_matches().await.is_empty());
    }

    #[tokio::test]
    pub async fn test_live_matches_skips_bad_record() {
        let routes = warp::path!("api" / "matches" / "live").map(|| {
            warp::reply::json(&json!([
                {
                    "teams": {"home": {"name": "Real Madrid"}, "away": {"name": "Bayern Munich"}},
                    "sources": [{"source": "alpha", "id": "rm-bm"}]
                },
                {"teams": "Arsenal vs Chelsea", "sources": [{"source": "alpha", "id": "ars-che"}]},
                {"teams": {"home": {"name": 7}}, "sources": "alpha"},
                {
                    "teams": {"home": {"name": 7}, "away": {"name": "Chelsea"}},
                    "sources": [{"source": "alpha", "id": "7-che"}]
                }
            ]))
        });
        let api = api(serve(routes).await);

        let matches = api.live_matches().await;

        assert_eq!(matches.len(), 2);
        let playlist = PlaylistBuilder::new(api.base_url()).build(&matches).unwrap();
        let labels: Vec<&str> = playlist.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Real Madrid vs Bayern Munich", "Unknown vs Chelsea"]);
    }

    #[tokio::test]
    pub async fn test_unreachable_host() {
        // Nothing listens on the discard port.
        let api = api("http://127.0.0.1:9/api".to_string());

        assert!(api.live_matches().await.is_empty());
    }

    #[tokio::test]
    pub async fn test_streams() {
        let routes =
            warp::path!("api" / "stream" / String / String).map(|source: String, id: String| {
                warp::reply::json(&json!([
                    {"id": id, "streamNo": 1, "hd": true, "source": source,
                     "embedUrl": "https://embed.example.com/1"},
                    {"id": id, "streamNo": 2, "hd": false, "source": source}
                ]))
            });
        let api = api(serve(routes).await);

        let streams = api.streams("alpha", "rm-bm").await;

        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0].source.as_deref(), Some("alpha"));
        assert_eq!(streams[0].id.as_deref(), Some("rm-bm"));
        assert_eq!(streams[1].embed_url, None);
    }

    #[tokio::test]
    pub async fn test_streams_not_found() {
        let routes = warp::path!("api" / "stream" / String / String)
            .map(|_: String, _: String| warp::reply::with_status("missing", StatusCode::NOT_FOUND));
        let api = api(serve(routes).await);

        assert!(api.streams("alpha", "nope").await.is_empty());
    }

    #[test]
    pub fn test_base_url_trailing_slash() {
        let api = HttpMatchApi::with_client(reqwest::Client::new(), "http://host/api/");
        assert_eq!(api.base_url(), "http://host/api");
    }
}
