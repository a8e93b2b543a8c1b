use async_trait::async_trait;

pub mod http;
pub mod types;

use crate::api::types::{Match, StreamRecord};

/// Read access to the live-match API.
///
/// Failures are reported by the implementation and surface to callers as an
/// empty result, so the pipeline never has to handle a fetch error itself.
#[async_trait]
pub trait MatchApi: Send + Sync {
    async fn live_matches(&self) -> Vec<Match>;

    /// Stream links for a single match. Not used when building a playlist.
    async fn streams(&self, source: &str, match_id: &str) -> Vec<StreamRecord>;
}
