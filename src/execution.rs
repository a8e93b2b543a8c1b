use std::path::PathBuf;

use tracing::{debug, info};

use crate::api::types::{Match, Team};
use crate::api::MatchApi;
use crate::error::{Error, Result};
use crate::playlist::{stream_url, Playlist, PlaylistEntry};
use crate::writer::PlaylistWriter;

const UNKNOWN_TEAM: &str = "Unknown";

/// Turns live matches into playlist entries, one per match at most.
#[derive(Debug, Clone)]
pub struct PlaylistBuilder {
    base_url: String,
}

impl PlaylistBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Entries keep the order of `matches`. Matches without teams or without
    /// sources are dropped; only the first source of a match is used.
    pub fn build(&self, matches: &[Match]) -> Result<Playlist> {
        let mut entries = Vec::with_capacity(matches.len());

        for (index, m) in matches.iter().enumerate() {
            let teams = match &m.teams {
                Some(teams) if !teams.is_empty() => teams,
                _ => {
                    debug!(index, "skipping match without teams");
                    continue;
                }
            };

            let home = team_name(teams.home.as_ref());
            let away = team_name(teams.away.as_ref());

            let Some(first) = m.sources.as_ref().and_then(|sources| sources.first()) else {
                debug!(index, home, away, "skipping match without sources");
                continue;
            };

            let source = first.source.as_deref().ok_or(Error::MalformedSource {
                index,
                field: "source",
            })?;
            let id = first
                .id
                .as_deref()
                .ok_or(Error::MalformedSource { index, field: "id" })?;

            entries.push(PlaylistEntry::new(
                home,
                away,
                stream_url(&self.base_url, source, id),
            ));
        }

        Ok(Playlist { entries })
    }
}

fn team_name(team: Option<&Team>) -> &str {
    team.and_then(|team| team.name.as_deref())
        .unwrap_or(UNKNOWN_TEAM)
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The API reported nothing; no playlist was written.
    NoMatches,
    Written {
        matches: usize,
        entries: usize,
        path: PathBuf,
    },
}

/// Fetch, build and write, once.
pub struct Pipeline<A: MatchApi> {
    api: A,
    builder: PlaylistBuilder,
    writer: PlaylistWriter,
}

impl<A: MatchApi> Pipeline<A> {
    pub fn new(api: A, builder: PlaylistBuilder, writer: PlaylistWriter) -> Self {
        Self {
            api,
            builder,
            writer,
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        info!("begin pipeline");
        let matches = self.api.live_matches().await;

        // An empty fetch writes nothing, while matches that are all filtered
        // out still produce a header-only playlist.
        if matches.is_empty() {
            info!("no live matches");
            return Ok(RunOutcome::NoMatches);
        }

        let playlist = self.builder.build(&matches)?;
        info!(
            matches = matches.len(),
            entries = playlist.len(),
            "playlist built"
        );

        self.writer.write(&playlist.to_string())?;

        Ok(RunOutcome::Written {
            matches: matches.len(),
            entries: playlist.len(),
            path: self.writer.path().to_path_buf(),
        })
    }
}
