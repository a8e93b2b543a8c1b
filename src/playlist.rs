use std::fmt;

pub const HEADER: &str = "#EXTM3U";

/// Extended M3U playlist, rendered with [fmt::Display].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    pub entries: Vec<PlaylistEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    pub channel_id: String,
    pub label: String,
    pub url: String,
}

impl PlaylistEntry {
    pub fn new(home: &str, away: &str, url: String) -> Self {
        Self {
            channel_id: channel_id(home, away),
            label: format!("{home} vs {away}"),
            url,
        }
    }
}

impl Playlist {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;

        for entry in &self.entries {
            writeln!(
                f,
                "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\", {}",
                entry.channel_id, entry.label, entry.label
            )?;
            writeln!(f, "{}", entry.url)?;
        }

        Ok(())
    }
}

/// Slug for a pairing: both names lowercased and joined with `-`, then every
/// space in the joined string replaced with `-`.
pub fn channel_id(home: &str, away: &str) -> String {
    format!("{}-{}", home.to_lowercase(), away.to_lowercase()).replace(' ', "-")
}

pub fn stream_url(base_url: &str, source: &str, id: &str) -> String {
    format!("{}/stream/{source}/{id}", base_url.trim_end_matches('/'))
}
