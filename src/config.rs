use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::error::{Error, Result};
use crate::writer::DEFAULT_OUTPUT;

pub const DEFAULT_BASE_URL: &str = "https://streamed.example.com/api";

/// Build an M3U playlist from the matches that are live right now.
#[derive(Parser, Debug)]
#[command(name = "livecast", version)]
pub struct Cli {
    /// Root of the live-match API.
    #[arg(long, env = "LIVECAST_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Where to write the playlist.
    #[arg(short, long, env = "LIVECAST_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Per-request timeout in seconds.
    #[arg(long, env = "LIVECAST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Stage the playlist in a temporary file and rename it over the output.
    #[arg(long, env = "LIVECAST_ATOMIC")]
    pub atomic: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the stream links for one match instead of writing a playlist.
    Streams { source: String, match_id: String },
}

/// Settings shared by every command, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub output_path: PathBuf,
    pub timeout: Duration,
    pub atomic: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            timeout: Duration::from_secs(30),
            atomic: false,
        }
    }
}

impl Cli {
    pub fn config(&self) -> Result<Config> {
        let base_url = self.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(Error::InvalidConfig {
                message: "base URL must not be empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(Error::InvalidConfig {
                message: "timeout must be at least one second".to_string(),
            });
        }

        Ok(Config {
            base_url: base_url.to_string(),
            output_path: self.output.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            atomic: self.atomic,
        })
    }
}
