use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const DEFAULT_OUTPUT: &str = "playlist.m3u";

/// Writes rendered playlists to a fixed path, replacing whatever is there.
#[derive(Debug, Clone)]
pub struct PlaylistWriter {
    path: PathBuf,
    atomic: bool,
}

impl PlaylistWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            atomic: false,
        }
    }

    /// Write to a temporary file next to the target and rename it into place.
    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;

        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, text: &str) -> Result<()> {
        if self.atomic {
            write_atomic(text, &self.path)?;
        } else {
            write_playlist(text, &self.path)?;
        }
        info!(path = %self.path.display(), bytes = text.len(), "playlist written");

        Ok(())
    }
}

impl Default for PlaylistWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT)
    }
}

/// Truncate `path` and write `text` to it as UTF-8.
pub fn write_playlist(text: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::io(path, e))?;

    let mut out = BufWriter::new(file);
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| Error::io(path, e))
}

fn write_atomic(text: &str, path: &Path) -> Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(directory).map_err(|e| Error::io(path, e))?;
    debug!(tmp = %tmp.path().display(), "staging playlist");
    tmp.write_all(text.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::io(path, e))?;

    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

    Ok(())
}
