// Flat-file persistence for the bearer token.
//
// The file holds the raw token string. Writes overwrite in place with no
// atomic rename, so a crash mid-write can leave a corrupt token behind; the
// next request then gets `invalid_token` and the client re-authenticates.

use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted token. A missing file or an empty first line
    /// yields `None`; only the first line is read back.
    pub fn load(&self) -> Result<Option<String>> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No token file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut line = String::new();
        BufReader::new(file).read_line(&mut line)?;
        let token = line.trim_end();
        if token.is_empty() {
            debug!(path = %self.path.display(), "Token file is empty");
            return Ok(None);
        }

        debug!(path = %self.path.display(), "Loaded token from file");
        Ok(Some(token.to_string()))
    }

    /// Overwrite the token file with `token` (no trailing newline).
    pub fn save(&self, token: &str) -> Result<()> {
        std::fs::write(&self.path, token)?;
        debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }
}
