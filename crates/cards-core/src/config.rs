//! Credentials storage.
//!
//! This module handles loading and saving the developer key, token and
//! username used to authorise requests against Trello.
//!
//! Credentials are stored at `~/.cardsrc` as 4-space indented JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Credentials file name, relative to the home directory
pub const RC_FILE: &str = ".cardsrc";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub auth_key: String,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default)]
    pub username: String,
}

impl Credentials {
    pub fn new(
        auth_key: impl Into<String>,
        auth_token: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            auth_key: auth_key.into(),
            auth_token: auth_token.into(),
            username: username.into(),
        }
    }
}

/// Reads and writes the credentials file at a fixed path.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<home>/.cardsrc`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(RC_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load credentials from disk. Returns `Ok(None)` if the file does not exist yet.
    pub fn load(&self) -> Result<Option<Credentials>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Credentials file not found");
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let credentials = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Some(credentials))
    }

    /// Replace the credentials file in full.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory {}", parent.display())
            })?;
        }
        let contents = to_indented_json(credentials)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!(path = %self.path.display(), "Credentials saved");
        Ok(())
    }
}

fn to_indented_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}
