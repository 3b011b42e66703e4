//! Settings
//!
//! Defaults, overridden by an optional JSON settings file, then by the
//! environment. CLI flags are applied on top in `main`.

use crate::api::{Credentials, DEFAULT_API_BASE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const ENV_USERNAME: &str = "IMGFLIP_USERNAME";
pub const ENV_PASSWORD: &str = "IMGFLIP_PASSWORD";
pub const ENV_API_BASE: &str = "MEME_STUDIO_API_BASE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Generated meme URLs, one per line
    pub history_file: PathBuf,
    pub request_timeout_secs: u64,
    /// Larger images are downscaled before upload
    pub max_texture_side: u32,
    /// Edge length of catalog thumbnails in points
    pub thumbnail_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            username: None,
            password: None,
            history_file: PathBuf::from("generated_memes.txt"),
            request_timeout_secs: 30,
            max_texture_side: 2048,
            thumbnail_size: 100.0,
        }
    }
}

impl Settings {
    /// `<config dir>/meme-studio/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("meme-studio").join("settings.json"))
    }

    /// Load from `explicit` if given, else from the default path if it exists,
    /// then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.exists()),
        };

        let mut settings = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = Some(password);
        }
        if let Some(base) = lookup(ENV_API_BASE) {
            self.api_base = base;
        }
    }

    /// Both username and password, when non-empty
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Credentials {
                    username: username.clone(),
                    password: password.clone(),
                })
            }
            _ => None,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
