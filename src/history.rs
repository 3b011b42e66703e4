//! Generated Meme History
//!
//! Append-only list of generated image URLs, rewritten to a flat text file
//! (one URL per line) after every append.

use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct GeneratedMemes {
    path: PathBuf,
    urls: Vec<String>,
}

impl GeneratedMemes {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            urls: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Oldest first
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Record a URL and persist the whole list.
    /// The URL stays in memory even if the write fails.
    pub fn push(&mut self, url: String) -> io::Result<()> {
        self.urls.push(url);
        self.save()
    }

    pub fn save(&self) -> io::Result<()> {
        let mut contents = String::new();
        for url in &self.urls {
            contents.push_str(url);
            contents.push('\n');
        }

        fs::write(&self.path, contents)?;
        debug!("Saved {} generated memes to {}", self.urls.len(), self.path.display());
        Ok(())
    }
}
