// src/loader.rs

//! Font byte retrieval.
//!
//! Fetching is the one asynchronous step in the pipeline. Everything after
//! it (validation, rasterization, compositing) is synchronous and pure.
//! Implementations:
//!
//! - `FileLoader` - reads from the filesystem with `tokio::fs`
//! - `MemoryLoader` - serves byte blobs registered up front

use log::debug;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// A source of raw font bytes keyed by an identifier (path, URL, ...).
#[allow(async_fn_in_trait)]
pub trait FontLoader {
    async fn fetch(&self, source: &str) -> io::Result<Vec<u8>>;
}

/// Loads font files from disk, optionally relative to a root directory.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    root: Option<PathBuf>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative sources against `root`.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: Some(root.as_ref().to_path_buf()),
        }
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let path = Path::new(source);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl FontLoader for FileLoader {
    async fn fetch(&self, source: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve(source);
        debug!("FileLoader: reading {}", path.display());
        tokio::fs::read(&path).await
    }
}

/// In-memory loader, mostly for tests and embedded fonts.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: &str, bytes: Vec<u8>) {
        self.blobs.insert(source.to_string(), bytes);
    }
}

impl FontLoader for MemoryLoader {
    async fn fetch(&self, source: &str) -> io::Result<Vec<u8>> {
        self.blobs.get(source).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no font registered for '{}'", source),
            )
        })
    }
}
