//! Attachment files on local disk.

use crate::error::AppResult;
use log::{info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct FileStorage {
    root: PathBuf,
}

/// Keeps only the final path component and replaces anything outside a
/// conservative character set.
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `bytes` under a fresh unique name derived from `original` and
    /// returns that name.
    pub fn save(&self, original: &str, bytes: &[u8]) -> AppResult<String> {
        let name = format!("{}_{}", Uuid::new_v4().simple(), sanitize_filename(original));
        fs::write(self.root.join(&name), bytes)?;
        info!("Stored attachment file {}", name);
        Ok(name)
    }

    /// Resolves a stored name. Names carrying path components never leave
    /// the storage root.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(sanitize_filename(name))
    }

    /// Removes a stored file; a file that is already gone is not an error.
    pub fn delete(&self, name: &str) -> AppResult<()> {
        match fs::remove_file(self.path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort removal after a committed delete.
    pub fn delete_all(&self, names: &[String]) {
        for name in names {
            if let Err(e) = self.delete(name) {
                warn!("Could not remove attachment file {}: {}", name, e);
            }
        }
    }
}
