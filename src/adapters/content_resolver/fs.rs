// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem-backed content resolver.

use crate::domain::{Result, SetStatus};
use crate::ports::ContentResolver;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Pseudo URL prefix for explicit filesystem keys: `file:`.
pub const FILE_URL_PREFIX: &str = "file:";

/// A content resolver backed by a root folder on the local filesystem.
///
/// Keys resolve relative to the root folder. A `file:` scheme prefix is
/// stripped before resolution; an absolute key is tried as a full path on
/// read and rejected on write (the resolver only stores content below its
/// root). A missing file is a miss, not an error.
pub struct FsContentResolver {
    root_folder: PathBuf,
}

impl FsContentResolver {
    /// Creates a resolver rooted at the given folder, creating it if needed.
    pub fn new(root_folder: impl Into<PathBuf>) -> Result<Self> {
        let root_folder = root_folder.into();
        if !root_folder.exists() {
            fs::create_dir_all(&root_folder)?;
        }
        Ok(Self { root_folder })
    }

    /// Returns the root folder content is resolved against.
    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    fn read(path: &Path) -> Option<Vec<u8>> {
        if !path.exists() {
            return None;
        }
        match fs::read(path) {
            Ok(content) => Some(content),
            Err(e) => {
                info!("cannot read '{}': {}", path.display(), e);
                None
            }
        }
    }
}

impl Default for FsContentResolver {
    /// A resolver rooted at the current working directory.
    fn default() -> Self {
        Self {
            root_folder: PathBuf::from("."),
        }
    }
}

impl ContentResolver for FsContentResolver {
    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        let normalized = key.strip_prefix(FILE_URL_PREFIX).unwrap_or(key);
        if Path::new(normalized).is_absolute() {
            if let Some(content) = Self::read(Path::new(normalized)) {
                return Some(content);
            }
        }
        Self::read(&self.root_folder.join(normalized))
    }

    fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
        let normalized = key.strip_prefix(FILE_URL_PREFIX).unwrap_or(key);
        if Path::new(normalized).is_absolute() {
            warn!(
                "content can only be stored relative to '{}', not under the absolute key '{}'",
                self.root_folder.display(),
                key
            );
            return Ok(SetStatus::NotPossible);
        }
        let file = self.root_folder.join(normalized);
        if let Some(parent) = file.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("cannot create folder '{}': {}", parent.display(), e);
                return Ok(SetStatus::NotPossible);
            }
        }
        match fs::write(&file, value) {
            Ok(()) => {
                debug!("stored content in '{}'", file.display());
                Ok(SetStatus::Success)
            }
            Err(e) => {
                warn!("cannot write '{}': {}", file.display(), e);
                Ok(SetStatus::NotPossible)
            }
        }
    }
}
