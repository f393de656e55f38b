//! On-disk staging for the current upload and its augmented variants.
//!
//! One slot only: every upload overwrites `uploaded_file.csv` and the
//! `data_<type>.csv` files of the previous cycle. Concurrent sessions share
//! (and race on) the same files.

use std::path::{Path, PathBuf};

use crate::types::{AugType, SavedArtifact};

pub const UPLOADED_FILE_NAME: &str = "uploaded_file.csv";

#[derive(Clone, Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

/// `data_<type>.csv` for a requested type string, or `None` when the string
/// could not name a file inside the store.
pub fn artifact_file_name(requested: &str) -> Option<String> {
    if requested.is_empty() || !requested.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(format!("data_{}.csv", requested.to_ascii_lowercase()))
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    pub fn uploaded_path(&self) -> PathBuf {
        self.dir.join(UPLOADED_FILE_NAME)
    }

    pub fn artifact_path(&self, aug_type: AugType) -> PathBuf {
        // codes are alphanumeric, the name always resolves
        self.dir.join(format!("data_{}.csv", aug_type.code().to_ascii_lowercase()))
    }

    pub async fn save_upload(&self, bytes: &[u8]) -> std::io::Result<PathBuf> {
        self.ensure_dir().await?;
        let path = self.uploaded_path();
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    pub async fn read_upload(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.uploaded_path()).await
    }

    pub async fn save_artifact(&self, aug_type: AugType, bytes: &[u8]) -> std::io::Result<SavedArtifact> {
        self.ensure_dir().await?;
        let path = self.artifact_path(aug_type);
        tokio::fs::write(&path, bytes).await?;

        Ok(SavedArtifact {
            aug_type,
            path: path.display().to_string(),
            bytes: bytes.len() as u64,
            blake3_hex: hex::encode(blake3::hash(bytes).as_bytes()),
        })
    }

    /// Path and download name of an existing artifact. Never creates anything.
    pub async fn locate(&self, requested: &str) -> std::io::Result<Option<(PathBuf, String)>> {
        let Some(name) = artifact_file_name(requested) else {
            return Ok(None);
        };
        let path = self.dir.join(&name);
        if tokio::fs::try_exists(&path).await? {
            Ok(Some((path, name)))
        } else {
            Ok(None)
        }
    }
}
