// src/application/ports/media.rs
use crate::application::ApplicationResult;
use crate::domain::article::MediaPath;
use async_trait::async_trait;
use bytes::Bytes;

/// Backing storage for uploaded files.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Persist `content` and return where it was stored. `file_name` is the
    /// client-supplied name and is only used for its extension.
    async fn save(&self, file_name: &str, content: Bytes) -> ApplicationResult<MediaPath>;

    /// Remove a stored file. Removing a file that is already gone succeeds.
    async fn delete(&self, path: &MediaPath) -> ApplicationResult<()>;

    /// Public URL the file is served under.
    fn url(&self, path: &MediaPath) -> String;
}
