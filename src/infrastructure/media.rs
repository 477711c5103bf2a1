// src/infrastructure/media.rs
use crate::application::{
    ApplicationResult, error::ApplicationError, ports::media::MediaStorage,
};
use crate::domain::article::MediaPath;
use async_trait::async_trait;
use bytes::Bytes;
use std::{io::ErrorKind, path::PathBuf};
use tokio::io::AsyncWriteExt;

const IMAGE_DIR: &str = "article_images";
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Stores uploads under a directory on local disk, named by content hash.
/// Every upload gets its own file; identical content is disambiguated with a
/// numeric suffix so deleting one image never removes another's file.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
    url_prefix: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn file_name_for(original: &str, content: &[u8], attempt: u32) -> String {
        let digest = blake3::hash(content).to_hex();
        let hash = &digest.as_str()[..32];
        let stem = match attempt {
            0 => hash.to_string(),
            n => format!("{hash}_{n}"),
        };
        match sanitized_extension(original) {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem,
        }
    }
}

fn sanitized_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    let valid = !ext.is_empty() && ext.len() <= 10 && ext.bytes().all(|b| b.is_ascii_alphanumeric());
    valid.then_some(ext)
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn save(&self, file_name: &str, content: Bytes) -> ApplicationResult<MediaPath> {
        let directory = self.root.join(IMAGE_DIR);
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let relative = format!(
                "{IMAGE_DIR}/{}",
                Self::file_name_for(file_name, &content, attempt)
            );
            let path = MediaPath::new(relative)?;

            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.root.join(path.as_str()))
                .await;
            let mut file = match opened {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(ApplicationError::infrastructure(err.to_string())),
            };

            let written = async {
                file.write_all(&content).await?;
                file.flush().await
            }
            .await;
            if let Err(err) = written {
                drop(file);
                if let Err(cleanup) = tokio::fs::remove_file(self.root.join(path.as_str())).await {
                    tracing::warn!(error = %cleanup, path = %path, "failed to remove partial upload");
                }
                return Err(ApplicationError::infrastructure(err.to_string()));
            }
            return Ok(path);
        }

        Err(ApplicationError::infrastructure(format!(
            "no free file name for {file_name} after {MAX_NAME_ATTEMPTS} attempts"
        )))
    }

    async fn delete(&self, path: &MediaPath) -> ApplicationResult<()> {
        match tokio::fs::remove_file(self.root.join(path.as_str())).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ApplicationError::infrastructure(err.to_string())),
        }
    }

    fn url(&self, path: &MediaPath) -> String {
        format!("{}/{}", self.url_prefix, path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_root() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("app_blog-media-{}-{nanos}", std::process::id()))
    }

    #[tokio::test]
    async fn save_then_delete_round_trip() {
        let root = scratch_root();
        let storage = LocalMediaStorage::new(&root, "/media/");

        let path = storage
            .save("Photo.PNG", Bytes::from_static(b"fake png"))
            .await
            .unwrap();
        assert!(path.as_str().starts_with("article_images/"));
        assert!(path.as_str().ends_with(".png"));
        assert!(root.join(path.as_str()).exists());
        assert_eq!(storage.url(&path), format!("/media/{}", path.as_str()));

        storage.delete(&path).await.unwrap();
        assert!(!root.join(path.as_str()).exists());
        // already gone
        storage.delete(&path).await.unwrap();

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn identical_uploads_keep_separate_files() {
        let root = scratch_root();
        let storage = LocalMediaStorage::new(&root, "/media");

        let first = storage.save("a.jpg", Bytes::from_static(b"same")).await.unwrap();
        let second = storage.save("a.jpg", Bytes::from_static(b"same")).await.unwrap();
        assert_ne!(first, second);

        storage.delete(&first).await.unwrap();
        assert!(!root.join(first.as_str()).exists());
        assert_eq!(std::fs::read(root.join(second.as_str())).unwrap(), b"same");

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn names_follow_content_and_attempt() {
        let a = LocalMediaStorage::file_name_for("a.jpg", b"bytes", 0);
        assert_eq!(a, LocalMediaStorage::file_name_for("b.jpg", b"bytes", 0));
        assert_ne!(a, LocalMediaStorage::file_name_for("a.jpg", b"other", 0));

        let retry = LocalMediaStorage::file_name_for("a.jpg", b"bytes", 2);
        assert_eq!(retry, a.replace(".jpg", "_2.jpg"));
    }

    #[test]
    fn odd_extensions_are_dropped() {
        assert_eq!(sanitized_extension("x.JPEG"), Some("jpeg".into()));
        assert_eq!(sanitized_extension("x.p/ng"), None);
        assert_eq!(sanitized_extension("noext"), None);
    }
}
