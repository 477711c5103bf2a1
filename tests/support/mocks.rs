// tests/support/mocks.rs
use app_blog::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::{media::MediaStorage, security::PasswordVerifier, time::Clock},
};
use app_blog::domain::article::{
    ArticleFilter, ArticleId, ArticleReadRepository, ArticleSlug, ArticleWithCategory, MediaPath,
};
use app_blog::domain::errors::{DomainError, DomainResult};
use app_blog::presentation::templates::{RenderError, TemplateRenderer};
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

pub static FIXED_NOW: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());

pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *FIXED_NOW
    }
}

/// Accepts `plain:<password>` as the hash of `<password>`.
pub struct PlainVerifier;

#[async_trait::async_trait]
impl PasswordVerifier for PlainVerifier {
    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("plain:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

/// Records every render call instead of producing HTML.
#[derive(Default)]
pub struct RecordingRenderer {
    calls: Mutex<Vec<(String, Value)>>,
}

impl RecordingRenderer {
    pub fn last(&self) -> Option<(String, Value)> {
        self.calls.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl TemplateRenderer for RecordingRenderer {
    fn render(&self, template: &str, context: &tera::Context) -> Result<String, RenderError> {
        self.calls
            .lock()
            .unwrap()
            .push((template.to_string(), context.clone().into_json()));
        Ok(format!("<p>rendered {template}</p>"))
    }
}

/// Media storage kept in memory.
#[derive(Default)]
pub struct MemoryMedia {
    files: Mutex<BTreeMap<String, Bytes>>,
    counter: Mutex<u32>,
}

impl MemoryMedia {
    pub fn stored(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait::async_trait]
impl MediaStorage for MemoryMedia {
    async fn save(&self, file_name: &str, content: Bytes) -> ApplicationResult<MediaPath> {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        let ext = file_name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("bin");
        let path = format!("article_images/{}.{}", *counter, ext.to_ascii_lowercase());
        self.files.lock().unwrap().insert(path.clone(), content);
        Ok(MediaPath::new(path)?)
    }

    async fn delete(&self, path: &MediaPath) -> ApplicationResult<()> {
        self.files.lock().unwrap().remove(path.as_str());
        Ok(())
    }

    fn url(&self, path: &MediaPath) -> String {
        format!("/media/{}", path.as_str())
    }
}

/// A read side whose store is unreachable.
pub struct FailingArticleRead;

fn store_down<T>() -> DomainResult<T> {
    Err(DomainError::Persistence("database is unavailable".into()))
}

#[async_trait::async_trait]
impl ArticleReadRepository for FailingArticleRead {
    async fn find_by_id(&self, _id: ArticleId) -> DomainResult<Option<ArticleWithCategory>> {
        store_down()
    }

    async fn list(&self, _filter: &ArticleFilter) -> DomainResult<Vec<ArticleWithCategory>> {
        store_down()
    }

    async fn find_by_slug_published_between(
        &self,
        _slug: &ArticleSlug,
        _from: DateTime<Utc>,
        _until: DateTime<Utc>,
    ) -> DomainResult<Option<ArticleWithCategory>> {
        store_down()
    }
}
