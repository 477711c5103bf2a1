use crate::domain::article::entity::{Article, ArticleWithCategory, NewArticle};
use crate::domain::article::image::{ArticleImage, NewArticleImage};
use crate::domain::article::specifications::ArticleFilter;
use crate::domain::article::value_objects::{ArticleId, ArticleImageId, ArticleSlug};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    async fn update(&self, id: ArticleId, article: NewArticle) -> DomainResult<Article>;
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<ArticleWithCategory>>;

    /// Articles matching `filter`, newest `pub_date` first, ties broken by id descending.
    async fn list(&self, filter: &ArticleFilter) -> DomainResult<Vec<ArticleWithCategory>>;

    /// The article with `slug` published in the half-open window `[from, until)`.
    async fn find_by_slug_published_between(
        &self,
        slug: &ArticleSlug,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> DomainResult<Option<ArticleWithCategory>>;
}

#[async_trait]
pub trait ArticleImageRepository: Send + Sync {
    async fn insert(&self, image: NewArticleImage) -> DomainResult<ArticleImage>;
    async fn delete(&self, id: ArticleImageId) -> DomainResult<()>;
    async fn find_by_id(&self, id: ArticleImageId) -> DomainResult<Option<ArticleImage>>;
    async fn list_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<ArticleImage>>;
}
