// src/domain/article/image.rs
use crate::domain::article::value_objects::{ArticleId, ArticleImageId, ImageTitle, MediaPath};

/// A picture attached to exactly one article. Removed together with its article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleImage {
    pub id: ArticleImageId,
    pub article_id: ArticleId,
    pub title: ImageTitle,
    pub image: MediaPath,
}

#[derive(Debug, Clone)]
pub struct NewArticleImage {
    pub article_id: ArticleId,
    pub title: ImageTitle,
    pub image: MediaPath,
}
