use crate::application::dto::CategoryDto;
use crate::domain::article::{ArticleImage, ArticleWithCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub pub_date: DateTime<Utc>,
    pub main_page: bool,
    pub category: Option<CategoryDto>,
    /// Populated for single-article reads only; listings leave it empty.
    #[serde(default)]
    pub images: Vec<ArticleImageDto>,
}

impl ArticleDto {
    pub fn with_images(mut self, images: Vec<ArticleImageDto>) -> Self {
        self.images = images;
        self
    }
}

impl From<ArticleWithCategory> for ArticleDto {
    fn from(record: ArticleWithCategory) -> Self {
        let ArticleWithCategory { article, category } = record;
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            description: article.description.into_inner(),
            slug: article.slug.into_inner(),
            pub_date: article.pub_date,
            main_page: article.main_page,
            category: category.map(Into::into),
            images: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleImageDto {
    pub id: i64,
    pub article_id: i64,
    pub title: String,
    /// Path relative to the media root.
    pub image: String,
    pub url: String,
}

impl ArticleImageDto {
    pub fn from_image(image: ArticleImage, url: String) -> Self {
        Self {
            id: image.id.into(),
            article_id: image.article_id.into(),
            title: image.title.into_inner(),
            image: image.image.into_inner(),
            url,
        }
    }
}
