// src/domain/article/entity.rs
use crate::domain::article::value_objects::{
    ArticleDescription, ArticleId, ArticleSlug, ArticleTitle,
};
use crate::domain::category::{Category, CategoryId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub description: ArticleDescription,
    pub slug: ArticleSlug,
    pub pub_date: DateTime<Utc>,
    pub main_page: bool,
    pub category_id: Option<CategoryId>,
}

/// An article joined with the category its foreign key points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleWithCategory {
    pub article: Article,
    pub category: Option<Category>,
}

/// Field values for creating an article or replacing an existing one.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub description: ArticleDescription,
    pub slug: ArticleSlug,
    pub pub_date: DateTime<Utc>,
    pub main_page: bool,
    pub category_id: Option<CategoryId>,
}
