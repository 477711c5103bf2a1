// src/domain/article/specifications.rs
use crate::domain::category::CategorySlug;

/// Which articles a listing contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleFilter {
    All,
    MainPage,
    CategorySlug(CategorySlug),
}
