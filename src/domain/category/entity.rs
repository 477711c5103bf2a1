// src/domain/category/entity.rs
use crate::domain::category::value_objects::{CategoryId, CategoryName, CategorySlug};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: CategorySlug,
}

/// Field values for creating a category or replacing an existing one.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: CategorySlug,
}
