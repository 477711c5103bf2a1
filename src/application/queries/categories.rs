use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::category::{CategoryId, CategoryRepository},
};
use std::sync::Arc;

pub struct CategoryQueryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryQueryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_categories(&self) -> ApplicationResult<Vec<CategoryDto>> {
        let categories = self.repo.list().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn get_category(&self, id: i64) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("category not found"))
    }
}
