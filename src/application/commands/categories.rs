// src/application/commands/categories.rs
use std::sync::Arc;

use crate::{
    application::{
        admin::CATEGORY_ENTITY, commands::slug::SlugPrepopulator, dto::CategoryDto,
        error::ApplicationResult,
    },
    domain::category::{CategoryId, CategoryName, CategoryRepository, CategorySlug, NewCategory},
};

/// Form values for creating or replacing a category.
pub struct SaveCategoryCommand {
    pub category: String,
    /// Derived from `category` when absent or blank.
    pub slug: Option<String>,
}

pub struct CategoryCommandService {
    repo: Arc<dyn CategoryRepository>,
    slugs: Arc<SlugPrepopulator>,
}

impl CategoryCommandService {
    pub fn new(repo: Arc<dyn CategoryRepository>, slugs: Arc<SlugPrepopulator>) -> Self {
        Self { repo, slugs }
    }

    pub async fn create_category(&self, command: SaveCategoryCommand) -> ApplicationResult<CategoryDto> {
        let category = self.build(command)?;
        let created = self.repo.insert(category).await?;
        tracing::info!(category_id = %created.id, slug = %created.slug, "category created");
        Ok(created.into())
    }

    pub async fn update_category(
        &self,
        id: i64,
        command: SaveCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(id)?;
        let category = self.build(command)?;
        let updated = self.repo.update(id, category).await?;
        Ok(updated.into())
    }

    /// Articles in the category stay and lose their category.
    pub async fn delete_category(&self, id: i64) -> ApplicationResult<()> {
        let id = CategoryId::new(id)?;
        self.repo.delete(id).await?;
        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }

    fn build(&self, command: SaveCategoryCommand) -> ApplicationResult<NewCategory> {
        let name = CategoryName::new(command.category)?;
        let slug = self.slugs.slug_for(
            CATEGORY_ENTITY,
            command.slug,
            &[("category", name.as_str())],
        )?;
        Ok(NewCategory {
            name,
            slug: CategorySlug::new(slug)?,
        })
    }
}
