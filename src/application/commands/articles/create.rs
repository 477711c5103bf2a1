// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::application::{
    dto::ArticleDto,
    error::{ApplicationError, ApplicationResult},
};
use chrono::{DateTime, Utc};

/// Form values for creating or replacing an article.
pub struct SaveArticleCommand {
    pub title: String,
    pub description: String,
    /// Derived from `title` when absent or blank.
    pub slug: Option<String>,
    /// Defaults to now on create and to the stored value on update.
    pub pub_date: Option<DateTime<Utc>>,
    pub main_page: bool,
    pub category_id: Option<i64>,
}

impl SaveArticleCommand {
    pub fn builder() -> SaveArticleCommandBuilder {
        SaveArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct SaveArticleCommandBuilder {
    title: Option<String>,
    description: String,
    slug: Option<String>,
    pub_date: Option<DateTime<Utc>>,
    main_page: bool,
    category_id: Option<i64>,
}

impl SaveArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn pub_date(mut self, pub_date: DateTime<Utc>) -> Self {
        self.pub_date = Some(pub_date);
        self
    }

    pub fn main_page(mut self, main_page: bool) -> Self {
        self.main_page = main_page;
        self
    }

    pub fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn build(self) -> Result<SaveArticleCommand, &'static str> {
        Ok(SaveArticleCommand {
            title: self.title.ok_or("title is required")?,
            description: self.description,
            slug: self.slug,
            pub_date: self.pub_date,
            main_page: self.main_page,
            category_id: self.category_id,
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(&self, command: SaveArticleCommand) -> ApplicationResult<ArticleDto> {
        let now = self.now();
        let new_article = self.build(command, now).await?;
        let created = self.write_repo.insert(new_article).await?;
        tracing::info!(article_id = %created.id, slug = %created.slug, "article created");

        self.read_repo
            .find_by_id(created.id)
            .await?
            .map(ArticleDto::from)
            .ok_or_else(|| ApplicationError::infrastructure("created article could not be read back"))
    }
}
