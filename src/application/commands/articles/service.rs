// src/application/commands/articles/service.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    application::{
        admin::ARTICLE_ENTITY,
        commands::slug::SlugPrepopulator,
        error::{ApplicationError, ApplicationResult},
        ports::{media::MediaStorage, time::Clock},
    },
    domain::{
        article::{
            ArticleDescription, ArticleImageRepository, ArticleReadRepository, ArticleSlug,
            ArticleTitle, ArticleWriteRepository, NewArticle,
        },
        category::{CategoryId, CategoryRepository},
    },
};

use super::SaveArticleCommand;

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) image_repo: Arc<dyn ArticleImageRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) media: Arc<dyn MediaStorage>,
    pub(super) slugs: Arc<SlugPrepopulator>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        image_repo: Arc<dyn ArticleImageRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        media: Arc<dyn MediaStorage>,
        slugs: Arc<SlugPrepopulator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            image_repo,
            category_repo,
            media,
            slugs,
            clock,
        }
    }

    /// Validate form values into the stored shape. `pub_date` falls back to
    /// `default_pub_date` when the form leaves it out.
    pub(super) async fn build(
        &self,
        command: SaveArticleCommand,
        default_pub_date: DateTime<Utc>,
    ) -> ApplicationResult<NewArticle> {
        let title = ArticleTitle::new(command.title)?;
        let slug = self.slugs.slug_for(
            ARTICLE_ENTITY,
            command.slug,
            &[("title", title.as_str())],
        )?;
        let category_id = match command.category_id {
            Some(raw) => Some(self.ensure_category(raw).await?),
            None => None,
        };

        Ok(NewArticle {
            title,
            description: ArticleDescription::new(command.description),
            slug: ArticleSlug::new(slug)?,
            pub_date: command.pub_date.unwrap_or(default_pub_date),
            main_page: command.main_page,
            category_id,
        })
    }

    async fn ensure_category(&self, raw: i64) -> ApplicationResult<CategoryId> {
        let id = CategoryId::new(raw)?;
        match self.category_repo.find_by_id(id).await? {
            Some(_) => Ok(id),
            None => Err(ApplicationError::validation(format!(
                "category {raw} does not exist"
            ))),
        }
    }

    pub(super) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
