use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleSlug, PublicationDay},
};

/// Address of an article's detail page.
pub struct GetArticleByDateQuery {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub slug: String,
}

impl ArticleQueryService {
    /// The article with `slug` whose `pub_date` falls on the given local
    /// calendar day.
    pub async fn get_article_by_date(
        &self,
        query: GetArticleByDateQuery,
    ) -> ApplicationResult<ArticleDto> {
        let not_found = || ApplicationError::not_found("article not found");

        let day = PublicationDay::from_ymd(query.year, query.month, query.day)
            .ok_or_else(not_found)?;
        let slug = ArticleSlug::new(query.slug).map_err(|_| not_found())?;
        let (from, until) = day.utc_window(self.site_offset).ok_or_else(not_found)?;

        let record = self
            .read_repo
            .find_by_slug_published_between(&slug, from, until)
            .await?
            .ok_or_else(not_found)?;

        let images = self.list_images(record.article.id).await?;
        Ok(ArticleDto::from(record).with_images(images))
    }
}
