use super::ArticleQueryService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::{article::ArticleFilter, category::CategorySlug},
};

pub struct ListArticlesByCategoryQuery {
    pub slug: String,
}

impl ArticleQueryService {
    /// Every article, newest first.
    pub async fn list_articles(&self) -> ApplicationResult<Vec<ArticleDto>> {
        self.list(&ArticleFilter::All).await
    }

    /// Articles flagged for the home page, newest first.
    pub async fn list_main_page_articles(&self) -> ApplicationResult<Vec<ArticleDto>> {
        self.list(&ArticleFilter::MainPage).await
    }

    /// Articles whose category has the given slug. An unknown category is an
    /// empty listing, not an error.
    pub async fn list_articles_by_category(
        &self,
        query: ListArticlesByCategoryQuery,
    ) -> ApplicationResult<Vec<ArticleDto>> {
        let Ok(slug) = CategorySlug::new(query.slug) else {
            return Ok(Vec::new());
        };
        self.list(&ArticleFilter::CategorySlug(slug)).await
    }

    async fn list(&self, filter: &ArticleFilter) -> ApplicationResult<Vec<ArticleDto>> {
        let records = self.read_repo.list(filter).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
