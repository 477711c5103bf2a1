use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, ArticleImageDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

pub struct GetArticleByIdQuery {
    pub id: i64,
}

impl ArticleQueryService {
    pub async fn get_article_by_id(&self, query: GetArticleByIdQuery) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(query.id)?;
        let record = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let images = self.list_images(id).await?;
        Ok(ArticleDto::from(record).with_images(images))
    }
}

pub struct ListArticleImagesQuery {
    pub article_id: i64,
}

impl ArticleQueryService {
    /// Images attached to an existing article.
    pub async fn list_article_images(
        &self,
        query: ListArticleImagesQuery,
    ) -> ApplicationResult<Vec<ArticleImageDto>> {
        let id = ArticleId::new(query.article_id)?;
        if self.read_repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("article not found"));
        }
        self.list_images(id).await
    }
}
