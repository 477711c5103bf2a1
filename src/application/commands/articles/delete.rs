use super::ArticleCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::article::ArticleId,
};

impl ArticleCommandService {
    /// Delete an article. Its image rows go with it; their files are removed
    /// afterwards.
    pub async fn delete_article(&self, id: i64) -> ApplicationResult<()> {
        let id = ArticleId::new(id)?;
        if self.read_repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("article not found"));
        }

        let images = self.image_repo.list_by_article(id).await?;
        self.write_repo.delete(id).await?;
        tracing::info!(article_id = %id, images = images.len(), "article deleted");

        for image in images {
            if let Err(err) = self.media.delete(&image.image).await {
                tracing::warn!(error = %err, path = %image.image, "failed to remove image file");
            }
        }
        Ok(())
    }
}
