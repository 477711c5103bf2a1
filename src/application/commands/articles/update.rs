use super::{ArticleCommandService, SaveArticleCommand};
use crate::{
    application::{
        dto::{ArticleDto, ArticleImageDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

impl ArticleCommandService {
    /// Replace every editable field of an article. Inline images are left alone.
    pub async fn update_article(
        &self,
        id: i64,
        command: SaveArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(id)?;
        let existing = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let replacement = self.build(command, existing.article.pub_date).await?;
        self.write_repo.update(id, replacement).await?;

        let record = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;
        let images = self.image_repo.list_by_article(id).await?;
        let images = images
            .into_iter()
            .map(|image| {
                let url = self.media.url(&image.image);
                ArticleImageDto::from_image(image, url)
            })
            .collect();
        Ok(ArticleDto::from(record).with_images(images))
    }
}
