// src/application/commands/images.rs
use std::sync::Arc;

use bytes::Bytes;

use crate::{
    application::{
        dto::ArticleImageDto,
        error::{ApplicationError, ApplicationResult},
        ports::media::MediaStorage,
    },
    domain::article::{
        ArticleId, ArticleImageId, ArticleImageRepository, ArticleReadRepository, ImageTitle,
        NewArticleImage,
    },
};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

pub struct UploadImageCommand {
    pub article_id: i64,
    pub title: String,
    pub file_name: String,
    pub content: Bytes,
}

pub struct ArticleImageCommandService {
    image_repo: Arc<dyn ArticleImageRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
    media: Arc<dyn MediaStorage>,
}

impl ArticleImageCommandService {
    pub fn new(
        image_repo: Arc<dyn ArticleImageRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        media: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            image_repo,
            article_repo,
            media,
        }
    }

    pub async fn upload_image(&self, command: UploadImageCommand) -> ApplicationResult<ArticleImageDto> {
        let article_id = ArticleId::new(command.article_id)?;
        let title = ImageTitle::new(command.title)?;
        if command.content.is_empty() {
            return Err(ApplicationError::validation("image file is empty"));
        }
        ensure_image_extension(&command.file_name)?;

        if self.article_repo.find_by_id(article_id).await?.is_none() {
            return Err(ApplicationError::not_found("article not found"));
        }

        let path = self.media.save(&command.file_name, command.content).await?;
        let inserted = self
            .image_repo
            .insert(NewArticleImage {
                article_id,
                title,
                image: path.clone(),
            })
            .await;

        let image = match inserted {
            Ok(image) => image,
            Err(err) => {
                if let Err(cleanup) = self.media.delete(&path).await {
                    tracing::warn!(error = %cleanup, path = %path, "failed to remove orphaned upload");
                }
                return Err(err.into());
            }
        };

        tracing::info!(article_id = %article_id, path = %image.image, "image uploaded");
        let url = self.media.url(&image.image);
        Ok(ArticleImageDto::from_image(image, url))
    }

    /// Remove one image row and its file.
    pub async fn delete_image(&self, id: i64) -> ApplicationResult<()> {
        let id = ArticleImageId::new(id)?;
        let image = self
            .image_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("image not found"))?;

        self.image_repo.delete(id).await?;
        if let Err(err) = self.media.delete(&image.image).await {
            tracing::warn!(error = %err, path = %image.image, "failed to remove image file");
        }
        Ok(())
    }
}

fn ensure_image_extension(file_name: &str) -> ApplicationResult<()> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(ApplicationError::validation(format!(
            "unsupported image type; expected one of {}",
            IMAGE_EXTENSIONS.join(", ")
        )))
    }
}
