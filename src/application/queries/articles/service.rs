use std::sync::Arc;

use chrono::FixedOffset;

use crate::{
    application::{
        ApplicationResult, dto::ArticleImageDto, ports::media::MediaStorage,
    },
    domain::article::{ArticleId, ArticleImageRepository, ArticleReadRepository},
};

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) image_repo: Arc<dyn ArticleImageRepository>,
    pub(super) media: Arc<dyn MediaStorage>,
    /// Offset calendar days are interpreted in.
    pub(super) site_offset: FixedOffset,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        image_repo: Arc<dyn ArticleImageRepository>,
        media: Arc<dyn MediaStorage>,
        site_offset: FixedOffset,
    ) -> Self {
        Self {
            read_repo,
            image_repo,
            media,
            site_offset,
        }
    }

    pub fn site_offset(&self) -> FixedOffset {
        self.site_offset
    }

    pub async fn list_images(&self, article_id: ArticleId) -> ApplicationResult<Vec<ArticleImageDto>> {
        let images = self.image_repo.list_by_article(article_id).await?;
        Ok(images
            .into_iter()
            .map(|image| {
                let url = self.media.url(&image.image);
                ArticleImageDto::from_image(image, url)
            })
            .collect())
    }
}
