use super::map_sqlx;
use crate::domain::article::{
    ArticleId, ArticleImage, ArticleImageId, ArticleImageRepository, ImageTitle, MediaPath,
    NewArticleImage,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

#[derive(Clone)]
pub struct SqliteArticleImageRepository {
    pool: SqlitePool,
}

impl SqliteArticleImageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleImageRow {
    id: i64,
    article_id: i64,
    title: String,
    image: String,
}

impl TryFrom<ArticleImageRow> for ArticleImage {
    type Error = DomainError;

    fn try_from(row: ArticleImageRow) -> Result<Self, Self::Error> {
        Ok(ArticleImage {
            id: ArticleImageId::new(row.id)?,
            article_id: ArticleId::new(row.article_id)?,
            title: ImageTitle::new(row.title)?,
            image: MediaPath::new(row.image)?,
        })
    }
}

#[async_trait]
impl ArticleImageRepository for SqliteArticleImageRepository {
    async fn insert(&self, image: NewArticleImage) -> DomainResult<ArticleImage> {
        let row = sqlx::query_as::<_, ArticleImageRow>(
            "INSERT INTO article_images (article_id, title, image) VALUES (?, ?, ?) RETURNING id, article_id, title, image",
        )
        .bind(i64::from(image.article_id))
        .bind(image.title.as_str())
        .bind(image.image.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        ArticleImage::try_from(row)
    }

    async fn delete(&self, id: ArticleImageId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM article_images WHERE id = ?")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("image not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ArticleImageId) -> DomainResult<Option<ArticleImage>> {
        let row = sqlx::query_as::<_, ArticleImageRow>(
            "SELECT id, article_id, title, image FROM article_images WHERE id = ?",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ArticleImage::try_from).transpose()
    }

    async fn list_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<ArticleImage>> {
        let rows = sqlx::query_as::<_, ArticleImageRow>(
            "SELECT id, article_id, title, image FROM article_images WHERE article_id = ? ORDER BY id",
        )
        .bind(i64::from(article_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(ArticleImage::try_from).collect()
    }
}
