use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleDescription, ArticleFilter, ArticleId, ArticleReadRepository, ArticleSlug,
    ArticleTitle, ArticleWithCategory, ArticleWriteRepository, NewArticle,
};
use crate::domain::category::{Category, CategoryId, CategoryName, CategorySlug};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

const ARTICLE_COLUMNS: &str = "id, title, description, slug, pub_date, main_page, category_id";

const JOINED_SELECT: &str = "SELECT a.id, a.title, a.description, a.slug, a.pub_date, a.main_page, a.category_id, \
     c.category AS category_name, c.slug AS category_slug \
     FROM articles a LEFT JOIN categories c ON c.id = a.category_id";

#[derive(Clone)]
pub struct SqliteArticleWriteRepository {
    pool: SqlitePool,
}

impl SqliteArticleWriteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct SqliteArticleReadRepository {
    pool: SqlitePool,
}

impl SqliteArticleReadRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    description: String,
    slug: String,
    pub_date: DateTime<Utc>,
    main_page: bool,
    category_id: Option<i64>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            description: ArticleDescription::new(row.description),
            slug: ArticleSlug::new(row.slug)?,
            pub_date: row.pub_date,
            main_page: row.main_page,
            category_id: row.category_id.map(CategoryId::new).transpose()?,
        })
    }
}

#[derive(Debug, FromRow)]
struct ArticleWithCategoryRow {
    #[sqlx(flatten)]
    article: ArticleRow,
    category_name: Option<String>,
    category_slug: Option<String>,
}

impl TryFrom<ArticleWithCategoryRow> for ArticleWithCategory {
    type Error = DomainError;

    fn try_from(row: ArticleWithCategoryRow) -> Result<Self, Self::Error> {
        let category = match (row.article.category_id, row.category_name, row.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(Category {
                id: CategoryId::new(id)?,
                name: CategoryName::new(name)?,
                slug: CategorySlug::new(slug)?,
            }),
            _ => None,
        };

        Ok(ArticleWithCategory {
            article: Article::try_from(row.article)?,
            category,
        })
    }
}

#[async_trait]
impl ArticleWriteRepository for SqliteArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            description,
            slug,
            pub_date,
            main_page,
            category_id,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (title, description, slug, pub_date, main_page, category_id) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(description.as_str())
        .bind(slug.as_str())
        .bind(pub_date)
        .bind(main_page)
        .bind(category_id.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, id: ArticleId, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            description,
            slug,
            pub_date,
            main_page,
            category_id,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "UPDATE articles SET title = ?, description = ?, slug = ?, pub_date = ?, main_page = ?, category_id = ? \
             WHERE id = ? RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(description.as_str())
        .bind(slug.as_str())
        .bind(pub_date)
        .bind(main_page)
        .bind(category_id.map(i64::from))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        Article::try_from(row)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for SqliteArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<ArticleWithCategory>> {
        let row = sqlx::query_as::<_, ArticleWithCategoryRow>(&format!(
            "{JOINED_SELECT} WHERE a.id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ArticleWithCategory::try_from).transpose()
    }

    async fn list(&self, filter: &ArticleFilter) -> DomainResult<Vec<ArticleWithCategory>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(JOINED_SELECT);
        match filter {
            ArticleFilter::All => {}
            ArticleFilter::MainPage => {
                builder.push(" WHERE a.main_page = 1");
            }
            ArticleFilter::CategorySlug(slug) => {
                builder.push(" WHERE c.slug = ");
                builder.push_bind(slug.as_str());
            }
        }
        builder.push(" ORDER BY a.pub_date DESC, a.id DESC");

        let rows = builder
            .build_query_as::<ArticleWithCategoryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter()
            .map(ArticleWithCategory::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn find_by_slug_published_between(
        &self,
        slug: &ArticleSlug,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> DomainResult<Option<ArticleWithCategory>> {
        let row = sqlx::query_as::<_, ArticleWithCategoryRow>(&format!(
            "{JOINED_SELECT} WHERE a.slug = ? AND a.pub_date >= ? AND a.pub_date < ? \
             ORDER BY a.id LIMIT 1"
        ))
        .bind(slug.as_str())
        .bind(from)
        .bind(until)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ArticleWithCategory::try_from).transpose()
    }
}
