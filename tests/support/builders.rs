// tests/support/builders.rs
use app_blog::application::{
    commands::{articles::SaveArticleCommand, categories::SaveCategoryCommand},
    dto::{ArticleDto, CategoryDto},
};
use chrono::{DateTime, Utc};

use super::helpers::TestApp;

pub struct CategoryBuilder {
    name: String,
    slug: Option<String>,
}

impl CategoryBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
        }
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub async fn insert(self, app: &TestApp) -> CategoryDto {
        app.services
            .category_commands
            .create_category(SaveCategoryCommand {
                category: self.name,
                slug: self.slug,
            })
            .await
            .unwrap()
    }
}

pub struct ArticleBuilder {
    title: String,
    slug: Option<String>,
    description: String,
    pub_date: Option<DateTime<Utc>>,
    main_page: bool,
    category_id: Option<i64>,
}

impl ArticleBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: None,
            description: "Test body".into(),
            pub_date: None,
            main_page: false,
            category_id: None,
        }
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn pub_date(mut self, rfc3339: &str) -> Self {
        let parsed = DateTime::parse_from_rfc3339(rfc3339).unwrap();
        self.pub_date = Some(parsed.with_timezone(&Utc));
        self
    }

    pub fn main_page(mut self) -> Self {
        self.main_page = true;
        self
    }

    pub fn category(mut self, category: &CategoryDto) -> Self {
        self.category_id = Some(category.id);
        self
    }

    pub fn command(self) -> SaveArticleCommand {
        SaveArticleCommand {
            title: self.title,
            description: self.description,
            slug: self.slug,
            pub_date: self.pub_date,
            main_page: self.main_page,
            category_id: self.category_id,
        }
    }

    pub async fn insert(self, app: &TestApp) -> ArticleDto {
        app.services
            .article_commands
            .create_article(self.command())
            .await
            .unwrap()
    }
}
