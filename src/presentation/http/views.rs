// src/presentation/http/views.rs
//! Server-rendered public pages.

use crate::application::{
    dto::{ArticleDto, ArticleImageDto, CategoryDto},
    queries::articles::{GetArticleByDateQuery, ListArticlesByCategoryQuery},
};
use crate::presentation::http::{
    error::{IntoPageResult, PageResult},
    state::HttpState,
    urls::Route,
};
use axum::{Extension, response::Html};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use tera::Context;

pub const INDEX_TEMPLATE: &str = "index.html";
pub const LIST_TEMPLATE: &str = "articles_list.html";
pub const DETAIL_TEMPLATE: &str = "article_detail.html";

/// An article as templates see it: the stored fields plus reversed links.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleContext {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub pub_date: DateTime<Utc>,
    pub main_page: bool,
    pub url: String,
    pub category: Option<CategoryContext>,
    pub images: Vec<ArticleImageDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryContext {
    pub id: i64,
    pub category: String,
    pub slug: String,
    pub url: String,
}

impl From<CategoryDto> for CategoryContext {
    fn from(category: CategoryDto) -> Self {
        let url = Route::category(category.slug.as_str()).path();
        Self {
            id: category.id,
            category: category.category,
            slug: category.slug,
            url,
        }
    }
}

impl ArticleContext {
    pub fn new(article: ArticleDto, offset: FixedOffset) -> Self {
        let url = Route::news_detail(article.pub_date, offset, article.slug.as_str()).path();
        Self {
            id: article.id,
            title: article.title,
            description: article.description,
            slug: article.slug,
            pub_date: article.pub_date,
            main_page: article.main_page,
            url,
            category: article.category.map(CategoryContext::from),
            images: article.images,
        }
    }
}

/// Handler for every pattern in the URL table; the path is resolved again
/// by the [`Route`] extractor.
pub async fn page(Extension(state): Extension<HttpState>, route: Route) -> PageResult<Html<String>> {
    match route {
        Route::Home => home(&state).await,
        Route::ArticlesList => articles_list(&state).await,
        Route::ArticlesCategoryList { slug } => articles_category_list(&state, slug).await,
        Route::NewsDetail {
            year,
            month,
            day,
            slug,
        } => {
            news_detail(
                &state,
                GetArticleByDateQuery {
                    year,
                    month,
                    day,
                    slug,
                },
            )
            .await
        }
    }
}

async fn home(state: &HttpState) -> PageResult<Html<String>> {
    let articles = state
        .services
        .article_queries
        .list_main_page_articles()
        .await
        .into_page()?;
    render_items(state, INDEX_TEMPLATE, articles)
}

async fn articles_list(state: &HttpState) -> PageResult<Html<String>> {
    let articles = state
        .services
        .article_queries
        .list_articles()
        .await
        .into_page()?;
    render_items(state, LIST_TEMPLATE, articles)
}

async fn articles_category_list(state: &HttpState, slug: String) -> PageResult<Html<String>> {
    let articles = state
        .services
        .article_queries
        .list_articles_by_category(ListArticlesByCategoryQuery { slug })
        .await
        .into_page()?;
    render_items(state, LIST_TEMPLATE, articles)
}

async fn news_detail(state: &HttpState, query: GetArticleByDateQuery) -> PageResult<Html<String>> {
    let queries = &state.services.article_queries;
    let article = queries.get_article_by_date(query).await.into_page()?;

    let mut context = Context::new();
    context.insert("item", &ArticleContext::new(article, queries.site_offset()));
    render(state, DETAIL_TEMPLATE, &context)
}

fn render_items(
    state: &HttpState,
    template: &str,
    articles: Vec<ArticleDto>,
) -> PageResult<Html<String>> {
    let offset = state.services.article_queries.site_offset();
    let items: Vec<ArticleContext> = articles
        .into_iter()
        .map(|article| ArticleContext::new(article, offset))
        .collect();

    let mut context = Context::new();
    context.insert("items", &items);
    render(state, template, &context)
}

fn render(state: &HttpState, template: &str, context: &Context) -> PageResult<Html<String>> {
    let html = state.renderer.render(template, context)?;
    Ok(Html(html))
}
