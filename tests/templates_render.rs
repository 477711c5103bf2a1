// tests/templates_render.rs
use app_blog::application::dto::{ArticleDto, ArticleImageDto, CategoryDto};
use app_blog::presentation::http::views::{
    ArticleContext, DETAIL_TEMPLATE, INDEX_TEMPLATE, LIST_TEMPLATE,
};
use app_blog::presentation::templates::{TemplateRenderer, TeraRenderer};
use chrono::{FixedOffset, TimeZone, Utc};
use tera::Context;

fn renderer() -> TeraRenderer {
    TeraRenderer::from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/templates")).unwrap()
}

/// Undo HTML escaping of `/` so links can be compared literally.
fn unescape(html: &str) -> String {
    html.replace("&#x2F;", "/")
}

fn article() -> ArticleDto {
    ArticleDto {
        id: 1,
        title: "Test <Article>".into(),
        description: "First line\nSecond line".into(),
        slug: "test-article".into(),
        pub_date: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        main_page: true,
        category: Some(CategoryDto {
            id: 3,
            category: "Test Category".into(),
            slug: "test-category".into(),
        }),
        images: vec![ArticleImageDto {
            id: 9,
            article_id: 1,
            title: "Cover".into(),
            image: "article_images/cover.png".into(),
            url: "/media/article_images/cover.png".into(),
        }],
    }
}

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

#[test]
fn all_page_templates_are_loaded() {
    let renderer = renderer();
    let names: Vec<&str> = renderer.template_names().collect();
    for template in [INDEX_TEMPLATE, LIST_TEMPLATE, DETAIL_TEMPLATE] {
        assert!(names.contains(&template), "{template} not loaded");
    }
}

#[test]
fn list_links_articles_and_categories() {
    let mut context = Context::new();
    context.insert("items", &vec![ArticleContext::new(article(), utc())]);

    let html = unescape(&renderer().render(LIST_TEMPLATE, &context).unwrap());
    assert!(html.contains("href=\"/articles/2024/1/15/test-article/\""));
    assert!(html.contains("href=\"/articles/category/test-category/\""));
    assert!(html.contains("15.01.2024"));
    assert!(html.contains("Test &lt;Article&gt;"));
}

#[test]
fn empty_list_renders_placeholder() {
    let mut context = Context::new();
    context.insert("items", &Vec::<ArticleContext>::new());

    let html = renderer().render(INDEX_TEMPLATE, &context).unwrap();
    assert!(!html.contains("article-card"));
}

#[test]
fn detail_shows_images_and_escapes_description() {
    let mut item = article();
    item.description = "<script>alert(1)</script>\nok".into();

    let mut context = Context::new();
    context.insert("item", &ArticleContext::new(item, utc()));

    let html = unescape(&renderer().render(DETAIL_TEMPLATE, &context).unwrap());
    assert!(html.contains("src=\"/media/article_images/cover.png\""));
    assert!(html.contains("<br>"));
    assert!(!html.contains("<script>"));
}
