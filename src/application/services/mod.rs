// src/application/services/mod.rs
use std::sync::Arc;

use chrono::FixedOffset;

use crate::{
    application::{
        admin::AdminSite,
        auth::AdminAuthenticator,
        commands::{
            articles::ArticleCommandService, categories::CategoryCommandService,
            images::ArticleImageCommandService, slug::SlugPrepopulator,
        },
        ports::{media::MediaStorage, time::Clock, util::SlugGenerator},
        queries::{articles::ArticleQueryService, categories::CategoryQueryService},
    },
    domain::{
        article::{ArticleImageRepository, ArticleReadRepository, ArticleWriteRepository},
        category::CategoryRepository,
    },
};

/// Everything the store and the outside world provide to the application.
pub struct ServiceDependencies {
    pub category_repo: Arc<dyn CategoryRepository>,
    pub article_write_repo: Arc<dyn ArticleWriteRepository>,
    pub article_read_repo: Arc<dyn ArticleReadRepository>,
    pub image_repo: Arc<dyn ArticleImageRepository>,
    pub media: Arc<dyn MediaStorage>,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
    pub admin_auth: Arc<AdminAuthenticator>,
    pub admin_site: Arc<AdminSite>,
    pub site_offset: FixedOffset,
}

pub struct ApplicationServices {
    pub article_queries: Arc<ArticleQueryService>,
    pub category_queries: Arc<CategoryQueryService>,
    pub article_commands: Arc<ArticleCommandService>,
    pub category_commands: Arc<CategoryCommandService>,
    pub image_commands: Arc<ArticleImageCommandService>,
    admin_site: Arc<AdminSite>,
    admin_auth: Arc<AdminAuthenticator>,
}

impl ApplicationServices {
    pub fn new(deps: ServiceDependencies) -> Self {
        let ServiceDependencies {
            category_repo,
            article_write_repo,
            article_read_repo,
            image_repo,
            media,
            clock,
            slugger,
            admin_auth,
            admin_site,
            site_offset,
        } = deps;

        let slugs = Arc::new(SlugPrepopulator::new(
            Arc::clone(&admin_site),
            Arc::clone(&slugger),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&image_repo),
            Arc::clone(&media),
            site_offset,
        ));
        let category_queries = Arc::new(CategoryQueryService::new(Arc::clone(&category_repo)));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&image_repo),
            Arc::clone(&category_repo),
            Arc::clone(&media),
            Arc::clone(&slugs),
            Arc::clone(&clock),
        ));
        let category_commands = Arc::new(CategoryCommandService::new(
            Arc::clone(&category_repo),
            Arc::clone(&slugs),
        ));
        let image_commands = Arc::new(ArticleImageCommandService::new(
            Arc::clone(&image_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&media),
        ));

        Self {
            article_queries,
            category_queries,
            article_commands,
            category_commands,
            image_commands,
            admin_site,
            admin_auth,
        }
    }

    pub fn admin_site(&self) -> Arc<AdminSite> {
        Arc::clone(&self.admin_site)
    }

    pub fn admin_auth(&self) -> Arc<AdminAuthenticator> {
        Arc::clone(&self.admin_auth)
    }
}
