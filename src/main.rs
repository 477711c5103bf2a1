use app_blog::application::{
    admin::AdminSite,
    auth::AdminAuthenticator,
    ports::{media::MediaStorage, security::PasswordVerifier, time::Clock, util::SlugGenerator},
    services::{ApplicationServices, ServiceDependencies},
};
use app_blog::config::AppConfig;
use app_blog::domain::{
    article::{ArticleImageRepository, ArticleReadRepository, ArticleWriteRepository},
    category::CategoryRepository,
};
use app_blog::infrastructure::{
    database,
    media::LocalMediaStorage,
    repositories::{
        SqliteArticleImageRepository, SqliteArticleReadRepository, SqliteArticleWriteRepository,
        SqliteCategoryRepository,
    },
    security::password::Argon2PasswordVerifier,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use app_blog::presentation::{
    http::{
        routes::{RouterOptions, build_router},
        state::HttpState,
    },
    templates::{TemplateRenderer, TeraRenderer},
};
use anyhow::{Context, Result};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url())
        .await
        .with_context(|| format!("opening {}", config.database_url()))?;
    database::run_migrations(&pool).await?;

    let category_repo: Arc<dyn CategoryRepository> =
        Arc::new(SqliteCategoryRepository::new(pool.clone()));
    let article_write_repo: Arc<dyn ArticleWriteRepository> =
        Arc::new(SqliteArticleWriteRepository::new(pool.clone()));
    let article_read_repo: Arc<dyn ArticleReadRepository> =
        Arc::new(SqliteArticleReadRepository::new(pool.clone()));
    let image_repo: Arc<dyn ArticleImageRepository> =
        Arc::new(SqliteArticleImageRepository::new(pool.clone()));

    let media: Arc<dyn MediaStorage> = Arc::new(LocalMediaStorage::new(
        config.media_root().clone(),
        config.media_url(),
    ));
    if let Some(hash) = config.admin_password_hash() {
        Argon2PasswordVerifier::check_phc(hash).context("ADMIN_PASSWORD_HASH")?;
    }
    let password_verifier: Arc<dyn PasswordVerifier> = Arc::new(Argon2PasswordVerifier);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::default());
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator::default());

    let admin_auth = Arc::new(AdminAuthenticator::new(
        config.admin_username(),
        config.admin_password_hash().map(str::to_string),
        Arc::clone(&password_verifier),
    ));
    if !admin_auth.is_enabled() {
        tracing::warn!("ADMIN_PASSWORD_HASH is not set; the admin API will reject every request");
    }

    let services = Arc::new(ApplicationServices::new(ServiceDependencies {
        category_repo,
        article_write_repo,
        article_read_repo,
        image_repo,
        media,
        clock,
        slugger,
        admin_auth,
        admin_site: Arc::new(AdminSite::blog()?),
        site_offset: config.site_offset(),
    }));

    let renderer: Arc<dyn TemplateRenderer> = Arc::new(
        TeraRenderer::from_dir(config.template_dir())
            .with_context(|| format!("loading templates from {}", config.template_dir().display()))?,
    );

    let state = HttpState { services, renderer };
    let options = RouterOptions {
        allowed_origins: config.allowed_origins().to_vec(),
        max_upload_bytes: config.max_upload_bytes(),
    };

    let app = build_router(state, options)
        .nest_service(config.media_url(), ServeDir::new(config.media_root()));

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
