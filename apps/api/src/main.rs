use http::{HeaderName, HeaderValue, Method, header};
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use travelog::{
    config::{Config, StorageBackend},
    domain::{account::repository::AccountRepository, entry::repository::ContentRepository},
    infrastructure::{
        database::pool::create_pool,
        repositories::{
            memory_account_repository::InMemoryAccountRepository,
            memory_content_repository::InMemoryContentRepository,
            sqlx_account_repository::SqlxAccountRepository,
            sqlx_content_repository::SqlxContentRepository,
        },
        storage::{
            local_storage_service::LocalStorageService, s3_storage_service::S3StorageService,
            traits::StorageService,
        },
    },
    presentation::http::{
        middleware::caller::GUEST_AUTH_HEADER, routes::create_router, state::AppState,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,travelog=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;

    let (content_repo, account_repo): (Arc<dyn ContentRepository>, Arc<dyn AccountRepository>) =
        match &config.database_url {
            Some(url) => {
                let db = create_pool(url, config.database_max_connections).await?;
                let mut migrator = sqlx::migrate!("./migrations");
                migrator.set_ignore_missing(config.ignore_missing_migrations);
                migrator.run(&db).await?;
                (
                    Arc::new(SqlxContentRepository::new(db.clone())),
                    Arc::new(SqlxAccountRepository::new(db)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, documents are kept in memory only");
                (
                    Arc::new(InMemoryContentRepository::new()),
                    Arc::new(InMemoryAccountRepository::new()),
                )
            }
        };

    let storage: Arc<dyn StorageService> = match &config.storage {
        StorageBackend::Local {
            upload_dir,
            public_base_url,
        } => Arc::new(LocalStorageService::new(upload_dir, public_base_url).await?),
        StorageBackend::S3(settings) => Arc::new(S3StorageService::new(settings.clone())),
    };

    let redis = config
        .redis_url
        .as_deref()
        .map(redis::Client::open)
        .transpose()?;
    if redis.is_none() {
        tracing::info!("REDIS_URL not set, upload rate limiting disabled");
    }

    let state = AppState::new(
        config.clone(),
        content_repo,
        account_repo,
        storage,
        redis,
    );

    if let (Some(username), Some(hash)) = (&config.admin_username, &config.admin_password_hash) {
        state.accounts.bootstrap_admin(username, hash).await?;
    }

    let allow_origin = if config.allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .map(|origin| origin.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?,
        )
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::RANGE,
            HeaderName::from_static(GUEST_AUTH_HEADER),
        ])
        .max_age(Duration::from_secs(3600));

    let app = create_router(state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Travel journal API listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
