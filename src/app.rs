/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → DB 接続・migrate・seed → Router 組み立て
 * - HTTP middleware の適用 (request-id / trace / limit / timeout)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokio::net::TcpListener;

use crate::config::Config;
use crate::repos::{RepoError, SqliteUserRepo, UserRepository, db};
use crate::state::AppState;
use crate::{api, middleware};

const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash the whole process so it gets noticed
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = bind_listener(&config).await?;
    tracing::info!(
        app_env = ?config.app_env,
        addr = %listener.local_addr()?,
        "nickname API listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

// (host, port) goes through the resolver, so HOST may be a name such as `localhost`.
async fn bind_listener(config: &Config) -> Result<TcpListener> {
    TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("binding {}:{}", config.host, config.port))
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = db::connect(&config.database_url, config.database_max_connections)
        .await
        .context("opening database failed")?;
    db::migrate(&pool).await.context("migrating users table failed")?;

    let users = SqliteUserRepo::new(pool);
    seed_users(&users, &config.seed_users).await?;

    Ok(AppState::new(Arc::new(users)))
}

// Users are created out of band; this only covers local setups.
async fn seed_users(users: &impl UserRepository, nicknames: &[String]) -> Result<()> {
    for nickname in nicknames {
        match users.add_user(nickname).await {
            Ok(user) => tracing::info!(%nickname, user_id = %user.id, "seeded user"),
            Err(RepoError::Conflict) => tracing::info!(%nickname, "user already exists"),
            Err(err) => {
                return Err(anyhow::Error::new(err).context(format!("seeding user {nickname}")));
            }
        }
    }
    Ok(())
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, config.request_timeout, config.request_body_limit)
}
