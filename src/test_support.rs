//! Shared fixtures for unit tests: in-memory store, failing repositories,
//! and a small request helper around `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::api;
use crate::repos::error::RepoResult;
use crate::repos::{DynUserRepository, RepoError, SqliteUserRepo, UserRepository, UserRow, db};
use crate::state::AppState;

pub async fn memory_pool() -> SqlitePool {
    let pool = db::connect("sqlite::memory:", 1).await.unwrap();
    db::migrate(&pool).await.unwrap();
    pool
}

/// Fresh store holding a single user, `joe`.
pub async fn seeded_repo() -> DynUserRepository {
    let repo = SqliteUserRepo::new(memory_pool().await);
    repo.add_user("joe").await.unwrap();
    Arc::new(repo)
}

pub fn broken_repo() -> DynUserRepository {
    Arc::new(BrokenRepo)
}

/// Value for an `Authorization` header; the password is always empty.
pub fn basic_auth(username: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:")))
}

pub fn app(state: AppState) -> Router {
    api::routes(state.clone()).with_state(state)
}

pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(req).await.unwrap()
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, String) {
    let res = send_raw(app, method, uri, auth, body).await;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Every call fails as if the connection pool were gone.
struct BrokenRepo;

#[async_trait]
impl UserRepository for BrokenRepo {
    async fn add_user(&self, _nickname: &str) -> RepoResult<UserRow> {
        Err(RepoError::Db(sqlx::Error::PoolClosed))
    }

    async fn get_by_nickname(&self, _nickname: &str) -> RepoResult<UserRow> {
        Err(RepoError::Db(sqlx::Error::PoolClosed))
    }

    async fn change_nickname(&self, _user: &UserRow, _new_nickname: &str) -> RepoResult<()> {
        Err(RepoError::Db(sqlx::Error::PoolClosed))
    }
}

/// Reads succeed against a store seeded with `joe`; renames always fail.
pub struct RenameFailsRepo {
    inner: SqliteUserRepo,
}

impl RenameFailsRepo {
    pub async fn new() -> Self {
        let inner = SqliteUserRepo::new(memory_pool().await);
        inner.add_user("joe").await.unwrap();
        Self { inner }
    }
}

#[async_trait]
impl UserRepository for RenameFailsRepo {
    async fn add_user(&self, nickname: &str) -> RepoResult<UserRow> {
        self.inner.add_user(nickname).await
    }

    async fn get_by_nickname(&self, nickname: &str) -> RepoResult<UserRow> {
        self.inner.get_by_nickname(nickname).await
    }

    async fn change_nickname(&self, _user: &UserRow, _new_nickname: &str) -> RepoResult<()> {
        Err(RepoError::Db(sqlx::Error::PoolClosed))
    }
}
