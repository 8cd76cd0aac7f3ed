/*
 * Responsibility
 * - users テーブルの永続化契約 (UserRepository) と SQLx 実装
 * - nickname の一意性は DB の UNIQUE 制約に任せる
 * - DB エラーは RepoError に変換して返す
 */
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage capabilities the authenticator and the nickname handlers rely on.
///
/// Implementations must tolerate concurrent callers; row-level ordering is left
/// to the backend.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    // Insert a new user. Fails with `Conflict` when the nickname is taken.
    async fn add_user(&self, nickname: &str) -> RepoResult<UserRow>;

    // Look a user up by nickname. Fails with `NotFound` when absent.
    async fn get_by_nickname(&self, nickname: &str) -> RepoResult<UserRow>;

    // Rename `user`. Fails with `Conflict` when `new_nickname` is taken.
    async fn change_nickname(&self, user: &UserRow, new_nickname: &str) -> RepoResult<()>;
}

pub type DynUserRepository = Arc<dyn UserRepository>;

#[derive(Clone, Debug)]
pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn add_user(&self, nickname: &str) -> RepoResult<UserRow> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, nickname, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, nickname, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nickname)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn get_by_nickname(&self, nickname: &str) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, nickname, created_at, updated_at
            FROM users
            WHERE nickname = ?
            "#,
        )
        .bind(nickname)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepoError::NotFound)
    }

    async fn change_nickname(&self, user: &UserRow, new_nickname: &str) -> RepoResult<()> {
        let res = sqlx::query(
            r#"
            UPDATE users
            SET nickname = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(new_nickname)
        .bind(Utc::now())
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        if res.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
