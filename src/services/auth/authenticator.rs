//! Identity resolution: request credentials → stored user.
//!
//! `resolve_identity` is the single place a credential scheme is interpreted.
//! Both the inline handler path and the Basic middleware call it, so adding a
//! scheme (token, signed cookie, ...) means extending `Credentials` and this
//! function only.

use axum::http::HeaderMap;
use thiserror::Error;

use crate::repos::{DynUserRepository, RepoError, UserRow};
use crate::services::auth::credentials::Credentials;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no user credentials provided")]
    NoCredentials,

    #[error("no user found")]
    UnknownUser,

    #[error(transparent)]
    Repo(RepoError),
}

#[derive(Clone)]
pub struct Authenticator {
    users: DynUserRepository,
}

impl Authenticator {
    pub fn new(users: DynUserRepository) -> Self {
        Self { users }
    }

    pub async fn resolve_identity(&self, headers: &HeaderMap) -> Result<UserRow, AuthError> {
        let credentials = Credentials::from_headers(headers).ok_or(AuthError::NoCredentials)?;

        match self.users.get_by_nickname(credentials.username()).await {
            Ok(user) => Ok(user),
            Err(RepoError::NotFound) => Err(AuthError::UnknownUser),
            Err(err) => Err(AuthError::Repo(err)),
        }
    }
}
