/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / plain text body)
 * - AuthError / RepoError を統一的に変換 (DB の詳細はクライアントに出さない)
 */
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::AuthError;

const BASIC_CHALLENGE: &str = r#"Basic realm="nicknames""#;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no user credentials provided")]
    NoCredentials,
    #[error("no user found")]
    UnknownUser,
    // Authorization failure; answered with 401 like the authentication failures.
    #[error("You cannot change the Nickname for this account!")]
    AuthorizationMismatch,
    #[error("Nickname cannot be empty")]
    EmptyNickname,
    #[error("Oops! Try again later.")]
    StorageFailure,
    // The auth middleware did not run in front of a handler that needs AuthCtx.
    #[error("Oops. Please try again later.")]
    IdentityMissing,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NoCredentials | AppError::UnknownUser | AppError::AuthorizationMismatch => {
                StatusCode::UNAUTHORIZED
            }
            AppError::EmptyNickname => StatusCode::BAD_REQUEST,
            AppError::StorageFailure | AppError::IdentityMissing => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn is_authentication_failure(&self) -> bool {
        matches!(self, AppError::NoCredentials | AppError::UnknownUser)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let challenge = self.is_authentication_failure();

        let mut res = (status, self.to_string()).into_response();
        if challenge {
            res.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_CHALLENGE),
            );
        }
        res
    }
}

impl From<RepoError> for AppError {
    fn from(_: RepoError) -> Self {
        AppError::StorageFailure
    }
}

// Shared by the inline and the middleware identity paths.
impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::NoCredentials => {
                tracing::warn!("authentication rejected: no credentials");
                AppError::NoCredentials
            }
            AuthError::UnknownUser => {
                tracing::warn!("authentication rejected: unknown user");
                AppError::UnknownUser
            }
            AuthError::Repo(err) => {
                tracing::error!(error = ?err, "user lookup failed during authentication");
                err.into()
            }
        }
    }
}
