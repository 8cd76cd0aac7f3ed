/*
 * Responsibility
 * - /user/{nick} の nickname 変更 handler (2 通り)
 *   - PATCH: handler 内で Authenticator を直接呼ぶ (inline)
 *   - PUT  : middleware が積んだ AuthCtx を extractor で受け取る
 * - 認可 (path の nick == 認証ユーザー) → validation → repo 呼び出しは共通処理
 */
use axum::{
    Form,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
    http::HeaderMap,
};

use crate::{
    api::{dto::users::ChangeNicknameRequest, extractors::AuthCtxExtractor},
    error::AppError,
    repos::UserRow,
    state::AppState,
};

pub const NICKNAME_CHANGED: &str = "Nickname successfully changed";

/// PATCH /user/{nick}
///
/// Authentication is visible right here: the handler resolves the caller
/// itself before doing anything else.
pub async fn change_nickname(
    State(state): State<AppState>,
    nick: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    form: Result<Form<ChangeNicknameRequest>, FormRejection>,
) -> Result<&'static str, AppError> {
    let user = state.authn.resolve_identity(&headers).await?;

    apply_nickname_change(&state, &user, nick, form).await
}

/// PUT /user/{nick}
///
/// Relies on `middleware::auth::basic` having stored an `AuthCtx` for this
/// request. Without it the extractor fails with `IdentityMissing`.
pub async fn change_nickname_ctx(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    nick: Result<Path<String>, PathRejection>,
    form: Result<Form<ChangeNicknameRequest>, FormRejection>,
) -> Result<&'static str, AppError> {
    apply_nickname_change(&state, &ctx.user, nick, form).await
}

async fn apply_nickname_change(
    state: &AppState,
    user: &UserRow,
    path_nick: Result<Path<String>, PathRejection>,
    form: Result<Form<ChangeNicknameRequest>, FormRejection>,
) -> Result<&'static str, AppError> {
    // 認可: 自分の nickname しか変更できない
    // An undecodable path segment cannot name the caller either.
    let path_nick = match path_nick {
        Ok(Path(nick)) => nick,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "undecodable path nickname");
            return Err(AppError::AuthorizationMismatch);
        }
    };
    if path_nick.trim() != user.nickname {
        return Err(AppError::AuthorizationMismatch);
    }

    // Missing or non-form bodies count as an empty nickname.
    let req = match form {
        Ok(Form(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "no usable form body");
            ChangeNicknameRequest::default()
        }
    };
    let new_nick = req.validate().map_err(|_| AppError::EmptyNickname)?;

    state
        .users
        .change_nickname(user, new_nick)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, user_id = %user.id, "error changing user nickname");
            AppError::from(e)
        })?;

    Ok(NICKNAME_CHANGED)
}
