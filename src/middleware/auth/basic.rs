//! Basic 認証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Basic ...` から identity を解決し、失敗したら handler を呼ばずに 401 を返す
//! - 成功したら `AuthCtx` を request extensions に insert して次へ渡す
//! - password は検証しない (username でユーザーを引くだけ)

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Put Basic authentication in front of every method of `method_router`.
///
/// ```ignore
/// let put = middleware::auth::basic::apply(put(handler), state.clone());
/// ```
pub fn apply(method_router: MethodRouter<AppState>, state: AppState) -> MethodRouter<AppState> {
    method_router.route_layer(middleware::from_fn_with_state(state, basic_auth_middleware))
}

async fn basic_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // 失敗時はここで打ち切り。handler は呼ばれない
    let user = state.authn.resolve_identity(req.headers()).await?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(user));

    Ok(next.run(req).await)
}
