/*
 * Responsibility
 * - URL 構造を定義
 * - /user/{nick} は同じ処理を 2 通りの identity 受け渡しで公開する
 *   - PATCH: handler 内で認証
 *   - PUT  : Basic 認証 middleware → AuthCtx (PUT にだけ route_layer)
 */
use axum::{
    Router,
    routing::{get, patch, put},
};

use crate::api::handlers::{
    health::health,
    users::{change_nickname, change_nickname_ctx},
};
use crate::middleware::auth::basic;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let put_ctx = basic::apply(put(change_nickname_ctx), state);

    Router::new()
        .route("/health", get(health))
        .route("/user/{nick}", patch(change_nickname).merge(put_ctx))
}
