/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: Basic 認証 → AuthCtx, http: request-id / trace / limit / timeout
 */
pub mod auth;
pub mod http;
