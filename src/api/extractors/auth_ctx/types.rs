/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - extensions は型をキーにするので、取り出した値の形が違うということは起こらない
 * - 残る失敗は「middleware が掛かっていない」だけ (extractor 側で 500 にする)
 */
use crate::repos::UserRow;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user` は認証時点でストアから取得したレコード (リクエスト内でのみ有効)
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user: UserRow,
}

impl AuthCtx {
    pub fn new(user: UserRow) -> Self {
        Self { user }
    }
}
