/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - users: UserRepository, authn: Authenticator
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::DynUserRepository;
use crate::services::auth::Authenticator;

#[derive(Clone)]
pub struct AppState {
    pub users: DynUserRepository,
    pub authn: Arc<Authenticator>,
}

impl AppState {
    pub fn new(users: DynUserRepository) -> Self {
        let authn = Arc::new(Authenticator::new(users.clone()));
        Self { users, authn }
    }
}
