/*
 * Responsibility
 * - nickname 変更の request DTO (form-urlencoded)
 * - validation (空文字チェック) 用の validate() を持たせる
 */
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ChangeNicknameRequest {
    // Missing field behaves like an empty one.
    #[serde(default)]
    pub nickname: String,
}

impl ChangeNicknameRequest {
    /// Returns the trimmed new nickname, or an error if nothing is left.
    pub fn validate(&self) -> Result<&str, &'static str> {
        let nickname = self.nickname.trim();
        if nickname.is_empty() {
            return Err("nickname cannot be empty");
        }
        Ok(nickname)
    }
}
