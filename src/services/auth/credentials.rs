//! Credential extraction from request headers.
//!
//! Only HTTP Basic is understood today. The password half is carried along but
//! nothing checks it; identity is decided by the username alone.

use axum::http::{HeaderMap, header};
use base64::{Engine as _, engine::general_purpose::STANDARD};

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
}

impl Credentials {
    /// Parse `Authorization: Basic <base64(user:pass)>`.
    ///
    /// Returns `None` when the header is absent or malformed (wrong scheme,
    /// bad base64, non UTF-8, no `:` separator).
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        Self::parse_basic(value)
    }

    fn parse_basic(value: &str) -> Option<Self> {
        const PREFIX: &str = "Basic ";

        // Scheme name is case-insensitive.
        let scheme = value.get(..PREFIX.len())?;
        if !scheme.eq_ignore_ascii_case(PREFIX) {
            return None;
        }

        let decoded = STANDARD.decode(value[PREFIX.len()..].trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self::Basic {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        match self {
            Self::Basic { username, .. } => username,
        }
    }
}

// Keep passwords out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
