pub mod authenticator;
pub mod credentials;

pub use authenticator::{AuthError, Authenticator};
