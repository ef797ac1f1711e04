mod auth;

pub use auth::TOKEN_SAFETY_MARGIN_SECS;
pub use auth::TokenManager;
pub use auth::is_expiring;
