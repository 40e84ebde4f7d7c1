mod auth;

pub use auth::{SESSION_COOKIE, SessionUser};
