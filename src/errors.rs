use thiserror::Error;

/// Erreurs métier de l'application, rattrapées au niveau des handlers
/// et transformées en flash + redirect (jamais fatales pour le process)
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    DuplicateAccount,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("The reset link is invalid or has expired")]
    InvalidOrExpiredToken,

    #[error("Failed to send email")]
    DeliveryFailure,

    #[error("Email not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Password hashing error: {0}")]
    Hash(String),
}
