use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::AuthError;
use crate::models::sessions::{ActiveModel as SessionActiveModel, Column, Entity as Sessions};

/// Durée de vie d'une session navigateur
const SESSION_TTL_HOURS: i64 = 24;

pub struct SessionService;

impl SessionService {
    /// Ouvre une session pour un compte et retourne le token brut
    /// à poser en cookie. Seul son hash part en base
    pub async fn start(db: &DatabaseConnection, email: &str) -> Result<String, AuthError> {
        let raw_token = Uuid::new_v4().to_string();
        let now = Utc::now();

        let session = SessionActiveModel {
            token_hash: Set(hash_token(&raw_token)),
            email: Set(email.to_string()),
            created_at: Set(now),
            expires_at: Set(now + Duration::hours(SESSION_TTL_HOURS)),
        };
        session.insert(db).await?;

        Ok(raw_token)
    }

    /// Résout un token de cookie en identité. Retourne Unauthorized si le
    /// token est inconnu ou la session expirée (la ligne expirée est purgée)
    pub async fn current(db: &DatabaseConnection, raw_token: &str) -> Result<String, AuthError> {
        let token_hash = hash_token(raw_token);

        let session = Sessions::find_by_id(token_hash.clone())
            .one(db)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if session.expires_at < Utc::now() {
            // Purge paresseuse
            Sessions::delete_by_id(token_hash).exec(db).await?;
            return Err(AuthError::Unauthorized);
        }

        Ok(session.email)
    }

    /// Ferme la session associée au token (idempotent)
    pub async fn end(db: &DatabaseConnection, raw_token: &str) -> Result<(), AuthError> {
        Sessions::delete_by_id(hash_token(raw_token)).exec(db).await?;
        Ok(())
    }

    /// Invalide toutes les sessions d'un compte (utilisé après un reset
    /// de mot de passe)
    pub async fn end_all_for(db: &DatabaseConnection, email: &str) -> Result<(), AuthError> {
        Sessions::delete_many()
            .filter(Column::Email.eq(email))
            .exec(db)
            .await?;
        Ok(())
    }
}

/// SHA-256 hex du token; jamais de comparaison de token brut côté base
fn hash_token(raw_token: &str) -> String {
    let digest = Sha256::digest(raw_token.as_bytes());
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_and_hex() {
        let h1 = hash_token("some-token");
        let h2 = hash_token("some-token");

        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(h1, hash_token("other-token"));
    }
}
