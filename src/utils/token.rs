use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::AuthError;

/// Durée de validité d'un lien de reset: 1 heure
pub const RESET_TOKEN_MAX_AGE_SECS: i64 = 3600;

/// Chaîne de contexte qui réserve ces tokens au reset de mot de passe,
/// pour qu'un autre token signé par l'application ne soit jamais accepté ici
const RESET_PURPOSE: &str = "password-reset";

#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    sub: String, // email du compte
    purpose: String,
    iat: i64,
    exp: i64,
}

/// Service de tokens de reset: signés, auto-porteurs, limités dans le temps.
/// Aucun état serveur — la validité est purement cryptographique + horloge.
#[derive(Clone)]
pub struct ResetTokenService {
    secret: String,
}

impl ResetTokenService {
    pub fn new(secret_key: &str) -> Self {
        Self {
            secret: secret_key.to_string(),
        }
    }

    /// Émet un token signé embarquant l'email et l'heure d'émission
    pub fn issue(&self, email: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = ResetClaims {
            sub: email.to_string(),
            purpose: RESET_PURPOSE.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(RESET_TOKEN_MAX_AGE_SECS)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|_| AuthError::InvalidOrExpiredToken)
    }

    /// Valide un token et retourne l'email embarqué.
    /// Échoue si la signature est fausse, le payload malformé, le purpose
    /// inattendu ou le token expiré (aucune tolérance d'horloge)
    pub fn validate(&self, token: &str) -> Result<String, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<ResetClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map_err(|_| AuthError::InvalidOrExpiredToken)?;

        if data.claims.purpose != RESET_PURPOSE {
            return Err(AuthError::InvalidOrExpiredToken);
        }

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_validate_round_trip() {
        let service = ResetTokenService::new("test-secret");

        let token = service.issue("user@example.com").unwrap();
        let email = service.validate(&token).unwrap();

        assert_eq!(email, "user@example.com");
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = ResetTokenService::new("test-secret");

        assert!(matches!(
            service.validate("invalid.token.here"),
            Err(AuthError::InvalidOrExpiredToken)
        ));
    }

    #[test]
    fn test_token_signed_with_other_key_rejected() {
        let issuer = ResetTokenService::new("key-a");
        let verifier = ResetTokenService::new("key-b");

        let token = issuer.issue("user@example.com").unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = ResetTokenService::new("test-secret");

        // Token forgé avec une heure d'émission au-delà de la fenêtre
        let past = Utc::now() - Duration::seconds(RESET_TOKEN_MAX_AGE_SECS + 60);
        let claims = ResetClaims {
            sub: "user@example.com".to_string(),
            purpose: RESET_PURPOSE.to_string(),
            iat: past.timestamp(),
            exp: (past + Duration::seconds(RESET_TOKEN_MAX_AGE_SECS)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_ref()),
        )
        .unwrap();

        assert!(matches!(
            service.validate(&token),
            Err(AuthError::InvalidOrExpiredToken)
        ));
    }

    #[test]
    fn test_token_with_wrong_purpose_rejected() {
        let service = ResetTokenService::new("test-secret");

        let now = Utc::now();
        let claims = ResetClaims {
            sub: "user@example.com".to_string(),
            purpose: "email-verification".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(600)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_ref()),
        )
        .unwrap();

        assert!(service.validate(&token).is_err());
    }
}
