use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::Rng;
use sha2::Sha256;

use crate::errors::AuthError;

type HmacSha256 = Hmac<Sha256>;

const ITERATIONS: u32 = 260_000;
const SALT_LENGTH: usize = 16;
const KEY_LENGTH: usize = 32;

/// Hash un mot de passe au format Werkzeug: pbkdf2:sha256:iterations$salt$hash
/// PBKDF2-HMAC-SHA256, salt aléatoire de 16 bytes, encodage base64 URL-safe
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill(&mut salt);

    let mut key = [0u8; KEY_LENGTH];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, ITERATIONS, &mut key)
        .map_err(|e| AuthError::Hash(format!("PBKDF2 failed: {e}")))?;

    Ok(format!(
        "pbkdf2:sha256:{}${}${}",
        ITERATIONS,
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(key)
    ))
}

/// Vérifie un mot de passe contre un hash stocké
/// Recalcule PBKDF2 avec le salt et les itérations du hash, puis compare
/// en temps constant
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parts: Vec<&str> = stored_hash.split('$').collect();
    let &[method, salt_str, hash_str] = parts.as_slice() else {
        return Err(AuthError::Hash("Invalid hash format".to_string()));
    };

    // En-tête attendu: pbkdf2:sha256:iterations
    let header: Vec<&str> = method.split(':').collect();
    let &["pbkdf2", "sha256", iterations_str] = header.as_slice() else {
        return Err(AuthError::Hash("Unsupported hash method".to_string()));
    };
    let iterations = iterations_str
        .parse::<u32>()
        .map_err(|_| AuthError::Hash("Invalid iteration count".to_string()))?;

    let salt = decode_part(salt_str)?;
    let expected = decode_part(hash_str)?;

    let mut computed = vec![0u8; expected.len()];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, iterations, &mut computed)
        .map_err(|e| AuthError::Hash(format!("PBKDF2 failed: {e}")))?;

    Ok(constant_time_eq(&computed, &expected))
}

/// Décode un segment du hash: base64 URL-safe sans padding, avec
/// fallback hexadécimal pour les anciens hashs Werkzeug
fn decode_part(input: &str) -> Result<Vec<u8>, AuthError> {
    if let Ok(decoded) = URL_SAFE_NO_PAD.decode(input) {
        return Ok(decoded);
    }
    hex::decode(input).map_err(|_| AuthError::Hash("Failed to decode hash part".to_string()))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("S3cret!").unwrap();

        assert!(hash.starts_with("pbkdf2:sha256:260000$"));
        assert!(verify_password("S3cret!", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_two_hashes_use_different_salts() {
        let h1 = hash_password("same").unwrap();
        let h2 = hash_password("same").unwrap();

        assert_ne!(h1, h2);
        assert!(verify_password("same", &h1).unwrap());
        assert!(verify_password("same", &h2).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("x", "not-a-hash").is_err());
        assert!(verify_password("x", "scrypt:32768:8$abc$def").is_err());
    }
}
