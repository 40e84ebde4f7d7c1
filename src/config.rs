// Configuration chargée une seule fois au démarrage puis injectée
// via web::Data (pas de globals implicites)

use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub bind_addr: String,
    /// URL publique utilisée pour construire les liens de reset absolus
    pub base_url: String,
    pub mail: Option<MailConfig>,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
}

impl Config {
    /// Lit la configuration depuis les variables d'environnement (.env chargé avant)
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env file".to_string())?;

        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("SECRET_KEY not found in .env, using default (INSECURE)");
            "default-insecure-key-change-this".to_string()
        });

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| format!("http://{}", bind_addr));

        // Le mailer HTTP n'est actif que si les trois variables sont présentes,
        // sinon on retombe sur le mailer de log (pratique en dev)
        let mail = match (
            env::var("MAIL_API_URL"),
            env::var("MAIL_API_KEY"),
            env::var("MAIL_FROM"),
        ) {
            (Ok(api_url), Ok(api_key), Ok(from_address)) => Some(MailConfig {
                api_url,
                api_key,
                from_address,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            secret_key,
            bind_addr,
            base_url,
            mail,
        })
    }

    /// Construit l'URL absolue du formulaire de reset pour un token donné
    pub fn reset_url(&self, token: &str) -> String {
        format!("{}/reset-password/{}", self.base_url.trim_end_matches('/'), token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_url_strips_trailing_slash() {
        let config = Config {
            database_url: String::new(),
            secret_key: "secret".to_string(),
            bind_addr: "127.0.0.1:8080".to_string(),
            base_url: "http://localhost:8080/".to_string(),
            mail: None,
        };

        assert_eq!(
            config.reset_url("abc.def.ghi"),
            "http://localhost:8080/reset-password/abc.def.ghi"
        );
    }
}
