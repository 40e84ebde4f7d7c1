// Envoi d'emails: abstraction + deux implémentations.
// ApiMailer passe par une API HTTP transactionnelle (Brevo et compatibles),
// LogMailer se contente de logger le lien — utile en dev quand les
// identifiants mail ne sont pas configurés.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::MailConfig;
use crate::errors::AuthError;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Envoie le lien de reset à un compte. Une erreur de transport
    /// devient DeliveryFailure, rattrapée par le handler (jamais fatale)
    async fn send_reset_link(&self, email: &str, reset_url: &str) -> Result<(), AuthError>;
}

/// Mailer de dev: logge le lien au lieu de l'envoyer
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_reset_link(&self, email: &str, reset_url: &str) -> Result<(), AuthError> {
        info!(to = %email, url = %reset_url, "reset link (log-only mailer, no email sent)");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct EmailAddress {
    email: String,
}

#[derive(Debug, Serialize)]
struct SendEmailBody {
    sender: EmailAddress,
    to: Vec<EmailAddress>,
    subject: String,
    #[serde(rename = "textContent")]
    text_content: String,
}

/// Mailer de production via API HTTP
pub struct ApiMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl ApiMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Mailer for ApiMailer {
    async fn send_reset_link(&self, email: &str, reset_url: &str) -> Result<(), AuthError> {
        let message_id = Uuid::new_v4();
        let body = SendEmailBody {
            sender: EmailAddress {
                email: self.config.from_address.clone(),
            },
            to: vec![EmailAddress {
                email: email.to_string(),
            }],
            subject: "Password Reset Request".to_string(),
            text_content: format!("Click the link to reset your password: {reset_url}"),
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("api-key", &self.config.api_key)
            .header("X-Message-Id", message_id.to_string())
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                error!(%message_id, to = %email, "mail transport error: {err}");
                AuthError::DeliveryFailure
            })?;

        if !response.status().is_success() {
            error!(%message_id, to = %email, status = %response.status(), "mail API rejected message");
            return Err(AuthError::DeliveryFailure);
        }

        info!(%message_id, to = %email, "reset email sent");
        Ok(())
    }
}
