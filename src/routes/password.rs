use actix_web::{HttpRequest, HttpResponse, get, post, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::errors::AuthError;
use crate::routes::views;
use crate::services::accounts::AccountService;
use crate::services::mailer::Mailer;
use crate::services::sessions::SessionService;
use crate::utils::flash::Flash;
use crate::utils::token::ResetTokenService;

#[derive(Deserialize)]
pub struct ForgotPasswordForm {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordForm {
    pub password: String,
}

/// GET /forgot-password - Formulaire de demande de reset (PUBLIC)
#[get("/forgot-password")]
pub async fn forgot_password_form(req: HttpRequest) -> HttpResponse {
    views::render(&req, "Forgot password", &views::forgot_password_page())
}

/// POST /forgot-password - Émettre et envoyer un lien de reset (PUBLIC)
///
/// Email inconnu → flash d'erreur. Échec d'envoi → flash d'erreur, jamais
/// fatal. Dans tous les cas on revient sur la même page
#[post("/forgot-password")]
pub async fn forgot_password(
    form: web::Form<ForgotPasswordForm>,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    tokens: web::Data<ResetTokenService>,
    mailer: web::Data<Arc<dyn Mailer>>,
) -> HttpResponse {
    // 1. Le compte doit exister
    match AccountService::find(db.get_ref(), &form.email).await {
        Ok(_) => {}
        Err(AuthError::NotFound) => {
            warn!(email = %form.email, "password reset requested for unknown email");
            return views::redirect_with_flash("/forgot-password", Flash::danger("Email not found."));
        }
        Err(err) => {
            error!("forgot-password lookup failed: {err}");
            return views::redirect_with_flash(
                "/forgot-password",
                Flash::danger("Something went wrong. Please try again."),
            );
        }
    }

    // 2. Token signé + URL absolue
    let token = match tokens.issue(&form.email) {
        Ok(token) => token,
        Err(err) => {
            error!("failed to issue reset token: {err}");
            return views::redirect_with_flash(
                "/forgot-password",
                Flash::danger("Something went wrong. Please try again."),
            );
        }
    };
    let reset_url = config.reset_url(&token);

    // 3. Envoi du mail; l'échec est flashé, pas propagé
    match mailer.send_reset_link(&form.email, &reset_url).await {
        Ok(()) => {
            info!(email = %form.email, "reset link issued");
            views::redirect_with_flash(
                "/forgot-password",
                Flash::info("A password reset link has been sent to your email."),
            )
        }
        Err(_) => {
            views::redirect_with_flash("/forgot-password", Flash::danger("Failed to send email."))
        }
    }
}

/// GET /reset-password/{token} - Formulaire de nouveau mot de passe (PUBLIC)
///
/// Le token du chemin est validé avant d'afficher le formulaire
#[get("/reset-password/{token}")]
pub async fn reset_password_form(
    req: HttpRequest,
    path: web::Path<String>,
    tokens: web::Data<ResetTokenService>,
) -> HttpResponse {
    let token = path.into_inner();

    if tokens.validate(&token).is_err() {
        return views::redirect_with_flash(
            "/forgot-password",
            Flash::danger("The reset link is invalid or has expired."),
        );
    }

    views::render(&req, "Reset password", &views::reset_password_page(&token))
}

/// POST /reset-password/{token} - Remplacer le mot de passe (PUBLIC)
///
/// Le token est revalidé au POST: il a pu expirer entre l'affichage du
/// formulaire et la soumission
#[post("/reset-password/{token}")]
pub async fn reset_password(
    path: web::Path<String>,
    form: web::Form<ResetPasswordForm>,
    db: web::Data<DatabaseConnection>,
    tokens: web::Data<ResetTokenService>,
) -> HttpResponse {
    let token = path.into_inner();

    let email = match tokens.validate(&token) {
        Ok(email) => email,
        Err(_) => {
            return views::redirect_with_flash(
                "/forgot-password",
                Flash::danger("The reset link is invalid or has expired."),
            );
        }
    };

    if let Err(err) = AccountService::update_password(db.get_ref(), &email, &form.password).await {
        error!("password update failed: {err}");
        return views::redirect_with_flash(
            "/forgot-password",
            Flash::danger("Something went wrong. Please try again."),
        );
    }

    // Les sessions ouvertes avec l'ancien mot de passe ne survivent pas
    if let Err(err) = SessionService::end_all_for(db.get_ref(), &email).await {
        error!("failed to invalidate sessions after reset: {err}");
    }

    info!(email = %email, "password reset completed");
    views::redirect_with_flash(
        "/signin",
        Flash::success("Your password has been updated! Please sign in."),
    )
}
