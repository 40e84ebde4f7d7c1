use actix_web::{
    HttpRequest, HttpResponse,
    cookie::{Cookie, SameSite, time::Duration as CookieDuration},
    get, post, web,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::{error, info};
use validator::Validate;

use crate::errors::AuthError;
use crate::middleware::{SESSION_COOKIE, SessionUser};
use crate::routes::views;
use crate::services::accounts::{AccountService, NewAccount};
use crate::services::sessions::SessionService;
use crate::utils::flash::Flash;

// Formulaire d'inscription
#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub registration_number: String,
    // Pas de règle de longueur: le reset n'en impose pas non plus, et une
    // règle asymétrique entre les deux chemins serait incohérente
    pub password: String,
}

// Formulaire de connexion
#[derive(Deserialize)]
pub struct SigninForm {
    pub email: String,
    pub password: String,
}

/// GET / - Page d'accueil avec le formulaire d'inscription (PUBLIC)
#[get("/")]
pub async fn home(req: HttpRequest) -> HttpResponse {
    views::render(&req, "Home", &views::home_page())
}

/// POST /register - Créer un compte (PUBLIC)
#[post("/register")]
pub async fn register(
    form: web::Form<RegisterForm>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    // 1. Validation de surface du formulaire
    if let Err(errors) = form.validate() {
        let message = first_validation_message(&errors)
            .unwrap_or_else(|| "Invalid form input".to_string());
        return views::redirect_with_flash("/", Flash::danger(&message));
    }

    let form = form.into_inner();
    let profile = NewAccount {
        email: form.email,
        name: form.name,
        phone_number: form.phone_number,
        address: form.address,
        registration_number: form.registration_number,
    };

    // 2. Hash + insert; le doublon est détecté par la contrainte d'unicité
    match AccountService::register(db.get_ref(), profile, &form.password).await {
        Ok(account) => {
            info!(email = %account.email, "account registered");
            views::redirect_with_flash(
                "/signin",
                Flash::success("Registration successful! Please log in."),
            )
        }
        Err(AuthError::DuplicateAccount) => {
            views::redirect_with_flash("/", Flash::danger("Email already registered!"))
        }
        Err(err) => {
            error!("registration failed: {err}");
            views::redirect_with_flash("/", Flash::danger("Something went wrong. Please try again."))
        }
    }
}

/// GET /signin - Formulaire de connexion (PUBLIC)
#[get("/signin")]
pub async fn signin_form(req: HttpRequest) -> HttpResponse {
    views::render(&req, "Sign in", &views::signin_page())
}

/// POST /signin - Se connecter (PUBLIC)
#[post("/signin")]
pub async fn signin(
    form: web::Form<SigninForm>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    // 1. Vérifier les identifiants
    let account = match AccountService::authenticate(db.get_ref(), &form.email, &form.password).await
    {
        Ok(account) => account,
        Err(AuthError::InvalidCredentials) => {
            return views::redirect_with_flash("/signin", Flash::danger("Invalid email or password"));
        }
        Err(err) => {
            error!("signin failed: {err}");
            return views::redirect_with_flash(
                "/signin",
                Flash::danger("Something went wrong. Please try again."),
            );
        }
    };

    // 2. Ouvrir la session et poser le cookie
    let raw_token = match SessionService::start(db.get_ref(), &account.email).await {
        Ok(token) => token,
        Err(err) => {
            error!("failed to start session: {err}");
            return views::redirect_with_flash(
                "/signin",
                Flash::danger("Something went wrong. Please try again."),
            );
        }
    };

    info!(email = %account.email, "signin successful");

    let cookie = Cookie::build(SESSION_COOKIE, raw_token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    let mut response = views::redirect_with_flash("/dashboard", Flash::success("Login successful!"));
    if let Err(err) = response.add_cookie(&cookie) {
        error!("failed to attach session cookie: {err}");
    }
    response
}

/// GET /dashboard - Page protégée (session requise)
#[get("/dashboard")]
pub async fn dashboard(req: HttpRequest, user: SessionUser) -> HttpResponse {
    views::render(&req, "Dashboard", &views::dashboard_page(&user.email))
}

/// GET /logout - Fermer la session (session requise)
#[get("/logout")]
pub async fn logout(user: SessionUser, db: web::Data<DatabaseConnection>) -> HttpResponse {
    if let Err(err) = SessionService::end(db.get_ref(), &user.raw_token).await {
        error!("failed to end session: {err}");
    }
    info!(email = %user.email, "signed out");

    let mut expired = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    expired.set_max_age(CookieDuration::ZERO);

    let mut response =
        views::redirect_with_flash("/signin", Flash::info("You have been logged out!"));
    if let Err(err) = response.add_cookie(&expired) {
        error!("failed to clear session cookie: {err}");
    }
    response
}

/// Premier message d'erreur lisible produit par le validateur
fn first_validation_message(errors: &validator::ValidationErrors) -> Option<String> {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_form_rejects_bad_email() {
        let form = RegisterForm {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            phone_number: "000".to_string(),
            address: "nowhere".to_string(),
            registration_number: "R1".to_string(),
            password: "p1".to_string(),
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(first_validation_message(&errors).is_some());
    }

    #[test]
    fn test_register_form_accepts_short_password() {
        // Aucune règle de longueur sur le mot de passe, comme au reset
        let form = RegisterForm {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            phone_number: "000".to_string(),
            address: "nowhere".to_string(),
            registration_number: "R1".to_string(),
            password: "p1".to_string(),
        };

        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_register_form_accepts_valid_input() {
        let form = RegisterForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "0123456789".to_string(),
            address: "1 Analytical St".to_string(),
            registration_number: "ENG-1843".to_string(),
            password: "difference-engine".to_string(),
        };

        assert!(form.validate().is_ok());
    }
}
