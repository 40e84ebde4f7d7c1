use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;
use sea_orm::DatabaseConnection;

use crate::services::sessions::SessionService;
use crate::utils::flash::Flash;

pub const SESSION_COOKIE: &str = "session";

/// Identité de l'utilisateur authentifié, résolue depuis le cookie de
/// session. Utilisée comme extracteur sur les routes protégées: sans
/// session valide, la requête est redirigée vers /signin
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub email: String,
    /// Token brut du cookie, nécessaire pour fermer la session au logout
    pub raw_token: String,
}

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Cookie de session présent ?
            let Some(cookie) = req.cookie(SESSION_COOKIE) else {
                return Err(redirect_to_signin());
            };
            let raw_token = cookie.value().to_string();

            // 2. Connexion BD injectée au démarrage
            let Some(db) = req.app_data::<web::Data<DatabaseConnection>>() else {
                return Err(actix_web::error::ErrorInternalServerError(
                    "database connection missing from app data",
                ));
            };

            // 3. Le token doit correspondre à une session non expirée
            match SessionService::current(db.get_ref(), &raw_token).await {
                Ok(email) => Ok(SessionUser { email, raw_token }),
                Err(_) => Err(redirect_to_signin()),
            }
        })
    }
}

/// 303 vers la page de connexion, avec un flash explicatif
fn redirect_to_signin() -> Error {
    let response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/signin"))
        .cookie(Flash::info("Please sign in to continue.").into_cookie())
        .finish();

    actix_web::error::InternalError::from_response("unauthorized", response).into()
}
