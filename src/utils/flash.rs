// Messages flash: notice à usage unique qui survit à un redirect.
// Posés dans un cookie au moment du redirect, lus puis effacés par la
// page qui les affiche.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    /// Catégorie d'affichage: "success", "danger" ou "info"
    pub level: String,
    pub message: String,
}

impl Flash {
    pub fn success(message: &str) -> Self {
        Self::new("success", message)
    }

    pub fn danger(message: &str) -> Self {
        Self::new("danger", message)
    }

    pub fn info(message: &str) -> Self {
        Self::new("info", message)
    }

    fn new(level: &str, message: &str) -> Self {
        Self {
            level: level.to_string(),
            message: message.to_string(),
        }
    }

    /// Cookie à attacher à la réponse de redirect
    pub fn into_cookie(self) -> Cookie<'static> {
        let encoded = URL_SAFE_NO_PAD.encode(format!("{}:{}", self.level, self.message));
        Cookie::build(FLASH_COOKIE, encoded)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }
}

/// Lit le flash en attente sur la requête, s'il y en a un
pub fn peek(req: &HttpRequest) -> Option<Flash> {
    let cookie = req.cookie(FLASH_COOKIE)?;
    let decoded = URL_SAFE_NO_PAD.decode(cookie.value()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (level, message) = decoded.split_once(':')?;
    Some(Flash {
        level: level.to_string(),
        message: message.to_string(),
    })
}

/// Cookie d'expiration immédiate, à attacher à la page qui a affiché le flash
pub fn clear_cookie() -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, "")
        .path("/")
        .max_age(CookieDuration::ZERO)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_flash_survives_cookie_round_trip() {
        let cookie = Flash::danger("Invalid email or password").into_cookie();

        let req = TestRequest::default()
            .cookie(cookie)
            .to_http_request();

        let flash = peek(&req).unwrap();
        assert_eq!(flash.level, "danger");
        assert_eq!(flash.message, "Invalid email or password");
    }

    #[test]
    fn test_message_may_contain_separator() {
        let cookie = Flash::info("Note: check your inbox").into_cookie();
        let req = TestRequest::default().cookie(cookie).to_http_request();

        assert_eq!(peek(&req).unwrap().message, "Note: check your inbox");
    }

    #[test]
    fn test_no_cookie_means_no_flash() {
        let req = TestRequest::default().to_http_request();
        assert!(peek(&req).is_none());
    }
}
