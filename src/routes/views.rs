// Rendu HTML minimal: pages construites côté serveur, un layout commun,
// bandeau flash en haut de page. Pas de moteur de templates pour six
// formulaires statiques.

use actix_web::{HttpRequest, HttpResponse, http::header};

use crate::utils::flash::{self, Flash};

/// Rend une page en consommant l'éventuel flash en attente sur la requête
pub fn render(req: &HttpRequest, title: &str, body: &str) -> HttpResponse {
    let pending = flash::peek(req);
    let html = layout(title, pending.as_ref(), body);

    let mut response = HttpResponse::Ok();
    response.content_type("text/html; charset=utf-8");
    if pending.is_some() {
        // Le flash ne doit s'afficher qu'une fois
        response.cookie(flash::clear_cookie());
    }
    response.body(html)
}

/// 303 + flash posé en cookie pour la page d'arrivée
pub fn redirect_with_flash(location: &str, flash: Flash) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(flash.into_cookie())
        .finish()
}

fn layout(title: &str, pending: Option<&Flash>, body: &str) -> String {
    let banner = match pending {
        Some(f) => format!(
            r#"<div class="flash flash-{}">{}</div>"#,
            escape(&f.level),
            escape(&f.message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 32rem; margin: 3rem auto; }}
label {{ display: block; margin-top: .6rem; }}
input {{ width: 100%; padding: .3rem; }}
button {{ margin-top: 1rem; padding: .4rem 1.2rem; }}
.flash {{ padding: .6rem; margin-bottom: 1rem; border-radius: 4px; }}
.flash-success {{ background: #d9f2d9; }}
.flash-danger {{ background: #f6d0d0; }}
.flash-info {{ background: #d7e7f7; }}
</style>
</head>
<body>
{banner}
{body}
</body>
</html>
"#
    )
}

pub fn home_page() -> String {
    r#"<h1>Create an account</h1>
<form method="post" action="/register">
<label>Name <input name="name" required></label>
<label>Email <input name="email" type="email" required></label>
<label>Phone number <input name="phone_number" required></label>
<label>Address <input name="address" required></label>
<label>Registration number <input name="registration_number" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Register</button>
</form>
<p>Already registered? <a href="/signin">Sign in</a></p>"#
        .to_string()
}

pub fn signin_page() -> String {
    r#"<h1>Sign in</h1>
<form method="post" action="/signin">
<label>Email <input name="email" type="email" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Sign in</button>
</form>
<p><a href="/forgot-password">Forgot password?</a></p>
<p>No account yet? <a href="/">Register</a></p>"#
        .to_string()
}

pub fn dashboard_page(email: &str) -> String {
    format!(
        r#"<h1>Dashboard</h1>
<p>Welcome, {}! <a href="/logout">Logout</a></p>"#,
        escape(email)
    )
}

pub fn forgot_password_page() -> String {
    r#"<h1>Forgot password</h1>
<form method="post" action="/forgot-password">
<label>Email <input name="email" type="email" required></label>
<button type="submit">Send reset link</button>
</form>
<p><a href="/signin">Back to sign in</a></p>"#
        .to_string()
}

pub fn reset_password_page(token: &str) -> String {
    format!(
        r#"<h1>Choose a new password</h1>
<form method="post" action="/reset-password/{}">
<label>New password <input name="password" type="password" required></label>
<button type="submit">Reset password</button>
</form>"#,
        escape(token)
    )
}

/// Échappement HTML minimal pour les valeurs interpolées
fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_neutralizes_markup() {
        assert_eq!(escape(r#"<b>"x"&</b>"#), "&lt;b&gt;&quot;x&quot;&amp;&lt;/b&gt;");
    }

    #[test]
    fn test_layout_includes_flash_banner() {
        let f = Flash::success("Registration successful! Please log in.");
        let html = layout("Home", Some(&f), "<p>body</p>");

        assert!(html.contains("flash-success"));
        assert!(html.contains("Registration successful! Please log in."));
    }

    #[test]
    fn test_dashboard_escapes_email() {
        let html = dashboard_page("<script>@x.com");
        assert!(!html.contains("<script>"));
    }
}
