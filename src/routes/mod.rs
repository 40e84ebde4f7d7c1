pub mod auth;
pub mod health;
pub mod password;
pub mod views;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::home)
        .service(auth::register)
        .service(auth::signin_form)
        .service(auth::signin)
        .service(auth::dashboard)
        .service(auth::logout)
        .service(password::forgot_password_form)
        .service(password::forgot_password)
        .service(password::reset_password_form)
        .service(password::reset_password)
        .service(health::health_check);
}
