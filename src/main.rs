mod config;
mod db;
mod errors;
mod middleware;
mod models;
mod routes;
mod services;
mod utils;

use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use services::mailer::{ApiMailer, LogMailer, Mailer};
use utils::token::ResetTokenService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    info!("Connecting to database...");
    let db = db::establish_connection(&config.database_url)
        .await
        .expect("Failed to connect to database");
    info!("Database connected");

    // Services construits une fois au démarrage puis injectés dans les
    // handlers — pas de singletons au niveau module
    let tokens = ResetTokenService::new(&config.secret_key);
    let mailer: Arc<dyn Mailer> = match config.mail.clone() {
        Some(mail_config) => Arc::new(ApiMailer::new(mail_config)),
        None => {
            info!("mail credentials not configured, using log-only mailer");
            Arc::new(LogMailer)
        }
    };

    let bind_addr = config.bind_addr.clone();
    info!("Starting server on http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(mailer.clone()))
            .configure(routes::configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
