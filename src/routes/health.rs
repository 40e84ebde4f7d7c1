use actix_web::{HttpResponse, get};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    time: DateTime<Utc>,
}

/// GET /health - Sonde de vivacité (PUBLIC, JSON)
#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        time: Utc::now(),
    })
}
