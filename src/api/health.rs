use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::storage::Store;

/// Health check
///
/// Unauthenticated. Reports record counts so a monitor can tell an empty
/// data directory from a broken one.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service healthy", body = Object, example = json!({
            "status": "healthy",
            "timestamp": "2026-01-01T00:00:00Z",
            "data": {"employees": 3, "vacations": 0, "logins": 6}
        })),
        (status = 500, description = "Storage unreachable")
    ),
    tag = "Health"
)]
pub async fn health_check(store: web::Data<dyn Store>) -> actix_web::Result<impl Responder> {
    let employees = store
        .list_employees()
        .map_err(actix_web::error::ErrorInternalServerError)?;
    let vacations = store
        .list_entries()
        .map_err(actix_web::error::ErrorInternalServerError)?;
    let logins = store
        .list_users()
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "data": {
            "employees": employees.len(),
            "vacations": vacations.len(),
            "logins": logins.len()
        }
    })))
}
