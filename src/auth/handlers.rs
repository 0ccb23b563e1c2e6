use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use tracing::{error, info, warn};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::config::Config;
use crate::models::LoginReqDto;
use crate::storage::Store;

/// Username/password login against the stored credential set.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = Object, example = json!({
            "success": true,
            "token": "<jwt>",
            "user": {"username": "admin", "role": "admin"},
            "message": "Logged in as administrator"
        })),
        (status = 401, description = "Invalid username or password")
    ),
    tag = "Auth"
)]
pub async fn login(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    payload: web::Json<LoginReqDto>,
) -> actix_web::Result<impl Responder> {
    let username = payload.username.trim().to_lowercase();

    let account = store.get_user(&username).map_err(|e| {
        error!(error = %e, "Failed to load login accounts");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some(account) = account else {
        warn!(%username, "Login attempt for unknown user");
        return Ok(HttpResponse::Unauthorized().json(json!({
            "error": "Invalid username or password"
        })));
    };

    if !verify_password(&payload.password, &account.password_hash) {
        warn!(%username, "Login attempt with wrong password");
        return Ok(HttpResponse::Unauthorized().json(json!({
            "error": "Invalid username or password"
        })));
    }

    let token = generate_access_token(
        username.clone(),
        account.role.clone(),
        &config.jwt_secret,
        config.access_token_ttl,
    );

    info!(%username, role = %account.role, "User logged in");

    let message = if account.role == "admin" {
        "Logged in as administrator"
    } else {
        "Logged in as user"
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "token": token,
        "user": { "username": username, "role": account.role },
        "message": message
    })))
}
