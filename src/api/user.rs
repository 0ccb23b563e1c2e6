use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::api::employee::store_err;
use crate::auth::auth::AuthUser;
use crate::auth::password::hash_password;
use crate::model::user::UserAccount;
use crate::storage::Store;

#[derive(Serialize, ToSchema)]
pub struct UserInfo {
    #[schema(example = "manager")]
    pub username: String,
    #[schema(example = "user")]
    pub role: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateUser {
    #[schema(example = "manager")]
    pub username: String,
    #[schema(example = "manager123")]
    pub password: String,
    #[schema(example = "user")]
    pub role: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePassword {
    #[schema(example = "new-password")]
    pub password: String,
}

/// List login accounts
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All login accounts", body = Vec<UserInfo>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn list_users(
    auth: AuthUser,
    store: web::Data<dyn Store>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let users: Vec<UserInfo> = store
        .list_users()
        .map_err(store_err)?
        .into_iter()
        .map(|(username, account)| UserInfo {
            username,
            role: account.role,
        })
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// Create a login account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "Account created", body = Object, example = json!({
            "username": "manager",
            "role": "user",
            "message": "User created successfully"
        })),
        (status = 400, description = "Empty username or password"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Username already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn create_user(
    auth: AuthUser,
    store: web::Data<dyn Store>,
    payload: web::Json<CreateUser>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let username = payload.username.trim().to_lowercase();
    if username.is_empty() || payload.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Username and password must not be empty"
        })));
    }

    if store.get_user(&username).map_err(store_err)?.is_some() {
        return Ok(HttpResponse::Conflict().json(json!({
            "error": "Username already exists"
        })));
    }

    let role = payload.role.clone().unwrap_or_else(|| "user".to_string());
    let account = UserAccount {
        password_hash: hash_password(&payload.password),
        role: role.clone(),
    };
    store.insert_user(&username, &account).map_err(store_err)?;

    info!(%username, %role, "Login account created");

    Ok(HttpResponse::Created().json(json!({
        "username": username,
        "role": role,
        "message": "User created successfully"
    })))
}

/// Update an account password
#[utoipa::path(
    put,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "Account username")),
    request_body = UpdatePassword,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Password too short"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn update_user_password(
    auth: AuthUser,
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    payload: web::Json<UpdatePassword>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let username = path.into_inner().to_lowercase();
    let password = payload.password.trim();

    if password.len() < 3 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Password must be at least 3 characters long"
        })));
    }

    let updated = store
        .set_user_password(&username, &hash_password(password))
        .map_err(store_err)?;

    if !updated {
        return Ok(HttpResponse::NotFound().json(json!({
            "error": "User not found"
        })));
    }

    info!(%username, "Password updated");

    Ok(HttpResponse::Ok().json(json!({
        "username": username,
        "message": "Password updated successfully"
    })))
}

/// Delete a login account
///
/// The built-in `admin` account cannot be removed.
#[utoipa::path(
    delete,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "Account username")),
    responses(
        (status = 200, description = "Account deleted"),
        (status = 400, description = "Admin account cannot be deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn delete_user(
    auth: AuthUser,
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let username = path.into_inner().to_lowercase();
    if username == "admin" {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Admin account cannot be deleted"
        })));
    }

    if !store.delete_user(&username).map_err(store_err)? {
        return Ok(HttpResponse::NotFound().json(json!({
            "error": "User not found"
        })));
    }

    info!(%username, "Login account deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "User deleted successfully"
    })))
}
