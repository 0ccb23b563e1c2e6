use actix_web::{error::ErrorInternalServerError, web, HttpResponse, Responder};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::balance::Recomputer;
use crate::model::employee::Employee;
use crate::storage::{Store, StoreError};

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Alexander Knoll")]
    pub name: String,
    #[schema(example = "alexander@express-logistik.com")]
    pub email: String,
    #[schema(example = "employee")]
    pub role: Option<String>,
    #[schema(example = 25.0)]
    pub vacation_days_total: Option<f64>,
    pub personality_traits: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub skills: Option<Vec<Value>>,
}

/// Administrative patch. The derived balance fields are deliberately
/// absent: those are owned by the balance recomputer.
#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    #[schema(example = 30.0)]
    pub vacation_days_total: Option<f64>,
    pub personality_traits: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub skills: Option<Vec<Value>>,
}

pub(crate) fn store_err(e: StoreError) -> actix_web::Error {
    error!(error = %e, "Storage operation failed");
    ErrorInternalServerError("Internal Server Error")
}

/// List all employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = Vec<Employee>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<dyn Store>) -> actix_web::Result<impl Responder> {
    let employees = store.list_employees().map_err(store_err)?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get one employee by id
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_employee(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    match store.get_employee(&id).map_err(store_err)? {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

/// Create a new employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee created", body = Employee),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn Store>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    let mut employee = Employee::new(
        payload.name,
        payload.email,
        payload.role.unwrap_or_else(|| "employee".to_string()),
        payload.vacation_days_total.unwrap_or(25.0),
    );
    if let Some(traits) = payload.personality_traits {
        employee.personality_traits = traits;
    }
    if let Some(skills) = payload.skills {
        employee.skills = skills;
    }

    store.insert_employee(&employee).map_err(store_err)?;
    info!(employee_id = %employee.id, name = %employee.name, "Employee created");

    Ok(HttpResponse::Ok().json(employee))
}

/// Update an employee
///
/// Changing `vacation_days_total` triggers a balance recompute so
/// `vacation_days_remaining` never goes stale.
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_employee(
    store: web::Data<dyn Store>,
    balances: web::Data<Recomputer>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let payload = payload.into_inner();

    let Some(mut employee) = store.get_employee(&id).map_err(store_err)? else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    };

    if let Some(name) = payload.name {
        employee.name = name;
    }
    if let Some(email) = payload.email {
        employee.email = email;
    }
    if let Some(role) = payload.role {
        employee.role = role;
    }
    if let Some(traits) = payload.personality_traits {
        employee.personality_traits = traits;
    }
    if let Some(skills) = payload.skills {
        employee.skills = skills;
    }

    let entitlement_changed = payload.vacation_days_total.is_some();
    if let Some(total) = payload.vacation_days_total {
        employee.vacation_days_total = total;
    }
    employee.last_modified = Some(Utc::now());

    store.put_employee(&employee).map_err(store_err)?;

    if entitlement_changed {
        balances.recompute(&id).map_err(store_err)?;
    }

    // Reload so the response carries the freshly derived balances.
    let employee = store
        .get_employee(&id)
        .map_err(store_err)?
        .unwrap_or(employee);

    Ok(HttpResponse::Ok().json(employee))
}

/// Delete an employee and all of their vacation entries
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee and entries deleted", body = Object, example = json!({
            "message": "Employee and vacation entries deleted"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    if !store.delete_employee(&id).map_err(store_err)? {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    // No recompute needed: no employee record remains to update.
    let removed = store.delete_entries_by_employee(&id).map_err(store_err)?;
    info!(employee_id = %id, entries_removed = removed, "Employee deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee and vacation entries deleted"
    })))
}
