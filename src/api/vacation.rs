use actix_web::{web, HttpResponse, Responder};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::api::employee::store_err;
use crate::balance::{compute_balances, Balances, Recomputer};
use crate::model::vacation::{VacationEntry, VacationType};
use crate::storage::Store;

#[derive(Deserialize, ToSchema)]
pub struct CreateVacation {
    #[schema(example = "1")]
    pub employee_id: String,
    #[schema(example = "Alexander Knoll")]
    pub employee_name: String,
    pub vacation_type: VacationType,
    #[schema(example = "2026-07-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-07-05", value_type = String, format = "date")]
    pub end_date: NaiveDate,
    #[schema(example = 5.0)]
    pub days_count: f64,
    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateVacation {
    /// Setting a different employee id reassigns the entry; both the old
    /// and the new owner get their balances recomputed.
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub vacation_type: Option<VacationType>,
    #[schema(value_type = Option<String>, format = "date")]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = "date")]
    pub end_date: Option<NaiveDate>,
    pub days_count: Option<f64>,
    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct PreviewRequest {
    #[schema(example = "1")]
    pub employee_id: String,
    pub vacation_type: VacationType,
    #[schema(example = "2026-07-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-07-05", value_type = String, format = "date")]
    pub end_date: NaiveDate,
    #[schema(example = 5.0)]
    pub days_count: f64,
}

#[derive(Serialize, ToSchema)]
pub struct PreviewResponse {
    /// Balances as they would look with the pending entry included.
    pub balances: Balances,
    /// Weekdays (Mon-Fri) in the requested range, as a sizing hint for
    /// `days_count`. Not enforced anywhere.
    #[schema(example = 3)]
    pub business_days: u32,
}

/// Weekdays between two inclusive dates. An inverted range counts zero.
fn business_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut count = 0;
    let mut current = start;
    while current <= end {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        current = current + Duration::days(1);
    }
    count
}

/// List all vacation entries
#[utoipa::path(
    get,
    path = "/api/vacations",
    responses(
        (status = 200, description = "All vacation entries", body = Vec<VacationEntry>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Vacation"
)]
pub async fn list_vacations(store: web::Data<dyn Store>) -> actix_web::Result<impl Responder> {
    let entries = store.list_entries().map_err(store_err)?;
    Ok(HttpResponse::Ok().json(entries))
}

/// Get one vacation entry by id
#[utoipa::path(
    get,
    path = "/api/vacations/{id}",
    params(("id" = String, Path, description = "Vacation entry ID")),
    responses(
        (status = 200, description = "Entry found", body = VacationEntry),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Entry not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Vacation"
)]
pub async fn get_vacation(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    match store.get_entry(&id).map_err(store_err)? {
        Some(entry) => Ok(HttpResponse::Ok().json(entry)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Vacation entry not found"
        }))),
    }
}

/// Create a vacation entry
///
/// The owning employee's balances are recomputed before the response is
/// sent.
#[utoipa::path(
    post,
    path = "/api/vacations",
    request_body = CreateVacation,
    responses(
        (status = 200, description = "Entry created", body = VacationEntry),
        (status = 400, description = "Invalid date range"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Vacation"
)]
pub async fn create_vacation(
    store: web::Data<dyn Store>,
    balances: web::Data<Recomputer>,
    payload: web::Json<CreateVacation>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    if payload.end_date < payload.start_date {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "end_date cannot be before start_date"
        })));
    }

    let entry = VacationEntry {
        id: uuid::Uuid::new_v4().to_string(),
        employee_id: payload.employee_id,
        employee_name: payload.employee_name,
        vacation_type: payload.vacation_type,
        start_date: payload.start_date,
        end_date: payload.end_date,
        days_count: payload.days_count,
        description: payload.description.unwrap_or_default(),
        created_date: Utc::now(),
        last_modified: None,
    };

    store.insert_entry(&entry).map_err(store_err)?;
    balances.recompute(&entry.employee_id).map_err(store_err)?;

    info!(
        entry_id = %entry.id,
        employee_id = %entry.employee_id,
        vacation_type = %entry.vacation_type,
        days = entry.days_count,
        "Vacation entry created"
    );

    Ok(HttpResponse::Ok().json(entry))
}

/// Update a vacation entry
///
/// On reassignment both affected employees are recomputed; the order of
/// the two recomputes does not matter.
#[utoipa::path(
    put,
    path = "/api/vacations/{id}",
    params(("id" = String, Path, description = "Vacation entry ID")),
    request_body = UpdateVacation,
    responses(
        (status = 200, description = "Entry updated", body = VacationEntry),
        (status = 400, description = "Invalid date range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Entry not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Vacation"
)]
pub async fn update_vacation(
    store: web::Data<dyn Store>,
    balances: web::Data<Recomputer>,
    path: web::Path<String>,
    payload: web::Json<UpdateVacation>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let payload = payload.into_inner();

    let Some(mut entry) = store.get_entry(&id).map_err(store_err)? else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Vacation entry not found"
        })));
    };

    let old_employee_id = entry.employee_id.clone();

    if let Some(employee_id) = payload.employee_id {
        entry.employee_id = employee_id;
    }
    if let Some(employee_name) = payload.employee_name {
        entry.employee_name = employee_name;
    }
    if let Some(vacation_type) = payload.vacation_type {
        entry.vacation_type = vacation_type;
    }
    if let Some(start_date) = payload.start_date {
        entry.start_date = start_date;
    }
    if let Some(end_date) = payload.end_date {
        entry.end_date = end_date;
    }
    if let Some(days_count) = payload.days_count {
        entry.days_count = days_count;
    }
    if let Some(description) = payload.description {
        entry.description = description;
    }

    if entry.end_date < entry.start_date {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "end_date cannot be before start_date"
        })));
    }

    entry.last_modified = Some(Utc::now());
    store.put_entry(&entry).map_err(store_err)?;

    balances
        .recompute_all(&[old_employee_id.as_str(), entry.employee_id.as_str()])
        .map_err(store_err)?;

    Ok(HttpResponse::Ok().json(entry))
}

/// Delete a vacation entry
#[utoipa::path(
    delete,
    path = "/api/vacations/{id}",
    params(("id" = String, Path, description = "Vacation entry ID")),
    responses(
        (status = 200, description = "Entry deleted", body = Object, example = json!({
            "message": "Vacation entry deleted"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Entry not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Vacation"
)]
pub async fn delete_vacation(
    store: web::Data<dyn Store>,
    balances: web::Data<Recomputer>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let Some(entry) = store.get_entry(&id).map_err(store_err)? else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Vacation entry not found"
        })));
    };

    store.delete_entry(&id).map_err(store_err)?;
    balances.recompute(&entry.employee_id).map_err(store_err)?;

    info!(entry_id = %id, employee_id = %entry.employee_id, "Vacation entry deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Vacation entry deleted"
    })))
}

/// Preview balances for a pending entry
///
/// Read-only: computes the employee's balances as if the pending entry
/// were already stored, without persisting anything. Lets clients check a
/// request against the remaining balance before committing it.
#[utoipa::path(
    post,
    path = "/api/vacations/preview",
    request_body = PreviewRequest,
    responses(
        (status = 200, description = "Projected balances", body = PreviewResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Vacation"
)]
pub async fn preview_vacation(
    store: web::Data<dyn Store>,
    payload: web::Json<PreviewRequest>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    let Some(employee) = store.get_employee(&payload.employee_id).map_err(store_err)? else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    };

    let mut entries = store
        .list_entries_by_employee(&payload.employee_id)
        .map_err(store_err)?;
    entries.push(VacationEntry {
        id: String::new(),
        employee_id: payload.employee_id,
        employee_name: employee.name.clone(),
        vacation_type: payload.vacation_type,
        start_date: payload.start_date,
        end_date: payload.end_date,
        days_count: payload.days_count,
        description: String::new(),
        created_date: Utc::now(),
        last_modified: None,
    });

    let projected = compute_balances(employee.vacation_days_total, &entries);

    Ok(HttpResponse::Ok().json(PreviewResponse {
        balances: projected,
        business_days: business_days(payload.start_date, payload.end_date),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn business_days_skip_weekends() {
        // Wed 2026-07-01 through Sun 2026-07-05: Wed, Thu, Fri.
        assert_eq!(business_days(date(2026, 7, 1), date(2026, 7, 5)), 3);
        // Full week.
        assert_eq!(business_days(date(2026, 7, 6), date(2026, 7, 12)), 5);
        // Single weekend day.
        assert_eq!(business_days(date(2026, 7, 4), date(2026, 7, 4)), 0);
    }

    #[test]
    fn business_days_inverted_range_is_zero() {
        assert_eq!(business_days(date(2026, 7, 5), date(2026, 7, 1)), 0);
    }
}
