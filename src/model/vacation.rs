use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Kind of absence. Each category keeps an independent running total on the
/// employee record, but only `Vacation` consumes the yearly entitlement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
    Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VacationType {
    Vacation,
    Sick,
    Special,
}

/// A single recorded absence attributed to one employee over an inclusive
/// date range. `days_count` is caller-supplied and deliberately independent
/// of the span between `start_date` and `end_date`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacationEntry {
    #[schema(example = "5f7b5f3e-1c9e-4b9a-8a6a-2f1f4c1d9e0b")]
    pub id: String,

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

    #[serde(default)]
    #[schema(example = "Summer vacation")]
    pub description: String,

    #[schema(example = "2026-01-01T00:00:00Z", value_type = String, format = "date-time")]
    pub created_date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = "date-time")]
    pub last_modified: Option<DateTime<Utc>>,
}
