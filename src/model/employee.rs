use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

fn default_role() -> String {
    "employee".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "1",
        "name": "Alexander Knoll",
        "email": "alexander@express-logistik.com",
        "role": "employee",
        "vacation_days_total": 25.0,
        "vacation_days_used": 0.0,
        "vacation_days_remaining": 25.0,
        "sick_days_used": 0.0,
        "special_days_used": 0.0,
        "personality_traits": "",
        "skills": [],
        "created_date": "2024-01-15T10:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = "1")]
    pub id: String,

    #[schema(example = "Alexander Knoll")]
    pub name: String,

    #[schema(example = "alexander@express-logistik.com")]
    pub email: String,

    #[serde(default = "default_role")]
    #[schema(example = "employee")]
    pub role: String,

    /// Yearly vacation entitlement.
    #[schema(example = 25.0)]
    pub vacation_days_total: f64,

    /// Derived from the entry set. Written only by the balance recomputer.
    #[schema(example = 0.0)]
    pub vacation_days_used: f64,

    /// `vacation_days_total - vacation_days_used`. Written only by the
    /// balance recomputer.
    #[schema(example = 25.0)]
    pub vacation_days_remaining: f64,

    #[schema(example = 0.0)]
    pub sick_days_used: f64,

    #[schema(example = 0.0)]
    pub special_days_used: f64,

    #[serde(default)]
    pub personality_traits: String,

    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub skills: Vec<Value>,

    #[schema(example = "2024-01-15T10:00:00Z", value_type = String, format = "date-time")]
    pub created_date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = "date-time")]
    pub last_modified: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = "date-time")]
    pub last_vacation_update: Option<DateTime<Utc>>,
}

impl Employee {
    /// Fresh employee with derived balances seeded to the empty-entry-set
    /// state. Every later change to the derived fields goes through the
    /// balance recomputer.
    pub fn new(name: String, email: String, role: String, vacation_days_total: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            role,
            vacation_days_total,
            vacation_days_used: 0.0,
            vacation_days_remaining: vacation_days_total,
            sick_days_used: 0.0,
            special_days_used: 0.0,
            personality_traits: String::new(),
            skills: Vec::new(),
            created_date: Utc::now(),
            last_modified: None,
            last_vacation_update: None,
        }
    }
}
