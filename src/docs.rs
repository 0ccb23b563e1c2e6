use crate::api::employee::{CreateEmployee, UpdateEmployee};
use crate::api::user::{CreateUser, UpdatePassword, UserInfo};
use crate::api::vacation::{CreateVacation, PreviewRequest, PreviewResponse, UpdateVacation};
use crate::balance::Balances;
use crate::model::employee::Employee;
use crate::model::vacation::{VacationEntry, VacationType};
use crate::models::LoginReqDto;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{openapi, Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Urlaubsplaner API",
        version = "1.0.0",
        description = r#"
## Vacation planner backend

Tracks employees, their vacation/sick/special-leave entries and login
accounts. Every mutation of a vacation entry re-derives the owning
employee's balances from the full entry set, so the stored
`vacation_days_used` / `vacation_days_remaining` fields never drift from
the entries.

### Key features
- **Employee management** with per-employee vacation entitlement
- **Vacation entries** in three categories (VACATION, SICK, SPECIAL);
  only VACATION consumes the entitlement
- **Balance preview** for pending requests, without committing them
- **Login account management** (admin only)

### Security
Endpoints under `/api` (except health) require a **JWT Bearer token**
obtained from `/auth/login`.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::vacation::list_vacations,
        crate::api::vacation::get_vacation,
        crate::api::vacation::create_vacation,
        crate::api::vacation::update_vacation,
        crate::api::vacation::delete_vacation,
        crate::api::vacation::preview_vacation,

        crate::api::user::list_users,
        crate::api::user::create_user,
        crate::api::user::update_user_password,
        crate::api::user::delete_user,

        crate::api::health::health_check
    ),
    components(
        schemas(
            LoginReqDto,
            Employee,
            CreateEmployee,
            UpdateEmployee,
            VacationEntry,
            VacationType,
            CreateVacation,
            UpdateVacation,
            PreviewRequest,
            PreviewResponse,
            Balances,
            UserInfo,
            CreateUser,
            UpdatePassword
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Vacation", description = "Vacation entry APIs"),
        (name = "User", description = "Login account management APIs"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
