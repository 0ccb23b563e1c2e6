pub mod json;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{employee::Employee, user::UserAccount, vacation::VacationEntry};

pub use json::JsonStore;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure talking to the persistence backend. Always surfaced to the
/// caller; the store performs no retries of its own.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Persistence collaborator for employees, vacation entries and login
/// accounts. A missing record is `Ok(None)` rather than an error; only a
/// backend failure produces `Err`.
pub trait Store: Send + Sync {
    // --- employees ---
    fn list_employees(&self) -> Result<Vec<Employee>>;
    fn get_employee(&self, id: &str) -> Result<Option<Employee>>;
    fn insert_employee(&self, employee: &Employee) -> Result<()>;
    /// Replaces the stored record wholesale, derived balance fields
    /// included. Inserts when the id is unknown.
    fn put_employee(&self, employee: &Employee) -> Result<()>;
    /// Returns whether a record was actually removed. Does NOT cascade;
    /// callers pair this with `delete_entries_by_employee`.
    fn delete_employee(&self, id: &str) -> Result<bool>;

    // --- vacation entries ---
    fn list_entries(&self) -> Result<Vec<VacationEntry>>;
    fn get_entry(&self, id: &str) -> Result<Option<VacationEntry>>;
    fn insert_entry(&self, entry: &VacationEntry) -> Result<()>;
    fn put_entry(&self, entry: &VacationEntry) -> Result<()>;
    fn delete_entry(&self, id: &str) -> Result<bool>;
    fn list_entries_by_employee(&self, employee_id: &str) -> Result<Vec<VacationEntry>>;
    /// Cascade helper for employee deletion. Returns the number of entries
    /// removed.
    fn delete_entries_by_employee(&self, employee_id: &str) -> Result<usize>;

    // --- login accounts ---
    fn list_users(&self) -> Result<BTreeMap<String, UserAccount>>;
    fn get_user(&self, username: &str) -> Result<Option<UserAccount>>;
    fn insert_user(&self, username: &str, account: &UserAccount) -> Result<()>;
    fn set_user_password(&self, username: &str, password_hash: &str) -> Result<bool>;
    fn delete_user(&self, username: &str) -> Result<bool>;
}
