use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::auth::password::hash_password;
use crate::model::{employee::Employee, user::UserAccount, vacation::VacationEntry};

use super::{Result, Store};

const EMPLOYEES_FILE: &str = "employees.json";
const VACATIONS_FILE: &str = "vacations.json";
const LOGINS_FILE: &str = "logins.json";
const TMP_SUFFIX: &str = "tmp";

/// Flat-file store: three pretty-printed JSON files under a configured data
/// directory. Every operation re-reads its file so the files stay the
/// single source of truth; a mutex serializes the read-modify-write cycles.
pub struct JsonStore {
    employees_file: PathBuf,
    vacations_file: PathBuf,
    logins_file: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Opens the store under `data_dir`, creating the directory and seeding
    /// missing files with default data on first use.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;

        let store = Self {
            employees_file: data_dir.join(EMPLOYEES_FILE),
            vacations_file: data_dir.join(VACATIONS_FILE),
            logins_file: data_dir.join(LOGINS_FILE),
            write_lock: Mutex::new(()),
        };
        store.seed_defaults()?;
        Ok(store)
    }

    fn seed_defaults(&self) -> Result<()> {
        if !self.employees_file.exists() {
            write_atomic(&self.employees_file, &default_employees())?;
            info!(file = %self.employees_file.display(), "seeded default employees");
        }
        if !self.vacations_file.exists() {
            write_atomic(&self.vacations_file, &Vec::<VacationEntry>::new())?;
        }
        if !self.logins_file.exists() {
            write_atomic(&self.logins_file, &default_logins())?;
            info!(file = %self.logins_file.display(), "seeded default login accounts");
        }
        Ok(())
    }

    fn load_employees(&self) -> Result<Vec<Employee>> {
        read_json(&self.employees_file)
    }

    fn save_employees(&self, employees: &[Employee]) -> Result<()> {
        write_atomic(&self.employees_file, &employees)
    }

    fn load_entries(&self) -> Result<Vec<VacationEntry>> {
        read_json(&self.vacations_file)
    }

    fn save_entries(&self, entries: &[VacationEntry]) -> Result<()> {
        write_atomic(&self.vacations_file, &entries)
    }

    fn load_logins(&self) -> Result<BTreeMap<String, UserAccount>> {
        read_json(&self.logins_file)
    }

    fn save_logins(&self, logins: &BTreeMap<String, UserAccount>) -> Result<()> {
        write_atomic(&self.logins_file, logins)
    }
}

impl Store for JsonStore {
    fn list_employees(&self) -> Result<Vec<Employee>> {
        self.load_employees()
    }

    fn get_employee(&self, id: &str) -> Result<Option<Employee>> {
        Ok(self.load_employees()?.into_iter().find(|e| e.id == id))
    }

    fn insert_employee(&self, employee: &Employee) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut employees = self.load_employees()?;
        employees.push(employee.clone());
        self.save_employees(&employees)
    }

    fn put_employee(&self, employee: &Employee) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut employees = self.load_employees()?;
        match employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee.clone(),
            None => employees.push(employee.clone()),
        }
        self.save_employees(&employees)
    }

    fn delete_employee(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut employees = self.load_employees()?;
        let before = employees.len();
        employees.retain(|e| e.id != id);
        let removed = employees.len() < before;
        if removed {
            self.save_employees(&employees)?;
        }
        Ok(removed)
    }

    fn list_entries(&self) -> Result<Vec<VacationEntry>> {
        self.load_entries()
    }

    fn get_entry(&self, id: &str) -> Result<Option<VacationEntry>> {
        Ok(self.load_entries()?.into_iter().find(|e| e.id == id))
    }

    fn insert_entry(&self, entry: &VacationEntry) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load_entries()?;
        entries.push(entry.clone());
        self.save_entries(&entries)
    }

    fn put_entry(&self, entry: &VacationEntry) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load_entries()?;
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => entries.push(entry.clone()),
        }
        self.save_entries(&entries)
    }

    fn delete_entry(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load_entries()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() < before;
        if removed {
            self.save_entries(&entries)?;
        }
        Ok(removed)
    }

    fn list_entries_by_employee(&self, employee_id: &str) -> Result<Vec<VacationEntry>> {
        Ok(self
            .load_entries()?
            .into_iter()
            .filter(|e| e.employee_id == employee_id)
            .collect())
    }

    fn delete_entries_by_employee(&self, employee_id: &str) -> Result<usize> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load_entries()?;
        let before = entries.len();
        entries.retain(|e| e.employee_id != employee_id);
        let removed = before - entries.len();
        if removed > 0 {
            self.save_entries(&entries)?;
        }
        Ok(removed)
    }

    fn list_users(&self) -> Result<BTreeMap<String, UserAccount>> {
        self.load_logins()
    }

    fn get_user(&self, username: &str) -> Result<Option<UserAccount>> {
        Ok(self.load_logins()?.get(username).cloned())
    }

    fn insert_user(&self, username: &str, account: &UserAccount) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut logins = self.load_logins()?;
        logins.insert(username.to_string(), account.clone());
        self.save_logins(&logins)
    }

    fn set_user_password(&self, username: &str, password_hash: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut logins = self.load_logins()?;
        match logins.get_mut(username) {
            Some(account) => {
                account.password_hash = password_hash.to_string();
                self.save_logins(&logins)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_user(&self, username: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut logins = self.load_logins()?;
        let removed = logins.remove(username).is_some();
        if removed {
            self.save_logins(&logins)?;
        }
        Ok(removed)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Write to a sibling tmp file first, then rename over the target, so a
/// crash mid-write never leaves a truncated data file behind.
fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension(TMP_SUFFIX);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn seed_date(iso: &str) -> DateTime<Utc> {
    iso.parse().unwrap_or_else(|_| Utc::now())
}

fn default_employees() -> Vec<Employee> {
    let seed = |id: &str, name: &str, email: &str, created: &str| Employee {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role: "employee".to_string(),
        vacation_days_total: 25.0,
        vacation_days_used: 0.0,
        vacation_days_remaining: 25.0,
        sick_days_used: 0.0,
        special_days_used: 0.0,
        personality_traits: String::new(),
        skills: Vec::<Value>::new(),
        created_date: seed_date(created),
        last_modified: None,
        last_vacation_update: None,
    };

    vec![
        seed(
            "1",
            "Alexander Knoll",
            "alexander@express-logistik.com",
            "2024-01-15T10:00:00Z",
        ),
        seed(
            "2",
            "Benjamin Winter",
            "benjamin@express-logistik.com",
            "2024-01-20T10:00:00Z",
        ),
        seed(
            "3",
            "Gerhard Schmidt",
            "gerhard@express-logistik.com",
            "2024-02-05T10:00:00Z",
        ),
    ]
}

fn default_logins() -> BTreeMap<String, UserAccount> {
    let account = |password: &str, role: &str| UserAccount {
        password_hash: hash_password(password),
        role: role.to_string(),
    };

    BTreeMap::from([
        ("admin".to_string(), account("admin123", "admin")),
        ("logistik".to_string(), account("logistik123", "user")),
        ("manager".to_string(), account("manager123", "user")),
        ("hr".to_string(), account("hr123", "user")),
        ("gerhard".to_string(), account("gerhard123", "user")),
        ("express".to_string(), account("express123", "user")),
    ])
}
