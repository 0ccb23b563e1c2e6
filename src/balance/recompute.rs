use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::debug;

use crate::balance::compute_balances;
use crate::model::vacation::VacationType;
use crate::storage::{self, Store};

/// Re-derives an employee's balance fields from the current entry set and
/// persists them. This is the only writer of `vacation_days_used`,
/// `vacation_days_remaining`, `sick_days_used` and `special_days_used`
/// after employee creation; every code path that mutates a vacation entry
/// must call back into here for each affected employee.
pub struct Recomputer {
    store: Arc<dyn Store>,
    // One lock per employee id so the load-compute-write cycle cannot
    // interleave for the same employee. Recomputes for distinct employees
    // stay independent.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Recomputer {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn employee_lock(&self, employee_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(employee_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Recomputes the stored balances for one employee from scratch.
    ///
    /// A vanished employee (deleted concurrently, or deleted together with
    /// its entries) is a silent no-op. Storage failures propagate to the
    /// caller untouched. Running this twice in a row yields identical
    /// balances, so callers never need to track whether a recompute already
    /// happened.
    pub fn recompute(&self, employee_id: &str) -> storage::Result<()> {
        let lock = self.employee_lock(employee_id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let Some(mut employee) = self.store.get_employee(employee_id)? else {
            debug!(employee_id, "recompute skipped, employee no longer exists");
            return Ok(());
        };

        let entries = self.store.list_entries_by_employee(employee_id)?;
        let balances = compute_balances(employee.vacation_days_total, &entries);

        employee.vacation_days_used = balances.used(VacationType::Vacation);
        employee.sick_days_used = balances.used(VacationType::Sick);
        employee.special_days_used = balances.used(VacationType::Special);
        employee.vacation_days_remaining = balances.remaining;
        employee.last_vacation_update = Some(Utc::now());

        self.store.put_employee(&employee)?;

        debug!(
            employee_id,
            used = employee.vacation_days_used,
            remaining = employee.vacation_days_remaining,
            "balances recomputed"
        );
        Ok(())
    }

    /// Recompute for every distinct id in the slice. Used after a
    /// reassignment, where both the old and the new owner are affected;
    /// the order between the two is not significant.
    pub fn recompute_all(&self, employee_ids: &[&str]) -> storage::Result<()> {
        let mut seen: Vec<&str> = Vec::with_capacity(employee_ids.len());
        for id in employee_ids {
            if !seen.contains(id) {
                seen.push(*id);
                self.recompute(id)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::Employee;
    use crate::model::user::UserAccount;
    use crate::model::vacation::{VacationEntry, VacationType};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    /// Minimal in-memory store, enough to drive the recomputer.
    #[derive(Default)]
    struct MemStore {
        employees: Mutex<Vec<Employee>>,
        entries: Mutex<Vec<VacationEntry>>,
    }

    impl Store for MemStore {
        fn list_employees(&self) -> storage::Result<Vec<Employee>> {
            Ok(self.employees.lock().unwrap().clone())
        }

        fn get_employee(&self, id: &str) -> storage::Result<Option<Employee>> {
            Ok(self
                .employees
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id)
                .cloned())
        }

        fn insert_employee(&self, employee: &Employee) -> storage::Result<()> {
            self.employees.lock().unwrap().push(employee.clone());
            Ok(())
        }

        fn put_employee(&self, employee: &Employee) -> storage::Result<()> {
            let mut employees = self.employees.lock().unwrap();
            match employees.iter_mut().find(|e| e.id == employee.id) {
                Some(existing) => *existing = employee.clone(),
                None => employees.push(employee.clone()),
            }
            Ok(())
        }

        fn delete_employee(&self, id: &str) -> storage::Result<bool> {
            let mut employees = self.employees.lock().unwrap();
            let before = employees.len();
            employees.retain(|e| e.id != id);
            Ok(employees.len() < before)
        }

        fn list_entries(&self) -> storage::Result<Vec<VacationEntry>> {
            Ok(self.entries.lock().unwrap().clone())
        }

        fn get_entry(&self, id: &str) -> storage::Result<Option<VacationEntry>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id)
                .cloned())
        }

        fn insert_entry(&self, entry: &VacationEntry) -> storage::Result<()> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }

        fn put_entry(&self, entry: &VacationEntry) -> storage::Result<()> {
            let mut entries = self.entries.lock().unwrap();
            match entries.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => *existing = entry.clone(),
                None => entries.push(entry.clone()),
            }
            Ok(())
        }

        fn delete_entry(&self, id: &str) -> storage::Result<bool> {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| e.id != id);
            Ok(entries.len() < before)
        }

        fn list_entries_by_employee(
            &self,
            employee_id: &str,
        ) -> storage::Result<Vec<VacationEntry>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.employee_id == employee_id)
                .cloned()
                .collect())
        }

        fn delete_entries_by_employee(&self, employee_id: &str) -> storage::Result<usize> {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| e.employee_id != employee_id);
            Ok(before - entries.len())
        }

        fn list_users(&self) -> storage::Result<BTreeMap<String, UserAccount>> {
            Ok(BTreeMap::new())
        }

        fn get_user(&self, _username: &str) -> storage::Result<Option<UserAccount>> {
            Ok(None)
        }

        fn insert_user(&self, _username: &str, _account: &UserAccount) -> storage::Result<()> {
            Ok(())
        }

        fn set_user_password(
            &self,
            _username: &str,
            _password_hash: &str,
        ) -> storage::Result<bool> {
            Ok(false)
        }

        fn delete_user(&self, _username: &str) -> storage::Result<bool> {
            Ok(false)
        }
    }

    fn entry(id: &str, employee_id: &str, vacation_type: VacationType, days: f64) -> VacationEntry {
        VacationEntry {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            employee_name: "Test Employee".to_string(),
            vacation_type,
            start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 7, 5).unwrap(),
            days_count: days,
            description: String::new(),
            created_date: Utc::now(),
            last_modified: None,
        }
    }

    fn setup() -> (Arc<MemStore>, Recomputer) {
        let store = Arc::new(MemStore::default());
        let recomputer = Recomputer::new(store.clone());
        (store, recomputer)
    }

    fn add_employee(store: &MemStore, total: f64) -> String {
        let employee = Employee::new(
            "Test Employee".to_string(),
            "test@example.com".to_string(),
            "employee".to_string(),
            total,
        );
        let id = employee.id.clone();
        store.insert_employee(&employee).unwrap();
        id
    }

    #[test]
    fn derives_balances_from_entry_set() {
        let (store, recomputer) = setup();
        let id = add_employee(&store, 25.0);

        store
            .insert_entry(&entry("v1", &id, VacationType::Vacation, 3.0))
            .unwrap();
        store
            .insert_entry(&entry("v2", &id, VacationType::Vacation, 2.0))
            .unwrap();
        store
            .insert_entry(&entry("s1", &id, VacationType::Sick, 1.0))
            .unwrap();

        recomputer.recompute(&id).unwrap();

        let employee = store.get_employee(&id).unwrap().unwrap();
        assert_eq!(employee.vacation_days_used, 5.0);
        assert_eq!(employee.sick_days_used, 1.0);
        assert_eq!(employee.special_days_used, 0.0);
        assert_eq!(employee.vacation_days_remaining, 20.0);
        assert!(employee.last_vacation_update.is_some());
    }

    #[test]
    fn recompute_is_idempotent() {
        let (store, recomputer) = setup();
        let id = add_employee(&store, 25.0);
        store
            .insert_entry(&entry("v1", &id, VacationType::Vacation, 4.0))
            .unwrap();

        recomputer.recompute(&id).unwrap();
        let first = store.get_employee(&id).unwrap().unwrap();

        recomputer.recompute(&id).unwrap();
        let second = store.get_employee(&id).unwrap().unwrap();

        assert_eq!(first.vacation_days_used, second.vacation_days_used);
        assert_eq!(
            first.vacation_days_remaining,
            second.vacation_days_remaining
        );
        assert_eq!(first.sick_days_used, second.sick_days_used);
        assert_eq!(first.special_days_used, second.special_days_used);
    }

    #[test]
    fn missing_employee_is_a_noop() {
        let (_store, recomputer) = setup();
        assert!(recomputer.recompute("no-such-employee").is_ok());
    }

    #[test]
    fn sick_entries_leave_remaining_untouched() {
        let (store, recomputer) = setup();
        let id = add_employee(&store, 25.0);

        store
            .insert_entry(&entry("s1", &id, VacationType::Sick, 2.0))
            .unwrap();
        recomputer.recompute(&id).unwrap();

        let employee = store.get_employee(&id).unwrap().unwrap();
        assert_eq!(employee.sick_days_used, 2.0);
        assert_eq!(employee.vacation_days_remaining, 25.0);
    }

    #[test]
    fn reassignment_moves_balance_between_employees() {
        let (store, recomputer) = setup();
        let a = add_employee(&store, 25.0);
        let b = add_employee(&store, 30.0);

        let mut moved = entry("v1", &a, VacationType::Vacation, 4.0);
        store.insert_entry(&moved).unwrap();
        recomputer.recompute(&a).unwrap();

        let before_a = store.get_employee(&a).unwrap().unwrap();
        assert_eq!(before_a.vacation_days_used, 4.0);

        // Reassign to B, then recompute both sides.
        moved.employee_id = b.clone();
        store.put_entry(&moved).unwrap();
        recomputer.recompute_all(&[a.as_str(), b.as_str()]).unwrap();

        let after_a = store.get_employee(&a).unwrap().unwrap();
        let after_b = store.get_employee(&b).unwrap().unwrap();
        assert_eq!(after_a.vacation_days_used, 0.0);
        assert_eq!(after_a.vacation_days_remaining, 25.0);
        assert_eq!(after_b.vacation_days_used, 4.0);
        assert_eq!(after_b.vacation_days_remaining, 26.0);

        // The total moved, not duplicated or lost.
        assert_eq!(
            before_a.vacation_days_used,
            after_a.vacation_days_used + after_b.vacation_days_used
        );
    }

    #[test]
    fn recompute_all_deduplicates_ids() {
        let (store, recomputer) = setup();
        let id = add_employee(&store, 25.0);
        store
            .insert_entry(&entry("v1", &id, VacationType::Vacation, 1.5))
            .unwrap();

        // Same-owner update passes the id twice.
        recomputer.recompute_all(&[id.as_str(), id.as_str()]).unwrap();

        let employee = store.get_employee(&id).unwrap().unwrap();
        assert_eq!(employee.vacation_days_used, 1.5);
    }

    #[test]
    fn picks_up_changed_entitlement() {
        let (store, recomputer) = setup();
        let id = add_employee(&store, 25.0);
        store
            .insert_entry(&entry("v1", &id, VacationType::Vacation, 5.0))
            .unwrap();
        recomputer.recompute(&id).unwrap();

        let mut employee = store.get_employee(&id).unwrap().unwrap();
        employee.vacation_days_total = 30.0;
        store.put_employee(&employee).unwrap();

        recomputer.recompute(&id).unwrap();
        let employee = store.get_employee(&id).unwrap().unwrap();
        assert_eq!(employee.vacation_days_remaining, 25.0);
    }
}
