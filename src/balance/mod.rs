pub mod recompute;

use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;
use utoipa::ToSchema;

use crate::model::vacation::{VacationEntry, VacationType};

pub use recompute::Recomputer;

/// Derived balances for one employee: per-category used totals plus the
/// remaining vacation entitlement.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Balances {
    /// Always carries all three categories, zero when unused.
    #[schema(value_type = Object, example = json!({"VACATION": 5.0, "SICK": 1.0, "SPECIAL": 0.0}))]
    pub used: BTreeMap<VacationType, f64>,
    #[schema(example = 20.0)]
    pub remaining: f64,
}

impl Balances {
    pub fn used(&self, category: VacationType) -> f64 {
        self.used.get(&category).copied().unwrap_or(0.0)
    }
}

/// Derives per-category used totals and the remaining vacation balance from
/// the full entry set of a single employee.
///
/// The caller filters the entries to one employee beforehand; no filtering
/// or validation happens here. Entries are summed independently even when
/// their date ranges overlap, and a negative `days_count` computes through
/// verbatim. Only the VACATION category consumes `allotted_days`.
pub fn compute_balances(allotted_days: f64, entries: &[VacationEntry]) -> Balances {
    let mut used: BTreeMap<VacationType, f64> =
        VacationType::iter().map(|category| (category, 0.0)).collect();

    for entry in entries {
        *used.entry(entry.vacation_type).or_insert(0.0) += entry.days_count;
    }

    let remaining = allotted_days - used[&VacationType::Vacation];

    Balances { used, remaining }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn entry(vacation_type: VacationType, days_count: f64) -> VacationEntry {
        VacationEntry {
            id: uuid::Uuid::new_v4().to_string(),
            employee_id: "emp-1".to_string(),
            employee_name: "Test Employee".to_string(),
            vacation_type,
            start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 7, 5).unwrap(),
            days_count,
            description: String::new(),
            created_date: Utc::now(),
            last_modified: None,
        }
    }

    #[test]
    fn empty_entry_set_yields_full_entitlement() {
        let balances = compute_balances(25.0, &[]);

        assert_eq!(balances.used(VacationType::Vacation), 0.0);
        assert_eq!(balances.used(VacationType::Sick), 0.0);
        assert_eq!(balances.used(VacationType::Special), 0.0);
        assert_eq!(balances.remaining, 25.0);
    }

    #[test]
    fn sums_per_category() {
        let entries = vec![
            entry(VacationType::Vacation, 3.0),
            entry(VacationType::Vacation, 2.0),
            entry(VacationType::Sick, 1.0),
        ];

        let balances = compute_balances(25.0, &entries);

        assert_eq!(balances.used(VacationType::Vacation), 5.0);
        assert_eq!(balances.used(VacationType::Sick), 1.0);
        assert_eq!(balances.used(VacationType::Special), 0.0);
        assert_eq!(balances.remaining, 20.0);
    }

    #[test]
    fn only_vacation_reduces_remaining() {
        let sick_only = compute_balances(25.0, &[entry(VacationType::Sick, 4.0)]);
        assert_eq!(sick_only.remaining, 25.0);

        let special_only = compute_balances(25.0, &[entry(VacationType::Special, 2.5)]);
        assert_eq!(special_only.remaining, 25.0);

        let with_vacation = compute_balances(25.0, &[entry(VacationType::Vacation, 4.0)]);
        assert_eq!(with_vacation.remaining, 21.0);
    }

    #[test]
    fn overlapping_ranges_are_summed_independently() {
        // Two entries over the same week still count twice.
        let entries = vec![
            entry(VacationType::Vacation, 5.0),
            entry(VacationType::Vacation, 5.0),
        ];

        let balances = compute_balances(25.0, &entries);
        assert_eq!(balances.used(VacationType::Vacation), 10.0);
        assert_eq!(balances.remaining, 15.0);
    }

    #[test]
    fn negative_counts_compute_through() {
        let entries = vec![
            entry(VacationType::Vacation, -3.0),
            entry(VacationType::Vacation, 1.0),
        ];

        let balances = compute_balances(5.0, &entries);
        assert_eq!(balances.used(VacationType::Vacation), -2.0);
        assert_eq!(balances.remaining, 7.0);
    }

    #[test]
    fn fractional_days_are_supported() {
        let entries = vec![entry(VacationType::Vacation, 0.5)];

        let balances = compute_balances(25.0, &entries);
        assert_eq!(balances.used(VacationType::Vacation), 0.5);
        assert_eq!(balances.remaining, 24.5);
    }
}
