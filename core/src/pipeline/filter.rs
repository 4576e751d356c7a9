use super::criteria::FilterCriteria;
use crate::records::model::ComplianceRecord;
use serde::{Deserialize, Serialize};

/// Derived views for one render cycle. The source record set is never
/// touched; both views are fresh copies.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilteredView {
    pub filtered: Vec<ComplianceRecord>,
    pub violations: Vec<ComplianceRecord>,
}

/// Records on a selected platform inside the selected date range, in input order.
pub fn filter_records(
    records: &[ComplianceRecord],
    criteria: &FilterCriteria,
) -> Vec<ComplianceRecord> {
    let filtered: Vec<ComplianceRecord> = records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect();
    tracing::debug!(
        input = records.len(),
        kept = filtered.len(),
        platforms = criteria.platforms.len(),
        "filtered compliance records"
    );
    filtered
}

/// Non-compliant records whose violation kind is selected.
pub fn select_violations(
    filtered: &[ComplianceRecord],
    criteria: &FilterCriteria,
) -> Vec<ComplianceRecord> {
    filtered
        .iter()
        .filter(|r| {
            !r.is_compliant
                && r
                    .violation_type
                    .is_some_and(|v| criteria.violation_types.contains(&v))
        })
        .cloned()
        .collect()
}

pub fn apply_filters(records: &[ComplianceRecord], criteria: &FilterCriteria) -> FilteredView {
    let filtered = filter_records(records, criteria);
    let violations = select_violations(&filtered, criteria);
    FilteredView {
        filtered,
        violations,
    }
}
