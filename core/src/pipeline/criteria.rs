use crate::calendar::end_of_day_exclusive;
use crate::records::model::{ComplianceRecord, Platform, ViolationType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::{Date, PrimitiveDateTime};

/// Inclusive calendar-day selection, evaluated as the half-open instant
/// range `[start 00:00, end + 1 day 00:00)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    #[serde(with = "crate::calendar::date_serde")]
    pub start: Date,
    #[serde(with = "crate::calendar::date_serde")]
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Self {
        DateRange { start, end }
    }

    pub fn unbounded() -> Self {
        DateRange {
            start: Date::MIN,
            end: Date::MAX,
        }
    }

    /// An end date before the start date selects nothing.
    pub fn contains(&self, ts: PrimitiveDateTime) -> bool {
        if self.end < self.start || ts < self.start.midnight() {
            return false;
        }
        match end_of_day_exclusive(self.end) {
            Some(end) => ts < end,
            None => true,
        }
    }
}

/// User selections from the filter sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterCriteria {
    pub platforms: BTreeSet<Platform>,
    pub violation_types: BTreeSet<ViolationType>,
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn new(
        platforms: impl IntoIterator<Item = Platform>,
        violation_types: impl IntoIterator<Item = ViolationType>,
        date_range: DateRange,
    ) -> Self {
        FilterCriteria {
            platforms: platforms.into_iter().collect(),
            violation_types: violation_types.into_iter().collect(),
            date_range,
        }
    }

    /// Every platform and violation kind, no date restriction.
    pub fn everything() -> Self {
        FilterCriteria::new(Platform::ALL, ViolationType::ALL, DateRange::unbounded())
    }

    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.platforms = platforms.into_iter().collect();
        self
    }

    pub fn with_violation_types(
        mut self,
        violation_types: impl IntoIterator<Item = ViolationType>,
    ) -> Self {
        self.violation_types = violation_types.into_iter().collect();
        self
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn matches(&self, record: &ComplianceRecord) -> bool {
        self.platforms.contains(&record.platform) && self.date_range.contains(record.timestamp)
    }
}

/// Choices offered by the filter sidebar, derived from the full record set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterOptions {
    pub platforms: Vec<Platform>,
    pub violation_types: Vec<ViolationType>,
    /// `None` when there are no records to bound the range.
    pub date_bounds: Option<DateRange>,
}

impl FilterOptions {
    pub fn from_records(records: &[ComplianceRecord]) -> Self {
        let platforms: BTreeSet<Platform> = records.iter().map(|r| r.platform).collect();
        let violation_types: BTreeSet<ViolationType> =
            records.iter().filter_map(|r| r.violation_type).collect();
        let min_date = records.iter().map(|r| r.timestamp.date()).min();
        let max_date = records.iter().map(|r| r.timestamp.date()).max();
        let date_bounds = match (min_date, max_date) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        };

        FilterOptions {
            platforms: platforms.into_iter().collect(),
            violation_types: violation_types.into_iter().collect(),
            date_bounds,
        }
    }

    /// Sidebar defaults: every offered option selected, full observed range.
    pub fn default_criteria(&self) -> FilterCriteria {
        FilterCriteria::new(
            self.platforms.iter().copied(),
            self.violation_types.iter().copied(),
            self.date_bounds.unwrap_or_else(DateRange::unbounded),
        )
    }
}
