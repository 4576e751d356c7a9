use crate::records::model::{ComplianceRecord, Platform, ViolationType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformCompliance {
    pub platform: Platform,
    pub total: usize,
    pub compliant: usize,
    pub compliance_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViolationCount {
    pub violation_type: ViolationType,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyCount {
    #[serde(with = "crate::calendar::date_serde")]
    pub date: Date,
    pub count: usize,
}

/// Headline numbers for the KPI tiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Kpis {
    pub compliance_rate: f64,
    pub active_violations: usize,
    pub platforms_in_view: usize,
}

/// Percentage of compliant records; 0 for an empty set.
pub fn compliance_rate(records: &[ComplianceRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let compliant = records.iter().filter(|r| r.is_compliant).count();
    compliant as f64 / records.len() as f64 * 100.0
}

/// Per-platform compliance, ordered by platform.
pub fn compliance_by_platform(records: &[ComplianceRecord]) -> Vec<PlatformCompliance> {
    let mut groups: BTreeMap<Platform, (usize, usize)> = BTreeMap::new();
    for r in records {
        let entry = groups.entry(r.platform).or_insert((0, 0));
        entry.0 += 1;
        if r.is_compliant {
            entry.1 += 1;
        }
    }
    groups
        .into_iter()
        .map(|(platform, (total, compliant))| PlatformCompliance {
            platform,
            total,
            compliant,
            compliance_rate: compliant as f64 / total as f64 * 100.0,
        })
        .collect()
}

/// Count per violation kind, most frequent first; ties ordered by kind.
pub fn violation_counts_by_type(violations: &[ComplianceRecord]) -> Vec<ViolationCount> {
    let mut groups: BTreeMap<ViolationType, usize> = BTreeMap::new();
    for v in violations.iter().filter_map(|r| r.violation_type) {
        *groups.entry(v).or_insert(0) += 1;
    }
    let mut counts: Vec<ViolationCount> = groups
        .into_iter()
        .map(|(violation_type, count)| ViolationCount {
            violation_type,
            count,
        })
        .collect();
    // BTreeMap already yields kinds in order, so a stable sort keeps ties ordered.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Violations per calendar day, oldest day first. Days without violations
/// are absent rather than zero-filled.
pub fn daily_violation_counts(violations: &[ComplianceRecord]) -> Vec<DailyCount> {
    let mut groups: BTreeMap<Date, usize> = BTreeMap::new();
    for r in violations {
        *groups.entry(r.timestamp.date()).or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

pub fn compute_kpis(filtered: &[ComplianceRecord]) -> Kpis {
    let platforms: BTreeSet<Platform> = filtered.iter().map(|r| r.platform).collect();
    Kpis {
        compliance_rate: compliance_rate(filtered),
        active_violations: filtered.iter().filter(|r| !r.is_compliant).count(),
        platforms_in_view: platforms.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use time::PrimitiveDateTime;

    fn record(
        id: u64,
        platform: Platform,
        ts: PrimitiveDateTime,
        violation: Option<ViolationType>,
    ) -> ComplianceRecord {
        ComplianceRecord::observe(id, "Jacket (Apparel)", "BrandB", platform, ts, violation)
    }

    #[test]
    fn test_empty_inputs_degrade_to_zero() {
        assert_eq!(compliance_rate(&[]), 0.0);
        assert!(compliance_by_platform(&[]).is_empty());
        assert!(violation_counts_by_type(&[]).is_empty());
        assert!(daily_violation_counts(&[]).is_empty());
        assert_eq!(
            compute_kpis(&[]),
            Kpis {
                compliance_rate: 0.0,
                active_violations: 0,
                platforms_in_view: 0,
            }
        );
    }

    #[test]
    fn test_compliance_by_platform_groups() {
        let ts = datetime!(2026-10-10 10:00:00);
        let records = vec![
            record(1, Platform::Myntra, ts, None),
            record(2, Platform::Myntra, ts, Some(ViolationType::IncorrectNetQuantity)),
            record(3, Platform::Myntra, ts, None),
            record(4, Platform::Ajio, ts, Some(ViolationType::NoCustomerCareInfo)),
        ];
        let by_platform = compliance_by_platform(&records);
        assert_eq!(by_platform.len(), 2);
        assert_eq!(by_platform[0].platform, Platform::Ajio);
        assert_eq!(by_platform[0].compliance_rate, 0.0);
        assert_eq!(by_platform[1].platform, Platform::Myntra);
        assert_eq!(by_platform[1].total, 3);
        assert!((by_platform[1].compliance_rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_violation_counts_most_frequent_first() {
        let ts = datetime!(2026-10-10 10:00:00);
        let records = vec![
            record(1, Platform::Ajio, ts, Some(ViolationType::NoCustomerCareInfo)),
            record(2, Platform::Ajio, ts, Some(ViolationType::IncorrectNetQuantity)),
            record(3, Platform::Ajio, ts, Some(ViolationType::NoCustomerCareInfo)),
            record(4, Platform::Ajio, ts, Some(ViolationType::CountryOfOriginMissing)),
        ];
        let counts = violation_counts_by_type(&records);
        assert_eq!(
            counts,
            vec![
                ViolationCount {
                    violation_type: ViolationType::NoCustomerCareInfo,
                    count: 2
                },
                ViolationCount {
                    violation_type: ViolationType::CountryOfOriginMissing,
                    count: 1
                },
                ViolationCount {
                    violation_type: ViolationType::IncorrectNetQuantity,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_daily_counts_truncate_to_date() {
        let v = Some(ViolationType::MrpDeclarationMissing);
        let records = vec![
            record(1, Platform::Flipkart, datetime!(2026-10-11 23:59:59), v),
            record(2, Platform::Flipkart, datetime!(2026-10-11 00:00:00), v),
            record(3, Platform::Flipkart, datetime!(2026-10-09 12:00:00), v),
        ];
        let daily = daily_violation_counts(&records);
        assert_eq!(
            daily,
            vec![
                DailyCount {
                    date: date!(2026 - 10 - 09),
                    count: 1
                },
                DailyCount {
                    date: date!(2026 - 10 - 11),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_kpis_count_distinct_platforms() {
        let ts = datetime!(2026-10-10 10:00:00);
        let records = vec![
            record(1, Platform::Meesho, ts, None),
            record(2, Platform::Meesho, ts, Some(ViolationType::IncorrectNetQuantity)),
            record(3, Platform::TataCliq, ts, Some(ViolationType::NoCustomerCareInfo)),
            record(4, Platform::TataCliq, ts, None),
        ];
        let kpis = compute_kpis(&records);
        assert_eq!(kpis.compliance_rate, 50.0);
        assert_eq!(kpis.active_violations, 2);
        assert_eq!(kpis.platforms_in_view, 2);
    }
}
