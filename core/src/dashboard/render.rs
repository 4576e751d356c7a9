use crate::calendar::format_timestamp;
use crate::error::CoreResult;
use crate::pipeline::aggregate::{
    compliance_by_platform, compute_kpis, daily_violation_counts, violation_counts_by_type,
    DailyCount, Kpis, PlatformCompliance,
};
use crate::pipeline::filter::FilteredView;
use crate::records::model::{ComplianceRecord, Severity, ViolationType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KpiTile {
    pub label: String,
    pub value: String,
}

/// One donut slice of the violations breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViolationShare {
    pub violation_type: ViolationType,
    pub count: usize,
    pub share_percent: f64,
}

/// Expander entry in the violations feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: u64,
    pub headline: String,
    pub product_name: String,
    pub brand: String,
    pub severity: Severity,
    pub detected_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportOffer {
    pub available: bool,
    pub file_name: String,
    pub row_count: usize,
}

/// Everything the presentation layer draws for one filter selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub kpis: Kpis,
    pub kpi_tiles: Vec<KpiTile>,
    pub compliance_by_platform: Vec<PlatformCompliance>,
    pub violation_breakdown: Vec<ViolationShare>,
    pub daily_trend: Vec<DailyCount>,
    pub feed: Vec<FeedEntry>,
    pub export: ExportOffer,
}

pub fn kpi_tiles(kpis: &Kpis) -> Vec<KpiTile> {
    vec![
        KpiTile {
            label: "Overall Compliance".to_string(),
            value: format!("{:.1}%", kpis.compliance_rate),
        },
        KpiTile {
            label: "Active Violations in View".to_string(),
            value: kpis.active_violations.to_string(),
        },
        KpiTile {
            label: "Platforms in View".to_string(),
            value: kpis.platforms_in_view.to_string(),
        },
    ]
}

pub fn violation_breakdown(violations: &[ComplianceRecord]) -> Vec<ViolationShare> {
    let counts = violation_counts_by_type(violations);
    let total: usize = counts.iter().map(|c| c.count).sum();
    counts
        .into_iter()
        .map(|c| ViolationShare {
            violation_type: c.violation_type,
            count: c.count,
            share_percent: if total == 0 {
                0.0
            } else {
                c.count as f64 / total as f64 * 100.0
            },
        })
        .collect()
}

/// The first `limit` violations in view order (most recent first for a
/// generated set).
pub fn violations_feed(
    violations: &[ComplianceRecord],
    limit: usize,
) -> CoreResult<Vec<FeedEntry>> {
    violations
        .iter()
        .take(limit)
        .map(|r| -> CoreResult<FeedEntry> {
            Ok(FeedEntry {
                id: r.id,
                headline: format!(
                    "{} on {}",
                    r.violation_type.map_or("Compliant", |v| v.as_str()),
                    r.platform
                ),
                product_name: r.product_name.clone(),
                brand: r.brand.clone(),
                severity: r.severity,
                detected_at: format_timestamp(r.timestamp)?,
            })
        })
        .collect()
}

pub fn build_snapshot(
    view: &FilteredView,
    feed_limit: usize,
    export_file_name: &str,
) -> CoreResult<DashboardSnapshot> {
    let kpis = compute_kpis(&view.filtered);
    Ok(DashboardSnapshot {
        kpi_tiles: kpi_tiles(&kpis),
        kpis,
        compliance_by_platform: compliance_by_platform(&view.filtered),
        violation_breakdown: violation_breakdown(&view.violations),
        daily_trend: daily_violation_counts(&view.violations),
        feed: violations_feed(&view.violations, feed_limit)?,
        export: ExportOffer {
            available: !view.violations.is_empty(),
            file_name: export_file_name.to_string(),
            row_count: view.violations.len(),
        },
    })
}
