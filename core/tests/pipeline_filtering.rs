use compliance_dashboard::config::DashboardConfig;
use compliance_dashboard::pipeline::aggregate::{
    compliance_rate, compute_kpis, violation_counts_by_type, ViolationCount,
};
use compliance_dashboard::pipeline::criteria::{DateRange, FilterCriteria, FilterOptions};
use compliance_dashboard::pipeline::filter::{apply_filters, filter_records, select_violations};
use compliance_dashboard::records::generator::RecordGenerator;
use compliance_dashboard::records::model::{ComplianceRecord, Platform, ViolationType};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use time::macros::{date, datetime};
use time::PrimitiveDateTime;

fn record(id: u64, platform: Platform, ts: PrimitiveDateTime, v: Option<ViolationType>) -> ComplianceRecord {
    ComplianceRecord::observe(id, "Headphones (Electronics)", "BrandA", platform, ts, v)
}

fn generated(count: usize, seed: u64) -> Vec<ComplianceRecord> {
    RecordGenerator::new(&DashboardConfig::default())
        .unwrap()
        .generate(count, datetime!(2026-10-18 12:00:00), &mut StdRng::seed_from_u64(seed))
        .unwrap()
}

#[test]
fn three_record_scenario() {
    let ts = datetime!(2026-10-15 09:00:00);
    let records = vec![
        record(1, Platform::AmazonIn, ts, None),
        record(2, Platform::Flipkart, ts, Some(ViolationType::MrpDeclarationMissing)),
        record(3, Platform::AmazonIn, ts, Some(ViolationType::CountryOfOriginMissing)),
    ];
    let criteria = FilterOptions::from_records(&records)
        .default_criteria()
        .with_platforms([Platform::AmazonIn]);

    let view = apply_filters(&records, &criteria);
    assert_eq!(view.filtered.len(), 2);
    assert_eq!(compliance_rate(&view.filtered), 50.0);
    assert_eq!(
        violation_counts_by_type(&view.violations),
        vec![ViolationCount {
            violation_type: ViolationType::CountryOfOriginMissing,
            count: 1
        }]
    );
}

#[test]
fn end_date_covers_the_whole_day() {
    let records = vec![
        record(1, Platform::Ajio, datetime!(2026-10-10 23:59:59), None),
        record(2, Platform::Ajio, datetime!(2026-10-11 00:00:00), None),
    ];
    let criteria = FilterCriteria::everything()
        .with_date_range(DateRange::new(date!(2026 - 10 - 01), date!(2026 - 10 - 10)));
    let kept: Vec<u64> = filter_records(&records, &criteria).iter().map(|r| r.id).collect();
    assert_eq!(kept, vec![1]);
}

#[test]
fn default_criteria_return_the_full_set() {
    let records = generated(500, 21);
    let criteria = FilterOptions::from_records(&records).default_criteria();
    let view = apply_filters(&records, &criteria);
    assert_eq!(view.filtered, records);
    let all_violations: Vec<ComplianceRecord> =
        records.iter().filter(|r| !r.is_compliant).cloned().collect();
    assert_eq!(view.violations, all_violations);
}

#[test]
fn reversed_date_range_yields_empty_outputs() {
    let records = generated(200, 22);
    let criteria = FilterCriteria::everything()
        .with_date_range(DateRange::new(date!(2026 - 10 - 18), date!(2026 - 10 - 01)));
    let view = apply_filters(&records, &criteria);
    assert!(view.filtered.is_empty());
    assert!(view.violations.is_empty());
    let kpis = compute_kpis(&view.filtered);
    assert_eq!(kpis.compliance_rate, 0.0);
    assert_eq!(kpis.active_violations, 0);
    assert_eq!(kpis.platforms_in_view, 0);
}

#[test]
fn empty_violation_selection_keeps_filtered_view() {
    let records = generated(200, 23);
    let criteria = FilterCriteria::everything().with_violation_types(Vec::<ViolationType>::new());
    let view = apply_filters(&records, &criteria);
    assert_eq!(view.filtered.len(), records.len());
    assert!(view.violations.is_empty());
}

#[test]
fn filtering_leaves_source_untouched() {
    let records = generated(100, 24);
    let before = records.clone();
    let _ = apply_filters(&records, &FilterCriteria::everything().with_platforms([Platform::Myntra]));
    assert_eq!(records, before);
}

proptest! {
    #[test]
    fn filtering_is_idempotent(
        seed in any::<u64>(),
        count in 0usize..300,
        platforms in proptest::sample::subsequence(Platform::ALL.to_vec(), 0..=6),
        kinds in proptest::sample::subsequence(ViolationType::ALL.to_vec(), 0..=5),
        start_offset in 0i64..30,
        span in -3i64..30,
    ) {
        let records = generated(count, seed);
        let start = date!(2026 - 09 - 18) + time::Duration::days(start_offset);
        let end = start + time::Duration::days(span);
        let criteria = FilterCriteria::new(platforms, kinds, DateRange::new(start, end));

        let once = filter_records(&records, &criteria);
        let twice = filter_records(&once, &criteria);
        prop_assert_eq!(&once, &twice);

        let violations = select_violations(&once, &criteria);
        prop_assert_eq!(&select_violations(&violations, &criteria), &violations);

        let rate = compliance_rate(&once);
        prop_assert!((0.0..=100.0).contains(&rate));
    }
}
