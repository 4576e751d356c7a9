use super::catalog::{BRANDS, CATEGORIES, OUTCOME_WEIGHTS};
use super::model::{ComplianceRecord, Platform, ViolationType};
use super::sampler::{pick_uniform, WeightedTable};
use crate::calendar::now_naive_utc;
use crate::config::DashboardConfig;
use crate::error::{CoreError, CoreResult};
use rand::Rng;
use time::{Duration, PrimitiveDateTime};

/// Synthetic record source standing in for a real ingestion backend.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    id_base: u64,
    window_days: u32,
    window_hours: u32,
    outcomes: WeightedTable<Option<ViolationType>>,
}

impl RecordGenerator {
    pub fn new(config: &DashboardConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(RecordGenerator {
            id_base: config.id_base,
            window_days: config.window_days,
            window_hours: config.window_hours,
            outcomes: WeightedTable::new(&OUTCOME_WEIGHTS)?,
        })
    }

    /// Generates `count` records observed before `now`, most recent first.
    /// A zero count yields an empty set. Fails when the ids
    /// `id_base..id_base + count` do not fit in a `u64`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        now: PrimitiveDateTime,
        rng: &mut R,
    ) -> CoreResult<Vec<ComplianceRecord>> {
        id_range_end(self.id_base, count).ok_or_else(|| {
            CoreError::InvalidInput(format!(
                "{} records starting at id {} overflow the id space",
                count, self.id_base
            ))
        })?;
        let mut records = Vec::with_capacity(count);
        for id in (self.id_base..).take(count) {
            records.push(self.draw_record(id, now, rng));
        }
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        tracing::info!(
            count = records.len(),
            violations = records.iter().filter(|r| !r.is_compliant).count(),
            "generated compliance records"
        );
        Ok(records)
    }

    fn draw_record<R: Rng + ?Sized>(
        &self,
        id: u64,
        now: PrimitiveDateTime,
        rng: &mut R,
    ) -> ComplianceRecord {
        let category = pick_uniform(&CATEGORIES, rng);
        let product = pick_uniform(category.products, rng);
        let platform = *pick_uniform(&Platform::ALL, rng);
        let violation = self.outcomes.draw(rng);
        let brand = *pick_uniform(&BRANDS, rng);
        let days_back = rng.gen_range(0..self.window_days);
        let hours_back = rng.gen_range(0..self.window_hours);
        let timestamp =
            now - Duration::days(i64::from(days_back)) - Duration::hours(i64::from(hours_back));

        ComplianceRecord::observe(
            id,
            format!("{} ({})", product, category.name),
            brand,
            platform,
            timestamp,
            violation,
        )
    }
}

/// Exclusive end of the id range for `count` records starting at `id_base`.
pub fn id_range_end(id_base: u64, count: usize) -> Option<u64> {
    u64::try_from(count)
        .ok()
        .and_then(|n| id_base.checked_add(n))
}

/// Generates a fresh record set with the default config, the thread RNG
/// and the current time.
pub fn generate_records(count: usize) -> CoreResult<Vec<ComplianceRecord>> {
    let generator = RecordGenerator::new(&DashboardConfig::default())?;
    generator.generate(count, now_naive_utc(), &mut rand::thread_rng())
}
