use super::export::{violations_export, ExportDocument};
use super::render::{build_snapshot, DashboardSnapshot};
use crate::calendar::now_naive_utc;
use crate::config::DashboardConfig;
use crate::error::CoreResult;
use crate::pipeline::criteria::{FilterCriteria, FilterOptions};
use crate::pipeline::filter::{apply_filters, FilteredView};
use crate::records::generator::RecordGenerator;
use crate::records::model::ComplianceRecord;
use rand::Rng;
use time::PrimitiveDateTime;

/// One viewer's dashboard state. The record set is generated once and only
/// read afterwards; sessions never share records.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    config: DashboardConfig,
    records: Vec<ComplianceRecord>,
    options: FilterOptions,
}

impl DashboardSession {
    pub fn start(config: DashboardConfig) -> CoreResult<Self> {
        Self::start_with(config, now_naive_utc(), &mut rand::thread_rng())
    }

    pub fn start_with<R: Rng + ?Sized>(
        config: DashboardConfig,
        now: PrimitiveDateTime,
        rng: &mut R,
    ) -> CoreResult<Self> {
        let generator = RecordGenerator::new(&config)?;
        let records = generator.generate(config.record_count, now, rng)?;
        Ok(Self::from_records(config, records))
    }

    /// Wraps an externally supplied record set. Records are taken as
    /// well-formed; validation belongs to whatever produced them.
    pub fn from_records(config: DashboardConfig, records: Vec<ComplianceRecord>) -> Self {
        let options = FilterOptions::from_records(&records);
        DashboardSession {
            config,
            records,
            options,
        }
    }

    pub fn records(&self) -> &[ComplianceRecord] {
        &self.records
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn default_criteria(&self) -> FilterCriteria {
        self.options.default_criteria()
    }

    pub fn view(&self, criteria: &FilterCriteria) -> FilteredView {
        apply_filters(&self.records, criteria)
    }

    pub fn snapshot(&self, criteria: &FilterCriteria) -> CoreResult<DashboardSnapshot> {
        let view = self.view(criteria);
        build_snapshot(&view, self.config.feed_limit, &self.config.export_file_name)
    }

    pub fn export_violations(&self, criteria: &FilterCriteria) -> CoreResult<Option<ExportDocument>> {
        let view = self.view(criteria);
        violations_export(&view.violations, &self.config.export_file_name)
    }
}
