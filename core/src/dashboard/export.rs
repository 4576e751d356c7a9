use crate::calendar::format_timestamp;
use crate::error::CoreResult;
use crate::records::model::ComplianceRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Export column order. Downstream parsers depend on it; append only.
pub const CSV_HEADER: [&str; 10] = [
    "id",
    "product_name",
    "brand",
    "platform",
    "timestamp",
    "violation_type",
    "is_compliant",
    "severity",
    "product_url",
    "image_url",
];

/// A downloadable file handed to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub content_type: String,
    pub body: String,
}

impl ExportDocument {
    pub fn write_to(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.body.as_bytes())?;
        tracing::info!(
            path = %path.display(),
            bytes = self.body.len(),
            "wrote export document"
        );
        Ok(())
    }
}

fn bool_field(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Flat CSV of the given records: header row, one row per record,
/// `\n` terminated, absent violation type as an empty field.
pub fn render_records_csv(records: &[ComplianceRecord]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    for r in records {
        let timestamp = format_timestamp(r.timestamp)?;
        wtr.write_record([
            r.id.to_string().as_str(),
            r.product_name.as_str(),
            r.brand.as_str(),
            r.platform.as_str(),
            timestamp.as_str(),
            r.violation_type.map_or("", |v| v.as_str()),
            bool_field(r.is_compliant),
            r.severity.as_str(),
            r.product_url.as_str(),
            r.image_url.as_str(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// The download offered under the violations feed; `None` when there is
/// nothing to export.
pub fn violations_export(
    violations: &[ComplianceRecord],
    file_name: &str,
) -> CoreResult<Option<ExportDocument>> {
    if violations.is_empty() {
        return Ok(None);
    }
    let body = render_records_csv(violations)?;
    tracing::info!(rows = violations.len(), file_name, "rendered violations export");
    Ok(Some(ExportDocument {
        file_name: file_name.to_string(),
        content_type: CSV_CONTENT_TYPE.to_string(),
        body,
    }))
}
