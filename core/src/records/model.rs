use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::PrimitiveDateTime;

/// Marketplaces a listing can be observed on. Declaration order is the
/// alphabetical order of the labels, so `Ord` matches a sorted label list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    #[serde(rename = "Ajio")]
    Ajio,
    #[serde(rename = "Amazon.in")]
    AmazonIn,
    #[serde(rename = "Flipkart")]
    Flipkart,
    #[serde(rename = "Meesho")]
    Meesho,
    #[serde(rename = "Myntra")]
    Myntra,
    #[serde(rename = "Tata CLiQ")]
    TataCliq,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Ajio,
        Platform::AmazonIn,
        Platform::Flipkart,
        Platform::Meesho,
        Platform::Myntra,
        Platform::TataCliq,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ajio => "Ajio",
            Platform::AmazonIn => "Amazon.in",
            Platform::Flipkart => "Flipkart",
            Platform::Meesho => "Meesho",
            Platform::Myntra => "Myntra",
            Platform::TataCliq => "Tata CLiQ",
        }
    }

    /// Host stem used in product URLs: lowercased label up to the first '.'.
    pub fn url_stem(self) -> String {
        let lower = self.as_str().to_lowercase();
        match lower.split_once('.') {
            Some((stem, _)) => stem.to_string(),
            None => lower,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let wanted = s.trim();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown platform '{}'", s)))
    }
}

/// Regulatory violation kinds. Declaration order matches a byte-wise sort
/// of the labels ("MRP ..." sorts before "Manufacturer ...").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViolationType {
    #[serde(rename = "Country of Origin Missing")]
    CountryOfOriginMissing,
    #[serde(rename = "Incorrect Net Quantity")]
    IncorrectNetQuantity,
    #[serde(rename = "MRP Declaration Missing")]
    MrpDeclarationMissing,
    #[serde(rename = "Manufacturer Details Missing")]
    ManufacturerDetailsMissing,
    #[serde(rename = "No Customer Care Info")]
    NoCustomerCareInfo,
}

impl ViolationType {
    pub const ALL: [ViolationType; 5] = [
        ViolationType::CountryOfOriginMissing,
        ViolationType::IncorrectNetQuantity,
        ViolationType::MrpDeclarationMissing,
        ViolationType::ManufacturerDetailsMissing,
        ViolationType::NoCustomerCareInfo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViolationType::CountryOfOriginMissing => "Country of Origin Missing",
            ViolationType::IncorrectNetQuantity => "Incorrect Net Quantity",
            ViolationType::MrpDeclarationMissing => "MRP Declaration Missing",
            ViolationType::ManufacturerDetailsMissing => "Manufacturer Details Missing",
            ViolationType::NoCustomerCareInfo => "No Customer Care Info",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            ViolationType::MrpDeclarationMissing | ViolationType::CountryOfOriginMissing => {
                Severity::Critical
            }
            _ => Severity::High,
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViolationType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let wanted = s.trim();
        ViolationType::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown violation type '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical,
    High,
    None,
}

impl Severity {
    pub fn for_violation(violation: Option<ViolationType>) -> Severity {
        violation.map_or(Severity::None, ViolationType::severity)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::None => "None",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation of a listing's regulatory status on a platform.
///
/// Field order is the export column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceRecord {
    pub id: u64,
    pub product_name: String,
    pub brand: String,
    pub platform: Platform,
    #[serde(with = "crate::calendar::timestamp_serde")]
    pub timestamp: PrimitiveDateTime,
    pub violation_type: Option<ViolationType>,
    pub is_compliant: bool,
    pub severity: Severity,
    pub product_url: String,
    pub image_url: String,
}

impl ComplianceRecord {
    /// Builds a record from its observed fields; compliance flag, severity
    /// and display URLs are derived here and nowhere else.
    pub fn observe(
        id: u64,
        product_name: impl Into<String>,
        brand: impl Into<String>,
        platform: Platform,
        timestamp: PrimitiveDateTime,
        violation_type: Option<ViolationType>,
    ) -> Self {
        ComplianceRecord {
            id,
            product_name: product_name.into(),
            brand: brand.into(),
            platform,
            timestamp,
            violation_type,
            is_compliant: violation_type.is_none(),
            severity: Severity::for_violation(violation_type),
            product_url: format!("https://www.{}.com/product/{}", platform.url_stem(), id),
            image_url: format!("https://picsum.photos/seed/{}/400/200", id),
        }
    }
}
