use super::model::ViolationType;

/// A product category and the listings that can be drawn from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductCategory {
    pub name: &'static str,
    pub products: &'static [&'static str],
}

pub const CATEGORIES: [ProductCategory; 3] = [
    ProductCategory {
        name: "Electronics",
        products: &["Smartphone", "Laptop", "Headphones", "Smartwatch"],
    },
    ProductCategory {
        name: "Apparel",
        products: &["T-Shirt", "Jeans", "Jacket", "Sneakers"],
    },
    ProductCategory {
        name: "Groceries",
        products: &["Organic Honey", "Basmati Rice", "Olive Oil", "Almonds"],
    },
];

pub const BRANDS: [&str; 5] = ["BrandA", "BrandB", "BrandC", "BrandD", "BrandE"];

/// Outcome distribution for a single observation; `None` is "Compliant".
pub const OUTCOME_WEIGHTS: [(Option<ViolationType>, f64); 6] = [
    (Some(ViolationType::MrpDeclarationMissing), 0.20),
    (Some(ViolationType::CountryOfOriginMissing), 0.20),
    (Some(ViolationType::IncorrectNetQuantity), 0.15),
    (Some(ViolationType::ManufacturerDetailsMissing), 0.15),
    (Some(ViolationType::NoCustomerCareInfo), 0.10),
    (None, 0.20),
];
