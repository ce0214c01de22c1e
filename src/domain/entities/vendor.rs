use std::collections::HashSet;
use std::str::FromStr;

use crate::domain::entities::record::CanonicalField;
use crate::domain::errors::{LayoutError, NormalizeError};

pub const FUEL_GRADES: &[&str] = &[
    "DIESEL",
    "HI DIESEL S",
    "HI DIESEL S B10",
    "HI DIESEL S B7",
    "HI PREMIUM DIESEL S B7",
    "GASOHOL E20S EVO",
    "NGV",
];

/// Column positions after positional projection.
pub mod cols {
    pub const DATE: usize = 0;
    pub const AMOUNT_DIESEL: usize = 1;
    pub const AMOUNT_NGV: usize = 2;
    pub const PRICE: usize = 3;
    pub const NUMBER_PLATE: usize = 4;
    pub const CARD_NUMBER: usize = 5;
    pub const STATION_NAME: usize = 6;
    pub const INVOICE_NUMBER: usize = 7;
    pub const PRICE_WITHOUT_TAX: usize = 8;
    pub const PRICE_WITH_TAX: usize = 9;
    pub const WIDTH: usize = 10;
}

const STATEMENT_SELECTORS: [usize; cols::WIDTH] = [0, 15, 16, 22, 13, 3, 3, 11, 18, 20];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalLayout {
    pub preamble_rows: usize,
    pub key_column: &'static str,
    pub known_column_count: usize,
    pub selectors: [usize; cols::WIDTH],
    pub section_marker: &'static str,
    pub label_row_marker: &'static str,
    /// Projected column whose value names the fuel grade on introducer rows.
    pub category_column: usize,
    pub categories: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLayout {
    pub preamble_rows: usize,
    pub all_sheets: bool,
    pub columns: [(&'static str, CanonicalField); 10],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorLayout {
    Positional(PositionalLayout),
    Named(NamedLayout),
}

const fn statement_layout(preamble_rows: usize) -> PositionalLayout {
    PositionalLayout {
        preamble_rows,
        key_column: "Card no.",
        known_column_count: 23,
        selectors: STATEMENT_SELECTORS,
        section_marker: "Department:",
        label_row_marker: "Card no.",
        category_column: cols::NUMBER_PLATE,
        categories: FUEL_GRADES,
    }
}

const CALTEX_LAYOUT: NamedLayout = NamedLayout {
    preamble_rows: 0,
    all_sheets: true,
    columns: [
        ("Transaction Date and Time", CanonicalField::Date),
        ("Product", CanonicalField::FuelType),
        ("Quantity", CanonicalField::Amount),
        ("Pump Price", CanonicalField::Price),
        ("License Plate", CanonicalField::NumberPlate),
        ("Card Number", CanonicalField::CardNumber),
        ("Location Name", CanonicalField::StationName),
        ("Reference No", CanonicalField::InvoiceNumber),
        ("Customer Value Tax Exclusive", CanonicalField::PriceWithoutTax),
        ("Customer Value Tax Inclusive", CanonicalField::PriceWithTax),
    ],
};

const PT_LAYOUT: NamedLayout = NamedLayout {
    preamble_rows: 6,
    all_sheets: false,
    columns: [
        ("DATE", CanonicalField::Date),
        ("PRODUCT_TYPE", CanonicalField::FuelType),
        ("LITRE", CanonicalField::Amount),
        ("UNIT_PRICE", CanonicalField::Price),
        ("LICENSE_PLATE_NO", CanonicalField::NumberPlate),
        ("CARD_NO", CanonicalField::CardNumber),
        ("BRANCH_NAME", CanonicalField::StationName),
        ("เลขที่ใบกำกับ", CanonicalField::InvoiceNumber),
        ("Amount Ex-vat", CanonicalField::PriceWithoutTax),
        ("AMOUNT", CanonicalField::PriceWithTax),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Bangchak,
    Ptt,
    Caltex,
    Pt,
}

impl Vendor {
    pub const ALL: [Vendor; 4] = [Vendor::Ptt, Vendor::Bangchak, Vendor::Caltex, Vendor::Pt];

    pub fn id(self) -> &'static str {
        match self {
            Vendor::Bangchak => "bangchak",
            Vendor::Ptt => "ptt",
            Vendor::Caltex => "caltex",
            Vendor::Pt => "pt",
        }
    }

    /// Value written to every record's `source` field.
    pub fn source_tag(self) -> &'static str {
        match self {
            Vendor::Bangchak => "Bangchak",
            Vendor::Ptt => "PTT",
            Vendor::Caltex => "Caltex",
            Vendor::Pt => "PT",
        }
    }

    pub fn layout(self) -> VendorLayout {
        match self {
            Vendor::Bangchak => VendorLayout::Positional(statement_layout(17)),
            Vendor::Ptt => VendorLayout::Positional(statement_layout(18)),
            Vendor::Caltex => VendorLayout::Named(CALTEX_LAYOUT),
            Vendor::Pt => VendorLayout::Named(PT_LAYOUT),
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Vendor {
    type Err = NormalizeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_lowercase();
        Vendor::ALL
            .into_iter()
            .find(|vendor| vendor.id() == wanted)
            .ok_or_else(|| NormalizeError::UnsupportedVendor(value.to_string()))
    }
}

impl PositionalLayout {
    pub fn validate(&self, vendor: &'static str) -> Result<(), LayoutError> {
        let fail = |message: String| Err(LayoutError { vendor, message });

        if let Some(selector) = self
            .selectors
            .iter()
            .find(|selector| **selector >= self.known_column_count)
        {
            return fail(format!(
                "selector {selector} is outside the {} known columns",
                self.known_column_count
            ));
        }
        if self.category_column + 1 >= cols::WIDTH {
            return fail(format!(
                "category column {} has no following column to repair",
                self.category_column
            ));
        }
        if self.categories.is_empty() {
            return fail("no category labels configured".to_string());
        }
        Ok(())
    }
}

impl NamedLayout {
    pub fn validate(&self, vendor: &'static str) -> Result<(), LayoutError> {
        let mut seen_names = HashSet::new();
        let mut seen_fields = HashSet::new();
        for (name, field) in &self.columns {
            if !seen_names.insert(*name) {
                return Err(LayoutError {
                    vendor,
                    message: format!("column {name} is selected twice"),
                });
            }
            if *field == CanonicalField::Source || !seen_fields.insert(*field) {
                return Err(LayoutError {
                    vendor,
                    message: format!("field {} cannot be fed by {name}", field.name()),
                });
            }
        }
        Ok(())
    }
}

impl VendorLayout {
    pub fn validate(&self, vendor: &'static str) -> Result<(), LayoutError> {
        match self {
            VendorLayout::Positional(layout) => layout.validate(vendor),
            VendorLayout::Named(layout) => layout.validate(vendor),
        }
    }
}

/// Checks every built-in descriptor; run once when the service is wired up.
pub fn validate_layouts() -> Result<(), LayoutError> {
    Vendor::ALL
        .into_iter()
        .try_for_each(|vendor| vendor.layout().validate(vendor.id()))
}
