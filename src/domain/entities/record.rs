use crate::domain::entities::grid::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Date,
    FuelType,
    Amount,
    Price,
    NumberPlate,
    CardNumber,
    StationName,
    InvoiceNumber,
    PriceWithoutTax,
    PriceWithTax,
    Source,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 11] = [
        CanonicalField::Date,
        CanonicalField::FuelType,
        CanonicalField::Amount,
        CanonicalField::Price,
        CanonicalField::NumberPlate,
        CanonicalField::CardNumber,
        CanonicalField::StationName,
        CanonicalField::InvoiceNumber,
        CanonicalField::PriceWithoutTax,
        CanonicalField::PriceWithTax,
        CanonicalField::Source,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::Date => "date",
            CanonicalField::FuelType => "fuel_type",
            CanonicalField::Amount => "amount",
            CanonicalField::Price => "price",
            CanonicalField::NumberPlate => "number_plate",
            CanonicalField::CardNumber => "card_number",
            CanonicalField::StationName => "station_name",
            CanonicalField::InvoiceNumber => "invoice_number",
            CanonicalField::PriceWithoutTax => "price_without_tax",
            CanonicalField::PriceWithTax => "price_with_tax",
            CanonicalField::Source => "source",
        }
    }
}

pub fn canonical_headers() -> Vec<String> {
    CanonicalField::ALL
        .iter()
        .map(|field| field.name().to_string())
        .collect()
}

/// One normalized fuel purchase, identical in shape for every vendor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalRecord {
    pub date: Cell,
    pub fuel_type: Option<String>,
    pub amount: Option<f64>,
    pub price: Cell,
    pub number_plate: Option<String>,
    pub card_number: Cell,
    pub station_name: Cell,
    pub invoice_number: Option<String>,
    pub price_without_tax: Cell,
    pub price_with_tax: Cell,
    pub source: String,
}

impl CanonicalRecord {
    pub fn get(&self, field: CanonicalField) -> Cell {
        let optional_text =
            |value: &Option<String>| value.clone().map(Cell::Text).unwrap_or_default();
        match field {
            CanonicalField::Date => self.date.clone(),
            CanonicalField::FuelType => optional_text(&self.fuel_type),
            CanonicalField::Amount => self.amount.map(Cell::Number).unwrap_or_default(),
            CanonicalField::Price => self.price.clone(),
            CanonicalField::NumberPlate => optional_text(&self.number_plate),
            CanonicalField::CardNumber => self.card_number.clone(),
            CanonicalField::StationName => self.station_name.clone(),
            CanonicalField::InvoiceNumber => optional_text(&self.invoice_number),
            CanonicalField::PriceWithoutTax => self.price_without_tax.clone(),
            CanonicalField::PriceWithTax => self.price_with_tax.clone(),
            CanonicalField::Source => Cell::Text(self.source.clone()),
        }
    }

    /// Field name and value pairs in canonical column order.
    pub fn fields(&self) -> Vec<(&'static str, Cell)> {
        CanonicalField::ALL
            .iter()
            .map(|field| (field.name(), self.get(*field)))
            .collect()
    }

    pub fn to_row(&self) -> Vec<String> {
        CanonicalField::ALL
            .iter()
            .map(|field| self.get(*field).to_text())
            .collect()
    }
}

/// Result of one normalization run plus the data-quality signals it raised.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub records: Vec<CanonicalRecord>,
    /// Sheet of origin for each entry of `records`, index for index.
    pub record_sheets: Vec<String>,
    /// Positions in `records` whose amount summed two populated quantity columns.
    pub quantity_overlaps: Vec<usize>,
    /// Positions in `records` that came from a repaired grade introducer row
    /// rather than a purchase.
    pub introducer_rows: Vec<usize>,
    /// Rows contributed by each sheet of origin, in workbook order.
    pub sheet_rows: Vec<(String, usize)>,
}

impl NormalizedBatch {
    pub fn push(&mut self, sheet: &str, record: CanonicalRecord) {
        self.records.push(record);
        self.record_sheets.push(sheet.to_string());
    }

    pub fn sheet_of(&self, record_idx: usize) -> Option<&str> {
        self.record_sheets.get(record_idx).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushed_records_keep_their_sheet() {
        let mut batch = NormalizedBatch::default();
        batch.push("Jan", CanonicalRecord::default());
        batch.push("Feb", CanonicalRecord::default());

        assert_eq!(batch.records.len(), batch.record_sheets.len());
        assert_eq!(batch.sheet_of(1), Some("Feb"));
        assert_eq!(batch.sheet_of(2), None);
    }

    #[test]
    fn canonical_order_is_fixed() {
        assert_eq!(
            canonical_headers(),
            vec![
                "date",
                "fuel_type",
                "amount",
                "price",
                "number_plate",
                "card_number",
                "station_name",
                "invoice_number",
                "price_without_tax",
                "price_with_tax",
                "source",
            ]
        );
    }

    #[test]
    fn row_renders_every_field_in_order() {
        let record = CanonicalRecord {
            date: Cell::text("2024-01-02 00:00:00"),
            fuel_type: Some("NGV".to_string()),
            amount: Some(12.5),
            invoice_number: Some("778".to_string()),
            source: "PTT".to_string(),
            ..Default::default()
        };

        let row = record.to_row();

        assert_eq!(row.len(), 11);
        assert_eq!(row[0], "2024-01-02 00:00:00");
        assert_eq!(row[1], "NGV");
        assert_eq!(row[2], "12.5");
        assert_eq!(row[4], "", "missing plate renders empty");
        assert_eq!(row[7], "778");
        assert_eq!(row[10], "PTT");
        assert_eq!(record.fields()[10], ("source", Cell::text("PTT")));
    }
}
