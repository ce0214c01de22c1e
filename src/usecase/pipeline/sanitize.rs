use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::grid::Cell;

const PLATE_LABEL: &str = "Plate No.";

// "สบ" abbreviation, with or without its period, as a whole word.
static ABBREVIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bสบ\.?\b").expect("valid abbreviation regex"));

pub fn sanitize_plate(value: &str) -> String {
    let without_label = value.replace(PLATE_LABEL, "");
    let without_token = ABBREVIATION.replace_all(&without_label, "");
    without_token.trim().to_uppercase()
}

/// Missing plates pass through as `None`.
pub fn clean_number_plate(cell: &Cell) -> Option<String> {
    cell.as_text().map(|text| sanitize_plate(&text))
}
