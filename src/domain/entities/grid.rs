use chrono::NaiveDateTime;

pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single untyped spreadsheet value as handed over by a grid source.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(v) => v.is_empty(),
            Cell::Number(v) => v.is_nan(),
            Cell::Bool(_) | Cell::Date(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Text form of the value; missing cells render as an empty string.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(v) => v.clone(),
            Cell::Number(v) => format_number(*v),
            Cell::Bool(v) => v.to_string(),
            Cell::Date(v) => v.format(DATE_DISPLAY_FORMAT).to_string(),
        }
    }

    pub fn as_text(&self) -> Option<String> {
        if self.is_missing() {
            None
        } else {
            Some(self.to_text())
        }
    }

    /// Numeric view of the cell. `Ok(None)` for missing cells, `Err` with the
    /// offending text when the value cannot be read as a number.
    pub fn as_number(&self) -> Result<Option<f64>, String> {
        if self.is_missing() {
            return Ok(None);
        }
        match self {
            Cell::Number(v) => Ok(Some(*v)),
            Cell::Text(v) => {
                let cleaned = v.trim().replace(',', "");
                if cleaned.is_empty() {
                    return Ok(None);
                }
                cleaned.parse::<f64>().map(Some).map_err(|_| v.clone())
            }
            other => Err(other.to_text()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract().abs() < f64::EPSILON && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

pub type Row = Vec<Cell>;

/// Rows x columns of raw cells, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellGrid {
    rows: Vec<Row>,
}

impl CellGrid {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl From<Vec<Row>> for CellGrid {
    fn from(rows: Vec<Row>) -> Self {
        CellGrid::new(rows)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub grid: CellGrid,
}

/// Every sheet of one uploaded file, in workbook order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn single(name: impl Into<String>, grid: CellGrid) -> Self {
        Self {
            sheets: vec![Sheet {
                name: name.into(),
                grid,
            }],
        }
    }

    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }
}

impl From<CellGrid> for Workbook {
    fn from(grid: CellGrid) -> Self {
        Workbook::single("Sheet1", grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(12345.0).to_text(), "12345");
        assert_eq!(Cell::Number(31.25).to_text(), "31.25");
        assert_eq!(Cell::Number(-2.5).to_text(), "-2.5");
    }

    #[test]
    fn dates_render_with_time_component() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(8, 5, 0))
            .expect("valid date");
        assert_eq!(Cell::Date(date).to_text(), "2024-03-09 08:05:00");
    }

    #[test]
    fn empty_text_is_missing() {
        assert!(Cell::Empty.is_missing());
        assert!(Cell::text("").is_missing());
        assert!(!Cell::text(" ").is_missing());
        assert!(!Cell::Number(0.0).is_missing());
        assert_eq!(Cell::from(""), Cell::Empty);
    }

    #[test]
    fn numeric_text_is_parsed_with_thousands_separators() {
        assert_eq!(Cell::text("1,234.5").as_number(), Ok(Some(1234.5)));
        assert_eq!(Cell::Number(7.0).as_number(), Ok(Some(7.0)));
        assert_eq!(Cell::Empty.as_number(), Ok(None));
        assert_eq!(
            Cell::text("n/a").as_number(),
            Err("n/a".to_string()),
            "non-numeric text should be reported back"
        );
    }

    #[test]
    fn grid_width_is_widest_row() {
        let grid = CellGrid::new(vec![vec![Cell::Empty], vec![Cell::Empty, Cell::Empty]]);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.len(), 2);
    }
}
