use crate::domain::entities::grid::Workbook;
use crate::domain::errors::NormalizeError;

/// Decodes uploaded file bytes into cell grids, one per sheet.
pub trait GridSource: Send + Sync {
    /// Failures surface as [`NormalizeError::DecodeFailure`].
    fn decode(&self, bytes: &[u8]) -> Result<Workbook, NormalizeError>;
}
