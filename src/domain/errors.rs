#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    UnsupportedVendor(String),
    MalformedInput(String),
    DecodeFailure(String),
}

impl NormalizeError {
    pub fn malformed(message: impl Into<String>) -> Self {
        NormalizeError::MalformedInput(message.into())
    }
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::UnsupportedVendor(vendor) => write!(f, "Vendor {vendor} not supported"),
            NormalizeError::MalformedInput(message) => write!(f, "malformed input: {message}"),
            NormalizeError::DecodeFailure(message) => {
                write!(f, "failed to decode spreadsheet: {message}")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

/// A vendor descriptor that contradicts the vendor's known sheet shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutError {
    pub vendor: &'static str,
    pub message: String,
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid layout for {}: {}", self.vendor, self.message)
    }
}

impl std::error::Error for LayoutError {}
