pub mod config;

pub mod domain {
    pub mod errors;

    pub mod entities {
        pub mod grid;
        pub mod record;
        pub mod table;
        pub mod vendor;
    }
}

pub mod usecase {
    pub mod ports {
        pub mod grid_source;
    }

    pub mod pipeline {
        pub mod forward_fill;
        pub mod header;
        pub mod named;
        pub mod positional;
        pub mod projector;
        pub mod quantity;
        pub mod sanitize;
    }

    pub mod services {
        pub mod normalize_service;
    }
}

pub mod infra {
    pub mod import {
        pub mod csv;
        pub mod xlsx;
    }

    pub mod export {
        pub mod csv;
    }
}

pub use domain::entities::grid::{Cell, CellGrid, Sheet, Workbook};
pub use domain::entities::record::{CanonicalField, CanonicalRecord, NormalizedBatch};
pub use domain::entities::vendor::Vendor;
pub use domain::errors::{LayoutError, NormalizeError};
pub use usecase::services::normalize_service::{
    normalize, normalize_report, normalize_vendor, NormalizeService,
};
