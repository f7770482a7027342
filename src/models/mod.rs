//! Catalog data types and HTTP response models
//!
//! Machine rows and vendor listings as stored remotely, their normalized
//! forms, and the DTOs serialized by the API.

pub mod image;
mod lenient;
pub mod machine;
pub mod responses;
pub mod vendor;

// Re-export commonly used types
pub use image::{ImageRow, MachineImage};
pub use machine::{MachineRecord, MachineRow, PreInfusion, Warranty};
pub use responses::{
    CatalogResponse, ClearResponse, DebugEnvResponse, ErrorResponse, HealthResponse,
    StatsResponse, VisibilityResponse,
};
pub use vendor::{RawVendor, VendorOffer};
