//! Remote Module
//!
//! Contracts for the two external services the catalog reads from: the
//! `espresso_machines` table and the image bucket. [`SupabaseClient`]
//! implements both over HTTP; tests substitute their own implementations.

mod images;
mod supabase;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::RemoteError;
use crate::models::{ImageRow, MachineRecord};

pub use images::{fetch_machine_image, fetch_machine_images, BATCH_IMAGE_WIDTH, DETAIL_IMAGE_WIDTH};
pub use supabase::SupabaseClient;

/// Table the catalog lives in.
pub const MACHINES_TABLE: &str = "espresso_machines";

/// Read access to the machine table.
#[async_trait]
pub trait MachineSource: Send + Sync {
    /// Every row, ordered by brand ascending, vendors normalized.
    async fn fetch_machines(&self) -> Result<Vec<MachineRecord>, RemoteError>;

    /// Ids of every row with a non-null id.
    async fn fetch_machine_ids(&self) -> Result<Vec<String>, RemoteError>;

    /// Image columns of the rows whose id is in `ids`.
    async fn fetch_image_rows(&self, ids: &[String]) -> Result<Vec<ImageRow>, RemoteError>;
}

/// Resize parameters applied by the object store when serving an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageTransform {
    pub width: u32,
    pub resize: &'static str,
    pub quality: u8,
}

impl ImageTransform {
    /// Fit within `width` pixels at full quality.
    pub fn contain(width: u32) -> Self {
        Self {
            width,
            resize: "contain",
            quality: 100,
        }
    }
}

/// Issues time-limited URLs for stored images.
#[async_trait]
pub trait ImageSigner: Send + Sync {
    async fn signed_url(
        &self,
        path: &str,
        transform: &ImageTransform,
    ) -> Result<String, RemoteError>;
}
