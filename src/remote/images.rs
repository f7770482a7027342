//! Machine Images
//!
//! Looks up a machine's stored image and signs a resized URL for it. Lookup
//! failures never propagate: a machine without a usable image simply has
//! none.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{error, warn};

use super::{ImageSigner, ImageTransform, MachineSource};
use crate::models::{ImageRow, MachineImage};

/// Width used for the machine detail page.
pub const DETAIL_IMAGE_WIDTH: u32 = 800;

/// Width used for catalog and compare grids.
pub const BATCH_IMAGE_WIDTH: u32 = 400;

/// Signed image for one machine, or `None` if it has no image or signing fails.
pub async fn fetch_machine_image(
    source: &dyn MachineSource,
    signer: &dyn ImageSigner,
    id: &str,
    width: u32,
) -> Option<MachineImage> {
    let rows = match source.fetch_image_rows(&[id.to_string()]).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(id, error = %e, "Could not look up machine image");
            return None;
        }
    };

    let Some(row) = rows.into_iter().find(|r| r.id == id) else {
        warn!(id, "No image found for machine");
        return None;
    };

    sign_row(signer, &row, &ImageTransform::contain(width)).await
}

/// Signed images for several machines at once.
///
/// Every id with a stored image path appears in the result, mapped to `None`
/// if signing failed. Ids without a path are left out. Any lookup failure
/// yields an empty map.
pub async fn fetch_machine_images(
    source: &dyn MachineSource,
    signer: &dyn ImageSigner,
    ids: &[String],
    width: u32,
) -> HashMap<String, Option<MachineImage>> {
    let rows = match source.fetch_image_rows(ids).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "Error fetching machine image data");
            return HashMap::new();
        }
    };

    let transform = &ImageTransform::contain(width);
    let signed = rows
        .iter()
        .filter(|row| row.path().is_some())
        .map(|row| async move {
            let image = sign_row(signer, row, transform).await;
            (row.id.clone(), image)
        });

    join_all(signed).await.into_iter().collect()
}

async fn sign_row(
    signer: &dyn ImageSigner,
    row: &ImageRow,
    transform: &ImageTransform,
) -> Option<MachineImage> {
    let path = row.path()?;
    match signer.signed_url(path, transform).await {
        Ok(url) => Some(MachineImage {
            url,
            image_caption: row.image_caption.clone(),
            image_source: row.image_source.clone(),
        }),
        Err(e) => {
            error!(id = %row.id, path, error = %e, "Image not found for machine");
            None
        }
    }
}
