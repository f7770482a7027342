//! Image metadata stored alongside each machine row.

use serde::{Deserialize, Serialize};

/// Image columns of a machine row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRow {
    pub id: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub image_caption: Option<String>,
    #[serde(default)]
    pub image_source: Option<String>,
}

impl ImageRow {
    /// Stored object path, if the row has a non-empty one.
    pub fn path(&self) -> Option<&str> {
        self.image_path.as_deref().filter(|p| !p.is_empty())
    }
}

/// A signed, resized image ready to hand to a browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineImage {
    pub url: String,
    pub image_caption: Option<String>,
    pub image_source: Option<String>,
}
