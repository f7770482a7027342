//! Formatting Module
//!
//! Pure functions from raw catalog values to display strings. Nothing here
//! does I/O or fails: every input, including a missing one, has a rendering.

mod numbers;
mod sheet;
mod specs;
mod vendor;

#[cfg(test)]
mod property_tests;

pub use numbers::{display_number, locale_number};
pub use sheet::{SpecSheet, VendorLine};
pub use specs::*;
pub use vendor::{extract_vendor_name, normalize_vendors, INVALID_VENDOR, UNKNOWN_VENDOR};
