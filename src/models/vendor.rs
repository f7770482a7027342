//! Vendor Offer Module
//!
//! Retailer listings attached to a machine, in both their stored shapes and
//! their normalized form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One retailer's listing for a machine, after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorOffer {
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

// == Raw Vendor ==
/// The shapes a vendor entry can take in the remote table.
#[derive(Debug, Clone, PartialEq)]
pub enum RawVendor {
    /// Bare listing URL.
    Url(String),
    /// Object form; every key is optional in stored data.
    Listing {
        url: Option<String>,
        name: Option<String>,
        price: Option<f64>,
        last_updated: Option<String>,
    },
    /// Anything else (numbers, nulls, nested lists).
    Other(Value),
}

impl From<Value> for RawVendor {
    fn from(value: Value) -> Self {
        match value {
            Value::String(url) => RawVendor::Url(url),
            Value::Object(map) => {
                let text = |key: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                };
                RawVendor::Listing {
                    url: text("url"),
                    name: text("name"),
                    price: map.get("price").and_then(Value::as_f64),
                    last_updated: text("last_updated"),
                }
            }
            other => RawVendor::Other(other),
        }
    }
}
