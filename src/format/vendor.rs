//! Vendor Names
//!
//! Derives a retailer's display name from a listing URL and turns raw vendor
//! entries into [`VendorOffer`]s.

use url::Url;

use crate::models::{RawVendor, VendorOffer};

pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";
pub const INVALID_VENDOR: &str = "Invalid Vendor";

/// Retailers whose names can't be recovered from the domain alone.
const KNOWN_VENDORS: &[(&str, &str)] = &[
    ("amazon.com", "Amazon"),
    ("amazon.co.uk", "Amazon UK"),
    ("amazon.ca", "Amazon Canada"),
    ("amazon.de", "Amazon Germany"),
    ("williams-sonoma.com", "Williams Sonoma"),
    ("seattlecoffeegear.com", "Seattle Coffee Gear"),
    ("clivecoffee.com", "Clive Coffee"),
    ("wholelattelove.com", "Whole Latte Love"),
    ("espressooutlet.com", "Espresso Outlet"),
    ("lamarzocco.com", "La Marzocco"),
    ("bedbathandbeyond.com", "Bed Bath & Beyond"),
    ("target.com", "Target"),
    ("walmart.com", "Walmart"),
    ("bestbuy.com", "Best Buy"),
    ("surlatable.com", "Sur La Table"),
    ("crateandbarrel.com", "Crate & Barrel"),
    ("wayfair.com", "Wayfair"),
    ("coffeefool.com", "Coffee Fool"),
    ("sweetmarias.com", "Sweet Maria's"),
    ("bluebottlecoffee.com", "Blue Bottle Coffee"),
    ("intelligentsia.com", "Intelligentsia"),
    ("stumptowncoffee.com", "Stumptown Coffee"),
    ("counterculturecoffee.com", "Counter Culture Coffee"),
];

/// Display name for the retailer behind `url`.
///
/// Known domains come from a fixed table; anything else is humanized from
/// its first DNS label (`breville.com` -> "Breville", `prima-coffee.com` ->
/// "Prima Coffee"). Unparseable or host-less URLs give [`UNKNOWN_VENDOR`].
pub fn extract_vendor_name(url: &str) -> String {
    let host = match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_lowercase(),
            _ => {
                tracing::debug!(url, "vendor URL has no host");
                return UNKNOWN_VENDOR.to_string();
            }
        },
        Err(e) => {
            tracing::debug!(url, error = %e, "could not parse vendor URL");
            return UNKNOWN_VENDOR.to_string();
        }
    };

    let domain = host.strip_prefix("www.").unwrap_or(&host);
    if let Some((_, name)) = KNOWN_VENDORS.iter().find(|(d, _)| *d == domain) {
        return (*name).to_string();
    }

    let label = domain.split('.').next().unwrap_or_default();
    humanize(label)
}

/// "camelCase-or_snake" -> "Camel Case Or Snake".
fn humanize(label: &str) -> String {
    let mut spaced = String::with_capacity(label.len() + 4);
    let mut prev_lower = false;
    for ch in label.chars() {
        if ch == '-' || ch == '_' {
            spaced.push(' ');
            prev_lower = false;
            continue;
        }
        if prev_lower && ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        prev_lower = ch.is_ascii_lowercase();
        spaced.push(ch);
    }

    spaced
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// == Normalization ==
/// Maps stored vendor entries to offers, in order. Entries without a name get
/// one derived from their URL.
pub fn normalize_vendors(raw: &[RawVendor]) -> Vec<VendorOffer> {
    raw.iter().map(normalize_vendor).collect()
}

fn normalize_vendor(raw: &RawVendor) -> VendorOffer {
    match raw {
        RawVendor::Url(url) => VendorOffer {
            url: url.clone(),
            name: extract_vendor_name(url),
            price: None,
            last_updated: None,
        },
        RawVendor::Listing {
            url,
            name,
            price,
            last_updated,
        } => {
            let url = url.clone().unwrap_or_default();
            VendorOffer {
                name: name.clone().unwrap_or_else(|| extract_vendor_name(&url)),
                url,
                price: *price,
                last_updated: last_updated.clone(),
            }
        }
        RawVendor::Other(_) => VendorOffer {
            url: String::new(),
            name: INVALID_VENDOR.to_string(),
            price: Some(0.0),
            last_updated: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_domains() {
        assert_eq!(extract_vendor_name("https://www.amazon.com/dp/X"), "Amazon");
        assert_eq!(extract_vendor_name("https://amazon.co.uk/x"), "Amazon UK");
        assert_eq!(
            extract_vendor_name("https://www.SweetMarias.com/green"),
            "Sweet Maria's"
        );
        assert_eq!(
            extract_vendor_name("http://crateandbarrel.com/espresso"),
            "Crate & Barrel"
        );
    }

    #[test]
    fn test_unknown_domains_are_humanized() {
        assert_eq!(extract_vendor_name("https://www.breville.com/us"), "Breville");
        assert_eq!(
            extract_vendor_name("https://prima-coffee.com/equipment"),
            "Prima Coffee"
        );
        assert_eq!(extract_vendor_name("https://shop.example.com/grinders"), "Shop");
    }

    #[test]
    fn test_malformed_urls_resolve_to_sentinel() {
        assert_eq!(extract_vendor_name("not a url"), UNKNOWN_VENDOR);
        assert_eq!(extract_vendor_name(""), UNKNOWN_VENDOR);
        assert_eq!(extract_vendor_name("mailto:sales@example.com"), UNKNOWN_VENDOR);
    }

    #[test]
    fn test_humanize_camel_case_boundaries() {
        assert_eq!(humanize("coffeeShop"), "Coffee Shop");
        assert_eq!(humanize("best-buy_outlet"), "Best Buy Outlet");
        assert_eq!(humanize("a--b"), "A  B");
    }

    #[test]
    fn test_normalize_keeps_order_and_prices() {
        let raw = vec![
            RawVendor::from(json!({"url": "https://bestbuy.com/x", "price": 699.99})),
            RawVendor::from(json!("https://www.target.com/p/1")),
            RawVendor::from(json!({"url": "https://clivecoffee.com/y", "name": "Clive"})),
        ];
        let offers = normalize_vendors(&raw);
        assert_eq!(offers[0].name, "Best Buy");
        assert_eq!(offers[0].price, Some(699.99));
        assert_eq!(offers[1].name, "Target");
        assert_eq!(offers[1].price, None);
        assert_eq!(offers[2].name, "Clive");
    }

    #[test]
    fn test_normalize_invalid_entries() {
        let offers = normalize_vendors(&[RawVendor::Other(json!(7))]);
        assert_eq!(offers[0].name, INVALID_VENDOR);
        assert_eq!(offers[0].url, "");
        assert_eq!(offers[0].price, Some(0.0));

        let offers = normalize_vendors(&[RawVendor::from(json!({"price": 10}))]);
        assert_eq!(offers[0].name, UNKNOWN_VENDOR);
    }
}
