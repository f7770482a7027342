//! Property-Based Tests for the Formatting Module
//!
//! The formatters must be total: any input maps to some display string and
//! never panics.

use proptest::prelude::*;

use crate::format::*;
use crate::models::{PreInfusion, Warranty};

// == Strategies ==
fn pre_infusion_strategy() -> impl Strategy<Value = Option<PreInfusion>> {
    prop_oneof![
        Just(None),
        any::<bool>().prop_map(|b| Some(PreInfusion::Flag(b))),
        ".{0,16}".prop_map(|s| Some(PreInfusion::Legacy(s))),
    ]
}

fn warranty_strategy() -> impl Strategy<Value = Option<Warranty>> {
    prop_oneof![
        Just(None),
        any::<u32>().prop_map(|y| Some(Warranty::Years(y))),
        any::<f64>().prop_map(|y| Some(Warranty::FractionalYears(y))),
        ".{0,32}".prop_map(|s| Some(Warranty::Text(s))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Durations: minutes and seconds recompose to the input.
    #[test]
    fn prop_heatup_time_recomposes(seconds in 1u32..100_000) {
        let out = format_heatup_time(Some(seconds));
        let total: u32 = out
            .split(' ')
            .map(|part| {
                if let Some(m) = part.strip_suffix('m') {
                    m.parse::<u32>().unwrap() * 60
                } else {
                    part.strip_suffix('s').unwrap().parse::<u32>().unwrap()
                }
            })
            .sum();
        prop_assert_eq!(total, seconds);
    }

    // Enumerated fields never replace a non-empty unmatched value.
    #[test]
    fn prop_unmatched_enum_values_pass_through(value in "[a-z ]{1,24}") {
        let known = ["single", "dual", "heat_exchanger", "thermojet"];
        prop_assume!(!known.contains(&value.as_str()));
        prop_assert_eq!(format_boiler_type(Some(value.as_str())), value.clone());
        prop_assert_eq!(format_heating_system(Some(value.as_str())), value);
    }

    #[test]
    fn prop_pre_infusion_is_yes_or_no(value in pre_infusion_strategy()) {
        let out = format_pre_infusion(value.as_ref());
        prop_assert!(out == "No" || out.starts_with("Yes"), "unexpected {}", out);
    }

    #[test]
    fn prop_warranty_never_empty(value in warranty_strategy()) {
        prop_assert!(!format_warranty(value.as_ref()).is_empty());
    }

    #[test]
    fn prop_price_has_currency_prefix(price in any::<f64>()) {
        let out = format_price(Some(price));
        prop_assert!(out == "N/A" || out.starts_with('$'));
    }

    #[test]
    fn prop_locale_number_digits_match(n in 0u64..1_000_000_000_000) {
        let out = locale_number(n as f64);
        prop_assert_eq!(out.replace(',', ""), n.to_string());
    }

    #[test]
    fn prop_unit_fields_total(value in any::<f64>()) {
        prop_assert!(!format_water_tank(Some(value)).is_empty());
        prop_assert!(!format_weight(Some(value)).is_empty());
        prop_assert!(!format_power(Some(value)).is_empty());
        prop_assert!(!format_portafilter(Some(value)).is_empty());
    }

    #[test]
    fn prop_vendor_name_total(input in ".{0,64}") {
        let _ = extract_vendor_name(&input);
    }

    // A parseable host always yields a real name.
    #[test]
    fn prop_vendor_name_from_host(label in "[a-z]{1,12}", tld in "(com|net|org)") {
        let url = format!("https://www.{}.{}/item", label, tld);
        let name = extract_vendor_name(&url);
        prop_assert!(!name.is_empty());
        prop_assert_ne!(name, UNKNOWN_VENDOR);
    }
}
