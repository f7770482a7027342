//! Spec Field Formatters
//!
//! Each function maps one raw column value, in any of its current or legacy
//! shapes, to the string shown on the comparison pages. All of them are total:
//! `None`, empty strings and zero are valid inputs with a fixed rendering.

use crate::format::numbers::{display_number, locale_number, nonzero};
use crate::models::{PreInfusion, Warranty};

const UNKNOWN: &str = "Unknown";

/// Empty text counts as missing.
fn text(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

// == Durations ==
/// "Unknown" for missing or zero, "45s" under a minute, else "2m" or "2m 5s".
pub fn format_heatup_time(seconds: Option<u32>) -> String {
    match seconds {
        None | Some(0) => UNKNOWN.to_string(),
        Some(s) if s < 60 => format!("{}s", s),
        Some(s) => {
            let (minutes, rest) = (s / 60, s % 60);
            if rest == 0 {
                format!("{}m", minutes)
            } else {
                format!("{}m {}s", minutes, rest)
            }
        }
    }
}

// == Legacy Enumerations ==
pub fn format_warranty(warranty: Option<&Warranty>) -> String {
    match warranty {
        None | Some(Warranty::Years(0)) => "No warranty info".to_string(),
        Some(Warranty::Years(1)) => "1-year limited".to_string(),
        Some(Warranty::Years(years)) => format!("{}-year limited", years),
        Some(Warranty::FractionalYears(years)) if *years == 0.0 || years.is_nan() => {
            "No warranty info".to_string()
        }
        Some(Warranty::FractionalYears(years)) => {
            format!("{}-year limited", display_number(*years))
        }
        Some(Warranty::Text(t)) if t.is_empty() => "No warranty info".to_string(),
        Some(Warranty::Text(t)) => t.clone(),
    }
}

pub fn format_built_in_grinder(grinder: Option<&str>) -> String {
    match grinder {
        Some("built-in") => "Yes (built-in)".to_string(),
        Some("external") => "Yes (external)".to_string(),
        Some("none") | None => "No".to_string(),
        Some(other) => text(Some(other)).unwrap_or(UNKNOWN).to_string(),
    }
}

/// Current and legacy boiler values; anything else passes through.
pub fn format_boiler_type(boiler_type: Option<&str>) -> String {
    let mapped = match boiler_type {
        Some("Single boiler") | Some("single") => "Single Boiler",
        Some("Dual boiler") | Some("dual") => "Dual Boiler",
        Some("Heat-exchange") | Some("heat_exchanger") => "Heat Exchange",
        Some("thermojet") => "ThermoJet",
        other => text(other).unwrap_or(UNKNOWN),
    };
    mapped.to_string()
}

pub fn format_heating_system(heating_system: Option<&str>) -> String {
    let mapped = match heating_system {
        Some("Classic tank") => "Classic Tank",
        Some("Thermoblock") => "Thermoblock",
        Some("Thermocoil") => "Thermocoil",
        Some("Thermojet") => "ThermoJet",
        Some("Quick Heat boiler") => "Quick Heat Boiler",
        other => text(other).unwrap_or(UNKNOWN),
    };
    mapped.to_string()
}

pub fn format_number_of_boilers(count: Option<u32>) -> String {
    match count {
        None | Some(0) => UNKNOWN.to_string(),
        Some(1) => "1 boiler".to_string(),
        Some(n) => format!("{} boilers", n),
    }
}

/// Booleans map to Yes/No. Legacy tokens get their own phrase; an unknown
/// non-empty token falls back to "Yes" because it is truthy.
pub fn format_pre_infusion(pre_infusion: Option<&PreInfusion>) -> String {
    let phrase = match pre_infusion {
        Some(PreInfusion::Flag(true)) => "Yes",
        Some(PreInfusion::Flag(false)) | None => "No",
        Some(PreInfusion::Legacy(token)) => match token.as_str() {
            "none" | "" => "No",
            "mechanical" => "Yes (Mechanical)",
            "programmable" => "Yes (Programmable)",
            _ => "Yes",
        },
    };
    phrase.to_string()
}

pub fn format_machine_type(machine_type: Option<&str>) -> String {
    let mapped = match machine_type {
        Some("Semi-automatic") | Some("Semi-Automatic") => "Semi-Automatic",
        Some("Super-automatic") | Some("Super-Automatic") => "Super-Automatic",
        Some("Automatic") => "Automatic",
        Some("Manual") => "Manual",
        other => text(other).unwrap_or(UNKNOWN),
    };
    mapped.to_string()
}

/// Missing steam wand data defaults to "Manual", the common case.
pub fn format_steam_wand(steam_wand: Option<&str>) -> String {
    let mapped = match steam_wand {
        Some("manual") => "Manual",
        Some("auto-frother") => "Auto Frother",
        Some("cool-touch") => "Cool Touch",
        other => text(other).unwrap_or("Manual"),
    };
    mapped.to_string()
}

pub fn format_dimensions(dimensions: Option<&str>) -> String {
    text(dimensions).unwrap_or(UNKNOWN).to_string()
}

pub fn format_yes_no(value: Option<bool>) -> String {
    match value {
        None => UNKNOWN.to_string(),
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
    }
}

// == Units ==
pub fn format_water_tank(liters: Option<f64>) -> String {
    nonzero(liters).map_or_else(|| UNKNOWN.to_string(), |l| format!("{}L", display_number(l)))
}

pub fn format_weight(lbs: Option<f64>) -> String {
    nonzero(lbs).map_or_else(|| UNKNOWN.to_string(), |w| format!("{} lbs", display_number(w)))
}

pub fn format_power(watts: Option<f64>) -> String {
    nonzero(watts).map_or_else(|| UNKNOWN.to_string(), |w| format!("{}W", display_number(w)))
}

pub fn format_portafilter(mm: Option<f64>) -> String {
    nonzero(mm).map_or_else(|| UNKNOWN.to_string(), |d| format!("{}mm", display_number(d)))
}

/// "N/A" when there is no price, else "$1,899".
pub fn format_price(price: Option<f64>) -> String {
    nonzero(price).map_or_else(|| "N/A".to_string(), |p| format!("${}", locale_number(p)))
}

/// Vendor listings show nothing at all when a retailer has no price.
pub fn format_vendor_price(price: Option<f64>) -> String {
    nonzero(price).map_or_else(String::new, |p| format!("${}", locale_number(p)))
}
