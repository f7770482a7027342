//! Machine Record Module
//!
//! Catalog rows as they come back from the `espresso_machines` table, and the
//! normalized form the rest of the service works with.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format::normalize_vendors;
use crate::models::lenient;
use crate::models::vendor::{RawVendor, VendorOffer};

// == Legacy Field Shapes ==
/// Pre-infusion is stored either as a boolean or as a legacy text token
/// (`none`, `mechanical`, `programmable`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreInfusion {
    Flag(bool),
    Legacy(String),
}

/// Warranty is either a number of years or the original warranty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Warranty {
    Years(u32),
    /// Non-integral or negative year counts, e.g. `1.5`
    FractionalYears(f64),
    Text(String),
}

// == Machine Record ==
/// One espresso machine with its specifications and vendor offers.
///
/// Field names follow the `espresso_machines` columns; older column names
/// are accepted as aliases. Every spec column decodes leniently, so a
/// mistyped value becomes `None` instead of rejecting the row. Columns
/// without a dedicated field are kept in `extra` so that a snapshot written
/// to local storage round-trips the full row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineRecord {
    pub id: String,
    #[serde(default, deserialize_with = "lenient::option")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub model_name: String,
    #[serde(default, deserialize_with = "lenient::option")]
    pub machine_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub boiler_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub heating_system: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub number_of_boilers: Option<u32>,
    #[serde(
        rename = "heat_up_seconds",
        alias = "heatup_time_seconds",
        default,
        deserialize_with = "lenient::option"
    )]
    pub heatup_time_seconds: Option<u32>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub built_in_grinder: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub pre_infusion: Option<PreInfusion>,
    #[serde(
        rename = "has_pid",
        alias = "pid_control",
        default,
        deserialize_with = "lenient::option"
    )]
    pub pid_control: Option<bool>,
    #[serde(
        rename = "steam_wand_type",
        alias = "steam_wand",
        default,
        deserialize_with = "lenient::option"
    )]
    pub steam_wand: Option<String>,
    #[serde(
        rename = "water_tank_l",
        alias = "water_tank_liters",
        default,
        deserialize_with = "lenient::option"
    )]
    pub water_tank_liters: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub weight_lbs: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub power_watts: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub portafilter_mm: Option<f64>,
    #[serde(
        rename = "price_usd",
        alias = "price",
        default,
        deserialize_with = "lenient::option"
    )]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub dimensions: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub warranty: Option<Warranty>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub image_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub image_caption: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub image_source: Option<String>,
    #[serde(default)]
    pub vendors: Vec<VendorOffer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MachineRecord {
    /// Creates a record with only the identifying fields set.
    pub fn new(
        id: impl Into<String>,
        brand: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            brand: brand.into(),
            model_name: model_name.into(),
            machine_type: None,
            boiler_type: None,
            heating_system: None,
            number_of_boilers: None,
            heatup_time_seconds: None,
            built_in_grinder: None,
            pre_infusion: None,
            pid_control: None,
            steam_wand: None,
            water_tank_liters: None,
            weight_lbs: None,
            power_watts: None,
            portafilter_mm: None,
            price: None,
            dimensions: None,
            warranty: None,
            image_path: None,
            image_caption: None,
            image_source: None,
            vendors: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Display name: the explicit name if set, else "Brand Model" with
    /// missing parts left out.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{} {}", self.brand, self.model_name).trim().to_string(),
        }
    }
}

// == Machine Row ==
/// A row exactly as the remote table returns it.
///
/// Identical to [`MachineRecord`] except that vendors are still in one of
/// their raw shapes. Converting into a record normalizes them.
#[derive(Debug, Clone, Deserialize)]
pub struct MachineRow {
    #[serde(flatten)]
    pub record: MachineRecord,
    #[serde(default, rename = "vendors")]
    pub raw_vendors: Option<Value>,
}

impl MachineRow {
    /// Decodes the raw vendor column. Anything that is not a list yields no
    /// vendors; list items always decode thanks to [`RawVendor::Other`].
    pub fn vendors(&self) -> Vec<RawVendor> {
        match &self.raw_vendors {
            Some(Value::Array(items)) => items.iter().cloned().map(RawVendor::from).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<MachineRow> for MachineRecord {
    fn from(row: MachineRow) -> Self {
        let raw = row.vendors();
        let mut record = row.record;
        record.vendors = normalize_vendors(&raw);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_normalizes_mixed_vendor_shapes() {
        let row: MachineRow = serde_json::from_value(json!({
            "id": "gaggia-classic-pro",
            "brand": "Gaggia",
            "model_name": "Classic Pro",
            "vendors": [
                "https://www.amazon.com/dp/B07",
                {"url": "https://wholelattelove.com/gaggia", "price": 449}
            ]
        }))
        .unwrap();

        let record = MachineRecord::from(row);
        assert_eq!(record.vendors.len(), 2);
        assert_eq!(record.vendors[0].name, "Amazon");
        assert_eq!(record.vendors[1].name, "Whole Latte Love");
        assert_eq!(record.vendors[1].price, Some(449.0));
    }

    #[test]
    fn test_row_with_non_list_vendors_has_no_offers() {
        let row: MachineRow = serde_json::from_value(json!({
            "id": "a",
            "brand": "B",
            "model_name": "C",
            "vendors": "https://target.com"
        }))
        .unwrap();
        assert!(MachineRecord::from(row).vendors.is_empty());
    }

    #[test]
    fn test_legacy_field_shapes_decode() {
        let record: MachineRecord = serde_json::from_value(json!({
            "id": "a",
            "brand": "B",
            "model_name": "C",
            "pre_infusion": "mechanical",
            "warranty": 2
        }))
        .unwrap();
        assert_eq!(
            record.pre_infusion,
            Some(PreInfusion::Legacy("mechanical".to_string()))
        );
        assert_eq!(record.warranty, Some(Warranty::Years(2)));

        let record: MachineRecord = serde_json::from_value(json!({
            "id": "a",
            "brand": "B",
            "model_name": "C",
            "pre_infusion": true,
            "warranty": "2 years parts"
        }))
        .unwrap();
        assert_eq!(record.pre_infusion, Some(PreInfusion::Flag(true)));
        assert_eq!(
            record.warranty,
            Some(Warranty::Text("2 years parts".to_string()))
        );
    }

    #[test]
    fn test_table_column_names_and_aliases() {
        let record: MachineRecord = serde_json::from_value(json!({
            "id": "a",
            "brand": "B",
            "model_name": "C",
            "price_usd": 899.0,
            "heat_up_seconds": 30,
            "has_pid": true,
            "water_tank_l": 2.0,
            "steam_wand_type": "manual"
        }))
        .unwrap();
        assert_eq!(record.price, Some(899.0));
        assert_eq!(record.heatup_time_seconds, Some(30));
        assert_eq!(record.pid_control, Some(true));
        assert_eq!(record.water_tank_liters, Some(2.0));
        assert_eq!(record.steam_wand.as_deref(), Some("manual"));
        assert!(record.extra.is_empty());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["price_usd"], json!(899.0));
        assert_eq!(json["heat_up_seconds"], json!(30));

        let legacy: MachineRecord = serde_json::from_value(json!({
            "id": "a",
            "brand": "B",
            "model_name": "C",
            "price": 899.0,
            "heatup_time_seconds": 30,
            "pid_control": true
        }))
        .unwrap();
        assert_eq!(legacy.price, Some(899.0));
        assert_eq!(legacy.heatup_time_seconds, Some(30));
        assert_eq!(legacy.pid_control, Some(true));
    }

    #[test]
    fn test_mistyped_columns_fall_back_per_field() {
        let rows: Vec<MachineRow> = serde_json::from_value(json!([
            {
                "id": "good",
                "brand": "Lelit",
                "model_name": "Bianca",
                "heat_up_seconds": 25,
                "warranty": 3
            },
            {
                "id": "odd",
                "brand": null,
                "model_name": 42,
                "heat_up_seconds": 30.5,
                "warranty": 1.5,
                "water_tank_l": "large",
                "pre_infusion": {"stages": 2}
            }
        ]))
        .unwrap();

        let records: Vec<MachineRecord> = rows.into_iter().map(MachineRecord::from).collect();
        assert_eq!(records[0].heatup_time_seconds, Some(25));
        assert_eq!(records[0].warranty, Some(Warranty::Years(3)));

        let odd = &records[1];
        assert_eq!(odd.brand, "");
        assert_eq!(odd.model_name, "");
        assert_eq!(odd.heatup_time_seconds, None);
        assert_eq!(odd.warranty, Some(Warranty::FractionalYears(1.5)));
        assert_eq!(odd.water_tank_liters, None);
        assert_eq!(odd.pre_infusion, None);
    }

    #[test]
    fn test_unknown_columns_survive_a_snapshot() {
        let record: MachineRecord = serde_json::from_value(json!({
            "id": "a",
            "brand": "B",
            "model_name": "C",
            "milk_frothing": "panarello"
        }))
        .unwrap();
        assert_eq!(record.extra["milk_frothing"], json!("panarello"));

        let back: MachineRecord =
            serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_display_name() {
        let mut record = MachineRecord::new("rancilio-silvia", "Rancilio", "Silvia");
        assert_eq!(record.display_name(), "Rancilio Silvia");
        record.name = Some("Silvia Pro X".to_string());
        assert_eq!(record.display_name(), "Silvia Pro X");
    }
}
