//! Display-ready view of one machine, used by the detail and compare pages.

use serde::Serialize;

use crate::format::specs::*;
use crate::models::{MachineRecord, VendorOffer};

/// Every spec of a machine rendered to its display string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecSheet {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub model_name: String,
    pub machine_type: String,
    pub price: String,
    pub boiler_type: String,
    pub heating_system: String,
    pub number_of_boilers: String,
    pub heatup_time: String,
    pub built_in_grinder: String,
    pub pre_infusion: String,
    pub pid_control: String,
    pub steam_wand: String,
    pub water_tank: String,
    pub portafilter: String,
    pub power: String,
    pub weight: String,
    pub dimensions: String,
    pub warranty: String,
    pub vendors: Vec<VendorLine>,
}

/// A vendor offer with its price rendered; empty when the vendor lists none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorLine {
    pub name: String,
    pub url: String,
    pub price: String,
}

impl From<&VendorOffer> for VendorLine {
    fn from(offer: &VendorOffer) -> Self {
        Self {
            name: offer.name.clone(),
            url: offer.url.clone(),
            price: format_vendor_price(offer.price),
        }
    }
}

impl From<&MachineRecord> for SpecSheet {
    fn from(m: &MachineRecord) -> Self {
        Self {
            id: m.id.clone(),
            name: m.display_name(),
            brand: m.brand.clone(),
            model_name: m.model_name.clone(),
            machine_type: format_machine_type(m.machine_type.as_deref()),
            price: format_price(m.price),
            boiler_type: format_boiler_type(m.boiler_type.as_deref()),
            heating_system: format_heating_system(m.heating_system.as_deref()),
            number_of_boilers: format_number_of_boilers(m.number_of_boilers),
            heatup_time: format_heatup_time(m.heatup_time_seconds),
            built_in_grinder: format_built_in_grinder(m.built_in_grinder.as_deref()),
            pre_infusion: format_pre_infusion(m.pre_infusion.as_ref()),
            pid_control: format_yes_no(m.pid_control),
            steam_wand: format_steam_wand(m.steam_wand.as_deref()),
            water_tank: format_water_tank(m.water_tank_liters),
            portafilter: format_portafilter(m.portafilter_mm),
            power: format_power(m.power_watts),
            weight: format_weight(m.weight_lbs),
            dimensions: format_dimensions(m.dimensions.as_deref()),
            warranty: format_warranty(m.warranty.as_ref()),
            vendors: m.vendors.iter().map(VendorLine::from).collect(),
        }
    }
}
