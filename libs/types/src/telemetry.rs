//! Decoded status report of an aGate and its aPower units.
//!
//! Power readings are instantaneous kW (signed: negative battery power means
//! charging), energy counters are cumulative kWh. Per-unit arrays hold one
//! entry per aPower in the order the server reports them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::protocol::envelope::null_as_default;

/// Most recent status sample of a site
///
/// Absent and `null` members both decode as zero, empty or `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub report_type: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub mode: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub run_status: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub slaver_stat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub elecnet_state: i64,

    // Per-unit state
    #[serde(rename = "fhpSn", deserialize_with = "null_as_default")]
    pub fhp_sn: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub infi_status: Vec<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub pe_stat: Vec<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub bms_work: Vec<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub bms_heat_state: Vec<i64>,

    /// Utility (grid) power, kW
    #[serde(deserialize_with = "null_as_default")]
    pub p_uti: f64,
    /// Solar power, kW
    #[serde(deserialize_with = "null_as_default")]
    pub p_sun: f64,
    /// Generator power, kW
    #[serde(deserialize_with = "null_as_default")]
    pub p_gen: f64,
    /// Battery group power, kW
    #[serde(deserialize_with = "null_as_default")]
    pub p_fhp: f64,
    /// House load, kW
    #[serde(deserialize_with = "null_as_default")]
    pub p_load: f64,

    #[serde(deserialize_with = "null_as_default")]
    pub kwh_uti_in: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub kwh_uti_out: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub kwh_sun: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub kwh_gen: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub kwh_fhp_di: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub kwh_fhp_chg: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub kwh_load: f64,

    #[serde(rename = "solarSupply", deserialize_with = "null_as_default")]
    pub solar_supply: f64,
    /// Battery state of charge, percent
    #[serde(deserialize_with = "null_as_default")]
    pub soc: f64,
    #[serde(rename = "fhpSoc", deserialize_with = "null_as_default")]
    pub fhp_soc: Vec<f64>,
    #[serde(rename = "fhpPower", deserialize_with = "null_as_default")]
    pub fhp_power: Vec<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub t_amb: f64,

    // Relay and contactor states
    #[serde(deserialize_with = "null_as_default")]
    pub main_sw: Vec<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub pro_load: Vec<i64>,
    #[serde(rename = "do", deserialize_with = "null_as_default")]
    pub digital_out: Vec<i64>,
    #[serde(rename = "di", deserialize_with = "null_as_default")]
    pub digital_in: Vec<i64>,

    #[serde(deserialize_with = "null_as_default")]
    pub signal: i64,
    #[serde(rename = "wifiSignal", deserialize_with = "null_as_default")]
    pub wifi_signal: i64,
    #[serde(rename = "connType", deserialize_with = "null_as_default")]
    pub conn_type: i64,
    #[serde(rename = "genStat", deserialize_with = "null_as_default")]
    pub gen_stat: i64,

    #[serde(rename = "kwhSolarLoad", deserialize_with = "null_as_default")]
    pub kwh_solar_load: f64,
    #[serde(rename = "kwhGridLoad", deserialize_with = "null_as_default")]
    pub kwh_grid_load: f64,
    #[serde(rename = "kwhFhpLoad", deserialize_with = "null_as_default")]
    pub kwh_fhp_load: f64,
    #[serde(rename = "kwhGenLoad", deserialize_with = "null_as_default")]
    pub kwh_gen_load: f64,

    #[serde(rename = "remoteSolarEn", deserialize_with = "null_as_default")]
    pub remote_solar_en: i64,
    #[serde(rename = "solarPower", deserialize_with = "null_as_default")]
    pub solar_power: i64,
    #[serde(rename = "remoteSolar1Power", deserialize_with = "null_as_default")]
    pub remote_solar1_power: i64,
    #[serde(rename = "remoteSolar2Power", deserialize_with = "null_as_default")]
    pub remote_solar2_power: i64,
    #[serde(rename = "DSPNEMPVPower", deserialize_with = "null_as_default")]
    pub dspnem_pv_power: i64,
    #[serde(rename = "BFPVApboxRelay", deserialize_with = "null_as_default")]
    pub bfpv_apbox_relay: i64,
    #[serde(rename = "batOutGrid", deserialize_with = "null_as_default")]
    pub bat_out_grid: i64,
    #[serde(rename = "soOutGrid", deserialize_with = "null_as_default")]
    pub so_out_grid: i64,
    #[serde(rename = "gridChBat", deserialize_with = "null_as_default")]
    pub grid_ch_bat: i64,
    #[serde(rename = "genChBat", deserialize_with = "null_as_default")]
    pub gen_ch_bat: i64,
    #[serde(rename = "sinHTemp", deserialize_with = "null_as_default")]
    pub sin_h_temp: i64,
    #[serde(rename = "sinLTemp", deserialize_with = "null_as_default")]
    pub sin_l_temp: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub electricity_type: i64,
    #[serde(rename = "gridPhaseConSet", deserialize_with = "null_as_default")]
    pub grid_phase_con_set: i64,

    /// Fields this client does not model, kept as sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TelemetryRecord {
    /// Number of aPower units in the report
    pub fn unit_count(&self) -> usize {
        self.fhp_sn
            .len()
            .max(self.fhp_soc.len())
            .max(self.fhp_power.len())
    }
}
