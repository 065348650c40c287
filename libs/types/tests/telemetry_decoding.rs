//! Decoding of complete status reports as the gateway sends them

use types::TelemetryRecord;

const SITE_REPORT: &str = r#"{"report_type":1,"mode":2,"run_status":5,"slaver_stat":1,"elecnet_state":0,"fhpSn":["10050012A0010001","10050012A0010002"],"infi_status":[2,2],"pe_stat":[1,1],"bms_work":[1,1],"bms_heat_state":[0,0],"p_uti":0.855,"p_sun":0.000,"p_gen":0.000,"p_fhp":-0.050,"p_load":0.805,"kwh_uti_in":1523.12,"kwh_uti_out":12.4,"kwh_sun":0.0,"kwh_gen":0.0,"kwh_fhp_di":311.8,"kwh_fhp_chg":340.2,"kwh_load":1790.5,"solarSupply":0.0,"soc":99.474,"fhpSoc":[99.6,99.348],"fhpPower":[-0.025,-0.025],"t_amb":21.5,"main_sw":[1,1,0],"pro_load":[0,0,0],"do":[0,0],"di":[0,1],"signal":-67,"wifiSignal":-52,"connType":1,"genStat":0,"kwhSolarLoad":0.0,"kwhGridLoad":1402.9,"kwhFhpLoad":387.6,"kwhGenLoad":0.0,"remoteSolarEn":0,"solarPower":0,"remoteSolar1Power":0,"remoteSolar2Power":0,"DSPNEMPVPower":0,"BFPVApboxRelay":0,"batOutGrid":0,"soOutGrid":0,"gridChBat":1,"genChBat":0,"sinHTemp":38,"sinLTemp":31,"name":"Home","electricity_type":1,"gridPhaseConSet":0}"#;

#[test]
fn test_decode_site_report() {
    let record: TelemetryRecord = serde_json::from_str(SITE_REPORT).unwrap();

    assert_eq!(record.p_uti, 0.855);
    assert_eq!(record.p_sun, 0.000);
    assert_eq!(record.p_gen, 0.000);
    assert_eq!(record.p_fhp, -0.050);
    assert_eq!(record.p_load, 0.805);
    assert_eq!(record.soc, 99.474);

    assert_eq!(record.kwh_uti_in, 1523.12);
    assert_eq!(record.kwh_grid_load, 1402.9);
    assert_eq!(record.signal, -67);
    assert_eq!(record.wifi_signal, -52);
    assert_eq!(record.sin_h_temp, 38);
    assert_eq!(record.grid_ch_bat, 1);
    assert_eq!(record.name, "Home");
    assert!(record.extra.is_empty());
}

#[test]
fn test_per_unit_arrays_keep_server_order() {
    let record: TelemetryRecord = serde_json::from_str(SITE_REPORT).unwrap();

    assert_eq!(record.unit_count(), 2);
    assert_eq!(record.fhp_sn, vec!["10050012A0010001", "10050012A0010002"]);
    assert_eq!(record.fhp_soc, vec![99.6, 99.348]);
    assert_eq!(record.fhp_power, vec![-0.025, -0.025]);
    assert_eq!(record.main_sw, vec![1, 1, 0]);
    assert_eq!(record.digital_in, vec![0, 1]);
}

#[test]
fn test_wrong_field_type_is_rejected() {
    let result = serde_json::from_str::<TelemetryRecord>(r#"{"soc":"full"}"#);
    assert!(result.is_err());
}
