use assert_rail::config::Settings;
use assert_rail::{info, Info, InfoValue};

#[test]
fn info_serializes_as_ordered_pairs() {
    let info = info! { "path" => "/srv", "retries" => 3, "ok" => false };

    let json = serde_json::to_string(&info).unwrap();
    assert_eq!(json, r#"[["path","/srv"],["retries",3],["ok",false]]"#);

    let back: Info = serde_json::from_str(&json).unwrap();
    assert_eq!(back, info);
}

#[test]
fn info_value_picks_the_narrowest_numeric_variant() {
    let values: Vec<InfoValue> = serde_json::from_str("[-1, 18446744073709551615, 0.5]").unwrap();
    assert_eq!(values, [InfoValue::Int(-1), InfoValue::UInt(u64::MAX), InfoValue::Float(0.5)]);
}

#[test]
fn settings_round_trip() {
    let settings: Settings = serde_json::from_str(r#"{"expect_raises":true}"#).unwrap();
    assert!(settings.expect_raises);
    assert_eq!(serde_json::to_string(&settings).unwrap(), r#"{"expect_raises":true}"#);
}
