//! # Configuration Tests
//!
//! Defaults, command-line shorthand, JSON deserialization and validation.

use bpsim_core::bru::counter::SaturatingCounter;
use bpsim_core::config::*;
use bpsim_core::ConfigError;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = PredictorConfig::default();
    assert_eq!(config.kind, PredictorKind::Static);
    assert_eq!(config.ghistory_bits, 14);
    assert_eq!(config.lhistory_bits, 10);
    assert_eq!(config.pc_index_bits, 10);
    assert_eq!(config.chooser_init, SaturatingCounter::WeakTaken);
}

#[test]
fn test_perceptron_config_defaults() {
    let perceptron = PerceptronConfig::default();
    assert_eq!(perceptron.history_length, 31);
    assert_eq!(perceptron.slots, 256);
    assert_eq!(perceptron.weight_bits, 8);
}

#[rstest]
#[case("static", PredictorKind::Static)]
#[case("STATIC", PredictorKind::Static)]
#[case("gshare", PredictorKind::Gshare)]
#[case("tournament", PredictorKind::Tournament)]
#[case("custom", PredictorKind::Custom)]
#[case("perceptron", PredictorKind::Custom)]
fn test_shorthand_kind(#[case] shorthand: &str, #[case] kind: PredictorKind) {
    let config: PredictorConfig = shorthand.parse().unwrap();
    assert_eq!(config.kind, kind);
}

#[test]
fn test_shorthand_gshare_bits() {
    let config: PredictorConfig = "gshare:13".parse().unwrap();
    assert_eq!(config.kind, PredictorKind::Gshare);
    assert_eq!(config.ghistory_bits, 13);
}

#[test]
fn test_shorthand_tournament_bits() {
    let config: PredictorConfig = "tournament:9:10:11".parse().unwrap();
    assert_eq!(config.kind, PredictorKind::Tournament);
    assert_eq!(config.ghistory_bits, 9);
    assert_eq!(config.lhistory_bits, 10);
    assert_eq!(config.pc_index_bits, 11);
}

#[rstest]
#[case("static")]
#[case("gshare:13")]
#[case("tournament:9:10:10")]
#[case("custom")]
fn test_shorthand_display_round_trip(#[case] shorthand: &str) {
    let config: PredictorConfig = shorthand.parse().unwrap();
    assert_eq!(config.to_string(), shorthand);
}

#[test]
fn test_shorthand_unknown_name() {
    let err = "bimodal:4".parse::<PredictorConfig>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownPredictor(name) if name == "bimodal"));
}

#[rstest]
#[case("gshare:x")]
#[case("gshare:4:4")]
#[case("tournament:9:10")]
#[case("static:3")]
fn test_shorthand_malformed(#[case] shorthand: &str) {
    let err = shorthand.parse::<PredictorConfig>().unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{shorthand}: {err}");
}

#[test]
fn test_shorthand_zero_width_rejected() {
    let err = "gshare:0".parse::<PredictorConfig>().unwrap_err();
    assert!(matches!(err, ConfigError::ZeroWidth { field: "ghistory_bits" }));
}

#[test]
fn test_json_deserialization_defaults() {
    let config = PredictorConfig::from_json(r#"{ "kind": "Gshare" }"#).unwrap();
    assert_eq!(config, PredictorConfig::for_kind(PredictorKind::Gshare));
}

#[test]
fn test_json_deserialization_full() {
    let json = r#"{
        "kind": "Custom",
        "perceptron": {
            "history_length": 12,
            "slots": 64,
            "weight_bits": 6
        }
    }"#;
    let config = PredictorConfig::from_json(json).unwrap();
    assert_eq!(config.kind, PredictorKind::Custom);
    assert_eq!(
        config.perceptron,
        PerceptronConfig {
            history_length: 12,
            slots: 64,
            weight_bits: 6,
        }
    );
}

#[test]
fn test_json_chooser_init() {
    let json = r#"{ "kind": "Tournament", "chooser_init": "WeakNotTaken" }"#;
    let config = PredictorConfig::from_json(json).unwrap();
    assert_eq!(config.chooser_init, SaturatingCounter::WeakNotTaken);
}

#[rstest]
#[case("Perceptron", PredictorKind::Custom)]
#[case("gshare", PredictorKind::Gshare)]
#[case("GShare", PredictorKind::Gshare)]
#[case("tournament", PredictorKind::Tournament)]
fn test_json_kind_aliases(#[case] name: &str, #[case] kind: PredictorKind) {
    let json = format!(r#"{{ "kind": "{name}" }}"#);
    let config = PredictorConfig::from_json(&json).unwrap();
    assert_eq!(config.kind, kind);
}

#[test]
fn test_json_unknown_kind_rejected() {
    let err = PredictorConfig::from_json(r#"{ "kind": "Bimodal" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownPredictor(_)));
}

#[test]
fn test_json_malformed() {
    let err = PredictorConfig::from_json("{ kind: ").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_validate_ignores_unused_widths() {
    let config = PredictorConfig {
        kind: PredictorKind::Static,
        ghistory_bits: 0,
        lhistory_bits: 0,
        pc_index_bits: 0,
        ..PredictorConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[rstest]
#[case(0, 10, 10, "ghistory_bits")]
#[case(10, 0, 10, "lhistory_bits")]
#[case(10, 10, 0, "pc_index_bits")]
fn test_validate_tournament_zero_width(
    #[case] g: u32,
    #[case] l: u32,
    #[case] p: u32,
    #[case] expected: &str,
) {
    let config = PredictorConfig {
        kind: PredictorKind::Tournament,
        ghistory_bits: g,
        lhistory_bits: l,
        pc_index_bits: p,
        ..PredictorConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ZeroWidth { field } if field == expected));
}

#[test]
fn test_validate_width_too_large() {
    let config = PredictorConfig {
        kind: PredictorKind::Gshare,
        ghistory_bits: MAX_TABLE_BITS + 1,
        ..PredictorConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::WidthTooLarge { field: "ghistory_bits", bits: 31, max: 30 }
    ));
}

#[rstest]
#[case(PerceptronConfig { history_length: 0, slots: 8, weight_bits: 8 })]
#[case(PerceptronConfig { history_length: 65, slots: 8, weight_bits: 8 })]
#[case(PerceptronConfig { history_length: 8, slots: 0, weight_bits: 8 })]
#[case(PerceptronConfig { history_length: 8, slots: 8, weight_bits: 1 })]
#[case(PerceptronConfig { history_length: 8, slots: 8, weight_bits: 17 })]
fn test_validate_perceptron_rejects(#[case] perceptron: PerceptronConfig) {
    let config = PredictorConfig {
        kind: PredictorKind::Custom,
        perceptron,
        ..PredictorConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_unrecognized() {
    let config = PredictorConfig::for_kind(PredictorKind::Unrecognized);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::UnknownPredictor(_))
    ));
}
