/*!
 * Configuration Facet Tests
 * Status toggling and config-table introspection
 */

use pretty_assertions::assert_eq;
use proc_exclusion::{ConfigEntry, Configurable, ExclusionProcessor, InterceptFilter};

#[test]
fn config_name_is_stable() {
    let processor = ExclusionProcessor::new();
    assert_eq!(processor.config_name(), "ProcessExclusionProcessor");
}

#[test]
fn status_round_trip() {
    let processor = ExclusionProcessor::new();
    assert_eq!(processor.config("status").as_deref(), Some("enabled"));

    processor.set_config("status", "disable");
    assert_eq!(processor.config("status").as_deref(), Some("disabled"));
    assert!(!processor.is_enabled());

    processor.set_config("status", "enable");
    assert_eq!(processor.config("status").as_deref(), Some("enabled"));
    assert!(processor.is_enabled());
}

#[test]
fn enable_twice_has_no_further_effect() {
    let processor = ExclusionProcessor::disabled();
    assert!(processor.enable(), "first enable changes state");
    assert!(!processor.enable(), "second enable is a no-op");
    assert_eq!(processor.config("status").as_deref(), Some("enabled"));
}

#[test]
fn disable_twice_has_no_further_effect() {
    let processor = ExclusionProcessor::new();
    assert!(processor.disable());
    assert!(!processor.disable());
    assert_eq!(processor.config("status").as_deref(), Some("disabled"));
}

#[test]
fn unknown_key_is_ignored() {
    let processor = ExclusionProcessor::new();
    let before = processor.all_config();

    processor.set_config("frobnicate", "enable");
    assert_eq!(processor.config("frobnicate"), None);
    assert_eq!(processor.all_config(), before, "no entry may change");
    assert!(processor.is_enabled());
}

#[test]
fn unknown_action_is_ignored() {
    let processor = ExclusionProcessor::new();
    processor.set_config("status", "sideways");
    assert_eq!(processor.config("status").as_deref(), Some("enabled"));
}

#[test]
fn all_config_lists_the_status_entry() {
    let processor = ExclusionProcessor::new();
    let entries = processor.all_config();
    assert_eq!(
        entries,
        vec![ConfigEntry {
            name: "status".to_string(),
            value: "enabled".to_string(),
        }]
    );
}

#[test]
fn config_entries_serialize() {
    let processor = ExclusionProcessor::new();
    let json = serde_json::to_string(&processor.all_config()).unwrap();
    assert_eq!(json, r#"[{"name":"status","value":"enabled"}]"#);

    let entries: Vec<ConfigEntry> = serde_json::from_str(&json).unwrap();
    assert_eq!(entries, processor.all_config());
}
