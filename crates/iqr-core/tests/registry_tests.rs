use serde::Deserialize;
use serde_json::Value;

use iqr_core::error::Error;
use iqr_core::registry::PluginRegistry;
use iqr_core::types::PluginSpec;

trait Widget: std::fmt::Debug {
    fn label(&self) -> String;
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PlainConfig {
    label: String,
}

impl Default for PlainConfig {
    fn default() -> Self {
        Self {
            label: "default-label".to_string(),
        }
    }
}

#[derive(Debug)]
struct Plain {
    config: PlainConfig,
}

impl Widget for Plain {
    fn label(&self) -> String {
        self.config.label.clone()
    }
}

fn plain(params: &Value) -> anyhow::Result<Box<dyn Widget>> {
    let config: PlainConfig = serde_json::from_value(params.clone())?;
    Ok(Box::new(Plain { config }))
}

fn broken(_params: &Value) -> anyhow::Result<Box<dyn Widget>> {
    anyhow::bail!("constructor exploded")
}

fn registry() -> PluginRegistry<dyn Widget> {
    let mut registry = PluginRegistry::new("widget");
    registry.register("plain", || true, plain);
    registry.register("needs_gpu", || false, plain);
    registry.register("broken", || true, broken);
    registry
}

#[test]
fn instantiate_selected_implementation_with_params() {
    let registry = registry();
    let spec = PluginSpec::new("plain", serde_json::json!({ "label": "custom" }));
    let widget = registry.instantiate(&spec).expect("instantiates");
    assert_eq!(widget.label(), "custom");
}

#[test]
fn omitted_parameters_fall_back_to_declared_defaults() {
    let registry = registry();
    let spec: PluginSpec = serde_json::from_value(serde_json::json!({ "type": "plain" }))
        .expect("spec without parameter block parses");
    let widget = registry.instantiate(&spec).expect("instantiates");
    assert_eq!(widget.label(), "default-label");
}

#[test]
fn unknown_implementation_error_lists_only_usable_names() {
    let registry = registry();
    let spec = PluginSpec::new("mystery", serde_json::json!({}));
    let err = registry.instantiate(&spec).expect_err("unknown name");
    match err {
        Error::PluginInstantiation(msg) => {
            assert!(msg.contains("mystery"), "{msg}");
            assert!(msg.contains("plain"), "{msg}");
            // Unusable implementations are invisible in listings.
            assert!(!msg.contains("needs_gpu"), "{msg}");
        }
        other => panic!("expected PluginInstantiation, got {other:?}"),
    }
}

#[test]
fn explicitly_selecting_unusable_implementation_fails() {
    let registry = registry();
    let spec = PluginSpec::new("needs_gpu", serde_json::json!({}));
    let err = registry.instantiate(&spec).expect_err("unusable selection");
    match err {
        Error::PluginInstantiation(msg) => {
            assert!(msg.contains("not usable"), "{msg}");
        }
        other => panic!("expected PluginInstantiation, got {other:?}"),
    }
}

#[test]
fn constructor_failure_is_instantiation_error() {
    let registry = registry();
    let spec = PluginSpec::new("broken", serde_json::json!({}));
    let err = registry.instantiate(&spec).expect_err("constructor failure");
    match err {
        Error::PluginInstantiation(msg) => {
            assert!(msg.contains("constructor exploded"), "{msg}");
        }
        other => panic!("expected PluginInstantiation, got {other:?}"),
    }
}

#[test]
fn names_hides_unusable_implementations() {
    let registry = registry();
    let names = registry.names();
    assert!(names.contains(&"plain"));
    assert!(names.contains(&"broken"));
    assert!(!names.contains(&"needs_gpu"));
}
