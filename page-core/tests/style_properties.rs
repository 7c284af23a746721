//! Style Compiler Property Tests
//!
//! Determinism, empty-descriptor silence and the gradient contract.

use page_core::value::prop_map;
use page_core::{compile_style, PropMap, PropValue};
use proptest::prelude::*;
use serde_json::json;

fn scalar() -> impl Strategy<Value = PropValue> {
    prop_oneof![
        Just(PropValue::Null),
        any::<bool>().prop_map(PropValue::Bool),
        (-500.0f64..500.0).prop_map(PropValue::Number),
        "[a-z#0-9 ]{0,12}".prop_map(PropValue::Text),
    ]
}

fn descriptor() -> impl Strategy<Value = PropMap> {
    let keys = prop::sample::select(vec![
        "padding",
        "margin",
        "backgroundColor",
        "color",
        "fontSize",
        "borderWidth",
        "borderRadius",
        "opacity",
        "boxShadow",
        "rotate",
        "scale",
        "zIndex",
        "customClasses",
        "customCSS",
    ]);
    let leaf = scalar().prop_recursive(2, 12, 4, |inner| {
        prop::collection::btree_map("[a-zA-Z]{1,8}", inner, 0..4).prop_map(PropValue::Map)
    });
    prop::collection::btree_map(keys.prop_map(str::to_string), leaf, 0..8)
}

proptest! {
    #[test]
    fn compile_is_deterministic(style in descriptor()) {
        prop_assert_eq!(compile_style(&style), compile_style(&style));
    }

    #[test]
    fn compile_never_panics_on_nested_noise(style in descriptor()) {
        let compiled = compile_style(&style);
        let css = compiled.inline_css(true);
        prop_assert!(!css.contains("NaN"));
    }
}

#[test]
fn test_empty_descriptor_has_no_output() {
    let compiled = compile_style(&PropMap::new());
    assert!(compiled.is_empty());
    assert!(compiled.hover_rule(".x").is_none());
}

#[test]
fn test_gradient_contract() {
    let compiled = compile_style(&prop_map(json!({
        "gradient": {
            "type": "linear",
            "angle": "90deg",
            "stops": [
                {"color": "#111", "position": "0%"},
                {"color": "#222", "position": "100%"}
            ]
        }
    })));
    assert_eq!(
        compiled.get("background-image"),
        Some("linear-gradient(90deg, #111 0%, #222 100%)")
    );

    let radial = compile_style(&prop_map(json!({
        "gradient": {
            "type": "radial",
            "angle": "45deg",
            "stops": [{"color": "#111", "position": "0%"}]
        }
    })));
    assert!(radial
        .get("background-image")
        .is_some_and(|css| css.starts_with("radial-gradient(circle, ")));
}

#[test]
fn test_animation_none_is_omitted() {
    let compiled = compile_style(&prop_map(json!({"animation": {"type": "none", "duration": 2}})));
    assert!(compiled.animation.is_none());
    assert!(!compiled.inline_css(true).contains("animation"));
}
