//! # Style Compiler
//!
//! Turns a declarative style descriptor (the `style` map of a component
//! instance) into concrete presentation output: an ordered list of CSS
//! declarations, a hover rule, extra class names and the raw custom-CSS
//! escape hatch.
//!
//! [`compile_style`] is total and pure. Every field family is optional and
//! independent; absent keys produce no output at all, and a value with an
//! unexpected shape is skipped rather than reported.
//!
//! Declaration values end up inside `style` attributes and page-level
//! `<style>` rules regardless of trust, so any value containing one of
//! [`CSS_BREAKOUT_CHARS`] is dropped. Only `customCSS` is exempt, and the
//! renderer gates that on trust.
//!
//! ## Descriptor keys
//!
//! | Key               | Shape                                         |
//! |-------------------|-----------------------------------------------|
//! | `padding`/`margin`| `{top, right, bottom, left}` or a shorthand   |
//! | `backgroundColor` | color string                                  |
//! | `color`           | color string                                  |
//! | `gradient`        | `{type, angle, stops: [{color, position}]}`   |
//! | `typography`      | `{fontSize, fontWeight, lineHeight, ...}`     |
//! | `borderWidth`     | length (implies `border-style: solid`)        |
//! | `transform`       | `{perspective, translateX, rotateY, ...}`     |
//! | `effects`         | `{blur, brightness, ..., backdropBlur}`       |
//! | `animation`       | `{type, duration, delay, easing, iteration}`  |
//! | `hover`           | `{backgroundColor, color, scale, ...}`        |
//! | `customCSS`       | raw declarations, passed through untouched    |
//! | `customClasses`   | whitespace separated class names              |

use std::fmt::Write as _;

use crate::value::{format_number, Props, PropMap, PropValue};

/// Gradient emitted when a gradient is requested without any usable stops.
pub const FALLBACK_GRADIENT: &str = "linear-gradient(135deg, #667eea 0%, #764ba2 100%)";

/// Angle used for linear and conic gradients that do not specify one.
pub const DEFAULT_GRADIENT_ANGLE: &str = "135deg";

/// Sentinel animation type meaning "no animation".
pub const NO_ANIMATION: &str = "none";

/// Characters that would let a value end its declaration or rule.
pub const CSS_BREAKOUT_CHARS: [char; 5] = ['{', '}', ';', '<', '@'];

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// CSS property name.
    pub property: &'static str,
    /// CSS value.
    pub value: String,
}

impl Declaration {
    fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }

    /// Whether the value cannot escape its own declaration.
    #[must_use]
    pub fn is_contained(&self) -> bool {
        is_contained(&self.value)
    }
}

fn is_contained(value: &str) -> bool {
    !value.contains(CSS_BREAKOUT_CHARS)
}

fn contained(declarations: Vec<Declaration>) -> Vec<Declaration> {
    declarations
        .into_iter()
        .filter(|d| {
            let keep = d.is_contained();
            if !keep {
                tracing::debug!(property = d.property, "dropping style value with CSS delimiters");
            }
            keep
        })
        .collect()
}

/// Output of the style compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledStyle {
    /// Declarations for the component's wrapping container, in a fixed order.
    pub declarations: Vec<Declaration>,
    /// Declarations applied while hovering.
    pub hover: Vec<Declaration>,
    /// Extra class names from `customClasses`.
    pub class_names: Vec<String>,
    /// Raw `customCSS` text. Never sanitized here.
    pub custom_css: Option<String>,
    /// Referenced animation name, if any.
    pub animation: Option<String>,
}

impl CompiledStyle {
    /// True when the descriptor produced no output whatsoever.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
            && self.hover.is_empty()
            && self.class_names.is_empty()
            && self.custom_css.is_none()
            && self.animation.is_none()
    }

    /// Value of the first declaration for `property`.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    /// Render the declarations as an inline `style` attribute value.
    ///
    /// `custom_css` is appended only when `include_custom` is set; callers
    /// decide whether the raw text is trusted.
    #[must_use]
    pub fn inline_css(&self, include_custom: bool) -> String {
        let mut css = join_declarations(&self.declarations);
        if include_custom {
            if let Some(custom) = &self.custom_css {
                if !css.is_empty() {
                    css.push(' ');
                }
                css.push_str(custom);
            }
        }
        css
    }

    /// Render the hover declarations as a rule for `selector`.
    #[must_use]
    pub fn hover_rule(&self, selector: &str) -> Option<String> {
        if self.hover.is_empty() {
            return None;
        }
        Some(format!(
            "{selector}:hover {{ {} }}",
            join_declarations(&self.hover)
        ))
    }
}

fn join_declarations(declarations: &[Declaration]) -> String {
    let mut out = String::new();
    for (i, d) in declarations.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}: {};", d.property, d.value);
    }
    out
}

/// Compile a style descriptor. Pure, deterministic, never fails.
#[must_use]
pub fn compile_style(style: &PropMap) -> CompiledStyle {
    let props = Props::new(style);
    let mut out = Vec::new();

    compile_box(&props, "padding", &mut out);
    compile_box(&props, "margin", &mut out);
    compile_colors(&props, &mut out);
    compile_typography(&props, &mut out);
    compile_border(&props, &mut out);
    if let Some(opacity) = props.get("opacity").and_then(|v| unitless(v)) {
        out.push(Declaration::new("opacity", opacity));
    }
    if let Some(shadow) = props.opt_text("boxShadow") {
        out.push(Declaration::new("box-shadow", shadow));
    }
    if let Some(transform) = transform_css(&props) {
        out.push(Declaration::new("transform", transform));
    }
    compile_effects(&props, &mut out);
    let animation = compile_animation(&props, &mut out);
    compile_layout(&props, &mut out);

    let hover = contained(compile_hover(&props.nested("hover")));
    if !hover.is_empty() {
        out.push(Declaration::new("transition", "all 0.3s ease"));
    }

    CompiledStyle {
        declarations: contained(out),
        hover,
        class_names: props
            .opt_text("customClasses")
            .map(|classes| classes.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
        custom_css: props
            .opt_text("customCSS")
            .map(|css| css.trim().to_string())
            .filter(|css| !css.is_empty()),
        animation: animation.filter(|name| is_contained(name)),
    }
}

/// Text values pass through verbatim; numbers get `unit` appended.
fn length(value: &PropValue, unit: &str) -> Option<String> {
    match value {
        PropValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        PropValue::Number(n) if n.is_finite() => Some(format!("{}{unit}", format_number(*n))),
        _ => None,
    }
}

fn unitless(value: &PropValue) -> Option<String> {
    length(value, "")
}

fn compile_box(props: &Props<'_>, key: &'static str, out: &mut Vec<Declaration>) {
    const SIDES: [(&str, &str, &str); 4] = [
        ("top", "padding-top", "margin-top"),
        ("right", "padding-right", "margin-right"),
        ("bottom", "padding-bottom", "margin-bottom"),
        ("left", "padding-left", "margin-left"),
    ];

    match props.get(key) {
        Some(PropValue::Map(sides)) => {
            for (side, padding_prop, margin_prop) in SIDES {
                let property = if key == "padding" {
                    padding_prop
                } else {
                    margin_prop
                };
                if let Some(value) = sides.get(side).and_then(|v| length(v, "px")) {
                    out.push(Declaration::new(property, value));
                }
            }
        }
        Some(shorthand) => {
            if let Some(value) = length(shorthand, "px") {
                out.push(Declaration::new(key, value));
            }
        }
        None => {}
    }
}

fn compile_colors(props: &Props<'_>, out: &mut Vec<Declaration>) {
    if let Some(bg) = props.opt_text("backgroundColor") {
        out.push(Declaration::new("background-color", bg));
    }
    if let Some(gradient) = props.get("gradient").and_then(PropValue::as_map) {
        let gradient = Props::new(gradient);
        if gradient.flag("enabled", true) {
            out.push(Declaration::new("background-image", gradient_css(&gradient)));
        }
    }
    if let Some(color) = props.opt_text("color") {
        out.push(Declaration::new("color", color));
    }
}

/// Kind of CSS gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientKind {
    /// `linear-gradient(<angle>, ...)`
    Linear,
    /// `radial-gradient(circle, ...)`; the angle is ignored.
    Radial,
    /// `conic-gradient(from <angle>, ...)`
    Conic,
}

impl GradientKind {
    /// Parse a gradient type; unknown values are linear.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "radial" => Self::Radial,
            "conic" => Self::Conic,
            _ => Self::Linear,
        }
    }
}

/// Build a gradient expression from a gradient descriptor.
///
/// Falls back to [`FALLBACK_GRADIENT`] when no stop carries a color.
#[must_use]
pub fn gradient_css(gradient: &Props<'_>) -> String {
    let stops: Vec<String> = gradient
        .items("stops")
        .filter_map(|stop| {
            let color = stop.opt_text("color")?;
            match stop.get("position").and_then(|p| length(p, "%")) {
                Some(position) => Some(format!("{color} {position}")),
                None => Some(color.into_owned()),
            }
        })
        .collect();

    if stops.is_empty() {
        return FALLBACK_GRADIENT.to_string();
    }

    let stops = stops.join(", ");
    let angle = gradient
        .get("angle")
        .and_then(|a| length(a, "deg"))
        .unwrap_or_else(|| DEFAULT_GRADIENT_ANGLE.to_string());

    match GradientKind::parse(&gradient.text("type", "linear")) {
        GradientKind::Linear => format!("linear-gradient({angle}, {stops})"),
        GradientKind::Radial => format!("radial-gradient(circle, {stops})"),
        GradientKind::Conic => format!("conic-gradient(from {angle}, {stops})"),
    }
}

fn compile_typography(props: &Props<'_>, out: &mut Vec<Declaration>) {
    const FIELDS: [(&str, &str, &str); 6] = [
        ("fontSize", "font-size", "px"),
        ("fontWeight", "font-weight", ""),
        ("lineHeight", "line-height", ""),
        ("letterSpacing", "letter-spacing", "px"),
        ("fontFamily", "font-family", ""),
        ("textAlign", "text-align", ""),
    ];

    let typography = props.nested("typography");
    for (key, property, unit) in FIELDS {
        // Older records keep typography keys at the top level.
        let value = typography.get(key).or_else(|| props.get(key));
        if let Some(value) = value.and_then(|v| length(v, unit)) {
            out.push(Declaration::new(property, value));
        }
    }
}

fn compile_border(props: &Props<'_>, out: &mut Vec<Declaration>) {
    if let Some(width) = props.get("borderWidth").and_then(|v| length(v, "px")) {
        out.push(Declaration::new("border-width", width));
        out.push(Declaration::new("border-style", "solid"));
    }
    if let Some(color) = props.opt_text("borderColor") {
        out.push(Declaration::new("border-color", color));
    }
    if let Some(radius) = props.get("borderRadius").and_then(|v| length(v, "px")) {
        out.push(Declaration::new("border-radius", radius));
    }
}

/// Build the transform function list. `perspective` always comes first,
/// otherwise the 3D functions after it render flat.
fn transform_css(props: &Props<'_>) -> Option<String> {
    const FUNCTIONS: [(&str, &str, &str); 12] = [
        ("translateX", "translateX", "px"),
        ("translateY", "translateY", "px"),
        ("translateZ", "translateZ", "px"),
        ("scale", "scale", ""),
        ("scaleX", "scaleX", ""),
        ("scaleY", "scaleY", ""),
        ("rotate", "rotate", "deg"),
        ("rotateX", "rotateX", "deg"),
        ("rotateY", "rotateY", "deg"),
        ("rotateZ", "rotateZ", "deg"),
        ("skewX", "skewX", "deg"),
        ("skewY", "skewY", "deg"),
    ];

    let transform = match props.get("transform") {
        Some(PropValue::Map(map)) => Props::new(map),
        Some(PropValue::Text(raw)) if !raw.trim().is_empty() => {
            return Some(raw.trim().to_string())
        }
        _ => return None,
    };

    let mut parts = Vec::new();
    if let Some(p) = transform.get("perspective").and_then(|v| length(v, "px")) {
        parts.push(format!("perspective({p})"));
    }
    for (key, function, unit) in FUNCTIONS {
        if let Some(value) = transform.get(key).and_then(|v| length(v, unit)) {
            parts.push(format!("{function}({value})"));
        }
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn compile_effects(props: &Props<'_>, out: &mut Vec<Declaration>) {
    const FILTERS: [(&str, &str, &str); 7] = [
        ("blur", "blur", "px"),
        ("brightness", "brightness", "%"),
        ("contrast", "contrast", "%"),
        ("grayscale", "grayscale", "%"),
        ("hueRotate", "hue-rotate", "deg"),
        ("saturate", "saturate", "%"),
        ("sepia", "sepia", "%"),
    ];

    let effects = match props.get("effects") {
        Some(PropValue::Map(map)) => Props::new(map),
        _ => props.nested("filters"),
    };

    let filters: Vec<String> = FILTERS
        .iter()
        .filter_map(|(key, function, unit)| {
            let value = effects.get(key).and_then(|v| length(v, unit))?;
            Some(format!("{function}({value})"))
        })
        .collect();
    if !filters.is_empty() {
        out.push(Declaration::new("filter", filters.join(" ")));
    }

    if let Some(blur) = effects.get("backdropBlur").and_then(|v| length(v, "px")) {
        out.push(Declaration::new("backdrop-filter", format!("blur({blur})")));
    }
}

fn compile_animation(props: &Props<'_>, out: &mut Vec<Declaration>) -> Option<String> {
    let animation = props.nested("animation");
    let name = animation.opt_text("type")?;
    if name == NO_ANIMATION {
        return None;
    }

    let duration = animation
        .get("duration")
        .and_then(|v| length(v, "s"))
        .unwrap_or_else(|| "1s".to_string());
    let delay = animation
        .get("delay")
        .and_then(|v| length(v, "s"))
        .unwrap_or_else(|| "0s".to_string());
    let easing = animation.text("easing", "ease");
    let iteration = animation
        .get("iteration")
        .or_else(|| animation.get("iterationCount"))
        .and_then(unitless)
        .unwrap_or_else(|| "1".to_string());

    out.push(Declaration::new("animation-name", name.as_ref()));
    out.push(Declaration::new("animation-duration", duration));
    out.push(Declaration::new("animation-delay", delay));
    out.push(Declaration::new("animation-timing-function", easing));
    out.push(Declaration::new("animation-iteration-count", iteration));
    Some(name.into_owned())
}

fn compile_layout(props: &Props<'_>, out: &mut Vec<Declaration>) {
    if let Some(z) = props.get("zIndex").and_then(unitless) {
        out.push(Declaration::new("z-index", z));
    }
    for (key, property) in [
        ("position", "position"),
        ("overflow", "overflow"),
        ("cursor", "cursor"),
    ] {
        if let Some(value) = props.opt_text(key) {
            out.push(Declaration::new(property, value));
        }
    }
}

fn compile_hover(hover: &Props<'_>) -> Vec<Declaration> {
    let mut out = Vec::new();
    if let Some(bg) = hover.opt_text("backgroundColor") {
        out.push(Declaration::new("background-color", bg));
    }
    if let Some(color) = hover.opt_text("color") {
        out.push(Declaration::new("color", color));
    }
    if let Some(border) = hover.opt_text("borderColor") {
        out.push(Declaration::new("border-color", border));
    }
    if let Some(shadow) = hover.opt_text("boxShadow") {
        out.push(Declaration::new("box-shadow", shadow));
    }

    let mut transform = Vec::new();
    if let Some(y) = hover.get("translateY").and_then(|v| length(v, "px")) {
        transform.push(format!("translateY({y})"));
    }
    if let Some(scale) = hover.get("scale").and_then(unitless) {
        transform.push(format!("scale({scale})"));
    }
    if !transform.is_empty() {
        out.push(Declaration::new("transform", transform.join(" ")));
    }
    out
}

/// Keyframes for the built-in animation names.
///
/// Unknown names return `None`; the reference is still emitted so a page's
/// own custom CSS can supply the keyframes.
#[must_use]
pub fn keyframes(name: &str) -> Option<&'static str> {
    let css = match name {
        "fadeIn" => "@keyframes fadeIn { from { opacity: 0; } to { opacity: 1; } }",
        "fadeInUp" => "@keyframes fadeInUp { from { opacity: 0; transform: translateY(24px); } to { opacity: 1; transform: translateY(0); } }",
        "slideInLeft" => "@keyframes slideInLeft { from { transform: translateX(-100%); } to { transform: translateX(0); } }",
        "slideInRight" => "@keyframes slideInRight { from { transform: translateX(100%); } to { transform: translateX(0); } }",
        "zoomIn" => "@keyframes zoomIn { from { opacity: 0; transform: scale(0.8); } to { opacity: 1; transform: scale(1); } }",
        "bounce" => "@keyframes bounce { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(-16px); } }",
        "pulse" => "@keyframes pulse { 0%, 100% { transform: scale(1); } 50% { transform: scale(1.05); } }",
        "spin" => "@keyframes spin { from { transform: rotate(0deg); } to { transform: rotate(360deg); } }",
        _ => return None,
    };
    Some(css)
}

/// Names accepted by [`keyframes`], in picker order.
pub const ANIMATION_NAMES: [&str; 8] = [
    "fadeIn",
    "fadeInUp",
    "slideInLeft",
    "slideInRight",
    "zoomIn",
    "bounce",
    "pulse",
    "spin",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::prop_map;
    use serde_json::json;

    fn compile(value: serde_json::Value) -> CompiledStyle {
        compile_style(&prop_map(value))
    }

    #[test]
    fn test_empty_descriptor_emits_nothing() {
        let compiled = compile(json!({}));
        assert!(compiled.is_empty());
        assert_eq!(compiled.inline_css(true), "");
    }

    #[test]
    fn test_spacing_sides_are_independent() {
        let compiled = compile(json!({
            "padding": {"top": "10px", "left": 8},
            "margin": {"bottom": "2rem"}
        }));
        assert_eq!(compiled.get("padding-top"), Some("10px"));
        assert_eq!(compiled.get("padding-left"), Some("8px"));
        assert_eq!(compiled.get("padding-right"), None);
        assert_eq!(compiled.get("padding-bottom"), None);
        assert_eq!(compiled.get("margin-bottom"), Some("2rem"));
    }

    #[test]
    fn test_colors_copied_verbatim() {
        let compiled = compile(json!({"backgroundColor": "not-a-color", "color": "rgb(1,2,3)"}));
        assert_eq!(compiled.get("background-color"), Some("not-a-color"));
        assert_eq!(compiled.get("color"), Some("rgb(1,2,3)"));
    }

    #[test]
    fn test_linear_gradient_exact() {
        let compiled = compile(json!({
            "gradient": {
                "type": "linear",
                "angle": "90deg",
                "stops": [
                    {"color": "#111", "position": "0%"},
                    {"color": "#222", "position": "100%"}
                ]
            }
        }));
        assert_eq!(
            compiled.get("background-image"),
            Some("linear-gradient(90deg, #111 0%, #222 100%)")
        );
    }

    #[test]
    fn test_radial_gradient_ignores_angle() {
        let compiled = compile(json!({
            "gradient": {
                "type": "radial",
                "angle": "45deg",
                "stops": [{"color": "red", "position": 0}, {"color": "blue", "position": 100}]
            }
        }));
        let value = compiled.get("background-image").expect("gradient");
        assert!(value.starts_with("radial-gradient(circle, "));
        assert!(!value.contains("45deg"));
        assert_eq!(value, "radial-gradient(circle, red 0%, blue 100%)");
    }

    #[test]
    fn test_conic_gradient_uses_from() {
        let compiled = compile(json!({
            "gradient": {"type": "conic", "angle": 30, "stops": [{"color": "red"}, {"color": "blue"}]}
        }));
        assert_eq!(
            compiled.get("background-image"),
            Some("conic-gradient(from 30deg, red, blue)")
        );
    }

    #[test]
    fn test_gradient_without_stops_falls_back() {
        let compiled = compile(json!({"gradient": {"type": "linear"}}));
        assert_eq!(compiled.get("background-image"), Some(FALLBACK_GRADIENT));
        let disabled = compile(json!({"gradient": {"enabled": false}}));
        assert_eq!(disabled.get("background-image"), None);
    }

    #[test]
    fn test_typography_nested_and_flat() {
        let compiled = compile(json!({
            "typography": {"fontSize": 18, "fontWeight": "700"},
            "lineHeight": "1.6"
        }));
        assert_eq!(compiled.get("font-size"), Some("18px"));
        assert_eq!(compiled.get("font-weight"), Some("700"));
        assert_eq!(compiled.get("line-height"), Some("1.6"));
        assert_eq!(compiled.get("letter-spacing"), None);
    }

    #[test]
    fn test_border_width_implies_solid() {
        let compiled = compile(json!({"borderWidth": 2}));
        assert_eq!(compiled.get("border-width"), Some("2px"));
        assert_eq!(compiled.get("border-style"), Some("solid"));

        let radius_only = compile(json!({"borderRadius": "8px"}));
        assert_eq!(radius_only.get("border-style"), None);
    }

    #[test]
    fn test_transform_perspective_first() {
        let compiled = compile(json!({
            "transform": {
                "rotateY": 20,
                "translateX": "10px",
                "perspective": 800,
                "scale": 1.1
            }
        }));
        assert_eq!(
            compiled.get("transform"),
            Some("perspective(800px) translateX(10px) scale(1.1) rotateY(20deg)")
        );
    }

    #[test]
    fn test_filters_and_backdrop_are_separate() {
        let compiled = compile(json!({
            "effects": {"blur": 4, "hueRotate": 90, "sepia": "30%", "backdropBlur": 10}
        }));
        assert_eq!(
            compiled.get("filter"),
            Some("blur(4px) hue-rotate(90deg) sepia(30%)")
        );
        assert_eq!(compiled.get("backdrop-filter"), Some("blur(10px)"));

        let backdrop_only = compile(json!({"effects": {"backdropBlur": "6px"}}));
        assert_eq!(backdrop_only.get("filter"), None);
        assert_eq!(backdrop_only.get("backdrop-filter"), Some("blur(6px)"));
    }

    #[test]
    fn test_animation_defaults() {
        let compiled = compile(json!({"animation": {"type": "fadeIn"}}));
        assert_eq!(compiled.animation.as_deref(), Some("fadeIn"));
        assert_eq!(compiled.get("animation-name"), Some("fadeIn"));
        assert_eq!(compiled.get("animation-duration"), Some("1s"));
        assert_eq!(compiled.get("animation-delay"), Some("0s"));
        assert_eq!(compiled.get("animation-timing-function"), Some("ease"));
        assert_eq!(compiled.get("animation-iteration-count"), Some("1"));
    }

    #[test]
    fn test_animation_none_emits_nothing() {
        let compiled = compile(json!({"animation": {"type": "none", "duration": "2s"}}));
        assert!(compiled.animation.is_none());
        assert!(compiled
            .declarations
            .iter()
            .all(|d| !d.property.starts_with("animation")));
        assert!(compiled.is_empty());
    }

    #[test]
    fn test_custom_escape_hatches_pass_through() {
        let compiled = compile(json!({
            "customCSS": " outline: 1px dashed red; ",
            "customClasses": "a  b\tc",
            "color": "red"
        }));
        assert_eq!(compiled.custom_css.as_deref(), Some("outline: 1px dashed red;"));
        assert_eq!(compiled.class_names, vec!["a", "b", "c"]);
        assert_eq!(
            compiled.inline_css(true),
            "color: red; outline: 1px dashed red;"
        );
        assert_eq!(compiled.inline_css(false), "color: red;");
    }

    #[test]
    fn test_hover_rule() {
        let compiled = compile(json!({"hover": {"scale": 1.05, "translateY": -4, "color": "#fff"}}));
        assert_eq!(compiled.get("transition"), Some("all 0.3s ease"));
        assert_eq!(
            compiled.hover_rule(".x").as_deref(),
            Some(".x:hover { color: #fff; transform: translateY(-4px) scale(1.05); }")
        );
    }

    #[test]
    fn test_values_with_css_delimiters_are_dropped() {
        let compiled = compile(json!({
            "color": "red; position: fixed",
            "backgroundColor": "#fff",
            "boxShadow": "0 0 1px <b>",
            "animation": {"type": "x{}"},
            "hover": {
                "color": "red } body { display: none } .x {",
                "borderColor": "@import url(evil.css)",
                "backgroundColor": "#000"
            }
        }));
        assert_eq!(compiled.get("color"), None);
        assert_eq!(compiled.get("box-shadow"), None);
        assert_eq!(compiled.get("animation-name"), None);
        assert_eq!(compiled.animation, None);
        assert_eq!(compiled.get("background-color"), Some("#fff"));
        assert_eq!(
            compiled.hover_rule(".x").as_deref(),
            Some(".x:hover { background-color: #000; }")
        );
        assert!(compiled.declarations.iter().all(Declaration::is_contained));
    }

    #[test]
    fn test_hover_with_only_unsafe_values_emits_no_rule() {
        let compiled = compile(json!({"hover": {"color": "} * {"}}));
        assert!(compiled.hover_rule(".x").is_none());
        assert_eq!(compiled.get("transition"), None);
    }

    #[test]
    fn test_layout_and_misc() {
        let compiled = compile(json!({
            "zIndex": 10,
            "position": "relative",
            "overflow": "hidden",
            "cursor": "pointer",
            "opacity": 0.5,
            "boxShadow": "0 1px 2px #000"
        }));
        assert_eq!(compiled.get("z-index"), Some("10"));
        assert_eq!(compiled.get("position"), Some("relative"));
        assert_eq!(compiled.get("overflow"), Some("hidden"));
        assert_eq!(compiled.get("cursor"), Some("pointer"));
        assert_eq!(compiled.get("opacity"), Some("0.5"));
        assert_eq!(compiled.get("box-shadow"), Some("0 1px 2px #000"));
    }

    #[test]
    fn test_malformed_values_are_skipped() {
        let compiled = compile(json!({
            "padding": {"top": ["x"]},
            "transform": 42,
            "effects": "blur",
            "animation": "fadeIn",
            "gradient": "red"
        }));
        assert!(compiled.is_empty());
    }

    #[test]
    fn test_keyframes_catalog() {
        for name in ANIMATION_NAMES {
            assert!(keyframes(name).is_some_and(|css| css.contains(name)));
        }
        assert!(keyframes("wiggle").is_none());
    }
}
