//! Parallax banner.

use serde_json::json;

use super::{button, section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{format_number, prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::textarea("subtitle", "Subtitle"),
    FieldSchema::new("backgroundImage", "Background Image", FieldType::Image),
    FieldSchema::new("speed", "Speed", FieldType::Number),
    FieldSchema::new("height", "Height (px)", FieldType::Number),
    FieldSchema::text("ctaText", "Button Text"),
    FieldSchema::text("ctaLink", "Button Link"),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "parallax",
        label: "Parallax Section",
        icon: "layers",
        category: Category::Layout,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "Depth that moves",
        "subtitle": "The background scrolls slower than the page.",
        "backgroundImage": "",
        "speed": 0.5,
        "height": 500,
        "ctaText": "",
        "ctaLink": "#"
    }))
}

/// Scroll-driven background offset.
///
/// `offset = scroll_y * speed`, clamped to `[-max_offset, max_offset]`.
/// Speed is clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxState {
    speed: f64,
    max_offset: f64,
    offset: f64,
}

impl ParallaxState {
    /// A parallax layer with the given speed and offset bound.
    #[must_use]
    pub fn new(speed: f64, max_offset: f64) -> Self {
        let speed = if speed.is_finite() { speed.clamp(0.0, 1.0) } else { 0.5 };
        Self {
            speed,
            max_offset: max_offset.abs(),
            offset: 0.0,
        }
    }

    /// Initial state for a parallax block; the offset is bounded by its height.
    #[must_use]
    pub fn from_props(props: &Props<'_>) -> Self {
        Self::new(props.number("speed", 0.5), props.number("height", 500.0))
    }

    /// Recompute the offset for a new scroll position.
    pub fn on_scroll(&mut self, scroll_y: f64) -> f64 {
        let raw = if scroll_y.is_finite() { scroll_y * self.speed } else { 0.0 };
        self.offset = raw.clamp(-self.max_offset, self.max_offset);
        self.offset
    }

    /// Current offset.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Effective speed.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Back to the unscrolled position.
    pub fn reset(&mut self) {
        self.offset = 0.0;
    }
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let state = ParallaxState::from_props(props);
    let height = props.number("height", 500.0).max(0.0);

    let mut background = Node::el("div")
        .class("pf-parallax-layer")
        .attr("aria-hidden", "true")
        .attr("style", format!("transform: translateY({}px)", format_number(state.offset())));
    if let Some(src) = props.opt_text("backgroundImage") {
        background = background.attr("data-src", src);
    }

    let mut content = Node::el("div")
        .class("pf-parallax-content")
        .child(cx.text("h2", "title", &props.text("title", "Depth that moves")));
    if let Some(subtitle) = props.opt_text("subtitle") {
        content = content.child(cx.multiline("p", "subtitle", &subtitle));
    }
    if let Some(cta) = props.opt_text("ctaText") {
        let link = props.text("ctaLink", "#");
        content = content.child(button(cx, "ctaText", &cta, &link, "primary"));
    }

    section("parallax")
        .attr("data-speed", format_number(state.speed()))
        .attr("data-live", cx.interactive.to_string())
        .attr("style", format!("min-height: {}px", format_number(height)))
        .child(background)
        .child(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_follows_scroll_and_clamps() {
        let mut state = ParallaxState::new(0.5, 100.0);
        assert!((state.on_scroll(80.0) - 40.0).abs() < f64::EPSILON);
        assert!((state.on_scroll(1_000.0) - 100.0).abs() < f64::EPSILON);
        assert!((state.on_scroll(-1_000.0) + 100.0).abs() < f64::EPSILON);
        state.reset();
        assert!(state.offset().abs() < f64::EPSILON);
    }

    #[test]
    fn test_speed_clamped() {
        assert!((ParallaxState::new(3.0, 10.0).speed() - 1.0).abs() < f64::EPSILON);
        assert!(ParallaxState::new(-1.0, 10.0).speed().abs() < f64::EPSILON);
        assert!((ParallaxState::new(f64::NAN, 10.0).speed() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nan_scroll_is_zero() {
        let mut state = ParallaxState::new(0.5, 10.0);
        assert!(state.on_scroll(f64::NAN).abs() < f64::EPSILON);
    }
}
