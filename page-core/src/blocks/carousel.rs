//! Image/slide carousel.

use serde_json::json;

use super::{image, section, BlockContext, RenderMode};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("slides", "Slides", FieldType::Array),
    FieldSchema::new("autoplay", "Autoplay", FieldType::Boolean),
    FieldSchema::new("interval", "Interval (ms)", FieldType::Number),
    FieldSchema::new("showDots", "Show Dots", FieldType::Boolean),
    FieldSchema::new("showArrows", "Show Arrows", FieldType::Boolean),
];

/// Autoplay interval when none is configured.
pub const DEFAULT_INTERVAL_MS: u64 = 5000;

/// Settle period during which further transitions are ignored.
pub const TRANSITION_MS: u64 = 500;

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "carousel",
        label: "Carousel",
        icon: "image",
        category: Category::Content,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "slides": [
            {"image": "", "heading": "Slide One", "caption": "Tell your story one slide at a time."},
            {"image": "", "heading": "Slide Two", "caption": "Showcase products, people or places."},
            {"image": "", "heading": "Slide Three", "caption": "Autoplay pauses while you edit."}
        ],
        "autoplay": true,
        "interval": 5000,
        "showDots": true,
        "showArrows": true
    }))
}

/// Which slide is showing, plus the autoplay timer.
///
/// Time is passed in as milliseconds from any monotonic origin, so the
/// machine is deterministic under test. A transition started less than
/// [`TRANSITION_MS`] ago blocks the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    current: usize,
    len: usize,
    autoplay: bool,
    suspended: bool,
    interval_ms: u64,
    last_transition: Option<u64>,
    last_advance: u64,
}

impl CarouselState {
    /// A carousel over `len` slides showing the first.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            current: 0,
            len,
            autoplay: false,
            suspended: false,
            interval_ms: DEFAULT_INTERVAL_MS,
            last_transition: None,
            last_advance: 0,
        }
    }

    /// Enable autoplay with the given interval.
    #[must_use]
    pub const fn with_autoplay(mut self, interval_ms: u64) -> Self {
        self.autoplay = true;
        self.interval_ms = if interval_ms == 0 { DEFAULT_INTERVAL_MS } else { interval_ms };
        self
    }

    /// Initial state for a carousel's props in the given mode.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_props(props: &Props<'_>, mode: RenderMode) -> Self {
        let mut state = Self::new(props.items("slides").count());
        if props.flag("autoplay", true) {
            // Fractional or negative intervals fall back to the default.
            let interval = props.number("interval", 5000.0).max(0.0) as u64;
            state = state.with_autoplay(interval);
        }
        state.set_mode(mode);
        state
    }

    /// Index of the visible slide.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of slides.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no slides.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the autoplay timer is running.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.autoplay && !self.suspended && self.len > 1
    }

    /// Suspend autoplay in author mode, resume it in display mode.
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.suspended = mode.is_author();
    }

    /// Whether a transition is still settling at `now_ms`.
    #[must_use]
    pub fn is_transitioning(&self, now_ms: u64) -> bool {
        self.last_transition
            .is_some_and(|started| now_ms.saturating_sub(started) < TRANSITION_MS)
    }

    /// Advance one slide, wrapping. Returns whether the slide changed.
    pub fn next(&mut self, now_ms: u64) -> bool {
        if self.len == 0 {
            return false;
        }
        self.goto((self.current + 1) % self.len, now_ms)
    }

    /// Go back one slide, wrapping.
    pub fn prev(&mut self, now_ms: u64) -> bool {
        if self.len == 0 {
            return false;
        }
        self.goto((self.current + self.len - 1) % self.len, now_ms)
    }

    /// Jump to `index`. Ignored when out of range, already showing, or
    /// while a previous transition is settling.
    pub fn goto(&mut self, index: usize, now_ms: u64) -> bool {
        if index >= self.len || index == self.current || self.is_transitioning(now_ms) {
            return false;
        }
        self.current = index;
        self.last_transition = Some(now_ms);
        self.last_advance = now_ms;
        true
    }

    /// Drive the autoplay timer. Fires `next` once the interval has elapsed
    /// since the last slide change.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.is_playing() || now_ms.saturating_sub(self.last_advance) < self.interval_ms {
            return false;
        }
        let advanced = self.next(now_ms);
        if !advanced {
            // Restart the interval even if the guard swallowed the advance.
            self.last_advance = now_ms;
        }
        advanced
    }
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let state = CarouselState::from_props(props, cx.mode);
    let autoplay = state.is_playing() && cx.interactive;

    let slides = props.items("slides").enumerate().map(|(index, slide)| {
        let heading = slide.text("heading", "");
        let mut node = Node::el("div")
            .class(if index == state.current() { "pf-slide pf-slide-active" } else { "pf-slide" })
            .attr("data-index", index.to_string());
        if let Some(img) = image(&slide.text("image", ""), &heading) {
            node = node.child(img);
        }
        node.child(
            Node::el("div")
                .class("pf-slide-caption")
                .child(cx.item_text("h3", "slides", index, "heading", &heading))
                .child(cx.item_multiline(
                    "p",
                    "slides",
                    index,
                    "caption",
                    &slide.text("caption", ""),
                )),
        )
    });

    let mut root = section("carousel")
        .attr("data-autoplay", autoplay.to_string())
        .attr("data-interval", state.interval_ms.to_string())
        .child(Node::el("div").class("pf-slides").children(slides));

    if props.flag("showArrows", true) && state.len() > 1 {
        root = root
            .child(
                Node::el("button")
                    .class("pf-carousel-prev")
                    .attr("aria-label", "Previous")
                    .with_text("\u{2039}"),
            )
            .child(
                Node::el("button")
                    .class("pf-carousel-next")
                    .attr("aria-label", "Next")
                    .with_text("\u{203a}"),
            );
    }
    if props.flag("showDots", true) && state.len() > 1 {
        let dots = (0..state.len()).map(|index| {
            Node::el("button")
                .class(if index == state.current() {
                    "pf-dot pf-dot-active"
                } else {
                    "pf-dot"
                })
                .attr("aria-label", format!("Go to slide {}", index + 1))
        });
        root = root.child(Node::el("div").class("pf-carousel-dots").children(dots));
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_prev_wrap() {
        let mut state = CarouselState::new(3);
        assert!(state.prev(0));
        assert_eq!(state.current(), 2);
        assert!(state.next(1_000));
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn test_transition_guard() {
        let mut state = CarouselState::new(3);
        assert!(state.next(0));
        assert!(!state.next(TRANSITION_MS - 1));
        assert_eq!(state.current(), 1);
        assert!(state.next(TRANSITION_MS));
        assert_eq!(state.current(), 2);
    }

    #[test]
    fn test_goto_bounds() {
        let mut state = CarouselState::new(2);
        assert!(!state.goto(5, 0));
        assert!(!state.goto(0, 0));
        assert!(state.goto(1, 0));
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let mut state = CarouselState::new(0).with_autoplay(10);
        assert!(state.is_empty());
        assert!(!state.next(0));
        assert!(!state.prev(0));
        assert!(!state.tick(100));
    }

    #[test]
    fn test_autoplay_fires_on_interval() {
        let mut state = CarouselState::new(3).with_autoplay(1_000);
        assert!(!state.tick(999));
        assert!(state.tick(1_000));
        assert_eq!(state.current(), 1);
        assert!(!state.tick(1_500));
        assert!(state.tick(2_000));
        assert_eq!(state.current(), 2);
    }

    #[test]
    fn test_autoplay_suspended_in_author_mode() {
        let props = defaults();
        let mut state = CarouselState::from_props(&Props::new(&props), RenderMode::Author);
        assert!(!state.is_playing());
        assert!(!state.tick(60_000));
        assert_eq!(state.current(), 0);

        state.set_mode(RenderMode::Display);
        assert!(state.is_playing());
        assert!(state.tick(60_000));
    }

    #[test]
    fn test_render_marks_autoplay_only_when_live() {
        let props = defaults();
        let reader = Props::new(&props);
        let display = render(&reader, &BlockContext::new(RenderMode::Display));
        assert_eq!(display.get_attr("data-autoplay"), Some("true"));
        let author = render(&reader, &BlockContext::new(RenderMode::Author));
        assert_eq!(author.get_attr("data-autoplay"), Some("false"));
    }
}
