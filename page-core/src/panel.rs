//! Tabbed properties panel for the selected component.
//!
//! The panel keeps a working copy of the selected instance's props and style
//! and turns control input into [`Patch`]es. Non-text controls emit a patch
//! on every change; text inputs are buffered until blur so one typed value
//! becomes one history step. The working copy is discarded whenever a
//! different instance is selected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::component::{ComponentId, ComponentInstance};
use crate::list_editor::ListEditor;
use crate::registry::{ComponentDefinition, FieldSchema, FieldType};
use crate::style::ANIMATION_NAMES;
use crate::value::{get_path, set_path, PropMap, PropValue};

/// Panel tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Schema-driven content fields.
    #[default]
    Content,
    /// Spacing, colors, typography, border.
    Style,
    /// Animation, filters, 3D transform, hover state.
    Effects,
    /// Gradient, custom CSS and classes, layering.
    Advanced,
}

impl Tab {
    /// Every tab in display order.
    pub const ALL: [Self; 4] = [Self::Content, Self::Style, Self::Effects, Self::Advanced];

    /// Tab caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Content => "Content",
            Self::Style => "Style",
            Self::Effects => "Effects",
            Self::Advanced => "Advanced",
        }
    }
}

/// Which map a patch writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchTarget {
    /// `props`
    Props,
    /// `style`
    Style,
}

/// A single-field change to a component instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// Map being written.
    pub target: PatchTarget,
    /// Dotted path inside the map.
    pub path: String,
    /// New value; [`PropValue::Null`] clears the key.
    pub value: PropValue,
}

impl Patch {
    /// A props patch.
    #[must_use]
    pub fn props(path: impl Into<String>, value: impl Into<PropValue>) -> Self {
        Self {
            target: PatchTarget::Props,
            path: path.into(),
            value: value.into(),
        }
    }

    /// A style patch.
    #[must_use]
    pub fn style(path: impl Into<String>, value: impl Into<PropValue>) -> Self {
        Self {
            target: PatchTarget::Style,
            path: path.into(),
            value: value.into(),
        }
    }

    /// Write the patch into an instance.
    pub fn apply(&self, instance: &mut ComponentInstance) {
        let map = match self.target {
            PatchTarget::Props => &mut instance.props,
            PatchTarget::Style => &mut instance.style,
        };
        set_path(map, &self.path, self.value.clone());
    }
}

const FONT_WEIGHTS: &[&str] = &["300", "400", "500", "600", "700", "800"];
const TEXT_ALIGN: &[&str] = &["left", "center", "right", "justify"];
const EASINGS: &[&str] = &["ease", "ease-in", "ease-out", "ease-in-out", "linear"];
const GRADIENT_TYPES: &[&str] = &["linear", "radial", "conic"];
const POSITIONS: &[&str] = &["static", "relative", "absolute", "fixed", "sticky"];
const OVERFLOWS: &[&str] = &["visible", "hidden", "scroll", "auto"];
const CURSORS: &[&str] = &["auto", "default", "pointer", "text", "move", "not-allowed"];

const fn number(path: &'static str, label: &'static str) -> FieldSchema {
    FieldSchema::new(path, label, FieldType::Number)
}

const fn color(path: &'static str, label: &'static str) -> FieldSchema {
    FieldSchema::new(path, label, FieldType::Color)
}

const STYLE_CONTROLS: &[FieldSchema] = &[
    FieldSchema::text("padding.top", "Padding Top"),
    FieldSchema::text("padding.right", "Padding Right"),
    FieldSchema::text("padding.bottom", "Padding Bottom"),
    FieldSchema::text("padding.left", "Padding Left"),
    FieldSchema::text("margin.top", "Margin Top"),
    FieldSchema::text("margin.right", "Margin Right"),
    FieldSchema::text("margin.bottom", "Margin Bottom"),
    FieldSchema::text("margin.left", "Margin Left"),
    color("backgroundColor", "Background Color"),
    color("color", "Text Color"),
    FieldSchema::text("typography.fontSize", "Font Size"),
    FieldSchema::select("typography.fontWeight", "Font Weight", FONT_WEIGHTS),
    FieldSchema::text("typography.lineHeight", "Line Height"),
    FieldSchema::text("typography.letterSpacing", "Letter Spacing"),
    FieldSchema::text("typography.fontFamily", "Font Family"),
    FieldSchema::select("typography.textAlign", "Text Align", TEXT_ALIGN),
    number("borderWidth", "Border Width"),
    color("borderColor", "Border Color"),
    number("borderRadius", "Border Radius"),
    number("opacity", "Opacity"),
    FieldSchema::text("boxShadow", "Box Shadow"),
];

const EFFECT_CONTROLS: &[FieldSchema] = &[
    FieldSchema::select("animation.type", "Animation", ANIMATION_OPTIONS),
    FieldSchema::text("animation.duration", "Duration"),
    FieldSchema::text("animation.delay", "Delay"),
    FieldSchema::select("animation.easing", "Easing", EASINGS),
    FieldSchema::text("animation.iteration", "Iterations"),
    number("effects.blur", "Blur"),
    number("effects.brightness", "Brightness"),
    number("effects.contrast", "Contrast"),
    number("effects.grayscale", "Grayscale"),
    number("effects.hueRotate", "Hue Rotate"),
    number("effects.saturate", "Saturate"),
    number("effects.sepia", "Sepia"),
    number("effects.backdropBlur", "Backdrop Blur"),
    number("transform.perspective", "Perspective"),
    number("transform.translateX", "Translate X"),
    number("transform.translateY", "Translate Y"),
    number("transform.translateZ", "Translate Z"),
    number("transform.scale", "Scale"),
    number("transform.rotate", "Rotate"),
    number("transform.rotateX", "Rotate X"),
    number("transform.rotateY", "Rotate Y"),
    number("transform.rotateZ", "Rotate Z"),
    number("transform.skewX", "Skew X"),
    number("transform.skewY", "Skew Y"),
    color("hover.backgroundColor", "Hover Background"),
    color("hover.color", "Hover Text Color"),
    color("hover.borderColor", "Hover Border Color"),
    FieldSchema::text("hover.boxShadow", "Hover Shadow"),
    number("hover.scale", "Hover Scale"),
    number("hover.translateY", "Hover Lift"),
];

const ADVANCED_CONTROLS: &[FieldSchema] = &[
    FieldSchema::new("gradient.enabled", "Use Gradient", FieldType::Boolean),
    FieldSchema::select("gradient.type", "Gradient Type", GRADIENT_TYPES),
    FieldSchema::text("gradient.angle", "Gradient Angle"),
    FieldSchema::new("gradient.stops", "Gradient Stops", FieldType::Array),
    FieldSchema::textarea("customCSS", "Custom CSS"),
    FieldSchema::text("customClasses", "Custom Classes"),
    number("zIndex", "Z-Index"),
    FieldSchema::select("position", "Position", POSITIONS),
    FieldSchema::select("overflow", "Overflow", OVERFLOWS),
    FieldSchema::select("cursor", "Cursor", CURSORS),
];

const ANIMATION_OPTIONS: &[&str] = &[
    "none",
    ANIMATION_NAMES[0],
    ANIMATION_NAMES[1],
    ANIMATION_NAMES[2],
    ANIMATION_NAMES[3],
    ANIMATION_NAMES[4],
    ANIMATION_NAMES[5],
    ANIMATION_NAMES[6],
    ANIMATION_NAMES[7],
];

/// Fixed style controls shown on a non-content tab.
#[must_use]
pub const fn style_controls(tab: Tab) -> &'static [FieldSchema] {
    match tab {
        Tab::Content => &[],
        Tab::Style => STYLE_CONTROLS,
        Tab::Effects => EFFECT_CONTROLS,
        Tab::Advanced => ADVANCED_CONTROLS,
    }
}

/// One rendered control with its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    /// Map the control writes to.
    pub target: PatchTarget,
    /// Field description; `key` is the dotted path.
    pub schema: FieldSchema,
    /// Current value, including any unflushed text.
    pub value: PropValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingText {
    target: PatchTarget,
    path: String,
    text: String,
}

/// Working state of the properties panel.
#[derive(Debug, Clone)]
pub struct PropertiesPanel {
    component: ComponentId,
    content_schema: &'static [FieldSchema],
    tab: Tab,
    props: PropMap,
    style: PropMap,
    pending: Option<PendingText>,
    lists: BTreeMap<(PatchTarget, String), ListEditor>,
}

impl PropertiesPanel {
    /// Open the panel on `instance`.
    #[must_use]
    pub fn new(instance: &ComponentInstance, definition: &ComponentDefinition) -> Self {
        Self {
            component: instance.id.clone(),
            content_schema: definition.schema,
            tab: Tab::Content,
            props: instance.props.clone(),
            style: instance.style.clone(),
            pending: None,
            lists: BTreeMap::new(),
        }
    }

    /// Id of the instance being edited.
    #[must_use]
    pub const fn component(&self) -> &ComponentId {
        &self.component
    }

    /// Current tab.
    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    /// Switch tab. Pending text is flushed first.
    pub fn set_tab(&mut self, tab: Tab) -> Option<Patch> {
        let flushed = self.blur();
        self.tab = tab;
        flushed
    }

    /// Take in the instance's latest values.
    ///
    /// A different instance resets the panel entirely. Otherwise the working
    /// copy is refreshed and open list editors are re-synced.
    pub fn sync(&mut self, instance: &ComponentInstance, definition: &ComponentDefinition) {
        if instance.id != self.component {
            *self = Self::new(instance, definition);
            return;
        }
        self.props = instance.props.clone();
        self.style = instance.style.clone();
        for ((target, path), editor) in &mut self.lists {
            let map = match target {
                PatchTarget::Props => &self.props,
                PatchTarget::Style => &self.style,
            };
            editor.sync(get_path(map, path));
        }
    }

    /// Controls of the current tab in display order.
    #[must_use]
    pub fn controls(&self) -> Vec<Control> {
        let (target, schema) = match self.tab {
            Tab::Content => (PatchTarget::Props, self.content_schema),
            tab => (PatchTarget::Style, style_controls(tab)),
        };
        schema
            .iter()
            .map(|field| Control {
                target,
                schema: *field,
                value: self.current(target, field),
            })
            .collect()
    }

    fn current(&self, target: PatchTarget, field: &FieldSchema) -> PropValue {
        if let Some(pending) = &self.pending {
            if pending.target == target && pending.path == field.key {
                return PropValue::Text(pending.text.clone());
            }
        }
        get_path(self.map(target), field.key)
            .cloned()
            .unwrap_or_else(|| match target {
                PatchTarget::Props => field.field_type.empty_value(),
                PatchTarget::Style => PropValue::Null,
            })
    }

    const fn map(&self, target: PatchTarget) -> &PropMap {
        match target {
            PatchTarget::Props => &self.props,
            PatchTarget::Style => &self.style,
        }
    }

    fn field_type(&self, target: PatchTarget, path: &str) -> Option<FieldType> {
        let schema = match target {
            PatchTarget::Props => self.content_schema,
            PatchTarget::Style => {
                return Tab::ALL
                    .iter()
                    .flat_map(|tab| style_controls(*tab))
                    .find(|f| f.key == path)
                    .map(|f| f.field_type)
            }
        };
        schema.iter().find(|f| f.key == path).map(|f| f.field_type)
    }

    /// Keystrokes in a text input. Buffered until [`Self::blur`]; moving to a
    /// different input flushes the previous one, which is returned.
    pub fn type_text(
        &mut self,
        target: PatchTarget,
        path: &str,
        text: impl Into<String>,
    ) -> Option<Patch> {
        let flushed = match &self.pending {
            Some(p) if p.target != target || p.path != path => self.blur(),
            _ => None,
        };
        self.pending = Some(PendingText {
            target,
            path: path.to_string(),
            text: text.into(),
        });
        flushed
    }

    /// Focus left the text input: emit the buffered value if it changed.
    pub fn blur(&mut self) -> Option<Patch> {
        let pending = self.pending.take()?;
        let value = match self.field_type(pending.target, &pending.path) {
            Some(FieldType::Number) => coerce_number(&pending.text),
            _ => PropValue::Text(pending.text),
        };
        self.edit(pending.target, &pending.path, value)
    }

    /// Immediate change from a non-text control (select, toggle, color,
    /// number spinner). Returns `None` when the value is unchanged.
    ///
    /// Empty text on a style path clears the key, since absence means
    /// "no effect".
    pub fn edit(&mut self, target: PatchTarget, path: &str, value: PropValue) -> Option<Patch> {
        let value = match (target, value) {
            (PatchTarget::Style, PropValue::Text(text)) if text.trim().is_empty() => {
                PropValue::Null
            }
            (_, value) => value,
        };
        let current = get_path(self.map(target), path);
        let unchanged = match (&value, current) {
            (PropValue::Null, None) => true,
            (value, Some(current)) => value == current,
            _ => false,
        };
        if unchanged {
            return None;
        }
        let patch = Patch {
            target,
            path: path.to_string(),
            value,
        };
        let map = match target {
            PatchTarget::Props => &mut self.props,
            PatchTarget::Style => &mut self.style,
        };
        set_path(map, path, patch.value.clone());
        Some(patch)
    }

    /// List editor for an array value (a content prop, or a style path such
    /// as `gradient.stops`), created on first use.
    pub fn list(&mut self, target: PatchTarget, path: &str) -> &mut ListEditor {
        let current = get_path(
            match target {
                PatchTarget::Props => &self.props,
                PatchTarget::Style => &self.style,
            },
            path,
        );
        self.lists
            .entry((target, path.to_string()))
            .or_insert_with(|| ListEditor::new(path, current))
    }

    /// Run a list-editor action and wrap its result as a patch.
    pub fn list_action(
        &mut self,
        target: PatchTarget,
        path: &str,
        action: impl FnOnce(&mut ListEditor) -> Option<PropValue>,
    ) -> Option<Patch> {
        let value = action(self.list(target, path))?;
        let map = match target {
            PatchTarget::Props => &mut self.props,
            PatchTarget::Style => &mut self.style,
        };
        set_path(map, path, value.clone());
        Some(Patch {
            target,
            path: path.to_string(),
            value,
        })
    }
}

/// Blank text clears, otherwise the lenient inline-edit parse applies.
fn coerce_number(text: &str) -> PropValue {
    if text.trim().is_empty() {
        PropValue::Null
    } else {
        PropValue::Number(crate::inline::parse_number(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::registry;
    use crate::value::prop_map;
    use serde_json::json;

    fn hero_panel() -> (ComponentInstance, PropertiesPanel) {
        let def = registry().lookup("hero").expect("hero");
        let instance = def.instantiate();
        let panel = PropertiesPanel::new(&instance, def);
        (instance, panel)
    }

    #[test]
    fn test_content_tab_follows_schema() {
        let (_, panel) = hero_panel();
        let def = registry().lookup("hero").expect("hero");
        let keys: Vec<&str> = panel.controls().iter().map(|c| c.schema.key).collect();
        let expected: Vec<&str> = def.schema.iter().map(|f| f.key).collect();
        assert_eq!(keys, expected);
        assert!(panel.controls().iter().all(|c| c.target == PatchTarget::Props));
    }

    #[test]
    fn test_style_tabs_are_fixed() {
        let (_, mut panel) = hero_panel();
        for tab in [Tab::Style, Tab::Effects, Tab::Advanced] {
            panel.set_tab(tab);
            let controls = panel.controls();
            assert_eq!(controls.len(), style_controls(tab).len());
            assert!(controls.iter().all(|c| c.target == PatchTarget::Style));
        }
    }

    #[test]
    fn test_text_is_buffered_until_blur() {
        let (_, mut panel) = hero_panel();
        assert!(panel.type_text(PatchTarget::Props, "title", "N").is_none());
        assert!(panel.type_text(PatchTarget::Props, "title", "New").is_none());
        let title = panel
            .controls()
            .into_iter()
            .find(|c| c.schema.key == "title")
            .expect("title");
        assert_eq!(title.value, PropValue::Text("New".into()));

        let patch = panel.blur().expect("patch");
        assert_eq!(patch, Patch::props("title", "New"));
        assert!(panel.blur().is_none());
    }

    #[test]
    fn test_switching_input_flushes_previous() {
        let (_, mut panel) = hero_panel();
        panel.type_text(PatchTarget::Props, "title", "T");
        let flushed = panel
            .type_text(PatchTarget::Props, "subtitle", "S")
            .expect("flushed");
        assert_eq!(flushed.path, "title");
    }

    #[test]
    fn test_immediate_edits_and_noops() {
        let (_, mut panel) = hero_panel();
        let patch = panel
            .edit(PatchTarget::Props, "alignment", "left".into())
            .expect("patch");
        assert_eq!(patch.value, PropValue::Text("left".into()));
        assert!(panel.edit(PatchTarget::Props, "alignment", "left".into()).is_none());
    }

    #[test]
    fn test_style_number_and_clear() {
        let (mut instance, mut panel) = hero_panel();
        panel.set_tab(Tab::Effects);
        panel.type_text(PatchTarget::Style, "transform.rotateY", "15");
        let patch = panel.blur().expect("patch");
        assert_eq!(patch.value, PropValue::Number(15.0));
        patch.apply(&mut instance);
        assert_eq!(
            get_path(&instance.style, "transform.rotateY"),
            Some(&PropValue::Number(15.0))
        );

        panel.set_tab(Tab::Style);
        panel.edit(PatchTarget::Style, "padding.top", "20px".into());
        let clear = panel
            .edit(PatchTarget::Style, "padding.top", "".into())
            .expect("clear");
        assert_eq!(clear.value, PropValue::Null);
        assert!(panel.edit(PatchTarget::Style, "padding.top", " ".into()).is_none());
    }

    #[test]
    fn test_list_actions_emit_patches() {
        let def = registry().lookup("faq").expect("faq");
        let instance = def.instantiate();
        let mut panel = PropertiesPanel::new(&instance, def);
        let patch = panel
            .list_action(PatchTarget::Props, "faqs", |list| Some(list.add()))
            .expect("patch");
        assert_eq!(patch.target, PatchTarget::Props);
        assert_eq!(patch.path, "faqs");
        assert_eq!(patch.value.as_list().map(<[PropValue]>::len), Some(4));
        assert!(panel
            .list_action(PatchTarget::Props, "faqs", |list| list.move_up(0))
            .is_none());

        panel.set_tab(Tab::Advanced);
        let stops = panel
            .list_action(PatchTarget::Style, "gradient.stops", |list| Some(list.add()))
            .expect("stops");
        assert_eq!(stops.target, PatchTarget::Style);
        let first = &stops.value.as_list().expect("list")[0];
        assert!(first.as_map().expect("map").contains_key("color"));
    }

    #[test]
    fn test_sync_resets_on_other_instance() {
        let (instance, mut panel) = hero_panel();
        panel.set_tab(Tab::Advanced);
        panel.type_text(PatchTarget::Style, "customClasses", "x");

        let mut same = instance.clone();
        same.props = prop_map(json!({"title": "Changed"}));
        let def = registry().lookup("hero").expect("hero");
        panel.sync(&same, def);
        assert_eq!(panel.tab(), Tab::Advanced);

        let other = def.instantiate();
        panel.sync(&other, def);
        assert_eq!(panel.tab(), Tab::Content);
        assert_eq!(panel.component(), &other.id);
        assert!(panel.blur().is_none());
    }
}
