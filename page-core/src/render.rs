//! Page renderer.
//!
//! Turns an ordered component list into markup: each instance is looked up
//! in the registry, its style descriptor compiled onto a wrapping container,
//! and its block rendered inside. Unknown types render nothing and never
//! disturb their siblings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::blocks::{BlockContext, RenderMode};
use crate::component::{ComponentId, ComponentInstance};
use crate::inline::InlineEditor;
use crate::markup::{to_html, Node, TrustPolicy};
use crate::registry::{registry, Registry};
use crate::style::{compile_style, keyframes, CompiledStyle};

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Display or author output.
    pub mode: RenderMode,
    /// Whether raw HTML and custom CSS are emitted.
    pub trust: TrustPolicy,
    /// Whether timers and scroll effects are live.
    pub interactive: bool,
    /// Component drawn as selected (author mode).
    #[serde(default)]
    pub selected: Option<ComponentId>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(RenderMode::Display)
    }
}

impl RenderOptions {
    /// Options for `mode`; interactive unless authoring.
    #[must_use]
    pub const fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            trust: TrustPolicy::Untrusted,
            interactive: !mode.is_author(),
            selected: None,
        }
    }

    /// Public, read-only output.
    #[must_use]
    pub const fn display() -> Self {
        Self::new(RenderMode::Display)
    }

    /// Authoring output.
    #[must_use]
    pub const fn author() -> Self {
        Self::new(RenderMode::Author)
    }

    /// Set the trust policy.
    #[must_use]
    pub const fn with_trust(mut self, trust: TrustPolicy) -> Self {
        self.trust = trust;
        self
    }

    /// Override the interactive flag.
    #[must_use]
    pub const fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Mark a component as selected.
    #[must_use]
    pub fn with_selected(mut self, selected: Option<ComponentId>) -> Self {
        self.selected = selected;
        self
    }
}

/// Result of rendering a page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    /// Root `div.pf-page` node.
    pub root: Node,
    /// Number of blocks rendered.
    pub rendered: usize,
    /// Types that were skipped because the registry doesn't know them.
    pub skipped: Vec<String>,
    trust: TrustPolicy,
}

impl RenderedPage {
    /// Serialize under the policy the page was rendered with.
    #[must_use]
    pub fn html(&self) -> String {
        to_html(&self.root, self.trust)
    }
}

/// Renders component lists against a registry.
#[derive(Debug, Clone)]
pub struct PageRenderer<'a> {
    registry: &'a Registry,
    options: RenderOptions,
    editor: Option<&'a InlineEditor>,
}

impl PageRenderer<'static> {
    /// Renderer over the built-in registry.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            registry: registry(),
            options,
            editor: None,
        }
    }
}

impl<'a> PageRenderer<'a> {
    /// Renderer over a custom registry.
    #[must_use]
    pub const fn with_registry(registry: &'a Registry, options: RenderOptions) -> Self {
        Self {
            registry,
            options,
            editor: None,
        }
    }

    /// Open in-place editor on the selected component.
    #[must_use]
    pub const fn with_editor(mut self, editor: Option<&'a InlineEditor>) -> Self {
        self.editor = editor;
        self
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the page.
    #[must_use]
    pub fn render(&self, components: &[ComponentInstance]) -> RenderedPage {
        let author = self.options.mode.is_author();
        let mut blocks = Vec::with_capacity(components.len());
        let mut skipped = Vec::new();
        let mut rules = Vec::new();
        let mut animations = BTreeSet::new();

        for (index, instance) in components.iter().enumerate() {
            let Some(definition) = self.registry.lookup(&instance.component_type) else {
                tracing::debug!(
                    component_id = %instance.id,
                    component_type = %instance.component_type,
                    "skipping unknown component type"
                );
                skipped.push(instance.component_type.clone());
                continue;
            };

            let selected = self.options.selected.as_ref() == Some(&instance.id);
            let editor = if selected { self.editor } else { None };
            let cx = BlockContext::new(self.options.mode)
                .with_interactive(self.options.interactive)
                .with_editor(editor);

            let compiled = compile_style(&instance.style);
            let scope = scope_class(&instance.id, index);
            if let Some(rule) = compiled.hover_rule(&format!(".{scope}")) {
                rules.push(rule);
            }
            if let Some(name) = &compiled.animation {
                animations.insert(name.clone());
            }

            let body = definition.render(&instance.props, &cx);
            let mut wrapper = self.wrapper(instance, &compiled, &scope, selected);
            if author {
                wrapper = wrapper
                    .attr("data-pf-action", "select")
                    .attr("data-pf-index", index.to_string())
                    .child(toolbar(definition.label, index));
            }
            blocks.push(wrapper.child(body));
        }

        let mut root = Node::el("div")
            .class("pf-page")
            .attr("data-mode", if author { "author" } else { "display" });
        let css = stylesheet(&rules, &animations);
        if !css.is_empty() {
            root = root.child(Node::el("style").with_text(css));
        }
        if author && blocks.is_empty() {
            root = root.child(
                Node::el("div")
                    .class("pf-empty")
                    .with_text("Add a component to get started"),
            );
        }
        let rendered = blocks.len();
        RenderedPage {
            root: root.children(blocks),
            rendered,
            skipped,
            trust: self.options.trust,
        }
    }

    fn wrapper(
        &self,
        instance: &ComponentInstance,
        compiled: &CompiledStyle,
        scope: &str,
        selected: bool,
    ) -> Node {
        let mut classes = vec!["pf-component".to_string(), scope.to_string()];
        classes.extend(compiled.class_names.iter().cloned());
        if selected && self.options.mode.is_author() {
            classes.push("pf-selected".to_string());
        }
        let css = compiled.inline_css(self.options.trust.allows_raw());
        let style = (!css.is_empty()).then_some(css);
        Node::el("div")
            .class(classes.join(" "))
            .attr("data-component-id", instance.id.as_str())
            .attr("data-component-type", instance.component_type.as_str())
            .attr_opt("style", style)
    }
}

/// Render with the built-in registry.
#[must_use]
pub fn render_page(components: &[ComponentInstance], options: &RenderOptions) -> RenderedPage {
    PageRenderer::new(options.clone()).render(components)
}

fn toolbar(label: &str, index: usize) -> Node {
    let button = |action: &str, text: &str| {
        Node::el("button")
            .attr("type", "button")
            .class(format!("pf-action pf-action-{action}"))
            .attr("data-pf-action", action)
            .attr("data-pf-index", index.to_string())
            .with_text(text)
    };
    Node::el("div")
        .class("pf-toolbar")
        .child(
            button("drag", "\u{2630}")
                .attr("draggable", "true")
                .attr("title", "Drag to reorder"),
        )
        .child(Node::el("span").class("pf-toolbar-label").with_text(label))
        .child(button("duplicate", "Duplicate"))
        .child(button("delete", "Delete"))
}

/// Class name scoping hover rules to one wrapper.
fn scope_class(id: &ComponentId, index: usize) -> String {
    let slug: String = id
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(36)
        .collect();
    if slug.is_empty() {
        format!("pf-c-{index}")
    } else {
        format!("pf-c-{slug}")
    }
}

fn stylesheet(rules: &[String], animations: &BTreeSet<String>) -> String {
    let mut css: Vec<&str> = animations.iter().filter_map(|name| keyframes(name)).collect();
    css.extend(rules.iter().map(String::as_str));
    css.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::prop_map;
    use serde_json::json;

    fn hero(title: &str) -> ComponentInstance {
        ComponentInstance::new("hero", prop_map(json!({"title": title}))).with_id("h1")
    }

    #[test]
    fn test_unknown_type_skipped() {
        let components = vec![
            hero("A"),
            ComponentInstance::new("doesNotExist", Default::default()),
            ComponentInstance::new("footer", Default::default()),
        ];
        let page = render_page(&components, &RenderOptions::display());
        assert_eq!(page.rendered, 2);
        assert_eq!(page.skipped, vec!["doesNotExist"]);
        assert_eq!(page.html().matches("data-component-id=").count(), 2);
    }

    #[test]
    fn test_wrapper_carries_compiled_style() {
        let instance = hero("A").with_style(prop_map(json!({
            "backgroundColor": "#fff",
            "customClasses": "wide dark",
            "hover": {"scale": 1.05}
        })));
        let page = render_page(&[instance], &RenderOptions::display());
        let html = page.html();
        assert!(html.contains("background-color: #fff;"));
        assert!(html.contains("class=\"pf-component pf-c-h1 wide dark\""));
        assert!(html.contains(".pf-c-h1:hover"));
        assert!(html.contains("data-component-type=\"hero\""));
    }

    #[test]
    fn test_custom_css_follows_trust() {
        let instance = hero("A").with_style(prop_map(json!({"customCSS": "outline: 1px solid red;"})));
        let untrusted = render_page(&[instance.clone()], &RenderOptions::display()).html();
        assert!(!untrusted.contains("outline"));
        let trusted = render_page(
            &[instance],
            &RenderOptions::display().with_trust(TrustPolicy::Trusted),
        )
        .html();
        assert!(trusted.contains("outline: 1px solid red;"));
    }

    #[test]
    fn test_hover_values_cannot_break_out_of_rule() {
        let instance = hero("A").with_style(prop_map(json!({
            "hover": {"color": "red } body { display: none } .x {", "scale": 1.1},
            "color": "blue; } body { display: none"
        })));
        for trust in [TrustPolicy::Untrusted, TrustPolicy::Trusted] {
            let options = RenderOptions::display().with_trust(trust);
            let html = render_page(&[instance.clone()], &options).html();
            assert!(!html.contains("body { display: none }"), "{html}");
            assert!(!html.contains("display: none"));
            assert!(html.contains(".pf-c-h1:hover { transform: scale(1.1); }"));
        }
    }

    #[test]
    fn test_only_referenced_keyframes_emitted() {
        let instance = hero("A").with_style(prop_map(json!({"animation": {"type": "fadeIn"}})));
        let html = render_page(&[instance], &RenderOptions::display()).html();
        assert!(html.contains("@keyframes fadeIn"));
        assert!(!html.contains("@keyframes spin"));

        let plain = render_page(&[hero("A")], &RenderOptions::display()).html();
        assert!(!plain.contains("<style>"));
    }

    #[test]
    fn test_author_affordances() {
        let options = RenderOptions::author().with_selected(Some(ComponentId::from("h1")));
        let page = render_page(&[hero("A")], &options);
        let html = page.html();
        assert!(html.contains("pf-selected"));
        assert!(html.contains("data-pf-action=\"duplicate\""));
        assert!(html.contains("data-pf-action=\"delete\""));
        assert!(html.contains("draggable=\"true\""));
        assert!(html.contains("data-pf-field=\"title\""));

        let display = render_page(&[hero("A")], &RenderOptions::display()).html();
        assert!(!display.contains("data-pf-action"));
    }

    #[test]
    fn test_editor_applies_to_selected_only() {
        let mut editor = InlineEditor::new("title", crate::inline::FieldKind::Text, "A".into());
        editor.click(RenderMode::Author);
        editor.input("Draft");
        let components = vec![hero("A"), hero("Other").with_id("h2")];
        let options = RenderOptions::author().with_selected(Some(ComponentId::from("h1")));
        let page = PageRenderer::new(options).with_editor(Some(&editor)).render(&components);
        let html = page.html();
        assert_eq!(html.matches("data-pf-editing=\"true\"").count(), 1);
        assert!(html.contains("value=\"Draft\""));
    }

    #[test]
    fn test_empty_page() {
        let author = render_page(&[], &RenderOptions::author());
        assert_eq!(author.rendered, 0);
        assert!(author.html().contains("pf-empty"));
        let display = render_page(&[], &RenderOptions::display()).html();
        assert_eq!(display, "<div class=\"pf-page\" data-mode=\"display\"></div>");
    }
}
