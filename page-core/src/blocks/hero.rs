//! Full-width hero banner.

use serde_json::json;

use super::{button, image, section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::textarea("subtitle", "Subtitle"),
    FieldSchema::text("ctaText", "Button Text"),
    FieldSchema::text("ctaLink", "Button Link"),
    FieldSchema::text("secondaryCtaText", "Secondary Button Text"),
    FieldSchema::text("secondaryCtaLink", "Secondary Button Link"),
    FieldSchema::new("backgroundImage", "Background Image", FieldType::Image),
    FieldSchema::select("alignment", "Alignment", &["left", "center", "right"]),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "hero",
        label: "Hero Section",
        icon: "layout",
        category: Category::Layout,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "Build something amazing",
        "subtitle": "Create beautiful pages in minutes with our drag-and-drop builder.",
        "ctaText": "Get Started",
        "ctaLink": "#",
        "secondaryCtaText": "",
        "secondaryCtaLink": "#",
        "backgroundImage": "",
        "alignment": "center"
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let alignment = props.text("alignment", "center");
    let mut root = section("hero").attr("data-align", alignment);

    let background = props.text("backgroundImage", "");
    if let Some(img) = image(&background, "") {
        root = root.child(
            Node::el("div")
                .class("pf-hero-background")
                .attr("aria-hidden", "true")
                .child(img),
        );
    }

    let mut content = Node::el("div")
        .class("pf-hero-content")
        .child(cx.text("h1", "title", &props.text("title", "Build something amazing")));
    if let Some(subtitle) = props.opt_text("subtitle") {
        content = content.child(cx.multiline("p", "subtitle", &subtitle));
    }

    let mut actions = Node::el("div").class("pf-hero-actions");
    let cta = props.text("ctaText", "Get Started");
    if !cta.is_empty() {
        let link = props.text("ctaLink", "#");
        actions = actions.child(button(cx, "ctaText", &cta, &link, "primary"));
    }
    if let Some(secondary) = props.opt_text("secondaryCtaText") {
        actions = actions.child(button(
            cx,
            "secondaryCtaText",
            &secondary,
            &props.text("secondaryCtaLink", "#"),
            "secondary",
        ));
    }

    root.child(content.child(actions))
}
