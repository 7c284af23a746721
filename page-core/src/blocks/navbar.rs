//! Top navigation bar.

use serde_json::json;

use super::{button, image, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("brand", "Brand Name"),
    FieldSchema::new("logo", "Logo", FieldType::Image),
    FieldSchema::new("links", "Links", FieldType::Array),
    FieldSchema::text("ctaText", "Button Text"),
    FieldSchema::text("ctaLink", "Button Link"),
    FieldSchema::new("sticky", "Sticky", FieldType::Boolean),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "navbar",
        label: "Navigation Bar",
        icon: "menu",
        category: Category::Layout,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "brand": "Brand",
        "logo": "",
        "links": [
            {"label": "Home", "url": "#"},
            {"label": "Features", "url": "#features"},
            {"label": "Pricing", "url": "#pricing"},
            {"label": "Contact", "url": "#contact"}
        ],
        "ctaText": "Sign Up",
        "ctaLink": "#",
        "sticky": false
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let brand = props.text("brand", "Brand");
    let mut brand_node = Node::el("a").class("pf-navbar-brand").attr("href", "/");
    if let Some(logo) = image(&props.text("logo", ""), &brand) {
        brand_node = brand_node.child(logo);
    }
    brand_node = brand_node.child(cx.text("span", "brand", &brand));

    let links = props.items("links").enumerate().map(|(index, link)| {
        Node::el("li").child(
            Node::el("a")
                .attr("href", link.text("url", "#"))
                .child(cx.item_text("span", "links", index, "label", &link.text("label", "Link"))),
        )
    });

    let mut nav = Node::el("nav")
        .class("pf-block pf-navbar")
        .attr_opt("data-sticky", props.flag("sticky", false).then_some("true"))
        .child(brand_node)
        .child(Node::el("ul").class("pf-navbar-links").children(links));

    if let Some(cta) = props.opt_text("ctaText") {
        nav = nav.child(button(cx, "ctaText", &cta, &props.text("ctaLink", "#"), "primary"));
    }
    nav
}
