//! Page footer.

use serde_json::json;

use super::BlockContext;
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("brand", "Brand Name"),
    FieldSchema::textarea("tagline", "Tagline"),
    FieldSchema::new("links", "Links", FieldType::Array),
    FieldSchema::text("copyright", "Copyright"),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "footer",
        label: "Footer",
        icon: "align-bottom",
        category: Category::Layout,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "brand": "Brand",
        "tagline": "Pages that work as hard as you do.",
        "links": [
            {"label": "Privacy", "url": "/privacy"},
            {"label": "Terms", "url": "/terms"},
            {"label": "Contact", "url": "/contact"}
        ],
        "copyright": "\u{a9} Brand. All rights reserved."
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let mut brand = Node::el("div")
        .class("pf-footer-brand")
        .child(cx.text("strong", "brand", &props.text("brand", "Brand")));
    if let Some(tagline) = props.opt_text("tagline") {
        brand = brand.child(cx.multiline("p", "tagline", &tagline));
    }

    let links = props.items("links").enumerate().map(|(index, link)| {
        Node::el("li").child(
            Node::el("a")
                .attr("href", link.text("url", "#"))
                .child(cx.item_text("span", "links", index, "label", &link.text("label", "Link"))),
        )
    });

    Node::el("footer")
        .class("pf-block pf-footer")
        .child(brand)
        .child(Node::el("ul").class("pf-footer-links").children(links))
        .child(cx.text(
            "small",
            "copyright",
            &props.text("copyright", "\u{a9} All rights reserved."),
        ))
}
