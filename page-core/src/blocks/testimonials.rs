//! Customer testimonials.

use serde_json::json;

use super::{columns, header, image, section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::textarea("subtitle", "Subtitle"),
    FieldSchema::new("columns", "Columns", FieldType::Number),
    FieldSchema::new("testimonials", "Testimonials", FieldType::Array),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "testimonials",
        label: "Testimonials",
        icon: "message-circle",
        category: Category::Marketing,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "What our customers say",
        "subtitle": "",
        "columns": 2,
        "testimonials": [
            {
                "quote": "We shipped our new landing page in an afternoon.",
                "author": "Jane Cooper",
                "role": "Marketing Lead, Acme",
                "avatar": "",
                "rating": 5
            },
            {
                "quote": "The easiest page builder our team has used.",
                "author": "Leslie Alexander",
                "role": "Founder, Northwind",
                "avatar": "",
                "rating": 5
            }
        ]
    }))
}

/// Star rating clamped to 0..=5.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(5 - filled))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let cards = props.items("testimonials").enumerate().map(|(index, item)| {
        let author = item.text("author", "Anonymous");
        let mut figure = Node::el("figure").class("pf-testimonial");
        let rating = item.number("rating", 0.0);
        if rating > 0.0 {
            figure = figure.child(
                Node::el("div")
                    .class("pf-rating")
                    .attr("aria-label", format!("{rating} out of 5"))
                    .with_text(stars(rating)),
            );
        }
        let mut caption = Node::el("figcaption");
        if let Some(avatar) = image(&item.text("avatar", ""), &author) {
            caption = caption.child(avatar.class("pf-avatar"));
        }
        caption = caption.child(cx.item_text("strong", "testimonials", index, "author", &author));
        if let Some(role) = item.opt_text("role") {
            caption = caption.child(cx.item_text("span", "testimonials", index, "role", &role));
        }
        figure
            .child(
                Node::el("blockquote").child(cx.item_multiline(
                    "p",
                    "testimonials",
                    index,
                    "quote",
                    &item.text("quote", ""),
                )),
            )
            .child(caption)
    });

    section("testimonials")
        .child(header(cx, props, "What our customers say", ""))
        .child(
            Node::el("div")
                .class("pf-grid")
                .attr("data-columns", columns(props, 2.0).to_string())
                .children(cards),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_clamped() {
        assert_eq!(stars(3.4), "\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}");
        assert_eq!(stars(12.0).chars().count(), 5);
        assert_eq!(stars(-1.0), "\u{2606}".repeat(5));
    }
}
