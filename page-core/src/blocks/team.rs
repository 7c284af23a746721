//! Team members.

use serde_json::json;

use super::{columns, header, image, section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::textarea("subtitle", "Subtitle"),
    FieldSchema::new("columns", "Columns", FieldType::Number),
    FieldSchema::new("members", "Members", FieldType::Array),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "team",
        label: "Team",
        icon: "users",
        category: Category::Content,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "Meet the team",
        "subtitle": "",
        "columns": 3,
        "members": [
            {"name": "Alex Morgan", "role": "CEO", "photo": "", "bio": "Sets the direction.", "social": []},
            {"name": "Sam Lee", "role": "CTO", "photo": "", "bio": "Builds the platform.", "social": []},
            {"name": "Jordan Kim", "role": "Designer", "photo": "", "bio": "Makes it beautiful.", "social": []}
        ]
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let cards = props.items("members").enumerate().map(|(index, member)| {
        let name = member.text("name", "Team member");
        let mut card = Node::el("article").class("pf-member");
        if let Some(photo) = image(&member.text("photo", ""), &name) {
            card = card.child(photo);
        }
        card = card
            .child(cx.item_text("h3", "members", index, "name", &name))
            .child(cx.item_text("p", "members", index, "role", &member.text("role", "")));
        if let Some(bio) = member.opt_text("bio") {
            card = card.child(cx.item_multiline("p", "members", index, "bio", &bio));
        }
        let social: Vec<Node> = member
            .strings("social")
            .into_iter()
            .map(|url| Node::el("li").child(Node::el("a").attr("href", url.clone()).with_text(url)))
            .collect();
        if !social.is_empty() {
            card = card.child(Node::el("ul").class("pf-social").children(social));
        }
        card
    });

    section("team")
        .child(header(cx, props, "Meet the team", ""))
        .child(
            Node::el("div")
                .class("pf-grid")
                .attr("data-columns", columns(props, 3.0).to_string())
                .children(cards),
        )
}
