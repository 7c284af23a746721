//! Pricing tiers.

use serde_json::json;

use super::{header, section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::textarea("subtitle", "Subtitle"),
    FieldSchema::text("currency", "Currency Symbol"),
    FieldSchema::new("plans", "Plans", FieldType::Array),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "pricing",
        label: "Pricing Table",
        icon: "credit-card",
        category: Category::Marketing,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "Pricing Plans",
        "subtitle": "Choose the plan that fits your team.",
        "currency": "$",
        "plans": [
            {
                "name": "Starter",
                "price": 0,
                "period": "month",
                "features": ["1 site", "Community support"],
                "buttonText": "Start free",
                "buttonLink": "#",
                "highlighted": false
            },
            {
                "name": "Pro",
                "price": 29,
                "period": "month",
                "features": ["10 sites", "Custom domains", "Priority support"],
                "buttonText": "Go Pro",
                "buttonLink": "#",
                "highlighted": true
            },
            {
                "name": "Business",
                "price": 99,
                "period": "month",
                "features": ["Unlimited sites", "Team seats", "SLA"],
                "buttonText": "Contact sales",
                "buttonLink": "#",
                "highlighted": false
            }
        ]
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let currency = props.text("currency", "$");
    let plans = props.items("plans").enumerate().map(|(index, plan)| {
        let highlighted = plan.flag("highlighted", false);
        let features = plan
            .strings("features")
            .into_iter()
            .map(|feature| Node::el("li").with_text(feature));
        let price = Node::el("p")
            .class("pf-price")
            .child(Node::el("span").class("pf-currency").with_text(currency.as_ref()))
            .child(cx.item_text("span", "plans", index, "price", &plan.text("price", "0")))
            .child(
                Node::el("span")
                    .class("pf-period")
                    .with_text(format!("/{}", plan.text("period", "month"))),
            );
        Node::el("article")
            .class(if highlighted { "pf-plan pf-plan-highlighted" } else { "pf-plan" })
            .child(cx.item_text("h3", "plans", index, "name", &plan.text("name", "Plan")))
            .child(price)
            .child(Node::el("ul").class("pf-plan-features").children(features))
            .child(
                Node::el("a")
                    .class("pf-button pf-button-primary")
                    .attr("href", plan.text("buttonLink", "#"))
                    .child(cx.item_text(
                        "span",
                        "plans",
                        index,
                        "buttonText",
                        &plan.text("buttonText", "Choose"),
                    )),
            )
    });

    section("pricing")
        .attr("id", "pricing")
        .child(header(cx, props, "Pricing Plans", ""))
        .child(Node::el("div").class("pf-plans").children(plans))
}
