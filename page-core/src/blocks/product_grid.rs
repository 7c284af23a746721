//! Product catalog with category filter and sort.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{columns, header, image, section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{format_number, prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::textarea("subtitle", "Subtitle"),
    FieldSchema::text("currency", "Currency Symbol"),
    FieldSchema::new("columns", "Columns", FieldType::Number),
    FieldSchema::new("showFilters", "Show Filters", FieldType::Boolean),
    FieldSchema::new("products", "Products", FieldType::Array),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "product_grid",
        label: "Product Grid",
        icon: "shopping-bag",
        category: Category::Commerce,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "Our Products",
        "subtitle": "",
        "currency": "$",
        "columns": 3,
        "showFilters": true,
        "products": [
            {"productName": "Classic Tee", "price": 25, "category": "Apparel", "image": "", "description": "Soft cotton t-shirt.", "buttonText": "Add to cart", "link": "#"},
            {"productName": "Canvas Tote", "price": 18, "category": "Accessories", "image": "", "description": "Carry everything.", "buttonText": "Add to cart", "link": "#"},
            {"productName": "Hoodie", "price": 55, "category": "Apparel", "image": "", "description": "Warm and cozy.", "buttonText": "Add to cart", "link": "#"}
        ]
    }))
}

/// Product ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Authored order.
    #[default]
    Featured,
    /// Name A to Z.
    NameAsc,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

/// Local filter and sort selection of a product grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogView {
    category: Option<String>,
    sort: SortOrder,
}

impl CatalogView {
    /// Show every category in authored order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one category; `None` or `"all"` clears the filter.
    pub fn set_category(&mut self, category: Option<&str>) {
        self.category = category
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
            .map(str::to_string);
    }

    /// Change the sort order.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    /// Active category filter.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(products: &[Props<'_>]) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for product in products {
            if let Some(category) = product.opt_text("category") {
                if !seen.iter().any(|c| c == category.as_ref()) {
                    seen.push(category.into_owned());
                }
            }
        }
        seen
    }

    /// Filter then sort `products`. The sort is stable.
    #[must_use]
    pub fn apply<'a>(&self, products: &[Props<'a>]) -> Vec<Props<'a>> {
        let mut visible: Vec<Props<'a>> = products
            .iter()
            .filter(|p| match &self.category {
                Some(category) => p.text("category", "") == category.as_str(),
                None => true,
            })
            .copied()
            .collect();
        match self.sort {
            SortOrder::Featured => {}
            SortOrder::NameAsc => visible.sort_by(|a, b| {
                a.text("productName", "")
                    .to_lowercase()
                    .cmp(&b.text("productName", "").to_lowercase())
            }),
            SortOrder::PriceAsc => visible.sort_by(|a, b| price_cmp(a, b)),
            SortOrder::PriceDesc => visible.sort_by(|a, b| price_cmp(b, a)),
        }
        visible
    }
}

fn price_cmp(a: &Props<'_>, b: &Props<'_>) -> Ordering {
    a.number("price", 0.0).total_cmp(&b.number("price", 0.0))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let currency = props.text("currency", "$");
    let products: Vec<Props<'_>> = props.items("products").collect();

    let mut root = section("product_grid").child(header(cx, props, "Our Products", ""));

    if props.flag("showFilters", true) {
        let options = std::iter::once("All".to_string())
            .chain(CatalogView::categories(&products))
            .map(|category| Node::el("option").attr("value", category.clone()).with_text(category));
        root = root.child(
            Node::el("div")
                .class("pf-catalog-controls")
                .child(Node::el("select").attr("data-pf-filter", "category").children(options))
                .child(
                    Node::el("select").attr("data-pf-filter", "sort").children(
                        [
                            ("featured", "Featured"),
                            ("name-asc", "Name"),
                            ("price-asc", "Price: low to high"),
                            ("price-desc", "Price: high to low"),
                        ]
                        .into_iter()
                        .map(|(value, label)| {
                            Node::el("option").attr("value", value).with_text(label)
                        }),
                    ),
                ),
        );
    }

    // Authored order is the initial view; the index is the item's position in `products`.
    let cards = products.iter().enumerate().map(|(index, product)| {
        let name = product.text("productName", "Product");
        let mut card = Node::el("article")
            .class("pf-product")
            .attr_opt("data-category", product.opt_text("category"));
        if let Some(img) = image(&product.text("image", ""), &name) {
            card = card.child(img);
        }
        let price = format_number(product.number("price", 0.0));
        card.child(cx.item_text("h3", "products", index, "productName", &name))
            .child(
                Node::el("p")
                    .class("pf-price")
                    .with_text(format!("{currency}{price}")),
            )
            .child(cx.item_multiline(
                "p",
                "products",
                index,
                "description",
                &product.text("description", ""),
            ))
            .child(
                Node::el("a")
                    .class("pf-button pf-button-primary")
                    .attr("href", product.text("link", "#"))
                    .with_text(product.text("buttonText", "Add to cart")),
            )
    });

    root.child(
        Node::el("div")
            .class("pf-grid")
            .attr("data-columns", columns(props, 3.0).to_string())
            .children(cards),
    )
}
