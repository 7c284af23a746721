//! Per-item schemas for array props.
//!
//! Keyed by the array prop's *field name*, not by component type, so every
//! block with a `links` or `features` prop shares one item form.

use crate::registry::{FieldSchema, FieldType};
use crate::value::PropMap;

const FEATURE: &[FieldSchema] = &[
    FieldSchema::text("icon", "Icon"),
    FieldSchema::text("title", "Title"),
    FieldSchema::textarea("description", "Description"),
];

const TESTIMONIAL: &[FieldSchema] = &[
    FieldSchema::textarea("quote", "Quote"),
    FieldSchema::text("author", "Author"),
    FieldSchema::text("role", "Role"),
    FieldSchema::new("avatar", "Avatar", FieldType::Image),
    FieldSchema::new("rating", "Rating", FieldType::Number),
];

const PLAN: &[FieldSchema] = &[
    FieldSchema::text("name", "Name"),
    FieldSchema::new("price", "Price", FieldType::Number),
    FieldSchema::select("period", "Period", &["month", "year", "once"]),
    FieldSchema::new("features", "Features", FieldType::StringList),
    FieldSchema::text("buttonText", "Button Text"),
    FieldSchema::text("buttonLink", "Button Link"),
    FieldSchema::new("highlighted", "Highlighted", FieldType::Boolean),
];

const FAQ: &[FieldSchema] = &[
    FieldSchema::text("question", "Question"),
    FieldSchema::textarea("answer", "Answer"),
];

const PRODUCT: &[FieldSchema] = &[
    FieldSchema::text("productName", "Product Name"),
    FieldSchema::new("price", "Price", FieldType::Number),
    FieldSchema::text("category", "Category"),
    FieldSchema::new("image", "Image", FieldType::Image),
    FieldSchema::textarea("description", "Description"),
    FieldSchema::text("buttonText", "Button Text"),
    FieldSchema::text("link", "Link"),
];

const SLIDE: &[FieldSchema] = &[
    FieldSchema::new("image", "Image", FieldType::Image),
    FieldSchema::text("heading", "Heading"),
    FieldSchema::textarea("caption", "Caption"),
];

const STAT: &[FieldSchema] = &[
    FieldSchema::text("value", "Value"),
    FieldSchema::text("label", "Label"),
];

const LINK: &[FieldSchema] = &[
    FieldSchema::text("label", "Label"),
    FieldSchema::text("url", "URL"),
];

const MEMBER: &[FieldSchema] = &[
    FieldSchema::text("name", "Name"),
    FieldSchema::text("role", "Role"),
    FieldSchema::new("photo", "Photo", FieldType::Image),
    FieldSchema::textarea("bio", "Bio"),
    FieldSchema::new("social", "Social Links", FieldType::StringList),
];

const IMAGE: &[FieldSchema] = &[
    FieldSchema::new("src", "Image", FieldType::Image),
    FieldSchema::text("alt", "Alt Text"),
    FieldSchema::text("caption", "Caption"),
];

const GRADIENT_STOP: &[FieldSchema] = &[
    FieldSchema::new("color", "Color", FieldType::Color),
    FieldSchema::text("position", "Position"),
];

static CATALOG: &[(&str, &[FieldSchema])] = &[
    ("features", FEATURE),
    ("testimonials", TESTIMONIAL),
    ("plans", PLAN),
    ("faqs", FAQ),
    ("products", PRODUCT),
    ("slides", SLIDE),
    ("stats", STAT),
    ("links", LINK),
    ("members", MEMBER),
    ("images", IMAGE),
    ("stops", GRADIENT_STOP),
];

/// Item schema for an array prop, if one is registered.
#[must_use]
pub fn item_schema(field: &str) -> Option<&'static [FieldSchema]> {
    CATALOG
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, schema)| *schema)
}

/// Every registered array field name.
pub fn field_names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(name, _)| *name)
}

/// A new item with each field at its type's empty value.
#[must_use]
pub fn empty_item(schema: &[FieldSchema]) -> PropMap {
    schema
        .iter()
        .map(|field| (field.key.to_string(), field.field_type.empty_value()))
        .collect()
}
