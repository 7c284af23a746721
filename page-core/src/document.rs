//! Persisted page document.
//!
//! The JSON shape exchanged with the persistence collaborator:
//!
//! ```json
//! {
//!   "id": "home",
//!   "title": "Home",
//!   "slug": "home",
//!   "published": true,
//!   "components": [
//!     {"id": "c1", "type": "hero", "order": 0, "props": {"title": "Hi"}, "style": {}}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::component::{renumber, ComponentInstance};
use crate::error::{PageError, PageResult};

/// A page: metadata plus its ordered component list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Page identifier.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Public URL slug.
    #[serde(default)]
    pub slug: String,
    /// Whether the public view serves this page.
    #[serde(default)]
    pub published: bool,
    /// Components in page order.
    #[serde(default)]
    pub components: Vec<ComponentInstance>,
    /// Last save time, Unix milliseconds.
    #[serde(default)]
    pub updated_at: u64,
}

impl PageDocument {
    /// An empty, unpublished page whose slug equals its id.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            slug: id.clone(),
            id,
            title: title.into(),
            published: false,
            components: Vec::new(),
            updated_at: 0,
        }
    }

    /// Replace the component list.
    #[must_use]
    pub fn with_components(mut self, components: Vec<ComponentInstance>) -> Self {
        self.components = components;
        self
    }

    /// Set the published flag.
    #[must_use]
    pub const fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    /// Put components into stored `order` (stable for ties) and renumber
    /// them to match position.
    pub fn normalize(&mut self) {
        normalize_components(&mut self.components);
    }

    /// Lightweight listing entry.
    #[must_use]
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            published: self.published,
            component_count: self.components.len(),
            updated_at: self.updated_at,
        }
    }

    /// Parse from JSON and normalize.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Serialization`] if the JSON does not describe a page.
    pub fn from_json(json: &str) -> PageResult<Self> {
        let mut doc: Self = serde_json::from_str(json)?;
        doc.normalize();
        Ok(doc)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> PageResult<String> {
        serde_json::to_string_pretty(self).map_err(PageError::from)
    }
}

/// Sort by stored `order` (stable) then renumber to position.
pub fn normalize_components(components: &mut [ComponentInstance]) {
    components.sort_by_key(|c| c.order);
    renumber(components);
}

/// Page listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Page identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Public URL slug.
    pub slug: String,
    /// Whether the page is public.
    pub published: bool,
    /// Number of components.
    pub component_count: usize,
    /// Last save time, Unix milliseconds.
    pub updated_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_sorts_and_renumbers() {
        let doc = PageDocument::from_json(
            r#"{
                "id": "home",
                "components": [
                    {"id": "b", "type": "footer", "order": 5},
                    {"id": "a", "type": "hero", "order": 1, "styles": {"color": "red"}},
                    {"id": "c", "type": "cta", "order": 5}
                ]
            }"#,
        )
        .expect("parse");
        let ids: Vec<&str> = doc.components.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        let orders: Vec<u32> = doc.components.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert!(doc.components[0].style.contains_key("color"));
        assert!(!doc.published);
    }

    #[test]
    fn test_new_defaults_slug_to_id() {
        let doc = PageDocument::new("about", "About");
        assert_eq!(doc.slug, "about");
        let summary = doc.with_published(true).summary();
        assert!(summary.published);
        assert_eq!(summary.component_count, 0);
    }

    #[test]
    fn test_json_roundtrip_uses_type_key() {
        let doc = PageDocument::new("p", "P")
            .with_components(vec![ComponentInstance::new("hero", Default::default())]);
        let json = doc.to_json().expect("json");
        assert!(json.contains("\"type\": \"hero\""));
        assert_eq!(PageDocument::from_json(&json).expect("parse"), doc);
    }

    #[test]
    fn test_from_json_rejects_non_page() {
        let err = PageDocument::from_json(r#"{"title": "no id"}"#).expect_err("missing id");
        assert!(matches!(err, PageError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
