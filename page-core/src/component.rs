//! Component instances - the placed blocks that make up a page.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value::{PropMap, PropValue};

/// Opaque, stable identifier of a placed component.
///
/// New ids are UUIDs, but any non-empty string coming from storage is
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Create a new unique component ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One placed block on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstance {
    /// Unique identifier, stable for the life of the instance.
    #[serde(default)]
    pub id: ComponentId,
    /// Registry key. Immutable after creation.
    #[serde(rename = "type")]
    pub component_type: String,
    /// Position hint for the external store; the list position is authoritative.
    #[serde(default)]
    pub order: u32,
    /// Content props.
    #[serde(default)]
    pub props: PropMap,
    /// Style descriptor. Older records call this `styles`.
    #[serde(default, alias = "styles")]
    pub style: PropMap,
}

impl ComponentInstance {
    /// Create an instance of `component_type` with the given props and no style.
    #[must_use]
    pub fn new(component_type: impl Into<String>, props: PropMap) -> Self {
        Self {
            id: ComponentId::new(),
            component_type: component_type.into(),
            order: 0,
            props,
            style: PropMap::new(),
        }
    }

    /// Set the style descriptor.
    #[must_use]
    pub fn with_style(mut self, style: PropMap) -> Self {
        self.style = style;
        self
    }

    /// Set the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    /// A copy with a fresh id and identical type, props and style.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            id: ComponentId::new(),
            ..self.clone()
        }
    }

    /// Read a single prop.
    #[must_use]
    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }
}

/// Rewrite `order` so it matches list position.
pub fn renumber(components: &mut [ComponentInstance]) {
    for (index, component) in components.iter_mut().enumerate() {
        component.order = u32::try_from(index).unwrap_or(u32::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::prop_map;
    use serde_json::json;

    #[test]
    fn test_duplicate_has_new_identity() {
        let original = ComponentInstance::new("hero", prop_map(json!({"title": "A"})))
            .with_style(prop_map(json!({"color": "red"})));
        let copy = original.duplicate();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.component_type, original.component_type);
        assert_eq!(copy.props, original.props);
        assert_eq!(copy.style, original.style);
    }

    #[test]
    fn test_deserialize_accepts_styles_alias() {
        let instance: ComponentInstance = serde_json::from_value(json!({
            "id": "legacy-1",
            "type": "hero",
            "order": 3,
            "props": {"title": "Old"},
            "styles": {"color": "blue"}
        }))
        .expect("parse");
        assert_eq!(instance.id.as_str(), "legacy-1");
        assert_eq!(instance.order, 3);
        assert!(instance.style.contains_key("color"));
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let instance: ComponentInstance =
            serde_json::from_value(json!({"type": "footer"})).expect("parse");
        assert!(!instance.id.as_str().is_empty());
        assert!(instance.props.is_empty());
        assert!(instance.style.is_empty());
    }

    #[test]
    fn test_renumber_follows_position() {
        let mut list = vec![
            ComponentInstance::new("a", PropMap::new()),
            ComponentInstance::new("b", PropMap::new()),
        ];
        list[0].order = 9;
        renumber(&mut list);
        assert_eq!(list[0].order, 0);
        assert_eq!(list[1].order, 1);
    }
}
