//! Generic editor for one array-typed prop.
//!
//! Works on a local copy of the list. Every mutating call returns the new
//! full list so the caller can emit it as a single prop patch; `None` means
//! nothing changed.

use crate::item_schema::{empty_item, item_schema};
use crate::registry::{FieldSchema, FieldType};
use crate::value::{PropMap, PropValue};

/// Field names probed, in order, for an item's collapsed label.
pub const LABEL_KEYS: [&str; 6] = ["title", "name", "label", "question", "productName", "heading"];

/// Label used when an item has no usable text.
pub const FALLBACK_LABEL: &str = "Item";

/// One control in an expanded item's form.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemField {
    /// Schema entry driving the control.
    pub schema: FieldSchema,
    /// Current value. Nested lists are shown as comma-separated text.
    pub value: PropValue,
}

/// Add/remove/reorder/edit state for one array prop.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEditor {
    field: String,
    schema: Option<&'static [FieldSchema]>,
    items: Vec<PropValue>,
    expanded: Option<usize>,
}

impl ListEditor {
    /// Editor for `field`, seeded from its current value. A non-list value
    /// reads as empty. For a dotted path the last segment selects the item
    /// schema.
    #[must_use]
    pub fn new(field: impl Into<String>, current: Option<&PropValue>) -> Self {
        let field = field.into();
        Self {
            schema: field.rsplit('.').next().and_then(item_schema),
            field,
            items: current
                .and_then(PropValue::as_list)
                .map(<[PropValue]>::to_vec)
                .unwrap_or_default(),
            expanded: None,
        }
    }

    /// Prop key being edited.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Item schema; `None` means only add/remove/reorder are offered.
    #[must_use]
    pub const fn schema(&self) -> Option<&'static [FieldSchema]> {
        self.schema
    }

    /// Current items.
    #[must_use]
    pub fn items(&self) -> &[PropValue] {
        &self.items
    }

    /// Index of the expanded item.
    #[must_use]
    pub const fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Replace the items with a value that flowed back in from outside.
    /// The expansion is kept when still in range.
    pub fn sync(&mut self, current: Option<&PropValue>) {
        self.items = current
            .and_then(PropValue::as_list)
            .map(<[PropValue]>::to_vec)
            .unwrap_or_default();
        if self.expanded.is_some_and(|i| i >= self.items.len()) {
            self.expanded = None;
        }
    }

    /// Expand `index`, or collapse it if already expanded.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.expanded = if self.expanded == Some(index) { None } else { Some(index) };
    }

    /// Append an item with empty defaults and expand it.
    pub fn add(&mut self) -> PropValue {
        let item = self.schema.map(empty_item).unwrap_or_default();
        self.items.push(PropValue::Map(item));
        self.expanded = Some(self.items.len() - 1);
        self.value()
    }

    /// Remove the item at `index`.
    pub fn remove(&mut self, index: usize) -> Option<PropValue> {
        if index >= self.items.len() {
            return None;
        }
        self.items.remove(index);
        self.expanded = match self.expanded {
            Some(e) if e == index => None,
            Some(e) if e > index => Some(e - 1),
            other => other,
        };
        Some(self.value())
    }

    /// Swap `index` with its predecessor. No-op on the first item.
    pub fn move_up(&mut self, index: usize) -> Option<PropValue> {
        if index == 0 || index >= self.items.len() {
            return None;
        }
        self.swap(index, index - 1);
        Some(self.value())
    }

    /// Swap `index` with its successor. No-op on the last item.
    pub fn move_down(&mut self, index: usize) -> Option<PropValue> {
        if index + 1 >= self.items.len() {
            return None;
        }
        self.swap(index, index + 1);
        Some(self.value())
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
        self.expanded = match self.expanded {
            Some(e) if e == a => Some(b),
            Some(e) if e == b => Some(a),
            other => other,
        };
    }

    /// Set one field of one item.
    ///
    /// Text written into a string-list field is split on commas, which is
    /// how nested lists are edited.
    pub fn update_field(&mut self, index: usize, key: &str, value: PropValue) -> Option<PropValue> {
        let field_type = self
            .schema
            .and_then(|schema| schema.iter().find(|f| f.key == key))
            .map(|f| f.field_type);
        let value = match (field_type, value) {
            (Some(FieldType::StringList), PropValue::Text(text)) => split_shorthand(&text),
            (_, value) => value,
        };
        let item = self.items.get_mut(index)?;
        if !matches!(item, PropValue::Map(_)) {
            *item = PropValue::Map(PropMap::new());
        }
        if let PropValue::Map(map) = item {
            if map.get(key) == Some(&value) {
                return None;
            }
            map.insert(key.to_string(), value);
        }
        Some(self.value())
    }

    /// Controls for the item at `index`, in schema order.
    #[must_use]
    pub fn item_fields(&self, index: usize) -> Vec<ItemField> {
        let (Some(schema), Some(item)) = (self.schema, self.items.get(index)) else {
            return Vec::new();
        };
        let map = item.as_map();
        schema
            .iter()
            .map(|field| {
                let current = map.and_then(|m| m.get(field.key));
                let value = match (field.field_type, current) {
                    (FieldType::StringList, Some(PropValue::List(list))) => {
                        PropValue::Text(join_shorthand(list))
                    }
                    (_, Some(value)) => value.clone(),
                    (field_type, None) => field_type.empty_value(),
                };
                ItemField {
                    schema: *field,
                    value,
                }
            })
            .collect()
    }

    /// Collapsed label for the item at `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        self.items
            .get(index)
            .map_or_else(|| FALLBACK_LABEL.to_string(), |item| preview_label(item, self.schema))
    }

    /// The list as a prop value.
    #[must_use]
    pub fn value(&self) -> PropValue {
        PropValue::List(self.items.clone())
    }
}

/// Best-effort human label for a list item.
///
/// Probes [`LABEL_KEYS`] first, then the first non-empty text field (schema
/// order when a schema is known), then [`FALLBACK_LABEL`].
#[must_use]
pub fn preview_label(item: &PropValue, schema: Option<&[FieldSchema]>) -> String {
    let Some(map) = item.as_map() else {
        return item
            .as_str()
            .filter(|s| !s.is_empty())
            .map_or_else(|| FALLBACK_LABEL.to_string(), str::to_string);
    };
    let text = |key: &str| map.get(key).and_then(PropValue::as_str).filter(|s| !s.is_empty());

    if let Some(label) = LABEL_KEYS.into_iter().find_map(|key| text(key)) {
        return label.to_string();
    }
    let from_schema = schema.and_then(|fields| fields.iter().find_map(|f| text(f.key)));
    from_schema
        .or_else(|| map.keys().find_map(|key| text(key.as_str())))
        .map_or_else(|| FALLBACK_LABEL.to_string(), str::to_string)
}

fn split_shorthand(text: &str) -> PropValue {
    PropValue::List(
        text.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PropValue::from)
            .collect(),
    )
}

fn join_shorthand(list: &[PropValue]) -> String {
    list.iter()
        .filter_map(PropValue::to_text)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn editor(field: &str, items: serde_json::Value) -> ListEditor {
        ListEditor::new(field, Some(&PropValue::from(items)))
    }

    #[test]
    fn test_add_seeds_defaults_and_expands() {
        let mut list = editor("faqs", json!([{"question": "Q1", "answer": "A1"}]));
        let value = list.add();
        assert_eq!(list.expanded(), Some(1));
        let added = &value.as_list().expect("list")[1];
        assert_eq!(added.as_map().expect("map")["question"], PropValue::Text(String::new()));
    }

    #[test]
    fn test_add_without_schema() {
        let mut list = ListEditor::new("mystery", None);
        assert!(list.schema().is_none());
        list.add();
        assert_eq!(list.items(), &[PropValue::Map(PropMap::new())]);
        assert!(list.item_fields(0).is_empty());
    }

    #[test]
    fn test_remove_closes_expanded() {
        let mut list = editor("faqs", json!([{"question": "a"}, {"question": "b"}, {"question": "c"}]));
        list.toggle(1);
        list.remove(1).expect("removed");
        assert_eq!(list.expanded(), None);

        list.toggle(1);
        list.remove(0).expect("removed");
        assert_eq!(list.expanded(), Some(0));
        assert!(list.remove(9).is_none());
    }

    #[test]
    fn test_moves_clamp_at_ends() {
        let mut list = editor("faqs", json!([{"question": "a"}, {"question": "b"}]));
        let before = list.items().to_vec();
        assert!(list.move_up(0).is_none());
        assert!(list.move_down(1).is_none());
        assert_eq!(list.items(), before.as_slice());
    }

    #[test]
    fn test_expanded_follows_moved_item() {
        let mut list = editor("faqs", json!([{"question": "a"}, {"question": "b"}, {"question": "c"}]));
        list.toggle(0);
        list.move_down(0).expect("moved");
        assert_eq!(list.expanded(), Some(1));
        assert_eq!(list.label(1), "a");
        list.move_up(1).expect("moved");
        assert_eq!(list.expanded(), Some(0));
    }

    #[test]
    fn test_preview_label_priority() {
        let list = editor(
            "products",
            json!([
                {"productName": "Tee", "name": "Named"},
                {"productName": "Tee"},
                {"category": "", "description": "Only text"},
                {"price": 3}
            ]),
        );
        assert_eq!(list.label(0), "Named");
        assert_eq!(list.label(1), "Tee");
        assert_eq!(list.label(2), "Only text");
        assert_eq!(list.label(3), FALLBACK_LABEL);
        assert_eq!(list.label(99), FALLBACK_LABEL);
    }

    #[test]
    fn test_nested_list_shorthand() {
        let mut list = editor("plans", json!([{"name": "Pro", "features": ["a", "b"]}]));
        let fields = list.item_fields(0);
        let features = fields.iter().find(|f| f.schema.key == "features").expect("features");
        assert_eq!(features.value, PropValue::Text("a, b".into()));

        let value = list
            .update_field(0, "features", PropValue::Text("x, y,, z".into()))
            .expect("changed");
        let plan = value.as_list().expect("list")[0].as_map().expect("map").clone();
        assert_eq!(plan["features"], PropValue::from(json!(["x", "y", "z"])));
    }

    #[test]
    fn test_update_same_value_is_noop() {
        let mut list = editor("faqs", json!([{"question": "a"}]));
        assert!(list.update_field(0, "question", "a".into()).is_none());
        assert!(list.update_field(3, "question", "b".into()).is_none());
    }

    #[test]
    fn test_sync_drops_stale_expansion() {
        let mut list = editor("faqs", json!([{"question": "a"}, {"question": "b"}]));
        list.toggle(1);
        list.sync(Some(&PropValue::from(json!([{"question": "a"}]))));
        assert_eq!(list.expanded(), None);
    }
}
