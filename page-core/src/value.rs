//! Open prop/style maps and lenient readers over them.
//!
//! Component props and style descriptors are free-form maps in storage.
//! They are modelled as a string-keyed map of [`PropValue`], and every block
//! reads them through [`Props`], which falls back to the caller's default on
//! a missing key *or* an unexpected shape. Nothing in here can fail.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// String-keyed map of prop values.
pub type PropMap = BTreeMap<String, PropValue>;

static EMPTY_MAP: PropMap = BTreeMap::new();

/// A single prop or style value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Explicit null / cleared value.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Any JSON number.
    Number(f64),
    /// Text (also used for colors, urls, css lengths).
    Text(String),
    /// Ordered list.
    List(Vec<PropValue>),
    /// Nested map.
    Map(PropMap),
}

impl PropValue {
    /// Borrow as text if this is a [`PropValue::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Read as a number; numeric text is parsed.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Read as a boolean; `"true"`/`"false"` text is accepted.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Borrow as a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as a map.
    #[must_use]
    pub fn as_map(&self) -> Option<&PropMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Whether this is [`PropValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Render a scalar as display text. Lists and maps have no text form.
    #[must_use]
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s)),
            Self::Number(n) => Some(Cow::Owned(format_number(*n))),
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }
}

/// Format a number without a trailing `.0` for whole values.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(value: Vec<PropValue>) -> Self {
        Self::List(value)
    }
}

impl From<PropMap> for PropValue {
    fn from(value: PropMap) -> Self {
        Self::Map(value)
    }
}

impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Build a [`PropMap`] from a JSON object. Anything else yields an empty map.
#[must_use]
pub fn prop_map(value: serde_json::Value) -> PropMap {
    match PropValue::from(value) {
        PropValue::Map(map) => map,
        _ => PropMap::new(),
    }
}

/// Look up a dotted path (`"padding.top"`, `"features.0.title"`).
///
/// Numeric segments index into lists.
#[must_use]
pub fn get_path<'a>(map: &'a PropMap, path: &str) -> Option<&'a PropValue> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = map.get(first)?;
    for segment in segments {
        current = match current {
            PropValue::Map(inner) => inner.get(segment)?,
            PropValue::List(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Set a dotted path, creating intermediate maps as needed.
///
/// A scalar sitting on an intermediate segment is replaced by a map. A
/// numeric segment addresses an existing list item; out-of-range indices
/// leave the map untouched. Setting [`PropValue::Null`] removes the leaf key
/// instead of storing a null.
pub fn set_path(map: &mut PropMap, path: &str, value: PropValue) {
    let segments: Vec<&str> = path.split('.').collect();
    set_in_map(map, &segments, value);
}

fn set_in_map(map: &mut PropMap, segments: &[&str], value: PropValue) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        if value.is_null() {
            map.remove(*head);
        } else {
            map.insert((*head).to_string(), value);
        }
        return;
    }
    let slot = map
        .entry((*head).to_string())
        .or_insert_with(|| PropValue::Map(PropMap::new()));
    set_in_value(slot, rest, value);
}

fn set_in_value(slot: &mut PropValue, segments: &[&str], value: PropValue) {
    if let PropValue::List(items) = slot {
        let Some((head, rest)) = segments.split_first() else {
            return;
        };
        let Some(item) = head.parse::<usize>().ok().and_then(|i| items.get_mut(i)) else {
            return;
        };
        if rest.is_empty() {
            *item = value;
        } else {
            set_in_value(item, rest, value);
        }
        return;
    }
    if !matches!(slot, PropValue::Map(_)) {
        *slot = PropValue::Map(PropMap::new());
    }
    if let PropValue::Map(inner) = slot {
        set_in_map(inner, segments, value);
    }
}

/// Lenient read-only view over a prop map.
///
/// Every accessor takes the block's own default, so a block never has to
/// care whether a key is missing, null, or the wrong shape.
#[derive(Debug, Clone, Copy)]
pub struct Props<'a> {
    map: &'a PropMap,
}

impl<'a> Props<'a> {
    /// Wrap a prop map.
    #[must_use]
    pub const fn new(map: &'a PropMap) -> Self {
        Self { map }
    }

    /// A reader over nothing; every accessor returns its default.
    #[must_use]
    pub fn empty() -> Props<'static> {
        Props { map: &EMPTY_MAP }
    }

    /// The underlying map.
    #[must_use]
    pub const fn raw(&self) -> &'a PropMap {
        self.map
    }

    /// Raw value lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a PropValue> {
        self.map.get(key)
    }

    /// Text value, or `default` when absent or not a scalar.
    #[must_use]
    pub fn text(&self, key: &str, default: &'a str) -> Cow<'a, str> {
        self.map
            .get(key)
            .and_then(PropValue::to_text)
            .unwrap_or(Cow::Borrowed(default))
    }

    /// Text value, or `None` when absent, empty, or not a scalar.
    #[must_use]
    pub fn opt_text(&self, key: &str) -> Option<Cow<'a, str>> {
        self.map
            .get(key)
            .and_then(PropValue::to_text)
            .filter(|s| !s.is_empty())
    }

    /// Numeric value, or `default`.
    #[must_use]
    pub fn number(&self, key: &str, default: f64) -> f64 {
        self.map
            .get(key)
            .and_then(PropValue::as_f64)
            .filter(|n| n.is_finite())
            .unwrap_or(default)
    }

    /// Boolean value, or `default`.
    #[must_use]
    pub fn flag(&self, key: &str, default: bool) -> bool {
        self.map
            .get(key)
            .and_then(PropValue::as_bool)
            .unwrap_or(default)
    }

    /// List value; anything that is not a list reads as empty.
    #[must_use]
    pub fn list(&self, key: &str) -> &'a [PropValue] {
        self.map
            .get(key)
            .and_then(PropValue::as_list)
            .unwrap_or(&[])
    }

    /// Nested map as another reader; anything that is not a map reads as empty.
    #[must_use]
    pub fn nested(&self, key: &str) -> Props<'a> {
        match self.map.get(key).and_then(PropValue::as_map) {
            Some(map) => Props::new(map),
            None => Props { map: &EMPTY_MAP },
        }
    }

    /// Readers over the map-shaped items of a list prop. Other items are skipped.
    pub fn items(&self, key: &str) -> impl Iterator<Item = Props<'a>> + 'a {
        self.list(key)
            .iter()
            .filter_map(PropValue::as_map)
            .map(Props::new)
    }

    /// A list of strings. Also accepts the comma-separated text shorthand
    /// used by the list editor for nested arrays.
    #[must_use]
    pub fn strings(&self, key: &str) -> Vec<Cow<'a, str>> {
        match self.map.get(key) {
            Some(PropValue::List(items)) => items.iter().filter_map(PropValue::to_text).collect(),
            Some(PropValue::Text(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Cow::Borrowed)
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untagged_roundtrip_shapes() {
        let map = prop_map(json!({
            "title": "Hi",
            "count": 3,
            "on": true,
            "tags": ["a", "b"],
            "nested": {"x": null}
        }));
        assert_eq!(map["title"], PropValue::Text("Hi".into()));
        assert_eq!(map["count"], PropValue::Number(3.0));
        assert_eq!(map["on"], PropValue::Bool(true));
        assert_eq!(map["tags"].as_list().map(<[PropValue]>::len), Some(2));
        assert!(map["nested"].as_map().is_some());

        let parsed: PropMap = serde_json::from_value(json!({"a": 1.5, "b": "x"})).expect("parse");
        assert_eq!(parsed["a"], PropValue::Number(1.5));
    }

    #[test]
    fn test_reader_defaults_on_wrong_shape() {
        let map = prop_map(json!({"title": ["not", "text"], "price": "abc", "items": "oops"}));
        let props = Props::new(&map);
        assert_eq!(props.text("title", "Default"), "Default");
        assert!((props.number("price", 9.0) - 9.0).abs() < f64::EPSILON);
        assert!(props.list("items").is_empty());
        assert!(props.nested("title").raw().is_empty());
        assert_eq!(props.text("missing", "fallback"), "fallback");
    }

    #[test]
    fn test_reader_coerces_scalars() {
        let map = prop_map(json!({"n": 42, "s": "12.5", "flag": "true"}));
        let props = Props::new(&map);
        assert_eq!(props.text("n", ""), "42");
        assert!((props.number("s", 0.0) - 12.5).abs() < f64::EPSILON);
        assert!(props.flag("flag", false));
    }

    #[test]
    fn test_strings_accepts_shorthand() {
        let map = prop_map(json!({"list": ["a", "b"], "short": "x, y ,, z"}));
        let props = Props::new(&map);
        assert_eq!(props.strings("list"), vec!["a", "b"]);
        assert_eq!(props.strings("short"), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_set_and_get_path() {
        let mut map = PropMap::new();
        set_path(&mut map, "padding.top", "10px".into());
        set_path(&mut map, "padding.left", "4px".into());
        assert_eq!(
            get_path(&map, "padding.top").and_then(PropValue::as_str),
            Some("10px")
        );

        set_path(&mut map, "padding.top", PropValue::Null);
        assert!(get_path(&map, "padding.top").is_none());
        assert!(get_path(&map, "padding.left").is_some());
    }

    #[test]
    fn test_set_path_replaces_scalar_intermediate() {
        let mut map = prop_map(json!({"transform": "oops"}));
        set_path(&mut map, "transform.rotate", 45.into());
        assert_eq!(
            get_path(&map, "transform.rotate").and_then(PropValue::as_f64),
            Some(45.0)
        );
    }

    #[test]
    fn test_paths_through_lists() {
        let mut map = prop_map(json!({"features": [{"title": "A"}, {"title": "B"}]}));
        set_path(&mut map, "features.1.title", "Changed".into());
        assert_eq!(
            get_path(&map, "features.1.title").and_then(PropValue::as_str),
            Some("Changed")
        );
        set_path(&mut map, "features.7.title", "Ignored".into());
        assert_eq!(map["features"].as_list().map(<[PropValue]>::len), Some(2));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(1.25), "1.25");
    }
}
