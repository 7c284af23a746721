//! # Component Registry
//!
//! Static catalog mapping a component `type` key to its definition: label,
//! category, default props, property schema and renderer.
//!
//! The registry is built once and never mutated afterwards. The process-wide
//! built-in catalog is available through [`registry`]; embedders that want
//! extra block types build their own with [`RegistryBuilder`] before any
//! session reads it.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::blocks::{self, BlockContext, RenderFn};
use crate::component::ComponentInstance;
use crate::error::{PageError, PageResult};
use crate::markup::Node;
use crate::value::{PropMap, PropValue, Props};

/// Picker grouping for component definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Structural blocks: navigation, footer, spacing.
    Layout,
    /// Text, media and informational blocks.
    Content,
    /// Conversion-oriented blocks: hero, pricing, testimonials.
    Marketing,
    /// Product and catalog blocks.
    Commerce,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Layout, Self::Content, Self::Marketing, Self::Commerce];

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Layout => "Layout",
            Self::Content => "Content",
            Self::Marketing => "Marketing",
            Self::Commerce => "Commerce",
        }
    }
}

/// Editing control kind for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// One of a fixed set of options.
    Select,
    /// Numeric input.
    Number,
    /// Image URL with preview.
    Image,
    /// Color picker.
    Color,
    /// On/off toggle.
    Boolean,
    /// Repeated structured items, edited with the list editor.
    Array,
    /// Plain list of strings, edited as comma-separated text.
    StringList,
}

impl FieldType {
    /// Value a freshly added field of this type starts with.
    #[must_use]
    pub fn empty_value(self) -> PropValue {
        match self {
            Self::Number => PropValue::Number(0.0),
            Self::Boolean => PropValue::Bool(false),
            Self::Array | Self::StringList => PropValue::List(Vec::new()),
            Self::Text | Self::TextArea | Self::Select | Self::Image | Self::Color => {
                PropValue::Text(String::new())
            }
        }
    }
}

/// One editable field in a property schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    /// Prop key.
    pub key: &'static str,
    /// Label shown next to the control.
    pub label: &'static str,
    /// Control kind.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Options for [`FieldType::Select`].
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [&'static str],
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

impl FieldSchema {
    /// A field of the given type without options.
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            key,
            label,
            field_type,
            options: &[],
        }
    }

    /// Single-line text field.
    #[must_use]
    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldType::Text)
    }

    /// Multi-line text field.
    #[must_use]
    pub const fn textarea(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldType::TextArea)
    }

    /// Select field.
    #[must_use]
    pub const fn select(
        key: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            label,
            field_type: FieldType::Select,
            options,
        }
    }
}

/// A registry entry. Self-contained: owns its renderer, defaults and schema.
#[derive(Clone, Copy)]
pub struct ComponentDefinition {
    /// Registry key stored in component instances.
    pub component_type: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Icon name for the picker.
    pub icon: &'static str,
    /// Picker grouping.
    pub category: Category,
    /// Ordered property schema for the content tab.
    pub schema: &'static [FieldSchema],
    /// Builds the default props for a new instance.
    pub defaults: fn() -> PropMap,
    /// Renders the block.
    pub render: RenderFn,
}

impl std::fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("component_type", &self.component_type)
            .field("label", &self.label)
            .field("category", &self.category)
            .field("fields", &self.schema.len())
            .finish_non_exhaustive()
    }
}

impl ComponentDefinition {
    /// Default props for a new instance.
    #[must_use]
    pub fn default_props(&self) -> PropMap {
        (self.defaults)()
    }

    /// Create a new instance with default props and an empty style.
    #[must_use]
    pub fn instantiate(&self) -> ComponentInstance {
        ComponentInstance::new(self.component_type, self.default_props())
    }

    /// Render with the given props.
    #[must_use]
    pub fn render(&self, props: &PropMap, cx: &BlockContext<'_>) -> Node {
        (self.render)(&Props::new(props), cx)
    }

    /// Schema entry for a prop key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&'static FieldSchema> {
        self.schema.iter().find(|field| field.key == key)
    }

    /// Serializable description for pickers and API clients.
    #[must_use]
    pub fn summary(&self) -> DefinitionSummary {
        DefinitionSummary {
            component_type: self.component_type,
            label: self.label,
            icon: self.icon,
            category: self.category,
            schema: self.schema,
            default_props: self.default_props(),
        }
    }
}

/// Serializable view of a [`ComponentDefinition`].
#[derive(Debug, Clone, Serialize)]
pub struct DefinitionSummary {
    /// Registry key.
    #[serde(rename = "type")]
    pub component_type: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Icon name.
    pub icon: &'static str,
    /// Picker grouping.
    pub category: Category,
    /// Property schema.
    pub schema: &'static [FieldSchema],
    /// Default props.
    pub default_props: PropMap,
}

/// Immutable catalog of component definitions.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: Vec<ComponentDefinition>,
    index: HashMap<&'static str, usize>,
}

impl Registry {
    /// Look up a definition by type key.
    ///
    /// `None` is an expected outcome (stale or renamed types) and callers
    /// render nothing for it.
    #[must_use]
    pub fn lookup(&self, component_type: &str) -> Option<&ComponentDefinition> {
        self.index
            .get(component_type)
            .and_then(|&i| self.definitions.get(i))
    }

    /// Whether a type key is registered.
    #[must_use]
    pub fn contains(&self, component_type: &str) -> bool {
        self.index.contains_key(component_type)
    }

    /// All definitions in registration order.
    #[must_use]
    pub fn list_all(&self) -> &[ComponentDefinition] {
        &self.definitions
    }

    /// Definitions grouped by category, in [`Category::ALL`] order.
    /// Empty categories are omitted.
    #[must_use]
    pub fn by_category(&self) -> Vec<(Category, Vec<&ComponentDefinition>)> {
        Category::ALL
            .iter()
            .map(|&category| {
                let defs = self
                    .definitions
                    .iter()
                    .filter(|d| d.category == category)
                    .collect::<Vec<_>>();
                (category, defs)
            })
            .filter(|(_, defs)| !defs.is_empty())
            .collect()
    }

    /// Case-insensitive search over labels and type keys.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&ComponentDefinition> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.definitions.iter().collect();
        }
        self.definitions
            .iter()
            .filter(|d| {
                d.label.to_lowercase().contains(&query) || d.component_type.contains(&query)
            })
            .collect()
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether no definitions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Registry containing every built-in block.
    #[must_use]
    pub fn builtin() -> Self {
        let mut builder = RegistryBuilder::new();
        for definition in blocks::builtin_definitions() {
            if let Err(e) = builder.register(definition) {
                tracing::warn!("Skipping built-in block: {e}");
            }
        }
        builder.build()
    }
}

/// Append-only builder for a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    /// Start an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the built-in catalog.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self {
            registry: Registry::builtin(),
        }
    }

    /// Register a definition.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::DuplicateComponentType`] if the type key is taken.
    pub fn register(&mut self, definition: ComponentDefinition) -> PageResult<&mut Self> {
        if self.registry.contains(definition.component_type) {
            return Err(PageError::DuplicateComponentType(
                definition.component_type.to_string(),
            ));
        }
        let index = self.registry.definitions.len();
        self.registry
            .index
            .insert(definition.component_type, index);
        self.registry.definitions.push(definition);
        Ok(self)
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> Registry {
        self.registry
    }
}

static BUILTIN: LazyLock<Registry> = LazyLock::new(Registry::builtin);

/// The process-wide built-in registry. Initialised on first access.
#[must_use]
pub fn registry() -> &'static Registry {
    &BUILTIN
}
