//! # Pagecraft Core
//!
//! Page composition and rendering engine for a block-based page builder.
//! Compiles to WASM for the in-browser editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                 page-core.wasm                   │
//! ├──────────────────────────────────────────────────┤
//! │  Registry          │  Editing Session            │
//! │  - Block library   │  - Selection + history      │
//! │  - Field schemas   │  - In-place editor          │
//! │  - Item schemas    │  - Properties panel         │
//! ├──────────────────────────────────────────────────┤
//! │  Style Compiler    │  Page Renderer              │
//! │  - Descriptor→CSS  │  - Wrappers + affordances   │
//! │  - Keyframes       │  - Trust policy             │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! A page is an ordered list of [`ComponentInstance`]s. The [`Registry`]
//! maps each instance's type to a block renderer; the [`style`] compiler
//! turns its style descriptor into CSS for a wrapping container; the
//! [`render`] module stitches the two together. Authoring goes through an
//! [`EditingSession`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod blocks;
pub mod component;
pub mod document;
pub mod error;
pub mod history;
pub mod inline;
pub mod item_schema;
pub mod list_editor;
pub mod markup;
pub mod panel;
pub mod registry;
pub mod render;
pub mod session;
pub mod store;
pub mod style;
pub mod value;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use blocks::{BlockContext, RenderMode};
pub use component::{ComponentId, ComponentInstance};
pub use document::{PageDocument, PageSummary};
pub use error::{PageError, PageResult};
pub use history::History;
pub use inline::{EditKey, FieldKind, InlineEditor};
pub use list_editor::ListEditor;
pub use markup::{Node, TrustPolicy};
pub use panel::{Patch, PatchTarget, PropertiesPanel, Tab};
pub use registry::{registry, Category, ComponentDefinition, FieldSchema, FieldType, Registry};
pub use render::{render_page, PageRenderer, RenderOptions, RenderedPage};
pub use session::{EditingSession, Notification, PreviewMode, SessionConfig, Shortcut};
pub use store::{PageSink, PageSource, PageStore, StoreError};
pub use style::{compile_style, CompiledStyle};
pub use value::{PropMap, PropValue, Props};

/// Page core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
