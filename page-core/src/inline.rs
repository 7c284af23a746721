//! In-place editing of a single scalar field.
//!
//! [`InlineEditor`] is the state machine behind every click-to-edit text in
//! author mode: idle until clicked, then holding a text buffer until it is
//! committed (blur, or Enter on single-line fields) or discarded (Escape).
//! A commit is reported only when the value actually changed.

use serde::{Deserialize, Serialize};

use crate::blocks::RenderMode;
use crate::markup::Node;
use crate::registry::FieldType;
use crate::value::PropValue;

/// What kind of input a field edits as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text. Enter commits.
    #[default]
    Text,
    /// Multi-line text. Enter inserts a newline.
    MultiLine,
    /// Number. Parsed on commit; unparsable input commits as zero.
    Number,
}

impl FieldKind {
    /// Attribute value used in author markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::MultiLine => "multiline",
            Self::Number => "number",
        }
    }
}

impl From<FieldType> for FieldKind {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Number => Self::Number,
            FieldType::TextArea => Self::MultiLine,
            _ => Self::Text,
        }
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// Return / Enter.
    Enter,
    /// Escape.
    Escape,
}

/// A committed change.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    /// Dotted prop path of the field.
    pub field: String,
    /// New value.
    pub value: PropValue,
}

/// Result of a key press.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyOutcome {
    /// Change to propagate, if any.
    pub commit: Option<Commit>,
    /// Whether the host should suppress the key's default behaviour.
    pub prevent_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EditState {
    Idle,
    Editing { buffer: String },
}

/// Click-to-edit state for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineEditor {
    field: String,
    kind: FieldKind,
    committed: PropValue,
    enabled: bool,
    state: EditState,
}

impl InlineEditor {
    /// An idle editor over `field` whose last committed value is `current`.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: FieldKind, current: PropValue) -> Self {
        Self {
            field: field.into(),
            kind,
            committed: current,
            enabled: true,
            state: EditState::Idle,
        }
    }

    /// Enable or disable editing. A disabled editor never leaves idle.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        if !enabled {
            self.state = EditState::Idle;
        }
        self
    }

    /// Dotted prop path being edited.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Input kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Last committed value.
    #[must_use]
    pub const fn committed(&self) -> &PropValue {
        &self.committed
    }

    /// Whether the input is open.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// Pending text while editing.
    #[must_use]
    pub fn buffer(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { buffer } => Some(buffer),
            EditState::Idle => None,
        }
    }

    /// Whether a click in `mode` would open the input.
    #[must_use]
    pub const fn accepts_edits(&self, mode: RenderMode) -> bool {
        self.enabled && mode.is_author()
    }

    /// Open the input, seeded with the committed value. Returns whether the
    /// editor is now editing.
    pub fn click(&mut self, mode: RenderMode) -> bool {
        if !self.accepts_edits(mode) {
            return false;
        }
        if !self.is_editing() {
            let seed = self
                .committed
                .to_text()
                .map(std::borrow::Cow::into_owned)
                .unwrap_or_default();
            self.state = EditState::Editing { buffer: seed };
        }
        true
    }

    /// Replace the pending text. Ignored when idle.
    pub fn input(&mut self, text: impl Into<String>) {
        if let EditState::Editing { buffer } = &mut self.state {
            *buffer = text.into();
        }
    }

    /// Focus left the input: commit.
    pub fn blur(&mut self) -> Option<Commit> {
        self.commit()
    }

    /// Handle a key press while editing.
    pub fn key(&mut self, key: EditKey) -> KeyOutcome {
        if !self.is_editing() {
            return KeyOutcome::default();
        }
        match key {
            EditKey::Enter if self.kind == FieldKind::MultiLine => {
                if let EditState::Editing { buffer } = &mut self.state {
                    buffer.push('\n');
                }
                KeyOutcome::default()
            }
            EditKey::Enter => KeyOutcome {
                commit: self.commit(),
                prevent_default: true,
            },
            EditKey::Escape => {
                self.cancel();
                KeyOutcome {
                    commit: None,
                    prevent_default: true,
                }
            }
        }
    }

    /// Discard the pending text and return to idle.
    pub fn cancel(&mut self) {
        self.state = EditState::Idle;
    }

    /// A new committed value flowed in from outside. Ignored while editing.
    pub fn sync(&mut self, current: PropValue) {
        if !self.is_editing() {
            self.committed = current;
        }
    }

    fn commit(&mut self) -> Option<Commit> {
        let EditState::Editing { buffer } = std::mem::replace(&mut self.state, EditState::Idle)
        else {
            return None;
        };
        let value = match self.kind {
            FieldKind::Number => PropValue::Number(parse_number(&buffer)),
            FieldKind::Text | FieldKind::MultiLine => PropValue::Text(buffer),
        };
        if same_value(&self.committed, &value) {
            return None;
        }
        self.committed = value.clone();
        Some(Commit {
            field: self.field.clone(),
            value,
        })
    }
}

/// Lenient float parse: anything unparsable or non-finite is zero.
#[must_use]
pub fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn same_value(committed: &PropValue, next: &PropValue) -> bool {
    match next {
        PropValue::Number(n) => committed.as_f64().is_some_and(|c| c == *n),
        PropValue::Text(s) => committed.to_text().is_some_and(|c| c == s.as_str()),
        other => committed == other,
    }
}

/// Author-mode markup for one editable field.
///
/// With `open` set (the editor for this field is editing) the field renders
/// as its input; otherwise as the display element tagged for click-to-edit.
#[must_use]
pub fn author_node(
    tag: &'static str,
    field: &str,
    value: &str,
    kind: FieldKind,
    open: Option<&InlineEditor>,
) -> Node {
    if let Some(buffer) = open.and_then(InlineEditor::buffer) {
        let input = match kind {
            FieldKind::MultiLine => Node::el("textarea").with_text(buffer),
            FieldKind::Text => Node::el("input").attr("type", "text").attr("value", buffer),
            FieldKind::Number => Node::el("input")
                .attr("type", "number")
                .attr("step", "any")
                .attr("value", buffer),
        };
        return input
            .class("pf-inline-input")
            .attr("data-pf-field", field)
            .attr("data-pf-editing", "true")
            .attr("autofocus", "");
    }
    Node::el(tag)
        .class("pf-editable")
        .attr("data-pf-field", field)
        .attr("data-pf-kind", kind.as_str())
        .attr("tabindex", "0")
        .with_text(value)
}
