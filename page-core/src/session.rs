//! Page editing session.
//!
//! An [`EditingSession`] owns the live component list of one page being
//! authored, together with selection, undo/redo history, the open in-place
//! editor and the properties panel. Every discrete mutation replaces the
//! live list wholesale and records it as one history snapshot.
//!
//! ```
//! use page_core::session::{EditingSession, SessionConfig};
//!
//! let mut session = EditingSession::new("home", SessionConfig::default());
//! let id = session.add("hero").unwrap();
//! session.update_field(&id, "title", "Welcome".into()).unwrap();
//! assert!(session.undo());
//! assert!(session.is_dirty());
//! ```

use serde::{Deserialize, Serialize};

use crate::blocks::RenderMode;
use crate::component::{renumber, ComponentId, ComponentInstance};
use crate::document::PageDocument;
use crate::error::{PageError, PageResult};
use crate::history::{History, DEFAULT_HISTORY_LIMIT};
use crate::inline::{EditKey, FieldKind, InlineEditor, KeyOutcome};
use crate::item_schema::item_schema;
use crate::markup::TrustPolicy;
use crate::panel::{Patch, PropertiesPanel};
use crate::registry::registry;
use crate::render::{PageRenderer, RenderOptions, RenderedPage};
use crate::store::{PageSink, PageSource};
use crate::value::{get_path, set_path, PropMap, PropValue};

/// Session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of history snapshots kept.
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl SessionConfig {
    /// Set the history cap.
    #[must_use]
    pub const fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }
}

/// Preview viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// Full width.
    #[default]
    Desktop,
    /// 768px.
    Tablet,
    /// 375px.
    Mobile,
}

impl PreviewMode {
    /// Viewport width in pixels; `None` for full width.
    #[must_use]
    pub const fn viewport_width(self) -> Option<u32> {
        match self {
            Self::Desktop => None,
            Self::Tablet => Some(768),
            Self::Mobile => Some(375),
        }
    }
}

impl std::str::FromStr for PreviewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "tablet" => Ok(Self::Tablet),
            "mobile" => Ok(Self::Mobile),
            other => Err(format!("unknown preview mode: {other}")),
        }
    }
}

/// Author-mode keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shortcut {
    /// Ctrl/Cmd+Z.
    Undo,
    /// Ctrl/Cmd+Shift+Z or Ctrl/Cmd+Y.
    Redo,
    /// Ctrl/Cmd+S.
    Save,
    /// Ctrl/Cmd+D.
    Duplicate,
    /// Escape.
    Deselect,
}

impl Shortcut {
    /// Parse a key chord such as `"ctrl+shift+z"`, `"cmd+s"` or `"escape"`.
    #[must_use]
    pub fn from_chord(chord: &str) -> Option<Self> {
        let mut command = false;
        let mut shift = false;
        let mut key = None;
        for part in chord.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "meta" | "mod" => command = true,
                "shift" => shift = true,
                other => key = Some(other.to_string()),
            }
        }
        match (command, shift, key?.as_str()) {
            (_, _, "escape" | "esc") => Some(Self::Deselect),
            (true, false, "z") => Some(Self::Undo),
            (true, true, "z") | (true, false, "y") => Some(Self::Redo),
            (true, false, "s") => Some(Self::Save),
            (true, false, "d") => Some(Self::Duplicate),
            _ => None,
        }
    }
}

/// What a shortcut did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutOutcome {
    /// Guard failed or not in author mode; the host keeps default behaviour.
    Ignored,
    /// Applied to the session.
    Applied,
    /// The host should start a save.
    SaveRequested,
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Operation succeeded.
    Success,
    /// Operation failed; state is unchanged.
    Error,
}

/// A transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Message text.
    pub message: String,
}

/// Authoring state for one page.
#[derive(Debug)]
pub struct EditingSession {
    page: PageDocument,
    history: History<Vec<ComponentInstance>>,
    saved: Vec<ComponentInstance>,
    pending_save: Option<Vec<ComponentInstance>>,
    selected: Option<ComponentId>,
    editor: Option<InlineEditor>,
    panel: Option<PropertiesPanel>,
    mode: RenderMode,
    preview: PreviewMode,
    live: bool,
    notifications: Vec<Notification>,
}

impl EditingSession {
    /// An empty page.
    #[must_use]
    pub fn new(page_id: impl Into<String>, config: SessionConfig) -> Self {
        let id = page_id.into();
        Self::open(PageDocument::new(id.clone(), id), config)
    }

    /// Open a loaded page. Components are sorted by stored `order` and the
    /// result becomes the first history snapshot.
    #[must_use]
    pub fn open(mut page: PageDocument, config: SessionConfig) -> Self {
        page.normalize();
        let initial = page.components.clone();
        Self {
            history: History::with_limit(initial.clone(), config.history_limit),
            saved: initial,
            page,
            pending_save: None,
            selected: None,
            editor: None,
            panel: None,
            mode: RenderMode::Author,
            preview: PreviewMode::Desktop,
            live: false,
            notifications: Vec::new(),
        }
    }

    /// Load `page_id` from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::LoadFailed`] if the source cannot supply the page.
    #[tracing::instrument(skip(source, config))]
    pub async fn load(
        source: &dyn PageSource,
        page_id: &str,
        config: SessionConfig,
    ) -> PageResult<Self> {
        let page = source
            .load(page_id)
            .await
            .map_err(|e| PageError::LoadFailed(e.to_string()))?;
        tracing::info!(components = page.components.len(), "page loaded");
        Ok(Self::open(page, config))
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Page id.
    #[must_use]
    pub fn page_id(&self) -> &str {
        &self.page.id
    }

    /// Live component list.
    #[must_use]
    pub fn components(&self) -> &[ComponentInstance] {
        &self.page.components
    }

    /// The page with its live component list.
    #[must_use]
    pub const fn document(&self) -> &PageDocument {
        &self.page
    }

    /// Component by id.
    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&ComponentInstance> {
        self.page.components.iter().find(|c| &c.id == id)
    }

    /// List position of a component.
    #[must_use]
    pub fn index_of(&self, id: &ComponentId) -> Option<usize> {
        self.page.components.iter().position(|c| &c.id == id)
    }

    /// Whether the live list differs from the last saved one.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.page.components != self.saved
    }

    /// Whether a save is pending.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    /// Current render mode.
    #[must_use]
    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Switch between authoring and previewing. Leaving author mode closes
    /// the in-place editor.
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
        if !mode.is_author() {
            self.editor = None;
        }
    }

    /// Preview viewport.
    #[must_use]
    pub const fn preview(&self) -> PreviewMode {
        self.preview
    }

    /// Change the preview viewport. Not recorded in history.
    pub fn set_preview(&mut self, preview: PreviewMode) {
        self.preview = preview;
    }

    /// Whether the preview runs timers and scroll effects.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.live
    }

    /// Toggle the live-interactive preview.
    pub fn set_live(&mut self, live: bool) {
        self.live = live;
    }

    /// Drain pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Selected component id.
    #[must_use]
    pub const fn selected_id(&self) -> Option<&ComponentId> {
        self.selected.as_ref()
    }

    /// Selected component.
    #[must_use]
    pub fn selected(&self) -> Option<&ComponentInstance> {
        self.selected.as_ref().and_then(|id| self.component(id))
    }

    /// Select a component, replacing any previous selection.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ComponentNotFound`] if no such component exists.
    pub fn select(&mut self, id: &ComponentId) -> PageResult<()> {
        if self.component(id).is_none() {
            return Err(PageError::ComponentNotFound(id.to_string()));
        }
        if self.selected.as_ref() == Some(id) {
            return Ok(());
        }
        // Pending edits belong to the outgoing selection.
        self.inline_blur();
        self.panel_action(PropertiesPanel::blur);
        let panel = self.component(id).and_then(|instance| {
            registry()
                .lookup(&instance.component_type)
                .map(|def| PropertiesPanel::new(instance, def))
        });
        self.panel = panel;
        self.selected = Some(id.clone());
        self.editor = None;
        Ok(())
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
        self.editor = None;
        self.panel = None;
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a new component of `component_type` after the selection, or at
    /// the end. The new component becomes selected.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownComponentType`] for unregistered types.
    pub fn add(&mut self, component_type: &str) -> PageResult<ComponentId> {
        let instance = registry()
            .lookup(component_type)
            .ok_or_else(|| PageError::UnknownComponentType(component_type.to_string()))?
            .instantiate();
        let id = instance.id.clone();
        let at = self
            .selected
            .as_ref()
            .and_then(|sel| self.index_of(sel))
            .map_or(self.page.components.len(), |i| i + 1);
        let mut next = self.page.components.clone();
        next.insert(at, instance);
        self.commit(next);
        self.select(&id)?;
        Ok(id)
    }

    /// Replace a component's props.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ComponentNotFound`] if no such component exists.
    pub fn update_props(&mut self, id: &ComponentId, props: PropMap) -> PageResult<bool> {
        self.modify(id, |instance| instance.props = props)
    }

    /// Replace a component's style descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ComponentNotFound`] if no such component exists.
    pub fn update_style(&mut self, id: &ComponentId, style: PropMap) -> PageResult<bool> {
        self.modify(id, |instance| instance.style = style)
    }

    /// Set one prop by dotted path (`title`, `features.1.title`).
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ComponentNotFound`] if no such component exists.
    pub fn update_field(
        &mut self,
        id: &ComponentId,
        path: &str,
        value: PropValue,
    ) -> PageResult<bool> {
        self.modify(id, |instance| set_path(&mut instance.props, path, value))
    }

    /// Apply a panel patch to a component.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ComponentNotFound`] if no such component exists.
    pub fn apply_patch(&mut self, id: &ComponentId, patch: &Patch) -> PageResult<bool> {
        self.modify(id, |instance| patch.apply(instance))
    }

    /// Remove a component. Removing the selection clears it.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ComponentNotFound`] if no such component exists.
    pub fn delete(&mut self, id: &ComponentId) -> PageResult<()> {
        let index = self
            .index_of(id)
            .ok_or_else(|| PageError::ComponentNotFound(id.to_string()))?;
        let mut next = self.page.components.clone();
        next.remove(index);
        self.commit(next);
        Ok(())
    }

    /// Copy a component with a fresh id and insert it right after the
    /// original. The copy becomes selected.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ComponentNotFound`] if no such component exists.
    pub fn duplicate(&mut self, id: &ComponentId) -> PageResult<ComponentId> {
        let index = self
            .index_of(id)
            .ok_or_else(|| PageError::ComponentNotFound(id.to_string()))?;
        let copy = self.page.components[index].duplicate();
        let copy_id = copy.id.clone();
        let mut next = self.page.components.clone();
        next.insert(index + 1, copy);
        self.commit(next);
        self.select(&copy_id)?;
        Ok(copy_id)
    }

    /// Move the component at `from` to `to`. Returns false, and records
    /// nothing, when either index is outside the list or they are equal.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.page.components.len();
        if from == to || from >= len || to >= len {
            return false;
        }
        let mut next = self.page.components.clone();
        let moved = next.remove(from);
        next.insert(to, moved);
        self.commit(next);
        true
    }

    /// Move a component one place up.
    pub fn move_up(&mut self, id: &ComponentId) -> bool {
        match self.index_of(id) {
            Some(index) if index > 0 => self.reorder(index, index - 1),
            _ => false,
        }
    }

    /// Move a component one place down.
    pub fn move_down(&mut self, id: &ComponentId) -> bool {
        match self.index_of(id) {
            Some(index) => self.reorder(index, index + 1),
            None => false,
        }
    }

    /// Remove every component.
    pub fn clear_all(&mut self) -> bool {
        if self.page.components.is_empty() {
            return false;
        }
        self.commit(Vec::new());
        true
    }

    fn modify(
        &mut self,
        id: &ComponentId,
        change: impl FnOnce(&mut ComponentInstance),
    ) -> PageResult<bool> {
        let index = self
            .index_of(id)
            .ok_or_else(|| PageError::ComponentNotFound(id.to_string()))?;
        let mut next = self.page.components.clone();
        change(&mut next[index]);
        if next[index] == self.page.components[index] {
            return Ok(false);
        }
        self.commit(next);
        Ok(true)
    }

    fn commit(&mut self, mut next: Vec<ComponentInstance>) {
        renumber(&mut next);
        self.history.push(next.clone());
        self.page.components = next;
        self.refresh();
    }

    /// Bring selection, panel and editor in line with the live list.
    fn refresh(&mut self) {
        let Some(instance) = self.selected().cloned() else {
            self.deselect();
            return;
        };
        if let (Some(panel), Some(def)) = (
            self.panel.as_mut(),
            registry().lookup(&instance.component_type),
        ) {
            panel.sync(&instance, def);
        }
        if let Some(editor) = self.editor.as_mut() {
            let current = get_path(&instance.props, editor.field())
                .cloned()
                .unwrap_or_default();
            editor.sync(current);
        }
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Step back one action.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.page.components = snapshot;
        self.editor = None;
        self.refresh();
        true
    }

    /// Step forward one action.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.page.components = snapshot;
        self.editor = None;
        self.refresh();
        true
    }

    /// Whether undo is available.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // -----------------------------------------------------------------------
    // In-place editing
    // -----------------------------------------------------------------------

    /// The in-place editor, if one is open.
    #[must_use]
    pub const fn inline_editor(&self) -> Option<&InlineEditor> {
        self.editor.as_ref()
    }

    /// Open the in-place editor on a field of the selected component.
    /// Any editor already open on another field is committed first.
    pub fn start_inline_edit(&mut self, field: &str) -> bool {
        if !self.mode.is_author() {
            return false;
        }
        if self.editor.as_ref().is_some_and(|e| e.field() == field && e.is_editing()) {
            return true;
        }
        self.inline_blur();
        let Some(instance) = self.selected() else {
            return false;
        };
        let current = get_path(&instance.props, field)
            .cloned()
            .or_else(|| {
                registry()
                    .lookup(&instance.component_type)
                    .and_then(|def| get_path(&def.default_props(), field).cloned())
            })
            .unwrap_or_default();
        let kind = field_kind(&instance.component_type, field, &current);
        let mut editor = InlineEditor::new(field, kind, current);
        let opened = editor.click(self.mode);
        self.editor = Some(editor);
        opened
    }

    /// Text typed into the open editor.
    pub fn inline_input(&mut self, text: impl Into<String>) {
        if let Some(editor) = self.editor.as_mut() {
            editor.input(text);
        }
    }

    /// Focus left the in-place input. Returns whether a change was applied.
    pub fn inline_blur(&mut self) -> bool {
        let commit = self.editor.as_mut().and_then(InlineEditor::blur);
        self.editor = None;
        self.apply_commit(commit)
    }

    /// Key pressed in the in-place input.
    pub fn inline_key(&mut self, key: EditKey) -> KeyOutcome {
        let Some(editor) = self.editor.as_mut() else {
            return KeyOutcome::default();
        };
        let outcome = editor.key(key);
        if !editor.is_editing() {
            self.editor = None;
        }
        self.apply_commit(outcome.commit.clone());
        outcome
    }

    fn apply_commit(&mut self, commit: Option<crate::inline::Commit>) -> bool {
        let (Some(commit), Some(id)) = (commit, self.selected.clone()) else {
            return false;
        };
        self.update_field(&id, &commit.field, commit.value)
            .unwrap_or(false)
    }

    // -----------------------------------------------------------------------
    // Properties panel
    // -----------------------------------------------------------------------

    /// Panel for the selected component.
    #[must_use]
    pub const fn panel(&self) -> Option<&PropertiesPanel> {
        self.panel.as_ref()
    }

    /// Run a panel action and apply the patch it emits to the selection.
    /// Returns whether the live list changed.
    pub fn panel_action(
        &mut self,
        action: impl FnOnce(&mut PropertiesPanel) -> Option<Patch>,
    ) -> bool {
        let (Some(panel), Some(id)) = (self.panel.as_mut(), self.selected.clone()) else {
            return false;
        };
        let Some(patch) = action(panel) else {
            return false;
        };
        self.apply_patch(&id, &patch).unwrap_or(false)
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    /// Dispatch a shortcut. Only author mode reacts.
    pub fn shortcut(&mut self, shortcut: Shortcut) -> ShortcutOutcome {
        if !self.mode.is_author() {
            return ShortcutOutcome::Ignored;
        }
        let applied = match shortcut {
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
            Shortcut::Save => {
                return if self.is_saving() {
                    ShortcutOutcome::Ignored
                } else {
                    ShortcutOutcome::SaveRequested
                };
            }
            Shortcut::Duplicate => match self.selected.clone() {
                Some(id) => self.duplicate(&id).is_ok(),
                None => false,
            },
            Shortcut::Deselect => {
                if self.editor.as_ref().is_some_and(InlineEditor::is_editing) {
                    self.editor = None;
                    true
                } else if self.selected.is_some() {
                    self.deselect();
                    true
                } else {
                    false
                }
            }
        };
        if applied {
            ShortcutOutcome::Applied
        } else {
            ShortcutOutcome::Ignored
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Render the live list in the session's mode.
    #[must_use]
    pub fn render(&self, trust: TrustPolicy) -> RenderedPage {
        let options = RenderOptions::new(self.mode)
            .with_trust(trust)
            .with_interactive(!self.mode.is_author() && self.live)
            .with_selected(self.selected.clone());
        PageRenderer::new(options)
            .with_editor(self.editor.as_ref())
            .render(&self.page.components)
    }

    // -----------------------------------------------------------------------
    // Saving
    // -----------------------------------------------------------------------

    /// Start a save: commits any open in-place edit and returns the list to
    /// hand to the persistence collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::SaveInProgress`] while a previous save is pending.
    pub fn begin_save(&mut self) -> PageResult<Vec<ComponentInstance>> {
        if self.is_saving() {
            return Err(PageError::SaveInProgress);
        }
        self.inline_blur();
        self.panel_action(PropertiesPanel::blur);
        let mut snapshot = self.page.components.clone();
        renumber(&mut snapshot);
        self.pending_save = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Finish a save started with [`Self::begin_save`]. Failure leaves the
    /// live list untouched and queues an error notification.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::SaveFailed`] carrying the collaborator's message.
    pub fn finish_save(&mut self, result: Result<(), String>) -> PageResult<()> {
        let snapshot = self.pending_save.take();
        match result {
            Ok(()) => {
                if let Some(snapshot) = snapshot {
                    self.saved = snapshot;
                }
                self.notifications.push(Notification {
                    kind: NotificationKind::Success,
                    message: "Page saved".to_string(),
                });
                Ok(())
            }
            Err(message) => {
                tracing::warn!(page_id = %self.page.id, "save failed: {message}");
                self.notifications.push(Notification {
                    kind: NotificationKind::Error,
                    message: format!("Failed to save page: {message}"),
                });
                Err(PageError::SaveFailed(message))
            }
        }
    }

    /// Save the live list to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::SaveInProgress`] or [`PageError::SaveFailed`].
    #[tracing::instrument(skip(self, sink), fields(page_id = %self.page.id))]
    pub async fn save(&mut self, sink: &dyn PageSink) -> PageResult<()> {
        let components = self.begin_save()?;
        // Held locally so a dropped future leaves no pending save.
        let snapshot = self.pending_save.take();
        let count = components.len();
        let result = sink
            .save(&self.page.id, components)
            .await
            .map_err(|e| e.to_string());
        if result.is_ok() {
            tracing::info!(components = count, "page saved");
        }
        self.pending_save = snapshot;
        self.finish_save(result)
    }
}

/// Input kind for a dotted prop path: the block schema for top-level keys,
/// the item schema for `list.index.key`, otherwise the value's shape.
fn field_kind(component_type: &str, path: &str, current: &PropValue) -> FieldKind {
    let segments: Vec<&str> = path.split('.').collect();
    let declared = match segments.as_slice() {
        [key] => registry()
            .lookup(component_type)
            .and_then(|def| def.field(key))
            .map(|f| f.field_type),
        [.., list, index, key] if index.parse::<usize>().is_ok() => item_schema(list)
            .and_then(|schema| schema.iter().find(|f| f.key == *key))
            .map(|f| f.field_type),
        _ => None,
    };
    match (declared, current) {
        (Some(field_type), _) => field_type.into(),
        (None, PropValue::Number(_)) => FieldKind::Number,
        (None, _) => FieldKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{PatchTarget, Tab};
    use crate::store::{PageStore, StoreError};
    use crate::value::prop_map;
    use async_trait::async_trait;
    use serde_json::json;

    fn page() -> PageDocument {
        PageDocument::new("home", "Home").with_components(vec![
            ComponentInstance::new("hero", prop_map(json!({"title": "A"}))).with_id("hero"),
            ComponentInstance::new("footer", PropMap::new()).with_id("footer"),
        ])
    }

    fn session() -> EditingSession {
        EditingSession::open(page(), SessionConfig::default())
    }

    fn id(s: &str) -> ComponentId {
        ComponentId::from(s)
    }

    fn types(session: &EditingSession) -> Vec<&str> {
        session
            .components()
            .iter()
            .map(|c| c.component_type.as_str())
            .collect()
    }

    #[test]
    fn test_open_is_clean() {
        let session = session();
        assert!(!session.is_dirty());
        assert!(!session.can_undo());
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_add_after_selection() {
        let mut session = session();
        session.select(&id("hero")).expect("select");
        let new_id = session.add("cta").expect("add");
        assert_eq!(types(&session), vec!["hero", "cta", "footer"]);
        assert_eq!(session.selected_id(), Some(&new_id));
        assert_eq!(session.components()[2].order, 2);
        assert!(session.is_dirty());
    }

    #[test]
    fn test_add_unknown_type() {
        let mut session = session();
        assert!(matches!(
            session.add("doesNotExist"),
            Err(PageError::UnknownComponentType(_))
        ));
        assert!(!session.can_undo());
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut session = session();
        session.select(&id("hero")).expect("select");
        session.select(&id("footer")).expect("select");
        assert_eq!(session.selected_id(), Some(&id("footer")));
        assert!(session.select(&id("missing")).is_err());
        assert_eq!(session.selected_id(), Some(&id("footer")));
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut session = session();
        session.select(&id("hero")).expect("select");
        session.delete(&id("hero")).expect("delete");
        assert!(session.selected().is_none());
        assert!(session.panel().is_none());
        assert_eq!(types(&session), vec!["footer"]);
        assert_eq!(session.components()[0].order, 0);
    }

    #[test]
    fn test_duplicate_inserts_after_with_new_id() {
        let mut session = session();
        let copy = session.duplicate(&id("hero")).expect("duplicate");
        let list = session.components();
        assert_eq!(types(&session), vec!["hero", "hero", "footer"]);
        assert_ne!(list[1].id, list[0].id);
        assert_eq!(list[1].id, copy);
        assert_eq!(list[1].props, list[0].props);
        assert_eq!(list[1].style, list[0].style);
    }

    #[test]
    fn test_reorder_and_noops() {
        let mut session = session();
        assert!(!session.reorder(0, 0));
        assert!(!session.reorder(0, 5));
        assert!(!session.can_undo());
        assert!(session.reorder(1, 0));
        assert_eq!(types(&session), vec!["footer", "hero"]);
        assert!(!session.move_up(&id("footer")));
        assert!(session.move_down(&id("footer")));
        assert_eq!(types(&session), vec!["hero", "footer"]);
        assert!(!session.move_down(&id("footer")));
    }

    #[test]
    fn test_update_unchanged_is_not_recorded() {
        let mut session = session();
        let changed = session
            .update_field(&id("hero"), "title", "A".into())
            .expect("update");
        assert!(!changed);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_undo_redo_restores_lists() {
        let mut session = session();
        let original = session.components().to_vec();
        session.update_field(&id("hero"), "title", "B".into()).expect("update");
        session.clear_all();
        assert!(session.components().is_empty());

        assert!(session.undo());
        assert!(session.undo());
        assert_eq!(session.components(), original.as_slice());
        assert!(!session.undo());

        assert!(session.redo());
        session.add("text").expect("add");
        assert!(!session.can_redo());
    }

    #[test]
    fn test_undo_of_selected_insert_clears_selection() {
        let mut session = session();
        session.add("cta").expect("add");
        session.undo();
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_history_limit() {
        let mut session =
            EditingSession::open(page(), SessionConfig::default().with_history_limit(2));
        session.reorder(0, 1);
        session.reorder(0, 1);
        session.reorder(0, 1);
        assert!(session.undo());
        assert!(!session.undo());
    }

    #[test]
    fn test_inline_edit_commits_on_blur() {
        let mut session = session();
        session.select(&id("hero")).expect("select");
        assert!(session.start_inline_edit("title"));
        session.inline_input("B");
        assert!(session.render(TrustPolicy::Untrusted).html().contains("data-pf-editing"));
        assert!(session.inline_blur());
        assert_eq!(
            session.selected().and_then(|c| c.prop("title")),
            Some(&PropValue::Text("B".to_string()))
        );
        assert!(session.inline_editor().is_none());
    }

    #[test]
    fn test_inline_numeric_fallback() {
        let mut session = EditingSession::new("p", SessionConfig::default());
        let spacer = session.add("spacer").expect("add");
        assert!(session.start_inline_edit("height"));
        assert_eq!(session.inline_editor().map(InlineEditor::kind), Some(FieldKind::Number));
        session.inline_input("tall");
        session.inline_blur();
        assert_eq!(
            session.component(&spacer).and_then(|c| c.prop("height")),
            Some(&PropValue::Number(0.0))
        );
    }

    #[test]
    fn test_inline_edit_requires_author_mode() {
        let mut session = session();
        session.select(&id("hero")).expect("select");
        session.set_mode(RenderMode::Display);
        assert!(!session.start_inline_edit("title"));
    }

    #[test]
    fn test_inline_escape_discards() {
        let mut session = session();
        session.select(&id("hero")).expect("select");
        session.start_inline_edit("title");
        session.inline_input("scratch");
        let outcome = session.inline_key(EditKey::Escape);
        assert!(outcome.prevent_default);
        assert!(!session.can_undo());
        assert!(session.inline_editor().is_none());
    }

    #[test]
    fn test_panel_patches_flow_into_history() {
        let mut session = session();
        session.select(&id("hero")).expect("select");
        assert!(!session.panel_action(|p| p.type_text(PatchTarget::Props, "subtitle", "Hi")));
        assert!(session.panel_action(PropertiesPanel::blur));
        assert!(session.panel_action(|p| {
            assert!(p.set_tab(Tab::Style).is_none(), "nothing left to flush");
            p.edit(PatchTarget::Style, "padding.top", PropValue::Number(24.0))
        }));
        let hero = session.selected().expect("hero");
        assert_eq!(hero.prop("subtitle"), Some(&PropValue::Text("Hi".to_string())));
        assert_eq!(
            get_path(&hero.style, "padding.top"),
            Some(&PropValue::Number(24.0))
        );
        assert!(session.undo());
        assert!(session.selected().is_some_and(|h| !h.style.contains_key("padding")));
    }

    #[test]
    fn test_tab_switch_flushes_pending_text() {
        let mut session = session();
        session.select(&id("hero")).expect("select");
        assert!(!session.panel_action(|p| p.type_text(PatchTarget::Props, "subtitle", "Hi")));
        assert!(session.panel_action(|p| p.set_tab(Tab::Style)));
        let hero = session.selected().expect("hero");
        assert_eq!(hero.prop("subtitle"), Some(&PropValue::Text("Hi".to_string())));
        assert!(session.can_undo());
    }

    #[test]
    fn test_select_commits_open_edits() {
        let mut session = session();
        session.select(&id("hero")).expect("select");
        assert!(session.start_inline_edit("title"));
        session.inline_input("B");
        session.select(&id("footer")).expect("select footer");

        assert!(session.inline_editor().is_none());
        let hero = session.component(&id("hero")).expect("hero");
        assert_eq!(hero.prop("title"), Some(&PropValue::Text("B".to_string())));
        assert!(session.can_undo());

        session.select(&id("hero")).expect("select");
        assert!(!session.panel_action(|p| p.type_text(PatchTarget::Props, "subtitle", "Sub")));
        session.select(&id("footer")).expect("select footer");
        let hero = session.component(&id("hero")).expect("hero");
        assert_eq!(hero.prop("subtitle"), Some(&PropValue::Text("Sub".to_string())));
    }

    #[test]
    fn test_inline_edit_seeds_unset_field_with_default() {
        let mut session = session();
        session.select(&id("hero")).expect("select");
        assert!(session.selected().is_some_and(|h| h.prop("subtitle").is_none()));
        assert!(session.start_inline_edit("subtitle"));
        let buffer = session
            .inline_editor()
            .and_then(InlineEditor::buffer)
            .expect("editing");
        assert_eq!(
            buffer,
            "Create beautiful pages in minutes with our drag-and-drop builder."
        );
        // Committing the untouched default is not an edit.
        assert!(!session.inline_blur());
    }

    #[test]
    fn test_shortcuts() {
        let mut session = session();
        assert_eq!(session.shortcut(Shortcut::Undo), ShortcutOutcome::Ignored);
        assert_eq!(session.shortcut(Shortcut::Duplicate), ShortcutOutcome::Ignored);
        session.select(&id("hero")).expect("select");
        assert_eq!(session.shortcut(Shortcut::Duplicate), ShortcutOutcome::Applied);
        assert_eq!(session.components().len(), 3);
        assert_eq!(session.shortcut(Shortcut::Undo), ShortcutOutcome::Applied);
        assert_eq!(session.shortcut(Shortcut::Redo), ShortcutOutcome::Applied);
        assert_eq!(session.shortcut(Shortcut::Redo), ShortcutOutcome::Ignored);
        assert_eq!(session.shortcut(Shortcut::Save), ShortcutOutcome::SaveRequested);
        assert_eq!(session.shortcut(Shortcut::Deselect), ShortcutOutcome::Applied);
        assert!(session.selected().is_none());

        session.set_mode(RenderMode::Display);
        assert_eq!(session.shortcut(Shortcut::Undo), ShortcutOutcome::Ignored);
    }

    #[test]
    fn test_shortcut_chords() {
        assert_eq!(Shortcut::from_chord("ctrl+z"), Some(Shortcut::Undo));
        assert_eq!(Shortcut::from_chord("Cmd+Shift+Z"), Some(Shortcut::Redo));
        assert_eq!(Shortcut::from_chord("ctrl+y"), Some(Shortcut::Redo));
        assert_eq!(Shortcut::from_chord("meta+s"), Some(Shortcut::Save));
        assert_eq!(Shortcut::from_chord("mod+d"), Some(Shortcut::Duplicate));
        assert_eq!(Shortcut::from_chord("Escape"), Some(Shortcut::Deselect));
        assert_eq!(Shortcut::from_chord("z"), None);
        assert_eq!(Shortcut::from_chord(""), None);
    }

    #[test]
    fn test_preview_is_not_history() {
        let mut session = session();
        session.set_preview(PreviewMode::Mobile);
        session.set_live(true);
        assert_eq!(session.preview().viewport_width(), Some(375));
        assert!(!session.can_undo());
        assert_eq!("tablet".parse::<PreviewMode>(), Ok(PreviewMode::Tablet));
    }

    #[test]
    fn test_begin_save_guards_concurrent_saves() {
        let mut session = session();
        session.begin_save().expect("first");
        assert!(matches!(session.begin_save(), Err(PageError::SaveInProgress)));
        assert_eq!(session.shortcut(Shortcut::Save), ShortcutOutcome::Ignored);
        session.finish_save(Ok(())).expect("finish");
        assert!(!session.is_saving());
    }

    struct FailingSink;

    #[async_trait]
    impl PageSink for FailingSink {
        async fn save(
            &self,
            _page_id: &str,
            _components: Vec<ComponentInstance>,
        ) -> Result<(), StoreError> {
            Err(StoreError::Rejected("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failed_save_keeps_state() {
        let mut session = session();
        session.update_field(&id("hero"), "title", "B".into()).expect("update");
        let before = session.components().to_vec();

        let result = session.save(&FailingSink).await;
        assert!(matches!(result, Err(PageError::SaveFailed(_))));
        assert_eq!(session.components(), before.as_slice());
        assert!(session.is_dirty());
        assert!(!session.is_saving());
        let notes = session.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_store_write_failure_surfaces_in_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data = dir.path().join("data");
        let store = PageStore::with_data_dir(&data).expect("store");
        std::fs::remove_dir(&data).expect("remove data dir");
        std::fs::write(&data, b"not a directory").expect("block data dir");

        let mut session = session();
        session.update_field(&id("hero"), "title", "B".into()).expect("update");
        let result = session.save(&store).await;

        let message = match result {
            Err(PageError::SaveFailed(message)) => message,
            other => panic!("expected SaveFailed, got {other:?}"),
        };
        assert!(message.starts_with("IO error"), "{message}");
        assert!(session.is_dirty());
        assert!(store.get("home").is_none());
        let notes = session.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Error);
    }

    struct StalledSink;

    #[async_trait]
    impl PageSink for StalledSink {
        async fn save(
            &self,
            _page_id: &str,
            _components: Vec<ComponentInstance>,
        ) -> Result<(), StoreError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_dropped_save_does_not_wedge_session() {
        let mut session = session();
        session.update_field(&id("hero"), "title", "B".into()).expect("update");

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            session.save(&StalledSink),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(!session.is_saving());
        assert!(session.is_dirty());

        session.save(&PageStore::new()).await.expect("retry");
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn test_save_and_reload_through_store() {
        let store = PageStore::new();
        let mut session = session();
        session.update_field(&id("hero"), "title", "Saved".into()).expect("update");
        session.save(&store).await.expect("save");
        assert!(!session.is_dirty());

        let reloaded = EditingSession::load(&store, "home", SessionConfig::default())
            .await
            .expect("load");
        assert_eq!(reloaded.components(), session.components());
    }

    #[tokio::test]
    async fn test_load_missing_page() {
        let store = PageStore::new();
        let result = EditingSession::load(&store, "nope", SessionConfig::default()).await;
        assert!(matches!(result, Err(PageError::LoadFailed(_))));
    }
}
