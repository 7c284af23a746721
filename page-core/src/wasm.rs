//! WebAssembly bindings for page-core.
//!
//! [`WasmEditor`] exposes an [`EditingSession`] to the browser editor.
//! Structured values cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::blocks::RenderMode;
use crate::component::ComponentId;
use crate::document::PageDocument;
use crate::error::PageError;
use crate::markup::TrustPolicy;
use crate::registry::registry;
use crate::session::{EditingSession, PreviewMode, SessionConfig, Shortcut, ShortcutOutcome};
use crate::value::PropValue;

/// Initialize the page-core WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Registry catalog as JSON.
#[wasm_bindgen(js_name = componentCatalog)]
#[must_use]
pub fn component_catalog() -> String {
    let summaries: Vec<_> = registry().list_all().iter().map(|d| d.summary()).collect();
    serde_json::to_string(&summaries).unwrap_or_default()
}

/// Editing session for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    session: EditingSession,
    trust: TrustPolicy,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Start an empty page.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(page_id: &str) -> Self {
        Self {
            session: EditingSession::new(page_id, SessionConfig::default()),
            trust: TrustPolicy::Untrusted,
        }
    }

    /// Replace the session with a page loaded from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON is not a page.
    #[wasm_bindgen(js_name = loadPageJson)]
    pub fn load_page_json(&mut self, json: &str) -> Result<(), String> {
        let page = PageDocument::from_json(json).map_err(|e| e.to_string())?;
        self.session = EditingSession::open(page, SessionConfig::default());
        Ok(())
    }

    /// The page with its live components as JSON.
    #[wasm_bindgen(js_name = pageJson)]
    #[must_use]
    pub fn page_json(&self) -> String {
        serde_json::to_string(self.session.document()).unwrap_or_default()
    }

    /// Allow raw HTML and custom CSS in rendered output.
    #[wasm_bindgen(js_name = setTrusted)]
    pub fn set_trusted(&mut self, trusted: bool) {
        self.trust = if trusted {
            TrustPolicy::Trusted
        } else {
            TrustPolicy::Untrusted
        };
    }

    /// Render the page as HTML in the current mode.
    #[wasm_bindgen(js_name = renderHtml)]
    #[must_use]
    pub fn render_html(&self) -> String {
        self.session.render(self.trust).html()
    }

    /// Switch between `"author"` and `"display"`.
    ///
    /// # Errors
    ///
    /// Returns an error string for unknown modes.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), String> {
        self.session.set_mode(mode.parse::<RenderMode>()?);
        Ok(())
    }

    /// Switch the preview viewport (`desktop`, `tablet`, `mobile`).
    ///
    /// # Errors
    ///
    /// Returns an error string for unknown viewports.
    #[wasm_bindgen(js_name = setPreview)]
    pub fn set_preview(&mut self, preview: &str) -> Result<(), String> {
        self.session.set_preview(preview.parse::<PreviewMode>()?);
        Ok(())
    }

    /// Toggle the live-interactive preview.
    #[wasm_bindgen(js_name = setLive)]
    pub fn set_live(&mut self, live: bool) {
        self.session.set_live(live);
    }

    /// Select a component.
    ///
    /// # Errors
    ///
    /// Returns an error string if the component does not exist.
    pub fn select(&mut self, id: &str) -> Result<(), String> {
        self.session
            .select(&ComponentId::from(id))
            .map_err(|e| e.to_string())
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.session.deselect();
    }

    /// Selected component id.
    #[wasm_bindgen(js_name = selectedId)]
    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        self.session.selected_id().map(ToString::to_string)
    }

    /// Add a component; returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error string for unknown component types.
    pub fn add(&mut self, component_type: &str) -> Result<String, String> {
        self.session
            .add(component_type)
            .map(|id| id.to_string())
            .map_err(|e| e.to_string())
    }

    /// Duplicate a component; returns the copy's id.
    ///
    /// # Errors
    ///
    /// Returns an error string if the component does not exist.
    pub fn duplicate(&mut self, id: &str) -> Result<String, String> {
        self.session
            .duplicate(&ComponentId::from(id))
            .map(|id| id.to_string())
            .map_err(|e| e.to_string())
    }

    /// Delete a component.
    ///
    /// # Errors
    ///
    /// Returns an error string if the component does not exist.
    pub fn remove(&mut self, id: &str) -> Result<(), String> {
        self.session
            .delete(&ComponentId::from(id))
            .map_err(|e| e.to_string())
    }

    /// Drag-drop reorder by list position.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        self.session.reorder(from, to)
    }

    /// Remove every component.
    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&mut self) -> bool {
        self.session.clear_all()
    }

    /// Set one prop from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error string for bad JSON or an unknown component.
    #[wasm_bindgen(js_name = updateField)]
    pub fn update_field(&mut self, id: &str, path: &str, value_json: &str) -> Result<bool, String> {
        let value: PropValue = serde_json::from_str(value_json).map_err(|e| e.to_string())?;
        self.session
            .update_field(&ComponentId::from(id), path, value)
            .map_err(|e| e.to_string())
    }

    /// Step back one action.
    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    /// Step forward one action.
    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    /// Whether undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    /// Whether redo is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    /// Whether there are unsaved changes.
    #[wasm_bindgen(js_name = isDirty)]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    /// Dispatch a key chord such as `"ctrl+z"`. Returns `"ignored"`,
    /// `"applied"` or `"save_requested"`.
    #[wasm_bindgen(js_name = handleShortcut)]
    pub fn handle_shortcut(&mut self, chord: &str) -> String {
        let outcome = Shortcut::from_chord(chord)
            .map_or(ShortcutOutcome::Ignored, |s| self.session.shortcut(s));
        serde_json::to_value(outcome)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Open the in-place editor on a field of the selection.
    #[wasm_bindgen(js_name = startInlineEdit)]
    pub fn start_inline_edit(&mut self, field: &str) -> bool {
        self.session.start_inline_edit(field)
    }

    /// Text typed into the in-place editor.
    #[wasm_bindgen(js_name = inlineInput)]
    pub fn inline_input(&mut self, text: &str) {
        self.session.inline_input(text);
    }

    /// Commit the in-place editor.
    #[wasm_bindgen(js_name = inlineBlur)]
    pub fn inline_blur(&mut self) -> bool {
        self.session.inline_blur()
    }

    /// Start a save; returns the component list JSON to persist.
    ///
    /// # Errors
    ///
    /// Returns an error string while another save is pending.
    #[wasm_bindgen(js_name = beginSave)]
    pub fn begin_save(&mut self) -> Result<String, String> {
        let components = self.session.begin_save().map_err(|e| e.to_string())?;
        serde_json::to_string(&components).map_err(|e| PageError::from(e).to_string())
    }

    /// Report the outcome of a save started with `beginSave`.
    ///
    /// # Errors
    ///
    /// Returns the save failure message when `ok` is false.
    #[wasm_bindgen(js_name = finishSave)]
    pub fn finish_save(&mut self, ok: bool, message: &str) -> Result<(), String> {
        let result = if ok { Ok(()) } else { Err(message.to_string()) };
        self.session.finish_save(result).map_err(|e| e.to_string())
    }

    /// Drain notifications as JSON.
    #[wasm_bindgen(js_name = takeNotifications)]
    pub fn take_notifications(&mut self) -> String {
        serde_json::to_string(&self.session.take_notifications()).unwrap_or_default()
    }
}
