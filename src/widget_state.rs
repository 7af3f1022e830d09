//! Widget state management layer.
//!
//! The view model is rebuilt from the document on every structural change,
//! and egui redraws every frame. State that must survive both, such as an
//! in-progress label edit or unapplied preferences, lives here.

use crate::config::Preferences;

/// An in-progress edit of a state name label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEdit {
    /// Name of the state being renamed
    pub original: String,
    /// Current text in the edit box
    pub buffer: String,
    /// Whether the edit box still needs keyboard focus
    pub wants_focus: bool,
}

/// Transient state for rename-in-place labels.
#[derive(Debug, Clone, Default)]
pub struct RenameState {
    /// The label being edited (if any)
    pub editing: Option<LabelEdit>,
}

impl RenameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing a label, replacing any other edit.
    pub fn begin(&mut self, name: &str) {
        self.editing = Some(LabelEdit {
            original: name.to_string(),
            buffer: name.to_string(),
            wants_focus: true,
        });
    }

    /// Update the edit buffer.
    pub fn set_buffer(&mut self, text: String) {
        if let Some(edit) = &mut self.editing {
            edit.buffer = text;
        }
    }

    /// Finish editing and return `(old, new)` names.
    pub fn take(&mut self) -> Option<(String, String)> {
        self.editing
            .take()
            .map(|edit| (edit.original, edit.buffer.trim().to_string()))
    }

    /// Abandon the edit.
    pub fn cancel(&mut self) {
        self.editing = None;
    }

    /// Whether `name` is the label being edited.
    pub fn is_editing(&self, name: &str) -> bool {
        self.editing.as_ref().is_some_and(|e| e.original == name)
    }
}

/// Transient state for the preferences window.
#[derive(Debug, Clone, Default)]
pub struct PreferencesState {
    /// Settings being edited; `Some` while the window is open
    pub pending: Option<Preferences>,
}

impl PreferencesState {
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

/// Central widget state container.
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    pub rename: RenameState,
    pub preferences: PreferencesState,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_edit_lifecycle() {
        let mut state = RenameState::new();
        assert!(state.take().is_none());

        state.begin("idle");
        assert!(state.is_editing("idle"));
        assert!(!state.is_editing("walk"));

        state.set_buffer("  walking ".to_string());
        assert_eq!(
            state.take(),
            Some(("idle".to_string(), "walking".to_string()))
        );
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_rename_cancel() {
        let mut state = RenameState::new();
        state.begin("idle");
        state.set_buffer("other".to_string());
        state.cancel();
        assert!(state.take().is_none());
    }

    #[test]
    fn test_begin_replaces_previous_edit() {
        let mut state = RenameState::new();
        state.begin("idle");
        state.begin("walk");
        assert!(state.is_editing("walk"));
        assert!(!state.is_editing("idle"));
    }
}
