//! Application message types for the RSI editor.
//!
//! All UI events and actions are represented as messages in the Elm
//! architecture style. The UI collects messages while drawing a frame and the
//! app applies them once drawing is done.

use crate::config::Preferences;

/// Top-level message, grouped by the part of the window that sends it.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    File(FileMessage),
    State(StateMessage),
    Metadata(MetadataMessage),
    Preferences(PreferencesMessage),
}

/// File menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMessage {
    /// Replace the document with an empty RSI
    New,
    /// Choose a directory and open the RSI in it
    Open,
    /// Choose a zip archive and open the RSI in it
    OpenArchive,
    /// Save the document, choosing a directory if needed
    Save,
}

/// State tile interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMessage {
    /// Start editing the label of a state
    BeginRename(String),
    /// Label edit text changed
    RenameInput(String),
    /// Label edit confirmed
    CommitRename,
    /// Label edit abandoned
    CancelRename,
}

/// Metadata form edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataMessage {
    /// License field changed
    LicenseChanged(String),
    /// Copyright field changed
    CopyrightChanged(String),
}

/// Preferences window actions.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferencesMessage {
    /// Show the preferences window with the current settings
    Open,
    /// Pending settings edited in the window
    Edit(Preferences),
    /// Keep the pending settings
    Apply,
    /// Drop the pending settings
    Cancel,
}

impl From<FileMessage> for Message {
    fn from(msg: FileMessage) -> Self {
        Message::File(msg)
    }
}

impl From<StateMessage> for Message {
    fn from(msg: StateMessage) -> Self {
        Message::State(msg)
    }
}

impl From<MetadataMessage> for Message {
    fn from(msg: MetadataMessage) -> Self {
        Message::Metadata(msg)
    }
}

impl From<PreferencesMessage> for Message {
    fn from(msg: PreferencesMessage) -> Self {
        Message::Preferences(msg)
    }
}
