//! RSI editor
//!
//! A desktop application for viewing and lightly editing Robust Station Image
//! sprite bundles: browse a bundle's states, rename them in place and edit its
//! license and copyright.

pub mod app;
pub mod config;
pub mod constants;
pub mod dialogs;
pub mod document;
pub mod editor;
pub mod handlers;
pub mod message;
pub mod theme;
mod ui;
pub mod view;
pub mod widget_state;

pub use app::RsiEditorApp;
pub use document::Document;
pub use editor::{Editor, RenameOutcome};
