//! Theme system for the RSI editor.
//!
//! Provides dark and light theme support on top of egui's built-in visuals.

use eframe::egui;

/// Theme choice - dark or light mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Dark,
    Light,
}

impl ThemeChoice {
    /// Theme matching the `dark_theme` preference.
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            ThemeChoice::Dark
        } else {
            ThemeChoice::Light
        }
    }

    /// Install this theme on the egui context.
    pub fn apply(self, ctx: &egui::Context) {
        let theme = match self {
            ThemeChoice::Dark => egui::Theme::Dark,
            ThemeChoice::Light => egui::Theme::Light,
        };
        ctx.set_theme(theme);
        log::debug!("Theme set to {:?}", self);
    }

    /// Color for error lines in the status bar.
    pub fn error_color(self) -> egui::Color32 {
        match self {
            ThemeChoice::Dark => egui::Color32::from_rgb(235, 110, 100),
            ThemeChoice::Light => egui::Color32::from_rgb(180, 30, 20),
        }
    }

    /// Color for the unsaved-changes marker.
    pub fn dirty_color(self) -> egui::Color32 {
        match self {
            ThemeChoice::Dark => egui::Color32::from_rgb(230, 190, 90),
            ThemeChoice::Light => egui::Color32::from_rgb(160, 110, 0),
        }
    }
}
