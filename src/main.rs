//! RSI editor entry point.

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use rsi_editor::RsiEditorApp;
use rsi_editor::config::{AppConfig, LogLevel};
use rsi_editor::constants::WINDOW_TITLE;

/// Viewer and editor for Robust Station Image sprite bundles.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// RSI directory, meta.json or zip archive to open on startup
    path: Option<PathBuf>,

    /// Override the log level from preferences
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default();
    init_logging(cli.log_level.unwrap_or(config.preferences.log_level));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_min_inner_size([640.0, 480.0])
            .with_maximized(true),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(RsiEditorApp::new(cc, config, cli.path)))),
    )
}

/// Install `env_logger`. `RUST_LOG` takes precedence over `level`.
///
/// The logger itself accepts everything so the level can be changed at
/// runtime through `log::set_max_level`.
fn init_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .parse_default_env()
        .init();

    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(level.to_level_filter());
    }
}
