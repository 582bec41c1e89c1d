mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use client_core::{load_settings, ClientSettings, SessionState, SettingsOverrides};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::AkinatorApp;

#[derive(Parser, Debug)]
#[command(about = "Graphical client for the Akinator guessing backend")]
struct Args {
    #[arg(long)]
    base_url: Option<String>,
    /// Settings file, defaults to ./akinator.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_settings(args: &Args) -> ClientSettings {
    let mut settings = match load_settings(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!("failed to load settings, using defaults: {err:#}");
            ClientSettings::default()
        }
    };
    settings.apply_overrides(SettingsOverrides {
        base_url: args.base_url.clone(),
        ..SettingsOverrides::default()
    });
    settings
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();
    let settings = resolve_settings(&args);
    let initial = SessionState::new(settings.game_type, settings.strategy, settings.max_depth);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Akinator")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Akinator",
        options,
        Box::new(|_cc| Ok(Box::new(AkinatorApp::new(cmd_tx, ui_rx, initial)))),
    )
}
