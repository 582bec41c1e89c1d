mod commands;
mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings, FormCapabilities, GameController, HttpGateway, QuestionForm, SessionEvent,
    SessionState, SettingsOverrides,
};
use shared::domain::{GameType, Strategy};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::{
    commands::{parse_command, session_event, PromptCommand, HELP},
    render::render_form,
};

#[derive(Parser, Debug)]
#[command(about = "Play the guessing game against an Akinator backend")]
struct Args {
    /// Backend root, overrides settings file and environment.
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    game_type: Option<GameType>,
    #[arg(long)]
    strategy: Option<Strategy>,
    #[arg(long)]
    max_depth: Option<u32>,
    /// Settings file, defaults to ./akinator.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    settings.apply_overrides(SettingsOverrides {
        base_url: args.base_url,
        game_type: args.game_type,
        strategy: args.strategy,
        max_depth: args.max_depth,
    });

    let gateway = HttpGateway::from_settings(&settings).context("invalid backend settings")?;
    info!(base_url = %settings.base_url, "desktop: starting");
    let mut controller = GameController::new(
        Arc::new(gateway),
        SessionState::new(settings.game_type, settings.strategy, settings.max_depth),
    );
    let capabilities = FormCapabilities::full();

    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    controller
        .dispatch(SessionEvent::StartSession(settings.game_type))
        .await;

    loop {
        let state = controller.state();
        let form = QuestionForm::new(state, &capabilities);
        stdout
            .write_all(render_form(&form, &state.detail).as_bytes())
            .await?;
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match command {
            PromptCommand::Quit => break,
            PromptCommand::Help => {
                println!("{HELP}");
                continue;
            }
            _ => {}
        }
        match session_event(&command, &form) {
            Ok(Some(event)) => {
                controller.dispatch(event).await;
            }
            Ok(None) => {}
            Err(err) => {
                warn!("desktop: rejected command: {err}");
                println!("{err}");
            }
        }
    }
    Ok(())
}
