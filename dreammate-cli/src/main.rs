use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use dreammate::{Journal, JournalOptions, RasterCapture, SECTIONS};
use dreammate_dialoguer::{DialoguerBackend, DialoguerError};
use dreammate_raster::GlyphRasterizer;
use dreammate_ratatui::{RatatuiBackend, RatatuiError};
use log::{error, info};

mod cli;
mod config;
mod logging;

use cli::{Cli, Commands};
use config::{Config, Frontend};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let log_path = logging::init(cli.log_file.clone())?;
    info!("starting dream-mate, logging to {}", log_path.display());

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(&cli);

    match cli.command {
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Prompts) => {
            print_prompts();
            Ok(ExitCode::SUCCESS)
        }
        None => journey(&config),
    }
}

fn journey(config: &Config) -> Result<ExitCode> {
    let exporter = config.exporter()?;
    let capture_options = config.capture_options()?;
    let capture: Arc<dyn RasterCapture + Send + Sync> = Arc::new(GlyphRasterizer::new());
    let mut journal = Journal::new(JournalOptions::default().with_typing_delay(config.typing_delay()));

    let result = match config.frontend {
        Frontend::Tui => journal.run(
            RatatuiBackend::new()
                .with_exporter(exporter)
                .with_capture(capture)
                .with_capture_options(capture_options),
        ),
        Frontend::Plain => journal.run(
            DialoguerBackend::new()
                .with_exporter(exporter)
                .with_capture(capture)
                .with_capture_options(capture_options),
        ),
    };

    match result {
        Ok(()) => {
            info!("journey finished");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if is_cancelled(&err) => {
            info!("journey cancelled");
            println!("Your journey is paused. Come back whenever you're ready.");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("journey failed: {err:#}");
            Err(err)
        }
    }
}

fn is_cancelled(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<RatatuiError>(), Some(RatatuiError::Cancelled))
        || matches!(
            err.downcast_ref::<DialoguerError>(),
            Some(DialoguerError::Cancelled)
        )
}

fn print_prompts() {
    for section in &SECTIONS {
        println!(
            "{}. {} {} - {}",
            section.step(),
            section.emoji,
            section.title,
            section.subtitle
        );
        for prompt in section.prompts {
            println!("   - {prompt}");
        }
    }
}
