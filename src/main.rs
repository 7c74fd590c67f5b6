//! flexia-admin - terminal administration client for the exercise catalog
//!
//! Loads the config, starts file logging and drives the App from terminal
//! events, with a tick whenever input is quiet.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::Event;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let config = Config::load()?;
    init_logging(&config)?;
    tracing::info!(api = %config.api_base_url, "starting flexia-admin");

    // Create app state before touching the terminal so setup errors print normally
    let mut app = App::new(config)?;
    app.init()?;

    // Setup terminal
    let mut tui = Tui::new()?;
    tui.enter()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = %err, "application loop failed");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("flexia-admin stopped");
    Ok(())
}

/// Send logs to a file; the terminal belongs to the UI
fn init_logging(config: &Config) -> Result<()> {
    let path = Config::log_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine log directory"))?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
