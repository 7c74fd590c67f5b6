//! Terminal session: raw mode, alternate screen and key polling

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::Duration,
};
use tracing::debug;

/// Longest wait for input before the app gets a tick
pub const TICK_RATE: Duration = Duration::from_millis(100);

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            active: false,
        })
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.terminal.clear()?;
        self.active = true;
        debug!(tick_ms = TICK_RATE.as_millis() as u64, "terminal entered");
        Ok(())
    }

    /// Restore the terminal. Idempotent, and run again on drop.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        self.active = false;
        debug!("terminal restored");
        Ok(())
    }

    /// Next key press or resize, or `None` once `TICK_RATE` passes quietly
    pub fn next_event(&self) -> Result<Option<Event>> {
        if !event::poll(TICK_RATE)? {
            return Ok(None);
        }
        match event::read()? {
            // Release and repeat events are reported on some platforms
            Event::Key(key) if key.kind != KeyEventKind::Press => Ok(None),
            event => Ok(Some(event)),
        }
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
