//! Terminal form over the prediction client

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;

pub mod app;
pub mod form_view;
pub mod theme;

pub use app::{App, AppEvent};

use crate::config::ClientConfig;

/// Take over the terminal, run the form until the user quits, and restore the
/// terminal even if the loop failed.
pub async fn run(config: ClientConfig) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("failed to enter alternate screen");
    }

    let result = async {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let mut app = App::new(config);
        app.run(&mut terminal).await
    }
    .await;

    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result
}
