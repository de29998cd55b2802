//! Terminal user interface
//!
//! Renders the document produced by the core and feeds user intents back
//! into it. The core never imports anything from this module; disable the
//! `tui` cargo feature for headless library usage.

mod app;
mod theme;

pub use app::*;
pub use theme::*;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::cluster::ClusterExecutor;
use crate::config::Config;

/// Run the TUI until the user quits
pub async fn run_tui(executor: Arc<dyn ClusterExecutor>, config: &Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(executor, config);
    let result = app.run(&mut terminal).await;

    // Always restore the terminal, even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
