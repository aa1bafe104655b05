//! Modal and non-modal dialog widgets for terminal UIs
//!
//! The crate centers on [`DialogWidget`]: a self-contained component that can
//! be shown, hidden and awaited for a user confirmation decision. Visibility
//! is a question of render-tree membership in the widget's private
//! [`SceneTree`]; a modal presentation inserts a backdrop layer beneath the
//! dialog body, and lifecycle notifications fire strictly after each tree
//! mutation so observers always see completed state.
//!
//! ```no_run
//! use colloquy::{DialogConfig, DialogWidget};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let mut dialog = DialogWidget::new(
//!     DialogConfig::new("quit")
//!         .with_title("Confirm Quit")
//!         .modal(true)
//!         .can_ignore(true),
//! )?;
//! dialog.set_content(vec!["Are you sure you want to quit?".to_string()]);
//!
//! dialog.show();
//! let confirmed = dialog.wait();
//! // ... run the event loop; confirm/cancel actions settle the future ...
//! if confirmed.await {
//!     // quit
//! }
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod dialog;
pub mod events;
pub mod scene;
pub mod theme;

pub use component::{Component, ComponentState};
pub use dialog::{
    Confirmation, DialogConfig, DialogError, DialogEvent, DialogId, DialogLayout, DialogObserver,
    DialogPosition, DialogResult, DialogSize, DialogWidget,
};
pub use events::{Event, EventHandler};
pub use scene::{NodeId, SceneTree, StyleSheet};
pub use theme::Theme;

use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;

pub type Backend = CrosstermBackend<io::Stdout>;
pub type Frame<'a> = ratatui::Frame<'a>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
