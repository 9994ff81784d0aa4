//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, renders the UI, and
//! translates keyboard events into `core::action::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One blocking read per iteration, then dispatch, then draw if anything
//! changed. Backend calls made by the dispatcher are awaited inline, so the
//! loop is single-threaded end to end: no tasks, no timers, no channels.
//!
//! ## Terminal Lifetime
//!
//! `TerminalSession` enters raw mode and the alternate screen on creation
//! and restores both (and the cursor) when dropped, so every exit path
//! (quit, I/O error via `?`, panic through ratatui's hook) leaves the
//! terminal usable.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::Arc;

use crossterm::cursor::Show;
use crossterm::execute;
use log::{info, warn};
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;

use crate::backend::ChatBackend;
use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::directory::Directory;
use crate::core::dispatch::dispatch;
use crate::core::state::App;
use crate::tui::event::{TuiEvent, read_event};
use crate::tui::ui::Geometry;

struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    fn enter() -> Self {
        let terminal = ratatui::init();
        info!("Terminal entered raw mode");
        Self { terminal }
    }

    fn geometry(&self) -> std::io::Result<Geometry> {
        let size = self.terminal.size()?;
        Ok(Geometry::new(Rect::new(0, 0, size.width, size.height)))
    }

    fn draw(&mut self, app: &App, geometry: &Geometry) -> std::io::Result<()> {
        self.terminal
            .draw(|f| ui::draw_ui(f, app, geometry))
            .map(|_| ())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        ratatui::restore();
        if let Err(e) = execute!(stdout(), Show) {
            warn!("Failed to show cursor on exit: {e}");
        }
        info!("Terminal restored");
    }
}

/// Run the chat UI until the user interrupts it.
///
/// `directory` must already be loaded: anything fatal (bad token) has to be
/// reported before the terminal is taken over.
pub async fn run(
    config: &ResolvedConfig,
    backend: Arc<dyn ChatBackend>,
    directory: Directory,
) -> std::io::Result<()> {
    let mut session = TerminalSession::enter();
    let mut geometry = session.geometry()?;
    let mut app = App::from_config(directory, config, geometry.viewports());

    session.draw(&app, &geometry)?;

    loop {
        let action = match read_event()? {
            TuiEvent::Resize(width, height) => {
                geometry = Geometry::new(Rect::new(0, 0, width, height));
                Action::Resize(geometry.viewports())
            }
            event => match event.into_action() {
                Some(action) => action,
                None => continue,
            },
        };

        let result = dispatch(&mut app, backend.as_ref(), action).await;
        if result.quit {
            break;
        }
        if result.redraw.any() {
            session.draw(&app, &geometry)?;
        }
    }

    Ok(())
}
