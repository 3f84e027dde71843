//! Terminal User Interface module using ratatui

mod app;
mod components;
mod events;
mod keys;
mod styles;

pub use app::App;
pub use events::EventHandler;

use crate::api::{HttpPokeApi, PokeApi};
use crate::config::Config;
use crate::loader::PageLoader;
use crate::render::Command;
use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

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

/// Put the terminal back before a panic message is printed
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        tracing::error!("Application panicked: {}", panic_info);
        default_hook(panic_info);
    }));
}

/// Main TUI entry point
pub async fn run(config: &Config, start_page: u32) -> Result<()> {
    let api: Arc<dyn PokeApi> = Arc::new(HttpPokeApi::new(config)?);
    let (load_sender, load_receiver) = mpsc::unbounded_channel();

    let mut event_handler = EventHandler::new(Duration::from_millis(120));
    event_handler.forward_loads(load_receiver);

    let mut app = App::new(PageLoader::new(api, load_sender));
    app.dispatch(Command::RequestPage(start_page));

    install_panic_hook();
    let mut terminal = init_terminal()?;
    event_handler.start();

    let result = run_app(&mut terminal, &mut app, &mut event_handler).await;

    restore_terminal(&mut terminal)?;
    info!("Terminal restored");
    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        match event_handler.next().await {
            Some(event) => {
                if app.handle_event(event)? {
                    break; // Exit requested
                }
            }
            None => break,
        }
    }
    Ok(())
}
