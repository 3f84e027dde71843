use crate::loader::{LoadEvent, LoadOutcome, PageLoader, PageState};
use crate::render::{CardsView, Command, Renderer};
use crate::tui::{
    components::{cards, pagination},
    events::Event,
    keys::{Action, KeyMap},
    styles::Theme,
    Frame,
};
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing::{debug, error};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    loader: PageLoader,
    renderer: Renderer,
    key_map: KeyMap,
    theme: Theme,
    show_help: bool,

    /// Status message to display
    status_message: Option<String>,

    /// Page whose load is still running
    pending: Option<u32>,
    ticks: usize,

    /// Card rows scrolled past
    scroll: usize,

    /// Layout from the last draw, used for scrolling and mouse hits
    cards_area: Rect,
    control_hits: Vec<pagination::ControlHit>,
}

impl App {
    pub fn new(loader: PageLoader) -> Self {
        Self {
            should_quit: false,
            loader,
            renderer: Renderer::new(),
            key_map: KeyMap::default(),
            theme: Theme::default(),
            show_help: false,
            status_message: None,
            pending: None,
            ticks: 0,
            scroll: 0,
            cards_area: Rect::default(),
            control_hits: Vec::new(),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn page_state(&self) -> PageState {
        self.loader.state()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Carry out a command issued by a pagination control
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::RequestPage(page) => {
                debug!("Dispatching request for page {}", page);
                self.pending = Some(page);
                self.loader.request_page(page);
            }
        }
    }

    /// Handle incoming events; returns true once the app should exit
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            // The next draw picks up the new size
            Event::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
            }
            Event::Tick => {
                self.ticks = self.ticks.wrapping_add(1);
            }
            Event::Load(load_event) => self.handle_load_event(load_event),
        }

        Ok(self.should_quit)
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        let Some(action) = self.key_map.action(&key) else {
            return;
        };

        if self.show_help && action != Action::Quit {
            self.show_help = false;
            return;
        }

        let command = match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::ToggleHelp => {
                self.show_help = true;
                None
            }
            Action::FocusLeft => {
                self.renderer.focus_left();
                None
            }
            Action::FocusRight => {
                self.renderer.focus_right();
                None
            }
            Action::Activate => self.renderer.activate_focused(),
            Action::PreviousPage => self.renderer.activate_previous(),
            Action::NextPage => self.renderer.activate_next(),
            Action::Reload => Some(Command::RequestPage(self.loader.state().current_page)),
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
        };

        if let Some(command) = command {
            self.dispatch(command);
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        // Controls under the help overlay are not clickable
        if self.show_help {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = pagination::hit_test(&self.control_hits, mouse.column, mouse.row);
                if let Some(command) = hit.and_then(|index| self.renderer.activate_at(index)) {
                    self.dispatch(command);
                }
            }
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            MouseEventKind::ScrollDown => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            _ => {}
        }
    }

    fn handle_load_event(&mut self, event: LoadEvent) {
        let Some(outcome) = self.loader.apply(event) else {
            return;
        };
        self.pending = None;

        match outcome {
            LoadOutcome::Ready { page, items } => {
                let state = self.loader.state();
                self.renderer.render_items(&items);
                self.renderer.render_pagination(state.current_page, state.total_pages);
                self.scroll = 0;
                self.status_message = Some(format!(
                    "Page {} of {} | {} Pokémon",
                    page,
                    state.total_pages,
                    items.len()
                ));
            }
            LoadOutcome::Failed { page, error } => {
                error!("Failed to load page {}: {}", page, error);
                self.renderer.render_error(&error);
                self.status_message = Some(format!("Failed to load page {}", page));
            }
        }
    }

    fn max_scroll(&self) -> usize {
        match self.renderer.cards() {
            CardsView::Cards(items) => cards::max_scroll(items.len(), self.cards_area),
            _ => 0,
        }
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(1),    // Cards
                Constraint::Length(3), // Pagination
                Constraint::Length(1), // Status bar
            ])
            .split(frame.size());

        let header = Paragraph::new(" Pokédex ").style(self.theme.header_style());
        frame.render_widget(header, chunks[0]);

        self.cards_area = chunks[1];
        self.scroll = self.scroll.min(self.max_scroll());
        cards::draw(frame, chunks[1], self.renderer.cards(), self.scroll, &self.theme);

        self.control_hits = pagination::draw(
            frame,
            chunks[2],
            self.renderer.pagination(),
            self.renderer.focus(),
            &self.theme,
        );

        self.render_status_bar(frame, chunks[3]);

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    /// Render the status bar
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status_text = match (self.pending, &self.status_message) {
            (Some(page), _) => format!(
                "{} Loading page {}...",
                SPINNER[self.ticks % SPINNER.len()],
                page
            ),
            (None, Some(message)) => message.clone(),
            (None, None) => "Press ? for help | q to quit".to_string(),
        };

        let status_paragraph = Paragraph::new(status_text).style(self.theme.status_bar_style());
        frame.render_widget(status_paragraph, area);
    }

    /// Render help overlay
    fn render_help_overlay(&self, frame: &mut Frame) {
        let help_area = centered_rect(60, 60, frame.size());

        let lines: Vec<Line> = self
            .key_map
            .help_text()
            .lines()
            .map(|line| Line::from(Span::raw(line.to_string())))
            .collect();

        let help_block = Block::default()
            .borders(Borders::ALL)
            .title("Help")
            .style(self.theme.help_style());

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Paragraph::new(lines).block(help_block).style(self.theme.text_style()),
            help_area,
        );
    }
}

/// Create a centered rectangle with given percentage of the screen
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
