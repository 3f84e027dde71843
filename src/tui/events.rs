use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

use crate::loader::LoadEvent;

/// Application events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Mouse input event
    Mouse(MouseEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick event
    Tick,

    /// Progress from a background page load
    Load(LoadEvent),
}

/// Merges terminal input, ticks and page-load progress into one stream
pub struct EventHandler {
    /// Event receiver channel
    receiver: mpsc::UnboundedReceiver<Event>,

    /// Event sender channel
    sender: mpsc::UnboundedSender<Event>,

    /// Tick interval for periodic events
    tick_interval: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            receiver,
            sender,
            tick_interval,
        }
    }

    /// Start reading terminal input and emitting ticks
    pub fn start(&self) {
        let input = self.sender.clone();
        std::thread::spawn(move || read_terminal_events(input));

        let ticks = self.sender.clone();
        let period = self.tick_interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if ticks.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
    }

    /// Feed page-load progress into the event stream
    pub fn forward_loads(&self, mut loads: mpsc::UnboundedReceiver<LoadEvent>) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            while let Some(event) = loads.recv().await {
                if sender.send(Event::Load(event)).is_err() {
                    break;
                }
            }
        });
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

/// Blocking input loop; exits once the application stops listening
fn read_terminal_events(sender: mpsc::UnboundedSender<Event>) {
    loop {
        match crossterm::event::poll(Duration::from_millis(200)) {
            Ok(true) => match crossterm::event::read() {
                Ok(event) => {
                    if let Some(event) = convert_crossterm_event(event) {
                        if sender.send(event).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    warn!("Failed to read terminal event: {}", e);
                    break;
                }
            },
            Ok(false) => {
                if sender.is_closed() {
                    break;
                }
            }
            Err(e) => {
                warn!("Failed to poll terminal events: {}", e);
                break;
            }
        }
    }
}

/// Convert crossterm events to application events
fn convert_crossterm_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        // Windows also reports key releases
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_key_releases_are_dropped() {
        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(
            convert_crossterm_event(CrosstermEvent::Key(press)),
            Some(Event::Key(_))
        ));

        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(convert_crossterm_event(CrosstermEvent::Key(release)).is_none());
        assert!(convert_crossterm_event(CrosstermEvent::FocusGained).is_none());
    }

    #[tokio::test]
    async fn test_forwarded_loads_arrive_in_order() {
        let mut handler = EventHandler::new(Duration::from_secs(60));
        let (tx, rx) = mpsc::unbounded_channel();
        handler.forward_loads(rx);

        tx.send(LoadEvent::Listed { generation: 1, total_count: 40 }).unwrap();
        tx.send(LoadEvent::Finished { generation: 1, page: 1, result: Ok(Vec::new()) })
            .unwrap();

        match handler.next().await {
            Some(Event::Load(event)) => assert!(matches!(event, LoadEvent::Listed { .. })),
            other => panic!("unexpected event: {:?}", other),
        }
        match handler.next().await {
            Some(Event::Load(event)) => assert!(matches!(event, LoadEvent::Finished { .. })),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
