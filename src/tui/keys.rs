use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    FocusLeft,
    FocusRight,
    Activate,
    PreviousPage,
    NextPage,
    Reload,
    ScrollUp,
    ScrollDown,
}

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub keys: Vec<KeyCode>,
    pub modifiers: KeyModifiers,
    pub label: String,
    pub description: String,
}

impl KeyBinding {
    pub fn new(keys: &[KeyCode], modifiers: KeyModifiers, label: &str, description: &str) -> Self {
        Self {
            keys: keys.to_vec(),
            modifiers,
            label: label.to_string(),
            description: description.to_string(),
        }
    }

    /// Shift is ignored so `?` and `]` match on every layout
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.contains(&event.code)
            && event.modifiers.difference(KeyModifiers::SHIFT) == self.modifiers
    }
}

/// Application key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub quit: KeyBinding,
    pub force_quit: KeyBinding,
    pub help: KeyBinding,
    pub focus_left: KeyBinding,
    pub focus_right: KeyBinding,
    pub activate: KeyBinding,
    pub previous_page: KeyBinding,
    pub next_page: KeyBinding,
    pub reload: KeyBinding,
    pub scroll_up: KeyBinding,
    pub scroll_down: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        let none = KeyModifiers::NONE;
        Self {
            quit: KeyBinding::new(&[KeyCode::Char('q'), KeyCode::Esc], none, "q/Esc", "Quit"),
            force_quit: KeyBinding::new(
                &[KeyCode::Char('c')],
                KeyModifiers::CONTROL,
                "Ctrl+C",
                "Quit",
            ),
            help: KeyBinding::new(&[KeyCode::Char('?')], none, "?", "Show/hide help"),
            focus_left: KeyBinding::new(
                &[KeyCode::Left, KeyCode::Char('h')],
                none,
                "←/h",
                "Focus previous control",
            ),
            focus_right: KeyBinding::new(
                &[KeyCode::Right, KeyCode::Char('l')],
                none,
                "→/l",
                "Focus next control",
            ),
            activate: KeyBinding::new(
                &[KeyCode::Enter, KeyCode::Char(' ')],
                none,
                "Enter/Space",
                "Press focused control",
            ),
            previous_page: KeyBinding::new(
                &[KeyCode::Char('['), KeyCode::PageUp],
                none,
                "[/PgUp",
                "Previous page",
            ),
            next_page: KeyBinding::new(
                &[KeyCode::Char(']'), KeyCode::PageDown],
                none,
                "]/PgDn",
                "Next page",
            ),
            reload: KeyBinding::new(&[KeyCode::Char('r')], none, "r", "Reload page"),
            scroll_up: KeyBinding::new(
                &[KeyCode::Up, KeyCode::Char('k')],
                none,
                "↑/k",
                "Scroll cards up",
            ),
            scroll_down: KeyBinding::new(
                &[KeyCode::Down, KeyCode::Char('j')],
                none,
                "↓/j",
                "Scroll cards down",
            ),
        }
    }
}

impl KeyMap {
    fn bindings(&self) -> [(&KeyBinding, Action); 11] {
        [
            (&self.force_quit, Action::Quit),
            (&self.quit, Action::Quit),
            (&self.help, Action::ToggleHelp),
            (&self.focus_left, Action::FocusLeft),
            (&self.focus_right, Action::FocusRight),
            (&self.activate, Action::Activate),
            (&self.previous_page, Action::PreviousPage),
            (&self.next_page, Action::NextPage),
            (&self.reload, Action::Reload),
            (&self.scroll_up, Action::ScrollUp),
            (&self.scroll_down, Action::ScrollDown),
        ]
    }

    /// Resolve a key press to an action
    pub fn action(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings()
            .into_iter()
            .find(|(binding, _)| binding.matches(event))
            .map(|(_, action)| action)
    }

    /// Get help text for all key bindings
    pub fn help_text(&self) -> String {
        self.bindings()
            .iter()
            .skip(1)
            .map(|(binding, _)| format!("{:<12} {}", binding.label, binding.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
