//! User configuration — keybindings, pagination settings and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/feed-pager/config.toml` (default
//! `~/.config/feed-pager/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the feed view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    JumpTop,
    Refresh,
    TogglePullToRefresh,
    Quit,
}

impl Action {
    /// Ordered list of all actions (config file order).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::JumpTop,
        Action::Refresh,
        Action::TogglePullToRefresh,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::JumpTop => "jump_top",
            Action::Refresh => "refresh",
            Action::TogglePullToRefresh => "toggle_pull_to_refresh",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Named keys shared by the display and config formats:
/// (code, config name, display name).
const NAMED_KEYS: &[(KeyCode, &str, &str)] = &[
    (KeyCode::Char(' '), "Space", "Space"),
    (KeyCode::Up, "Up", "↑"),
    (KeyCode::Down, "Down", "↓"),
    (KeyCode::Left, "Left", "←"),
    (KeyCode::Right, "Right", "→"),
    (KeyCode::Enter, "Enter", "Enter"),
    (KeyCode::Esc, "Esc", "Esc"),
    (KeyCode::Tab, "Tab", "Tab"),
    (KeyCode::Backspace, "Backspace", "Bksp"),
    (KeyCode::Home, "Home", "Home"),
    (KeyCode::End, "End", "End"),
    (KeyCode::PageUp, "PageUp", "PgUp"),
    (KeyCode::PageDown, "PageDown", "PgDn"),
];

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Display string for the status bar (e.g. `"↓"`, `"Ctrl+r"`).
    pub fn display(&self) -> String {
        self.render(|entry| entry.2)
    }

    fn to_config_string(&self) -> String {
        self.render(|entry| entry.1)
    }

    fn render(&self, pick: impl Fn(&(KeyCode, &'static str, &'static str)) -> &'static str) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        match NAMED_KEYS.iter().find(|(code, _, _)| *code == self.code) {
            Some(entry) => s.push_str(pick(entry)),
            None => match self.code {
                KeyCode::Char(c) => s.push(c),
                KeyCode::F(n) => s.push_str(&format!("F{n}")),
                other => s.push_str(&format!("{other:?}")),
            },
        }
        s
    }

    /// Parse a key string like `"Ctrl+r"`, `"PageDown"`, `"j"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let lower = key_part.to_lowercase();
        let code = if let Some((code, _, _)) = NAMED_KEYS
            .iter()
            .find(|(_, name, _)| name.to_lowercase() == lower)
        {
            *code
        } else if lower.starts_with('f') && lower.len() > 1 {
            KeyCode::F(lower[1..].parse().ok()?)
        } else if key_part.chars().count() == 1 {
            KeyCode::Char(key_part.chars().next()?)
        } else {
            return None;
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Attach the pull-to-refresh control at startup.
    pub pull_to_refresh: bool,
    /// Height of the bottom loading indicator.
    pub indicator_rows: usize,
    /// Rows of overscroll at the top that count as a pull.
    pub pull_threshold: usize,
    /// Simulated latency of each fetch.
    pub latency_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            pull_to_refresh: true,
            indicator_rows: 1,
            pull_threshold: 3,
            latency_ms: 600,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::{Char, Down, Esc, Home, Up};
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Action::ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(
            Action::PageDown,
            vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)],
        );
        m.insert(Action::JumpTop, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Action::Refresh, vec![KeyBind::new(Char('r'), n)]);
        m.insert(Action::TogglePullToRefresh, vec![KeyBind::new(Char('p'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Action bound to a key event, preferring the binding with the most
    /// modifiers when several match.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: refresh | {}: pull-to-refresh | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::Refresh),
            self.short_binding(Action::TogglePullToRefresh),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "pull_to_refresh" => {
                    config.pull_to_refresh = value == "true";
                    continue;
                }
                "indicator_rows" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.indicator_rows = v.clamp(1, 5);
                    }
                    continue;
                }
                "pull_threshold" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.pull_threshold = v.clamp(1, 20);
                    }
                    continue;
                }
                "latency_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.latency_ms = v.min(10_000);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# feed-pager configuration".to_string(),
            String::new(),
            "# Pagination".to_string(),
            format!("pull_to_refresh = {}", self.pull_to_refresh),
            format!("indicator_rows = {}", self.indicator_rows),
            format!("pull_threshold = {}", self.pull_threshold),
            format!("latency_ms = {}", self.latency_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// `$XDG_CONFIG_HOME/feed-pager/config.toml`.
pub fn default_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_modifiers_and_named_keys() {
        assert_eq!(
            KeyBind::parse("Ctrl+r"),
            Some(KeyBind::new(KeyCode::Char('r'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            KeyBind::parse("pagedown"),
            Some(KeyBind::new(KeyCode::PageDown, KeyModifiers::NONE))
        );
        assert_eq!(
            KeyBind::parse("F5"),
            Some(KeyBind::new(KeyCode::F(5), KeyModifiers::NONE))
        );
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse("nonsense"), None);
    }

    #[test]
    fn display_and_config_names_differ() {
        let bind = KeyBind::new(KeyCode::Down, KeyModifiers::ALT);
        assert_eq!(bind.display(), "Alt+↓");
        assert_eq!(bind.to_config_string(), "Alt+Down");
    }

    #[test]
    fn match_key_uses_bindings() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::ScrollDown)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Action::Refresh)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parse_clamps_values_and_overrides_bindings() {
        let config = AppConfig::parse_config(
            "# comment\n\
             pull_to_refresh = false\n\
             indicator_rows = 99\n\
             pull_threshold = 0\n\
             refresh = Ctrl+r, F5\n\
             unknown_action = x\n",
        );
        assert!(!config.pull_to_refresh);
        assert_eq!(config.indicator_rows, 5);
        assert_eq!(config.pull_threshold, 1);
        assert_eq!(
            config.bindings[&Action::Refresh],
            vec![
                KeyBind::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::F(5), KeyModifiers::NONE),
            ]
        );
        assert_eq!(config.bindings[&Action::Quit], AppConfig::default_bindings()[&Action::Quit]);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.latency_ms = 50;
        config.pull_to_refresh = false;
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path), config);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load_from(&dir.path().join("absent.toml")), AppConfig::default());
    }
}
