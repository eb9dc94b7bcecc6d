use std::{collections::HashMap, path::PathBuf};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{
    de::{self, Deserializer},
    Deserialize,
};

use crate::{
    action::{Action, GameAction},
    game::GameSettings,
    pages::PageId,
};

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub game: GameSettings,
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        let default_config: Config =
            serde_yaml::from_str(CONFIG).map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
        let data_dir = crate::utils::get_data_dir();
        let config_dir = crate::utils::get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("_config_dir", config_dir.to_string_lossy().to_string())?;

        let config_files = [("config.yaml", config::FileFormat::Yaml), ("config.json5", config::FileFormat::Json5)];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(config::File::from(config_dir.join(file)).format(*format).required(false));
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!("No configuration file found in {}, using defaults", config_dir.display());
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        for (page, default_bindings) in default_config.keybindings.pages.iter() {
            let user_bindings = cfg.keybindings.pages.entry(page.clone()).or_default();
            for (key, action) in default_bindings.iter() {
                user_bindings.entry(*key).or_insert_with(|| action.clone());
            }
        }
        for (key, action) in default_config.keybindings.global.iter() {
            cfg.keybindings.global.entry(*key).or_insert_with(|| action.clone());
        }

        Ok(cfg)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawKeyBindings {
    #[serde(default)]
    pub global: HashMap<String, String>,
    #[serde(default)]
    pub pages: HashMap<String, HashMap<String, String>>,
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct PageKeyBindings(pub HashMap<KeyEvent, Action>);

#[derive(Clone, Debug, Default)]
pub struct KeyBindings {
    pub global: PageKeyBindings,
    pub pages: HashMap<PageId, PageKeyBindings>,
}

impl KeyBindings {
    /// Global bindings win over the page's own.
    pub fn lookup(&self, page: &PageId, key: &KeyEvent) -> Option<&Action> {
        self.global.get(key).or_else(|| self.pages.get(page).and_then(|bindings| bindings.get(key)))
    }
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawKeyBindings::deserialize(deserializer)?;

        let global = parse_bindings(&raw.global, |name| serde_plain::from_str::<Action>(name))
            .map_err(de::Error::custom)?;

        let mut pages = HashMap::new();
        for (page, bindings) in raw.pages.iter() {
            let page_id: PageId = serde_plain::from_str(page).map_err(de::Error::custom)?;
            let bindings = match page_id {
                PageId::Game => {
                    parse_bindings(bindings, |name| serde_plain::from_str::<GameAction>(name).map(Action::Game))
                },
            }
            .map_err(de::Error::custom)?;
            pages.insert(page_id, bindings);
        }

        Ok(KeyBindings { global, pages })
    }
}

fn parse_bindings<F>(raw: &HashMap<String, String>, parse_action: F) -> Result<PageKeyBindings, String>
where
    F: Fn(&str) -> Result<Action, serde_plain::Error>,
{
    raw.iter()
        .map(|(key, name)| {
            let action = parse_action(name).map_err(|e| format!("Unknown action `{name}`: {e}"))?;
            Ok((parse_key_event(key)?, action))
        })
        .collect::<Result<HashMap<_, _>, String>>()
        .map(PageKeyBindings)
}

pub fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    if raw.chars().filter(|c| *c == '>').count() != raw.chars().filter(|c| *c == '<').count() {
        return Err(format!("Unable to parse `{}`", raw));
    }
    let raw = if !raw.contains("><") {
        let raw = raw.strip_prefix('<').unwrap_or(raw);
        let raw = raw.strip_prefix('>').unwrap_or(raw);
        raw
    } else {
        raw
    };
    let raw = raw.trim_start_matches('<').trim_end_matches('>');

    let raw_lower = raw.to_ascii_lowercase();
    let (remaining, modifiers) = extract_modifiers(&raw_lower);
    parse_key_code_with_modifiers(remaining, modifiers)
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        match current {
            rest if rest.starts_with("ctrl-") => {
                modifiers.insert(KeyModifiers::CONTROL);
                current = &rest[5..];
            },
            rest if rest.starts_with("alt-") => {
                modifiers.insert(KeyModifiers::ALT);
                current = &rest[4..];
            },
            rest if rest.starts_with("shift-") => {
                modifiers.insert(KeyModifiers::SHIFT);
                current = &rest[6..];
            },
            _ => break,
        };
    }

    (current, modifiers)
}

fn parse_key_code_with_modifiers(raw: &str, mut modifiers: KeyModifiers) -> Result<KeyEvent, String> {
    let c = match raw {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        },
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        "hyphen" => KeyCode::Char('-'),
        "minus" => KeyCode::Char('-'),
        "tab" => KeyCode::Tab,
        f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(format!("Unable to parse {raw}")),
        },
        c if c.chars().count() == 1 => {
            let mut c = c.chars().next().unwrap_or_default();
            if modifiers.contains(KeyModifiers::SHIFT) {
                c = c.to_ascii_uppercase();
            }
            KeyCode::Char(c)
        },
        _ => return Err(format!("Unable to parse {raw}")),
    };
    Ok(KeyEvent::new(c, modifiers))
}

pub fn key_event_to_string(key_event: &KeyEvent) -> String {
    let char;
    let key_code = match key_event.code {
        KeyCode::Backspace => "Backspace",
        KeyCode::Enter => "Enter",
        KeyCode::Left => "Left",
        KeyCode::Right => "Right",
        KeyCode::Up => "Up",
        KeyCode::Down => "Down",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Tab => "Tab",
        KeyCode::BackTab => "BackTab",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::F(c) => {
            char = format!("F({c})");
            &char
        },
        KeyCode::Char(' ') => "Space",
        KeyCode::Char(c) => {
            char = c.to_string();
            &char
        },
        KeyCode::Esc => "Esc",
        _ => "",
    };

    let mut modifiers = Vec::with_capacity(3);

    if key_event.modifiers.intersects(KeyModifiers::CONTROL) {
        modifiers.push("Ctrl");
    }

    if key_event.modifiers.intersects(KeyModifiers::SHIFT) {
        modifiers.push("Shift");
    }

    if key_event.modifiers.intersects(KeyModifiers::ALT) {
        modifiers.push("Alt");
    }

    let mut key = modifiers.join("-");

    if !key.is_empty() {
        key.push('-');
    }
    key.push_str(key_code);

    key
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_default_config() {
        let c: Config = serde_yaml::from_str(CONFIG).unwrap();
        assert_eq!(c.keybindings.lookup(&PageId::Game, &key(KeyCode::Char(' '))), Some(&Action::Game(GameAction::Flap)));
        assert_eq!(c.keybindings.lookup(&PageId::Game, &key(KeyCode::Enter)), Some(&Action::Game(GameAction::Restart)));
        assert_eq!(
            c.keybindings.lookup(&PageId::Game, &KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(&Action::Quit)
        );
        assert_eq!(c.keybindings.lookup(&PageId::Game, &key(KeyCode::Char('x'))), None);
        assert_eq!(c.game, GameSettings::default());
    }

    #[test]
    fn test_config() -> Result<()> {
        let c = Config::new()?;
        assert!(c.keybindings.pages.contains_key(&PageId::Game));
        assert_eq!(c.keybindings.global.get(&key(KeyCode::Char('q'))), Some(&Action::Quit));
        Ok(())
    }

    #[test]
    fn test_global_wins_over_page() {
        let yaml = r#"
global:
  "<space>": Quit
pages:
  Game:
    "<space>": Flap
"#;
        let bindings: KeyBindings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(bindings.lookup(&PageId::Game, &key(KeyCode::Char(' '))), Some(&Action::Quit));
    }

    #[test]
    fn test_unknown_action_is_an_error() {
        let yaml = r#"
pages:
  Game:
    "<space>": Jump
"#;
        assert!(serde_yaml::from_str::<KeyBindings>(yaml).is_err());
    }

    #[test]
    fn test_game_section_overrides() {
        let c: Config = serde_yaml::from_str("game:\n  gravity: 0.3\n").unwrap();
        assert_eq!(c.game.gravity, 0.3);
        assert_eq!(c.game.scroll_speed, GameSettings::default().scroll_speed);
    }

    #[test]
    fn test_simple_keys() {
        assert_eq!(parse_key_event("a").unwrap(), key(KeyCode::Char('a')));
        assert_eq!(parse_key_event("enter").unwrap(), key(KeyCode::Enter));
        assert_eq!(parse_key_event("<space>").unwrap(), key(KeyCode::Char(' ')));
        assert_eq!(parse_key_event("f5").unwrap(), key(KeyCode::F(5)));
    }

    #[test]
    fn test_with_modifiers() {
        assert_eq!(parse_key_event("ctrl-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(parse_key_event("alt-enter").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
        assert_eq!(parse_key_event("shift-esc").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::SHIFT));
    }

    #[test]
    fn test_multiple_modifiers() {
        assert_eq!(
            parse_key_event("ctrl-alt-a").unwrap(),
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)
        );
    }

    #[test]
    fn test_key_event_to_string() {
        let event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT);
        insta::assert_snapshot!(key_event_to_string(&event), @"Ctrl-Alt-a");
        insta::assert_snapshot!(key_event_to_string(&key(KeyCode::Char(' '))), @"Space");
    }

    #[test]
    fn test_invalid_keys() {
        assert!(parse_key_event("invalid-key").is_err());
        assert!(parse_key_event("ctrl-invalid-key").is_err());
        assert!(parse_key_event("f13").is_err());
        assert!(parse_key_event("<a").is_err());
    }

    #[test]
    fn test_case_insensitivity() {
        assert_eq!(parse_key_event("CTRL-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(parse_key_event("AlT-eNtEr").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
    }
}
