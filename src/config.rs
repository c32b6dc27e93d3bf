use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::types::Velocity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pause between animation steps.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,
    /// Shrink the background (and sprites with it) to fit the terminal.
    #[serde(default = "default_fit_to_terminal")]
    pub fit_to_terminal: bool,
    #[serde(default = "default_sprites")]
    pub sprites: Vec<SpriteConfig>,
    #[serde(default)]
    pub key_bindings: KeyBindings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteConfig {
    pub path: PathBuf,
    pub dx: i32,
    pub dy: i32,
}

impl SpriteConfig {
    pub fn velocity(&self) -> Velocity {
        Velocity::new(self.dx, self.dy)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_fullscreen")]
    pub fullscreen: String,
}

fn default_frame_delay_ms() -> u64 { 5 }
fn default_fit_to_terminal() -> bool { true }
fn default_fullscreen() -> String { "F11".into() }

fn default_sprites() -> Vec<SpriteConfig> {
    [("ball_red.png", -3, -3), ("ball_green.png", -2, 3), ("ball_blue.png", 2, -3)]
        .into_iter()
        .map(|(path, dx, dy)| SpriteConfig { path: path.into(), dx, dy })
        .collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            fullscreen: default_fullscreen(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            frame_delay_ms: default_frame_delay_ms(),
            fit_to_terminal: default_fit_to_terminal(),
            sprites: default_sprites(),
            key_bindings: KeyBindings::default(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("invalid config {} ({e}), using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("spriteblit");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Alt-") {
        return event.modifiers.contains(KeyModifiers::ALT) && matches_key(rest, event.code);
    }

    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        return event.modifiers.contains(KeyModifiers::CONTROL) && matches_key(rest, event.code);
    }

    // Plain bindings must not fire with Ctrl or Alt held.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    matches_key(binding, event.code)
}

fn matches_key(name: &str, code: KeyCode) -> bool {
    match name {
        "Enter" => code == KeyCode::Enter,
        "Space" => code == KeyCode::Char(' '),
        "Tab" => code == KeyCode::Tab,
        "Home" => code == KeyCode::Home,
        "End" => code == KeyCode::End,
        s => {
            if let Some(n) = s.strip_prefix('F').and_then(|rest| rest.parse::<u8>().ok()) {
                return code == KeyCode::F(n);
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.frame_delay(), Duration::from_millis(5));
        assert!(config.fit_to_terminal);
        assert_eq!(config.sprites.len(), 3);
        assert_eq!(config.sprites[1].path, PathBuf::from("ball_green.png"));
        assert_eq!(config.sprites[1].velocity(), Velocity::new(-2, 3));
        assert_eq!(config.key_bindings.fullscreen, "F11");
    }

    #[test]
    fn sprites_can_be_replaced() {
        let json = r#"{
            "frame_delay_ms": 16,
            "sprites": [{ "path": "assets/star.png", "dx": 1, "dy": -1 }]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.frame_delay_ms, 16);
        assert_eq!(
            config.sprites,
            vec![SpriteConfig { path: "assets/star.png".into(), dx: 1, dy: -1 }]
        );
    }

    #[test]
    fn function_key_binding() {
        let f11 = KeyEvent::new(KeyCode::F(11), KeyModifiers::NONE);
        assert!(matches_binding("F11", &f11));
        assert!(!matches_binding("F1", &f11));
    }

    #[test]
    fn modifiers_must_match() {
        let ctrl_f = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert!(matches_binding("Ctrl-f", &ctrl_f));
        assert!(!matches_binding("f", &ctrl_f));
        assert!(!matches_binding("Alt-f", &ctrl_f));

        let f = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE);
        assert!(matches_binding("f", &f));
        assert!(!matches_binding("Ctrl-f", &f));
    }
}
