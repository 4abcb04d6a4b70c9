//! Key bindings and the `<Modifier-key>` sequence notation.
//!
//! Sequences follow the notation desktop toolkits commonly use for bindings:
//! a bare character (`"a"`), or angle brackets holding optional modifiers and
//! a key name separated by dashes (`"<Return>"`, `"<Control-Shift-s>"`).

use std::fmt;

use bitflags::bitflags;

use crate::error::KeyParseError;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// No modifiers pressed.
        const NONE = 0;
        /// Shift key is pressed.
        const SHIFT = 1 << 0;
        /// Control key is pressed.
        const CTRL = 1 << 1;
        /// Alt key is pressed (Option on macOS).
        const ALT = 1 << 2;
        /// Super/Meta key (Windows key, Cmd on macOS).
        const SUPER = 1 << 3;
    }
}

impl Modifiers {
    /// Create modifiers from individual key states.
    pub fn from_keys(shift: bool, ctrl: bool, alt: bool, super_key: bool) -> Self {
        let mut mods = Modifiers::NONE;
        if shift {
            mods |= Modifiers::SHIFT;
        }
        if ctrl {
            mods |= Modifiers::CTRL;
        }
        if alt {
            mods |= Modifiers::ALT;
        }
        if super_key {
            mods |= Modifiers::SUPER;
        }
        mods
    }

    fn from_modifier_name(name: &str) -> Option<Self> {
        match name {
            "Shift" => Some(Modifiers::SHIFT),
            "Control" | "Ctrl" => Some(Modifiers::CTRL),
            "Alt" | "Option" => Some(Modifiers::ALT),
            "Command" | "Meta" | "Super" | "Win" => Some(Modifiers::SUPER),
            _ => None,
        }
    }
}

/// A key, independent of keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Return,
    Escape,
    Tab,
    BackSpace,
    Delete,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// Function key `F1`..=`F24`.
    F(u8),
}

impl Key {
    fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "Return" | "Enter" => Key::Return,
            "Escape" => Key::Escape,
            "Tab" => Key::Tab,
            "BackSpace" => Key::BackSpace,
            "Delete" => Key::Delete,
            "space" => Key::Space,
            "Up" => Key::Up,
            "Down" => Key::Down,
            "Left" => Key::Left,
            "Right" => Key::Right,
            "Home" => Key::Home,
            "End" => Key::End,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => {
                        let number = name.strip_prefix('F')?.parse::<u8>().ok()?;
                        if !(1..=24).contains(&number) {
                            return None;
                        }
                        Key::F(number)
                    }
                }
            }
        };
        Some(key)
    }

    fn write_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Return => f.write_str("Return"),
            Key::Escape => f.write_str("Escape"),
            Key::Tab => f.write_str("Tab"),
            Key::BackSpace => f.write_str("BackSpace"),
            Key::Delete => f.write_str("Delete"),
            Key::Space => f.write_str("space"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::F(n) => write!(f, "F{}", n),
        }
    }
}

/// A key plus the exact set of modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyBinding {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Binding with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Binding with the Control modifier.
    pub fn ctrl(key: Key) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    /// Parse a key sequence such as `"<Control-s>"` or `"q"`.
    pub fn parse(sequence: &str) -> Result<Self, KeyParseError> {
        if sequence.is_empty() {
            return Err(KeyParseError::new(sequence, "empty sequence"));
        }

        let Some(inner) = sequence
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
        else {
            let mut chars = sequence.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) if c != '<' => Ok(Self::key(Key::Char(c))),
                _ => Err(KeyParseError::new(
                    sequence,
                    "expected a single character or a <...> sequence",
                )),
            };
        };

        // "<->" would otherwise split into two empty parts; a lone dash key
        // is written "<minus>" in the usual notation, accept both.
        let (prefix, key_name) = match inner.rsplit_once('-') {
            Some((prefix, "")) if prefix.ends_with('-') || prefix.is_empty() => {
                (prefix.trim_end_matches('-'), "-")
            }
            Some((prefix, key)) => (prefix, key),
            None => ("", inner),
        };

        if key_name.is_empty() {
            return Err(KeyParseError::new(sequence, "missing key name"));
        }

        let mut modifiers = Modifiers::NONE;
        for part in prefix.split('-').filter(|part| !part.is_empty()) {
            // "Key" and "KeyPress" are event-type prefixes, not modifiers
            if part == "Key" || part == "KeyPress" {
                continue;
            }
            let Some(modifier) = Modifiers::from_modifier_name(part) else {
                return Err(KeyParseError::new(sequence, "unknown modifier"));
            };
            modifiers |= modifier;
        }

        let key = match key_name {
            "minus" => Key::Char('-'),
            name => {
                Key::from_name(name).ok_or_else(|| KeyParseError::new(sequence, "unknown key name"))?
            }
        };

        Ok(Self { key, modifiers })
    }

    /// Check if this binding matches the given key and modifiers.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key == key && self.modifiers == modifiers
    }
}

impl std::str::FromStr for KeyBinding {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        if self.modifiers.contains(Modifiers::CTRL) {
            f.write_str("Control-")?;
        }
        if self.modifiers.contains(Modifiers::ALT) {
            f.write_str("Alt-")?;
        }
        if self.modifiers.contains(Modifiers::SHIFT) {
            f.write_str("Shift-")?;
        }
        if self.modifiers.contains(Modifiers::SUPER) {
            f.write_str("Command-")?;
        }
        match self.key {
            Key::Char('-') => f.write_str("minus")?,
            key => key.write_name(f)?,
        }
        f.write_str(">")
    }
}
