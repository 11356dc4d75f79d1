//! Platform-independent key representation

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Platform-independent key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Key {
    // Printable text
    Char(char),

    // Navigation
    Left,
    Right,
    Up,
    Down,
    Home,
    End,

    // Editing
    Enter,
    Backspace,
    Delete,
    Tab,
    ShiftTab,

    // Ctrl-/ or Cmd-/
    ToggleComment,
}

impl Key {
    /// Convert an ASCII byte to a Key (for terminal and test hosts)
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            0x08 | 0x7F => Some(Key::Backspace),
            b'\r' | b'\n' => Some(Key::Enter),
            b'\t' => Some(Key::Tab),
            0x1F => Some(Key::ToggleComment),
            ch if (0x20..0x7F).contains(&ch) => Some(Key::Char(ch as char)),
            _ => None,
        }
    }

    /// Keys for typing `text` one character at a time
    pub fn typed(text: &str) -> impl Iterator<Item = Key> + '_ {
        text.chars().map(|ch| match ch {
            '\n' => Key::Enter,
            '\t' => Key::Tab,
            ch => Key::Char(ch),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ascii() {
        assert_eq!(Key::from_ascii(b'('), Some(Key::Char('(')));
        assert_eq!(Key::from_ascii(b' '), Some(Key::Char(' ')));
        assert_eq!(Key::from_ascii(b'\r'), Some(Key::Enter));
        assert_eq!(Key::from_ascii(0x7F), Some(Key::Backspace));
        assert_eq!(Key::from_ascii(b'\t'), Some(Key::Tab));
        assert_eq!(Key::from_ascii(0x1F), Some(Key::ToggleComment));
        assert_eq!(Key::from_ascii(0x1B), None);
    }

    #[test]
    fn test_typed() {
        let keys: Vec<Key> = Key::typed("a\n\t").collect();
        assert_eq!(keys, vec![Key::Char('a'), Key::Enter, Key::Tab]);
    }
}
