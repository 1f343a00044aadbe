use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Keys the dial responds to, named after DOM `KeyboardEvent.code` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
pub enum DialKey {
    ArrowUp,
    ArrowRight,
    ArrowDown,
    ArrowLeft,
    PageUp,
    PageDown,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Delta(f64),
    ToMin,
    ToMax,
}

// Literal unit deltas, independent of the configured step.
const ARROW_DELTA: f64 = 1.0;
const PAGE_DELTA: f64 = 10.0;

impl DialKey {
    /// Parses a key code; anything the dial does not handle yields `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_str(code).ok()
    }

    pub fn action(self) -> KeyAction {
        match self {
            Self::ArrowUp | Self::ArrowRight => KeyAction::Delta(ARROW_DELTA),
            Self::ArrowDown | Self::ArrowLeft => KeyAction::Delta(-ARROW_DELTA),
            Self::PageUp => KeyAction::Delta(PAGE_DELTA),
            Self::PageDown => KeyAction::Delta(-PAGE_DELTA),
            Self::Home => KeyAction::ToMin,
            Self::End => KeyAction::ToMax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_from_code() {
        assert_eq!(DialKey::from_code("ArrowUp"), Some(DialKey::ArrowUp));
        assert_eq!(DialKey::from_code("PageDown"), Some(DialKey::PageDown));
        assert_eq!(DialKey::from_code("KeyA"), None);
        assert_eq!(DialKey::from_code("Tab"), None);
    }

    #[test]
    fn test_codes_round_trip_through_display() {
        for key in DialKey::iter() {
            assert_eq!(DialKey::from_code(&key.to_string()), Some(key));
        }
    }

    #[test]
    fn test_actions_use_literal_deltas() {
        assert_eq!(DialKey::ArrowRight.action(), KeyAction::Delta(1.0));
        assert_eq!(DialKey::ArrowLeft.action(), KeyAction::Delta(-1.0));
        assert_eq!(DialKey::PageUp.action(), KeyAction::Delta(10.0));
        assert_eq!(DialKey::Home.action(), KeyAction::ToMin);
        assert_eq!(DialKey::End.action(), KeyAction::ToMax);
    }
}
