//! Enumerated input actions accepted by the device tools.
//!
//! Names are matched exactly; anything else is rejected rather than mapped to
//! a default.

use std::fmt;
use std::str::FromStr;

use super::DeviceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Back,
    Home,
    Enter,
    Delete,
}

impl KeyEvent {
    pub const NAMES: [&'static str; 4] = ["BACK", "HOME", "ENTER", "DELETE"];

    /// Android `KEYCODE_*` value.
    pub fn keycode(&self) -> u32 {
        match self {
            KeyEvent::Back => 4,
            KeyEvent::Home => 3,
            KeyEvent::Enter => 66,
            KeyEvent::Delete => 67,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyEvent::Back => "BACK",
            KeyEvent::Home => "HOME",
            KeyEvent::Enter => "ENTER",
            KeyEvent::Delete => "DELETE",
        }
    }
}

impl FromStr for KeyEvent {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BACK" => Ok(KeyEvent::Back),
            "HOME" => Ok(KeyEvent::Home),
            "ENTER" => Ok(KeyEvent::Enter),
            "DELETE" => Ok(KeyEvent::Delete),
            other => Err(DeviceError::InvalidArgument(format!("Invalid key: {}", other))),
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A straight-line swipe between two screen points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swipe {
    pub from: (u32, u32),
    pub to: (u32, u32),
}

impl Swipe {
    pub fn args(&self) -> [String; 4] {
        [
            self.from.0.to_string(),
            self.from.1.to_string(),
            self.to.0.to_string(),
            self.to.1.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    pub const NAMES: [&'static str; 4] = ["up", "down", "left", "right"];

    /// Fixed swipe used for each direction.
    pub fn swipe(&self) -> Swipe {
        let (from, to) = match self {
            ScrollDirection::Up => ((500, 800), (500, 400)),
            ScrollDirection::Down => ((500, 400), (500, 800)),
            ScrollDirection::Left => ((800, 500), (400, 500)),
            ScrollDirection::Right => ((400, 500), (800, 500)),
        };
        Swipe { from, to }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
            ScrollDirection::Left => "left",
            ScrollDirection::Right => "right",
        }
    }
}

impl FromStr for ScrollDirection {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(ScrollDirection::Up),
            "down" => Ok(ScrollDirection::Down),
            "left" => Ok(ScrollDirection::Left),
            "right" => Ok(ScrollDirection::Right),
            other => Err(DeviceError::InvalidArgument(format!(
                "Invalid direction: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Quote text for `input text`, which is evaluated by the device shell.
pub fn quote_text(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}
