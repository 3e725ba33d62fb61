#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The host (a browser, or a test harness) translates its native events into
//! these values before handing them to the drag controller or a split view.
//!
//! # Design Notes
//!
//! - Pointer coordinates are viewport CSS pixels (`clientX`/`clientY`).
//! - `PointerButton` follows the DOM `button` numbering (0, 1, 2).
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

use crate::geometry::Point;

bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Pointer button, numbered like DOM `PointerEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl PointerButton {
    /// Map a DOM `button` index.
    #[must_use]
    pub const fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// A pointer (mouse, pen) event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Host pointer id. `0` is never produced by browsers for real pointers.
    pub pointer_id: u32,
    pub button: PointerButton,
    pub position: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a primary-button event for pointer `1` at `(x, y)`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            pointer_id: 1,
            button: PointerButton::Primary,
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    /// Set the pointer id.
    #[must_use]
    pub const fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Keyboard key codes relevant to a focused handle.
///
/// Keys the split view does not react to still get a code so that callers
/// can log them; they are never silently dropped at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Escape,
    Tab,
    Char(char),
    Unidentified,
}

impl KeyCode {
    /// Normalize a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(dom_key: &str) -> Self {
        let mut chars = dom_key.chars();
        if let Some(first) = chars.next()
            && chars.next().is_none()
        {
            return Self::Char(first);
        }

        match dom_key {
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Spacebar" => Self::Char(' '),
            _ => Self::Unidentified,
        }
    }

    /// Whether this is one of the four arrow keys.
    #[must_use]
    pub const fn is_arrow(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Build from DOM `key` plus modifier booleans.
    #[must_use]
    pub fn from_dom(
        dom_key: &str,
        shift: bool,
        alt: bool,
        ctrl: bool,
        meta: bool,
        repeat: bool,
    ) -> Self {
        let mut modifiers = Modifiers::NONE;
        modifiers.set(Modifiers::SHIFT, shift);
        modifiers.set(Modifiers::ALT, alt);
        modifiers.set(Modifiers::CTRL, ctrl);
        modifiers.set(Modifiers::SUPER, meta);
        let kind = if repeat {
            KeyEventKind::Repeat
        } else {
            KeyEventKind::Press
        };
        Self::new(KeyCode::from_dom_key(dom_key))
            .with_modifiers(modifiers)
            .with_kind(kind)
    }
}
