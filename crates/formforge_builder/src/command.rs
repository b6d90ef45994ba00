//! Keyboard shortcuts for the editor.

use std::fmt;

/// An editor action triggered from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    /// Duplicate the selected field.
    DuplicateSelected,
    /// Undo the last edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
    /// Remove the selected field.
    RemoveSelected,
}

/// A key press with its modifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// Key name as reported by the host (`"z"`, `"Delete"`, ...).
    pub key: String,
    /// Control held.
    pub ctrl: bool,
    /// Command/Windows key held.
    pub meta: bool,
    /// Shift held.
    pub shift: bool,
    /// Alt/Option held.
    pub alt: bool,
}

impl KeyChord {
    /// Creates a chord with no modifiers.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Adds Control.
    #[must_use]
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Adds Meta.
    #[must_use]
    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Adds Shift.
    #[must_use]
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Parses `"Ctrl+Shift+Z"`-style text. Modifier names are
    /// case-insensitive; `Cmd` is an alias for `Meta`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut chord = Self::default();
        let mut parts = text.split('+').map(str::trim).peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                if part.is_empty() {
                    return None;
                }
                chord.key = part.to_string();
                break;
            }
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => chord.ctrl = true,
                "meta" | "cmd" | "command" | "super" => chord.meta = true,
                "shift" => chord.shift = true,
                "alt" | "option" => chord.alt = true,
                _ => return None,
            }
        }
        Some(chord)
    }

    fn is_key(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name)
    }

    /// Maps the chord to a command.
    ///
    /// Delete and Backspace only remove a field when no text input has
    /// focus.
    #[must_use]
    pub fn command(&self, input_focused: bool) -> Option<EditorCommand> {
        let primary = self.ctrl || self.meta;
        if primary && self.is_key("d") {
            Some(EditorCommand::DuplicateSelected)
        } else if primary && self.is_key("z") {
            Some(if self.shift {
                EditorCommand::Redo
            } else {
                EditorCommand::Undo
            })
        } else if primary && self.is_key("y") {
            Some(EditorCommand::Redo)
        } else if (self.is_key("Delete") || self.is_key("Backspace")) && !input_focused {
            Some(EditorCommand::RemoveSelected)
        } else {
            None
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (held, name) in [
            (self.ctrl, "Ctrl"),
            (self.meta, "Meta"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
        ] {
            if held {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(&self.key)
    }
}
