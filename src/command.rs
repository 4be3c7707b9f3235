use std::fmt;

/// Named editing commands produced by key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    Backspace,
    Delete,
    SplitBlock,
    Undo,
    Redo,
    SelectAll,
}

impl KeyCommand {
    pub fn name(self) -> &'static str {
        match self {
            KeyCommand::Bold => "bold",
            KeyCommand::Italic => "italic",
            KeyCommand::Underline => "underline",
            KeyCommand::Code => "code",
            KeyCommand::Strikethrough => "strikethrough",
            KeyCommand::Backspace => "backspace",
            KeyCommand::Delete => "delete",
            KeyCommand::SplitBlock => "split-block",
            KeyCommand::Undo => "undo",
            KeyCommand::Redo => "redo",
            KeyCommand::SelectAll => "select-all",
        }
    }
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a handler consumed an input event. `NotHandled` lets the default
/// behaviour run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    Handled,
    NotHandled,
}

impl HandleResult {
    pub fn is_handled(self) -> bool {
        self == HandleResult::Handled
    }
}

impl From<bool> for HandleResult {
    fn from(handled: bool) -> Self {
        if handled {
            HandleResult::Handled
        } else {
            HandleResult::NotHandled
        }
    }
}
