use egui::{Event, Key, Modifiers};

use crate::command::KeyCommand;
use crate::document::Motion;

/// A press of the return key with the modifiers held at the time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReturnEvent {
    pub modifiers: Modifiers,
}

impl ReturnEvent {
    pub fn new(modifiers: Modifiers) -> Self {
        Self { modifiers }
    }

    /// Shift, alt or ctrl turn return into a line break inside the block.
    pub fn is_soft_newline(&self) -> bool {
        self.modifiers.shift || self.modifiers.alt || self.modifiers.ctrl
    }
}

/// Editing intents read from raw egui input while the body has focus.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Printable text typed by the user
    Text(String),
    /// A named command bound to a key chord
    Command(KeyCommand),
    /// Return key, soft or hard
    Return(ReturnEvent),
    /// Tab or shift+tab
    Tab { shift: bool },
    /// Cursor movement, extending the selection when shift is held
    Move { motion: Motion, extend: bool },
    Copy,
    Cut,
    Paste(String),
}

/// Translates one frame's worth of egui events into editing intents.
pub fn translate_events(events: &[Event]) -> Vec<InputEvent> {
    events.iter().filter_map(translate_event).collect()
}

fn translate_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Text(text) if text.chars().any(|c| !c.is_control()) => {
            Some(InputEvent::Text(text.clone()))
        }
        Event::Copy => Some(InputEvent::Copy),
        Event::Cut => Some(InputEvent::Cut),
        Event::Paste(text) => Some(InputEvent::Paste(text.clone())),
        Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => key_binding(*key, *modifiers),
        _ => None,
    }
}

/// Default key bindings of the body editor.
pub fn key_binding(key: Key, modifiers: Modifiers) -> Option<InputEvent> {
    let command = modifiers.command;
    let extend = modifiers.shift;
    let motion = |motion| Some(InputEvent::Move { motion, extend });

    match key {
        Key::Enter => Some(InputEvent::Return(ReturnEvent::new(modifiers))),
        Key::Tab => Some(InputEvent::Tab { shift: modifiers.shift }),
        Key::Backspace => Some(InputEvent::Command(KeyCommand::Backspace)),
        Key::Delete => Some(InputEvent::Command(KeyCommand::Delete)),
        Key::B if command => Some(InputEvent::Command(KeyCommand::Bold)),
        Key::I if command => Some(InputEvent::Command(KeyCommand::Italic)),
        Key::U if command => Some(InputEvent::Command(KeyCommand::Underline)),
        Key::J if command => Some(InputEvent::Command(KeyCommand::Code)),
        Key::X if command && modifiers.shift => {
            Some(InputEvent::Command(KeyCommand::Strikethrough))
        }
        Key::Z if command && modifiers.shift => Some(InputEvent::Command(KeyCommand::Redo)),
        Key::Z if command => Some(InputEvent::Command(KeyCommand::Undo)),
        Key::Y if command => Some(InputEvent::Command(KeyCommand::Redo)),
        Key::A if command => Some(InputEvent::Command(KeyCommand::SelectAll)),
        Key::ArrowLeft => motion(Motion::Left),
        Key::ArrowRight => motion(Motion::Right),
        Key::ArrowUp => motion(Motion::Up),
        Key::ArrowDown => motion(Motion::Down),
        Key::Home if command => motion(Motion::DocumentStart),
        Key::End if command => motion(Motion::DocumentEnd),
        Key::Home => motion(Motion::LineStart),
        Key::End => motion(Motion::LineEnd),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_return_is_a_soft_newline() {
        assert!(ReturnEvent::new(Modifiers::SHIFT).is_soft_newline());
        assert!(ReturnEvent::new(Modifiers::ALT).is_soft_newline());
        assert!(!ReturnEvent::new(Modifiers::NONE).is_soft_newline());
    }

    #[test]
    fn command_chords_map_to_named_commands() {
        assert_eq!(
            key_binding(Key::B, Modifiers::COMMAND),
            Some(InputEvent::Command(KeyCommand::Bold))
        );
        assert_eq!(
            key_binding(Key::Z, Modifiers::COMMAND | Modifiers::SHIFT),
            Some(InputEvent::Command(KeyCommand::Redo))
        );
        assert_eq!(key_binding(Key::B, Modifiers::NONE), None);
    }

    #[test]
    fn control_characters_are_not_text() {
        let events = [Event::Text("\t".into()), Event::Text("a".into())];
        assert_eq!(translate_events(&events), vec![InputEvent::Text("a".into())]);
    }
}
