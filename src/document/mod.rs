//! Block-based rich text model.
//!
//! A document is a [`ContentState`]: an ordered list of [`ContentBlock`]s,
//! each with a [`BlockType`], text, per-character [`InlineStyle`] sets and a
//! nesting depth. An [`EditorState`] pairs a content version with the
//! current [`Selection`] and undo history. All operations are pure: they
//! take a state and return a new one.

mod block;
mod content;
pub mod editing;
mod editor_state;
pub mod modifier;
mod raw;
pub mod rich_utils;
mod selection;

pub use block::{BlockKey, BlockType, ContentBlock, InlineStyle, StyleSet, UnknownName};
pub use content::ContentState;
pub use editing::Motion;
pub use editor_state::{ChangeType, EditorState};
pub use raw::{RawBlock, RawContent, RawInlineStyleRange};
pub use selection::Selection;
