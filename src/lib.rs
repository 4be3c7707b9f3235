#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod document;
pub mod error;
pub mod html;
pub mod input;
pub mod panels;
pub mod status;
pub mod storage;
pub mod widgets;

pub use app::{AppSettings, MagicBookApp};
pub use command::{HandleResult, KeyCommand};
pub use config::EditorConfig;
pub use controller::EditorController;
pub use document::{BlockType, ContentState, EditorState, InlineStyle};
pub use error::{LoadError, StorageError};
pub use input::{InputEvent, ReturnEvent};
pub use status::SaveStatus;
pub use storage::{KeyValueStore, MemoryStore};
