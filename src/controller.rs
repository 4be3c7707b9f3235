//! The stateful core of the chapter editor.
//!
//! [`EditorController`] owns the title, the body's [`EditorState`] and the
//! save indicator. It routes edits through the rich text engine, applies the
//! return key policy, and writes changes to a [`KeyValueStore`] once each
//! field has been quiet for the configured delay.
//!
//! Time is passed in explicitly (seconds on the UI clock), which keeps every
//! operation deterministic and lets the UI drive timers from its frame loop
//! via [`EditorController::tick`].

use crate::command::{HandleResult, KeyCommand};
use crate::config::EditorConfig;
use crate::debounce::Debounce;
use crate::document::{
    editing, modifier, rich_utils, BlockType, ChangeType, ContentState, EditorState, InlineStyle,
    RawContent,
};
use crate::error::{LoadError, StorageError};
use crate::html;
use crate::input::ReturnEvent;
use crate::status::{SaveIndicator, SaveStatus};
use crate::storage::KeyValueStore;

/// Presentation class for blocks of `block_type`, if it has one.
pub fn block_style_class(block_type: BlockType) -> Option<&'static str> {
    match block_type {
        BlockType::Unstyled => Some("paragraph"),
        BlockType::Blockquote => Some("blockquote"),
        BlockType::CodeBlock => Some("code"),
        _ => None,
    }
}

/// Timed work the controller has queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DueEvent {
    ResetStatus,
    SaveBody,
    SaveTitle,
}

#[derive(Debug)]
pub struct EditorController {
    config: EditorConfig,
    title: String,
    editor_state: EditorState,
    indicator: SaveIndicator,
    title_timer: Debounce<String>,
    body_timer: Debounce<EditorState>,
    focus_requested: bool,
    last_error: Option<String>,
}

impl EditorController {
    /// Restores the title and body from `store`.
    ///
    /// A missing title falls back to the configured default and a missing
    /// body to an empty document. A stored body that cannot be parsed is
    /// logged and replaced by an empty document.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, config: EditorConfig) -> Self {
        let title = store
            .read(&config.title_key)
            .unwrap_or_else(|| config.default_title.clone());

        let editor_state = match store.read(&config.content_key) {
            Some(json) => match parse_content(&json) {
                Ok(content) => EditorState::create_with_content(content),
                Err(err) => {
                    log::warn!("Discarding stored draft `{}`: {err}", config.content_key);
                    EditorState::create_empty()
                }
            },
            None => EditorState::create_empty(),
        };

        log::info!(
            "Loaded chapter {title:?} with {} block(s)",
            editor_state.content().blocks().len()
        );

        Self {
            title_timer: Debounce::new(config.save_delay),
            body_timer: Debounce::new(config.save_delay),
            indicator: SaveIndicator::new(config.saved_display),
            title,
            editor_state,
            focus_requested: true,
            last_error: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn editor_state(&self) -> &EditorState {
        &self.editor_state
    }

    pub fn save_status(&self) -> SaveStatus {
        self.indicator.status()
    }

    /// Message of the most recent failed write, until a write succeeds.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn has_pending_save(&self) -> bool {
        self.body_timer.is_pending() || self.title_timer.is_pending()
    }

    // Edits
    // ------------------------------------------------------------------

    /// Adopts `state` as the body immediately and schedules it to be saved
    /// once the body has been quiet for the save delay.
    pub fn on_content_change(&mut self, state: EditorState, now: f64) {
        self.body_timer.schedule(state.clone(), now);
        self.editor_state = state;
    }

    /// Adopts `title` immediately and schedules it to be saved once the
    /// title has been quiet for the save delay.
    pub fn on_title_change(&mut self, title: String, now: f64) {
        self.title_timer.schedule(title.clone(), now);
        self.title = title;
    }

    /// Runs the rich text meaning of `command`. `NotHandled` means the
    /// default editing behaviour should apply instead.
    pub fn handle_key_command(&mut self, command: &KeyCommand, now: f64) -> HandleResult {
        match rich_utils::handle_key_command(&self.editor_state, command) {
            Some(state) => {
                log::debug!("Handled key command `{command}`");
                self.on_content_change(state, now);
                HandleResult::Handled
            }
            None => HandleResult::NotHandled,
        }
    }

    /// Applies the built-in behaviour of `command` (block splitting,
    /// deletion, undo, ...), for commands no handler claimed.
    pub fn apply_default_command(&mut self, command: &KeyCommand, now: f64) -> HandleResult {
        match editing::apply_default_command(&self.editor_state, command) {
            Some(state) => {
                self.on_content_change(state, now);
                HandleResult::Handled
            }
            None => HandleResult::NotHandled,
        }
    }

    /// Indents (or outdents with `shift`) the current list item. Tab never
    /// falls through to focus navigation.
    pub fn on_tab(&mut self, shift: bool, now: f64) -> HandleResult {
        let state = rich_utils::on_tab(&self.editor_state, shift, self.config.max_list_depth);
        self.on_content_change(state, now);
        HandleResult::Handled
    }

    /// Custom return key policy: a soft newline when requested, otherwise a
    /// fresh paragraph when leaving the end of a special block. Anything
    /// else is left to the default block split.
    pub fn handle_return(&mut self, event: ReturnEvent, now: f64) -> HandleResult {
        if self.handle_return_soft_newline(event, now) {
            return HandleResult::Handled;
        }
        self.handle_return_special_block(now).into()
    }

    fn handle_return_soft_newline(&mut self, event: ReturnEvent, now: f64) -> bool {
        if !event.is_soft_newline() {
            return false;
        }

        let selection = self.editor_state.selection();
        if selection.is_collapsed() {
            let state = rich_utils::insert_soft_newline(&self.editor_state);
            self.on_content_change(state, now);
            return true;
        }

        let content = modifier::remove_range(self.editor_state.content(), selection);
        let cursor = content.selection_after().clone();
        let style = content
            .block_for_key(cursor.start_key())
            .map(|block| block.inline_style_at(cursor.start_offset()))
            .unwrap_or_default();
        let content = modifier::insert_text(&content, &cursor, "\n", &style);
        let after = content.selection_after().clone();
        let content = content.with_selections(selection.clone(), after);

        let state = self.editor_state.push(content, ChangeType::InsertFragment);
        self.on_content_change(state, now);
        true
    }

    /// At the end of any block other than a paragraph or list item, return
    /// starts a new paragraph instead of another block of the same type.
    fn handle_return_special_block(&mut self, now: f64) -> bool {
        let selection = self.editor_state.selection();
        if !selection.is_collapsed() {
            return false;
        }

        let key = selection.start_key().clone();
        let Some(block) = self.editor_state.content().block_for_key(&key) else {
            return false;
        };
        let block_type = block.block_type();
        if block_type.is_list_item() || block_type == BlockType::Unstyled {
            return false;
        }
        if block.len() != selection.start_offset() {
            return false;
        }

        let state = editing::insert_block_after(&self.editor_state, &key, BlockType::Unstyled);
        self.on_content_change(state, now);
        self.request_focus();
        true
    }

    pub fn toggle_block_type(&mut self, block_type: BlockType, now: f64) {
        let state = rich_utils::toggle_block_type(&self.editor_state, block_type);
        self.on_content_change(state, now);
    }

    pub fn toggle_inline_style(&mut self, style: InlineStyle, now: f64) {
        let state = rich_utils::toggle_inline_style(&self.editor_state, style);
        self.on_content_change(state, now);
    }

    // Focus
    // ------------------------------------------------------------------

    /// Asks the UI to move keyboard focus to the body.
    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    /// Returns and clears a pending focus request.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    // Export
    // ------------------------------------------------------------------

    /// The current chapter as an HTMLBook section.
    pub fn export_html(&self) -> String {
        let html = html::export_html_book(&self.title, &self.editor_state);
        log::info!("Exported HTMLBook chapter:\n{html}");
        html
    }

    // Timers
    // ------------------------------------------------------------------

    /// Earliest time at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<f64> {
        [
            self.indicator.next_reset(),
            self.body_timer.deadline(),
            self.title_timer.deadline(),
        ]
        .into_iter()
        .flatten()
        .reduce(f64::min)
    }

    /// Performs every save and status reset that has fallen due by `now`,
    /// oldest first.
    pub fn tick<S: KeyValueStore + ?Sized>(&mut self, now: f64, store: &mut S) {
        while let Some((at, event)) = self.next_due(now) {
            match event {
                DueEvent::ResetStatus => {
                    self.indicator.reset_due(at);
                }
                DueEvent::SaveBody => {
                    if let Some(state) = self.body_timer.take() {
                        self.save_content(&state, at, store);
                    }
                }
                DueEvent::SaveTitle => {
                    if let Some(title) = self.title_timer.take() {
                        self.save_title(title, at, store);
                    }
                }
            }
        }
    }

    /// Writes any pending title or body right away.
    pub fn flush<S: KeyValueStore + ?Sized>(&mut self, now: f64, store: &mut S) {
        if let Some(state) = self.body_timer.take() {
            self.save_content(&state, now, store);
        }
        if let Some(title) = self.title_timer.take() {
            self.save_title(title, now, store);
        }
    }

    fn next_due(&self, now: f64) -> Option<(f64, DueEvent)> {
        [
            (self.indicator.next_reset(), DueEvent::ResetStatus),
            (self.body_timer.deadline(), DueEvent::SaveBody),
            (self.title_timer.deadline(), DueEvent::SaveTitle),
        ]
        .into_iter()
        .filter_map(|(at, event)| at.filter(|&at| at <= now).map(|at| (at, event)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
    }

    fn save_content<S: KeyValueStore + ?Sized>(&mut self, state: &EditorState, at: f64, store: &mut S) {
        let key = self.config.content_key.clone();
        let result = state
            .content()
            .to_raw()
            .to_json()
            .map_err(|source| StorageError::Serialize {
                key: key.clone(),
                source,
            })
            .and_then(|json| store.write(&key, json));
        self.finish_write(&key, result, at);
    }

    fn save_title<S: KeyValueStore + ?Sized>(&mut self, title: String, at: f64, store: &mut S) {
        let key = self.config.title_key.clone();
        let result = store.write(&key, title);
        self.finish_write(&key, result, at);
    }

    fn finish_write(&mut self, key: &str, result: Result<(), StorageError>, at: f64) {
        match result {
            Ok(()) => {
                log::debug!("Saved `{key}`");
                self.last_error = None;
                self.indicator.mark_saved(at);
            }
            Err(err) => {
                log::warn!("Could not save `{key}`: {err}");
                self.last_error = Some(err.to_string());
            }
        }
    }
}

fn parse_content(json: &str) -> Result<ContentState, LoadError> {
    let raw = RawContent::from_json(json)?;
    ContentState::from_raw(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_style_classes() {
        assert_eq!(block_style_class(BlockType::Unstyled), Some("paragraph"));
        assert_eq!(block_style_class(BlockType::Blockquote), Some("blockquote"));
        assert_eq!(block_style_class(BlockType::CodeBlock), Some("code"));
        assert_eq!(block_style_class(BlockType::HeaderOne), None);
        assert_eq!(block_style_class(BlockType::OrderedListItem), None);
    }

    #[test]
    fn next_due_prefers_the_earliest_event() {
        let store = crate::storage::MemoryStore::new();
        let mut controller = EditorController::load(&store, EditorConfig::default());
        controller.on_title_change("A".into(), 0.0);
        controller.on_content_change(EditorState::create_empty(), 0.5);
        assert_eq!(controller.next_due(1.0), None);
        assert_eq!(controller.next_due(5.0).map(|(_, e)| e), Some(DueEvent::SaveTitle));
    }
}
