use magicbook::config::{CONTENT_KEY, TITLE_KEY};
use magicbook::document::{editing, BlockKey, BlockType, ContentBlock, ContentState, InlineStyle};
use magicbook::{EditorConfig, EditorController, EditorState, MemoryStore, SaveStatus};

// Helper to load a controller from an empty store with default settings
fn create_test_controller() -> (EditorController, MemoryStore) {
    let store = MemoryStore::new();
    let controller = EditorController::load(&store, EditorConfig::default());
    (controller, store)
}

fn typed(controller: &EditorController, text: &str) -> EditorState {
    editing::insert_characters(controller.editor_state(), text)
}

#[test]
fn test_load_from_empty_store_uses_defaults() {
    let (mut controller, _store) = create_test_controller();

    assert_eq!(controller.title(), "Document title");
    assert!(!controller.editor_state().content().has_text());
    assert_eq!(controller.save_status(), SaveStatus::Listening);
    assert!(controller.take_focus_request());
    assert!(!controller.take_focus_request());
}

#[test]
fn test_title_edits_coalesce_into_one_write() {
    let (mut controller, mut store) = create_test_controller();

    controller.on_title_change("C".into(), 0.0);
    controller.on_title_change("Ch".into(), 0.4);
    controller.on_title_change("Chapter".into(), 0.8);
    assert_eq!(controller.title(), "Chapter");

    controller.tick(1.5, &mut store);
    assert_eq!(store.write_count(), 0);
    assert_eq!(controller.save_status(), SaveStatus::Listening);

    controller.tick(2.5, &mut store);
    assert_eq!(store.write_count(), 1);
    assert_eq!(store.get(TITLE_KEY), Some("Chapter"));
    assert_eq!(controller.save_status(), SaveStatus::Saved);
    assert!(!controller.has_pending_save());
}

#[test]
fn test_body_edits_coalesce_into_one_write() {
    let (mut controller, mut store) = create_test_controller();

    for (i, c) in ["H", "i", "!"].into_iter().enumerate() {
        let state = typed(&controller, c);
        controller.on_content_change(state, i as f64 * 0.5);
    }

    controller.tick(2.0, &mut store);
    assert_eq!(store.write_count(), 0);

    controller.tick(3.0, &mut store);
    assert_eq!(store.write_count(), 1);

    let reloaded = EditorController::load(&store, EditorConfig::default());
    assert_eq!(reloaded.editor_state().content().plain_text(), "Hi!");
}

#[test]
fn test_saved_status_clears_two_seconds_after_save() {
    let (mut controller, mut store) = create_test_controller();

    controller.on_title_change("Title".into(), 0.0);
    controller.tick(1.5, &mut store);
    assert_eq!(controller.save_status(), SaveStatus::Saved);

    controller.tick(3.0, &mut store);
    assert_eq!(controller.save_status(), SaveStatus::Saved);

    controller.tick(3.5, &mut store);
    assert_eq!(controller.save_status(), SaveStatus::Listening);
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn test_earlier_reset_clears_status_after_a_later_save() {
    let (mut controller, mut store) = create_test_controller();

    // First save lands at 1.3 and queues a reset for 3.3.
    controller.on_title_change("One".into(), 0.0);
    controller.tick(1.4, &mut store);

    // Second save lands at 2.8, but the earlier reset still fires.
    controller.on_title_change("Two".into(), 1.5);
    controller.tick(2.9, &mut store);
    assert_eq!(controller.save_status(), SaveStatus::Saved);

    controller.tick(3.5, &mut store);
    assert_eq!(controller.save_status(), SaveStatus::Listening);

    controller.tick(5.0, &mut store);
    assert_eq!(controller.save_status(), SaveStatus::Listening);
    assert_eq!(store.get(TITLE_KEY), Some("Two"));
}

#[test]
fn test_late_tick_processes_events_in_order() {
    let (mut controller, mut store) = create_test_controller();

    controller.on_title_change("Late".into(), 0.0);
    controller.tick(10.0, &mut store);

    // The save at 1.3 and its reset at 3.3 were both overdue.
    assert_eq!(store.get(TITLE_KEY), Some("Late"));
    assert_eq!(controller.save_status(), SaveStatus::Listening);
}

#[test]
fn test_failed_write_never_shows_saved() {
    let mut store = MemoryStore::unavailable();
    let mut controller = EditorController::load(&store, EditorConfig::default());

    controller.on_title_change("Lost".into(), 0.0);
    controller.tick(2.0, &mut store);

    assert_eq!(controller.save_status(), SaveStatus::Listening);
    assert!(controller.last_error().is_some());
    assert_eq!(store.get(TITLE_KEY), None);
    assert_eq!(controller.title(), "Lost");
}

#[test]
fn test_quota_exceeded_is_reported_and_cleared_by_next_success() {
    let mut store = MemoryStore::new().with_quota(40);
    let mut controller = EditorController::load(&store, EditorConfig::default());

    controller.on_title_change("x".repeat(64), 0.0);
    controller.tick(2.0, &mut store);
    assert!(controller.last_error().is_some_and(|e| e.contains(TITLE_KEY)));

    controller.on_title_change("short".into(), 3.0);
    controller.tick(5.0, &mut store);
    assert_eq!(controller.last_error(), None);
    assert_eq!(store.get(TITLE_KEY), Some("short"));
}

#[test]
fn test_flush_writes_pending_values_immediately() {
    let (mut controller, mut store) = create_test_controller();

    controller.on_title_change("Draft".into(), 0.0);
    let state = typed(&controller, "body");
    controller.on_content_change(state, 0.1);

    controller.flush(0.2, &mut store);
    assert_eq!(store.write_count(), 2);
    assert_eq!(store.get(TITLE_KEY), Some("Draft"));
    assert!(store.get(CONTENT_KEY).is_some());
    assert!(!controller.has_pending_save());

    // Nothing left for the timers to do but clear the status.
    controller.tick(3.0, &mut store);
    assert_eq!(store.write_count(), 2);
}

#[test]
fn test_restores_stored_draft() {
    let blocks = vec![
        ContentBlock::new(BlockKey::new("a"), BlockType::HeaderTwo, "Intro"),
        ContentBlock::new(BlockKey::new("b"), BlockType::Unstyled, "Once upon a time"),
    ];
    let json = ContentState::new(blocks)
        .to_raw()
        .to_json()
        .expect("serialize");
    let store = MemoryStore::new()
        .with_value(TITLE_KEY, "Saved title")
        .with_value(CONTENT_KEY, json);

    let controller = EditorController::load(&store, EditorConfig::default());

    assert_eq!(controller.title(), "Saved title");
    let content = controller.editor_state().content();
    assert_eq!(content.blocks().len(), 2);
    assert_eq!(content.blocks()[0].block_type(), BlockType::HeaderTwo);
    assert_eq!(content.blocks()[1].text(), "Once upon a time");
}

#[test]
fn test_saved_draft_reloads_identical_content() {
    let (mut controller, mut store) = create_test_controller();
    let content = ContentState::new(vec![
        ContentBlock::new(BlockKey::new("h1"), BlockType::HeaderOne, "Café ☕ notes"),
        ContentBlock::new(BlockKey::new("l1"), BlockType::UnorderedListItem, "Outer"),
        ContentBlock::new(BlockKey::new("l2"), BlockType::UnorderedListItem, "Inner ünïcode")
            .with_depth(1)
            .with_style(0..8, InlineStyle::Bold)
            .with_style(6..13, InlineStyle::Italic),
        ContentBlock::new(BlockKey::new("c1"), BlockType::CodeBlock, "fn main() {}\n// 🦀")
            .with_style(13..17, InlineStyle::Code),
    ]);
    controller.on_content_change(EditorState::create_with_content(content.clone()), 0.0);

    controller.tick(2.0, &mut store);
    assert_eq!(store.write_count(), 1);

    let reloaded = EditorController::load(&store, EditorConfig::default());
    let restored = reloaded.editor_state().content();
    assert_eq!(*restored, content);
    assert_eq!(restored.blocks()[2].key().as_str(), "l2");
    assert!(restored.blocks()[2].inline_style_at(7).contains(&InlineStyle::Bold));
    assert!(restored.blocks()[2].inline_style_at(7).contains(&InlineStyle::Italic));
}

#[test]
fn test_malformed_draft_falls_back_to_empty_document() {
    let store = MemoryStore::new().with_value(CONTENT_KEY, "{not json");

    let controller = EditorController::load(&store, EditorConfig::default());

    assert!(!controller.editor_state().content().has_text());
    assert_eq!(controller.editor_state().content().blocks().len(), 1);
}
