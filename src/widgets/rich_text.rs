use std::ops::Range;
use std::sync::Arc;

use egui::text::{CCursor, LayoutJob};
use egui::{
    Color32, EventFilter, FontId, Galley, Pos2, Rect, Response, Sense, Stroke, TextFormat, Ui,
    Vec2,
};

use crate::command::{HandleResult, KeyCommand};
use crate::controller::{block_style_class, EditorController};
use crate::document::{editing, BlockKey, BlockType, ContentBlock, InlineStyle, Selection, StyleSet};
use crate::input::{translate_events, InputEvent};

const BLOCK_SPACING: f32 = 6.0;
const LIST_INDENT: f32 = 24.0;
const QUOTE_INDENT: f32 = 16.0;
const CODE_PADDING: f32 = 8.0;
const PLACEHOLDER: &str = "Start writing...";

/// One laid-out block of the body.
struct BlockRow {
    key: BlockKey,
    galley: Arc<Galley>,
    /// Text origin relative to the widget's top-left corner.
    origin: Vec2,
    /// Block area (including padding) relative to the widget's top-left corner.
    frame: Rect,
    block_type: BlockType,
    marker: Option<String>,
}

/// The chapter body: renders the block model and feeds keyboard and pointer
/// input to the [`EditorController`].
pub struct RichTextBody<'a> {
    controller: &'a mut EditorController,
    now: f64,
}

impl<'a> RichTextBody<'a> {
    pub fn new(controller: &'a mut EditorController, now: f64) -> Self {
        Self { controller, now }
    }

    pub fn show(mut self, ui: &mut Ui) -> Response {
        let id = ui.make_persistent_id("magicbook_body");
        let has_focus = ui.memory(|m| m.has_focus(id));

        if has_focus {
            ui.memory_mut(|m| {
                m.set_focus_lock_filter(
                    id,
                    EventFilter {
                        tab: true,
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        escape: false,
                    },
                )
            });
            let events = ui.input(|i| translate_events(&i.events));
            for event in events {
                self.apply(ui, event);
            }
        }

        let width = ui.available_width();
        let rows = layout_rows(ui, self.controller, width, has_focus);
        let content_height = rows.last().map_or(0.0, |row| row.frame.max.y);
        let height = content_height.max(ui.available_height()).max(120.0);
        let (_, rect) = ui.allocate_space(Vec2::new(width, height));
        let response = ui.interact(rect, id, Sense::click_and_drag());

        if self.controller.take_focus_request() {
            response.request_focus();
        }

        self.handle_pointer(ui, &response, &rows, rect.min);
        paint(ui, self.controller, &rows, rect, has_focus);

        response
    }

    fn apply(&mut self, ui: &Ui, event: InputEvent) {
        let now = self.now;
        let controller = &mut *self.controller;
        match event {
            InputEvent::Text(text) => {
                let state = editing::insert_characters(controller.editor_state(), &text);
                controller.on_content_change(state, now);
            }
            InputEvent::Command(command) => {
                if controller.handle_key_command(&command, now) == HandleResult::NotHandled {
                    controller.apply_default_command(&command, now);
                }
            }
            InputEvent::Return(event) => {
                if controller.handle_return(event, now) == HandleResult::NotHandled {
                    controller.apply_default_command(&KeyCommand::SplitBlock, now);
                }
            }
            InputEvent::Tab { shift } => {
                controller.on_tab(shift, now);
            }
            InputEvent::Move { motion, extend } => {
                let state = editing::move_cursor(controller.editor_state(), motion, extend);
                controller.on_content_change(state, now);
            }
            InputEvent::Copy => {
                let text = editing::selected_text(controller.editor_state());
                if !text.is_empty() {
                    ui.ctx().copy_text(text);
                }
            }
            InputEvent::Cut => {
                let text = editing::selected_text(controller.editor_state());
                if let Some(state) = editing::remove_selection(controller.editor_state()) {
                    ui.ctx().copy_text(text);
                    controller.on_content_change(state, now);
                }
            }
            InputEvent::Paste(text) => {
                let state = editing::insert_fragment(controller.editor_state(), &text);
                controller.on_content_change(state, now);
            }
        }
    }

    fn handle_pointer(&mut self, ui: &Ui, response: &Response, rows: &[BlockRow], origin: Pos2) {
        if response.clicked() || response.drag_started() {
            response.request_focus();
        }

        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };
        let Some((key, offset)) = hit_test(rows, pointer - origin) else {
            return;
        };

        let state = self.controller.editor_state();
        let extend = (response.dragged() && !response.drag_started())
            || (response.clicked() && ui.input(|i| i.modifiers.shift));
        let next = if extend {
            editing::extend_selection(state, &key, offset)
        } else if response.clicked() || response.drag_started() {
            editing::place_cursor(state, &key, offset)
        } else {
            return;
        };

        if next.selection() != state.selection() {
            self.controller.on_content_change(next, self.now);
            ui.ctx().request_repaint();
        }
    }
}

fn layout_rows(ui: &Ui, controller: &EditorController, width: f32, has_focus: bool) -> Vec<BlockRow> {
    let state = controller.editor_state();
    let content = state.content();
    let selection = state.selection();
    let show_selection = has_focus && !selection.is_collapsed();
    let range = content.block_range(selection);

    let mut rows = Vec::with_capacity(content.blocks().len());
    let mut counters: Vec<usize> = Vec::new();
    let mut y = 0.0;

    for (index, block) in content.blocks().iter().enumerate() {
        let marker = list_marker(block, &mut counters);
        let indent = match block.block_type() {
            BlockType::UnorderedListItem | BlockType::OrderedListItem => {
                LIST_INDENT * (f32::from(block.depth()) + 1.0)
            }
            BlockType::Blockquote => QUOTE_INDENT,
            _ => 0.0,
        };
        let padding = if block.block_type() == BlockType::CodeBlock { CODE_PADDING } else { 0.0 };

        let selected = (show_selection && range.contains(&index))
            .then(|| selected_chars(block, selection, index == *range.start(), index == *range.end()));
        let wrap_width = (width - indent - 2.0 * padding).max(20.0);
        let job = block_job(ui, block, selected, wrap_width);
        let galley = ui.fonts(|f| f.layout_job(job));

        let block_height = galley.size().y + 2.0 * padding;
        let frame = Rect::from_min_size(Pos2::new(indent, y), Vec2::new(width - indent, block_height));
        rows.push(BlockRow {
            key: block.key().clone(),
            origin: Vec2::new(indent + padding, y + padding),
            frame,
            galley,
            block_type: block.block_type(),
            marker,
        });
        y += block_height + BLOCK_SPACING;
    }
    rows
}

/// Bullet or number shown before list items; numbering restarts after any
/// non-list block.
fn list_marker(block: &ContentBlock, counters: &mut Vec<usize>) -> Option<String> {
    let depth = usize::from(block.depth());
    match block.block_type() {
        BlockType::OrderedListItem => {
            counters.resize(depth + 1, 0);
            counters[depth] += 1;
            Some(format!("{}.", counters[depth]))
        }
        BlockType::UnorderedListItem => {
            counters.truncate(depth);
            Some(if depth % 2 == 0 { "•" } else { "◦" }.to_owned())
        }
        _ => {
            counters.clear();
            None
        }
    }
}

fn selected_chars(block: &ContentBlock, selection: &Selection, first: bool, last: bool) -> Range<usize> {
    let start = if first { selection.start_offset() } else { 0 };
    let end = if last { selection.end_offset() } else { block.len() };
    start.min(block.len())..end.min(block.len())
}

fn block_job(ui: &Ui, block: &ContentBlock, selected: Option<Range<usize>>, wrap_width: f32) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    let mut cuts: Vec<usize> = block
        .style_runs()
        .iter()
        .flat_map(|(range, _)| [range.start, range.end])
        .collect();
    if let Some(range) = &selected {
        cuts.extend([range.start, range.end]);
    }
    cuts.push(0);
    cuts.sort_unstable();
    cuts.dedup();

    for pair in cuts.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let is_selected = selected
            .as_ref()
            .is_some_and(|range| start >= range.start && end <= range.end);
        let format = text_format(ui, block.block_type(), &block.inline_style_at(start), is_selected);
        job.append(block.slice(start..end), 0.0, format);
    }

    if block.is_empty() {
        job.append("", 0.0, text_format(ui, block.block_type(), &StyleSet::new(), false));
    }
    job
}

fn text_format(ui: &Ui, block_type: BlockType, styles: &StyleSet, selected: bool) -> TextFormat {
    let visuals = ui.visuals();
    let code = styles.contains(&InlineStyle::Code) || block_type == BlockType::CodeBlock;

    let size = match block_type.heading_level() {
        Some(1) => 28.0,
        Some(2) => 24.0,
        Some(3) => 20.0,
        Some(4) => 18.0,
        Some(_) => 16.0,
        None => 15.0,
    };
    let font_id = if code { FontId::monospace(size - 1.0) } else { FontId::proportional(size) };

    let color = if styles.contains(&InlineStyle::Bold) || block_type.heading_level().is_some() {
        visuals.strong_text_color()
    } else if block_style_class(block_type) == Some("blockquote") {
        visuals.weak_text_color()
    } else {
        visuals.text_color()
    };

    let background = if selected {
        visuals.selection.bg_fill
    } else if styles.contains(&InlineStyle::Code) {
        visuals.code_bg_color
    } else {
        Color32::TRANSPARENT
    };

    let line = Stroke::new(1.0, color);
    TextFormat {
        font_id,
        color,
        background,
        italics: styles.contains(&InlineStyle::Italic)
            || block_style_class(block_type) == Some("blockquote"),
        underline: if styles.contains(&InlineStyle::Underline) { line } else { Stroke::NONE },
        strikethrough: if styles.contains(&InlineStyle::Strikethrough) { line } else { Stroke::NONE },
        ..Default::default()
    }
}

/// Block and character offset under `pos` (relative to the widget origin).
/// Points between or past blocks snap to the nearest block.
fn hit_test(rows: &[BlockRow], pos: Vec2) -> Option<(BlockKey, usize)> {
    let row = rows
        .iter()
        .find(|row| pos.y <= row.frame.max.y + BLOCK_SPACING)
        .or_else(|| rows.last())?;
    let cursor = row.galley.cursor_from_pos(pos - row.origin);
    Some((row.key.clone(), cursor.ccursor.index))
}

fn paint(ui: &Ui, controller: &EditorController, rows: &[BlockRow], rect: Rect, has_focus: bool) {
    let painter = ui.painter_at(rect);
    let visuals = ui.visuals();
    let offset = rect.min.to_vec2();
    let state = controller.editor_state();

    for row in rows {
        let frame = row.frame.translate(offset);
        match block_style_class(row.block_type) {
            Some("code") => {
                painter.rect_filled(frame, 4.0, visuals.extreme_bg_color);
            }
            Some("blockquote") => {
                let x = frame.min.x - QUOTE_INDENT / 2.0;
                painter.line_segment(
                    [Pos2::new(x, frame.min.y), Pos2::new(x, frame.max.y)],
                    Stroke::new(3.0, visuals.weak_text_color()),
                );
            }
            _ => {}
        }

        if let Some(marker) = &row.marker {
            let pos = Pos2::new(frame.min.x - 6.0, frame.min.y);
            painter.text(
                pos,
                egui::Align2::RIGHT_TOP,
                marker,
                FontId::proportional(15.0),
                visuals.text_color(),
            );
        }

        painter.galley(row.origin.to_pos2() + offset, Arc::clone(&row.galley), visuals.text_color());
    }

    if !state.content().has_text() && !has_focus {
        if let Some(row) = rows.first() {
            painter.text(
                row.origin.to_pos2() + offset,
                egui::Align2::LEFT_TOP,
                PLACEHOLDER,
                FontId::proportional(15.0),
                visuals.weak_text_color(),
            );
        }
    }

    if has_focus {
        let selection = state.selection();
        if let Some(row) = rows.iter().find(|row| &row.key == selection.focus_key()) {
            let cursor = row.galley.from_ccursor(CCursor::new(selection.focus_offset()));
            let caret = row.galley.pos_from_cursor(&cursor).translate(row.origin + offset);
            painter.line_segment(
                [caret.center_top(), caret.center_bottom()],
                Stroke::new(2.0, visuals.text_cursor.stroke.color),
            );
        }
    }
}
