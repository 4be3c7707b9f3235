use crate::MagicBookApp;
use crate::command::KeyCommand;
use crate::document::{BlockType, InlineStyle};
use crate::status::SaveStatus;

const BLOCK_TYPES: [(&str, BlockType); 7] = [
    ("H1", BlockType::HeaderOne),
    ("H2", BlockType::HeaderTwo),
    ("H3", BlockType::HeaderThree),
    ("Blockquote", BlockType::Blockquote),
    ("UL", BlockType::UnorderedListItem),
    ("OL", BlockType::OrderedListItem),
    ("Code Block", BlockType::CodeBlock),
];

const INLINE_STYLES: [(&str, InlineStyle); 4] = [
    ("Bold", InlineStyle::Bold),
    ("Italic", InlineStyle::Italic),
    ("Underline", InlineStyle::Underline),
    ("Monospace", InlineStyle::Code),
];

pub fn toolbar_panel(app: &mut MagicBookApp, ctx: &egui::Context) {
    let now = app.now();
    let mut exported = None;

    egui::TopBottomPanel::top("toolbar_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            let controller = app.controller_mut();

            let state = controller.editor_state();
            let current_block = state
                .content()
                .block_for_key(state.selection().start_key())
                .map(|block| block.block_type());
            let current_style = state.current_inline_style();
            let can_undo = state.can_undo();
            let can_redo = state.can_redo();

            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                controller.apply_default_command(&KeyCommand::Undo, now);
                controller.request_focus();
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                controller.apply_default_command(&KeyCommand::Redo, now);
                controller.request_focus();
            }

            ui.separator();

            for (label, block_type) in BLOCK_TYPES {
                if ui.selectable_label(current_block == Some(block_type), label).clicked() {
                    log::debug!("Toggling block type {block_type}");
                    controller.toggle_block_type(block_type, now);
                    controller.request_focus();
                }
            }

            ui.separator();

            for (label, style) in INLINE_STYLES {
                if ui.selectable_label(current_style.contains(&style), label).clicked() {
                    log::debug!("Toggling inline style {style}");
                    controller.toggle_inline_style(style, now);
                    controller.request_focus();
                }
            }

            ui.separator();

            if ui.button("Export HTMLBook").clicked() {
                exported = Some(controller.export_html());
            }

            let status = controller.save_status();
            let label = match status {
                SaveStatus::Saved => egui::RichText::new(status.to_string()).strong(),
                SaveStatus::Listening => egui::RichText::new(status.to_string()).weak(),
            };
            let response = ui.label(label);
            if let Some(error) = controller.last_error() {
                let warning = egui::RichText::new("⚠").color(ui.visuals().warn_fg_color);
                ui.label(warning).on_hover_text(error);
            } else if controller.has_pending_save() {
                response.on_hover_text("Changes will be saved shortly");
            }

            ui.separator();
            ui.add(
                egui::Slider::new(&mut app.settings_mut().column_width, 480.0..=1200.0)
                    .text("Column"),
            );
        });
    });

    if let Some(html) = exported {
        app.show_export(html);
    }
}
