use crate::MagicBookApp;
use crate::widgets::RichTextBody;

pub fn editor_panel(app: &mut MagicBookApp, ctx: &egui::Context) {
    let now = app.now();
    let column_width = app.settings().column_width;

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(column_width);
                let controller = app.controller_mut();

                let mut title = controller.title().to_owned();
                let hint = controller.config().default_title.clone();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut title)
                        .font(egui::FontId::proportional(32.0))
                        .hint_text(hint)
                        .frame(false)
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    controller.on_title_change(title, now);
                }

                ui.add_space(12.0);
                RichTextBody::new(controller, now).show(ui);
            });
        });
    });
}
