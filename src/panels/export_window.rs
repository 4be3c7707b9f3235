use crate::MagicBookApp;

/// Shows the last HTMLBook export, if any, with a copy button.
pub fn export_window(app: &mut MagicBookApp, ctx: &egui::Context) {
    let Some(html) = app.exported_html().map(str::to_owned) else {
        return;
    };

    let mut open = true;
    egui::Window::new("HTMLBook export")
        .open(&mut open)
        .default_size([560.0, 420.0])
        .show(ctx, |ui| {
            if ui.button("Copy to clipboard").clicked() {
                ui.ctx().copy_text(html.clone());
            }
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut html.as_str())
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
        });

    if !open {
        app.close_export();
    }
}
