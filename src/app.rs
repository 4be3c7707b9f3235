use std::time::Duration;

use crate::config::EditorConfig;
use crate::controller::EditorController;
use crate::panels;
use crate::storage::MemoryStore;

/// Window layout preferences, persisted next to the drafts.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AppSettings {
    /// Maximum width of the writing column in points
    pub column_width: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { column_width: 720.0 }
    }
}

pub struct MagicBookApp {
    controller: EditorController,
    settings: AppSettings,
    exported_html: Option<String>,
    // Stands in for eframe storage when persistence is unavailable
    detached_store: MemoryStore,
    now: f64,
}

impl MagicBookApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = EditorConfig::default();
        let detached_store = MemoryStore::unavailable();

        let (controller, settings) = match cc.storage {
            Some(storage) => (
                EditorController::load(storage, config),
                eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default(),
            ),
            None => {
                log::warn!("No persistent storage, drafts will not be saved");
                (
                    EditorController::load(&detached_store, config),
                    AppSettings::default(),
                )
            }
        };

        Self {
            controller,
            settings,
            exported_html: None,
            detached_store,
            now: 0.0,
        }
    }

    pub fn controller(&self) -> &EditorController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut EditorController {
        &mut self.controller
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut AppSettings {
        &mut self.settings
    }

    /// Input clock of the frame being drawn, in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn exported_html(&self) -> Option<&str> {
        self.exported_html.as_deref()
    }

    pub fn show_export(&mut self, html: String) {
        self.exported_html = Some(html);
    }

    pub fn close_export(&mut self) {
        self.exported_html = None;
    }
}

impl eframe::App for MagicBookApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.controller.flush(self.now, storage);
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.now = ctx.input(|i| i.time);

        panels::toolbar_panel(self, ctx);
        panels::editor_panel(self, ctx);
        panels::export_window(self, ctx);

        match frame.storage_mut() {
            Some(storage) => self.controller.tick(self.now, storage),
            None => self.controller.tick(self.now, &mut self.detached_store),
        }

        // Wake up for the next save or status reset even when the user is idle.
        if let Some(deadline) = self.controller.next_deadline() {
            let wait = (deadline - self.now).max(0.0);
            ctx.request_repaint_after(Duration::from_secs_f64(wait));
        }
    }
}
