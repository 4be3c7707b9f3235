mod editor_panel;
mod export_window;
mod toolbar;

pub use editor_panel::editor_panel;
pub use export_window::export_window;
pub use toolbar::toolbar_panel;
