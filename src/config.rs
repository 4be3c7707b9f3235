use std::time::Duration;

/// Store key holding the chapter title.
pub const TITLE_KEY: &str = "magicbook-title";
/// Store key holding the chapter body as raw content JSON.
pub const CONTENT_KEY: &str = "magicbook-content";

/// Settings of the editor controller.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub title_key: String,
    pub content_key: String,
    /// Title shown when nothing has been stored yet.
    pub default_title: String,
    /// Quiet period after the last edit before it is written.
    pub save_delay: Duration,
    /// How long the "Saved" indicator stays up after each write.
    pub saved_display: Duration,
    /// Deepest list nesting reachable with Tab.
    pub max_list_depth: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            title_key: TITLE_KEY.to_owned(),
            content_key: CONTENT_KEY.to_owned(),
            default_title: "Document title".to_owned(),
            save_delay: Duration::from_millis(1300),
            saved_display: Duration::from_millis(2000),
            max_list_depth: 4,
        }
    }
}
