mod rich_text;

pub use rich_text::RichTextBody;
