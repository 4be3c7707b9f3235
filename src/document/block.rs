use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Set of inline styles applied to a single character.
pub type StyleSet = BTreeSet<InlineStyle>;

/// Structural type of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockType {
    #[default]
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    Blockquote,
    CodeBlock,
    UnorderedListItem,
    OrderedListItem,
}

impl BlockType {
    pub const ALL: [BlockType; 11] = [
        BlockType::Unstyled,
        BlockType::HeaderOne,
        BlockType::HeaderTwo,
        BlockType::HeaderThree,
        BlockType::HeaderFour,
        BlockType::HeaderFive,
        BlockType::HeaderSix,
        BlockType::Blockquote,
        BlockType::CodeBlock,
        BlockType::UnorderedListItem,
        BlockType::OrderedListItem,
    ];

    /// Name used in the raw interchange format.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Unstyled => "unstyled",
            BlockType::HeaderOne => "header-one",
            BlockType::HeaderTwo => "header-two",
            BlockType::HeaderThree => "header-three",
            BlockType::HeaderFour => "header-four",
            BlockType::HeaderFive => "header-five",
            BlockType::HeaderSix => "header-six",
            BlockType::Blockquote => "blockquote",
            BlockType::CodeBlock => "code-block",
            BlockType::UnorderedListItem => "unordered-list-item",
            BlockType::OrderedListItem => "ordered-list-item",
        }
    }

    pub fn is_list_item(self) -> bool {
        matches!(
            self,
            BlockType::UnorderedListItem | BlockType::OrderedListItem
        )
    }

    /// Heading level (1..=6) for header blocks.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockType::HeaderOne => Some(1),
            BlockType::HeaderTwo => Some(2),
            BlockType::HeaderThree => Some(3),
            BlockType::HeaderFour => Some(4),
            BlockType::HeaderFive => Some(5),
            BlockType::HeaderSix => Some(6),
            _ => None,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_owned()))
    }
}

/// Formatting attribute applied to a range of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
}

impl InlineStyle {
    pub const ALL: [InlineStyle; 5] = [
        InlineStyle::Bold,
        InlineStyle::Italic,
        InlineStyle::Underline,
        InlineStyle::Strikethrough,
        InlineStyle::Code,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InlineStyle::Bold => "BOLD",
            InlineStyle::Italic => "ITALIC",
            InlineStyle::Underline => "UNDERLINE",
            InlineStyle::Strikethrough => "STRIKETHROUGH",
            InlineStyle::Code => "CODE",
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InlineStyle {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InlineStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_owned()))
    }
}

/// A block type or inline style name that this editor does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name `{0}`")]
pub struct UnknownName(pub String);

/// Identifier of a block, unique within one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Fresh random five character key.
    pub fn generate() -> Self {
        let id = uuid::Uuid::new_v4().simple().to_string();
        Self(id[..5].to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// One unit of document structure: typed, styled text at a nesting depth.
///
/// Offsets are counted in characters (Unicode scalar values), and `styles`
/// always holds exactly one entry per character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    key: BlockKey,
    block_type: BlockType,
    text: String,
    styles: Vec<StyleSet>,
    depth: u8,
}

impl ContentBlock {
    pub fn new(key: BlockKey, block_type: BlockType, text: impl Into<String>) -> Self {
        let text = text.into();
        let styles = vec![StyleSet::new(); text.chars().count()];
        Self {
            key,
            block_type,
            text,
            styles,
            depth: 0,
        }
    }

    pub fn empty(key: BlockKey, block_type: BlockType) -> Self {
        Self::new(key, block_type, String::new())
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Applies `style` to the characters in `range`, clamped to the block.
    pub fn with_style(mut self, range: Range<usize>, style: InlineStyle) -> Self {
        let end = range.end.min(self.styles.len());
        for set in &mut self.styles[range.start.min(end)..end] {
            set.insert(style);
        }
        self
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn styles(&self) -> &[StyleSet] {
        &self.styles
    }

    /// Inline style of the character at `offset`; empty past the end.
    pub fn inline_style_at(&self, offset: usize) -> StyleSet {
        self.styles.get(offset).cloned().unwrap_or_default()
    }

    /// Text of the characters in `range`.
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = self.byte_index(range.start);
        let end = self.byte_index(range.end);
        &self.text[start..end]
    }

    /// Maximal runs of characters sharing the same style set.
    pub fn style_runs(&self) -> Vec<(Range<usize>, &StyleSet)> {
        let mut runs: Vec<(Range<usize>, &StyleSet)> = Vec::new();
        for (i, set) in self.styles.iter().enumerate() {
            match runs.last_mut() {
                Some((range, current)) if *current == set => range.end = i + 1,
                _ => runs.push((i..i + 1, set)),
            }
        }
        runs
    }

    fn byte_index(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub(crate) fn set_type(&mut self, block_type: BlockType) {
        self.block_type = block_type;
    }

    pub(crate) fn set_depth(&mut self, depth: u8) {
        self.depth = depth;
    }

    pub(crate) fn styles_mut(&mut self) -> &mut [StyleSet] {
        &mut self.styles
    }

    /// Replaces the characters in `range` with `text`, every inserted
    /// character carrying `style`.
    pub(crate) fn replace_range(&mut self, range: Range<usize>, text: &str, style: &StyleSet) {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        let (byte_start, byte_end) = (self.byte_index(start), self.byte_index(end));
        self.text.replace_range(byte_start..byte_end, text);
        let inserted = std::iter::repeat_n(style.clone(), text.chars().count());
        self.styles.splice(start..end, inserted);
    }

    /// Removes and returns everything from `offset` on.
    pub(crate) fn split_off(&mut self, offset: usize) -> (String, Vec<StyleSet>) {
        let offset = offset.min(self.len());
        let byte = self.byte_index(offset);
        (self.text.split_off(byte), self.styles.split_off(offset))
    }

    pub(crate) fn append(&mut self, text: &str, styles: &[StyleSet]) {
        self.text.push_str(text);
        self.styles.extend_from_slice(styles);
    }

    pub(crate) fn from_parts(
        key: BlockKey,
        block_type: BlockType,
        text: String,
        styles: Vec<StyleSet>,
        depth: u8,
    ) -> Self {
        debug_assert_eq!(text.chars().count(), styles.len());
        Self {
            key,
            block_type,
            text,
            styles,
            depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_runs_group_identical_sets() {
        let block = ContentBlock::new("a".into(), BlockType::Unstyled, "Hello world")
            .with_style(0..5, InlineStyle::Bold);
        let runs = block.style_runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, 0..5);
        assert!(runs[0].1.contains(&InlineStyle::Bold));
        assert_eq!(runs[1].0, 5..11);
        assert!(runs[1].1.is_empty());
    }

    #[test]
    fn replace_range_counts_characters_not_bytes() {
        let mut block = ContentBlock::new("a".into(), BlockType::Unstyled, "héllo");
        block.replace_range(1..2, "e", &StyleSet::new());
        assert_eq!(block.text(), "hello");
        assert_eq!(block.len(), 5);
        assert_eq!(block.slice(1..3), "el");
    }

    #[test]
    fn block_type_names_parse_back() {
        for block_type in BlockType::ALL {
            assert_eq!(block_type.as_str().parse::<BlockType>(), Ok(block_type));
        }
        assert!("atomic".parse::<BlockType>().is_err());
    }
}
