//! The JSON-compatible interchange form of a document.
//!
//! Field names follow the established raw content layout (`blocks`,
//! `inlineStyleRanges`, `entityMap`, ...), so stored drafts stay readable by
//! other editors using the same format. Entity data is carried through
//! untouched but not interpreted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::block::{BlockKey, BlockType, ContentBlock, InlineStyle, StyleSet};
use super::content::ContentState;
use crate::error::LoadError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default = "unstyled")]
    pub block_type: String,
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawInlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<Value>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// One inline style applied to a run of a block's text.
///
/// `offset` and `length` count chars (Unicode scalar values). Draft's own
/// raw format counts UTF-16 code units instead, so ranges in drafts written
/// by a Draft-based editor are shifted after any character outside the
/// Basic Multilingual Plane (most emoji).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInlineStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

fn unstyled() -> String {
    BlockType::Unstyled.as_str().to_owned()
}

impl RawContent {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ContentState {
    /// Reconstructs content from its raw form.
    ///
    /// Unknown block types load as unstyled and unknown inline styles are
    /// dropped. Missing or duplicate keys are replaced by fresh ones. A style
    /// range reaching past the end of its block is rejected.
    pub fn from_raw(raw: &RawContent) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        let mut blocks = Vec::with_capacity(raw.blocks.len());

        for raw_block in &raw.blocks {
            let block_type = raw_block.block_type.parse().unwrap_or_else(|_| {
                log::debug!("loading unknown block type `{}` as unstyled", raw_block.block_type);
                BlockType::Unstyled
            });

            let len = raw_block.text.chars().count();
            let mut styles = vec![StyleSet::new(); len];
            for range in &raw_block.inline_style_ranges {
                let end = range.offset.saturating_add(range.length);
                if end > len {
                    return Err(LoadError::InvalidContent(format!(
                        "style range {}..{} exceeds block `{}` of length {}",
                        range.offset, end, raw_block.key, len
                    )));
                }
                let Ok(style) = range.style.parse::<InlineStyle>() else {
                    log::debug!("dropping unknown inline style `{}`", range.style);
                    continue;
                };
                for set in &mut styles[range.offset..end] {
                    set.insert(style);
                }
            }

            let mut key = BlockKey::new(raw_block.key.clone());
            while key.as_str().is_empty() || seen.contains(&key) {
                key = BlockKey::generate();
            }
            seen.insert(key.clone());

            blocks.push(ContentBlock::from_parts(
                key,
                block_type,
                raw_block.text.clone(),
                styles,
                raw_block.depth,
            ));
        }

        Ok(ContentState::new(blocks))
    }

    /// The raw form of this content, one style range per maximal run of
    /// each style.
    pub fn to_raw(&self) -> RawContent {
        let blocks = self
            .blocks()
            .iter()
            .map(|block| RawBlock {
                key: block.key().to_string(),
                text: block.text().to_owned(),
                block_type: block.block_type().as_str().to_owned(),
                depth: block.depth(),
                inline_style_ranges: style_ranges(block),
                entity_ranges: Vec::new(),
                data: Map::new(),
            })
            .collect();

        RawContent {
            blocks,
            entity_map: Map::new(),
        }
    }
}

fn style_ranges(block: &ContentBlock) -> Vec<RawInlineStyleRange> {
    let mut ranges = Vec::new();
    let sentinel = StyleSet::new();
    for style in InlineStyle::ALL {
        let mut start = None;
        for (i, set) in block.styles().iter().chain([&sentinel]).enumerate() {
            match (start, set.contains(&style)) {
                (None, true) => start = Some(i),
                (Some(s), false) => {
                    ranges.push(RawInlineStyleRange {
                        offset: s,
                        length: i - s,
                        style: style.as_str().to_owned(),
                    });
                    start = None;
                }
                _ => {}
            }
        }
    }
    ranges.sort_by_key(|range| range.offset);
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let raw = RawContent::from_json(r#"{"blocks":[{"text":"hi"}]}"#).unwrap();
        let content = ContentState::from_raw(&raw).unwrap();
        let block = content.first_block();
        assert_eq!(block.text(), "hi");
        assert_eq!(block.block_type(), BlockType::Unstyled);
        assert!(!block.key().as_str().is_empty());
    }

    #[test]
    fn style_range_past_end_is_rejected() {
        let raw = RawContent::from_json(
            r#"{"blocks":[{"key":"a","text":"hi","type":"unstyled",
                "inlineStyleRanges":[{"offset":1,"length":5,"style":"BOLD"}]}],"entityMap":{}}"#,
        )
        .unwrap();
        assert!(matches!(
            ContentState::from_raw(&raw),
            Err(LoadError::InvalidContent(_))
        ));
    }

    #[test]
    fn duplicate_keys_are_replaced() {
        let raw = RawContent::from_json(
            r#"{"blocks":[{"key":"a","text":"one"},{"key":"a","text":"two"}]}"#,
        )
        .unwrap();
        let content = ContentState::from_raw(&raw).unwrap();
        assert_ne!(content.blocks()[0].key(), content.blocks()[1].key());
    }

    #[test]
    fn unknown_names_are_tolerated() {
        let raw = RawContent::from_json(
            r#"{"blocks":[{"key":"a","text":"img","type":"atomic",
                "inlineStyleRanges":[{"offset":0,"length":3,"style":"HIGHLIGHT"}]}]}"#,
        )
        .unwrap();
        let content = ContentState::from_raw(&raw).unwrap();
        assert_eq!(content.first_block().block_type(), BlockType::Unstyled);
        assert!(content.first_block().inline_style_at(0).is_empty());
    }

    #[test]
    fn overlapping_styles_produce_one_range_each() {
        let block = ContentBlock::new("k".into(), BlockType::Unstyled, "abcdef")
            .with_style(0..4, InlineStyle::Bold)
            .with_style(2..6, InlineStyle::Italic);
        let ranges = style_ranges(&block);
        assert_eq!(
            ranges,
            vec![
                RawInlineStyleRange { offset: 0, length: 4, style: "BOLD".into() },
                RawInlineStyleRange { offset: 2, length: 4, style: "ITALIC".into() },
            ]
        );
    }
}
