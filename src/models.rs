use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const WORDS_PER_MINUTE: usize = 200;

/// A single blog article: metadata plus an ordered body of blocks.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    pub excerpt: Option<String>,
    pub published_at: DateTime<Utc>,
    pub author: Option<String>,
    pub categories: Vec<String>,
    #[serde(rename = "mainImage")]
    pub cover_image: Option<String>,
    pub body: Vec<Block>,
}

impl Post {
    /// Publication date the way article pages print it, e.g. `January 8, 2024`.
    pub fn display_date(&self) -> String {
        self.published_at.format("%B %-d, %Y").to_string()
    }

    pub fn reading_minutes(&self) -> usize {
        let words: usize = self.body.iter().map(Block::word_count).sum();
        words.div_ceil(WORDS_PER_MINUTE).max(1)
    }
}

/// URL-safe public lookup key of a post.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug {
    current: String,
}

impl Slug {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Lowercase ASCII alphanumeric words joined by single hyphens.
    pub fn is_url_safe(&self) -> bool {
        !self.current.is_empty()
            && self.current.split('-').all(|word| {
                !word.is_empty()
                    && word
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.current)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid publishedAt value: {0:?}")]
pub struct InvalidTimestamp(pub String);

/// Normalizes a publication timestamp into an instant.
///
/// Sources mix full RFC 3339 timestamps with bare dates; a bare date is
/// midnight UTC and a timestamp without offset is taken as UTC.
pub fn parse_published_at(value: &str) -> Result<DateTime<Utc>, InvalidTimestamp> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| InvalidTimestamp(value.to_string()))
}

/// Opaque identity of a block inside one document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
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

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Block {
    #[serde(rename = "_key")]
    pub key: BlockKey,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    pub fn new(key: BlockKey, kind: BlockKind) -> Self {
        Self { key, kind }
    }

    fn word_count(&self) -> usize {
        match &self.kind {
            BlockKind::Heading { text, .. }
            | BlockKind::Paragraph { text }
            | BlockKind::Blockquote { text }
            | BlockKind::ListItem { text, .. } => text.plain_text().split_whitespace().count(),
            BlockKind::Table { rows } => rows
                .iter()
                .flat_map(|row| &row.cells)
                .map(|cell| cell.text.split_whitespace().count())
                .sum(),
            BlockKind::Code { .. } | BlockKind::Image { .. } | BlockKind::Unsupported { .. } => 0,
        }
    }
}

/// The closed set of block variants. `Unsupported` carries whatever tag a
/// remote document used that this model does not know.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "_type", rename_all = "camelCase")]
pub enum BlockKind {
    Heading {
        level: HeadingLevel,
        text: RichText,
    },
    Paragraph {
        text: RichText,
    },
    Blockquote {
        text: RichText,
    },
    #[serde(rename_all = "camelCase")]
    ListItem {
        text: RichText,
        ordered: bool,
        level: u8,
    },
    Code {
        language: String,
        code: String,
        filename: Option<String>,
    },
    Image {
        url: String,
        alt: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    },
    Table {
        rows: Vec<TableRow>,
    },
    #[serde(rename_all = "camelCase")]
    Unsupported {
        block_type: String,
    },
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(into = "u8")]
pub enum HeadingLevel {
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }

    /// Maps any HTML heading depth onto the three levels article bodies use;
    /// `h1` belongs to the page title.
    pub fn clamped(depth: u8) -> Self {
        match depth {
            0..=2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            _ => HeadingLevel::H4,
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct RichText(pub Vec<Span>);

impl RichText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self(vec![Span::new(text, Vec::new())])
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self(vec![Span::new(text, marks)])
    }

    pub fn spans(&self) -> &[Span] {
        &self.0
    }

    pub fn plain_text(&self) -> String {
        self.0.iter().map(|span| span.text.as_str()).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|span| span.text.trim().is_empty())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl Span {
    pub fn new(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Strong,
    Em,
    Code,
    Underline,
    StrikeThrough,
    Link { href: String },
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub text: String,
    pub is_header: bool,
}

impl TableCell {
    pub fn header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_header: true,
        }
    }

    pub fn data(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_header: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_dates_as_midnight_utc() {
        let instant = parse_published_at("2024-01-08").unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-01-08T00:00:00+00:00");
    }

    #[test]
    fn parses_full_timestamps_with_offsets() {
        let instant = parse_published_at("2026-01-10T12:00:00+02:00").unwrap();
        assert_eq!(instant.to_rfc3339(), "2026-01-10T10:00:00+00:00");
    }

    #[test]
    fn bare_date_sorts_before_later_timestamp_on_same_day() {
        let date_only = parse_published_at("2026-01-10").unwrap();
        let timestamp = parse_published_at("2026-01-10T10:00:00Z").unwrap();
        assert!(date_only < timestamp);
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert_eq!(
            parse_published_at("last tuesday"),
            Err(InvalidTimestamp("last tuesday".to_string()))
        );
    }

    #[test]
    fn slug_url_safety() {
        assert!(Slug::new("nextjs-14-app-router-deep-dive").is_url_safe());
        assert!(!Slug::new("Has-Caps").is_url_safe());
        assert!(!Slug::new("double--hyphen").is_url_safe());
        assert!(!Slug::new("-leading").is_url_safe());
        assert!(!Slug::new("").is_url_safe());
        assert!(!Slug::new("white space").is_url_safe());
    }

    #[test]
    fn heading_levels_clamp_into_body_range() {
        assert_eq!(HeadingLevel::clamped(1), HeadingLevel::H2);
        assert_eq!(HeadingLevel::clamped(3), HeadingLevel::H3);
        assert_eq!(HeadingLevel::clamped(6), HeadingLevel::H4);
    }

    #[test]
    fn post_serializes_in_cms_shape() {
        let post = Post {
            id: "2024-01".to_string(),
            title: "Title".to_string(),
            slug: Slug::new("title"),
            excerpt: None,
            published_at: parse_published_at("2024-01-08").unwrap(),
            author: Some("Author".to_string()),
            categories: vec!["Rust".to_string()],
            cover_image: None,
            body: vec![Block::new(
                BlockKey::new("key1"),
                BlockKind::Heading {
                    level: HeadingLevel::H3,
                    text: RichText::plain("Intro"),
                },
            )],
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["_id"], "2024-01");
        assert_eq!(json["slug"]["current"], "title");
        assert_eq!(json["publishedAt"], "2024-01-08T00:00:00Z");
        assert_eq!(json["body"][0]["_type"], "heading");
        assert_eq!(json["body"][0]["_key"], "key1");
        assert_eq!(json["body"][0]["level"], 3);
        assert_eq!(post.display_date(), "January 8, 2024");
        assert_eq!(post.reading_minutes(), 1);
    }
}
