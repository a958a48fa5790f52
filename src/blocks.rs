use crate::models::{Block, BlockKey, BlockKind, HeadingLevel, Mark, RichText, TableCell, TableRow};

/// Builds an article body one block at a time.
///
/// Every constructor stamps the block with the next key from a counter
/// owned by the builder, so keys are unique within the body it produces.
#[derive(Debug, Default)]
pub struct BodyBuilder {
    next_key: u32,
    blocks: Vec<Block>,
}

impl BodyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(&mut self) -> BlockKey {
        self.next_key += 1;
        BlockKey::new(format!("key{}", self.next_key))
    }

    fn push(&mut self, kind: BlockKind) -> &mut Self {
        let key = self.key();
        self.blocks.push(Block::new(key, kind));
        self
    }

    fn heading(&mut self, level: HeadingLevel, text: &str) -> &mut Self {
        self.push(BlockKind::Heading {
            level,
            text: RichText::plain(text),
        })
    }

    pub fn h2(&mut self, text: &str) -> &mut Self {
        self.heading(HeadingLevel::H2, text)
    }

    pub fn h3(&mut self, text: &str) -> &mut Self {
        self.heading(HeadingLevel::H3, text)
    }

    pub fn h4(&mut self, text: &str) -> &mut Self {
        self.heading(HeadingLevel::H4, text)
    }

    pub fn p(&mut self, text: &str) -> &mut Self {
        self.push(BlockKind::Paragraph {
            text: RichText::plain(text),
        })
    }

    /// A paragraph whose whole text is emphasized as strong.
    pub fn bold(&mut self, text: &str) -> &mut Self {
        self.push(BlockKind::Paragraph {
            text: RichText::marked(text, vec![Mark::Strong]),
        })
    }

    pub fn blockquote(&mut self, text: &str) -> &mut Self {
        self.push(BlockKind::Blockquote {
            text: RichText::plain(text),
        })
    }

    pub fn code(&mut self, language: &str, code: &str, filename: Option<&str>) -> &mut Self {
        self.push(BlockKind::Code {
            language: language.to_string(),
            code: code.to_string(),
            filename: filename.map(str::to_string),
        })
    }

    fn list(&mut self, items: &[&str], ordered: bool) -> &mut Self {
        for item in items {
            self.push(BlockKind::ListItem {
                text: RichText::plain(*item),
                ordered,
                level: 1,
            });
        }
        self
    }

    pub fn ul(&mut self, items: &[&str]) -> &mut Self {
        self.list(items, false)
    }

    pub fn ol(&mut self, items: &[&str]) -> &mut Self {
        self.list(items, true)
    }

    pub fn image(&mut self, url: &str, alt: Option<&str>) -> &mut Self {
        self.push(BlockKind::Image {
            url: url.to_string(),
            alt: alt.map(str::to_string),
            width: None,
            height: None,
        })
    }

    /// First row is the header row.
    pub fn table(&mut self, header: &[&str], rows: &[&[&str]]) -> &mut Self {
        let header_row = TableRow {
            cells: header.iter().map(|text| TableCell::header(*text)).collect(),
        };
        let body_rows = rows.iter().map(|row| TableRow {
            cells: row.iter().map(|text| TableCell::data(*text)).collect(),
        });
        self.push(BlockKind::Table {
            rows: std::iter::once(header_row).chain(body_rows).collect(),
        })
    }

    pub fn build(&mut self) -> Vec<Block> {
        std::mem::take(&mut self.blocks)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn keys_are_unique_within_a_body() {
        let body = BodyBuilder::new()
            .h2("Intro")
            .p("Hello")
            .ul(&["a", "b", "c"])
            .code("rust", "fn main() {}", None)
            .build();

        let keys: HashSet<_> = body.iter().map(|block| block.key.as_str()).collect();
        assert_eq!(keys.len(), body.len());
        assert_eq!(body[0].key.as_str(), "key1");
    }

    #[test]
    fn lists_expand_to_one_item_per_entry() {
        let body = BodyBuilder::new().ol(&["first", "second"]).build();
        assert_eq!(body.len(), 2);
        assert!(body.iter().all(|block| matches!(
            block.kind,
            BlockKind::ListItem {
                ordered: true,
                level: 1,
                ..
            }
        )));
    }

    #[test]
    fn language_tags_are_not_validated() {
        let body = BodyBuilder::new().code("klingon", "qapla'", Some("a.tlh")).build();
        assert_eq!(
            body[0].kind,
            BlockKind::Code {
                language: "klingon".to_string(),
                code: "qapla'".to_string(),
                filename: Some("a.tlh".to_string()),
            }
        );
    }

    #[test]
    fn table_marks_first_row_as_header() {
        let body = BodyBuilder::new()
            .table(&["Strategy", "Latency"], &[&["cache-aside", "low"]])
            .build();
        let BlockKind::Table { rows } = &body[0].kind else {
            panic!("expected a table");
        };
        assert!(rows[0].cells.iter().all(|cell| cell.is_header));
        assert!(rows[1].cells.iter().all(|cell| !cell.is_header));
    }
}
