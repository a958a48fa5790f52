use reqwest::Url;
use serde::Serialize;
use tracing::warn;

use crate::models::{Block, BlockKey, BlockKind, HeadingLevel, RichText, TableCell, TableRow};

pub const MAX_IMAGE_WIDTH: u32 = 800;
pub const DEFAULT_IMAGE_ALT: &str = "Blog image";

/// Hosts that resize on request through a `w` query parameter.
const RESIZING_HOSTS: &[&str] = &["cdn.sanity.io", "images.unsplash.com"];

/// Canonical highlighter names and the tags authors use for them.
const LANGUAGES: &[(&str, &[&str])] = &[
    ("javascript", &["js", "mjs", "cjs"]),
    ("typescript", &["ts", "mts"]),
    ("jsx", &[]),
    ("tsx", &[]),
    ("python", &["py"]),
    ("bash", &["sh", "shell", "zsh"]),
    ("json", &[]),
    ("html", &["htm"]),
    ("css", &[]),
    ("sql", &["postgresql", "psql"]),
    ("yaml", &["yml"]),
    ("toml", &[]),
    ("markdown", &["md"]),
    ("php", &[]),
    ("java", &[]),
    ("csharp", &["cs", "c#"]),
    ("cpp", &["c++", "cxx"]),
    ("c", &[]),
    ("go", &["golang"]),
    ("rust", &["rs"]),
    ("ruby", &["rb"]),
    ("swift", &[]),
    ("kotlin", &["kt"]),
    ("scala", &[]),
    ("r", &[]),
    ("matlab", &[]),
    ("dockerfile", &["docker"]),
    ("git", &[]),
    ("graphql", &["gql"]),
    ("solidity", &["sol"]),
];

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ListStyle {
    Bullet,
    Numbered,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RenderedListItem {
    pub key: BlockKey,
    pub content: RichText,
    pub level: u8,
}

/// Presentational output for one logical unit of an article body.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderedNode {
    Heading {
        key: BlockKey,
        level: HeadingLevel,
        content: RichText,
    },
    Paragraph {
        key: BlockKey,
        content: RichText,
    },
    Blockquote {
        key: BlockKey,
        content: RichText,
    },
    List {
        key: BlockKey,
        style: ListStyle,
        items: Vec<RenderedListItem>,
    },
    Code {
        key: BlockKey,
        /// `None` means plain, unhighlighted text.
        language: Option<&'static str>,
        code: String,
        filename: Option<String>,
    },
    Image {
        key: BlockKey,
        src: String,
        alt: String,
        caption: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    },
    Table {
        key: BlockKey,
        rows: Vec<Vec<TableCell>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListEntry<'a> {
    pub key: &'a BlockKey,
    pub text: &'a RichText,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListRun<'a> {
    pub ordered: bool,
    pub items: Vec<ListEntry<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockGroup<'a> {
    Single(&'a Block),
    List(ListRun<'a>),
}

/// Folds contiguous list items of the same kind into one run.
///
/// A run ends at any non-list block, at a switch between ordered and
/// unordered items, or at the end of the body. Blank items are dropped
/// without ending the run around them.
pub fn group_blocks(blocks: &[Block]) -> Vec<BlockGroup<'_>> {
    let mut groups = Vec::new();
    let mut run: Option<ListRun<'_>> = None;

    for block in blocks {
        match &block.kind {
            BlockKind::ListItem { text, .. } if text.is_blank() => {
                warn!("Skipping blank list item {}", block.key);
            }
            BlockKind::ListItem {
                text,
                ordered,
                level,
            } => {
                let continues = matches!(&run, Some(current) if current.ordered == *ordered);
                if !continues {
                    groups.extend(run.take().map(BlockGroup::List));
                }
                run.get_or_insert_with(|| ListRun {
                    ordered: *ordered,
                    items: Vec::new(),
                })
                .items
                .push(ListEntry {
                    key: &block.key,
                    text,
                    level: *level,
                });
            }
            _ => {
                groups.extend(run.take().map(BlockGroup::List));
                groups.push(BlockGroup::Single(block));
            }
        }
    }
    groups.extend(run.take().map(BlockGroup::List));

    groups
}

/// Renders an article body. Unknown and malformed blocks are skipped so one
/// bad block never hides the rest of the article.
pub fn render_body(blocks: &[Block]) -> Vec<RenderedNode> {
    group_blocks(blocks)
        .into_iter()
        .filter_map(|group| match group {
            BlockGroup::Single(block) => render_block(block),
            BlockGroup::List(run) => Some(render_list(run)),
        })
        .collect()
}

fn render_list(run: ListRun<'_>) -> RenderedNode {
    let key = run
        .items
        .first()
        .map(|entry| entry.key.clone())
        .unwrap_or_else(|| BlockKey::new("list"));
    let style = if run.ordered {
        ListStyle::Numbered
    } else {
        ListStyle::Bullet
    };
    RenderedNode::List {
        key,
        style,
        items: run
            .items
            .into_iter()
            .map(|entry| RenderedListItem {
                key: entry.key.clone(),
                content: entry.text.clone(),
                level: entry.level,
            })
            .collect(),
    }
}

fn render_block(block: &Block) -> Option<RenderedNode> {
    let key = block.key.clone();
    let node = match &block.kind {
        BlockKind::Heading { level, text } if !text.is_blank() => RenderedNode::Heading {
            key,
            level: *level,
            content: text.clone(),
        },
        BlockKind::Paragraph { text } if !text.is_blank() => RenderedNode::Paragraph {
            key,
            content: text.clone(),
        },
        BlockKind::Blockquote { text } if !text.is_blank() => RenderedNode::Blockquote {
            key,
            content: text.clone(),
        },
        BlockKind::Code {
            language,
            code,
            filename,
        } if !code.trim().is_empty() => RenderedNode::Code {
            key,
            language: resolve_language(language),
            code: code.clone(),
            filename: filename.clone(),
        },
        BlockKind::Image {
            url,
            alt,
            width,
            height,
        } if !url.trim().is_empty() => render_image(key, url, alt.as_deref(), *width, *height),
        BlockKind::Table { rows } if has_content(rows) => RenderedNode::Table {
            key,
            rows: rows.iter().map(|row| row.cells.clone()).collect(),
        },
        BlockKind::Unsupported { block_type } => {
            warn!("Skipping block {} of unknown type {:?}", block.key, block_type);
            return None;
        }
        // List items never reach here; `group_blocks` folds them into runs.
        BlockKind::ListItem { .. } => return None,
        _ => {
            warn!("Skipping malformed block {}", block.key);
            return None;
        }
    };
    Some(node)
}

fn has_content(rows: &[TableRow]) -> bool {
    rows.iter()
        .flat_map(|row| &row.cells)
        .any(|cell| !cell.text.trim().is_empty())
}

/// Maps a free-form language tag to a highlighter name; anything unknown
/// renders as plain text.
pub fn resolve_language(tag: &str) -> Option<&'static str> {
    let tag = tag.trim().to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(name, aliases)| *name == tag || aliases.contains(&tag.as_str()))
        .map(|(name, _)| *name)
}

fn render_image(
    key: BlockKey,
    url: &str,
    alt: Option<&str>,
    width: Option<u32>,
    height: Option<u32>,
) -> RenderedNode {
    let caption = alt.filter(|alt| !alt.trim().is_empty()).map(str::to_string);
    let (width, height) = bounded_dimensions(width, height);

    RenderedNode::Image {
        key,
        src: bounded_image_url(url).unwrap_or_else(|| url.to_string()),
        alt: caption.clone().unwrap_or_else(|| DEFAULT_IMAGE_ALT.to_string()),
        caption,
        width,
        height,
    }
}

/// Asks a resizing host for at most [`MAX_IMAGE_WIDTH`] pixels. `None` when
/// the URL is not served by a host that can resize.
pub fn bounded_image_url(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    if !RESIZING_HOSTS.contains(&host) {
        return None;
    }

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(name, _)| *name != "w")
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    parsed
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("w", &MAX_IMAGE_WIDTH.to_string());
    Some(parsed.into())
}

fn bounded_dimensions(width: Option<u32>, height: Option<u32>) -> (Option<u32>, Option<u32>) {
    match (width, height) {
        (Some(w), Some(h)) if w > MAX_IMAGE_WIDTH => {
            let scaled = u64::from(h) * u64::from(MAX_IMAGE_WIDTH) / u64::from(w);
            (Some(MAX_IMAGE_WIDTH), u32::try_from(scaled).ok())
        }
        (Some(w), h) => (Some(w.min(MAX_IMAGE_WIDTH)), h),
        (None, h) => (None, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BodyBuilder;

    fn unsupported(key: &str, block_type: &str) -> Block {
        Block::new(
            BlockKey::new(key),
            BlockKind::Unsupported {
                block_type: block_type.to_string(),
            },
        )
    }

    #[test]
    fn renders_the_article_scenario_into_four_nodes() {
        let body = BodyBuilder::new()
            .h2("Intro")
            .p("Hello")
            .ul(&["a", "b"])
            .code("ts", "const x=1", Some("x.ts"))
            .build();

        let nodes = render_body(&body);
        assert_eq!(nodes.len(), 4);
        assert!(matches!(
            &nodes[0],
            RenderedNode::Heading { level: HeadingLevel::H2, content, .. } if content.plain_text() == "Intro"
        ));
        assert!(matches!(
            &nodes[1],
            RenderedNode::Paragraph { content, .. } if content.plain_text() == "Hello"
        ));
        let RenderedNode::List { style, items, .. } = &nodes[2] else {
            panic!("expected a list, got {:?}", nodes[2]);
        };
        assert_eq!(*style, ListStyle::Bullet);
        let texts: Vec<String> = items.iter().map(|item| item.content.plain_text()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert_eq!(
            nodes[3],
            RenderedNode::Code {
                key: body[4].key.clone(),
                language: Some("typescript"),
                code: "const x=1".to_string(),
                filename: Some("x.ts".to_string()),
            }
        );
    }

    #[test]
    fn three_bullets_then_paragraph_make_one_list_and_one_paragraph() {
        let body = BodyBuilder::new().ul(&["a", "b", "c"]).p("after").build();
        let nodes = render_body(&body);

        assert_eq!(nodes.len(), 2);
        assert!(matches!(&nodes[0], RenderedNode::List { items, .. } if items.len() == 3));
        assert!(matches!(&nodes[1], RenderedNode::Paragraph { .. }));
    }

    #[test]
    fn switching_list_kind_starts_a_new_list() {
        let body = BodyBuilder::new().ul(&["a", "b"]).ol(&["one", "two"]).ul(&["c"]).build();
        let groups = group_blocks(&body);

        let kinds: Vec<(bool, usize)> = groups
            .iter()
            .map(|group| match group {
                BlockGroup::List(run) => (run.ordered, run.items.len()),
                BlockGroup::Single(_) => panic!("no single blocks expected"),
            })
            .collect();
        assert_eq!(kinds, vec![(false, 2), (true, 2), (false, 1)]);
    }

    #[test]
    fn non_list_block_splits_runs_of_the_same_kind() {
        let body = BodyBuilder::new().ol(&["one"]).p("between").ol(&["two"]).build();
        let groups = group_blocks(&body);
        assert_eq!(groups.len(), 3);
        assert!(matches!(groups[1], BlockGroup::Single(_)));
    }

    #[test]
    fn list_at_end_of_body_is_flushed() {
        let body = BodyBuilder::new().p("before").ol(&["x", "y"]).build();
        let nodes = render_body(&body);
        assert!(matches!(
            nodes.last(),
            Some(RenderedNode::List { style: ListStyle::Numbered, items, .. }) if items.len() == 2
        ));
    }

    #[test]
    fn unknown_block_between_paragraphs_is_skipped() {
        let mut body = BodyBuilder::new().p("first").p("second").build();
        body.insert(1, unsupported("mystery", "youtube"));

        let nodes = render_body(&body);
        assert_eq!(nodes.len(), 2);
        assert!(nodes
            .iter()
            .all(|node| matches!(node, RenderedNode::Paragraph { .. })));
    }

    #[test]
    fn malformed_blocks_are_skipped_without_aborting() {
        let body = BodyBuilder::new()
            .code("rust", "   ", None)
            .image("", Some("nothing"))
            .table(&[""], &[])
            .p("")
            .p("survivor")
            .build();

        let nodes = render_body(&body);
        assert_eq!(nodes.len(), 1);
        assert!(matches!(&nodes[0], RenderedNode::Paragraph { content, .. } if content.plain_text() == "survivor"));
    }

    #[test]
    fn blank_list_items_are_skipped_without_splitting_the_list() {
        let body = BodyBuilder::new()
            .p("")
            .ul(&["", "   "])
            .p("between")
            .ul(&["one", " ", "two"])
            .build();

        let nodes = render_body(&body);
        assert_eq!(nodes.len(), 2);
        assert!(matches!(&nodes[0], RenderedNode::Paragraph { .. }));
        let RenderedNode::List { items, .. } = &nodes[1] else {
            panic!("expected a list");
        };
        let texts: Vec<String> = items.iter().map(|item| item.content.plain_text()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn languages_resolve_through_aliases_or_fall_back_to_plain() {
        assert_eq!(resolve_language("TS"), Some("typescript"));
        assert_eq!(resolve_language("yml"), Some("yaml"));
        assert_eq!(resolve_language("rust"), Some("rust"));
        assert_eq!(resolve_language("text"), None);
        assert_eq!(resolve_language("brainfuck"), None);
        assert_eq!(resolve_language(""), None);
    }

    #[test]
    fn images_default_alt_and_request_bounded_width() {
        let body = BodyBuilder::new()
            .image(
                "https://images.unsplash.com/photo-1?w=1600&h=400&fit=crop",
                None,
            )
            .build();

        let nodes = render_body(&body);
        let RenderedNode::Image {
            src, alt, caption, ..
        } = &nodes[0]
        else {
            panic!("expected an image");
        };
        assert_eq!(alt, DEFAULT_IMAGE_ALT);
        assert_eq!(*caption, None);
        assert_eq!(src, "https://images.unsplash.com/photo-1?h=400&fit=crop&w=800");
    }

    #[test]
    fn foreign_image_hosts_are_left_alone() {
        assert_eq!(bounded_image_url("https://example.com/a.png"), None);
        assert_eq!(bounded_image_url("not a url"), None);
    }

    #[test]
    fn oversized_dimensions_scale_down_keeping_aspect_ratio() {
        let block = Block::new(
            BlockKey::new("img"),
            BlockKind::Image {
                url: "https://cdn.sanity.io/images/p/d/abc-2000x1000.jpg".to_string(),
                alt: Some("Diagram".to_string()),
                width: Some(2000),
                height: Some(1000),
            },
        );

        let nodes = render_body(&[block]);
        assert_eq!(
            nodes[0],
            RenderedNode::Image {
                key: BlockKey::new("img"),
                src: "https://cdn.sanity.io/images/p/d/abc-2000x1000.jpg?w=800".to_string(),
                alt: "Diagram".to_string(),
                caption: Some("Diagram".to_string()),
                width: Some(800),
                height: Some(400),
            }
        );
    }

    #[test]
    fn tables_keep_header_cells() {
        let body = BodyBuilder::new()
            .table(&["Name", "Value"], &[&["a", "1"]])
            .build();
        let nodes = render_body(&body);
        let RenderedNode::Table { rows, .. } = &nodes[0] else {
            panic!("expected a table");
        };
        assert!(rows[0].iter().all(|cell| cell.is_header));
        assert_eq!(rows[1][1].text, "1");
    }

    #[test]
    fn rendering_is_pure() {
        let body = BodyBuilder::new().h3("Title").ul(&["x"]).blockquote("quote").build();
        assert_eq!(render_body(&body), render_body(&body));
    }
}
