use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigError, SanityConfig};
use crate::content_loader::{ContentProvider, Fetched};
use crate::mock_posts::fallback_posts;
use crate::models::{
    parse_published_at, Block, BlockKey, BlockKind, HeadingLevel, InvalidTimestamp, Mark, Post,
    RichText, Slug, Span, TableCell, TableRow,
};

/// Every published post with its references resolved.
pub const POSTS_QUERY: &str = r#"*[_type == "post" && defined(slug.current)] | order(publishedAt desc) {
  _id,
  title,
  slug,
  excerpt,
  publishedAt,
  "author": author->name,
  "categories": categories[]->title,
  "mainImage": mainImage.asset->url,
  body
}"#;

const IMAGE_CDN: &str = "https://cdn.sanity.io/images";

#[derive(Debug, Error)]
pub enum SanityError {
    #[error("request to the content api failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("content api answered with status {0}")]
    Status(StatusCode),
    #[error("content api response did not match the post shape: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("post {id} has an unusable publishedAt: {source}")]
    Timestamp {
        id: String,
        source: InvalidTimestamp,
    },
}

/// Turns image asset references into CDN URLs.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl ImageUrlBuilder {
    pub fn new(project_id: &str, dataset: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            dataset: dataset.to_string(),
        }
    }

    /// Resolves refs shaped like `image-<assetId>-<width>x<height>-<format>`.
    pub fn asset(&self, reference: &str) -> Option<AssetImage> {
        let rest = reference.strip_prefix("image-")?;
        let (rest, format) = rest.rsplit_once('-')?;
        let (asset_id, dimensions) = rest.rsplit_once('-')?;
        let (width, height) = dimensions.split_once('x')?;
        let width: u32 = width.parse().ok()?;
        let height: u32 = height.parse().ok()?;
        if asset_id.is_empty() || format.is_empty() {
            return None;
        }

        Some(AssetImage {
            url: format!(
                "{IMAGE_CDN}/{}/{}/{asset_id}-{width}x{height}.{format}",
                self.project_id, self.dataset
            ),
            width,
            height,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SanityClient {
    http: Client,
    query_url: Url,
    images: ImageUrlBuilder,
}

impl SanityClient {
    pub fn new(config: &SanityConfig) -> Result<Self, ConfigError> {
        let project_id = config
            .project_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::MissingProjectId)?;

        let origin = match &config.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => {
                let api = if config.use_cdn { "apicdn" } else { "api" };
                format!("https://{project_id}.{api}.sanity.io")
            }
        };
        let version = config.api_version.trim_start_matches('v');
        let raw_url = format!("{origin}/v{version}/data/query/{}", config.dataset);
        let query_url = Url::parse(&raw_url).map_err(|_| ConfigError::InvalidApiHost(origin))?;

        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            query_url,
            images: ImageUrlBuilder::new(project_id, &config.dataset),
        })
    }

    pub fn query_url(&self) -> &Url {
        &self.query_url
    }

    pub async fn fetch_posts(&self) -> Result<Vec<Post>, SanityError> {
        debug!("Querying content api at {}", self.query_url);
        let response = self
            .http
            .get(self.query_url.clone())
            .query(&[("query", POSTS_QUERY)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SanityError::Status(status));
        }

        let bytes = response.bytes().await?;
        let envelope: QueryResponse = serde_json::from_slice(&bytes)?;
        envelope
            .result
            .into_iter()
            .map(|raw| raw.into_post(&self.images))
            .collect()
    }
}

/// Remote strategy: query the CMS, fall back to placeholder posts on any failure.
#[derive(Debug, Clone)]
pub struct SanityProvider {
    client: SanityClient,
}

impl SanityProvider {
    pub fn new(config: &SanityConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: SanityClient::new(config)?,
        })
    }
}

impl ContentProvider for SanityProvider {
    async fn fetch_posts(&self) -> Fetched {
        match self.client.fetch_posts().await {
            Ok(posts) => {
                debug!("Loaded {} posts from the content api", posts.len());
                Fetched::live(posts)
            }
            Err(e) => {
                error!("Failed to fetch posts from the content api: {}", e);
                info!("Serving placeholder posts instead");
                Fetched::fallback(fallback_posts())
            }
        }
    }
}

#[derive(Deserialize)]
struct QueryResponse {
    result: Vec<RawPost>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPost {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    slug: Slug,
    #[serde(default)]
    excerpt: Option<String>,
    published_at: String,
    #[serde(default)]
    author: Option<String>,
    // Dangling category references come back as null entries.
    #[serde(default)]
    categories: Option<Vec<Option<String>>>,
    #[serde(default)]
    main_image: Option<String>,
    #[serde(default)]
    body: Option<Vec<Value>>,
}

impl RawPost {
    fn into_post(self, images: &ImageUrlBuilder) -> Result<Post, SanityError> {
        let published_at =
            parse_published_at(&self.published_at).map_err(|source| SanityError::Timestamp {
                id: self.id.clone(),
                source,
            })?;

        let body = self
            .body
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, value)| decode_block(value, index, images))
            .collect();

        Ok(Post {
            id: self.id,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            published_at,
            author: self.author,
            categories: self.categories.unwrap_or_default().into_iter().flatten().collect(),
            cover_image: self.main_image,
            body,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTextBlock {
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    list_item: Option<String>,
    #[serde(default)]
    level: Option<u8>,
    #[serde(default)]
    mark_defs: Vec<RawMarkDef>,
    #[serde(default)]
    children: Vec<RawSpan>,
}

#[derive(Deserialize)]
struct RawMarkDef {
    #[serde(rename = "_key")]
    key: String,
    #[serde(rename = "_type")]
    kind: String,
    #[serde(default)]
    href: Option<String>,
}

#[derive(Deserialize)]
struct RawSpan {
    #[serde(default)]
    text: String,
    #[serde(default)]
    marks: Vec<String>,
}

#[derive(Deserialize)]
struct RawCode {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    filename: Option<String>,
}

#[derive(Deserialize)]
struct RawImage {
    #[serde(default)]
    asset: Option<RawAsset>,
    #[serde(default)]
    alt: Option<String>,
}

#[derive(Deserialize)]
struct RawAsset {
    #[serde(rename = "_ref", default)]
    reference: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    rows: Vec<RawRow>,
}

#[derive(Deserialize)]
struct RawRow {
    #[serde(default)]
    cells: Vec<RawCell>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCell {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    is_header: Option<bool>,
}

/// Decodes one Portable Text node. Never fails: anything unknown or
/// malformed becomes `Unsupported` and is left for the renderer to skip.
fn decode_block(value: &Value, index: usize, images: &ImageUrlBuilder) -> Block {
    let key = value
        .get("_key")
        .and_then(Value::as_str)
        .map(BlockKey::new)
        .unwrap_or_else(|| BlockKey::new(format!("block{index}")));
    let block_type = value
        .get("_type")
        .and_then(Value::as_str)
        .unwrap_or("<missing>");

    let kind = match block_type {
        "block" => decode_as::<RawTextBlock>(value).map(text_block_kind),
        "code" => decode_as::<RawCode>(value).map(|raw| BlockKind::Code {
            language: raw.language.unwrap_or_default(),
            code: raw.code.unwrap_or_default(),
            filename: raw.filename.filter(|name| !name.is_empty()),
        }),
        "image" => decode_as::<RawImage>(value).map(|raw| image_kind(raw, images)),
        "table" => decode_as::<RawTable>(value).map(|raw| BlockKind::Table {
            rows: raw
                .rows
                .into_iter()
                .map(|row| TableRow {
                    cells: row
                        .cells
                        .into_iter()
                        .map(|cell| TableCell {
                            text: cell.text.unwrap_or_default(),
                            is_header: cell.is_header.unwrap_or(false),
                        })
                        .collect(),
                })
                .collect(),
        }),
        _ => None,
    };

    let kind = kind.unwrap_or_else(|| BlockKind::Unsupported {
        block_type: block_type.to_string(),
    });
    Block::new(key, kind)
}

fn decode_as<T: DeserializeOwned>(value: &Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!("Malformed body block: {}", e);
            None
        }
    }
}

fn text_block_kind(raw: RawTextBlock) -> BlockKind {
    let text = rich_text(raw.children, &raw.mark_defs);

    if let Some(list_item) = raw.list_item {
        return BlockKind::ListItem {
            text,
            ordered: list_item == "number",
            level: raw.level.unwrap_or(1).max(1),
        };
    }

    match raw.style.as_deref().unwrap_or("normal") {
        "blockquote" => BlockKind::Blockquote { text },
        style => match heading_depth(style) {
            Some(depth) => BlockKind::Heading {
                level: HeadingLevel::clamped(depth),
                text,
            },
            None => BlockKind::Paragraph { text },
        },
    }
}

fn heading_depth(style: &str) -> Option<u8> {
    let depth: u8 = style.strip_prefix('h')?.parse().ok()?;
    (1..=6).contains(&depth).then_some(depth)
}

fn rich_text(children: Vec<RawSpan>, mark_defs: &[RawMarkDef]) -> RichText {
    RichText(
        children
            .into_iter()
            .map(|span| {
                let marks = span
                    .marks
                    .iter()
                    .filter_map(|mark| resolve_mark(mark, mark_defs))
                    .collect();
                Span::new(span.text, marks)
            })
            .collect(),
    )
}

fn resolve_mark(mark: &str, mark_defs: &[RawMarkDef]) -> Option<Mark> {
    match mark {
        "strong" => Some(Mark::Strong),
        "em" => Some(Mark::Em),
        "code" => Some(Mark::Code),
        "underline" => Some(Mark::Underline),
        "strike-through" => Some(Mark::StrikeThrough),
        key => {
            let def = mark_defs.iter().find(|def| def.key == key)?;
            match (def.kind.as_str(), &def.href) {
                ("link", Some(href)) => Some(Mark::Link { href: href.clone() }),
                _ => None,
            }
        }
    }
}

fn image_kind(raw: RawImage, images: &ImageUrlBuilder) -> BlockKind {
    let alt = raw.alt.filter(|alt| !alt.is_empty());
    let asset = raw.asset.unwrap_or(RawAsset {
        reference: None,
        url: None,
    });

    match asset.reference.as_deref().and_then(|r| images.asset(r)) {
        Some(image) => BlockKind::Image {
            url: image.url,
            alt,
            width: Some(image.width),
            height: Some(image.height),
        },
        None => BlockKind::Image {
            url: asset.url.unwrap_or_default(),
            alt,
            width: None,
            height: None,
        },
    }
}
