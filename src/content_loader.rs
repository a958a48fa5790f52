use std::future::Future;

use tracing::info;

use crate::config::{ConfigError, ContentConfig, ContentSource};
use crate::models::Post;
use crate::posts::{yearly_sources, PostSource};
use crate::sanity::SanityProvider;

/// Produces the raw post collection. Implementations never fail: an
/// unavailable source is handled inside the provider, which marks the
/// stand-in posts it serves as [`Freshness::Fallback`].
pub trait ContentProvider {
    fn fetch_posts(&self) -> impl Future<Output = Fetched> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Live,
    Fallback,
}

/// Posts from one provider call and whether they came from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub posts: Vec<Post>,
    pub freshness: Freshness,
}

impl Fetched {
    pub fn live(posts: Vec<Post>) -> Self {
        Self {
            posts,
            freshness: Freshness::Live,
        }
    }

    pub fn fallback(posts: Vec<Post>) -> Self {
        Self {
            posts,
            freshness: Freshness::Fallback,
        }
    }

    pub fn is_live(&self) -> bool {
        self.freshness == Freshness::Live
    }
}

/// Concatenates hardcoded post modules; no I/O.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    sources: Vec<PostSource>,
}

impl StaticProvider {
    pub fn with_sources(sources: Vec<PostSource>) -> Self {
        Self { sources }
    }
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::with_sources(yearly_sources())
    }
}

impl ContentProvider for StaticProvider {
    async fn fetch_posts(&self) -> Fetched {
        Fetched::live(self.sources.iter().flat_map(|source| source()).collect())
    }
}

/// The strategy picked from configuration. Static and remote posts are
/// never mixed.
#[derive(Debug, Clone)]
pub enum ConfiguredProvider {
    Static(StaticProvider),
    Sanity(SanityProvider),
}

impl ConfiguredProvider {
    pub fn from_config(config: &ContentConfig) -> Result<Self, ConfigError> {
        match config.source {
            ContentSource::Static => {
                info!("Serving posts from the built-in yearly modules");
                Ok(Self::Static(StaticProvider::default()))
            }
            ContentSource::Sanity => {
                info!(dataset = %config.sanity.dataset, "Serving posts from the sanity content api");
                Ok(Self::Sanity(SanityProvider::new(&config.sanity)?))
            }
        }
    }
}

impl ContentProvider for ConfiguredProvider {
    async fn fetch_posts(&self) -> Fetched {
        match self {
            Self::Static(provider) => provider.fetch_posts().await,
            Self::Sanity(provider) => provider.fetch_posts().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BodyBuilder;
    use crate::models::{parse_published_at, Slug};

    fn single(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: id.to_string(),
            slug: Slug::new(id),
            excerpt: None,
            published_at: parse_published_at("2024-06-01").unwrap(),
            author: None,
            categories: Vec::new(),
            cover_image: None,
            body: BodyBuilder::new().p("body").build(),
        }
    }

    fn first() -> Vec<Post> {
        vec![single("a"), single("b")]
    }

    fn second() -> Vec<Post> {
        vec![single("c")]
    }

    #[tokio::test]
    async fn static_provider_concatenates_sources_in_order() {
        let provider = StaticProvider::with_sources(vec![first, second]);
        let fetched = provider.fetch_posts().await;
        assert!(fetched.is_live());
        let ids: Vec<String> = fetched.posts.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn default_static_provider_serves_every_year() {
        let posts = StaticProvider::default().fetch_posts().await.posts;
        assert!(posts.iter().any(|post| post.id.starts_with("2024-")));
        assert!(posts.iter().any(|post| post.id.starts_with("2025-")));
        assert!(posts.iter().any(|post| post.id.starts_with("2026-")));
    }

    #[test]
    fn sanity_strategy_requires_a_project() {
        let config = ContentConfig {
            source: ContentSource::Sanity,
            ..ContentConfig::default()
        };
        assert!(matches!(
            ConfiguredProvider::from_config(&config),
            Err(ConfigError::MissingProjectId)
        ));
    }

    #[test]
    fn static_strategy_is_the_default() {
        let provider = ConfiguredProvider::from_config(&ContentConfig::default()).unwrap();
        assert!(matches!(provider, ConfiguredProvider::Static(_)));
    }
}
