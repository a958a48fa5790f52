use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::content_loader::ContentProvider;
use crate::models::Post;

struct CachedPosts {
    fetched_at: Instant,
    posts: Arc<Vec<Post>>,
}

/// Read-only view over whatever the content provider yields.
///
/// Without a cache TTL every call asks the provider again.
pub struct PostRepository<P> {
    provider: P,
    cache_ttl: Duration,
    cache: RwLock<Option<CachedPosts>>,
}

impl<P: ContentProvider + Sync> PostRepository<P> {
    pub fn new(provider: P) -> Self {
        Self::with_cache_ttl(provider, Duration::ZERO)
    }

    pub fn with_cache_ttl(provider: P, cache_ttl: Duration) -> Self {
        Self {
            provider,
            cache_ttl,
            cache: RwLock::new(None),
        }
    }

    /// All posts, newest first.
    pub async fn list_all(&self) -> Vec<Post> {
        self.collection().await.as_ref().clone()
    }

    pub async fn get_by_slug(&self, slug: &str) -> Option<Post> {
        self.collection()
            .await
            .iter()
            .find(|post| post.slug.current() == slug)
            .cloned()
    }

    pub async fn list_recent(&self, count: usize) -> Vec<Post> {
        self.collection().await.iter().take(count).cloned().collect()
    }

    async fn collection(&self) -> Arc<Vec<Post>> {
        if self.cache_ttl.is_zero() {
            return Arc::new(merge(self.provider.fetch_posts().await.posts));
        }

        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.fetched_at.elapsed() < self.cache_ttl {
                return Arc::clone(&cached.posts);
            }
        }

        debug!("Post cache is empty or stale, refreshing");
        let fetched = self.provider.fetch_posts().await;
        let live = fetched.is_live();
        let posts = Arc::new(merge(fetched.posts));
        if live {
            *self.cache.write().await = Some(CachedPosts {
                fetched_at: Instant::now(),
                posts: Arc::clone(&posts),
            });
        } else {
            debug!("Not caching fallback posts");
        }
        posts
    }
}

/// Orders posts newest first and keeps slugs unique.
///
/// Equal timestamps keep the provider's order. When two posts share a slug
/// the one that sorts first wins.
pub fn merge(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let mut seen = HashSet::new();
    posts.retain(|post| {
        let fresh = seen.insert(post.slug.clone());
        if !fresh {
            warn!("Dropping post {} with duplicate slug {}", post.id, post.slug);
        }
        fresh
    });
    posts
}
