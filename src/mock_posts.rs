use chrono::{DateTime, Utc};

use crate::blocks::BodyBuilder;
use crate::models::{parse_published_at, Post, Slug};

const MOCK_AUTHOR: &str = "John Pecson";

fn mock_date(value: &str) -> DateTime<Utc> {
    parse_published_at(value).unwrap_or_else(|err| panic!("mock post date is broken: {err}"))
}

/// Placeholder posts served when the CMS cannot be reached.
///
/// Fixed content, so two failures in a row produce identical output.
pub fn fallback_posts() -> Vec<Post> {
    vec![
        Post {
            id: "mock-1".to_string(),
            title: "Getting Started with Next.js 14".to_string(),
            slug: Slug::new("getting-started-nextjs-14"),
            excerpt: Some(
                "Learn how to build modern web applications with Next.js 14 and the App Router."
                    .to_string(),
            ),
            published_at: mock_date("2024-01-15T10:00:00Z"),
            author: Some(MOCK_AUTHOR.to_string()),
            categories: vec!["Next.js".to_string(), "React".to_string()],
            cover_image: None,
            body: BodyBuilder::new()
                .h2("Getting Started")
                .p("This article is a placeholder shown while the blog content service is unavailable.")
                .build(),
        },
        Post {
            id: "mock-2".to_string(),
            title: "Building Scalable APIs with NestJS".to_string(),
            slug: Slug::new("building-scalable-apis-nestjs"),
            excerpt: Some(
                "Best practices for designing and structuring backend services with NestJS."
                    .to_string(),
            ),
            published_at: mock_date("2024-01-10T10:00:00Z"),
            author: Some(MOCK_AUTHOR.to_string()),
            categories: vec!["NestJS".to_string(), "Backend".to_string()],
            cover_image: None,
            body: BodyBuilder::new()
                .h2("Structuring Services")
                .p("This article is a placeholder shown while the blog content service is unavailable.")
                .build(),
        },
        Post {
            id: "mock-3".to_string(),
            title: "Web3 Development Essentials".to_string(),
            slug: Slug::new("web3-development-essentials"),
            excerpt: Some(
                "An introduction to smart contracts, wallets, and decentralized application design."
                    .to_string(),
            ),
            published_at: mock_date("2024-01-05T10:00:00Z"),
            author: Some(MOCK_AUTHOR.to_string()),
            categories: vec!["Web3".to_string(), "Blockchain".to_string()],
            cover_image: None,
            body: BodyBuilder::new()
                .h2("Smart Contracts")
                .p("This article is a placeholder shown while the blog content service is unavailable.")
                .build(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Datelike;

    use super::{fallback_posts, mock_date};

    #[test]
    #[should_panic(expected = "mock post date is broken")]
    fn broken_mock_dates_fail_loudly() {
        mock_date("someday");
    }

    #[test]
    fn fallback_is_deterministic() {
        assert_eq!(fallback_posts(), fallback_posts());
    }

    #[test]
    fn fallback_honours_post_invariants() {
        let posts = fallback_posts();
        assert!(!posts.is_empty());

        let slugs: HashSet<_> = posts.iter().map(|post| post.slug.current()).collect();
        assert_eq!(slugs.len(), posts.len());

        for post in &posts {
            assert!(!post.title.is_empty());
            assert!(post.slug.is_url_safe());
            assert_eq!(post.published_at.year(), 2024);
        }
    }
}
