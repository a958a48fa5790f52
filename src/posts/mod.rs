//! Hardcoded posts, one module per publishing year.

use chrono::{DateTime, Utc};

use crate::models::{parse_published_at, Block, Post, Slug};

mod y2024;
mod y2025;
mod y2026;

/// A pure function yielding a fixed batch of posts.
pub type PostSource = fn() -> Vec<Post>;

const AUTHOR: &str = "John Pecson";

pub fn yearly_sources() -> Vec<PostSource> {
    vec![y2024::posts, y2025::posts, y2026::posts]
}

struct Meta<'a> {
    id: &'a str,
    title: &'a str,
    slug: &'a str,
    excerpt: &'a str,
    published: &'a str,
    categories: &'a [&'a str],
    cover: &'a str,
}

/// Dates here are compiled-in literals, so a bad one is a bug in this crate.
fn published(value: &str) -> DateTime<Utc> {
    parse_published_at(value).unwrap_or_else(|err| panic!("static post date is broken: {err}"))
}

fn post(meta: Meta<'_>, body: Vec<Block>) -> Post {
    Post {
        id: meta.id.to_string(),
        title: meta.title.to_string(),
        slug: Slug::new(meta.slug),
        excerpt: Some(meta.excerpt.to_string()),
        published_at: published(meta.published),
        author: Some(AUTHOR.to_string()),
        categories: meta.categories.iter().map(|c| c.to_string()).collect(),
        cover_image: Some(meta.cover.to_string()),
        body,
    }
}
