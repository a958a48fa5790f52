use htmlescape::{encode_attribute, encode_minimal};
use reqwest::Url;
use tracing::warn;

use crate::models::{Mark, Post, RichText, Span};
use crate::renderer::{ListStyle, RenderedNode};

pub const RECENT_POST_COUNT: usize = 3;

pub fn render_with_layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<nav><a href="/">Home</a> <a href="/blog">Blog</a></nav>
<main>
{content}
</main>
</body>
</html>
"#,
        title = encode_minimal(title),
    )
}

pub fn home_page(recent: &[Post], has_more: bool) -> String {
    let mut content = String::from("<section class=\"recent-posts\"><h2>Recent Posts</h2>");
    if recent.is_empty() {
        content.push_str(EMPTY_STATE);
    } else {
        content.push_str(&post_cards(recent));
        if has_more {
            content.push_str("<a class=\"view-all\" href=\"/blog\">View All Posts</a>");
        }
    }
    content.push_str("</section>");
    render_with_layout("Home", &content)
}

pub fn blog_index_page(posts: &[Post]) -> String {
    let mut content = String::from("<h1>Blog</h1>");
    if posts.is_empty() {
        content.push_str(EMPTY_STATE);
    } else {
        content.push_str(&post_cards(posts));
    }
    render_with_layout("Blog", &content)
}

const EMPTY_STATE: &str = "<p class=\"empty-state\">No blog posts available at the moment.</p>";

fn post_cards(posts: &[Post]) -> String {
    let mut list_items = String::from("<ul class=\"post-list\">");
    for post in posts {
        list_items.push_str(&format!(
            "<li class=\"post-card\"><a href=\"/blog/{}\">{}</a><time datetime=\"{}\">{}</time>",
            encode_attribute(post.slug.current()),
            encode_minimal(&post.title),
            post.published_at.to_rfc3339(),
            post.display_date(),
        ));
        if let Some(excerpt) = &post.excerpt {
            list_items.push_str(&format!("<p>{}</p>", encode_minimal(excerpt)));
        }
        list_items.push_str("</li>");
    }
    list_items.push_str("</ul>");
    list_items
}

pub fn article_page(post: &Post, body: &[RenderedNode]) -> String {
    let mut content = String::from("<article>");
    content.push_str(&format!("<h1>{}</h1>", encode_minimal(&post.title)));

    content.push_str("<p class=\"post-meta\">");
    content.push_str(&format!(
        "<time datetime=\"{}\">{}</time>",
        post.published_at.to_rfc3339(),
        post.display_date()
    ));
    if let Some(author) = &post.author {
        content.push_str(&format!(" <span class=\"author\">{}</span>", encode_minimal(author)));
    }
    content.push_str(&format!(
        " <span class=\"reading-time\">{} min read</span></p>",
        post.reading_minutes()
    ));

    if !post.categories.is_empty() {
        content.push_str("<ul class=\"categories\">");
        for category in &post.categories {
            content.push_str(&format!("<li>{}</li>", encode_minimal(category)));
        }
        content.push_str("</ul>");
    }
    if let Some(cover) = &post.cover_image {
        content.push_str(&format!(
            "<img class=\"cover\" src=\"{}\" alt=\"{}\">",
            encode_attribute(cover),
            encode_attribute(&post.title)
        ));
    }

    content.push_str("<div class=\"post-body\">");
    content.push_str(&render_nodes(body));
    content.push_str("</div></article>");
    content.push_str("<a class=\"back\" href=\"/blog\">Back to Blog</a>");

    render_with_layout(&post.title, &content)
}

/// Supports the slug as a placeholder so the message can name what was asked for.
pub fn not_found_page(slug: &str) -> String {
    let body = "<h1>Post not found</h1><p>No post lives at <code>{{slug}}</code>.</p>\
                <a class=\"back\" href=\"/blog\">Back to Blog</a>"
        .replace("{{slug}}", &encode_minimal(slug));
    render_with_layout("Not found", &body)
}

pub fn render_nodes(nodes: &[RenderedNode]) -> String {
    nodes.iter().map(render_node).collect()
}

fn render_node(node: &RenderedNode) -> String {
    match node {
        RenderedNode::Heading { level, content, .. } => {
            let level = level.as_u8();
            format!("<h{level}>{}</h{level}>", rich_text(content))
        }
        RenderedNode::Paragraph { content, .. } => format!("<p>{}</p>", rich_text(content)),
        RenderedNode::Blockquote { content, .. } => {
            format!("<blockquote>{}</blockquote>", rich_text(content))
        }
        RenderedNode::List { style, items, .. } => {
            let tag = match style {
                ListStyle::Bullet => "ul",
                ListStyle::Numbered => "ol",
            };
            let items: String = items
                .iter()
                .map(|item| {
                    format!(
                        "<li class=\"level-{}\">{}</li>",
                        item.level,
                        rich_text(&item.content)
                    )
                })
                .collect();
            format!("<{tag}>{items}</{tag}>")
        }
        RenderedNode::Code {
            language,
            code,
            filename,
            ..
        } => {
            let caption = filename
                .as_deref()
                .map(|name| format!("<figcaption>{}</figcaption>", encode_minimal(name)))
                .unwrap_or_default();
            let class = language
                .map(|lang| format!(" class=\"language-{lang}\""))
                .unwrap_or_default();
            format!(
                "<figure class=\"code-block\">{caption}<pre><code{class}>{}</code></pre></figure>",
                encode_minimal(code)
            )
        }
        RenderedNode::Image {
            src,
            alt,
            caption,
            width,
            height,
            ..
        } => {
            let mut img = format!(
                "<img src=\"{}\" alt=\"{}\"",
                encode_attribute(src),
                encode_attribute(alt)
            );
            if let Some(width) = width {
                img.push_str(&format!(" width=\"{width}\""));
            }
            if let Some(height) = height {
                img.push_str(&format!(" height=\"{height}\""));
            }
            img.push('>');
            let caption = caption
                .as_deref()
                .map(|text| format!("<figcaption>{}</figcaption>", encode_minimal(text)))
                .unwrap_or_default();
            format!("<figure class=\"image\">{img}{caption}</figure>")
        }
        RenderedNode::Table { rows, .. } => {
            let rows: String = rows
                .iter()
                .map(|cells| {
                    let cells: String = cells
                        .iter()
                        .map(|cell| {
                            let tag = if cell.is_header { "th" } else { "td" };
                            format!("<{tag}>{}</{tag}>", encode_minimal(&cell.text))
                        })
                        .collect();
                    format!("<tr>{cells}</tr>")
                })
                .collect();
            format!("<table><tbody>{rows}</tbody></table>")
        }
    }
}

fn rich_text(text: &RichText) -> String {
    text.spans().iter().map(span).collect()
}

fn span(span: &Span) -> String {
    span.marks
        .iter()
        .fold(encode_minimal(&span.text), |inner, mark| match mark {
            Mark::Strong => format!("<strong>{inner}</strong>"),
            Mark::Em => format!("<em>{inner}</em>"),
            Mark::Code => format!("<code>{inner}</code>"),
            Mark::Underline => format!("<u>{inner}</u>"),
            Mark::StrikeThrough => format!("<s>{inner}</s>"),
            Mark::Link { href } if is_safe_href(href) => format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{inner}</a>",
                encode_attribute(href)
            ),
            Mark::Link { href } => {
                warn!("Dropping link with disallowed scheme: {}", href);
                inner
            }
        })
}

const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Absolute links must use a web or mail scheme; site-relative paths and
/// fragments pass.
fn is_safe_href(href: &str) -> bool {
    match Url::parse(href) {
        Ok(url) => LINK_SCHEMES.contains(&url.scheme()),
        Err(_) => {
            let href = href.trim_start();
            href.starts_with('/') || href.starts_with('#')
        }
    }
}
