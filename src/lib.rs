//! Blog content for a personal portfolio site: posts come from yearly
//! static modules or the Sanity CMS, and article bodies render from
//! structured blocks into presentational nodes.

pub mod blocks;
pub mod config;
pub mod content_loader;
pub mod html;
pub mod mock_posts;
pub mod models;
pub mod posts;
pub mod renderer;
pub mod repository;
pub mod sanity;
pub mod server;
pub mod state;

pub use content_loader::{ConfiguredProvider, ContentProvider, StaticProvider};
pub use models::{Block, BlockKind, Post, Slug};
pub use renderer::{render_body, RenderedNode};
pub use repository::PostRepository;
pub use state::Blog;
