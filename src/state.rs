use crate::content_loader::ConfiguredProvider;
use crate::repository::PostRepository;

pub type Blog = PostRepository<ConfiguredProvider>;

pub struct AppState {
    pub blog: Blog,
}

impl AppState {
    pub fn new(blog: Blog) -> Self {
        Self { blog }
    }
}
