//! Entity services
//!
//! One async method per REST operation. Services map domain parameters onto
//! calls of the shared `ApiClient`; they never touch the cache.

mod article;
mod author;
mod story;
mod tag;

pub use article::ArticleService;
pub use author::AuthorService;
pub use story::StoryService;
pub use tag::TagService;
