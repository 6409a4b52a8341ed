//! Cache-synchronized stores
//!
//! Each store wraps an entity service with the shared `QueryCache`. Reads go
//! through `get_or_load`; mutations call the service first and patch cached
//! lists only once the server has confirmed the change, so a failure leaves
//! every cached value as it was.

mod article;
mod author;
mod story;
mod tag;

pub use article::ArticleStore;
pub use author::AuthorStore;
pub use story::StoryStore;
pub use tag::{TagStore, FALLBACK_TAGS};
