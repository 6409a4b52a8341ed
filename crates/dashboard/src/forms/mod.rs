//! Draft form state for the create and edit flows
//!
//! A form holds a typed draft, applies one tagged change at a time, checks
//! required fields in a fixed order before anything is sent, and turns the
//! draft into the smallest payload the backend accepts. Submissions move
//! through `FormPhase` and always end in a notification.

mod article;
mod author;

pub use article::{ArticleChange, ArticleCreateForm, ArticleDraft, ArticleEditForm, ArticleField};
pub use author::{AuthorChange, AuthorCreateForm, AuthorDraft, AuthorEditForm, AuthorField};

use newsdesk_common::errors::AppError;

/// Placeholder shown in the author photo slot until a file is picked
pub const PREVIEW_AUTHOR_IMAGE: &str = "/images/author-placeholder.png";

/// Placeholder shown in the article cover slot until a file is picked
pub const PREVIEW_ARTICLE_IMAGE: &str = "/images/article-placeholder.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    Succeeded,
}

/// Result of a submit attempt
#[derive(Debug)]
pub enum SubmitOutcome<T, F> {
    /// The server accepted the change
    Submitted(T),
    /// A required field is empty; nothing was sent
    Blocked(F),
    /// The draft equals the original; nothing was sent
    NoChanges,
    Failed(AppError),
}

impl<T, F> SubmitOutcome<T, F> {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Notification text for a blocked submit
fn required_message(label: &str) -> String {
    AppError::MissingField {
        field: label.to_string(),
    }
    .user_message()
}
