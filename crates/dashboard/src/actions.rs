//! Confirm-dialog actions
//!
//! Each returns whether the dialog may close. Failures are reported through
//! the notifier and leave the cache as it was.

use crate::notify::Notifier;
use crate::stores::{ArticleStore, AuthorStore};
use newsdesk_common::{errors::Result, models::ArticleStatus};

fn settle<T>(notifier: &dyn Notifier, result: Result<T>, success: &str, failure: &str) -> bool {
    match result {
        Ok(_) => {
            notifier.success(success);
            true
        }
        Err(e) => {
            notifier.error(&format!("{}: {}", failure, e.user_message()));
            false
        }
    }
}

/// Soft delete from the authors table
pub async fn confirm_author_deactivation(store: &AuthorStore, notifier: &dyn Notifier, id: i64) -> bool {
    settle(
        notifier,
        store.deactivate(id).await,
        "Author deleted",
        "Failed to delete author",
    )
}

/// Remove the author row for good
pub async fn confirm_author_deletion(store: &AuthorStore, notifier: &dyn Notifier, id: i64) -> bool {
    settle(
        notifier,
        store.delete(id).await,
        "Author removed permanently",
        "Failed to remove author",
    )
}

pub async fn change_article_status(
    store: &ArticleStore,
    notifier: &dyn Notifier,
    id: i64,
    status: ArticleStatus,
) -> bool {
    settle(
        notifier,
        store.update_status(id, status).await,
        &format!("Article marked {}", status),
        "Failed to update article status",
    )
}

pub async fn confirm_article_deletion(store: &ArticleStore, notifier: &dyn Notifier, id: i64) -> bool {
    settle(
        notifier,
        store.delete(id).await,
        "Article deleted",
        "Failed to delete article",
    )
}
