//! Author endpoints

use newsdesk_common::{
    api::ApiClient,
    errors::Result,
    models::{Author, AuthorSignUp, AuthorStatusChange, AuthorUpdate, NewAuthor},
};
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct AuthorService {
    client: ApiClient,
}

impl AuthorService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create an author account. The session tokens in the response are
    /// dropped.
    pub async fn sign_up(&self, author: &NewAuthor) -> Result<Author> {
        author.validate()?;

        let response: AuthorSignUp = self.client.post("/author/signup", author).await?;
        let author = response.into_author();

        info!(author_id = author.id, "Author signed up");
        Ok(author)
    }

    pub async fn get(&self, id: i64) -> Result<Author> {
        self.client.get(&format!("/author/{}", id), &[]).await
    }

    /// Every author regardless of status
    pub async fn list_all(&self, cursor: u64, limit: u64) -> Result<Vec<Author>> {
        self.client
            .get(
                "/author/all",
                &[("cursor", cursor.to_string()), ("limit", limit.to_string())],
            )
            .await
    }

    /// Send the changed fields of an author
    pub async fn update(&self, update: &AuthorUpdate) -> Result<Author> {
        update.validate()?;

        let author: Author = self
            .client
            .put(&format!("/author/{}", update.id), update)
            .await?;

        info!(author_id = author.id, "Author updated");
        Ok(author)
    }

    /// Remove the author row (admin only)
    pub async fn delete(&self, id: i64) -> Result<Author> {
        let author: Author = self.client.delete(&format!("/author/{}", id)).await?;
        info!(author_id = id, "Author deleted");
        Ok(author)
    }

    /// Soft delete: mark the author inactive
    pub async fn set_deleted_status(&self, id: i64) -> Result<Author> {
        let body = AuthorStatusChange {
            author_id: id,
            is_active: false,
        };
        let author: Author = self.client.put("/author/authors/status", &body).await?;
        info!(author_id = id, "Author marked deleted");
        Ok(author)
    }
}
