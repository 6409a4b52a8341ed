use crate::services::AuthorService;
use newsdesk_common::{
    api::ApiClient,
    cache::{QueryCache, QueryKey},
    config::ApiConfig,
    errors::Result,
    models::{ActivationStatus, Author, AuthorUpdate, ImageFile, NewAuthor},
};
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

#[derive(Clone)]
pub struct AuthorStore {
    service: AuthorService,
    client: ApiClient,
    cache: Arc<QueryCache>,
    list_cursor: u64,
    list_limit: u64,
}

impl AuthorStore {
    pub fn new(client: ApiClient, cache: Arc<QueryCache>, config: &ApiConfig) -> Self {
        Self {
            service: AuthorService::new(client.clone()),
            client,
            cache,
            list_cursor: config.list_cursor,
            list_limit: config.list_limit,
        }
    }

    /// Every author, active or not
    pub async fn all(&self) -> Result<Vec<Author>> {
        self.cache
            .get_or_load(&QueryKey::AllAuthors, || {
                self.service.list_all(self.list_cursor, self.list_limit)
            })
            .await
    }

    pub async fn by_id(&self, id: i64) -> Result<Author> {
        self.cache
            .get_or_load(&QueryKey::Author(id), || self.service.get(id))
            .await
    }

    /// Upload the profile photo, sign the author up and put them at the top
    /// of the cached list
    pub async fn create(&self, mut draft: NewAuthor, photo: &ImageFile) -> Result<Author> {
        draft.validate()?;

        draft.profile_photo_url = self.client.upload_image(photo).await?;
        let author = self.service.sign_up(&draft).await?;

        self.cache.prepend(&QueryKey::AllAuthors, &author).await?;
        self.cache.set(&QueryKey::Author(author.id), &author).await?;

        info!(author_id = author.id, "Author created");
        Ok(author)
    }

    /// Send the changed fields. A new photo is uploaded only when supplied.
    pub async fn update(&self, mut changes: AuthorUpdate, photo: Option<&ImageFile>) -> Result<Author> {
        changes.validate()?;

        if let Some(photo) = photo {
            changes.profile_photo_url = Some(self.client.upload_image(photo).await?);
        }
        let author = self.service.update(&changes).await?;

        self.cache.replace_by_id(&QueryKey::AllAuthors, &author).await?;
        self.cache.set(&QueryKey::Author(author.id), &author).await?;

        debug!(author_id = author.id, "Author cache refreshed");
        Ok(author)
    }

    /// Hard delete
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.service.delete(id).await?;

        self.cache
            .remove_by_id::<Author>(&QueryKey::AllAuthors, id)
            .await?;
        self.cache.remove(&QueryKey::Author(id)).await;
        Ok(())
    }

    /// Soft delete: only the activation flag changes in the cache
    pub async fn deactivate(&self, id: i64) -> Result<()> {
        self.service.set_deleted_status(id).await?;

        self.cache
            .patch_by_id::<Author, _>(&QueryKey::AllAuthors, id, |author| {
                author.is_active = ActivationStatus::Deleted;
            })
            .await?;
        self.cache
            .update::<Author, _>(&QueryKey::Author(id), |cached| {
                cached.map(|mut author| {
                    author.is_active = ActivationStatus::Deleted;
                    author
                })
            })
            .await?;
        Ok(())
    }
}
