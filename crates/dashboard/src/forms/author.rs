use super::{is_blank, required_message, FormPhase, SubmitOutcome, PREVIEW_AUTHOR_IMAGE};
use crate::notify::Notifier;
use crate::stores::AuthorStore;
use newsdesk_common::models::{Author, AuthorUpdate, ImageFile, ImageSelection, NewAuthor};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorField {
    Name,
    Email,
    Profession,
    About,
    Password,
    Image,
}

impl AuthorField {
    pub fn label(&self) -> &'static str {
        match self {
            AuthorField::Name => "Name",
            AuthorField::Email => "Email",
            AuthorField::Profession => "Profession",
            AuthorField::About => "About",
            AuthorField::Password => "Password",
            AuthorField::Image => "Image",
        }
    }
}

/// One edit to an author draft
#[derive(Debug, Clone, PartialEq)]
pub enum AuthorChange {
    Name(String),
    Email(String),
    Profession(String),
    About(String),
    Password(String),
    Image(ImageSelection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDraft {
    pub name: String,
    pub email: String,
    pub profession: String,
    pub about: String,
    pub password: String,
    pub image: ImageSelection,
}

impl AuthorDraft {
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            profession: String::new(),
            about: String::new(),
            password: String::new(),
            image: ImageSelection::remote(PREVIEW_AUTHOR_IMAGE),
        }
    }

    pub fn apply(&mut self, change: AuthorChange) {
        match change {
            AuthorChange::Name(value) => self.name = value,
            AuthorChange::Email(value) => self.email = value,
            AuthorChange::Profession(value) => self.profession = value,
            AuthorChange::About(value) => self.about = value,
            AuthorChange::Password(value) => self.password = value,
            AuthorChange::Image(value) => self.image = value,
        }
    }
}

impl From<&Author> for AuthorDraft {
    fn from(author: &Author) -> Self {
        Self {
            name: author.name.clone(),
            email: author.email.clone(),
            profession: author.profession.clone().unwrap_or_default(),
            about: author.about.clone().unwrap_or_default(),
            password: String::new(),
            image: ImageSelection::remote(
                author
                    .profile_photo_url
                    .as_deref()
                    .unwrap_or(PREVIEW_AUTHOR_IMAGE),
            ),
        }
    }
}

// ============================================================================
// Create
// ============================================================================

/// Admin "new author" page
pub struct AuthorCreateForm {
    draft: AuthorDraft,
    phase: FormPhase,
    store: AuthorStore,
    notifier: Arc<dyn Notifier>,
}

impl AuthorCreateForm {
    pub fn new(store: AuthorStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            draft: AuthorDraft::blank(),
            phase: FormPhase::Editing,
            store,
            notifier,
        }
    }

    pub fn draft(&self) -> &AuthorDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn change(&mut self, change: AuthorChange) {
        self.draft.apply(change);
        self.phase = FormPhase::Editing;
    }

    pub fn has_changes(&self) -> bool {
        self.draft != AuthorDraft::blank()
    }

    pub fn reset(&mut self) {
        self.draft = AuthorDraft::blank();
        self.phase = FormPhase::Editing;
    }

    /// First empty required field, in form order. The photo counts only
    /// once a file was picked.
    pub fn missing_field(&self) -> Option<AuthorField> {
        let d = &self.draft;
        if is_blank(&d.name) {
            Some(AuthorField::Name)
        } else if is_blank(&d.email) {
            Some(AuthorField::Email)
        } else if is_blank(&d.profession) {
            Some(AuthorField::Profession)
        } else if is_blank(&d.about) {
            Some(AuthorField::About)
        } else if !d.image.has_file() {
            Some(AuthorField::Image)
        } else {
            None
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Author, AuthorField> {
        if let Some(field) = self.missing_field() {
            self.notifier.error(&required_message(field.label()));
            return SubmitOutcome::Blocked(field);
        }
        let Some(photo) = self.draft.image.file.clone() else {
            return SubmitOutcome::Blocked(AuthorField::Image);
        };

        let new_author = NewAuthor {
            name: self.draft.name.clone(),
            email: self.draft.email.clone(),
            profession: self.draft.profession.clone(),
            about: self.draft.about.clone(),
            password: self.draft.password.clone(),
            profile_photo_url: String::new(),
        };

        self.phase = FormPhase::Submitting;
        match self.store.create(new_author, &photo).await {
            Ok(author) => {
                self.phase = FormPhase::Succeeded;
                self.notifier.success("Author created successfully");
                SubmitOutcome::Submitted(author)
            }
            Err(e) => {
                self.phase = FormPhase::Editing;
                self.notifier
                    .error(&format!("Failed to create author: {}", e.user_message()));
                SubmitOutcome::Failed(e)
            }
        }
    }
}

// ============================================================================
// Edit
// ============================================================================

/// Author edit dialog, seeded from the author being edited
pub struct AuthorEditForm {
    original: Author,
    draft: AuthorDraft,
    phase: FormPhase,
    store: AuthorStore,
    notifier: Arc<dyn Notifier>,
}

impl AuthorEditForm {
    pub fn new(author: Author, store: AuthorStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            draft: AuthorDraft::from(&author),
            original: author,
            phase: FormPhase::Editing,
            store,
            notifier,
        }
    }

    pub fn original(&self) -> &Author {
        &self.original
    }

    pub fn draft(&self) -> &AuthorDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn change(&mut self, change: AuthorChange) {
        self.draft.apply(change);
        self.phase = FormPhase::Editing;
    }

    /// True when a submit would send something
    pub fn has_changes(&self) -> bool {
        let (update, photo) = self.diff();
        !update.is_empty() || photo.is_some()
    }

    pub fn reset(&mut self) {
        self.draft = AuthorDraft::from(&self.original);
        self.phase = FormPhase::Editing;
    }

    pub fn missing_field(&self) -> Option<AuthorField> {
        if is_blank(&self.draft.name) {
            Some(AuthorField::Name)
        } else if is_blank(&self.draft.email) {
            Some(AuthorField::Email)
        } else {
            None
        }
    }

    /// Fields that differ from the original, plus the photo to upload when
    /// a new file was picked
    pub fn diff(&self) -> (AuthorUpdate, Option<ImageFile>) {
        let d = &self.draft;
        let o = &self.original;
        let mut update = AuthorUpdate::new(o.id);

        if d.name != o.name {
            update.name = Some(d.name.clone());
        }
        if d.email != o.email {
            update.email = Some(d.email.clone());
        }
        if d.profession != o.profession.as_deref().unwrap_or_default() {
            update.profession = Some(d.profession.clone());
        }
        if d.about != o.about.as_deref().unwrap_or_default() {
            update.about = Some(d.about.clone());
        }
        if !d.password.is_empty() {
            update.password = Some(d.password.clone());
        }

        let photo = d
            .image
            .file
            .clone()
            .filter(|_| Some(d.image.preview_url.as_str()) != o.profile_photo_url.as_deref());

        (update, photo)
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Author, AuthorField> {
        if let Some(field) = self.missing_field() {
            self.notifier.error(&required_message(field.label()));
            return SubmitOutcome::Blocked(field);
        }

        let (update, photo) = self.diff();
        if update.is_empty() && photo.is_none() {
            debug!(author_id = self.original.id, "Nothing to update");
            self.notifier.success("No changes to save");
            return SubmitOutcome::NoChanges;
        }

        self.phase = FormPhase::Submitting;
        match self.store.update(update, photo.as_ref()).await {
            Ok(author) => {
                self.draft = AuthorDraft::from(&author);
                self.original = author.clone();
                self.phase = FormPhase::Succeeded;
                self.notifier.success("Author updated successfully");
                SubmitOutcome::Submitted(author)
            }
            Err(e) => {
                self.phase = FormPhase::Editing;
                self.notifier
                    .error(&format!("Failed to update author: {}", e.user_message()));
                SubmitOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::notify::{Level, RecordingNotifier};
    use newsdesk_common::{
        api::ApiClient, cache::QueryKey, config::ApiConfig, MockTransport, QueryCache,
    };
    use reqwest::Method;
    use serde_json::json;

    struct Harness {
        mock: Arc<MockTransport>,
        cache: Arc<QueryCache>,
        notifier: Arc<RecordingNotifier>,
        store: AuthorStore,
    }

    fn harness() -> Harness {
        let mock = Arc::new(MockTransport::new());
        let cache = Arc::new(QueryCache::default());
        let store = AuthorStore::new(
            ApiClient::new(mock.clone()),
            cache.clone(),
            &ApiConfig::default(),
        );
        Harness {
            mock,
            cache,
            notifier: Arc::new(RecordingNotifier::new()),
            store,
        }
    }

    fn photo() -> ImageSelection {
        ImageSelection::local(
            "blob:ann",
            ImageFile::new("ann.jpg", "image/jpeg", vec![0xff, 0xd8]),
        )
    }

    fn filled(form: &mut AuthorCreateForm) {
        form.change(AuthorChange::Name("Ann".into()));
        form.change(AuthorChange::Email("ann@example.com".into()));
        form.change(AuthorChange::Profession("Reporter".into()));
        form.change(AuthorChange::About("Covers the hill districts".into()));
        form.change(AuthorChange::Image(photo()));
    }

    #[tokio::test]
    async fn test_missing_email_blocks_without_request() {
        let h = harness();
        let mut form = AuthorCreateForm::new(h.store.clone(), h.notifier.clone());
        filled(&mut form);
        form.change(AuthorChange::Email(String::new()));

        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Blocked(AuthorField::Email)));
        assert_eq!(h.mock.request_count(), 0);
        assert!(h.mock.uploads().is_empty());

        let note = h.notifier.last().unwrap();
        assert_eq!(note.level, Level::Error);
        assert_eq!(note.message, "Email is required");
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_placeholder_photo_is_not_enough() {
        let h = harness();
        let mut form = AuthorCreateForm::new(h.store.clone(), h.notifier.clone());
        filled(&mut form);
        form.change(AuthorChange::Image(ImageSelection::remote(PREVIEW_AUTHOR_IMAGE)));

        assert!(matches!(
            form.submit().await,
            SubmitOutcome::Blocked(AuthorField::Image)
        ));
    }

    #[tokio::test]
    async fn test_create_succeeds_and_lands_in_cache() {
        let h = harness();
        h.cache
            .set(
                &QueryKey::AllAuthors,
                &vec![fixtures::author(1, "Ben", "b@x.com")],
            )
            .await
            .unwrap();
        h.mock.respond_upload("https://cdn.example.com/ann.jpg");
        let mut body = fixtures::author_json(9, "Ann", "ann@example.com");
        body["token"] = json!("t");
        body["refresh_token"] = json!("r");
        h.mock.respond(Method::POST, "/author/signup", body);

        let mut form = AuthorCreateForm::new(h.store.clone(), h.notifier.clone());
        assert!(!form.has_changes());
        filled(&mut form);
        assert!(form.has_changes());

        let outcome = form.submit().await;
        assert!(outcome.is_submitted());
        assert_eq!(form.phase(), FormPhase::Succeeded);

        let list: Vec<Author> = h.cache.get(&QueryKey::AllAuthors).await.unwrap().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, 9);
        assert_eq!(h.notifier.last().unwrap().message, "Author created successfully");
    }

    #[tokio::test]
    async fn test_create_reset_restores_blank() {
        let h = harness();
        let mut form = AuthorCreateForm::new(h.store.clone(), h.notifier.clone());
        filled(&mut form);
        form.reset();
        assert_eq!(form.draft(), &AuthorDraft::blank());
        assert!(!form.has_changes());
    }

    #[tokio::test]
    async fn test_profession_only_update_sends_only_profession() {
        let h = harness();
        let mut body = fixtures::author_json(5, "Ann", "a@x.com");
        body["profession"] = json!("Editor");
        h.mock.respond(Method::PUT, "/author/5", body);

        let mut form = AuthorEditForm::new(
            fixtures::author(5, "Ann", "a@x.com"),
            h.store.clone(),
            h.notifier.clone(),
        );
        form.change(AuthorChange::Profession("Editor".into()));
        assert!(form.has_changes());

        let outcome = form.submit().await;
        assert!(outcome.is_submitted());

        let sent = h.mock.requests_to(Method::PUT, "/author/5");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, Some(json!({ "profession": "Editor" })));
        assert!(!form.has_changes());
        assert_eq!(form.original().profession.as_deref(), Some("Editor"));
    }

    #[tokio::test]
    async fn test_unchanged_edit_sends_nothing() {
        let h = harness();
        let mut form = AuthorEditForm::new(
            fixtures::author(5, "Ann", "a@x.com"),
            h.store.clone(),
            h.notifier.clone(),
        );
        form.change(AuthorChange::Name("Ann".into()));
        assert!(!form.has_changes());

        assert!(matches!(form.submit().await, SubmitOutcome::NoChanges));
        assert_eq!(h.mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_edit_blank_name_is_blocked() {
        let h = harness();
        let mut form = AuthorEditForm::new(
            fixtures::author(5, "Ann", "a@x.com"),
            h.store.clone(),
            h.notifier.clone(),
        );
        form.change(AuthorChange::Name("   ".into()));

        assert!(matches!(
            form.submit().await,
            SubmitOutcome::Blocked(AuthorField::Name)
        ));
        assert_eq!(h.notifier.last().unwrap().message, "Name is required");
    }

    #[tokio::test]
    async fn test_new_photo_is_part_of_the_diff() {
        let h = harness();
        let mut form = AuthorEditForm::new(
            fixtures::author(5, "Ann", "a@x.com"),
            h.store.clone(),
            h.notifier.clone(),
        );
        form.change(AuthorChange::Image(photo()));

        let (update, photo) = form.diff();
        assert!(update.is_empty());
        assert_eq!(photo.unwrap().file_name, "ann.jpg");
    }

    #[tokio::test]
    async fn test_failed_edit_returns_to_editing() {
        let h = harness();
        let original = fixtures::author(5, "Ann", "a@x.com");
        h.cache
            .set(&QueryKey::AllAuthors, &vec![original.clone()])
            .await
            .unwrap();
        h.mock.fail(Method::PUT, "/author/5", 500, "Internal server error");

        let mut form = AuthorEditForm::new(original.clone(), h.store.clone(), h.notifier.clone());
        form.change(AuthorChange::About("Moved to the business desk".into()));

        assert!(matches!(form.submit().await, SubmitOutcome::Failed(_)));
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(form.has_changes());

        let list: Vec<Author> = h.cache.get(&QueryKey::AllAuthors).await.unwrap().unwrap();
        assert_eq!(list, vec![original]);
        let note = h.notifier.last().unwrap();
        assert_eq!(note.level, Level::Error);
        assert!(note.message.contains("Internal server error"));
    }

    #[test]
    fn test_reset_restores_original() {
        let h = harness();
        let author = fixtures::author(5, "Ann", "a@x.com");
        let mut form = AuthorEditForm::new(author.clone(), h.store.clone(), h.notifier.clone());
        form.change(AuthorChange::Email("ann@other.com".into()));
        form.reset();
        assert_eq!(form.draft(), &AuthorDraft::from(&author));
    }
}
