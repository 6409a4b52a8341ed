use super::{is_blank, required_message, FormPhase, SubmitOutcome, PREVIEW_ARTICLE_IMAGE};
use crate::notify::Notifier;
use crate::stores::ArticleStore;
use newsdesk_common::models::{
    Article, ArticleStatus, ArticleUpdate, Category, ImageFile, ImageSelection, NewArticle, Region,
};
use std::sync::Arc;
use tracing::debug;

/// Fields a submit can be blocked on. Tags are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleField {
    Title,
    Content,
    Category,
    Region,
    Image,
}

impl ArticleField {
    pub fn label(&self) -> &'static str {
        match self {
            ArticleField::Title => "Title",
            ArticleField::Content => "Content",
            ArticleField::Category => "Category",
            ArticleField::Region => "Region",
            ArticleField::Image => "Image",
        }
    }
}

/// One edit to an article draft. Selectors may be cleared.
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleChange {
    Title(String),
    Content(String),
    Tags(Vec<String>),
    Category(Option<Category>),
    Region(Option<Region>),
    Image(ImageSelection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub category: Option<Category>,
    pub region: Option<Region>,
    pub image: ImageSelection,
}

impl ArticleDraft {
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tags: Vec::new(),
            category: None,
            region: None,
            image: ImageSelection::remote(PREVIEW_ARTICLE_IMAGE),
        }
    }

    pub fn apply(&mut self, change: ArticleChange) {
        match change {
            ArticleChange::Title(value) => self.title = value,
            ArticleChange::Content(value) => self.content = value,
            ArticleChange::Tags(value) => self.tags = value,
            ArticleChange::Category(value) => self.category = value,
            ArticleChange::Region(value) => self.region = value,
            ArticleChange::Image(value) => self.image = value,
        }
    }
}

impl From<&Article> for ArticleDraft {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            content: article.content.clone(),
            tags: article.tags.clone(),
            category: Some(article.category),
            region: Some(article.region),
            image: ImageSelection::remote(
                article.image_url.as_deref().unwrap_or(PREVIEW_ARTICLE_IMAGE),
            ),
        }
    }
}

// ============================================================================
// Create
// ============================================================================

/// Author "write article" page
pub struct ArticleCreateForm {
    author_id: i64,
    draft: ArticleDraft,
    phase: FormPhase,
    store: ArticleStore,
    notifier: Arc<dyn Notifier>,
}

impl ArticleCreateForm {
    pub fn new(author_id: i64, store: ArticleStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            author_id,
            draft: ArticleDraft::blank(),
            phase: FormPhase::Editing,
            store,
            notifier,
        }
    }

    pub fn draft(&self) -> &ArticleDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn change(&mut self, change: ArticleChange) {
        self.draft.apply(change);
        self.phase = FormPhase::Editing;
    }

    pub fn has_changes(&self) -> bool {
        self.draft != ArticleDraft::blank()
    }

    pub fn reset(&mut self) {
        self.draft = ArticleDraft::blank();
        self.phase = FormPhase::Editing;
    }

    pub fn missing_field(&self) -> Option<ArticleField> {
        let d = &self.draft;
        if is_blank(&d.title) {
            Some(ArticleField::Title)
        } else if is_blank(&d.content) {
            Some(ArticleField::Content)
        } else if d.category.is_none() {
            Some(ArticleField::Category)
        } else if d.region.is_none() {
            Some(ArticleField::Region)
        } else if !d.image.has_file() {
            Some(ArticleField::Image)
        } else {
            None
        }
    }

    /// Keep the article private to its author
    pub async fn save_draft(&mut self) -> SubmitOutcome<Article, ArticleField> {
        self.submit(
            ArticleStatus::Draft,
            "Article saved as draft",
            "Failed to save article as draft",
        )
        .await
    }

    /// Hand the article to the admins for moderation
    pub async fn submit_for_review(&mut self) -> SubmitOutcome<Article, ArticleField> {
        self.submit(
            ArticleStatus::Pending,
            "Article sent to admin for review successfully.",
            "Failed to publish article",
        )
        .await
    }

    async fn submit(
        &mut self,
        status: ArticleStatus,
        success: &str,
        failure: &str,
    ) -> SubmitOutcome<Article, ArticleField> {
        if let Some(field) = self.missing_field() {
            self.notifier.error(&required_message(field.label()));
            return SubmitOutcome::Blocked(field);
        }
        let d = &self.draft;
        let (Some(category), Some(region), Some(image)) = (d.category, d.region, d.image.file.clone())
        else {
            return SubmitOutcome::Blocked(ArticleField::Category);
        };

        let new_article = NewArticle {
            title: d.title.clone(),
            content: d.content.clone(),
            author_id: self.author_id,
            tags: d.tags.clone(),
            status,
            category,
            region,
            image_url: String::new(),
        };

        self.phase = FormPhase::Submitting;
        match self.store.create(new_article, &image).await {
            Ok(article) => {
                self.phase = FormPhase::Succeeded;
                self.notifier.success(success);
                SubmitOutcome::Submitted(article)
            }
            Err(e) => {
                self.phase = FormPhase::Editing;
                self.notifier
                    .error(&format!("{}: {}", failure, e.user_message()));
                SubmitOutcome::Failed(e)
            }
        }
    }
}

// ============================================================================
// Edit
// ============================================================================

pub struct ArticleEditForm {
    original: Article,
    draft: ArticleDraft,
    phase: FormPhase,
    store: ArticleStore,
    notifier: Arc<dyn Notifier>,
}

impl ArticleEditForm {
    pub fn new(article: Article, store: ArticleStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            draft: ArticleDraft::from(&article),
            original: article,
            phase: FormPhase::Editing,
            store,
            notifier,
        }
    }

    pub fn original(&self) -> &Article {
        &self.original
    }

    pub fn draft(&self) -> &ArticleDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn change(&mut self, change: ArticleChange) {
        self.draft.apply(change);
        self.phase = FormPhase::Editing;
    }

    /// True when a submit would send something
    pub fn has_changes(&self) -> bool {
        let (update, image) = self.diff();
        !update.is_empty() || image.is_some()
    }

    pub fn reset(&mut self) {
        self.draft = ArticleDraft::from(&self.original);
        self.phase = FormPhase::Editing;
    }

    pub fn missing_field(&self) -> Option<ArticleField> {
        if is_blank(&self.draft.title) {
            Some(ArticleField::Title)
        } else if is_blank(&self.draft.content) {
            Some(ArticleField::Content)
        } else {
            None
        }
    }

    /// Fields that differ from the original. A cleared selector keeps the
    /// stored value.
    pub fn diff(&self) -> (ArticleUpdate, Option<ImageFile>) {
        let d = &self.draft;
        let o = &self.original;
        let mut update = ArticleUpdate::new(o.id);

        if d.title != o.title {
            update.title = Some(d.title.clone());
        }
        if d.content != o.content {
            update.content = Some(d.content.clone());
        }
        if d.tags != o.tags {
            update.tags = Some(d.tags.clone());
        }
        update.category = d.category.filter(|c| *c != o.category);
        update.region = d.region.filter(|r| *r != o.region);

        let image = d
            .image
            .file
            .clone()
            .filter(|_| Some(d.image.preview_url.as_str()) != o.image_url.as_deref());

        (update, image)
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Article, ArticleField> {
        if let Some(field) = self.missing_field() {
            self.notifier.error(&required_message(field.label()));
            return SubmitOutcome::Blocked(field);
        }

        let (update, image) = self.diff();
        if update.is_empty() && image.is_none() {
            debug!(article_id = self.original.id, "Nothing to update");
            self.notifier.success("No changes to save");
            return SubmitOutcome::NoChanges;
        }

        self.phase = FormPhase::Submitting;
        match self.store.update(update, image.as_ref()).await {
            Ok(article) => {
                self.draft = ArticleDraft::from(&article);
                self.original = article.clone();
                self.phase = FormPhase::Succeeded;
                self.notifier.success("Article updated successfully");
                SubmitOutcome::Submitted(article)
            }
            Err(e) => {
                self.phase = FormPhase::Editing;
                self.notifier
                    .error(&format!("Failed to update article: {}", e.user_message()));
                SubmitOutcome::Failed(e)
            }
        }
    }
}
