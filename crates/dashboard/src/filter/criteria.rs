use super::{contains_ignore_case, Criteria, Facet};
use newsdesk_common::models::{
    ActivationStatus, Article, ArticleStatus, Author, Category, Region, WebStory,
};

/// Admin author table: search over name and email, status facet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFilter {
    pub search: String,
    pub status: Facet<ActivationStatus>,
}

impl Criteria<Author> for AuthorFilter {
    fn matches(&self, author: &Author) -> bool {
        let text = contains_ignore_case(&author.name, &self.search)
            || contains_ignore_case(&author.email, &self.search);
        text && self.status.matches(&author.is_active)
    }
}

/// Article tables: search over title and tags, plus the three facets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub search: String,
    pub status: Facet<ArticleStatus>,
    pub category: Facet<Category>,
    pub region: Facet<Region>,
}

impl Criteria<Article> for ArticleFilter {
    fn matches(&self, article: &Article) -> bool {
        let text = contains_ignore_case(&article.title, &self.search)
            || article
                .tags
                .iter()
                .any(|tag| contains_ignore_case(tag, &self.search));

        text && self.status.matches(&article.status)
            && self.category.matches(&article.category)
            && self.region.matches(&article.region)
    }
}

/// Web story tables: search over title. Stories without a classification
/// only show under `all`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryFilter {
    pub search: String,
    pub status: Facet<ArticleStatus>,
    pub category: Facet<Category>,
    pub region: Facet<Region>,
}

impl Criteria<WebStory> for StoryFilter {
    fn matches(&self, story: &WebStory) -> bool {
        contains_ignore_case(&story.title, &self.search)
            && self.status.matches_opt(story.status.as_ref())
            && self.category.matches_opt(story.category.as_ref())
            && self.region.matches_opt(story.region.as_ref())
    }
}
