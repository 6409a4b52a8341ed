//! Canned entities shared by the dashboard tests

use newsdesk_common::models::{
    ActivationStatus, Article, ArticleStatus, Author, Category, NewAuthor, Region, WebStory,
};
use serde_json::{json, Value};

pub fn author_json(id: i64, name: &str, email: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "is_active": 1,
        "about": "Covers the hill districts",
        "profession": "Reporter",
        "profile_photo_url": format!("https://cdn.example.com/authors/{}.jpg", id),
        "created_at": "2025-01-10T08:00:00Z",
    })
}

pub fn author(id: i64, name: &str, email: &str) -> Author {
    serde_json::from_value(author_json(id, name, email)).expect("author fixture")
}

pub fn inactive_author(id: i64, name: &str, email: &str) -> Author {
    Author {
        is_active: ActivationStatus::Deleted,
        ..author(id, name, email)
    }
}

pub fn new_author() -> NewAuthor {
    NewAuthor {
        name: "Ann".into(),
        email: "ann@example.com".into(),
        profession: "Reporter".into(),
        about: "Covers the hill districts".into(),
        password: "changeme".into(),
        profile_photo_url: String::new(),
    }
}

pub fn article_json(id: i64, author_id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "author_id": author_id,
        "title": title,
        "content": format!("Body of {}", title),
        "tags": ["Monsoon"],
        "category": "news",
        "region": "dehradun",
        "status": "draft",
        "image_url": format!("https://cdn.example.com/articles/{}.jpg", id),
        "created_at": "2025-02-01T09:00:00Z",
        "updated_at": "2025-02-01T09:00:00Z",
        "publish_date": null,
    })
}

pub fn article(id: i64, author_id: i64, title: &str) -> Article {
    serde_json::from_value(article_json(id, author_id, title)).expect("article fixture")
}

/// Article with explicit classification
pub fn classified_article(
    id: i64,
    title: &str,
    status: ArticleStatus,
    category: Category,
    region: Region,
) -> Article {
    Article {
        status,
        category,
        region,
        ..article(id, 1, title)
    }
}

pub fn article_view_json(id: i64, author_id: i64, title: &str) -> Value {
    let mut view = article_json(id, author_id, title);
    view["author_name"] = json!("Ann");
    view["author_email"] = json!("a@x.com");
    view["author_profile_photo_url"] = Value::Null;
    view["author_about"] = Value::Null;
    view["author_profession"] = json!("Reporter");
    view
}

pub fn story_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "cover_image": format!("/images/story{}.jpg", id),
        "created_at": "2025-03-01T10:00:00Z",
    })
}

pub fn story(id: i64, title: &str) -> WebStory {
    serde_json::from_value(story_json(id, title)).expect("story fixture")
}
