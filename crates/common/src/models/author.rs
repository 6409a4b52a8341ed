//! Author entity and payloads

use super::{Identified, ParseEnumError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Activation flag. Authors are never removed by the dashboards, only
/// switched to `Deleted`. On the wire this is the integer 1 or 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ActivationStatus {
    Active,
    Deleted,
}

impl ActivationStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ActivationStatus::Active)
    }
}

impl TryFrom<i64> for ActivationStatus {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ActivationStatus::Active),
            0 => Ok(ActivationStatus::Deleted),
            other => Err(format!("is_active must be 0 or 1, got {}", other)),
        }
    }
}

impl From<ActivationStatus> for i64 {
    fn from(status: ActivationStatus) -> Self {
        match status {
            ActivationStatus::Active => 1,
            ActivationStatus::Deleted => 0,
        }
    }
}

impl std::str::FromStr for ActivationStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "active" => Ok(ActivationStatus::Active),
            "0" | "deleted" => Ok(ActivationStatus::Deleted),
            other => Err(ParseEnumError {
                kind: "author status",
                value: other.to_string(),
            }),
        }
    }
}

/// Author as returned by `/author/{id}` and `/author/all`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_active: ActivationStatus,
    pub about: Option<String>,
    pub profession: Option<String>,
    pub profile_photo_url: Option<String>,

    /// Absent on the signup response
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Author {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Signup response: the author plus session tokens the admin dashboard
/// has no use for
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorSignUp {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_active: ActivationStatus,
    pub about: Option<String>,
    pub profession: Option<String>,
    pub profile_photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub token: String,
    pub refresh_token: String,
}

impl AuthorSignUp {
    /// Drop the tokens and keep the author
    pub fn into_author(self) -> Author {
        Author {
            id: self.id,
            name: self.name,
            email: self.email,
            is_active: self.is_active,
            about: self.about,
            profession: self.profession,
            profile_photo_url: self.profile_photo_url,
            created_at: self.created_at,
        }
    }
}

/// Body of `POST /author/signup`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewAuthor {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 200))]
    pub profession: String,

    #[validate(length(min = 1))]
    pub about: String,

    pub password: String,

    pub profile_photo_url: String,
}

/// Body of `PUT /author/{id}`. Only the fields that changed are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct AuthorUpdate {
    #[serde(skip)]
    pub id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
}

impl AuthorUpdate {
    pub fn new(id: i64) -> Self {
        Self { id, ..Default::default() }
    }

    /// True when no field would be sent
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.profession.is_none()
            && self.about.is_none()
            && self.password.is_none()
            && self.profile_photo_url.is_none()
    }
}

/// Body of `PUT /author/authors/status`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorStatusChange {
    #[serde(rename = "authorID")]
    pub author_id: i64,
    pub is_active: bool,
}
