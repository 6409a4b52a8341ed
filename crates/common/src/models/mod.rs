//! Domain models
//!
//! Wire shapes for the entities served by the CMS backend, the payloads sent
//! to it, and the classification enums shared by articles and web stories.

/// Entities addressable by a numeric id, used by cache list patches
pub trait Identified {
    fn id(&self) -> i64;
}

/// Error returned when parsing one of the classification enums from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed string enum with snake_case wire names, `as_str`,
/// `ALL`, `Display` and `FromStr`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::models::ParseEnumError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub(crate) use wire_enum;

mod article;
mod author;
mod media;
mod story;

pub use article::{
    Article, ArticleStatus, ArticleStatusChange, ArticleUpdate, ArticleView, Category, NewArticle,
    Region,
};
pub use author::{ActivationStatus, Author, AuthorSignUp, AuthorStatusChange, AuthorUpdate, NewAuthor};
pub use media::{ImageFile, ImageSelection, UploadedImage};
pub use story::WebStory;
