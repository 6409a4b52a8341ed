//! Response envelopes
//!
//! Every endpoint wraps its payload as `{ data, message, code }`; paginated
//! endpoints add `pagination: { hasNext, nextCursor }`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    pub message: String,
    pub code: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(rename = "hasNext")]
    pub has_next: bool,

    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedEnvelope<T> {
    pub data: Vec<T>,
    pub message: String,
    pub code: u16,
    pub pagination: Pagination,
}

/// One page of a cursor-paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
    pub next_cursor: Option<i64>,
}

impl<T> From<PagedEnvelope<T>> for Page<T> {
    fn from(envelope: PagedEnvelope<T>) -> Self {
        Page {
            items: envelope.data,
            has_next: envelope.pagination.has_next,
            next_cursor: envelope.pagination.next_cursor,
        }
    }
}

/// Body shape of a failed request. Everything is optional because error
/// bodies are not guaranteed to follow the envelope.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_envelope_into_page() {
        let envelope: PagedEnvelope<u32> = serde_json::from_str(
            r#"{"data":[1,2],"message":"Success","code":200,
                "pagination":{"hasNext":true,"nextCursor":2}}"#,
        )
        .unwrap();
        let page = Page::from(envelope);
        assert_eq!(page.items, vec![1, 2]);
        assert!(page.has_next);
        assert_eq!(page.next_cursor, Some(2));
    }

    #[test]
    fn test_envelope_requires_message_and_code() {
        assert!(serde_json::from_str::<Envelope<u32>>(r#"{"data":1}"#).is_err());
    }
}
