//! Image handles used by forms and the upload endpoint

use serde::{Deserialize, Serialize};

/// Raw image picked by the user, not yet uploaded
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Image slot of a form: what is shown, and the local file if the user
/// picked a new one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSelection {
    pub preview_url: String,
    pub file: Option<ImageFile>,
}

impl ImageSelection {
    /// Slot showing an already uploaded image
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            preview_url: url.into(),
            file: None,
        }
    }

    /// Slot holding a freshly picked file
    pub fn local(preview_url: impl Into<String>, file: ImageFile) -> Self {
        Self {
            preview_url: preview_url.into(),
            file: Some(file),
        }
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }
}

/// `data` of the upload endpoint response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}
