use base64::{engine::general_purpose, Engine as _};
use mime_guess::from_path;
use std::path::Path;

use crate::config::MAX_IMAGE_BYTES;
use crate::core::errors::MediaError;

/// An image attached to a post: either a remote URL or an embedded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    /// A remote image. Blank input means "no image".
    pub fn from_url(url: &str) -> Option<ImageRef> {
        let url = url.trim();
        if url.is_empty() {
            None
        } else {
            Some(ImageRef(url.to_string()))
        }
    }

    /// Embeds uploaded image bytes as a data URL. The type is taken from the
    /// file name.
    pub fn from_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<ImageRef, MediaError> {
        let mime = from_path(path.as_ref()).first_or_octet_stream();
        if mime.type_().as_str() != "image" {
            return Err(MediaError::NotAnImage(mime.essence_str().to_string()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(MediaError::TooLarge {
                size: bytes.len(),
                max: MAX_IMAGE_BYTES,
            });
        }
        let payload = general_purpose::STANDARD.encode(bytes);
        Ok(ImageRef(format!("data:{};base64,{}", mime.essence_str(), payload)))
    }

    /// Picks the uploaded file over the URL when both are supplied.
    pub fn from_inputs(
        file: Option<(&Path, &[u8])>,
        url: Option<&str>,
    ) -> Result<Option<ImageRef>, MediaError> {
        match file {
            Some((path, bytes)) => ImageRef::from_file(path, bytes).map(Some),
            None => Ok(url.and_then(ImageRef::from_url)),
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.0.starts_with("data:")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// What an edit does to a post's image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageChange {
    #[default]
    Keep,
    Replace(ImageRef),
    Remove,
}
