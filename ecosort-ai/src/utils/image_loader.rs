//! Image loading and decoding
//!
//! **Purpose:** turn an `ImageSource` into encoded bytes (for remote
//! labelers) or into an RGBA pixel buffer (for the local colour heuristic).
//!
//! Uses the `image` crate for format-agnostic decoding (PNG, JPEG, GIF,
//! WebP, BMP, ...).

use crate::types::{ImageSource, PixelBuffer, StrategyError};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use std::borrow::Cow;
use thiserror::Error;
use tracing::debug;

/// Maximum encoded image size accepted from any source
const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024; // 20 MB

/// Image load or decode failure
#[derive(Debug, Error)]
pub enum ImageLoadError {
    /// URL scheme is neither http(s) nor data
    #[error("Unsupported image URL: {0}")]
    UnsupportedUrl(String),

    /// `data:` URL could not be parsed
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Fetching a remote image failed (includes timeouts)
    #[error("Image fetch failed: {0}")]
    Fetch(String),

    /// Image payload was empty
    #[error("Image is empty")]
    Empty,

    /// Image payload exceeds `MAX_IMAGE_BYTES`
    #[error("Image too large: {0} bytes")]
    TooLarge(usize),

    /// Bytes are not a decodable image
    #[error("Image decode failed: {0}")]
    Decode(String),
}

impl From<ImageLoadError> for StrategyError {
    fn from(err: ImageLoadError) -> Self {
        match err {
            ImageLoadError::Decode(msg) => StrategyError::Decode(msg),
            other => StrategyError::ImageLoad(other.to_string()),
        }
    }
}

/// Parsed `data:` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// MIME type from the header, if present
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

/// Parse a base64 `data:[<mime>][;params];base64,<payload>` URL
pub fn parse_data_url(url: &str) -> Result<DataUrl, ImageLoadError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ImageLoadError::InvalidDataUrl("missing 'data:' prefix".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageLoadError::InvalidDataUrl("missing ',' separator".to_string()))?;

    let Some(mime) = header.strip_suffix(";base64") else {
        return Err(ImageLoadError::InvalidDataUrl(
            "only base64-encoded data URLs are supported".to_string(),
        ));
    };

    let mime_type = mime
        .split(';')
        .next()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    let data = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ImageLoadError::InvalidDataUrl(format!("base64: {}", e)))?;

    Ok(DataUrl { mime_type, data })
}

/// Resolve an image source to its encoded bytes
///
/// Raw bytes are borrowed; `data:` URLs are decoded in place; http(s) URLs
/// are fetched with `client` (its timeout bounds the fetch).
pub async fn load_image_bytes<'a>(
    client: &Client,
    source: &'a ImageSource,
) -> Result<Cow<'a, [u8]>, ImageLoadError> {
    let bytes: Cow<'a, [u8]> = match source {
        ImageSource::Bytes { data, .. } => Cow::Borrowed(data.as_slice()),
        ImageSource::Url(url) if url.starts_with("data:") => {
            Cow::Owned(parse_data_url(url)?.data)
        }
        ImageSource::Url(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Cow::Owned(fetch_image(client, url).await?)
        }
        ImageSource::Url(url) => {
            let scheme = url.split(':').next().unwrap_or_default();
            return Err(ImageLoadError::UnsupportedUrl(format!(
                "scheme '{}' not supported",
                scheme
            )));
        }
    };

    if bytes.is_empty() {
        return Err(ImageLoadError::Empty);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageLoadError::TooLarge(bytes.len()));
    }

    Ok(bytes)
}

/// Size-check an inline image before it is embedded in a request
///
/// Covers raw bytes and `data:` URLs (estimated from the base64 length).
/// Remote URLs are passed through unchecked since they are not fetched here.
pub fn check_inline_size(source: &ImageSource) -> Result<(), ImageLoadError> {
    let len = match source {
        ImageSource::Bytes { data, .. } => data.len(),
        ImageSource::Url(url) if url.starts_with("data:") => url
            .split_once(',')
            .map_or(0, |(_, payload)| payload.trim().len() / 4 * 3),
        ImageSource::Url(_) => return Ok(()),
    };

    if len == 0 {
        return Err(ImageLoadError::Empty);
    }
    if len > MAX_IMAGE_BYTES {
        return Err(ImageLoadError::TooLarge(len));
    }
    Ok(())
}

async fn fetch_image(client: &Client, url: &str) -> Result<Vec<u8>, ImageLoadError> {
    debug!(url = %url, "Fetching image");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ImageLoadError::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ImageLoadError::Fetch(format!(
            "{} returned status {}",
            url,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ImageLoadError::Fetch(e.to_string()))?;

    Ok(bytes.to_vec())
}

/// Decode encoded image bytes to packed RGBA pixels
pub fn decode_pixels(bytes: &[u8]) -> Result<PixelBuffer, ImageLoadError> {
    let image = image::load_from_memory(bytes).map_err(|e| ImageLoadError::Decode(e.to_string()))?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(PixelBuffer {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Produces a pixel buffer for an image reference, or signals failure
#[async_trait]
pub trait ImageDecoder: Send + Sync {
    async fn decode(&self, source: &ImageSource) -> Result<PixelBuffer, ImageLoadError>;
}

/// Default decoder: load bytes, then decode with the `image` crate
pub struct RasterImageDecoder {
    client: Client,
}

impl RasterImageDecoder {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageDecoder for RasterImageDecoder {
    async fn decode(&self, source: &ImageSource) -> Result<PixelBuffer, ImageLoadError> {
        let bytes = load_image_bytes(&self.client, source).await?.into_owned();

        // Decoding is CPU-bound; keep it off the async worker
        let buffer = tokio::task::spawn_blocking(move || decode_pixels(&bytes))
            .await
            .map_err(|e| ImageLoadError::Decode(format!("Task join error: {}", e)))??;

        debug!(
            width = buffer.width,
            height = buffer.height,
            "Image decoded"
        );

        Ok(buffer)
    }
}
