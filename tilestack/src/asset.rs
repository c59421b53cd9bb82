//! The shared image asset
//!
//! One image is downloaded and decoded per screen load; every tile then
//! holds a reference to the same [`ImageAsset`]. Decoding happens exactly
//! once, up front.

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;
use thiserror::Error;

use crate::fetch::{AsyncHttpClient, FetchError, HttpClient};

/// Errors from fetching or decoding the asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The download itself failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The downloaded bytes were not a decodable image.
    #[error("failed to decode image from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// A decoded RGBA image plus provenance.
pub struct ImageAsset {
    pixels: RgbaImage,
    source_url: String,
    encoded_len: usize,
}

impl ImageAsset {
    /// Decodes `bytes` into an asset, converting to RGBA on the way.
    ///
    /// The container format is sniffed from the bytes themselves, so JPEG
    /// and PNG sources both work without configuration.
    pub fn decode(url: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| AssetError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            pixels: decoded.to_rgba8(),
            source_url: url.to_string(),
            encoded_len: bytes.len(),
        })
    }

    /// Returns the decoded width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Returns the decoded height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Returns the decoded RGBA pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Returns the URL the asset was fetched from.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Returns the size of the encoded source in bytes.
    pub fn encoded_len(&self) -> usize {
        self.encoded_len
    }
}

impl fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAsset")
            .field("source_url", &self.source_url)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("encoded_len", &self.encoded_len)
            .finish()
    }
}

/// Fetches and decodes the single asset a screen tiles.
///
/// Generic over the HTTP client so tests can inject canned bytes.
pub struct AssetFetcher<C: HttpClient> {
    http_client: C,
}

impl<C: HttpClient> AssetFetcher<C> {
    /// Creates a fetcher backed by the given HTTP client.
    pub fn new(http_client: C) -> Self {
        Self { http_client }
    }

    /// Downloads and decodes the asset at `url`.
    ///
    /// The result is wrapped in an [`Arc`] because every tile on the
    /// screen shares the one decoded image.
    pub fn fetch(&self, url: &str) -> Result<Arc<ImageAsset>, AssetError> {
        let bytes = self.http_client.get(url)?;
        let asset = ImageAsset::decode(url, &bytes)?;
        tracing::debug!(
            url,
            width = asset.width(),
            height = asset.height(),
            encoded_len = asset.encoded_len(),
            "asset decoded"
        );
        Ok(Arc::new(asset))
    }
}

/// Async twin of [`AssetFetcher`].
pub struct AsyncAssetFetcher<C: AsyncHttpClient> {
    http_client: C,
}

impl<C: AsyncHttpClient> AsyncAssetFetcher<C> {
    /// Creates a fetcher backed by the given async HTTP client.
    pub fn new(http_client: C) -> Self {
        Self { http_client }
    }

    /// Downloads and decodes the asset at `url`.
    pub async fn fetch(&self, url: &str) -> Result<Arc<ImageAsset>, AssetError> {
        let bytes = self.http_client.get(url).await?;
        let asset = ImageAsset::decode(url, &bytes)?;
        tracing::debug!(
            url,
            width = asset.width(),
            height = asset.height(),
            encoded_len = asset.encoded_len(),
            "asset decoded"
        );
        Ok(Arc::new(asset))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::fetch::tests::{MockAsyncHttpClient, MockHttpClient};
    use std::io::Cursor;

    /// Encodes a solid-color RGBA image as PNG bytes.
    pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, image::Rgba(color));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encoding a fresh image buffer cannot fail");
        bytes
    }

    #[test]
    fn test_decode_reads_dimensions() {
        let bytes = png_bytes(8, 6, [255, 0, 0, 255]);
        let asset = ImageAsset::decode("https://example.com/a.png", &bytes).unwrap();

        assert_eq!(asset.width(), 8);
        assert_eq!(asset.height(), 6);
        assert_eq!(asset.encoded_len(), bytes.len());
        assert_eq!(asset.source_url(), "https://example.com/a.png");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = ImageAsset::decode("https://example.com/a.png", b"not an image");
        assert!(matches!(result.unwrap_err(), AssetError::Decode { .. }));
    }

    #[test]
    fn test_decode_rejects_empty_body() {
        let result = ImageAsset::decode("https://example.com/a.png", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_fetch_success_returns_shared_asset() {
        let fetcher = AssetFetcher::new(MockHttpClient {
            response: Ok(png_bytes(4, 4, [0, 255, 0, 255])),
        });

        let asset = fetcher.fetch("https://example.com/tile.png").unwrap();
        assert_eq!(asset.width(), 4);
        assert_eq!(asset.pixels().get_pixel(0, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_fetch_propagates_transport_error() {
        let fetcher = AssetFetcher::new(MockHttpClient {
            response: Err(FetchError::Transport("dns failure".to_string())),
        });

        let result = fetcher.fetch("https://example.com/tile.png");
        assert!(matches!(result.unwrap_err(), AssetError::Fetch(_)));
    }

    #[test]
    fn test_fetch_propagates_decode_error() {
        let fetcher = AssetFetcher::new(MockHttpClient {
            response: Ok(b"<html>not found</html>".to_vec()),
        });

        let result = fetcher.fetch("https://example.com/tile.png");
        assert!(matches!(result.unwrap_err(), AssetError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_async_fetch_success() {
        let fetcher = AsyncAssetFetcher::new(MockAsyncHttpClient {
            response: Ok(png_bytes(4, 4, [0, 0, 255, 255])),
        });

        let asset = fetcher.fetch("https://example.com/tile.png").await.unwrap();
        assert_eq!(asset.height(), 4);
    }

    #[tokio::test]
    async fn test_async_fetch_propagates_errors() {
        let fetcher = AsyncAssetFetcher::new(MockAsyncHttpClient {
            response: Err(FetchError::Status {
                status: 404,
                url: "https://example.com/tile.png".to_string(),
            }),
        });

        let result = fetcher.fetch("https://example.com/tile.png").await;
        assert!(matches!(result.unwrap_err(), AssetError::Fetch(_)));
    }

    #[test]
    fn test_debug_omits_pixel_buffer() {
        let bytes = png_bytes(4, 4, [1, 2, 3, 255]);
        let asset = ImageAsset::decode("https://example.com/a.png", &bytes).unwrap();
        let rendered = format!("{:?}", asset);

        assert!(rendered.contains("source_url"));
        assert!(!rendered.contains("pixels"));
    }
}
