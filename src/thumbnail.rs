// src/thumbnail.rs
//! YouTube Shorts URL parsing and thumbnail download

use base64::prelude::*;
use regex::Regex;
use reqwest::Client;

use crate::error::FetchError;
use crate::utils::{sniff_image_mime_type, strip_data_url_prefix};

pub const DEFAULT_THUMBNAIL_BASE_URL: &str = "https://img.youtube.com/vi";
pub const DEFAULT_PROXY_URL: &str = "https://cors-anywhere.herokuapp.com/";

lazy_static::lazy_static! {
    static ref SHORTS_URL: Regex = Regex::new(r"(?:youtube\.com/shorts/|youtu\.be/)([\w-]{11})")
        .expect("shorts URL pattern is valid");
}

/// Extract the 11-character video id from a Shorts or youtu.be link
pub fn extract_video_id(url: &str) -> Option<String> {
    SHORTS_URL
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// A downloaded thumbnail ready to be sent inline to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailImage {
    pub base64: String,
    pub mime_type: &'static str,
}

impl ThumbnailImage {
    fn from_bytes(bytes: &[u8]) -> Self {
        // Some proxies answer with a data URL instead of the raw image
        if let Ok(text) = std::str::from_utf8(bytes) {
            if text.starts_with("data:") {
                let base64 = strip_data_url_prefix(text.trim()).to_string();
                let mime_type = BASE64_STANDARD
                    .decode(&base64)
                    .map(|decoded| sniff_image_mime_type(&decoded))
                    .unwrap_or("image/jpeg");
                return Self { base64, mime_type };
            }
        }

        Self {
            base64: BASE64_STANDARD.encode(bytes),
            mime_type: sniff_image_mime_type(bytes),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThumbnailFetcher {
    client: Client,
    base_url: String,
    proxy_url: String,
}

impl ThumbnailFetcher {
    pub fn new(base_url: impl Into<String>, proxy_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            proxy_url: proxy_url.into(),
        }
    }

    /// `<base>/<id>/maxresdefault.jpg`
    pub fn thumbnail_url(&self, video_id: &str) -> String {
        format!("{}/{}/maxresdefault.jpg", self.base_url, video_id)
    }

    /// Fetches `url` directly, falling back once to the proxy when that fails.
    pub async fn fetch_as_base64(&self, url: &str) -> Result<ThumbnailImage, FetchError> {
        match self.get_bytes(url).await {
            Ok(bytes) => {
                tracing::debug!("Fetched thumbnail directly ({} bytes)", bytes.len());
                return Ok(ThumbnailImage::from_bytes(&bytes));
            }
            Err(reason) => {
                tracing::warn!("Direct thumbnail fetch failed ({}), trying proxy", reason);
            }
        }

        let proxied = format!("{}{}", self.proxy_url, url);
        match self.get_bytes(&proxied).await {
            Ok(bytes) => {
                tracing::debug!("Fetched thumbnail via proxy ({} bytes)", bytes.len());
                Ok(ThumbnailImage::from_bytes(&bytes))
            }
            Err(reason) => Err(FetchError::ProxyFailed(reason)),
        }
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(status.to_string());
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| e.to_string())
    }
}

impl Default for ThumbnailFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_THUMBNAIL_BASE_URL, DEFAULT_PROXY_URL)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, Router};

    pub(crate) const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];

    /// Serves `/vi/:id/maxresdefault.jpg` (only for `direct_ok` ids) and a proxy at `/proxy/*url`
    pub(crate) async fn spawn_image_server(proxy_ok: bool) -> String {
        let app = Router::new()
            .route(
                "/vi/:id/maxresdefault.jpg",
                get(|Path(id): Path<String>| async move {
                    if id.starts_with("direct_ok") {
                        (StatusCode::OK, JPEG_BYTES.to_vec())
                    } else {
                        (StatusCode::FORBIDDEN, Vec::new())
                    }
                }),
            )
            .route(
                "/proxy/*url",
                get(move || async move {
                    if proxy_ok {
                        (StatusCode::OK, JPEG_BYTES.to_vec())
                    } else {
                        (StatusCode::NOT_FOUND, Vec::new())
                    }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    pub(crate) fn fetcher_for(server: &str) -> ThumbnailFetcher {
        ThumbnailFetcher::new(format!("{}/vi", server), format!("{}/proxy/", server))
    }

    #[test]
    fn test_extract_video_id() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/abcdEFGH123").as_deref(),
            Some("abcdEFGH123")
        );
        assert_eq!(
            extract_video_id("https://youtu.be/a-b_c1234567?si=xyz").as_deref(),
            Some("a-b_c123456")
        );
        assert_eq!(extract_video_id("https://example.com/x"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/shorts/short"), None);
    }

    #[test]
    fn test_thumbnail_url() {
        let fetcher = ThumbnailFetcher::default();
        assert_eq!(
            fetcher.thumbnail_url("abcdEFGH123"),
            "https://img.youtube.com/vi/abcdEFGH123/maxresdefault.jpg"
        );
    }

    #[test]
    fn test_data_url_payload_is_unwrapped() {
        let image = ThumbnailImage::from_bytes(b"data:image/jpeg;base64,/9j/4AAQ");
        assert_eq!(image.base64, "/9j/4AAQ");
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_direct_fetch() {
        let server = spawn_image_server(false).await;
        let fetcher = fetcher_for(&server);

        let image = fetcher
            .fetch_as_base64(&fetcher.thumbnail_url("direct_ok_1"))
            .await
            .unwrap();
        assert_eq!(image.base64, BASE64_STANDARD.encode(JPEG_BYTES));
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_falls_back_to_proxy() {
        let server = spawn_image_server(true).await;
        let fetcher = fetcher_for(&server);

        let image = fetcher
            .fetch_as_base64(&fetcher.thumbnail_url("blocked_id1"))
            .await
            .unwrap();
        assert_eq!(image.base64, BASE64_STANDARD.encode(JPEG_BYTES));
    }

    #[tokio::test]
    async fn test_unreachable_host_falls_back_to_proxy() {
        let server = spawn_image_server(true).await;
        let fetcher = ThumbnailFetcher::new("http://127.0.0.1:1/vi", format!("{}/proxy/", server));

        let image = fetcher
            .fetch_as_base64(&fetcher.thumbnail_url("direct_ok_1"))
            .await
            .unwrap();
        assert_eq!(image.base64, BASE64_STANDARD.encode(JPEG_BYTES));
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_fails_when_proxy_also_fails() {
        let server = spawn_image_server(false).await;
        let fetcher = fetcher_for(&server);

        let err = fetcher
            .fetch_as_base64(&fetcher.thumbnail_url("blocked_id1"))
            .await
            .unwrap_err();
        let FetchError::ProxyFailed(reason) = err;
        assert!(reason.contains("404"));
    }
}
