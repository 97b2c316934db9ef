// utils.rs - Small helpers shared by the requesters and the thumbnail fetcher
use regex::Regex;

lazy_static::lazy_static! {
    static ref FENCED_BLOCK: Regex = Regex::new(r"(?s)```[A-Za-z]*[ \t]*\r?\n(.*?)\r?\n[ \t]*```")
        .expect("fenced block pattern is valid");
}

/// Returns the body of the first fenced code block, or the trimmed input when there is none
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match FENCED_BLOCK.captures(trimmed).and_then(|c| c.get(1)) {
        Some(body) => body.as_str(),
        None => trimmed,
    }
}

/// Determine MIME type from the image signature
pub fn sniff_image_mime_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        "image/png"
    } else if bytes.starts_with(&[0x47, 0x49, 0x46]) {
        "image/gif"
    } else if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(&b"WEBP"[..]) {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

/// "data:image/jpeg;base64,AAAA" -> "AAAA"; anything else is returned unchanged
pub fn strip_data_url_prefix(payload: &str) -> &str {
    if payload.starts_with("data:") {
        if let Some((_, data)) = payload.split_once(',') {
            return data;
        }
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}\n"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(
            strip_code_fence("Here you go:\n```json\n{\n  \"a\": 1\n}\n```\nEnjoy"),
            "{\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn test_sniff_image_mime_type() {
        assert_eq!(sniff_image_mime_type(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(sniff_image_mime_type(&[0x89, 0x50, 0x4E, 0x47, 0x0D]), "image/png");
        assert_eq!(sniff_image_mime_type(b"GIF89a"), "image/gif");
        assert_eq!(sniff_image_mime_type(b"RIFF\x24\x00\x00\x00WEBPVP8 "), "image/webp");
        // RIFF containers that are not WebP (WAV, AVI) fall back to the default
        assert_eq!(sniff_image_mime_type(b"RIFF\x24\x00\x00\x00WAVEfmt "), "image/jpeg");
        assert_eq!(sniff_image_mime_type(b"unknown"), "image/jpeg");
    }

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url_prefix("QUJD"), "QUJD");
    }
}
