use crate::fetcher::errors::FetchError;
use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

/// A fetched page, decoded to UTF-8 and ready for extraction.
#[derive(Debug)]
pub struct FetchedPage {
    pub url_final: Url,
    pub status: StatusCode,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

/// Decode a response body to UTF-8. The charset comes from the
/// Content-Type header when declared, otherwise from sniffing the first
/// 4KB of the body.
pub fn decode_body(content_type: &str, body_bytes: &[u8]) -> Result<String, FetchError> {
    let encoding = declared_encoding(content_type).unwrap_or_else(|| sniff_encoding(body_bytes));

    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "failed to decode body as {}",
            encoding.name()
        )));
    }

    Ok(decoded.into_owned())
}

fn declared_encoding(content_type: &str) -> Option<&'static Encoding> {
    let captures = CHARSET_REGEX.captures(content_type)?;
    let label = captures.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

fn sniff_encoding(body_bytes: &[u8]) -> &'static Encoding {
    let head = &body_bytes[..body_bytes.len().min(4096)];
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, false);
    detector.guess(None, true)
}
