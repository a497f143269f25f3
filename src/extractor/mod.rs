pub mod language;
pub mod model;
pub mod reader;

pub use model::ExtractedArticle;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::fetcher::{self, FetchError, FetchedPage};
use crate::extractor::model::normalize_whitespace;

/// Pages with less readable text than this are treated as paywalled or
/// empty rather than analyzable articles.
const MIN_ARTICLE_CHARS: usize = 300;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to download article: {0}")]
    Download(#[from] FetchError),

    #[error("article content too short ({got} of {min} chars)")]
    TooShort { got: usize, min: usize },

    #[error("article extraction failed: {0}")]
    Unreadable(String),
}

/// Fetch a URL and extract its readable article text.
#[instrument(skip_all, fields(url = %url))]
pub async fn scrape(url: &str) -> Result<ExtractedArticle, ExtractError> {
    let page = fetcher::fetch(url).await?;
    extract(&page)
}

/// Extract readable article text from an already-fetched page.
pub fn extract(page: &FetchedPage) -> Result<ExtractedArticle, ExtractError> {
    let readable = reader::extract(&page.body, &page.url_final)
        .ok_or_else(|| ExtractError::Unreadable("no readable content found".to_string()))?;

    let text = normalize_whitespace(&readable.text);

    let got = text.chars().count();
    if got < MIN_ARTICLE_CHARS {
        return Err(ExtractError::TooShort {
            got,
            min: MIN_ARTICLE_CHARS,
        });
    }

    let language = language::detect_language(&text);
    debug!(title = %readable.title, language = ?language, chars = got, "extracted article");

    Ok(ExtractedArticle {
        url: page.url_final.clone(),
        title: readable.title,
        language,
        text,
        fetched_at: page.fetched_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use reqwest::StatusCode;
    use url::Url;

    fn page(html: &str) -> FetchedPage {
        FetchedPage {
            url_final: Url::parse("https://example.com/story").unwrap(),
            status: StatusCode::OK,
            body: html.to_string(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn extracts_long_article() {
        let filler =
            "The committee approved the measure after a lengthy public hearing session. "
                .repeat(10);
        let html = format!(
            "<html><head><title>Measure Approved</title></head>\
             <body><article><h1>Measure Approved</h1><p>{}</p></article></body></html>",
            filler
        );

        let article = extract(&page(&html)).unwrap();
        assert!(article.title.contains("Measure Approved"));
        assert!(article.text.chars().count() >= 300);
        assert_eq!(article.language, Some("en".to_string()));
    }

    #[test]
    fn short_page_is_rejected() {
        let html = "<html><head><title>Stub</title></head>\
             <body><article><p>Subscribe to continue reading this story today.</p></article></body></html>";

        match extract(&page(html)) {
            Err(ExtractError::TooShort { got, min }) => {
                assert!(got < min);
                assert_eq!(min, 300);
            }
            other => panic!("expected TooShort, got {:?}", other.map(|a| a.title)),
        }
    }

    #[test]
    fn unreadable_page_is_rejected() {
        let html = "<html><head></head><body></body></html>";
        assert!(matches!(
            extract(&page(html)),
            Err(ExtractError::Unreadable(_))
        ));
    }
}
