use readability::extractor;
use scraper::{Html, Selector};
use url::Url;

use crate::extractor::model::ReadableContent;

pub fn extract(html: &str, url: &Url) -> Option<ReadableContent> {
    // Try readability first
    if let Ok(article) = extractor::extract(&mut html.as_bytes(), url) {
        if !article.text.trim().is_empty() {
            return Some(ReadableContent {
                title: article.title,
                text: article.text,
            });
        }
    }

    // Fallback to selector heuristics if readability fails
    fallback_extract(html)
}

fn fallback_extract(html: &str) -> Option<ReadableContent> {
    let document = Html::parse_document(html);

    let title = extract_title(&document)?;
    let text = extract_main_content(&document);

    if text.trim().is_empty() {
        return None;
    }

    Some(ReadableContent { title, text })
}

fn extract_title(document: &Html) -> Option<String> {
    // og:title, then <title>, then the first h1
    if let Ok(selector) = Selector::parse("meta[property='og:title']") {
        for element in document.select(&selector) {
            if let Some(content) = element.value().attr("content") {
                return Some(content.to_string());
            }
        }
    }

    for selector_str in ["title", "h1"] {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let title = element.text().collect::<String>().trim().to_string();
                if !title.is_empty() {
                    return Some(title);
                }
            }
        }
    }

    None
}

fn extract_main_content(document: &Html) -> String {
    let content_selectors = [
        "article",
        "main",
        "[role='main']",
        ".article-body",
        ".story-body",
        ".content",
        "#content",
        ".entry-content",
    ];

    for selector_str in content_selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let text = element.text().collect::<String>();
                if text.trim().len() > 100 {
                    return text;
                }
            }
        }
    }

    // Last resort: whole body text
    if let Ok(body_selector) = Selector::parse("body")
        && let Some(body) = document.select(&body_selector).next()
    {
        return body.text().collect::<String>();
    }

    String::new()
}
