//! Decoding of the upstream JSON envelope.
//!
//! The envelope is `{"status": ..., "results": [...], "nextPage": ...}`. Only a
//! `results` array counts as a well-formed page; error envelopes carry an object
//! there instead and are reported as [`PayloadError::MissingResults`].

use newshub_core::{Article, ArticleId, Cursor, ResultPage};
use newshub_logging::news_warn;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response has no results array (status {status:?})")]
    MissingResults { status: Option<String> },
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    article_id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    link: Option<String>,
}

pub fn decode_page(bytes: &[u8]) -> Result<ResultPage, PayloadError> {
    let envelope: Value = serde_json::from_slice(bytes)?;
    let results = envelope
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| PayloadError::MissingResults {
            status: envelope
                .get("status")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned),
        })?;

    let articles = results
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| decode_article(index, raw))
        .collect();

    let next_cursor = match envelope.get("nextPage") {
        Some(Value::String(token)) => Cursor::new(token.as_str()),
        Some(Value::Number(token)) => Cursor::new(token.to_string()),
        _ => None,
    };

    Ok(ResultPage::new(articles, next_cursor))
}

fn decode_article(index: usize, raw: &Value) -> Option<Article> {
    let raw = match RawArticle::deserialize(raw) {
        Ok(raw) => raw,
        Err(err) => {
            news_warn!("Skipping result {}: {}", index, err);
            return None;
        }
    };
    let Some(id) = raw.article_id.filter(|id| !id.trim().is_empty()) else {
        news_warn!("Skipping result {}: no article_id", index);
        return None;
    };
    Some(Article {
        id: ArticleId::new(id),
        title: raw.title.unwrap_or_default(),
        description: raw.description,
        image_url: raw.image_url,
        link: raw.link.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_results_and_cursor() {
        let body = br#"{
            "status": "success",
            "totalResults": 2,
            "results": [
                {"article_id": "a1", "title": "One", "description": null,
                 "image_url": "https://img.example/1.png", "link": "https://news.example/1"},
                {"article_id": "a2", "title": "Two", "description": "Second story",
                 "link": "https://news.example/2", "source_id": "wire"}
            ],
            "nextPage": "1700000000123"
        }"#;

        let page = decode_page(body).unwrap();
        assert_eq!(page.next_cursor, Cursor::new("1700000000123"));
        assert_eq!(page.articles.len(), 2);
        assert_eq!(page.articles[0].description, None);
        assert_eq!(
            page.articles[0].image_url.as_deref(),
            Some("https://img.example/1.png")
        );
        assert_eq!(page.articles[1].description.as_deref(), Some("Second story"));
    }

    #[test]
    fn missing_or_null_next_page_means_no_cursor() {
        let page = decode_page(br#"{"results": [], "nextPage": null}"#).unwrap();
        assert_eq!(page.next_cursor, None);
        let page = decode_page(br#"{"results": [], "nextPage": ""}"#).unwrap();
        assert_eq!(page.next_cursor, None);
        let page = decode_page(br#"{"results": []}"#).unwrap();
        assert_eq!(page, ResultPage::empty());
    }

    #[test]
    fn records_without_identifier_are_skipped() {
        let body = br#"{"results": [
            {"title": "anonymous"},
            {"article_id": "", "title": "blank"},
            {"article_id": 7, "title": "numeric id"},
            {"article_id": "kept"}
        ]}"#;

        let page = decode_page(body).unwrap();
        let ids: Vec<_> = page.articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["kept"]);
        assert_eq!(page.articles[0].title, "");
        assert_eq!(page.articles[0].link, "");
    }

    #[test]
    fn error_envelope_is_malformed() {
        let body = br#"{"status": "error", "results": {"message": "API key invalid"}}"#;
        let err = decode_page(body).unwrap_err();
        assert!(matches!(
            err,
            PayloadError::MissingResults { status: Some(ref s) } if s == "error"
        ));
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(matches!(
            decode_page(b"<html>rate limited</html>"),
            Err(PayloadError::Json(_))
        ));
        assert!(matches!(
            decode_page(b"[1, 2, 3]"),
            Err(PayloadError::MissingResults { status: None })
        ));
    }
}
