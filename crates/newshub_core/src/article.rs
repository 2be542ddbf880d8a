use std::fmt;

/// Upstream identifier of an article; the de-duplication key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link: String,
}

impl Article {
    /// Minimal article with only an identifier and a title; the link is left empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ArticleId::new(id),
            title: title.into(),
            description: None,
            image_url: None,
            link: String::new(),
        }
    }
}

/// One page of results as returned by the upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    pub articles: Vec<Article>,
    pub next_cursor: Option<crate::Cursor>,
}

impl ResultPage {
    pub fn new(articles: Vec<Article>, next_cursor: Option<crate::Cursor>) -> Self {
        Self {
            articles,
            next_cursor,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
