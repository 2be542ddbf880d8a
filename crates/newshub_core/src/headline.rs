use crate::{Article, Millis};

/// Number of breaking headlines kept from the `top` category.
pub const HEADLINE_LIMIT: usize = 6;
/// Time each headline stays on screen.
pub const HEADLINE_PERIOD_MS: Millis = 4_000;

/// Cycles through a small set of breaking headlines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeadlineRotator {
    headlines: Vec<Article>,
    current: usize,
}

impl HeadlineRotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the first [`HEADLINE_LIMIT`] articles and restart from the first one.
    /// Returns whether there is anything to rotate.
    pub fn load(&mut self, mut articles: Vec<Article>) -> bool {
        articles.truncate(HEADLINE_LIMIT);
        self.headlines = articles;
        self.current = 0;
        !self.headlines.is_empty()
    }

    pub fn rotate(&mut self) {
        if !self.headlines.is_empty() {
            self.current = (self.current + 1) % self.headlines.len();
        }
    }

    pub fn current(&self) -> Option<&Article> {
        self.headlines.get(self.current)
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.headlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headlines.is_empty()
    }
}
