use std::path::PathBuf;

use crate::{N_PAGES, N_REVIEWS, PAGE_URL_TEMPLATE, PLACEHOLDER_IMG_URL, RESULTS_DIR};

/// Everything the crawl needs to know up front.
/// `Default` uses the values the binary ships with.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Pages `1..=n_pages` are requested.
    pub n_pages: u32,
    /// Review ids are expected to cover `1..=n_reviews`.
    pub n_reviews: u32,
    /// Listing URL, `{page}` gets replaced with the page number.
    pub page_url_template: String,
    /// Downloaded for reviews that have no image of their own.
    pub placeholder_img_url: String,
    pub results_dir: PathBuf,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            n_pages: N_PAGES,
            n_reviews: N_REVIEWS,
            page_url_template: PAGE_URL_TEMPLATE.into(),
            placeholder_img_url: PLACEHOLDER_IMG_URL.into(),
            results_dir: RESULTS_DIR.into(),
        }
    }
}

impl CrawlConfig {
    pub fn with_pages(mut self, n_pages: u32) -> Self {
        self.n_pages = n_pages;
        self
    }

    pub fn with_reviews(mut self, n_reviews: u32) -> Self {
        self.n_reviews = n_reviews;
        self
    }

    pub fn with_page_url_template(mut self, template: impl Into<String>) -> Self {
        self.page_url_template = template.into();
        self
    }

    pub fn with_placeholder_img_url(mut self, url: impl Into<String>) -> Self {
        self.placeholder_img_url = url.into();
        self
    }

    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_shipped_values() {
        let config = CrawlConfig::default();
        assert_eq!(config.n_pages, 326);
        assert_eq!(config.n_reviews, 4792);
        assert!(config.page_url_template.contains("{page}"));
        assert_eq!(config.results_dir, PathBuf::from("results"));
    }

    #[test]
    fn setters_override_defaults() {
        let config = CrawlConfig::default()
            .with_pages(3)
            .with_reviews(10)
            .with_page_url_template("http://127.0.0.1:3000/{page}")
            .with_placeholder_img_url("http://127.0.0.1:3000/none.jpg")
            .with_results_dir("/tmp/out");
        assert_eq!(config.n_pages, 3);
        assert_eq!(config.n_reviews, 10);
        assert_eq!(config.page_url_template, "http://127.0.0.1:3000/{page}");
        assert_eq!(config.placeholder_img_url, "http://127.0.0.1:3000/none.jpg");
        assert_eq!(config.results_dir, PathBuf::from("/tmp/out"));
    }
}
