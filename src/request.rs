use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use crate::{info_time, CrawlConfig, Error, Result};

/// Anything that can turn a URL into the bytes behind it.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Plain GET over `reqwest`, no extra headers and the client's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    // Client uses Arc so we can clone cheaply
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.into(),
                status: status.as_u16(),
            });
        }
        Ok(res.bytes().await?.to_vec())
    }
}

#[inline]
pub fn page_url(template: &str, page_num: u32) -> String {
    template.replace("{page}", &page_num.to_string())
}

/// Requests a listing page and returns it parsed into a document.
pub async fn fetch_page<F: Fetch + ?Sized>(
    fetcher: &F,
    config: &CrawlConfig,
    page_num: u32,
) -> Result<Html> {
    let url = page_url(&config.page_url_template, page_num);
    info_time!("Requesting page {page_num}: {url}");
    let body = fetcher.get(&url).await?;
    let html = String::from_utf8_lossy(&body);
    Ok(Html::parse_document(&html))
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::{collections::HashMap, sync::Mutex};

    use super::*;

    /// Serves canned responses. Unknown URLs answer 404.
    #[derive(Default)]
    pub(crate) struct StubFetcher {
        responses: HashMap<String, core::result::Result<Vec<u8>, u16>>,
        requested: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        pub(crate) fn ok(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.responses.insert(url.into(), Ok(body.into()));
            self
        }

        pub(crate) fn status(mut self, url: &str, status: u16) -> Self {
            self.responses.insert(url.into(), Err(status));
            self
        }

        pub(crate) fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetch for StubFetcher {
        async fn get(&self, url: &str) -> Result<Vec<u8>> {
            self.requested.lock().unwrap().push(url.into());
            match self.responses.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(Error::HttpStatus {
                    url: url.into(),
                    status: *status,
                }),
                None => Err(Error::HttpStatus {
                    url: url.into(),
                    status: 404,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Selector;

    use super::fixture::StubFetcher;
    use super::*;

    #[test]
    fn page_url_substitutes_page_number() {
        assert_eq!(
            page_url("https://www.theramenrater.com/page/{page}/", 12),
            "https://www.theramenrater.com/page/12/"
        );
    }

    #[tokio::test]
    async fn fetch_page_parses_body() {
        let config = CrawlConfig::default().with_page_url_template("http://stub/{page}");
        let fetcher = StubFetcher::default().ok(
            "http://stub/3",
            "<html><body><article><h2>#1: A</h2></article></body></html>",
        );

        let doc = fetch_page(&fetcher, &config, 3).await.unwrap();
        let article = Selector::parse("article").unwrap();
        assert_eq!(doc.select(&article).count(), 1);
        assert_eq!(fetcher.requested(), vec!["http://stub/3".to_string()]);
    }

    #[tokio::test]
    async fn fetch_page_propagates_fetch_error() {
        let config = CrawlConfig::default().with_page_url_template("http://stub/{page}");
        let fetcher = StubFetcher::default().status("http://stub/1", 500);

        let err = fetch_page(&fetcher, &config, 1).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    }
}
