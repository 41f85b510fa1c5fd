use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),
    #[error("An article block is missing its <h2> heading.")]
    MissingHeading,
    #[error("An article block has an <img> without a src attribute.")]
    MissingImageSrc,
    #[error("Review id doesn't fit into u64: {0}")]
    InvalidId(String),
    #[error("Invalid heading pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("GET {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },
}
