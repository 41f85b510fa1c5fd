use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::{Error, Result};

/// Review headings look like `#37: Spicy Shrimp Noodle`.
/// Only the start is anchored, the title runs to the end of the line.
const HEADING_PATTERN: &str = r"^#(\d+): (.+)";

/// A single review as found on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub id: u64,
    pub title: String,
    /// `src` of the first `<img>` in the block, empty if there is none.
    pub image_reference: String,
}

/// What a single `<article>` turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Review(ReviewRecord),
    /// The heading doesn't look like a review (ads, filler cards...).
    NotAReview,
}

/// Selectors and the heading pattern, compiled once per page.
struct Matchers {
    heading: Selector,
    image: Selector,
    pattern: Regex,
}

impl Matchers {
    fn new() -> Result<Self> {
        Ok(Self {
            heading: create_selector("h2")?,
            image: create_selector("img")?,
            pattern: Regex::new(HEADING_PATTERN)?,
        })
    }
}

/// Extracts every review on the page, in document order.
/// Blocks that aren't reviews are skipped. A block without a heading, or whose first image
/// has no `src`, fails the whole page.
pub fn extract(doc: &Html) -> Result<Vec<ReviewRecord>> {
    let article_selector = create_selector("article")?;
    let matchers = Matchers::new()?;

    let mut reviews = Vec::new();
    for article in doc.select(&article_selector) {
        if let BlockOutcome::Review(review) = classify(&matchers, article)? {
            reviews.push(review);
        }
    }
    Ok(reviews)
}

/// Classifies a single `<article>` block.
pub fn classify_block(article: ElementRef) -> Result<BlockOutcome> {
    classify(&Matchers::new()?, article)
}

fn classify(matchers: &Matchers, article: ElementRef) -> Result<BlockOutcome> {
    let heading = article
        .select(&matchers.heading)
        .next()
        .ok_or(Error::MissingHeading)?;
    let heading_text = heading.text().collect::<String>();

    let Some(caps) = matchers.pattern.captures(&heading_text) else {
        return Ok(BlockOutcome::NotAReview);
    };
    let id = caps[1]
        .parse::<u64>()
        .map_err(|_| Error::InvalidId(caps[1].to_string()))?;
    let title = caps[2].to_string();

    let image_reference = match article.select(&matchers.image).next() {
        Some(img) => img
            .value()
            .attr("src")
            .ok_or(Error::MissingImageSrc)?
            .to_string(),
        None => String::new(),
    };

    Ok(BlockOutcome::Review(ReviewRecord {
        id,
        title,
        image_reference,
    }))
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
