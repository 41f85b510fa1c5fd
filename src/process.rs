use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
};

use chrono::Local;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::parse::{extract, ReviewRecord};
use crate::request::{fetch_page, Fetch};
use crate::{info_time, CrawlConfig, Error, Result};

const STATS_FILE: &str = "stats.json";

/// What a crawl found, written out as `stats.json`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// Ids in the order they appeared, keyed by page. Failed pages have no entry.
    pub ids_on_pages: BTreeMap<u32, Vec<u64>>,
    /// Ids in `1..=n_reviews` that no page produced, ascending.
    pub missing_ids: Vec<u64>,
}

/// Drives the whole crawl: pages, images and the final report.
pub struct Crawler<F> {
    fetcher: F,
    config: CrawlConfig,
}

impl<F: Fetch> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    /// Runs the crawl once, from scratch.
    ///
    /// A page that can't be fetched or parsed is logged and skipped.
    /// A failed image download is not recovered and aborts the run before the stats are written.
    pub async fn run(&self) -> Result<CrawlStats> {
        let start_time = Local::now();
        info_time!("Started scraping {} pages", self.config.n_pages);

        let results_dir = self.config.results_dir.as_path();
        tokio::fs::create_dir_all(results_dir).await?;

        let mut stats = CrawlStats::default();
        let reviews = self.collect_reviews(&mut stats).await;
        info_time!(start_time, "Finished all pages, {} reviews", reviews.len());

        let images_time = Local::now();
        for review in &reviews {
            save_review_image(
                &self.fetcher,
                review,
                results_dir,
                &self.config.placeholder_img_url,
            )
            .await?;
        }
        info_time!(images_time, "Saved {} images", reviews.len());

        stats.missing_ids = missing_ids(&reviews, self.config.n_reviews);
        info_time!("Missing ids: {:?}", stats.missing_ids);

        let stats_path = write_stats(&stats, results_dir).await?;
        info_time!("Wrote the stats to file: {}", stats_path.display());

        Ok(stats)
    }

    /// Walks pages `1..=n_pages` in order, filling in `ids_on_pages` as it goes.
    async fn collect_reviews(&self, stats: &mut CrawlStats) -> Vec<ReviewRecord> {
        let mut reviews = Vec::new();
        for page_num in 1..=self.config.n_pages {
            match self.scrape_page(page_num).await {
                Ok(parsed) => {
                    stats
                        .ids_on_pages
                        .insert(page_num, parsed.iter().map(|r| r.id).collect());
                    reviews.extend(parsed);
                }
                Err(e) => info_time!("{}", page_failure_notice(page_num, &e)),
            }
        }
        reviews
    }

    async fn scrape_page(&self, page_num: u32) -> Result<Vec<ReviewRecord>> {
        let doc = fetch_page(&self.fetcher, &self.config, page_num).await?;
        extract(&doc)
    }
}

/// The line logged for a page that was skipped, followed by the error that caused it.
pub fn page_failure_notice(page_num: u32, err: &Error) -> String {
    format!("Failed to scrape page {page_num}\n{err}")
}

/// Downloads the review's image, or the placeholder if it has none, to `<dir>/<id>.jpg`.
/// Returns the path written.
pub async fn save_review_image<F: Fetch + ?Sized>(
    fetcher: &F,
    review: &ReviewRecord,
    dst_dir: &Path,
    placeholder_img_url: &str,
) -> Result<PathBuf> {
    let url = if review.image_reference.is_empty() {
        placeholder_img_url
    } else {
        review.image_reference.as_str()
    };
    let bytes = fetcher.get(url).await?;
    let img_path = dst_dir.join(format!("{}.jpg", review.id));
    tokio::fs::write(&img_path, bytes).await?;
    Ok(img_path)
}

/// Every id in `1..=n_reviews` that none of the reviews carry.
pub fn missing_ids(reviews: &[ReviewRecord], n_reviews: u32) -> Vec<u64> {
    let found = reviews.iter().map(|r| r.id).collect::<HashSet<_>>();
    (1..=u64::from(n_reviews)).filter(|id| !found.contains(id)).collect()
}

/// Serializes the stats with a 4 space indent.
pub fn stats_to_json(stats: &CrawlStats) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    stats.serialize(&mut ser)?;
    Ok(buf)
}

async fn write_stats(stats: &CrawlStats, dst_dir: &Path) -> Result<PathBuf> {
    let path = dst_dir.join(STATS_FILE);
    tokio::fs::write(&path, stats_to_json(stats)?).await?;
    Ok(path)
}
