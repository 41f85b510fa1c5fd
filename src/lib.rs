//! RAMEN RATER SCRAPER
//! Crawls the review listing page by page, pulls `#<id>: <title>` reviews out of every
//! `<article>`, downloads their images and reports which review ids never showed up.

mod config;
mod error;
mod macros;
pub mod parse;
pub mod process;
pub mod request;

pub use config::CrawlConfig;
pub use error::{Error, Result};

const N_PAGES: u32 = 326;
const N_REVIEWS: u32 = 4792;
const PAGE_URL_TEMPLATE: &str = "https://www.theramenrater.com/page/{page}/";
const PLACEHOLDER_IMG_URL: &str = "https://media.istockphoto.com/id/1409329028/vector/no-picture-available-placeholder-thumbnail-icon-illustration-design.jpg?s=612x612&w=0&k=20&c=_zOuJu755g2eEUioiOUdz_mHKJQJn-tDgIAhQzyeKUQ=";
const RESULTS_DIR: &str = "results";
