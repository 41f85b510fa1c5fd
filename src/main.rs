use chrono::Local;
use ramen::{info_time, process::Crawler, request::HttpFetcher, CrawlConfig, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    Crawler::new(HttpFetcher::new(), CrawlConfig::default())
        .run()
        .await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
