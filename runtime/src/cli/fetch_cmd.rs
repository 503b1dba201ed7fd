//! `announce-feed fetch <category>`: run the pipeline once and print the feed.

use crate::cli::output;
use crate::config::FeedConfig;
use crate::service::AnnouncementService;
use anyhow::Result;

/// Run the fetch command.
pub async fn run(category: &str, config: FeedConfig, limit: Option<usize>) -> Result<()> {
    let service = AnnouncementService::new(config);
    let result = service.fetch(category).await;

    if let Err(e) = service.shutdown().await {
        tracing::warn!("browser shutdown failed: {e:#}");
    }

    let mut feed = result?;
    if let Some(n) = limit {
        feed.items.truncate(n);
    }

    if output::is_json() {
        output::print_json(&serde_json::to_value(&feed)?);
        return Ok(());
    }

    println!("{}", feed.title);
    println!("{}", feed.link);
    println!();
    for item in &feed.items {
        let date = item
            .pub_date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "----------------".to_string());
        println!("  {date}  {}", item.title);
        if !output::is_quiet() {
            println!("                    {}", item.link);
        }
    }
    if feed.items.is_empty() {
        println!("  (no announcements)");
    }
    Ok(())
}
