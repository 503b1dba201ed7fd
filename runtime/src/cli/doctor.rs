//! Environment readiness check.

use crate::acquisition::http_client::HttpClient;
use crate::acquisition::structured;
use crate::config::FeedConfig;
use crate::renderer::chromium::find_chromium;
use anyhow::Result;

/// Check Chromium availability and structured endpoint reachability.
pub async fn run(config: &FeedConfig) -> Result<()> {
    println!("announce-feed doctor");
    println!("====================");
    println!();

    println!("OS:   {}", std::env::consts::OS);
    println!("Arch: {}", std::env::consts::ARCH);
    println!();

    let chromium_path = find_chromium(config.chromium_path.as_deref());
    match &chromium_path {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!("[!!] Chromium NOT found. The rendered fallback will fail."),
    }

    let url = structured::query_url(&config.api_url)?;
    match HttpClient::new().get(&url, config.api_timeout).await {
        Ok(resp) if resp.is_success() => {
            println!("[OK] Structured endpoint answered HTTP {}", resp.status)
        }
        Ok(resp) => println!("[!!] Structured endpoint answered HTTP {}", resp.status),
        Err(e) if e.is_timeout() => println!(
            "[!!] Structured endpoint timed out after {}ms",
            config.api_timeout.as_millis()
        ),
        Err(e) => println!("[!!] Structured endpoint unreachable: {e}"),
    }

    println!();
    if chromium_path.is_some() {
        println!("Status: READY");
    } else {
        println!("Status: DEGRADED (structured path only)");
    }

    Ok(())
}
