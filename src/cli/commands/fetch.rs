//! Fetch command: run the asset-listing controller against a URL.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::AssetsController;

/// Fetch an asset listing once and display it.
///
/// Mirrors the index page controller: a spinner while the view is
/// loading, the records on success, a styled error line on failure.
pub async fn cmd_fetch(url: &str) -> anyhow::Result<()> {
    // Reject obviously malformed URLs before issuing the request
    url::Url::parse(url).map_err(|e| anyhow::anyhow!("Invalid URL '{}': {}", url, e))?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static template is valid"),
    );
    spinner.set_message(format!("Loading assets from {}", url));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut controller = AssetsController::new(url);
    controller.load_assets().await;
    spinner.finish_and_clear();

    if controller.view.error {
        eprintln!(
            "{} Failed to load assets from {}",
            style("✗").red(),
            controller.assets_url()
        );
        anyhow::bail!("request failed");
    }

    if controller.view.assets.is_empty() {
        println!("No assets in listing");
        return Ok(());
    }

    for record in &controller.view.assets {
        println!("{}", render_record(record));
    }
    println!("{} asset(s)", controller.view.assets.len());

    Ok(())
}

/// Render one opaque asset record for the terminal.
///
/// Records are displayed, not interpreted: well-known fields are picked
/// out when present, anything else falls back to compact JSON.
fn render_record(record: &serde_json::Value) -> String {
    let name = record.get("name").and_then(|v| v.as_str());
    match name {
        Some(name) => {
            let code = record.get("code").and_then(|v| v.as_str()).unwrap_or("-");
            let status = record.get("status").and_then(|v| v.as_str()).unwrap_or("");
            format!("{:<10} {:<24} {}", code, name, status)
        }
        None => record.to_string(),
    }
}
