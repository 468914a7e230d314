//! Generate the sidebar index from the OpenAPI specs
//!
//! Usage: cargo run --bin generate_index
//!
//! Reads every `*.yaml`/`*.yml` file in the specs directory and writes the
//! sorted index. Exits non-zero only if the index cannot be written.

use anyhow::{Context, Result};
use tracing::info;

use api_portal::config::SiteLayout;
use api_portal::indexer;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_portal=info,generate_index=info".into()),
        )
        .with_target(false)
        .init();

    // Only the paths matter here; server settings such as the port are ignored
    let layout = SiteLayout::from_env();

    let report = indexer::run(&layout.specs_dir, &layout.index_path)
        .context("Failed to generate sidebar index")?;

    for skipped in &report.skipped {
        info!(file = %skipped.file, reason = %skipped.error, "Not indexed");
    }
    info!("Done!");
    Ok(())
}
