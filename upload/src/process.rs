use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

use crate::client::{UploadSummary, Uploader};
use config::ImportConfig;
use convert::ConvertedLink;
use utils::json::read_json;

/// Import the converted links listed in `config.input`.
///
/// Nothing is uploaded unless the health probe passes. There is no
/// duplicate check, running twice creates every link twice.
pub async fn process(config: &ImportConfig, test: bool) -> Result<UploadSummary> {
    let links: Vec<ConvertedLink> = read_json(&config.input)?;
    println!("Found {} links to import", links.len());
    info!(
        input = ?config.input,
        endpoint = %config.endpoint,
        workers = config.workers,
        test = test,
        total = links.len(),
        "start import"
    );

    let uploader = Uploader::new(
        &config.endpoint,
        config.workers,
        config.timeout_secs.map(Duration::from_secs),
    )?;
    uploader.health_check().await?;

    if test {
        for link in &links {
            info!(url = %link.url, path = ?link.path, "[Test] skip upload of {}", link.name);
        }
        return Ok(UploadSummary::new(links.len()));
    }

    let progress = if config.progress {
        let bar = ProgressBar::new(links.len() as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "Importing links {spinner} [{bar:30}] {pos}/{len} {per_sec} ({eta})",
            )?
            .progress_chars("=>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };
    let summary = uploader.upload_all(links, &progress).await;
    progress.finish_and_clear();

    println!();
    println!("{}", summary);
    info!(
        successful = summary.successful,
        failed = summary.failed,
        "finished import"
    );
    Ok(summary)
}
