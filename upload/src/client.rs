use futures::future::join_all;
use indicatif::ProgressBar;
use reqwest::{Client, StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, debug_span, error, warn};
use tracing_futures::Instrument;

use crate::error::UploadError;
use convert::ConvertedLink;

/// Aggregate outcome of an upload run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl UploadSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn attempted(&self) -> usize {
        self.successful + self.failed
    }
}

impl std::fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Import completed:")?;
        writeln!(f, "- Successfully imported: {}", self.successful)?;
        write!(f, "- Failed to import: {}", self.failed)
    }
}

#[derive(Debug, Clone)]
pub struct Uploader {
    client: Client,
    health_url: Url,
    links_url: Url,
    workers: usize,
}

impl Uploader {
    /// `endpoint` is the service root, e.g. `https://links.example.com`.
    pub fn new(
        endpoint: &str,
        workers: usize,
        timeout: Option<Duration>,
    ) -> Result<Self, UploadError> {
        let invalid = |reason: String| UploadError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason,
        };
        let mut base = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", base.scheme())));
        }
        // join() replaces the last segment unless the base ends with a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let health_url = base
            .join("api/health")
            .map_err(|e| invalid(e.to_string()))?;
        let links_url = base.join("api/links").map_err(|e| invalid(e.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            health_url,
            links_url,
            workers: workers.max(1),
        })
    }

    /// Probe `/api/health`, anything but 200 means the service is unavailable.
    pub async fn health_check(&self) -> Result<(), UploadError> {
        let unavailable = |cause: String| UploadError::ServiceUnavailable {
            url: self.health_url.to_string(),
            cause,
        };
        let response = self
            .client
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        match response.status() {
            StatusCode::OK => {
                debug!(url = %self.health_url, "service is healthy");
                Ok(())
            }
            status => Err(unavailable(format!("status {}", status))),
        }
    }

    /// Create one link, only `201 Created` counts as success.
    pub async fn add_link(&self, link: &ConvertedLink) -> Result<(), UploadError> {
        let response = self
            .client
            .post(self.links_url.clone())
            .json(link)
            .send()
            .await?;
        match response.status() {
            StatusCode::CREATED => Ok(()),
            status => Err(UploadError::Rejected(status)),
        }
    }

    /// Post every link once, with at most `workers` requests in flight.
    ///
    /// Failures are logged and counted, they never stop the batch.
    pub async fn upload_all(
        &self,
        links: Vec<ConvertedLink>,
        progress: &ProgressBar,
    ) -> UploadSummary {
        let mut summary = UploadSummary::new(links.len());
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let uploader = Arc::new(self.clone());

        let mut tasks = Vec::with_capacity(links.len());
        for link in links {
            let semaphore = Arc::clone(&semaphore);
            let uploader = Arc::clone(&uploader);
            let progress = progress.clone();
            let span = debug_span!("add_link", name = %link.name);

            tasks.push(tokio::spawn(
                async move {
                    let Ok(_permit) = semaphore.acquire().await else {
                        return false;
                    };
                    let result = uploader.add_link(&link).await;
                    match &result {
                        Ok(()) => debug!(url = %link.url, "link created"),
                        Err(e) => progress.suspend(|| {
                            warn!("Failed to add {}: {}", link.name, e);
                        }),
                    }
                    progress.inc(1);
                    result.is_ok()
                }
                .instrument(span),
            ));
        }

        for outcome in join_all(tasks).await {
            match outcome {
                Ok(true) => summary.successful += 1,
                Ok(false) => summary.failed += 1,
                Err(e) => {
                    error!(error = %e, "upload task aborted");
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}
