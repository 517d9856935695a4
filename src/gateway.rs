//! Delivery of the encoded gauges to a Prometheus Pushgateway.

use reqwest::{
    header::CONTENT_TYPE,
    Client as HttpClient,
    StatusCode,
};
use std::{
    future::Future,
    pin::Pin,
    time::Duration,
};
use url::Url;

#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    #[error("request to the Pushgateway failed")]
    Http(#[from] reqwest::Error),
    #[error("the Pushgateway answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("{0} cannot be used as a Pushgateway URL")]
    InvalidUrl(Url),
}

/// Receives one complete batch of metrics per cycle.
pub trait MetricsSink {
    /// Replace everything stored under `job` with `body` (text exposition format).
    fn push<'a>(
        &'a self,
        job: &'a str,
        body: String,
    ) -> Pin<Box<dyn Future<Output = Result<(), GatewayError>> + Send + 'a>>;
}

#[derive(Debug, Clone)]
pub struct Pushgateway {
    http_client: HttpClient,
    base_url: Url,
}

impl Pushgateway {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, GatewayError> {
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(base_url));
        }
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http_client, base_url })
    }

    /// `{base}/metrics/job/{job}`, the grouping key the whole batch is stored under.
    pub fn job_url(&self, job: &str) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["metrics", "job", job]);
        Ok(url)
    }
}

impl MetricsSink for Pushgateway {
    fn push<'a>(
        &'a self,
        job: &'a str,
        body: String,
    ) -> Pin<Box<dyn Future<Output = Result<(), GatewayError>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.job_url(job)?;
            let bytes = body.len();

            // PUT replaces all metrics of the group, POST would only merge by name.
            let response = self
                .http_client
                .put(url.clone())
                .header(CONTENT_TYPE, prometheus::TEXT_FORMAT)
                .body(body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(GatewayError::Status { status, body });
            }

            debug!(%url, bytes, "pushed metrics");
            Ok(())
        })
    }
}
