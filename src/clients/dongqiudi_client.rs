use std::time::Duration;

use async_trait::async_trait;
use log::{error, info, warn};

use crate::models::schedule::{ScheduleError, ScheduleErrorKind};

const SCHEDULE_URL_BASE: &str = "https://www.dongqiudi.com/team";

// The upstream serves degraded markup to clients it does not recognize.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Transport seam for the schedule page, so orchestration and tests can
/// substitute a scripted source.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_schedule_page(&self, team_id: &str) -> Result<String, ScheduleError>;
}

pub struct DongqiudiClient {
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
}

impl DongqiudiClient {
    pub fn new(timeout: Duration, max_retries: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
            max_retries: max_retries.max(1),
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, ScheduleError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", BROWSER_USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify_transport_error)?
            .error_for_status()
            .map_err(classify_transport_error)?;
        // Decode from raw bytes: the upstream reliably serves UTF-8 but
        // sometimes declares another charset in its headers.
        let body = response.bytes().await.map_err(classify_transport_error)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl PageFetcher for DongqiudiClient {
    async fn fetch_schedule_page(&self, team_id: &str) -> Result<String, ScheduleError> {
        let url = format!("{}/{}.html", SCHEDULE_URL_BASE, team_id);
        let mut last_error = None;
        for attempt in 1..=self.max_retries {
            info!(
                "[{}] fetching schedule page (attempt {}/{})",
                team_id, attempt, self.max_retries
            );
            match self.fetch_once(&url).await {
                Ok(body) => return Ok(body),
                Err(err) => {
                    warn!(
                        "[{}] fetch failed: {} (attempt {}/{})",
                        team_id, err, attempt, self.max_retries
                    );
                    last_error = Some(err);
                }
            }
        }
        let err =
            last_error.unwrap_or_else(|| ScheduleError::from_kind(ScheduleErrorKind::UnexpectedError));
        error!("[{}] giving up after {} attempts: {}", team_id, self.max_retries, err);
        Err(err)
    }
}

/// Map a transport failure onto the fixed error taxonomy. Name-resolution
/// failures are recognized by substring, the transport library does not
/// expose them as a distinct kind.
fn classify_transport_error(err: reqwest::Error) -> ScheduleError {
    if err.is_timeout() {
        return ScheduleError::from_kind(ScheduleErrorKind::Timeout);
    }
    let detail = format!("{:?}", err);
    if detail.contains("dns error") || detail.contains("failed to lookup address") {
        return ScheduleError::from_kind(ScheduleErrorKind::DnsResolutionFailed);
    }
    ScheduleError::from_kind(ScheduleErrorKind::NetworkError)
}
