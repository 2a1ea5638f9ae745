use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Asia::Shanghai;
use log::info;

use crate::clients::dongqiudi_client::PageFetcher;
use crate::models::match_event::ResolvedMatch;
use crate::models::schedule::{ScheduleError, ScheduleErrorKind, ScheduleResult};
use crate::scrape::dates::infer_match_datetime;
use crate::scrape::extractor::extract_raw_matches;
use crate::service::ics_service;
use crate::service::schedule_cache::ScheduleCache;

/// Per-request pipeline: cache -> fetch -> extract -> resolve -> sort,
/// then ICS or preview rendering on top.
pub struct ScheduleService {
    fetcher: Arc<dyn PageFetcher>,
    cache: ScheduleCache,
}

impl ScheduleService {
    pub fn new(fetcher: Arc<dyn PageFetcher>, cache_ttl: Duration) -> Self {
        Self {
            fetcher,
            cache: ScheduleCache::new(cache_ttl),
        }
    }

    /// A team's resolved schedule, ascending by kickoff time. Served from
    /// cache within the TTL window; fetch failures propagate and are not
    /// cached.
    pub async fn team_schedule(
        &self,
        team_id: &str,
        team_name: &str,
        now: DateTime<Utc>,
    ) -> ScheduleResult {
        self.cache
            .get_or_fetch(team_id, team_name, now, || {
                self.fetch_and_parse(team_id, team_name, now)
            })
            .await
    }

    async fn fetch_and_parse(
        &self,
        team_id: &str,
        team_name: &str,
        now: DateTime<Utc>,
    ) -> ScheduleResult {
        let page = self.fetcher.fetch_schedule_page(team_id).await?;
        let local_now = now.with_timezone(&Shanghai).naive_local();
        let mut matches: Vec<ResolvedMatch> = extract_raw_matches(&page)
            .into_iter()
            .filter_map(|raw| {
                let start = infer_match_datetime(&raw.raw_date, local_now)?;
                Some(ResolvedMatch::new(raw.team_a, raw.team_b, start))
            })
            .collect();
        // Document order is not chronological; kickoff time decides.
        matches.sort_by_key(|m| m.start);
        info!("[{}] parsed {} matches from schedule page", team_name, matches.len());
        Ok(matches)
    }

    /// Full ICS document for a team: the real schedule, a placeholder
    /// event when the schedule is empty, or a degraded fallback document
    /// embedding the failure reason when fetching failed and the caller
    /// permits it.
    pub async fn team_calendar(
        &self,
        team_id: &str,
        team_name: &str,
        allow_fallback: bool,
        now: DateTime<Utc>,
    ) -> Result<String, ScheduleError> {
        match self.team_schedule(team_id, team_name, now).await {
            Ok(matches) => Ok(ics_service::build_calendar(team_id, team_name, &matches, now)),
            Err(err) if allow_fallback => {
                let reason = if err.message.is_empty() {
                    ScheduleErrorKind::UpstreamUnavailable.message().to_string()
                } else {
                    err.message
                };
                Ok(ics_service::build_fallback_calendar(
                    team_id, team_name, &reason, now,
                ))
            }
            Err(err) => Err(err),
        }
    }
}
