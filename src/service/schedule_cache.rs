use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::models::match_event::ResolvedMatch;
use crate::models::schedule::ScheduleResult;

pub type CacheKey = (String, String);

struct CacheEntry {
    matches: Vec<ResolvedMatch>,
    expires_at: DateTime<Utc>,
}

/// Bounded-lifetime memo of resolved schedules, keyed by
/// `(team_id, team_name)`. An expired entry is treated as a miss and
/// overwritten by the next successful fetch; nothing sweeps in the
/// background, and nothing survives a restart.
pub struct ScheduleCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl ScheduleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Serve from cache, or run `fetch_fn` and memoize its result.
    /// Failures are never stored, so a later request retries immediately.
    /// The lock is not held across the fetch; two requests racing on the
    /// same expired key may both fetch, and the last write wins.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        team_id: &str,
        team_name: &str,
        now: DateTime<Utc>,
        fetch_fn: F,
    ) -> ScheduleResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ScheduleResult>,
    {
        let key = (team_id.to_string(), team_name.to_string());
        if let Some(matches) = self.lookup(&key, now).await {
            return Ok(matches);
        }
        let matches = fetch_fn().await?;
        self.store(key, matches.clone(), now).await;
        Ok(matches)
    }

    async fn lookup(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<Vec<ResolvedMatch>> {
        let entries = self.entries.lock().await;
        let entry = entries.get(key)?;
        if entry.expires_at > now {
            Some(entry.matches.clone())
        } else {
            None
        }
    }

    async fn store(&self, key: CacheKey, matches: Vec<ResolvedMatch>, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key,
            CacheEntry {
                matches,
                expires_at: now + self.ttl,
            },
        );
    }
}
