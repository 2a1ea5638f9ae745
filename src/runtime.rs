use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use log::{error, info, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::models::schedule::ScheduleError;
use crate::service::schedule_service::ScheduleService;

// Keep the characters urllib-style quoting leaves alone, so existing
// subscription URLs resolve to the same filename.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug, Deserialize)]
struct CalendarQuery {
    team_id: Option<String>,
    #[serde(default = "default_team_name")]
    team_name: String,
    #[serde(default)]
    download: u8,
    #[serde(default = "default_allow_fallback")]
    allow_fallback: u8,
}

#[derive(Debug, Deserialize)]
struct PreviewQuery {
    team_id: Option<String>,
    #[serde(default = "default_team_name")]
    team_name: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_team_name() -> String {
    "球队".to_string()
}

fn default_allow_fallback() -> u8 {
    1
}

fn default_limit() -> usize {
    5
}

#[derive(Serialize)]
struct PreviewMatch {
    summary: String,
    date: String,
    start_iso: String,
}

#[derive(Serialize)]
struct PreviewResponse {
    team_id: String,
    team_name: String,
    matches: Vec<PreviewMatch>,
}

pub async fn run_api(service: Arc<ScheduleService>, bind_addr: SocketAddr) {
    let service_filter = warp::any().map(move || service.clone());

    let calendar = warp::path!("api" / "calendar")
        .and(warp::get())
        .and(warp::query::<CalendarQuery>())
        .and(service_filter.clone())
        .and_then(handle_calendar);

    let preview = warp::path!("api" / "preview")
        .and(warp::get())
        .and(warp::query::<PreviewQuery>())
        .and(service_filter.clone())
        .and_then(handle_preview);

    let api_health = warp::path!("api" / "health").and(warp::get()).map(health_reply);
    let health = warp::path!("health").and(warp::get()).map(health_reply);
    let root = warp::path::end().and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "message": "Football Calendar API - Use /api/calendar endpoint"
        }))
    });

    // The preview frontend is served from another origin.
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "OPTIONS"]);

    let routes = calendar
        .or(preview)
        .or(api_health)
        .or(health)
        .or(root)
        .with(cors);

    info!("serving calendar API on {}", bind_addr);
    warp::serve(routes).run(bind_addr).await;
}

async fn handle_calendar(
    query: CalendarQuery,
    service: Arc<ScheduleService>,
) -> Result<Box<dyn Reply>, Rejection> {
    let Some(team_id) = query.team_id.filter(|id| !id.is_empty()) else {
        warn!("calendar request missing team_id");
        return Ok(bad_request());
    };
    info!(
        "calendar request: team_id={}, team_name={}",
        team_id, query.team_name
    );

    match service
        .team_calendar(&team_id, &query.team_name, query.allow_fallback == 1, Utc::now())
        .await
    {
        Ok(ics) => {
            let disposition = if query.download == 1 { "attachment" } else { "inline" };
            let filename =
                utf8_percent_encode(&format!("{}.ics", query.team_name), FILENAME_ENCODE_SET)
                    .to_string();
            let reply =
                warp::reply::with_header(ics, "Content-Type", "text/calendar; charset=utf-8");
            let reply = warp::reply::with_header(
                reply,
                "Content-Disposition",
                format!("{}; filename=\"{}\"", disposition, filename),
            );
            // Feeds must always be revalidated; clients poll for changes.
            let reply = warp::reply::with_header(
                reply,
                "Cache-Control",
                "no-cache, no-store, must-revalidate",
            );
            let reply = warp::reply::with_header(reply, "Pragma", "no-cache");
            let reply = warp::reply::with_header(reply, "Expires", "0");
            Ok(Box::new(reply))
        }
        Err(err) => {
            error!("calendar generation failed: team_id={}, {}", team_id, err);
            Ok(fetch_failed(&err))
        }
    }
}

async fn handle_preview(
    query: PreviewQuery,
    service: Arc<ScheduleService>,
) -> Result<Box<dyn Reply>, Rejection> {
    let Some(team_id) = query.team_id.filter(|id| !id.is_empty()) else {
        warn!("preview request missing team_id");
        return Ok(bad_request());
    };
    let limit = query.limit.clamp(1, 20);

    match service
        .team_schedule(&team_id, &query.team_name, Utc::now())
        .await
    {
        Ok(matches) => {
            let preview: Vec<PreviewMatch> = matches
                .iter()
                .take(limit)
                .map(|m| PreviewMatch {
                    summary: m.summary.clone(),
                    date: m.start.format("%m-%d %H:%M").to_string(),
                    start_iso: m.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
                })
                .collect();
            Ok(Box::new(warp::reply::json(&PreviewResponse {
                team_id,
                team_name: query.team_name,
                matches: preview,
            })))
        }
        Err(err) => {
            error!("preview failed: team_id={}, {}", team_id, err);
            Ok(fetch_failed(&err))
        }
    }
}

fn health_reply() -> impl Reply {
    warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

fn bad_request() -> Box<dyn Reply> {
    let body = serde_json::json!({
        "error": "BAD_REQUEST",
        "message": "Missing team_id parameter",
    });
    Box::new(warp::reply::with_status(
        warp::reply::json(&body),
        StatusCode::BAD_REQUEST,
    ))
}

fn fetch_failed(err: &ScheduleError) -> Box<dyn Reply> {
    let body = serde_json::json!({
        "error": "FETCH_FAILED",
        "error_code": err.kind.code(),
        "message": err.message,
    });
    Box::new(warp::reply::with_status(
        warp::reply::json(&body),
        StatusCode::INTERNAL_SERVER_ERROR,
    ))
}
