use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use chrono_tz::Asia::Shanghai;
use log::warn;
use md5::{Digest, Md5};

use crate::models::match_event::ResolvedMatch;

const CALENDAR_TIMEZONE: &str = "Asia/Shanghai";

/// Escape a value for an ICS text field. Backslash first, so the
/// substitutions that follow never double-escape their own output.
pub fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

/// Stable event identifier: a digest over the resolved start time and
/// both team names. Re-generating the feed for an unchanged fixture
/// reproduces the same UID, so clients update events in place; changing
/// the kickoff or either name yields a new UID, which is how reschedules
/// propagate.
pub fn match_uid(m: &ResolvedMatch) -> String {
    let seed = format!(
        "{}-{}-{}",
        m.start.format("%Y-%m-%dT%H:%M:%S"),
        m.team_a,
        m.team_b
    );
    let digest = Md5::digest(seed.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("match-{}@football-cal", hex)
}

/// Render a team's schedule as a complete VCALENDAR document. An empty
/// schedule still gets one placeholder event; a zero-event subscription
/// is rejected as invalid by at least one major mobile client.
pub fn build_calendar(
    team_id: &str,
    team_name: &str,
    matches: &[ResolvedMatch],
    now_utc: DateTime<Utc>,
) -> String {
    let mut lines = calendar_header(team_name, "自动同步改期、延期");
    let dt_stamp = format_stamp(now_utc);

    if matches.is_empty() {
        warn!("[{}] no schedule data, emitting placeholder event", team_name);
        let local_now = now_utc.with_timezone(&Shanghai).naive_local();
        lines.extend([
            "BEGIN:VEVENT".to_string(),
            format!("UID:placeholder-{}@football-cal", team_id),
            format!("DTSTAMP:{}", dt_stamp),
            format!(
                "DTSTART;TZID={}:{}",
                CALENDAR_TIMEZONE,
                format_local(local_now)
            ),
            format!(
                "DTEND;TZID={}:{}",
                CALENDAR_TIMEZONE,
                format_local(local_now + Duration::hours(1))
            ),
            "SUMMARY:【系统消息】赛程待更新".to_string(),
            format!(
                "DESCRIPTION:{}",
                escape_text("目前数据源中暂无该球队最新赛程数据。")
            ),
            "END:VEVENT".to_string(),
        ]);
    } else {
        for m in matches {
            lines.extend([
                "BEGIN:VEVENT".to_string(),
                format!("UID:{}", match_uid(m)),
                format!("DTSTAMP:{}", dt_stamp),
                format!("DTSTART;TZID={}:{}", CALENDAR_TIMEZONE, format_local(m.start)),
                format!(
                    "DTEND;TZID={}:{}",
                    CALENDAR_TIMEZONE,
                    format_local(m.start + Duration::hours(2))
                ),
                format!("SUMMARY:{}", escape_text(&m.summary)),
                format!(
                    "DESCRIPTION:{}",
                    escape_text(&format!("数据源: 懂球帝 | 球队: {}", team_name))
                ),
                "STATUS:CONFIRMED".to_string(),
                "END:VEVENT".to_string(),
            ]);
        }
    }

    lines.push("END:VCALENDAR".to_string());
    join_crlf(lines)
}

/// A valid single-event document for when scraping failed outright.
/// Subscriptions keep resolving and show a sync-in-progress entry until
/// the next successful poll, instead of breaking on an HTTP error.
pub fn build_fallback_calendar(
    team_id: &str,
    team_name: &str,
    reason: &str,
    now_utc: DateTime<Utc>,
) -> String {
    let local_now = now_utc.with_timezone(&Shanghai).naive_local();
    let mut lines = calendar_header(team_name, "抓取失败时自动降级，稍后会继续同步");
    lines.extend([
        "BEGIN:VEVENT".to_string(),
        format!("UID:fallback-{}@football-cal", team_id),
        format!("DTSTAMP:{}", format_stamp(now_utc)),
        format!(
            "DTSTART;TZID={}:{}",
            CALENDAR_TIMEZONE,
            format_local(local_now)
        ),
        format!(
            "DTEND;TZID={}:{}",
            CALENDAR_TIMEZONE,
            format_local(local_now + Duration::hours(1))
        ),
        "SUMMARY:【系统消息】赛程同步中".to_string(),
        format!(
            "DESCRIPTION:{}",
            escape_text(&format!("当前抓取失败原因: {}。系统将继续自动重试。", reason))
        ),
        "STATUS:CONFIRMED".to_string(),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ]);
    join_crlf(lines)
}

fn calendar_header(team_name: &str, caldesc: &str) -> Vec<String> {
    vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:-//OpenSource//FootballCalendar//{}//CN", team_name),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:{}赛程", team_name),
        format!("X-WR-TIMEZONE:{}", CALENDAR_TIMEZONE),
        format!("X-WR-CALDESC:{}", caldesc),
        "BEGIN:VTIMEZONE".to_string(),
        format!("TZID:{}", CALENDAR_TIMEZONE),
        // Fixed +08:00 offset, the zone has no daylight-saving rules.
        "BEGIN:STANDARD".to_string(),
        "TZOFFSETFROM:+0800".to_string(),
        "TZOFFSETTO:+0800".to_string(),
        "TZNAME:CST".to_string(),
        "DTSTART:19700101T000000".to_string(),
        "END:STANDARD".to_string(),
        "END:VTIMEZONE".to_string(),
    ]
}

fn format_local(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M00").to_string()
}

fn format_stamp(now_utc: DateTime<Utc>) -> String {
    now_utc.format("%Y%m%dT%H%M%SZ").to_string()
}

// Calendar clients reject documents without CRLF terminators; a bare
// linefeed here is a correctness bug, not a style choice.
fn join_crlf(lines: Vec<String>) -> String {
    lines.join("\r\n") + "\r\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture(team_a: &str, team_b: &str) -> ResolvedMatch {
        let start = NaiveDate::from_ymd_opt(2026, 8, 10)
            .unwrap()
            .and_hms_opt(19, 35, 0)
            .unwrap();
        ResolvedMatch::new(team_a.to_string(), team_b.to_string(), start)
    }

    #[test]
    fn escape_handles_backslash_before_the_rest() {
        assert_eq!(escape_text("a\\b"), "a\\\\b");
        assert_eq!(escape_text("a,b;c"), "a\\,b\\;c");
        assert_eq!(escape_text("a\nb"), "a\\nb");
        // A backslash-comma input must not have its escape re-escaped.
        assert_eq!(escape_text("\\,"), "\\\\\\,");
    }

    #[test]
    fn match_uid_is_stable_and_input_sensitive() {
        let a = fixture("申花", "泰山");
        assert_eq!(match_uid(&a), match_uid(&a.clone()));

        let b = fixture("申花", "国安");
        assert_ne!(match_uid(&a), match_uid(&b));
    }

    #[test]
    fn dtend_is_two_hours_after_dtstart() {
        let doc = build_calendar("50001234", "上海申花", &[fixture("申花", "泰山")], Utc::now());
        assert!(doc.contains("DTSTART;TZID=Asia/Shanghai:20260810T193500"));
        assert!(doc.contains("DTEND;TZID=Asia/Shanghai:20260810T213500"));
        assert!(doc.contains("STATUS:CONFIRMED"));
    }
}
