use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use footballCal::scrape::dates::infer_match_datetime;

fn reference(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn late_year_reference_pushes_early_fixture_into_next_year() {
    let resolved = infer_match_datetime("02-16 04:00", reference(2025, 12, 20)).unwrap();
    assert_eq!(
        (resolved.year(), resolved.month(), resolved.day()),
        (2026, 2, 16)
    );
    assert_eq!((resolved.hour(), resolved.minute()), (4, 0));
}

#[test]
fn early_year_reference_pulls_late_fixture_into_previous_year() {
    let resolved = infer_match_datetime("11-30 20:00", reference(2026, 1, 10)).unwrap();
    assert_eq!(
        (resolved.year(), resolved.month(), resolved.day()),
        (2025, 11, 30)
    );
}

#[test]
fn mid_season_fixture_keeps_the_reference_year() {
    let resolved = infer_match_datetime("06-15 18:00", reference(2026, 3, 1)).unwrap();
    assert_eq!(resolved.year(), 2026);
}

#[test]
fn shift_needs_both_months_past_their_thresholds() {
    // Reference in March is past the early-year window; no backward shift.
    let resolved = infer_match_datetime("10-05 15:00", reference(2026, 3, 1)).unwrap();
    assert_eq!(resolved.year(), 2026);

    // Fixture in September is not an early-year month; no forward shift.
    let resolved = infer_match_datetime("09-28 19:00", reference(2026, 11, 15)).unwrap();
    assert_eq!(resolved.year(), 2026);
}

#[test]
fn february_reference_still_counts_as_early_year() {
    let resolved = infer_match_datetime("10-05 15:00", reference(2026, 2, 28)).unwrap();
    assert_eq!(resolved.year(), 2025);
}

#[test]
fn malformed_inputs_resolve_to_none() {
    let now = reference(2026, 3, 1);
    assert_eq!(infer_match_datetime("abc", now), None);
    assert_eq!(infer_match_datetime("13-40 99:99", now), None);
    assert_eq!(infer_match_datetime("06-15 24:00", now), None);
    assert_eq!(infer_match_datetime("06-15 18:60", now), None);
}
