use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Resolve a year-less "MM-DD HH:MM" fixture date against a reference
/// time.
///
/// The year is inferred with a season-crossing heuristic: a reference
/// early in the year paired with a late-year fixture month belongs to the
/// previous season's tail, and a late-year reference paired with an
/// early fixture month rolls into the upcoming season. Best-effort
/// disambiguation only, since the source field carries no year.
///
/// Any deviation from the pattern, or an out-of-range field, yields
/// `None`; callers drop that record rather than failing the batch.
pub fn infer_match_datetime(raw_date: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let (date_part, time_part) = raw_date.split_once(' ')?;
    let (month, day) = split_pair(date_part, '-')?;
    let (hour, minute) = split_pair(time_part, ':')?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || hour > 23 || minute > 59 {
        return None;
    }

    let mut year = now.year();
    if now.month() <= 2 && month >= 10 {
        year -= 1;
    } else if now.month() >= 10 && month <= 2 {
        year += 1;
    }
    // Days invalid for the inferred year (02-30 and friends) fall out here.
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

fn split_pair(text: &str, sep: char) -> Option<(u32, u32)> {
    let (first, second) = text.split_once(sep)?;
    Some((first.parse().ok()?, second.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn plain_dates_use_the_reference_year() {
        let resolved = infer_match_datetime("06-15 18:00", at(2026, 3, 1)).unwrap();
        assert_eq!(resolved, at(2026, 6, 15).date().and_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn late_reference_rolls_early_fixture_into_next_year() {
        let resolved = infer_match_datetime("02-16 04:00", at(2025, 12, 20)).unwrap();
        assert_eq!(resolved.year(), 2026);
        assert_eq!((resolved.month(), resolved.day()), (2, 16));
    }

    #[test]
    fn early_reference_rolls_late_fixture_into_previous_year() {
        let resolved = infer_match_datetime("11-30 20:00", at(2026, 1, 10)).unwrap();
        assert_eq!(resolved.year(), 2025);
    }

    #[test]
    fn garbage_yields_none() {
        let now = at(2026, 3, 1);
        for raw in ["abc", "13-40 99:99", "", "06-15", "06-15 18", "06/15 18:00", "0a-15 18:00"] {
            assert_eq!(infer_match_datetime(raw, now), None, "{:?}", raw);
        }
    }

    #[test]
    fn day_invalid_for_month_yields_none() {
        assert_eq!(infer_match_datetime("02-30 12:00", at(2026, 3, 1)), None);
    }
}
