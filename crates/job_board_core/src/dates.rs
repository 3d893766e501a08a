use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Literal the feed uses when it has no posting date.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Parses a posting date. Date-only and naive values are taken as UTC.
pub fn parse_posted(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Sort key for a posting date; missing or unparseable dates become the epoch.
pub fn posted_instant(date_posted: Option<&str>) -> DateTime<Utc> {
    date_posted
        .and_then(parse_posted)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Whole days between the posting and `now`, counting from the epoch when
/// the date is unknown. Negative for future dates.
pub fn days_since_posted(date_posted: Option<&str>, now: DateTime<Utc>) -> i64 {
    (now - posted_instant(date_posted)).num_days()
}

/// Human label for a posting date.
pub fn format_posted(date_posted: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = date_posted.filter(|raw| *raw != UNKNOWN_DATE) else {
        return "Recently posted".to_string();
    };
    let Some(posted) = parse_posted(raw) else {
        return "Recently posted".to_string();
    };
    // Future dates clamp to today.
    match (now - posted).num_days().max(0) {
        0 => "Posted today".to_string(),
        1 => "Posted yesterday".to_string(),
        days => format!("Posted {days}d ago"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn accepts_date_only_naive_and_rfc3339() {
        assert_eq!(
            parse_posted("2024-06-01"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_posted("2024-06-01T08:30:00"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap())
        );
        assert_eq!(
            parse_posted("2024-06-01T08:30:00+02:00"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 6, 30, 0).unwrap())
        );
        assert_eq!(parse_posted("last week"), None);
    }

    #[test]
    fn labels_follow_day_difference() {
        let now = noon(2024, 6, 10);
        assert_eq!(format_posted(Some("2024-06-10"), now), "Posted today");
        assert_eq!(format_posted(Some("2024-06-09"), now), "Posted yesterday");
        assert_eq!(format_posted(Some("2024-06-01"), now), "Posted 9d ago");
    }

    #[test]
    fn unknown_missing_and_garbage_are_recently_posted() {
        let now = noon(2024, 6, 10);
        assert_eq!(format_posted(None, now), "Recently posted");
        assert_eq!(format_posted(Some("Unknown"), now), "Recently posted");
        assert_eq!(format_posted(Some("soon"), now), "Recently posted");
    }

    #[test]
    fn future_dates_clamp_to_today() {
        let now = noon(2024, 6, 10);
        assert_eq!(format_posted(Some("2024-07-01"), now), "Posted today");
    }

    #[test]
    fn missing_date_counts_from_epoch() {
        let now = noon(2024, 6, 10);
        assert_eq!(days_since_posted(None, now), 19_884);
        assert_eq!(posted_instant(Some("Unknown")), DateTime::<Utc>::UNIX_EPOCH);
    }
}
