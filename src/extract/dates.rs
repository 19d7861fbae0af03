use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

/// Hour of day applied to any parsed calendar date.
const DEFAULT_HOUR: u32 = 17;

/// Formats carrying an explicit year, tried in order.
const YEAR_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
];

/// Formats without a year; the reference instant's year is spliced in.
const NO_YEAR_FORMATS: &[&str] = &["%d %B", "%B %d", "%d %b", "%b %d"];

/// Resolve a human date phrase ("31 October", "Friday", "Oct 25, 2025") to a
/// concrete instant. Total function: anything unparsable lands one week out
/// from the reference.
pub fn parse_date_phrase(input: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    try_parse_date_phrase(input, now).unwrap_or_else(|| now + Duration::days(7))
}

/// The parse ladder without the final fallback. `None` means nothing matched.
pub fn try_parse_date_phrase(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in YEAR_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(at_default_hour(date));
        }
    }

    // Yearless phrases take the year from the reference instant.
    for fmt in NO_YEAR_FORMATS {
        let candidate = format!("{} {}", trimmed, now.year());
        let fmt_with_year = format!("{} %Y", fmt);
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, &fmt_with_year) {
            return Some(at_default_hour(date));
        }
    }

    if let Some(weekday) = parse_weekday(trimmed) {
        return Some(at_default_hour(next_occurrence(weekday, now.date_naive())));
    }

    None
}

fn at_default_hour(date: NaiveDate) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0).unwrap();
    Utc.from_utc_datetime(&date.and_time(time))
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_ascii_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Next strictly-future occurrence; a phrase naming today's weekday resolves
/// one week out, which keeps the parser idempotent for a fixed reference.
fn next_occurrence(weekday: Weekday, today: NaiveDate) -> NaiveDate {
    let ahead = (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    today + Duration::days(i64::from(ahead))
}
