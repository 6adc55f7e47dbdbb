use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Midnight UTC on `date`; content dates carry no time of day.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// RFC-822 date as RSS expects it, e.g. `Sun, 10 Mar 2024 00:00:00 +0000`.
pub fn rfc822(date: NaiveDate) -> String {
    start_of_day_utc(date).to_rfc2822()
}

/// ISO-8601 timestamp, e.g. `2024-03-10T00:00:00+00:00`.
pub fn iso8601(date: NaiveDate) -> String {
    start_of_day_utc(date).to_rfc3339()
}
