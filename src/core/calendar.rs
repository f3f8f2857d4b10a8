//! Date labels used across the report. Weekdays are Monday-first.

use chrono::{Datelike, Duration, NaiveDate};

pub const WEEKDAY_KANJI: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

pub fn weekday_kanji(date: NaiveDate) -> &'static str {
    WEEKDAY_KANJI[date.weekday().num_days_from_monday() as usize]
}

/// `10/6`, the token sources and seasonal records use for dates.
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// `10/6(火)`
pub fn short_date_with_weekday(date: NaiveDate) -> String {
    format!("{}/{}({})", date.month(), date.day(), weekday_kanji(date))
}

/// `2026年10月6日(火)`
pub fn full_date(date: NaiveDate) -> String {
    format!(
        "{}年{}月{}日({})",
        date.year(),
        date.month(),
        date.day(),
        weekday_kanji(date)
    )
}

/// The next Saturday/Sunday pair strictly after `today`.
pub fn next_weekend(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = today.weekday().num_days_from_monday() as i64;
    let mut days_to_saturday = (5 - weekday).rem_euclid(7);
    if days_to_saturday == 0 {
        days_to_saturday = 7;
    }
    let saturday = today + Duration::days(days_to_saturday);
    (saturday, saturday + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_short_date_has_no_padding() {
        assert_eq!(short_date(date(2026, 1, 5)), "1/5");
        assert_eq!(short_date(date(2026, 10, 16)), "10/16");
    }

    #[test]
    fn test_full_date_uses_kanji_weekday() {
        // 2026-10-16 is a Friday
        assert_eq!(full_date(date(2026, 10, 16)), "2026年10月16日(金)");
        assert_eq!(short_date_with_weekday(date(2026, 10, 19)), "10/19(月)");
    }

    #[test]
    fn test_next_weekend() {
        // Friday -> tomorrow
        assert_eq!(next_weekend(date(2026, 10, 16)).0, date(2026, 10, 17));
        // Saturday -> the following Saturday
        assert_eq!(next_weekend(date(2026, 10, 17)).0, date(2026, 10, 24));
        // Sunday -> six days later
        let (sat, sun) = next_weekend(date(2026, 10, 18));
        assert_eq!(sat, date(2026, 10, 24));
        assert_eq!(sun, date(2026, 10, 25));
    }
}
