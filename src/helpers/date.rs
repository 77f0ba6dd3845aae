//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Date as shown on cards and post headers (like "August 7, 2021")
pub fn display_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Date in ISO 8601 form, for `<time datetime>` and feeds
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_display_date() {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2021, 8, 7, 10, 30, 0)
            .unwrap();
        assert_eq!(display_date(&date), "August 7, 2021");
    }

    #[test]
    fn test_date_xml() {
        let date = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .unwrap();
        assert_eq!(date_xml(&date), "2024-01-15T10:30:00+02:00");
    }
}
