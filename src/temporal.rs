use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use std::fmt;

/// Canonical English day of week used by timetable entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Sunday-first order, matching the index a JavaScript `Date` reports
    pub const SUNDAY_FIRST: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Monday-first order, used to lay out a week timetable
    pub const MONDAY_FIRST: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Parse a canonical day name. Only the exact English names are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Monday" => Some(Weekday::Monday),
            "Tuesday" => Some(Weekday::Tuesday),
            "Wednesday" => Some(Weekday::Wednesday),
            "Thursday" => Some(Weekday::Thursday),
            "Friday" => Some(Weekday::Friday),
            "Saturday" => Some(Weekday::Saturday),
            "Sunday" => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// 0 = Monday .. 6 = Sunday
    pub fn monday_first_index(&self) -> usize {
        self.num_days_from_monday() as usize
    }

    /// 0 = Sunday .. 6 = Saturday
    pub fn sunday_first_index(&self) -> usize {
        (self.num_days_from_monday() as usize + 1) % 7
    }

    /// The following day in Sunday-first order, wrapping Saturday to Sunday
    pub fn next_day(&self) -> Self {
        Self::SUNDAY_FIRST[(self.sunday_first_index() + 1) % 7]
    }

    fn num_days_from_monday(&self) -> u32 {
        chrono::Weekday::from(*self).num_days_from_monday()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of a day name in Monday-first order, `None` for unknown names
pub fn monday_first_index(day_name: &str) -> Option<usize> {
    Weekday::from_name(day_name).map(|d| d.monday_first_index())
}

/// Index of a day name in Sunday-first order, `None` for unknown names
pub fn sunday_first_index(day_name: &str) -> Option<usize> {
    Weekday::from_name(day_name).map(|d| d.sunday_first_index())
}

/// Calendar day an instant falls on in the given time zone
pub fn local_date<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// `YYYY-MM-DD` bucket key for an instant, in the given time zone
pub fn date_key<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String {
    local_date(timestamp, tz).format("%Y-%m-%d").to_string()
}

/// Zero-padded 24-hour `HH:MM` of a local time, comparable with timetable strings
pub fn time_of_day_key<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    now.naive_local().format("%H:%M").to_string()
}

/// Current day of week of a local time
pub fn weekday_of<Tz: TimeZone>(now: &DateTime<Tz>) -> Weekday {
    now.naive_local().weekday().into()
}

/// Milliseconds from `start` to `end`, or 0 unless both exist and `end > start`
pub fn duration_ms(start: Option<&DateTime<Utc>>, end: Option<&DateTime<Utc>>) -> i64 {
    match (start, end) {
        (Some(start), Some(end)) if end > start => (*end - *start).num_milliseconds(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_both_day_orderings() {
        assert_eq!(monday_first_index("Monday"), Some(0));
        assert_eq!(monday_first_index("Sunday"), Some(6));
        assert_eq!(sunday_first_index("Sunday"), Some(0));
        assert_eq!(sunday_first_index("Monday"), Some(1));
        assert_eq!(sunday_first_index("Saturday"), Some(6));
        assert_eq!(sunday_first_index("Funday"), None);
        assert_eq!(monday_first_index("monday"), None);
    }

    #[test]
    fn test_orders_agree_with_tables() {
        for (i, day) in Weekday::MONDAY_FIRST.iter().enumerate() {
            assert_eq!(day.monday_first_index(), i);
        }
        for (i, day) in Weekday::SUNDAY_FIRST.iter().enumerate() {
            assert_eq!(day.sunday_first_index(), i);
            assert_eq!(Weekday::from_name(day.as_str()), Some(*day));
        }
    }

    #[test]
    fn test_next_day_wraps_saturday_to_sunday() {
        assert_eq!(Weekday::Saturday.next_day(), Weekday::Sunday);
        assert_eq!(Weekday::Sunday.next_day(), Weekday::Monday);
        assert_eq!(Weekday::Wednesday.next_day(), Weekday::Thursday);
    }

    #[test]
    fn test_date_key_uses_local_day() {
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        // 20:30 UTC is already the next day at +05:00
        assert_eq!(date_key(&utc(2025, 3, 4, 20, 30), &tz), "2025-03-05");
        assert_eq!(date_key(&utc(2025, 3, 4, 20, 30), &Utc), "2025-03-04");
    }

    #[test]
    fn test_same_local_day_same_key() {
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let morning = utc(2025, 3, 4, 4, 0); // 01:00 local
        let night = utc(2025, 3, 5, 2, 30); // 23:30 local
        assert_eq!(date_key(&morning, &tz), date_key(&night, &tz));
    }

    #[test]
    fn test_time_of_day_key_is_zero_padded() {
        let now = utc(2025, 3, 4, 7, 5);
        assert_eq!(time_of_day_key(&now), "07:05");
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(time_of_day_key(&now.with_timezone(&tz)), "09:05");
    }

    #[test]
    fn test_weekday_of_follows_time_zone() {
        // 2025-03-05 is a Wednesday
        let now = utc(2025, 3, 5, 23, 0);
        assert_eq!(weekday_of(&now), Weekday::Wednesday);
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(weekday_of(&now.with_timezone(&tz)), Weekday::Thursday);
    }

    #[test]
    fn test_duration_ms() {
        let start = utc(2025, 3, 4, 10, 0);
        let end = utc(2025, 3, 4, 11, 30);
        assert_eq!(duration_ms(Some(&start), Some(&end)), 90 * 60 * 1000);
        assert_eq!(duration_ms(Some(&end), Some(&start)), 0);
        assert_eq!(duration_ms(Some(&start), Some(&start)), 0);
        assert_eq!(duration_ms(Some(&start), None), 0);
        assert_eq!(duration_ms(None, Some(&end)), 0);
    }
}
