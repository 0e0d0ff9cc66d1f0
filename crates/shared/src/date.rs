use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use time::{Date, Duration, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

const DAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A calendar date used as the key of every per-day collection.
///
/// Serializes as `YYYY-MM-DD`, also when used as a JSON object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(Date);

impl Day {
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    pub fn date(&self) -> Date {
        self.0
    }

    pub fn parse(value: &str) -> crate::Result<Self> {
        Ok(Self(Date::parse(value.trim(), DAY_FORMAT)?))
    }

    /// Returns `None` past the supported calendar range.
    pub fn add_days(&self, days: i64) -> Option<Self> {
        self.0.checked_add(Duration::days(days)).map(Self)
    }

    pub fn next(&self) -> Option<Self> {
        self.0.next_day().map(Self)
    }
}

impl From<Date> for Day {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for Day {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DayVisitor;

        impl de::Visitor<'_> for DayVisitor {
            type Value = Day;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a calendar date formatted as YYYY-MM-DD")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Date::parse(v, DAY_FORMAT).map(Day).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DayVisitor)
    }
}

/// Current local date-time, falling back to UTC when the local offset
/// cannot be determined (multi-threaded processes on some platforms).
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Today's calendar date, time of day discarded.
pub fn today() -> Day {
    Day(now().date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use time::macros::date;

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(Day::new(date!(2025 - 03 - 07)).to_string(), "2025-03-07");
    }

    #[test]
    fn test_parse_rejects_timestamps() {
        assert!(Day::parse("2025-03-07").is_ok());
        assert!(Day::parse("2025-03-07T10:00:00Z").is_err());
        assert!(Day::parse("07/03/2025").is_err());
        assert!(Day::parse("2025-02-30").is_err());
    }

    #[test]
    fn test_json_map_key_is_iso_date() {
        let mut map = BTreeMap::new();
        map.insert(Day::new(date!(2025 - 01 - 09)), 1);
        map.insert(Day::new(date!(2024 - 12 - 31)), 2);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2024-12-31":2,"2025-01-09":1}"#);

        let back: BTreeMap<Day, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_ordering_is_calendar_order() {
        let a = Day::parse("2024-12-31").unwrap();
        let b = Day::parse("2025-01-01").unwrap();
        assert!(a < b);
        assert_eq!(a.next(), Some(b));
        assert_eq!(b.add_days(-1), Some(a));
    }
}
