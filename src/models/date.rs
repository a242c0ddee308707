use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub fn all() -> [Month; 12] {
        [
            Month::January,
            Month::February,
            Month::March,
            Month::April,
            Month::May,
            Month::June,
            Month::July,
            Month::August,
            Month::September,
            Month::October,
            Month::November,
            Month::December,
        ]
    }

    /// 1-based month number -> Month
    pub fn from_number(n: u32) -> Option<Month> {
        if (1..=12).contains(&n) {
            Some(Self::all()[(n - 1) as usize])
        } else {
            None
        }
    }

    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Month segment of a raw "DD/MM" string. Only this segment matters for
/// monthly bucketing, so a garbage day still buckets.
pub fn month_segment(raw: &str) -> Option<Month> {
    let segment = raw.split('/').nth(1)?;
    let n: u32 = segment.trim().parse().ok()?;
    Month::from_number(n)
}

/// A calendar day within one season, serialized as "DD/MM".
/// Ordering is chronological within the season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameDate {
    month: u32,
    day: u32,
}

impl GameDate {
    pub fn new(day: u32, month: u32) -> Option<Self> {
        if (1..=31).contains(&day) && (1..=12).contains(&month) {
            Some(Self { month, day })
        } else {
            None
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().split('/');
        let day: u32 = parts.next()?.trim().parse().ok()?;
        let month: u32 = parts.next()?.trim().parse().ok()?;
        Self::new(day, month)
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> Month {
        // month is validated in `new`
        Month::from_number(self.month).unwrap_or(Month::January)
    }

    /// Resolve against a season year. `None` for impossible days like 31/02.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    pub fn weekday(&self, year: i32) -> Option<Weekday> {
        self.in_year(year).map(|d| d.weekday())
    }
}

impl std::fmt::Display for GameDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:02}", self.day, self.month)
    }
}

impl Serialize for GameDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        GameDate::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("bad game date '{}'", raw)))
    }
}

pub fn parse_weekday(s: &str) -> Option<Weekday> {
    s.trim().parse::<Weekday>().ok()
}
