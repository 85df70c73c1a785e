use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A calendar day in local time, stored and exchanged as `YYYY-MM-DD`.
///
/// Keys order chronologically and never carry a time of day, so two instants
/// on the same local day always produce equal keys. Only the shape of a key is
/// checked: a stored key such as `2024-02-30` is kept as written and simply
/// never equals a real day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey {
    year: i32,
    month: u32,
    day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid day key {0:?}, expected YYYY-MM-DD")]
pub struct DayKeyError(String);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    /// Calendar day of `instant` in the instant's own time zone.
    pub fn from_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self::new(instant.date_naive())
    }

    pub fn today() -> Self {
        Self::from_instant(&Local::now())
    }

    pub fn parse(raw: &str) -> Result<Self, DayKeyError> {
        let bytes = raw.as_bytes();
        let shaped = bytes.len() == 10
            && bytes.iter().enumerate().all(|(idx, byte)| match idx {
                4 | 7 => *byte == b'-',
                _ => byte.is_ascii_digit(),
            });
        if !shaped {
            return Err(DayKeyError(raw.to_string()));
        }

        let field = |range: std::ops::Range<usize>| {
            raw[range]
                .parse::<u32>()
                .map_err(|_| DayKeyError(raw.to_string()))
        };
        Ok(Self {
            year: field(0..4)? as i32,
            month: field(5..7)?,
            day: field(8..10)?,
        })
    }

    /// The day this key names, or `None` for keys like `2024-02-30`.
    pub fn date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Moves a real day by `days`. Keys that name no real day stay put.
    pub fn shift(self, days: i64) -> Self {
        match self.date() {
            Some(date) => Self::new(date + Duration::days(days)),
            None => self,
        }
    }

    pub fn pred(self) -> Self {
        self.shift(-1)
    }

    pub fn is_same_day<Tz: TimeZone>(self, instant: &DateTime<Tz>) -> bool {
        self == Self::from_instant(instant)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for DayKey {
    type Err = DayKeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

impl TryFrom<String> for DayKey {
    type Error = DayKeyError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}
