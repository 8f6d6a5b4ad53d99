//! Year+month periods used to group passenger records.

use crate::category::Month;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tallyviz_common::{ChartError, Result};

/// A calendar month of a specific year, e.g. `201901`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: Month,
}

impl Period {
    /// Creates a period, rejecting month numbers outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let month = Month::new(month)
            .ok_or_else(|| ChartError::data(format!("month {month} is outside 1..=12")))?;
        Ok(Self { year, month })
    }

    /// Calendar year.
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month of the year.
    pub const fn month(self) -> Month {
        self.month
    }

    fn from_parts(text: &str, year: &str, month: &str, day: Option<&str>) -> Result<Self> {
        let invalid = || ChartError::data(format!("unrecognised period '{text}'"));
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = match day {
            Some(day) => day.parse().map_err(|_| invalid())?,
            None => 1,
        };
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
        Self::new(year, month)
    }
}

impl FromStr for Period {
    type Err = ChartError;

    /// Accepts `YYYYMM`, `YYYY-MM`, `YYYY/MM` and `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if text.len() == 6 && text.bytes().all(|b| b.is_ascii_digit()) {
            return Self::from_parts(text, &text[..4], &text[4..], None);
        }

        let mut parts = text.split(['-', '/']);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(year), Some(month), day, None)
                if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) =>
            {
                Self::from_parts(text, year, month, day)
            }
            _ => Err(ChartError::data(format!("unrecognised period '{text}'"))),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month.number())
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
