//! Calendar resampling granularity.

use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Calendar bucket width used when resampling a series.
///
/// Buckets are labelled by their last day: a week ends on Sunday, a month on
/// its last calendar day and a year on December 31st.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar day.
    Daily,
    /// Monday through Sunday, labelled by the Sunday.
    Weekly,
    /// Calendar months, labelled by the month end.
    #[default]
    Monthly,
    /// Calendar years, labelled by December 31st.
    Yearly,
}

impl Granularity {
    /// Returns the granularity as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Returns all available granularities.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly]
    }

    /// Returns the label of the bucket containing `date`.
    #[must_use]
    pub fn bucket_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Weekly => {
                let days_left = 6 - i64::from(date.weekday().num_days_from_monday());
                date.checked_add_signed(TimeDelta::days(days_left))
                    .unwrap_or(NaiveDate::MAX)
            }
            Self::Monthly => month_end(date),
            Self::Yearly => NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(NaiveDate::MAX),
        }
    }

    /// Returns true if `date` is a bucket label of this granularity.
    #[must_use]
    pub fn is_aligned(&self, date: NaiveDate) -> bool {
        self.bucket_end(date) == date
    }

    /// Returns the label of the bucket following the one containing `date`.
    #[must_use]
    pub fn next_bucket(&self, date: NaiveDate) -> NaiveDate {
        self.bucket_end(date)
            .succ_opt()
            .map_or(NaiveDate::MAX, |next| self.bucket_end(next))
    }
}

/// Last calendar day of the month containing `date`.
fn month_end(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next_first| next_first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = GranularityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Self::Daily),
            "w" | "week" | "weekly" => Ok(Self::Weekly),
            "m" | "month" | "monthly" => Ok(Self::Monthly),
            "y" | "a" | "year" | "yearly" | "annual" | "annually" => Ok(Self::Yearly),
            _ => Err(GranularityParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid granularity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranularityParseError(String);

impl std::fmt::Display for GranularityParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid granularity '{}', expected one of: daily, weekly, monthly, yearly",
            self.0
        )
    }
}

impl std::error::Error for GranularityParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekly_bucket_ends_on_sunday() {
        // 2024-01-10 is a Wednesday
        assert_eq!(
            Granularity::Weekly.bucket_end(date(2024, 1, 10)),
            date(2024, 1, 14)
        );
        assert_eq!(
            Granularity::Weekly.bucket_end(date(2024, 1, 14)),
            date(2024, 1, 14)
        );
        assert_eq!(
            Granularity::Weekly.bucket_end(date(2024, 1, 15)),
            date(2024, 1, 21)
        );
    }

    #[test]
    fn test_monthly_bucket_handles_leap_years() {
        assert_eq!(
            Granularity::Monthly.bucket_end(date(2024, 2, 3)),
            date(2024, 2, 29)
        );
        assert_eq!(
            Granularity::Monthly.bucket_end(date(2023, 2, 3)),
            date(2023, 2, 28)
        );
        assert_eq!(
            Granularity::Monthly.bucket_end(date(2023, 12, 31)),
            date(2023, 12, 31)
        );
    }

    #[test]
    fn test_yearly_bucket() {
        assert_eq!(
            Granularity::Yearly.bucket_end(date(2021, 6, 1)),
            date(2021, 12, 31)
        );
        assert!(Granularity::Yearly.is_aligned(date(2021, 12, 31)));
        assert!(!Granularity::Yearly.is_aligned(date(2021, 12, 30)));
    }

    #[test]
    fn test_next_bucket() {
        assert_eq!(
            Granularity::Daily.next_bucket(date(2024, 2, 28)),
            date(2024, 2, 29)
        );
        assert_eq!(
            Granularity::Weekly.next_bucket(date(2024, 1, 14)),
            date(2024, 1, 21)
        );
        assert_eq!(
            Granularity::Monthly.next_bucket(date(2024, 1, 31)),
            date(2024, 2, 29)
        );
        assert_eq!(
            Granularity::Monthly.next_bucket(date(2024, 12, 31)),
            date(2025, 1, 31)
        );
        assert_eq!(
            Granularity::Yearly.next_bucket(date(2024, 12, 31)),
            date(2025, 12, 31)
        );
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!("daily".parse::<Granularity>().unwrap(), Granularity::Daily);
        assert_eq!("W".parse::<Granularity>().unwrap(), Granularity::Weekly);
        assert_eq!(
            " Monthly ".parse::<Granularity>().unwrap(),
            Granularity::Monthly
        );
        assert_eq!("annual".parse::<Granularity>().unwrap(), Granularity::Yearly);
        assert!("hourly".parse::<Granularity>().is_err());
    }
}
