//! Day-based package version
//!
//! Version Format: `1.0.{days}.0{tag}`
//! - `days`: whole calendar days elapsed since the epoch (2023-09-21)
//! - `tag`: static pre-release suffix chosen at build time (empty or `-preview`)
//!
//! The day count is signed. A date before the epoch yields a negative count;
//! keeping the epoch in the past is a precondition of the build setup.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::config;

/// A version string computed for a single calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionStamp {
    days: i64,
    tag: String,
}

impl VersionStamp {
    /// Computes the version for `today` relative to `epoch`
    pub fn for_date(today: NaiveDate, epoch: NaiveDate, tag: impl Into<String>) -> Self {
        Self {
            days: today.signed_duration_since(epoch).num_days(),
            tag: tag.into(),
        }
    }

    /// Computes the version for the local calendar date, using the built-in epoch and tag
    pub fn today() -> Self {
        Self::for_date(Local::now().date_naive(), config::EPOCH, config::VERSION_TAG)
    }

    /// Returns the number of days since the epoch
    pub fn days(&self) -> i64 {
        self.days
    }

    /// Returns the pre-release tag (may be empty)
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for VersionStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1.0.{}.0{}", self.days, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_after_epoch() {
        let stamp = VersionStamp::for_date(date(2023, 9, 22), date(2023, 9, 21), "");
        assert_eq!(stamp.to_string(), "1.0.1.0");
    }

    #[test]
    fn epoch_day_is_zero() {
        let stamp = VersionStamp::for_date(date(2023, 9, 21), date(2023, 9, 21), "");
        assert_eq!(stamp.days(), 0);
        assert_eq!(stamp.to_string(), "1.0.0.0");
    }

    #[test]
    fn preview_tag_is_appended() {
        let stamp = VersionStamp::for_date(date(2024, 1, 1), date(2023, 9, 21), "-preview");
        assert_eq!(stamp.tag(), "-preview");
        assert_eq!(stamp.to_string(), "1.0.102.0-preview");
    }

    #[test]
    fn date_before_epoch_goes_negative() {
        let stamp = VersionStamp::for_date(date(2023, 9, 20), date(2023, 9, 21), "");
        assert_eq!(stamp.to_string(), "1.0.-1.0");
    }

    #[test]
    fn leap_day_counts_once() {
        let before = VersionStamp::for_date(date(2024, 2, 28), date(2023, 9, 21), "");
        let after = VersionStamp::for_date(date(2024, 3, 1), date(2023, 9, 21), "");
        assert_eq!(after.days() - before.days(), 2);
    }

    #[test]
    fn today_uses_builtin_epoch() {
        let stamp = VersionStamp::today();
        let expected = Local::now()
            .date_naive()
            .signed_duration_since(config::EPOCH)
            .num_days();

        // Guard against the test straddling midnight
        assert!(stamp.days() == expected || stamp.days() + 1 == expected);
        assert_eq!(stamp.tag(), config::VERSION_TAG);
    }

    proptest! {
        #[test]
        fn next_day_adds_exactly_one(offset in 0i64..20_000) {
            let epoch = config::EPOCH;
            let today = epoch + Duration::days(offset);
            let tomorrow = today + Duration::days(1);

            let a = VersionStamp::for_date(today, epoch, "");
            let b = VersionStamp::for_date(tomorrow, epoch, "");
            prop_assert_eq!(a.days(), offset);
            prop_assert_eq!(b.days(), a.days() + 1);
        }

        #[test]
        fn same_day_is_stable(offset in 0i64..20_000, preview in any::<bool>()) {
            let epoch = config::EPOCH;
            let today = epoch + Duration::days(offset);
            let tag = if preview { "-preview" } else { "" };

            let a = VersionStamp::for_date(today, epoch, tag);
            let b = VersionStamp::for_date(today, epoch, tag);
            prop_assert_eq!(a.to_string(), b.to_string());
            prop_assert_eq!(a.to_string(), format!("1.0.{}.0{}", offset, tag));
        }
    }
}
