use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fixed civil-calendar reference offset, in hours from UTC. All callers
/// floor "today" through [`reference_today`] so date math on either side of
/// midnight agrees on which day it is.
pub const REFERENCE_TZ_OFFSET_HOURS: i64 = -6;

/// Converts an instant into the reference-timezone civil date.
pub fn reference_today(now: DateTime<Utc>) -> NaiveDate {
    (now + Duration::hours(REFERENCE_TZ_OFFSET_HOURS)).date_naive()
}

/// Whole days from `today` until `target`, clamped to zero for past dates.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days().max(0)
}

/// Recurrence rule for a pay schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Weekly,
    #[default]
    Biweekly,
    /// Two fixed days of month, e.g. the 1st and the 15th.
    Semimonthly([u32; 2]),
    Monthly,
}

impl Cadence {
    /// Next occurrence strictly after `from`.
    pub fn advance(&self, from: NaiveDate) -> NaiveDate {
        match self {
            Cadence::Weekly => from + Duration::days(7),
            Cadence::Biweekly => from + Duration::days(14),
            Cadence::Semimonthly(days) => next_semimonthly(from, *days),
            Cadence::Monthly => shift_month(from, 1),
        }
    }

    /// Previous occurrence strictly before `from`. Used to infer the start of
    /// a billing cycle from its due date.
    pub fn retreat(&self, from: NaiveDate) -> NaiveDate {
        match self {
            Cadence::Weekly => from - Duration::days(7),
            Cadence::Biweekly => from - Duration::days(14),
            Cadence::Semimonthly(days) => previous_semimonthly(from, *days),
            Cadence::Monthly => shift_month(from, -1),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cadence::Weekly => "Weekly",
            Cadence::Biweekly => "Every 2 weeks",
            Cadence::Semimonthly(_) => "Twice a month",
            Cadence::Monthly => "Monthly",
        }
    }
}

fn semimonthly_candidates(year: i32, month: u32, days: [u32; 2]) -> [NaiveDate; 2] {
    let clamp = |day: u32| day.min(days_in_month(year, month)).max(1);
    [
        NaiveDate::from_ymd_opt(year, month, clamp(days[0])).unwrap(),
        NaiveDate::from_ymd_opt(year, month, clamp(days[1])).unwrap(),
    ]
}

fn next_semimonthly(from: NaiveDate, days: [u32; 2]) -> NaiveDate {
    let next_month = shift_month(from.with_day(1).unwrap(), 1);
    let mut candidates = semimonthly_candidates(from.year(), from.month(), days).to_vec();
    candidates.extend(semimonthly_candidates(next_month.year(), next_month.month(), days));
    candidates.sort();
    candidates
        .into_iter()
        .find(|candidate| *candidate > from)
        .expect("next month always holds a later candidate")
}

fn previous_semimonthly(from: NaiveDate, days: [u32; 2]) -> NaiveDate {
    let prev_month = shift_month(from.with_day(1).unwrap(), -1);
    let mut candidates = semimonthly_candidates(prev_month.year(), prev_month.month(), days).to_vec();
    candidates.extend(semimonthly_candidates(from.year(), from.month(), days));
    candidates.sort();
    candidates
        .into_iter()
        .rev()
        .find(|candidate| *candidate < from)
        .expect("previous month always holds an earlier candidate")
}

pub(crate) fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_until_clamps_past_dates_to_zero() {
        let today = date(2025, 11, 20);
        assert_eq!(days_until(date(2025, 11, 28), today), 8);
        assert_eq!(days_until(today, today), 0);
        assert_eq!(days_until(date(2025, 11, 1), today), 0);
    }

    #[test]
    fn weekly_and_biweekly_add_fixed_days() {
        let from = date(2025, 11, 14);
        assert_eq!(Cadence::Weekly.advance(from), date(2025, 11, 21));
        assert_eq!(Cadence::Biweekly.advance(from), date(2025, 11, 28));
    }

    #[test]
    fn monthly_clamps_to_shorter_months() {
        assert_eq!(Cadence::Monthly.advance(date(2025, 1, 31)), date(2025, 2, 28));
        assert_eq!(Cadence::Monthly.advance(date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(Cadence::Monthly.advance(date(2025, 3, 31)), date(2025, 4, 30));
    }

    #[test]
    fn semimonthly_jumps_to_nearer_fixed_day() {
        let cadence = Cadence::Semimonthly([1, 15]);
        assert_eq!(cadence.advance(date(2025, 6, 1)), date(2025, 6, 15));
        assert_eq!(cadence.advance(date(2025, 6, 15)), date(2025, 7, 1));
        assert_eq!(cadence.advance(date(2025, 6, 20)), date(2025, 7, 1));
    }

    #[test]
    fn semimonthly_clamps_day_31_in_short_months() {
        let cadence = Cadence::Semimonthly([15, 31]);
        assert_eq!(cadence.advance(date(2025, 2, 15)), date(2025, 2, 28));
        assert_eq!(cadence.advance(date(2025, 2, 28)), date(2025, 3, 15));
    }

    #[test]
    fn advance_is_strictly_monotonic() {
        let cadences = [
            Cadence::Weekly,
            Cadence::Biweekly,
            Cadence::Semimonthly([1, 15]),
            Cadence::Monthly,
        ];
        for cadence in cadences {
            let mut current = date(2024, 12, 31);
            for _ in 0..48 {
                let next = cadence.advance(current);
                assert!(next > current, "{:?} failed at {}", cadence, current);
                current = next;
            }
        }
    }

    #[test]
    fn retreat_steps_backward() {
        assert_eq!(Cadence::Biweekly.retreat(date(2025, 11, 28)), date(2025, 11, 14));
        assert_eq!(Cadence::Monthly.retreat(date(2025, 3, 31)), date(2025, 2, 28));
        assert_eq!(
            Cadence::Semimonthly([1, 15]).retreat(date(2025, 6, 15)),
            date(2025, 6, 1)
        );
        assert_eq!(
            Cadence::Semimonthly([1, 15]).retreat(date(2025, 6, 1)),
            date(2025, 5, 15)
        );
    }
}
