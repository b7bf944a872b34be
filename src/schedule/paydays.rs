use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::cadence::Cadence;
use crate::utils::round_cents;

/// A recurring income schedule. `anchor_date` is the most recent known
/// deposit date; it only changes when the user edits settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaySchedule {
    pub cadence: Cadence,
    pub amount: f64,
    pub anchor_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl PaySchedule {
    /// First scheduled deposit on or after `today`.
    pub fn next_payday(&self, today: NaiveDate) -> NaiveDate {
        let mut date = self.anchor_date;
        while date < today {
            date = self.cadence.advance(date);
        }
        date
    }
}

/// Optional split that lands part of a paycheck a few days early.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyDeposit {
    pub enabled: bool,
    pub amount: f64,
    pub days_before_main: i64,
    #[serde(default)]
    pub early_destination: String,
    #[serde(default)]
    pub main_destination: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaydayKind {
    Early,
    Main,
    Single,
}

/// A single projected deposit. Derived, never stored authoritatively;
/// regenerate whenever the governing schedule changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payday {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub kind: PaydayKind,
}

/// Recoverable projection problems surfaced to the caller instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionWarning {
    /// The configured early slice exceeds the full paycheck; the projector
    /// fell back to a single undivided payday.
    EarlyDepositExceedsPay { early_amount: f64, schedule_amount: f64 },
    /// No schedule could produce a payday; downstream consumers fall back to
    /// a fixed horizon.
    NoPaydayProjected,
}

impl fmt::Display for ProjectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionWarning::EarlyDepositExceedsPay {
                early_amount,
                schedule_amount,
            } => write!(
                f,
                "early deposit of {early_amount:.2} exceeds paycheck of {schedule_amount:.2}; using a single deposit"
            ),
            ProjectionWarning::NoPaydayProjected => {
                write!(f, "no payday could be projected from the configured schedules")
            }
        }
    }
}

/// Ordered list of upcoming deposits with the reference date it was computed
/// for, so cached copies can be invalidated when the schedule changes.
#[derive(Debug, Clone)]
pub struct PaydayProjection {
    pub paydays: Vec<Payday>,
    pub warnings: Vec<ProjectionWarning>,
    pub reference_date: NaiveDate,
}

impl PaydayProjection {
    /// The nearest upcoming deposit.
    pub fn next(&self) -> Option<&Payday> {
        self.paydays.first()
    }

    /// Cutoff for "bills due before payday" computations: always the latest
    /// projected deposit, i.e. the main deposit rather than an early slice.
    pub fn cutoff(&self) -> Option<NaiveDate> {
        self.paydays.iter().map(|payday| payday.date).max()
    }

    pub fn total_amount(&self) -> f64 {
        round_cents(self.paydays.iter().map(|payday| payday.amount).sum())
    }
}

/// Projects upcoming deposits for one or two income schedules, splitting the
/// primary paycheck when an early-deposit config is enabled.
pub fn project_paydays(
    primary: &PaySchedule,
    secondary: Option<&PaySchedule>,
    early: Option<&EarlyDeposit>,
    today: NaiveDate,
) -> PaydayProjection {
    let mut paydays = Vec::new();
    let mut warnings = Vec::new();

    let main_date = primary.next_payday(today);
    match early {
        Some(split) if split.enabled && split.amount > 0.0 => {
            if split.amount > primary.amount {
                warnings.push(ProjectionWarning::EarlyDepositExceedsPay {
                    early_amount: split.amount,
                    schedule_amount: primary.amount,
                });
                paydays.push(single_payday(primary, main_date));
            } else {
                paydays.push(Payday {
                    date: main_date - Duration::days(split.days_before_main),
                    amount: round_cents(split.amount),
                    destination: non_empty(&split.early_destination),
                    kind: PaydayKind::Early,
                });
                paydays.push(Payday {
                    date: main_date,
                    amount: round_cents(primary.amount - split.amount),
                    destination: non_empty(&split.main_destination),
                    kind: PaydayKind::Main,
                });
            }
        }
        _ => paydays.push(single_payday(primary, main_date)),
    }

    if let Some(schedule) = secondary {
        let date = schedule.next_payday(today);
        paydays.push(single_payday(schedule, date));
    }

    paydays.sort_by_key(|payday| payday.date);

    PaydayProjection {
        paydays,
        warnings,
        reference_date: today,
    }
}

fn single_payday(schedule: &PaySchedule, date: NaiveDate) -> Payday {
    Payday {
        date,
        amount: round_cents(schedule.amount),
        destination: schedule.destination.clone(),
        kind: PaydayKind::Single,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
