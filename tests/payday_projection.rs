mod common;

use common::date;
use spendable_core::schedule::{
    project_paydays, Cadence, EarlyDeposit, PaydayKind, PaySchedule, ProjectionWarning,
};

fn biweekly_schedule() -> PaySchedule {
    PaySchedule {
        cadence: Cadence::Biweekly,
        amount: 1883.81,
        anchor_date: date(2025, 11, 14),
        destination: None,
    }
}

fn early_split(amount: f64) -> EarlyDeposit {
    EarlyDeposit {
        enabled: true,
        amount,
        days_before_main: 2,
        early_destination: "Spending".into(),
        main_destination: "Checking".into(),
    }
}

#[test]
fn early_deposit_splits_the_biweekly_paycheck() {
    let projection = project_paydays(
        &biweekly_schedule(),
        None,
        Some(&early_split(400.0)),
        date(2025, 11, 20),
    );

    assert!(projection.warnings.is_empty());
    assert_eq!(projection.paydays.len(), 2);

    let early = &projection.paydays[0];
    assert_eq!(early.kind, PaydayKind::Early);
    assert_eq!(early.date, date(2025, 11, 26));
    assert_eq!(early.amount, 400.0);
    assert_eq!(early.destination.as_deref(), Some("Spending"));

    let main = &projection.paydays[1];
    assert_eq!(main.kind, PaydayKind::Main);
    assert_eq!(main.date, date(2025, 11, 28));
    assert_eq!(main.amount, 1483.81);
}

#[test]
fn split_amounts_conserve_the_full_paycheck() {
    let schedule = biweekly_schedule();
    let projection = project_paydays(
        &schedule,
        None,
        Some(&early_split(621.07)),
        date(2025, 11, 20),
    );
    assert_eq!(projection.total_amount(), schedule.amount);
}

#[test]
fn oversized_early_deposit_falls_back_to_single_payday() {
    let projection = project_paydays(
        &biweekly_schedule(),
        None,
        Some(&early_split(2000.0)),
        date(2025, 11, 20),
    );

    assert_eq!(projection.paydays.len(), 1);
    assert_eq!(projection.paydays[0].kind, PaydayKind::Single);
    assert_eq!(projection.paydays[0].amount, 1883.81);
    assert_eq!(
        projection.warnings,
        vec![ProjectionWarning::EarlyDepositExceedsPay {
            early_amount: 2000.0,
            schedule_amount: 1883.81,
        }]
    );
}

#[test]
fn disabled_or_zero_early_deposit_means_single_payday() {
    let mut disabled = early_split(400.0);
    disabled.enabled = false;
    let projection = project_paydays(
        &biweekly_schedule(),
        None,
        Some(&disabled),
        date(2025, 11, 20),
    );
    assert_eq!(projection.paydays.len(), 1);
    assert_eq!(projection.paydays[0].kind, PaydayKind::Single);

    let projection = project_paydays(
        &biweekly_schedule(),
        None,
        Some(&early_split(0.0)),
        date(2025, 11, 20),
    );
    assert_eq!(projection.paydays.len(), 1);
}

#[test]
fn paydays_are_sorted_and_cutoff_is_the_latest() {
    let secondary = PaySchedule {
        cadence: Cadence::Weekly,
        amount: 350.0,
        anchor_date: date(2025, 11, 17),
        destination: Some("Joint".into()),
    };
    let projection = project_paydays(
        &biweekly_schedule(),
        Some(&secondary),
        Some(&early_split(400.0)),
        date(2025, 11, 20),
    );

    let dates: Vec<_> = projection.paydays.iter().map(|payday| payday.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted, "paydays must be ascending by date");

    // Secondary weekly pay lands 11-24, early slice 11-26, main 11-28.
    assert_eq!(dates, vec![date(2025, 11, 24), date(2025, 11, 26), date(2025, 11, 28)]);
    assert_eq!(projection.cutoff(), Some(date(2025, 11, 28)));
    assert_eq!(projection.next().unwrap().date, date(2025, 11, 24));

    let main_date = projection
        .paydays
        .iter()
        .find(|payday| payday.kind == PaydayKind::Main)
        .unwrap()
        .date;
    for payday in &projection.paydays {
        if payday.kind == PaydayKind::Early {
            assert!(payday.date <= main_date);
        }
    }
}

#[test]
fn anchor_on_today_is_the_next_payday() {
    let schedule = biweekly_schedule();
    assert_eq!(schedule.next_payday(date(2025, 11, 14)), date(2025, 11, 14));
    assert_eq!(schedule.next_payday(date(2025, 11, 15)), date(2025, 11, 28));
    assert_eq!(schedule.next_payday(date(2025, 12, 20)), date(2025, 12, 26));
}
