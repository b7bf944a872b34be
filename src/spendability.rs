//! The aggregate "safe to spend" computation. Orchestration only: payday
//! projection, bill classification, transaction matching, and balance
//! projection all come from the sibling modules.

use chrono::{Duration, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::bank::{project_balances, DepositoryAccount, Transaction};
use crate::bills::{is_paid_for_current_cycle, BillTemplate};
use crate::heuristics::Heuristics;
use crate::matching::{match_transaction, MatchResult};
use crate::schedule::{
    days_until, project_paydays, Payday, PaydayProjection, ProjectionWarning,
};
use crate::settings::SettingsDocument;
use crate::utils::round_cents;

/// Horizon used for bill classification and essentials reservation when no
/// payday can be projected at all: one typical pay cycle.
const FALLBACK_HORIZON_DAYS: i64 = 30;

/// Everything the aggregator needs, fetched by the caller. The engine holds
/// no state between invocations.
#[derive(Debug, Clone, Copy)]
pub struct SpendabilityInput<'a> {
    pub settings: &'a SettingsDocument,
    pub bills: &'a [BillTemplate],
    pub accounts: &'a [DepositoryAccount],
    pub transactions: &'a [Transaction],
    pub today: NaiveDate,
}

/// The report consumed by the UI. `safe_to_spend_now` is authoritative for
/// spend/no-spend decisions; `available_after_payday` is the optimistic
/// figure that counts projected deposits as already landed.
#[derive(Debug, Clone)]
pub struct SpendabilityReport {
    pub safe_to_spend_now: f64,
    pub available_after_payday: f64,
    pub paydays: Vec<Payday>,
    /// Latest projected payday, or the fallback horizon.
    pub cutoff: NaiveDate,
    pub live_balance: f64,
    pub projected_balance: f64,
    pub bills_due_before_payday: Vec<BillTemplate>,
    pub bills_due_after_payday: Vec<BillTemplate>,
    /// Bills excluded because a transaction match indicates they were paid.
    pub matched_bill_ids: Vec<Uuid>,
    pub unpaid_due_before_payday: f64,
    pub essentials_reserved: f64,
    pub safety_buffer: f64,
    pub warnings: Vec<ProjectionWarning>,
    pub reference_date: NaiveDate,
}

/// Produces the spendability report for one user from already-fetched data.
/// Pure and synchronous; safe to run concurrently for the same user.
pub fn aggregate(input: &SpendabilityInput<'_>, heuristics: &Heuristics) -> SpendabilityReport {
    let today = input.today;
    let projection = project_income(input.settings, today);
    let warnings = projection.warnings.clone();

    let cutoff = projection
        .cutoff()
        .unwrap_or_else(|| today + Duration::days(FALLBACK_HORIZON_DAYS));

    let mut due_before = Vec::new();
    let mut due_after = Vec::new();
    let mut matched_bill_ids = Vec::new();
    for bill in input.bills {
        if is_paid_for_current_cycle(bill) {
            continue;
        }
        let Some(due) = bill.due_date else {
            // An undated obligation cannot be scheduled against the cutoff.
            debug!(bill = %bill.name, "skipping bill with no due date");
            continue;
        };
        if let Some((txn, result)) = covering_transaction(bill, input.transactions, heuristics) {
            debug!(
                bill = %bill.name,
                transaction_id = %txn.id,
                confidence = result.confidence,
                "treating bill as paid via transaction match"
            );
            matched_bill_ids.push(bill.id);
            continue;
        }
        if due <= cutoff {
            due_before.push(bill.clone());
        } else {
            due_after.push(bill.clone());
        }
    }

    let balances = project_balances(input.accounts, input.transactions, today, heuristics);

    let unpaid_due_before = round_cents(
        due_before
            .iter()
            .map(|bill| bill.amount.abs())
            .sum::<f64>(),
    );

    let weeks_until_payday = (days_until(cutoff, today) + 6) / 7;
    let essentials_reserved =
        round_cents(input.settings.preferences.weekly_essentials * weeks_until_payday as f64);
    let safety_buffer = input.settings.preferences.safety_buffer;

    let safe_to_spend_now = round_cents(
        balances.projected_total - unpaid_due_before - essentials_reserved - safety_buffer,
    );
    let available_after_payday = round_cents(safe_to_spend_now + projection.total_amount());

    SpendabilityReport {
        safe_to_spend_now,
        available_after_payday,
        paydays: projection.paydays,
        cutoff,
        live_balance: balances.live_total,
        projected_balance: balances.projected_total,
        bills_due_before_payday: due_before,
        bills_due_after_payday: due_after,
        matched_bill_ids,
        unpaid_due_before_payday: unpaid_due_before,
        essentials_reserved,
        safety_buffer,
        warnings,
        reference_date: today,
    }
}

fn project_income(settings: &SettingsDocument, today: NaiveDate) -> PaydayProjection {
    let primary = settings.primary_schedule();
    let secondary = settings.secondary_schedule();
    match (primary, secondary) {
        (Some(primary), secondary) => project_paydays(
            &primary,
            secondary.as_ref(),
            settings.early_deposit.as_ref(),
            today,
        ),
        (None, Some(secondary)) => project_paydays(&secondary, None, None, today),
        (None, None) => PaydayProjection {
            paydays: Vec::new(),
            warnings: vec![ProjectionWarning::NoPaydayProjected],
            reference_date: today,
        },
    }
}

/// First transaction whose match against the bill qualifies, in feed order.
fn covering_transaction<'a>(
    bill: &BillTemplate,
    transactions: &'a [Transaction],
    heuristics: &Heuristics,
) -> Option<(&'a Transaction, MatchResult)> {
    transactions.iter().find_map(|txn| {
        let result = match_transaction(txn, bill, heuristics);
        (result.matched && result.confidence >= heuristics.acceptance_confidence())
            .then_some((txn, result))
    })
}
