use chrono::NaiveDate;
use tracing::debug;

use super::transaction::{DepositoryAccount, Transaction};
use crate::heuristics::Heuristics;
use crate::utils::round_cents;

/// Live and projected balance for one account.
#[derive(Debug, Clone)]
pub struct AccountProjection {
    pub account_id: String,
    pub live_balance: f64,
    pub projected_balance: f64,
    pub pending_applied: usize,
}

/// Per-account projections plus totals across all depository accounts.
#[derive(Debug, Clone, Default)]
pub struct BalanceSummary {
    pub live_total: f64,
    pub projected_total: f64,
    pub accounts: Vec<AccountProjection>,
}

/// Adjusts one account's bank-reported balance for its qualifying pending
/// transactions. Amounts already follow the accounting sign convention, so
/// the projection is a plain sum with no inversion.
pub fn project_account(
    account: &DepositoryAccount,
    transactions: &[Transaction],
    today: NaiveDate,
    heuristics: &Heuristics,
) -> AccountProjection {
    let mut projected = account.live_balance;
    let mut applied = 0usize;
    for txn in transactions {
        if txn.account_id != account.account_id {
            continue;
        }
        if !qualifies_for_projection(txn, today, heuristics) {
            continue;
        }
        projected += txn.amount;
        applied += 1;
    }
    AccountProjection {
        account_id: account.account_id.clone(),
        live_balance: account.live_balance,
        projected_balance: round_cents(projected),
        pending_applied: applied,
    }
}

/// Projects each account independently, then totals. The pending filter is
/// transaction-to-account scoped, so projecting a pre-summed total would
/// attribute pending amounts to the wrong balance.
pub fn project_balances(
    accounts: &[DepositoryAccount],
    transactions: &[Transaction],
    today: NaiveDate,
    heuristics: &Heuristics,
) -> BalanceSummary {
    let mut summary = BalanceSummary::default();
    for account in accounts {
        let projection = project_account(account, transactions, today, heuristics);
        summary.live_total += projection.live_balance;
        summary.projected_total += projection.projected_balance;
        summary.accounts.push(projection);
    }
    summary.live_total = round_cents(summary.live_total);
    summary.projected_total = round_cents(summary.projected_total);
    summary
}

fn qualifies_for_projection(txn: &Transaction, today: NaiveDate, heuristics: &Heuristics) -> bool {
    if !txn.is_truly_pending() {
        return false;
    }
    let age_days = (today - txn.date).num_days();
    if age_days > heuristics.stale_pending_days {
        // A bank that never flips the flag would otherwise distort the
        // projection forever.
        debug!(
            transaction_id = %txn.id,
            age_days,
            "excluding stale pending transaction from projection"
        );
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pending_txn(id: &str, account: &str, amount: f64, on: NaiveDate) -> Transaction {
        Transaction {
            id: id.into(),
            account_id: account.into(),
            amount,
            date: on,
            merchant_name: String::new(),
            pending: Some(true),
            status: None,
            mask: None,
            institution_name: None,
        }
    }

    fn account(id: &str, live: f64) -> DepositoryAccount {
        DepositoryAccount {
            account_id: id.into(),
            name: None,
            live_balance: live,
            available_balance: None,
            mask: None,
            institution_name: None,
        }
    }

    #[test]
    fn empty_transaction_list_leaves_balance_unchanged() {
        let checking = account("a1", 512.34);
        let projection = project_account(&checking, &[], date(2025, 11, 20), &Heuristics::default());
        assert_eq!(projection.projected_balance, 512.34);
        assert_eq!(projection.pending_applied, 0);
    }

    #[test]
    fn staleness_boundary_is_inclusive_at_five_days() {
        let today = date(2025, 11, 20);
        let checking = account("a1", 100.0);
        let heuristics = Heuristics::default();

        let on_boundary = pending_txn("t1", "a1", -10.0, date(2025, 11, 15));
        let past_boundary = pending_txn("t2", "a1", -10.0, date(2025, 11, 14));
        let projection =
            project_account(&checking, &[on_boundary, past_boundary], today, &heuristics);

        assert_eq!(projection.projected_balance, 90.0);
        assert_eq!(projection.pending_applied, 1);
    }

    #[test]
    fn projection_is_scoped_to_the_account() {
        let today = date(2025, 11, 20);
        let accounts = [account("a1", 100.0), account("a2", 200.0)];
        let transactions = [
            pending_txn("t1", "a1", -25.0, today),
            pending_txn("t2", "a2", 50.0, today),
        ];
        let summary =
            project_balances(&accounts, &transactions, today, &Heuristics::default());
        assert_eq!(summary.live_total, 300.0);
        assert_eq!(summary.projected_total, 325.0);
        assert_eq!(summary.accounts[0].projected_balance, 75.0);
        assert_eq!(summary.accounts[1].projected_balance, 250.0);
    }
}
