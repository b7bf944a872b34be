use chrono::Duration;

use super::normalize::names_match;
use crate::bank::Transaction;
use crate::bills::BillTemplate;
use crate::heuristics::Heuristics;

/// Which of the three criteria held for a (transaction, bill) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCriteria {
    pub name: bool,
    pub amount: bool,
    pub date: bool,
}

impl MatchCriteria {
    pub fn met(&self) -> u32 {
        u32::from(self.name) + u32::from(self.amount) + u32::from(self.date)
    }
}

/// Transient scoring result; never persisted, though a qualifying match may
/// be recorded as a payment by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub matched: bool,
    pub confidence: f64,
    pub criteria: MatchCriteria,
}

/// Scores a candidate transaction against a bill. Two of the three criteria
/// must hold, which tolerates one weak signal: a merchant renamed by the
/// bank still matches when amount and date agree.
pub fn match_transaction(
    txn: &Transaction,
    bill: &BillTemplate,
    heuristics: &Heuristics,
) -> MatchResult {
    let amount = (txn.amount.abs() - bill.amount.abs()).abs() <= heuristics.amount_tolerance;

    let date = bill.due_date.is_some_and(|due| {
        let earliest = due - Duration::days(heuristics.date_lookback_days);
        let latest = due + Duration::days(heuristics.date_lookahead_days);
        txn.date >= earliest && txn.date <= latest
    });

    let name = bill.name_variants().any(|variant| {
        names_match(
            &txn.merchant_name,
            variant,
            heuristics.name_similarity_threshold,
        )
    });

    let criteria = MatchCriteria { name, amount, date };
    let met = criteria.met();
    MatchResult {
        matched: met >= heuristics.min_criteria_met,
        confidence: f64::from(met) / 3.0,
        criteria,
    }
}

/// First bill whose match qualifies, in template iteration order.
/// First-match-wins rather than best-match-wins: preserved to avoid
/// double-matching disputes when two bills share a merchant.
pub fn first_qualifying_match<'a>(
    txn: &Transaction,
    bills: impl IntoIterator<Item = &'a BillTemplate>,
    heuristics: &Heuristics,
) -> Option<(&'a BillTemplate, MatchResult)> {
    for bill in bills {
        let result = match_transaction(txn, bill, heuristics);
        if result.matched && result.confidence >= heuristics.acceptance_confidence() {
            return Some((bill, result));
        }
    }
    None
}
