use std::cmp::Ordering;

use chrono::NaiveDate;
use uuid::Uuid;

use super::template::{BillTemplate, PaymentRecord};

/// Derived lifecycle state for one bill instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    Pending,
    Overdue,
    Paid,
}

impl BillStatus {
    fn display_rank(self) -> u8 {
        match self {
            BillStatus::Overdue => 0,
            BillStatus::Pending => 1,
            BillStatus::Paid => 2,
        }
    }
}

/// Derives the current status instead of trusting stored state. A bill with
/// no due date cannot become overdue.
pub fn bill_status(bill: &BillTemplate, today: NaiveDate) -> BillStatus {
    if is_paid_for_current_cycle(bill) {
        return BillStatus::Paid;
    }
    match bill.due_date {
        Some(due) if due < today => BillStatus::Overdue,
        _ => BillStatus::Pending,
    }
}

/// True when the most recent payment falls inside the billing period that
/// ends at the bill's due date. A stale `isPaid` flag whose latest payment
/// belongs to an earlier cycle does not count.
pub fn is_paid_for_current_cycle(bill: &BillTemplate) -> bool {
    if !bill.is_paid {
        return false;
    }
    let Some(last) = bill.latest_payment() else {
        // Manually toggled paid without a record; trust the flag.
        return true;
    };
    let Some(due) = bill.due_date else {
        return true;
    };
    match bill.recurrence.previous(due) {
        Some(cycle_start) => last.paid_date > cycle_start,
        None => true,
    }
}

/// The two documents produced by settling a bill. The caller must persist
/// them as one logical unit: if the second write fails, retry rather than
/// leave a half-advanced bill.
#[derive(Debug, Clone)]
pub struct PaidOutcome {
    pub settled: BillTemplate,
    pub next: Option<BillTemplate>,
}

/// Settles a bill: appends the payment record, flips `isPaid`, and for
/// recurring bills synthesizes the next instance one cadence ahead. The
/// settled instance keeps its id and history; the next instance starts
/// fresh with a new id and an empty history.
pub fn mark_paid(bill: &BillTemplate, record: PaymentRecord) -> PaidOutcome {
    let mut settled = bill.clone();
    if let Some(txn_id) = record.transaction_id.as_ref() {
        if !settled.linked_transaction_ids.contains(txn_id) {
            settled.linked_transaction_ids.push(txn_id.clone());
        }
    }
    settled.payment_history.push(record);
    settled.is_paid = true;

    let next = bill.due_date.and_then(|due| {
        bill.recurrence.advance(due).map(|next_due| BillTemplate {
            id: Uuid::new_v4(),
            name: bill.name.clone(),
            amount: bill.amount,
            due_date: Some(next_due),
            recurrence: bill.recurrence,
            category: bill.category.clone(),
            is_paid: false,
            payment_history: Vec::new(),
            merchant_variants: bill.merchant_variants.clone(),
            linked_transaction_ids: bill.linked_transaction_ids.clone(),
        })
    });

    PaidOutcome { settled, next }
}

/// Display ordering: overdue before pending regardless of date, then
/// ascending due date, with undated bills last.
pub fn display_order(a: &BillTemplate, b: &BillTemplate, today: NaiveDate) -> Ordering {
    let rank_a = bill_status(a, today).display_rank();
    let rank_b = bill_status(b, today).display_rank();
    rank_a
        .cmp(&rank_b)
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Sorts bills for display using [`display_order`].
pub fn sort_for_display(bills: &mut [BillTemplate], today: NaiveDate) {
    bills.sort_by(|a, b| display_order(a, b, today));
}
