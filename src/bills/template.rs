use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::cadence::shift_month;

/// Recurrence rule for a bill or subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillRecurrence {
    #[serde(rename = "one-time")]
    OneTime,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl BillRecurrence {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, BillRecurrence::OneTime)
    }

    /// Due date one cycle ahead; `None` for one-time bills.
    pub fn advance(&self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            BillRecurrence::OneTime => None,
            BillRecurrence::Weekly => Some(from + Duration::days(7)),
            BillRecurrence::Biweekly => Some(from + Duration::days(14)),
            BillRecurrence::Monthly => Some(shift_month(from, 1)),
            BillRecurrence::Quarterly => Some(shift_month(from, 3)),
            BillRecurrence::Yearly => Some(shift_month(from, 12)),
        }
    }

    /// Start of the billing cycle ending at `from`; `None` for one-time
    /// bills, whose cycle is unbounded.
    pub fn previous(&self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            BillRecurrence::OneTime => None,
            BillRecurrence::Weekly => Some(from - Duration::days(7)),
            BillRecurrence::Biweekly => Some(from - Duration::days(14)),
            BillRecurrence::Monthly => Some(shift_month(from, -1)),
            BillRecurrence::Quarterly => Some(shift_month(from, -3)),
            BillRecurrence::Yearly => Some(shift_month(from, -12)),
        }
    }
}

/// How a payment record came to exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentSource {
    Manual,
    Matched,
    Auto,
}

/// Append-only record of one settled payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub paid_date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub source: PaymentSource,
}

/// One bill instance. Created by the user or promoted from a detected
/// recurring candidate; settled instances are retained for history rather
/// than mutated into the next period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTemplate {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    /// A bill without a due date cannot be scheduled; projections skip it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub recurrence: BillRecurrence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub payment_history: Vec<PaymentRecord>,
    #[serde(default)]
    pub merchant_variants: Vec<String>,
    #[serde(default)]
    pub linked_transaction_ids: Vec<String>,
}

impl BillTemplate {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        due_date: Option<NaiveDate>,
        recurrence: BillRecurrence,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            due_date,
            recurrence,
            category: None,
            is_paid: false,
            payment_history: Vec::new(),
            merchant_variants: Vec::new(),
            linked_transaction_ids: Vec::new(),
        }
    }

    /// Most recent payment by paid date.
    pub fn latest_payment(&self) -> Option<&PaymentRecord> {
        self.payment_history
            .iter()
            .max_by_key(|record| record.paid_date)
    }

    /// The bill's display name plus every merchant spelling the bank has
    /// used for it.
    pub fn name_variants(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.merchant_variants.iter().map(String::as_str))
    }
}
