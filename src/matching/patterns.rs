use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::normalize::{name_similarity, normalize_merchant};
use crate::bank::Transaction;
use crate::bills::BillTemplate;
use crate::heuristics::Heuristics;
use crate::utils::round_cents;

/// Keyword fragments matched against normalized merchant names. First hit
/// wins, so more specific fragments sit before generic ones.
static CATEGORY_KEYWORDS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("netflix", "Streaming"),
        ("hulu", "Streaming"),
        ("disney", "Streaming"),
        ("paramount", "Streaming"),
        ("youtube", "Streaming"),
        ("spotify", "Music"),
        ("apple music", "Music"),
        ("audible", "Entertainment"),
        ("patreon", "Entertainment"),
        ("kindle", "Entertainment"),
        ("icloud", "Software"),
        ("adobe", "Software"),
        ("github", "Software"),
        ("dropbox", "Software"),
        ("1password", "Software"),
        ("gym", "Health & Fitness"),
        ("fitness", "Health & Fitness"),
        ("peloton", "Health & Fitness"),
        ("electric", "Utilities"),
        ("energy", "Utilities"),
        ("power", "Utilities"),
        ("water", "Utilities"),
        ("gas", "Utilities"),
        ("sewer", "Utilities"),
        ("internet", "Internet"),
        ("comcast", "Internet"),
        ("xfinity", "Internet"),
        ("spectrum", "Internet"),
        ("verizon", "Phone"),
        ("t mobile", "Phone"),
        ("at t", "Phone"),
        ("mint mobile", "Phone"),
        ("insurance", "Insurance"),
        ("geico", "Insurance"),
        ("progressive", "Insurance"),
        ("allstate", "Insurance"),
        ("mortgage", "Housing"),
        ("rent", "Housing"),
        ("storage", "Housing"),
    ]
});

/// Categories whose recurring charges are subscriptions rather than bills.
const SUBSCRIPTION_CATEGORIES: &[&str] = &[
    "Streaming",
    "Music",
    "Software",
    "Entertainment",
    "News",
    "Health & Fitness",
];

const DEFAULT_CATEGORY: &str = "Other";

/// What kind of recurring obligation a detected candidate looks like.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SuggestedKind {
    #[serde(rename = "subscription")]
    Subscription,
    #[serde(rename = "recurring-bill")]
    RecurringBill,
}

/// A recurring charge proposed from raw transaction history. Transient until
/// the user (or an auto-accept policy) promotes it into a [`BillTemplate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringCandidate {
    pub merchant_name: String,
    pub average_amount: f64,
    pub cadence_days: i64,
    pub next_renewal: NaiveDate,
    pub occurrences: Vec<Transaction>,
    pub suggested_category: String,
    pub suggested_kind: SuggestedKind,
}

/// Static keyword lookup from normalized merchant name to category.
pub fn category_for_merchant(normalized_name: &str) -> &'static str {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized_name.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

/// Scans raw history for charges that repeat on a roughly monthly cadence
/// with stable amounts. Purely rule-based: repetition, amount stability,
/// and mean day-gap are the only signals.
pub fn detect_candidates(
    transactions: &[Transaction],
    heuristics: &Heuristics,
) -> Vec<RecurringCandidate> {
    // BTreeMap keeps candidate output deterministic across runs.
    let mut groups: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
    for txn in transactions.iter().filter(|txn| txn.is_outflow()) {
        let key = normalize_merchant(&txn.merchant_name);
        if key.is_empty() {
            continue;
        }
        groups.entry(key).or_default().push(txn);
    }

    let mut candidates = Vec::new();
    for (key, mut group) in groups {
        if group.len() < heuristics.min_occurrences {
            continue;
        }
        group.sort_by_key(|txn| txn.date);

        let mean_amount =
            group.iter().map(|txn| txn.amount.abs()).sum::<f64>() / group.len() as f64;
        let tolerance = heuristics.amount_stability_ratio * mean_amount;
        let stable = group
            .iter()
            .all(|txn| (txn.amount.abs() - mean_amount).abs() <= tolerance);
        if !stable {
            continue;
        }

        let gaps: Vec<i64> = group
            .windows(2)
            .map(|pair| (pair[1].date - pair[0].date).num_days())
            .collect();
        let mean_gap = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
        let (min_gap, max_gap) = heuristics.cadence_gap_days;
        if mean_gap < min_gap || mean_gap > max_gap {
            continue;
        }

        let cadence_days = mean_gap.round() as i64;
        let last_seen = group.last().expect("group is non-empty").date;
        let category = category_for_merchant(&key);
        candidates.push(RecurringCandidate {
            merchant_name: group[0].merchant_name.clone(),
            average_amount: round_cents(mean_amount),
            cadence_days,
            next_renewal: last_seen + Duration::days(cadence_days),
            occurrences: group.into_iter().cloned().collect(),
            suggested_category: category.to_string(),
            suggested_kind: if SUBSCRIPTION_CATEGORIES.contains(&category) {
                SuggestedKind::Subscription
            } else {
                SuggestedKind::RecurringBill
            },
        });
    }
    candidates
}

/// Dedup check against an existing bill, looser than the payment matcher
/// because this is a discovery step: fuzzy similarity alone, or a close
/// amount with a weaker name signal.
pub fn is_duplicate_of(
    candidate: &RecurringCandidate,
    bill: &BillTemplate,
    heuristics: &Heuristics,
) -> bool {
    let similarity = bill
        .name_variants()
        .map(|variant| name_similarity(&candidate.merchant_name, variant))
        .fold(0.0_f64, f64::max);
    if similarity >= heuristics.dedup_similarity {
        return true;
    }
    let amount_close = (candidate.average_amount - bill.amount.abs()).abs()
        <= heuristics.dedup_amount_tolerance;
    amount_close && similarity >= heuristics.dedup_relaxed_similarity
}
