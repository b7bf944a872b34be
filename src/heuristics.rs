//! Every tolerance and threshold the matching, detection, and projection
//! heuristics consume, hoisted into one tunable object instead of being
//! scattered through the algorithms as magic numbers.

/// Threshold configuration shared across the engine.
#[derive(Debug, Clone)]
pub struct Heuristics {
    /// Absolute dollar tolerance when comparing a transaction amount to a
    /// bill amount. A fixed cent-level tolerance, not a percentage, because
    /// bill amounts are assumed stable.
    pub amount_tolerance: f64,
    /// Days before the due date a matching transaction may appear.
    pub date_lookback_days: i64,
    /// Days after the due date a matching transaction may appear. Longer than
    /// the lookback: processing delays are more common than early payments.
    pub date_lookahead_days: i64,
    /// Minimum token-Jaccard similarity for the name criterion.
    pub name_similarity_threshold: f64,
    /// Minimum criteria count (out of 3) for a qualifying match.
    pub min_criteria_met: u32,
    /// Minimum occurrences before a merchant group is considered recurring.
    pub min_occurrences: usize,
    /// Maximum deviation from the group's mean absolute amount, as a ratio.
    pub amount_stability_ratio: f64,
    /// Accepted mean day-gap range for auto-detected monthly cadence.
    pub cadence_gap_days: (f64, f64),
    /// Days after which a still-pending transaction is treated as stale data
    /// and excluded from balance projection.
    pub stale_pending_days: i64,
    /// Fuzzy name similarity at which a detected candidate duplicates an
    /// existing bill or subscription.
    pub dedup_similarity: f64,
    /// Relaxed similarity accepted when the amounts also agree.
    pub dedup_relaxed_similarity: f64,
    /// Dollar tolerance for the relaxed dedup amount check.
    pub dedup_amount_tolerance: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            amount_tolerance: 0.50,
            date_lookback_days: 3,
            date_lookahead_days: 5,
            name_similarity_threshold: 0.70,
            min_criteria_met: 2,
            min_occurrences: 2,
            amount_stability_ratio: 0.10,
            cadence_gap_days: (25.0, 35.0),
            stale_pending_days: 5,
            dedup_similarity: 0.70,
            dedup_relaxed_similarity: 0.40,
            dedup_amount_tolerance: 5.0,
        }
    }
}

impl Heuristics {
    /// Confidence a qualifying match must reach, derived from the criteria
    /// minimum so the two can never drift apart.
    pub fn acceptance_confidence(&self) -> f64 {
        f64::from(self.min_criteria_met) / 3.0
    }
}
