//! Spendable Core implements the recurring-event and spendability engine behind
//! a personal-finance tracker: payday projection, bill lifecycle, transaction
//! matching, recurring-charge detection, balance projection, settings schema
//! management, and the aggregate safe-to-spend report.
//!
//! Everything here is a pure computation over data the caller has already
//! fetched; the document store and bank-aggregation API live outside the crate.

pub mod bank;
pub mod bills;
pub mod errors;
pub mod heuristics;
pub mod matching;
pub mod schedule;
pub mod settings;
pub mod spendability;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spendable Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
