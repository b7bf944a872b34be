//! Bank-aggregation collaborator shapes and balance projection.

pub mod balance;
pub mod transaction;

pub use balance::{project_account, project_balances, AccountProjection, BalanceSummary};
pub use transaction::{DepositoryAccount, Transaction, TransactionStatus};
