use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Settlement status as reported by the bank-aggregation collaborator.
/// Unknown strings map to `Unknown` rather than failing deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Posted,
    Cleared,
    #[serde(other)]
    Unknown,
}

/// A bank transaction. Owned by the aggregation collaborator; the engine
/// only reads it. `amount` is signed: negative = outflow, positive = inflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub merchant_name: String,
    /// Aggregator feeds are loosely typed here: `true`/`false` arrive both as
    /// booleans and as strings.
    #[serde(default, deserialize_with = "de_loose_bool")]
    pub pending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
}

impl Transaction {
    /// True only when the transaction is affirmatively pending and nothing
    /// contradicts that: an explicit `pending = false` or a posted/cleared
    /// status wins over a leftover pending flag.
    pub fn is_truly_pending(&self) -> bool {
        let flagged =
            self.pending == Some(true) || self.status == Some(TransactionStatus::Pending);
        let contradicted = self.pending == Some(false)
            || matches!(
                self.status,
                Some(TransactionStatus::Posted) | Some(TransactionStatus::Cleared)
            );
        flagged && !contradicted
    }

    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }
}

fn de_loose_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Flag(value)) => Some(value),
        Some(Raw::Text(text)) => match text.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        None => None,
    })
}

/// A depository account with its bank-reported balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositoryAccount {
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub live_balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_flag_tolerates_string_typing() {
        let txn: Transaction = serde_json::from_str(
            r#"{"id":"t1","accountId":"a1","amount":-4.5,"date":"2025-11-20","merchantName":"Coffee","pending":"true"}"#,
        )
        .unwrap();
        assert_eq!(txn.pending, Some(true));
        assert!(txn.is_truly_pending());
    }

    #[test]
    fn posted_status_overrides_leftover_pending_flag() {
        let txn: Transaction = serde_json::from_str(
            r#"{"id":"t2","accountId":"a1","amount":-4.5,"date":"2025-11-20","merchantName":"Coffee","pending":true,"status":"posted"}"#,
        )
        .unwrap();
        assert!(!txn.is_truly_pending());
    }

    #[test]
    fn unknown_status_strings_do_not_fail() {
        let txn: Transaction = serde_json::from_str(
            r#"{"id":"t3","accountId":"a1","amount":-4.5,"date":"2025-11-20","merchantName":"Coffee","status":"settling"}"#,
        )
        .unwrap();
        assert_eq!(txn.status, Some(TransactionStatus::Unknown));
        assert!(!txn.is_truly_pending());
    }
}
