#![allow(dead_code)]

use chrono::NaiveDate;
use spendable_core::bank::{DepositoryAccount, Transaction};
use spendable_core::bills::{BillRecurrence, BillTemplate};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn posted_txn(
    id: &str,
    account_id: &str,
    merchant: &str,
    amount: f64,
    on: NaiveDate,
) -> Transaction {
    Transaction {
        id: id.into(),
        account_id: account_id.into(),
        amount,
        date: on,
        merchant_name: merchant.into(),
        pending: Some(false),
        status: Some(spendable_core::bank::TransactionStatus::Posted),
        mask: None,
        institution_name: None,
    }
}

pub fn pending_txn(
    id: &str,
    account_id: &str,
    merchant: &str,
    amount: f64,
    on: NaiveDate,
) -> Transaction {
    Transaction {
        pending: Some(true),
        status: None,
        ..posted_txn(id, account_id, merchant, amount, on)
    }
}

pub fn account(id: &str, live_balance: f64) -> DepositoryAccount {
    DepositoryAccount {
        account_id: id.into(),
        name: None,
        live_balance,
        available_balance: None,
        mask: None,
        institution_name: None,
    }
}

pub fn monthly_bill(name: &str, amount: f64, due: NaiveDate) -> BillTemplate {
    BillTemplate::new(name, amount, Some(due), BillRecurrence::Monthly)
}
