use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::merge::ensure_required_fields;
use super::migrate::{migrate, CURRENT_SCHEMA_VERSION};
use crate::errors::EngineError;
use crate::schedule::{Cadence, EarlyDeposit, PaySchedule};
use chrono::NaiveDate;

pub(crate) fn default_cadence() -> Cadence {
    Cadence::Biweekly
}

pub(crate) const DEFAULT_SAFETY_BUFFER: f64 = 100.0;
pub(crate) const DEFAULT_WEEKLY_ESSENTIALS: f64 = 150.0;

/// Primary earner pay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaySettings {
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_cadence")]
    pub cadence: Cadence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_pay_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl Default for PaySettings {
    fn default() -> Self {
        Self {
            amount: 0.0,
            cadence: default_cadence(),
            last_pay_date: None,
            destination: None,
        }
    }
}

/// Optional second earner. A name is only required once an amount exists.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SecondarySettings {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_cadence")]
    pub cadence: Cadence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_pay_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default = "default_safety_buffer")]
    pub safety_buffer: f64,
    #[serde(default = "default_weekly_essentials")]
    pub weekly_essentials: f64,
}

fn default_safety_buffer() -> f64 {
    DEFAULT_SAFETY_BUFFER
}

fn default_weekly_essentials() -> f64 {
    DEFAULT_WEEKLY_ESSENTIALS
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            safety_buffer: DEFAULT_SAFETY_BUFFER,
            weekly_essentials: DEFAULT_WEEKLY_ESSENTIALS,
        }
    }
}

/// The user's versioned configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument {
    #[serde(default = "current_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub pay: PaySettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<SecondarySettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_deposit: Option<EarlyDeposit>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub linked_account_ids: Vec<String>,
}

fn current_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

impl Default for SettingsDocument {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            pay: PaySettings::default(),
            secondary: None,
            early_deposit: None,
            preferences: Preferences::default(),
            linked_account_ids: Vec::new(),
        }
    }
}

impl SettingsDocument {
    /// Migrates a raw stored document to the current schema, fills missing
    /// required fields with defaults, and deserializes the typed form.
    pub fn from_value(value: Value) -> Result<Self, EngineError> {
        let migrated = migrate(value)?;
        let ensured = ensure_required_fields(migrated);
        Ok(serde_json::from_value(ensured)?)
    }

    /// Primary pay schedule, if enough is configured to project one.
    pub fn primary_schedule(&self) -> Option<PaySchedule> {
        let anchor = self.pay.last_pay_date?;
        if self.pay.amount <= 0.0 {
            return None;
        }
        Some(PaySchedule {
            cadence: self.pay.cadence,
            amount: self.pay.amount,
            anchor_date: anchor,
            destination: self.pay.destination.clone(),
        })
    }

    /// Secondary pay schedule; only present when a secondary amount exists.
    pub fn secondary_schedule(&self) -> Option<PaySchedule> {
        let secondary = self.secondary.as_ref()?;
        let anchor = secondary.last_pay_date?;
        if secondary.amount <= 0.0 {
            return None;
        }
        Some(PaySchedule {
            cadence: secondary.cadence,
            amount: secondary.amount,
            anchor_date: anchor,
            destination: None,
        })
    }
}
