//! Versioned settings document: validation, migration, and safe merging.

pub mod document;
pub mod merge;
pub mod migrate;

pub use document::{PaySettings, Preferences, SecondarySettings, SettingsDocument};
pub use merge::{ensure_required_fields, merge_safely, validate, Validation, PROTECTED_FIELDS};
pub use migrate::{migrate, CURRENT_SCHEMA_VERSION};
