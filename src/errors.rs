use thiserror::Error;

/// Error type that captures the engine's fatal failure modes. Recoverable
/// conditions (invalid early-deposit split, undated bills, stale pending
/// flags) are modeled as warnings or filtering rules, not errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Settings schema version {found} is newer than supported version {supported}")]
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    #[error("Invalid settings document: {0}")]
    InvalidSettings(String),
}
