//! Calendar arithmetic and payday projection.

pub mod cadence;
pub mod paydays;

pub use cadence::{days_until, reference_today, Cadence};
pub use paydays::{
    project_paydays, EarlyDeposit, Payday, PaydayKind, PaydayProjection, PaySchedule,
    ProjectionWarning,
};
