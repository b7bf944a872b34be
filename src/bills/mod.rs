//! Bill templates, payment history, and the derived bill lifecycle.

pub mod lifecycle;
pub mod template;

pub use lifecycle::{
    bill_status, display_order, is_paid_for_current_cycle, mark_paid, sort_for_display,
    BillStatus, PaidOutcome,
};
pub use template::{BillRecurrence, BillTemplate, PaymentRecord, PaymentSource};
