use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a client (account holder)
pub type ClientId = Uuid;

/// unique identifier for a contract
pub type ContractId = Uuid;

/// unique identifier for a payment (installment)
pub type PaymentId = Uuid;

/// persisted payment status
///
/// The stored value can be stale: an `Open` payment whose due date has
/// passed is semantically overdue until a reconciliation sweep rewrites
/// it. Display and aggregation must go through
/// [`effective_status`](crate::status::effective_status) rather than
/// trusting this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// unpaid, due date not yet evaluated against the calendar
    Open,
    /// explicitly marked late
    Overdue,
    /// settled on or before the due date
    Paid,
    /// settled after the due date
    PaidLate,
}

impl PaymentStatus {
    /// settled statuses no longer count toward the receivable balance
    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::PaidLate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_statuses() {
        assert!(PaymentStatus::Paid.is_settled());
        assert!(PaymentStatus::PaidLate.is_settled());
        assert!(!PaymentStatus::Open.is_settled());
        assert!(!PaymentStatus::Overdue.is_settled());
    }
}
