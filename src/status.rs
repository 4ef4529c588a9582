//! Status derivation rules.
//!
//! The persisted status on a [`Payment`] lags the calendar: an `Open`
//! installment past its due date stays `Open` in storage until the
//! reconciliation sweep runs. Everything that displays or aggregates
//! status goes through [`effective_status`] so the lag never leaks into
//! derived figures.

use chrono::NaiveDate;

use crate::records::Payment;
use crate::types::PaymentStatus;

/// effective status of a payment at a reference date
///
/// `Overdue` passes through; `Open` past its due date (strictly earlier
/// calendar day) reads as `Overdue`; settled statuses are untouched. A
/// due date equal to the reference date is not overdue.
pub fn effective_status(payment: &Payment, today: NaiveDate) -> PaymentStatus {
    match payment.status {
        PaymentStatus::Open if payment.due_date < today => PaymentStatus::Overdue,
        other => other,
    }
}

/// whether the payment reads as overdue at the reference date
pub fn is_effectively_overdue(payment: &Payment, today: NaiveDate) -> bool {
    effective_status(payment, today) == PaymentStatus::Overdue
}

/// settlement status for a payment settled on `paid_on`
///
/// Settling on the due date itself counts as on time.
pub fn settlement_status(due_date: NaiveDate, paid_on: NaiveDate) -> PaymentStatus {
    if paid_on <= due_date {
        PaymentStatus::Paid
    } else {
        PaymentStatus::PaidLate
    }
}

/// settle a payment, returning the updated record
///
/// Sets `paid_on`, recomputes the persisted status via
/// [`settlement_status`], and stamps the note with the payment date.
/// The input is not mutated.
pub fn mark_as_paid(payment: &Payment, paid_on: NaiveDate) -> Payment {
    let mut settled = payment.clone();
    settled.paid_on = Some(paid_on);
    settled.status = settlement_status(payment.due_date, paid_on);
    settled.note = Some(format!("Paid on {}", paid_on.format("%Y-%m-%d")));
    settled
}

/// full status recomputation, as run at creation and by the sweep
///
/// Unpaid and past due resolves to `Overdue`; a paid-on date resolves to
/// `Paid`/`PaidLate` by the settlement rule; everything else is `Open`.
/// Idempotent: feeding a payment its own recomputed status changes
/// nothing.
pub fn recompute_status(payment: &Payment, today: NaiveDate) -> PaymentStatus {
    match payment.paid_on {
        Some(paid_on) => settlement_status(payment.due_date, paid_on),
        None if payment.due_date < today => PaymentStatus::Overdue,
        None => PaymentStatus::Open,
    }
}
