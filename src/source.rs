use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::records::{Client, Contract, Payment};
use crate::snapshot::LedgerSnapshot;
use crate::status::mark_as_paid;
use crate::types::{ContractId, PaymentId, PaymentStatus};

/// seam to the external data-access layer
///
/// The core never fetches anything itself; the host implements this
/// over whatever transport it has and hands the results to
/// [`load_partial`].
pub trait DataSource {
    fn fetch_clients(&self) -> Result<Vec<Client>>;
    fn fetch_contracts(&self) -> Result<Vec<Contract>>;
    fn fetch_payments(&self) -> Result<Vec<Payment>>;
}

/// seam to the external persistence layer for payment updates
pub trait PaymentStore {
    /// persist an update and return the confirmed record; the host
    /// merges the result back with
    /// [`LedgerSnapshot::apply_payment`](crate::snapshot::LedgerSnapshot::apply_payment)
    fn persist_payment(&mut self, update: &PaymentUpdate) -> Result<Payment>;
}

/// update payload for one payment, shaped for the persistence seam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub payment_id: PaymentId,
    pub contract_id: ContractId,
    pub installment_number: u32,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub paid_on: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub note: Option<String>,
}

impl PaymentUpdate {
    /// payload mirroring a payment record as-is
    pub fn from_payment(payment: &Payment) -> Self {
        Self {
            payment_id: payment.payment_id,
            contract_id: payment.contract_id,
            installment_number: payment.installment_number,
            amount: payment.amount,
            due_date: payment.due_date,
            paid_on: payment.paid_on,
            status: payment.status,
            note: payment.note.clone(),
        }
    }

    /// settlement payload: the mark-as-paid rule applied to `payment`
    pub fn settle(payment: &Payment, paid_on: NaiveDate) -> Self {
        Self::from_payment(&mark_as_paid(payment, paid_on))
    }
}

/// what a partial load could not fill in
#[derive(Debug)]
pub struct LoadFailure {
    pub collection: &'static str,
    pub error: LedgerError,
}

/// load a snapshot with each collection fetched independently
///
/// One failing fetch does not block the others: the failed collection
/// comes back empty and the failure is reported alongside the
/// snapshot, for the host to surface.
pub fn load_partial(source: &impl DataSource) -> (LedgerSnapshot, Vec<LoadFailure>) {
    let mut failures = Vec::new();

    let clients = source.fetch_clients().unwrap_or_else(|error| {
        failures.push(LoadFailure {
            collection: "clients",
            error,
        });
        Vec::new()
    });
    let contracts = source.fetch_contracts().unwrap_or_else(|error| {
        failures.push(LoadFailure {
            collection: "contracts",
            error,
        });
        Vec::new()
    });
    let payments = source.fetch_payments().unwrap_or_else(|error| {
        failures.push(LoadFailure {
            collection: "payments",
            error,
        });
        Vec::new()
    });

    (LedgerSnapshot::new(clients, contracts, payments), failures)
}
