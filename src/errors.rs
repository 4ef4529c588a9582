use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::{ClientId, ContractId, PaymentId};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("client not found: {id}")]
    ClientNotFound {
        id: ClientId,
    },

    #[error("contract not found: {id}")]
    ContractNotFound {
        id: ContractId,
    },

    #[error("payment not found: {id}")]
    PaymentNotFound {
        id: PaymentId,
    },

    #[error("contract duration must be at least one month: {months}")]
    InvalidDuration {
        months: u32,
    },

    #[error("contract value must be positive: {value}")]
    InvalidContractValue {
        value: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("report range start {start} is after end {end}")]
    InvalidReportRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("failed to fetch {collection}: {message}")]
    FetchFailed {
        collection: &'static str,
        message: String,
    },

    #[error("failed to persist payment update: {message}")]
    PersistFailed {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
