use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::types::{ClientId, ContractId, PaymentId, PaymentStatus};

/// account holder being billed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub client_id: ClientId,

    // contact
    pub name: String,
    pub address: String,
    pub registration: String,
    pub phone: String,
    pub bank: String,

    /// preferred day of month for due dates
    pub due_day: Option<u8>,

    // late-charge terms, charged when an installment goes overdue
    pub fine_rate: Option<Rate>,
    pub monthly_interest_rate: Option<Rate>,
}

impl Client {
    pub fn new(name: impl Into<String>, registration: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            client_id: Uuid::new_v4(),
            name: name.into(),
            address: String::new(),
            registration: registration.into(),
            phone: phone.into(),
            bank: String::new(),
            due_day: None,
            fine_rate: None,
            monthly_interest_rate: None,
        }
    }

    /// set the late-charge terms
    pub fn with_late_charges(mut self, fine_rate: Rate, monthly_interest_rate: Rate) -> Self {
        self.fine_rate = Some(fine_rate);
        self.monthly_interest_rate = Some(monthly_interest_rate);
        self
    }

    /// case-insensitive match on name, registration, or phone
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.registration.to_lowercase().contains(&term)
            || self.phone.to_lowercase().contains(&term)
    }
}

/// installment agreement tied to a client
///
/// The contractor is the billed party and may differ from the account
/// holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub contract_id: ContractId,
    pub client_id: ClientId,

    pub contractor_name: String,
    pub contractor_registration: String,

    pub start_date: NaiveDate,
    pub duration_months: u32,
    pub total_value: Money,
}

impl Contract {
    /// create a contract, validating duration and value
    pub fn new(
        client_id: ClientId,
        contractor_name: impl Into<String>,
        contractor_registration: impl Into<String>,
        start_date: NaiveDate,
        duration_months: u32,
        total_value: Money,
    ) -> Result<Self> {
        if duration_months < 1 {
            return Err(LedgerError::InvalidDuration {
                months: duration_months,
            });
        }
        if !total_value.is_positive() {
            return Err(LedgerError::InvalidContractValue { value: total_value });
        }

        Ok(Self {
            contract_id: Uuid::new_v4(),
            client_id,
            contractor_name: contractor_name.into(),
            contractor_registration: contractor_registration.into(),
            start_date,
            duration_months,
            total_value,
        })
    }
}

/// one scheduled monthly charge under a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub contract_id: ContractId,

    /// 1-based, contiguous within the contract
    pub installment_number: u32,

    pub due_date: NaiveDate,
    pub paid_on: Option<NaiveDate>,

    /// current billed amount, including any late charges
    pub amount: Money,
    /// amount before late charges; revaluation always starts from here
    pub original_amount: Money,

    pub status: PaymentStatus,
    pub note: Option<String>,

    // late-charge tracking
    pub fine_applied: bool,
    pub last_revalued_on: Option<NaiveDate>,
}

impl Payment {
    /// settled payments carry a paid-on date
    pub fn is_settled(&self) -> bool {
        self.status.is_settled()
    }

    /// whether the settlement happened after the due date
    pub fn was_paid_late(&self) -> bool {
        match self.paid_on {
            Some(paid_on) => paid_on > self.due_date,
            None => false,
        }
    }

    /// due date within the inclusive range
    pub fn due_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.due_date >= start && self.due_date <= end
    }

    /// whole days past due; zero on or before the due date
    pub fn days_late(&self, today: NaiveDate) -> u32 {
        (today - self.due_date).num_days().max(0) as u32
    }
}
