use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::records::{Contract, Payment};
use crate::status::recompute_status;
use crate::types::{ContractId, PaymentStatus};

/// bulk-generated installment plan for a contract
///
/// Payments are only ever created this way, one per month of contract
/// duration; they are never created individually.
#[derive(Debug, Clone)]
pub struct InstallmentSchedule {
    pub contract_id: ContractId,
    pub first_due: NaiveDate,
    pub payments: Vec<Payment>,
}

impl InstallmentSchedule {
    /// generate the plan with the default first due date, one month
    /// after the contract start
    pub fn generate(contract: &Contract, today: NaiveDate) -> Result<Self> {
        let first_due = add_months(contract.start_date, 1);
        Self::generate_from(contract, first_due, today)
    }

    /// generate the plan from an explicit first due date
    ///
    /// Each installment is `total_value / duration_months` rounded to
    /// cents; the final installment absorbs the rounding remainder so
    /// the plan sums exactly to the contract value. Due dates advance
    /// one calendar month at a time, clamped at month end. Statuses are
    /// computed against `today`, so a backdated contract is born with
    /// overdue installments.
    pub fn generate_from(contract: &Contract, first_due: NaiveDate, today: NaiveDate) -> Result<Self> {
        if contract.duration_months < 1 {
            return Err(LedgerError::InvalidDuration {
                months: contract.duration_months,
            });
        }

        let months = contract.duration_months;
        let installment = contract.total_value / Decimal::from(months);

        let mut payments = Vec::with_capacity(months as usize);
        for number in 1..=months {
            let due_date = add_months(first_due, number - 1);
            let amount = if number == months {
                // last installment absorbs the rounding remainder
                contract.total_value - installment * Decimal::from(months - 1)
            } else {
                installment
            };

            let mut payment = Payment {
                payment_id: Uuid::new_v4(),
                contract_id: contract.contract_id,
                installment_number: number,
                due_date,
                paid_on: None,
                amount,
                original_amount: amount,
                status: PaymentStatus::Open,
                note: None,
                fine_applied: false,
                last_revalued_on: None,
            };
            payment.status = recompute_status(&payment, today);
            payments.push(payment);
        }

        Ok(Self {
            contract_id: contract.contract_id,
            first_due,
            payments,
        })
    }

    /// total billed across the plan
    pub fn total(&self) -> Money {
        Money::total(self.payments.iter().map(|p| p.amount))
    }
}

/// add whole calendar months, clamping at month end
fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date + Months::new(months)
}
