use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::Money;
use crate::records::{Client, Payment};

/// late-charge assessment for one overdue installment
///
/// A one-time fine plus simple interest prorated by days late:
///
/// `updated = original * (1 + fine_rate) + original * (days / 30) * monthly_rate`
///
/// Both parts are computed from `original_amount`, never from the
/// already-revalued `amount`, so assessing again on a later day
/// replaces the previous charge instead of compounding it.
#[derive(Debug, Clone, PartialEq)]
pub struct LateCharge {
    pub fine: Money,
    pub interest: Money,
    pub days_late: u32,
    pub updated_amount: Money,
}

impl LateCharge {
    /// assess the charge for a payment at the reference date
    ///
    /// Returns `None` when the payment is not yet late, is already
    /// settled, or the client has no late-charge terms configured.
    pub fn assess(payment: &Payment, client: &Client, today: NaiveDate) -> Option<LateCharge> {
        if payment.is_settled() {
            return None;
        }
        let days_late = payment.days_late(today);
        if days_late == 0 {
            return None;
        }
        if client.fine_rate.is_none() && client.monthly_interest_rate.is_none() {
            return None;
        }

        let original = payment.original_amount.as_decimal();

        let fine = client
            .fine_rate
            .map(|rate| original * rate.as_decimal())
            .unwrap_or(Decimal::ZERO);

        let interest = client
            .monthly_interest_rate
            .map(|rate| original * Decimal::from(days_late) / dec!(30) * rate.as_decimal())
            .unwrap_or(Decimal::ZERO);

        Some(LateCharge {
            fine: Money::from_decimal(fine),
            interest: Money::from_decimal(interest),
            days_late,
            updated_amount: Money::from_decimal(original + fine + interest),
        })
    }
}

/// apply an assessed charge, returning the revalued payment record
pub fn apply_late_charge(payment: &Payment, charge: &LateCharge, today: NaiveDate) -> Payment {
    let mut revalued = payment.clone();
    revalued.amount = charge.updated_amount;
    revalued.fine_applied = revalued.fine_applied || charge.fine.is_positive();
    revalued.last_revalued_on = Some(today);
    revalued
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::PaymentStatus;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn client_with_terms() -> Client {
        Client::new("Ana Souza", "123.456.789-00", "+55 11 90000-0001")
            .with_late_charges(Rate::from_percentage(2), Rate::from_percentage(10))
    }

    fn unpaid(amount: Money, due: NaiveDate) -> Payment {
        Payment {
            payment_id: Uuid::new_v4(),
            contract_id: Uuid::new_v4(),
            installment_number: 1,
            due_date: due,
            paid_on: None,
            amount,
            original_amount: amount,
            status: PaymentStatus::Open,
            note: None,
            fine_applied: false,
            last_revalued_on: None,
        }
    }

    #[test]
    fn test_fine_and_interest_five_days_late() {
        // 1000.00 at 2% fine and 10% a month, 5 days late: 1036.67
        let client = client_with_terms();
        let payment = unpaid(Money::from_major(1_000), date(2024, 2, 10));

        let charge = LateCharge::assess(&payment, &client, date(2024, 2, 15)).unwrap();

        assert_eq!(charge.days_late, 5);
        assert_eq!(charge.fine, Money::from_major(20));
        assert_eq!(charge.interest, Money::from_str_exact("16.67").unwrap());
        assert_eq!(
            charge.updated_amount,
            Money::from_str_exact("1036.67").unwrap()
        );
    }

    #[test]
    fn test_not_late_yields_no_charge() {
        let client = client_with_terms();
        let payment = unpaid(Money::from_major(1_000), date(2024, 2, 10));

        assert!(LateCharge::assess(&payment, &client, date(2024, 2, 10)).is_none());
        assert!(LateCharge::assess(&payment, &client, date(2024, 2, 1)).is_none());
    }

    #[test]
    fn test_settled_payment_is_never_charged() {
        let client = client_with_terms();
        let mut payment = unpaid(Money::from_major(1_000), date(2024, 2, 10));
        payment.paid_on = Some(date(2024, 2, 20));
        payment.status = PaymentStatus::PaidLate;

        assert!(LateCharge::assess(&payment, &client, date(2024, 3, 1)).is_none());
    }

    #[test]
    fn test_client_without_terms_is_never_charged() {
        let client = Client::new("Sem Taxas", "000.000.000-00", "+55 11 90000-0003");
        let payment = unpaid(Money::from_major(1_000), date(2024, 2, 10));

        assert!(LateCharge::assess(&payment, &client, date(2024, 3, 1)).is_none());
    }

    #[test]
    fn test_reassessment_replaces_instead_of_compounding() {
        let client = client_with_terms();
        let payment = unpaid(Money::from_major(1_000), date(2024, 2, 10));

        let day5 = LateCharge::assess(&payment, &client, date(2024, 2, 15)).unwrap();
        let revalued = apply_late_charge(&payment, &day5, date(2024, 2, 15));

        assert_eq!(revalued.amount, Money::from_str_exact("1036.67").unwrap());
        assert_eq!(revalued.original_amount, Money::from_major(1_000));
        assert!(revalued.fine_applied);
        assert_eq!(revalued.last_revalued_on, Some(date(2024, 2, 15)));

        // ten days late, assessed on the already-revalued record
        let day10 = LateCharge::assess(&revalued, &client, date(2024, 2, 20)).unwrap();
        assert_eq!(day10.fine, Money::from_major(20)); // fine does not grow
        assert_eq!(day10.interest, Money::from_str_exact("33.33").unwrap());
        assert_eq!(
            day10.updated_amount,
            Money::from_str_exact("1053.33").unwrap()
        );
    }

    #[test]
    fn test_interest_only_client() {
        let client = Client::new("Juros Apenas", "111.111.111-11", "+55 11 90000-0004")
            .with_late_charges(Rate::ZERO, Rate::from_percentage(10));
        let payment = unpaid(Money::from_major(600), date(2024, 2, 10));

        // 30 days late: one full month of interest, no fine
        let charge = LateCharge::assess(&payment, &client, date(2024, 3, 11)).unwrap();
        assert_eq!(charge.fine, Money::ZERO);
        assert_eq!(charge.interest, Money::from_major(60));
        assert_eq!(charge.updated_amount, Money::from_major(660));
    }
}
