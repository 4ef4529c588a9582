use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::query::LedgerQuery;
use crate::records::Payment;
use crate::status::effective_status;
use crate::types::{ClientId, PaymentStatus};

/// collection report parameters: an inclusive due-date range, across
/// all clients or narrowed to one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub client_id: Option<ClientId>,
}

impl ReportRequest {
    pub fn for_all_clients(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            client_id: None,
        }
    }

    pub fn for_client(client_id: ClientId, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            client_id: Some(client_id),
        }
    }
}

/// aggregated collection figures over a reporting period
///
/// Unlike the query filters, report generation validates its input:
/// an inverted range or an unknown client id is an error here, not an
/// empty result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub client_id: Option<ClientId>,
    pub client_name: Option<String>,

    // counts by effective status
    pub total_payments: usize,
    pub paid_count: usize,
    pub overdue_count: usize,
    pub open_count: usize,
    /// settled strictly before the due date
    pub paid_early_count: usize,

    // totals
    pub total_received: Money,
    pub total_outstanding: Money,

    // percentages over total_payments, rounded to 2 places
    pub delinquency_rate: Decimal,
    pub early_payment_rate: Decimal,
}

impl CollectionReport {
    pub fn generate(query: &LedgerQuery<'_>, request: &ReportRequest) -> Result<Self> {
        if request.start > request.end {
            return Err(LedgerError::InvalidReportRange {
                start: request.start,
                end: request.end,
            });
        }

        let client_name = match request.client_id {
            Some(client_id) => {
                let client = query
                    .ledger()
                    .client(client_id)
                    .ok_or(LedgerError::ClientNotFound { id: client_id })?;
                Some(client.name.clone())
            }
            None => None,
        };

        let in_scope: Vec<&Payment> = match request.client_id {
            Some(client_id) => query.payments_for_client(client_id),
            None => query.ledger().payments.iter().collect(),
        }
        .into_iter()
        .filter(|p| p.due_within(request.start, request.end))
        .collect();

        let today = query.reference_date();

        let mut paid_count = 0;
        let mut overdue_count = 0;
        let mut open_count = 0;
        let mut paid_early_count = 0;
        let mut total_received = Money::ZERO;
        let mut total_outstanding = Money::ZERO;

        for payment in &in_scope {
            match effective_status(payment, today) {
                PaymentStatus::Paid | PaymentStatus::PaidLate => {
                    paid_count += 1;
                    total_received += payment.amount;
                    if payment.paid_on.is_some_and(|paid| paid < payment.due_date) {
                        paid_early_count += 1;
                    }
                }
                PaymentStatus::Overdue => {
                    overdue_count += 1;
                    total_outstanding += payment.amount;
                }
                PaymentStatus::Open => {
                    open_count += 1;
                    total_outstanding += payment.amount;
                }
            }
        }

        let total_payments = in_scope.len();

        Ok(Self {
            start: request.start,
            end: request.end,
            client_id: request.client_id,
            client_name,
            total_payments,
            paid_count,
            overdue_count,
            open_count,
            paid_early_count,
            total_received,
            total_outstanding,
            delinquency_rate: percentage(overdue_count, total_payments),
            early_payment_rate: percentage(paid_early_count, total_payments),
        })
    }
}

/// per-client financial summary for a statement header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientStatement {
    pub client_id: ClientId,
    pub contract_count: usize,
    pub total_paid: Money,
    pub total_overdue: Money,
    pub total_open: Money,
    pub total_overall: Money,
}

impl ClientStatement {
    /// summarize a client's position; an unknown client yields zeros
    pub fn for_client(query: &LedgerQuery<'_>, client_id: ClientId) -> Self {
        let today = query.reference_date();
        let payments = query.payments_for_client(client_id);

        let mut total_paid = Money::ZERO;
        let mut total_overdue = Money::ZERO;
        let mut total_open = Money::ZERO;

        for payment in &payments {
            match effective_status(payment, today) {
                PaymentStatus::Paid | PaymentStatus::PaidLate => total_paid += payment.amount,
                PaymentStatus::Overdue => total_overdue += payment.amount,
                PaymentStatus::Open => total_open += payment.amount,
            }
        }

        Self {
            client_id,
            contract_count: query.ledger().contracts_of(client_id).len(),
            total_paid,
            total_overdue,
            total_open,
            total_overall: total_paid + total_overdue + total_open,
        }
    }
}

fn percentage(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part as u64) * Decimal::from(100) / Decimal::from(whole as u64)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventStore;
    use crate::records::{Client, Contract};
    use crate::schedule::InstallmentSchedule;
    use crate::snapshot::LedgerSnapshot;
    use crate::status::mark_as_paid;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// four installments of 250.00 due feb..may 10; #1 paid early,
    /// #2 paid late, #3 stale open past due, #4 open in the future
    fn reporting_ledger() -> (LedgerSnapshot, ClientId) {
        let client = Client::new("Ana Souza", "123.456.789-00", "+55 11 90000-0001");
        let client_id = client.client_id;

        let contract = Contract::new(
            client_id,
            "Ana Souza",
            "123.456.789-00",
            date(2024, 1, 10),
            4,
            Money::from_major(1_000),
        )
        .unwrap();
        let mut payments = InstallmentSchedule::generate(&contract, date(2024, 1, 10))
            .unwrap()
            .payments;

        payments[0] = mark_as_paid(&payments[0], date(2024, 2, 5)); // early
        payments[1] = mark_as_paid(&payments[1], date(2024, 3, 20)); // late

        let mut snapshot = LedgerSnapshot::default();
        let mut events = EventStore::new();
        snapshot.upsert_client(client, &mut events);
        snapshot.register_contract(contract, payments, &mut events);

        (snapshot, client_id)
    }

    #[test]
    fn test_report_counts_and_totals() {
        let (snapshot, client_id) = reporting_ledger();
        let query = LedgerQuery::at(&snapshot, date(2024, 4, 20));

        let request = ReportRequest::for_client(client_id, date(2024, 1, 1), date(2024, 12, 31));
        let report = CollectionReport::generate(&query, &request).unwrap();

        assert_eq!(report.client_name.as_deref(), Some("Ana Souza"));
        assert_eq!(report.total_payments, 4);
        assert_eq!(report.paid_count, 2);
        assert_eq!(report.paid_early_count, 1);
        assert_eq!(report.overdue_count, 1); // stale open past due counts
        assert_eq!(report.open_count, 1);
        assert_eq!(report.total_received, Money::from_major(500));
        assert_eq!(report.total_outstanding, Money::from_major(500));
        assert_eq!(report.delinquency_rate, dec!(25.00));
        assert_eq!(report.early_payment_rate, dec!(25.00));
    }

    #[test]
    fn test_report_range_narrows_scope() {
        let (snapshot, client_id) = reporting_ledger();
        let query = LedgerQuery::at(&snapshot, date(2024, 4, 20));

        // february only: just the early-paid installment
        let request = ReportRequest::for_client(client_id, date(2024, 2, 1), date(2024, 2, 29));
        let report = CollectionReport::generate(&query, &request).unwrap();

        assert_eq!(report.total_payments, 1);
        assert_eq!(report.paid_count, 1);
        assert_eq!(report.total_received, Money::from_major(250));
        assert_eq!(report.total_outstanding, Money::ZERO);
    }

    #[test]
    fn test_report_validates_range_and_client() {
        let (snapshot, client_id) = reporting_ledger();
        let query = LedgerQuery::at(&snapshot, date(2024, 4, 20));

        let inverted = ReportRequest::for_client(client_id, date(2024, 5, 1), date(2024, 1, 1));
        assert!(matches!(
            CollectionReport::generate(&query, &inverted),
            Err(LedgerError::InvalidReportRange { .. })
        ));

        let ghost = ReportRequest::for_client(Uuid::new_v4(), date(2024, 1, 1), date(2024, 12, 31));
        assert!(matches!(
            CollectionReport::generate(&query, &ghost),
            Err(LedgerError::ClientNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_range_has_zero_rates() {
        let (snapshot, _) = reporting_ledger();
        let query = LedgerQuery::at(&snapshot, date(2024, 4, 20));

        let request = ReportRequest::for_all_clients(date(2020, 1, 1), date(2020, 12, 31));
        let report = CollectionReport::generate(&query, &request).unwrap();

        assert_eq!(report.total_payments, 0);
        assert_eq!(report.delinquency_rate, Decimal::ZERO);
        assert_eq!(report.early_payment_rate, Decimal::ZERO);
        assert_eq!(report.total_received, Money::ZERO);
    }

    #[test]
    fn test_all_clients_report_spans_everyone() {
        let (mut snapshot, _) = reporting_ledger();
        let mut events = EventStore::new();

        // second client with a single future installment
        let other = Client::new("Bruno Reis", "555.666.777-88", "+55 11 90000-0005");
        let other_id = other.client_id;
        snapshot.upsert_client(other, &mut events);
        let contract = Contract::new(
            other_id,
            "Bruno Reis",
            "555.666.777-88",
            date(2024, 4, 1),
            1,
            Money::from_major(400),
        )
        .unwrap();
        let schedule = InstallmentSchedule::generate(&contract, date(2024, 4, 1)).unwrap();
        snapshot.register_contract(contract, schedule.payments, &mut events);

        let query = LedgerQuery::at(&snapshot, date(2024, 4, 20));
        let request = ReportRequest::for_all_clients(date(2024, 1, 1), date(2024, 12, 31));
        let report = CollectionReport::generate(&query, &request).unwrap();

        assert_eq!(report.total_payments, 5);
        assert!(report.client_name.is_none());
    }

    #[test]
    fn test_client_statement() {
        let (snapshot, client_id) = reporting_ledger();
        let query = LedgerQuery::at(&snapshot, date(2024, 4, 20));

        let statement = ClientStatement::for_client(&query, client_id);

        assert_eq!(statement.contract_count, 1);
        assert_eq!(statement.total_paid, Money::from_major(500));
        assert_eq!(statement.total_overdue, Money::from_major(250));
        assert_eq!(statement.total_open, Money::from_major(250));
        assert_eq!(statement.total_overall, Money::from_major(1_000));

        let ghost = ClientStatement::for_client(&query, Uuid::new_v4());
        assert_eq!(ghost.total_overall, Money::ZERO);
        assert_eq!(ghost.contract_count, 0);
    }
}
