use std::collections::HashSet;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::decimal::Money;
use crate::filters::PaymentFilters;
use crate::records::{Client, Contract, Payment};
use crate::snapshot::LedgerSnapshot;
use crate::status::{effective_status, is_effectively_overdue};
use crate::types::{ClientId, ContractId};

/// read-side query engine over a ledger snapshot
///
/// Borrows the snapshot immutably and evaluates every status rule
/// against a single reference date, so a filtered listing and the
/// totals rendered beside it can never disagree. Unknown ids yield
/// empty results or zero sums, never errors.
pub struct LedgerQuery<'a> {
    ledger: &'a LedgerSnapshot,
    today: NaiveDate,
}

impl<'a> LedgerQuery<'a> {
    /// query engine with "today" taken from the time provider
    pub fn new(ledger: &'a LedgerSnapshot, time: &SafeTimeProvider) -> Self {
        Self {
            ledger,
            today: time.now().date_naive(),
        }
    }

    /// query engine pinned to an explicit reference date
    pub fn at(ledger: &'a LedgerSnapshot, today: NaiveDate) -> Self {
        Self { ledger, today }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.today
    }

    pub fn ledger(&self) -> &'a LedgerSnapshot {
        self.ledger
    }

    /// payments across every contract of a client, in input order
    pub fn payments_for_client(&self, client_id: ClientId) -> Vec<&'a Payment> {
        let contract_ids = self.ledger.contract_ids_of(client_id);
        self.ledger
            .payments
            .iter()
            .filter(|p| contract_ids.contains(&p.contract_id))
            .collect()
    }

    /// payments of a contract, ascending by installment number
    pub fn payments_for_contract(&self, contract_id: ContractId) -> Vec<&'a Payment> {
        let mut payments: Vec<&Payment> = self
            .ledger
            .payments
            .iter()
            .filter(|p| p.contract_id == contract_id)
            .collect();
        payments.sort_by_key(|p| p.installment_number);
        payments
    }

    /// payments of a contract matching the filter criteria
    ///
    /// The status criterion is matched against the EFFECTIVE status:
    /// filtering by `Overdue` catches stale open installments past
    /// their due date, and filtering by `Open` excludes them. Date
    /// bounds are inclusive on the due date. The result stays sorted
    /// by installment number.
    pub fn filtered_payments(
        &self,
        contract_id: ContractId,
        filters: &PaymentFilters,
    ) -> Vec<&'a Payment> {
        self.payments_for_contract(contract_id)
            .into_iter()
            .filter(|p| filters.status.matches(effective_status(p, self.today)))
            .filter(|p| filters.date_from.map_or(true, |from| p.due_date >= from))
            .filter(|p| filters.date_to.map_or(true, |to| p.due_date <= to))
            .collect()
    }

    /// contracts of a client, optionally only those carrying an
    /// effectively overdue payment; input order is preserved
    pub fn contracts_for_client(
        &self,
        client_id: ClientId,
        overdue_only: bool,
    ) -> Vec<&'a Contract> {
        self.ledger
            .contracts
            .iter()
            .filter(|c| c.client_id == client_id)
            .filter(|c| !overdue_only || self.has_overdue_payment(c.contract_id))
            .collect()
    }

    /// whether any payment of the contract reads as overdue
    pub fn has_overdue_payment(&self, contract_id: ContractId) -> bool {
        self.ledger
            .payments
            .iter()
            .any(|p| p.contract_id == contract_id && is_effectively_overdue(p, self.today))
    }

    /// amount still owed by the client: every payment not yet settled
    ///
    /// Uses the PERSISTED status: an installment stays receivable
    /// whether or not its overdue flag has been reconciled.
    pub fn total_receivable(&self, client_id: ClientId) -> Money {
        let contract_ids = self.ledger.contract_ids_of(client_id);
        Money::total(
            self.ledger
                .payments
                .iter()
                .filter(|p| contract_ids.contains(&p.contract_id))
                .filter(|p| !p.status.is_settled())
                .map(|p| p.amount),
        )
    }

    /// overdue portion of the client's balance, by effective status
    ///
    /// Always a subset of [`total_receivable`](Self::total_receivable)
    /// on consistent data.
    pub fn total_overdue(&self, client_id: ClientId) -> Money {
        let contract_ids = self.ledger.contract_ids_of(client_id);
        Money::total(
            self.ledger
                .payments
                .iter()
                .filter(|p| contract_ids.contains(&p.contract_id))
                .filter(|p| is_effectively_overdue(p, self.today))
                .map(|p| p.amount),
        )
    }

    /// clients with at least one effectively overdue payment across
    /// any of their contracts, in input order
    pub fn clients_with_overdue(&self) -> Vec<&'a Client> {
        let mut overdue_clients: HashSet<ClientId> = HashSet::new();
        for payment in &self.ledger.payments {
            if is_effectively_overdue(payment, self.today) {
                if let Some(contract) = self.ledger.contract(payment.contract_id) {
                    overdue_clients.insert(contract.client_id);
                }
            }
        }

        self.ledger
            .clients
            .iter()
            .filter(|c| overdue_clients.contains(&c.client_id))
            .collect()
    }

    /// case-insensitive client search on name, registration, or phone;
    /// an empty term returns everyone
    pub fn search_clients(&self, term: &str) -> Vec<&'a Client> {
        if term.is_empty() {
            return self.ledger.clients.iter().collect();
        }
        self.ledger
            .clients
            .iter()
            .filter(|c| c.matches(term))
            .collect()
    }
}
