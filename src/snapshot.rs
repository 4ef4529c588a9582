use serde::{Deserialize, Serialize};

use crate::events::{EventStore, LedgerEvent};
use crate::records::{Client, Contract, Payment};
use crate::types::{ClientId, ContractId, PaymentId};

/// caller-owned snapshot of the three collections
///
/// The host refreshes these wholesale from the data layer; the query
/// side never mutates them. The mutating helpers below implement the
/// optimistic local merge applied after the external layer confirms a
/// round-trip, and record what happened as events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub clients: Vec<Client>,
    pub contracts: Vec<Contract>,
    pub payments: Vec<Payment>,
}

impl LedgerSnapshot {
    pub fn new(clients: Vec<Client>, contracts: Vec<Contract>, payments: Vec<Payment>) -> Self {
        Self {
            clients,
            contracts,
            payments,
        }
    }

    // lookups

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.client_id == id)
    }

    pub fn contract(&self, id: ContractId) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.contract_id == id)
    }

    pub fn payment(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.iter().find(|p| p.payment_id == id)
    }

    /// contracts of a client, in input order
    pub fn contracts_of(&self, client_id: ClientId) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|c| c.client_id == client_id)
            .collect()
    }

    pub fn contract_ids_of(&self, client_id: ClientId) -> Vec<ContractId> {
        self.contracts
            .iter()
            .filter(|c| c.client_id == client_id)
            .map(|c| c.contract_id)
            .collect()
    }

    // optimistic merge

    /// insert or replace a client by id
    pub fn upsert_client(&mut self, client: Client, events: &mut EventStore) {
        let client_id = client.client_id;
        match self.clients.iter_mut().find(|c| c.client_id == client_id) {
            Some(existing) => {
                *existing = client;
                events.emit(LedgerEvent::ClientUpdated { client_id });
            }
            None => {
                self.clients.push(client);
                events.emit(LedgerEvent::ClientRegistered { client_id });
            }
        }
    }

    /// remove a client, cascading to its contracts and their payments
    pub fn remove_client(&mut self, client_id: ClientId, events: &mut EventStore) -> (usize, usize) {
        let contract_ids = self.contract_ids_of(client_id);

        let payments_before = self.payments.len();
        self.payments
            .retain(|p| !contract_ids.contains(&p.contract_id));
        let payments_removed = payments_before - self.payments.len();

        let contracts_before = self.contracts.len();
        self.contracts.retain(|c| c.client_id != client_id);
        let contracts_removed = contracts_before - self.contracts.len();

        self.clients.retain(|c| c.client_id != client_id);

        events.emit(LedgerEvent::ClientRemoved {
            client_id,
            contracts_removed,
            payments_removed,
        });

        (contracts_removed, payments_removed)
    }

    /// register a contract together with its generated installments
    pub fn register_contract(
        &mut self,
        contract: Contract,
        installments: Vec<Payment>,
        events: &mut EventStore,
    ) {
        events.emit(LedgerEvent::ContractRegistered {
            contract_id: contract.contract_id,
            client_id: contract.client_id,
            installments: installments.len() as u32,
            total_value: contract.total_value,
        });
        self.contracts.push(contract);
        self.payments.extend(installments);
    }

    /// replace a contract by id; existing installments are kept
    pub fn update_contract(&mut self, contract: Contract, events: &mut EventStore) -> bool {
        let contract_id = contract.contract_id;
        match self
            .contracts
            .iter_mut()
            .find(|c| c.contract_id == contract_id)
        {
            Some(existing) => {
                *existing = contract;
                events.emit(LedgerEvent::ContractUpdated { contract_id });
                true
            }
            None => false,
        }
    }

    /// remove a contract, cascading to its payments
    pub fn remove_contract(&mut self, contract_id: ContractId, events: &mut EventStore) -> usize {
        let payments_before = self.payments.len();
        self.payments.retain(|p| p.contract_id != contract_id);
        let payments_removed = payments_before - self.payments.len();

        self.contracts.retain(|c| c.contract_id != contract_id);

        events.emit(LedgerEvent::ContractRemoved {
            contract_id,
            payments_removed,
        });

        payments_removed
    }

    /// replace a payment by id with its confirmed update
    ///
    /// No-op (returns false) when the payment is absent from the
    /// snapshot.
    pub fn apply_payment(&mut self, updated: Payment, events: &mut EventStore) -> bool {
        let payment_id = updated.payment_id;
        match self
            .payments
            .iter_mut()
            .find(|p| p.payment_id == payment_id)
        {
            Some(existing) => {
                let newly_settled = updated.is_settled() && !existing.is_settled();
                if newly_settled {
                    events.emit(LedgerEvent::PaymentSettled {
                        payment_id,
                        paid_on: updated.paid_on.unwrap_or(updated.due_date),
                        status: updated.status,
                    });
                } else {
                    events.emit(LedgerEvent::PaymentUpdated { payment_id });
                }
                *existing = updated;
                true
            }
            None => false,
        }
    }
}
