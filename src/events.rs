use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{ClientId, ContractId, PaymentId, PaymentStatus};

/// all events recorded by ledger operations
///
/// The host decides what to surface; dashboards typically turn these
/// into notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    // client lifecycle
    ClientRegistered {
        client_id: ClientId,
    },
    ClientUpdated {
        client_id: ClientId,
    },
    ClientRemoved {
        client_id: ClientId,
        contracts_removed: usize,
        payments_removed: usize,
    },

    // contract lifecycle
    ContractRegistered {
        contract_id: ContractId,
        client_id: ClientId,
        installments: u32,
        total_value: Money,
    },
    ContractUpdated {
        contract_id: ContractId,
    },
    ContractRemoved {
        contract_id: ContractId,
        payments_removed: usize,
    },

    // payment lifecycle
    PaymentSettled {
        payment_id: PaymentId,
        paid_on: NaiveDate,
        status: PaymentStatus,
    },
    PaymentUpdated {
        payment_id: PaymentId,
    },

    // reconciliation
    PaymentMarkedOverdue {
        payment_id: PaymentId,
        due_date: NaiveDate,
    },
    LateChargeApplied {
        payment_id: PaymentId,
        fine: Money,
        interest: Money,
        updated_amount: Money,
    },
    ReconcileCompleted {
        run_date: NaiveDate,
        payments_updated: usize,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<LedgerEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_event_store_collects_and_drains() {
        let mut store = EventStore::new();
        let client_id = Uuid::new_v4();

        store.emit(LedgerEvent::ClientRegistered { client_id });
        store.emit(LedgerEvent::ClientRemoved {
            client_id,
            contracts_removed: 2,
            payments_removed: 6,
        });

        assert_eq!(store.events().len(), 2);

        let drained = store.take_events();
        assert_eq!(drained.len(), 2);
        assert!(store.events().is_empty());
    }
}
