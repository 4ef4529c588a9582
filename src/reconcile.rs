use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::charges::{apply_late_charge, LateCharge};
use crate::events::{EventStore, LedgerEvent};
use crate::records::Payment;
use crate::snapshot::LedgerSnapshot;
use crate::types::PaymentStatus;

/// once-per-day guard for the reconciliation sweep
///
/// The host owns the actual scheduling; persisting this alongside the
/// collections keeps a restart from re-running the sweep on the same
/// day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileTracker {
    pub last_run: Option<NaiveDate>,
}

impl ReconcileTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_run(&self, today: NaiveDate) -> bool {
        self.last_run != Some(today)
    }

    pub fn mark_ran(&mut self, today: NaiveDate) {
        self.last_run = Some(today);
    }
}

/// reconciliation sweep over a ledger snapshot
///
/// Rewrites stale statuses and applies late charges, returning fresh
/// records for the host to persist and merge back. The snapshot itself
/// is never mutated.
pub struct Reconciler;

impl Reconciler {
    /// find every unpaid payment past its due date and produce its
    /// updated record: status rewritten to `Overdue` and, when the
    /// client has late-charge terms, the amount revalued
    ///
    /// Only materially changed records are returned, so running the
    /// sweep twice against the same merged state yields nothing the
    /// second time.
    pub fn sweep(
        ledger: &LedgerSnapshot,
        today: NaiveDate,
        events: &mut EventStore,
    ) -> Vec<Payment> {
        let mut updated = Vec::new();

        for payment in &ledger.payments {
            if payment.paid_on.is_some() || payment.due_date >= today {
                continue;
            }

            let mut fresh = payment.clone();
            fresh.status = PaymentStatus::Overdue;

            if fresh.status != payment.status {
                events.emit(LedgerEvent::PaymentMarkedOverdue {
                    payment_id: payment.payment_id,
                    due_date: payment.due_date,
                });
            }

            let client = ledger
                .contract(payment.contract_id)
                .and_then(|contract| ledger.client(contract.client_id));
            if let Some(client) = client {
                if let Some(charge) = LateCharge::assess(&fresh, client, today) {
                    fresh = apply_late_charge(&fresh, &charge, today);
                    if fresh.amount != payment.amount {
                        events.emit(LedgerEvent::LateChargeApplied {
                            payment_id: payment.payment_id,
                            fine: charge.fine,
                            interest: charge.interest,
                            updated_amount: charge.updated_amount,
                        });
                    }
                }
            }

            let changed = fresh.status != payment.status
                || fresh.amount != payment.amount
                || fresh.fine_applied != payment.fine_applied;
            if changed {
                updated.push(fresh);
            }
        }

        updated
    }

    /// guarded sweep: runs at most once per calendar day
    pub fn run(
        ledger: &LedgerSnapshot,
        tracker: &mut ReconcileTracker,
        today: NaiveDate,
        events: &mut EventStore,
    ) -> Vec<Payment> {
        if !tracker.should_run(today) {
            return Vec::new();
        }

        let updated = Self::sweep(ledger, today, events);
        tracker.mark_ran(today);
        events.emit(LedgerEvent::ReconcileCompleted {
            run_date: today,
            payments_updated: updated.len(),
        });

        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::records::{Client, Contract};
    use crate::schedule::InstallmentSchedule;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger_with_terms(fine: Option<(Rate, Rate)>) -> LedgerSnapshot {
        let mut client = Client::new("Ana Souza", "123.456.789-00", "+55 11 90000-0001");
        if let Some((fine_rate, interest_rate)) = fine {
            client = client.with_late_charges(fine_rate, interest_rate);
        }
        let client_id = client.client_id;

        let contract = Contract::new(
            client_id,
            "Ana Souza",
            "123.456.789-00",
            date(2024, 1, 10),
            3,
            Money::from_major(3_000),
        )
        .unwrap();
        let schedule = InstallmentSchedule::generate(&contract, date(2024, 1, 10)).unwrap();

        let mut snapshot = LedgerSnapshot::default();
        let mut events = EventStore::new();
        snapshot.upsert_client(client, &mut events);
        snapshot.register_contract(contract, schedule.payments, &mut events);
        snapshot
    }

    fn merge(snapshot: &mut LedgerSnapshot, updated: Vec<Payment>) {
        let mut events = EventStore::new();
        for payment in updated {
            snapshot.apply_payment(payment, &mut events);
        }
    }

    #[test]
    fn test_sweep_rewrites_stale_and_charges() {
        // installments of 1000.00 due feb/mar/apr 10
        let snapshot = ledger_with_terms(Some((Rate::from_percentage(2), Rate::from_percentage(10))));
        let mut events = EventStore::new();

        // feb 15: only installment 1 is late, by 5 days
        let updated = Reconciler::sweep(&snapshot, date(2024, 2, 15), &mut events);

        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].installment_number, 1);
        assert_eq!(updated[0].status, PaymentStatus::Overdue);
        assert_eq!(updated[0].amount, Money::from_str_exact("1036.67").unwrap());
        assert_eq!(updated[0].original_amount, Money::from_major(1_000));

        let kinds: Vec<bool> = events
            .events()
            .iter()
            .map(|e| matches!(e, LedgerEvent::LateChargeApplied { .. }))
            .collect();
        assert!(kinds.contains(&true));
    }

    #[test]
    fn test_sweep_without_terms_only_rewrites_status() {
        let snapshot = ledger_with_terms(None);
        let mut events = EventStore::new();

        let updated = Reconciler::sweep(&snapshot, date(2024, 2, 15), &mut events);

        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].status, PaymentStatus::Overdue);
        assert_eq!(updated[0].amount, Money::from_major(1_000));
    }

    #[test]
    fn test_sweep_twice_same_day_is_stable() {
        let mut snapshot =
            ledger_with_terms(Some((Rate::from_percentage(2), Rate::from_percentage(10))));
        let mut events = EventStore::new();

        let first = Reconciler::sweep(&snapshot, date(2024, 2, 15), &mut events);
        assert_eq!(first.len(), 1);
        merge(&mut snapshot, first);

        let second = Reconciler::sweep(&snapshot, date(2024, 2, 15), &mut events);
        assert!(second.is_empty());
    }

    #[test]
    fn test_next_day_reassesses_from_original() {
        let mut snapshot =
            ledger_with_terms(Some((Rate::from_percentage(2), Rate::from_percentage(10))));
        let mut events = EventStore::new();

        let first = Reconciler::sweep(&snapshot, date(2024, 2, 15), &mut events);
        merge(&mut snapshot, first);

        // 10 days late now; interest grows from the original, the fine does not
        let updated = Reconciler::sweep(&snapshot, date(2024, 2, 20), &mut events);
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].amount, Money::from_str_exact("1053.33").unwrap());
    }

    #[test]
    fn test_guarded_run_once_per_day() {
        let snapshot = ledger_with_terms(None);
        let mut tracker = ReconcileTracker::new();
        let mut events = EventStore::new();

        let first = Reconciler::run(&snapshot, &mut tracker, date(2024, 2, 15), &mut events);
        assert_eq!(first.len(), 1);
        assert_eq!(tracker.last_run, Some(date(2024, 2, 15)));

        // same day again: guard refuses, even though the snapshot was not merged
        let again = Reconciler::run(&snapshot, &mut tracker, date(2024, 2, 15), &mut events);
        assert!(again.is_empty());

        // next day runs
        let next = Reconciler::run(&snapshot, &mut tracker, date(2024, 2, 16), &mut events);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_settled_payments_are_skipped() {
        let mut snapshot = ledger_with_terms(None);
        let mut events = EventStore::new();

        let settled = crate::status::mark_as_paid(&snapshot.payments[0].clone(), date(2024, 2, 9));
        snapshot.apply_payment(settled, &mut events);

        let updated = Reconciler::sweep(&snapshot, date(2024, 2, 15), &mut events);
        assert!(updated.is_empty());
    }
}
