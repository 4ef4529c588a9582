/// reconcile sweep - controlled time, stale statuses, and late charges
use receivables_rs::{
    Client, Contract, EventStore, InstallmentSchedule, LedgerQuery, LedgerSnapshot, Money, Rate,
    ReconcileTracker, Reconciler, SafeTimeProvider, TimeSource,
};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== reconcile sweep ===\n");

    // controlled time, starting at contract registration
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let mut ledger = LedgerSnapshot::default();
    let mut events = EventStore::new();

    // client billed 2% fine plus 10% monthly interest when late
    let client = Client::new("Ana Souza", "123.456.789-00", "+55 11 90000-0001")
        .with_late_charges(Rate::from_percentage(2), Rate::from_percentage(10));
    let client_id = client.client_id;
    ledger.upsert_client(client, &mut events);

    let today = time.now().date_naive();
    let contract = Contract::new(
        client_id,
        "Ana Souza",
        "123.456.789-00",
        today,
        3,
        Money::from_major(3_000),
    )?;
    let schedule = InstallmentSchedule::generate(&contract, today)?;
    ledger.register_contract(contract, schedule.payments, &mut events);

    println!("contract registered on {}", today);

    // advance past the first due date (2024-02-10) by five days
    controller.advance(Duration::days(36));
    let today = time.now().date_naive();
    println!("advanced to {}", today);

    let query = LedgerQuery::new(&ledger, &time);
    println!("effective overdue before sweep: {}", query.total_overdue(client_id));

    // nightly sweep: rewrite stale statuses, assess late charges
    let mut tracker = ReconcileTracker::new();
    let updated = Reconciler::run(&ledger, &mut tracker, today, &mut events);
    println!("\nsweep produced {} update(s):", updated.len());
    for payment in updated {
        println!(
            "  #{} now {:?}, amount {} (was {})",
            payment.installment_number, payment.status, payment.amount, payment.original_amount
        );
        ledger.apply_payment(payment, &mut events);
    }

    // a second run the same day is refused by the tracker
    let again = Reconciler::run(&ledger, &mut tracker, today, &mut events);
    println!("second run same day: {} update(s)", again.len());

    println!("\nevents recorded:");
    for event in events.take_events() {
        println!("  {:?}", event);
    }

    Ok(())
}
