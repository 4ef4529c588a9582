/// quick start - register a client and contract, then query the ledger
use receivables_rs::{
    Client, Contract, EventStore, InstallmentSchedule, LedgerQuery, LedgerSnapshot, Money,
    PaymentUpdate,
};
use chrono::NaiveDate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== quick start ===\n");

    let mut ledger = LedgerSnapshot::default();
    let mut events = EventStore::new();

    // register a client
    let client = Client::new("Ana Souza", "123.456.789-00", "+55 11 90000-0001");
    let client_id = client.client_id;
    ledger.upsert_client(client, &mut events);

    // 3-month contract for 300.00 starting 2024-01-10
    let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let contract = Contract::new(
        client_id,
        "Ana Souza",
        "123.456.789-00",
        start,
        3,
        Money::from_major(300),
    )?;
    let contract_id = contract.contract_id;

    // installments are generated in bulk, one per month
    let schedule = InstallmentSchedule::generate(&contract, start)?;
    ledger.register_contract(contract, schedule.payments, &mut events);

    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let query = LedgerQuery::at(&ledger, today);

    println!("installments:");
    for payment in query.payments_for_contract(contract_id) {
        println!(
            "  #{} due {} amount {} status {:?}",
            payment.installment_number,
            payment.due_date,
            payment.amount,
            receivables_rs::effective_status(payment, today),
        );
    }

    println!("\nreceivable: {}", query.total_receivable(client_id));
    println!("overdue:    {}", query.total_overdue(client_id));

    // settle the first installment; the host would persist this payload
    let first = query.payments_for_contract(contract_id)[0].clone();
    let update = PaymentUpdate::settle(&first, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    println!("\nsettlement payload: status {:?}, note {:?}", update.status, update.note);

    Ok(())
}
