/// overdue dashboard - filtering and per-client aggregation
use receivables_rs::{
    ClientStatement, Client, Contract, EventStore, InstallmentSchedule, LedgerQuery,
    LedgerSnapshot, Money, PaymentFilters, PaymentStatus, Period,
};
use chrono::NaiveDate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== overdue dashboard ===\n");

    let mut ledger = LedgerSnapshot::default();
    let mut events = EventStore::new();

    let clients = [
        ("Ana Souza", "123.456.789-00", NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
        ("Bruno Reis", "555.666.777-88", NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()),
    ];

    for (name, registration, start) in clients {
        let client = Client::new(name, registration, "+55 11 90000-0000");
        let client_id = client.client_id;
        ledger.upsert_client(client, &mut events);

        let contract = Contract::new(client_id, name, registration, start, 4, Money::from_major(800))?;
        let schedule = InstallmentSchedule::generate(&contract, start)?;
        ledger.register_contract(contract, schedule.payments, &mut events);
    }

    let today = NaiveDate::from_ymd_opt(2024, 4, 20).unwrap();
    let query = LedgerQuery::at(&ledger, today);

    println!("clients with overdue payments:");
    for client in query.clients_with_overdue() {
        println!("  {} (overdue {})", client.name, query.total_overdue(client.client_id));
    }

    for client in query.search_clients("") {
        let contracts = query.contracts_for_client(client.client_id, true);
        println!(
            "\n{}: {} contract(s) in arrears",
            client.name,
            contracts.len()
        );

        for contract in contracts {
            let overdue_filter = PaymentFilters::default().with_status(PaymentStatus::Overdue);
            for payment in query.filtered_payments(contract.contract_id, &overdue_filter) {
                println!("  installment #{} due {}", payment.installment_number, payment.due_date);
            }
        }

        let statement = ClientStatement::for_client(&query, client.client_id);
        println!(
            "  statement: paid {} / overdue {} / open {}",
            statement.total_paid, statement.total_overdue, statement.total_open
        );
    }

    // period bucket filtering
    let this_month = PaymentFilters::for_period(Period::CurrentMonth, today);
    println!("\ndue this month across first client's contracts:");
    let first = query.search_clients("ana")[0];
    for contract in query.contracts_for_client(first.client_id, false) {
        for payment in query.filtered_payments(contract.contract_id, &this_month) {
            println!("  #{} due {}", payment.installment_number, payment.due_date);
        }
    }

    Ok(())
}
