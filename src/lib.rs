pub mod charges;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod filters;
pub mod query;
pub mod reconcile;
pub mod records;
pub mod report;
pub mod schedule;
pub mod snapshot;
pub mod source;
pub mod status;
pub mod types;

// re-export key types
pub use charges::{apply_late_charge, LateCharge};
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use events::{EventStore, LedgerEvent};
pub use filters::{PaymentFilters, Period, StatusFilter};
pub use query::LedgerQuery;
pub use reconcile::{ReconcileTracker, Reconciler};
pub use records::{Client, Contract, Payment};
pub use report::{ClientStatement, CollectionReport, ReportRequest};
pub use schedule::InstallmentSchedule;
pub use snapshot::LedgerSnapshot;
pub use source::{load_partial, DataSource, LoadFailure, PaymentStore, PaymentUpdate};
pub use status::{
    effective_status, is_effectively_overdue, mark_as_paid, recompute_status, settlement_status,
};
pub use types::{ClientId, ContractId, PaymentId, PaymentStatus};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
