use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::PaymentStatus;

/// status criterion, matched against the effective status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StatusFilter {
    /// no status filtering
    #[default]
    All,
    /// keep only payments whose effective status equals this
    Only(PaymentStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: PaymentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// filter criteria for payment listings
///
/// Both date bounds are inclusive on the due date. A `date_from` later
/// than `date_to` is not an error; no payment can satisfy both bounds,
/// so the result is simply empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaymentFilters {
    pub status: StatusFilter,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl PaymentFilters {
    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }

    pub fn due_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn due_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// filters covering a predefined period relative to a reference date
    pub fn for_period(period: Period, today: NaiveDate) -> Self {
        match period.date_range(today) {
            Some((start, end)) => Self {
                status: StatusFilter::All,
                date_from: Some(start),
                date_to: Some(end),
            },
            None => Self::default(),
        }
    }
}

/// predefined due-date buckets offered by the dashboard filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Period {
    #[default]
    All,
    CurrentMonth,
    LastMonth,
    /// the current calendar month and the two before it
    LastThreeMonths,
    CurrentYear,
}

impl Period {
    /// resolve to an inclusive date range; `All` has no bounds
    pub fn date_range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Period::All => None,
            Period::CurrentMonth => Some((month_start(today), month_end(today))),
            Period::LastMonth => {
                let last = month_start(today) - Months::new(1);
                Some((last, month_end(last)))
            }
            Period::LastThreeMonths => {
                let start = month_start(today) - Months::new(2);
                Some((start, month_end(today)))
            }
            Period::CurrentYear => {
                let jan1 = NaiveDate::from_ymd_opt(today.year(), 1, 1)?;
                let dec31 = NaiveDate::from_ymd_opt(today.year(), 12, 31)?;
                Some((jan1, dec31))
            }
        }
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date) + Months::new(1) - chrono::Duration::days(1)
}
