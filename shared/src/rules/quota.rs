//! Gate pass submission quota
//!
//! An employee may raise one gate pass per calendar day and a limited number
//! per calendar month. Both counts are taken from the departure time of the
//! employee's existing requests, whatever their status.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{EmployeeDirectoryEntry, GatePassRecord};

/// Default monthly allowance
pub const DEFAULT_MONTHLY_LIMIT: usize = 3;

/// Submission blocked by a quota gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuotaViolation {
    #[error("a gate pass has already been requested for today")]
    DailyLimitReached,
    #[error("monthly limit reached: {used} of {limit} gate passes used")]
    MonthlyLimitReached { used: usize, limit: usize },
}

/// Requests counted against the current day and month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuotaUsage {
    pub today: usize,
    pub this_month: usize,
}

impl QuotaUsage {
    /// Count departures falling on `today` and in its month.
    ///
    /// Departures that cannot be parsed are ignored.
    pub fn from_departures<'a>(departures: impl IntoIterator<Item = &'a str>, today: NaiveDate) -> Self {
        let mut usage = Self::default();
        for departure in departures {
            let Some(date) = crate::dates::parse_date(departure) else {
                if !departure.trim().is_empty() {
                    tracing::debug!(departure, "Ignoring unparseable departure time");
                }
                continue;
            };
            if date.year() == today.year() && date.month() == today.month() {
                usage.this_month += 1;
                if date == today {
                    usage.today += 1;
                }
            }
        }
        usage
    }

    /// Usage of one employee's own requests
    pub fn for_employee<'a>(
        records: impl IntoIterator<Item = &'a GatePassRecord>,
        employee: &EmployeeDirectoryEntry,
        today: NaiveDate,
    ) -> Self {
        Self::from_departures(
            records
                .into_iter()
                .filter(|r| r.belongs_to(employee))
                .map(|r| r.departure_time.as_str()),
            today,
        )
    }

    /// Count one more confirmed submission departing on `departure`
    pub fn record(&mut self, departure: NaiveDate, today: NaiveDate) {
        if departure.year() == today.year() && departure.month() == today.month() {
            self.this_month += 1;
            if departure == today {
                self.today += 1;
            }
        }
    }
}

/// Daily and monthly allowances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaPolicy {
    pub monthly_limit: usize,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            monthly_limit: DEFAULT_MONTHLY_LIMIT,
        }
    }
}

impl QuotaPolicy {
    pub fn new(monthly_limit: usize) -> Self {
        Self { monthly_limit }
    }

    /// Daily gate first, then the monthly gate.
    pub fn check(&self, usage: &QuotaUsage) -> Result<(), QuotaViolation> {
        if usage.today > 0 {
            return Err(QuotaViolation::DailyLimitReached);
        }
        if usage.this_month >= self.monthly_limit {
            return Err(QuotaViolation::MonthlyLimitReached {
                used: usage.this_month,
                limit: self.monthly_limit,
            });
        }
        Ok(())
    }

    /// Submissions still allowed this month
    pub fn remaining(&self, usage: &QuotaUsage) -> usize {
        self.monthly_limit.saturating_sub(usage.this_month)
    }
}
