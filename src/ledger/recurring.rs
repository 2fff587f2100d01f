use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calendar::WeekendHandling;
use super::transaction::{InstrumentRef, Transaction, TransactionKind};
use crate::errors::LedgerError;

/// When a recurring transaction repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurrencePattern {
    Monthly { day_of_month: u32 },
    Weekly { weekday: Weekday },
}

impl RecurrencePattern {
    pub fn monthly(day_of_month: u32) -> Result<Self, LedgerError> {
        if !(1..=31).contains(&day_of_month) {
            return Err(LedgerError::InvalidRule(format!(
                "day of month {} outside 1-31",
                day_of_month
            )));
        }
        Ok(Self::Monthly { day_of_month })
    }

    /// Builds a weekly pattern from an ISO day number, Monday = 1.
    pub fn weekly(day_of_week: u32) -> Result<Self, LedgerError> {
        let weekday = match day_of_week {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            7 => Weekday::Sun,
            other => {
                return Err(LedgerError::InvalidRule(format!(
                    "day of week {} outside 1-7",
                    other
                )))
            }
        };
        Ok(Self::Weekly { weekday })
    }
}

/// A user-defined transaction template that fires on a repeating schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<InstrumentRef>,
    pub pattern: RecurrencePattern,
    pub weekend_handling: WeekendHandling,
    pub is_active: bool,
    #[serde(default)]
    pub last_executed: Option<NaiveDate>,
}

impl RecurringTransaction {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Decimal,
        pattern: RecurrencePattern,
        weekend_handling: WeekendHandling,
    ) -> Result<Self, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            category: category.into(),
            amount,
            merchant: None,
            memo: None,
            instrument: None,
            pattern,
            weekend_handling,
            is_active: true,
            last_executed: None,
        })
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_instrument(mut self, instrument: InstrumentRef) -> Self {
        self.instrument = Some(instrument);
        self
    }

    /// Whether the rule's schedule lands on `date`. Stateless: activity and
    /// execution bookkeeping are checked by [`due_rules`], so re-evaluating
    /// this any number of times per day is safe.
    ///
    /// Monthly rules whose day does not exist in `date`'s month are simply
    /// not due that month; there is no rollover. Weekly rules ignore the
    /// weekend policy, since a weekly day may be a weekend on purpose.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        match self.pattern {
            RecurrencePattern::Monthly { day_of_month } => {
                let candidate =
                    match NaiveDate::from_ymd_opt(date.year(), date.month(), day_of_month) {
                        Some(candidate) => candidate,
                        None => return false,
                    };
                self.weekend_handling.adjust(candidate) == date
            }
            RecurrencePattern::Weekly { weekday } => date.weekday() == weekday,
        }
    }

    pub fn executed_on(&self, date: NaiveDate) -> bool {
        self.last_executed == Some(date)
    }

    /// Stamps the execution date. The caller must treat the due check and
    /// this stamp as one atomic unit per rule per day, or the rule can fire
    /// twice when triggered from more than one place.
    pub fn mark_executed(&mut self, date: NaiveDate) {
        tracing::debug!(rule = %self.id, %date, "recurring rule executed");
        self.last_executed = Some(date);
    }

    /// Builds the concrete ledger transaction for a firing on `date`,
    /// detached from the rule itself.
    pub fn materialize(&self, date: NaiveDate) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            amount: self.amount,
            kind: self.kind.clone(),
            category: self.category.clone(),
            merchant: self.merchant.clone(),
            memo: self.memo.clone(),
            date,
            instrument: self.instrument.clone(),
            actual_amount: None,
            settlement_amount: None,
            is_settlement: false,
        }
    }
}

/// Active rules that are due on `today` and have not already fired today.
/// Execution dates are compared as dates, never as formatted strings.
pub fn due_rules(rules: &[RecurringTransaction], today: NaiveDate) -> Vec<&RecurringTransaction> {
    rules
        .iter()
        .filter(|rule| rule.is_active && !rule.executed_on(today) && rule.is_due_on(today))
        .collect()
}
