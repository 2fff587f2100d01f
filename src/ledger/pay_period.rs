use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::calendar::{clamped_date, month_offset, PaydayAdjustment};
use crate::errors::LedgerError;

/// An inclusive payday-to-payday date range used as the budgeting unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PayPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LedgerError> {
        if start > end {
            return Err(LedgerError::InvalidRule(format!(
                "period start {} after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn display_text(&self) -> String {
        format!(
            "{}.{} ~ {}.{}",
            self.start.month(),
            self.start.day(),
            self.end.month(),
            self.end.day()
        )
    }
}

/// The user's payday: an anchor day-of-month plus a weekend shift policy.
///
/// The anchor is validated here once; every derived date is then well formed,
/// with anchors past a month's end clamped to its last day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaydaySetting {
    anchor_day: u32,
    adjustment: PaydayAdjustment,
}

impl PaydaySetting {
    pub fn new(anchor_day: u32, adjustment: PaydayAdjustment) -> Result<Self, LedgerError> {
        if !(1..=31).contains(&anchor_day) {
            return Err(LedgerError::InvalidRule(format!(
                "payday anchor {} outside 1-31",
                anchor_day
            )));
        }
        Ok(Self {
            anchor_day,
            adjustment,
        })
    }

    pub fn anchor_day(&self) -> u32 {
        self.anchor_day
    }

    pub fn adjustment(&self) -> PaydayAdjustment {
        self.adjustment
    }

    /// The payday that actually lands in `year`/`month`: the anchor clamped
    /// to the month's length, then shifted off the weekend per policy.
    pub fn actual_anchor(&self, year: i32, month: u32) -> NaiveDate {
        self.adjustment
            .adjust(clamped_date(year, month, self.anchor_day))
    }

    /// The pay period containing `reference`.
    pub fn period_for(&self, reference: NaiveDate) -> PayPeriod {
        let this_anchor = self.actual_anchor(reference.year(), reference.month());
        if reference >= this_anchor {
            let (year, month) = month_offset(reference.year(), reference.month(), 1);
            PayPeriod {
                start: this_anchor,
                end: self.actual_anchor(year, month) - Duration::days(1),
            }
        } else {
            let (year, month) = month_offset(reference.year(), reference.month(), -1);
            PayPeriod {
                start: self.actual_anchor(year, month),
                end: this_anchor - Duration::days(1),
            }
        }
    }

    /// The period immediately after `period`. Consecutive periods tile the
    /// calendar: the new start is the day after the previous end.
    pub fn next_period(&self, period: &PayPeriod) -> PayPeriod {
        let start = period.end + Duration::days(1);
        let (year, month) = month_offset(start.year(), start.month(), 1);
        PayPeriod {
            start,
            end: self.actual_anchor(year, month) - Duration::days(1),
        }
    }

    /// The period immediately before `period`.
    pub fn previous_period(&self, period: &PayPeriod) -> PayPeriod {
        let end = period.start - Duration::days(1);
        let (year, month) = month_offset(period.start.year(), period.start.month(), -1);
        PayPeriod {
            start: self.actual_anchor(year, month),
            end,
        }
    }

    /// The last `count` periods up to and including the one containing
    /// `reference`, oldest first.
    pub fn recent_periods(&self, reference: NaiveDate, count: usize) -> Vec<PayPeriod> {
        let mut periods = Vec::with_capacity(count);
        let mut current = self.period_for(reference);
        for _ in 0..count {
            periods.push(current);
            current = self.previous_period(&current);
        }
        periods.reverse();
        periods
    }
}
