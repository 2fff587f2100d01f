use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Shift policy applied when a computed payday lands on a weekend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaydayAdjustment {
    #[default]
    AsIs,
    BeforeWeekend,
    AfterWeekend,
}

impl PaydayAdjustment {
    /// Moves a weekend date to the nearest weekday per policy. Weekday
    /// inputs are returned unchanged, so the shift is idempotent.
    pub fn adjust(&self, date: NaiveDate) -> NaiveDate {
        match self {
            PaydayAdjustment::AsIs => date,
            PaydayAdjustment::BeforeWeekend => walk_to_weekday(date, -1),
            PaydayAdjustment::AfterWeekend => walk_to_weekday(date, 1),
        }
    }
}

/// Weekend policy for monthly recurring rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum WeekendHandling {
    #[default]
    AsIs,
    PreviousWeekday,
    NextWeekday,
}

impl WeekendHandling {
    /// Moves a weekend date to the nearest weekday per policy, one day at
    /// a time, sharing the same primitive as [`PaydayAdjustment`].
    pub fn adjust(&self, date: NaiveDate) -> NaiveDate {
        match self {
            WeekendHandling::AsIs => date,
            WeekendHandling::PreviousWeekday => walk_to_weekday(date, -1),
            WeekendHandling::NextWeekday => walk_to_weekday(date, 1),
        }
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn walk_to_weekday(date: NaiveDate, step: i64) -> NaiveDate {
    let mut current = date;
    while is_weekend(current) {
        current = current + Duration::days(step);
    }
    current
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

/// Builds a date in `year`/`month`, clamping `day` to the month's length.
pub fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Offsets a year/month pair by a number of months.
pub fn month_offset(year: i32, month: u32, months: i32) -> (i32, u32) {
    let mut year = year;
    let mut month = month as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    (year, month as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn clamped_date_caps_short_months() {
        assert_eq!(clamped_date(2025, 2, 31), date(2025, 2, 28));
        assert_eq!(clamped_date(2025, 4, 31), date(2025, 4, 30));
        assert_eq!(clamped_date(2025, 1, 31), date(2025, 1, 31));
    }

    #[test]
    fn month_offset_wraps_years() {
        assert_eq!(month_offset(2025, 12, 1), (2026, 1));
        assert_eq!(month_offset(2025, 1, -1), (2024, 12));
        assert_eq!(month_offset(2025, 6, 19), (2027, 1));
    }

    #[test]
    fn weekday_dates_never_shift() {
        // 2025-08-06 is a Wednesday.
        let wednesday = date(2025, 8, 6);
        assert_eq!(PaydayAdjustment::BeforeWeekend.adjust(wednesday), wednesday);
        assert_eq!(PaydayAdjustment::AfterWeekend.adjust(wednesday), wednesday);
        assert_eq!(WeekendHandling::NextWeekday.adjust(wednesday), wednesday);
    }

    #[test]
    fn weekend_dates_walk_to_nearest_weekday() {
        // 2025-08-09 is a Saturday, 2025-08-10 a Sunday.
        let saturday = date(2025, 8, 9);
        let sunday = date(2025, 8, 10);
        assert_eq!(
            PaydayAdjustment::BeforeWeekend.adjust(saturday),
            date(2025, 8, 8)
        );
        assert_eq!(
            PaydayAdjustment::BeforeWeekend.adjust(sunday),
            date(2025, 8, 8)
        );
        assert_eq!(
            PaydayAdjustment::AfterWeekend.adjust(saturday),
            date(2025, 8, 11)
        );
        assert_eq!(WeekendHandling::AsIs.adjust(sunday), sunday);
    }

    #[test]
    fn shift_is_idempotent() {
        let sunday = date(2025, 8, 10);
        let shifted = WeekendHandling::PreviousWeekday.adjust(sunday);
        assert_eq!(WeekendHandling::PreviousWeekday.adjust(shifted), shifted);
        let forward = WeekendHandling::NextWeekday.adjust(sunday);
        assert_eq!(WeekendHandling::NextWeekday.adjust(forward), forward);
    }
}
