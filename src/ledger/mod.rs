//! Ledger domain models, calendar math, and the allocation/summary core.

pub mod allocation;
pub mod calendar;
pub mod instrument;
pub mod pay_period;
pub mod recurring;
pub mod summary;
pub mod transaction;

pub use allocation::{
    allocate_balance_card, allocate_gift_card, AllocationRequest, BalanceCardAllocation,
    GiftCardAllocation,
};
pub use calendar::{PaydayAdjustment, WeekendHandling};
pub use instrument::{BalanceCard, GiftCard};
pub use pay_period::{PayPeriod, PaydaySetting};
pub use recurring::{due_rules, RecurrencePattern, RecurringTransaction};
pub use summary::{analyze, InstrumentSummary, PaymentSummary};
pub use transaction::{
    IncomeSource, InstrumentRef, PaymentMethod, Transaction, TransactionKind, REFUND_CATEGORY,
};
