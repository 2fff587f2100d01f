use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

/// Category label attached to the synthetic income a gift card refund emits.
pub const REFUND_CATEGORY: &str = "Gift card refund";

/// Where an income entry came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IncomeSource {
    Salary,
    Allowance,
    Settlement,
    Refund,
    Other,
}

/// How an expense was paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    BalanceCard,
    GiftCard,
}

impl PaymentMethod {
    pub fn uses_instrument(&self) -> bool {
        matches!(self, PaymentMethod::BalanceCard | PaymentMethod::GiftCard)
    }
}

/// Transaction direction with its direction-specific payload. Income always
/// carries a source and expense always carries a payment method, so the
/// pairing cannot be violated by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income { source: IncomeSource },
    Expense { method: PaymentMethod },
}

impl TransactionKind {
    pub fn is_income(&self) -> bool {
        matches!(self, TransactionKind::Income { .. })
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, TransactionKind::Expense { .. })
    }

    pub fn method(&self) -> Option<PaymentMethod> {
        match self {
            TransactionKind::Expense { method } => Some(*method),
            TransactionKind::Income { .. } => None,
        }
    }

    pub fn source(&self) -> Option<IncomeSource> {
        match self {
            TransactionKind::Income { source } => Some(*source),
            TransactionKind::Expense { .. } => None,
        }
    }
}

/// Link from a transaction to the stored-value instrument that funded it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstrumentRef {
    pub id: Uuid,
    pub name: String,
}

/// A single ledger entry. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<InstrumentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_amount: Option<Decimal>,
    #[serde(default)]
    pub is_settlement: bool,
}

impl Transaction {
    /// Creates a transaction, rejecting non-positive amounts.
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Self, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            amount,
            kind,
            category: category.into(),
            merchant: None,
            memo: None,
            date,
            instrument: None,
            actual_amount: None,
            settlement_amount: None,
            is_settlement: false,
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

    /// Flags a dutch-pay expense: `actual` is the out-of-pocket share and
    /// `settlement` the amount reimbursed by the other participants.
    pub fn with_settlement(mut self, actual: Decimal, settlement: Decimal) -> Self {
        self.actual_amount = Some(actual);
        self.settlement_amount = Some(settlement);
        self.is_settlement = true;
        self
    }

    pub fn is_dutch_pay(&self) -> bool {
        self.is_settlement
    }

    /// Recorded amount, or the out-of-pocket share for dutch-pay entries.
    pub fn effective_amount(&self) -> Decimal {
        if self.is_settlement {
            self.actual_amount.unwrap_or(self.amount)
        } else {
            self.amount
        }
    }
}
