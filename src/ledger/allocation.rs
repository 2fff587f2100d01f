use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::instrument::{BalanceCard, GiftCard};
use super::transaction::{
    IncomeSource, InstrumentRef, PaymentMethod, Transaction, TransactionKind, REFUND_CATEGORY,
};
use crate::errors::LedgerError;

/// User-facing fields stamped onto every transaction an allocation emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub date: NaiveDate,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl AllocationRequest {
    pub fn new(date: NaiveDate, category: impl Into<String>) -> Self {
        Self {
            date,
            category: category.into(),
            merchant: None,
            memo: None,
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}

/// Result of charging an expense against a balance card.
#[derive(Debug, Clone)]
pub struct BalanceCardAllocation {
    pub transactions: Vec<Transaction>,
    /// The card after the charge, or `None` once it is spent to zero.
    pub card: Option<BalanceCard>,
    /// The portion the card could not cover.
    pub cash_needed: Decimal,
}

/// Result of charging an expense against a gift card.
#[derive(Debug, Clone)]
pub struct GiftCardAllocation {
    pub transactions: Vec<Transaction>,
    /// The retired card; every use deactivates it and accounts for its full
    /// face value.
    pub card: GiftCard,
    /// Surplus returned as cash income when the card held more than the
    /// expense.
    pub refund: Decimal,
    /// The portion the card could not cover.
    pub cash_needed: Decimal,
}

/// Splits `expense` between a balance card and cash.
///
/// If the balance covers the expense, one card-paid transaction is emitted
/// and the card survives with the reduced balance (spent exactly to zero, it
/// is exhausted and returned as `None`). Otherwise the remaining balance is
/// drained as one card-paid transaction and the shortfall becomes a cash
/// transaction. A card with no balance left contributes no card leg.
///
/// The updated card must be written back by the caller, who is responsible
/// for serializing read-allocate-write sequences per card id; two
/// allocations from the same stale read lose the first deduction.
pub fn allocate_balance_card(
    card: BalanceCard,
    expense: Decimal,
    request: &AllocationRequest,
) -> Result<BalanceCardAllocation, LedgerError> {
    if expense <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(expense));
    }
    let reference = InstrumentRef {
        id: card.id,
        name: card.name.clone(),
    };

    if card.current_balance >= expense {
        let new_balance = card.current_balance - expense;
        tracing::info!(card = %card.name, %expense, %new_balance, "balance card charged");
        let transactions = vec![expense_transaction(
            request,
            PaymentMethod::BalanceCard,
            expense,
            Some(reference),
        )];
        let card = if new_balance > Decimal::ZERO {
            Some(BalanceCard {
                current_balance: new_balance,
                ..card
            })
        } else {
            None
        };
        return Ok(BalanceCardAllocation {
            transactions,
            card,
            cash_needed: Decimal::ZERO,
        });
    }

    let cash_needed = expense - card.current_balance;
    tracing::info!(card = %card.name, %expense, %cash_needed, "balance card drained");
    let mut transactions = Vec::new();
    if card.current_balance > Decimal::ZERO {
        transactions.push(expense_transaction(
            request,
            PaymentMethod::BalanceCard,
            card.current_balance,
            Some(reference),
        ));
    }
    transactions.push(expense_transaction(
        request,
        PaymentMethod::Cash,
        cash_needed,
        None,
    ));
    Ok(BalanceCardAllocation {
        transactions,
        card: None,
        cash_needed,
    })
}

/// Splits `expense` between a gift card and cash.
///
/// Gift cards are one-shot: any use retires the card. A card holding more
/// than the expense pays the expense and refunds the surplus as cash income
/// under [`REFUND_CATEGORY`]; a card holding less pays what it has and the
/// shortfall becomes a cash transaction; an exact match pays in full. The
/// retired card accounts for its whole face value in every branch.
///
/// The same per-instrument write serialization as
/// [`allocate_balance_card`] applies.
pub fn allocate_gift_card(
    card: GiftCard,
    expense: Decimal,
    request: &AllocationRequest,
) -> Result<GiftCardAllocation, LedgerError> {
    if expense <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(expense));
    }
    let remaining = card.remaining();
    let reference = InstrumentRef {
        id: card.id,
        name: card.name.clone(),
    };

    let mut transactions = Vec::new();
    let mut refund = Decimal::ZERO;
    let mut cash_needed = Decimal::ZERO;

    if remaining > expense {
        refund = remaining - expense;
        transactions.push(expense_transaction(
            request,
            PaymentMethod::GiftCard,
            expense,
            Some(reference.clone()),
        ));
        transactions.push(refund_transaction(request, refund, reference));
    } else if remaining < expense {
        cash_needed = expense - remaining;
        if remaining > Decimal::ZERO {
            transactions.push(expense_transaction(
                request,
                PaymentMethod::GiftCard,
                remaining,
                Some(reference),
            ));
        }
        transactions.push(expense_transaction(
            request,
            PaymentMethod::Cash,
            cash_needed,
            None,
        ));
    } else {
        transactions.push(expense_transaction(
            request,
            PaymentMethod::GiftCard,
            expense,
            Some(reference),
        ));
    }

    tracing::info!(card = %card.name, %expense, %refund, %cash_needed, "gift card retired");
    let card = GiftCard {
        used_amount: card.total_amount,
        is_active: false,
        ..card
    };
    Ok(GiftCardAllocation {
        transactions,
        card,
        refund,
        cash_needed,
    })
}

fn expense_transaction(
    request: &AllocationRequest,
    method: PaymentMethod,
    amount: Decimal,
    instrument: Option<InstrumentRef>,
) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        amount,
        kind: TransactionKind::Expense { method },
        category: request.category.clone(),
        merchant: request.merchant.clone(),
        memo: request.memo.clone(),
        date: request.date,
        instrument,
        actual_amount: None,
        settlement_amount: None,
        is_settlement: false,
    }
}

fn refund_transaction(
    request: &AllocationRequest,
    amount: Decimal,
    instrument: InstrumentRef,
) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        amount,
        kind: TransactionKind::Income {
            source: IncomeSource::Refund,
        },
        category: REFUND_CATEGORY.into(),
        merchant: request.merchant.clone(),
        memo: request.memo.clone(),
        date: request.date,
        instrument: Some(instrument),
        actual_amount: None,
        settlement_amount: None,
        is_settlement: false,
    }
}
