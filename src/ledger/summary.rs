use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::instrument::{BalanceCard, GiftCard};
use super::transaction::{IncomeSource, PaymentMethod, Transaction, TransactionKind};

/// Per-method totals over a transaction window.
#[derive(Debug, Clone, Default)]
pub struct PaymentSummary {
    /// Cash income excluding synthetic gift card refunds.
    pub cash_income: Decimal,
    pub cash_expense: Decimal,
    pub card_expense: Decimal,
    /// Card expense with dutch-pay entries counted at their out-of-pocket
    /// share instead of the recorded amount.
    pub actual_card_expense: Decimal,
    /// Total reimbursed by dutch-pay participants.
    pub settlement_income: Decimal,
    pub instruments: Vec<InstrumentSummary>,
}

/// Windowed activity for one stored-value instrument, with its balance as
/// of now rather than as of the window.
#[derive(Debug, Clone)]
pub struct InstrumentSummary {
    pub name: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub current_balance: Decimal,
}

impl InstrumentSummary {
    fn named(name: String) -> Self {
        Self {
            name,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            current_balance: Decimal::ZERO,
        }
    }
}

/// Folds a transaction window plus the currently-active instruments into a
/// [`PaymentSummary`].
///
/// Instruments appear if they had window activity or are active now, but
/// entries whose current balance is zero are dropped: the summary reflects
/// what still matters, not historical reporting.
pub fn analyze(
    transactions: &[Transaction],
    balance_cards: &[BalanceCard],
    gift_cards: &[GiftCard],
) -> PaymentSummary {
    let mut summary = PaymentSummary::default();
    let mut instruments: BTreeMap<String, InstrumentSummary> = BTreeMap::new();

    for transaction in transactions {
        match &transaction.kind {
            TransactionKind::Income { source } => {
                if *source != IncomeSource::Refund {
                    summary.cash_income += transaction.amount;
                }
            }
            TransactionKind::Expense { method } => {
                match method {
                    PaymentMethod::Cash => summary.cash_expense += transaction.amount,
                    PaymentMethod::Card => {
                        summary.card_expense += transaction.amount;
                        summary.actual_card_expense += transaction.effective_amount();
                    }
                    PaymentMethod::BalanceCard | PaymentMethod::GiftCard => {}
                }
                if transaction.is_dutch_pay() {
                    summary.settlement_income +=
                        transaction.settlement_amount.unwrap_or(Decimal::ZERO);
                }
            }
        }

        if let Some(reference) = &transaction.instrument {
            let entry = instruments
                .entry(reference.name.clone())
                .or_insert_with(|| InstrumentSummary::named(reference.name.clone()));
            match &transaction.kind {
                TransactionKind::Income { .. } => entry.income += transaction.amount,
                TransactionKind::Expense { .. } => entry.expense += transaction.amount,
            }
        }
    }

    for card in balance_cards.iter().filter(|card| card.has_funds()) {
        instruments
            .entry(card.name.clone())
            .or_insert_with(|| InstrumentSummary::named(card.name.clone()))
            .current_balance = card.current_balance;
    }
    for card in gift_cards.iter().filter(|card| card.can_use()) {
        instruments
            .entry(card.name.clone())
            .or_insert_with(|| InstrumentSummary::named(card.name.clone()))
            .current_balance = card.remaining();
    }

    summary.instruments = instruments
        .into_values()
        .filter(|entry| entry.current_balance > Decimal::ZERO)
        .collect();
    summary
}
