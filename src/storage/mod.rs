//! Persistence collaborator seam. The core never writes to storage on its
//! own; it reads snapshots through [`LedgerStore`] and hands mutations back
//! to the caller, with [`charge_balance_card`] / [`charge_gift_card`] as the
//! canonical read-allocate-write units.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::allocation::{
    allocate_balance_card, allocate_gift_card, AllocationRequest, BalanceCardAllocation,
    GiftCardAllocation,
};
use crate::ledger::instrument::{BalanceCard, GiftCard};
use crate::ledger::transaction::Transaction;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over the persistence layer that owns instruments and the
/// transaction log.
pub trait LedgerStore {
    fn balance_card(&self, id: Uuid) -> Option<BalanceCard>;
    fn gift_card(&self, id: Uuid) -> Option<GiftCard>;
    fn save_balance_card(&mut self, card: BalanceCard) -> Result<()>;
    fn save_gift_card(&mut self, card: GiftCard) -> Result<()>;
    fn active_balance_cards(&self) -> Vec<BalanceCard>;
    fn active_gift_cards(&self) -> Vec<GiftCard>;
    fn transactions_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Transaction>;
    fn append_transaction(&mut self, transaction: Transaction) -> Result<()>;
}

/// Charges an expense to the balance card with id `card_id` and persists the
/// outcome: the emitted transactions plus the updated card, which is written
/// back drained and inactive once spent to zero.
///
/// Callers must serialize invocations per card id (a per-row transaction or
/// a single-writer queue); concurrent charges from stale reads lose updates.
pub fn charge_balance_card<S: LedgerStore>(
    store: &mut S,
    card_id: Uuid,
    expense: Decimal,
    request: &AllocationRequest,
) -> Result<BalanceCardAllocation> {
    let card = store
        .balance_card(card_id)
        .ok_or_else(|| LedgerError::NotFound(format!("balance card {}", card_id)))?;
    let snapshot = card.clone();
    let outcome = allocate_balance_card(card, expense, request)?;
    for transaction in &outcome.transactions {
        store.append_transaction(transaction.clone())?;
    }
    match &outcome.card {
        Some(updated) => store.save_balance_card(updated.clone())?,
        None => store.save_balance_card(BalanceCard {
            current_balance: Decimal::ZERO,
            is_active: false,
            ..snapshot
        })?,
    }
    Ok(outcome)
}

/// Charges an expense to the gift card with id `card_id` and persists the
/// outcome. The card is always written back retired.
///
/// The same per-card serialization requirement as [`charge_balance_card`]
/// applies.
pub fn charge_gift_card<S: LedgerStore>(
    store: &mut S,
    card_id: Uuid,
    expense: Decimal,
    request: &AllocationRequest,
) -> Result<GiftCardAllocation> {
    let card = store
        .gift_card(card_id)
        .ok_or_else(|| LedgerError::NotFound(format!("gift card {}", card_id)))?;
    let outcome = allocate_gift_card(card, expense, request)?;
    for transaction in &outcome.transactions {
        store.append_transaction(transaction.clone())?;
    }
    store.save_gift_card(outcome.card.clone())?;
    Ok(outcome)
}

/// In-process store used by tests and embedders without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    balance_cards: HashMap<Uuid, BalanceCard>,
    gift_cards: HashMap<Uuid, GiftCard>,
    transactions: Vec<Transaction>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_balance_card(&mut self, card: BalanceCard) {
        self.balance_cards.insert(card.id, card);
    }

    pub fn insert_gift_card(&mut self, card: GiftCard) {
        self.gift_cards.insert(card.id, card);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl LedgerStore for MemoryStore {
    fn balance_card(&self, id: Uuid) -> Option<BalanceCard> {
        self.balance_cards.get(&id).cloned()
    }

    fn gift_card(&self, id: Uuid) -> Option<GiftCard> {
        self.gift_cards.get(&id).cloned()
    }

    fn save_balance_card(&mut self, card: BalanceCard) -> Result<()> {
        self.balance_cards.insert(card.id, card);
        Ok(())
    }

    fn save_gift_card(&mut self, card: GiftCard) -> Result<()> {
        self.gift_cards.insert(card.id, card);
        Ok(())
    }

    fn active_balance_cards(&self) -> Vec<BalanceCard> {
        let mut cards: Vec<BalanceCard> = self
            .balance_cards
            .values()
            .filter(|card| card.is_active)
            .cloned()
            .collect();
        cards.sort_by(|a, b| a.name.cmp(&b.name));
        cards
    }

    fn active_gift_cards(&self) -> Vec<GiftCard> {
        let mut cards: Vec<GiftCard> = self
            .gift_cards
            .values()
            .filter(|card| card.is_active)
            .cloned()
            .collect();
        cards.sort_by(|a, b| a.name.cmp(&b.name));
        cards
    }

    fn transactions_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| start <= transaction.date && transaction.date <= end)
            .cloned()
            .collect()
    }

    fn append_transaction(&mut self, transaction: Transaction) -> Result<()> {
        self.transactions.push(transaction);
        Ok(())
    }
}
