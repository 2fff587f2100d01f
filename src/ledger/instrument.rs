use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

/// A refillable stored-value card that can be spent down across many
/// transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceCard {
    pub id: Uuid,
    pub name: String,
    pub initial_amount: Decimal,
    pub current_balance: Decimal,
    pub created: NaiveDate,
    pub is_active: bool,
}

impl BalanceCard {
    pub fn new(
        name: impl Into<String>,
        initial_amount: Decimal,
        created: NaiveDate,
    ) -> Result<Self, LedgerError> {
        if initial_amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(initial_amount));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            initial_amount,
            current_balance: initial_amount,
            created,
            is_active: true,
        })
    }

    pub fn has_funds(&self) -> bool {
        self.is_active && self.current_balance > Decimal::ZERO
    }
}

/// A stored-value card that is retired after a single spend event,
/// regardless of remaining balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftCard {
    pub id: Uuid,
    pub name: String,
    pub total_amount: Decimal,
    pub used_amount: Decimal,
    pub created: NaiveDate,
    pub is_active: bool,
    /// Statutory share of the face value that must be spent before a cash
    /// refund may be requested. Informational only.
    pub minimum_usage_rate: Decimal,
}

impl GiftCard {
    pub fn new(
        name: impl Into<String>,
        total_amount: Decimal,
        created: NaiveDate,
    ) -> Result<Self, LedgerError> {
        if total_amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(total_amount));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            total_amount,
            used_amount: Decimal::ZERO,
            created,
            is_active: true,
            minimum_usage_rate: Decimal::new(6, 1),
        })
    }

    pub fn with_minimum_usage_rate(mut self, rate: Decimal) -> Self {
        self.minimum_usage_rate = rate;
        self
    }

    pub fn remaining(&self) -> Decimal {
        self.total_amount - self.used_amount
    }

    pub fn can_use(&self) -> bool {
        self.is_active && self.remaining() > Decimal::ZERO
    }

    pub fn minimum_usage_amount(&self) -> Decimal {
        self.total_amount * self.minimum_usage_rate
    }
}
