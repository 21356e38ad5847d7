//! The round-up calculation.
//!
//! Everything here is pure: the same transactions always produce the same total.
//! Amounts are assumed to have two decimal places, so one whole unit is 100
//! minor units.

use super::amount::Amount;
use super::transaction::{Direction, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

pub const MINOR_UNITS_PER_UNIT: i64 = 100;

/// A transaction counts towards a round-up only if it is outgoing, strictly
/// positive and in the account's currency.
pub fn is_valid_transaction(tx: &Transaction, account_currency: &str) -> bool {
    tx.direction == Direction::Out && tx.amount.minor_units > 0 && tx.amount.is_in(account_currency)
}

pub fn valid_transactions<'a>(
    transactions: &'a [Transaction],
    account_currency: &'a str,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions
        .iter()
        .filter(move |tx| is_valid_transaction(tx, account_currency))
}

/// Distance from `minor_units` up to the next whole unit. Whole amounts give 0.
pub fn contribution(minor_units: i64) -> i64 {
    match minor_units.rem_euclid(MINOR_UNITS_PER_UNIT) {
        0 => 0,
        remainder => MINOR_UNITS_PER_UNIT - remainder,
    }
}

/// Sums the contributions of already-filtered transactions.
pub fn calculate_round_up<'a, I>(transactions: I) -> i64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(|tx| contribution(tx.amount.minor_units))
        .sum()
}

/// Total moved into the savings goal by one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundUpResult {
    pub currency: String,
    pub minor_units: i64,
}

impl RoundUpResult {
    pub fn new(currency: impl Into<String>, minor_units: i64) -> Self {
        Self {
            currency: currency.into(),
            minor_units,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// The total in whole units, e.g. 201 minor units is `2.01`.
    pub fn value(&self) -> Decimal {
        Decimal::new(self.minor_units, 2)
    }

    pub fn as_amount(&self) -> Amount {
        Amount::new(self.currency.clone(), self.minor_units)
    }
}

impl fmt::Display for RoundUpResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), self.currency)
    }
}
