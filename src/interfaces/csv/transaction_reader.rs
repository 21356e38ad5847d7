use crate::domain::amount::Amount;
use crate::domain::transaction::{Direction, Transaction};
use crate::error::{Result, RoundUpError};
use serde::Deserialize;
use std::io::Read;

/// One row of a transaction CSV: `direction,currency,minor_units[,status]`.
#[derive(Debug, Deserialize)]
struct TransactionRow {
    direction: String,
    currency: String,
    minor_units: i64,
    #[serde(default)]
    status: Option<String>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction {
            direction: Direction::from(row.direction),
            amount: Amount::new(row.currency, row.minor_units),
            status: row.status.filter(|s| !s.is_empty()),
            transaction_time: None,
        }
    }
}

/// Reads transactions from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<Transaction>`.
/// It handles whitespace trimming and a missing trailing status column.
pub struct TransactionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransactionReader<R> {
    /// Creates a new `TransactionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes transactions.
    pub fn transactions(self) -> impl Iterator<Item = Result<Transaction>> {
        self.reader.into_deserialize::<TransactionRow>().map(|row| {
            row.map(Transaction::from).map_err(RoundUpError::from)
        })
    }
}
