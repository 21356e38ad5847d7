use super::amount::Amount;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Length of the trailing window a round-up covers.
pub const ROUND_UP_WINDOW_DAYS: i64 = 7;

/// Direction of money movement relative to the account.
///
/// Parsed case-insensitively; unknown directions are kept verbatim so they can
/// be reported back but never count towards a round-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    In,
    Out,
    Other(String),
}

impl From<String> for Direction {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("OUT") {
            Direction::Out
        } else if value.eq_ignore_ascii_case("IN") {
            Direction::In
        } else {
            Direction::Other(value)
        }
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::In => "IN".to_string(),
            Direction::Out => "OUT".to_string(),
            Direction::Other(value) => value,
        }
    }
}

/// A feed item from the account's transaction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub direction: Direction,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_time: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(direction: Direction, amount: Amount) -> Self {
        Self {
            direction,
            amount,
            status: None,
            transaction_time: None,
        }
    }

    pub fn outgoing(currency: &str, minor_units: i64) -> Self {
        Self::new(Direction::Out, Amount::new(currency, minor_units))
    }

    pub fn at(mut self, time: DateTime<Utc>) -> Self {
        self.transaction_time = Some(time);
        self
    }
}

/// Inclusive time range `[from, to]` of transactions considered for a round-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TransactionWindow {
    /// The seven days ending at `now`, with no alignment to midnight.
    pub fn trailing_week(now: DateTime<Utc>) -> Self {
        Self {
            from: now - Duration::days(ROUND_UP_WINDOW_DAYS),
            to: now,
        }
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.from <= time && time <= self.to
    }

    pub fn min_timestamp(&self) -> String {
        api_timestamp(self.from)
    }

    pub fn max_timestamp(&self) -> String {
        api_timestamp(self.to)
    }
}

/// Formats an instant as ISO-8601 UTC with millisecond precision, e.g.
/// `2024-04-12T12:34:56.000Z`.
pub fn api_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
