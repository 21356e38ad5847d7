use serde::{Deserialize, Serialize};

/// A monetary amount expressed in integer minor units (pence for GBP).
///
/// All arithmetic on amounts stays in integers; conversion to a decimal value
/// only happens when a result is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    pub currency: String,
    pub minor_units: i64,
}

impl Amount {
    pub fn new(currency: impl Into<String>, minor_units: i64) -> Self {
        Self {
            currency: currency.into(),
            minor_units,
        }
    }

    /// Currency codes are compared case-insensitively.
    pub fn is_in(&self, currency: &str) -> bool {
        self.currency.eq_ignore_ascii_case(currency)
    }
}

/// Returns true for a three letter alphabetic ISO-4217 style code.
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}
