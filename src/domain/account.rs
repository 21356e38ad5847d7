use super::amount::is_currency_code;
use crate::error::{Result, RoundUpError};
use serde::{Deserialize, Serialize};

pub const PRIMARY_ACCOUNT_TYPE: &str = "PRIMARY";

/// An account record as reported by the bank.
///
/// Every field is optional on the wire; [`Account::validate`] turns a record into
/// a [`ValidatedAccount`] before any account-scoped request is made.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// An account with the fields the round-up needs, all present and well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAccount {
    pub uid: String,
    pub currency: String,
}

impl Account {
    pub fn new(uid: &str, account_type: &str, currency: &str) -> Self {
        Self {
            account_uid: Some(uid.to_string()),
            account_type: Some(account_type.to_string()),
            currency: Some(currency.to_string()),
            ..Self::default()
        }
    }

    pub fn is_primary(&self) -> bool {
        self.account_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(PRIMARY_ACCOUNT_TYPE))
    }

    pub fn validate(&self) -> Result<ValidatedAccount> {
        let uid = self
            .account_uid
            .as_deref()
            .map(str::trim)
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| RoundUpError::Validation("account is missing its uid".to_string()))?;

        let currency = self.currency.as_deref().map(str::trim).ok_or_else(|| {
            RoundUpError::Validation(format!("account {uid} is missing its currency"))
        })?;
        if !is_currency_code(currency) {
            return Err(RoundUpError::Validation(format!(
                "account {uid} has an invalid currency code '{currency}'"
            )));
        }

        Ok(ValidatedAccount {
            uid: uid.to_string(),
            currency: currency.to_ascii_uppercase(),
        })
    }
}

/// Picks the first account tagged PRIMARY, in source order.
pub fn select_primary(accounts: &[Account]) -> Result<&Account> {
    accounts
        .iter()
        .find(|account| account.is_primary())
        .ok_or(RoundUpError::NoPrimaryAccount)
}

pub fn select_by_uid<'a>(accounts: &'a [Account], uid: &str) -> Result<&'a Account> {
    accounts
        .iter()
        .find(|account| account.account_uid.as_deref() == Some(uid))
        .ok_or_else(|| RoundUpError::AccountNotFound(uid.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_primary_ignores_case_and_takes_first() {
        let accounts = vec![
            Account::new("a", "ADDITIONAL", "GBP"),
            Account::new("b", "primary", "GBP"),
            Account::new("c", "PRIMARY", "GBP"),
        ];
        let primary = select_primary(&accounts).unwrap();
        assert_eq!(primary.account_uid.as_deref(), Some("b"));
    }

    #[test]
    fn test_select_primary_none() {
        let accounts = vec![Account::default(), Account::new("a", "SAVINGS", "GBP")];
        let err = select_primary(&accounts).unwrap_err();
        assert!(matches!(err, RoundUpError::NoPrimaryAccount));
        assert_eq!(err.to_string(), "No primary account found.");
    }

    #[test]
    fn test_select_by_uid() {
        let accounts = vec![
            Account::new("a", "PRIMARY", "GBP"),
            Account::new("b", "ADDITIONAL", "EUR"),
        ];
        assert_eq!(
            select_by_uid(&accounts, "b").unwrap().currency.as_deref(),
            Some("EUR")
        );
        assert!(matches!(
            select_by_uid(&accounts, "z"),
            Err(RoundUpError::AccountNotFound(uid)) if uid == "z"
        ));
    }

    #[test]
    fn test_validate_normalises_currency() {
        let validated = Account::new("a", "PRIMARY", "gbp").validate().unwrap();
        assert_eq!(
            validated,
            ValidatedAccount {
                uid: "a".to_string(),
                currency: "GBP".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut account = Account::new("a", "PRIMARY", "GBP");
        account.account_uid = None;
        assert!(matches!(account.validate(), Err(RoundUpError::Validation(_))));

        let mut account = Account::new("  ", "PRIMARY", "GBP");
        assert!(matches!(account.validate(), Err(RoundUpError::Validation(_))));

        account.account_uid = Some("a".to_string());
        account.currency = None;
        assert!(matches!(account.validate(), Err(RoundUpError::Validation(_))));

        account.currency = Some("POUNDS".to_string());
        assert!(matches!(account.validate(), Err(RoundUpError::Validation(_))));
    }

    #[test]
    fn test_account_deserialises_from_api_shape() {
        let json = r#"{
            "accountUid": "bbccbbcc-bbcc-bbcc-bbcc-bbccbbccbbcc",
            "accountType": "PRIMARY",
            "defaultCategory": "ccddccdd-ccdd-ccdd-ccdd-ccddccddccdd",
            "currency": "GBP",
            "createdAt": "2024-04-19T12:34:56.000Z",
            "name": "Personal"
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert!(account.is_primary());
        assert_eq!(account.name.as_deref(), Some("Personal"));
        assert_eq!(
            account.validate().unwrap().uid,
            "bbccbbcc-bbcc-bbcc-bbcc-bbccbbccbbcc"
        );
    }
}
