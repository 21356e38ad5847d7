use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoundUpError {
    #[error("Failed to fetch {resource}: {reason}")]
    Fetch {
        resource: &'static str,
        reason: String,
    },
    #[error("Failed to create savings goal: {0}")]
    CreateGoal(String),
    #[error("No primary account found.")]
    NoPrimaryAccount,
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("No active savings goal named '{0}' found after creating it.")]
    SavingsGoalNotResolved(String),
    #[error("Failed to transfer round up amount.")]
    TransferFailed,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RoundUpError {
    pub fn fetch(resource: &'static str, reason: impl ToString) -> Self {
        Self::Fetch {
            resource,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RoundUpError>;
