use super::account::Account;
use super::amount::Amount;
use super::savings_goal::{NewSavingsGoal, SavingsGoal, TransferId};
use super::transaction::{Transaction, TransactionWindow};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AccountSource: Send + Sync {
    async fn fetch_accounts(&self) -> Result<Vec<Account>>;
}

#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn fetch_transactions(
        &self,
        account_uid: &str,
        window: &TransactionWindow,
    ) -> Result<Vec<Transaction>>;
}

#[async_trait]
pub trait SavingsGoalSource: Send + Sync {
    async fn list_goals(&self, account_uid: &str) -> Result<Vec<SavingsGoal>>;

    async fn create_goal(&self, account_uid: &str, goal: &NewSavingsGoal) -> Result<()>;

    /// Moves `amount` into the goal. `Ok(false)` means the bank declined the transfer.
    async fn fund_goal(
        &self,
        account_uid: &str,
        goal_uid: &str,
        transfer_id: TransferId,
        amount: &Amount,
    ) -> Result<bool>;
}

pub type AccountSourceBox = Box<dyn AccountSource>;
pub type TransactionSourceBox = Box<dyn TransactionSource>;
pub type SavingsGoalSourceBox = Box<dyn SavingsGoalSource>;
