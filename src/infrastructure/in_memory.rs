use crate::domain::account::Account;
use crate::domain::amount::Amount;
use crate::domain::ports::{AccountSource, SavingsGoalSource, TransactionSource};
use crate::domain::savings_goal::{GoalState, NewSavingsGoal, SavingsGoal, TransferId};
use crate::domain::transaction::{Transaction, TransactionWindow};
use crate::error::{Result, RoundUpError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Seed data for an [`InMemoryBank`], keyed by account uid.
///
/// This is also the JSON fixture format accepted by `--fixture`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankFixture {
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: HashMap<String, Vec<Transaction>>,
    #[serde(default)]
    pub goals: HashMap<String, Vec<SavingsGoal>>,
}

/// A completed transfer into a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub transfer_id: TransferId,
    pub account_uid: String,
    pub goal_uid: String,
    pub amount: Amount,
}

#[derive(Debug, Default)]
struct BankState {
    fixture: BankFixture,
    transfers: Vec<TransferRecord>,
}

/// A thread-safe in-memory bank implementing every round-up port.
///
/// Uses `Arc<RwLock<..>>` so clones share one state, which lets a single bank
/// back all three ports of an orchestrator. Ideal for offline runs and tests.
#[derive(Default, Clone)]
pub struct InMemoryBank {
    state: Arc<RwLock<BankState>>,
}

impl InMemoryBank {
    /// Creates a new, empty in-memory bank.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: BankFixture) -> Self {
        Self {
            state: Arc::new(RwLock::new(BankState {
                fixture,
                transfers: Vec::new(),
            })),
        }
    }

    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let fixture: BankFixture = serde_json::from_reader(source)?;
        Ok(Self::from_fixture(fixture))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub async fn goals(&self, account_uid: &str) -> Vec<SavingsGoal> {
        let state = self.state.read().await;
        state
            .fixture
            .goals
            .get(account_uid)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn transfers(&self) -> Vec<TransferRecord> {
        self.state.read().await.transfers.clone()
    }
}

#[async_trait]
impl AccountSource for InMemoryBank {
    async fn fetch_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.state.read().await.fixture.accounts.clone())
    }
}

#[async_trait]
impl TransactionSource for InMemoryBank {
    /// Returns the account's transactions timestamped inside the window.
    /// Transactions without a timestamp are never in any window.
    async fn fetch_transactions(
        &self,
        account_uid: &str,
        window: &TransactionWindow,
    ) -> Result<Vec<Transaction>> {
        let state = self.state.read().await;
        Ok(state
            .fixture
            .transactions
            .get(account_uid)
            .into_iter()
            .flatten()
            .filter(|tx| tx.transaction_time.is_some_and(|time| window.contains(time)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SavingsGoalSource for InMemoryBank {
    async fn list_goals(&self, account_uid: &str) -> Result<Vec<SavingsGoal>> {
        Ok(self.goals(account_uid).await)
    }

    async fn create_goal(&self, account_uid: &str, goal: &NewSavingsGoal) -> Result<()> {
        let mut state = self.state.write().await;
        if !state
            .fixture
            .accounts
            .iter()
            .any(|account| account.account_uid.as_deref() == Some(account_uid))
        {
            return Err(RoundUpError::CreateGoal(format!(
                "unknown account {account_uid}"
            )));
        }

        state
            .fixture
            .goals
            .entry(account_uid.to_string())
            .or_default()
            .push(SavingsGoal {
                savings_goal_uid: Uuid::new_v4().to_string(),
                name: goal.name.clone(),
                state: GoalState::Active,
                target: Some(goal.target.clone()),
                total_saved: Some(Amount::new(goal.currency.clone(), 0)),
                saved_percentage: Some(0),
            });
        Ok(())
    }

    /// Declines unknown goals, currency mismatches and reused transfer ids.
    async fn fund_goal(
        &self,
        account_uid: &str,
        goal_uid: &str,
        transfer_id: TransferId,
        amount: &Amount,
    ) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.transfers.iter().any(|t| t.transfer_id == transfer_id) {
            return Ok(false);
        }

        let Some(goal) = state
            .fixture
            .goals
            .get_mut(account_uid)
            .and_then(|goals| goals.iter_mut().find(|g| g.savings_goal_uid == goal_uid))
        else {
            return Ok(false);
        };

        let saved = goal
            .total_saved
            .get_or_insert_with(|| Amount::new(amount.currency.clone(), 0));
        if !saved.is_in(&amount.currency) {
            return Ok(false);
        }
        saved.minor_units += amount.minor_units;
        let saved_units = saved.minor_units;
        if let Some(target) = goal.target.as_ref().filter(|t| t.minor_units > 0) {
            let percentage = i128::from(saved_units) * 100 / i128::from(target.minor_units);
            goal.saved_percentage = Some(percentage.clamp(0, 100) as u32);
        }

        state.transfers.push(TransferRecord {
            transfer_id,
            account_uid: account_uid.to_string(),
            goal_uid: goal_uid.to_string(),
            amount: amount.clone(),
        });
        Ok(true)
    }
}
