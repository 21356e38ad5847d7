#![allow(dead_code)]

use async_trait::async_trait;
use starling_roundup::application::orchestrator::RoundUpOrchestrator;
use starling_roundup::domain::account::Account;
use starling_roundup::domain::amount::Amount;
use starling_roundup::domain::ports::{AccountSource, SavingsGoalSource, TransactionSource};
use starling_roundup::domain::savings_goal::{
    GoalTemplate, NewSavingsGoal, SavingsGoal, TransferId,
};
use starling_roundup::domain::transaction::{Transaction, TransactionWindow};
use starling_roundup::error::{Result, RoundUpError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const GOAL_NAME: &str = "RoundUp2024";

/// Everything the orchestrator asked the bank to do.
#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub fetch_accounts: usize,
    pub fetch_transactions: Vec<(String, TransactionWindow)>,
    pub list_goals: usize,
    pub create_goal: Vec<(String, NewSavingsGoal)>,
    pub fund_goal: Vec<(String, String, TransferId, Amount)>,
}

impl Calls {
    pub fn goal_calls(&self) -> usize {
        self.list_goals + self.create_goal.len() + self.fund_goal.len()
    }
}

#[derive(Debug, Default)]
struct Script {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    goal_lists: VecDeque<Vec<SavingsGoal>>,
    fund_result: bool,
    fail_accounts: bool,
    fail_transactions: bool,
    calls: Calls,
}

/// A bank double with canned answers that records every call.
///
/// Goal lists are served in order; the last one keeps being returned.
#[derive(Clone, Default)]
pub struct ScriptedBank {
    script: Arc<Mutex<Script>>,
}

impl ScriptedBank {
    pub fn new(accounts: Vec<Account>, transactions: Vec<Transaction>) -> Self {
        let bank = Self::default();
        {
            let mut script = bank.script.lock().unwrap();
            script.accounts = accounts;
            script.transactions = transactions;
            script.fund_result = true;
        }
        bank
    }

    pub fn with_goal_lists(self, lists: Vec<Vec<SavingsGoal>>) -> Self {
        self.script.lock().unwrap().goal_lists = lists.into();
        self
    }

    pub fn with_fund_result(self, accepted: bool) -> Self {
        self.script.lock().unwrap().fund_result = accepted;
        self
    }

    pub fn failing_accounts(self) -> Self {
        self.script.lock().unwrap().fail_accounts = true;
        self
    }

    pub fn failing_transactions(self) -> Self {
        self.script.lock().unwrap().fail_transactions = true;
        self
    }

    pub fn calls(&self) -> Calls {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn orchestrator(&self) -> RoundUpOrchestrator {
        RoundUpOrchestrator::new(
            Box::new(self.clone()),
            Box::new(self.clone()),
            Box::new(self.clone()),
            GoalTemplate::new(GOAL_NAME),
        )
    }
}

#[async_trait]
impl AccountSource for ScriptedBank {
    async fn fetch_accounts(&self) -> Result<Vec<Account>> {
        let mut script = self.script.lock().unwrap();
        script.calls.fetch_accounts += 1;
        if script.fail_accounts {
            return Err(RoundUpError::fetch("accounts", "status 403 Forbidden"));
        }
        Ok(script.accounts.clone())
    }
}

#[async_trait]
impl TransactionSource for ScriptedBank {
    async fn fetch_transactions(
        &self,
        account_uid: &str,
        window: &TransactionWindow,
    ) -> Result<Vec<Transaction>> {
        let mut script = self.script.lock().unwrap();
        script
            .calls
            .fetch_transactions
            .push((account_uid.to_string(), *window));
        if script.fail_transactions {
            return Err(RoundUpError::fetch("transactions", "status 500 Internal Server Error"));
        }
        Ok(script.transactions.clone())
    }
}

#[async_trait]
impl SavingsGoalSource for ScriptedBank {
    async fn list_goals(&self, _account_uid: &str) -> Result<Vec<SavingsGoal>> {
        let mut script = self.script.lock().unwrap();
        script.calls.list_goals += 1;
        let goals = if script.goal_lists.len() > 1 {
            script.goal_lists.pop_front()
        } else {
            script.goal_lists.front().cloned()
        };
        Ok(goals.unwrap_or_default())
    }

    async fn create_goal(&self, account_uid: &str, goal: &NewSavingsGoal) -> Result<()> {
        let mut script = self.script.lock().unwrap();
        script
            .calls
            .create_goal
            .push((account_uid.to_string(), goal.clone()));
        Ok(())
    }

    async fn fund_goal(
        &self,
        account_uid: &str,
        goal_uid: &str,
        transfer_id: TransferId,
        amount: &Amount,
    ) -> Result<bool> {
        let mut script = self.script.lock().unwrap();
        script.calls.fund_goal.push((
            account_uid.to_string(),
            goal_uid.to_string(),
            transfer_id,
            amount.clone(),
        ));
        Ok(script.fund_result)
    }
}

pub fn primary_account() -> Account {
    Account::new("1234", "PRIMARY", "GBP")
}

pub fn active_goal() -> SavingsGoal {
    SavingsGoal::active("goal-1234", GOAL_NAME)
}

/// Outgoing GBP transactions of the given sizes.
pub fn gbp_spending(minor_units: &[i64]) -> Vec<Transaction> {
    minor_units
        .iter()
        .map(|&units| Transaction::outgoing("GBP", units))
        .collect()
}
