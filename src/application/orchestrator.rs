use crate::domain::account::{self, Account, ValidatedAccount};
use crate::domain::ports::{AccountSourceBox, SavingsGoalSourceBox, TransactionSourceBox};
use crate::domain::round_up::{self, RoundUpResult};
use crate::domain::savings_goal::{GoalTemplate, SavingsGoal, TransferId, find_eligible_goal};
use crate::domain::transaction::TransactionWindow;
use crate::error::{Result, RoundUpError};
use chrono::{DateTime, Utc};

/// What a single round-up run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundUpReport {
    pub account_uid: String,
    pub window: TransactionWindow,
    pub valid_transactions: usize,
    pub result: RoundUpResult,
    /// Goal the total was paid into. `None` when the total was zero.
    pub goal_uid: Option<String>,
    pub goal_created: bool,
    pub transfer_id: Option<TransferId>,
}

/// Computes the weekly round-up of an account and pays it into a savings goal.
///
/// Every external call is awaited before the next one is issued, so a run is a
/// single linear chain: accounts, transactions, goal lookup (and creation),
/// transfer. Any failure ends the run with that error. The transfer is the only
/// write and always the last step, so a failed run leaves nothing to undo.
pub struct RoundUpOrchestrator {
    accounts: AccountSourceBox,
    transactions: TransactionSourceBox,
    goals: SavingsGoalSourceBox,
    goal: GoalTemplate,
}

impl RoundUpOrchestrator {
    /// Creates a new `RoundUpOrchestrator`.
    ///
    /// # Arguments
    ///
    /// * `accounts` - Source of the customer's accounts.
    /// * `transactions` - Source of an account's transaction feed.
    /// * `goals` - Lists, creates and funds savings goals.
    /// * `goal` - Name and target of the goal round-ups are paid into.
    pub fn new(
        accounts: AccountSourceBox,
        transactions: TransactionSourceBox,
        goals: SavingsGoalSourceBox,
        goal: GoalTemplate,
    ) -> Self {
        Self {
            accounts,
            transactions,
            goals,
            goal,
        }
    }

    pub fn goal(&self) -> &GoalTemplate {
        &self.goal
    }

    pub async fn accounts(&self) -> Result<Vec<Account>> {
        self.accounts.fetch_accounts().await
    }

    /// Runs a round-up over the seven days ending now.
    ///
    /// With `account_uid` the named account is used, otherwise the first
    /// PRIMARY account.
    pub async fn execute(&self, account_uid: Option<&str>) -> Result<RoundUpReport> {
        self.execute_at(account_uid, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        account_uid: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<RoundUpReport> {
        let accounts = self.accounts.fetch_accounts().await?;
        let selected = match account_uid {
            Some(uid) => account::select_by_uid(&accounts, uid)?,
            None => account::select_primary(&accounts)?,
        };
        let account = selected.validate()?;

        let window = TransactionWindow::trailing_week(now);
        let transactions = self
            .transactions
            .fetch_transactions(&account.uid, &window)
            .await?;

        let valid: Vec<_> = round_up::valid_transactions(&transactions, &account.currency).collect();
        let result = RoundUpResult::new(
            account.currency.clone(),
            round_up::calculate_round_up(valid.iter().copied()),
        );

        let mut report = RoundUpReport {
            account_uid: account.uid.clone(),
            window,
            valid_transactions: valid.len(),
            result,
            goal_uid: None,
            goal_created: false,
            transfer_id: None,
        };

        // A quiet week neither creates nor funds a goal.
        if report.result.is_zero() {
            return Ok(report);
        }

        let (goal, created) = self.resolve_goal(&account).await?;
        let transfer_id = self
            .transfer(&account, &goal, &report.result)
            .await?;

        report.goal_uid = Some(goal.savings_goal_uid);
        report.goal_created = created;
        report.transfer_id = Some(transfer_id);
        Ok(report)
    }

    /// Finds the configured goal, creating it when absent.
    ///
    /// After a creation the goals are listed exactly once more. If the new goal
    /// still does not show up the run fails with `SavingsGoalNotResolved`
    /// rather than funding an unknown goal.
    async fn resolve_goal(&self, account: &ValidatedAccount) -> Result<(SavingsGoal, bool)> {
        let goals = self.goals.list_goals(&account.uid).await?;
        if let Some(goal) = find_eligible_goal(&goals, &self.goal.name) {
            return Ok((goal.clone(), false));
        }

        self.goals
            .create_goal(&account.uid, &self.goal.request(&account.currency))
            .await?;

        let goals = self.goals.list_goals(&account.uid).await?;
        find_eligible_goal(&goals, &self.goal.name)
            .cloned()
            .map(|goal| (goal, true))
            .ok_or_else(|| RoundUpError::SavingsGoalNotResolved(self.goal.name.clone()))
    }

    async fn transfer(
        &self,
        account: &ValidatedAccount,
        goal: &SavingsGoal,
        total: &RoundUpResult,
    ) -> Result<TransferId> {
        let transfer_id = TransferId::generate();
        let accepted = self
            .goals
            .fund_goal(
                &account.uid,
                &goal.savings_goal_uid,
                transfer_id,
                &total.as_amount(),
            )
            .await?;

        if accepted {
            Ok(transfer_id)
        } else {
            Err(RoundUpError::TransferFailed)
        }
    }
}
