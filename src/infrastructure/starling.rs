use crate::domain::account::Account;
use crate::domain::amount::Amount;
use crate::domain::ports::{AccountSource, SavingsGoalSource, TransactionSource};
use crate::domain::savings_goal::{NewSavingsGoal, SavingsGoal, TransferId};
use crate::domain::transaction::{Transaction, TransactionWindow};
use crate::error::{Result, RoundUpError};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const SANDBOX_BASE_URL: &str = "https://api-sandbox.starlingbank.com/api/v2";

#[derive(Debug, Deserialize)]
struct AccountsResponse {
    accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedItemsResponse {
    #[serde(default)]
    feed_items: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavingsGoalsResponse {
    #[serde(default)]
    savings_goal_list: Vec<SavingsGoal>,
}

#[derive(Debug, Serialize)]
struct TopUpRequest<'a> {
    amount: &'a Amount,
}

/// HTTP adapter for the Starling public API (v2).
///
/// One client backs all three ports; `Clone` shares the underlying connection
/// pool. Authentication is a bearer token supplied at construction.
#[derive(Clone)]
pub struct StarlingClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl StarlingClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RoundUpError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| RoundUpError::fetch(resource, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RoundUpError::fetch(resource, format!("status {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RoundUpError::fetch(resource, e))
    }
}

#[async_trait]
impl AccountSource for StarlingClient {
    async fn fetch_accounts(&self) -> Result<Vec<Account>> {
        let request = self.http.get(self.url("accounts"));
        let response: AccountsResponse = self.get_json("accounts", request).await?;
        Ok(response.accounts)
    }
}

#[async_trait]
impl TransactionSource for StarlingClient {
    async fn fetch_transactions(
        &self,
        account_uid: &str,
        window: &TransactionWindow,
    ) -> Result<Vec<Transaction>> {
        let request = self
            .http
            .get(self.url(&format!(
                "feed/account/{account_uid}/settled-transactions-between"
            )))
            .query(&[
                ("minTransactionTimestamp", window.min_timestamp()),
                ("maxTransactionTimestamp", window.max_timestamp()),
            ]);
        let response: FeedItemsResponse = self.get_json("transactions", request).await?;
        Ok(response.feed_items)
    }
}

#[async_trait]
impl SavingsGoalSource for StarlingClient {
    async fn list_goals(&self, account_uid: &str) -> Result<Vec<SavingsGoal>> {
        let request = self
            .http
            .get(self.url(&format!("account/{account_uid}/savings-goals")));
        let response: SavingsGoalsResponse = self.get_json("savings goals", request).await?;
        Ok(response.savings_goal_list)
    }

    async fn create_goal(&self, account_uid: &str, goal: &NewSavingsGoal) -> Result<()> {
        let response = self
            .http
            .put(self.url(&format!("account/{account_uid}/savings-goals")))
            .bearer_auth(&self.token)
            .json(goal)
            .send()
            .await
            .map_err(|e| RoundUpError::CreateGoal(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RoundUpError::CreateGoal(format!("status {status}")))
        }
    }

    async fn fund_goal(
        &self,
        account_uid: &str,
        goal_uid: &str,
        transfer_id: TransferId,
        amount: &Amount,
    ) -> Result<bool> {
        let response = self
            .http
            .put(self.url(&format!(
                "account/{account_uid}/savings-goals/{goal_uid}/add-money/{transfer_id}"
            )))
            .bearer_auth(&self.token)
            .json(&TopUpRequest { amount })
            .send()
            .await
            .map_err(|e| RoundUpError::fetch("savings goal transfer", e))?;

        Ok(response.status().is_success())
    }
}
