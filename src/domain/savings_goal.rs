use super::amount::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const ACTIVE_GOAL_STATE: &str = "ACTIVE";

/// Lifecycle state of a savings goal. Only the exact tag `ACTIVE` is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GoalState {
    Active,
    Other(String),
}

impl From<String> for GoalState {
    fn from(value: String) -> Self {
        if value == ACTIVE_GOAL_STATE {
            GoalState::Active
        } else {
            GoalState::Other(value)
        }
    }
}

impl From<GoalState> for String {
    fn from(state: GoalState) -> Self {
        match state {
            GoalState::Active => ACTIVE_GOAL_STATE.to_string(),
            GoalState::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub savings_goal_uid: String,
    pub name: String,
    pub state: GoalState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_saved: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_percentage: Option<u32>,
}

impl SavingsGoal {
    pub fn active(uid: &str, name: &str) -> Self {
        Self {
            savings_goal_uid: uid.to_string(),
            name: name.to_string(),
            state: GoalState::Active,
            target: None,
            total_saved: None,
            saved_percentage: None,
        }
    }

    /// A goal receives round-ups only if its name matches exactly and it is active.
    pub fn is_eligible(&self, name: &str) -> bool {
        self.name == name && self.state == GoalState::Active
    }
}

pub fn find_eligible_goal<'a>(goals: &'a [SavingsGoal], name: &str) -> Option<&'a SavingsGoal> {
    goals.iter().find(|goal| goal.is_eligible(name))
}

/// Body of a create-goal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsGoal {
    pub name: String,
    pub currency: String,
    pub target: Amount,
}

/// Name and target of the goal round-ups are paid into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalTemplate {
    pub name: String,
    pub target_minor_units: i64,
}

impl GoalTemplate {
    pub const DEFAULT_TARGET_MINOR_UNITS: i64 = 100_000;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_minor_units: Self::DEFAULT_TARGET_MINOR_UNITS,
        }
    }

    pub fn request(&self, currency: &str) -> NewSavingsGoal {
        NewSavingsGoal {
            name: self.name.clone(),
            currency: currency.to_string(),
            target: Amount::new(currency, self.target_minor_units),
        }
    }
}

/// Client-generated identifier of a single transfer into a goal.
///
/// The bank treats a repeated identifier as the same transfer, so a fresh one is
/// generated for every transfer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferId(Uuid);

impl TransferId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
