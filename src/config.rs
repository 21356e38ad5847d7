//! Runtime configuration.
//!
//! Values come from command-line flags, falling back to environment variables
//! (a `.env` file is loaded by the binary before parsing).

use crate::domain::savings_goal::GoalTemplate;
use crate::error::{Result, RoundUpError};
use crate::infrastructure::starling::SANDBOX_BASE_URL;
use clap::Args;
use std::path::PathBuf;

pub const DEFAULT_GOAL_NAME: &str = "RoundUp";

#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Starling API bearer token
    #[arg(long, env = "STARLING_API_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Base URL of the Starling API
    #[arg(long, env = "STARLING_BASE_URL", default_value = SANDBOX_BASE_URL, global = true)]
    pub base_url: String,

    /// Name of the savings goal round-ups are paid into, matched exactly
    #[arg(long, env = "ROUNDUP_GOAL_NAME", default_value = DEFAULT_GOAL_NAME, global = true)]
    pub goal_name: String,

    /// Target (in minor units) given to the savings goal when it is created
    #[arg(
        long,
        env = "ROUNDUP_GOAL_TARGET",
        default_value_t = GoalTemplate::DEFAULT_TARGET_MINOR_UNITS,
        global = true
    )]
    pub goal_target_minor_units: i64,

    /// Serve the bank from a JSON fixture instead of the Starling API
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,
}

/// Where account data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Fixture(PathBuf),
    Starling { base_url: String, token: String },
}

impl Settings {
    /// The goal template, with the name exactly as configured.
    pub fn goal(&self) -> GoalTemplate {
        GoalTemplate {
            name: self.goal_name.clone(),
            target_minor_units: self.goal_target_minor_units,
        }
    }

    /// Rejects a blank goal name, a non-positive goal target and, unless a
    /// fixture is given, a missing API token.
    pub fn validate(&self) -> Result<()> {
        if self.goal_name.trim().is_empty() {
            return Err(RoundUpError::Config(
                "the savings goal name must not be empty".to_string(),
            ));
        }
        if self.goal_target_minor_units <= 0 {
            return Err(RoundUpError::Config(
                "the savings goal target must be positive".to_string(),
            ));
        }
        if self.fixture.is_none() && self.token().is_none() {
            return Err(RoundUpError::Config(
                "no API token given; set STARLING_API_TOKEN or pass --token".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates the settings and picks the backend. A fixture wins over the API.
    pub fn backend(&self) -> Result<Backend> {
        self.validate()?;

        if let Some(path) = &self.fixture {
            return Ok(Backend::Fixture(path.clone()));
        }

        let token = self.token().ok_or_else(|| {
            RoundUpError::Config("no API token given".to_string())
        })?;
        Ok(Backend::Starling {
            base_url: self.base_url.clone(),
            token: token.to_string(),
        })
    }

    fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
