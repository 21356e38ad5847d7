use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use starling_roundup::application::orchestrator::{RoundUpOrchestrator, RoundUpReport};
use starling_roundup::config::{Backend, Settings};
use starling_roundup::domain::ports::{
    AccountSourceBox, SavingsGoalSourceBox, TransactionSourceBox,
};
use starling_roundup::domain::round_up::{self, RoundUpResult};
use starling_roundup::domain::transaction::api_timestamp;
use starling_roundup::infrastructure::in_memory::InMemoryBank;
use starling_roundup::infrastructure::starling::StarlingClient;
use starling_roundup::interfaces::csv::transaction_reader::TransactionReader;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roundup", author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Print progress details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Round up last week's spending and move it into the savings goal
    Run {
        /// Account uid to use instead of the primary account
        #[arg(long)]
        account: Option<String>,
    },
    /// Print the accounts visible with the configured token as JSON
    Accounts,
    /// Compute the round-up of a transactions CSV without touching any account
    Preview {
        /// CSV file with direction,currency,minor_units[,status] columns
        input: PathBuf,

        /// Currency of the account the transactions belong to
        #[arg(long, default_value = "GBP")]
        currency: String,
    },
    /// Serve the round-up over HTTP
    #[cfg(feature = "server")]
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: std::net::SocketAddr,
    },
}

fn build_orchestrator(settings: &Settings) -> Result<RoundUpOrchestrator> {
    let orchestrator = match settings.backend().into_diagnostic()? {
        Backend::Fixture(path) => {
            // Offline: one in-memory bank behind every port
            let bank = InMemoryBank::open(path).into_diagnostic()?;

            let accounts: AccountSourceBox = Box::new(bank.clone());
            let transactions: TransactionSourceBox = Box::new(bank.clone());
            let goals: SavingsGoalSourceBox = Box::new(bank);

            RoundUpOrchestrator::new(accounts, transactions, goals, settings.goal())
        }
        Backend::Starling { base_url, token } => {
            let client = StarlingClient::new(base_url, token).into_diagnostic()?;

            let accounts: AccountSourceBox = Box::new(client.clone());
            let transactions: TransactionSourceBox = Box::new(client.clone());
            let goals: SavingsGoalSourceBox = Box::new(client);

            RoundUpOrchestrator::new(accounts, transactions, goals, settings.goal())
        }
    };

    Ok(orchestrator)
}

fn log_report(report: &RoundUpReport) {
    eprintln!(
        "account {}: {} valid transactions between {} and {}",
        report.account_uid,
        report.valid_transactions,
        api_timestamp(report.window.from),
        api_timestamp(report.window.to),
    );
    match (&report.goal_uid, &report.transfer_id) {
        (Some(goal), Some(transfer)) => {
            if report.goal_created {
                eprintln!("created savings goal {goal}");
            }
            eprintln!("transfer {transfer} into savings goal {goal} accepted");
        }
        _ => eprintln!("nothing to round up, no transfer made"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { account } => {
            let orchestrator = build_orchestrator(&cli.settings)?;
            let report = orchestrator
                .execute(account.as_deref())
                .await
                .into_diagnostic()?;
            if cli.verbose {
                log_report(&report);
            }
            println!(
                "Round up completed successfully. Total rounded up: {}",
                report.result
            );
        }
        Command::Accounts => {
            let orchestrator = build_orchestrator(&cli.settings)?;
            let accounts = orchestrator.accounts().await.into_diagnostic()?;
            if cli.verbose {
                eprintln!("fetched {} accounts", accounts.len());
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&accounts).into_diagnostic()?
            );
        }
        Command::Preview { input, currency } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = TransactionReader::new(file);
            let mut transactions = Vec::new();
            for tx_result in reader.transactions() {
                match tx_result {
                    Ok(tx) => transactions.push(tx),
                    Err(e) => eprintln!("Error reading transaction: {}", e),
                }
            }

            let valid: Vec<_> = round_up::valid_transactions(&transactions, &currency).collect();
            let result = RoundUpResult::new(
                currency.to_ascii_uppercase(),
                round_up::calculate_round_up(valid.iter().copied()),
            );
            if cli.verbose {
                eprintln!(
                    "{} of {} transactions count towards the round-up",
                    valid.len(),
                    transactions.len()
                );
            }
            println!("Round up preview: {result}");
        }
        #[cfg(feature = "server")]
        Command::Serve { addr } => {
            let orchestrator = std::sync::Arc::new(build_orchestrator(&cli.settings)?);
            eprintln!("Server listening on http://{addr}");
            starling_roundup::interfaces::http::serve(orchestrator, addr)
                .await
                .into_diagnostic()?;
        }
    }

    Ok(())
}
