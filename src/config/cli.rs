use crate::config::toml_config::BridgeConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_currency_code, Validate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "expense-bridge")]
#[command(about = "Run expense, approval, user and currency actions against the expense API")]
pub struct CliConfig {
    /// Overrides `api.base_url` from the config file
    #[arg(long, env = "EXPENSE_BRIDGE_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(short = 'y', long, help = "Answer yes to every confirmation")]
    pub yes: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(subcommand)]
    Expense(ExpenseCommand),
    #[command(subcommand)]
    Approval(ApprovalCommand),
    #[command(subcommand)]
    User(UserCommand),
    /// Look up an exchange rate
    Rate(CurrencyPair),
    /// Convert an amount between currencies
    Convert {
        amount: f64,
        #[command(flatten)]
        pair: CurrencyPair,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ExpenseCommand {
    /// Show an expense with its approval workflow
    Show { id: u64 },
    Delete { id: u64 },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ApprovalCommand {
    Approve {
        id: u64,
        #[arg(long)]
        comments: Option<String>,
    },
    Reject {
        id: u64,
        #[arg(long, default_value = "")]
        comments: String,
    },
    BulkApprove {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
    },
    BulkReject {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
        /// Asked for interactively when omitted
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserCommand {
    /// Activate or deactivate a user
    Toggle {
        id: u64,
        /// The user is active now and will be deactivated
        #[arg(long)]
        active: bool,
    },
    Delete { id: u64 },
}

#[derive(Debug, Clone, Args)]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CliConfig {
    /// File configuration (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<BridgeConfig> {
        let mut config = match &self.config {
            Some(path) => BridgeConfig::from_file(path)?,
            None => BridgeConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Rate(pair) | Command::Convert { pair, .. } => {
                validate_currency_code("from", &pair.from)?;
                validate_currency_code("to", &pair.to)?;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reject_command() {
        let cli = CliConfig::try_parse_from([
            "expense-bridge",
            "--yes",
            "approval",
            "reject",
            "7",
            "--comments",
            "Missing receipt",
        ])
        .unwrap();

        assert!(cli.yes);
        match cli.command {
            Command::Approval(ApprovalCommand::Reject { id, comments }) => {
                assert_eq!(id, 7);
                assert_eq!(comments, "Missing receipt");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_convert_command() {
        let cli =
            CliConfig::try_parse_from(["expense-bridge", "convert", "100", "USD", "EUR"]).unwrap();
        match &cli.command {
            Command::Convert { amount, pair } => {
                assert_eq!(*amount, 100.0);
                assert_eq!(pair.from, "USD");
                assert_eq!(pair.to, "EUR");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_bulk_approve_requires_ids() {
        assert!(CliConfig::try_parse_from(["expense-bridge", "approval", "bulk-approve"]).is_err());
    }

    #[test]
    fn test_invalid_currency_code_fails_validation() {
        let cli = CliConfig::try_parse_from(["expense-bridge", "rate", "US", "EUR"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_base_url_override() {
        let cli = CliConfig::try_parse_from([
            "expense-bridge",
            "--base-url",
            "https://expenses.example.com",
            "user",
            "delete",
            "3",
        ])
        .unwrap();

        let config = cli.resolve().unwrap();
        assert_eq!(config.api.base_url, "https://expenses.example.com");
    }
}
