use clap::Parser;
use expense_bridge::adapters::terminal::{ConsoleNotifier, TerminalDisplay, TerminalOverlayHost};
use expense_bridge::config::cli::{ApprovalCommand, Command, ExpenseCommand, UserCommand};
use expense_bridge::core::confirm::{AlwaysConfirm, TerminalPrompt};
use expense_bridge::domain::ports::ConfirmationProvider;
use expense_bridge::utils::error::ErrorSeverity;
use expense_bridge::utils::{logger, validation::Validate};
use expense_bridge::{ActionOutcome, ActionSet, CliConfig, Dispatcher, Result};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.validate().and_then(|_| cli.resolve()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let notifier = Arc::new(ConsoleNotifier::new());
    let dispatcher = Dispatcher::from_config(&config.api, notifier)?;
    let confirmation: Arc<dyn ConfirmationProvider> = if cli.yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(TerminalPrompt)
    };
    let actions = ActionSet::new(dispatcher, confirmation, Arc::new(TerminalOverlayHost))
        .with_currency_fallback(config.currency.fallback_on_error);

    match run(&cli.command, &actions).await {
        Ok(ActionOutcome::Declined) => {
            tracing::info!("Action cancelled");
        }
        Ok(outcome) => {
            tracing::debug!("Action finished: {:?}", outcome);
        }
        Err(e) => {
            tracing::error!(
                "❌ Action failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            // the notifier has already shown the message itself
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 4,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: &Command, actions: &ActionSet) -> Result<ActionOutcome> {
    match command {
        Command::Expense(ExpenseCommand::Show { id }) => {
            actions.expenses.view_details(*id).await?;
            Ok(ActionOutcome::Completed)
        }
        Command::Expense(ExpenseCommand::Delete { id }) => actions.expenses.delete(*id).await,
        Command::Approval(ApprovalCommand::Approve { id, comments }) => {
            actions.approvals.approve(*id, comments.as_deref()).await
        }
        Command::Approval(ApprovalCommand::Reject { id, comments }) => {
            actions.approvals.reject(*id, comments).await
        }
        Command::Approval(ApprovalCommand::BulkApprove { ids }) => {
            actions.approvals.bulk_approve(ids).await
        }
        Command::Approval(ApprovalCommand::BulkReject { ids, reason }) => {
            let reason = match reason {
                Some(reason) => Some(reason.clone()),
                None => {
                    TerminalPrompt
                        .prompt_text("Please provide a reason for bulk rejection: ")
                        .await
                }
            };
            actions.approvals.bulk_reject(ids, reason.as_deref()).await
        }
        Command::User(UserCommand::Toggle { id, active }) => {
            actions.users.toggle_status(*id, *active).await
        }
        Command::User(UserCommand::Delete { id }) => actions.users.delete(*id).await,
        Command::Rate(pair) => {
            let rate = actions.currency.exchange_rate(&pair.from, &pair.to).await?;
            println!("1 {} = {:.4} {}", pair.from, rate, pair.to);
            Ok(ActionOutcome::Completed)
        }
        Command::Convert { amount, pair } => {
            actions
                .currency
                .update_conversion_display(Some(*amount), &pair.from, &pair.to, &TerminalDisplay)
                .await?;
            Ok(ActionOutcome::Completed)
        }
    }
}
