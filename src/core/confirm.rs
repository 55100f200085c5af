use crate::domain::model::ActionOutcome;
use crate::domain::ports::ConfirmationProvider;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::future::Future;
use std::io::{BufRead, Write};
use std::sync::Mutex;

/// Runs `action` only if the user accepts `message`.
pub async fn confirm_then<F, Fut>(
    provider: &dyn ConfirmationProvider,
    message: &str,
    action: F,
) -> Result<ActionOutcome>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    if !provider.confirm(message).await {
        tracing::debug!("Confirmation declined: {}", message);
        return Ok(ActionOutcome::Declined);
    }
    action().await?;
    Ok(ActionOutcome::Completed)
}

/// Accepts everything. Used for `--yes` and non-interactive callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

#[async_trait]
impl ConfirmationProvider for AlwaysConfirm {
    async fn confirm(&self, message: &str) -> bool {
        tracing::debug!("Auto-confirming: {}", message);
        true
    }
}

/// Native blocking y/N prompt on the terminal.
///
/// The read happens on tokio's blocking pool so other tasks keep running
/// while the user decides.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    /// Free-text prompt. `None` when the user enters nothing or input is closed.
    pub async fn prompt_text(&self, message: &str) -> Option<String> {
        let message = message.to_string();
        let line = tokio::task::spawn_blocking(move || read_line(&message))
            .await
            .ok()
            .flatten()?;
        let line = line.trim().to_string();
        (!line.is_empty()).then_some(line)
    }
}

#[async_trait]
impl ConfirmationProvider for TerminalPrompt {
    async fn confirm(&self, message: &str) -> bool {
        let prompt = format!("{} [y/N] ", message);
        match tokio::task::spawn_blocking(move || read_line(&prompt)).await {
            Ok(Some(answer)) => is_affirmative(&answer),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Confirmation prompt failed: {}", e);
                false
            }
        }
    }
}

fn read_line(prompt: &str) -> Option<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{}", prompt).ok()?;
    stderr.flush().ok()?;

    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Replays queued answers and records every prompt it was shown.
/// Once the queue is empty it falls back to `default_answer`.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
    default_answer: bool,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
            default_answer: false,
        }
    }

    pub fn accepting() -> Self {
        Self::new([]).with_default(true)
    }

    pub fn refusing() -> Self {
        Self::new([])
    }

    pub fn with_default(mut self, answer: bool) -> Self {
        self.default_answer = answer;
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ConfirmationProvider for ScriptedConfirm {
    async fn confirm(&self, message: &str) -> bool {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(message.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .unwrap_or(self.default_answer)
    }
}
