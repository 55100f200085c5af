use crate::core::confirm::confirm_then;
use crate::core::dispatcher::{ApiRequest, Dispatcher};
use crate::domain::model::{ActionOutcome, Severity};
use crate::domain::ports::ConfirmationProvider;
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde_json::json;
use std::sync::Arc;

pub const REJECTION_REASON_REQUIRED: &str = "Please provide a reason for rejection";
const REJECT_PROMPT: &str = "Are you sure you want to reject this expense?";

/// Approve/reject decisions on a single approval step, plus the bulk variants.
///
/// The bulk variants only confirm and acknowledge. No bulk endpoint exists on
/// the server, so they send nothing and return [`ActionOutcome::Deferred`].
pub struct ApprovalActions {
    dispatcher: Dispatcher,
    confirmation: Arc<dyn ConfirmationProvider>,
}

impl ApprovalActions {
    pub fn new(dispatcher: Dispatcher, confirmation: Arc<dyn ConfirmationProvider>) -> Self {
        Self {
            dispatcher,
            confirmation,
        }
    }

    /// Approves without asking. Missing comments are sent as an empty string.
    pub async fn approve(&self, approval_id: u64, comments: Option<&str>) -> Result<ActionOutcome> {
        self.dispatcher
            .send(
                ApiRequest::post(format!("/approvals/{}/approve", approval_id))
                    .json(json!({ "comments": comments.unwrap_or_default() })),
            )
            .await?;
        self.dispatcher
            .notifier()
            .notify("Expense approved successfully", Severity::Success);
        Ok(ActionOutcome::Completed)
    }

    /// Rejects after confirmation. A blank reason is refused before anything is sent.
    pub async fn reject(&self, approval_id: u64, comments: &str) -> Result<ActionOutcome> {
        if validate_non_empty_string("comments", comments).is_err() {
            self.dispatcher
                .notifier()
                .notify(REJECTION_REASON_REQUIRED, Severity::Warning);
            return Err(BridgeError::validation(REJECTION_REASON_REQUIRED));
        }

        confirm_then(self.confirmation.as_ref(), REJECT_PROMPT, move || async move {
            self.dispatcher
                .send(
                    ApiRequest::post(format!("/approvals/{}/reject", approval_id))
                        .json(json!({ "comments": comments })),
                )
                .await?;
            self.dispatcher
                .notifier()
                .notify("Expense rejected successfully", Severity::Success);
            Ok(())
        })
        .await
    }

    pub async fn bulk_approve(&self, approval_ids: &[u64]) -> Result<ActionOutcome> {
        let prompt = format!(
            "Are you sure you want to approve {} expenses?",
            approval_ids.len()
        );
        if !self.confirmation.confirm(&prompt).await {
            return Ok(ActionOutcome::Declined);
        }

        tracing::info!("Bulk approve requested for {:?}", approval_ids);
        self.dispatcher
            .notifier()
            .notify("Bulk approve is not available yet", Severity::Info);
        Ok(ActionOutcome::Deferred)
    }

    /// A missing or blank reason cancels quietly, like dismissing the reason prompt.
    pub async fn bulk_reject(&self, approval_ids: &[u64], reason: Option<&str>) -> Result<ActionOutcome> {
        if reason.map_or(true, |r| r.trim().is_empty()) {
            return Ok(ActionOutcome::Declined);
        }

        let prompt = format!(
            "Are you sure you want to reject {} expenses?",
            approval_ids.len()
        );
        if !self.confirmation.confirm(&prompt).await {
            return Ok(ActionOutcome::Declined);
        }

        tracing::info!("Bulk reject requested for {:?}", approval_ids);
        self.dispatcher
            .notifier()
            .notify("Bulk reject is not available yet", Severity::Info);
        Ok(ActionOutcome::Deferred)
    }
}
