use crate::core::confirm::confirm_then;
use crate::core::dispatcher::{ApiRequest, Dispatcher};
use crate::domain::model::{ActionOutcome, Severity};
use crate::domain::ports::ConfirmationProvider;
use crate::utils::error::Result;
use std::sync::Arc;

const DELETE_PROMPT: &str =
    "Are you sure you want to delete this user? This action cannot be undone.";

pub struct UserActions {
    dispatcher: Dispatcher,
    confirmation: Arc<dyn ConfirmationProvider>,
}

impl UserActions {
    pub fn new(dispatcher: Dispatcher, confirmation: Arc<dyn ConfirmationProvider>) -> Self {
        Self {
            dispatcher,
            confirmation,
        }
    }

    /// Flips the user's active flag. `currently_active` picks the wording.
    pub async fn toggle_status(&self, user_id: u64, currently_active: bool) -> Result<ActionOutcome> {
        let action = if currently_active { "deactivate" } else { "activate" };
        let prompt = format!("Are you sure you want to {} this user?", action);

        confirm_then(self.confirmation.as_ref(), &prompt, move || async move {
            self.dispatcher
                .send(ApiRequest::post(format!("/api/users/{}/toggle-status", user_id)))
                .await?;
            self.dispatcher
                .notifier()
                .notify(&format!("User {}d successfully", action), Severity::Success);
            Ok(())
        })
        .await
    }

    pub async fn delete(&self, user_id: u64) -> Result<ActionOutcome> {
        confirm_then(self.confirmation.as_ref(), DELETE_PROMPT, move || async move {
            self.dispatcher
                .send(ApiRequest::delete(format!("/api/users/{}", user_id)))
                .await?;
            self.dispatcher
                .notifier()
                .notify("User deleted successfully", Severity::Success);
            Ok(())
        })
        .await
    }
}
