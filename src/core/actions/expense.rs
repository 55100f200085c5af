use crate::core::confirm::confirm_then;
use crate::core::dispatcher::{ApiRequest, Dispatcher};
use crate::core::render::render_expense_detail;
use crate::domain::model::{ActionOutcome, ExpenseView, Severity};
use crate::domain::ports::{ConfirmationProvider, OverlayHost};
use crate::utils::error::Result;
use std::sync::Arc;

pub const DETAIL_OVERLAY_KEY: &str = "expense-details";
const DELETE_PROMPT: &str = "Are you sure you want to delete this expense?";

fn expense_path(expense_id: u64) -> String {
    format!("/api/expenses/{}", expense_id)
}

pub struct ExpenseActions {
    dispatcher: Dispatcher,
    confirmation: Arc<dyn ConfirmationProvider>,
    overlays: Arc<dyn OverlayHost>,
}

impl ExpenseActions {
    pub fn new(
        dispatcher: Dispatcher,
        confirmation: Arc<dyn ConfirmationProvider>,
        overlays: Arc<dyn OverlayHost>,
    ) -> Self {
        Self {
            dispatcher,
            confirmation,
            overlays,
        }
    }

    /// Loads an expense and shows it in the detail overlay.
    pub async fn view_details(&self, expense_id: u64) -> Result<ExpenseView> {
        let expense: ExpenseView = self
            .dispatcher
            .fetch(ApiRequest::get(expense_path(expense_id)))
            .await?;
        self.show_details(&expense);
        Ok(expense)
    }

    /// Replaces any open detail overlay with this expense.
    pub fn show_details(&self, expense: &ExpenseView) {
        self.overlays.close(DETAIL_OVERLAY_KEY);
        self.overlays.open(
            DETAIL_OVERLAY_KEY,
            &expense.title,
            &render_expense_detail(expense),
        );
    }

    pub async fn delete(&self, expense_id: u64) -> Result<ActionOutcome> {
        confirm_then(self.confirmation.as_ref(), DELETE_PROMPT, move || async move {
            self.dispatcher
                .send(ApiRequest::delete(expense_path(expense_id)))
                .await?;
            tracing::info!("Deleted expense {}", expense_id);
            self.dispatcher
                .notifier()
                .notify("Expense deleted successfully", Severity::Success);
            Ok(())
        })
        .await
    }
}
