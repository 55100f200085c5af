pub mod approval;
pub mod currency;
pub mod expense;
pub mod user;

pub use approval::ApprovalActions;
pub use currency::{Conversion, CurrencyService};
pub use expense::ExpenseActions;
pub use user::UserActions;

use crate::core::dispatcher::Dispatcher;
use crate::domain::ports::{ConfirmationProvider, OverlayHost};
use std::sync::Arc;

/// All action services wired to the same dispatcher and boundaries.
pub struct ActionSet {
    pub expenses: ExpenseActions,
    pub approvals: ApprovalActions,
    pub users: UserActions,
    pub currency: CurrencyService,
}

impl ActionSet {
    pub fn new(
        dispatcher: Dispatcher,
        confirmation: Arc<dyn ConfirmationProvider>,
        overlays: Arc<dyn OverlayHost>,
    ) -> Self {
        Self {
            expenses: ExpenseActions::new(dispatcher.clone(), confirmation.clone(), overlays),
            approvals: ApprovalActions::new(dispatcher.clone(), confirmation.clone()),
            users: UserActions::new(dispatcher.clone(), confirmation),
            currency: CurrencyService::new(dispatcher),
        }
    }

    pub fn with_currency_fallback(mut self, fallback_on_error: bool) -> Self {
        self.currency = self.currency.with_fallback(fallback_on_error);
        self
    }
}
