pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::BridgeConfig;
pub use crate::core::actions::{ActionSet, ApprovalActions, CurrencyService, ExpenseActions, UserActions};
pub use crate::core::dispatcher::{ApiRequest, Dispatcher};
pub use crate::core::notify::ToastStack;
pub use crate::domain::model::{ActionOutcome, Severity};
pub use crate::utils::error::{BridgeError, Result};
