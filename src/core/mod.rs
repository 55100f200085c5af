pub mod actions;
pub mod confirm;
pub mod dispatcher;
pub mod filter;
pub mod format;
pub mod notify;
pub mod render;

pub use crate::domain::model::{ActionOutcome, Notification, Severity};
pub use crate::domain::ports::{
    BusyTarget, ConfirmationProvider, DisplayTarget, Notifier, OverlayHost,
};
pub use crate::utils::error::Result;
