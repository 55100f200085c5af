#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::{ApiConfig, BridgeConfig, CurrencyConfig, FilterConfig, NotificationConfig};
