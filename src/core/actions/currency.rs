use crate::core::dispatcher::{ApiRequest, Dispatcher};
use crate::domain::model::{RateResponse, Severity};
use crate::domain::ports::DisplayTarget;
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::validate_currency_code;

/// Rate used when a lookup fails and the fallback is enabled.
pub const FALLBACK_RATE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub converted: f64,
    pub rate: f64,
}

/// `USD 100.00 = EUR 92.00 (Rate: 0.9200)`
pub fn format_conversion(from: &str, to: &str, conversion: &Conversion) -> String {
    format!(
        "{} {:.2} = {} {:.2} (Rate: {:.4})",
        from, conversion.amount, to, conversion.converted, conversion.rate
    )
}

/// Exchange-rate lookups and conversions.
///
/// With `fallback_on_error` set (the default), a failed lookup yields
/// [`FALLBACK_RATE`] and is only logged. This hides real failures from the
/// user; turn it off to get the error and a danger notification instead.
pub struct CurrencyService {
    dispatcher: Dispatcher,
    fallback_on_error: bool,
}

impl CurrencyService {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            fallback_on_error: true,
        }
    }

    pub fn with_fallback(mut self, fallback_on_error: bool) -> Self {
        self.fallback_on_error = fallback_on_error;
        self
    }

    /// Strict lookup: identical codes short-circuit to 1.0, anything else hits the API.
    /// Both codes must be three ASCII letters; anything else is refused before a request.
    pub async fn try_exchange_rate(&self, from: &str, to: &str) -> Result<f64> {
        check_code(from)?;
        check_code(to)?;
        if from == to {
            return Ok(1.0);
        }
        let response: RateResponse = self
            .dispatcher
            .fetch(ApiRequest::get(format!("/api/exchange-rate/{}/{}", from, to)).handle_errors())
            .await?;
        Ok(response.rate)
    }

    /// Like [`try_exchange_rate`](Self::try_exchange_rate), but lookup failures fall
    /// back to [`FALLBACK_RATE`] when enabled. Invalid codes are always an error.
    pub async fn exchange_rate(&self, from: &str, to: &str) -> Result<f64> {
        match self.try_exchange_rate(from, to).await {
            Ok(rate) => Ok(rate),
            Err(e) if self.fallback_on_error && !matches!(e, BridgeError::Validation { .. }) => {
                tracing::warn!(
                    "Exchange rate {}->{} unavailable ({}), using {}",
                    from,
                    to,
                    e,
                    FALLBACK_RATE
                );
                Ok(FALLBACK_RATE)
            }
            Err(e) => {
                self.dispatcher
                    .notifier()
                    .notify(&e.notification_text(), Severity::Danger);
                Err(e)
            }
        }
    }

    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<Conversion> {
        let rate = self.exchange_rate(from, to).await?;
        Ok(Conversion {
            amount,
            converted: amount * rate,
            rate,
        })
    }

    /// Hidden when there is nothing to convert, otherwise shows the conversion line.
    pub async fn update_conversion_display(
        &self,
        amount: Option<f64>,
        from: &str,
        to: &str,
        display: &dyn DisplayTarget,
    ) -> Result<()> {
        let amount = match amount {
            Some(amount) if amount != 0.0 && !amount.is_nan() && from != to => amount,
            _ => {
                display.hide();
                return Ok(());
            }
        };

        match self.convert(amount, from, to).await {
            Ok(conversion) => {
                display.show(&format_conversion(from, to, &conversion));
                Ok(())
            }
            Err(e) => {
                // never leave a conversion for another pair on screen
                display.hide();
                Err(e)
            }
        }
    }
}

fn check_code(code: &str) -> Result<()> {
    validate_currency_code("currency", code)
        .map_err(|_| BridgeError::validation(format!("Invalid currency code: {}", code)))
}
