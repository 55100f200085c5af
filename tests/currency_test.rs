use expense_bridge::adapters::memory::MemoryDisplay;
use expense_bridge::core::actions::currency::FALLBACK_RATE;
use expense_bridge::domain::ports::DisplayTarget;
use expense_bridge::{CurrencyService, Dispatcher, Severity, ToastStack};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

fn service(server: &MockServer) -> (CurrencyService, Arc<ToastStack>) {
    let toasts = Arc::new(ToastStack::new());
    let dispatcher = Dispatcher::new(server.base_url(), toasts.clone()).unwrap();
    (CurrencyService::new(dispatcher), toasts)
}

#[tokio::test]
async fn test_same_currency_skips_network() {
    let server = MockServer::start();
    let any_call = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(json!({"rate": 3.0}));
    });

    let (currency, _) = service(&server);
    for code in ["USD", "EUR", "JPY"] {
        assert_eq!(currency.exchange_rate(code, code).await.unwrap(), 1.0);
    }

    any_call.assert_hits(0);
}

#[tokio::test]
async fn test_rate_lookup() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/exchange-rate/USD/EUR");
        then.status(200).json_body(json!({"rate": 0.92}));
    });

    let (currency, _) = service(&server);
    let rate = currency.exchange_rate("USD", "EUR").await.unwrap();

    api_mock.assert();
    assert_eq!(rate, 0.92);
}

#[tokio::test]
async fn test_failed_lookup_falls_back_silently() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/exchange-rate/USD/XYZ");
        then.status(500).json_body(json!({"error": "Rate service down"}));
    });

    let (currency, toasts) = service(&server);
    let rate = currency.exchange_rate("USD", "XYZ").await.unwrap();

    api_mock.assert();
    assert_eq!(rate, FALLBACK_RATE);
    assert_eq!(toasts.container_count(), 0);
}

#[tokio::test]
async fn test_malformed_rate_body_falls_back() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/exchange-rate/USD/GBP");
        then.status(200).json_body(json!({"value": 0.79}));
    });

    let (currency, toasts) = service(&server);
    assert_eq!(currency.exchange_rate("USD", "GBP").await.unwrap(), 1.0);
    assert_eq!(toasts.container_count(), 0);
}

#[tokio::test]
async fn test_strict_lookup_reports_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/exchange-rate/USD/XYZ");
        then.status(404).json_body(json!({"error": "Unknown currency"}));
    });

    let (currency, toasts) = service(&server);
    assert_err!(currency.try_exchange_rate("USD", "XYZ").await);
    assert_eq!(toasts.container_count(), 0);

    let strict = currency.with_fallback(false);
    assert_err!(strict.exchange_rate("USD", "XYZ").await);
    let visible = toasts.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].message, "Unknown currency");
    assert_eq!(visible[0].severity, Severity::Danger);
}

#[tokio::test]
async fn test_convert_multiplies_by_rate() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/exchange-rate/EUR/USD");
        then.status(200).json_body(json!({"rate": 1.25}));
    });

    let (currency, _) = service(&server);
    let conversion = assert_ok!(currency.convert(80.0, "EUR", "USD").await);

    assert_eq!(conversion.amount, 80.0);
    assert_eq!(conversion.rate, 1.25);
    assert_eq!(conversion.converted, 100.0);
}

#[tokio::test]
async fn test_conversion_display_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/exchange-rate/USD/EUR");
        then.status(200).json_body(json!({"rate": 0.92}));
    });

    let (currency, _) = service(&server);
    let display = MemoryDisplay::new();
    currency
        .update_conversion_display(Some(100.0), "USD", "EUR", &display)
        .await
        .unwrap();

    assert_eq!(
        display.content().as_deref(),
        Some("USD 100.00 = EUR 92.00 (Rate: 0.9200)")
    );
}

#[tokio::test]
async fn test_conversion_display_hidden_without_amount_or_same_currency() {
    let server = MockServer::start();
    let any_call = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(json!({"rate": 0.92}));
    });

    let (currency, _) = service(&server);
    let display = MemoryDisplay::new();

    display.show("stale");
    currency
        .update_conversion_display(None, "USD", "EUR", &display)
        .await
        .unwrap();
    assert!(!display.is_visible());

    display.show("stale");
    currency
        .update_conversion_display(Some(0.0), "USD", "EUR", &display)
        .await
        .unwrap();
    assert!(!display.is_visible());

    display.show("stale");
    currency
        .update_conversion_display(Some(50.0), "EUR", "EUR", &display)
        .await
        .unwrap();
    assert!(!display.is_visible());

    any_call.assert_hits(0);
}

#[tokio::test]
async fn test_conversion_display_uses_fallback_rate() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/exchange-rate/USD/EUR");
        then.status(503);
    });

    let (currency, _) = service(&server);
    let display = MemoryDisplay::new();
    currency
        .update_conversion_display(Some(20.0), "USD", "EUR", &display)
        .await
        .unwrap();

    assert_eq!(
        display.content().as_deref(),
        Some("USD 20.00 = EUR 20.00 (Rate: 1.0000)")
    );
}

#[tokio::test]
async fn test_malformed_codes_never_reach_the_server() {
    let server = MockServer::start();
    let any_call = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(json!({"rate": 3.0}));
    });

    let (currency, _) = service(&server);
    assert_err!(currency.try_exchange_rate("USD", "EUR/../x").await);
    // the fallback does not paper over a bad code
    assert_err!(currency.exchange_rate("../USD", "EUR").await);
    assert_err!(currency.convert(10.0, "USD", "").await);

    any_call.assert_hits(0);
}
