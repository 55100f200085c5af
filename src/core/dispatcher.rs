use crate::config::toml_config::ApiConfig;
use crate::domain::model::{ErrorBody, Severity};
use crate::domain::ports::{BusyTarget, Notifier};
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::validate_url;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Content shown on a busy control while its request is in flight.
pub const BUSY_LABEL: &str = "Loading...";

/// Who reports a failed request to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorReporting {
    /// The dispatcher raises a danger notification.
    #[default]
    Notify,
    /// The caller handles the returned error; the dispatcher stays silent.
    Caller,
}

/// Describes one outbound call. Built per call and dropped once it settles.
#[derive(Clone)]
pub struct ApiRequest {
    pub endpoint: String,
    pub method: Method,
    pub payload: Option<serde_json::Value>,
    pub busy: Option<Arc<dyn BusyTarget>>,
    pub reporting: ErrorReporting,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            payload: None,
            busy: None,
            reporting: ErrorReporting::Notify,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn json(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn busy(mut self, target: Arc<dyn BusyTarget>) -> Self {
        self.busy = Some(target);
        self
    }

    /// The caller takes over error reporting for this request.
    pub fn handle_errors(mut self) -> Self {
        self.reporting = ErrorReporting::Caller;
        self
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("payload", &self.payload)
            .field("busy", &self.busy.is_some())
            .field("reporting", &self.reporting)
            .finish()
    }
}

/// Puts a control into its busy state and restores it on drop.
struct BusyGuard {
    target: Arc<dyn BusyTarget>,
    original: String,
}

impl BusyGuard {
    fn engage(target: Arc<dyn BusyTarget>) -> Self {
        let original = target.content();
        target.set_enabled(false);
        target.set_content(BUSY_LABEL);
        Self { target, original }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.target.set_enabled(true);
        self.target.set_content(&self.original);
    }
}

/// Sends requests to the expense API and reports failures through a [`Notifier`].
///
/// JSON in both directions by default. No retries: one failed call is
/// reported once and returned to the caller.
#[derive(Clone)]
pub struct Dispatcher {
    client: Client,
    base_url: String,
    notifier: Arc<dyn Notifier>,
}

impl Dispatcher {
    pub fn new(base_url: impl Into<String>, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Self::with_client(Client::new(), base_url, notifier)
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        validate_url("api.base_url", &base_url)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            notifier,
        })
    }

    pub fn from_config(config: &ApiConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        Self::with_client(builder.build()?, config.base_url.clone(), notifier)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn url_for(&self, endpoint: &str) -> Result<Url> {
        let endpoint = endpoint.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", self.base_url, endpoint))?)
    }

    /// Issues the request and returns the parsed JSON body (`Null` when empty).
    pub async fn execute(&self, request: ApiRequest) -> Result<serde_json::Value> {
        let busy = request.busy.clone().map(BusyGuard::engage);
        let result = self.perform(&request).await;
        drop(busy);

        if let Err(e) = &result {
            self.report(&request, e);
        }
        result
    }

    /// Issues the request and decodes the body into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let reporting = request.reporting;
        let endpoint = request.endpoint.clone();
        let value = self.execute(request).await?;

        serde_json::from_value(value).map_err(|e| {
            tracing::warn!("Unexpected response shape from {}: {}", endpoint, e);
            let err = BridgeError::Decode(e);
            if reporting == ErrorReporting::Notify {
                self.notifier.notify(&err.notification_text(), Severity::Danger);
            }
            err
        })
    }

    /// Issues the request and discards the body.
    pub async fn send(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    async fn perform(&self, request: &ApiRequest) -> Result<serde_json::Value> {
        let url = self.url_for(&request.endpoint)?;
        tracing::debug!("📡 {} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(ACCEPT, "application/json");
        if let Some(payload) = &request.payload {
            builder = builder.json(payload);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!("📡 {} {} -> {}", request.method, request.endpoint, status);

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.is_empty());
            return Err(BridgeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    fn report(&self, request: &ApiRequest, error: &BridgeError) {
        match request.reporting {
            ErrorReporting::Notify => {
                tracing::warn!("{} {} failed: {}", request.method, request.endpoint, error);
                self.notifier
                    .notify(&error.notification_text(), Severity::Danger);
            }
            ErrorReporting::Caller => {
                tracing::debug!(
                    "{} {} failed, left to caller: {}",
                    request.method,
                    request.endpoint,
                    error
                );
            }
        }
    }
}
