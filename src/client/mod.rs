//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod handler;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use tracing::debug;
use url::Url;

use crate::domain::{ApiResponse, Message, MessageKind, SendOptions, ValidationError};
use crate::error::{BoxError, SmsError};
use crate::transport::{HttpResponse, encode_send_body, endpoint_url, interpret_response};

pub use handler::{FnHandler, LogHandler, SendHandler, SuccessFn, handler_fn, success_fn};

/// Gateway used when none is configured.
pub const DEFAULT_GATEWAY_URL: &str = "https://api.websms.com";

const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug)]
enum TransportFailure {
    /// No response arrived (DNS, connect, TLS, ...).
    Request(BoxError),
    /// The response started but its body could not be read.
    Read(BoxError),
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a Url,
        credentials: &'a Credentials,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a Url,
        credentials: &'a Credentials,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url.clone())
                .basic_auth(&credentials.username, Some(&credentials.password))
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .header(CONTENT_LENGTH, body.len())
                .body(body)
                .send()
                .await
                .map_err(|err| TransportFailure::Request(Box::new(err)))?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = response
                .text()
                .await
                .map_err(|err| TransportFailure::Read(Box::new(err)))?;
            Ok(HttpResponse {
                status,
                content_type,
                body,
            })
        })
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Gateway account credentials, sent as HTTP Basic authentication.
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials; neither part may be empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let username = username.into();
        let password = password.into();
        if username.trim().is_empty() {
            return Err(ValidationError::Empty { field: "username" });
        }
        if password.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }
        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn default_user_agent() -> String {
    format!(
        "rust SDK Client (v{}, {}, {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

fn parse_gateway_url(raw: &str) -> Result<Url, SmsError> {
    let url = Url::parse(raw)
        .map_err(|err| SmsError::parameter(format!("invalid gateway URL '{raw}': {err}")))?;
    if !matches!(url.scheme(), "https" | "http") {
        return Err(SmsError::parameter(format!(
            "invalid gateway URL '{raw}': scheme must be https or http"
        )));
    }
    Ok(url)
}

#[derive(Debug, Clone)]
/// Builder for [`WebSmsClient`].
///
/// Use this when you need to customize the gateway URL, timeout, or user-agent.
pub struct WebSmsClientBuilder {
    credentials: Credentials,
    gateway_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl WebSmsClientBuilder {
    /// Create a builder with the default gateway and no timeout override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            gateway_url: DEFAULT_GATEWAY_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the gateway base URL. Endpoint paths are appended to it.
    pub fn gateway_url(mut self, gateway_url: impl Into<String>) -> Self {
        self.gateway_url = gateway_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Without it, only the transport's own defaults apply.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`WebSmsClient`].
    pub fn build(self) -> Result<WebSmsClient, SmsError> {
        let gateway_url = parse_gateway_url(&self.gateway_url)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.unwrap_or_else(default_user_agent));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| {
            SmsError::connection(format!("failed to build HTTP client: {err}"), Box::new(err))
        })?;

        Ok(WebSmsClient::with_transport(
            self.credentials,
            gateway_url,
            Arc::new(ReqwestTransport { client }),
        ))
    }
}

#[derive(Clone)]
/// High-level websms.com client.
///
/// Each send issues one independent HTTPS POST with a JSON body to
/// `{gateway}/json/smsmessaging/text` or `{gateway}/json/smsmessaging/binary`.
/// The client holds only read-only configuration and can be shared across concurrent sends.
pub struct WebSmsClient {
    credentials: Credentials,
    gateway_url: Url,
    text_endpoint: Url,
    binary_endpoint: Url,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for WebSmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSmsClient")
            .field("credentials", &self.credentials)
            .field("gateway_url", &self.gateway_url.as_str())
            .finish_non_exhaustive()
    }
}

impl WebSmsClient {
    /// Create a client for the default gateway.
    ///
    /// For more customization, use [`WebSmsClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, SmsError> {
        Self::builder(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> WebSmsClientBuilder {
        WebSmsClientBuilder::new(credentials)
    }

    fn with_transport(
        credentials: Credentials,
        gateway_url: Url,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            text_endpoint: endpoint_url(&gateway_url, MessageKind::Text),
            binary_endpoint: endpoint_url(&gateway_url, MessageKind::Binary),
            credentials,
            gateway_url,
            http,
        }
    }

    pub fn gateway_url(&self) -> &Url {
        &self.gateway_url
    }

    /// Endpoint used for messages of `kind`.
    pub fn endpoint(&self, kind: MessageKind) -> &Url {
        match kind {
            MessageKind::Text => &self.text_endpoint,
            MessageKind::Binary => &self.binary_endpoint,
        }
    }

    /// Send one message.
    ///
    /// Errors (all with `throw_error() == false`):
    /// - [`ErrorCause::Parameter`](crate::ErrorCause::Parameter) for invalid send options,
    ///   detected before any request is made, and for unexpected HTTP statuses,
    /// - `Connection` when the request fails or the response cannot be read,
    /// - `Authorization` for HTTP 401,
    /// - `Unknown` for HTTP 400 or a non-JSON response,
    /// - `Api` when the gateway's `statusCode` is outside `2000..=2001`.
    pub async fn send(
        &self,
        message: &Message,
        options: SendOptions,
    ) -> Result<ApiResponse, SmsError> {
        let options = options
            .validate_for(message)
            .map_err(|err| SmsError::validation(vec![err], false))?;

        let kind = message.kind();
        let url = self.endpoint(kind);
        let body = encode_send_body(message, options)
            .map_err(|err| SmsError::unknown(err.to_string()))?;
        debug!(%url, kind = kind.as_str(), body_len = body.len(), "sending message");

        let response = self
            .http
            .post_json(url, &self.credentials, body)
            .await
            .map_err(|failure| match failure {
                TransportFailure::Request(err) => {
                    SmsError::connection(format!("HTTPS request error: {err}"), err)
                }
                TransportFailure::Read(err) => {
                    SmsError::connection(format!("HTTPS response error: {err}"), err)
                }
            })?;

        interpret_response(&response)
    }

    /// Send one message and report the outcome to `handler`.
    ///
    /// Exactly one of [`SendHandler::on_success`] and [`SendHandler::on_error`] is called.
    pub async fn send_with<H>(&self, message: &Message, options: SendOptions, handler: &mut H)
    where
        H: SendHandler + ?Sized,
    {
        match self.send(message, options).await {
            Ok(response) => handler.on_success(response, message),
            Err(error) => handler.on_error(error, message),
        }
    }
}
