//! Client layer: orchestrates transport calls and owns the authentication cache.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_lock::Mutex as AsyncMutex;

use crate::domain::{
    MessageText, MobileNumber, SendConfig, SendResult, SenderConfig, ValidationError,
};
use crate::transport;

const DEFAULT_BASE_URL: &str = "https://restfulsms.com/api";

const TOKEN_PATH: &str = "/Token";
const CREDIT_PATH: &str = "/credit";
const MESSAGE_SEND_PATH: &str = "/MessageSend";

/// Header carrying the issued token on balance and send calls.
const AUTH_TOKEN_HEADER: &str = "x-sms-ir-secure-token";

/// The provider signals success with 201 exactly; 200 is an error.
const CREATED_STATUS: u16 = 201;

/// Sends are refused while the account credit is below this many message units.
const MIN_SEND_CREDIT: i64 = 1;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const MISSING_SENDER_CONFIG: &str = "sender configuration is required and was not provided";
const MISSING_SEND_CONFIG: &str = "send configuration is required and was not provided";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        token: Option<&'a str>,
        body: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;

    fn get<'a>(
        &'a self,
        url: &'a str,
        token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        token: Option<&'a str>,
        body: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.post(url).json(&body);
            if let Some(token) = token {
                request = request.header(AUTH_TOKEN_HEADER, token);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }

    fn get<'a>(
        &'a self,
        url: &'a str,
        token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.get(url);
            if let Some(token) = token {
                request = request.header(AUTH_TOKEN_HEADER, token);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsIrClient`].
///
/// Each failing operation maps to its own variant so callers can tell an
/// authentication problem from a refused send; the shared [`ApiFailure`]
/// payload preserves the transport/provider detail underneath.
pub enum SmsIrError {
    /// A required configuration object was not provided.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Token renewal failed.
    #[error("authentication failed: {0}")]
    Authentication(#[source] ApiFailure),

    /// The balance query failed.
    #[error("balance query failed: {0}")]
    Balance(#[source] ApiFailure),

    /// The account credit is below the minimum required for a send.
    #[error("insufficient credit: current credit is {credit}, at least {MIN_SEND_CREDIT} is required")]
    InsufficientCredit { credit: i64 },

    /// The send request failed.
    #[error("message send failed: {0}")]
    Send(#[source] ApiFailure),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, thiserror::Error)]
/// Why a provider call failed, independent of which operation issued it.
pub enum ApiFailure {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The server answered with a status other than 201.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The provider reported a logical failure (`IsSuccessful: false`).
    #[error("provider rejected the request: {message}")]
    Rejected { message: String },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// A successful response is missing a mandatory field.
    #[error("response is missing mandatory field: {field}")]
    MissingField { field: &'static str },
}

/// Authentication cache shared by all clones of one client.
///
/// `token` stays empty until the first successful renewal and is never
/// cleared by a later failed attempt; a stale-but-valid token is preferred
/// over none.
#[derive(Debug, Default)]
struct AuthState {
    token: String,
    last_renewed_at: Option<Instant>,
    cached_credit: i64,
}

#[derive(Debug, Clone)]
/// Builder for [`SmsIrClient`].
///
/// Use this when you need to point the client at a non-default base URL or
/// change the transport timeout / user-agent.
pub struct SmsIrClientBuilder {
    config: Option<SenderConfig>,
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl SmsIrClientBuilder {
    /// Create a builder with the production base URL and a 10-second
    /// per-request timeout.
    pub fn new(config: Option<SenderConfig>) -> Self {
        Self {
            config,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the API base URL (everything before `/Token` etc).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the HTTP timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`SmsIrClient`].
    ///
    /// Fails with [`SmsIrError::Configuration`] when no [`SenderConfig`] was
    /// supplied, or when the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<SmsIrClient, SmsIrError> {
        let config = self
            .config
            .ok_or_else(|| SmsIrError::Configuration(MISSING_SENDER_CONFIG.to_owned()))?;

        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| SmsIrError::Configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(SmsIrClient {
            config,
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            http: Arc::new(ReqwestTransport { client }),
            auth: Arc::new(AsyncMutex::new(AuthState::default())),
        })
    }
}

#[derive(Clone)]
/// High-level SMS.ir client.
///
/// The client caches the provider token it obtains from `POST /Token` and
/// reuses it for the configured authentication timeout; balance and send
/// calls renew it lazily when the window has elapsed. Clones share one
/// cache, and concurrent renewals are collapsed into a single in-flight
/// authentication request.
///
/// A send is balance-gated: the account credit is fetched first and the send
/// is refused when it is below one message unit. After a successful send the
/// cached credit is refreshed once more; that refresh never fails the send.
pub struct SmsIrClient {
    config: SenderConfig,
    base_url: String,
    http: Arc<dyn HttpTransport>,
    auth: Arc<AsyncMutex<AuthState>>,
}

impl std::fmt::Debug for SmsIrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsIrClient")
            .field("config", &self.config)
            .field("base_url", &self.base_url)
            .field("http", &"<dyn HttpTransport>")
            .field("auth", &self.auth)
            .finish()
    }
}

impl SmsIrClient {
    /// Create a client against the production endpoint.
    ///
    /// The configuration is required; `None` fails with
    /// [`SmsIrError::Configuration`]. For more customization, use
    /// [`SmsIrClient::builder`].
    pub fn new(config: Option<SenderConfig>) -> Result<Self, SmsIrError> {
        SmsIrClientBuilder::new(config).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(config: Option<SenderConfig>) -> SmsIrClientBuilder {
        SmsIrClientBuilder::new(config)
    }

    /// Ensure a fresh-enough token is cached, re-authenticating if needed.
    ///
    /// Within the configured authentication timeout this is a no-op. Past
    /// it, the client posts the API key/secret pair to `/Token` and stores
    /// the issued token together with the renewal instant. The check and the
    /// store happen under one lock held across the request, so concurrent
    /// callers observing an expired cache await the same renewal instead of
    /// issuing duplicates.
    ///
    /// On failure the cache is left untouched.
    pub async fn renew(&self) -> Result<(), SmsIrError> {
        let mut auth = self.auth.lock().await;
        if let Some(renewed_at) = auth.last_renewed_at {
            if renewed_at.elapsed() < self.config.auth_timeout() {
                tracing::trace!("cached token is still fresh; skipping renewal");
                return Ok(());
            }
        }

        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        let body = transport::encode_token_request(self.config.api_key(), self.config.secret());
        let response = self
            .http
            .post_json(&url, None, body)
            .await
            .map_err(|err| SmsIrError::Authentication(ApiFailure::Transport(err)))?;
        let body = expect_created(response).map_err(SmsIrError::Authentication)?;

        let parsed = transport::decode_token_json_response(&body)
            .map_err(|err| SmsIrError::Authentication(ApiFailure::Parse(Box::new(err))))?;
        if !parsed.successful {
            return Err(SmsIrError::Authentication(rejected(parsed.message)));
        }
        let token = parsed
            .token_key
            .filter(|token| !token.trim().is_empty())
            .ok_or(SmsIrError::Authentication(ApiFailure::MissingField {
                field: "TokenKey",
            }))?;

        auth.token = token;
        auth.last_renewed_at = Some(Instant::now());
        tracing::debug!("authentication token renewed");
        Ok(())
    }

    /// Fetch the current account credit.
    ///
    /// Always runs the renewal check first, then queries `/credit` with the
    /// cached token attached. The returned value is also stored as the
    /// last-known credit.
    pub async fn current_balance(&self) -> Result<i64, SmsIrError> {
        self.renew().await?;
        let token = self.auth.lock().await.token.clone();

        let url = format!("{}{}", self.base_url, CREDIT_PATH);
        let response = self
            .http
            .get(&url, Some(&token))
            .await
            .map_err(|err| SmsIrError::Balance(ApiFailure::Transport(err)))?;
        let body = expect_created(response).map_err(SmsIrError::Balance)?;

        let parsed = transport::decode_credit_json_response(&body)
            .map_err(|err| SmsIrError::Balance(ApiFailure::Parse(Box::new(err))))?;
        if !parsed.successful {
            return Err(SmsIrError::Balance(rejected(parsed.message)));
        }
        let credit = parsed
            .credit
            .ok_or(SmsIrError::Balance(ApiFailure::MissingField {
                field: "Credit",
            }))?;

        self.auth.lock().await.cached_credit = credit;
        tracing::trace!(credit, "fetched account credit");
        Ok(credit)
    }

    /// Credit observed by the most recent successful balance fetch.
    ///
    /// Zero until the first fetch; no network activity.
    pub async fn last_known_credit(&self) -> i64 {
        self.auth.lock().await.cached_credit
    }

    /// Send `message` to `phone_number` through the configured line.
    ///
    /// The send configuration is required; `None` fails with
    /// [`SmsIrError::Configuration`] before any network activity. The call
    /// then renews the token if needed, checks the account credit (refusing
    /// with [`SmsIrError::InsufficientCredit`] below one unit), issues the
    /// send, and finally refreshes the cached credit once more. The result
    /// is built from the first entry of the provider's receipt array and the
    /// batch key.
    ///
    /// The whole operation is all-or-nothing: a failure at any stage aborts
    /// without a partial result, and nothing is retried. Only the trailing
    /// credit refresh is exempt; its outcome is logged and discarded so it
    /// cannot mask a completed send.
    pub async fn send(
        &self,
        phone_number: &MobileNumber,
        message: &MessageText,
        config: Option<&SendConfig>,
    ) -> Result<SendResult, SmsIrError> {
        let config =
            config.ok_or_else(|| SmsIrError::Configuration(MISSING_SEND_CONFIG.to_owned()))?;

        self.renew().await?;

        let credit = self.current_balance().await?;
        if credit < MIN_SEND_CREDIT {
            return Err(SmsIrError::InsufficientCredit { credit });
        }

        let token = self.auth.lock().await.token.clone();
        let url = format!("{}{}", self.base_url, MESSAGE_SEND_PATH);
        let body = transport::encode_message_send_request(phone_number, message, config);
        let response = self
            .http
            .post_json(&url, Some(&token), body)
            .await
            .map_err(|err| SmsIrError::Send(ApiFailure::Transport(err)))?;
        let body = expect_created(response).map_err(SmsIrError::Send)?;

        let parsed = transport::decode_message_send_json_response(&body)
            .map_err(|err| SmsIrError::Send(ApiFailure::Parse(Box::new(err))))?;
        if !parsed.successful {
            return Err(SmsIrError::Send(rejected(parsed.message)));
        }
        let receipt = parsed
            .ids
            .into_iter()
            .next()
            .ok_or(SmsIrError::Send(ApiFailure::MissingField { field: "Ids" }))?;
        let batch_key = parsed
            .batch_key
            .ok_or(SmsIrError::Send(ApiFailure::MissingField {
                field: "BatchKey",
            }))?;

        let result = SendResult {
            message_id: receipt.message_id,
            phone_number: receipt.mobile_no,
            batch_key,
        };
        tracing::debug!(batch_key = %result.batch_key, "message accepted by provider");

        // Refresh the cached credit; the send already completed, so the
        // outcome of this call is not surfaced to the caller.
        if let Err(error) = self.current_balance().await {
            tracing::debug!(%error, "post-send credit refresh failed");
        }

        Ok(result)
    }
}

fn expect_created(response: HttpResponse) -> Result<String, ApiFailure> {
    if response.status != CREATED_STATUS {
        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        return Err(ApiFailure::HttpStatus {
            status: response.status,
            body,
        });
    }
    Ok(response.body)
}

fn rejected(message: Option<String>) -> ApiFailure {
    ApiFailure::Rejected {
        message: message.unwrap_or_else(|| "no message provided".to_owned()),
    }
}
