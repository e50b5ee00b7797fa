use std::time::Duration;

use crate::domain::value::{ApiKey, LineNumber, ScheduleDateTime, SecretKey};

/// Account-level configuration for an SMS.ir sender.
///
/// Immutable after construction. The authentication timeout controls how long
/// a provider token obtained by the client is reused before a new one is
/// requested; it is resolved to a concrete [`Duration`] here, once, rather
/// than on every renewal check.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    api_key: ApiKey,
    secret: SecretKey,
    auth_timeout: Duration,
}

impl SenderConfig {
    /// Token reuse window applied when no explicit timeout is configured.
    pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(30 * 60);

    /// Create a configuration with the default 30-minute authentication timeout.
    pub fn new(api_key: ApiKey, secret: SecretKey) -> Self {
        Self {
            api_key,
            secret,
            auth_timeout: Self::DEFAULT_AUTH_TIMEOUT,
        }
    }

    /// Override the token reuse window.
    pub fn with_auth_timeout(mut self, auth_timeout: Duration) -> Self {
        self.auth_timeout = auth_timeout;
        self
    }

    /// The account API key.
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// The account secret key.
    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    /// How long an issued token is reused before re-authenticating.
    pub fn auth_timeout(&self) -> Duration {
        self.auth_timeout
    }
}

/// Per-send configuration.
///
/// Every send call must carry one; there is no account-level default line
/// number to fall back to.
#[derive(Debug, Clone)]
pub struct SendConfig {
    line_number: LineNumber,
    send_date_time: Option<ScheduleDateTime>,
    continue_on_error: bool,
}

impl SendConfig {
    /// Create a configuration dispatching from `line_number` immediately.
    pub fn new(line_number: LineNumber) -> Self {
        Self {
            line_number,
            send_date_time: None,
            continue_on_error: false,
        }
    }

    /// Defer dispatch until the given provider-local datetime.
    pub fn with_send_date_time(mut self, send_date_time: ScheduleDateTime) -> Self {
        self.send_date_time = Some(send_date_time);
        self
    }

    /// Ask the provider to keep processing the batch when an entry fails.
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// The line number messages are sent from.
    pub fn line_number(&self) -> &LineNumber {
        &self.line_number
    }

    /// Scheduled dispatch time, if any.
    pub fn send_date_time(&self) -> Option<&ScheduleDateTime> {
        self.send_date_time.as_ref()
    }

    /// Whether the provider may continue past per-entry errors.
    pub fn continue_on_error(&self) -> bool {
        self.continue_on_error
    }
}
