//! Typed Rust client for the SMS.ir REST API.
//!
//! The design follows three layers: a domain layer of strong types, a
//! transport layer for wire-format details, and a small client layer
//! orchestrating requests. The client caches the short-lived provider token
//! and gates every send on the account balance.
//!
//! ```rust,no_run
//! use smsir::{
//!     ApiKey, LineNumber, MessageText, MobileNumber, SecretKey, SendConfig, SenderConfig,
//!     SmsIrClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsir::SmsIrError> {
//!     let config = SenderConfig::new(ApiKey::new("...")?, SecretKey::new("...")?);
//!     let client = SmsIrClient::new(Some(config))?;
//!     let recipient = MobileNumber::new("09121234567")?;
//!     let text = MessageText::new("hello")?;
//!     let send_config = SendConfig::new(LineNumber::new("30004505")?);
//!     let result = client.send(&recipient, &text, Some(&send_config)).await?;
//!     println!("batch: {}", result.batch_key);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{ApiFailure, SmsIrClient, SmsIrClientBuilder, SmsIrError};
pub use domain::{
    ApiKey, LineNumber, MessageText, MobileNumber, PhoneNumber, ScheduleDateTime, SecretKey,
    SendConfig, SendResult, SenderConfig, ValidationError,
};
