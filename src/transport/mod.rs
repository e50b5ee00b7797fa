//! Transport layer: JSON wire formats for the SMS.ir endpoints.

mod credit;
mod message_send;
mod number;
mod token;

pub use credit::decode_credit_json_response;
pub use message_send::{decode_message_send_json_response, encode_message_send_request};
pub use token::{decode_token_json_response, encode_token_request};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}
