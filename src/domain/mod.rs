//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{SendConfig, SenderConfig};
pub use response::{CreditResponse, MessageReceipt, MessageSendResponse, SendResult, TokenResponse};
pub use validation::ValidationError;
pub use value::{
    ApiKey, LineNumber, MessageText, MobileNumber, PhoneNumber, ScheduleDateTime, SecretKey,
};
