/// Outcome of a completed send, derived from the first entry of the
/// provider's receipt array plus the batch identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResult {
    pub message_id: String,
    pub phone_number: String,
    pub batch_key: String,
}

/// Envelope of `POST /Token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    pub successful: bool,
    pub message: Option<String>,
    pub token_key: Option<String>,
}

/// Envelope of `GET /credit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditResponse {
    pub successful: bool,
    pub message: Option<String>,
    pub credit: Option<i64>,
}

/// Envelope of `POST /MessageSend`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSendResponse {
    pub successful: bool,
    pub message: Option<String>,
    pub ids: Vec<MessageReceipt>,
    pub batch_key: Option<String>,
}

/// One accepted message within a send response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceipt {
    pub message_id: String,
    pub mobile_no: String,
}
