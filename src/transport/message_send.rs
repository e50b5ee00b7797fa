use serde::Deserialize;

use super::TransportError;
use super::number::TransportNumber;
use crate::domain::{
    LineNumber, MessageReceipt, MessageSendResponse, MessageText, MobileNumber, ScheduleDateTime,
    SendConfig,
};

const CAN_CONTINUE_FIELD: &str = "CanContinueInCaseOfError";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MessageSendJsonResponse {
    is_successful: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    ids: Vec<ReceiptJsonEntry>,
    #[serde(default)]
    batch_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReceiptJsonEntry {
    #[serde(rename = "ID")]
    id: TransportNumber,
    #[serde(rename = "MobileNo")]
    mobile_no: TransportNumber,
}

pub fn encode_message_send_request(
    recipient: &MobileNumber,
    message: &MessageText,
    config: &SendConfig,
) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(
        MessageText::FIELD.to_owned(),
        serde_json::Value::from(vec![message.as_str()]),
    );
    body.insert(
        MobileNumber::FIELD.to_owned(),
        serde_json::Value::from(vec![recipient.raw()]),
    );
    body.insert(
        LineNumber::FIELD.to_owned(),
        serde_json::Value::from(config.line_number().as_str()),
    );
    if let Some(send_date_time) = config.send_date_time() {
        body.insert(
            ScheduleDateTime::FIELD.to_owned(),
            serde_json::Value::from(send_date_time.as_str()),
        );
    }
    body.insert(
        CAN_CONTINUE_FIELD.to_owned(),
        serde_json::Value::from(config.continue_on_error()),
    );
    serde_json::Value::Object(body)
}

pub fn decode_message_send_json_response(
    json: &str,
) -> Result<MessageSendResponse, TransportError> {
    let parsed: MessageSendJsonResponse = serde_json::from_str(json)?;
    let ids = parsed
        .ids
        .into_iter()
        .map(|entry| MessageReceipt {
            message_id: entry.id.into_string(),
            mobile_no: entry.mobile_no.into_string(),
        })
        .collect();
    Ok(MessageSendResponse {
        successful: parsed.is_successful,
        message: parsed.message,
        ids,
        batch_key: parsed.batch_key,
    })
}
