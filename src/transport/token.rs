use serde::Deserialize;

use super::TransportError;
use crate::domain::{ApiKey, SecretKey, TokenResponse};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TokenJsonResponse {
    is_successful: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token_key: Option<String>,
}

pub fn encode_token_request(api_key: &ApiKey, secret: &SecretKey) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(
        ApiKey::FIELD.to_owned(),
        serde_json::Value::from(api_key.as_str()),
    );
    body.insert(
        SecretKey::FIELD.to_owned(),
        serde_json::Value::from(secret.as_str()),
    );
    serde_json::Value::Object(body)
}

pub fn decode_token_json_response(json: &str) -> Result<TokenResponse, TransportError> {
    let parsed: TokenJsonResponse = serde_json::from_str(json)?;
    Ok(TokenResponse {
        successful: parsed.is_successful,
        message: parsed.message,
        token_key: parsed.token_key,
    })
}
