use serde::Deserialize;

use super::TransportError;
use super::number::TransportNumber;
use crate::domain::CreditResponse;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreditJsonResponse {
    is_successful: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    credit: Option<TransportNumber>,
}

pub fn decode_credit_json_response(json: &str) -> Result<CreditResponse, TransportError> {
    let parsed: CreditJsonResponse = serde_json::from_str(json)?;
    Ok(CreditResponse {
        successful: parsed.is_successful,
        message: parsed.message,
        credit: parsed.credit.and_then(TransportNumber::into_i64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_credit_supports_numeric_and_string_values() {
        let numeric = r#"
        {
          "IsSuccessful": true,
          "Credit": 100
        }
        "#;
        let parsed = decode_credit_json_response(numeric).unwrap();
        assert!(parsed.successful);
        assert_eq!(parsed.credit, Some(100));

        let string = r#"
        {
          "IsSuccessful": true,
          "Credit": "100"
        }
        "#;
        let parsed = decode_credit_json_response(string).unwrap();
        assert_eq!(parsed.credit, Some(100));
    }

    #[test]
    fn decode_credit_maps_logical_failure() {
        let json = r#"
        {
          "IsSuccessful": false,
          "Message": "auth-failed"
        }
        "#;

        let parsed = decode_credit_json_response(json).unwrap();
        assert!(!parsed.successful);
        assert_eq!(parsed.message.as_deref(), Some("auth-failed"));
        assert_eq!(parsed.credit, None);
    }

    #[test]
    fn decode_credit_drops_unparseable_values() {
        let json = r#"
        {
          "IsSuccessful": true,
          "Credit": "plenty"
        }
        "#;

        let parsed = decode_credit_json_response(json).unwrap();
        assert_eq!(parsed.credit, None);
    }
}
