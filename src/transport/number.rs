use serde::Deserialize;

/// Numeric wire fields (`Credit`, `ID`, `MobileNo`) arrive as JSON numbers or
/// strings depending on the provider build; accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum TransportNumber {
    Int(i64),
    String(String),
}

impl TransportNumber {
    pub(super) fn into_i64(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::String(value) => value.trim().parse::<i64>().ok(),
        }
    }

    pub(super) fn into_string(self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::String(value) => value,
        }
    }
}
