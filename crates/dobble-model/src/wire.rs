//! Request and response bodies of the remote deck service.

use serde::{Deserialize, Serialize};

use crate::deck::Card;

/// Body returned by `GET /dobble/validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols_per_card: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_cards: Option<u32>,
    /// Some service versions echo `num_cards` under this name as well.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_symbols: Option<u32>,
}

/// Outcome of a validation as the client records it.
///
/// `n`, `symbols_per_card` and `num_cards` are only populated when `valid`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
    pub n: Option<u32>,
    pub symbols_per_card: Option<u32>,
    pub num_cards: Option<u32>,
}

impl ValidationResult {
    /// A rejected validation carrying `message`.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            ..Default::default()
        }
    }
}

impl From<ValidateResponse> for ValidationResult {
    fn from(response: ValidateResponse) -> Self {
        if !response.valid {
            return Self {
                valid: false,
                message: response.message,
                ..Default::default()
            };
        }
        Self {
            valid: true,
            message: response.message,
            n: response.n,
            symbols_per_card: response.symbols_per_card,
            num_cards: response.num_cards.or(response.total_symbols),
        }
    }
}

/// Body of `POST /dobble/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub n: u32,
    pub symbols: Vec<String>,
}

/// Body returned by `POST /dobble/generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub cards: Vec<Card>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_response_drops_derived_fields() {
        let response = ValidateResponse {
            valid: false,
            message: Some("Invalid input".to_string()),
            n: Some(6),
            symbols_per_card: Some(7),
            num_cards: Some(43),
            total_symbols: None,
        };
        let result = ValidationResult::from(response);
        assert!(!result.valid);
        assert_eq!(result.message.as_deref(), Some("Invalid input"));
        assert_eq!(result.n, None);
        assert_eq!(result.symbols_per_card, None);
        assert_eq!(result.num_cards, None);
    }

    #[test]
    fn test_valid_response_parses_minimal_body() {
        let body = r#"{"valid":true,"message":"Valid input","n":2,"symbols_per_card":3,"num_cards":7,"total_symbols":7}"#;
        let response: ValidateResponse = serde_json::from_str(body).unwrap();
        let result = ValidationResult::from(response);
        assert!(result.valid);
        assert_eq!(result.n, Some(2));
        assert_eq!(result.symbols_per_card, Some(3));
        assert_eq!(result.num_cards, Some(7));
    }

    #[test]
    fn test_invalid_body_without_message() {
        let response: ValidateResponse = serde_json::from_str(r#"{"valid":false}"#).unwrap();
        assert_eq!(response.message, None);
    }

    #[test]
    fn test_num_cards_falls_back_to_total_symbols() {
        let response: ValidateResponse =
            serde_json::from_str(r#"{"valid":true,"n":3,"symbols_per_card":4,"total_symbols":13}"#)
                .unwrap();
        assert_eq!(ValidationResult::from(response).num_cards, Some(13));
    }
}
