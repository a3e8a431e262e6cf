use serde::{Deserialize, Serialize};

// ============================================================================
// Translation provider wire contract
// ============================================================================

/// Request sent to the external translation provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
    pub source_language: String,
}

/// Successful provider response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

/// Error payload returned with a non-success status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case() {
        let req = TranslateRequest {
            text: "Hello".to_string(),
            target_language: "fi".to_string(),
            source_language: "en".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "text": "Hello",
                "targetLanguage": "fi",
                "sourceLanguage": "en"
            })
        );
    }

    #[test]
    fn response_deserializes_camel_case() {
        let resp: TranslateResponse =
            serde_json::from_str(r#"{"translatedText":"Hei"}"#).unwrap();
        assert_eq!(resp.translated_text, "Hei");
    }
}
