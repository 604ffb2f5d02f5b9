//! Success Response Envelope
//! Mission: every successful response shares `{statusCode, message, data}`

use axum::Json;
use serde::Serialize;

/// Wire envelope shared by all successful responses.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

/// Build a 200 envelope around `data`.
pub fn ok<T: Serialize>(message: &str, data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        status_code: 200,
        message: message.to_string(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_serialization() {
        let Json(env) = ok("done", json!({ "id": 7 }));
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["message"], "done");
        assert_eq!(value["data"]["id"], 7);
    }

    #[test]
    fn test_empty_data_envelope() {
        let Json(env) = ok("done", json!({}));
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["data"], json!({}));
    }
}
