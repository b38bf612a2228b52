use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
/// Body returned by the gateway for a send request.
///
/// Only `statusCode` is interpreted. The body is kept verbatim in `body`; the well-known
/// fields get typed views that are `None` when missing or not a string.
pub struct ApiResponse {
    /// Gateway status code. Missing or non-integral codes read as `0`.
    pub status_code: i64,
    pub status_message: Option<String>,
    pub transfer_id: Option<String>,
    pub client_message_id: Option<String>,
    /// The JSON object as received.
    pub body: Map<String, Value>,
}

impl ApiResponse {
    /// Status codes the gateway uses to report an accepted message.
    pub const SUCCESS_STATUS_CODES: RangeInclusive<i64> = 2000..=2001;

    /// Status code used for bodies that could not be parsed.
    pub const PARSE_ERROR_STATUS_CODE: i64 = 0;

    pub fn with_status(status_code: i64, status_message: impl Into<String>) -> Self {
        let mut body = Map::new();
        body.insert("statusCode".to_owned(), Value::from(status_code));
        body.insert(
            "statusMessage".to_owned(),
            Value::String(status_message.into()),
        );
        Self::from(body)
    }

    /// Synthesized response for a body that is not a valid gateway JSON object.
    ///
    /// The raw body is kept under `rawString`.
    pub fn parse_failure(error: &serde_json::Error, raw: &str) -> Self {
        let mut response = Self::with_status(
            Self::PARSE_ERROR_STATUS_CODE,
            format!("JSON parse error: {error}"),
        );
        response
            .body
            .insert("rawString".to_owned(), Value::String(raw.to_owned()));
        response
    }

    pub fn is_success(&self) -> bool {
        Self::SUCCESS_STATUS_CODES.contains(&self.status_code)
    }
}

fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|code| code.fract() == 0.0)
            .map(|code| code as i64)
    })
}

impl From<Map<String, Value>> for ApiResponse {
    fn from(body: Map<String, Value>) -> Self {
        let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_owned);
        let status_code = body
            .get("statusCode")
            .and_then(integral)
            .unwrap_or(Self::PARSE_ERROR_STATUS_CODE);
        let status_message = text("statusMessage");
        let transfer_id = text("transferId");
        let client_message_id = text("clientMessageId");
        Self {
            status_code,
            status_message,
            transfer_id,
            client_message_id,
            body,
        }
    }
}

impl Serialize for ApiResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_window_is_inclusive() {
        for (code, ok) in [(1999, false), (2000, true), (2001, true), (2002, false), (0, false)] {
            assert_eq!(ApiResponse::with_status(code, "").is_success(), ok, "{code}");
        }
    }

    #[test]
    fn unknown_fields_are_passed_through() {
        let response: ApiResponse = serde_json::from_value(json!({
            "statusCode": 2000,
            "statusMessage": "OK",
            "transferId": "005a8e5c",
            "clientMessageId": "42",
            "smsCount": 2
        }))
        .unwrap();
        assert_eq!(response.transfer_id.as_deref(), Some("005a8e5c"));
        assert_eq!(response.client_message_id.as_deref(), Some("42"));
        assert_eq!(response.body.get("smsCount"), Some(&json!(2)));

        let back = serde_json::to_value(&response).unwrap();
        assert_eq!(back["smsCount"], json!(2));
        assert_eq!(back["statusCode"], json!(2000));
    }

    #[test]
    fn missing_status_code_defaults_to_zero() {
        let response: ApiResponse = serde_json::from_str(r#"{"statusMessage":"?"}"#).unwrap();
        assert_eq!(response.status_code, 0);
        assert!(!response.is_success());
    }

    #[test]
    fn parse_failure_keeps_raw_body() {
        let err = serde_json::from_str::<ApiResponse>("{ nope").unwrap_err();
        let response = ApiResponse::parse_failure(&err, "{ nope");
        assert_eq!(response.status_code, ApiResponse::PARSE_ERROR_STATUS_CODE);
        assert!(
            response
                .status_message
                .as_deref()
                .unwrap()
                .starts_with("JSON parse error: ")
        );
        assert_eq!(response.body.get("rawString"), Some(&json!("{ nope")));
    }

    #[test]
    fn mistyped_fields_do_not_fail_the_response() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"statusCode":2000,"statusMessage":"OK","transferId":12345,"clientMessageId":null}"#,
        )
        .unwrap();
        assert!(response.is_success());
        assert_eq!(response.status_message.as_deref(), Some("OK"));
        assert_eq!(response.transfer_id, None);
        assert_eq!(response.client_message_id, None);
        assert_eq!(response.body.get("transferId"), Some(&json!(12345)));
        assert_eq!(serde_json::to_value(&response).unwrap()["transferId"], json!(12345));
    }

    #[test]
    fn status_code_accepts_integral_floats_only() {
        for (body, code) in [
            (json!({"statusCode": 2000.0}), 2000),
            (json!({"statusCode": 2001}), 2001),
            (json!({"statusCode": 2000.5}), 0),
            (json!({"statusCode": "2000"}), 0),
        ] {
            let response: ApiResponse = serde_json::from_value(body.clone()).unwrap();
            assert_eq!(response.status_code, code, "{body}");
        }
    }
}
