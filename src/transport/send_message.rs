use serde::Serialize;
use url::Url;

use crate::domain::{
    ApiResponse, MaxSmsPerMessage, Message, MessageData, MessageKind, ValidatedSendOptions,
};

const SMSMESSAGING_PATH: &str = "json/smsmessaging";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to encode request body: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendBody {
    #[serde(flatten)]
    data: MessageData,
    #[serde(skip_serializing_if = "Option::is_none")]
    test: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_sms_per_message: Option<MaxSmsPerMessage>,
}

/// Endpoint for `kind` below the gateway base URL, e.g. `{base}/json/smsmessaging/text`.
///
/// A path on the base URL is kept; a trailing slash does not produce `//`.
pub fn endpoint_url(gateway: &Url, kind: MessageKind) -> Url {
    let mut url = gateway.clone();
    let base = gateway.path().trim_end_matches('/');
    url.set_path(&format!("{base}/{SMSMESSAGING_PATH}/{}", kind.as_str()));
    url
}

pub fn encode_send_body(
    message: &Message,
    options: ValidatedSendOptions,
) -> Result<String, TransportError> {
    let body = SendBody {
        data: message.data(),
        test: options.test,
        max_sms_per_message: options.max_sms_per_message,
    };
    Ok(serde_json::to_string(&body)?)
}

/// Parse a gateway body. Bodies that do not parse yield a synthesized
/// response with status code 0 instead of an error.
pub fn decode_api_response(body: &str) -> ApiResponse {
    serde_json::from_str(body).unwrap_or_else(|err| ApiResponse::parse_failure(&err, body))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::domain::SendOptions;

    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn endpoint_url_appends_message_kind() {
        assert_eq!(
            endpoint_url(&url("https://api.websms.com"), MessageKind::Text).as_str(),
            "https://api.websms.com/json/smsmessaging/text"
        );
        assert_eq!(
            endpoint_url(&url("https://api.websms.com/"), MessageKind::Binary).as_str(),
            "https://api.websms.com/json/smsmessaging/binary"
        );
        assert_eq!(
            endpoint_url(&url("http://127.0.0.1:8080/gateway/v2/"), MessageKind::Text).as_str(),
            "http://127.0.0.1:8080/gateway/v2/json/smsmessaging/text"
        );
    }

    #[test]
    fn encode_text_body_adds_send_options() {
        let msg = Message::text(["4367612345678"], "hello").unwrap();
        let options = SendOptions::test()
            .max_sms_per_message(2)
            .validate_for(&msg)
            .unwrap();
        let body: Value = serde_json::from_str(&encode_send_body(&msg, options).unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "recipientAddressList": ["4367612345678"],
                "messageContent": "hello",
                "test": true,
                "maxSmsPerMessage": 2
            })
        );
    }

    #[test]
    fn encode_binary_body_omits_unset_options() {
        let msg = Message::binary(["4367612345678"], ["BQAD/AIB"], true).unwrap();
        let options = SendOptions::default().validate_for(&msg).unwrap();
        let body: Value = serde_json::from_str(&encode_send_body(&msg, options).unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "recipientAddressList": ["4367612345678"],
                "messageContent": ["BQAD/AIB"],
                "userDataHeaderPresent": true
            })
        );
    }

    #[test]
    fn decode_falls_back_to_parse_failure() {
        let ok = decode_api_response(r#"{"statusCode":2000,"statusMessage":"OK"}"#);
        assert!(ok.is_success());

        let broken = decode_api_response("<html>");
        assert_eq!(broken.status_code, 0);
        assert_eq!(broken.body.get("rawString"), Some(&json!("<html>")));

        let not_an_object = decode_api_response("[2000]");
        assert_eq!(not_an_object.status_code, 0);
    }
}
