use tracing::debug;

use crate::domain::ApiResponse;
use crate::error::SmsError;
use crate::transport::decode_api_response;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A fully read HTTP response.
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|value| value.to_ascii_lowercase().contains("json"))
    }
}

/// Classify a gateway response into an [`ApiResponse`] or an [`SmsError`].
///
/// Only HTTP 200 with a JSON content type is read as an API answer. Its `statusCode` must
/// fall in [`ApiResponse::SUCCESS_STATUS_CODES`]; a body that does not parse is reported
/// as an API failure with status code 0.
pub fn interpret_response(response: &HttpResponse) -> Result<ApiResponse, SmsError> {
    let readable = response.is_json();
    debug!(
        status = response.status,
        content_type = response.content_type.as_deref().unwrap_or(""),
        body_len = response.body.len(),
        "interpreting gateway response"
    );

    if response.status != 200 || !readable {
        return Err(http_failure(response, readable));
    }

    let parsed = decode_api_response(&response.body);
    if !parsed.is_success() {
        return Err(SmsError::api(parsed));
    }
    Ok(parsed)
}

fn http_failure(response: &HttpResponse, readable: bool) -> SmsError {
    match response.status {
        401 => SmsError::authorization(format!(
            "HTTP Authentication failed, check username and password. HTTP Status: {}",
            response.status
        )),
        400 => SmsError::unknown(format!(
            "HTTP Status 400 - Bad Request. Server could not understand request/content. {}",
            response.body
        )),
        200 if !readable => SmsError::unknown(format!(
            "HTTP Response is of unknown content-type '{}', Response body was: {}",
            response.content_type.as_deref().unwrap_or(""),
            response.body
        )),
        status => SmsError::parameter(format!(
            "HTTP Connection failed, Server returned HTTP Status: {status}"
        )),
    }
}
