//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod response;
mod send_message;

pub use response::{HttpResponse, interpret_response};
pub use send_message::{decode_api_response, encode_send_body, endpoint_url};
