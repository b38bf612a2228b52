//! Callback-style delivery of send outcomes.

use tracing::{debug, warn};

use crate::domain::{ApiResponse, Message};
use crate::error::SmsError;

/// Receives the outcome of [`WebSmsClient::send_with`](crate::WebSmsClient::send_with).
///
/// Exactly one method is called per send. The default implementations only log, so a
/// handler may override just the outcome it cares about.
pub trait SendHandler {
    /// The gateway accepted the message.
    fn on_success(&mut self, response: ApiResponse, message: &Message) {
        debug!(
            status_code = response.status_code,
            transfer_id = response.transfer_id.as_deref().unwrap_or(""),
            client_message_id = message.client_message_id().unwrap_or(""),
            "message transferred"
        );
    }

    /// The message was (probably) not transferred.
    fn on_error(&mut self, error: SmsError, message: &Message) {
        warn!(
            cause = %error.cause(),
            error = error.message(),
            client_message_id = message.client_message_id().unwrap_or(""),
            "message not transferred"
        );
    }
}

/// Handler that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHandler;

impl SendHandler for LogHandler {}

/// Handler built from two closures, see [`handler_fn`].
#[derive(Debug, Clone)]
pub struct FnHandler<S, E> {
    on_success: S,
    on_error: E,
}

/// Build a [`SendHandler`] from a success and an error closure.
pub fn handler_fn<S, E>(on_success: S, on_error: E) -> FnHandler<S, E>
where
    S: FnMut(ApiResponse, &Message),
    E: FnMut(SmsError, &Message),
{
    FnHandler {
        on_success,
        on_error,
    }
}

impl<S, E> SendHandler for FnHandler<S, E>
where
    S: FnMut(ApiResponse, &Message),
    E: FnMut(SmsError, &Message),
{
    fn on_success(&mut self, response: ApiResponse, message: &Message) {
        (self.on_success)(response, message);
    }

    fn on_error(&mut self, error: SmsError, message: &Message) {
        (self.on_error)(error, message);
    }
}

/// Handler with a success closure; errors go to the logging default.
#[derive(Debug, Clone)]
pub struct SuccessFn<S>(S);

/// Build a [`SendHandler`] that only reacts to success.
pub fn success_fn<S>(on_success: S) -> SuccessFn<S>
where
    S: FnMut(ApiResponse, &Message),
{
    SuccessFn(on_success)
}

impl<S> SendHandler for SuccessFn<S>
where
    S: FnMut(ApiResponse, &Message),
{
    fn on_success(&mut self, response: ApiResponse, message: &Message) {
        (self.0)(response, message);
    }
}
