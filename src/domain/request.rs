use crate::domain::message::{Message, MessageKind};
use crate::domain::validation::ValidationError;
use crate::domain::value::MaxSmsPerMessage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Per-send options.
///
/// Values are checked when the message is sent, before any request is issued.
pub struct SendOptions {
    /// `Some(true)` asks the gateway to validate the request without delivering the SMS.
    pub test: Option<bool>,
    /// Limit for splitting a long text into several SMS (`1..=255`).
    ///
    /// Only applies to text messages; ignored for binary messages.
    pub max_sms_per_message: Option<i32>,
}

impl SendOptions {
    /// Options for a test send that the gateway accepts but does not deliver.
    pub fn test() -> Self {
        Self {
            test: Some(true),
            ..Self::default()
        }
    }

    pub fn max_sms_per_message(mut self, value: i32) -> Self {
        self.max_sms_per_message = Some(value);
        self
    }

    pub(crate) fn validate_for(
        self,
        message: &Message,
    ) -> Result<ValidatedSendOptions, ValidationError> {
        let max_sms_per_message = match (message.kind(), self.max_sms_per_message) {
            (MessageKind::Text, Some(value)) => Some(MaxSmsPerMessage::new(value)?),
            (MessageKind::Binary, Some(value)) => {
                tracing::debug!(value, "maxSmsPerMessage ignored for binary message");
                None
            }
            (_, None) => None,
        };
        Ok(ValidatedSendOptions {
            test: self.test,
            max_sms_per_message,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValidatedSendOptions {
    pub test: Option<bool>,
    pub max_sms_per_message: Option<MaxSmsPerMessage>,
}
