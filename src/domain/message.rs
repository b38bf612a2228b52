use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    BinarySegment, MessageText, RecipientAddress, SenderAddress, SenderAddressType,
};
use crate::error::SmsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How field errors found while building a message are surfaced.
pub struct ConstructionOptions {
    /// When `true` (the default) any invalid field fails the whole construction.
    ///
    /// When `false`, invalid optional fields are reported and then skipped. Invalid required
    /// fields still fail, because no message can exist without them.
    pub raise_on_error: bool,
}

impl Default for ConstructionOptions {
    fn default() -> Self {
        Self {
            raise_on_error: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Text,
    Binary,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Binary => "binary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Segments of a binary message.
pub struct BinaryContent {
    segments: Vec<BinarySegment>,
    user_data_header_present: bool,
}

impl BinaryContent {
    pub fn segments(&self) -> &[BinarySegment] {
        &self.segments
    }

    /// Whether every segment starts with a User Data Header.
    pub fn user_data_header_present(&self) -> bool {
        self.user_data_header_present
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Variant-specific payload of a [`Message`].
pub enum MessageContent {
    Text(MessageText),
    Binary(BinaryContent),
}

impl MessageContent {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Text(_) => MessageKind::Text,
            Self::Binary(_) => MessageKind::Binary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A validated SMS message, either plain text or binary.
///
/// All fields are checked on construction and on every setter. A failed setter leaves the
/// previous value in place.
pub struct Message {
    recipient_address_list: Vec<RecipientAddress>,
    sender_address: Option<SenderAddress>,
    sender_address_type: Option<SenderAddressType>,
    send_as_flash_sms: Option<bool>,
    notification_callback_url: Option<String>,
    client_message_id: Option<String>,
    priority: Option<i32>,
    content: MessageContent,
    options: ConstructionOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// Configuration record for a text message.
///
/// When read from JSON, keys use the gateway's camelCase names and unknown keys are rejected.
pub struct TextMessageConfig {
    #[serde(default)]
    pub recipient_address_list: Vec<String>,
    pub message_content: Option<String>,
    pub sender_address: Option<String>,
    pub sender_address_type: Option<SenderAddressType>,
    pub send_as_flash_sms: Option<bool>,
    pub notification_callback_url: Option<String>,
    pub client_message_id: Option<String>,
    #[serde(default, deserialize_with = "integral_priority")]
    pub priority: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// Configuration record for a binary message.
///
/// `message_content` holds base64 encoded segments.
pub struct BinaryMessageConfig {
    #[serde(default)]
    pub recipient_address_list: Vec<String>,
    pub message_content: Option<Vec<String>>,
    pub user_data_header_present: Option<bool>,
    pub sender_address: Option<String>,
    pub sender_address_type: Option<SenderAddressType>,
    pub send_as_flash_sms: Option<bool>,
    pub notification_callback_url: Option<String>,
    pub client_message_id: Option<String>,
    #[serde(default, deserialize_with = "integral_priority")]
    pub priority: Option<i32>,
}

/// Accepts `5` and `5.0` alike; fractional or out-of-range priorities are rejected.
fn integral_priority<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    number
        .as_i64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|value| value.fract() == 0.0)
                .map(|value| value as i64)
        })
        .and_then(|value| i32::try_from(value).ok())
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("priority must be an integer, got {number}")))
}

/// Optional fields shared by both message kinds.
struct SharedFields {
    sender_address: Option<SenderAddress>,
    sender_address_type: Option<SenderAddressType>,
    send_as_flash_sms: Option<bool>,
    notification_callback_url: Option<String>,
    client_message_id: Option<String>,
    priority: Option<i32>,
}

/// Collects every field error of one construction before deciding the outcome.
struct FieldCollector<'a> {
    options: ConstructionOptions,
    on_error: &'a mut dyn FnMut(&SmsError),
    errors: Vec<ValidationError>,
}

impl<'a> FieldCollector<'a> {
    fn new(options: ConstructionOptions, on_error: &'a mut dyn FnMut(&SmsError)) -> Self {
        Self {
            options,
            on_error,
            errors: Vec::new(),
        }
    }

    fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(error = %err, "rejected message field");
                (self.on_error)(&SmsError::validation(
                    vec![err.clone()],
                    self.options.raise_on_error,
                ));
                self.errors.push(err);
                None
            }
        }
    }

    fn shared(
        &mut self,
        sender_address: Option<String>,
        sender_address_type: Option<SenderAddressType>,
        send_as_flash_sms: Option<bool>,
        notification_callback_url: Option<String>,
        client_message_id: Option<String>,
        priority: Option<i32>,
    ) -> SharedFields {
        SharedFields {
            sender_address: sender_address.and_then(|value| self.check(SenderAddress::new(value))),
            sender_address_type,
            send_as_flash_sms,
            notification_callback_url,
            client_message_id,
            priority,
        }
    }

    /// `required` is `None` when a required field failed, which always left an error behind.
    fn finish<T>(self, required: Option<T>) -> Result<T, SmsError> {
        match required {
            Some(value) if self.errors.is_empty() || !self.options.raise_on_error => Ok(value),
            _ => Err(SmsError::validation(self.errors, self.options.raise_on_error)),
        }
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

impl TextMessageConfig {
    /// Build a message, failing on any invalid field.
    pub fn build(self) -> Result<Message, SmsError> {
        self.build_with(&ConstructionOptions::default(), |_| {})
    }

    /// Build a message, reporting every field error to `on_error` first.
    pub fn build_with<F>(
        self,
        options: &ConstructionOptions,
        mut on_error: F,
    ) -> Result<Message, SmsError>
    where
        F: FnMut(&SmsError),
    {
        let mut collector = FieldCollector::new(*options, &mut on_error);
        let recipients =
            collector.check(RecipientAddress::parse_list(self.recipient_address_list));
        let text = collector.check(
            required(self.message_content, MessageText::FIELD).and_then(MessageText::new),
        );
        let shared = collector.shared(
            self.sender_address,
            self.sender_address_type,
            self.send_as_flash_sms,
            self.notification_callback_url,
            self.client_message_id,
            self.priority,
        );
        let (recipients, text) = collector.finish(recipients.zip(text))?;
        Ok(Message::assemble(
            recipients,
            MessageContent::Text(text),
            shared,
            *options,
        ))
    }

    /// Parse a configuration record from JSON.
    ///
    /// Unknown keys fail with an error naming the accepted keys.
    pub fn from_json(json: &str) -> Result<Self, SmsError> {
        serde_json::from_str(json).map_err(|err| {
            SmsError::from(ValidationError::InvalidConfig {
                reason: err.to_string(),
            })
        })
    }
}

impl BinaryMessageConfig {
    /// Build a message, failing on any invalid field.
    pub fn build(self) -> Result<Message, SmsError> {
        self.build_with(&ConstructionOptions::default(), |_| {})
    }

    /// Build a message, reporting every field error to `on_error` first.
    pub fn build_with<F>(
        self,
        options: &ConstructionOptions,
        mut on_error: F,
    ) -> Result<Message, SmsError>
    where
        F: FnMut(&SmsError),
    {
        let mut collector = FieldCollector::new(*options, &mut on_error);
        let recipients =
            collector.check(RecipientAddress::parse_list(self.recipient_address_list));
        let segments = collector.check(
            required(self.message_content, BinarySegment::FIELD)
                .and_then(BinarySegment::parse_list),
        );
        let udh = collector.check(required(
            self.user_data_header_present,
            Message::USER_DATA_HEADER_FIELD,
        ));
        let shared = collector.shared(
            self.sender_address,
            self.sender_address_type,
            self.send_as_flash_sms,
            self.notification_callback_url,
            self.client_message_id,
            self.priority,
        );
        let (recipients, (segments, user_data_header_present)) =
            collector.finish(recipients.zip(segments.zip(udh)))?;
        Ok(Message::assemble(
            recipients,
            MessageContent::Binary(BinaryContent {
                segments,
                user_data_header_present,
            }),
            shared,
            *options,
        ))
    }

    /// Parse a configuration record from JSON.
    ///
    /// Unknown keys fail with an error naming the accepted keys.
    pub fn from_json(json: &str) -> Result<Self, SmsError> {
        serde_json::from_str(json).map_err(|err| {
            SmsError::from(ValidationError::InvalidConfig {
                reason: err.to_string(),
            })
        })
    }
}

impl Message {
    /// JSON field name used by the gateway (`userDataHeaderPresent`).
    pub const USER_DATA_HEADER_FIELD: &'static str = "userDataHeaderPresent";

    /// Create a text message from its required fields.
    pub fn text<I, S>(recipients: I, content: impl Into<String>) -> Result<Self, SmsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TextMessageConfig {
            recipient_address_list: recipients.into_iter().map(Into::into).collect(),
            message_content: Some(content.into()),
            ..Default::default()
        }
        .build()
    }

    /// Create a binary message from its required fields.
    ///
    /// `segments` are base64 encoded PDUs; each one is validated.
    pub fn binary<I, S, J, T>(
        recipients: I,
        segments: J,
        user_data_header_present: bool,
    ) -> Result<Self, SmsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        BinaryMessageConfig {
            recipient_address_list: recipients.into_iter().map(Into::into).collect(),
            message_content: Some(segments.into_iter().map(Into::into).collect()),
            user_data_header_present: Some(user_data_header_present),
            ..Default::default()
        }
        .build()
    }

    fn assemble(
        recipient_address_list: Vec<RecipientAddress>,
        content: MessageContent,
        shared: SharedFields,
        options: ConstructionOptions,
    ) -> Self {
        Self {
            recipient_address_list,
            sender_address: shared.sender_address,
            sender_address_type: shared.sender_address_type,
            send_as_flash_sms: shared.send_as_flash_sms,
            notification_callback_url: shared.notification_callback_url,
            client_message_id: shared.client_message_id,
            priority: shared.priority,
            content,
            options,
        }
    }

    fn reject(&self, err: ValidationError) -> SmsError {
        debug!(error = %err, "rejected message update");
        SmsError::validation(vec![err], self.options.raise_on_error)
    }

    fn expect_kind(&self, expected: MessageKind) -> Result<(), SmsError> {
        if self.kind() != expected {
            return Err(self.reject(ValidationError::ContentKindMismatch {
                expected: expected.as_str(),
            }));
        }
        Ok(())
    }

    pub fn kind(&self) -> MessageKind {
        self.content.kind()
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn recipient_address_list(&self) -> &[RecipientAddress] {
        &self.recipient_address_list
    }

    /// Replace the recipients. The list must be non-empty and every entry a valid MSISDN.
    pub fn set_recipient_address_list<I, S>(&mut self, recipients: I) -> Result<(), SmsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recipient_address_list =
            RecipientAddress::parse_list(recipients).map_err(|err| self.reject(err))?;
        Ok(())
    }

    pub fn sender_address(&self) -> Option<&SenderAddress> {
        self.sender_address.as_ref()
    }

    pub fn set_sender_address(&mut self, sender_address: Option<String>) -> Result<(), SmsError> {
        self.sender_address = sender_address
            .map(SenderAddress::new)
            .transpose()
            .map_err(|err| self.reject(err))?;
        Ok(())
    }

    pub fn sender_address_type(&self) -> Option<SenderAddressType> {
        self.sender_address_type
    }

    pub fn set_sender_address_type(&mut self, sender_address_type: Option<SenderAddressType>) {
        self.sender_address_type = sender_address_type;
    }

    pub fn send_as_flash_sms(&self) -> Option<bool> {
        self.send_as_flash_sms
    }

    pub fn set_send_as_flash_sms(&mut self, send_as_flash_sms: Option<bool>) {
        self.send_as_flash_sms = send_as_flash_sms;
    }

    /// Endpoint the gateway calls with delivery reports and replies for this message.
    pub fn notification_callback_url(&self) -> Option<&str> {
        self.notification_callback_url.as_deref()
    }

    pub fn set_notification_callback_url(&mut self, url: Option<String>) {
        self.notification_callback_url = url;
    }

    /// Caller-chosen id, echoed back by the gateway in responses and notifications.
    pub fn client_message_id(&self) -> Option<&str> {
        self.client_message_id.as_deref()
    }

    pub fn set_client_message_id(&mut self, client_message_id: Option<String>) {
        self.client_message_id = client_message_id;
    }

    /// Message priority, 1 to 9 by convention. Supported levels depend on the account.
    pub fn priority(&self) -> Option<i32> {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Option<i32>) {
        self.priority = priority;
    }

    /// Text content, `None` for binary messages.
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(text) => Some(text.as_str()),
            MessageContent::Binary(_) => None,
        }
    }

    pub fn set_text_content(&mut self, content: impl Into<String>) -> Result<(), SmsError> {
        self.expect_kind(MessageKind::Text)?;
        let text = MessageText::new(content).map_err(|err| self.reject(err))?;
        self.content = MessageContent::Text(text);
        Ok(())
    }

    /// Binary segments, `None` for text messages.
    pub fn binary_content(&self) -> Option<&[BinarySegment]> {
        match &self.content {
            MessageContent::Binary(binary) => Some(binary.segments()),
            MessageContent::Text(_) => None,
        }
    }

    pub fn set_binary_content<I, S>(&mut self, segments: I) -> Result<(), SmsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expect_kind(MessageKind::Binary)?;
        let parsed = BinarySegment::parse_list(segments).map_err(|err| self.reject(err))?;
        if let MessageContent::Binary(binary) = &mut self.content {
            binary.segments = parsed;
        }
        Ok(())
    }

    /// UDH flag, `None` for text messages.
    pub fn user_data_header_present(&self) -> Option<bool> {
        match &self.content {
            MessageContent::Binary(binary) => Some(binary.user_data_header_present),
            MessageContent::Text(_) => None,
        }
    }

    pub fn set_user_data_header_present(&mut self, present: bool) -> Result<(), SmsError> {
        self.expect_kind(MessageKind::Binary)?;
        if let MessageContent::Binary(binary) = &mut self.content {
            binary.user_data_header_present = present;
        }
        Ok(())
    }

    /// Project the fields that are currently set; this is the JSON request body.
    pub fn data(&self) -> MessageData {
        let (message_content, user_data_header_present) = match &self.content {
            MessageContent::Text(text) => (ContentData::Text(text.clone()), None),
            MessageContent::Binary(binary) => (
                ContentData::Binary(binary.segments.clone()),
                Some(binary.user_data_header_present),
            ),
        };
        MessageData {
            recipient_address_list: self.recipient_address_list.clone(),
            sender_address: self.sender_address.clone(),
            sender_address_type: self.sender_address_type,
            send_as_flash_sms: self.send_as_flash_sms,
            notification_callback_url: self.notification_callback_url.clone(),
            client_message_id: self.client_message_id.clone(),
            priority: self.priority,
            message_content,
            user_data_header_present,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentData {
    Text(MessageText),
    Binary(Vec<BinarySegment>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Sparse projection of a [`Message`]: unset fields are not serialized.
pub struct MessageData {
    pub recipient_address_list: Vec<RecipientAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_address: Option<SenderAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_address_type: Option<SenderAddressType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_as_flash_sms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    pub message_content: ContentData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data_header_present: Option<bool>,
}
