//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod request;
mod response;
mod validation;
mod value;

pub use message::{
    BinaryContent, BinaryMessageConfig, ConstructionOptions, ContentData, Message, MessageContent,
    MessageData, MessageKind, TextMessageConfig,
};
pub use request::SendOptions;
pub(crate) use request::ValidatedSendOptions;
pub use response::ApiResponse;
pub use validation::ValidationError;
pub use value::{
    BinarySegment, MaxSmsPerMessage, MessageText, RecipientAddress, SenderAddress,
    SenderAddressType,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_valid_recipient_list_builds() {
        let lists: [&[&str]; 3] = [
            &["4367612345678"],
            &["1", "22", "333333333333333"],
            &["4367612345678", "4369912345678", "491701234567"],
        ];
        for list in lists {
            let msg = Message::text(list.iter().copied(), "hi").unwrap();
            assert_eq!(msg.recipient_address_list().len(), list.len());
        }
    }

    #[test]
    fn send_options_validate_per_message_kind() {
        let text = Message::text(["4367612345678"], "hi").unwrap();
        let binary = Message::binary(["4367612345678"], ["BQAD/AIB"], true).unwrap();
        let options = SendOptions {
            test: Some(true),
            max_sms_per_message: Some(300),
        };

        assert!(matches!(
            options.validate_for(&text),
            Err(ValidationError::MaxSmsPerMessageOutOfRange { actual: 300, .. })
        ));

        let validated = options.validate_for(&binary).unwrap();
        assert_eq!(validated.max_sms_per_message, None);
        assert_eq!(validated.test, Some(true));
    }
}
