use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    Missing { field: &'static str },
    EmptyRecipientList,
    InvalidRecipient { input: String },
    InvalidSenderAddressType { input: String },
    InvalidBase64 { input: String },
    MaxSmsPerMessageOutOfRange { min: i32, max: i32, actual: i32 },
    ContentKindMismatch { expected: &'static str },
    InvalidConfig { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::Missing { field } => write!(f, "{field} is required"),
            Self::EmptyRecipientList => {
                write!(f, "recipientAddressList must contain at least one recipient")
            }
            Self::InvalidRecipient { input } => write!(
                f,
                "recipient '{input}' is invalid (max. 15 digits full international MSISDN, e.g. 4367612345678)"
            ),
            Self::InvalidSenderAddressType { input } => write!(
                f,
                "senderAddressType '{input}' is invalid, must be one of 'national', 'international', 'alphanumeric', 'shortcode'"
            ),
            Self::InvalidBase64 { input } => {
                write!(f, "messageContent segment is not valid base64: '{input}'")
            }
            Self::MaxSmsPerMessageOutOfRange { min, max, actual } => write!(
                f,
                "maxSmsPerMessage out of range: {actual} (expected {min}..={max})"
            ),
            Self::ContentKindMismatch { expected } => {
                write!(f, "operation requires a {expected} message")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid message configuration: {reason}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty {
            field: "messageContent",
        };
        assert_eq!(err.to_string(), "messageContent must not be empty");

        let err = ValidationError::Missing {
            field: "userDataHeaderPresent",
        };
        assert_eq!(err.to_string(), "userDataHeaderPresent is required");

        let err = ValidationError::InvalidRecipient {
            input: "+4367612345678".to_owned(),
        };
        assert!(err.to_string().starts_with("recipient '+4367612345678' is invalid"));

        let err = ValidationError::MaxSmsPerMessageOutOfRange {
            min: 1,
            max: 255,
            actual: 300,
        };
        assert_eq!(
            err.to_string(),
            "maxSmsPerMessage out of range: 300 (expected 1..=255)"
        );

        let err = ValidationError::InvalidBase64 {
            input: "%%%".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "messageContent segment is not valid base64: '%%%'"
        );
    }

    #[test]
    fn sender_address_type_error_lists_allowed_values() {
        let err = ValidationError::InvalidSenderAddressType {
            input: "galactic".to_owned(),
        };
        let text = err.to_string();
        for allowed in ["national", "international", "alphanumeric", "shortcode"] {
            assert!(text.contains(allowed), "missing {allowed} in {text}");
        }
    }
}
