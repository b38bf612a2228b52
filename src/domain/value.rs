use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
/// Recipient MSISDN in full international format without a leading `+`.
///
/// Invariant: 1 to 15 ASCII digits. Surrounding whitespace is rejected, not trimmed.
pub struct RecipientAddress(String);

impl RecipientAddress {
    /// JSON field name used by the gateway (`recipientAddressList`).
    pub const FIELD: &'static str = "recipientAddressList";

    /// Maximum number of digits in an MSISDN.
    pub const MAX_DIGITS: usize = 15;

    /// Create a validated [`RecipientAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let valid = (1..=Self::MAX_DIGITS).contains(&value.len())
            && value.bytes().all(|b| b.is_ascii_digit());
        if !valid {
            return Err(ValidationError::InvalidRecipient { input: value });
        }
        Ok(Self(value))
    }

    /// Validate a whole recipient list. The list must not be empty.
    pub fn parse_list<I, S>(values: I) -> Result<Vec<Self>, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = values
            .into_iter()
            .map(Self::new)
            .collect::<Result<Vec<_>, _>>()?;
        if list.is_empty() {
            return Err(ValidationError::EmptyRecipientList);
        }
        Ok(list)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// Sender address shown to the recipient (numeric or alphanumeric).
///
/// Which values are accepted depends on the account settings at the gateway.
/// Stored as given; only the empty string is rejected.
pub struct SenderAddress(String);

impl SenderAddress {
    /// JSON field name used by the gateway (`senderAddress`).
    pub const FIELD: &'static str = "senderAddress";

    /// Create a validated [`SenderAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// How the gateway should interpret [`SenderAddress`].
pub enum SenderAddressType {
    National,
    International,
    Alphanumeric,
    Shortcode,
}

impl SenderAddressType {
    /// JSON field name used by the gateway (`senderAddressType`).
    pub const FIELD: &'static str = "senderAddressType";

    /// Every accepted value, in wire order.
    pub const ALL: [Self; 4] = [
        Self::National,
        Self::International,
        Self::Alphanumeric,
        Self::Shortcode,
    ];

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::National => "national",
            Self::International => "international",
            Self::Alphanumeric => "alphanumeric",
            Self::Shortcode => "shortcode",
        }
    }
}

impl fmt::Display for SenderAddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SenderAddressType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidSenderAddressType {
                input: s.to_owned(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// UTF-8 text content of a text message.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used by the gateway (`messageContent`).
    pub const FIELD: &'static str = "messageContent";

    /// Create a validated [`MessageText`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// One binary SMS segment (PDU, optionally starting with a UDH), base64 encoded.
///
/// Invariant: the value decodes as standard, padded base64.
pub struct BinarySegment(String);

impl BinarySegment {
    /// JSON field name used by the gateway (`messageContent`).
    pub const FIELD: &'static str = "messageContent";

    /// Create a segment from an already encoded base64 string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if BASE64.decode(value.as_bytes()).is_err() {
            return Err(ValidationError::InvalidBase64 { input: value });
        }
        Ok(Self(value))
    }

    /// Encode raw segment bytes.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self(BASE64.encode(bytes))
    }

    /// Validate a list of encoded segments, keeping their order.
    pub fn parse_list<I, S>(values: I) -> Result<Vec<Self>, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Self::new).collect()
    }

    /// Encoded form as sent to the gateway.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decoded segment bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        // The constructor only admits decodable input.
        BASE64.decode(self.0.as_bytes()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// Upper bound on the number of SMS a long text message may be split into.
///
/// Invariant: `1..=255`.
pub struct MaxSmsPerMessage(u8);

impl MaxSmsPerMessage {
    /// JSON field name used by the gateway (`maxSmsPerMessage`).
    pub const FIELD: &'static str = "maxSmsPerMessage";

    pub const MIN: i32 = 1;
    pub const MAX: i32 = 255;

    /// Create a validated value.
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v != 0)
            .map(Self)
            .ok_or(ValidationError::MaxSmsPerMessageOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            })
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_accepts_up_to_fifteen_digits() {
        assert_eq!(
            RecipientAddress::new("4367612345678").unwrap().as_str(),
            "4367612345678"
        );
        assert!(RecipientAddress::new("1").is_ok());
        assert!(RecipientAddress::new("123456789012345").is_ok());
    }

    #[test]
    fn recipient_rejects_non_msisdn_input() {
        for bad in [
            "",
            "+4367612345678",
            "43-699-12345678",
            "1234567890123456",
            " 4367612345678",
            "43676abc",
            "４３６７",
        ] {
            assert!(
                matches!(
                    RecipientAddress::new(bad),
                    Err(ValidationError::InvalidRecipient { .. })
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn recipient_list_must_not_be_empty() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(
            RecipientAddress::parse_list(empty),
            Err(ValidationError::EmptyRecipientList)
        );
        let list = RecipientAddress::parse_list(["4367612345678", "4369912345678"]).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn sender_address_is_kept_verbatim() {
        assert_eq!(SenderAddress::new(" ACME ").unwrap().as_str(), " ACME ");
        assert_eq!(SenderAddress::new(" ").unwrap().as_str(), " ");
        assert_eq!(
            SenderAddress::new(""),
            Err(ValidationError::Empty {
                field: SenderAddress::FIELD
            })
        );
    }

    #[test]
    fn sender_address_type_parses_wire_values() {
        for kind in SenderAddressType::ALL {
            assert_eq!(kind.as_str().parse::<SenderAddressType>().unwrap(), kind);
        }
        assert!(matches!(
            "National".parse::<SenderAddressType>(),
            Err(ValidationError::InvalidSenderAddressType { .. })
        ));
    }

    #[test]
    fn message_text_keeps_unicode_and_rejects_empty() {
        let text = MessageText::new("Grüße 👋").unwrap();
        assert_eq!(text.as_str(), "Grüße 👋");
        assert!(MessageText::new(" ").is_ok());
        assert_eq!(
            MessageText::new(""),
            Err(ValidationError::Empty {
                field: MessageText::FIELD
            })
        );
    }

    #[test]
    fn binary_segment_requires_valid_base64() {
        let segment = BinarySegment::new("BQAD/AIBWnVzYW1tZW4=").unwrap();
        assert_eq!(segment.to_bytes()[..3], [0x05, 0x00, 0x03]);
        assert!(BinarySegment::new("not base64!").is_err());
        assert!(BinarySegment::new("BQAD/AIBWnVzYW1tZW4").is_err());

        let encoded = BinarySegment::from_bytes([0x05, 0x00, 0x03, 0xfc, 0x02, 0x01]);
        assert_eq!(encoded.as_str(), "BQAD/AIB");
    }

    #[test]
    fn max_sms_per_message_range_is_enforced() {
        assert!(MaxSmsPerMessage::new(0).is_err());
        assert!(MaxSmsPerMessage::new(-1).is_err());
        assert_eq!(MaxSmsPerMessage::new(1).unwrap().value(), 1);
        assert_eq!(MaxSmsPerMessage::new(255).unwrap().value(), 255);
        assert!(MaxSmsPerMessage::new(256).is_err());
        assert!(MaxSmsPerMessage::new(300).is_err());
    }
}
