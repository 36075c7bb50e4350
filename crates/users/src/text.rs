use std::convert::Infallible;
use std::fmt;
use std::string::FromUtf8Error;

use bytes::Bytes;

/// A raw UTF-8 text payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextMessage(pub String);

impl fmt::Display for TextMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TextMessage {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for TextMessage {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl TryFrom<Bytes> for TextMessage {
    type Error = FromUtf8Error;

    fn try_from(bytes: Bytes) -> Result<Self, Self::Error> {
        String::from_utf8(bytes.to_vec()).map(Self)
    }
}

impl TryFrom<TextMessage> for Bytes {
    type Error = Infallible;

    fn try_from(text: TextMessage) -> Result<Self, Self::Error> {
        Ok(Self::from(text.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_utf8() {
        assert!(TextMessage::try_from(Bytes::from_static(&[0xff, 0xfe])).is_err());
        assert_eq!(
            TextMessage::try_from(Bytes::from_static(b"hello")).unwrap(),
            TextMessage::from("hello")
        );
    }
}
