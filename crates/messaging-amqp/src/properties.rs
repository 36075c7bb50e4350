//! Mapping between message headers and AMQP basic properties.
//!
//! The content type header travels as the native `content_type` property,
//! everything else as long-string entries of the headers table.

use std::collections::HashMap;

use lapin::BasicProperties;
use lapin::types::{AMQPValue, FieldTable, LongString, ShortString};
use userbus_messaging::{CONTENT_TYPE_HEADER, Headers};

pub fn to_properties(headers: Option<Headers>) -> BasicProperties {
    let mut properties = BasicProperties::default();
    let Some(mut headers) = headers else {
        return properties;
    };

    if let Some(content_type) = headers.remove(CONTENT_TYPE_HEADER) {
        properties = properties.with_content_type(ShortString::from(content_type));
    }

    if !headers.is_empty() {
        let mut table = FieldTable::default();
        for (key, value) in headers {
            table.insert(
                ShortString::from(key),
                AMQPValue::LongString(LongString::from(value)),
            );
        }
        properties = properties.with_headers(table);
    }

    properties
}

pub fn from_properties(properties: &BasicProperties) -> Option<Headers> {
    let mut headers = HashMap::new();

    if let Some(table) = properties.headers() {
        for (key, value) in table.inner() {
            let value = match value {
                AMQPValue::LongString(value) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
                AMQPValue::ShortString(value) => value.as_str().to_string(),
                // Non-string values are not representable as headers.
                _ => continue,
            };
            headers.insert(key.as_str().to_string(), value);
        }
    }

    if let Some(content_type) = properties.content_type() {
        headers.insert(
            CONTENT_TYPE_HEADER.to_string(),
            content_type.as_str().to_string(),
        );
    }

    if headers.is_empty() {
        None
    } else {
        Some(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_headers() {
        let properties = to_properties(None);

        assert!(properties.content_type().is_none());
        assert!(properties.headers().is_none());
        assert_eq!(from_properties(&properties), None);
    }

    #[test]
    fn test_content_type_is_native_property() {
        let headers = HashMap::from([(
            CONTENT_TYPE_HEADER.to_string(),
            "application/json".to_string(),
        )]);

        let properties = to_properties(Some(headers.clone()));

        assert_eq!(
            properties.content_type().as_ref().map(ShortString::as_str),
            Some("application/json")
        );
        assert!(properties.headers().is_none());
        assert_eq!(from_properties(&properties), Some(headers));
    }

    #[test]
    fn test_custom_headers_travel_in_table() {
        let headers = HashMap::from([
            (CONTENT_TYPE_HEADER.to_string(), "text/plain".to_string()),
            ("origin".to_string(), "api".to_string()),
        ]);

        let properties = to_properties(Some(headers.clone()));

        let table = properties.headers().as_ref().unwrap();
        assert_eq!(table.inner().len(), 1);
        assert_eq!(from_properties(&properties), Some(headers));
    }

    #[test]
    fn test_non_string_values_are_skipped() {
        let mut table = FieldTable::default();
        table.insert(ShortString::from("retries"), AMQPValue::LongInt(3));
        table.insert(
            ShortString::from("origin"),
            AMQPValue::ShortString(ShortString::from("api")),
        );
        let properties = BasicProperties::default().with_headers(table);

        let headers = from_properties(&properties).unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("origin").map(String::as_str), Some("api"));
    }
}
