//! Response decoding.
//!
//! Every response body is decoded into the same dynamically shaped
//! [`JsonValue`]; no schema is assumed. Object keys keep their document order.

use crate::DecodeError;

/// `Null | Bool | Number | String | Array | Object`, object order preserved.
pub type JsonValue = serde_json::Value;

/// Decode a complete JSON document from raw bytes.
///
/// Rejects non-UTF-8 input, unterminated structures, invalid escapes and
/// anything other than whitespace after the top-level value.
pub fn decode(body: &[u8]) -> Result<JsonValue, DecodeError> {
    serde_json::from_slice(body).map_err(|error| {
        let error = DecodeError::from(error);
        tracing::debug!(
            kind = error.kind().as_str(),
            line = error.line(),
            column = error.column(),
            "response body is not valid JSON"
        );
        error
    })
}

pub fn decode_str(body: &str) -> Result<JsonValue, DecodeError> {
    decode(body.as_bytes())
}

/// Compact JSON text for `value`.
pub fn encode(value: &JsonValue) -> String {
    value.to_string()
}

pub fn encode_pretty(value: &JsonValue) -> String {
    // Serializing a `Value` into a String cannot fail.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::DecodeErrorKind;

    #[test]
    fn decodes_nested_document() {
        let value = decode(r#"{"a":[1,2.5,{"b":null}],"c":true,"d":"été"}"#.as_bytes())
            .expect("valid JSON");

        assert_eq!(value, json!({"a": [1, 2.5, {"b": null}], "c": true, "d": "été"}));
    }

    #[test]
    fn keeps_object_key_order() {
        let value = decode_str(r#"{"zeta":1,"alpha":2,"mid":3}"#).expect("valid JSON");
        let keys: Vec<&str> = value
            .as_object()
            .map(|object| object.keys().map(String::as_str).collect())
            .unwrap_or_default();

        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = decode_str(r#"{"a":1} x"#).expect_err("must fail");
        assert_eq!(err.kind(), DecodeErrorKind::Syntax);
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn rejects_unterminated_structures() {
        let err = decode_str(r#"{"slides":[{"lines":[]"#).expect_err("must fail");
        assert_eq!(err.kind(), DecodeErrorKind::Eof);
    }

    #[test]
    fn rejects_invalid_escape() {
        let err = decode_str(r#"{"a":"\q"}"#).expect_err("must fail");
        assert_eq!(err.kind(), DecodeErrorKind::Syntax);
        assert!(!err.reason().contains("at line"), "reason: {}", err.reason());
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(decode(b"\"\xff\xfe\"").is_err());
    }

    #[test]
    fn rejects_empty_body() {
        let err = decode(b"").expect_err("must fail");
        assert_eq!(err.kind(), DecodeErrorKind::Eof);
    }

    #[test]
    fn encode_then_decode_is_identity() {
        let value = json!({
            "slides": [{"lines": [{}, {"member": {"nameFullTitle": "Lord Example", "id": 4321}}]}],
            "ratio": -0.125,
            "flags": [true, false, null],
            "empty": {}
        });

        assert_eq!(decode_str(&encode(&value)).expect("round trip"), value);
        assert_eq!(decode_str(&encode_pretty(&value)).expect("round trip"), value);
    }
}
