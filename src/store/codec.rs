//! Set-literal field codec.
//!
//! List-valued columns are stored as a brace-delimited list of double-quoted
//! strings, the same text form a postgres array literal takes:
//!
//! ```text
//! {"AS","ACME"}
//! ```
//!
//! Values are not escaped. A value containing `"` produces a literal that
//! does not decode back to the same list, and since decoding goes through
//! JSON the same holds for backslashes and control characters. Use
//! [`is_encodable`] to check a value before storing it.

use crate::error_handling::CodecError;

/// Encodes a list of values as a set literal. An empty list encodes to `{}`.
pub fn encode<S: AsRef<str>>(values: &[S]) -> String {
    let quoted: Vec<String> = values
        .iter()
        .map(|v| format!("\"{}\"", v.as_ref()))
        .collect();
    format!("{{{}}}", quoted.join(","))
}

/// Returns true if `value` survives an encode/decode round trip.
pub fn is_encodable(value: &str) -> bool {
    !value.chars().any(|c| c == '"' || c == '\\' || c.is_control())
}

/// Decodes a set literal into its values.
///
/// The outer braces are swapped for brackets and the result parsed as a JSON
/// array of strings; anything else is a `CodecError`.
pub fn decode(literal: &str) -> Result<Vec<String>, CodecError> {
    let json = match literal
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(inner) => format!("[{}]", inner),
        None => literal.to_string(),
    };
    serde_json::from_str(&json).map_err(|source| CodecError {
        literal: literal.to_string(),
        source,
    })
}
