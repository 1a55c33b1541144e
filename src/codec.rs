//! Content state token encoding
//!
//! A token is the JSON text, URI-escaped the way `encodeURI` does it, then
//! base64url encoded without padding:
//!
//! ```text
//! {"id":"…","type":"Manifest"} ──escape──▶ %7B%22id%22:… ──base64url──▶ JTdCJTIyaWQlMjI6…
//! ```
//!
//! Reference: <https://iiif.io/api/content-state/1.0/#23-content-state-encoding>

use base64::{
    alphabet,
    engine::general_purpose::{self, GeneralPurpose, STANDARD},
    Engine as _,
};
use percent_encoding::{percent_decode, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;

use crate::error::{ContentStateError, Result};

/// Characters `encodeURI` escapes; everything else in printable ASCII is kept
const URI_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Escapes `decodeURI` leaves untouched
const URI_RESERVED: &[u8] = b";/?:@&=+$,#";

/// Standard alphabet that, like `atob`, ignores non-zero trailing bits
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    general_purpose::PAD.with_decode_allow_trailing_bits(true),
);

/// Serialize `value` to JSON and encode it as a content state token
pub fn encode_content_state<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(encode_content_state_str(&json))
}

/// Encode already serialized JSON text as a content state token
pub fn encode_content_state_str(json: &str) -> String {
    let uri_encoded = utf8_percent_encode(json, URI_ESCAPE).to_string();
    let base64 = STANDARD.encode(uri_encoded);
    base64
        .replace('+', "-")
        .replace('/', "_")
        .trim_end_matches('=')
        .to_string()
}

/// Decode a content state token back into its JSON text (not parsed)
pub fn decode_content_state(token: &str) -> Result<String> {
    let padded = restore_padding(token)?;
    let base64 = padded.replace('-', "+").replace('_', "/");
    let uri_encoded = LENIENT_STANDARD.decode(base64)?;
    decode_uri(&uri_encoded)
}

/// Reverse the `encodeURI` escape.
///
/// A `%` must start a two digit hex escape. Escapes of reserved characters
/// stay as written, everything else is decoded and must form valid UTF-8.
fn decode_uri(input: &[u8]) -> Result<String> {
    let mut decoded = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        if input[pos] != b'%' {
            decoded.push(input[pos]);
            pos += 1;
            continue;
        }

        let escape = input
            .get(pos..pos + 3)
            .filter(|escape| escape[1].is_ascii_hexdigit() && escape[2].is_ascii_hexdigit())
            .ok_or(ContentStateError::MalformedEscape(pos))?;

        let byte: Vec<u8> = percent_decode(escape).collect();
        if URI_RESERVED.contains(&byte[0]) {
            decoded.extend_from_slice(escape);
        } else {
            decoded.push(byte[0]);
        }
        pos += 3;
    }

    Ok(std::str::from_utf8(&decoded)?.to_string())
}

fn restore_padding(token: &str) -> std::result::Result<String, ContentStateError> {
    match token.len() % 4 {
        0 => Ok(token.to_string()),
        1 => Err(ContentStateError::InvalidLength(token.len())),
        remainder => Ok(format!("{}{}", token, "=".repeat(4 - remainder))),
    }
}
