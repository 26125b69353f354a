//! Path component encoding and readme content decoding.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use crate::error::{BuildpackError, BuildpackResult};

/// Base64 engine that tolerates missing padding and trailing bits
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Percent-encode a single path or query component.
///
/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` untouched and encodes every other
/// UTF-8 byte as `%XX`, so `heroku/ruby` becomes `heroku%2Fruby`.
pub fn encode_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Keep only the base64 symbols of `content`.
///
/// Input stops at the first `=`, URL-safe `-`/`_` map to `+`/`/`, and any
/// other character outside the alphabet is skipped. A single dangling
/// symbol cannot encode a byte and is dropped.
fn base64_symbols(content: &str) -> String {
    let mut symbols: String = content
        .chars()
        .take_while(|&c| c != '=')
        .filter_map(|c| match c {
            '-' => Some('+'),
            '_' => Some('/'),
            'A'..='Z' | 'a'..='z' | '0'..='9' | '+' | '/' => Some(c),
            _ => None,
        })
        .collect();
    if symbols.len() % 4 == 1 {
        symbols.pop();
    }
    symbols
}

/// Decode content according to its declared encoding.
///
/// Supported encodings: `base64`, `utf8`/`utf-8`, `hex`, `latin1`/`binary`.
/// Base64 decoding skips characters outside the alphabet rather than
/// failing. Decoded bytes that are not valid UTF-8 are replaced lossily.
pub fn decode_content(content: &str, encoding: &str) -> BuildpackResult<String> {
    let context = format!("readme ({})", encoding);
    let bytes = match encoding.to_ascii_lowercase().as_str() {
        "base64" => {
            LENIENT_BASE64.decode(base64_symbols(content)).map_err(|e| {
                BuildpackError::decode(context, format!("invalid base64 content: {}", e), e)
            })?
        }
        "hex" => hex::decode(content.trim()).map_err(|e| {
            BuildpackError::decode(context, format!("invalid hex content: {}", e), e)
        })?,
        "utf8" | "utf-8" => return Ok(content.to_string()),
        "latin1" | "binary" => {
            return Ok(content
                .chars()
                .map(|c| ((c as u32) & 0xff) as u8 as char)
                .collect())
        }
        other => {
            return Err(BuildpackError::Decode {
                path: context,
                message: format!("unsupported encoding '{}'", other),
                source: None,
            })
        }
    };

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
