//! # Note Locking Cipher
//!
//! A keyed, reversible obfuscation for note content. It hides text from casual
//! viewing and nothing more: the keystream is the key repeated, so anyone with
//! a known plaintext fragment or enough text for frequency analysis can recover
//! both key and content. Do not treat a locked note as encrypted.
//!
//! ## Format
//!
//! 1. The validity marker `::VALID::` is prepended to the plaintext.
//! 2. Every UTF-16 code unit is XORed with the key's code unit at the same
//!    position modulo the key length.
//! 3. The resulting units are written as UTF-8 and base64 encoded.
//!
//! This matches the payloads the browser build stores, so locked notes written
//! by either side decode on the other. XOR can produce unpaired surrogates; those
//! are written in the generalized three-byte UTF-8 form and read back the same
//! way.
//!
//! Decoding checks the marker to tell a correct key from a wrong one. Only the
//! marker's nine units are checked, so a wrong key that agrees with the real
//! key's repetition over those positions passes: a note locked with `abcd`
//! "unlocks" with `abcdabcdab` into garbage text. Any other wrong key yields
//! [`Decoded::Invalid`].

use crate::error::{NotesError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const VALIDITY_MARKER: &str = "::VALID::";

/// Outcome of reversing a locked payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// The key was correct; holds the original plaintext.
    Valid(String),
    /// The key did not reproduce the validity marker.
    Invalid,
}

impl Decoded {
    pub fn into_plaintext(self) -> Option<String> {
        match self {
            Decoded::Valid(text) => Some(text),
            Decoded::Invalid => None,
        }
    }
}

pub fn encode(plaintext: &str, key: &str) -> String {
    let key: Vec<u16> = key.encode_utf16().collect();
    let marked = VALIDITY_MARKER.encode_utf16().chain(plaintext.encode_utf16());
    let units = xor_units(marked, &key);
    STANDARD.encode(units_to_bytes(&units))
}

/// Reverses [`encode`].
///
/// Fails with [`NotesError::MalformedCipher`] only when the payload is not
/// valid base64 or its bytes are not a UTF-8 unit stream.
pub fn decode(ciphertext: &str, key: &str) -> Result<Decoded> {
    let bytes = STANDARD
        .decode(ciphertext.trim())
        .map_err(|_| NotesError::MalformedCipher)?;
    let units = bytes_to_units(&bytes).ok_or(NotesError::MalformedCipher)?;

    let key: Vec<u16> = key.encode_utf16().collect();
    let plain = xor_units(units.into_iter(), &key);

    let Ok(text) = String::from_utf16(&plain) else {
        return Ok(Decoded::Invalid);
    };
    Ok(match text.strip_prefix(VALIDITY_MARKER) {
        Some(rest) => Decoded::Valid(rest.to_string()),
        None => Decoded::Invalid,
    })
}

// An empty key leaves units untouched.
fn xor_units(units: impl Iterator<Item = u16>, key: &[u16]) -> Vec<u16> {
    units
        .enumerate()
        .map(|(i, unit)| match key.len() {
            0 => unit,
            len => unit ^ key[i % len],
        })
        .collect()
}

fn units_to_bytes(units: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(units.len());
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            Err(err) => {
                let unit = err.unpaired_surrogate();
                bytes.push(0xE0 | (unit >> 12) as u8);
                bytes.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                bytes.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    bytes
}

fn bytes_to_units(bytes: &[u8]) -> Option<Vec<u16>> {
    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;

    let cont = |b: Option<&u8>| -> Option<u32> {
        let b = *b?;
        (b & 0xC0 == 0x80).then_some((b & 0x3F) as u32)
    };

    while i < bytes.len() {
        let lead = bytes[i];
        match lead {
            0x00..=0x7F => {
                units.push(lead as u16);
                i += 1;
            }
            0xC2..=0xDF => {
                let cp = ((lead as u32 & 0x1F) << 6) | cont(bytes.get(i + 1))?;
                units.push(cp as u16);
                i += 2;
            }
            0xE0..=0xEF => {
                let cp = ((lead as u32 & 0x0F) << 12)
                    | (cont(bytes.get(i + 1))? << 6)
                    | cont(bytes.get(i + 2))?;
                if cp < 0x800 {
                    return None;
                }
                units.push(cp as u16);
                i += 3;
            }
            0xF0..=0xF4 => {
                let cp = ((lead as u32 & 0x07) << 18)
                    | (cont(bytes.get(i + 1))? << 12)
                    | (cont(bytes.get(i + 2))? << 6)
                    | cont(bytes.get(i + 3))?;
                let c = char::from_u32(cp).filter(|_| cp >= 0x10000)?;
                let mut pair = [0u16; 2];
                units.extend_from_slice(c.encode_utf16(&mut pair));
                i += 4;
            }
            _ => return None,
        }
    }

    Some(units)
}
