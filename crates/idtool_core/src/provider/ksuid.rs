//! K-sortable unique identifiers.
//!
//! Layout: 4-byte big-endian seconds since [`KSUID_EPOCH_SECS`] followed by
//! 16 random bytes, rendered as fixed-width base-62. Fixed width keeps
//! string order equal to numeric order, hence roughly time order.

use super::IdProvider;
use crate::model::kind::ProviderKind;
use chrono::Utc;
use rand::RngCore;

/// KSUID epoch: 2014-05-13T16:53:20Z.
pub const KSUID_EPOCH_SECS: i64 = 1_400_000_000;
/// Length of the encoded string form.
pub const KSUID_LEN: usize = 27;

const TIMESTAMP_LEN: usize = 4;
const PAYLOAD_LEN: usize = 16;
const RAW_LEN: usize = TIMESTAMP_LEN + PAYLOAD_LEN;
const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, Default)]
pub struct KsuidProvider;

impl IdProvider for KsuidProvider {
    fn name(&self) -> &'static str {
        ProviderKind::Ksuid.as_str()
    }

    fn generate_id(&self) -> String {
        let mut raw = [0u8; RAW_LEN];
        raw[..TIMESTAMP_LEN].copy_from_slice(&ksuid_seconds(Utc::now().timestamp()).to_be_bytes());
        rand::rng().fill_bytes(&mut raw[TIMESTAMP_LEN..]);
        encode_base62(&raw)
    }
}

/// Decodes the Unix timestamp (seconds) embedded in an encoded KSUID.
///
/// Returns `None` when `value` is not a well-formed KSUID string.
pub fn decode_ksuid_timestamp(value: &str) -> Option<i64> {
    let raw = decode_base62(value)?;
    let mut prefix = [0u8; TIMESTAMP_LEN];
    prefix.copy_from_slice(&raw[..TIMESTAMP_LEN]);
    Some(i64::from(u32::from_be_bytes(prefix)) + KSUID_EPOCH_SECS)
}

fn ksuid_seconds(unix_secs: i64) -> u32 {
    // Clamped: the 32-bit field covers 2014..2150.
    u32::try_from(unix_secs.saturating_sub(KSUID_EPOCH_SECS).max(0)).unwrap_or(u32::MAX)
}

fn encode_base62(raw: &[u8; RAW_LEN]) -> String {
    let mut words: Vec<u32> = raw
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    let mut out = [BASE62_ALPHABET[0]; KSUID_LEN];
    let mut pos = KSUID_LEN;

    // Long division of the 160-bit big-endian number by 62, one digit per pass.
    while !words.is_empty() && pos > 0 {
        let mut quotient = Vec::with_capacity(words.len());
        let mut remainder = 0u64;
        for &word in &words {
            let acc = (remainder << 32) | u64::from(word);
            let digit = acc / 62;
            remainder = acc % 62;
            if !quotient.is_empty() || digit != 0 {
                quotient.push(digit as u32);
            }
        }
        pos -= 1;
        out[pos] = BASE62_ALPHABET[remainder as usize];
        words = quotient;
    }

    out.iter().map(|&byte| char::from(byte)).collect()
}

fn decode_base62(value: &str) -> Option<[u8; RAW_LEN]> {
    if value.len() != KSUID_LEN {
        return None;
    }

    let mut words = [0u32; RAW_LEN / 4];
    for byte in value.bytes() {
        let digit = BASE62_ALPHABET.iter().position(|&c| c == byte)? as u64;
        let mut carry = digit;
        for word in words.iter_mut().rev() {
            let acc = u64::from(*word) * 62 + carry;
            *word = acc as u32;
            carry = acc >> 32;
        }
        if carry != 0 {
            return None;
        }
    }

    let mut raw = [0u8; RAW_LEN];
    for (chunk, word) in raw.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    Some(raw)
}
