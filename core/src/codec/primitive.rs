//! Fixed-width integers, booleans, characters, strings, and compact integers.
//!
//! Every decoder takes the remaining input and returns the decoded value
//! together with the bytes that follow it. Encoders append to `out`.

use crate::{Error, Result};
use smallvec::SmallVec;

/// Encoded compact integer. The largest encoding is one length byte plus
/// sixteen payload bytes.
pub type CompactBytes = SmallVec<[u8; 17]>;

const MODE_SINGLE: u8 = 0b00;
const MODE_TWO: u8 = 0b01;
const MODE_FOUR: u8 = 0b10;
const MODE_BIG: u8 = 0b11;

const MAX_SINGLE: u128 = (1 << 6) - 1;
const MAX_TWO: u128 = (1 << 14) - 1;
const MAX_FOUR: u128 = (1 << 30) - 1;

/// Splits `n` bytes off the front of `bytes`.
pub fn take(bytes: &[u8], n: usize) -> Result<(&[u8], &[u8])> {
    if bytes.len() < n {
        return Err(Error::NotEnoughBytes {
            needed: n,
            available: bytes.len(),
        });
    }
    Ok(bytes.split_at(n))
}

fn take_array<const N: usize>(bytes: &[u8]) -> Result<([u8; N], &[u8])> {
    let (head, rest) = take(bytes, N)?;
    let mut array = [0u8; N];
    array.copy_from_slice(head);
    Ok((array, rest))
}

fn check_width(bits: u32) {
    debug_assert!(
        matches!(bits, 8 | 16 | 32 | 64 | 128),
        "unsupported integer width {bits}"
    );
}

// ============================================================================
// Fixed-width integers
// ============================================================================

/// Decodes a little-endian unsigned integer of `bits` width (8..=128).
pub fn decode_uint(bits: u32, bytes: &[u8]) -> Result<(u128, &[u8])> {
    check_width(bits);
    let width = (bits / 8) as usize;
    let (head, rest) = take(bytes, width)?;
    let mut buf = [0u8; 16];
    buf[..width].copy_from_slice(head);
    Ok((u128::from_le_bytes(buf), rest))
}

/// Decodes a little-endian two's complement integer of `bits` width (8..=128).
pub fn decode_int(bits: u32, bytes: &[u8]) -> Result<(i128, &[u8])> {
    let (raw, rest) = decode_uint(bits, bytes)?;
    let shift = 128 - bits;
    Ok((((raw as i128) << shift) >> shift, rest))
}

/// Decodes a 256-bit integer as its raw 32 little-endian bytes.
pub fn decode_wide(bytes: &[u8]) -> Result<([u8; 32], &[u8])> {
    take_array::<32>(bytes)
}

pub fn encode_uint(bits: u32, n: u128, out: &mut Vec<u8>) -> Result<()> {
    check_width(bits);
    if bits < 128 && n >> bits != 0 {
        return Err(Error::invalid_value(format!("u{bits}"), n));
    }
    out.extend_from_slice(&n.to_le_bytes()[..(bits / 8) as usize]);
    Ok(())
}

pub fn encode_int(bits: u32, n: i128, out: &mut Vec<u8>) -> Result<()> {
    check_width(bits);
    if bits < 128 {
        let max = (1i128 << (bits - 1)) - 1;
        let min = -(1i128 << (bits - 1));
        if n < min || n > max {
            return Err(Error::invalid_value(format!("i{bits}"), n));
        }
    }
    out.extend_from_slice(&(n as u128).to_le_bytes()[..(bits / 8) as usize]);
    Ok(())
}

/// Zero-extends an unsigned integer to 256 bits.
pub fn widen_unsigned(n: u128) -> [u8; 32] {
    let mut wide = [0u8; 32];
    wide[..16].copy_from_slice(&n.to_le_bytes());
    wide
}

/// Sign-extends a signed integer to 256 bits.
pub fn widen_signed(n: i128) -> [u8; 32] {
    let fill = if n < 0 { 0xff } else { 0x00 };
    let mut wide = [fill; 32];
    wide[..16].copy_from_slice(&n.to_le_bytes());
    wide
}

// ============================================================================
// Booleans and characters
// ============================================================================

pub fn decode_bool(bytes: &[u8]) -> Result<(bool, &[u8])> {
    let ([byte], rest) = take_array::<1>(bytes)?;
    match byte {
        0 => Ok((false, rest)),
        1 => Ok((true, rest)),
        other => Err(Error::InvalidBytes {
            ty: "bool",
            reason: format!("byte {other:#04x} is neither 0 nor 1"),
        }),
    }
}

pub fn encode_bool(b: bool, out: &mut Vec<u8>) {
    out.push(b as u8);
}

/// Characters travel as their `u32` scalar value.
pub fn decode_char(bytes: &[u8]) -> Result<(char, &[u8])> {
    let (raw, rest) = take_array::<4>(bytes)?;
    let scalar = u32::from_le_bytes(raw);
    let c = char::from_u32(scalar).ok_or_else(|| Error::InvalidBytes {
        ty: "char",
        reason: format!("{scalar:#x} is not a unicode scalar value"),
    })?;
    Ok((c, rest))
}

pub fn encode_char(c: char, out: &mut Vec<u8>) {
    out.extend_from_slice(&(c as u32).to_le_bytes());
}

// ============================================================================
// Compact integers
// ============================================================================
//
// The low two bits of the first byte select the mode:
//   0b00  single byte, value in the upper six bits
//   0b01  two bytes LE, value in the upper fourteen bits
//   0b10  four bytes LE, value in the upper thirty bits
//   0b11  upper six bits hold (byte length - 4), raw LE bytes follow

pub fn decode_compact(bytes: &[u8]) -> Result<(u128, &[u8])> {
    let Some(&first) = bytes.first() else {
        return Err(Error::NotEnoughBytes {
            needed: 1,
            available: 0,
        });
    };

    match first & 0b11 {
        MODE_SINGLE => Ok(((first >> 2) as u128, &bytes[1..])),
        MODE_TWO => {
            let (raw, rest) = take_array::<2>(bytes)?;
            Ok(((u16::from_le_bytes(raw) >> 2) as u128, rest))
        }
        MODE_FOUR => {
            let (raw, rest) = take_array::<4>(bytes)?;
            Ok(((u32::from_le_bytes(raw) >> 2) as u128, rest))
        }
        _ => {
            let len = (first >> 2) as usize + 4;
            if len > 16 {
                return Err(Error::InvalidBytes {
                    ty: "compact",
                    reason: format!("{len}-byte payload exceeds 128 bits"),
                });
            }
            let (payload, rest) = take(&bytes[1..], len)?;
            let mut buf = [0u8; 16];
            buf[..len].copy_from_slice(payload);
            Ok((u128::from_le_bytes(buf), rest))
        }
    }
}

/// Encodes `n` with the smallest mode that holds it.
pub fn encode_compact(n: u128) -> CompactBytes {
    let mut buf = CompactBytes::new();
    match n {
        0..=MAX_SINGLE => buf.push((n as u8) << 2 | MODE_SINGLE),
        0..=MAX_TWO => buf.extend_from_slice(&((n as u16) << 2 | MODE_TWO as u16).to_le_bytes()),
        0..=MAX_FOUR => {
            buf.extend_from_slice(&((n as u32) << 2 | MODE_FOUR as u32).to_le_bytes())
        }
        _ => {
            let len = (128 - n.leading_zeros()).div_ceil(8) as usize;
            buf.push(((len - 4) as u8) << 2 | MODE_BIG);
            buf.extend_from_slice(&n.to_le_bytes()[..len]);
        }
    }
    buf
}

pub fn encode_compact_to(n: u128, out: &mut Vec<u8>) {
    out.extend_from_slice(&encode_compact(n));
}

/// Compact length prefix as a `usize`, rejecting lengths that cannot be
/// satisfied by the remaining input.
pub fn decode_length(bytes: &[u8]) -> Result<(usize, &[u8])> {
    let (len, rest) = decode_compact(bytes)?;
    let len = usize::try_from(len).map_err(|_| Error::InvalidBytes {
        ty: "length prefix",
        reason: format!("{len} does not fit in memory"),
    })?;
    Ok((len, rest))
}

// ============================================================================
// Byte strings and text
// ============================================================================

/// Compact-length-prefixed byte run.
pub fn decode_bytes(bytes: &[u8]) -> Result<(&[u8], &[u8])> {
    let (len, rest) = decode_length(bytes)?;
    take(rest, len)
}

pub fn encode_bytes(data: &[u8], out: &mut Vec<u8>) {
    encode_compact_to(data.len() as u128, out);
    out.extend_from_slice(data);
}

/// Compact-length-prefixed UTF-8 string.
pub fn decode_str(bytes: &[u8]) -> Result<(&str, &[u8])> {
    let (raw, rest) = decode_bytes(bytes)?;
    let s = core::str::from_utf8(raw).map_err(|err| Error::InvalidBytes {
        ty: "str",
        reason: err.to_string(),
    })?;
    Ok((s, rest))
}

pub fn encode_str(s: &str, out: &mut Vec<u8>) {
    encode_bytes(s.as_bytes(), out);
}
