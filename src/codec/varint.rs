// Variable-length integers
//
// Little-endian base-128: seven payload bits per byte, high bit set on every
// byte except the last. Signed values are zig-zag mapped first so small
// magnitudes of either sign stay short.

/// Longest encoding of a 64-bit value
pub const MAX_VARINT_LEN64: usize = 10;

pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Number of bytes `put_uvarint` writes for `value`
pub fn uvarint_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Write `value` at the start of `buf`, `None` if it does not fit
pub fn put_uvarint(buf: &mut [u8], mut value: u64) -> Option<usize> {
    let mut i = 0;
    while value >= 0x80 {
        *buf.get_mut(i)? = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    *buf.get_mut(i)? = value as u8;
    Some(i + 1)
}

pub fn put_varint(buf: &mut [u8], value: i64) -> Option<usize> {
    put_uvarint(buf, zigzag_encode(value))
}

/// Read a varint from the start of `buf`.
///
/// `None` if no terminating byte appears in `buf` or the value overflows 64 bits.
pub fn read_uvarint(buf: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;
    let mut shift = 0u32;
    for (i, &byte) in buf.iter().enumerate().take(MAX_VARINT_LEN64) {
        if byte < 0x80 {
            if i == MAX_VARINT_LEN64 - 1 && byte > 1 {
                return None;
            }
            return Some((value | (u64::from(byte) << shift), i + 1));
        }
        value |= u64::from(byte & 0x7f) << shift;
        shift += 7;
    }
    None
}

pub fn read_varint(buf: &[u8]) -> Option<(i64, usize)> {
    read_uvarint(buf).map(|(value, len)| (zigzag_decode(value), len))
}
