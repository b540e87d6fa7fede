//! UTF-8 code point encoding and decoding.

use core::{fmt, ops::Deref};

const CONT_MASK: u8 = 0b0011_1111;
const TAG_CONT: u8 = 0b1000_0000;
const TAG_TWO_B: u8 = 0b1100_0000;
const TAG_THREE_B: u8 = 0b1110_0000;
const TAG_FOUR_B: u8 = 0b1111_0000;

/// The UTF-8 encoding of a single code point, 1 to 4 bytes long.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Utf8Bytes {
    buf: [u8; 4],
    len: u8,
}

impl Utf8Bytes {
    /// Returns the encoded bytes.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl Deref for Utf8Bytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Debug for Utf8Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

/// Encodes a code point as UTF-8.
///
/// Any value up to `0x10FFFF` is laid out with the standard 1 to 4 byte
/// pattern. Surrogates are encoded like any other 3-byte value.
///
/// # Examples
///
/// ```
/// use uri_transform::utf8;
///
/// assert_eq!(&*utf8::encode('A' as u32), b"A");
/// assert_eq!(&*utf8::encode('é' as u32), b"\xC3\xA9");
/// assert_eq!(&*utf8::encode(0x1F600), b"\xF0\x9F\x98\x80");
/// ```
#[must_use]
pub const fn encode(x: u32) -> Utf8Bytes {
    let mut buf = [0; 4];
    let len = if x < 0x80 {
        buf[0] = x as u8;
        1
    } else if x < 0x800 {
        buf[0] = (x >> 6) as u8 | TAG_TWO_B;
        buf[1] = (x as u8 & CONT_MASK) | TAG_CONT;
        2
    } else if x < 0x10000 {
        buf[0] = (x >> 12) as u8 | TAG_THREE_B;
        buf[1] = ((x >> 6) as u8 & CONT_MASK) | TAG_CONT;
        buf[2] = (x as u8 & CONT_MASK) | TAG_CONT;
        3
    } else {
        buf[0] = ((x >> 18) as u8 & 0b0000_0111) | TAG_FOUR_B;
        buf[1] = ((x >> 12) as u8 & CONT_MASK) | TAG_CONT;
        buf[2] = ((x >> 6) as u8 & CONT_MASK) | TAG_CONT;
        buf[3] = (x as u8 & CONT_MASK) | TAG_CONT;
        4
    };
    Utf8Bytes { buf, len }
}

#[inline]
const fn utf8_first_byte(byte: u8, width: u32) -> u32 {
    (byte & (0x7F >> width)) as u32
}

#[inline]
const fn utf8_acc_cont_byte(ch: u32, byte: u8) -> u32 {
    (ch << 6) | (byte & CONT_MASK) as u32
}

/// Decodes the code point starting at index `i` of valid UTF-8 bytes,
/// returning it along with its width in bytes.
///
/// # Panics
///
/// Panics if `i` is out of bounds or the sequence starting at `i` is truncated.
/// This never happens when `bytes` comes from a `str` and `i` is a char boundary.
///
/// # Examples
///
/// ```
/// use uri_transform::utf8;
///
/// let s = "a€";
/// assert_eq!(utf8::next_code_point(s.as_bytes(), 0), ('a' as u32, 1));
/// assert_eq!(utf8::next_code_point(s.as_bytes(), 1), ('€' as u32, 3));
/// ```
#[inline(always)]
#[must_use]
pub const fn next_code_point(bytes: &[u8], i: usize) -> (u32, usize) {
    let x = bytes[i];
    if x < 128 {
        return (x as u32, 1);
    }

    let init = utf8_first_byte(x, 2);
    let y = bytes[i + 1];
    if x < 0xE0 {
        (utf8_acc_cont_byte(init, y), 2)
    } else {
        let z = bytes[i + 2];
        let y_z = utf8_acc_cont_byte((y & CONT_MASK) as u32, z);
        if x < 0xF0 {
            ((init << 12) | y_z, 3)
        } else {
            let w = bytes[i + 3];
            (((init & 7) << 18) | utf8_acc_cont_byte(y_z, w), 4)
        }
    }
}
