//! Byte classification helpers used by the scanner.
//!
//! GN identifiers, numbers, and operators are ASCII; anything else outside
//! a string or comment is either whitespace or an invalid character.

pub const DOUBLE_QUOTE: u8 = b'"';
pub const BACKSLASH: u8 = b'\\';
pub const DOLLAR_SIGN: u8 = b'$';
pub const LINE_FEED: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';

#[inline]
pub fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
pub fn is_identifier_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// Whitespace other than the line feed, which is its own trivia kind.
#[inline]
pub fn is_white_space_single_line(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | CARRIAGE_RETURN | 0x0B | 0x0C)
}

/// Non-ASCII characters treated as whitespace.
#[inline]
pub fn is_unicode_white_space(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

/// Characters that may follow a backslash to form an escape sequence.
#[inline]
pub fn is_escapable(b: u8) -> bool {
    matches!(b, DOUBLE_QUOTE | DOLLAR_SIGN | BACKSLASH)
}
