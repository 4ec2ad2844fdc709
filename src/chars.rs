//! Character classes of [RFC 5234](https://datatracker.ietf.org/doc/html/rfc5234)
//! and [RFC 7230](https://datatracker.ietf.org/doc/html/rfc7230).

pub const SP: u8 = b' ';
pub const HTAB: u8 = b'\t';

/// ALPHA = %x41-5A / %x61-7A
#[inline]
pub const fn is_alpha(ch: u8) -> bool {
    matches!(ch, b'A'..=b'Z' | b'a'..=b'z')
}

/// DIGIT = %x30-39
#[inline]
pub const fn is_digit(ch: u8) -> bool {
    matches!(ch, b'0'..=b'9')
}

/// SP / HTAB
#[inline]
pub const fn is_space(ch: u8) -> bool {
    ch == SP || ch == HTAB
}

/// VCHAR = %x21-7E
#[inline]
pub const fn is_vchar(ch: u8) -> bool {
    matches!(ch, 0x21..=0x7e)
}

/// obs-text = %x80-FF
#[inline]
pub const fn is_obs_text(ch: u8) -> bool {
    ch >= 0x80
}

/// qdtext = HTAB / SP / %x21 / %x23-5B / %x5D-7E / obs-text
#[inline]
pub const fn is_qdtext(ch: u8) -> bool {
    matches!(ch, SP | HTAB | b'!' | 0x23..=0x5b | 0x5d..=0x7e) || is_obs_text(ch)
}

/// tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*"
///       / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
///       / DIGIT / ALPHA
#[inline]
pub const fn is_token_char(ch: u8) -> bool {
    matches!(
        ch,
        b'!' | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'\''
            | b'*'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~'
    ) || is_alpha(ch)
        || is_digit(ch)
}
