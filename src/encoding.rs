use crate::compat::{String, Vec};
use crate::error::{ParamError, Result};
use core::fmt::{self, Write};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode, utf8_percent_encode};

// Unreserved characters per RFC 3986 section 2.3:
// ALPHA / DIGIT / "-" / "." / "_" / "~"

/// Query component percent-encode set
/// Every byte except the unreserved characters, space included
pub const QUERY_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encoding convention applied to parameter names and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Space as `%20`, `~` left as is. Required by signed query protocols.
    #[default]
    Rfc3986,
    /// `application/x-www-form-urlencoded` style: space as `+`
    FormUrlencoded,
}

impl Encoding {
    /// Write one percent-encoded component to `out`
    ///
    /// # Errors
    ///
    /// Only fails if `out` does.
    pub fn write_component<W: Write + ?Sized>(self, out: &mut W, input: &str) -> fmt::Result {
        match self {
            Self::Rfc3986 => write_encoded(out, input),
            Self::FormUrlencoded => {
                for (i, word) in input.split(' ').enumerate() {
                    if i > 0 {
                        out.write_char('+')?;
                    }
                    write_encoded(out, word)?;
                }
                Ok(())
            }
        }
    }

    /// Write percent-encoded component directly to buffer
    pub fn encode_into(self, buffer: &mut String, input: &str) {
        // Reserve space to reduce reallocations
        buffer.reserve(input.len());
        let _ = self.write_component(buffer, input);
    }

    pub fn encode(self, input: &str) -> String {
        let mut buffer = String::new();
        self.encode_into(&mut buffer, input);
        buffer
    }

    /// Decode a percent-encoded component.
    ///
    /// Under [`Encoding::FormUrlencoded`] a `+` decodes to a space.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidPercentEncoding`] when a `%` is not
    /// followed by two hex digits or the decoded bytes are not UTF-8.
    pub fn decode(self, input: &str) -> Result<String> {
        let bytes = input.as_bytes();
        if !has_valid_escapes(bytes) {
            return Err(ParamError::InvalidPercentEncoding);
        }

        let decoded: Vec<u8> = match self {
            Self::FormUrlencoded if memchr::memchr(b'+', bytes).is_some() => {
                let spaced: Vec<u8> = bytes
                    .iter()
                    .map(|&b| if b == b'+' { b' ' } else { b })
                    .collect();
                percent_decode(&spaced).collect()
            }
            _ => percent_decode(bytes).collect(),
        };

        String::from_utf8(decoded).map_err(|_| ParamError::InvalidPercentEncoding)
    }
}

fn write_encoded<W: Write + ?Sized>(out: &mut W, input: &str) -> fmt::Result {
    for chunk in utf8_percent_encode(input, QUERY_COMPONENT_SET) {
        out.write_str(chunk)?;
    }
    Ok(())
}

/// Check that every `%` starts a `%XX` escape
fn has_valid_escapes(bytes: &[u8]) -> bool {
    memchr::memchr_iter(b'%', bytes).all(|pos| {
        bytes
            .get(pos + 1..pos + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3986_encoding() {
        let enc = Encoding::Rfc3986;
        assert_eq!(enc.encode("John Doe"), "John%20Doe");
        assert_eq!(enc.encode("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(enc.encode("1+1=2&x/y"), "1%2B1%3D2%26x%2Fy");
        assert_eq!(enc.encode("é"), "%C3%A9");
        assert_eq!(enc.encode("*"), "%2A");
    }

    #[test]
    fn test_form_encoding() {
        let enc = Encoding::FormUrlencoded;
        assert_eq!(enc.encode("John Doe"), "John+Doe");
        assert_eq!(enc.encode("  "), "++");
        assert_eq!(enc.encode("1+1"), "1%2B1");
    }

    #[test]
    fn test_default_is_rfc3986() {
        assert_eq!(Encoding::default(), Encoding::Rfc3986);
    }

    #[test]
    fn test_decode() {
        assert_eq!(Encoding::Rfc3986.decode("John%20Doe").unwrap(), "John Doe");
        assert_eq!(Encoding::Rfc3986.decode("a+b").unwrap(), "a+b");
        assert_eq!(Encoding::FormUrlencoded.decode("a+b").unwrap(), "a b");
        assert_eq!(Encoding::FormUrlencoded.decode("1%2B1").unwrap(), "1+1");
        assert_eq!(Encoding::Rfc3986.decode("%C3%A9").unwrap(), "é");
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(
            Encoding::Rfc3986.decode("%"),
            Err(ParamError::InvalidPercentEncoding)
        );
        assert_eq!(
            Encoding::Rfc3986.decode("abc%2"),
            Err(ParamError::InvalidPercentEncoding)
        );
        assert_eq!(
            Encoding::Rfc3986.decode("%zz"),
            Err(ParamError::InvalidPercentEncoding)
        );
        // Lone continuation byte
        assert_eq!(
            Encoding::Rfc3986.decode("%80"),
            Err(ParamError::InvalidPercentEncoding)
        );
    }
}
