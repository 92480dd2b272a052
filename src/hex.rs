//! Hex word to byte stream conversion
//!
//! Input data arrives as space-separated hex words of equal width. Each word
//! is turned into bytes according to an [`Endian`]:
//!
//! - [`Endian::Little`]: pairs are taken in the order written. Strict: odd
//!   lengths and non-hex digits are errors.
//! - [`Endian::Big`]: pairs are taken from the right, so `00fa` becomes
//!   `[0xfa, 0x00]`. Lenient: an undecodable pair (or a lone leading digit)
//!   becomes `0x00` and is reported as a [`Diagnostic::HexDigit`].
//!
//! The two paths intentionally disagree on malformed input; callers rely on
//! both behaviors.

use crate::diagnostics::{Diagnostic, Diagnostics};
use std::fmt;
use std::str::FromStr;

/// Byte order of the supplied hex words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    Little,
    #[default]
    Big,
}

impl FromStr for Endian {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "little" => Ok(Endian::Little),
            "big" => Ok(Endian::Big),
            other => Err(HexError::UnknownEndian(other.to_string())),
        }
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endian::Little => write!(f, "little"),
            Endian::Big => write!(f, "big"),
        }
    }
}

/// Fatal hex input errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    /// No hex words were supplied
    Empty,

    /// A word (or word size) with an odd number of digits
    OddLength { word: String, len: usize },

    /// A non-hex digit on the strict path
    InvalidDigit {
        word: String,
        chunk: String,
        position: usize,
    },

    /// Words of different widths in one stream
    InconsistentWordSize {
        expected: usize,
        word: String,
        len: usize,
    },

    /// Neither `little` nor `big`
    UnknownEndian(String),
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexError::Empty => write!(f, "No hex data supplied"),
            HexError::OddLength { word, len } => {
                write!(f, "Invalid word size: '{}' has {} hex digits", word, len)
            }
            HexError::InvalidDigit {
                word,
                chunk,
                position,
            } => {
                write!(
                    f,
                    "Invalid hex digits '{}' at position {} in word '{}'",
                    chunk, position, word
                )
            }
            HexError::InconsistentWordSize {
                expected,
                word,
                len,
            } => {
                write!(
                    f,
                    "Inconsistent word size: '{}' has {} hex digits, expected {}",
                    word, len, expected
                )
            }
            HexError::UnknownEndian(name) => {
                write!(f, "Unknown endianness '{}' (expected 'little' or 'big')", name)
            }
        }
    }
}

impl std::error::Error for HexError {}

/// Convert one hex word into bytes
pub fn hex_to_bytes(
    word: &str,
    endian: Endian,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<u8>, HexError> {
    match endian {
        Endian::Little => bytes_from_hex_little(word),
        Endian::Big => Ok(bytes_from_hex_big(word, diagnostics)),
    }
}

/// Strict, in written order
pub fn bytes_from_hex_little(word: &str) -> Result<Vec<u8>, HexError> {
    let digits: Vec<char> = word.chars().collect();
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength {
            word: word.to_string(),
            len: digits.len(),
        });
    }

    digits
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            decode_pair(pair).ok_or_else(|| HexError::InvalidDigit {
                word: word.to_string(),
                chunk: pair.iter().collect(),
                position: i * 2,
            })
        })
        .collect()
}

/// Lenient, pairs visited from the right
pub fn bytes_from_hex_big(word: &str, diagnostics: &mut Diagnostics) -> Vec<u8> {
    let digits: Vec<char> = word.chars().collect();
    let mut bytes = Vec::with_capacity(digits.len().div_ceil(2));

    let mut end = digits.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        let chunk = &digits[start..end];
        let byte = decode_pair(chunk).unwrap_or_else(|| {
            diagnostics.report(Diagnostic::HexDigit {
                word: word.to_string(),
                chunk: chunk.iter().collect(),
                position: start,
            });
            0
        });
        bytes.push(byte);
        end = start;
    }

    bytes
}

/// Two hex digits to a byte; a lone digit never decodes
fn decode_pair(pair: &[char]) -> Option<u8> {
    match pair {
        [hi, lo] => {
            let hi = hi.to_digit(16)?;
            let lo = lo.to_digit(16)?;
            Some((hi * 16 + lo) as u8)
        }
        _ => None,
    }
}

/// Width in hex digits shared by every word.
///
/// The first word must have an even width and every other word must match it.
pub fn word_size<S: AsRef<str>>(words: &[S]) -> Result<usize, HexError> {
    let first = words.first().ok_or(HexError::Empty)?.as_ref();
    let size = first.chars().count();

    if size % 2 != 0 {
        return Err(HexError::OddLength {
            word: first.to_string(),
            len: size,
        });
    }

    for word in words {
        let word = word.as_ref();
        let len = word.chars().count();
        if len != size {
            return Err(HexError::InconsistentWordSize {
                expected: size,
                word: word.to_string(),
                len,
            });
        }
    }

    Ok(size)
}

/// The concatenated bytes of one or more equal-width hex words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteStream {
    bytes: Vec<u8>,
    word_size: usize,
}

impl ByteStream {
    /// Check word widths, then convert and concatenate every word
    pub fn from_words<S: AsRef<str>>(
        words: &[S],
        endian: Endian,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, HexError> {
        let word_size = word_size(words)?;

        let mut bytes = Vec::with_capacity(words.len() * word_size / 2);
        for word in words {
            bytes.extend(hex_to_bytes(word.as_ref(), endian, diagnostics)?);
        }

        Ok(ByteStream { bytes, word_size })
    }

    /// Split `input` on whitespace and build a stream from the words
    pub fn parse(input: &str, endian: Endian, diagnostics: &mut Diagnostics) -> Result<Self, HexError> {
        let words: Vec<&str> = input.split_whitespace().collect();
        Self::from_words(&words, endian, diagnostics)
    }

    /// An empty stream, for viewing a layout without data
    pub fn empty() -> Self {
        ByteStream {
            bytes: Vec::new(),
            word_size: 0,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex digits per word
    pub fn word_size(&self) -> usize {
        self.word_size
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticConfig;
    use proptest::prelude::*;
    use rstest::rstest;

    fn quiet() -> Diagnostics {
        Diagnostics::new(DiagnosticConfig { echo: false })
    }

    #[rstest]
    #[case("00", &[0x00], 0)]
    #[case("10", &[0x10], 0)]
    #[case("ab", &[0xab], 0)]
    #[case("ba", &[0xba], 0)]
    #[case("ff", &[0xff], 0)]
    #[case("0$", &[0x00], 1)]
    #[case("xx", &[0x00], 1)]
    #[case("fx", &[0x00], 1)]
    #[case("00fa", &[0xfa, 0x00], 0)]
    #[case("0fa0", &[0xa0, 0x0f], 0)]
    #[case("f00a", &[0x0a, 0xf0], 0)]
    #[case("fa00", &[0x00, 0xfa], 0)]
    #[case("faff", &[0xff, 0xfa], 0)]
    #[case("0c0d0e", &[0x0e, 0x0d, 0x0c], 0)]
    #[case("0e0d0c", &[0x0c, 0x0d, 0x0e], 0)]
    #[case("e0d0c0", &[0xc0, 0xd0, 0xe0], 0)]
    #[case("fffefd", &[0xfd, 0xfe, 0xff], 0)]
    #[case("00010203", &[0x03, 0x02, 0x01, 0x00], 0)]
    #[case("03020100", &[0x00, 0x01, 0x02, 0x03], 0)]
    #[case("f3e2d1c0", &[0xc0, 0xd1, 0xe2, 0xf3], 0)]
    #[case("abc", &[0xbc, 0x00], 1)]
    fn test_big_endian(#[case] word: &str, #[case] expected: &[u8], #[case] warnings: usize) {
        let mut diagnostics = quiet();
        let bytes = hex_to_bytes(word, Endian::Big, &mut diagnostics).unwrap();
        assert_eq!(bytes, expected);
        assert_eq!(diagnostics.len(), warnings);
    }

    #[test]
    fn test_big_endian_diagnostic_names_chunk() {
        let mut diagnostics = quiet();
        bytes_from_hex_big("12zz", &mut diagnostics);
        assert_eq!(
            diagnostics.entries(),
            &[Diagnostic::HexDigit {
                word: "12zz".to_string(),
                chunk: "zz".to_string(),
                position: 2,
            }]
        );
    }

    #[test]
    fn test_little_endian() {
        assert_eq!(bytes_from_hex_little("00fa").unwrap(), vec![0x00, 0xfa]);
        assert_eq!(bytes_from_hex_little("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_little_endian_is_strict() {
        assert_eq!(
            bytes_from_hex_little("abc"),
            Err(HexError::OddLength {
                word: "abc".to_string(),
                len: 3,
            })
        );
        assert_eq!(
            bytes_from_hex_little("00x1"),
            Err(HexError::InvalidDigit {
                word: "00x1".to_string(),
                chunk: "x1".to_string(),
                position: 2,
            })
        );
        assert!(bytes_from_hex_little("+f").is_err());
    }

    #[test]
    fn test_word_size() {
        assert_eq!(word_size(&["0011", "2233"]), Ok(4));
        assert_eq!(word_size::<&str>(&[]), Err(HexError::Empty));
        assert!(matches!(
            word_size(&["001", "223"]),
            Err(HexError::OddLength { len: 3, .. })
        ));
        assert!(matches!(
            word_size(&["0011", "22"]),
            Err(HexError::InconsistentWordSize {
                expected: 4,
                len: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_stream_concatenates_words() {
        let mut diagnostics = quiet();
        let stream = ByteStream::parse("00fa 0102", Endian::Big, &mut diagnostics).unwrap();
        assert_eq!(stream.bytes(), &[0xfa, 0x00, 0x02, 0x01]);
        assert_eq!(stream.word_size(), 4);

        let stream = ByteStream::parse("00fa 0102", Endian::Little, &mut diagnostics).unwrap();
        assert_eq!(stream.bytes(), &[0x00, 0xfa, 0x01, 0x02]);
    }

    #[test]
    fn test_endian_from_str() {
        assert_eq!("little".parse::<Endian>(), Ok(Endian::Little));
        assert_eq!("big".parse::<Endian>(), Ok(Endian::Big));
        assert!("middle".parse::<Endian>().is_err());
    }

    proptest! {
        #[test]
        fn prop_big_endian_reverses_little(word in "([0-9a-fA-F]{2}){0,8}") {
            let mut diagnostics = quiet();
            let mut little = bytes_from_hex_little(&word).unwrap();
            little.reverse();
            prop_assert_eq!(bytes_from_hex_big(&word, &mut diagnostics), little);
            prop_assert!(diagnostics.is_empty());
        }

        #[test]
        fn prop_big_endian_never_fails(word in ".{0,12}") {
            let mut diagnostics = quiet();
            let bytes = bytes_from_hex_big(&word, &mut diagnostics);
            prop_assert_eq!(bytes.len(), word.chars().count().div_ceil(2));
        }
    }
}
