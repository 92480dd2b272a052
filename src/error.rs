//! Crate-level error type
//!
//! Wraps the per-stage errors so a caller driving the whole pipeline can still
//! tell a malformed declaration from bad hex input or a short byte stream.

use crate::binder::BindError;
use crate::hex::HexError;
use crate::parser::ParseError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    Parse(ParseError),
    Hex(HexError),
    Bind(BindError),
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::Hex(e) => write!(f, "Hex data error: {}", e),
            Error::Bind(e) => write!(f, "Bind error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Hex(e) => Some(e),
            Error::Bind(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<HexError> for Error {
    fn from(err: HexError) -> Self {
        Error::Hex(err)
    }
}

impl From<BindError> for Error {
    fn from(err: BindError) -> Self {
        Error::Bind(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
