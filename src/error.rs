use std::error;
use std::fmt;
use std::io;

/// Errors produced by the compressor and decompressor.
#[derive(Debug)]
pub enum Error {
    /// The underlying source or sink failed.
    Io(io::Error),
    /// The compressed stream ended in the middle of a control-byte
    /// follow-up or a back-reference pair.
    TruncatedInput,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => err.fmt(f),
            Error::TruncatedInput => write!(f, "truncated compressed input"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::TruncatedInput => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
