use std::io;

use thiserror::Error;

/// every failure the codec can report
#[derive(Error, Debug)]
pub enum Error {
    /// the persisted artifact is structurally invalid
    #[error("format: {0}")]
    Format(#[from] FormatError),

    /// the input has a byte the code book cannot encode
    #[error("encoding: {0}")]
    Encoding(#[from] EncodingError),

    /// the payload does not resolve against the code book
    #[error("decoding: {0}")]
    Decoding(#[from] DecodingError),

    /// just relaying io::Error
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// something is wrong with the code book or payload header
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// header ended before `needed` more bytes could be read
    #[error("unexpected end of header at byte {at}, {needed} more byte(s) needed")]
    UnexpectedEnd { at: usize, needed: usize },

    /// bytes left over after a complete record
    #[error("{count} unexpected trailing byte(s) at byte {at}")]
    TrailingBytes { at: usize, count: usize },

    /// padding byte outside 0..=7
    #[error("padding {0} is out of range 0..=7")]
    PaddingOutOfRange(u8),

    /// nonzero padding announced for an empty payload
    #[error("padding {0} given for an empty payload")]
    PaddingWithoutPayload(u8),

    /// a code book cannot hold more than one entry per byte value
    #[error("code book announces {0} entries, at most 256 are possible")]
    TooManyEntries(u16),

    /// same symbol has been associated with another code
    #[error("symbol {0:#04x} is defined twice")]
    DuplicateSymbol(u8),

    /// same code has been associated with another symbol
    #[error("symbol {0:#04x} reuses the code of another symbol")]
    DuplicateCode(u8),

    /// code part of an entry is empty
    #[error("symbol {0:#04x} has an empty code")]
    EmptyCode(u8),

    /// the code of one symbol is a strict prefix of another's
    #[error("code of symbol {0:#04x} collides with a prefix of another code")]
    PrefixConflict(u8),
}

/// an input byte has no code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("byte {symbol:#04x} at {at} has no code")]
    MissingSymbol { symbol: u8, at: usize },
}

/// payload bits do not walk the decode trie to a symbol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodingError {
    /// bit at `at` selects a child that does not exist
    #[error("bit {at} leads to an undefined branch")]
    UndefinedBranch { at: usize },

    /// payload ended while `pending` bits of a code were consumed
    #[error("payload ends mid-code, {pending} dangling bit(s)")]
    Truncated { pending: usize },
}

/// failure to read a code written as a string of 0s and 1s
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCodeError {
    #[error("code is empty")]
    Empty,

    /// there is something other than 0s and 1s in the string
    #[error("non-binary character at {0}")]
    NonBinary(usize),

    /// code is longer than any code a 256 symbol tree can produce
    #[error("code of {0} bits is too long")]
    TooLong(usize),
}
