use std::cmp::Ordering;
use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::error::{FormatError, ParseCodeError};
use crate::freq::FrequencyTable;

/// codes of a tree over at most 256 leaves never exceed this many bits
pub const MAX_CODE_LEN: usize = 255;

pub type Bits = BitVec<u8, Msb0>;

/// a non-empty prefix code, first bit first
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Code(Bits);

impl Code {
    /// None when `bits` is empty or longer than `MAX_CODE_LEN`
    pub fn new(bits: Bits) -> Option<Self> {
        if bits.is_empty() || bits.len() > MAX_CODE_LEN {
            None
        } else {
            Some(Code(bits))
        }
    }

    /// a root-to-leaf path of a tree over at most 256 leaves, 1..=255 bits
    pub(crate) fn from_path(bits: Bits) -> Self {
        debug_assert!(!bits.is_empty() && bits.len() <= MAX_CODE_LEN);
        Code(bits)
    }

    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// false for every constructed code, kept for the `len` convention
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// true when `self` is a (not necessarily strict) prefix of `other`
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(self.0.as_bitslice())
    }
}

/// bit by bit, a code sorts before every code it prefixes
impl Ord for Code {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().by_vals().cmp(other.0.iter().by_vals())
    }
}

impl PartialOrd for Code {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for bit in self.0.iter().by_vals() {
            write!(f, "{}", if bit { 1 } else { 0 })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = ParseCodeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ParseCodeError::*;
        if let Some(pos) = s.bytes().position(|byte| byte != b'0' && byte != b'1') {
            return Err(NonBinary(pos));
        }
        let bits: Bits = s.bytes().map(|byte| byte == b'1').collect();
        match bits.len() {
            0 => Err(Empty),
            len if len > MAX_CODE_LEN => Err(TooLong(len)),
            _ => Ok(Code(bits)),
        }
    }
}

/// symbol to code mapping, iterated in ascending symbol order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBook {
    codes: BTreeMap<u8, Code>,
}

impl CodeBook {
    /// build a code book from untrusted pairs
    ///
    /// Rejects a symbol listed twice, and any pair of codes where one is a
    /// prefix of the other.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = (u8, Code)>,
    {
        let mut codes = BTreeMap::new();
        for (symbol, code) in pairs {
            if codes.insert(symbol, code).is_some() {
                return Err(FormatError::DuplicateSymbol(symbol));
            }
        }
        // in lexicographic order a code is directly followed by the codes it prefixes
        let mut sorted: Vec<(&Code, u8)> = codes
            .iter()
            .map(|(&symbol, code)| (code, symbol))
            .collect();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            let ((shorter, a), (longer, b)) = (pair[0], pair[1]);
            if shorter.is_prefix_of(longer) {
                let symbol = a.max(b);
                return Err(if shorter.len() == longer.len() {
                    FormatError::DuplicateCode(symbol)
                } else {
                    FormatError::PrefixConflict(symbol)
                });
            }
        }
        Ok(CodeBook { codes })
    }

    /// caller guarantees the codes are prefix-free
    pub(crate) fn from_map(codes: BTreeMap<u8, Code>) -> Self {
        CodeBook { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, u8, Code> {
        self.codes.iter()
    }

    /// exact size of the payload these codes give an input with `table`'s counts
    ///
    /// None if the table has a symbol missing from the book.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> Option<usize> {
        table.iter().try_fold(0usize, |acc, (symbol, count)| {
            self.get(symbol).map(|code| acc + code.len() * count)
        })
    }
}

/// Each symbol-code relation is newline separated, and is represented by a
/// tab separated pair of the escaped symbol and its code.
impl fmt::Display for CodeBook {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let mut line_sep = false;
        for (&symbol, code) in self.iter() {
            if line_sep {
                writeln!(f)?;
            }
            line_sep = true;
            write!(f, "{}\t{}", std::ascii::escape_default(symbol), code)?;
        }
        Ok(())
    }
}
