use bitvec::prelude::*;

use crate::code::{Bits, Code};
use crate::error::FormatError;

/// a bitstream packed most-significant-bit first into bytes
///
/// The last byte is filled up with `padding` zero bits, so
/// `8 * bytes.len() - padding` is the length of the logical stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Packed {
    bytes: Vec<u8>,
    padding: u8,
}

impl Packed {
    /// checks `padding` against the byte count before accepting them
    pub fn new(bytes: Vec<u8>, padding: u8) -> Result<Self, FormatError> {
        if padding > 7 {
            return Err(FormatError::PaddingOutOfRange(padding));
        }
        if bytes.is_empty() && padding != 0 {
            return Err(FormatError::PaddingWithoutPayload(padding));
        }
        Ok(Packed { bytes, padding })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn padding(&self) -> u8 {
        self.padding
    }

    /// number of meaningful bits
    pub fn bit_len(&self) -> usize {
        8 * self.bytes.len() - self.padding as usize
    }

    /// expand back into the logical bitstream, trailing padding dropped
    pub fn unpack(&self) -> Bits {
        let mut bits = Bits::from_slice(&self.bytes);
        bits.truncate(self.bit_len());
        bits
    }
}

/// concatenate codes in order and pack them into bytes
pub fn pack<'a, I>(codes: I) -> Packed
where
    I: IntoIterator<Item = &'a Code>,
{
    let mut bits = Bits::new();
    for code in codes {
        bits.extend_from_bitslice(code.bits());
    }
    let padding = (8 - bits.len() % 8) % 8;
    bits.resize(bits.len() + padding, false);
    Packed {
        bytes: bits.into_vec(),
        padding: padding as u8,
    }
}

/// inverse of `pack`, on raw parts read from storage
pub fn unpack(bytes: &[u8], padding: u8) -> Result<Bits, FormatError> {
    Ok(Packed::new(bytes.to_vec(), padding)?.unpack())
}
