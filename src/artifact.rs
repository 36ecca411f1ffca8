//! Persisted layout of a compressed input.
//!
//! A code book record followed by a payload record, all integers little-endian:
//!
//! ```text
//! code book: u16 entry count (0..=256)
//!            per entry, ascending symbol order:
//!              u8 symbol, u8 code length in bits (1..=255),
//!              ceil(length / 8) bytes of code, MSB first, zero padded
//! payload:   u8 padding (0..=7), packed bytes
//! ```
//!
//! The combined artifact is the two records back to back. The two-part form
//! keeps them in separate byte buffers, e.g. a `.codebook` file next to the
//! payload.

use crate::bits::Packed;
use crate::code::{Bits, Code, CodeBook};
use crate::error::FormatError;

/// code book plus packed payload, everything needed to decode independently
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Artifact {
    code_book: CodeBook,
    payload: Packed,
}

impl Artifact {
    pub fn new(code_book: CodeBook, payload: Packed) -> Self {
        Artifact { code_book, payload }
    }

    pub fn code_book(&self) -> &CodeBook {
        &self.code_book
    }

    pub fn payload(&self) -> &Packed {
        &self.payload
    }

    /// combined single-buffer layout
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.code_book.to_bytes();
        self.payload.write_to(&mut bytes);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut reader = Reader::new(bytes);
        let code_book = CodeBook::read_from(&mut reader)?;
        let payload = Packed::read_from(&mut reader)?;
        Ok(Artifact { code_book, payload })
    }

    /// two-part layout: (code book record, payload record)
    pub fn to_parts(&self) -> (Vec<u8>, Vec<u8>) {
        let mut payload = Vec::with_capacity(self.payload.bytes().len() + 1);
        self.payload.write_to(&mut payload);
        (self.code_book.to_bytes(), payload)
    }

    pub fn from_parts(code_book: &[u8], payload: &[u8]) -> Result<Self, FormatError> {
        let mut reader = Reader::new(code_book);
        let code_book = CodeBook::read_from(&mut reader)?;
        reader.finish()?;
        let payload = Packed::read_from(&mut Reader::new(payload))?;
        Ok(Artifact { code_book, payload })
    }
}

impl CodeBook {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(self.len() as u16).to_le_bytes());
        for (&symbol, code) in self.iter() {
            bytes.push(symbol);
            bytes.push(code.len() as u8);
            let mut bits = code.bits().to_bitvec();
            bits.resize(code_bytes(code.len()) * 8, false);
            bytes.extend_from_slice(&bits.into_vec());
        }
        bytes
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self, FormatError> {
        let count = u16::from_le_bytes([reader.byte()?, reader.byte()?]);
        if count > 256 {
            return Err(FormatError::TooManyEntries(count));
        }
        let mut pairs = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let symbol = reader.byte()?;
            let len = reader.byte()? as usize;
            let mut bits = Bits::from_slice(reader.take(code_bytes(len))?);
            bits.truncate(len);
            let code = Code::new(bits).ok_or(FormatError::EmptyCode(symbol))?;
            pairs.push((symbol, code));
        }
        CodeBook::from_pairs(pairs)
    }
}

impl Packed {
    fn write_to(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.padding());
        bytes.extend_from_slice(self.bytes());
    }

    /// consumes the rest of the reader
    fn read_from(reader: &mut Reader<'_>) -> Result<Self, FormatError> {
        let padding = reader.byte()?;
        Packed::new(reader.rest().to_vec(), padding)
    }
}

fn code_bytes(bit_len: usize) -> usize {
    (bit_len + 7) / 8
}

/// byte cursor that reports where the input ran short
struct Reader<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, at: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        let left = self.bytes.len() - self.at;
        if left < n {
            return Err(FormatError::UnexpectedEnd {
                at: self.at + left,
                needed: n - left,
            });
        }
        let taken = &self.bytes[self.at..self.at + n];
        self.at += n;
        Ok(taken)
    }

    fn byte(&mut self) -> Result<u8, FormatError> {
        Ok(self.take(1)?[0])
    }

    fn rest(&mut self) -> &'a [u8] {
        let rest = &self.bytes[self.at..];
        self.at = self.bytes.len();
        rest
    }

    fn finish(&self) -> Result<(), FormatError> {
        match self.bytes.len() - self.at {
            0 => Ok(()),
            count => Err(FormatError::TrailingBytes { at: self.at, count }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::pack;

    fn book(pairs: &[(u8, &str)]) -> CodeBook {
        CodeBook::from_pairs(pairs.iter().map(|&(s, c)| (s, c.parse::<Code>().unwrap()))).unwrap()
    }

    #[test]
    fn code_book_layout() {
        let book = book(&[(b'b', "10"), (b'a', "0"), (b'c', "111111111")]);
        assert_eq!(
            book.to_bytes(),
            vec![
                3, 0, //
                b'a', 1, 0b0000_0000, //
                b'b', 2, 0b1000_0000, //
                b'c', 9, 0xff, 0b1000_0000,
            ]
        );
    }

    #[test]
    fn combined_layout() {
        let code_book = book(&[(b'a', "0"), (b'b', "1")]);
        let payload = pack(vec![code_book.get(b'b').unwrap(); 3]);
        let artifact = Artifact { code_book, payload };
        let bytes = artifact.to_bytes();
        assert_eq!(bytes, vec![2, 0, b'a', 1, 0, b'b', 1, 0x80, 5, 0b1110_0000]);
        assert_eq!(Artifact::from_bytes(&bytes).unwrap(), artifact);
    }

    #[test]
    fn empty_artifact() {
        let artifact = Artifact::default();
        assert_eq!(artifact.to_bytes(), vec![0, 0, 0]);
        assert_eq!(Artifact::from_bytes(&[0, 0, 0]).unwrap(), artifact);
    }

    #[test]
    fn split_layout() {
        let code_book = book(&[(b'x', "0")]);
        let payload = pack(vec![code_book.get(b'x').unwrap(); 4]);
        let artifact = Artifact { code_book, payload };
        let (head, body) = artifact.to_parts();
        assert_eq!(head, vec![1, 0, b'x', 1, 0]);
        assert_eq!(body, vec![4, 0]);
        assert_eq!(Artifact::from_parts(&head, &body).unwrap(), artifact);

        let mut long_head = head.clone();
        long_head.push(0);
        assert_eq!(
            Artifact::from_parts(&long_head, &body),
            Err(FormatError::TrailingBytes { at: 5, count: 1 })
        );
    }

    #[test]
    fn premature_end_of_header() {
        assert_eq!(
            Artifact::from_bytes(&[1]),
            Err(FormatError::UnexpectedEnd { at: 1, needed: 1 })
        );
        assert_eq!(
            Artifact::from_bytes(&[1, 0, b'a', 9, 0xff]),
            Err(FormatError::UnexpectedEnd { at: 5, needed: 1 })
        );
        // code book complete, padding byte missing
        assert_eq!(
            Artifact::from_bytes(&[0, 0]),
            Err(FormatError::UnexpectedEnd { at: 2, needed: 1 })
        );
    }

    #[test]
    fn malformed_code_book() {
        assert_eq!(
            Artifact::from_bytes(&[1, 1, 0, 0]),
            Err(FormatError::TooManyEntries(257))
        );
        assert_eq!(
            Artifact::from_bytes(&[1, 0, b'a', 0, 0]),
            Err(FormatError::EmptyCode(b'a'))
        );
        assert_eq!(
            Artifact::from_bytes(&[2, 0, b'a', 1, 0, b'b', 2, 0b0100_0000, 0]),
            Err(FormatError::PrefixConflict(b'b'))
        );
    }

    #[test]
    fn bad_padding() {
        assert_eq!(
            Artifact::from_bytes(&[0, 0, 9, 0]),
            Err(FormatError::PaddingOutOfRange(9))
        );
        assert_eq!(
            Artifact::from_bytes(&[0, 0, 3]),
            Err(FormatError::PaddingWithoutPayload(3))
        );
    }
}
