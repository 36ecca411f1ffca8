use log::debug;

use crate::artifact::Artifact;
use crate::bits::{pack, Packed};
use crate::code::{Code, CodeBook};
use crate::error::{EncodingError, Result};
use crate::freq::FrequencyTable;
use crate::tree::CodeTree;
use crate::trie::Trie;

/// count, build the tree, derive codes and pack every input byte's code
///
/// Empty input yields an empty code book and an empty payload.
pub fn encode(input: &[u8]) -> Result<Artifact> {
    let table = FrequencyTable::of(input);
    let code_book = CodeTree::new(&table)
        .map(|tree| tree.code_book())
        .unwrap_or_default();
    let payload = encode_with(&code_book, input)?;
    debug!(
        "encoded {} byte(s), {} distinct, into {} bit(s)",
        table.total(),
        code_book.len(),
        payload.bit_len()
    );
    Ok(Artifact::new(code_book, payload))
}

/// pack the code of every byte of `input`, failing on the first byte
/// `code_book` has no code for
pub fn encode_with(code_book: &CodeBook, input: &[u8]) -> Result<Packed, EncodingError> {
    let codes = input
        .iter()
        .enumerate()
        .map(|(at, &symbol)| {
            code_book
                .get(symbol)
                .ok_or(EncodingError::MissingSymbol { symbol, at })
        })
        .collect::<Result<Vec<&Code>, EncodingError>>()?;
    Ok(pack(codes))
}

/// rebuild the decode trie and walk the payload through it
pub fn decode(artifact: &Artifact) -> Result<Vec<u8>> {
    let trie = Trie::from_code_book(artifact.code_book())?;
    let bits = artifact.payload().unpack();
    let decoded = trie.decode(&bits)?;
    debug!(
        "decoded {} bit(s) into {} byte(s)",
        bits.len(),
        decoded.len()
    );
    Ok(decoded)
}

/// `encode` straight to the combined layout
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    Ok(encode(input)?.to_bytes())
}

/// `decode` straight from the combined layout
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    decode(&Artifact::from_bytes(bytes)?)
}

/// code book an input would be encoded with, without packing anything
pub fn code_book_of(input: &[u8]) -> CodeBook {
    CodeTree::of(input)
        .map(|tree| tree.code_book())
        .unwrap_or_default()
}
