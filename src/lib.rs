//! Byte-oriented Huffman coding.
//!
//! The whole input is counted first, a Huffman tree is built from the counts
//! and every byte is replaced by its code. The resulting [`Artifact`] holds
//! the code book and the packed payload, and is all [`decode`] needs.
//!
//! ```
//! let packed = huffpack::compress(b"abracadabra").unwrap();
//! assert_eq!(huffpack::decompress(&packed).unwrap(), b"abracadabra");
//! ```

pub mod artifact;
pub mod bits;
pub mod code;
pub mod codec;
pub mod error;
pub mod freq;
pub mod tree;
pub mod trie;

pub use artifact::Artifact;
pub use bits::{pack, unpack, Packed};
pub use code::{Code, CodeBook};
pub use codec::{code_book_of, compress, decode, decompress, encode, encode_with};
pub use error::{DecodingError, EncodingError, Error, FormatError, ParseCodeError, Result};
pub use freq::FrequencyTable;
pub use tree::CodeTree;
pub use trie::Trie;
