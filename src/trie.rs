use bitvec::prelude::*;

use crate::code::CodeBook;
use crate::error::{DecodingError, FormatError};

/// decode tree rebuilt from a code book
///
/// Unlike a Huffman tree, a branch may miss a child: the tree of a single
/// symbol code book only has a zero-child.
#[derive(Debug, Default)]
pub struct Trie {
    root: Branch,
}

#[derive(Debug, Default)]
struct Branch {
    /// indexed by bit, 0 = zero-child, 1 = one-child
    children: [Option<Box<Slot>>; 2],
}

#[derive(Debug)]
enum Slot {
    Leaf(u8),
    Branch(Branch),
}

impl Trie {
    /// insert each code as a path from the root, ending in its symbol
    pub fn from_code_book(book: &CodeBook) -> Result<Self, FormatError> {
        let mut trie = Trie::default();
        for (&symbol, code) in book.iter() {
            let (last, init) = match code.bits().split_last() {
                Some(split) => split,
                None => return Err(FormatError::EmptyCode(symbol)),
            };
            let mut branch = &mut trie.root;
            for bit in init.iter().by_vals() {
                let slot = branch.children[bit as usize]
                    .get_or_insert_with(|| Box::new(Slot::Branch(Branch::default())));
                branch = match slot.as_mut() {
                    Slot::Branch(next) => next,
                    // an existing code ends here, so it prefixes this one
                    Slot::Leaf(_) => return Err(FormatError::PrefixConflict(symbol)),
                };
            }
            let last = *last as usize;
            if let Some(slot) = &branch.children[last] {
                return Err(match slot.as_ref() {
                    Slot::Leaf(_) => FormatError::DuplicateCode(symbol),
                    Slot::Branch(_) => FormatError::PrefixConflict(symbol),
                });
            }
            branch.children[last] = Some(Box::new(Slot::Leaf(symbol)));
        }
        Ok(trie)
    }

    /// walk the trie bit by bit, emitting a symbol and restarting at the
    /// root each time a leaf is reached
    ///
    /// Either every bit resolves and all symbols are returned, or nothing is.
    pub fn decode(&self, bits: &BitSlice<u8, Msb0>) -> Result<Vec<u8>, DecodingError> {
        let mut decoded = Vec::new();
        let mut branch = &self.root;
        let mut pending = 0;
        for (at, bit) in bits.iter().by_vals().enumerate() {
            match branch.children[bit as usize].as_deref() {
                None => return Err(DecodingError::UndefinedBranch { at }),
                Some(Slot::Leaf(symbol)) => {
                    decoded.push(*symbol);
                    branch = &self.root;
                    pending = 0;
                }
                Some(Slot::Branch(next)) => {
                    branch = next;
                    pending += 1;
                }
            }
        }
        if pending > 0 {
            return Err(DecodingError::Truncated { pending });
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Code;

    fn book(pairs: &[(u8, &str)]) -> CodeBook {
        CodeBook::from_pairs(pairs.iter().map(|&(s, c)| (s, c.parse::<Code>().unwrap()))).unwrap()
    }

    fn bits(s: &str) -> BitVec<u8, Msb0> {
        s.bytes().map(|b| b == b'1').collect()
    }

    #[test]
    fn walks_codes() {
        let trie = Trie::from_code_book(&book(&[(b'a', "0"), (b'b', "10"), (b'c', "11")])).unwrap();
        assert_eq!(trie.decode(&bits("0101100")).unwrap(), b"abcaa");
    }

    #[test]
    fn single_symbol_rejects_one_bit() {
        let trie = Trie::from_code_book(&book(&[(b'x', "0")])).unwrap();
        assert_eq!(trie.decode(&bits("000")).unwrap(), b"xxx");
        assert_eq!(
            trie.decode(&bits("001")),
            Err(DecodingError::UndefinedBranch { at: 2 })
        );
    }

    #[test]
    fn dangling_bits() {
        let trie = Trie::from_code_book(&book(&[(b'a', "0"), (b'b', "10"), (b'c', "11")])).unwrap();
        assert_eq!(
            trie.decode(&bits("01")),
            Err(DecodingError::Truncated { pending: 1 })
        );
    }

    #[test]
    fn empty_book_decodes_nothing() {
        let trie = Trie::from_code_book(&CodeBook::default()).unwrap();
        assert!(trie.decode(&bits("")).unwrap().is_empty());
        assert_eq!(
            trie.decode(&bits("0")),
            Err(DecodingError::UndefinedBranch { at: 0 })
        );
    }

    #[test]
    fn longer_code_under_a_leaf() {
        let err = CodeBook::from_pairs(vec![
            (b'a', "01".parse::<Code>().unwrap()),
            (b'b', "0".parse::<Code>().unwrap()),
        ]);
        // symbols are inserted in ascending order, `b` lands on a's branch
        assert_eq!(err, Err(FormatError::PrefixConflict(b'b')));
    }
}
