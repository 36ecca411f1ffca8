use std::collections::{BTreeMap, VecDeque};

use bitvec::prelude::*;
use log::trace;

use crate::code::{Bits, Code, CodeBook};
use crate::freq::FrequencyTable;

/// Huffman tree over the byte values of one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree(Node);

/// used at construction of the code book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: usize,
    },
    Internal {
        weight: usize,
        zero: Box<Node>,
        one: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> usize {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// first argument becomes the zero-child
    fn merge(zero: Node, one: Node) -> Node {
        Node::Internal {
            weight: zero.weight() + one.weight(),
            zero: Box::new(zero),
            one: Box::new(one),
        }
    }
}

impl CodeTree {
    /// creates the Huffman tree of a frequency table
    /// returns None at empty input
    ///
    /// Leaves are queued by ascending `(count, symbol)`, merged nodes are
    /// queued in creation order, which keeps their weights non-decreasing.
    /// The rarer front of the two queues is taken each time, the leaf on a
    /// tie, so identical tables always yield identical trees.
    pub fn new(table: &FrequencyTable) -> Option<Self> {
        let mut counts = table.iter().collect::<Vec<(u8, usize)>>();
        counts.sort_unstable_by_key(|&(symbol, weight)| (weight, symbol));
        // prepare two queues, one filled with sorted leaves
        let mut leaves: VecDeque<Node> = counts
            .into_iter()
            .map(|(symbol, weight)| Node::Leaf { symbol, weight })
            .collect();
        let mut branches: VecDeque<Node> = VecDeque::new();
        loop {
            match (
                pop_rarer(&mut leaves, &mut branches),
                pop_rarer(&mut leaves, &mut branches),
            ) {
                (Some(zero), Some(one)) => {
                    trace!("merge weights {} + {}", zero.weight(), one.weight());
                    branches.push_back(Node::merge(zero, one));
                }
                (Some(root), None) => return Some(CodeTree(root)),
                (None, _) => return None,
            }
        }
    }

    /// count occurrences of each byte and construct the Huffman tree
    pub fn of(bytes: &[u8]) -> Option<Self> {
        Self::new(&FrequencyTable::of(bytes))
    }

    pub fn root(&self) -> &Node {
        &self.0
    }

    /// total number of symbols the tree was built from
    pub fn weight(&self) -> usize {
        self.0.weight()
    }

    /// derive every leaf's code from its path, 0 for zero-child, 1 for one-child
    ///
    /// A tree that is a lone leaf has no path to derive from, so its symbol
    /// is given the one bit code `0`.
    pub fn code_book(&self) -> CodeBook {
        let mut codes = BTreeMap::new();
        match &self.0 {
            Node::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code::from_path(bitvec![u8, Msb0; 0]));
            }
            root => {
                // explicit stack instead of recursion, depth reaches 255
                let mut stack: Vec<(&Node, Bits)> = vec![(root, Bits::new())];
                while let Some((node, path)) = stack.pop() {
                    match node {
                        Node::Leaf { symbol, .. } => {
                            codes.insert(*symbol, Code::from_path(path));
                        }
                        Node::Internal { zero, one, .. } => {
                            let mut one_path = path.clone();
                            one_path.push(true);
                            stack.push((one.as_ref(), one_path));
                            let mut zero_path = path;
                            zero_path.push(false);
                            stack.push((zero.as_ref(), zero_path));
                        }
                    }
                }
            }
        }
        CodeBook::from_map(codes)
    }
}

/// pop the rarer element at the front of two queues, leaves win ties
fn pop_rarer(leaves: &mut VecDeque<Node>, branches: &mut VecDeque<Node>) -> Option<Node> {
    match (leaves.front(), branches.front()) {
        (Some(leaf), Some(branch)) => {
            if leaf.weight() <= branch.weight() {
                leaves.pop_front()
            } else {
                branches.pop_front()
            }
        }
        (Some(_), None) => leaves.pop_front(),
        (None, _) => branches.pop_front(),
    }
}
