use std::{cmp::Reverse, collections::BinaryHeap};

use log::trace;

use super::node::Node;
use crate::{FrequencyMap, Symbol};

/// How to find the two lightest trees in the forest on each merge.
///
/// Both strategies break ties the same way, so they always produce the same
/// tree. `Resort` is the straightforward baseline, and is only reasonable for
/// small alphabets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildStrategy {
    /// Binary min-heap. O(n log n) in the number of distinct symbols.
    #[default]
    Heap,

    /// Stable re-sort of the whole forest before each merge. O(n² log n).
    Resort,
}

/// A tree in the forest, tagged with its creation order.
///
/// Leaves are numbered in order of first appearance; each merged node gets
/// the next number after everything created before it. Among trees of equal
/// weight, the lowest number is taken first.
struct Slot {
    weight: u64,
    seq: usize,
}

/// The trees under construction.
///
/// Nodes live in `arena`, indexed by sequence number. A merge takes its two
/// operands out of the arena, so each subtree has exactly one owner at every
/// point.
struct Forest<S: Symbol> {
    arena: Vec<Option<Node<S>>>,
}

impl<S: Symbol> Forest<S> {
    fn new(freqs: &FrequencyMap<S>) -> Self {
        let arena = freqs
            .iter()
            .map(|(symbol, count)| Some(Node::leaf(symbol, count)))
            .collect();
        Self { arena }
    }

    fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.arena
            .iter()
            .enumerate()
            .filter_map(|(seq, node)| node.as_ref().map(|n| Slot { weight: n.weight(), seq }))
    }

    fn take(&mut self, seq: usize) -> Node<S> {
        match self.arena[seq].take() {
            Some(node) => node,
            None => unreachable!("logic error: node #{seq} taken from the forest twice"),
        }
    }

    /// Merge the trees at `first` and `second` (in that order), and return
    /// the new tree's slot.
    fn merge(&mut self, first: usize, second: usize) -> Slot {
        let left = self.take(first);
        let right = self.take(second);
        let merged = Node::merge(left, right);

        let slot = Slot {
            weight: merged.weight(),
            seq: self.arena.len(),
        };
        trace!("merge #{first} + #{second} -> #{} (weight {})", slot.seq, slot.weight);

        self.arena.push(Some(merged));
        slot
    }
}

/// Run Huffman's algorithm. Returns `None` iff `freqs` is empty.
pub(super) fn build<S: Symbol>(freqs: &FrequencyMap<S>, strategy: BuildStrategy) -> Option<Node<S>> {
    let mut forest = Forest::new(freqs);
    let root = match strategy {
        BuildStrategy::Heap => merge_with_heap(&mut forest)?,
        BuildStrategy::Resort => merge_with_resort(&mut forest)?,
    };
    Some(forest.take(root))
}

fn merge_with_heap<S: Symbol>(forest: &mut Forest<S>) -> Option<usize> {
    let mut heap: BinaryHeap<_> = forest
        .slots()
        .map(|Slot { weight, seq }| Reverse((weight, seq)))
        .collect();

    loop {
        let Reverse((_, first)) = heap.pop()?;
        let Some(Reverse((_, second))) = heap.pop() else {
            return Some(first);
        };

        let Slot { weight, seq } = forest.merge(first, second);
        heap.push(Reverse((weight, seq)));
    }
}

fn merge_with_resort<S: Symbol>(forest: &mut Forest<S>) -> Option<usize> {
    loop {
        let mut live: Vec<Slot> = forest.slots().collect();
        // `slots` yields in sequence order, and the sort is stable.
        live.sort_by_key(|slot| slot.weight);

        match live.as_slice() {
            [] => return None,
            [only] => return Some(only.seq),
            [first, second, ..] => {
                forest.merge(first.seq, second.seq);
            }
        }
    }
}
