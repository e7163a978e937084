use std::collections::HashMap;

use bitvec::{slice::BitSlice, vec::BitVec};

use crate::{tree::Node, Symbol};

/// Every leaf's root-to-leaf path, computed once from a finished tree.
#[derive(Debug, Clone)]
pub struct CodeTable<S: Symbol> {
    /// In left-to-right leaf order.
    codes: Vec<(S, BitVec)>,

    sym_to_code: HashMap<S, usize>,
    code_to_sym: HashMap<BitVec, usize>,
}

impl<S: Symbol> CodeTable<S> {
    pub fn from_tree(root: &Node<S>) -> Self {
        let mut codes = vec![];
        collect_codes(root, &mut BitVec::new(), &mut codes);

        let sym_to_code = codes
            .iter()
            .enumerate()
            .map(|(i, (symbol, _))| (*symbol, i))
            .collect();
        let code_to_sym = codes
            .iter()
            .enumerate()
            .map(|(i, (_, code))| (code.clone(), i))
            .collect();

        Self {
            codes,
            sym_to_code,
            code_to_sym,
        }
    }

    pub fn get(&self, symbol: &S) -> Option<&BitSlice> {
        let &i = self.sym_to_code.get(symbol)?;
        Some(&self.codes[i].1)
    }

    /// The symbol whose code is exactly `code`.
    pub fn lookup(&self, code: &BitSlice) -> Option<S> {
        let &i = self.code_to_sym.get(code)?;
        Some(self.codes[i].0)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs, in left-to-right leaf order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &BitSlice)> + '_ {
        self.codes.iter().map(|(symbol, code)| (*symbol, code.as_bitslice()))
    }

    /// Check that no code is a prefix of another.
    ///
    /// Always true for a table built from a tree; this is here for tests and
    /// sanity checks.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&BitSlice> = self.codes.iter().map(|(_, c)| c.as_bitslice()).collect();
        sorted.sort();

        // Lexicographic order puts any prefix immediately before some code it
        // prefixes.
        sorted.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Total encoded length, in bits, of a message with these symbol counts.
    pub fn encoded_len(&self, counts: impl IntoIterator<Item = (S, u64)>) -> Option<u64> {
        counts
            .into_iter()
            .map(|(symbol, count)| Some(self.get(&symbol)?.len() as u64 * count))
            .sum()
    }
}

/// Depth-first, left before right. `path` holds the bits leading to `node`.
fn collect_codes<S: Symbol>(node: &Node<S>, path: &mut BitVec, out: &mut Vec<(S, BitVec)>) {
    match node {
        Node::Leaf { symbol, .. } => out.push((*symbol, path.clone())),
        Node::Internal { left, right, .. } => {
            path.push(false);
            collect_codes(left, path, out);
            path.pop();

            path.push(true);
            collect_codes(right, path, out);
            path.pop();
        }
    }
}

/// Search the tree for `symbol`, left subtree first. Returns the path to the
/// first matching leaf.
pub fn find_path<S: Symbol>(root: &Node<S>, symbol: &S) -> Option<BitVec> {
    let mut path = BitVec::new();
    search(root, symbol, &mut path).then_some(path)
}

fn search<S: Symbol>(node: &Node<S>, symbol: &S, path: &mut BitVec) -> bool {
    match node {
        Node::Leaf { symbol: s, .. } => s == symbol,
        Node::Internal { left, right, .. } => {
            for (bit, child) in [(false, left), (true, right)] {
                path.push(bit);
                if search(child, symbol, path) {
                    return true;
                }
                path.pop();
            }
            false
        }
    }
}
