mod build;
mod node;

use bitvec::{slice::BitSlice, vec::BitVec};
use log::debug;

pub use self::build::BuildStrategy;
pub use self::node::Node;
use crate::{
    code_table::{self, CodeTable},
    decoder::Decoder,
    errors::Result,
    Error, FrequencyMap, Symbol,
};

/// A Huffman code tree, built from symbol frequencies.
///
/// Leaves are symbols; the path from the root to a leaf is that symbol's
/// code (`0` for left, `1` for right). The tree never changes after it's
/// built, so it can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct CodeTree<S: Symbol> {
    root: Node<S>,
    table: CodeTable<S>,
}

impl<S: Symbol> CodeTree<S> {
    /// Build a tree with the default strategy.
    ///
    /// Fails with [`Error::EmptyModel`] if `freqs` is empty.
    pub fn build(freqs: &FrequencyMap<S>) -> Result<Self> {
        Self::build_with(freqs, BuildStrategy::default())
    }

    pub fn build_with(freqs: &FrequencyMap<S>, strategy: BuildStrategy) -> Result<Self> {
        let root = build::build(freqs, strategy).ok_or(Error::EmptyModel)?;
        let table = CodeTable::from_tree(&root);

        debug!(
            "built code tree ({strategy:?}): {} symbols, total weight {}, longest code {} bits",
            table.len(),
            root.weight(),
            root.depth(),
        );

        Ok(Self { root, table })
    }

    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Total count of all symbols in the model the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.table.len()
    }

    /// True if the alphabet has a single symbol, so the root is a leaf and
    /// every code is empty.
    pub fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn code(&self, symbol: &S) -> Option<&BitSlice> {
        self.table.get(symbol)
    }

    /// `(symbol, code)` pairs, in left-to-right leaf order.
    pub fn codes(&self) -> impl Iterator<Item = (S, &BitSlice)> + '_ {
        self.table.iter()
    }

    pub fn code_table(&self) -> &CodeTable<S> {
        &self.table
    }

    /// Find `symbol`'s code by searching the tree directly, rather than
    /// using the precomputed table.
    pub fn find_path(&self, symbol: &S) -> Option<BitVec> {
        code_table::find_path(&self.root, symbol)
    }

    /// Concatenate the codes of `symbols`, in order.
    ///
    /// Fails with [`Error::UnknownSymbol`] on the first symbol that isn't in
    /// the tree.
    pub fn encode(&self, symbols: impl IntoIterator<Item = S>) -> Result<BitVec> {
        let mut out = BitVec::new();
        self.encode_into(symbols, &mut out)?;
        Ok(out)
    }

    /// Like [`encode`](Self::encode), but appends to `out`.
    ///
    /// On error, `out` may have been partially extended.
    pub fn encode_into(&self, symbols: impl IntoIterator<Item = S>, out: &mut BitVec) -> Result<()> {
        for symbol in symbols {
            let code = self
                .table
                .get(&symbol)
                .ok_or_else(|| Error::unknown_symbol(&symbol))?;
            out.extend_from_bitslice(code);
        }
        Ok(())
    }

    /// Lazily decode a stream of bits.
    pub fn decoder<I>(&self, bits: impl IntoIterator<IntoIter = I>) -> Decoder<'_, S, I>
    where
        I: Iterator<Item = bool>,
    {
        Decoder::new(&self.root, bits)
    }

    /// Decode a whole bit sequence.
    ///
    /// The bits must be a whole number of codes. For a degenerate tree every
    /// code is empty, so there's no way to tell how many symbols zero bits
    /// stand for; this returns an empty sequence. Use
    /// [`decode_exact`](Self::decode_exact) when the length is known.
    pub fn decode(&self, bits: &BitSlice) -> Result<Vec<S>> {
        self.decoder(bits.iter().by_vals()).collect()
    }

    /// Decode a bit sequence that's known to hold exactly `count` symbols.
    pub fn decode_exact(&self, bits: &BitSlice, count: usize) -> Result<Vec<S>> {
        if let Node::Leaf { symbol, .. } = &self.root {
            if !bits.is_empty() {
                return Err(Error::MissingChild { bit_index: 0 });
            }
            return Ok(vec![*symbol; count]);
        }

        let symbols = self.decode(bits)?;
        if symbols.len() != count {
            return Err(Error::SymbolCountMismatch {
                expected: count,
                actual: symbols.len(),
            });
        }
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use bitvec::prelude::*;
    use rand_chacha::{
        rand_core::{RngCore, SeedableRng},
        ChaCha8Rng,
    };
    use test_case::test_case;

    use super::*;
    use crate::compute_frequencies;

    fn tree_for(input: &str) -> CodeTree<char> {
        CodeTree::build(&compute_frequencies(input.chars())).unwrap()
    }

    /// Random bytes, drawn from an alphabet of `alphabet` symbols with a
    /// skewed distribution.
    fn random_input(rng: &mut ChaCha8Rng, len: usize, alphabet: u32) -> Vec<u8> {
        (0..len)
            .map(|_| {
                let a = rng.next_u32() % alphabet;
                let b = rng.next_u32() % alphabet;
                a.min(b) as u8
            })
            .collect()
    }

    fn check_weights(node: &Node<u8>) {
        if let Some((left, right)) = node.children() {
            assert_eq!(node.weight(), left.weight() + right.weight());
            check_weights(left);
            check_weights(right);
        }
    }

    #[test]
    fn scenario_two_symbols() {
        let tree = tree_for("aaab");
        assert_eq!(tree.code(&'a').unwrap().len(), 1);
        assert_eq!(tree.code(&'b').unwrap().len(), 1);

        let bits = tree.encode("aaab".chars()).unwrap();
        assert_eq!(bits, bitvec![1, 1, 1, 0]);
        assert_eq!(tree.decode(&bits).unwrap(), ['a', 'a', 'a', 'b']);
    }

    #[test]
    fn scenario_three_equal_symbols() {
        let tree = tree_for("abcabc");
        let mut lengths: Vec<_> = tree.codes().map(|(_, code)| code.len()).collect();
        lengths.sort();
        assert_eq!(lengths, [1, 2, 2]);

        let bits = tree.encode("abcabc".chars()).unwrap();
        let decoded: String = tree.decode(&bits).unwrap().into_iter().collect();
        assert_eq!(decoded, "abcabc");
    }

    #[test]
    fn scenario_empty_model() {
        let freqs = compute_frequencies("".chars());
        assert_eq!(CodeTree::build(&freqs).unwrap_err(), Error::EmptyModel);
        assert_eq!(
            CodeTree::build_with(&freqs, BuildStrategy::Resort).unwrap_err(),
            Error::EmptyModel
        );
    }

    #[test]
    fn scenario_single_symbol() {
        let tree = tree_for("zzzz");
        assert!(tree.is_degenerate());
        assert_eq!(tree.weight(), 4);

        let bits = tree.encode("zzzz".chars()).unwrap();
        assert!(bits.is_empty());
        assert!(tree.decode(&bits).unwrap().is_empty());
        assert_eq!(tree.decode_exact(&bits, 4).unwrap(), ['z'; 4]);

        let err = tree.decode_exact(bits![0, 0], 2).unwrap_err();
        assert_eq!(err, Error::MissingChild { bit_index: 0 });
    }

    // c = 0, a = 10, b = 11
    #[test_case(bitvec![1]; "lone prefix")]
    #[test_case(bitvec![1, 0, 1, 1, 0, 1]; "one extra bit")]
    fn scenario_trailing_partial_code(bits: BitVec) {
        let tree = tree_for("abcabc");
        let err = tree.decode(&bits).unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err, Error::TruncatedCode { bit_index: bits.len() });
    }

    #[test]
    fn unknown_symbol() {
        let tree = tree_for("abc");
        let err = tree.encode("abx".chars()).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownSymbol {
                symbol: "'x'".into()
            }
        );
    }

    #[test]
    fn encode_into_appends() {
        let tree = tree_for("aaab");
        let mut out = bitvec![1, 1];
        tree.encode_into("ab".chars(), &mut out).unwrap();
        assert_eq!(out, bitvec![1, 1, 1, 0]);
    }

    #[test]
    fn decode_exact_checks_count() {
        let tree = tree_for("abcabc");
        let bits = tree.encode("abc".chars()).unwrap();
        assert_eq!(tree.decode_exact(&bits, 3).unwrap(), ['a', 'b', 'c']);
        assert_eq!(
            tree.decode_exact(&bits, 4).unwrap_err(),
            Error::SymbolCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn lazy_decoder() {
        let tree = tree_for("aaab");
        let mut decoder = tree.decoder([false, true]);
        assert_eq!(decoder.next().transpose().unwrap(), Some('b'));
        assert_eq!(decoder.next().transpose().unwrap(), Some('a'));
        assert!(decoder.next().is_none());
    }

    #[test_case("Hello world!")]
    #[test_case("abracadabra")]
    #[test_case("ab")]
    #[test_case("Съешь же ещё этих мягких французских булок")]
    fn round_trip_text(input: &str) {
        let tree = tree_for(input);
        let bits = tree.encode(input.chars()).unwrap();
        let decoded: String = tree.decode(&bits).unwrap().into_iter().collect();
        assert_eq!(decoded, input);
    }

    #[test]
    fn random_inputs() -> anyhow::Result<()> {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        for i in 0..200 {
            let len = 2 + (rng.next_u32() % 2000) as usize;
            let alphabet = 2 + rng.next_u32() % 255;
            let input = random_input(&mut rng, len, alphabet);
            let freqs = compute_frequencies(input.iter().copied());
            if freqs.len() < 2 {
                continue;
            }

            let tree = CodeTree::build(&freqs)?;

            // Round trip.
            let bits = tree.encode(input.iter().copied())?;
            assert_eq!(tree.decode(&bits)?, input, "iteration {i}");
            assert_eq!(tree.decode_exact(&bits, input.len())?, input);

            // Weights.
            check_weights(tree.root());
            assert_eq!(tree.weight(), input.len() as u64);
            assert_eq!(tree.code_table().encoded_len(freqs.iter()), Some(bits.len() as u64));

            // Prefix-free, and every code is at least one bit.
            assert!(tree.code_table().is_prefix_free());
            assert!(tree.codes().all(|(_, code)| !code.is_empty()));

            // More frequent symbols never get longer codes.
            for (s1, f1) in freqs.iter() {
                for (s2, f2) in freqs.iter() {
                    if f1 > f2 {
                        let l1 = tree.code(&s1).unwrap().len();
                        let l2 = tree.code(&s2).unwrap().len();
                        assert!(l1 <= l2, "{s1} (x{f1}) has {l1} bits, {s2} (x{f2}) has {l2}");
                    }
                }
            }

            // The direct tree search finds the same codes.
            for (symbol, code) in tree.codes() {
                assert_eq!(tree.find_path(&symbol).as_deref(), Some(code));
            }
        }

        Ok(())
    }

    #[test]
    fn deterministic() -> anyhow::Result<()> {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..50 {
            let input = random_input(&mut rng, 500, 40);
            let freqs = compute_frequencies(input.iter().copied());

            let heap = CodeTree::build(&freqs)?;
            let heap_again = CodeTree::build(&freqs)?;
            let resort = CodeTree::build_with(&freqs, BuildStrategy::Resort)?;

            assert_eq!(heap.root(), heap_again.root());
            assert_eq!(heap.root(), resort.root());

            let codes: Vec<_> = heap.codes().collect();
            let resort_codes: Vec<_> = resort.codes().collect();
            assert_eq!(codes, resort_codes);
        }

        Ok(())
    }

    #[test]
    fn shared_between_threads() {
        let tree = tree_for("the quick brown fox jumps over the lazy dog");
        let input: Vec<char> = "the lazy fox".chars().collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let bits = tree.encode(input.iter().copied()).unwrap();
                        tree.decode(&bits).unwrap()
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), input);
            }
        });
    }
}
