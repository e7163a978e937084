use log::debug;

use crate::{errors::Result, tree::Node, Error, Symbol};

/// Walks a code tree one bit at a time.
///
/// Implements iterator, producing decoded symbols. Each bit moves one step
/// down the tree (`false` left, `true` right); on reaching a leaf, its symbol
/// is yielded and the walk restarts at the root.
///
/// Once an error has been yielded, the iterator is exhausted.
pub struct Decoder<'t, S: Symbol, I: Iterator<Item = bool>> {
    root: &'t Node<S>,
    curr: &'t Node<S>,
    bits: I,

    /// How many bits have been consumed so far.
    bit_index: usize,

    failed: bool,
}

impl<'t, S: Symbol, I: Iterator<Item = bool>> Decoder<'t, S, I> {
    pub fn new(root: &'t Node<S>, bits: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            root,
            curr: root,
            bits: bits.into_iter(),
            bit_index: 0,
            failed: false,
        }
    }

    /// Number of bits consumed so far.
    pub fn position(&self) -> usize {
        self.bit_index
    }

    /// Helper function for `Iterator::next`. The same logic, but slightly
    /// different types.
    ///
    /// Return `Ok(None)` when the bits run out on a code boundary.
    pub fn next_symbol(&mut self) -> Result<Option<S>> {
        if self.failed {
            return Ok(None);
        }

        let res = self.step();
        if let Err(e) = &res {
            debug!("decoding failed: {e}");
            self.failed = true;
        }
        res
    }

    fn step(&mut self) -> Result<Option<S>> {
        loop {
            let Some(bit) = self.bits.next() else {
                return if std::ptr::eq(self.curr, self.root) {
                    Ok(None)
                } else {
                    Err(Error::TruncatedCode {
                        bit_index: self.bit_index,
                    })
                };
            };

            self.curr = self.curr.child(bit).ok_or(Error::MissingChild {
                bit_index: self.bit_index,
            })?;
            self.bit_index += 1;

            if let Some(&symbol) = self.curr.symbol() {
                self.curr = self.root;
                return Ok(Some(symbol));
            }
        }
    }
}

impl<'t, S: Symbol, I: Iterator<Item = bool>> Iterator for Decoder<'t, S, I> {
    type Item = Result<S>;

    fn next(&mut self) -> Option<Self::Item> {
        // Massage types in the case of "successfully produced nothing" (end of input).
        self.next_symbol().transpose()
    }
}
