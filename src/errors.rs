use std::io;

/// Local alias, just for convenience.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while building a code tree, or converting
/// symbols to bits and back.
///
/// None of these are transient: retrying with the same input will fail the
/// same way.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// There's nothing to build a tree from.
    #[error("cannot build a code tree from an empty frequency model")]
    EmptyModel,

    /// The symbol wasn't part of the model the tree was built from.
    #[error("symbol {symbol} has no code in this tree")]
    UnknownSymbol { symbol: String },

    // The rest are malformed bit sequences.
    #[error("bit {bit_index} leads to a child that doesn't exist")]
    MissingChild { bit_index: usize },

    #[error("bit sequence ends in the middle of a code (after {bit_index} bits)")]
    TruncatedCode { bit_index: usize },

    #[error("expected {expected} symbols, but the bits decode to {actual}")]
    SymbolCountMismatch { expected: usize, actual: usize },

    #[error("invalid bit character {found:?} at index {index}; expected '0' or '1'")]
    InvalidBitChar { index: usize, found: char },
}

impl Error {
    /// Is this a problem with the bit sequence itself (as opposed to the
    /// model, or the symbols)?
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::MissingChild { .. }
                | Error::TruncatedCode { .. }
                | Error::SymbolCountMismatch { .. }
                | Error::InvalidBitChar { .. }
        )
    }

    pub(crate) fn unknown_symbol(symbol: &impl std::fmt::Debug) -> Self {
        Error::UnknownSymbol {
            symbol: format!("{symbol:?}"),
        }
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        let kind = if e.is_malformed() {
            io::ErrorKind::InvalidData
        } else {
            io::ErrorKind::InvalidInput
        };
        io::Error::new(kind, e)
    }
}
