//! Text rendering of bit sequences: one character per bit, `1` for true and
//! `0` for false, with no separators or padding.

use bitvec::{slice::BitSlice, vec::BitVec};

use crate::{errors::Result, Error};

pub fn render(bits: &BitSlice) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Inverse of [`render`].
pub fn parse(text: &str) -> Result<BitVec> {
    text.chars()
        .enumerate()
        .map(|(index, c)| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            found => Err(Error::InvalidBitChar { index, found }),
        })
        .collect()
}
