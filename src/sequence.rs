//! The two input sequences of one computation.

use std::fmt;

use crate::alphabet::Alphabet;
use crate::error::{DpError, Result};

/// Identifies one of the two inputs in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The row sequence, length n.
    X,
    /// The column sequence, length m; the nearest-match index is built from it.
    Y,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::X => f.write_str("X"),
            Side::Y => f.write_str("Y"),
        }
    }
}

/// A validated pair of sequences over one alphabet.
///
/// Holds the raw symbols (used for output) together with their dense alphabet
/// ranks (used for index lookups). Both are immutable once built.
#[derive(Clone, Debug)]
pub struct SequencePair<'a> {
    x: &'a [u8],
    y: &'a [u8],
    x_ranks: Vec<u8>,
    y_ranks: Vec<u8>,
}

impl<'a> SequencePair<'a> {
    /// Validate `x` and `y` against `alphabet`.
    ///
    /// Fails on the first symbol that is not declared, reporting which
    /// sequence and where.
    pub fn new(x: &'a [u8], y: &'a [u8], alphabet: &Alphabet) -> Result<Self> {
        let x_ranks = encode(x, alphabet, Side::X)?;
        let y_ranks = encode(y, alphabet, Side::Y)?;
        Ok(Self {
            x,
            y,
            x_ranks,
            y_ranks,
        })
    }

    /// Row sequence X.
    #[inline]
    pub fn x(&self) -> &'a [u8] {
        self.x
    }

    /// Column sequence Y.
    #[inline]
    pub fn y(&self) -> &'a [u8] {
        self.y
    }

    /// n = |X|.
    #[inline]
    pub fn n(&self) -> usize {
        self.x.len()
    }

    /// m = |Y|.
    #[inline]
    pub fn m(&self) -> usize {
        self.y.len()
    }

    /// Alphabet ranks of X.
    #[inline]
    pub fn x_ranks(&self) -> &[u8] {
        &self.x_ranks
    }

    /// Alphabet ranks of Y.
    #[inline]
    pub fn y_ranks(&self) -> &[u8] {
        &self.y_ranks
    }
}

fn encode(seq: &[u8], alphabet: &Alphabet, side: Side) -> Result<Vec<u8>> {
    // Ranks are stored as u8: a byte alphabet has at most 256 symbols.
    seq.iter()
        .enumerate()
        .map(|(position, &sym)| {
            alphabet
                .rank(sym)
                .map(|r| r as u8)
                .ok_or(DpError::UnknownSymbol {
                    side,
                    position,
                    symbol: sym as char,
                })
        })
        .collect()
}
