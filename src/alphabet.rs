//! Finite symbol sets.
//!
//! The nearest-match index has one row per alphabet symbol, so the alphabet
//! must be known before any table is built. Symbols are single bytes and are
//! mapped to dense ranks `0..len()` through a 256-entry lookup table.

use crate::error::{DpError, Result};

const NO_RANK: u16 = u16::MAX;

/// A finite, ordered set of byte symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    ranks: [u16; 256],
}

impl Alphabet {
    /// Build an alphabet from an explicit symbol list.
    ///
    /// Ranks follow the order of `symbols`. Fails on an empty list or on a
    /// repeated symbol.
    pub fn new(symbols: &[u8]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(DpError::EmptyAlphabet);
        }
        let mut ranks = [NO_RANK; 256];
        for (rank, &sym) in symbols.iter().enumerate() {
            if ranks[sym as usize] != NO_RANK {
                return Err(DpError::DuplicateSymbol {
                    symbol: sym as char,
                });
            }
            ranks[sym as usize] = rank as u16;
        }
        Ok(Self {
            symbols: symbols.to_vec(),
            ranks,
        })
    }

    /// The lowercase latin alphabet `a..=z`, the default for generated input.
    pub fn lowercase() -> Self {
        let symbols: Vec<u8> = (b'a'..=b'z').collect();
        Self::from_valid(&symbols)
    }

    /// Nucleotides `ACGT`.
    pub fn dna() -> Self {
        Self::from_valid(b"ACGT")
    }

    /// Collect the distinct symbols of the given sequences, in byte order.
    ///
    /// Fails with [`DpError::EmptyAlphabet`] if every sequence is empty.
    pub fn from_sequences<'s, I>(seqs: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'s [u8]>,
    {
        let mut seen = [false; 256];
        for seq in seqs {
            for &b in seq {
                seen[b as usize] = true;
            }
        }
        let symbols: Vec<u8> = (0..=255u8).filter(|&b| seen[b as usize]).collect();
        Self::new(&symbols)
    }

    // Only for symbol lists known to be non-empty and distinct.
    fn from_valid(symbols: &[u8]) -> Self {
        let mut ranks = [NO_RANK; 256];
        for (rank, &sym) in symbols.iter().enumerate() {
            ranks[sym as usize] = rank as u16;
        }
        Self {
            symbols: symbols.to_vec(),
            ranks,
        }
    }

    /// Number of symbols |Σ|.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed alphabet; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in rank order.
    #[inline]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Dense rank of `symbol`, or `None` if it is not in the alphabet.
    #[inline]
    pub fn rank(&self, symbol: u8) -> Option<usize> {
        match self.ranks[symbol as usize] {
            NO_RANK => None,
            r => Some(r as usize),
        }
    }

    /// Symbol with the given rank.
    ///
    /// # Panics
    /// Panics if `rank >= self.len()`.
    #[inline]
    pub fn symbol(&self, rank: usize) -> u8 {
        self.symbols[rank]
    }

    /// Whether `symbol` belongs to the alphabet.
    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        self.ranks[symbol as usize] != NO_RANK
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::lowercase()
    }
}
