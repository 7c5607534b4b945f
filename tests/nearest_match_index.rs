use proptest::prelude::*;
use scs_dp::matrix::DEFAULT_MAX_CELLS;
use scs_dp::{Alphabet, NearestMatchIndex, SequencePair};

proptest! {
    #[test]
    fn points_at_last_occurrence(a in "[a-f]{0,4}", b in "[a-f]{0,60}") {
        let alphabet = Alphabet::lowercase();
        let (x, y) = (a.as_bytes(), b.as_bytes());
        let pair = SequencePair::new(x, y, &alphabet).unwrap();
        let index = NearestMatchIndex::build(&pair, alphabet.len(), DEFAULT_MAX_CELLS).unwrap();
        prop_assert_eq!(index.alphabet_len(), alphabet.len());
        for c in 0..alphabet.len() {
            let sym = alphabet.symbol(c);
            for j in 0..=y.len() {
                let expected = y[..j].iter().rposition(|&s| s == sym).map_or(0, |q| q + 1);
                prop_assert_eq!(index.get(c, j), expected, "symbol {} column {}", sym as char, j);
            }
        }
    }
}

#[test]
fn unused_symbols_stay_zero() {
    let alphabet = Alphabet::dna();
    let pair = SequencePair::new(b"A", b"AAAA", &alphabet).unwrap();
    let index = NearestMatchIndex::build(&pair, alphabet.len(), DEFAULT_MAX_CELLS).unwrap();
    let t = alphabet.rank(b'T').unwrap();
    assert!(index.symbol_row(t).iter().all(|&p| p == 0));
    let a = alphabet.rank(b'A').unwrap();
    assert_eq!(index.symbol_row(a), &[0, 1, 2, 3, 4]);
}
