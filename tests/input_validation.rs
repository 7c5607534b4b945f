use scs_dp::{Aligner, Alphabet, DpError, Metric, Side, Strategy};

#[test]
fn unknown_symbol_is_reported_with_position() {
    let aligner = Aligner::builder().threads(1).build().unwrap();
    match aligner.lcs_length(b"abc", b"abXc") {
        Err(DpError::UnknownSymbol { side, position, symbol }) => {
            assert_eq!(side, Side::Y);
            assert_eq!(position, 2);
            assert_eq!(symbol, 'X');
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(
        aligner.scs_length(b"a1", b""),
        Err(DpError::UnknownSymbol { side: Side::X, position: 1, .. })
    ));
}

#[test]
fn every_strategy_validates_first() {
    let aligner = Aligner::builder().alphabet(Alphabet::dna()).threads(2).build().unwrap();
    for strategy in Strategy::ALL {
        assert!(matches!(
            aligner.tabulate_with(b"ACGT", b"ACGU", Metric::Scs, strategy),
            Err(DpError::UnknownSymbol { position: 3, .. })
        ));
    }
}

#[test]
fn alphabet_declaration_errors() {
    assert!(matches!(Alphabet::new(b""), Err(DpError::EmptyAlphabet)));
    assert!(matches!(
        Alphabet::new(b"abca"),
        Err(DpError::DuplicateSymbol { symbol: 'a' })
    ));
}

#[test]
fn oversized_tables_are_refused() {
    let aligner = Aligner::builder().threads(1).max_cells(1_000).build().unwrap();
    let x = vec![b'a'; 100];
    let y = vec![b'b'; 100];
    for strategy in Strategy::ALL {
        assert!(matches!(
            aligner.tabulate_with(&x, &y, Metric::Lcs, strategy),
            Err(DpError::TableTooLarge { rows: 101, cols: 101, limit: 1_000 })
        ));
    }
}

#[test]
fn zero_threads_are_refused() {
    assert!(matches!(
        Aligner::builder().threads(0).build(),
        Err(DpError::InvalidThreadCount)
    ));
}

#[test]
fn errors_render_readably() {
    let err = Aligner::builder()
        .threads(1)
        .build()
        .unwrap()
        .lcs_length(b"ab!", b"")
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("'!'"), "{msg}");
    assert!(msg.contains("position 2"), "{msg}");
}

#[test]
fn index_budget_is_checked_separately_from_the_table() {
    // The 17 x 1001 table fits; the 26 x 1001 nearest-match index does not.
    let aligner = Aligner::builder().threads(2).max_cells(20_000).build().unwrap();
    let x = vec![b'a'; 16];
    let y = vec![b'b'; 1000];
    for metric in [Metric::Lcs, Metric::Scs] {
        let expected = aligner
            .tabulate_with(&x, &y, metric, Strategy::Sequential)
            .unwrap()
            .length();
        let auto = aligner.tabulate_with(&x, &y, metric, Strategy::Auto).unwrap();
        assert_eq!(auto.length(), expected);
        assert_eq!(auto.strategy(), Strategy::Sequential);
        assert_eq!(
            aligner
                .tabulate_with(&x, &y, metric, Strategy::Wavefront)
                .unwrap()
                .length(),
            expected
        );
        for strategy in [Strategy::RowParallel, Strategy::RowParallelBranchFree] {
            let err = aligner.tabulate_with(&x, &y, metric, strategy).unwrap_err();
            assert!(
                matches!(err, DpError::IndexTooLarge { symbols: 26, cols: 1001, limit: 20_000 }),
                "{strategy}: {err}"
            );
            assert!(err.to_string().contains("nearest-match index"), "{err}");
        }
    }
}
