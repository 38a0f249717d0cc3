use super::*;
use crate::error::DpError;

use proptest::prelude::*;

// ---- Coordinates ----

#[test]
fn coordinates_order_by_column_then_row() {
    let a = MatrixCoordinate::new(1, 5);
    let b = MatrixCoordinate::new(2, 0);
    let c = MatrixCoordinate::new(2, 3);
    assert!(a < b && b < c);
    assert_eq!(a.to_string(), "(1,5)");
    assert_eq!(MatrixCoordinate::default(), MatrixCoordinate::new(0, 0));
}

#[test]
fn advanceable_coordinate_moves_on_one_axis() {
    let c = AdvanceableCoordinate::<RowAxis>::new(3, 2);
    let moved = c + 4;
    assert_eq!((moved.column, moved.row), (3, 6));
    assert_eq!(moved - c, 4);
    assert_eq!(c - moved, -4);

    let across = c.with_axis::<ColumnAxis>() + 1;
    assert_eq!(MatrixCoordinate::from(across), MatrixCoordinate::new(4, 2));
}

#[test]
fn coordinate_range_iterates_both_ways() {
    let begin = AdvanceableCoordinate::<RowAxis>::new(3, 2);
    let range = begin.range_to(begin + 4);
    assert_eq!(range.len(), 4);
    let rows: Vec<usize> = range.clone().map(|c| c.row).collect();
    assert_eq!(rows, vec![2, 3, 4, 5]);
    assert_eq!(range.clone().next_back().map(|c| c.row), Some(5));
    assert_eq!(range.clone().nth(2).map(|c| c.row), Some(4));
    assert_eq!(range.clone().nth(4), None);
    assert!(range.clone().all(|c| c.column == 3));
}

proptest! {
    #[test]
    fn advancing_then_measuring_gives_the_offset(
        column in 0usize..1000,
        row in 0usize..1000,
        offset in 0isize..1000,
    ) {
        let c = AdvanceableCoordinate::<ColumnAxis>::new(column, row);
        prop_assert_eq!((c + offset) - c, offset);
        prop_assert_eq!((c + offset) - offset, c);
        prop_assert_eq!((c + offset).row, row);
    }
}

// ---- Cells ----

#[test]
fn affine_cell_accessors() {
    let mut cell: ScoreCell<i32> = AffineCell::new((4, -1, 10));
    assert_eq!(*cell.best(), 4);
    assert_eq!(*cell.horizontal(), -1);
    assert_eq!(*cell.vertical(), 10);

    *cell.best_mut() += 1;
    *cell.vertical_mut() = 0;
    assert_eq!(cell.into_inner(), (5, -1, 0));
    assert_eq!(cell.into_horizontal(), -1);
}

#[test]
fn score_trace_cell_splits_into_parts() {
    let traces = (
        TraceDirections::DIAGONAL,
        TraceDirections::LEFT_OPEN,
        TraceDirections::UP,
    );
    let cell = AffineCell::new((4, -1, 10)).with_trace(traces);
    assert_eq!(*cell.best(), 4);
    assert_eq!(*cell.horizontal_trace(), TraceDirections::LEFT_OPEN);
    assert_eq!(cell.into_vertical_trace(), TraceDirections::UP);

    let (score, trace) = cell.split();
    assert_eq!(score, AffineCell((4, -1, 10)));
    assert_eq!(trace.into_inner(), traces);
}

#[test]
fn referenced_cell_loads_and_stores() {
    let (mut best, mut horizontal, mut vertical) = (1, 2, 3);
    let mut cell = AffineCell((&mut best, &mut horizontal, &mut vertical));
    assert_eq!(cell.load(), AffineCell((1, 2, 3)));
    cell.store(AffineCell((7, 8, 9)));
    assert_eq!((best, horizontal, vertical), (7, 8, 9));
}

#[test]
fn cell_converts_field_by_field() {
    let narrow: AffineCell<(i16, u8, i16)> = AffineCell((-4, 2, 7));
    let wide = ScoreCell::<i32>::from_compatible(narrow);
    assert_eq!(wide, AffineCell((-4, 2, 7)));

    let traced = AffineCell::<(i64, i64, i64)>::from_compatible(wide);
    assert_eq!(*traced.best(), -4);
}

// ---- Trace directions ----

#[test]
fn resolve_prefers_left_then_up_then_diagonal() {
    let all = TraceDirections::DIAGONAL | TraceDirections::UP | TraceDirections::LEFT;
    assert_eq!(all.resolve(), TraceDirections::LEFT);
    assert_eq!(
        (TraceDirections::DIAGONAL | TraceDirections::UP).resolve(),
        TraceDirections::UP
    );
    assert_eq!(
        (TraceDirections::DIAGONAL | TraceDirections::LEFT_OPEN).resolve(),
        TraceDirections::DIAGONAL
    );
    assert_eq!(
        (TraceDirections::UP_OPEN | TraceDirections::LEFT_OPEN).resolve(),
        TraceDirections::NONE
    );
}

#[test]
fn predecessors_drop_gap_origin_flags() {
    let flags = TraceDirections::from_bits(0b1_1111);
    assert_eq!(
        flags.predecessors(),
        TraceDirections::DIAGONAL | TraceDirections::UP | TraceDirections::LEFT
    );
    assert!(flags.contains(TraceDirections::UP_OPEN));
    assert!(!TraceDirections::UP.intersects(TraceDirections::UP_OPEN));
    assert_eq!(TraceDirections::from_bits(0xFF).bits(), 0b1_1111);
}

#[test]
fn trace_directions_render() {
    let flags = TraceDirections::DIAGONAL | TraceDirections::UP_OPEN | TraceDirections::LEFT;
    assert_eq!(format!("{flags:?}"), "D|UO|L");
    assert_eq!(format!("{:?}", TraceDirections::NONE), "N");
    assert_eq!(flags.symbol(), '-');
    assert_eq!(TraceDirections::DIAGONAL.symbol(), '\\');
    assert_eq!(TraceDirections::UP.symbol(), '|');
}

// ---- Two-dimensional storage ----

#[test]
fn two_dimensional_matrix_layouts() {
    let matrix = TwoDimensionalMatrix::from_values(2, 3, MatrixMajor::Row, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(matrix.get(1, 2), Some(&6));
    assert_eq!(matrix.get(2, 0), None);
    assert_eq!(matrix[MatrixCoordinate::new(2, 1)], 6);
    assert_eq!(matrix.row(1), &[4, 5, 6]);

    let by_column = matrix.transposed_layout();
    assert_eq!(by_column.major(), MatrixMajor::Column);
    assert_eq!(by_column.as_slice(), &[1, 4, 2, 5, 3, 6]);
    assert_eq!(by_column.column(2), &[3, 6]);
    assert_eq!(by_column[MatrixCoordinate::new(0, 1)], 4);
}

#[test]
fn two_dimensional_matrix_resize_fills() {
    let mut matrix = TwoDimensionalMatrix::new(MatrixMajor::Column);
    matrix.resize(3, 2, -1).unwrap();
    assert_eq!((matrix.rows(), matrix.columns()), (3, 2));
    assert!(matrix.as_slice().iter().all(|&v| v == -1));

    *matrix.get_mut(2, 1).unwrap() = 5;
    matrix.column_mut(0)[0] = 7;
    assert_eq!(matrix.column(1), &[-1, -1, 5]);
    assert_eq!(matrix.get(0, 0), Some(&7));
}

// ---- Bit-packed edit distance traces ----

/// Ten query rows in two `u8` words per flag.
fn two_word_matrix(semi_global: bool) -> EditDistanceTraceMatrixFull<u8> {
    let mut matrix = EditDistanceTraceMatrixFull::new(11, semi_global, false);
    matrix.add_column(vec![0, 0], vec![0, 0], vec![0xFF, 0x03]).unwrap();
    matrix
        .add_column(vec![0b0001, 0], vec![0b0010, 0b10], vec![0b0101, 0])
        .unwrap();
    matrix
}

#[test]
fn edit_distance_trace_decodes_bits() {
    let matrix = two_word_matrix(false);
    assert_eq!((matrix.cols(), matrix.rows()), (2, 11));

    assert_eq!(matrix.at(MatrixCoordinate::new(0, 0)), TraceDirections::NONE);
    for row in 1..11 {
        assert_eq!(matrix.at(MatrixCoordinate::new(0, row)), TraceDirections::UP);
    }

    assert_eq!(matrix.at(MatrixCoordinate::new(1, 0)), TraceDirections::LEFT);
    assert_eq!(
        matrix.at(MatrixCoordinate::new(1, 1)),
        TraceDirections::LEFT | TraceDirections::UP
    );
    assert_eq!(matrix.at(MatrixCoordinate::new(1, 2)), TraceDirections::DIAGONAL);
    assert_eq!(matrix.at(MatrixCoordinate::new(1, 3)), TraceDirections::UP);
    assert_eq!(matrix.at(MatrixCoordinate::new(1, 9)), TraceDirections::NONE);
    // Row 10 is the second bit of the second word.
    assert_eq!(matrix.at(MatrixCoordinate::new(1, 10)), TraceDirections::DIAGONAL);
}

#[test]
fn edit_distance_trace_semi_global_first_row_is_free() {
    let matrix = two_word_matrix(true);
    assert_eq!(matrix.at(MatrixCoordinate::new(1, 0)), TraceDirections::NONE);
    assert_eq!(matrix.at(MatrixCoordinate::new(1, 2)), TraceDirections::DIAGONAL);
}

#[test]
fn edit_distance_trace_respects_max_rows() {
    let mut matrix = EditDistanceTraceMatrixFull::<u8>::new(4, false, true);
    matrix.add_column_bounded(vec![0], vec![0], vec![0b111], 2).unwrap();
    matrix
        .add_column_bounded(vec![0b111], vec![0b111], vec![0], 4)
        .unwrap();
    matrix.add_column_bounded(vec![0b111], vec![0], vec![0], 0).unwrap();

    assert_eq!(matrix.at(MatrixCoordinate::new(0, 1)), TraceDirections::UP);
    assert_eq!(matrix.at(MatrixCoordinate::new(0, 2)), TraceDirections::NONE);
    assert_eq!(
        matrix.at(MatrixCoordinate::new(1, 3)),
        TraceDirections::LEFT | TraceDirections::DIAGONAL
    );
    // Even the first row is cut off by a zero bound.
    assert_eq!(matrix.at(MatrixCoordinate::new(2, 0)), TraceDirections::NONE);
    assert_eq!(matrix.at(MatrixCoordinate::new(2, 1)), TraceDirections::NONE);
}

#[test]
fn edit_distance_trace_path_resolves_each_cell() {
    let mut matrix = EditDistanceTraceMatrixFull::<u8>::new(3, false, false);
    matrix.reserve(3).unwrap();
    matrix.add_column(vec![0], vec![0], vec![0b11]).unwrap();
    // Column 1: row 1 diagonal, row 2 up.
    matrix.add_column(vec![0], vec![0b01], vec![0b10]).unwrap();
    // Column 2: row 1 left, row 2 diagonal.
    matrix.add_column(vec![0b01], vec![0b10], vec![0]).unwrap();

    let path: Vec<_> = matrix.trace_path(MatrixCoordinate::new(2, 2)).unwrap().collect();
    assert_eq!(path, vec![TraceDirections::DIAGONAL, TraceDirections::DIAGONAL]);

    let mut path = matrix.trace_path(MatrixCoordinate::new(2, 1)).unwrap();
    assert_eq!(path.next(), Some(TraceDirections::LEFT));
    assert_eq!(path.coordinate(), MatrixCoordinate::new(1, 1));
    assert_eq!(path.next(), Some(TraceDirections::DIAGONAL));
    assert_eq!(path.next(), None);
    assert_eq!(path.next(), None);
    assert_eq!(path.coordinate(), MatrixCoordinate::new(0, 0));

    let path: Vec<_> = matrix.trace_path(MatrixCoordinate::new(1, 2)).unwrap().collect();
    assert_eq!(path, vec![TraceDirections::UP, TraceDirections::DIAGONAL]);
}

// ---- Trace paths ----

#[test]
fn trace_path_rejects_start_outside_matrix() {
    let matrix = EditDistanceTraceMatrixFull::<u64>::new(3, false, false);
    match trace_path(&matrix, MatrixCoordinate::new(0, 0)) {
        Err(DpError::CoordinateOutOfBounds {
            column: 0,
            row: 0,
            columns: 0,
            rows: 3,
        }) => {}
        other => panic!("unexpected: {:?}", other.map(|p| p.coordinate())),
    }

    let traces = TwoDimensionalMatrix::from_values(
        1,
        2,
        MatrixMajor::Row,
        vec![TraceDirections::NONE, TraceDirections::LEFT],
    );
    assert!(trace_path(&traces, MatrixCoordinate::new(1, 0)).is_ok());
    assert!(trace_path(&traces, MatrixCoordinate::new(1, 1)).is_err());
    assert!(trace_path(&traces, MatrixCoordinate::new(2, 0)).is_err());
}

#[test]
fn affine_path_follows_gap_to_its_opening() {
    use TraceDirections as T;
    // Two columns, three rows.
    let traces = TwoDimensionalMatrix::from_values(
        3,
        2,
        MatrixMajor::Row,
        vec![
            T::NONE,
            T::LEFT | T::LEFT_OPEN,
            T::UP | T::UP_OPEN,
            T::DIAGONAL,
            T::UP,
            T::UP | T::DIAGONAL,
        ],
    );
    // (1,2) resolves to up and extends its gap through (1,1), ignoring that
    // cell's diagonal flag. The gap stops at the border and (1,0) resolves.
    let path: Vec<_> = trace_path(&traces, MatrixCoordinate::new(1, 2)).unwrap().collect();
    assert_eq!(path, vec![T::UP, T::UP, T::LEFT]);
}

#[test]
fn affine_path_stops_gap_at_the_border() {
    use TraceDirections as T;
    let traces =
        TwoDimensionalMatrix::from_values(3, 1, MatrixMajor::Row, vec![T::NONE, T::UP, T::UP]);
    let mut path = trace_path(&traces, MatrixCoordinate::new(0, 2)).unwrap();
    assert_eq!(path.by_ref().collect::<Vec<_>>(), vec![T::UP, T::UP]);
    assert_eq!(path.coordinate(), MatrixCoordinate::new(0, 0));
}

// ---- Bands ----

#[test]
fn band_contains_its_diagonals() {
    let band = Band::new(-1, 2);
    assert!(band.contains(MatrixCoordinate::new(0, 1)));
    assert!(band.contains(MatrixCoordinate::new(5, 3)));
    assert!(!band.contains(MatrixCoordinate::new(0, 2)));
    assert!(!band.contains(MatrixCoordinate::new(3, 0)));
}

#[test]
fn band_geometry_is_clamped_to_matrix() {
    let geometry = BandGeometry::new(6, 4, Band::new(-3, 2));
    assert_eq!(geometry.band_column_index(), 2);
    assert_eq!(geometry.band_row_index(), 3);
    assert_eq!(geometry.band_size(), 6);

    let wide = BandGeometry::new(6, 4, Band::new(-10, 10));
    assert_eq!(wide.band_column_index(), 5);
    assert_eq!(wide.band_row_index(), 3);
    assert_eq!(wide.band_size(), 9);
}

#[test]
fn banded_score_matrix_allocation_clamps_band() {
    let mut matrix = BandedScoreMatrix::<i32>::new(Band::new(0, 0));
    matrix
        .allocate_matrix(&[0u8; 5], &[0u8; 3], Band::new(-3, 2))
        .unwrap();
    let geometry = *matrix.geometry();
    assert_eq!((geometry.columns(), geometry.rows()), (6, 4));
    assert_eq!(geometry.band_column_index(), 2);
    assert_eq!(geometry.band_row_index(), 3);
    assert_eq!(geometry.band_size(), 6);
    assert_eq!(matrix.current_band_size(), 4);
    assert!(matrix.band_touches_last_row());

    for _ in 0..5 {
        matrix.go_next_column();
    }
    assert_eq!(matrix.current_band_size(), 1);
    assert!(matrix.band_touches_last_row());

    matrix
        .allocate_matrix(&[0u8; 5], &[0u8; 3], Band::new(-10, 10))
        .unwrap();
    assert_eq!(matrix.geometry().band_column_index(), 5);
    assert_eq!(matrix.current_band_size(), 4);
}

#[test]
fn band_geometry_columns() {
    let geometry = BandGeometry::new(6, 4, Band::new(-3, 2));
    let sizes: Vec<usize> = (0..6).map(|c| geometry.current_band_size(c)).collect();
    assert_eq!(sizes, vec![4, 4, 4, 3, 2, 1]);
    let first_rows: Vec<usize> = (0..6).map(|c| geometry.first_row(c)).collect();
    assert_eq!(first_rows, vec![0, 0, 0, 1, 2, 3]);
    assert!((0..6).all(|c| geometry.band_touches_last_row(c)));

    assert_eq!(geometry.slot(MatrixCoordinate::new(0, 0)), Some(2));
    assert_eq!(geometry.slot(MatrixCoordinate::new(0, 3)), Some(5));
    assert_eq!(geometry.slot(MatrixCoordinate::new(3, 0)), None);
    assert_eq!(
        geometry.map_banded_coordinate_to_range_position(MatrixCoordinate::new(4, 0)),
        MatrixCoordinate::new(4, 2)
    );
}

#[test]
fn narrow_band_leaves_the_last_row() {
    let geometry = BandGeometry::new(4, 6, Band::new(0, 1));
    let touches: Vec<bool> = (0..4).map(|c| geometry.band_touches_last_row(c)).collect();
    assert_eq!(touches, vec![false, false, false, false]);
    assert_eq!(geometry.current_band_size(3), 2);
}

#[test]
fn trim_sequences_moves_band_to_corners() {
    let seq1 = b"GGACGT";
    let seq2 = b"ACGT";
    let trim = trim_sequences(seq1, seq2, Band::new(2, 3)).unwrap();
    assert_eq!(trim.seq1, 2..6);
    assert_eq!(trim.seq2, 0..4);
    assert_eq!(trim.band, Band::new(0, 1));
    assert_eq!(
        trim.to_original(MatrixCoordinate::new(1, 1)),
        MatrixCoordinate::new(3, 1)
    );

    let trim = trim_sequences(&[0u8; 2], &[0u8; 10], Band::new(-5, -3)).unwrap();
    assert_eq!(trim.seq1, 0..2);
    assert_eq!(trim.seq2, 3..7);
    assert_eq!(trim.band, Band::new(-2, 0));

    let untouched = trim_sequences(seq1, seq2, Band::new(-4, 6)).unwrap();
    assert_eq!((untouched.seq1, untouched.seq2), (0..6, 0..4));
}

#[test]
fn trim_sequences_rejects_bands_outside_matrix() {
    let seq1 = b"GGACGT";
    let seq2 = b"ACGT";
    for band in [Band::new(3, 1), Band::new(7, 8), Band::new(-9, -5)] {
        assert!(matches!(
            trim_sequences(seq1, seq2, band),
            Err(DpError::InvalidBand { .. })
        ));
    }
}

proptest! {
    #[test]
    fn trimmed_band_covers_every_column(
        m in 0usize..30,
        n in 0usize..30,
        lower in -30i64..30,
        width in 0i64..10,
    ) {
        let (seq1, seq2) = (vec![0u8; m], vec![0u8; n]);
        let band = Band::new(lower, lower + width);
        if let Ok(trim) = trim_sequences(&seq1, &seq2, band) {
            let columns = trim.seq1.len() + 1;
            let rows = trim.seq2.len() + 1;
            let geometry = BandGeometry::new(columns, rows, trim.band);
            prop_assert!(trim.band.contains(MatrixCoordinate::new(0, 0)));
            prop_assert!(trim.band.contains(MatrixCoordinate::new(columns - 1, rows - 1)));
            for column in 0..columns {
                prop_assert!(geometry.current_band_size(column) > 0);
            }
            prop_assert!(geometry.band_touches_last_row(columns - 1));
        }
    }
}
