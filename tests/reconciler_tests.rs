//! Table reconciliation tests
//!
//! Shape derivation, the full cell-resolution branch table, sort order,
//! and the degraded paths (no stage, vanished sequence, out of bounds).

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{nums, stage, texts, VanishingSource};
use listview::{
    compute_shape, CellAddress, CellContent, CellValue, SequenceSet, SnapshotSource, TableView,
};
use test_case::test_case;

fn two_list_stage() -> SnapshotSource {
    // Discovery order B-then-A; display order must be A-then-B.
    stage([
        ("id-b", "B", nums(&[1.0])),
        ("id-a", "A", nums(&[10.0, 20.0])),
    ])
}

// =============================================================================
// SHAPE
// =============================================================================

#[test]
fn shape_counts_sequences_plus_index_column() {
    let source = two_list_stage();
    let set = SequenceSet::discover(&source);
    let shape = compute_shape(&set, &source);

    assert_eq!(shape.column_count, 3);
    assert_eq!(shape.row_count, 3); // longest list has 2 elements
}

#[test]
fn empty_stage_degrades_to_corner_only_table() {
    let source = SnapshotSource::no_stage();
    let table = TableView::new(&source);

    assert_eq!(table.shape().row_count, 1);
    assert_eq!(table.shape().column_count, 1);
    assert_eq!(table.resolve(CellAddress::new(0, 0)), CellContent::Corner);
}

#[test]
fn all_empty_lists_also_degrade_to_corner_only() {
    let source = stage([("id-a", "A", vec![]), ("id-b", "B", vec![])]);
    let table = TableView::new(&source);

    assert_eq!(table.shape().row_count, 1);
    assert_eq!(table.shape().column_count, 1);
}

#[test]
fn max_length_ties_do_not_affect_row_count() {
    let source = stage([
        ("id-a", "A", nums(&[1.0, 2.0, 3.0])),
        ("id-b", "B", texts(&["x", "y", "z"])),
    ]);
    let set = SequenceSet::discover(&source);
    assert_eq!(compute_shape(&set, &source).row_count, 4);
}

// =============================================================================
// CELL RESOLUTION BRANCH TABLE
// =============================================================================

#[test_case(0, 0 => CellContent::Corner; "corner")]
#[test_case(0, 1 => CellContent::ColumnHeader("A".to_string()); "first header")]
#[test_case(0, 2 => CellContent::ColumnHeader("B".to_string()); "second header")]
#[test_case(1, 0 => CellContent::RowIndex(1); "first row index")]
#[test_case(2, 0 => CellContent::RowIndex(2); "second row index")]
#[test_case(1, 1 => CellContent::Value(CellValue::from(10.0)); "value a1")]
#[test_case(2, 1 => CellContent::Value(CellValue::from(20.0)); "value a2")]
#[test_case(1, 2 => CellContent::Value(CellValue::from(1.0)); "value b1")]
#[test_case(2, 2 => CellContent::Missing; "short list yields missing")]
#[test_case(3, 1 => CellContent::Unresolved; "row out of range")]
#[test_case(0, 3 => CellContent::Unresolved; "column out of range")]
fn resolve_branch_table(row: u32, column: u32) -> CellContent {
    let source = two_list_stage();
    let table = TableView::new(&source);
    table.resolve(CellAddress::new(row, column))
}

#[test]
fn resolution_is_idempotent() {
    let source = two_list_stage();
    let table = TableView::new(&source);

    for row in 0..table.shape().row_count {
        for column in 0..table.shape().column_count {
            let addr = CellAddress::new(row, column);
            assert_eq!(table.resolve(addr), table.resolve(addr));
        }
    }
}

#[test]
fn vanished_sequence_resolves_to_unresolved_not_panic() {
    let source = VanishingSource::new(two_list_stage(), "id-a");
    let table = TableView::new(&source);
    assert_eq!(table.shape().column_count, 3);

    // The sequence disappears after discovery.
    source.hidden.set(true);

    assert_eq!(table.resolve(CellAddress::new(1, 1)), CellContent::Unresolved);
    // Headers come from the discovery pass and still resolve.
    assert_eq!(
        table.resolve(CellAddress::new(0, 1)),
        CellContent::ColumnHeader("A".to_string())
    );
    // The other sequence is untouched.
    assert_eq!(
        table.resolve(CellAddress::new(1, 2)),
        CellContent::Value(CellValue::from(1.0))
    );
}

// =============================================================================
// DISCOVERY ORDER
// =============================================================================

#[test]
fn sort_is_case_insensitive_with_stable_ties() {
    let source = stage([
        ("id-1", "banana", nums(&[1.0])),
        ("id-2", "Apple", nums(&[1.0])),
        ("id-3", "apple", nums(&[1.0])),
    ]);
    let set = SequenceSet::discover(&source);
    let names: Vec<&str> = set.iter().map(|r| r.name.as_str()).collect();

    // Tie between the case variants keeps discovery order; banana is last.
    assert_eq!(names, ["Apple", "apple", "banana"]);

    // Stable across repeated discovery with the same input order.
    let again = SequenceSet::discover(&source);
    assert_eq!(set, again);
}

#[test]
fn empty_lists_are_not_discovered() {
    let source = stage([
        ("id-1", "full", nums(&[1.0])),
        ("id-2", "drained", vec![]),
    ]);
    let set = SequenceSet::discover(&source);
    assert_eq!(set.len(), 1);
    assert_eq!(set.get(0).unwrap().name, "full");
}

// =============================================================================
// END-TO-END SCENARIO
// =============================================================================

#[test]
fn two_sequence_scenario_end_to_end() {
    let source = stage([
        ("id-a", "A", nums(&[10.0, 20.0])),
        ("id-b", "B", nums(&[1.0])),
    ]);
    let table = TableView::new(&source);

    assert_eq!(table.shape().column_count, 3);
    assert_eq!(table.shape().row_count, 3);

    let resolve = |r, c| table.resolve(CellAddress::new(r, c));
    assert_eq!(resolve(1, 1), CellContent::Value(CellValue::from(10.0)));
    assert_eq!(resolve(2, 1), CellContent::Value(CellValue::from(20.0)));
    assert_eq!(resolve(1, 2), CellContent::Value(CellValue::from(1.0)));
    assert_eq!(resolve(2, 2), CellContent::Missing);
    assert_eq!(resolve(0, 1), CellContent::ColumnHeader("A".to_string()));
    assert_eq!(resolve(0, 2), CellContent::ColumnHeader("B".to_string()));
    assert_eq!(resolve(0, 0), CellContent::Corner);
    assert_eq!(resolve(2, 0), CellContent::RowIndex(2));
}
