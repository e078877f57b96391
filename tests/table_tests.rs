//! Table Tests
//!
//! Tests verify:
//! - Table lifecycle (create, exists, truncate, delete)
//! - Direct row mutations and atomic commit
//! - Max-versions garbage collection
//! - Point reads and ordered row-set reads
//! - Concurrent readers alongside a writer

use std::sync::Arc;
use std::thread;

use widecell::codec::{encode_bool, encode_float, encode_int64, make_prefix_range, KeyRange};
use widecell::table::{ColumnFamily, GcRule, Instance, RowSet, Table};
use widecell::WideCellError;

fn create_table(max_versions: usize) -> (Instance, Table) {
    let instance = Instance::new("project", "instance");
    let table = instance.table("table");
    table
        .create([ColumnFamily::new("W", GcRule::MaxVersions(max_versions))])
        .unwrap();
    (instance, table)
}

fn put_bool(table: &Table, key: &str, value: bool) {
    let mut row = table.direct_row(key);
    row.set_cell("W", b"col_bool", encode_bool(value));
    row.commit().unwrap();
}

fn keys(rows: &[widecell::table::Row]) -> Vec<String> {
    rows.iter()
        .map(|row| row.row_key_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_create_and_exists() {
    let instance = Instance::new("project", "instance");
    let table = instance.table("table");
    assert!(!table.exists());

    table
        .create([ColumnFamily::new("W", GcRule::MaxVersions(1))])
        .unwrap();

    assert!(table.exists());
    assert!(instance.table("table").exists());
    assert_eq!(instance.list_tables(), vec!["table".to_string()]);
    assert_eq!(
        table.column_families().unwrap(),
        vec![ColumnFamily::new("W", GcRule::MaxVersions(1))]
    );
}

#[test]
fn test_create_twice_fails() {
    let (_instance, table) = create_table(1);
    let err = table
        .create([ColumnFamily::new("W", GcRule::MaxVersions(1))])
        .unwrap_err();
    assert!(matches!(err, WideCellError::TableExists(id) if id == "table"));
}

#[test]
fn test_create_rejects_zero_versions() {
    let instance = Instance::new("project", "instance");
    let table = instance.table("table");
    let err = table
        .create([ColumnFamily::new("W", GcRule::MaxVersions(0))])
        .unwrap_err();
    assert!(matches!(err, WideCellError::InvalidGcRule(_)));
    assert!(!table.exists());
}

#[test]
fn test_create_rejects_duplicate_family() {
    let instance = Instance::new("project", "instance");
    let table = instance.table("table");
    let err = table
        .create([
            ColumnFamily::new("W", GcRule::MaxVersions(1)),
            ColumnFamily::new("W", GcRule::MaxVersions(3)),
        ])
        .unwrap_err();
    assert!(matches!(err, WideCellError::DuplicateColumnFamily(name) if name == "W"));
    assert!(!table.exists());
}

#[test]
fn test_missing_table_errors() {
    let instance = Instance::new("project", "instance");
    let table = instance.table("nope");

    assert!(matches!(table.read_row(b"1#1"), Err(WideCellError::TableNotFound(_))));
    assert!(matches!(table.read_rows(None), Err(WideCellError::TableNotFound(_))));
    assert!(matches!(table.truncate(), Err(WideCellError::TableNotFound(_))));
    assert!(matches!(table.delete(), Err(WideCellError::TableNotFound(_))));

    let mut row = table.direct_row(b"1#1");
    row.set_cell("W", b"c", [1u8]);
    assert!(matches!(row.commit(), Err(WideCellError::TableNotFound(_))));
}

#[test]
fn test_truncate_keeps_schema() {
    let (_instance, table) = create_table(1);
    put_bool(&table, "123#1", true);
    put_bool(&table, "124#1", false);
    assert_eq!(table.row_count().unwrap(), 2);

    table.truncate().unwrap();

    assert!(table.exists());
    assert_eq!(table.row_count().unwrap(), 0);
    assert_eq!(table.column_families().unwrap().len(), 1);

    put_bool(&table, "123#1", true);
    assert_eq!(table.row_count().unwrap(), 1);
}

#[test]
fn test_delete_table() {
    let (instance, table) = create_table(1);
    table.delete().unwrap();
    assert!(!table.exists());
    assert!(instance.list_tables().is_empty());
}

#[test]
fn test_instances_are_isolated() {
    let (_a, table_a) = create_table(1);
    let other = Instance::new("project", "instance");
    assert!(table_a.exists());
    assert!(!other.table("table").exists());
}

// =============================================================================
// Mutation Tests
// =============================================================================

#[test]
fn test_set_and_read_cells() {
    let (_instance, table) = create_table(1);

    let mut row = table.direct_row(b"123#2");
    row.set_cell("W", b"col_bool", encode_bool(true))
        .set_cell("W", b"col_int", encode_int64(1i64).unwrap())
        .set_cell("W", b"col_float", encode_float(1.0));
    assert_eq!(row.pending(), 3);
    row.commit().unwrap();
    assert_eq!(row.pending(), 0);

    let read = table.read_row(b"123#2").unwrap().unwrap();
    assert_eq!(read.row_key(), b"123#2");
    assert_eq!(read.cell_count(), 3);
    assert_eq!(read.families().collect::<Vec<_>>(), vec!["W"]);
    assert_eq!(read.decode::<bool>("W", b"col_bool").unwrap(), Some(true));
    assert_eq!(read.decode::<i64>("W", b"col_int").unwrap(), Some(1));
    assert_eq!(read.decode::<f64>("W", b"col_float").unwrap(), Some(1.0));
    assert_eq!(read.cell_value("W", b"missing"), None);
    assert_eq!(read.decode::<i64>("W", b"missing").unwrap(), None);
}

#[test]
fn test_set_value_encodes_typed_cells() {
    let (_instance, table) = create_table(1);

    let mut row = table.direct_row(b"1#1");
    row.set_value("W", b"n", &42i64)
        .unwrap()
        .set_value("W", b"s", &"text".to_string())
        .unwrap();
    row.commit().unwrap();

    let read = table.read_row(b"1#1").unwrap().unwrap();
    assert_eq!(read.decode::<i64>("W", b"n").unwrap(), Some(42));
    assert_eq!(read.decode::<String>("W", b"s").unwrap(), Some("text".to_string()));
}

#[test]
fn test_decode_wrong_type_reports_length() {
    let (_instance, table) = create_table(1);
    put_bool(&table, "1#1", true);

    let read = table.read_row(b"1#1").unwrap().unwrap();
    assert!(matches!(
        read.decode::<i64>("W", b"col_bool"),
        Err(WideCellError::InvalidLength { expected: 8, actual: 1, .. })
    ));
}

#[test]
fn test_row_without_cells_does_not_exist() {
    let (_instance, table) = create_table(1);

    let mut row = table.direct_row(b"1#1");
    row.commit().unwrap();
    assert!(table.read_row(b"1#1").unwrap().is_none());

    put_bool(&table, "1#1", true);
    let mut row = table.direct_row(b"1#1");
    row.delete_cell("W", b"col_bool");
    row.commit().unwrap();

    assert!(table.read_row(b"1#1").unwrap().is_none());
    assert_eq!(table.row_count().unwrap(), 0);
}

#[test]
fn test_delete_row() {
    let (_instance, table) = create_table(1);
    put_bool(&table, "1#1", true);

    let mut row = table.direct_row(b"1#1");
    row.delete();
    row.commit().unwrap();

    assert!(table.read_row(b"1#1").unwrap().is_none());
}

#[test]
fn test_unknown_family_rejects_whole_commit() {
    let (_instance, table) = create_table(1);

    let mut row = table.direct_row(b"1#1");
    row.set_cell("W", b"ok", [1u8]).set_cell("X", b"bad", [2u8]);

    let err = row.commit().unwrap_err();
    assert!(matches!(err, WideCellError::ColumnFamilyNotFound(family) if family == "X"));
    assert_eq!(row.pending(), 2);
    assert!(table.read_row(b"1#1").unwrap().is_none());
}

#[test]
fn test_last_write_in_one_commit_wins() {
    let (_instance, table) = create_table(3);

    let mut row = table.direct_row(b"1#1");
    row.set_cell("W", b"c", [1u8]).set_cell("W", b"c", [2u8]);
    row.commit().unwrap();

    let read = table.read_row(b"1#1").unwrap().unwrap();
    assert_eq!(read.cells("W", b"c").len(), 1);
    assert_eq!(read.cell_value("W", b"c"), Some(&[2u8][..]));
}

// =============================================================================
// Garbage Collection Tests
// =============================================================================

#[test]
fn test_max_versions_one_keeps_latest() {
    let (_instance, table) = create_table(1);
    put_bool(&table, "1#1", false);
    put_bool(&table, "1#1", true);

    let read = table.read_row(b"1#1").unwrap().unwrap();
    assert_eq!(read.cells("W", b"col_bool").len(), 1);
    assert_eq!(read.decode::<bool>("W", b"col_bool").unwrap(), Some(true));
}

#[test]
fn test_max_versions_keeps_newest_first() {
    let (_instance, table) = create_table(2);
    for value in [1u8, 2, 3] {
        let mut row = table.direct_row(b"1#1");
        row.set_cell("W", b"c", [value]);
        row.commit().unwrap();
    }

    let read = table.read_row(b"1#1").unwrap().unwrap();
    let cells = read.cells("W", b"c");
    assert_eq!(cells.len(), 2);
    assert_eq!(&cells[0].value[..], &[3u8]);
    assert_eq!(&cells[1].value[..], &[2u8]);
    assert!(cells[0].timestamp_micros > cells[1].timestamp_micros);
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_rows_all_in_key_order() {
    let (_instance, table) = create_table(1);
    put_bool(&table, "124#1", false);
    put_bool(&table, "123#2", true);
    put_bool(&table, "123#1", false);

    let rows = table.read_rows(None).unwrap();
    assert_eq!(keys(&rows), vec!["123#1", "123#2", "124#1"]);
}

#[test]
fn test_read_rows_with_prefix() {
    let (_instance, table) = create_table(1);
    for key in ["12#1", "123#1", "123#2", "1234#1", "124#1"] {
        put_bool(&table, key, true);
    }

    let rows = table.read_rows(Some(&RowSet::for_id("123"))).unwrap();
    assert_eq!(keys(&rows), vec!["123#1", "123#2"]);
}

#[test]
fn test_read_rows_union_is_deduplicated() {
    let (_instance, table) = create_table(1);
    for key in ["123#1", "123#2", "124#1", "125#1"] {
        put_bool(&table, key, true);
    }

    let mut row_set = RowSet::new();
    row_set
        .add_row_key(b"125#1")
        .add_row_key(b"123#1")
        .add_row_key(b"999#1")
        .add_row_range(make_prefix_range("123"));

    let rows = table.read_rows(Some(&row_set)).unwrap();
    assert_eq!(keys(&rows), vec!["123#1", "123#2", "125#1"]);
}

#[test]
fn test_read_rows_empty_and_inverted_sets() {
    let (_instance, table) = create_table(1);
    put_bool(&table, "1#1", true);

    assert!(table.read_rows(Some(&RowSet::new())).unwrap().is_empty());

    let mut row_set = RowSet::new();
    row_set.add_row_range(KeyRange::new(b"9".to_vec(), Some(b"0".to_vec())));
    assert!(table.read_rows(Some(&row_set)).unwrap().is_empty());
}

#[test]
fn test_read_rows_unbounded_range() {
    let (_instance, table) = create_table(1);
    put_bool(&table, "1#1", true);
    put_bool(&table, "2#1", true);

    let mut row_set = RowSet::new();
    row_set.add_row_range(KeyRange::new(b"2".to_vec(), None));
    let rows = table.read_rows(Some(&row_set)).unwrap();
    assert_eq!(keys(&rows), vec!["2#1"]);
}

#[test]
fn test_read_row_missing() {
    let (_instance, table) = create_table(1);
    put_bool(&table, "124#1", true);
    assert!(table.read_row(b"124#1").unwrap().is_some());
    assert!(table.read_row(b"125#1").unwrap().is_none());
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_readers_and_writer() {
    let (_instance, table) = create_table(1);
    let table = Arc::new(table);

    let writer = {
        let table = Arc::clone(&table);
        thread::spawn(move || {
            for i in 0..200u64 {
                let mut row = table.direct_row(format!("w#{}", i));
                row.set_cell("W", b"n", encode_int64(i).unwrap());
                row.commit().unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for _ in 0..50 {
                    let rows = table.read_rows(Some(&RowSet::for_id("w"))).unwrap();
                    for row in rows {
                        assert_eq!(row.cell_count(), 1);
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(table.row_count().unwrap(), 200);
}
