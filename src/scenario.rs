//! Sample Scenario
//!
//! Provisions a table, writes a handful of rows covering every cell
//! codec, and reads them back with checks.
//!
//! ## Steps
//! 1. Create the table with one column family (or truncate it if present)
//! 2. Write `123#1`, `123#2` and `124#1`
//! 3. Read all rows, the `123` prefix, and point rows
//! 4. Decode every cell of `123#2` and compare with what was written

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};

use crate::codec::{
    decode_bool, decode_document, decode_float, decode_int64, decode_str, decode_timestamp,
    encode_bool, encode_document, encode_float, encode_int64, encode_str, encode_timestamp,
    RowKey,
};
use crate::config::Config;
use crate::error::{Result, WideCellError};
use crate::table::{ColumnFamily, GcRule, Instance, RowSet, Table};

/// What a successful scenario run observed
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    /// True if the table existed and was truncated instead of created
    pub truncated_existing: bool,

    /// Rows returned by a full-table read
    pub total_rows: usize,

    /// Row keys returned by the `123` prefix read
    pub prefix_keys: Vec<String>,
}

/// Run the scenario against a fresh instance built from `config`
pub fn run(config: &Config) -> Result<ScenarioReport> {
    config.validate()?;
    let instance = Instance::from_config(config);
    run_on(&instance, config)
}

/// Run the scenario against an existing instance
///
/// Running twice on the same instance exercises the truncate path.
pub fn run_on(instance: &Instance, config: &Config) -> Result<ScenarioReport> {
    config.validate()?;
    let family = config.column_family.as_str();
    let table = instance.table(&config.table_id);

    let truncated_existing = provision(&table, config)?;

    tracing::info!("Adding rows to {}", config.table_id);
    write_rows(&table, family)?;

    let all_rows = table.read_rows(None)?;
    check(all_rows.len() == 3, || {
        format!("expected 3 rows, read {}", all_rows.len())
    })?;

    let prefix_rows = table.read_rows(Some(&RowSet::for_id("123")))?;
    let prefix_keys: Vec<String> = prefix_rows
        .iter()
        .map(|row| String::from_utf8_lossy(row.row_key()).into_owned())
        .collect();
    check(prefix_keys == ["123#1", "123#2"], || {
        format!("prefix read returned {:?}", prefix_keys)
    })?;

    check(table.read_row(b"124#1")?.is_some(), || {
        "row 124#1 is missing".to_string()
    })?;
    check(table.read_row(b"125#1")?.is_none(), || {
        "row 125#1 should not exist".to_string()
    })?;

    verify_full_row(&table, family)?;

    tracing::info!(
        "Scenario passed: {} rows, prefix keys {:?}",
        all_rows.len(),
        prefix_keys
    );

    Ok(ScenarioReport {
        truncated_existing,
        total_rows: all_rows.len(),
        prefix_keys,
    })
}

/// The instant written to `col_timestamp`, 2022-01-01T00:00:00Z
pub fn sample_timestamp() -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| WideCellError::InvalidTimestamp("2022-01-01T00:00:00Z".to_string()))
}

fn sample_document() -> BTreeMap<String, String> {
    BTreeMap::from([("a".to_string(), "b".to_string())])
}

fn sample_list() -> Vec<String> {
    vec!["a".to_string(), "b".to_string()]
}

/// Create the table, or truncate it if it already exists
fn provision(table: &Table, config: &Config) -> Result<bool> {
    if table.exists() {
        tracing::warn!("Table {} already exists, truncating", config.table_id);
        table.truncate()?;
        return Ok(true);
    }

    tracing::info!(
        "Creating table {} with family {} (max versions {})",
        config.table_id,
        config.column_family,
        config.max_versions
    );
    table.create([ColumnFamily::new(
        &config.column_family,
        GcRule::MaxVersions(config.max_versions),
    )])?;
    Ok(false)
}

fn write_rows(table: &Table, family: &str) -> Result<()> {
    // Rows must carry at least one cell to exist
    let mut row = table.direct_row(RowKey::new("123", 1)?);
    row.set_cell(family, b"col_bool", encode_bool(false));
    row.commit()?;

    let mut row = table.direct_row(RowKey::new("123", 2)?);
    row.set_cell(family, b"col_bool", encode_bool(true))
        .set_cell(family, b"col_int", encode_int64(1i64)?)
        .set_cell(family, b"col_str", encode_str("str"))
        .set_cell(family, b"col_float", encode_float(1.0))
        .set_cell(family, b"col_dict", encode_document(&sample_document())?)
        .set_cell(family, b"col_list", encode_document(&sample_list())?)
        .set_cell(family, b"col_timestamp", encode_timestamp(&sample_timestamp()?));
    row.commit()?;

    let mut row = table.direct_row(RowKey::new("124", 1)?);
    row.set_cell(family, b"col_bool", encode_bool(false));
    row.commit()?;

    Ok(())
}

fn verify_full_row(table: &Table, family: &str) -> Result<()> {
    let row = table
        .read_row(b"123#2")?
        .ok_or_else(|| WideCellError::Assertion("row 123#2 is missing".to_string()))?;

    let cell = |qualifier: &'static str| {
        row.cell_value(family, qualifier).ok_or_else(|| {
            WideCellError::Assertion(format!("cell {}:{} is missing", family, qualifier))
        })
    };

    check(decode_bool(cell("col_bool")?)?, || "col_bool should be true".to_string())?;

    let int = decode_int64(cell("col_int")?)?;
    check(int == 1, || format!("col_int is {}", int))?;

    let text = decode_str(cell("col_str")?)?;
    check(text == "str", || format!("col_str is {:?}", text))?;

    let float = decode_float(cell("col_float")?)?;
    check(float == 1.0, || format!("col_float is {}", float))?;

    let document: BTreeMap<String, String> = decode_document(cell("col_dict")?)?;
    check(document == sample_document(), || {
        format!("col_dict is {:?}", document)
    })?;

    let list: Vec<String> = decode_document(cell("col_list")?)?;
    check(list == sample_list(), || format!("col_list is {:?}", list))?;

    let timestamp = decode_timestamp(cell("col_timestamp")?)?;
    let expected = sample_timestamp()?;
    check(timestamp == expected, || {
        format!("col_timestamp is {}", timestamp)
    })?;

    Ok(())
}

fn check(condition: bool, describe: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(WideCellError::Assertion(describe()))
    }
}
