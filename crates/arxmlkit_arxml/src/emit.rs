//! Table schema derivation, sheet naming and row rendering.

use std::collections::BTreeSet;

use arxmlkit_io_xlsx::util::{derive_unique_sheet_name, sanitize_sheet_name};
use polars::prelude::{Column, DataFrame};

use crate::conf::{TUP_COLS_FIXED, derive_level_column_name};
use crate::spec::{SpecFlattenResult, SpecRecord, SpecTable};

/// Header labels: one ancestry column per level, then the fixed columns.
pub fn derive_table_columns(depth_max: usize) -> Vec<String> {
    let mut l_columns: Vec<String> = (1..=depth_max).map(derive_level_column_name).collect();
    l_columns.extend(TUP_COLS_FIXED.iter().map(ToString::to_string));
    l_columns
}

/// Resolve a unique sheet name for a grouping unit and register it.
///
/// `None` selects `sheet_name_fallback` (whole-document mode).
pub fn derive_table_name(
    unit_name: Option<&str>,
    sheet_name_fallback: &str,
    set_names_existing: &mut BTreeSet<String>,
) -> String {
    let c_name_base = match unit_name {
        Some(c_unit_name) => sanitize_sheet_name(c_unit_name, '_'),
        None => sanitize_sheet_name(sheet_name_fallback, '_'),
    };
    derive_unique_sheet_name(&c_name_base, set_names_existing)
}

/// Render one record against a schema of `depth_max` ancestry levels.
pub fn derive_table_row(record: SpecRecord, depth_max: usize) -> Vec<String> {
    let SpecRecord {
        tag,
        short_name,
        dest,
        text,
        mut ancestry_path,
    } = record;

    ancestry_path.resize(depth_max, String::new());
    ancestry_path.extend([tag, short_name, dest, text]);
    ancestry_path
}

/// Build the table of one grouping unit from its flattened records.
///
/// Records are consumed; nothing of the unit is retained after the table.
pub fn emit_table(
    unit_name: Option<&str>,
    flatten_result: SpecFlattenResult,
    sheet_name_fallback: &str,
    set_names_existing: &mut BTreeSet<String>,
) -> SpecTable {
    let SpecFlattenResult { records, depth_max } = flatten_result;

    let name = derive_table_name(unit_name, sheet_name_fallback, set_names_existing);
    let columns = derive_table_columns(depth_max);
    let rows = records
        .into_iter()
        .map(|record| derive_table_row(record, depth_max))
        .collect();

    SpecTable {
        name,
        columns,
        rows,
    }
}

impl SpecTable {
    /// Column count.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Column-major string DataFrame with `columns` as column names.
    pub fn to_dataframe(&self) -> Result<DataFrame, String> {
        let mut l_cols = Vec::with_capacity(self.width());
        for (n_idx_col, c_colname) in self.columns.iter().enumerate() {
            let l_values: Vec<String> = self
                .rows
                .iter()
                .map(|row| row.get(n_idx_col).cloned().unwrap_or_default())
                .collect();
            l_cols.push(Column::new(c_colname.as_str().into(), l_values));
        }
        DataFrame::new(l_cols)
            .map_err(|err| format!("Failed to build table {:?}: {err}", self.name))
    }
}
