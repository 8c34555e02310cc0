//! Flatten/convert specification models and top-level error types.

use std::path::PathBuf;

use arxmlkit_io_xlsx::conf::{EnumFmtKey, derive_default_xlsx_format};
use arxmlkit_io_xlsx::spec::SpecCellFormat;
use thiserror::Error;

use crate::conf::{
    C_ATTR_DEST, C_SHEET_NAME_FALLBACK, C_TAG_AR_PACKAGE, C_TAG_AR_PACKAGES, C_TAG_SHORT_NAME,
    N_WIDTH_PAD_DOCUMENT, N_WIDTH_PAD_PACKAGE,
};

////////////////////////////////////////////////////////////////////////////////
// #region FlattenModels

/// One flattened element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecRecord {
    /// Local tag name (namespace prefix stripped).
    pub tag: String,
    /// Text of the short-name child, empty when absent.
    pub short_name: String,
    /// Value of the destination attribute, empty when absent.
    pub dest: String,
    /// Own leading text, trimmed; empty when absent or blank.
    pub text: String,
    /// Short names from the traversal root down to this element, inclusive.
    pub ancestry_path: Vec<String>,
}

impl SpecRecord {
    /// 1-based depth of this record within its traversal.
    pub fn depth(&self) -> usize {
        self.ancestry_path.len()
    }
}

/// Distinguished constructs recognized by the flattener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFlattenPolicy {
    /// Local name of the short-name child element.
    pub tag_short_name: String,
    /// Local name of the destination attribute.
    pub attr_dest: String,
}

impl Default for SpecFlattenPolicy {
    fn default() -> Self {
        Self {
            tag_short_name: C_TAG_SHORT_NAME.to_string(),
            attr_dest: C_ATTR_DEST.to_string(),
        }
    }
}

/// Records of one traversal plus the deepest ancestry path seen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecFlattenResult {
    /// Records in pre-order.
    pub records: Vec<SpecRecord>,
    /// Maximum `ancestry_path` length over `records`.
    pub depth_max: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TableModels

/// One output table derived from a grouping unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecTable {
    /// Unique sheet name.
    pub name: String,
    /// Ancestry level columns followed by the fixed columns.
    pub columns: Vec<String>,
    /// Rows aligned to `columns`.
    pub rows: Vec<Vec<String>>,
}

/// Summary of one table committed to the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecTableSummary {
    /// Final sheet name.
    pub table_name: String,
    /// Grouping unit short name; `None` for the whole-document fallback.
    pub unit_name: Option<String>,
    /// Body row count.
    pub n_rows: usize,
    /// Column count.
    pub n_cols: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ConvertOptions

/// Input options for `convert_arxml_to_xlsx`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecConvertOptions {
    /// Flattener policy.
    pub policy_flatten: SpecFlattenPolicy,
    /// Local name of the grouping-unit container under the root.
    pub tag_units_container: String,
    /// Local name of one grouping unit.
    pub tag_unit: String,
    /// Sheet name of the whole-document fallback table.
    pub sheet_name_fallback: String,
    /// Column width padding for grouping-unit sheets.
    pub width_pad_unit: usize,
    /// Column width padding for the fallback sheet.
    pub width_pad_document: usize,
    /// Body cell format.
    pub fmt_text: SpecCellFormat,
    /// Header cell format.
    pub fmt_header: SpecCellFormat,
    /// Replace an existing output file.
    pub if_overwrite: bool,
}

impl Default for SpecConvertOptions {
    fn default() -> Self {
        Self {
            policy_flatten: SpecFlattenPolicy::default(),
            tag_units_container: C_TAG_AR_PACKAGES.to_string(),
            tag_unit: C_TAG_AR_PACKAGE.to_string(),
            sheet_name_fallback: C_SHEET_NAME_FALLBACK.to_string(),
            width_pad_unit: N_WIDTH_PAD_PACKAGE,
            width_pad_document: N_WIDTH_PAD_DOCUMENT,
            fmt_text: derive_default_xlsx_format(EnumFmtKey::Text),
            fmt_header: derive_default_xlsx_format(EnumFmtKey::Header),
            if_overwrite: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// "Whole run failed" errors. Per-unit problems are reported as warnings instead.
#[derive(Debug, Error)]
pub enum ConvertArxmlError {
    /// Input path does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    /// Input could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Input path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Input is not well-formed XML.
    #[error("Failed to parse ARXML {}: {message}", .path.display())]
    Parse {
        /// Input path.
        path: PathBuf,
        /// Parser error text.
        message: String,
    },
    /// Output exists and overwrite is disabled.
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),
    /// Every grouping unit was skipped.
    #[error("No tables were produced; nothing to write.")]
    NoTables,
    /// Table construction or workbook write failed.
    #[error("{0}")]
    Write(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
