//! ARXML distinguished names and output layout constants.

/// Child element whose text identifies its parent.
pub const C_TAG_SHORT_NAME: &str = "SHORT-NAME";
/// Attribute carrying the reference destination type.
pub const C_ATTR_DEST: &str = "DEST";
/// Top-level container of grouping units.
pub const C_TAG_AR_PACKAGES: &str = "AR-PACKAGES";
/// One grouping unit inside [`C_TAG_AR_PACKAGES`].
pub const C_TAG_AR_PACKAGE: &str = "AR-PACKAGE";
/// Sheet name used when the whole document is flattened into one table.
pub const C_SHEET_NAME_FALLBACK: &str = "ARXML_Data";

/// Fixed trailing column labels, in output order.
pub const TUP_COLS_FIXED: [&str; 4] = ["TAG", "SHORT-NAME", "DEST", "TEXT"];

/// Column width padding for per-package sheets.
pub const N_WIDTH_PAD_PACKAGE: usize = 5;
/// Column width padding for the whole-document fallback sheet.
pub const N_WIDTH_PAD_DOCUMENT: usize = 2;

/// Header label of one ancestry level column (`n_level` is 1-based).
pub fn derive_level_column_name(n_level: usize) -> String {
    format!("Level {n_level} Short-Name")
}

