//! `arxmlkit_io_xlsx` v1:
//! XLSX writer kernel for flattened string tables.
//!
//! - `conf`   : Excel limits and default style presets
//! - `spec`   : style/options/report models
//! - `util`   : pure helpers (sheet naming, limits, widths)
//! - `writer` : `rust_xlsxwriter`-backed workbook writer
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_SHEET_NAME_EMPTY, EnumFmtKey, N_LEN_EXCEL_CELL_MAX, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL, derive_default_xlsx_format,
};
pub use spec::{
    EnumAlignH, EnumAlignV, SpecCellFormat, SpecColumnWidthPolicy, SpecSheetReport,
    SpecXlsxSheetWriteOptions,
};
pub use util::{
    calculate_column_width, create_sheet_identifier, derive_unique_sheet_name,
    estimate_unicode_string_width, sanitize_sheet_name, validate_sheet_extent,
};
pub use writer::XlsxWriter;
