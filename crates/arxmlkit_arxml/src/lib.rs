//! `arxmlkit_arxml` v1:
//! AUTOSAR ARXML → XLSX flattening kernel.
//!
//! - `conf`    : distinguished tag names, column labels and defaults
//! - `spec`    : records/tables/options/errors
//! - `element` : arena-backed XML tree over `quick-xml`
//! - `flatten` : pre-order subtree flattening with max-depth tracking
//! - `emit`    : column schema, sheet naming and row rendering
//! - `convert` : grouping-unit discovery and workbook orchestration
//! - `report`  : run-time report model
//! - `util`    : shared helper functions

pub mod conf;
pub mod convert;
pub mod element;
pub mod emit;
pub mod flatten;
pub mod report;
pub mod spec;
pub mod util;

pub use convert::{
    EnumGroupingUnits, convert_arxml_to_xlsx, convert_document, discover_grouping_units,
};
pub use element::{XmlDocument, XmlElement, parse_xml_document};
pub use emit::{derive_table_columns, derive_table_name, derive_table_row, emit_table};
pub use flatten::flatten_element;
pub use report::{ReportConvert, ReportConvertBuilder};
pub use spec::{
    ConvertArxmlError, SpecConvertOptions, SpecFlattenPolicy, SpecFlattenResult, SpecRecord,
    SpecTable, SpecTableSummary,
};
pub use util::resolve_output_path;
