//! Grouping-unit discovery and ARXML → XLSX conversion orchestration.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use arxmlkit_io_xlsx::spec::{SpecColumnWidthPolicy, SpecXlsxSheetWriteOptions};
use arxmlkit_io_xlsx::util::validate_sheet_extent;
use arxmlkit_io_xlsx::writer::XlsxWriter;

use crate::conf::TUP_COLS_FIXED;
use crate::element::{XmlDocument, XmlElement, parse_xml_document};
use crate::emit::emit_table;
use crate::flatten::flatten_element;
use crate::report::{ReportConvert, ReportConvertBuilder};
use crate::spec::{ConvertArxmlError, SpecConvertOptions, SpecTableSummary};

/// How a document is split into tables.
#[derive(Debug, Clone)]
pub enum EnumGroupingUnits<'a> {
    /// One table per unit under the top-level container.
    Units(Vec<XmlElement<'a>>),
    /// No qualifying units: the root is flattened into one fallback table.
    Document(XmlElement<'a>),
}

struct SpecConvertContext<'o> {
    options: &'o SpecConvertOptions,
    set_names_existing: BTreeSet<String>,
    builder_report: ReportConvertBuilder,
}

/// Find the grouping units of `doc`.
///
/// Units are the `tag_unit` children of the root's `tag_units_container`
/// child. If the container is missing or has no such children, the whole
/// document becomes the single unit.
pub fn discover_grouping_units<'a>(
    doc: &'a XmlDocument,
    options: &SpecConvertOptions,
) -> EnumGroupingUnits<'a> {
    let root = doc.root();
    let l_units: Vec<XmlElement<'a>> = root
        .find_child(&options.tag_units_container)
        .map(|container| container.find_children(&options.tag_unit).collect())
        .unwrap_or_default();

    if l_units.is_empty() {
        EnumGroupingUnits::Document(root)
    } else {
        EnumGroupingUnits::Units(l_units)
    }
}

/// Convert an ARXML file into an XLSX workbook at `file_out`.
///
/// The workbook is buffered in memory and saved once, after every unit has
/// been processed; a fatal error leaves no output behind. Per-unit problems
/// (missing short name, no records, sheet limits, rejected sheets) are
/// reported as warnings in the returned [`ReportConvert`]. Cell text over the
/// Excel limit is truncated with a warning.
pub fn convert_arxml_to_xlsx<P, Q>(
    file_in: P,
    file_out: Q,
    options: &SpecConvertOptions,
) -> Result<ReportConvert, ConvertArxmlError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_file_in = file_in.as_ref();
    let path_file_out = file_out.as_ref();

    let v_bytes = fs::read(path_file_in).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ConvertArxmlError::InputNotFound(path_file_in.to_path_buf())
        } else {
            ConvertArxmlError::Io {
                path: path_file_in.to_path_buf(),
                source,
            }
        }
    })?;
    let doc = parse_xml_document(&v_bytes).map_err(|message| ConvertArxmlError::Parse {
        path: path_file_in.to_path_buf(),
        message,
    })?;

    if !options.if_overwrite && path_file_out.exists() {
        return Err(ConvertArxmlError::OutputExists(path_file_out.to_path_buf()));
    }

    let mut writer = XlsxWriter::new(
        path_file_out.to_path_buf(),
        &options.fmt_text,
        &options.fmt_header,
    );
    let mut report = convert_document(&doc, &mut writer, options)?;
    writer.close().map_err(ConvertArxmlError::Write)?;

    report.file_out = Some(path_file_out.to_path_buf());
    Ok(report)
}

/// Flatten every grouping unit of `doc` into its own sheet of `writer`.
///
/// Does not save the workbook.
pub fn convert_document(
    doc: &XmlDocument,
    writer: &mut XlsxWriter,
    options: &SpecConvertOptions,
) -> Result<ReportConvert, ConvertArxmlError> {
    let mut ctx = SpecConvertContext {
        options,
        set_names_existing: BTreeSet::new(),
        builder_report: ReportConvertBuilder::default(),
    };

    match discover_grouping_units(doc, options) {
        EnumGroupingUnits::Units(l_units) => {
            for unit in l_units {
                ctx.builder_report.add_unit();
                let unit_name = unit
                    .find_child(&options.policy_flatten.tag_short_name)
                    .map(|child| child.text());

                let Some(unit_name) = unit_name else {
                    ctx.builder_report.add_skipped(format!(
                        "Skipped an {} without {}.",
                        options.tag_unit, options.policy_flatten.tag_short_name
                    ));
                    continue;
                };
                write_unit(&mut ctx, writer, Some(unit_name), unit, options.width_pad_unit)?;
            }
        }
        EnumGroupingUnits::Document(root) => {
            ctx.builder_report.add_warning(format!(
                "No top-level {} found; flattening the whole document into one table.",
                options.tag_unit
            ));
            ctx.builder_report.add_unit();
            write_unit(&mut ctx, writer, None, root, options.width_pad_document)?;
        }
    }

    if ctx.builder_report.tables.is_empty() {
        return Err(ConvertArxmlError::NoTables);
    }
    Ok(ctx.builder_report.build())
}

fn write_unit(
    ctx: &mut SpecConvertContext<'_>,
    writer: &mut XlsxWriter,
    unit_name: Option<&str>,
    unit: XmlElement<'_>,
    width_pad: usize,
) -> Result<(), ConvertArxmlError> {
    let c_unit_label = unit_name.unwrap_or(&ctx.options.sheet_name_fallback);

    let flatten_result = flatten_element(unit, &ctx.options.policy_flatten);
    if flatten_result.records.is_empty() {
        ctx.builder_report
            .add_skipped(format!("Table {c_unit_label:?} has no records; skipped."));
        return Ok(());
    }
    if let Err(msg) = validate_sheet_extent(
        flatten_result.records.len(),
        flatten_result.depth_max + TUP_COLS_FIXED.len(),
        1,
    ) {
        ctx.builder_report
            .add_skipped(format!("Table {c_unit_label:?} skipped: {msg}"));
        return Ok(());
    }

    let table = emit_table(
        unit_name,
        flatten_result,
        &ctx.options.sheet_name_fallback,
        &mut ctx.set_names_existing,
    );
    let df = table.to_dataframe().map_err(ConvertArxmlError::Write)?;

    let sheet_options = SpecXlsxSheetWriteOptions {
        policy_width: SpecColumnWidthPolicy {
            width_pad,
            ..Default::default()
        },
        ..Default::default()
    };
    let report_sheet = match writer.write_sheet_from_dataframe(&df, &table.name, &sheet_options) {
        Ok(report_sheet) => report_sheet,
        Err(msg) => {
            ctx.builder_report
                .add_skipped(format!("Table {c_unit_label:?} skipped: {msg}"));
            return Ok(());
        }
    };

    for warning in &report_sheet.warnings {
        ctx.builder_report.add_warning(warning.clone());
    }
    ctx.builder_report.add_table(SpecTableSummary {
        table_name: report_sheet.sheet_name.clone(),
        unit_name: unit_name.map(ToString::to_string),
        n_rows: report_sheet.n_rows,
        n_cols: report_sheet.n_cols,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_writer() -> XlsxWriter {
        let options = SpecConvertOptions::default();
        XlsxWriter::new(
            std::env::temp_dir().join("arxmlkit_convert_unit_test.xlsx"),
            &options.fmt_text,
            &options.fmt_header,
        )
    }

    #[test]
    fn test_discover_units_under_container() {
        let doc = parse_xml_document(
            b"<AUTOSAR><AR-PACKAGES>\
                <AR-PACKAGE><SHORT-NAME>A</SHORT-NAME></AR-PACKAGE>\
                <OTHER/>\
                <AR-PACKAGE><SHORT-NAME>B</SHORT-NAME></AR-PACKAGE>\
              </AR-PACKAGES></AUTOSAR>",
        )
        .expect("parse");
        match discover_grouping_units(&doc, &SpecConvertOptions::default()) {
            EnumGroupingUnits::Units(l_units) => assert_eq!(l_units.len(), 2),
            EnumGroupingUnits::Document(_) => panic!("expected units"),
        }
    }

    #[test]
    fn test_discover_falls_back_to_document() {
        let options = SpecConvertOptions::default();
        for c_doc in [
            "<AUTOSAR><ELEMENTS/></AUTOSAR>",
            "<AUTOSAR><AR-PACKAGES/></AUTOSAR>",
        ] {
            let doc = parse_xml_document(c_doc.as_bytes()).expect("parse");
            assert!(matches!(
                discover_grouping_units(&doc, &options),
                EnumGroupingUnits::Document(_)
            ));
        }
    }

    #[test]
    fn test_convert_document_skips_unnamed_units() {
        let doc = parse_xml_document(
            b"<AUTOSAR><AR-PACKAGES>\
                <AR-PACKAGE><ELEMENTS/></AR-PACKAGE>\
                <AR-PACKAGE><SHORT-NAME>Pkg</SHORT-NAME></AR-PACKAGE>\
                <AR-PACKAGE><SHORT-NAME>Pkg</SHORT-NAME></AR-PACKAGE>\
              </AR-PACKAGES></AUTOSAR>",
        )
        .expect("parse");
        let mut writer = create_writer();
        let report =
            convert_document(&doc, &mut writer, &SpecConvertOptions::default()).expect("convert");

        assert_eq!(report.cnt_units, 3);
        assert_eq!(report.cnt_skipped, 1);
        let l_names: Vec<_> = report.tables.iter().map(|t| t.table_name.as_str()).collect();
        assert_eq!(l_names, vec!["Pkg", "Pkg_1"]);
        assert_eq!(report.warnings, vec!["Skipped an AR-PACKAGE without SHORT-NAME."]);
    }

    #[test]
    fn test_unit_names_keep_surrounding_whitespace() {
        let doc = parse_xml_document(
            b"<AUTOSAR><AR-PACKAGES>\
                <AR-PACKAGE><SHORT-NAME> Pkg </SHORT-NAME></AR-PACKAGE>\
                <AR-PACKAGE><SHORT-NAME>Pkg</SHORT-NAME></AR-PACKAGE>\
                <AR-PACKAGE><SHORT-NAME>  </SHORT-NAME></AR-PACKAGE>\
                <AR-PACKAGE><SHORT-NAME/></AR-PACKAGE>\
              </AR-PACKAGES></AUTOSAR>",
        )
        .expect("parse");
        let mut writer = create_writer();
        let report =
            convert_document(&doc, &mut writer, &SpecConvertOptions::default()).expect("convert");

        assert_eq!(report.cnt_skipped, 0);
        let l_names: Vec<_> = report.tables.iter().map(|t| t.table_name.as_str()).collect();
        assert_eq!(l_names, vec![" Pkg ", "Pkg", "  ", "Sheet"]);
        assert_eq!(report.tables[0].unit_name.as_deref(), Some(" Pkg "));
    }

    #[test]
    fn test_rejected_sheet_skips_only_that_unit() {
        let doc = parse_xml_document(
            b"<AUTOSAR><AR-PACKAGES>\
                <AR-PACKAGE><SHORT-NAME>History</SHORT-NAME></AR-PACKAGE>\
                <AR-PACKAGE><SHORT-NAME>Kept</SHORT-NAME></AR-PACKAGE>\
              </AR-PACKAGES></AUTOSAR>",
        )
        .expect("parse");
        let mut writer = create_writer();
        let report =
            convert_document(&doc, &mut writer, &SpecConvertOptions::default()).expect("convert");

        assert_eq!(report.cnt_units, 2);
        assert_eq!(report.cnt_skipped, 1);
        let l_names: Vec<_> = report.tables.iter().map(|t| t.table_name.as_str()).collect();
        assert_eq!(l_names, vec!["Kept"]);
        assert!(report.warnings[0].starts_with("Table \"History\" skipped:"));
    }

    #[test]
    fn test_convert_document_without_tables_is_an_error() {
        let doc = parse_xml_document(
            b"<AUTOSAR><AR-PACKAGES><AR-PACKAGE/></AR-PACKAGES></AUTOSAR>",
        )
        .expect("parse");
        let mut writer = create_writer();
        let err = convert_document(&doc, &mut writer, &SpecConvertOptions::default())
            .expect_err("no tables");
        assert!(matches!(err, ConvertArxmlError::NoTables));
    }

    #[test]
    fn test_whole_document_fallback_table() {
        let doc = parse_xml_document(b"<AUTOSAR><ADMIN-DATA><LANGUAGE>EN</LANGUAGE></ADMIN-DATA></AUTOSAR>")
            .expect("parse");
        let mut writer = create_writer();
        let report =
            convert_document(&doc, &mut writer, &SpecConvertOptions::default()).expect("convert");

        assert_eq!(report.table_count(), 1);
        let summary = &report.tables[0];
        assert_eq!(summary.table_name, "ARXML_Data");
        assert_eq!(summary.unit_name, None);
        assert_eq!(summary.n_rows, 3);
        assert_eq!(summary.n_cols, 3 + 4);
    }
}
