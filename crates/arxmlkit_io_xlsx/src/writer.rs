//! Workbook writer that renders string DataFrames as styled worksheets.

use std::collections::BTreeSet;
use std::path::PathBuf;

use polars::prelude::{Column, DataFrame};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};

use crate::conf::N_LEN_EXCEL_CELL_MAX;
use crate::spec::{EnumAlignH, EnumAlignV, SpecCellFormat, SpecSheetReport, SpecXlsxSheetWriteOptions};
use crate::util::{calculate_column_width, estimate_unicode_string_width, validate_sheet_extent};

const N_ROWS_HEADER: usize = 1;

/// Buffers sheets in memory and saves the workbook once on [`Self::close`].
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_body: Format,
    fmt_header: Format,
    set_sheet_names_existing: BTreeSet<String>,
    l_sheet_reports: Vec<SpecSheetReport>,
    if_closed: bool,
}

impl XlsxWriter {
    pub fn new(path_file_out: PathBuf, fmt_text: &SpecCellFormat, fmt_header: &SpecCellFormat) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_body: derive_rust_xlsx_format(fmt_text),
            fmt_header: derive_rust_xlsx_format(fmt_header),
            set_sheet_names_existing: BTreeSet::new(),
            l_sheet_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Reports of the sheets written so far, in workbook order.
    pub fn sheet_reports(&self) -> &[SpecSheetReport] {
        &self.l_sheet_reports
    }

    /// Save the workbook. Calling it again is a no-op.
    pub fn close(&mut self) -> Result<(), String> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(derive_xlsx_error_text)?;
        self.if_closed = true;
        Ok(())
    }

    /// Write `df_data` as one sheet: column names form the header row.
    ///
    /// `sheet_name` must already be a valid Excel sheet name; a name equal
    /// (case-insensitively) to an earlier sheet is rejected. Every column must
    /// be a string column; nulls and empty strings become styled blank cells.
    /// Text longer than [`N_LEN_EXCEL_CELL_MAX`] is truncated, with one warning
    /// per affected column. On error the workbook is left unchanged.
    pub fn write_sheet_from_dataframe(
        &mut self,
        df_data: &DataFrame,
        sheet_name: &str,
        options: &SpecXlsxSheetWriteOptions,
    ) -> Result<&SpecSheetReport, String> {
        if self.if_closed {
            return Err("Cannot write after close().".to_string());
        }
        validate_sheet_extent(df_data.height(), df_data.width(), N_ROWS_HEADER)?;

        let c_key = sheet_name.to_lowercase();
        if self.set_sheet_names_existing.contains(&c_key) {
            return Err(format!("Duplicate sheet name {sheet_name:?}."));
        }

        let mut report = SpecSheetReport {
            sheet_name: sheet_name.to_string(),
            n_rows: df_data.height(),
            n_cols: df_data.width(),
            warnings: Vec::new(),
        };

        let mut worksheet = Worksheet::new();
        worksheet
            .set_name(sheet_name)
            .map_err(derive_xlsx_error_text)?;

        for (n_idx_col, col) in df_data.get_columns().iter().enumerate() {
            let (n_width_text, n_truncated) = write_column(
                &mut worksheet,
                cast_col_num(n_idx_col)?,
                col,
                &self.fmt_header,
                &self.fmt_body,
            )?;
            if n_truncated > 0 {
                report.warn(format!(
                    "Sheet {sheet_name:?} column {:?}: {n_truncated} cell(s) truncated to {N_LEN_EXCEL_CELL_MAX} characters.",
                    col.name().as_str()
                ));
            }
            if options.policy_width.if_enabled {
                let n_width = calculate_column_width(n_width_text, &options.policy_width);
                worksheet
                    .set_column_width(cast_col_num(n_idx_col)?, n_width as f64)
                    .map_err(derive_xlsx_error_text)?;
            }
        }

        if let Some(n_height) = options.height_header_row {
            worksheet
                .set_row_height(0, n_height)
                .map_err(derive_xlsx_error_text)?;
        }
        if options.n_rows_freeze > 0 {
            worksheet
                .set_freeze_panes(options.n_rows_freeze, 0)
                .map_err(derive_xlsx_error_text)?;
        }

        self.workbook.push_worksheet(worksheet);
        self.set_sheet_names_existing.insert(c_key);
        self.l_sheet_reports.push(report);
        self.l_sheet_reports
            .last()
            .ok_or_else(|| "Sheet report missing after write.".to_string())
    }
}

/// Cut `value` to the Excel cell limit.
fn truncate_cell_text(value: &str) -> &str {
    match value.char_indices().nth(N_LEN_EXCEL_CELL_MAX) {
        Some((n_byte, _)) => &value[..n_byte],
        None => value,
    }
}

/// Write header and body cells of one column.
///
/// Returns the widest text width and the number of truncated body cells.
fn write_column(
    worksheet: &mut Worksheet,
    n_col: u16,
    col: &Column,
    fmt_header: &Format,
    fmt_body: &Format,
) -> Result<(usize, usize), String> {
    let c_header = col.name().as_str();
    write_text_cell(worksheet, 0, n_col, c_header, fmt_header)?;
    let mut n_width_max = estimate_unicode_string_width(c_header);
    let mut n_truncated = 0;

    let ca_values = col
        .str()
        .map_err(|err| format!("Column {c_header:?} is not a string column: {err}"))?;
    for (n_row_local, value) in ca_values.iter().enumerate() {
        let c_value_raw = value.unwrap_or_default();
        let c_value = truncate_cell_text(c_value_raw);
        if c_value.len() < c_value_raw.len() {
            n_truncated += 1;
        }
        n_width_max = n_width_max.max(estimate_unicode_string_width(c_value));
        write_text_cell(
            worksheet,
            cast_row_num(N_ROWS_HEADER + n_row_local)?,
            n_col,
            c_value,
            fmt_body,
        )?;
    }
    Ok((n_width_max, n_truncated))
}

fn write_text_cell(
    worksheet: &mut Worksheet,
    n_row: u32,
    n_col: u16,
    value: &str,
    format: &Format,
) -> Result<(), String> {
    let result = if value.is_empty() {
        worksheet.write_blank(n_row, n_col, format)
    } else {
        worksheet.write_string_with_format(n_row, n_col, value, format)
    };
    result.map(|_| ()).map_err(derive_xlsx_error_text)
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();
    if let Some(c_font) = &spec.font_name {
        format = format.set_font_name(c_font.as_str());
    }
    if let Some(n_size) = spec.font_size {
        format = format.set_font_size(n_size);
    }
    if spec.bold == Some(true) {
        format = format.set_bold();
    }
    if let Some(align_h) = spec.align_h {
        format = format.set_align(match align_h {
            EnumAlignH::Left => FormatAlign::Left,
            EnumAlignH::Center => FormatAlign::Center,
            EnumAlignH::Right => FormatAlign::Right,
        });
    }
    if let Some(align_v) = spec.align_v {
        format = format.set_align(match align_v {
            EnumAlignV::Top => FormatAlign::Top,
            EnumAlignV::Center => FormatAlign::VerticalCenter,
            EnumAlignV::Bottom => FormatAlign::Bottom,
        });
    }
    if let Some(c_color) = &spec.font_color {
        format = format.set_font_color(c_color.as_str());
    }
    if let Some(c_color) = &spec.fill_color {
        format = format.set_background_color(c_color.as_str());
    }
    format
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}
