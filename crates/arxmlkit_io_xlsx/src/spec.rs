//! Cell style, sheet options and sheet report models.

////////////////////////////////////////////////////////////////////////////////
// #region CellStyle

/// Horizontal cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumAlignH {
    Left,
    Center,
    Right,
}

/// Vertical cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumAlignV {
    Top,
    Center,
    Bottom,
}

/// Cell style; `None` fields keep the Excel default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCellFormat {
    pub font_name: Option<String>,
    /// Points.
    pub font_size: Option<f64>,
    pub bold: Option<bool>,
    pub align_h: Option<EnumAlignH>,
    pub align_v: Option<EnumAlignV>,
    /// `#RRGGBB`.
    pub font_color: Option<String>,
    /// `#RRGGBB` solid fill.
    pub fill_color: Option<String>,
}

impl SpecCellFormat {
    /// Layer `top` over `self`: every field set in `top` wins.
    pub fn overlay(&self, top: SpecCellFormat) -> SpecCellFormat {
        let base = self.clone();
        SpecCellFormat {
            font_name: top.font_name.or(base.font_name),
            font_size: top.font_size.or(base.font_size),
            bold: top.bold.or(base.bold),
            align_h: top.align_h.or(base.align_h),
            align_v: top.align_v.or(base.align_v),
            font_color: top.font_color.or(base.font_color),
            fill_color: top.fill_color.or(base.fill_color),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetOptions

/// Column width inference: widest header/body text plus padding, clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecColumnWidthPolicy {
    /// Disable to keep Excel's default widths.
    pub if_enabled: bool,
    pub width_min: usize,
    pub width_max: usize,
    /// Added to the widest text of each column.
    pub width_pad: usize,
}

impl Default for SpecColumnWidthPolicy {
    fn default() -> Self {
        Self {
            if_enabled: true,
            width_min: 1,
            width_max: 255,
            width_pad: 2,
        }
    }
}

/// Options for one sheet write.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecXlsxSheetWriteOptions {
    /// Frozen rows from the top; `0` disables the pane.
    pub n_rows_freeze: u32,
    /// Header row height in points; Excel default when `None`.
    pub height_header_row: Option<f64>,
    pub policy_width: SpecColumnWidthPolicy,
}

impl Default for SpecXlsxSheetWriteOptions {
    fn default() -> Self {
        Self {
            n_rows_freeze: 1,
            height_header_row: Some(30.0),
            policy_width: SpecColumnWidthPolicy::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetReport

/// Outcome of one sheet write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecSheetReport {
    /// Final sheet name in the workbook.
    pub sheet_name: String,
    /// Body rows, header excluded.
    pub n_rows: usize,
    pub n_cols: usize,
    /// Non-fatal warnings raised while writing.
    pub warnings: Vec<String>,
}

impl SpecSheetReport {
    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
