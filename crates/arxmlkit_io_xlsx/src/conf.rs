//! Excel limits and default style presets.

use crate::spec::{EnumAlignH, EnumAlignV, SpecCellFormat};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length, in characters.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Excel cell text maximum length, in characters.
pub const N_LEN_EXCEL_CELL_MAX: usize = 32_767;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [char; 7] = ['/', '\\', '*', '?', '[', ']', ':'];
/// Excel column width upper bound.
pub const N_WIDTH_EXCEL_COLUMN_MAX: usize = 255;
/// Name used when a sanitized sheet name ends up empty.
pub const C_SHEET_NAME_EMPTY: &str = "Sheet";

/// Style presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumFmtKey {
    /// Body cells.
    Text,
    /// Header row.
    Header,
}

fn derive_base_format() -> SpecCellFormat {
    SpecCellFormat {
        font_name: Some("Arial".to_string()),
        font_size: Some(11.0),
        align_v: Some(EnumAlignV::Center),
        ..Default::default()
    }
}

/// Default style for `key`: Arial 11, vertically centered; bold teal header.
pub fn derive_default_xlsx_format(key: EnumFmtKey) -> SpecCellFormat {
    let fmt_top = match key {
        EnumFmtKey::Text => SpecCellFormat {
            font_color: Some("#202020".to_string()),
            ..Default::default()
        },
        EnumFmtKey::Header => SpecCellFormat {
            bold: Some(true),
            align_h: Some(EnumAlignH::Center),
            font_color: Some("#4D4D4D".to_string()),
            fill_color: Some("#63EFCE".to_string()),
            ..Default::default()
        },
    };
    derive_base_format().overlay(fmt_top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formats_overlay_base_font() {
        let fmt_header = derive_default_xlsx_format(EnumFmtKey::Header);
        assert_eq!(fmt_header.font_name.as_deref(), Some("Arial"));
        assert_eq!(fmt_header.bold, Some(true));
        assert_eq!(fmt_header.align_v, Some(EnumAlignV::Center));
        assert_eq!(fmt_header.fill_color.as_deref(), Some("#63EFCE"));

        let fmt_text = derive_default_xlsx_format(EnumFmtKey::Text);
        assert_eq!(fmt_text.bold, None);
        assert_eq!(fmt_text.font_color.as_deref(), Some("#202020"));
    }
}
