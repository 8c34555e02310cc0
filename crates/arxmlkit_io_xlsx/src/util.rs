//! Sheet naming, sheet limits and column width helpers.

use std::collections::BTreeSet;

use crate::conf::{
    C_SHEET_NAME_EMPTY, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    N_WIDTH_EXCEL_COLUMN_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::SpecColumnWidthPolicy;

////////////////////////////////////////////////////////////////////////////////
// #region SheetNames

/// Truncate to the Excel sheet-name length, then replace illegal chars.
///
/// Excel also rejects a leading or trailing apostrophe, so those are replaced
/// as well. An empty result becomes [`C_SHEET_NAME_EMPTY`].
pub fn sanitize_sheet_name(name: &str, replace_to: char) -> String {
    let n_len = name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).count();
    let c_name: String = name
        .chars()
        .take(N_LEN_EXCEL_SHEET_NAME_MAX)
        .enumerate()
        .map(|(n_idx, chr)| {
            let if_edge_quote = chr == '\'' && (n_idx == 0 || n_idx + 1 == n_len);
            if TUP_EXCEL_ILLEGAL.contains(&chr) || if_edge_quote {
                replace_to
            } else {
                chr
            }
        })
        .collect();

    if c_name.is_empty() {
        C_SHEET_NAME_EMPTY.to_string()
    } else {
        c_name
    }
}

/// `base_idx` (e.g. `Pkg_2`), cutting `base` so the result stays within 31 chars.
pub fn create_sheet_identifier(base: &str, idx: usize) -> String {
    let c_suffix = format!("_{idx}");
    let n_len_base = N_LEN_EXCEL_SHEET_NAME_MAX
        .saturating_sub(c_suffix.len())
        .max(1);
    let c_base: String = base.chars().take(n_len_base).collect();
    c_base + &c_suffix
}

/// Make `name` unique against `set_names_existing` and register it.
///
/// Excel compares sheet names case-insensitively, so the set holds lowercased
/// keys. Collisions try `name_1`, `name_2`, ... until one is free.
pub fn derive_unique_sheet_name(name: &str, set_names_existing: &mut BTreeSet<String>) -> String {
    let mut c_candidate = name.to_string();
    let mut n_idx = 0usize;
    while set_names_existing.contains(&c_candidate.to_lowercase()) {
        n_idx += 1;
        c_candidate = create_sheet_identifier(name, n_idx);
    }
    set_names_existing.insert(c_candidate.to_lowercase());
    c_candidate
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetLimits

/// Check that `height_body` rows plus `height_header` and `width` columns fit one sheet.
pub fn validate_sheet_extent(
    height_body: usize,
    width: usize,
    height_header: usize,
) -> Result<(), String> {
    if width == 0 {
        return Err("Sheet must have >= 1 column.".to_string());
    }
    if width > N_NCOLS_EXCEL_MAX {
        return Err(format!(
            "Excel limit overflow: {width} columns exceed {N_NCOLS_EXCEL_MAX}."
        ));
    }
    let n_rows_total = height_body.saturating_add(height_header);
    if n_rows_total > N_NROWS_EXCEL_MAX {
        return Err(format!(
            "Excel limit overflow: {n_rows_total} rows exceed {N_NROWS_EXCEL_MAX}."
        ));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnWidth

/// Approximate display width; non-ASCII (mostly CJK) glyphs count as 1.6.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let (n_ascii, n_other) = s.chars().fold((0usize, 0usize), |(n_a, n_o), chr| {
        if chr.is_ascii() {
            (n_a + 1, n_o)
        } else {
            (n_a, n_o + 1)
        }
    });
    n_ascii + (n_other as f64 * 1.6).round() as usize
}

/// Widest text plus padding, clamped into the policy and Excel bounds.
pub fn calculate_column_width(width_text: usize, policy: &SpecColumnWidthPolicy) -> usize {
    let n_min = policy.width_min.max(1);
    let n_max = policy.width_max.clamp(n_min, N_WIDTH_EXCEL_COLUMN_MAX.max(n_min));
    (width_text + policy.width_pad).clamp(n_min, n_max)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_sheet_name_truncates_then_replaces() {
        assert_eq!(sanitize_sheet_name("a/b\\c*d?e[f]g:h", '_'), "a_b_c_d_e_f_g_h");

        let c_long = "X".repeat(40);
        assert_eq!(sanitize_sheet_name(&c_long, '_').chars().count(), 31);

        assert_eq!(sanitize_sheet_name("", '_'), "Sheet");
        assert_eq!(sanitize_sheet_name("'quoted'", '_'), "_quoted_");
        assert_eq!(sanitize_sheet_name("it's", '_'), "it's");
    }

    #[test]
    fn test_create_sheet_identifier_respects_length_cap() {
        assert_eq!(create_sheet_identifier("Pkg", 1), "Pkg_1");

        let c_name = create_sheet_identifier(&"Y".repeat(31), 12);
        assert_eq!(c_name.chars().count(), 31);
        assert!(c_name.ends_with("_12"));
    }

    #[test]
    fn test_derive_unique_sheet_name_suffixes_collisions() {
        let mut set_names = BTreeSet::new();
        assert_eq!(derive_unique_sheet_name("Pkg", &mut set_names), "Pkg");
        assert_eq!(derive_unique_sheet_name("Pkg", &mut set_names), "Pkg_1");
        assert_eq!(derive_unique_sheet_name("pkg", &mut set_names), "pkg_2");
        assert_eq!(derive_unique_sheet_name("Pkg_1", &mut set_names), "Pkg_1_1");
    }

    #[test]
    fn test_validate_sheet_extent_limits() {
        assert!(validate_sheet_extent(10, 5, 1).is_ok());
        assert!(validate_sheet_extent(0, 0, 1).is_err());
        assert!(validate_sheet_extent(0, N_NCOLS_EXCEL_MAX + 1, 1).is_err());
        assert!(validate_sheet_extent(N_NROWS_EXCEL_MAX, 4, 1).is_err());
        assert!(validate_sheet_extent(N_NROWS_EXCEL_MAX - 1, 4, 1).is_ok());
    }

    #[test]
    fn test_calculate_column_width_pads_and_clamps() {
        let policy = SpecColumnWidthPolicy {
            width_pad: 5,
            ..Default::default()
        };
        assert_eq!(calculate_column_width(10, &policy), 15);
        assert_eq!(calculate_column_width(1_000, &policy), 255);
        assert_eq!(estimate_unicode_string_width("ab"), 2);
        assert_eq!(estimate_unicode_string_width("表"), 2);
    }
}
