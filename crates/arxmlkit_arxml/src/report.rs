//! Conversion report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::spec::SpecTableSummary;

/// Aggregate counters and diagnostics for one conversion run.
#[derive(Debug, Default, Clone)]
pub struct ReportConvert {
    /// Output workbook path, set once the workbook is saved.
    pub file_out: Option<PathBuf>,
    /// Grouping units discovered (1 in whole-document mode).
    pub cnt_units: u64,
    /// Body rows written across all tables.
    pub cnt_rows: u64,
    /// Grouping units skipped with a diagnostic.
    pub cnt_skipped: u64,
    /// Tables written, in workbook order.
    pub tables: Vec<SpecTableSummary>,
    /// Non-fatal diagnostics.
    pub warnings: Vec<String>,
}

impl ReportConvert {
    /// Number of tables written.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_units".to_string(), self.cnt_units);
        dict_counts.insert("cnt_tables".to_string(), self.table_count() as u64);
        dict_counts.insert("cnt_rows".to_string(), self.cnt_rows);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} units={} tables={} rows={} skipped={} warnings={}",
            dict_counts["cnt_units"],
            dict_counts["cnt_tables"],
            dict_counts["cnt_rows"],
            dict_counts["cnt_skipped"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportConvert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[ARXML]"))
    }
}

/// Mutable accumulator for conversion statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportConvertBuilder {
    /// See [`ReportConvert::cnt_units`].
    pub cnt_units: u64,
    /// See [`ReportConvert::cnt_rows`].
    pub cnt_rows: u64,
    /// See [`ReportConvert::cnt_skipped`].
    pub cnt_skipped: u64,
    /// See [`ReportConvert::tables`].
    pub tables: Vec<SpecTableSummary>,
    /// See [`ReportConvert::warnings`].
    pub warnings: Vec<String>,
}

impl ReportConvertBuilder {
    /// Increment discovered-unit count by one.
    pub fn add_unit(&mut self) {
        self.cnt_units += 1;
    }

    /// Record one written table.
    pub fn add_table(&mut self, summary: SpecTableSummary) {
        self.cnt_rows += summary.n_rows as u64;
        self.tables.push(summary);
    }

    /// Record one skipped unit together with its diagnostic.
    pub fn add_skipped(&mut self, warning: String) {
        self.cnt_skipped += 1;
        self.warnings.push(warning);
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportConvert {
        ReportConvert {
            file_out: None,
            cnt_units: self.cnt_units,
            cnt_rows: self.cnt_rows,
            cnt_skipped: self.cnt_skipped,
            tables: self.tables,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_convert_counts_and_format() {
        let mut builder = ReportConvertBuilder::default();
        builder.add_unit();
        builder.add_unit();
        builder.add_table(SpecTableSummary {
            table_name: "Pkg".to_string(),
            unit_name: Some("Pkg".to_string()),
            n_rows: 7,
            n_cols: 6,
        });
        builder.add_skipped("Skipped an AR-PACKAGE without SHORT-NAME.".to_string());

        let report = builder.build();
        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_units"], 2);
        assert_eq!(dict_counts["cnt_tables"], 1);
        assert_eq!(dict_counts["cnt_rows"], 7);
        assert_eq!(dict_counts["cnt_skipped"], 1);
        assert_eq!(dict_counts["cnt_warnings"], 1);

        let txt = report.format("[ARXML]");
        assert_eq!(txt, "[ARXML] units=2 tables=1 rows=7 skipped=1 warnings=1");
        assert_eq!(report.to_string(), txt);
    }
}
