//! Shared helper functions.

use std::path::{Path, PathBuf};

/// Drop a namespace qualifier from a tag or attribute name.
///
/// Handles both `prefix:LOCAL` and Clark notation `{uri}LOCAL`.
pub fn strip_namespace_prefix(name: &str) -> &str {
    let c_rest = match name.rfind('}') {
        Some(n_pos) => &name[n_pos + 1..],
        None => name,
    };
    match c_rest.rfind(':') {
        Some(n_pos) => &c_rest[n_pos + 1..],
        None => c_rest,
    }
}

/// Resolve a relative output path against the directory of the input file.
pub fn resolve_output_path(path_file_in: &Path, path_file_out: &Path) -> PathBuf {
    if path_file_out.is_absolute() {
        return path_file_out.to_path_buf();
    }
    match path_file_in.parent() {
        Some(path_dir_in) => path_dir_in.join(path_file_out),
        None => path_file_out.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_namespace_prefix() {
        assert_eq!(strip_namespace_prefix("AR-PACKAGE"), "AR-PACKAGE");
        assert_eq!(strip_namespace_prefix("ar:AR-PACKAGE"), "AR-PACKAGE");
        assert_eq!(
            strip_namespace_prefix("{http://autosar.org/schema/r4.0}SHORT-NAME"),
            "SHORT-NAME"
        );
        assert_eq!(strip_namespace_prefix(""), "");
    }

    #[test]
    fn test_resolve_output_path() {
        let path_in = Path::new("/data/model/ecu.arxml");
        assert_eq!(
            resolve_output_path(path_in, Path::new("out.xlsx")),
            PathBuf::from("/data/model/out.xlsx")
        );
        assert_eq!(
            resolve_output_path(path_in, Path::new("/tmp/out.xlsx")),
            PathBuf::from("/tmp/out.xlsx")
        );
        assert_eq!(
            resolve_output_path(Path::new("ecu.arxml"), Path::new("out.xlsx")),
            PathBuf::from("out.xlsx")
        );
    }
}
