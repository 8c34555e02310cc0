//! Depth-first flattening of an element subtree into records.

use crate::element::XmlElement;
use crate::spec::{SpecFlattenPolicy, SpecFlattenResult, SpecRecord};

/// Flatten `root` and its descendants into pre-order records.
///
/// Each record carries the short names of its ancestors (from `root` down to
/// itself); `depth_max` is the longest such path. The short-name child is
/// consumed into its parent's record and never becomes a record of its own.
///
/// Traversal uses an explicit work stack, so arbitrarily deep trees do not
/// grow the call stack.
pub fn flatten_element(root: XmlElement<'_>, policy: &SpecFlattenPolicy) -> SpecFlattenResult {
    let mut l_records: Vec<SpecRecord> = Vec::new();
    let mut n_depth_max = 0usize;

    // (element, index of the parent's record)
    let mut l_stack: Vec<(XmlElement<'_>, Option<usize>)> = vec![(root, None)];

    while let Some((element, n_idx_parent)) = l_stack.pop() {
        let record = derive_record(element, n_idx_parent.map(|n_idx| &l_records[n_idx]), policy);
        n_depth_max = usize::max(n_depth_max, record.depth());

        let n_idx_record = l_records.len();
        l_records.push(record);

        // Reversed so that the first child is popped first.
        for child in element
            .children()
            .filter(|child| child.tag() != policy.tag_short_name)
            .rev()
        {
            l_stack.push((child, Some(n_idx_record)));
        }
    }

    SpecFlattenResult {
        records: l_records,
        depth_max: n_depth_max,
    }
}

/// Build the record of one element given its parent's record.
pub fn derive_record(
    element: XmlElement<'_>,
    parent: Option<&SpecRecord>,
    policy: &SpecFlattenPolicy,
) -> SpecRecord {
    let short_name = element
        .find_child(&policy.tag_short_name)
        .map(|child| child.text().to_string())
        .unwrap_or_default();

    let mut ancestry_path = match parent {
        Some(record_parent) => {
            let mut l_path = Vec::with_capacity(record_parent.ancestry_path.len() + 1);
            l_path.extend_from_slice(&record_parent.ancestry_path);
            l_path
        }
        None => Vec::with_capacity(1),
    };
    ancestry_path.push(short_name.clone());

    SpecRecord {
        tag: element.tag().to_string(),
        short_name,
        dest: element
            .attribute(&policy.attr_dest)
            .unwrap_or_default()
            .to_string(),
        text: element.text().trim().to_string(),
        ancestry_path,
    }
}
