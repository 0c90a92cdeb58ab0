//! Query families and baseline labels.
//!
//! A label such as `"NQ5 (count)"` names both the query (its 3-character
//! family prefix) and the baseline variant it was run with.

use crate::Result;
use crate::diagnostics;

use anyhow::bail;
use std::fmt;

/// Long-form label to short code, as used in the missing-cell report.
static SHORT_CODES: &[(&str, &str)] = &[
    ("NQ5 (count)", "NQ5"),
    ("NQ5 (flow-wrapping)", "NQ5FW"),
    ("NQ5 (sort)", "NQ5WS"),
    ("NQ8 (count)", "NQ8"),
    ("NQ8 (flow-wrapping)", "NQ8FW"),
    ("NQ8 (sort)", "NQ8WS"),
];

/// Query family, identified by the label prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    /// NQ5, sliding windows.
    Sliding,
    /// NQ8, tumbling windows.
    Tumbling,
}

impl Family {
    pub const ALL: [Family; 2] = [Family::Sliding, Family::Tumbling];

    pub fn prefix(self) -> &'static str {
        match self {
            Family::Sliding => "NQ5",
            Family::Tumbling => "NQ8",
        }
    }

    /// Suffix used in per-node chart file names.
    pub fn suffix(self) -> &'static str {
        match self {
            Family::Sliding => "sliding",
            Family::Tumbling => "tumbling",
        }
    }

    pub fn other(self) -> Family {
        match self {
            Family::Sliding => Family::Tumbling,
            Family::Tumbling => Family::Sliding,
        }
    }

    /// True if `label` belongs to this family.
    pub fn matches(self, label: &str) -> bool {
        label.get(..3) == Some(self.prefix())
    }

    /// Every known baseline label of this family.
    pub fn baseline_labels(self) -> Vec<&'static str> {
        SHORT_CODES
            .iter()
            .map(|(label, _)| *label)
            .filter(|label| self.matches(label))
            .collect()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Short report code of a long-form baseline label.
pub fn short_code(label: &str) -> Result<&'static str> {
    match SHORT_CODES.iter().find(|(long, _)| *long == label) {
        Some(&(_, code)) => Ok(code),
        None => bail!(
            "{}",
            diagnostics::error_message(format!("unknown query baseline label {:?}", label))
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_codes_cover_both_families() {
        assert_eq!(short_code("NQ5 (count)").unwrap(), "NQ5");
        assert_eq!(short_code("NQ5 (flow-wrapping)").unwrap(), "NQ5FW");
        assert_eq!(short_code("NQ5 (sort)").unwrap(), "NQ5WS");
        assert_eq!(short_code("NQ8 (count)").unwrap(), "NQ8");
        assert_eq!(short_code("NQ8 (flow-wrapping)").unwrap(), "NQ8FW");
        assert_eq!(short_code("NQ8 (sort)").unwrap(), "NQ8WS");
    }

    #[test]
    fn unknown_label_is_an_error() {
        let err = short_code("NQ7 (count)").unwrap_err();
        assert!(err.to_string().contains("NQ7 (count)"));
    }

    #[test]
    fn family_matches_on_prefix_only() {
        assert!(Family::Sliding.matches("NQ5 (sort)"));
        assert!(Family::Sliding.matches("NQ5-custom"));
        assert!(!Family::Sliding.matches("NQ8 (sort)"));
        assert!(!Family::Tumbling.matches("NQ"));
    }

    #[test]
    fn baseline_labels_per_family() {
        assert_eq!(
            Family::Tumbling.baseline_labels(),
            vec!["NQ8 (count)", "NQ8 (flow-wrapping)", "NQ8 (sort)"]
        );
        assert_eq!(Family::Sliding.other(), Family::Tumbling);
    }
}
