//! Output file names derived from the category selection and radius.

use std::path::{Path, PathBuf};

use looker_core::Category;

const REAL_ESTATE_LABEL: &str = "Real Estate Agencies";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputPaths {
    pub spreadsheet: PathBuf,
    pub map: PathBuf,
}

impl OutputPaths {
    pub(crate) fn new(dir: &Path, selected: &[&Category], radius: u32) -> Self {
        let (spreadsheet, map) = match selected {
            [only] if only.label == REAL_ESTATE_LABEL => (
                format!("real_estate_agencies_{radius}m.xlsx"),
                format!("real_estate_map_{radius}m.html"),
            ),
            _ => {
                let cats = selected
                    .iter()
                    .map(|c| normalize_label(c.label))
                    .collect::<Vec<_>>()
                    .join("_");
                (
                    format!("places_{cats}_{radius}m.xlsx"),
                    format!("map_{cats}_{radius}m.html"),
                )
            }
        };
        Self {
            spreadsheet: dir.join(spreadsheet),
            map: dir.join(map),
        }
    }
}

/// Lowercase, spaces to `_`, `/` to `-`, commas dropped.
pub(crate) fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .replace(' ', "_")
        .replace('/', "-")
        .replace(',', "")
}
