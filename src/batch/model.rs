use std::collections::BTreeMap;

use crate::foundation::error::{EncarteError, EncarteResult};

/// Width of one rendered item, in pixels and user units.
pub const ITEM_WIDTH: u32 = 1080;

/// Height of one rendered item, in pixels and user units.
pub const ITEM_HEIGHT: u32 = 1080;

/// One record of input data, keyed by column name.
///
/// Rows are produced externally from tabular input and are immutable once
/// read. Lookups trim surrounding whitespace and treat blank values as
/// absent.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, String>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Look up a column value, trimmed; `None` when missing or blank.
    pub fn value(&self, column: &str) -> Option<&str> {
        let v = self.0.get(column)?.trim();
        (!v.is_empty()).then_some(v)
    }
}

impl FromIterator<(String, String)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Binding from required semantic roles to actual column names.
///
/// All three required roles must name a column before a batch may run. The
/// optional image role is accepted for mapping-file compatibility but unused
/// by this pipeline.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FieldMapping {
    /// Column holding the product code.
    pub code: String,
    /// Column holding the product name.
    pub name: String,
    /// Column holding the price.
    pub price: String,
    /// Column holding an image reference (unused).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FieldMapping {
    /// Check that every required role is bound to a column name.
    pub fn validate(&self) -> EncarteResult<()> {
        let mut unbound = Vec::new();
        for (role, column) in [
            ("code", &self.code),
            ("name", &self.name),
            ("price", &self.price),
        ] {
            if column.trim().is_empty() {
                unbound.push(role);
            }
        }
        if unbound.is_empty() {
            Ok(())
        } else {
            Err(EncarteError::mapping_incomplete(format!(
                "unbound roles: {}",
                unbound.join(", ")
            )))
        }
    }
}

/// Export-format selection; at least one must be enabled.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ExportFormats {
    /// Individual composited PNG images.
    #[serde(default)]
    pub images: bool,
    /// Single combined vector sheet.
    #[serde(default)]
    pub grid: bool,
    /// Multi-page PDF document.
    #[serde(default)]
    pub document: bool,
}

impl ExportFormats {
    /// Whether any format is selected.
    pub fn any(self) -> bool {
        self.images || self.grid || self.document
    }

    /// Whether any raster-based format is selected.
    pub fn any_raster(self) -> bool {
        self.images || self.document
    }
}

/// Output format identifier used in export-failure reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ExportFormat {
    /// Individual composited PNG images.
    Images,
    /// Single combined vector sheet.
    Grid,
    /// Multi-page PDF document.
    Document,
}

/// Failure while serializing one output format.
///
/// Other formats already produced remain valid when one export fails.
#[derive(Clone, Debug)]
pub struct ExportFailure {
    /// The format that failed.
    pub format: ExportFormat,
    /// Human-readable reason.
    pub reason: String,
}

/// Orchestrator state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchState {
    /// No batch running.
    #[default]
    Idle,
    /// Template gate in progress.
    Validating,
    /// Rows being processed.
    Running,
    /// All rows settled; building combined outputs.
    Aggregating,
    /// Batch finished (possibly with per-row failures).
    Done,
    /// Template validation failed; no rows were processed.
    Failed,
    /// Batch rejected before validation (no format selected, or an
    /// incomplete field mapping).
    Rejected,
}

/// Final status of one input row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowStatus {
    /// Placeholders filled; the row contributed to the requested outputs.
    Rendered,
    /// Row missing one or more required mapped values; not an error.
    Skipped {
        /// Human-readable reason.
        reason: String,
    },
    /// Substitution or composition failed; excluded from raster outputs.
    Failed {
        /// Human-readable reason.
        reason: String,
    },
}

/// Per-row record in a batch result.
#[derive(Clone, Debug)]
pub struct RowDisposition {
    /// Zero-based index of the source row.
    pub row_index: usize,
    /// Final status.
    pub status: RowStatus,
}

#[cfg(test)]
#[path = "../../tests/unit/batch/model.rs"]
mod tests;
