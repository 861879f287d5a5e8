use rayon::prelude::*;

use crate::{
    assets::decode::PreparedImage,
    batch::model::{
        BatchState, ExportFailure, ExportFormat, ExportFormats, FieldMapping, ITEM_HEIGHT,
        ITEM_WIDTH, Row, RowDisposition, RowStatus,
    },
    batch::progress::ProgressTracker,
    document::pages::{PagedDocument, PagedDocumentBuilder},
    foundation::error::{EncarteError, EncarteResult},
    render::compositor::{RasterArtifact, compose_item},
    sheet::grid::{GridArtifact, assemble_grid},
    template::substitute::{RenderedItem, fill_template},
    template::validate::validate_template,
};

/// Receives orchestrator events: state transitions, progress, per-row
/// skips and failures.
///
/// Implementations must be `Sync`: composition completions are delivered
/// from worker threads. All methods default to no-ops so presentation
/// layers implement only what they consume.
pub trait BatchObserver: Sync {
    /// The orchestrator entered a new state.
    fn state_changed(&self, state: BatchState) {
        let _ = state;
    }

    /// Progress percentage recomputed after a row settled.
    fn progress(&self, percent: u8) {
        let _ = percent;
    }

    /// A row was skipped for missing required values.
    fn row_skipped(&self, row_index: usize, reason: &str) {
        let _ = (row_index, reason);
    }

    /// A row failed during substitution or composition.
    fn row_failed(&self, row_index: usize, reason: &str) {
        let _ = (row_index, reason);
    }
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl BatchObserver for NullObserver {}

/// Everything one batch run needs.
#[derive(Clone, Debug)]
pub struct BatchRequest<'a> {
    /// Template SVG markup.
    pub template: &'a str,
    /// Decoded background bitmap.
    pub background: &'a PreparedImage,
    /// Input rows in original order.
    pub rows: &'a [Row],
    /// Role-to-column bindings.
    pub mapping: &'a FieldMapping,
    /// Requested output formats.
    pub formats: ExportFormats,
    /// Worker thread count for composition; `None` uses the rayon default.
    pub threads: Option<usize>,
}

/// All artifacts and per-row records produced by one batch run.
///
/// A new run starts from a fresh value; nothing is retained across batches.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Individual composited images, present when requested.
    pub images: Vec<RasterArtifact>,
    /// Combined vector sheet, present when requested and at least one row
    /// rendered.
    pub grid: Option<GridArtifact>,
    /// Paged document, present when requested and at least one row
    /// composited successfully.
    pub document: Option<PagedDocument>,
    /// Final status of every input row, in row order.
    pub dispositions: Vec<RowDisposition>,
    /// Per-format export failures; other formats remain valid.
    pub export_failures: Vec<ExportFailure>,
}

impl BatchResult {
    /// Rows skipped for missing required values.
    pub fn skipped(&self) -> impl Iterator<Item = &RowDisposition> {
        self.dispositions
            .iter()
            .filter(|d| matches!(d.status, RowStatus::Skipped { .. }))
    }

    /// Rows that failed during substitution or composition.
    pub fn failed(&self) -> impl Iterator<Item = &RowDisposition> {
        self.dispositions
            .iter()
            .filter(|d| matches!(d.status, RowStatus::Failed { .. }))
    }
}

/// Drive all rows of one batch through the pipeline.
///
/// State machine: `Idle -> Validating -> Running -> Aggregating -> Done`,
/// with `Rejected` when no format is selected or the mapping is incomplete,
/// and `Failed` when template validation fails. Fatal errors abort before
/// any row is processed and leave no partial outputs; per-row errors are
/// isolated, logged, and recorded in the result's dispositions.
///
/// Rows are resolved and filled sequentially in input order; raster
/// composition fans out over a rayon pool, and every scheduled unit settles
/// (success or failure) before combined outputs are built. Progress is
/// recomputed after every settled row as `round(settled / total * 100)` and
/// never decreases.
#[tracing::instrument(skip(req, observer), fields(rows = req.rows.len()))]
pub fn run_batch(req: &BatchRequest<'_>, observer: &dyn BatchObserver) -> EncarteResult<BatchResult> {
    if !req.formats.any() {
        observer.state_changed(BatchState::Rejected);
        return Err(EncarteError::NoFormatSelected);
    }
    if let Err(e) = req.mapping.validate() {
        observer.state_changed(BatchState::Rejected);
        return Err(e);
    }

    observer.state_changed(BatchState::Validating);
    if let Err(e) = validate_template(req.template) {
        observer.state_changed(BatchState::Failed);
        return Err(e);
    }

    observer.state_changed(BatchState::Running);
    let total = req.rows.len();
    let tracker = ProgressTracker::new(total);
    let mut statuses: Vec<RowStatus> = vec![RowStatus::Rendered; total];
    let mut rendered: Vec<RenderedItem> = Vec::with_capacity(total);

    for (i, row) in req.rows.iter().enumerate() {
        let code = row.value(&req.mapping.code);
        let name = row.value(&req.mapping.name);
        let price = row.value(&req.mapping.price);
        let (Some(code), Some(name), Some(price)) = (code, name, price) else {
            let reason = incomplete_reason(row, req.mapping);
            tracing::info!(row = i, %reason, "row skipped");
            observer.row_skipped(i, &reason);
            statuses[i] = RowStatus::Skipped { reason };
            tracker.settle(observer);
            continue;
        };

        match fill_template(req.template, i, code, name, price) {
            Ok(item) => rendered.push(item),
            Err(e) => {
                let reason = e.to_string();
                tracing::error!(row = i, %reason, "substitution failed");
                observer.row_failed(i, &reason);
                statuses[i] = RowStatus::Failed { reason };
                tracker.settle(observer);
            }
        }
    }

    // Fan composition out across rows; completion order is unspecified, but
    // the collected results keep the scheduling (row) order.
    let mut rasters: Vec<RasterArtifact> = Vec::new();
    if req.formats.any_raster() {
        let pool = build_thread_pool(req.threads)?;
        let results: Vec<(usize, EncarteResult<RasterArtifact>)> = pool.install(|| {
            rendered
                .par_iter()
                .map(|item| {
                    let out = compose_item(item, req.background, ITEM_WIDTH, ITEM_HEIGHT);
                    tracker.settle(observer);
                    (item.row_index, out)
                })
                .collect()
        });

        for (row_index, result) in results {
            match result {
                Ok(artifact) => rasters.push(artifact),
                Err(e) => {
                    let reason = e.to_string();
                    tracing::error!(row = row_index, %reason, "composition failed");
                    observer.row_failed(row_index, &reason);
                    statuses[row_index] = RowStatus::Failed { reason };
                }
            }
        }
    } else {
        for _ in &rendered {
            tracker.settle(observer);
        }
    }

    observer.state_changed(BatchState::Aggregating);
    tracker.complete(observer);

    let mut export_failures = Vec::new();

    let grid = (req.formats.grid && !rendered.is_empty())
        .then(|| assemble_grid(&rendered, ITEM_WIDTH, ITEM_HEIGHT));

    let mut document = None;
    if req.formats.document && !rasters.is_empty() {
        match build_document(&rasters) {
            Ok(doc) => document = Some(doc),
            Err(e) => {
                tracing::error!(error = %e, "paged document export failed");
                export_failures.push(ExportFailure {
                    format: ExportFormat::Document,
                    reason: e.to_string(),
                });
            }
        }
    }

    let images = if req.formats.images { rasters } else { Vec::new() };

    observer.state_changed(BatchState::Done);
    Ok(BatchResult {
        images,
        grid,
        document,
        dispositions: statuses
            .into_iter()
            .enumerate()
            .map(|(row_index, status)| RowDisposition { row_index, status })
            .collect(),
        export_failures,
    })
}

fn build_document(rasters: &[RasterArtifact]) -> EncarteResult<PagedDocument> {
    let mut builder = PagedDocumentBuilder::new(ITEM_WIDTH, ITEM_HEIGHT);
    for artifact in rasters {
        builder.append_page(artifact)?;
    }
    builder.finish()
}

fn incomplete_reason(row: &Row, mapping: &FieldMapping) -> String {
    let mut missing = Vec::new();
    for (role, column) in [
        ("code", &mapping.code),
        ("name", &mapping.name),
        ("price", &mapping.price),
    ] {
        if row.value(column).is_none() {
            missing.push(role);
        }
    }
    format!("missing required values: {}", missing.join(", "))
}

fn build_thread_pool(threads: Option<usize>) -> EncarteResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(EncarteError::validation(
            "composition 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| EncarteError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/batch/orchestrator.rs"]
mod tests;
