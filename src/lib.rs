//! Encarte turns a vector template, a background image, and a table of
//! product rows into a batch of rendered promotional artifacts.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: the template gate checks all required placeholder ids
//!    exist ([`validate_template`]); failure is fatal to the batch.
//! 2. **Substitute**: each row's values are filled into a copy of the
//!    template ([`fill_template`]), with free text wrapped into fixed-width
//!    description lines ([`wrap_lines`]).
//! 3. **Compose**: each filled item is rasterized over the background into a
//!    PNG ([`compose_item`]); rows fan out across a thread pool and fail
//!    independently.
//! 4. **Assemble**: all items tile into one combined vector sheet
//!    ([`assemble_grid`]) and successful rasters become pages of one PDF
//!    ([`PagedDocumentBuilder`]).
//!
//! [`run_batch`] drives rows through these stages, tracks monotone progress,
//! isolates per-row failures, and returns the full artifact set as a
//! [`BatchResult`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Immutable stages**: every stage returns fresh values; templates and
//!   rows are never mutated, and nothing is retained across batch runs.
//! - **Isolated failures**: a bad row is recorded and excluded, never fatal;
//!   only the template gate and format selection abort a batch.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod batch;
mod document;
mod foundation;
mod render;
mod sheet;
mod template;

pub use assets::decode::{PreparedImage, decode_background, parse_svg};
pub use batch::model::{
    BatchState, ExportFailure, ExportFormat, ExportFormats, FieldMapping, ITEM_HEIGHT, ITEM_WIDTH,
    Row, RowDisposition, RowStatus,
};
pub use batch::orchestrator::{
    BatchObserver, BatchRequest, BatchResult, NullObserver, run_batch,
};
pub use document::pages::{DOCUMENT_FILENAME, PagedDocument, PagedDocumentBuilder};
pub use foundation::error::{EncarteError, EncarteResult};
pub use foundation::text::{escape_xml_text, normalize};
pub use render::compositor::{RasterArtifact, compose_item};
pub use sheet::grid::{GRID_COLUMNS, GRID_FILENAME, GRID_SPACING, GridArtifact, assemble_grid};
pub use template::substitute::{RenderedItem, fill_template};
pub use template::validate::{REQUIRED_PLACEHOLDERS, validate_template};
pub use template::wrap::{DESCRIPTION_LINE_CHARS, DESCRIPTION_LINES, wrap_lines};
