//! # Export
//!
//! Output naming and PNG writing for finished composites.

pub mod naming;
pub mod writer;

pub use naming::{fallback_source_name, output_filename, DEFAULT_OUTPUT_NAME, OUTPUT_SUFFIX};
pub use writer::{encode_png, ExportFailure, ExportSummary, ExportWriter};
