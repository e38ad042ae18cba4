pub mod export;
pub mod types;

pub use export::{ReportError, export_html, render_html, summarize, write_output};
pub use types::{DEFAULT_MAX_AUTHORS, ExportSummary, RenderStyle};
