//! CLI presentation: text and json formatters per command family.

mod catalog;
mod payload;

pub use catalog::{format_describe, format_operations, format_services};
pub use payload::{render_failure, render_payload, render_preview};
