//! Rendering module for writing rate sheets to output formats.

mod json;
mod text;

pub use json::{to_json, to_json_value, JsonFormat};
pub use text::{to_text, zones_to_text};
