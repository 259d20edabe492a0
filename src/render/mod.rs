//! Rendering — one concrete HTML renderer behind a format switch.
//!
//! Only one output format exists; the enum keeps the CLI surface honest
//! without speculative renderer traits.

pub mod html;

use crate::index::CommentIndex;
use crate::metadata::Assembly;
use anyhow::{anyhow, Result};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
}

impl OutputFormat {
    /// Parses a format name, case-insensitively.
    pub fn from_name(name: &str) -> Result<OutputFormat> {
        match name.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            _ => Err(anyhow!("unknown format: {}. Use html", name)),
        }
    }
}

/// Configuration for one rendering pass.
#[derive(Debug, Default)]
pub struct RenderOptions {
    pub debug: bool,
    /// HTML fragment placed at the top of the page.
    pub readme: Option<String>,
    /// CSS replacing the built-in stylesheet.
    pub styles: Option<String>,
}

/// Renders the full document for the given format.
pub fn render(
    format: OutputFormat,
    assembly: &Assembly,
    index: &CommentIndex,
    opts: &RenderOptions,
) -> String {
    match format {
        OutputFormat::Html => html::render(assembly, index, opts),
    }
}
