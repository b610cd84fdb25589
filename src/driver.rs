//! Whole-input pipeline: parse every statement, map them to schema items,
//! render each item, and assemble the diagram.
//!
//! Parsing completes before anything is rendered, so a syntax error anywhere
//! in the input produces no output at all.

use tracing::info;

use crate::config::RenderConfig;
use crate::grammar::{self, ParseError};
use crate::render::{Header, preamble, render_item};
use crate::schema::{SchemaItem, item_from_statement};

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to serialize schema: {0}")]
    Json(#[from] serde_json::Error),
}

/// What [`run`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Graphviz DOT source.
    #[default]
    Dot,
    /// The parsed schema model as JSON.
    Json,
}

/// Parse the input and return its schema items in source order.
///
/// # Errors
///
/// Returns the first fatal [`ParseError`].
pub fn extract(input: &str) -> Result<Vec<SchemaItem>, ParseError> {
    let statements = grammar::parse(input)?;
    let statement_count = statements.len();
    let items: Vec<SchemaItem> = statements.into_iter().filter_map(item_from_statement).collect();
    info!(statements = statement_count, items = items.len(), "parsed schema");
    Ok(items)
}

/// Render the whole input as a DOT digraph.
///
/// # Errors
///
/// Returns the first fatal [`ParseError`]; nothing is rendered in that case.
pub fn generate(input: &str, header: &Header, config: &RenderConfig) -> Result<String, ParseError> {
    let items = extract(input)?;
    let mut out = preamble(header);
    for item in &items {
        let fragment = render_item(item, config);
        if fragment.is_empty() {
            continue;
        }
        out.push_str(&fragment);
        out.push('\n');
    }
    out.push_str("}\n");
    Ok(out)
}

/// Serialize the schema model of the input as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`DriverError::Parse`] on a syntax error.
pub fn generate_json(input: &str) -> Result<String, DriverError> {
    let items = extract(input)?;
    Ok(serde_json::to_string_pretty(&items)?)
}

/// Produce the output for `format`.
///
/// # Errors
///
/// See [`generate`] and [`generate_json`].
pub fn run(input: &str, header: &Header, config: &RenderConfig, format: OutputFormat) -> Result<String, DriverError> {
    match format {
        OutputFormat::Dot => Ok(generate(input, header, config)?),
        OutputFormat::Json => generate_json(input),
    }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;
