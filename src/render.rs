//! Graphviz DOT rendering for the schema model.
//!
//! Tables become `shape=none` nodes with an HTML-like label, one row per
//! column; every column row exposes the column name as a port so foreign key
//! edges can attach to it.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::RenderConfig;
use crate::schema::{Edge, Field, SchemaItem, Table};

/// Source description printed at the top of the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub source: String,
    pub timestamp: String,
}

impl Header {
    #[must_use]
    pub fn new(source: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self { source: source.into(), timestamp: timestamp.into() }
    }

    /// Header stamped with the current UTC time in RFC 3339 format.
    #[must_use]
    pub fn now(source: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        let timestamp = now.format(&Rfc3339).unwrap_or_else(|_| now.unix_timestamp().to_string());
        Self::new(source, timestamp)
    }
}

/// Header comment plus the opening of the digraph with its layout attributes.
#[must_use]
pub fn preamble(header: &Header) -> String {
    format!(
        r#"/*
 * Graphviz of '{source}', created {timestamp}
 */
digraph g {{
  graph [
    rankdir="LR",
    scale=false,
    overlap=0,
    splines=polyline,
    concentrate=1,
    pad="0.5",
    nodesep="0.5",
    ranksep="2"
  ];
"#,
        source = header.source.replace("*/", "* /"),
        timestamp = header.timestamp.replace("*/", "* /"),
    )
}

#[must_use]
pub fn render_item(item: &SchemaItem, config: &RenderConfig) -> String {
    match item {
        SchemaItem::Table(table) => render_table(table, config),
        SchemaItem::ForeignKey(edge) => render_edge(edge),
    }
}

/// The table node followed by its inline foreign key edges.
#[must_use]
pub fn render_table(table: &Table, config: &RenderConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {} [\n", quote_id(&table.name)));
    out.push_str("    shape=none\n");
    out.push_str("    label=<\n");
    out.push_str("      <table border=\"0\" cellspacing=\"0\" cellborder=\"1\">\n");
    out.push_str(&format!(
        "        <tr><td bgcolor=\"{}\"><font face=\"Times-bold\" point-size=\"20\">{}</font></td></tr>\n",
        config.title_bgcolor,
        escape_html(&table.name)
    ));
    for field in table.fields() {
        out.push_str("        ");
        out.push_str(&render_field(field, config));
        out.push('\n');
    }
    out.push_str("      </table>\n");
    out.push_str("    >];");

    let edges: Vec<String> = table.edges().iter().map(render_edge).collect();
    if !edges.is_empty() {
        out.push('\n');
        out.push_str(&edges.join("\n"));
    }
    out
}

/// One label row: the bold column name and its descriptor.
#[must_use]
pub fn render_field(field: &Field, config: &RenderConfig) -> String {
    let port = escape_html(&field.port);
    format!(
        "<tr><td bgcolor=\"{bg}\" align=\"left\" port=\"{port}\"><font face=\"Times-bold\">{port}</font>  \
         <font color=\"{fg}\">{descriptor}</font></td></tr>",
        bg = config.field_bgcolor,
        fg = config.descriptor_color,
        descriptor = escape_html(&field.descriptor),
    )
}

/// `"source":column -> "target":column [color="#rrggbb"]`
#[must_use]
pub fn render_edge(edge: &Edge) -> String {
    format!(
        "  {}:{} -> {}:{} [color=\"{}\"]",
        quote_id(&edge.source_table),
        port_ref(&edge.source_column),
        quote_id(&edge.target_table),
        port_ref(&edge.target_column),
        edge.color
    )
}

/// Plain identifiers are emitted bare; anything else is quoted.
fn port_ref(column: &str) -> String {
    if !column.is_empty() && column.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        column.to_owned()
    } else {
        quote_id(column)
    }
}

/// A DOT quoted string. `"` is the only character DOT escapes inside one.
fn quote_id(id: &str) -> String {
    format!("\"{}\"", id.replace('"', "\\\""))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
