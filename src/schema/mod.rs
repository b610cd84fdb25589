//! Schema model built from parsed DDL: tables with their columns, and the
//! foreign key edges between them.

pub mod actions;

use serde::Serialize;

use crate::color::edge_color;

pub use actions::{
    edge_from_statement, extract_port, field_from_clause, foreign_key_from_clause, item_from_statement,
    table_from_statement,
};

/// What one recognized statement contributes to the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaItem {
    /// A `CREATE TABLE` with its inline foreign keys.
    Table(Table),
    /// A standalone `ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY`.
    ForeignKey(Edge),
}

/// A table and its parts in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub parts: Vec<TablePart>,
}

impl Table {
    /// Columns, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.parts.iter().filter_map(|part| match part {
            TablePart::Field(field) => Some(field),
            TablePart::ForeignKey(_) => None,
        })
    }

    /// Inline foreign keys bound to this table as their source.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TablePart::ForeignKey(fk) => Some(fk.bind(&self.name)),
                TablePart::Field(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TablePart {
    Field(Field),
    ForeignKey(ForeignKey),
}

/// A column row. `port` is the column name used as the node anchor;
/// `descriptor` is the type and modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub port: String,
    pub descriptor: String,
}

/// An inline foreign key. The source table is the enclosing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
}

impl ForeignKey {
    #[must_use]
    pub fn bind(&self, source_table: &str) -> Edge {
        Edge::new(source_table, &self.source_column, &self.target_table, &self.target_column)
    }
}

/// A directed foreign key relation `(source_table, source_column) -> (target_table, target_column)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    /// `#rrggbb`, derived from the four names above.
    pub color: String,
}

impl Edge {
    #[must_use]
    pub fn new(source_table: &str, source_column: &str, target_table: &str, target_column: &str) -> Self {
        Self {
            source_table: source_table.to_owned(),
            source_column: source_column.to_owned(),
            target_table: target_table.to_owned(),
            target_column: target_column.to_owned(),
            color: edge_color(source_table, source_column, target_table, target_column),
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
