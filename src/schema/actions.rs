//! Semantic actions: pure mapping from syntax tree nodes to the schema model.

use tracing::debug;

use super::{Edge, Field, ForeignKey, SchemaItem, Table, TablePart};
use crate::grammar::syntax::{
    AddForeignKey, CreateTable, FieldClause, ForeignKeyClause, Statement, StatementKind, TablePartSyntax,
};

/// Map one statement to its schema item. Comments and unrecognized
/// statements yield `None`.
#[must_use]
pub fn item_from_statement(statement: Statement) -> Option<SchemaItem> {
    let line = statement.line;
    match statement.kind {
        StatementKind::CreateTable(table) => Some(SchemaItem::Table(table_from_statement(table))),
        StatementKind::AddForeignKey(fk) => Some(SchemaItem::ForeignKey(edge_from_statement(fk))),
        StatementKind::Comment(_) => None,
        StatementKind::Other(text) => {
            debug!(line, statement = %text, "skipped statement");
            None
        }
    }
}

#[must_use]
pub fn table_from_statement(table: CreateTable) -> Table {
    let parts = table
        .parts
        .into_iter()
        .map(|part| match part {
            TablePartSyntax::Field(field) => TablePart::Field(field_from_clause(field)),
            TablePartSyntax::ForeignKey(fk) => TablePart::ForeignKey(foreign_key_from_clause(fk)),
        })
        .collect();
    Table { name: table.name, parts }
}

/// First segment is the column name, the rest is the descriptor.
#[must_use]
pub fn field_from_clause(clause: FieldClause) -> Field {
    let mut segments = clause.segments.iter();
    let port = segments.next().map(String::as_str).map(extract_port).unwrap_or_default();
    let descriptor = segments.map(String::as_str).collect::<Vec<_>>().join(" ").replace('"', "\\\"");
    debug!(%port, %descriptor, "field");
    Field { port, descriptor }
}

/// Only the first column on each side is kept. A missing referenced column
/// list means the referenced column has the same name as the local one.
#[must_use]
pub fn foreign_key_from_clause(clause: ForeignKeyClause) -> ForeignKey {
    let source_column = clause.columns.into_iter().next().unwrap_or_default();
    let target_column = clause.referenced_columns.into_iter().next().unwrap_or_else(|| source_column.clone());
    debug!(%source_column, target_table = %clause.references, %target_column, "inline foreign key");
    ForeignKey { source_column, target_table: clause.references, target_column }
}

#[must_use]
pub fn edge_from_statement(fk: AddForeignKey) -> Edge {
    debug!(table = %fk.table, column = %fk.column, "standalone foreign key");
    Edge::new(&fk.table, &fk.column, &fk.references, &fk.referenced_column)
}

/// Strips every backtick and quote character from a column name.
#[must_use]
pub fn extract_port(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '`' | '"' | '\'')).collect()
}
