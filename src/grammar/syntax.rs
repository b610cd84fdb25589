//! Syntax tree produced by the grammar. Holds matched text only; no rendering
//! decisions are made here.

/// One top-level statement and the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub line: usize,
    pub kind: StatementKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// `-- ...` or `/* ... */`, without the delimiters.
    Comment(String),
    CreateTable(CreateTable),
    AddForeignKey(AddForeignKey),
    /// Any other statement, without its terminating `;`.
    Other(String),
}

impl StatementKind {
    /// Short label used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Comment(_) => "comment",
            Self::CreateTable(_) => "create_table",
            Self::AddForeignKey(_) => "add_foreign_key",
            Self::Other(_) => "other",
        }
    }
}

/// `CREATE TABLE [IF NOT EXISTS] name ( parts ) options ;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    pub name: String,
    pub if_not_exists: bool,
    pub parts: Vec<TablePartSyntax>,
    /// Trailing table options such as `ENGINE=InnoDB`, kept as raw segments.
    pub options: Vec<String>,
}

/// One comma-separated element of a `CREATE TABLE` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TablePartSyntax {
    Field(FieldClause),
    ForeignKey(ForeignKeyClause),
}

/// A column (or any other non-foreign-key element) as whitespace-separated
/// segments. A segment is a run of adjacent tokens, e.g. `VARCHAR(255)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldClause {
    pub segments: Vec<String>,
}

/// `[CONSTRAINT name] FOREIGN KEY (cols) REFERENCES table [(cols)] actions...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyClause {
    pub constraint: Option<String>,
    pub columns: Vec<String>,
    pub references: String,
    /// Empty when the referenced column list is omitted.
    pub referenced_columns: Vec<String>,
    /// Trailing referential actions, e.g. `ON DELETE CASCADE`.
    pub actions: Vec<String>,
}

/// `ALTER TABLE [ONLY] table ADD CONSTRAINT name FOREIGN KEY (col) REFERENCES table (col) ... ;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddForeignKey {
    pub table: String,
    pub constraint: String,
    pub column: String,
    pub references: String,
    pub referenced_column: String,
    pub actions: Vec<String>,
}
