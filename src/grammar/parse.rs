//! Recursive descent parser for SQL DDL dumps.
//!
//! Top level is an ordered choice tried statement by statement:
//! comment, block comment, `CREATE TABLE`, `ALTER TABLE ... ADD CONSTRAINT ...
//! FOREIGN KEY`, and finally a catch-all that skips to the next `;`.
//!
//! Rules return `Ok(None)` when they do not match, leaving the cursor where it
//! was. Once a rule has seen enough of its prefix to be sure of the statement
//! kind it commits, and any later mismatch is returned as a [`ParseError`].

use tracing::debug;

use super::ParseError;
use super::cursor::{Cursor, Mark, is_word_char};
use super::syntax::{
    AddForeignKey, CreateTable, FieldClause, ForeignKeyClause, Statement, StatementKind, TablePartSyntax,
};

type Result<T> = std::result::Result<T, ParseError>;

/// Deepest parenthesis nesting accepted inside a column definition.
pub const MAX_PAREN_DEPTH: usize = 256;

/// Parse a whole DDL script into its statements, in source order.
///
/// # Errors
///
/// Returns a [`ParseError`] if a statement is not terminated by `;`, or if a
/// `CREATE TABLE` / `ALTER TABLE ... FOREIGN KEY` statement is malformed after
/// its prefix. No statements are returned in that case.
pub fn parse(input: &str) -> Result<Vec<Statement>> {
    let mut parser = Parser::new(input);
    let mut statements = Vec::new();
    while let Some(statement) = parser.statement()? {
        debug!(line = statement.line, kind = statement.kind.name(), "parsed statement");
        statements.push(statement);
    }
    Ok(statements)
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    /// Last statement start, and its line number. Statement lines are counted
    /// forward from here so the input is scanned once.
    anchor: Mark,
    anchor_line: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let cursor = Cursor::new(input);
        let anchor = cursor.mark();
        Self { cursor, anchor, anchor_line: 1 }
    }

    /// Line of `mark`, which must not precede the previous anchor.
    fn line_at(&mut self, mark: Mark) -> usize {
        self.anchor_line += self.cursor.newlines_between(self.anchor, mark);
        self.anchor = mark;
        self.anchor_line
    }

    /// Runs a rule, rewinding the cursor if it does not match.
    fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.cursor.mark();
        let result = rule(self);
        if result.is_none() {
            self.cursor.reset(start);
        }
        result
    }

    fn unterminated(&self, what: &'static str, start: Mark) -> ParseError {
        let (line, column) = self.cursor.line_column(start);
        ParseError::Unterminated { what, line, column }
    }

    fn statement(&mut self) -> Result<Option<Statement>> {
        self.cursor.skip_whitespace();
        if self.cursor.is_eof() {
            return Ok(None);
        }
        let line = self.line_at(self.cursor.mark());

        let kind = if let Some(text) = self.line_comment() {
            StatementKind::Comment(text)
        } else if let Some(text) = self.block_comment()? {
            StatementKind::Comment(text)
        } else if let Some(table) = self.create_table()? {
            StatementKind::CreateTable(table)
        } else if let Some(foreign_key) = self.add_foreign_key()? {
            StatementKind::AddForeignKey(foreign_key)
        } else {
            StatementKind::Other(self.other_statement()?)
        };
        Ok(Some(Statement { line, kind }))
    }

    fn line_comment(&mut self) -> Option<String> {
        if !self.cursor.eat("--") {
            return None;
        }
        let text = self.cursor.next_while(|c| c != '\n' && c != '\r').unwrap_or_default();
        Some(text.trim().to_owned())
    }

    fn block_comment(&mut self) -> Result<Option<String>> {
        let start = self.cursor.mark();
        if !self.cursor.eat("/*") {
            return Ok(None);
        }
        let body = self.cursor.mark();
        loop {
            if self.cursor.starts_with("*/") {
                let text = self.cursor.since(body).trim().to_owned();
                self.cursor.eat("*/");
                return Ok(Some(text));
            }
            if self.cursor.bump().is_none() {
                return Err(self.unterminated("block comment", start));
            }
        }
    }

    /// `CREATE TABLE [IF NOT EXISTS] name ( parts ) options ;`
    ///
    /// Commits once the opening parenthesis of the column list is seen.
    fn create_table(&mut self) -> Result<Option<CreateTable>> {
        let Some((name, if_not_exists)) = self.attempt(|p| {
            p.cursor.eat_keywords(&["CREATE", "TABLE"]).then_some(())?;
            let if_not_exists = p.cursor.eat_keywords(&["IF", "NOT", "EXISTS"]);
            let name = p.qualified_name()?;
            p.cursor.eat_char('(').then_some((name, if_not_exists))
        }) else {
            return Ok(None);
        };

        let parts = self.table_parts()?;
        self.cursor.expect_char(')', "`,` or `)` after a table part")?;
        let options = self.table_options()?;
        self.cursor.expect_char(';', "`;` after the table definition")?;

        debug!(table = %name, parts = parts.len(), options = ?options, "matched CREATE TABLE");
        Ok(Some(CreateTable { name, if_not_exists, parts, options }))
    }

    fn table_parts(&mut self) -> Result<Vec<TablePartSyntax>> {
        let mut parts = Vec::new();
        loop {
            parts.push(self.table_part()?);
            if !self.cursor.eat_char(',') {
                return Ok(parts);
            }
        }
    }

    /// Ordered choice: a foreign key constraint, otherwise a field.
    fn table_part(&mut self) -> Result<TablePartSyntax> {
        if let Some(clause) = self.foreign_key_clause()? {
            return Ok(TablePartSyntax::ForeignKey(clause));
        }
        let segments = self.segments()?;
        if segments.is_empty() {
            return Err(self.cursor.error("a column definition"));
        }
        Ok(TablePartSyntax::Field(FieldClause { segments }))
    }

    /// `[CONSTRAINT name] FOREIGN KEY (cols) REFERENCES table [(cols)] actions`
    ///
    /// Commits after `FOREIGN KEY`; other constraints are left to the field rule.
    fn foreign_key_clause(&mut self) -> Result<Option<ForeignKeyClause>> {
        let Some(constraint) = self.attempt(|p| {
            let constraint = if p.cursor.eat_keyword("CONSTRAINT") {
                Some(p.identifier()?)
            } else {
                None
            };
            p.cursor.eat_keywords(&["FOREIGN", "KEY"]).then_some(constraint)
        }) else {
            return Ok(None);
        };

        if !self.cursor.eat_char('(') {
            // MySQL allows an index name before the column list.
            self.identifier();
            self.cursor.expect_char('(', "`(` before the foreign key columns")?;
        }
        let columns = self.column_list_rest("a column name", "`,` or `)` after a foreign key column")?;
        self.cursor.expect_keyword("REFERENCES")?;
        let references = self.qualified_name().ok_or_else(|| self.cursor.error("a referenced table name"))?;
        let referenced_columns = if self.cursor.eat_char('(') {
            self.column_list_rest("a referenced column name", "`,` or `)` after a referenced column")?
        } else {
            Vec::new()
        };
        let actions = self.segments()?;
        Ok(Some(ForeignKeyClause { constraint, columns, references, referenced_columns, actions }))
    }

    /// Trailing `ENGINE=InnoDB DEFAULT CHARSET=utf8` style options.
    fn table_options(&mut self) -> Result<Vec<String>> {
        let mut options = Vec::new();
        loop {
            options.extend(self.segments()?);
            if !self.cursor.eat_char(',') {
                return Ok(options);
            }
        }
    }

    /// `ALTER TABLE [ONLY] table ADD CONSTRAINT name FOREIGN KEY (col) REFERENCES table (col) [DEFERRABLE] ;`
    ///
    /// Commits after `FOREIGN KEY`, so other `ADD CONSTRAINT` forms are skipped.
    fn add_foreign_key(&mut self) -> Result<Option<AddForeignKey>> {
        let Some((table, constraint)) = self.attempt(|p| {
            p.cursor.eat_keywords(&["ALTER", "TABLE"]).then_some(())?;
            p.cursor.eat_keyword("ONLY");
            let table = p.qualified_name()?;
            p.cursor.eat_keywords(&["ADD", "CONSTRAINT"]).then_some(())?;
            let constraint = p.identifier()?;
            p.cursor.eat_keywords(&["FOREIGN", "KEY"]).then_some((table, constraint))
        }) else {
            return Ok(None);
        };

        self.cursor.expect_char('(', "`(` before the foreign key column")?;
        let column = self.bare_word().ok_or_else(|| self.cursor.error("a column name"))?;
        self.cursor.expect_char(')', "`)` after the foreign key column")?;
        self.cursor.expect_keyword("REFERENCES")?;
        let references = self.qualified_name().ok_or_else(|| self.cursor.error("a referenced table name"))?;
        self.cursor.expect_char('(', "`(` before the referenced column")?;
        let referenced_column = self.bare_word().ok_or_else(|| self.cursor.error("a referenced column name"))?;
        self.cursor.expect_char(')', "`)` after the referenced column")?;

        let mut actions = Vec::new();
        while let Some(word) = self.bare_word() {
            actions.push(word);
        }
        self.cursor.expect_char(';', "`;` after the foreign key")?;

        debug!(%table, %column, %references, %referenced_column, "matched ALTER TABLE ADD FOREIGN KEY");
        Ok(Some(AddForeignKey { table, constraint, column, references, referenced_column, actions }))
    }

    /// Anything up to and including the next `;`.
    fn other_statement(&mut self) -> Result<String> {
        let start = self.cursor.mark();
        let text = self.cursor.next_while(|c| c != ';').unwrap_or_default();
        if !self.cursor.eat(";") {
            return Err(self.unterminated("statement", start));
        }
        Ok(text.trim().to_owned())
    }

    /// `ident [, ident]* )`, after the opening parenthesis.
    fn column_list_rest(&mut self, column: &str, separator: &str) -> Result<Vec<String>> {
        let mut columns = Vec::new();
        loop {
            columns.push(self.identifier().ok_or_else(|| self.cursor.error(column))?);
            if !self.cursor.eat_char(',') {
                break;
            }
        }
        self.cursor.expect_char(')', separator)?;
        Ok(columns)
    }

    /// `ident [. ident]*`, e.g. `public.users` or `` `shop`.`orders` ``.
    fn qualified_name(&mut self) -> Option<String> {
        let mut name = self.identifier()?;
        while let Some(part) = self.attempt(|p| {
            p.cursor.next_if(|c| c == '.')?;
            p.raw_identifier()
        }) {
            name.push('.');
            name.push_str(&part);
        }
        Some(name)
    }

    fn identifier(&mut self) -> Option<String> {
        self.attempt(|p| {
            p.cursor.skip_trivia();
            p.raw_identifier()
        })
    }

    /// A bare, backtick-quoted or double-quoted identifier, without its quotes.
    fn raw_identifier(&mut self) -> Option<String> {
        match self.cursor.peek()? {
            quote @ ('`' | '"') => self.attempt(|p| {
                p.cursor.bump();
                let name = p.cursor.next_while(|c| c != quote)?;
                p.cursor.next_if(|c| c == quote)?;
                Some(name.to_owned())
            }),
            c if c.is_alphabetic() || c == '_' => self.cursor.next_while(is_word_char).map(str::to_owned),
            _ => None,
        }
    }

    /// An unquoted run of alphanumerics and underscores.
    fn bare_word(&mut self) -> Option<String> {
        self.attempt(|p| {
            p.cursor.skip_trivia();
            p.cursor.next_while(|c| c.is_alphanumeric() || c == '_').map(str::to_owned)
        })
    }

    /// Whitespace-separated segments up to the next `,`, `)` or `;`.
    fn segments(&mut self) -> Result<Vec<String>> {
        let mut segments = Vec::new();
        loop {
            self.cursor.skip_trivia();
            let start = self.cursor.mark();
            while self.token()? {}
            let segment = self.cursor.since(start);
            if segment.is_empty() {
                return Ok(segments);
            }
            segments.push(segment.to_owned());
        }
    }

    /// Consumes one token, returning false if none starts here.
    fn token(&mut self) -> Result<bool> {
        match self.cursor.peek() {
            Some('\'') => self.quoted('\'', "string literal")?,
            Some('"') => self.quoted('"', "quoted identifier")?,
            Some('`') => self.quoted('`', "quoted identifier")?,
            Some('(') => self.paren_group(1)?,
            Some(c) if is_token_char(c) => {
                self.cursor.next_while(is_token_char);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// A quoted run. The quote is escaped by doubling it or with a backslash.
    fn quoted(&mut self, quote: char, what: &'static str) -> Result<()> {
        let start = self.cursor.mark();
        self.cursor.bump();
        loop {
            match self.cursor.bump() {
                Some('\\') if quote != '`' => {
                    self.cursor.bump();
                }
                Some(c) if c == quote => {
                    if self.cursor.next_if(|c| c == quote).is_none() {
                        return Ok(());
                    }
                }
                Some(_) => {}
                None => return Err(self.unterminated(what, start)),
            }
        }
    }

    /// A balanced parenthesized group, nested up to [`MAX_PAREN_DEPTH`]. Quoted
    /// text inside the group may contain parentheses.
    fn paren_group(&mut self, depth: usize) -> Result<()> {
        if depth > MAX_PAREN_DEPTH {
            return Err(self.cursor.error(&format!("at most {MAX_PAREN_DEPTH} nested parentheses")));
        }
        let start = self.cursor.mark();
        self.cursor.bump();
        loop {
            match self.cursor.peek() {
                Some(')') => {
                    self.cursor.bump();
                    return Ok(());
                }
                Some('(') => self.paren_group(depth + 1)?,
                Some(quote @ ('\'' | '"' | '`')) => self.quoted(quote, "quoted text")?,
                Some(_) => {
                    self.cursor.bump();
                }
                None => return Err(self.unterminated("parenthesized group", start)),
            }
        }
    }
}

/// Characters of an unquoted field token.
fn is_token_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, ',' | '(' | ')' | ';' | '\'' | '"' | '`')
}
