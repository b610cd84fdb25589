//! Character cursor with save/restore, used by the recursive descent rules.

use super::ParseError;

/// Saved cursor position, restored with [`Cursor::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// A position-tracking view over the input text.
///
/// Every rule that may fail part way takes a [`Mark`] first and resets to it
/// on failure, so an unmatched alternative never consumes input.
#[derive(Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    /// Text consumed between `mark` and the current position.
    pub fn since(&self, mark: Mark) -> &'a str {
        &self.input[mark.0..self.pos]
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn starts_with(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Consumes and returns the next character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes the next character if it satisfies the predicate.
    pub fn next_if(&mut self, predicate: impl Fn(char) -> bool) -> Option<char> {
        self.peek().filter(|&c| predicate(c))?;
        self.bump()
    }

    /// Consumes characters while the predicate holds. Returns `None` if nothing matched.
    pub fn next_while(&mut self, predicate: impl Fn(char) -> bool) -> Option<&'a str> {
        let start = self.mark();
        while self.next_if(&predicate).is_some() {}
        Some(self.since(start)).filter(|s| !s.is_empty())
    }

    /// Consumes an exact literal.
    pub fn eat(&mut self, literal: &str) -> bool {
        if self.starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        self.next_while(char::is_whitespace);
    }

    /// Skips whitespace and `--` line comments inside a statement.
    pub fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            if !self.starts_with("--") {
                return;
            }
            self.next_while(|c| c != '\n');
        }
    }

    /// Consumes a keyword, case-insensitively, ending at a word boundary.
    /// Leading trivia is skipped; nothing is consumed on a mismatch.
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        let start = self.mark();
        self.skip_trivia();
        let matched = self
            .rest()
            .get(..keyword.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(keyword));
        if matched {
            self.pos += keyword.len();
            if !self.peek().is_some_and(is_word_char) {
                return true;
            }
        }
        self.reset(start);
        false
    }

    /// Consumes a sequence of keywords, or nothing at all.
    pub fn eat_keywords(&mut self, keywords: &[&str]) -> bool {
        let start = self.mark();
        if keywords.iter().all(|keyword| self.eat_keyword(keyword)) {
            return true;
        }
        self.reset(start);
        false
    }

    /// Consumes a punctuation character after skipping trivia.
    pub fn eat_char(&mut self, expected: char) -> bool {
        let start = self.mark();
        self.skip_trivia();
        if self.next_if(|c| c == expected).is_some() {
            return true;
        }
        self.reset(start);
        false
    }

    /// Like [`Cursor::eat_char`], but a mismatch is a syntax error.
    pub fn expect_char(&mut self, expected: char, description: &str) -> Result<(), ParseError> {
        if self.eat_char(expected) {
            Ok(())
        } else {
            Err(self.error(description))
        }
    }

    pub fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error(&format!("`{keyword}`")))
        }
    }

    /// Line breaks between two positions, `from` first.
    pub fn newlines_between(&self, from: Mark, to: Mark) -> usize {
        self.input[from.0..to.0].matches('\n').count()
    }

    /// 1-based line and column of a position. Scans from the start of the input.
    pub fn line_column(&self, mark: Mark) -> (usize, usize) {
        let before = &self.input[..mark.0];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }

    /// Builds a syntax error at the next significant character.
    pub fn error(&mut self, expected: &str) -> ParseError {
        let start = self.mark();
        self.skip_trivia();
        let (line, column) = self.line_column(self.mark());
        let found = self.describe_next();
        self.reset(start);
        ParseError::Syntax { line, column, expected: expected.to_owned(), found }
    }

    fn describe_next(&self) -> String {
        let rest = self.rest();
        let Some(first) = rest.chars().next() else {
            return "end of input".to_owned();
        };
        if !is_word_char(first) {
            return format!("`{first}`");
        }
        let word: String = rest.chars().take_while(|&c| is_word_char(c)).take(32).collect();
        format!("`{word}`")
    }
}

/// Characters that may continue a bare identifier or keyword.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
