//! SQL Parser implementation: token cursor, backtracking and statement dispatch.

use tracing::{debug, trace};

use super::error::{ParseError, Result};
use super::options::ParserOptions;
use crate::ast::{ObjectName, Statement};
use crate::lexer::{Keyword, Lexer, Position, Token, TokenKind};

/// A snapshot of the parser cursor, pushed by [`Parser::save_state`].
#[derive(Debug, Clone)]
struct ParserState {
    position: Position,
    current: Token,
    previous: Token,
}

/// SQL Parser.
///
/// A recursive descent parser that pulls tokens from a [`Lexer`] on demand
/// and keeps one current and one previous token. Expressions are parsed with
/// binding powers (see the `pratt` module).
#[derive(Debug)]
pub struct Parser<'a> {
    pub(super) lexer: Lexer<'a>,
    pub(super) current: Token,
    pub(super) previous: Token,
    states: Vec<ParserState>,
    options: ParserOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser and pulls the first token.
    ///
    /// # Errors
    ///
    /// Returns a lexical `ParseError` if the first token cannot be scanned.
    pub fn new(lexer: Lexer<'a>) -> Result<Self> {
        Self::with_options(lexer, ParserOptions::default())
    }

    /// Creates a parser with explicit options.
    ///
    /// # Errors
    ///
    /// Returns a lexical `ParseError` if the first token cannot be scanned.
    pub fn with_options(mut lexer: Lexer<'a>, options: ParserOptions) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            previous: Token::default(),
            states: Vec::new(),
            options,
            depth: 0,
        })
    }

    /// The token under the cursor.
    #[must_use]
    pub const fn current(&self) -> &Token {
        &self.current
    }

    /// The last consumed token, or an `Undefined` token after `backup()`
    /// or before anything was consumed.
    #[must_use]
    pub const fn previous(&self) -> &Token {
        &self.previous
    }

    /// Parses exactly one statement, an optional `;`, then end of input.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError` encountered; there is no recovery.
    pub fn parse(&mut self) -> Result<Statement> {
        let statement = self.parse_statement()?;
        self.match_op(";")?;
        if !self.current.is_eof() {
            return Err(ParseError::unexpected("end of input", &self.current));
        }
        Ok(statement)
    }

    /// Parses a `;`-separated script. Empty statements are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError` encountered.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            while self.match_op(";")? {}
            if self.current.is_eof() {
                break;
            }
            statements.push(self.parse_statement()?);
            if !self.current.is_eof() {
                self.expect_op(";")?;
            }
        }
        Ok(statements)
    }

    /// Parses a single statement, dispatching on its leading token.
    ///
    /// # Errors
    ///
    /// Returns an unknown-construct error if the leading token does not start
    /// a supported statement.
    pub fn parse_statement(&mut self) -> Result<Statement> {
        let line = self.current.line();
        let statement = self.nested(Self::dispatch_statement)?;
        debug!(kind = statement.kind_name(), line, "parsed statement");
        Ok(statement)
    }

    fn dispatch_statement(&mut self) -> Result<Statement> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::Select) => Ok(Statement::Select(self.parse_select()?)),
            TokenKind::Keyword(Keyword::Insert) => Ok(Statement::Insert(self.parse_insert()?)),
            TokenKind::Keyword(Keyword::Update) => Ok(Statement::Update(self.parse_update()?)),
            TokenKind::Keyword(Keyword::Delete) => Ok(Statement::Delete(self.parse_delete()?)),
            TokenKind::Keyword(Keyword::Create) => Ok(Statement::Create(self.parse_create()?)),
            TokenKind::Keyword(Keyword::Drop) => Ok(Statement::Drop(self.parse_drop()?)),
            TokenKind::Keyword(Keyword::Alter) => Ok(Statement::AlterTable(self.parse_alter()?)),
            TokenKind::Identifier if self.check_word("TRUNCATE") => {
                Ok(Statement::Truncate(self.parse_truncate()?))
            }
            TokenKind::Identifier if self.check_word("GRANT") => {
                Ok(Statement::Grant(self.parse_grant()?))
            }
            TokenKind::Identifier if self.check_word("REVOKE") => {
                Ok(Statement::Revoke(self.parse_revoke()?))
            }
            TokenKind::Identifier if self.check_word("MERGE") => {
                Ok(Statement::Merge(self.parse_merge()?))
            }
            _ => Err(ParseError::unknown(
                format!(
                    "Unexpected token at start of statement: {}",
                    self.current.describe()
                ),
                &self.current,
            )),
        }
    }

    // --- Cursor ---

    /// Consumes the current token and pulls the next one from the lexer.
    ///
    /// # Errors
    ///
    /// Returns a lexical `ParseError` if the next token cannot be scanned.
    pub fn advance(&mut self) -> Result<()> {
        let next = self.lexer.next_token()?;
        self.previous = core::mem::replace(&mut self.current, next);
        Ok(())
    }

    /// Returns the token `offset` positions ahead without consuming anything.
    /// `peek(0)` is the current token.
    ///
    /// # Errors
    ///
    /// Returns a lexical `ParseError` if a token in the window cannot be
    /// scanned.
    pub fn peek(&mut self, offset: usize) -> Result<Token> {
        if offset == 0 {
            return Ok(self.current.clone());
        }
        let id = self.save_state();
        let mut scanned = Ok(());
        for _ in 0..offset {
            scanned = self.advance();
            if scanned.is_err() {
                break;
            }
        }
        let token = self.current.clone();
        self.restore_state(id)?;
        scanned.map(|()| token)
    }

    // --- Backtracking ---

    /// Pushes a snapshot of the cursor and returns its id.
    pub fn save_state(&mut self) -> usize {
        let id = self.states.len();
        self.states.push(ParserState {
            position: self.lexer.position(),
            current: self.current.clone(),
            previous: self.previous.clone(),
        });
        trace!(id, line = self.current.line(), column = self.current.column(), "save state");
        id
    }

    /// Rewinds to snapshot `id`, discarding it and every later snapshot.
    ///
    /// # Errors
    ///
    /// Returns an internal `ParseError` if `id` is not on the stack.
    pub fn restore_state(&mut self, id: usize) -> Result<()> {
        if id >= self.states.len() {
            return Err(ParseError::internal(
                format!("Invalid parser state id {id}"),
                &self.current,
            ));
        }
        self.states.truncate(id + 1);
        let Some(state) = self.states.pop() else {
            return Err(ParseError::internal(
                format!("Invalid parser state id {id}"),
                &self.current,
            ));
        };
        self.lexer.reset(state.position);
        self.current = state.current;
        self.previous = state.previous;
        trace!(id, line = self.current.line(), column = self.current.column(), "restore state");
        Ok(())
    }

    /// Drops snapshot `id` and every later snapshot without rewinding.
    ///
    /// # Errors
    ///
    /// Returns an internal `ParseError` if `id` is not on the stack.
    pub fn commit_state(&mut self, id: usize) -> Result<()> {
        if id >= self.states.len() {
            return Err(ParseError::internal(
                format!("Invalid parser state id {id}"),
                &self.current,
            ));
        }
        self.states.truncate(id);
        trace!(id, "commit state");
        Ok(())
    }

    /// Runs `f` speculatively. The cursor is rewound when `f` returns
    /// `Ok(None)` or an error, and kept when it returns `Ok(Some(_))`.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `f` after rewinding.
    pub fn with_savepoint<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<Option<T>>,
    ) -> Result<Option<T>> {
        let id = self.save_state();
        match f(self) {
            Ok(Some(value)) => {
                self.commit_state(id)?;
                Ok(Some(value))
            }
            Ok(None) => {
                self.restore_state(id)?;
                Ok(None)
            }
            Err(err) => {
                self.restore_state(id)?;
                Err(err)
            }
        }
    }

    /// Steps back one token: the previous token becomes current again and
    /// the lexer rescans from the start of the token that was current.
    ///
    /// # Errors
    ///
    /// Returns an internal `ParseError` when there is no previous token,
    /// including right after another `backup()`.
    pub fn backup(&mut self) -> Result<()> {
        if self.previous.kind == TokenKind::Undefined {
            return Err(ParseError::internal(
                "Cannot back up without a previous token",
                &self.current,
            ));
        }
        self.lexer.reset(self.current.span.start);
        self.current = core::mem::take(&mut self.previous);
        trace!(
            line = self.current.line(),
            column = self.current.column(),
            "backup"
        );
        Ok(())
    }

    /// Runs `f` one nesting level deeper, failing once
    /// `ParserOptions::max_depth` is exceeded.
    pub(super) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let base = self.depth;
        self.deepen()?;
        let result = f(self);
        self.depth = base;
        result
    }

    /// Charges one more level against `ParserOptions::max_depth`. Loops that
    /// fold into a left-deep tree call this per fold; the enclosing
    /// `nested()` releases those levels when it returns.
    pub(super) fn deepen(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::structural(
                format!(
                    "Maximum nesting depth of {} exceeded",
                    self.options.max_depth
                ),
                &self.current,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    // --- Token predicates ---

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.as_keyword() == Some(keyword)
    }

    /// Checks if the current token is the operator `op`.
    pub(super) fn check_op(&self, op: &str) -> bool {
        self.current.is_operator(op)
    }

    /// Checks if the current token is the contextual word `word`.
    pub(super) fn check_word(&self, word: &str) -> bool {
        self.current.is_word(word)
    }

    pub(super) const fn check_identifier(&self) -> bool {
        matches!(self.current.kind, TokenKind::Identifier)
    }

    pub(super) fn match_keyword(&mut self, keyword: Keyword) -> Result<bool> {
        if self.check_keyword(keyword) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(super) fn match_op(&mut self, op: &str) -> Result<bool> {
        if self.check_op(op) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(super) fn match_word(&mut self, word: &str) -> Result<bool> {
        if self.check_word(word) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.match_keyword(keyword)? {
            Ok(())
        } else {
            Err(ParseError::unexpected(keyword.as_str(), &self.current))
        }
    }

    pub(super) fn expect_op(&mut self, op: &str) -> Result<()> {
        if self.match_op(op)? {
            Ok(())
        } else {
            Err(ParseError::unexpected(format!("'{op}'"), &self.current))
        }
    }

    pub(super) fn expect_word(&mut self, word: &str) -> Result<()> {
        if self.match_word(word)? {
            Ok(())
        } else {
            Err(ParseError::unexpected(word, &self.current))
        }
    }

    /// Expects and returns an identifier.
    pub(super) fn expect_identifier(&mut self) -> Result<String> {
        if self.check_identifier() {
            let name = self.current.text.clone();
            self.advance()?;
            Ok(name)
        } else {
            Err(ParseError::unexpected("identifier", &self.current))
        }
    }

    /// Expects an identifier or a string literal, as used for option values
    /// like `ENGINE = InnoDB` or `CHARSET = 'utf8mb4'`.
    pub(super) fn expect_name(&mut self) -> Result<String> {
        if matches!(
            self.current.kind,
            TokenKind::Identifier | TokenKind::String
        ) {
            let name = self.current.text.clone();
            self.advance()?;
            Ok(name)
        } else {
            Err(ParseError::unexpected("name", &self.current))
        }
    }

    pub(super) fn expect_string(&mut self) -> Result<String> {
        if self.current.kind == TokenKind::String {
            let value = self.current.text.clone();
            self.advance()?;
            Ok(value)
        } else {
            Err(ParseError::unexpected("string literal", &self.current))
        }
    }

    /// Expects a NUMBER token holding a non-negative integer.
    pub(super) fn expect_u64(&mut self) -> Result<u64> {
        if self.current.kind != TokenKind::Number {
            return Err(ParseError::unexpected("integer", &self.current));
        }
        let value = self.current.text.parse::<u64>().map_err(|_| {
            ParseError::structural(
                format!("Invalid integer value: {}", self.current.text),
                &self.current,
            )
        })?;
        self.advance()?;
        Ok(value)
    }

    pub(super) fn expect_u32(&mut self) -> Result<u32> {
        let token = self.current.clone();
        let value = self.expect_u64()?;
        u32::try_from(value).map_err(|_| {
            ParseError::structural(format!("Integer value too large: {value}"), &token)
        })
    }

    // --- Shared grammar fragments ---

    /// Parses a comma-separated list of identifiers.
    pub(super) fn parse_identifier_list(&mut self) -> Result<Vec<String>> {
        let mut names = vec![self.expect_identifier()?];
        while self.match_op(",")? {
            names.push(self.expect_identifier()?);
        }
        Ok(names)
    }

    /// Parses `( ident[, ident]* )`.
    pub(super) fn parse_paren_identifier_list(&mut self) -> Result<Vec<String>> {
        self.expect_op("(")?;
        let names = self.parse_identifier_list()?;
        self.expect_op(")")?;
        Ok(names)
    }

    /// Parses `[schema.]name`.
    pub(super) fn parse_object_name(&mut self) -> Result<ObjectName> {
        let first = self.expect_identifier()?;
        if self.match_op(".")? {
            let name = self.expect_identifier()?;
            Ok(ObjectName::qualified(first, name))
        } else {
            Ok(ObjectName::new(first))
        }
    }

    /// Parses an optional `[AS] alias`. A bare `WITH` is never an alias so
    /// that `... FROM t WITH CHECK OPTION` ends the view query.
    pub(super) fn parse_optional_alias(&mut self) -> Result<Option<String>> {
        if self.match_keyword(Keyword::As)? {
            Ok(Some(self.expect_identifier()?))
        } else if self.check_identifier() && !self.check_word("WITH") {
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseErrorKind;

    fn parser(sql: &str) -> Parser<'_> {
        Parser::new(Lexer::new(sql)).unwrap()
    }

    #[test]
    fn test_new_pulls_first_token() {
        let p = parser("SELECT 1");
        assert_eq!(p.current().kind, TokenKind::Keyword(Keyword::Select));
        assert_eq!(p.previous().kind, TokenKind::Undefined);
    }

    #[test]
    fn test_new_reports_lexical_error() {
        let err = Parser::new(Lexer::new("'open")).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Lexical);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut p = parser("a b c");
        assert_eq!(p.peek(2).unwrap().text, "c");
        assert_eq!(p.peek(1).unwrap().text, "b");
        assert_eq!(p.current().text, "a");
        p.advance().unwrap();
        assert_eq!(p.current().text, "b");
        assert_eq!(p.previous().text, "a");
    }

    #[test]
    fn test_peek_past_end_is_eof() {
        let mut p = parser("a");
        assert!(p.peek(5).unwrap().is_eof());
        assert_eq!(p.current().text, "a");
    }

    #[test]
    fn test_restore_state_rewinds() {
        let mut p = parser("a b c d");
        let id = p.save_state();
        p.advance().unwrap();
        p.advance().unwrap();
        assert_eq!(p.current().text, "c");
        p.restore_state(id).unwrap();
        assert_eq!(p.current().text, "a");
        p.advance().unwrap();
        assert_eq!(p.current().text, "b");
    }

    #[test]
    fn test_restore_discards_later_states() {
        let mut p = parser("a b c");
        let outer = p.save_state();
        p.advance().unwrap();
        let inner = p.save_state();
        p.restore_state(outer).unwrap();
        let err = p.restore_state(inner).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Internal);
    }

    #[test]
    fn test_commit_state_keeps_position() {
        let mut p = parser("a b");
        let id = p.save_state();
        p.advance().unwrap();
        p.commit_state(id).unwrap();
        assert_eq!(p.current().text, "b");
        assert!(p.restore_state(id).is_err());
    }

    #[test]
    fn test_invalid_state_id_is_internal_error() {
        let mut p = parser("a");
        let err = p.restore_state(3).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Internal);
        assert!(p.commit_state(0).is_err());
    }

    #[test]
    fn test_with_savepoint() {
        let mut p = parser("( a ) x");
        let none: Option<()> = p
            .with_savepoint(|p| {
                p.advance()?;
                Ok(None)
            })
            .unwrap();
        assert!(none.is_none());
        assert!(p.check_op("("));

        let name = p
            .with_savepoint(|p| {
                p.expect_op("(")?;
                let name = p.expect_identifier()?;
                p.expect_op(")")?;
                Ok(Some(name))
            })
            .unwrap();
        assert_eq!(name.as_deref(), Some("a"));
        assert_eq!(p.current().text, "x");
    }

    #[test]
    fn test_with_savepoint_rewinds_on_error() {
        let mut p = parser("( 1 )");
        let err = p
            .with_savepoint(|p| {
                p.expect_op("(")?;
                p.expect_identifier().map(Some)
            })
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert!(p.check_op("("));
    }

    #[test]
    fn test_backup_steps_back_one_token() {
        let mut p = parser("ON UPDATE x");
        p.advance().unwrap();
        assert!(p.check_keyword(Keyword::Update));
        p.backup().unwrap();
        assert!(p.check_keyword(Keyword::On));
        p.advance().unwrap();
        assert!(p.check_keyword(Keyword::Update));
        p.advance().unwrap();
        assert_eq!(p.current().text, "x");
    }

    #[test]
    fn test_backup_without_previous_is_internal_error() {
        let mut p = parser("a b");
        let err = p.backup().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Internal);

        p.advance().unwrap();
        p.backup().unwrap();
        assert_eq!(p.backup().unwrap_err().kind, ParseErrorKind::Internal);
    }

    #[test]
    fn test_keyword_match_ignores_case() {
        let mut p = parser("select");
        assert!(p.match_keyword(Keyword::Select).unwrap());
        assert!(p.current().is_eof());
    }

    #[test]
    fn test_expect_u64() {
        let mut p = parser("42 1.5");
        assert_eq!(p.expect_u64().unwrap(), 42);
        let err = p.expect_u64().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Structural);
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parser("SELECT a FROM t extra junk").parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_parse_statements_skips_empty() {
        let statements = parser(";; SELECT a FROM t; ; DELETE FROM t;")
            .parse_statements()
            .unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[1].kind_name(), "DELETE");
    }

    #[test]
    fn test_unknown_statement() {
        let err = parser("EXPLAIN SELECT 1").parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownConstruct);
        assert_eq!(
            err.message,
            "Unexpected token at start of statement: identifier 'EXPLAIN'"
        );
    }

    #[test]
    fn test_nesting_limit() {
        let mut p = Parser::with_options(
            Lexer::new("SELECT ((((((((((1)))))))))) FROM t"),
            ParserOptions::new().max_depth(6),
        )
        .unwrap();
        let err = p.parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Structural);
        assert_eq!(err.message, "Maximum nesting depth of 6 exceeded");
    }
}
