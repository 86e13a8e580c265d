//! SQL tokenizer implementation.

use tracing::trace;

use super::{Keyword, LexError, Position, Span, Token, TokenKind};

/// Two-character operators. Everything else that is not a word, number or
/// quoted literal lexes as a one-character operator.
const TWO_CHAR_OPERATORS: [&str; 4] = ["<=", ">=", "!=", "<>"];

/// A pull-based lexer over SQL source text.
///
/// Each call to [`Lexer::next_token`] produces exactly one token. Once the
/// input is exhausted every further call returns an EOF token.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current cursor.
    pos: Position,
    /// The start of the token being scanned.
    start: Position,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: Position::START,
            start: Position::START,
        }
    }

    /// Returns the input this lexer scans.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// The cursor, positioned after the last produced token.
    #[must_use]
    pub(crate) const fn position(&self) -> Position {
        self.pos
    }

    /// Moves the cursor back (or forward) to a previously observed position.
    pub(crate) fn reset(&mut self, pos: Position) {
        self.pos = pos;
        self.start = pos;
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos.offset..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos.offset..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos = self.pos.step(c);
        Some(c)
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // -- line comment
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // /* block comment */
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    fn make_token(&self, kind: TokenKind, text: impl Into<String>) -> Token {
        Token::new(kind, text, Span::new(self.start, self.pos))
    }

    /// Scans an identifier or keyword.
    fn scan_word(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let text = &self.input[self.start.offset..self.pos.offset];
        match Keyword::lookup(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword), text),
            None => self.make_token(TokenKind::Identifier, text),
        }
    }

    /// Scans a `"quoted"` or `` `quoted` `` identifier.
    fn scan_quoted_identifier(&mut self, quote: char) -> Result<Token, LexError> {
        self.advance();
        let mut name = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        name.push(quote);
                    } else {
                        break;
                    }
                }
                Some(c) => name.push(c),
                None => {
                    return Err(LexError::UnterminatedIdentifier {
                        line: self.start.line,
                        column: self.start.column,
                    });
                }
            }
        }

        let mut token = self.make_token(TokenKind::Identifier, name);
        token.quoted = true;
        Ok(token)
    }

    /// Scans digits with at most one decimal point.
    fn scan_number(&mut self) -> Token {
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.input[self.start.offset..self.pos.offset];
        self.make_token(TokenKind::Number, text)
    }

    /// Scans a single-quoted string literal.
    ///
    /// `''` decodes to `'` and `\X` decodes to `X`.
    fn scan_string(&mut self) -> Result<Token, LexError> {
        self.advance();
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('\\') => match self.advance() {
                    Some(c) => value.push(c),
                    None => break,
                },
                Some('\'') => {
                    if self.peek() == Some('\'') {
                        self.advance();
                        value.push('\'');
                    } else {
                        return Ok(self.make_token(TokenKind::String, value));
                    }
                }
                Some(c) => value.push(c),
                None => break,
            }
        }

        Err(LexError::UnterminatedString {
            line: self.start.line,
            column: self.start.column,
        })
    }

    /// Scans a one- or two-character operator.
    fn scan_operator(&mut self) -> Token {
        let rest = &self.input[self.pos.offset..];
        if TWO_CHAR_OPERATORS.iter().any(|op| rest.starts_with(op)) {
            self.advance();
            self.advance();
        } else {
            self.advance();
        }
        let text = &self.input[self.start.offset..self.pos.offset];
        self.make_token(TokenKind::Operator, text)
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a `LexError` for an unterminated string literal or quoted
    /// identifier.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return Ok(self.make_token(TokenKind::Eof, ""));
        };

        let token = match c {
            '\'' => self.scan_string()?,
            '"' | '`' => self.scan_quoted_identifier(c)?,
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' => self.scan_word(),
            _ => self.scan_operator(),
        };

        trace!(
            kind = ?token.kind,
            text = %token.text,
            line = token.line(),
            column = token.column(),
            "token"
        );
        Ok(token)
    }

    /// Tokenizes the entire input. The last token is always EOF.
    ///
    /// # Errors
    ///
    /// Returns the first `LexError` encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

/// Yields tokens up to, but not including, EOF.
impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) if token.is_eof() => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().unwrap()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(token_kinds("   \n\t  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
        for _ in 0..3 {
            assert!(lexer.next_token().unwrap().is_eof());
        }
    }

    #[test]
    fn test_keywords_keep_casing() {
        let tokens = tokenize("select FrOm");
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Select));
        assert_eq!(tokens[0].text, "select");
        assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::From));
        assert_eq!(tokens[1].text, "FrOm");
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            token_kinds("users _tmp col1 engine"),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers_accept_one_dot() {
        assert_eq!(texts("42 3.14 1.2.3"), vec!["42", "3.14", "1.2", ".", "3", ""]);
        assert_eq!(tokenize("7.")[0].text, "7.");
    }

    #[test]
    fn test_string_doubled_quote() {
        let tokens = tokenize("'It''s working'");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "It's working");
    }

    #[test]
    fn test_string_backslash_escape() {
        let tokens = tokenize(r"'a\'b\\c\n'");
        assert_eq!(tokens[0].text, r"a'b\cn");
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("SELECT 'abc").tokenize().unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { line: 1, column: 8 });
        assert!(err.to_string().starts_with("Unterminated string literal"));
    }

    #[test]
    fn test_unterminated_string_after_escape() {
        let err = Lexer::new(r"'abc\'").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(texts("<= >= != <> < >"), vec!["<=", ">=", "!=", "<>", "<", ">", ""]);
    }

    #[test]
    fn test_single_char_operators() {
        let tokens = tokenize("(a, b); * % ! #");
        let ops: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(ops, vec!["(", ",", ")", ";", "*", "%", "!", "#"]);
    }

    #[test]
    fn test_quoted_identifiers() {
        let tokens = tokenize("\"my col\" `order` \"a\"\"b\"");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Identifier));
        assert_eq!(tokens[0].text, "my col");
        assert_eq!(tokens[1].text, "order");
        assert_eq!(tokens[2].text, "a\"b");
        assert!(tokens[..3].iter().all(|t| t.quoted));
    }

    #[test]
    fn test_quoted_word_is_not_contextual() {
        let tokens = tokenize("with \"with\" `Truncate`");
        assert!(!tokens[0].quoted);
        assert!(tokens[0].is_word("WITH"));
        assert!(!tokens[1].is_word("WITH"));
        assert!(!tokens[2].is_word("TRUNCATE"));
    }

    #[test]
    fn test_unterminated_quoted_identifier() {
        let err = Lexer::new("\"abc").tokenize().unwrap_err();
        assert_eq!(err, LexError::UnterminatedIdentifier { line: 1, column: 1 });
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            token_kinds("SELECT -- comment\n/* block\n comment */ FROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = tokenize("SELECT a,\n  b\nFROM t");
        let positions: Vec<(usize, usize)> =
            tokens.iter().map(|t| (t.line(), t.column())).collect();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 8), (1, 9), (2, 3), (3, 1), (3, 6), (3, 7)]
        );
    }

    #[test]
    fn test_string_spanning_lines_advances_line() {
        let tokens = tokenize("'a\nb' x");
        assert_eq!(tokens[0].text, "a\nb");
        assert_eq!((tokens[1].line(), tokens[1].column()), (2, 4));
    }

    #[test]
    fn test_iterator_stops_at_eof() {
        let tokens: Vec<Token> = Lexer::new("a + 1").collect::<Result<_, _>>().unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| !t.is_eof()));
    }

    #[test]
    fn test_iterator_surfaces_error_then_ends() {
        let mut lexer = Lexer::new("a 'oops");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_reset_rewinds() {
        let mut lexer = Lexer::new("a b");
        let pos = lexer.position();
        let first = lexer.next_token().unwrap();
        lexer.reset(pos);
        assert_eq!(lexer.next_token().unwrap(), first);
    }
}
