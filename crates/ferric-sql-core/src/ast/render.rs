//! Helpers shared by the `Display` impls of AST nodes.

use core::fmt;

use crate::lexer::Keyword;

/// Renders an identifier, double-quoting it when it would not lex back as
/// the same plain identifier.
pub struct Ident<'a>(pub &'a str);

impl Ident<'_> {
    fn needs_quotes(name: &str) -> bool {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return true;
        };
        if !(first.is_alphabetic() || first == '_') {
            return true;
        }
        if !chars.all(|c| c.is_alphanumeric() || c == '_') {
            return true;
        }
        Keyword::lookup(name).is_some()
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if Self::needs_quotes(self.0) {
            write!(f, "\"{}\"", self.0.replace('"', "\"\""))
        } else {
            f.write_str(self.0)
        }
    }
}

/// Renders a string literal in single quotes.
pub struct Quoted<'a>(pub &'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("'")?;
        for c in self.0.chars() {
            match c {
                '\'' => f.write_str("''")?,
                '\\' => f.write_str("\\\\")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("'")
    }
}

/// Renders items separated by `, `.
pub struct Commas<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for Commas<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Renders identifiers separated by `, `.
pub struct IdentList<'a>(pub &'a [String]);

impl fmt::Display for IdentList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", Ident(name))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifiers_are_bare() {
        assert_eq!(Ident("users").to_string(), "users");
        assert_eq!(Ident("_tmp1").to_string(), "_tmp1");
        assert_eq!(Ident("engine").to_string(), "engine");
    }

    #[test]
    fn test_keywords_and_odd_names_are_quoted() {
        assert_eq!(Ident("order").to_string(), "\"order\"");
        assert_eq!(Ident("my col").to_string(), "\"my col\"");
        assert_eq!(Ident("1st").to_string(), "\"1st\"");
        assert_eq!(Ident("a\"b").to_string(), "\"a\"\"b\"");
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(Quoted("It's").to_string(), "'It''s'");
        assert_eq!(Quoted(r"a\b").to_string(), r"'a\\b'");
    }

    #[test]
    fn test_lists() {
        assert_eq!(Commas(&[1, 2, 3]).to_string(), "1, 2, 3");
        let names = vec![String::from("a"), String::from("from")];
        assert_eq!(IdentList(&names).to_string(), "a, \"from\"");
    }
}
