//! TRUNCATE, GRANT and REVOKE.

use super::error::{ParseError, Result};
use super::parser::Parser;
use crate::ast::{
    GrantStatement, ObjectName, Privilege, Privileges, RevokeStatement, TruncateStatement,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses `TRUNCATE [TABLE] name`.
    pub(super) fn parse_truncate(&mut self) -> Result<TruncateStatement> {
        self.expect_word("TRUNCATE")?;
        self.match_keyword(Keyword::Table)?;
        let table = self.parse_object_name()?;
        Ok(TruncateStatement { table })
    }

    /// Parses `GRANT privileges ON object TO grantee[, ...] [WITH GRANT OPTION]`.
    pub(super) fn parse_grant(&mut self) -> Result<GrantStatement> {
        self.expect_word("GRANT")?;
        let (privileges, object) = self.parse_privileges_on()?;
        self.expect_word("TO")?;
        let grantees = self.parse_identifier_list()?;

        let with_grant_option = if self.match_word("WITH")? {
            self.expect_word("GRANT")?;
            self.expect_word("OPTION")?;
            true
        } else {
            false
        };

        Ok(GrantStatement {
            privileges,
            object,
            grantees,
            with_grant_option,
        })
    }

    /// Parses `REVOKE privileges ON object FROM grantee[, ...]`.
    pub(super) fn parse_revoke(&mut self) -> Result<RevokeStatement> {
        self.expect_word("REVOKE")?;
        let (privileges, object) = self.parse_privileges_on()?;
        self.expect_keyword(Keyword::From)?;
        let grantees = self.parse_identifier_list()?;

        Ok(RevokeStatement {
            privileges,
            object,
            grantees,
        })
    }

    /// Parses `privileges ON [TABLE] object`.
    fn parse_privileges_on(&mut self) -> Result<(Privileges, ObjectName)> {
        let privileges = if self.match_keyword(Keyword::All)? {
            self.match_word("PRIVILEGES")?;
            Privileges::All
        } else {
            let mut list = vec![self.parse_privilege()?];
            while self.match_op(",")? {
                list.push(self.parse_privilege()?);
            }
            Privileges::List(list)
        };

        self.expect_keyword(Keyword::On)?;
        self.match_keyword(Keyword::Table)?;
        let object = self.parse_object_name()?;
        Ok((privileges, object))
    }

    /// Parses a privilege name, which may be a keyword such as SELECT, with
    /// an optional column list.
    fn parse_privilege(&mut self) -> Result<Privilege> {
        let is_name = match self.current.kind {
            TokenKind::Keyword(kw) => kw != Keyword::On,
            TokenKind::Identifier => true,
            _ => false,
        };
        if !is_name {
            return Err(ParseError::unexpected("privilege", &self.current));
        }
        let name = self.current.text.to_ascii_uppercase();
        self.advance()?;

        let columns = if self.check_op("(") {
            self.parse_paren_identifier_list()?
        } else {
            vec![]
        };
        Ok(Privilege { name, columns })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Privileges, Statement};
    use crate::parser::ParseErrorKind;

    #[test]
    fn test_truncate() {
        let Statement::Truncate(truncate) = crate::parse("TRUNCATE TABLE logs").unwrap() else {
            panic!("Expected TRUNCATE statement");
        };
        assert_eq!(truncate.table.name, "logs");
        assert!(matches!(crate::parse("truncate logs"), Ok(Statement::Truncate(_))));
    }

    #[test]
    fn test_grant_privilege_list() {
        let Statement::Grant(grant) =
            crate::parse("GRANT select, update (name) ON TABLE users TO alice, bob WITH GRANT OPTION")
                .unwrap()
        else {
            panic!("Expected GRANT statement");
        };
        let Privileges::List(list) = &grant.privileges else {
            panic!("Expected privilege list");
        };
        assert_eq!(list[0].name, "SELECT");
        assert_eq!(list[1].columns, vec!["name"]);
        assert_eq!(grant.grantees, vec!["alice", "bob"]);
        assert!(grant.with_grant_option);
    }

    #[test]
    fn test_revoke_all() {
        let Statement::Revoke(revoke) =
            crate::parse("REVOKE ALL PRIVILEGES ON users FROM alice").unwrap()
        else {
            panic!("Expected REVOKE statement");
        };
        assert_eq!(revoke.privileges, Privileges::All);
        assert_eq!(revoke.object.name, "users");
    }

    #[test]
    fn test_grant_without_privilege() {
        let err = crate::parse("GRANT ON users TO alice").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }
}
