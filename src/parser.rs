//! Use-statement parsing over the scanned token stream
//!
//! Both declaration forms reduce to the same (prefix, item, alias, kind)
//! production: a flat comma list is a group with an empty prefix, a brace
//! group shares its prefix across items.

use crate::error::ExtractError;
use crate::imports::{ImportKind, ImportRecord};
use crate::scanner::{Spanned, Token};

/// Parse every use statement in the token stream into import records, in
/// declaration order then within-group left-to-right order.
pub fn parse_imports(tokens: &[Spanned]) -> Result<Vec<ImportRecord>, ExtractError> {
    let mut records = Vec::new();
    let mut statement = 0usize;
    let mut pos = 0usize;
    while pos < tokens.len() {
        if tokens[pos].token.is_keyword("use") && at_statement_start(tokens, pos) {
            statement += 1;
            let mut parser = Parser {
                tokens,
                pos: pos + 1,
                statement,
            };
            parser.parse_statement(&mut records)?;
            pos = parser.pos;
        } else {
            pos += 1;
        }
    }
    Ok(records)
}

/// Import use is only legal at the top level of a unit: at the start of the
/// stream, after `;`, or after a closing `}`. A preceding `)` in particular
/// means a closure capture list, not an import.
fn at_statement_start(tokens: &[Spanned], pos: usize) -> bool {
    match pos.checked_sub(1).map(|p| &tokens[p].token) {
        None => true,
        Some(Token::Semicolon | Token::CloseBrace) => true,
        Some(_) => false,
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    statement: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn peek_at(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|s| &s.token)
    }

    fn bump(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos).map(|s| &s.token);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Line of the current token, or of the last token once input ran out.
    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|s| s.line)
            .unwrap_or(1)
    }

    fn err(&self, message: &str) -> ExtractError {
        ExtractError::syntax(self.statement, self.line(), message)
    }

    /// Parse one statement body, starting just past the `use` keyword, up to
    /// and including the terminating `;`.
    fn parse_statement(&mut self, out: &mut Vec<ImportRecord>) -> Result<(), ExtractError> {
        let stmt_kind = self.take_kind_qualifier().unwrap_or(ImportKind::Default);
        let mut first = true;
        loop {
            let (segments, is_group) = self.parse_path()?;
            if is_group {
                if !first {
                    return Err(self.err("unexpected `{` in import list"));
                }
                self.parse_group(&segments, stmt_kind, out)?;
                return match self.peek() {
                    Some(Token::Semicolon) => {
                        self.bump();
                        Ok(())
                    }
                    Some(_) => Err(self.err("expected `;` after import group")),
                    None => Err(self.err("unterminated use statement")),
                };
            }
            let alias = self.take_alias()?;
            out.push(ImportRecord {
                path: segments,
                alias,
                kind: stmt_kind,
            });
            first = false;
            match self.peek() {
                Some(Token::Comma) => {
                    self.bump();
                }
                Some(Token::Semicolon) => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => return Err(self.err("expected `,` or `;` in import list")),
                None => return Err(self.err("unterminated use statement")),
            }
        }
    }

    /// Parse brace-group items, starting just past the `{`, up to and
    /// including the `}`. A trailing comma before `}` is permitted.
    fn parse_group(
        &mut self,
        prefix: &[String],
        stmt_kind: ImportKind,
        out: &mut Vec<ImportRecord>,
    ) -> Result<(), ExtractError> {
        loop {
            match self.peek() {
                Some(Token::CloseBrace) => {
                    self.bump();
                    return Ok(());
                }
                None => return Err(self.err("unbalanced `{` in import group")),
                Some(_) => {}
            }
            // Item-level qualifier overrides the statement-level one
            let item_kind = self.take_kind_qualifier().unwrap_or(stmt_kind);
            let (segments, is_group) = self.parse_path()?;
            if is_group {
                return Err(self.err("nested import groups are not supported"));
            }
            let alias = self.take_alias()?;
            let mut path = prefix.to_vec();
            path.extend(segments);
            out.push(ImportRecord {
                path,
                alias,
                kind: item_kind,
            });
            match self.peek() {
                Some(Token::Comma) => {
                    self.bump();
                }
                Some(Token::CloseBrace) => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => return Err(self.err("expected `,` or `}` in import group")),
                None => return Err(self.err("unbalanced `{` in import group")),
            }
        }
    }

    /// Parse a namespace path. Returns the segments and whether the path
    /// ended in `\{`, introducing a brace group.
    fn parse_path(&mut self) -> Result<(Vec<String>, bool), ExtractError> {
        let mut segments = Vec::new();
        // A fully qualified name may carry a leading separator
        if matches!(self.peek(), Some(Token::Backslash)) {
            self.bump();
        }
        loop {
            match self.peek() {
                Some(Token::Ident(word)) => {
                    segments.push(word.clone());
                    self.bump();
                }
                _ => return Err(self.err("expected identifier in import path")),
            }
            match self.peek() {
                Some(Token::Backslash) => match self.peek_at(1) {
                    Some(Token::Ident(_)) => {
                        self.bump();
                    }
                    Some(Token::OpenBrace) => {
                        self.bump();
                        self.bump();
                        return Ok((segments, true));
                    }
                    _ => return Err(self.err("expected identifier or `{` after `\\`")),
                },
                _ => return Ok((segments, false)),
            }
        }
    }

    /// Consume a `function` or `const` qualifier if one sits at the cursor.
    /// The qualifier set is matched exactly (keywords are case-insensitive);
    /// any other word is path material.
    fn take_kind_qualifier(&mut self) -> Option<ImportKind> {
        let kind = match self.peek() {
            Some(token) if token.is_keyword("function") => ImportKind::Function,
            Some(token) if token.is_keyword("const") => ImportKind::Constant,
            _ => return None,
        };
        self.bump();
        Some(kind)
    }

    /// Consume an `as alias` clause if one sits at the cursor.
    fn take_alias(&mut self) -> Result<Option<String>, ExtractError> {
        match self.peek() {
            Some(token) if token.is_keyword("as") => {
                self.bump();
                match self.peek() {
                    Some(Token::Ident(name)) => {
                        let name = name.clone();
                        self.bump();
                        Ok(Some(name))
                    }
                    _ => Err(self.err("expected identifier after `as`")),
                }
            }
            _ => Ok(None),
        }
    }
}
