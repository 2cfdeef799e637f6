// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! SQL parser.
//!
//! A family of cooperating recursive-descent clause parsers over the token
//! stream. Every parser is a method on [`Parser`] that consumes tokens from
//! the current index and leaves the index on the first token it does not
//! own, so clause parsers embed freely inside statement parsers.

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use core::fmt;

use log::debug;

use crate::ast::{Ident, ObjectName, Statement};
use crate::tokenizer::{Comment, Token, TokenType, TokenizerError};

mod ddl;
mod dml;
mod expr;
mod query;

/// Nesting deeper than this aborts the parse rather than the stack.
pub const MAX_PARSE_DEPTH: u32 = 200;

/// A parser error, positioned by token index and source byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// The tokenizer rejected the input before parsing began.
    TokenizerError(String),
    /// A required keyword or symbol was missing.
    UnexpectedToken {
        expected: String,
        found: String,
        index: usize,
        offset: usize,
    },
    /// The token stream ended while more tokens were required.
    UnexpectedEnd { expected: String },
    /// The statement's leading keyword is not one this parser supports.
    UnsupportedStatement {
        found: String,
        index: usize,
        offset: usize,
    },
    /// A statement parser finished without consuming its whole statement.
    TrailingTokens {
        found: String,
        index: usize,
        offset: usize,
    },
    /// A structurally invalid construct, e.g. an empty column alias list.
    SemanticShape { message: String, index: usize },
}

impl ParserError {
    /// The 0-based character offset of the error, when one is known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParserError::TokenizerError(_) => None,
            ParserError::UnexpectedToken { offset, .. }
            | ParserError::UnsupportedStatement { offset, .. }
            | ParserError::TrailingTokens { offset, .. } => Some(*offset),
            ParserError::UnexpectedEnd { .. } | ParserError::SemanticShape { .. } => None,
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParserError::TokenizerError(message) => write!(f, "sql tokenizer error: {message}"),
            ParserError::UnexpectedToken {
                expected,
                found,
                index,
                offset,
            } => write!(
                f,
                "Expected {expected}, found: {found} at token {index} (offset {offset})"
            ),
            ParserError::UnexpectedEnd { expected } => {
                write!(f, "Expected {expected}, found: EOF")
            }
            ParserError::UnsupportedStatement {
                found,
                index,
                offset,
            } => write!(
                f,
                "Unsupported statement: {found} at token {index} (offset {offset})"
            ),
            ParserError::TrailingTokens {
                found,
                index,
                offset,
            } => write!(
                f,
                "Expected end of statement, found: {found} at token {index} (offset {offset})"
            ),
            ParserError::SemanticShape { message, index } => {
                write!(f, "{message} at token {index}")
            }
        }
    }
}

impl From<TokenizerError> for ParserError {
    fn from(e: TokenizerError) -> Self {
        ParserError::TokenizerError(e.to_string())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParserError {}

/// SQL parser over a statement's token slice.
pub struct Parser<'a> {
    tokens: &'a [Token],
    /// The index of the first token not yet consumed.
    index: usize,
    /// Current recursion depth, bounded by [`MAX_PARSE_DEPTH`].
    depth: u32,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the start of `tokens`.
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    /// Repositions the parser, for parsing from a token array at an index.
    pub fn with_index(mut self, index: usize) -> Parser<'a> {
        self.index = index;
        self
    }

    /// The index of the first unconsumed token.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Tokenizes and parses every statement in `sql`, skipping empty ones.
    pub fn parse_sql(sql: &str) -> Result<Vec<Statement>, ParserError> {
        crate::parse_many(sql)
    }

    // ------------------------------------------------------------------
    // token cursor
    // ------------------------------------------------------------------

    pub(crate) fn peek_token(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.index + n)
    }

    pub(crate) fn next_token(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.index);
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    /// The most recently consumed token.
    pub(crate) fn prev_token(&self) -> &'a Token {
        &self.tokens[self.index - 1]
    }

    /// Consumes the next token if it is the command `value`.
    pub(crate) fn parse_command(&mut self, value: &str) -> Option<&'a Token> {
        match self.peek_token() {
            Some(t) if t.is_command(value) => self.next_token(),
            _ => None,
        }
    }

    /// Consumes the next token if it is any of the given commands.
    pub(crate) fn parse_any_command(&mut self, values: &[&str]) -> Option<&'a Token> {
        match self.peek_token() {
            Some(t)
                if t.token_type.contains(TokenType::COMMAND)
                    && values.contains(&t.value.as_str()) =>
            {
                self.next_token()
            }
            _ => None,
        }
    }

    pub(crate) fn expect_command(&mut self, value: &str) -> Result<&'a Token, ParserError> {
        match self.parse_command(value) {
            Some(t) => Ok(t),
            None => self.expected(&value.to_uppercase()),
        }
    }

    /// Consumes the next token if it is the operator `value`.
    pub(crate) fn parse_operator(&mut self, value: &str) -> Option<&'a Token> {
        match self.peek_token() {
            Some(t) if t.is_operator(value) => self.next_token(),
            _ => None,
        }
    }

    pub(crate) fn expect_operator(&mut self, value: &str) -> Result<&'a Token, ParserError> {
        match self.parse_operator(value) {
            Some(t) => Ok(t),
            None => self.expected(&value.to_uppercase()),
        }
    }

    /// Consumes the next token if any of its type bits intersect
    /// `token_type`.
    pub(crate) fn parse_token(&mut self, token_type: TokenType) -> Option<&'a Token> {
        match self.peek_token() {
            Some(t) if t.is(token_type) => self.next_token(),
            _ => None,
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        token_type: TokenType,
        expected: &str,
    ) -> Result<&'a Token, ParserError> {
        match self.parse_token(token_type) {
            Some(t) => Ok(t),
            None => self.expected(expected),
        }
    }

    /// Consumes an identifier-shaped token whose value matches `word`
    /// case-insensitively. Used for the few keywords that stay plain
    /// identifiers in the token stream (`TYPE`, `INCREMENT`, ...).
    pub(crate) fn parse_word(&mut self, word: &str) -> Option<&'a Token> {
        match self.peek_token() {
            Some(t)
                if t.is(TokenType::IDENTIFIER | TokenType::FUNCTION)
                    && t.value.eq_ignore_ascii_case(word) =>
            {
                self.next_token()
            }
            _ => None,
        }
    }

    pub(crate) fn expect_word(&mut self, word: &str) -> Result<&'a Token, ParserError> {
        match self.parse_word(word) {
            Some(t) => Ok(t),
            None => self.expected(&word.to_uppercase()),
        }
    }

    /// Builds the dominant "expected X, found Y" error at the current
    /// position.
    pub(crate) fn expected<T>(&self, expected: &str) -> Result<T, ParserError> {
        match self.peek_token() {
            Some(t) => Err(ParserError::UnexpectedToken {
                expected: expected.to_string(),
                found: t.value.clone(),
                index: self.index,
                offset: t.span.start,
            }),
            None => Err(ParserError::UnexpectedEnd {
                expected: expected.to_string(),
            }),
        }
    }

    pub(crate) fn shape_error<T>(&self, message: impl Into<String>) -> Result<T, ParserError> {
        Err(ParserError::SemanticShape {
            message: message.into(),
            index: self.index,
        })
    }

    // ------------------------------------------------------------------
    // recursion guard
    // ------------------------------------------------------------------

    pub(crate) fn enter(&mut self) -> Result<(), ParserError> {
        self.depth += 1;
        if self.depth > MAX_PARSE_DEPTH {
            debug!("bailing out at parse depth {}", self.depth);
            return Err(ParserError::SemanticShape {
                message: format!("statement nesting exceeds depth {MAX_PARSE_DEPTH}"),
                index: self.index,
            });
        }
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.depth -= 1;
    }

    // ------------------------------------------------------------------
    // comments
    // ------------------------------------------------------------------

    /// The comments a clause node takes from its just-consumed keyword
    /// token: the `after` blocks. `before` blocks belong to the statement
    /// or query header that owns the keyword's position.
    pub(crate) fn prev_keyword_comments(&self) -> Vec<Comment> {
        self.prev_token().comments_after()
    }

    /// The header comments of the statement starting here. A `WITH`-led
    /// statement keeps them on the WITH clause instead.
    pub(crate) fn statement_header_comments(&self) -> Vec<Comment> {
        match self.peek_token() {
            Some(t) if !t.is_command("with") => t.comments_before(),
            _ => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // identifiers and names
    // ------------------------------------------------------------------

    /// Strips delimiters off an escaped identifier token value.
    pub(crate) fn ident_from_token(&self, token: &Token) -> Ident {
        let value = &token.value;
        match value.chars().next() {
            Some(q @ ('"' | '`')) => {
                let inner = &value[1..value.len() - 1];
                let mut unescaped = String::with_capacity(inner.len());
                let mut chars = inner.chars();
                while let Some(c) = chars.next() {
                    unescaped.push(c);
                    if c == q {
                        chars.next();
                    }
                }
                Ident::with_quote(q, unescaped)
            }
            Some('[') => Ident::with_quote('[', &value[1..value.len() - 1]),
            _ => Ident::new(value.clone()),
        }
    }

    /// Parses one identifier. Function- and type-flagged tokens are
    /// accepted too: `r` in `r(n)` lexes as a function candidate, and a
    /// column may share its name with a type.
    pub(crate) fn parse_identifier(&mut self) -> Result<Ident, ParserError> {
        match self.parse_token(TokenType::IDENTIFIER | TokenType::FUNCTION) {
            Some(t) => Ok(self.ident_from_token(t)),
            None => self.expected("identifier"),
        }
    }

    /// Parses a possibly-qualified name: `name`, `schema.name`, ...
    pub(crate) fn parse_object_name(&mut self) -> Result<ObjectName, ParserError> {
        let mut parts = Vec::new();
        loop {
            parts.push(self.parse_identifier()?);
            if self.parse_token(TokenType::DOT).is_none() {
                break;
            }
        }
        Ok(ObjectName(parts))
    }

    /// Parses one or more `f()` results separated by commas.
    pub(crate) fn parse_comma_separated<T, F>(&mut self, mut f: F) -> Result<Vec<T>, ParserError>
    where
        F: FnMut(&mut Parser<'a>) -> Result<T, ParserError>,
    {
        let mut values = Vec::new();
        loop {
            values.push(f(self)?);
            if self.parse_token(TokenType::COMMA).is_none() {
                break;
            }
        }
        Ok(values)
    }

    /// Parses `( ident [, ident]* )`. An empty list is a structural error
    /// unless `allow_empty` is set (INSERT distinguishes `()` from no
    /// list).
    pub(crate) fn parse_parenthesized_idents(
        &mut self,
        allow_empty: bool,
    ) -> Result<Vec<Ident>, ParserError> {
        self.expect_token(TokenType::OPEN_PAREN, "(")?;
        if self.parse_token(TokenType::CLOSE_PAREN).is_some() {
            if allow_empty {
                return Ok(Vec::new());
            }
            return self.shape_error("column alias list must not be empty");
        }
        let idents = self.parse_comma_separated(|p| p.parse_identifier())?;
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        Ok(idents)
    }

    // ------------------------------------------------------------------
    // statement dispatch
    // ------------------------------------------------------------------

    /// Parses one statement, dispatching on the leading keyword(s).
    pub fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        let Some(first) = self.peek_token() else {
            return Ok(Statement::Empty {
                comments: Vec::new(),
            });
        };
        debug!("dispatching statement lead {:?}", first.value);
        let statement = if first.is_command("with") {
            self.parse_with_led_statement()?
        } else if first.token_type.contains(TokenType::COMMAND) {
            match first.value.as_str() {
                "select" | "values" => Statement::Select(self.parse_select_query()?),
                "insert into" => Statement::Insert(self.parse_insert()?),
                "update" => Statement::Update(self.parse_update()?),
                "delete from" => Statement::Delete(self.parse_delete()?),
                "merge into" => Statement::Merge(self.parse_merge()?),
                "create table" | "create temporary table" => {
                    Statement::CreateTable(self.parse_create_table()?)
                }
                "create index" | "create unique index" => {
                    Statement::CreateIndex(self.parse_create_index()?)
                }
                "drop table" | "drop index" | "drop schema" | "drop constraint" => {
                    Statement::Drop(self.parse_drop()?)
                }
                "alter table" => Statement::AlterTable(self.parse_alter_table()?),
                "analyze" => Statement::Analyze(self.parse_analyze()?),
                "explain" => Statement::Explain(self.parse_explain()?),
                "create sequence" | "create temporary sequence" => {
                    Statement::CreateSequence(self.parse_create_sequence()?)
                }
                "alter sequence" => Statement::AlterSequence(self.parse_alter_sequence()?),
                "cluster" => Statement::Cluster(self.parse_cluster()?),
                "reindex" => Statement::Reindex(self.parse_reindex()?),
                found => {
                    return Err(ParserError::UnsupportedStatement {
                        found: found.to_string(),
                        index: self.index,
                        offset: first.span.start,
                    })
                }
            }
        } else {
            return Err(ParserError::UnsupportedStatement {
                found: first.value.clone(),
                index: self.index,
                offset: first.span.start,
            });
        };
        Ok(statement)
    }

    /// A statement starting with `WITH` may still be DML. Probe by parsing
    /// the WITH clause, look at what follows, then rewind so the statement
    /// parser consumes its own WITH clause from position 0.
    fn parse_with_led_statement(&mut self) -> Result<Statement, ParserError> {
        let start = self.index;
        self.parse_with_clause()?;
        let lead = self
            .peek_token()
            .filter(|t| t.token_type.contains(TokenType::COMMAND))
            .map(|t| t.value.clone());
        self.index = start;
        match lead.as_deref() {
            Some("insert into") => Ok(Statement::Insert(self.parse_insert()?)),
            Some("update") => Ok(Statement::Update(self.parse_update()?)),
            Some("delete from") => Ok(Statement::Delete(self.parse_delete()?)),
            Some("merge into") => Ok(Statement::Merge(self.parse_merge()?)),
            _ => Ok(Statement::Select(self.parse_select_query()?)),
        }
    }
}
