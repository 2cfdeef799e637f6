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

//! Comment-preserving SQL Lexer and Parser.
//!
//! Converts a SQL source string into a typed Abstract Syntax Tree for
//! `SELECT`, `INSERT`, `UPDATE`, `DELETE`, `MERGE`, `VALUES` and a handful
//! of DDL statements, targeting a PostgreSQL-leaning superset. Every
//! comment in the source survives as a positioned attachment on a token or
//! AST node, so round-trip formatting is lossless.
//!
//! # Example
//!
//! ```
//! use sqltext::ast::{SelectQuery, Statement};
//!
//! let sql = "SELECT a, b FROM t WHERE a = 1";
//! match sqltext::parse(sql).unwrap() {
//!     Statement::Select(SelectQuery::Simple(query)) => {
//!         assert_eq!(query.select.items.len(), 2);
//!         assert!(query.where_clause.is_some());
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! Parsing is purely functional over the input string: no shared state, no
//! I/O, deterministic output. Parsing distinct inputs in parallel is safe.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

pub mod ast;
pub mod keywords;
pub mod parser;
#[doc(hidden)]
pub mod test_utils;
pub mod tokenizer;

use ast::Statement;
use parser::{Parser, ParserError};
use tokenizer::{Token, TokenizeOptions, Tokenizer, TokenizerError};

/// Whether extra statements after the first are an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// The input must hold exactly one statement.
    #[default]
    Single,
    /// Extra statements are permitted; [`parse`] returns the first.
    Multiple,
}

/// Options for [`parse_with_options`] and [`parse_many_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: ParseMode,
    /// Drop statements with no tokens (`;;`) instead of returning
    /// [`Statement::Empty`] for them.
    pub skip_empty_statements: bool,
}

impl Default for ParseOptions {
    fn default() -> ParseOptions {
        ParseOptions {
            mode: ParseMode::Single,
            skip_empty_statements: true,
        }
    }
}

/// The result of [`analyze`]: a non-throwing parse with character-offset
/// error positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub success: bool,
    pub statement: Option<Statement>,
    pub error: Option<String>,
    /// 0-based character offset of the error, when one is known.
    pub error_offset: Option<usize>,
    /// Tokens of the first statement left unconsumed when parsing stopped.
    pub remaining_tokens: usize,
}

/// Parses exactly one statement.
pub fn parse(sql: &str) -> Result<Statement, ParserError> {
    parse_with_options(sql, &ParseOptions::default())
}

/// Parses one statement. In [`ParseMode::Single`] any further non-empty
/// statement is an error; in [`ParseMode::Multiple`] the first statement is
/// returned and the rest are ignored.
pub fn parse_with_options(sql: &str, options: &ParseOptions) -> Result<Statement, ParserError> {
    let statements = statement_segments(sql, options)?;
    if options.mode == ParseMode::Single && statements.len() > 1 {
        return Err(ParserError::SemanticShape {
            message: format!("expected a single statement, found {}", statements.len()),
            index: 0,
        });
    }
    match statements.first() {
        Some(tokens) => parse_statement_tokens(tokens),
        None => Err(ParserError::UnexpectedEnd {
            expected: "a statement".to_string(),
        }),
    }
}

/// Parses every statement, in order.
pub fn parse_many(sql: &str) -> Result<Vec<Statement>, ParserError> {
    parse_many_with_options(
        sql,
        &ParseOptions {
            mode: ParseMode::Multiple,
            skip_empty_statements: true,
        },
    )
}

/// Parses every statement. An error in any statement aborts the whole
/// call; resynchronization is the caller's concern.
pub fn parse_many_with_options(
    sql: &str,
    options: &ParseOptions,
) -> Result<Vec<Statement>, ParserError> {
    let statements = statement_segments(sql, options)?;
    let mut parsed = Vec::with_capacity(statements.len());
    for tokens in &statements {
        parsed.push(parse_statement_tokens(tokens)?);
    }
    Ok(parsed)
}

/// Tokenizes the input as a flat token list.
pub fn tokenize(sql: &str) -> Result<Vec<Token>, TokenizerError> {
    Tokenizer::new(sql).tokenize()
}

/// Tokenizes the input; with `preserve_formatting` each token carries the
/// literal whitespace run that follows it.
pub fn tokenize_with_options(
    sql: &str,
    options: &TokenizeOptions,
) -> Result<Vec<Token>, TokenizerError> {
    Tokenizer::new(sql).tokenize_with_options(options)
}

/// A non-throwing wrapper around [`parse`], reporting character positions.
pub fn analyze(sql: &str) -> Analysis {
    let statements = match Tokenizer::new(sql).tokenize_statements() {
        Ok(statements) => statements,
        Err(e) => {
            return Analysis {
                success: false,
                statement: None,
                error: Some(e.to_string()),
                error_offset: Some(e.offset),
                remaining_tokens: 0,
            }
        }
    };
    let non_empty: Vec<Vec<Token>> = statements.into_iter().filter(|s| !s.is_empty()).collect();
    let Some(tokens) = non_empty.first() else {
        return Analysis {
            success: false,
            statement: None,
            error: Some("no statement found".to_string()),
            error_offset: None,
            remaining_tokens: 0,
        };
    };
    let mut parser = Parser::new(tokens);
    let result = parser.parse_statement().and_then(|statement| {
        match parser.peek_token() {
            Some(extra) => Err(ParserError::TrailingTokens {
                found: extra.value.clone(),
                index: parser.index(),
                offset: extra.span.start,
            }),
            None if non_empty.len() > 1 => Err(ParserError::SemanticShape {
                message: format!("expected a single statement, found {}", non_empty.len()),
                index: 0,
            }),
            None => Ok(statement),
        }
    });
    match result {
        Ok(statement) => Analysis {
            success: true,
            statement: Some(statement),
            error: None,
            error_offset: None,
            remaining_tokens: 0,
        },
        Err(e) => {
            let error_offset = e.offset().or_else(|| match &e {
                ParserError::UnexpectedEnd { .. } => {
                    Some(tokens.last().map(|t| t.span.end).unwrap_or(sql.len()))
                }
                ParserError::SemanticShape { index, .. } => {
                    tokens.get(*index).map(|t| t.span.start)
                }
                _ => None,
            });
            Analysis {
                success: false,
                statement: None,
                error: Some(e.to_string()),
                error_offset,
                remaining_tokens: tokens.len().saturating_sub(parser.index()),
            }
        }
    }
}

/// Tokenizes and applies the empty-statement policy.
fn statement_segments(sql: &str, options: &ParseOptions) -> Result<Vec<Vec<Token>>, ParserError> {
    let segments = Tokenizer::new(sql).tokenize_statements()?;
    if options.skip_empty_statements {
        Ok(segments.into_iter().filter(|s| !s.is_empty()).collect())
    } else {
        Ok(segments)
    }
}

/// Parses one statement's token slice to completion.
fn parse_statement_tokens(tokens: &[Token]) -> Result<Statement, ParserError> {
    let mut parser = Parser::new(tokens);
    let statement = parser.parse_statement()?;
    if let Some(extra) = parser.peek_token() {
        return Err(ParserError::TrailingTokens {
            found: extra.value.clone(),
            index: parser.index(),
            offset: extra.span.start,
        });
    }
    Ok(statement)
}
