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

//! SQL tokenizer.
//!
//! Folds whitespace and comments into a positioned token stream, resolves
//! multi-word keywords through a trie, and groups tokens into statements
//! split on unquoted `;`. Every comment survives tokenization attached
//! before or after a nearby token, so round-trip formatting is lossless.

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use core::fmt;
use core::mem;
use core::ops::BitOr;

use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod readers;
mod scanner;
mod trie;

use readers::ReaderManager;
use scanner::Scanner;

/// The characters that can open an escaped identifier: `"col"`,
/// `` `col` `` and `[col]`. The square bracket only counts where an
/// expression may start; anywhere else it is a subscript (see the escaped
/// identifier reader).
pub const IDENTIFIER_QUOTES: [char; 3] = ['"', '`', '['];

/// The role(s) a token can play. A bit-set rather than an enum because one
/// token may fit several roles in context: a single-word type name is also
/// an identifier, an alias candidate is identifier-or-function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenType(u16);

impl TokenType {
    pub const NONE: TokenType = TokenType(0);
    pub const IDENTIFIER: TokenType = TokenType(1);
    pub const LITERAL: TokenType = TokenType(1 << 1);
    pub const OPERATOR: TokenType = TokenType(1 << 2);
    pub const OPEN_PAREN: TokenType = TokenType(1 << 3);
    pub const CLOSE_PAREN: TokenType = TokenType(1 << 4);
    pub const OPEN_BRACKET: TokenType = TokenType(1 << 5);
    pub const CLOSE_BRACKET: TokenType = TokenType(1 << 6);
    pub const COMMA: TokenType = TokenType(1 << 7);
    pub const DOT: TokenType = TokenType(1 << 8);
    pub const COMMAND: TokenType = TokenType(1 << 9);
    pub const FUNCTION: TokenType = TokenType(1 << 10);
    pub const TYPE: TokenType = TokenType(1 << 11);
    pub const PARAMETER: TokenType = TokenType(1 << 12);
    pub const STRING_SPECIFIER: TokenType = TokenType(1 << 13);
    pub const SEMICOLON: TokenType = TokenType(1 << 14);

    /// True if every bit of `other` is set in `self`.
    pub fn contains(self, other: TokenType) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any bit of `other` is set in `self`.
    pub fn intersects(self, other: TokenType) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for TokenType {
    type Output = TokenType;

    fn bitor(self, rhs: TokenType) -> TokenType {
        TokenType(self.0 | rhs.0)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const NAMES: &[(TokenType, &str)] = &[
            (TokenType::IDENTIFIER, "identifier"),
            (TokenType::LITERAL, "literal"),
            (TokenType::OPERATOR, "operator"),
            (TokenType::OPEN_PAREN, "open-paren"),
            (TokenType::CLOSE_PAREN, "close-paren"),
            (TokenType::OPEN_BRACKET, "open-bracket"),
            (TokenType::CLOSE_BRACKET, "close-bracket"),
            (TokenType::COMMA, "comma"),
            (TokenType::DOT, "dot"),
            (TokenType::COMMAND, "command"),
            (TokenType::FUNCTION, "function"),
            (TokenType::TYPE, "type"),
            (TokenType::PARAMETER, "parameter"),
            (TokenType::STRING_SPECIFIER, "string-specifier"),
            (TokenType::SEMICOLON, "semicolon"),
        ];
        let names = NAMES
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name);
        write!(f, "{}", names.format("|"))
    }
}

/// A 1-based line/column position in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    pub line: u64,
    pub column: u64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The source extent of a token: 0-based byte offsets plus the line/column
/// of both ends. `end > start` for every non-empty token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub start_location: Location,
    pub end_location: Location,
}

/// Whether a comment is attached before or after its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommentPosition {
    Before,
    After,
}

/// A comment block attached to a token or AST node. The text carries no
/// delimiters and is trimmed; relative order among blocks is source order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Comment {
    pub position: CommentPosition,
    pub text: String,
}

impl Comment {
    pub fn before(text: impl Into<String>) -> Comment {
        Comment {
            position: CommentPosition::Before,
            text: text.into(),
        }
    }

    pub fn after(text: impl Into<String>) -> Comment {
        Comment {
            position: CommentPosition::After,
            text: text.into(),
        }
    }
}

/// A single lexeme.
///
/// `value` is canonical: commands are lower-cased with multi-word commands
/// folded to single internal spaces (`"group by"`); escaped identifiers and
/// string literals keep their delimiters so no information is lost.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub span: Span,
    pub comments: Vec<Comment>,
    /// The literal whitespace-and-comments run between this token and the
    /// next. Populated only under [`TokenizeOptions::preserve_formatting`].
    pub following_whitespace: Option<String>,
}

impl Token {
    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type.intersects(token_type)
    }

    pub fn is_command(&self, value: &str) -> bool {
        self.token_type.contains(TokenType::COMMAND) && self.value == value
    }

    pub fn is_operator(&self, value: &str) -> bool {
        self.token_type.contains(TokenType::OPERATOR) && self.value == value
    }

    /// The comments attached before this token, in source order.
    pub fn comments_before(&self) -> Vec<Comment> {
        self.comments
            .iter()
            .filter(|c| c.position == CommentPosition::Before)
            .cloned()
            .collect()
    }

    /// The comments attached after this token, in source order.
    pub fn comments_after(&self) -> Vec<Comment> {
        self.comments
            .iter()
            .filter(|c| c.position == CommentPosition::After)
            .cloned()
            .collect()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A tokenizer error: invalid character, unterminated string literal or
/// unterminated block comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerError {
    pub message: String,
    /// 0-based byte offset of the offending character.
    pub offset: usize,
    pub location: Location,
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at {} (offset {})",
            self.message, self.location, self.offset
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TokenizerError {}

/// Options for [`Tokenizer::tokenize_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizeOptions {
    /// Capture the literal inter-token whitespace on each token, preserving
    /// enough bytes to regenerate the source exactly.
    pub preserve_formatting: bool,
}

/// Drives the scanner and the reader manager to produce positioned tokens,
/// grouped into statements on unquoted `;`.
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    manager: ReaderManager,
}

impl<'a> Tokenizer<'a> {
    pub fn new(sql: &'a str) -> Tokenizer<'a> {
        Tokenizer {
            scanner: Scanner::new(sql),
            manager: ReaderManager::new(),
        }
    }

    /// Tokenizes the whole input as a flat list, semicolons included.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, TokenizerError> {
        self.tokenize_with_options(&TokenizeOptions::default())
    }

    pub fn tokenize_with_options(
        &mut self,
        options: &TokenizeOptions,
    ) -> Result<Vec<Token>, TokenizerError> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut pending = self.scanner.read_whitespace_and_comments()?;
        while !self.scanner.is_eof() {
            let mut token = self.read_one(&mut pending, tokens.last())?;
            let end = token.span.end;
            pending = self.scanner.read_whitespace_and_comments()?;
            for text in &pending {
                token.comments.push(Comment::after(text.clone()));
            }
            if options.preserve_formatting {
                token.following_whitespace =
                    Some(self.scanner.input()[end..self.scanner.pos()].to_string());
            }
            pending.clear();
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Tokenizes the input into statement segments split on unquoted `;`.
    ///
    /// Comment attachment and routing happens here: leading comments land
    /// before the first token, trailing runs after the token they follow,
    /// and the routing rules move post-SELECT, post-comma and post-set-
    /// operator comments onto the token that reads best as their owner.
    /// Empty segments stay in the result as empty vectors; their comments
    /// carry forward onto the next statement.
    pub fn tokenize_statements(&mut self) -> Result<Vec<Vec<Token>>, TokenizerError> {
        let mut statements: Vec<Vec<Token>> = Vec::new();
        let mut carry: Vec<String> = Vec::new();
        loop {
            let mut tokens: Vec<Token> = Vec::new();
            let mut pending = mem::take(&mut carry);
            pending.extend(self.scanner.read_whitespace_and_comments()?);
            let semicolon = loop {
                if self.scanner.is_eof() {
                    break false;
                }
                if self.scanner.peek() == Some(';') {
                    self.scanner.next();
                    break true;
                }
                let mut token = self.read_one(&mut pending, tokens.last())?;
                for text in self.scanner.read_whitespace_and_comments()? {
                    token.comments.push(Comment::after(text));
                }
                tokens.push(token);
            };
            if tokens.is_empty() {
                if semicolon {
                    carry = pending;
                    statements.push(Vec::new());
                    continue;
                }
                // Comments after the final statement have no next statement
                // to lead; they trail the last token seen.
                if !pending.is_empty() {
                    if let Some(last) = statements.iter_mut().rev().find_map(|s| s.last_mut()) {
                        last.comments.extend(pending.drain(..).map(Comment::after));
                    }
                }
                break;
            }
            route_comments(&mut tokens);
            statements.push(tokens);
            if !semicolon {
                break;
            }
        }
        Ok(statements)
    }

    /// Reads one token, turning `pending` comment texts into its `before`
    /// comments ahead of any comments collected inside a multi-word match.
    fn read_one(
        &mut self,
        pending: &mut Vec<String>,
        previous: Option<&Token>,
    ) -> Result<Token, TokenizerError> {
        let mut token = self.manager.read_token(&mut self.scanner, previous)?;
        if !pending.is_empty() {
            let mut comments: Vec<Comment> = pending.drain(..).map(Comment::before).collect();
            comments.append(&mut token.comments);
            token.comments = comments;
        }
        Ok(token)
    }
}

/// Applies the comment-routing rules within one statement:
///
/// - comments after `SELECT` move onto the first token that can start a
///   select item (hint comments starting with `+` stay put);
/// - comments after a comma move onto the following token;
/// - comments after a set operator move onto the following `SELECT`,
///   `VALUES` or `WITH` keyword.
fn route_comments(tokens: &mut [Token]) {
    const SET_OPERATORS: &[&str] = &[
        "union",
        "union all",
        "intersect",
        "intersect all",
        "except",
        "except all",
    ];
    for i in 0..tokens.len() {
        let target = if tokens[i].is_command("select") {
            find_forward(tokens, i + 1, can_start_select_item)
        } else if tokens[i].is(TokenType::COMMA) {
            if i + 1 < tokens.len() {
                Some(i + 1)
            } else {
                None
            }
        } else if SET_OPERATORS.iter().any(|op| tokens[i].is_command(op)) {
            find_forward(tokens, i + 1, |t| {
                t.is_command("select") || t.is_command("values") || t.is_command("with")
            })
        } else {
            None
        };
        let Some(target) = target else { continue };
        let keep_hints = tokens[i].is_command("select");
        let mut moved: Vec<String> = Vec::new();
        tokens[i].comments.retain(|c| {
            if c.position == CommentPosition::After && !(keep_hints && c.text.starts_with('+')) {
                moved.push(c.text.clone());
                false
            } else {
                true
            }
        });
        for text in moved.into_iter().rev() {
            tokens[target].comments.insert(0, Comment::before(text));
        }
    }
}

fn find_forward(tokens: &[Token], from: usize, accept: impl Fn(&Token) -> bool) -> Option<usize> {
    tokens[from..].iter().position(accept).map(|p| from + p)
}

/// A token that can begin a select item. `*` is an operator token but is a
/// legitimate first item.
fn can_start_select_item(token: &Token) -> bool {
    token.is(
        TokenType::IDENTIFIER
            | TokenType::LITERAL
            | TokenType::FUNCTION
            | TokenType::TYPE
            | TokenType::PARAMETER
            | TokenType::STRING_SPECIFIER
            | TokenType::OPEN_PAREN,
    ) || token.is_operator("*")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements(sql: &str) -> Vec<Vec<Token>> {
        Tokenizer::new(sql).tokenize_statements().unwrap()
    }

    #[test]
    fn splits_statements_on_semicolons() {
        let stmts = statements("SELECT 1; SELECT 2;; SELECT 3");
        assert_eq!(stmts.len(), 4);
        assert_eq!(stmts[0].len(), 2);
        assert!(stmts[2].is_empty());
        assert_eq!(stmts[3][1].value, "3");
    }

    #[test]
    fn spans_cover_the_source() {
        let sql = "SELECT a /* c */ , b FROM t";
        let tokens = Tokenizer::new(sql)
            .tokenize_with_options(&TokenizeOptions {
                preserve_formatting: true,
            })
            .unwrap();
        let mut rebuilt = String::new();
        for t in &tokens {
            rebuilt.push_str(&sql[t.span.start..t.span.end]);
            rebuilt.push_str(t.following_whitespace.as_deref().unwrap_or(""));
        }
        assert_eq!(rebuilt, sql);
        for pair in tokens.windows(2) {
            assert!(pair[0].span.start < pair[1].span.start);
        }
    }

    #[test]
    fn leading_comments_attach_before_first_token() {
        let stmts = statements("/* head */ SELECT 1");
        let select = &stmts[0][0];
        assert_eq!(select.comments_before().len(), 1);
        assert_eq!(select.comments_before()[0].text, "head");
    }

    #[test]
    fn select_comments_route_to_first_item() {
        let stmts = statements("SELECT /* s */ a, b");
        let tokens = &stmts[0];
        assert!(tokens[0].comments.is_empty());
        assert_eq!(tokens[1].comments_before()[0].text, "s");
    }

    #[test]
    fn hint_comments_stay_on_select() {
        let stmts = statements("SELECT /*+ INDEX(t i) */ a");
        let tokens = &stmts[0];
        assert_eq!(tokens[0].comments_after()[0].text, "+ INDEX(t i)");
        assert!(tokens[1].comments.is_empty());
    }

    #[test]
    fn comma_comments_route_to_next_item() {
        let stmts = statements("SELECT a, /* b side */ b");
        let tokens = &stmts[0];
        let b = tokens.iter().find(|t| t.value == "b").unwrap();
        assert_eq!(b.comments_before()[0].text, "b side");
    }

    #[test]
    fn set_operator_comments_route_to_next_select() {
        let stmts = statements("SELECT 1 UNION ALL /* right */ SELECT 2");
        let tokens = &stmts[0];
        let union = tokens.iter().find(|t| t.value == "union all").unwrap();
        assert!(union.comments.is_empty());
        let second_select = tokens.iter().rposition(|t| t.value == "select").unwrap();
        assert_eq!(tokens[second_select].comments_before()[0].text, "right");
    }

    #[test]
    fn empty_statement_comments_carry_forward() {
        let stmts = statements("SELECT 1; /* next */ ; SELECT 2");
        assert_eq!(stmts.len(), 3);
        assert!(stmts[1].is_empty());
        assert_eq!(stmts[2][0].comments_before()[0].text, "next");
    }

    #[test]
    fn trailing_comments_attach_to_last_token() {
        let stmts = statements("SELECT 1; -- done");
        assert_eq!(stmts.len(), 1);
        let one = stmts[0].last().unwrap();
        assert_eq!(one.comments_after()[0].text, "done");
    }

    #[test]
    fn every_comment_survives_exactly_once() {
        let sql = "/* a */ SELECT /* b */ x, -- c\n y FROM t /* d */";
        let stmts = statements(sql);
        let mut seen: Vec<String> = Vec::new();
        for t in &stmts[0] {
            seen.extend(t.comments.iter().map(|c| c.text.clone()));
        }
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn unterminated_string_reports_position() {
        let err = Tokenizer::new("SELECT 'abc").tokenize().unwrap_err();
        assert_eq!(err.offset, 7);
        assert_eq!(err.location.line, 1);
        assert_eq!(err.location.column, 8);
    }
}
