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

//! Token readers and the reader manager that dispatches over them.
//!
//! The readers run in a strict order which is load-bearing and must not be
//! changed:
//!
//! 1. escaped identifier   6. command (keyword trie)
//! 2. parameter            7. operator (symbolic, then word trie)
//! 3. string specifier     8. type
//! 4. literal              9. function
//! 5. special symbol      10. plain identifier
//!
//! Literals run before symbols and operators so that `1.0`, `.5` and a
//! leading-sign `+3` lex as numbers; types run before functions so that
//! `numeric(10, 2)` never becomes a function call.

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use itertools::Itertools;

use super::scanner::Scanner;
use super::trie::{KeywordTrie, TrieMatch};
use super::{Comment, CommentPosition, Span, Token, TokenType, TokenizerError};
use crate::keywords;

/// A token recognized by a reader, before span assembly.
struct RawToken {
    token_type: TokenType,
    value: String,
    /// Comments swallowed while matching a multi-word phrase.
    comments: Vec<String>,
}

impl RawToken {
    fn new(token_type: TokenType, value: impl Into<String>) -> RawToken {
        RawToken {
            token_type,
            value: value.into(),
            comments: Vec::new(),
        }
    }
}

/// A phrase matched against one of the keyword tries.
struct PhraseMatch {
    /// Lower-cased words joined by single spaces.
    canonical: String,
    word_count: usize,
    /// Comments read between the words of the phrase.
    comments: Vec<String>,
}

/// Ordered dispatch over the token readers. Produces one token at a time
/// from the scanner position, which must be at a non-whitespace character.
pub(crate) struct ReaderManager {
    commands: KeywordTrie,
    operators: KeywordTrie,
    types: KeywordTrie,
}

impl ReaderManager {
    pub fn new() -> ReaderManager {
        ReaderManager {
            commands: KeywordTrie::new(keywords::KEYWORD_PHRASES),
            operators: KeywordTrie::new(keywords::OPERATOR_PHRASES),
            types: KeywordTrie::new(keywords::TYPE_PHRASES),
        }
    }

    /// Reads exactly one token. `previous` is the last token of the current
    /// statement, used to decide whether a sign belongs to a number and
    /// whether `[` opens an escaped identifier or a subscript.
    pub fn read_token(
        &self,
        scanner: &mut Scanner<'_>,
        previous: Option<&Token>,
    ) -> Result<Token, TokenizerError> {
        let start = scanner.pos();
        let raw = self.dispatch(scanner, previous)?;
        match raw {
            Some(raw) => {
                let span = Span {
                    start,
                    end: scanner.pos(),
                    start_location: scanner.location_at(start),
                    end_location: scanner.location_at(scanner.pos()),
                };
                let comments = raw
                    .comments
                    .into_iter()
                    .map(|text| Comment {
                        position: CommentPosition::After,
                        text,
                    })
                    .collect();
                Ok(Token {
                    token_type: raw.token_type,
                    value: raw.value,
                    span,
                    comments,
                    following_whitespace: None,
                })
            }
            None => Err(TokenizerError {
                message: format!(
                    "unexpected character {:?}",
                    scanner.peek().unwrap_or('\u{0}')
                ),
                offset: start,
                location: scanner.location_at(start),
            }),
        }
    }

    fn dispatch(
        &self,
        scanner: &mut Scanner<'_>,
        previous: Option<&Token>,
    ) -> Result<Option<RawToken>, TokenizerError> {
        if let Some(t) = try_read_escaped_identifier(scanner, previous)? {
            return Ok(Some(t));
        }
        if let Some(t) = try_read_parameter(scanner) {
            return Ok(Some(t));
        }
        if let Some(t) = try_read_string_specifier(scanner)? {
            return Ok(Some(t));
        }
        if let Some(t) = try_read_literal(scanner, previous)? {
            return Ok(Some(t));
        }
        if let Some(t) = try_read_symbol(scanner) {
            return Ok(Some(t));
        }
        if let Some(t) = self.try_read_command(scanner)? {
            return Ok(Some(t));
        }
        if let Some(t) = self.try_read_operator(scanner)? {
            return Ok(Some(t));
        }
        if let Some(t) = self.try_read_type(scanner)? {
            return Ok(Some(t));
        }
        if let Some(t) = try_read_function(scanner)? {
            return Ok(Some(t));
        }
        Ok(scanner
            .try_read_regular_identifier()
            .map(|ident| RawToken::new(TokenType::IDENTIFIER, ident)))
    }

    fn try_read_command(
        &self,
        scanner: &mut Scanner<'_>,
    ) -> Result<Option<RawToken>, TokenizerError> {
        Ok(match_phrase(&self.commands, scanner)?.map(|m| RawToken {
            token_type: TokenType::COMMAND,
            value: m.canonical,
            comments: m.comments,
        }))
    }

    fn try_read_operator(
        &self,
        scanner: &mut Scanner<'_>,
    ) -> Result<Option<RawToken>, TokenizerError> {
        for op in keywords::SYMBOL_OPERATORS {
            if scanner.consume(op) {
                return Ok(Some(RawToken::new(TokenType::OPERATOR, *op)));
            }
        }
        Ok(match_phrase(&self.operators, scanner)?.map(|m| RawToken {
            token_type: TokenType::OPERATOR,
            value: m.canonical,
            comments: m.comments,
        }))
    }

    fn try_read_type(&self, scanner: &mut Scanner<'_>) -> Result<Option<RawToken>, TokenizerError> {
        Ok(match_phrase(&self.types, scanner)?.map(|m| {
            // A single-word type name may still be a column reference; keep
            // the identifier role so the parser can decide from context.
            let token_type = if m.word_count == 1 {
                TokenType::TYPE | TokenType::IDENTIFIER
            } else {
                TokenType::TYPE
            };
            RawToken {
                token_type,
                value: m.canonical,
                comments: m.comments,
            }
        }))
    }
}

/// Walks `trie` over whitespace-separated identifiers starting at the
/// scanner position. On a failed extension the scanner rewinds to the last
/// partial-or-final checkpoint, or all the way back when nothing matched.
/// Comments read between matched words are carried on the result.
fn match_phrase(
    trie: &KeywordTrie,
    scanner: &mut Scanner<'_>,
) -> Result<Option<PhraseMatch>, TokenizerError> {
    let start = scanner.pos();
    let mut cursor = trie.cursor();
    let mut words: Vec<String> = Vec::new();
    let mut comments: Vec<String> = Vec::new();
    // (canonical, end position, comments consumed) of the longest keyword
    // seen so far.
    let mut matched: Option<(String, usize, usize)> = None;

    loop {
        let word = match scanner.try_read_regular_identifier() {
            Some(word) => word.to_lowercase(),
            None => break,
        };
        match cursor.push(&word) {
            TrieMatch::NoMatch => break,
            TrieMatch::Partial => words.push(word),
            TrieMatch::Final => {
                words.push(word);
                matched = Some((words.iter().join(" "), scanner.pos(), comments.len()));
                break;
            }
            TrieMatch::PartialOrFinal => {
                words.push(word);
                matched = Some((words.iter().join(" "), scanner.pos(), comments.len()));
            }
        }
        comments.extend(scanner.read_whitespace_and_comments()?);
    }

    match matched {
        Some((canonical, end, comments_used)) => {
            scanner.seek(end);
            comments.truncate(comments_used);
            let word_count = canonical.split(' ').count();
            Ok(Some(PhraseMatch {
                canonical,
                word_count,
                comments,
            }))
        }
        None => {
            scanner.seek(start);
            Ok(None)
        }
    }
}

/// True when the previous token cannot end an expression, so the next token
/// starts one. Decides sign folding for numbers and `[` disambiguation.
fn starts_expression(previous: Option<&Token>) -> bool {
    match previous {
        None => true,
        Some(t) => t.token_type.intersects(
            TokenType::OPERATOR
                | TokenType::COMMA
                | TokenType::OPEN_PAREN
                | TokenType::OPEN_BRACKET
                | TokenType::COMMAND
                | TokenType::SEMICOLON,
        ),
    }
}

fn try_read_escaped_identifier(
    scanner: &mut Scanner<'_>,
    previous: Option<&Token>,
) -> Result<Option<RawToken>, TokenizerError> {
    let open = match scanner.peek() {
        Some(c) if super::IDENTIFIER_QUOTES.contains(&c) => c,
        _ => return Ok(None),
    };
    let (close, doubling) = match open {
        // `[` only opens an identifier where an expression may start or
        // after a dot; anywhere else it is a subscript.
        '[' => {
            if !starts_expression(previous)
                && !previous.is_some_and(|t| t.token_type.contains(TokenType::DOT))
            {
                return Ok(None);
            }
            (']', false)
        }
        c => (c, true),
    };
    let start = scanner.pos();
    scanner.next();
    loop {
        match scanner.next() {
            Some(c) if c == close => {
                if doubling && scanner.peek() == Some(close) {
                    scanner.next();
                    continue;
                }
                let value = &scanner.input()[start..scanner.pos()];
                return Ok(Some(RawToken::new(TokenType::IDENTIFIER, value)));
            }
            Some(_) => {}
            None => {
                return Err(TokenizerError {
                    message: "unterminated quoted identifier".to_string(),
                    offset: start,
                    location: scanner.location_at(start),
                })
            }
        }
    }
}

fn try_read_parameter(scanner: &mut Scanner<'_>) -> Option<RawToken> {
    let start = scanner.pos();
    match scanner.peek()? {
        '?' => {
            scanner.next();
            Some(RawToken::new(TokenType::PARAMETER, "?"))
        }
        ':' if scanner.peek_at(1) != Some(':') => {
            match scanner.peek_at(1) {
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
                _ => return None,
            }
            scanner.next();
            scanner.try_read_regular_identifier();
            Some(RawToken::new(
                TokenType::PARAMETER,
                &scanner.input()[start..scanner.pos()],
            ))
        }
        sigil @ ('$' | '@') => {
            let numbered = sigil == '$';
            match scanner.peek_at(1) {
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    scanner.next();
                    scanner.try_read_regular_identifier();
                }
                Some(c) if numbered && c.is_ascii_digit() => {
                    scanner.next();
                    while scanner.peek().is_some_and(|c| c.is_ascii_digit()) {
                        scanner.next();
                    }
                }
                _ => return None,
            }
            Some(RawToken::new(
                TokenType::PARAMETER,
                &scanner.input()[start..scanner.pos()],
            ))
        }
        _ => None,
    }
}

fn try_read_string_specifier(
    scanner: &mut Scanner<'_>,
) -> Result<Option<RawToken>, TokenizerError> {
    let specifier = match scanner.peek() {
        Some(c @ ('e' | 'E' | 'b' | 'B' | 'x' | 'X' | 'n' | 'N')) => c,
        _ => return Ok(None),
    };
    if scanner.peek_at(1) != Some('\'') {
        return Ok(None);
    }
    let start = scanner.pos();
    scanner.next();
    // E-strings honor backslash escapes in addition to quote doubling.
    let backslash = matches!(specifier, 'e' | 'E');
    read_quoted_string(scanner, backslash)?;
    Ok(Some(RawToken::new(
        TokenType::STRING_SPECIFIER | TokenType::LITERAL,
        &scanner.input()[start..scanner.pos()],
    )))
}

/// Consumes a single-quoted string starting at the opening quote. The value
/// stays raw; unescaping is the parser's concern.
fn read_quoted_string(
    scanner: &mut Scanner<'_>,
    backslash_escapes: bool,
) -> Result<(), TokenizerError> {
    let start = scanner.pos();
    scanner.next();
    loop {
        match scanner.next() {
            Some('\'') => {
                if scanner.peek() == Some('\'') {
                    scanner.next();
                    continue;
                }
                return Ok(());
            }
            Some('\\') if backslash_escapes => {
                scanner.next();
            }
            Some(_) => {}
            None => {
                return Err(TokenizerError {
                    message: "unterminated string literal".to_string(),
                    offset: start,
                    location: scanner.location_at(start),
                })
            }
        }
    }
}

fn try_read_literal(
    scanner: &mut Scanner<'_>,
    previous: Option<&Token>,
) -> Result<Option<RawToken>, TokenizerError> {
    let start = scanner.pos();
    match scanner.peek() {
        Some('\'') => {
            read_quoted_string(scanner, false)?;
            return Ok(Some(RawToken::new(
                TokenType::LITERAL,
                &scanner.input()[start..scanner.pos()],
            )));
        }
        Some(c) if c.is_ascii_digit() => {
            read_number(scanner);
            return Ok(Some(RawToken::new(
                TokenType::LITERAL,
                &scanner.input()[start..scanner.pos()],
            )));
        }
        // `.5`, `+3` and `-3` are numbers only where an expression starts;
        // after a value the same characters are operators.
        Some('.') if starts_expression(previous) => {
            if scanner.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                read_number(scanner);
                return Ok(Some(RawToken::new(
                    TokenType::LITERAL,
                    &scanner.input()[start..scanner.pos()],
                )));
            }
        }
        Some('+' | '-') if starts_expression(previous) => {
            let digits = match scanner.peek_at(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('.') => scanner.peek_at(2).is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if digits {
                scanner.next();
                read_number(scanner);
                return Ok(Some(RawToken::new(
                    TokenType::LITERAL,
                    &scanner.input()[start..scanner.pos()],
                )));
            }
        }
        Some(c) if c.is_ascii_alphabetic() => {
            if let Some(word) = scanner.try_read_regular_identifier() {
                if word.eq_ignore_ascii_case("true")
                    || word.eq_ignore_ascii_case("false")
                    || word.eq_ignore_ascii_case("null")
                {
                    return Ok(Some(RawToken::new(TokenType::LITERAL, word)));
                }
                scanner.seek(start);
            }
        }
        _ => {}
    }
    Ok(None)
}

/// Consumes `digits [. digits] [e [sign] digits]` from a digit or a dot.
fn read_number(scanner: &mut Scanner<'_>) {
    while scanner.peek().is_some_and(|c| c.is_ascii_digit()) {
        scanner.next();
    }
    if scanner.peek() == Some('.') && scanner.peek_at(1) != Some('.') {
        scanner.next();
        while scanner.peek().is_some_and(|c| c.is_ascii_digit()) {
            scanner.next();
        }
    }
    if matches!(scanner.peek(), Some('e' | 'E')) {
        let mut ahead = 1;
        if matches!(scanner.peek_at(1), Some('+' | '-')) {
            ahead = 2;
        }
        if scanner.peek_at(ahead).is_some_and(|c| c.is_ascii_digit()) {
            for _ in 0..=ahead {
                scanner.next();
            }
            while scanner.peek().is_some_and(|c| c.is_ascii_digit()) {
                scanner.next();
            }
        }
    }
}

fn try_read_symbol(scanner: &mut Scanner<'_>) -> Option<RawToken> {
    let token_type = match scanner.peek()? {
        '(' => TokenType::OPEN_PAREN,
        ')' => TokenType::CLOSE_PAREN,
        '[' => TokenType::OPEN_BRACKET,
        ']' => TokenType::CLOSE_BRACKET,
        ',' => TokenType::COMMA,
        '.' => TokenType::DOT,
        ';' => TokenType::SEMICOLON,
        _ => return None,
    };
    let c = scanner.next().expect("peeked symbol");
    let mut value = String::new();
    value.push(c);
    Some(RawToken {
        token_type,
        value,
        comments: Vec::new(),
    })
}

fn try_read_function(scanner: &mut Scanner<'_>) -> Result<Option<RawToken>, TokenizerError> {
    let start = scanner.pos();
    let ident = match scanner.try_read_regular_identifier() {
        Some(ident) => ident,
        None => return Ok(None),
    };
    let after_ident = scanner.pos();
    scanner.read_whitespace_and_comments()?;
    if scanner.peek() == Some('(') {
        scanner.seek(after_ident);
        Ok(Some(RawToken::new(TokenType::FUNCTION, ident)))
    } else {
        scanner.seek(start);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(sql: &str) -> Vec<Token> {
        let manager = ReaderManager::new();
        let mut scanner = Scanner::new(sql);
        let mut tokens: Vec<Token> = Vec::new();
        scanner.read_whitespace_and_comments().unwrap();
        while !scanner.is_eof() {
            let token = manager.read_token(&mut scanner, tokens.last()).unwrap();
            tokens.push(token);
            scanner.read_whitespace_and_comments().unwrap();
        }
        tokens
    }

    fn values(sql: &str) -> Vec<String> {
        read_all(sql).into_iter().map(|t| t.value).collect()
    }

    #[test]
    fn multi_word_commands_fold() {
        assert_eq!(values("GROUP  BY"), vec!["group by"]);
        assert_eq!(values("insert into t"), vec!["insert into", "t"]);
        assert_eq!(values("NOT MATERIALIZED"), vec!["not materialized"]);
    }

    #[test]
    fn partial_or_final_rewinds() {
        // `union` matches alone once `all` fails to extend it
        assert_eq!(values("union select"), vec!["union", "select"]);
        assert_eq!(values("union all select"), vec!["union all", "select"]);
    }

    #[test]
    fn word_operators_fold() {
        assert_eq!(values("a NOT IN b"), vec!["a", "not in", "b"]);
        assert_eq!(values("a IS NOT NULL"), vec!["a", "is not null"]);
        assert_eq!(
            values("a IS NOT DISTINCT FROM b"),
            vec!["a", "is not distinct from", "b"]
        );
        // failed extension falls back to the shorter operator
        assert_eq!(values("a IS NOT b"), vec!["a", "is not", "b"]);
    }

    #[test]
    fn signs_fold_only_at_expression_start() {
        assert_eq!(values("SELECT -3"), vec!["select", "-3"]);
        assert_eq!(values("a - 3"), vec!["a", "-", "3"]);
        assert_eq!(values("(1.0, .5)"), vec!["(", "1.0", ",", ".5", ")"]);
        assert_eq!(values("2e-3 + 1"), vec!["2e-3", "+", "1"]);
    }

    #[test]
    fn types_win_over_functions() {
        let tokens = read_all("numeric(10, 2)");
        assert!(tokens[0].token_type.contains(TokenType::TYPE));
        assert!(!tokens[0].token_type.contains(TokenType::FUNCTION));
        let tokens = read_all("timestamp with time zone");
        assert_eq!(tokens[0].value, "timestamp with time zone");
        assert!(!tokens[0].token_type.contains(TokenType::IDENTIFIER));
    }

    #[test]
    fn functions_require_a_paren() {
        let tokens = read_all("count(a)");
        assert!(tokens[0].token_type.contains(TokenType::FUNCTION));
        let tokens = read_all("count a");
        assert!(tokens[0].token_type.contains(TokenType::IDENTIFIER));
    }

    #[test]
    fn left_reverts_to_function() {
        // `left` only exists in the trie as a join prefix
        let tokens = read_all("left(name, 3)");
        assert!(tokens[0].token_type.contains(TokenType::FUNCTION));
        assert_eq!(values("left join t"), vec!["left join", "t"]);
    }

    #[test]
    fn parameters() {
        assert_eq!(values("$1 :name ? @tag"), vec!["$1", ":name", "?", "@tag"]);
        // `::` stays a cast operator
        assert_eq!(values("a::int"), vec!["a", "::", "int"]);
    }

    #[test]
    fn escaped_identifiers() {
        assert_eq!(values("\"my col\""), vec!["\"my col\""]);
        assert_eq!(values("`my col`"), vec!["`my col`"]);
        assert_eq!(values("select [my col]"), vec!["select", "[my col]"]);
        // after a value, brackets subscript
        assert_eq!(values("a[1]"), vec!["a", "[", "1", "]"]);
    }

    #[test]
    fn string_specifiers() {
        let tokens = read_all("E'a\\'b' X'1f'");
        assert!(tokens[0]
            .token_type
            .contains(TokenType::STRING_SPECIFIER | TokenType::LITERAL));
        assert_eq!(tokens[0].value, "E'a\\'b'");
        assert_eq!(tokens[1].value, "X'1f'");
    }

    #[test]
    fn phrase_interior_comments_ride_along() {
        let tokens = read_all("group /* g */ by x");
        assert_eq!(tokens[0].value, "group by");
        assert_eq!(tokens[0].comments.len(), 1);
        assert_eq!(tokens[0].comments[0].text, "g");
    }

    #[test]
    fn word_literals() {
        let tokens = read_all("TRUE false NULL");
        for t in &tokens {
            assert!(t.token_type.contains(TokenType::LITERAL));
        }
        assert_eq!(tokens[0].value, "TRUE");
    }
}
