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

//! A cursor over the SQL source string with lexing convenience methods.

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use super::{Location, TokenizerError};

/// A cursor over a string. The internal position is a byte offset; all
/// methods keep it on a character boundary. Readers checkpoint the cursor
/// with [`Scanner::pos`] and rewind with [`Scanner::seek`].
pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    /// Byte offsets at which each line starts; `line_starts[0] == 0`.
    line_starts: Vec<usize>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Scanner<'a> {
        let mut line_starts = Vec::new();
        line_starts.push(0);
        for (i, b) in input.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Scanner {
            input,
            pos: 0,
            line_starts,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        debug_assert!(self.input.is_char_boundary(pos));
        self.pos = pos;
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the next character without advancing the cursor.
    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character `n` positions ahead of the cursor.
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    /// Returns the next character, advancing the cursor past it. Safe to
    /// call after it returns `None`.
    pub fn next(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(c) = c {
            self.pos += c.len_utf8();
        }
        c
    }

    /// Returns true if the remaining input starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    /// Consumes `prefix` if the remaining input starts with it.
    pub fn consume(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    /// Translates a byte offset into a 1-based line/column pair.
    pub fn location_at(&self, offset: usize) -> Location {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self.input[line_start..offset].chars().count() + 1;
        Location {
            line: line as u64,
            column: column as u64,
        }
    }

    /// Reads a regular identifier `[A-Za-z_][A-Za-z0-9_$]*`, or returns
    /// `None` without moving the cursor.
    pub fn try_read_regular_identifier(&mut self) -> Option<&'a str> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                self.next();
            }
            _ => return None,
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                self.next();
            } else {
                break;
            }
        }
        Some(&self.input[start..self.pos])
    }

    /// Consumes any run of whitespace and comments, returning the comment
    /// texts (delimiters stripped, trimmed) in source order.
    ///
    /// Line comments start with `--` or `#`; block comments `/* ... */`
    /// nest. An unterminated block comment is an error.
    pub fn read_whitespace_and_comments(&mut self) -> Result<Vec<String>, TokenizerError> {
        let mut comments = Vec::new();
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.next();
                }
                Some('-') if self.starts_with("--") => {
                    comments.push(self.read_line_comment(2));
                }
                Some('#') => {
                    comments.push(self.read_line_comment(1));
                }
                Some('/') if self.starts_with("/*") => {
                    comments.push(self.read_block_comment()?);
                }
                _ => break,
            }
        }
        Ok(comments)
    }

    fn read_line_comment(&mut self, delimiter_len: usize) -> String {
        self.pos += delimiter_len;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.next();
        }
        self.input[start..self.pos].trim().to_string()
    }

    fn read_block_comment(&mut self) -> Result<String, TokenizerError> {
        let open = self.pos;
        self.pos += 2;
        let start = self.pos;
        let mut depth = 1usize;
        loop {
            if self.is_eof() {
                return Err(TokenizerError {
                    message: "unterminated block comment".to_string(),
                    offset: open,
                    location: self.location_at(open),
                });
            }
            if self.starts_with("/*") {
                depth += 1;
                self.pos += 2;
            } else if self.starts_with("*/") {
                depth -= 1;
                if depth == 0 {
                    let text = self.input[start..self.pos].trim().to_string();
                    self.pos += 2;
                    return Ok(text);
                }
                self.pos += 2;
            } else {
                self.next();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_identifiers() {
        let mut s = Scanner::new("foo_1$ bar");
        assert_eq!(s.try_read_regular_identifier(), Some("foo_1$"));
        assert_eq!(s.try_read_regular_identifier(), None);
        s.read_whitespace_and_comments().unwrap();
        assert_eq!(s.try_read_regular_identifier(), Some("bar"));
        assert!(s.is_eof());
    }

    #[test]
    fn identifier_must_not_start_with_digit() {
        let mut s = Scanner::new("1abc");
        assert_eq!(s.try_read_regular_identifier(), None);
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn collects_comments_in_order() {
        let mut s = Scanner::new("  -- one\n  /* two */ # three\nx");
        let comments = s.read_whitespace_and_comments().unwrap();
        assert_eq!(comments, vec!["one", "two", "three"]);
        assert_eq!(s.peek(), Some('x'));
    }

    #[test]
    fn block_comments_nest() {
        let mut s = Scanner::new("/* a /* b */ c */x");
        let comments = s.read_whitespace_and_comments().unwrap();
        assert_eq!(comments, vec!["a /* b */ c"]);
        assert_eq!(s.peek(), Some('x'));
    }

    #[test]
    fn unterminated_block_comment_errors() {
        let mut s = Scanner::new("/* never closed");
        let err = s.read_whitespace_and_comments().unwrap_err();
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn tracks_line_and_column() {
        let s = Scanner::new("ab\ncd\nef");
        assert_eq!(s.location_at(0), Location { line: 1, column: 1 });
        assert_eq!(s.location_at(4), Location { line: 2, column: 2 });
        assert_eq!(s.location_at(6), Location { line: 3, column: 1 });
    }
}
