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

#![warn(clippy::all)]
//! Tests for the public tokenizer surface, comment preservation through
//! the AST, and the non-throwing `analyze` wrapper.

use matches::assert_matches;
use pretty_assertions::assert_eq;

use sqltext::ast::*;
use sqltext::parser::ParserError;
use sqltext::test_utils::*;
use sqltext::tokenizer::{Comment, TokenType, TokenizeOptions};
use sqltext::{analyze, parse_many, parse_many_with_options, ParseMode, ParseOptions};

#[test]
fn tokens_cover_the_whole_input() {
    let sql = "SELECT a + 1, 'it''s' FROM t -- tail\nWHERE a IS NOT NULL; SELECT 2";
    let tokens = sqltext::tokenize_with_options(
        sql,
        &TokenizeOptions {
            preserve_formatting: true,
        },
    )
    .unwrap();
    let mut rebuilt = String::new();
    for token in &tokens {
        rebuilt.push_str(&sql[token.span.start..token.span.end]);
        rebuilt.push_str(token.following_whitespace.as_deref().unwrap_or(""));
    }
    assert_eq!(rebuilt, sql);
}

#[test]
fn canonical_token_text_retokenizes_equivalently() {
    let sql = "SELECT a, count(*) FROM t WHERE a IS NOT NULL GROUP BY a ORDER BY a DESC";
    let values: Vec<String> = sqltext::tokenize(sql)
        .unwrap()
        .into_iter()
        .map(|t| t.value)
        .collect();
    let rejoined = values.join(" ");
    let revalues: Vec<String> = sqltext::tokenize(&rejoined)
        .unwrap()
        .into_iter()
        .map(|t| t.value)
        .collect();
    assert_eq!(values, revalues);
}

#[test]
fn flat_tokenize_keeps_semicolons() {
    let tokens = sqltext::tokenize("SELECT 1; SELECT 2").unwrap();
    assert!(tokens.iter().any(|t| t.is(TokenType::SEMICOLON)));
}

#[test]
fn token_values_are_canonical() {
    let tokens = sqltext::tokenize("SELECT a FROM t GROUP  BY a").unwrap();
    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["select", "a", "from", "t", "group by", "a"]);
}

#[test]
fn multi_statement_comments_route_to_their_owners() {
    let sql = "/* head */ SELECT /* s */ a /* a-after */, b FROM t; SELECT 1";
    let statements = parse_many(sql).unwrap();
    assert_eq!(statements.len(), 2);

    let Statement::Select(query) = &statements[0] else {
        panic!("expected SELECT");
    };
    assert_eq!(query.header_comments(), &[Comment::before("head")]);
    let SelectQuery::Simple(select) = query else {
        panic!("expected a simple SELECT");
    };
    assert_eq!(
        select.select.items[0].comments,
        vec![Comment::before("s"), Comment::after("a-after")]
    );
    assert!(select.select.items[1].comments.is_empty());

    let Statement::Select(SelectQuery::Simple(second)) = &statements[1] else {
        panic!("expected SELECT 1");
    };
    assert_eq!(second.select.items[0].expr, number("1"));
}

#[test]
fn clause_keywords_keep_their_trailing_comments() {
    let select = verified_select("SELECT a FROM /* src */ t WHERE /* cond */ a = 1");
    assert_eq!(select.from.unwrap().comments, vec![Comment::after("src")]);
    assert_eq!(
        select.where_clause.unwrap().comments,
        vec![Comment::after("cond")]
    );
}

#[test]
fn select_hints_are_extracted() {
    let select = verified_select("SELECT /*+ INDEX(t i) */ /* plain */ a FROM t");
    assert_eq!(select.select.hints, vec!["INDEX(t i)"]);
    // the non-hint comment routed onto the first item
    assert_eq!(select.select.items[0].comments, vec![Comment::before("plain")]);
}

#[test]
fn with_clause_comments_lead_the_first_cte() {
    let select = verified_select("WITH /* c */ r AS (SELECT 1) SELECT * FROM r");
    let with = select.with.unwrap();
    assert_eq!(with.tables[0].comments, vec![Comment::before("c")]);
}

#[test]
fn cte_open_paren_comments_head_the_inner_query() {
    let select = verified_select("WITH r AS ( /* h */ SELECT 1) SELECT * FROM r");
    let with = select.with.unwrap();
    let Statement::Select(inner) = with.tables[0].query.as_ref() else {
        panic!("expected a query inside the CTE");
    };
    assert_eq!(inner.header_comments(), &[Comment::before("h")]);
}

#[test]
fn cte_close_paren_comments_trail_the_cte() {
    let select = verified_select("WITH r AS (SELECT 1) /* t */ SELECT * FROM r");
    let with = select.with.unwrap();
    assert_eq!(with.tables[0].comments, vec![Comment::after("t")]);
}

#[test]
fn set_operator_comments_head_the_right_query() {
    let query = parse_query("SELECT 1 UNION ALL /* right */ SELECT 2");
    let SelectQuery::Binary(binary) = query else {
        panic!("expected a binary query");
    };
    assert_eq!(binary.right.header_comments(), &[Comment::before("right")]);
}

#[test]
fn comments_between_statements_carry_forward() {
    let statements = parse_many("SELECT 1; /* next */ ; SELECT 2").unwrap();
    assert_eq!(statements.len(), 2);
    let Statement::Select(second) = &statements[1] else {
        panic!("expected SELECT");
    };
    assert_eq!(second.header_comments(), &[Comment::before("next")]);
}

#[test]
fn empty_statements_can_be_kept() {
    let options = ParseOptions {
        mode: ParseMode::Multiple,
        skip_empty_statements: false,
    };
    let statements = parse_many_with_options("SELECT 1;; SELECT 2", &options).unwrap();
    assert_eq!(statements.len(), 3);
    assert_matches!(statements[1], Statement::Empty { .. });
}

#[test]
fn single_mode_rejects_extra_statements() {
    let err = sqltext::parse("SELECT 1; SELECT 2").unwrap_err();
    assert_matches!(err, ParserError::SemanticShape { .. });

    let options = ParseOptions {
        mode: ParseMode::Multiple,
        skip_empty_statements: true,
    };
    let first = sqltext::parse_with_options("SELECT 1; SELECT 2", &options).unwrap();
    assert_matches!(first, Statement::Select(_));
}

#[test]
fn parse_many_aborts_on_the_first_error() {
    let err = parse_many("SELECT 1; SELECT FROM; SELECT 3").unwrap_err();
    assert_matches!(err, ParserError::UnexpectedToken { .. });
}

#[test]
fn analyze_reports_success() {
    let analysis = analyze("SELECT a FROM t");
    assert!(analysis.success);
    assert!(analysis.error.is_none());
    assert_eq!(analysis.remaining_tokens, 0);
    assert_matches!(analysis.statement, Some(Statement::Select(_)));
}

#[test]
fn analyze_reports_tokenizer_errors_with_offsets() {
    let analysis = analyze("SELECT 'abc");
    assert!(!analysis.success);
    assert_eq!(analysis.error_offset, Some(7));
    assert!(analysis.error.unwrap().contains("unterminated string"));
}

#[test]
fn analyze_reports_parser_errors_with_offsets() {
    let sql = "SELECT a FROM WHERE";
    let analysis = analyze(sql);
    assert!(!analysis.success);
    let offset = analysis.error_offset.unwrap();
    assert_eq!(&sql[offset..], "WHERE");
    assert!(analysis.remaining_tokens > 0);
}

#[test]
fn analyze_reports_unexpected_end_at_input_end() {
    let analysis = analyze("SELECT a FROM");
    assert!(!analysis.success);
    assert_eq!(analysis.error_offset, Some("SELECT a FROM".len()));
}

#[test]
fn trailing_token_errors_carry_positions() {
    let err = sqltext::parse("SELECT 1 2").unwrap_err();
    match err {
        ParserError::TrailingTokens {
            found,
            index,
            offset,
        } => {
            assert_eq!(found, "2");
            assert_eq!(index, 2);
            assert_eq!(offset, 9);
        }
        other => panic!("expected TrailingTokens, got {other:?}"),
    }
}

#[test]
fn unexpected_token_errors_name_both_sides() {
    let err = sqltext::parse("SELECT a FROM t GROUP BY").unwrap_err();
    assert_eq!(err.to_string(), "Expected an expression, found: EOF");

    let err = sqltext::parse("INSERT INTO t SET x = 1").unwrap_err();
    assert!(err.to_string().starts_with("Expected VALUES or a query"));
}

#[test]
fn statement_spans_line_and_column_positions() {
    let tokens = sqltext::tokenize("SELECT\n  a").unwrap();
    let a = tokens.last().unwrap();
    assert_eq!(a.span.start_location.line, 2);
    assert_eq!(a.span.start_location.column, 3);
}
