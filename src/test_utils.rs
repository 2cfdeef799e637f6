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

//! This module contains internal utilities used for unit-testing the
//! library. While technically public, the library's users are not supposed
//! to rely on it.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, format};

use crate::ast::{
    ColumnReference, Expr, LiteralValue, SelectQuery, SimpleSelectQuery, Statement,
};

/// Parses exactly one statement, panicking on failure.
pub fn parse_one(sql: &str) -> Statement {
    crate::parse(sql).unwrap_or_else(|e| panic!("could not parse {sql:?}: {e}"))
}

/// Parses a query statement of any shape.
pub fn parse_query(sql: &str) -> SelectQuery {
    match parse_one(sql) {
        Statement::Select(query) => query,
        other => panic!("expected a query, got {other:?}"),
    }
}

/// Parses a plain (non-binary) `SELECT`.
pub fn verified_select(sql: &str) -> SimpleSelectQuery {
    match parse_query(sql) {
        SelectQuery::Simple(query) => *query,
        other => panic!("expected a simple SELECT, got {other:?}"),
    }
}

/// Parses `sql` as a single select item's expression.
pub fn verified_expr(sql: &str) -> Expr {
    let mut select = verified_select(&format!("SELECT {sql}"));
    assert_eq!(select.select.items.len(), 1, "expected one item in {sql:?}");
    select.select.items.remove(0).expr
}

/// An unqualified column reference.
pub fn col(name: &str) -> Expr {
    Expr::ColumnReference(ColumnReference::new(name))
}

/// A numeric literal, kept as written.
pub fn number(n: &str) -> Expr {
    Expr::Literal(LiteralValue::Number(n.into()))
}

/// A plain string literal.
pub fn string(s: &str) -> Expr {
    Expr::Literal(LiteralValue::string(s))
}

/// Boxes an expression, for building expected trees.
pub fn boxed(expr: Expr) -> Box<Expr> {
    Box::new(expr)
}
