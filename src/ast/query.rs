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

//! Query statements, clauses and row sources.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::expr::{Expr, FunctionCall, WindowSpec};
use super::{Ident, ObjectName, Statement};
use crate::tokenizer::Comment;

/// A query producing rows: a plain `SELECT`, a set operation over two
/// queries, or a bare `VALUES` list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SelectQuery {
    Simple(Box<SimpleSelectQuery>),
    Binary(Box<BinarySelectQuery>),
    Values(ValuesQuery),
}

impl SelectQuery {
    /// The comments leading the query.
    pub fn header_comments(&self) -> &[Comment] {
        match self {
            SelectQuery::Simple(q) => &q.header_comments,
            SelectQuery::Binary(q) => &q.header_comments,
            SelectQuery::Values(q) => &q.comments,
        }
    }

    /// Prepends comments to the query header, preserving their order.
    pub fn add_header_comments(&mut self, comments: Vec<Comment>) {
        if comments.is_empty() {
            return;
        }
        let target = match self {
            SelectQuery::Simple(q) => &mut q.header_comments,
            SelectQuery::Binary(q) => &mut q.header_comments,
            SelectQuery::Values(q) => &mut q.comments,
        };
        let mut merged = comments;
        merged.append(target);
        *target = merged;
    }
}

/// A single `SELECT` with its clauses, in the only order they may appear.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimpleSelectQuery {
    pub with: Option<WithClause>,
    pub select: SelectClause,
    pub from: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
    pub group_by: Option<GroupByClause>,
    pub having: Option<HavingClause>,
    pub window: Option<WindowClause>,
    pub order_by: Option<OrderByClause>,
    pub limit: Option<LimitClause>,
    pub offset: Option<OffsetClause>,
    pub fetch: Option<FetchClause>,
    pub for_clause: Option<ForClause>,
    pub header_comments: Vec<Comment>,
}

impl SimpleSelectQuery {
    pub fn new(select: SelectClause) -> Self {
        SimpleSelectQuery {
            with: None,
            select,
            from: None,
            where_clause: None,
            group_by: None,
            having: None,
            window: None,
            order_by: None,
            limit: None,
            offset: None,
            fetch: None,
            for_clause: None,
            header_comments: Vec::new(),
        }
    }
}

/// A set operation. `A UNION B UNION C` nests as
/// `Binary(Binary(A, B), C)`: set operations associate to the left.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinarySelectQuery {
    pub left: SelectQuery,
    pub op: SetOperator,
    /// `ALL` after the operator
    pub all: bool,
    pub right: SelectQuery,
    pub header_comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

/// A `VALUES` list, as a statement of its own or as an `INSERT` source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValuesQuery {
    pub rows: Vec<Vec<Expr>>,
    pub comments: Vec<Comment>,
}

/// The item list of a `SELECT`, with distinctness and optimizer hints.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectClause {
    pub distinct: Option<Distinct>,
    pub items: Vec<SelectItem>,
    /// Texts of `/*+ ... */` comments right after `SELECT`, `+` stripped.
    pub hints: Vec<String>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Distinct {
    /// `DISTINCT`
    Distinct,
    /// `DISTINCT ON (<exprs>)`
    DistinctOn(Vec<Expr>),
}

/// One projected item, with its alias when present.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: Option<Ident>,
    pub comments: Vec<Comment>,
}

impl SelectItem {
    pub fn new(expr: Expr) -> Self {
        SelectItem {
            expr,
            alias: None,
            comments: Vec::new(),
        }
    }
}

/// `WITH [RECURSIVE] <cte> [, <cte>]*`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WithClause {
    pub recursive: bool,
    pub tables: Vec<CommonTable>,
    pub comments: Vec<Comment>,
}

/// One common table expression.
///
/// The inner statement is a full [`Statement`]: PostgreSQL permits DML with
/// `RETURNING` inside a CTE, not just queries.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommonTable {
    pub name: Ident,
    pub columns: Option<Vec<Ident>>,
    /// `Some(true)` for `MATERIALIZED`, `Some(false)` for
    /// `NOT MATERIALIZED`, `None` when unspecified.
    pub materialized: Option<bool>,
    pub query: Box<Statement>,
    pub comments: Vec<Comment>,
}

/// `FROM <source> [<join>]*`. A comma between sources is recorded as a
/// cross join.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FromClause {
    pub source: SourceExpression,
    pub joins: Vec<JoinClause>,
    pub comments: Vec<Comment>,
}

/// A row source plus its optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceExpression {
    pub datasource: Datasource,
    pub alias: Option<SourceAliasExpression>,
    /// `LATERAL` before the source
    pub lateral: bool,
}

impl SourceExpression {
    pub fn table(name: ObjectName) -> Self {
        SourceExpression {
            datasource: Datasource::Table(TableSource { name }),
            alias: None,
            lateral: false,
        }
    }
}

/// What a source expression reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Datasource {
    Table(TableSource),
    SubQuery(SubQuerySource),
    /// A parenthesized join tree, e.g. `(a JOIN b ON ...)`
    Paren(Box<ParenSource>),
    /// A set-returning function, e.g. `generate_series(1, 10)`
    Function(FunctionCall),
}

/// A named table or view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableSource {
    pub name: ObjectName,
}

/// A derived table: `(SELECT ...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubQuerySource {
    pub query: Box<SelectQuery>,
}

/// The body of a parenthesized source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParenSource {
    pub source: SourceExpression,
    pub joins: Vec<JoinClause>,
}

/// An alias, optionally renaming columns as well: `t (a, b)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceAliasExpression {
    pub table_alias: Ident,
    pub column_aliases: Option<Vec<Ident>>,
}

impl SourceAliasExpression {
    pub fn new(table_alias: impl Into<Ident>) -> Self {
        SourceAliasExpression {
            table_alias: table_alias.into(),
            column_aliases: None,
        }
    }
}

/// One join step in a `FROM` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JoinClause {
    pub join_type: JoinType,
    pub source: SourceExpression,
    pub condition: Option<JoinCondition>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JoinType {
    /// `JOIN` / `INNER JOIN`
    Inner,
    /// `LEFT [OUTER] JOIN`
    Left,
    /// `RIGHT [OUTER] JOIN`
    Right,
    /// `FULL [OUTER] JOIN`
    Full,
    /// `CROSS JOIN`, or a comma between sources
    Cross,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JoinCondition {
    On(Expr),
    Using(Vec<Ident>),
}

/// `WHERE <condition>`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WhereClause {
    pub condition: Expr,
    pub comments: Vec<Comment>,
}

/// `GROUP BY <expr> [, <expr>]*`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupByClause {
    pub items: Vec<Expr>,
    pub comments: Vec<Comment>,
}

/// `HAVING <condition>`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HavingClause {
    pub condition: Expr,
    pub comments: Vec<Comment>,
}

/// `WINDOW <name> AS (<spec>) [, ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowClause {
    pub windows: Vec<NamedWindow>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NamedWindow {
    pub name: Ident,
    pub spec: WindowSpec,
}

/// `ORDER BY <item> [, <item>]*`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderByClause {
    pub items: Vec<OrderByItem>,
    pub comments: Vec<Comment>,
}

/// One sort key. Defaults are represented as absent, not as explicit
/// `ASC`/`NULLS LAST`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderByItem {
    pub expr: Expr,
    pub direction: Option<SortDirection>,
    pub nulls: Option<NullsPlacement>,
    pub comments: Vec<Comment>,
}

impl OrderByItem {
    pub fn new(expr: Expr) -> Self {
        OrderByItem {
            expr,
            direction: None,
            nulls: None,
            comments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NullsPlacement {
    First,
    Last,
}

/// `LIMIT <expr>`; `value` is `None` for `LIMIT ALL`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LimitClause {
    pub value: Option<Expr>,
    pub comments: Vec<Comment>,
}

/// `OFFSET <expr> [ROW | ROWS]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OffsetClause {
    pub value: Expr,
    pub rows: Option<OffsetRows>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OffsetRows {
    Row,
    Rows,
}

/// `FETCH {FIRST | NEXT} [<quantity>] {ROW | ROWS} {ONLY | WITH TIES}`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FetchClause {
    /// `FIRST` rather than `NEXT`
    pub first: bool,
    pub quantity: Option<Expr>,
    pub with_ties: bool,
    pub comments: Vec<Comment>,
}

/// `FOR {UPDATE | NO KEY UPDATE | SHARE | KEY SHARE} [OF <tables>]
/// [NOWAIT | SKIP LOCKED]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForClause {
    pub lock_mode: LockMode,
    pub of: Vec<ObjectName>,
    pub wait_policy: Option<LockWait>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LockMode {
    Update,
    NoKeyUpdate,
    Share,
    KeyShare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LockWait {
    Nowait,
    SkipLocked,
}
