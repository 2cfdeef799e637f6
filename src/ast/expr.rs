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

//! Value expression nodes.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::operator::{BinaryOperator, UnaryOperator};
use super::query::{OrderByItem, SelectQuery};
use super::value::{LiteralValue, ParameterExpression, TypeValue};
use super::{Ident, ObjectName};

/// An SQL expression of any type.
///
/// The parser does not distinguish between expressions of different types
/// (boolean vs string, say); the caller handles expressions of
/// inappropriate type, like `WHERE 1`, as necessary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A possibly-qualified column reference, e.g. `t.c`
    ColumnReference(ColumnReference),
    /// A literal value
    Literal(LiteralValue),
    /// A constant of form `<type> '<value>'`, e.g. `DATE '2024-01-01'`
    TypedString { data_type: TypeValue, value: String },
    /// A placeholder parameter
    Parameter(ParameterExpression),
    /// Binary operation, e.g. `1 + 1` or `foo > bar`
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// Unary operation, e.g. `NOT foo`
    UnaryOp { op: UnaryOperator, expr: Box<Expr> },
    /// Parenthesized expression, e.g. `(foo > bar)`
    Nested(Box<Expr>),
    /// A row constructor, e.g. `(1, 2)`
    Tuple(Vec<Expr>),
    /// `<expr> IS [NOT] NULL`
    IsNull { expr: Box<Expr>, negated: bool },
    /// `<expr> IS [NOT] DISTINCT FROM <expr>`
    IsDistinctFrom {
        left: Box<Expr>,
        right: Box<Expr>,
        negated: bool,
    },
    /// `<expr> [NOT] BETWEEN <low> AND <high>`
    Between {
        expr: Box<Expr>,
        negated: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// `<expr> [NOT] IN (val1, val2, ...)`
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    /// `<expr> [NOT] IN (SELECT ...)`
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<SelectQuery>,
        negated: bool,
    },
    /// `CAST(<expr> AS <type>)` or `<expr> :: <type>`
    Cast {
        expr: Box<Expr>,
        data_type: TypeValue,
    },
    /// A bare type used as a value, e.g. the target of `ALTER COLUMN`
    TypeValue(TypeValue),
    /// A function call, with any of its trailing clauses
    Function(FunctionCall),
    /// `CASE [<operand>] WHEN ... THEN ... [ELSE ...] END`
    Case(CaseExpression),
    /// A parenthesized subquery used as a value, e.g. `SELECT (SELECT 1)`
    InlineQuery(Box<SelectQuery>),
    /// `ARRAY[1, 2, 3]`
    Array { elements: Vec<Expr> },
    /// `ARRAY(SELECT ...)`
    ArraySubquery(Box<SelectQuery>),
    /// Subscript access, e.g. `tags[1]`
    Subscript { expr: Box<Expr>, index: Box<Expr> },
    /// `*` or `t.*`
    Wildcard { qualifier: Vec<Ident> },
    /// `SUBSTRING(<expr> [FROM <expr>] [FOR <expr>])`
    Substring {
        expr: Box<Expr>,
        substring_from: Option<Box<Expr>>,
        substring_for: Option<Box<Expr>>,
    },
    /// `OVERLAY(<expr> PLACING <expr> FROM <expr> [FOR <expr>])`
    Overlay {
        expr: Box<Expr>,
        overlay_what: Box<Expr>,
        overlay_from: Box<Expr>,
        overlay_for: Option<Box<Expr>>,
    },
    /// `TRIM([BOTH | LEADING | TRAILING] [<expr> FROM] <expr>)`
    Trim {
        expr: Box<Expr>,
        trim_where: Option<TrimWhere>,
        trim_what: Option<Box<Expr>>,
    },
    /// `EXTRACT(<field> FROM <expr>)`
    Extract { field: Ident, expr: Box<Expr> },
    /// `POSITION(<expr> IN <expr>)`
    Position { expr: Box<Expr>, in_expr: Box<Expr> },
}

/// A column reference: zero or more namespace qualifiers plus the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnReference {
    pub namespaces: Vec<Ident>,
    pub name: Ident,
}

impl ColumnReference {
    pub fn new(name: impl Into<Ident>) -> Self {
        ColumnReference {
            namespaces: Vec::new(),
            name: name.into(),
        }
    }
}

impl From<Ident> for ColumnReference {
    fn from(name: Ident) -> Self {
        ColumnReference::new(name)
    }
}

/// The side `TRIM` trims from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrimWhere {
    Both,
    Leading,
    Trailing,
}

/// A function call.
///
/// The trailing clauses apply in the order `WITHIN GROUP`, `FILTER`,
/// `WITH ORDINALITY`, `OVER`. `order_by` is the `ORDER BY` *inside* the
/// argument list that a handful of aggregates accept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionCall {
    pub name: ObjectName,
    /// `DISTINCT` before the first argument
    pub distinct: bool,
    pub args: Vec<FunctionArg>,
    /// `ORDER BY` inside the argument list (`string_agg`, `array_agg`, ...)
    pub order_by: Vec<OrderByItem>,
    /// `WITHIN GROUP (ORDER BY ...)`
    pub within_group: Vec<OrderByItem>,
    /// `FILTER (WHERE <expr>)`
    pub filter: Option<Box<Expr>>,
    /// `OVER (<window spec>)` or `OVER <window name>`
    pub over: Option<OverTarget>,
    /// `WITH ORDINALITY` (set-returning functions in `FROM`)
    pub with_ordinality: bool,
}

impl FunctionCall {
    pub fn new(name: ObjectName) -> Self {
        FunctionCall {
            name,
            distinct: false,
            args: Vec::new(),
            order_by: Vec::new(),
            within_group: Vec::new(),
            filter: None,
            over: None,
            with_ordinality: false,
        }
    }
}

/// One argument of a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionArg {
    Expr(Expr),
    /// A bare `*`, as in `COUNT(*)`
    Wildcard,
}

/// What an `OVER` clause refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverTarget {
    WindowName(Ident),
    WindowSpec(WindowSpec),
}

/// An inline window specification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowSpec {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderByItem>,
    pub frame: Option<WindowFrame>,
}

impl WindowSpec {
    pub fn new() -> Self {
        WindowSpec {
            partition_by: Vec::new(),
            order_by: Vec::new(),
            frame: None,
        }
    }
}

impl Default for WindowSpec {
    fn default() -> Self {
        WindowSpec::new()
    }
}

/// A window frame: `ROWS BETWEEN 1 PRECEDING AND CURRENT ROW` and friends.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowFrame {
    pub units: WindowFrameUnits,
    pub start_bound: WindowFrameBound,
    /// None when the frame names only a start bound.
    pub end_bound: Option<WindowFrameBound>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowFrameUnits {
    Rows,
    Range,
    Groups,
}

/// One bound of a window frame. `Preceding(None)` is `UNBOUNDED PRECEDING`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowFrameBound {
    CurrentRow,
    Preceding(Option<Box<Expr>>),
    Following(Option<Box<Expr>>),
}

/// `CASE [<operand>] WHEN <condition> THEN <result> ... [ELSE <result>] END`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaseExpression {
    /// The switch argument of the simple form, absent in the searched form.
    pub operand: Option<Box<Expr>>,
    pub when_clauses: Vec<CaseWhen>,
    pub else_result: Option<Box<Expr>>,
}

/// One `WHEN <condition> THEN <result>` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaseWhen {
    pub condition: Expr,
    pub result: Expr,
}
