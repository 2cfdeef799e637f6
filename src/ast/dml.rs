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

//! `INSERT`, `UPDATE`, `DELETE` and `MERGE` statements.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::expr::Expr;
use super::query::{
    FromClause, SelectItem, SelectQuery, SourceExpression, TableSource, ValuesQuery, WhereClause,
    WithClause,
};
use super::{Ident, ObjectName};
use crate::tokenizer::Comment;

/// `INSERT INTO <table> [(<columns>)] <source> [RETURNING ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InsertQuery {
    pub with: Option<WithClause>,
    pub insert: InsertClause,
    pub source: InsertSource,
    pub returning: Option<ReturningClause>,
    pub header_comments: Vec<Comment>,
}

/// The target half of an insert: table plus optional column list.
///
/// `columns: Some(vec![])` records an explicit empty list `()`, which is
/// distinct from no list at all.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InsertClause {
    pub target: TableSource,
    pub columns: Option<Vec<Ident>>,
    pub comments: Vec<Comment>,
}

/// Where inserted rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InsertSource {
    Values(ValuesQuery),
    Query(Box<SelectQuery>),
    /// `DEFAULT VALUES`
    DefaultValues,
}

/// `RETURNING <item> [, <item>]*`, shared by all DML statements.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReturningClause {
    pub items: Vec<SelectItem>,
    pub comments: Vec<Comment>,
}

/// `UPDATE <target> SET <assignments> [FROM ...] [WHERE ...]
/// [RETURNING ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UpdateQuery {
    pub with: Option<WithClause>,
    pub update: UpdateClause,
    pub set: SetClause,
    pub from: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
    pub returning: Option<ReturningClause>,
    pub header_comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UpdateClause {
    pub target: SourceExpression,
    pub comments: Vec<Comment>,
}

/// `SET <assignment> [, <assignment>]*`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetClause {
    pub assignments: Vec<Assignment>,
    pub comments: Vec<Comment>,
}

/// `col = <expr>` or `(col, ...) = (<expr>, ...)` or
/// `(col, ...) = (SELECT ...)`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    pub target: AssignmentTarget,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssignmentTarget {
    Column(ObjectName),
    Tuple(Vec<ObjectName>),
}

/// `DELETE FROM <target> [USING ...] [WHERE ...] [RETURNING ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeleteQuery {
    pub with: Option<WithClause>,
    pub delete: DeleteClause,
    pub using: Option<UsingClause>,
    pub where_clause: Option<WhereClause>,
    pub returning: Option<ReturningClause>,
    pub header_comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeleteClause {
    pub target: SourceExpression,
    pub comments: Vec<Comment>,
}

/// `USING <source> [, <source>]*` in a `DELETE`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UsingClause {
    pub sources: Vec<SourceExpression>,
    pub comments: Vec<Comment>,
}

/// `MERGE INTO <target> USING <source> ON <condition> <when clause>+`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MergeQuery {
    pub with: Option<WithClause>,
    pub target: SourceExpression,
    pub source: SourceExpression,
    pub on: Expr,
    pub when_clauses: Vec<MergeWhenClause>,
    pub header_comments: Vec<Comment>,
}

/// `WHEN [NOT] MATCHED [AND <condition>] THEN <action>`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MergeWhenClause {
    pub matched: bool,
    pub condition: Option<Expr>,
    pub action: MergeAction,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MergeAction {
    /// `UPDATE SET <assignments>`
    Update(SetClause),
    /// `DELETE`
    Delete,
    /// `INSERT [(<columns>)] {VALUES ... | DEFAULT VALUES}`
    Insert {
        columns: Option<Vec<Ident>>,
        source: InsertSource,
    },
    /// `DO NOTHING`
    DoNothing,
}
