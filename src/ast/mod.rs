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

//! SQL Abstract Syntax Tree (AST) types.
//!
//! Nodes are plain data: the parser allocates them, attaches positioned
//! comments while parsing, and hands them to the caller frozen. Sibling
//! nodes never share substructure; two references to the same column in the
//! source produce two distinct nodes.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec, vec::Vec};

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use self::ddl::{
    AlterSequenceQuery, AlterTableOperation, AlterTableQuery, AnalyzeQuery, AnalyzeTarget,
    ClusterQuery, CreateIndexQuery, CreateSequenceQuery, CreateTableQuery, DropBehavior,
    DropObjectType, DropQuery, ExplainQuery, ReindexQuery, ReindexTarget, SequenceOption,
    TableConstraint,
};
pub use self::dml::{
    Assignment, AssignmentTarget, DeleteClause, DeleteQuery, InsertClause, InsertQuery,
    InsertSource, MergeAction, MergeQuery, MergeWhenClause, ReturningClause, SetClause,
    UpdateClause, UpdateQuery, UsingClause,
};
pub use self::expr::{
    CaseExpression, CaseWhen, ColumnReference, Expr, FunctionArg, FunctionCall, OverTarget,
    TrimWhere, WindowFrame, WindowFrameBound, WindowFrameUnits, WindowSpec,
};
pub use self::operator::{BinaryOperator, UnaryOperator};
pub use self::query::{
    BinarySelectQuery, CommonTable, Datasource, Distinct, FetchClause, ForClause, FromClause,
    GroupByClause, HavingClause, JoinClause, JoinCondition, JoinType, LimitClause, LockMode,
    LockWait, NamedWindow, NullsPlacement, OffsetClause, OffsetRows, OrderByClause, OrderByItem,
    ParenSource, SelectClause, SelectItem, SelectQuery, SetOperator, SimpleSelectQuery,
    SortDirection, SourceAliasExpression, SourceExpression, SubQuerySource, TableSource,
    ValuesQuery, WhereClause, WindowClause, WithClause,
};
pub use self::value::{LiteralValue, ParameterExpression, TypeValue};

use crate::tokenizer::{Comment, IDENTIFIER_QUOTES};

mod ddl;
mod dml;
mod expr;
mod operator;
mod query;
mod value;

/// An identifier, together with the quote style it was written in.
///
/// `value` holds the bare text: delimiters stripped and doubled closing
/// quotes collapsed. Unquoted identifiers keep their source spelling; the
/// parser never case-folds them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ident {
    pub value: String,
    /// The opening quote of an escaped identifier, one of
    /// [`IDENTIFIER_QUOTES`](crate::tokenizer::IDENTIFIER_QUOTES); `None`
    /// for a regular identifier.
    pub quote_style: Option<char>,
}

impl Ident {
    /// An unquoted identifier.
    pub fn new<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Ident {
            value: value.into(),
            quote_style: None,
        }
    }

    /// An identifier escaped with `quote`. Panics when `quote` is not one
    /// of the characters the escaped-identifier reader accepts.
    pub fn with_quote<S>(quote: char, value: S) -> Self
    where
        S: Into<String>,
    {
        assert!(
            IDENTIFIER_QUOTES.contains(&quote),
            "{quote:?} cannot quote an identifier"
        );
        Ident {
            value: value.into(),
            quote_style: Some(quote),
        }
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Ident::new(value)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.quote_style {
            Some('[') => write!(f, "[{}]", self.value),
            Some(q) => write!(f, "{q}{}{q}", self.value),
            None => f.write_str(&self.value),
        }
    }
}

/// A name of a table, index or sequence, possibly multi-part, i.e.
/// `db.schema.obj`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectName(pub Vec<Ident>);

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut delim = "";
        for part in &self.0 {
            write!(f, "{delim}{part}")?;
            delim = ".";
        }
        Ok(())
    }
}

impl From<&str> for ObjectName {
    fn from(value: &str) -> Self {
        ObjectName(vec![Ident::new(value)])
    }
}

/// A top-level SQL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Statement {
    /// `SELECT`, `VALUES` or a set operation over them
    Select(SelectQuery),
    /// `INSERT INTO`
    Insert(InsertQuery),
    /// `UPDATE`
    Update(UpdateQuery),
    /// `DELETE FROM`
    Delete(DeleteQuery),
    /// `MERGE INTO`
    Merge(MergeQuery),
    /// `CREATE TABLE ... AS query`
    CreateTable(CreateTableQuery),
    /// `DROP TABLE/INDEX/SCHEMA/CONSTRAINT`
    Drop(DropQuery),
    /// `CREATE [UNIQUE] INDEX`
    CreateIndex(CreateIndexQuery),
    /// `ALTER TABLE`
    AlterTable(AlterTableQuery),
    /// `ANALYZE`
    Analyze(AnalyzeQuery),
    /// `EXPLAIN [ANALYZE] statement`
    Explain(ExplainQuery),
    /// `CREATE SEQUENCE`
    CreateSequence(CreateSequenceQuery),
    /// `ALTER SEQUENCE`
    AlterSequence(AlterSequenceQuery),
    /// `CLUSTER`
    Cluster(ClusterQuery),
    /// `REINDEX`
    Reindex(ReindexQuery),
    /// A statement with no tokens at all, kept only when empty statements
    /// are not skipped.
    Empty { comments: Vec<Comment> },
}

impl Statement {
    /// The comments that lead the whole statement.
    pub fn header_comments(&self) -> &[Comment] {
        match self {
            Statement::Select(q) => q.header_comments(),
            Statement::Insert(q) => &q.header_comments,
            Statement::Update(q) => &q.header_comments,
            Statement::Delete(q) => &q.header_comments,
            Statement::Merge(q) => &q.header_comments,
            Statement::CreateTable(q) => &q.header_comments,
            Statement::Drop(q) => &q.header_comments,
            Statement::CreateIndex(q) => &q.header_comments,
            Statement::AlterTable(q) => &q.header_comments,
            Statement::Analyze(q) => &q.header_comments,
            Statement::Explain(q) => &q.header_comments,
            Statement::CreateSequence(q) => &q.header_comments,
            Statement::AlterSequence(q) => &q.header_comments,
            Statement::Cluster(q) => &q.header_comments,
            Statement::Reindex(q) => &q.header_comments,
            Statement::Empty { comments } => comments,
        }
    }

    /// Prepends comments to the statement header, preserving their order.
    pub fn add_header_comments(&mut self, comments: Vec<Comment>) {
        if comments.is_empty() {
            return;
        }
        let target = match self {
            Statement::Select(q) => return q.add_header_comments(comments),
            Statement::Insert(q) => &mut q.header_comments,
            Statement::Update(q) => &mut q.header_comments,
            Statement::Delete(q) => &mut q.header_comments,
            Statement::Merge(q) => &mut q.header_comments,
            Statement::CreateTable(q) => &mut q.header_comments,
            Statement::Drop(q) => &mut q.header_comments,
            Statement::CreateIndex(q) => &mut q.header_comments,
            Statement::AlterTable(q) => &mut q.header_comments,
            Statement::Analyze(q) => &mut q.header_comments,
            Statement::Explain(q) => &mut q.header_comments,
            Statement::CreateSequence(q) => &mut q.header_comments,
            Statement::AlterSequence(q) => &mut q.header_comments,
            Statement::Cluster(q) => &mut q.header_comments,
            Statement::Reindex(q) => &mut q.header_comments,
            Statement::Empty { comments } => comments,
        };
        let mut merged = comments;
        merged.append(target);
        *target = merged;
    }
}
