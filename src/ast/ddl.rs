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

//! DDL and utility statements.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::expr::Expr;
use super::query::{OrderByItem, SelectQuery};
use super::value::TypeValue;
use super::{Ident, ObjectName, Statement};
use crate::tokenizer::Comment;

/// `CREATE [TEMPORARY] TABLE [IF NOT EXISTS] <name> AS <query>`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateTableQuery {
    pub temporary: bool,
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub query: Box<SelectQuery>,
    pub header_comments: Vec<Comment>,
}

/// `DROP {TABLE | INDEX | SCHEMA | CONSTRAINT} [IF EXISTS] <names>
/// [CASCADE | RESTRICT]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropQuery {
    pub object_type: DropObjectType,
    pub if_exists: bool,
    pub names: Vec<ObjectName>,
    pub behavior: Option<DropBehavior>,
    pub header_comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DropObjectType {
    Table,
    Index,
    Schema,
    Constraint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DropBehavior {
    Cascade,
    Restrict,
}

/// `CREATE [UNIQUE] INDEX [IF NOT EXISTS] [<name>] ON <table>
/// [USING <method>] (<columns>) [WHERE <predicate>]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateIndexQuery {
    pub unique: bool,
    pub if_not_exists: bool,
    pub name: Option<Ident>,
    pub table: ObjectName,
    pub using: Option<Ident>,
    pub columns: Vec<OrderByItem>,
    pub where_clause: Option<Expr>,
    pub header_comments: Vec<Comment>,
}

/// `ALTER TABLE [IF EXISTS] <name> <operation> [, <operation>]*`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlterTableQuery {
    pub if_exists: bool,
    pub name: ObjectName,
    pub operations: Vec<AlterTableOperation>,
    pub header_comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlterTableOperation {
    /// `ADD COLUMN [IF NOT EXISTS] <name> <type> [DEFAULT <expr>]
    /// [NOT NULL]`
    AddColumn {
        if_not_exists: bool,
        name: Ident,
        data_type: TypeValue,
        default: Option<Expr>,
        not_null: bool,
    },
    /// `DROP COLUMN [IF EXISTS] <name> [CASCADE | RESTRICT]`
    DropColumn {
        if_exists: bool,
        name: Ident,
        behavior: Option<DropBehavior>,
    },
    /// `RENAME COLUMN <old> TO <new>`
    RenameColumn { old_name: Ident, new_name: Ident },
    /// `RENAME TO <new>`
    RenameTable { new_name: ObjectName },
    /// `ALTER COLUMN <name> TYPE <type> [USING <expr>]`
    AlterColumnType {
        name: Ident,
        data_type: TypeValue,
        using: Option<Expr>,
    },
    /// `ALTER COLUMN <name> SET DEFAULT <expr>`
    SetDefault { name: Ident, value: Expr },
    /// `ALTER COLUMN <name> DROP DEFAULT`
    DropDefault { name: Ident },
    /// `ALTER COLUMN <name> SET NOT NULL`
    SetNotNull { name: Ident },
    /// `ALTER COLUMN <name> DROP NOT NULL`
    DropNotNull { name: Ident },
    /// `ADD <table constraint>`
    AddConstraint(TableConstraint),
    /// `DROP CONSTRAINT [IF EXISTS] <name> [CASCADE | RESTRICT]`
    DropConstraint {
        if_exists: bool,
        name: Ident,
        behavior: Option<DropBehavior>,
    },
}

/// A table-level constraint in `ALTER TABLE ... ADD`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TableConstraint {
    Check {
        name: Option<Ident>,
        expr: Box<Expr>,
    },
    Unique {
        name: Option<Ident>,
        columns: Vec<Ident>,
    },
    PrimaryKey {
        name: Option<Ident>,
        columns: Vec<Ident>,
    },
    ForeignKey {
        name: Option<Ident>,
        columns: Vec<Ident>,
        foreign_table: ObjectName,
        referred_columns: Vec<Ident>,
    },
}

/// `ANALYZE [VERBOSE] [<table> [(<columns>)]]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalyzeQuery {
    pub verbose: bool,
    pub target: Option<AnalyzeTarget>,
    pub header_comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalyzeTarget {
    pub name: ObjectName,
    pub columns: Vec<Ident>,
}

/// `EXPLAIN [ANALYZE] [VERBOSE] <statement>`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExplainQuery {
    pub analyze: bool,
    pub verbose: bool,
    pub statement: Box<Statement>,
    pub header_comments: Vec<Comment>,
}

/// `CREATE [TEMPORARY] SEQUENCE [IF NOT EXISTS] <name> [AS <type>]
/// <option>*`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateSequenceQuery {
    pub temporary: bool,
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub data_type: Option<TypeValue>,
    pub options: Vec<SequenceOption>,
    pub header_comments: Vec<Comment>,
}

/// `ALTER SEQUENCE [IF EXISTS] <name> <option>*`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlterSequenceQuery {
    pub if_exists: bool,
    pub name: ObjectName,
    pub options: Vec<SequenceOption>,
    pub header_comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SequenceOption {
    /// `INCREMENT [BY] <n>`
    IncrementBy(Expr),
    MinValue(Expr),
    NoMinValue,
    MaxValue(Expr),
    NoMaxValue,
    /// `START [WITH] <n>`
    StartWith(Expr),
    Cache(Expr),
    Cycle,
    NoCycle,
    OwnedBy(ObjectName),
    /// `OWNED BY NONE`
    OwnedByNone,
    /// `RESTART [[WITH] <n>]`
    RestartWith(Option<Expr>),
}

/// `CLUSTER [VERBOSE] [<table> [USING <index>]]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterQuery {
    pub verbose: bool,
    pub table: Option<ObjectName>,
    pub index: Option<Ident>,
    pub header_comments: Vec<Comment>,
}

/// `REINDEX {INDEX | TABLE | SCHEMA} <name>`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReindexQuery {
    pub target_type: ReindexTarget,
    pub name: ObjectName,
    pub header_comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReindexTarget {
    Index,
    Table,
    Schema,
}
