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

//! `SELECT` and its clauses, `VALUES`, CTEs and set operations.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::ToString, vec::Vec};

use crate::ast::{
    CommonTable, Datasource, Distinct, Expr, FetchClause, ForClause, FromClause, GroupByClause,
    HavingClause, Ident, JoinClause, JoinCondition, JoinType, LimitClause, LockMode, LockWait,
    NamedWindow, NullsPlacement, ObjectName, OffsetClause, OffsetRows, OrderByClause, OrderByItem,
    ParenSource, SelectClause, SelectItem, SelectQuery, SetOperator, SimpleSelectQuery,
    SortDirection, SourceAliasExpression, SourceExpression, Statement, SubQuerySource, TableSource,
    ValuesQuery, WhereClause, WindowClause, WithClause, BinarySelectQuery,
};
use crate::tokenizer::{Comment, CommentPosition, TokenType};

use super::expr::reposition_before;
use super::{Parser, ParserError};

const SET_OPERATOR_COMMANDS: &[&str] = &[
    "union",
    "union all",
    "intersect",
    "intersect all",
    "except",
    "except all",
];

const JOIN_COMMANDS: &[&str] = &[
    "join",
    "inner join",
    "left join",
    "left outer join",
    "right join",
    "right outer join",
    "full join",
    "full outer join",
    "cross join",
];

impl<'a> Parser<'a> {
    /// Parses a query: `[WITH ...] {SELECT | VALUES | (query)}` followed by
    /// any number of set-operation continuations, combined left to right.
    pub fn parse_select_query(&mut self) -> Result<SelectQuery, ParserError> {
        self.enter()?;
        let result = self.parse_select_query_inner();
        self.exit();
        result
    }

    fn parse_select_query_inner(&mut self) -> Result<SelectQuery, ParserError> {
        let with = if self.peek_token().is_some_and(|t| t.is_command("with")) {
            Some(self.parse_with_clause()?)
        } else {
            None
        };
        let mut left = self.parse_query_primary(with)?;
        while let Some(op_token) = self.parse_any_command(SET_OPERATOR_COMMANDS) {
            let (op, all) = match op_token.value.as_str() {
                "union" => (SetOperator::Union, false),
                "union all" => (SetOperator::Union, true),
                "intersect" => (SetOperator::Intersect, false),
                "intersect all" => (SetOperator::Intersect, true),
                "except" => (SetOperator::Except, false),
                _ => (SetOperator::Except, true),
            };
            // Whatever comments still sit on the operator surface ahead of
            // the right-hand query.
            let op_comments = reposition_before(op_token.comments.clone());
            let mut right = self.parse_query_primary(None)?;
            right.add_header_comments(op_comments);
            left = SelectQuery::Binary(Box::new(BinarySelectQuery {
                left,
                op,
                all,
                right,
                header_comments: Vec::new(),
            }));
        }
        Ok(left)
    }

    /// One side of a set operation: `SELECT ...`, `VALUES ...`, a
    /// parenthesized query, or a `WITH`-led query.
    fn parse_query_primary(
        &mut self,
        with: Option<WithClause>,
    ) -> Result<SelectQuery, ParserError> {
        let Some(first) = self.peek_token() else {
            return self.expected("SELECT or VALUES");
        };
        let mut with = with;
        let header = if with.is_none() && first.is_command("with") {
            // the WITH clause keeps the leading comments itself
            with = Some(self.parse_with_clause()?);
            Vec::new()
        } else {
            first.comments_before()
        };
        let mut query = match self.peek_token() {
            Some(t) if t.is_command("select") => {
                SelectQuery::Simple(Box::new(self.parse_simple_select(with)?))
            }
            Some(t) if t.is_command("values") => {
                if with.is_some() {
                    return self.shape_error("VALUES cannot carry a WITH clause");
                }
                SelectQuery::Values(self.parse_values_query()?)
            }
            Some(t) if t.is(TokenType::OPEN_PAREN) => {
                if with.is_some() {
                    return self.shape_error("a WITH clause must lead an unparenthesized query");
                }
                self.next_token();
                let inner = self.parse_select_query()?;
                self.expect_token(TokenType::CLOSE_PAREN, ")")?;
                inner
            }
            _ => return self.expected("SELECT or VALUES"),
        };
        query.add_header_comments(header);
        Ok(query)
    }

    /// The clause chain of one `SELECT`, in the only admissible order. A
    /// clause out of order is left unconsumed and surfaces as trailing
    /// tokens.
    fn parse_simple_select(
        &mut self,
        with: Option<WithClause>,
    ) -> Result<SimpleSelectQuery, ParserError> {
        let select = self.parse_select_clause()?;
        let mut query = SimpleSelectQuery::new(select);
        query.with = with;
        if self.peek_token().is_some_and(|t| t.is_command("from")) {
            query.from = Some(self.parse_from_clause()?);
        }
        if self.peek_token().is_some_and(|t| t.is_command("where")) {
            query.where_clause = Some(self.parse_where_clause()?);
        }
        if self.peek_token().is_some_and(|t| t.is_command("group by")) {
            query.group_by = Some(self.parse_group_by_clause()?);
        }
        if self.peek_token().is_some_and(|t| t.is_command("having")) {
            query.having = Some(self.parse_having_clause()?);
        }
        if self.peek_token().is_some_and(|t| t.is_command("window")) {
            query.window = Some(self.parse_window_clause()?);
        }
        if self.peek_token().is_some_and(|t| t.is_command("order by")) {
            query.order_by = Some(self.parse_order_by_clause()?);
        }
        if self.peek_token().is_some_and(|t| t.is_command("limit")) {
            query.limit = Some(self.parse_limit_clause()?);
        }
        if self.peek_token().is_some_and(|t| t.is_command("offset")) {
            query.offset = Some(self.parse_offset_clause()?);
        }
        if self.peek_token().is_some_and(|t| t.is_command("fetch")) {
            query.fetch = Some(self.parse_fetch_clause()?);
        }
        if self.peek_token().is_some_and(|t| t.is_command("for")) {
            query.for_clause = Some(self.parse_for_clause()?);
        }
        Ok(query)
    }

    /// `SELECT [DISTINCT [ON (...)]] item [, item]*`
    pub(crate) fn parse_select_clause(&mut self) -> Result<SelectClause, ParserError> {
        self.expect_command("select")?;
        let mut hints = Vec::new();
        let mut comments = Vec::new();
        for comment in self.prev_keyword_comments() {
            if comment.position == CommentPosition::After && comment.text.starts_with('+') {
                hints.push(comment.text[1..].trim().to_string());
            } else {
                comments.push(comment);
            }
        }
        let distinct = if self.parse_command("distinct on").is_some() {
            self.expect_token(TokenType::OPEN_PAREN, "(")?;
            let exprs = self.parse_comma_separated(|p| p.parse_expr())?;
            self.expect_token(TokenType::CLOSE_PAREN, ")")?;
            Some(Distinct::DistinctOn(exprs))
        } else if self.parse_command("distinct").is_some() {
            Some(Distinct::Distinct)
        } else {
            None
        };
        let items = self.parse_comma_separated(|p| p.parse_select_item())?;
        Ok(SelectClause {
            distinct,
            items,
            hints,
            comments,
        })
    }

    /// One projected item. The item owns the comments leading its first
    /// token and trailing its last.
    pub(crate) fn parse_select_item(&mut self) -> Result<SelectItem, ParserError> {
        let start = self.index;
        let expr = self.parse_expr()?;
        let alias = self.parse_optional_alias()?;
        let end = self.index;
        let mut comments = self.tokens[start].comments_before();
        comments.extend(self.tokens[end - 1].comments_after());
        Ok(SelectItem {
            expr,
            alias,
            comments,
        })
    }

    /// `[AS] alias`. Without `AS`, any identifier- or function-shaped
    /// token is an alias candidate; keywords are command tokens and never
    /// qualify.
    pub(crate) fn parse_optional_alias(&mut self) -> Result<Option<Ident>, ParserError> {
        if self.parse_command("as").is_some() {
            return Ok(Some(self.parse_identifier()?));
        }
        match self.peek_token() {
            Some(t) if t.is(TokenType::IDENTIFIER | TokenType::FUNCTION) => {
                Ok(Some(self.parse_identifier()?))
            }
            _ => Ok(None),
        }
    }

    /// `WITH [RECURSIVE] cte [, cte]*`. Comments following `WITH` (and
    /// `RECURSIVE`) lead the first CTE name.
    pub(crate) fn parse_with_clause(&mut self) -> Result<WithClause, ParserError> {
        let kw = self.expect_command("with")?;
        let comments = kw.comments_before();
        let mut lead = reposition_before(kw.comments_after());
        let recursive = match self.parse_command("recursive") {
            Some(t) => {
                lead.extend(reposition_before(t.comments.clone()));
                true
            }
            None => false,
        };
        let mut tables = self.parse_comma_separated(|p| p.parse_common_table())?;
        if !lead.is_empty() {
            let first = &mut tables[0].comments;
            lead.append(first);
            *first = lead;
        }
        Ok(WithClause {
            recursive,
            tables,
            comments,
        })
    }

    /// `name [(columns)] AS [[NOT] MATERIALIZED] ( statement )`.
    ///
    /// Comments on the opening paren become the inner statement's header;
    /// comments on the closing paren trail the CTE.
    fn parse_common_table(&mut self) -> Result<CommonTable, ParserError> {
        let Some(name_token) = self.peek_token() else {
            return self.expected("common table name");
        };
        let mut comments = name_token.comments.clone();
        let name = self.parse_identifier()?;
        let columns = if self.peek_token().is_some_and(|t| t.is(TokenType::OPEN_PAREN)) {
            Some(self.parse_parenthesized_idents(false)?)
        } else {
            None
        };
        self.expect_command("as")?;
        let materialized = if self.parse_command("materialized").is_some() {
            Some(true)
        } else if self.parse_command("not materialized").is_some() {
            Some(false)
        } else {
            None
        };
        let open = self.expect_token(TokenType::OPEN_PAREN, "(")?;
        let header = reposition_before(open.comments.clone());
        let mut query = self.parse_cte_inner()?;
        query.add_header_comments(header);
        let close = self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        comments.extend(close.comments.iter().map(|c| Comment::after(c.text.clone())));
        Ok(CommonTable {
            name,
            columns,
            materialized,
            query: Box::new(query),
            comments,
        })
    }

    /// A CTE body dispatches among queries and DML, nothing else.
    fn parse_cte_inner(&mut self) -> Result<Statement, ParserError> {
        let Some(token) = self.peek_token() else {
            return self.expected("a query");
        };
        if !token.token_type.contains(TokenType::COMMAND) {
            return self.expected("a query");
        }
        match token.value.as_str() {
            "select" | "values" | "with" | "insert into" | "update" | "delete from" => {
                self.parse_statement()
            }
            _ => self.expected("SELECT, VALUES, INSERT, UPDATE or DELETE"),
        }
    }

    /// `VALUES (expr, ...) [, (expr, ...)]*`
    pub(crate) fn parse_values_query(&mut self) -> Result<ValuesQuery, ParserError> {
        self.expect_command("values")?;
        let comments = self.prev_keyword_comments();
        let rows = self.parse_comma_separated(|p| {
            p.expect_token(TokenType::OPEN_PAREN, "(")?;
            let row = p.parse_comma_separated(|p| p.parse_expr())?;
            p.expect_token(TokenType::CLOSE_PAREN, ")")?;
            Ok(row)
        })?;
        Ok(ValuesQuery { rows, comments })
    }

    /// `FROM source [, source | join]*`
    pub(crate) fn parse_from_clause(&mut self) -> Result<FromClause, ParserError> {
        self.expect_command("from")?;
        let comments = self.prev_keyword_comments();
        let source = self.parse_source_expression()?;
        let joins = self.parse_joins()?;
        Ok(FromClause {
            source,
            joins,
            comments,
        })
    }

    fn parse_joins(&mut self) -> Result<Vec<JoinClause>, ParserError> {
        let mut joins = Vec::new();
        loop {
            if self.parse_token(TokenType::COMMA).is_some() {
                let source = self.parse_source_expression()?;
                joins.push(JoinClause {
                    join_type: JoinType::Cross,
                    source,
                    condition: None,
                    comments: Vec::new(),
                });
                continue;
            }
            let Some(kw) = self.parse_any_command(JOIN_COMMANDS) else {
                break;
            };
            let join_type = match kw.value.as_str() {
                "join" | "inner join" => JoinType::Inner,
                "left join" | "left outer join" => JoinType::Left,
                "right join" | "right outer join" => JoinType::Right,
                "full join" | "full outer join" => JoinType::Full,
                _ => JoinType::Cross,
            };
            let comments = self.prev_keyword_comments();
            let source = self.parse_source_expression()?;
            let condition = if join_type == JoinType::Cross {
                None
            } else if self.parse_command("on").is_some() {
                Some(JoinCondition::On(self.parse_expr()?))
            } else if self.parse_command("using").is_some() {
                Some(JoinCondition::Using(self.parse_parenthesized_idents(false)?))
            } else {
                None
            };
            joins.push(JoinClause {
                join_type,
                source,
                condition,
                comments,
            });
        }
        Ok(joins)
    }

    /// One row source: a table, a derived table, a parenthesized join
    /// tree, or a set-returning function, plus the optional alias.
    pub(crate) fn parse_source_expression(&mut self) -> Result<SourceExpression, ParserError> {
        let lateral = self.parse_command("lateral").is_some();
        let datasource = if let Some(open) = self.parse_token(TokenType::OPEN_PAREN) {
            if self.peek_is_query_start() {
                let header = reposition_before(open.comments.clone());
                let mut query = self.parse_select_query()?;
                query.add_header_comments(header);
                self.expect_token(TokenType::CLOSE_PAREN, ")")?;
                Datasource::SubQuery(SubQuerySource {
                    query: Box::new(query),
                })
            } else {
                let source = self.parse_source_expression()?;
                let joins = self.parse_joins()?;
                self.expect_token(TokenType::CLOSE_PAREN, ")")?;
                Datasource::Paren(Box::new(ParenSource { source, joins }))
            }
        } else {
            match self.parse_qualified_reference()? {
                Expr::Function(call) => Datasource::Function(call),
                Expr::ColumnReference(reference) => {
                    let mut parts = reference.namespaces;
                    parts.push(reference.name);
                    Datasource::Table(TableSource {
                        name: ObjectName(parts),
                    })
                }
                _ => return self.expected("a table name"),
            }
        };
        let alias = self.parse_source_alias()?;
        Ok(SourceExpression {
            datasource,
            alias,
            lateral,
        })
    }

    fn parse_source_alias(&mut self) -> Result<Option<SourceAliasExpression>, ParserError> {
        let table_alias = if self.parse_command("as").is_some() {
            self.parse_identifier()?
        } else {
            match self.peek_token() {
                Some(t) if t.is(TokenType::IDENTIFIER | TokenType::FUNCTION) => {
                    self.parse_identifier()?
                }
                _ => return Ok(None),
            }
        };
        let column_aliases = if self.peek_token().is_some_and(|t| t.is(TokenType::OPEN_PAREN)) {
            Some(self.parse_parenthesized_idents(false)?)
        } else {
            None
        };
        Ok(Some(SourceAliasExpression {
            table_alias,
            column_aliases,
        }))
    }

    /// `WHERE <condition>`
    pub(crate) fn parse_where_clause(&mut self) -> Result<WhereClause, ParserError> {
        self.expect_command("where")?;
        let comments = self.prev_keyword_comments();
        let condition = self.parse_expr()?;
        Ok(WhereClause {
            condition,
            comments,
        })
    }

    fn parse_group_by_clause(&mut self) -> Result<GroupByClause, ParserError> {
        self.expect_command("group by")?;
        let comments = self.prev_keyword_comments();
        let items = self.parse_comma_separated(|p| p.parse_expr())?;
        Ok(GroupByClause { items, comments })
    }

    fn parse_having_clause(&mut self) -> Result<HavingClause, ParserError> {
        self.expect_command("having")?;
        let comments = self.prev_keyword_comments();
        let condition = self.parse_expr()?;
        Ok(HavingClause {
            condition,
            comments,
        })
    }

    /// `WINDOW w AS (spec) [, ...]`
    fn parse_window_clause(&mut self) -> Result<WindowClause, ParserError> {
        self.expect_command("window")?;
        let comments = self.prev_keyword_comments();
        let windows = self.parse_comma_separated(|p| {
            let name = p.parse_identifier()?;
            p.expect_command("as")?;
            p.expect_token(TokenType::OPEN_PAREN, "(")?;
            let spec = p.parse_window_spec()?;
            Ok(NamedWindow { name, spec })
        })?;
        Ok(WindowClause { windows, comments })
    }

    pub(crate) fn parse_order_by_clause(&mut self) -> Result<OrderByClause, ParserError> {
        self.expect_command("order by")?;
        let comments = self.prev_keyword_comments();
        let items = self.parse_comma_separated(|p| p.parse_order_by_item())?;
        Ok(OrderByClause { items, comments })
    }

    /// `expr [ASC | DESC] [NULLS FIRST | NULLS LAST]`
    pub(crate) fn parse_order_by_item(&mut self) -> Result<OrderByItem, ParserError> {
        let start = self.index;
        let expr = self.parse_expr()?;
        let direction = match self.parse_any_command(&["asc", "desc"]) {
            Some(t) if t.value == "asc" => Some(SortDirection::Asc),
            Some(_) => Some(SortDirection::Desc),
            None => None,
        };
        let nulls = match self.parse_any_command(&["nulls first", "nulls last"]) {
            Some(t) if t.value == "nulls first" => Some(NullsPlacement::First),
            Some(_) => Some(NullsPlacement::Last),
            None => None,
        };
        let end = self.index;
        let mut comments = self.tokens[start].comments_before();
        comments.extend(self.tokens[end - 1].comments_after());
        Ok(OrderByItem {
            expr,
            direction,
            nulls,
            comments,
        })
    }

    /// `LIMIT <expr>` or `LIMIT ALL`
    fn parse_limit_clause(&mut self) -> Result<LimitClause, ParserError> {
        self.expect_command("limit")?;
        let comments = self.prev_keyword_comments();
        let value = if self.parse_word("all").is_some() {
            None
        } else {
            Some(self.parse_expr()?)
        };
        Ok(LimitClause { value, comments })
    }

    fn parse_offset_clause(&mut self) -> Result<OffsetClause, ParserError> {
        self.expect_command("offset")?;
        let comments = self.prev_keyword_comments();
        let value = self.parse_expr()?;
        let rows = match self.parse_any_command(&["row", "rows"]) {
            Some(t) if t.value == "row" => Some(OffsetRows::Row),
            Some(_) => Some(OffsetRows::Rows),
            None => None,
        };
        Ok(OffsetClause {
            value,
            rows,
            comments,
        })
    }

    /// `FETCH {FIRST | NEXT} [n] {ROW | ROWS} {ONLY | WITH TIES}`
    fn parse_fetch_clause(&mut self) -> Result<FetchClause, ParserError> {
        self.expect_command("fetch")?;
        let comments = self.prev_keyword_comments();
        let first = match self.parse_any_command(&["first", "next"]) {
            Some(t) => t.value == "first",
            None => return self.expected("FIRST or NEXT"),
        };
        let quantity = if self
            .peek_token()
            .is_some_and(|t| t.is_command("row") || t.is_command("rows"))
        {
            None
        } else {
            Some(self.parse_expr()?)
        };
        if self.parse_any_command(&["row", "rows"]).is_none() {
            return self.expected("ROW or ROWS");
        }
        let with_ties = if self.parse_command("with ties").is_some() {
            true
        } else {
            self.expect_command("only")?;
            false
        };
        Ok(FetchClause {
            first,
            quantity,
            with_ties,
            comments,
        })
    }

    /// `FOR {UPDATE | NO KEY UPDATE | SHARE | KEY SHARE} [OF tables]
    /// [NOWAIT | SKIP LOCKED]`
    fn parse_for_clause(&mut self) -> Result<ForClause, ParserError> {
        self.expect_command("for")?;
        let comments = self.prev_keyword_comments();
        let lock_mode = match self.parse_any_command(&["update", "no key update", "share", "key share"])
        {
            Some(t) => match t.value.as_str() {
                "update" => LockMode::Update,
                "no key update" => LockMode::NoKeyUpdate,
                "share" => LockMode::Share,
                _ => LockMode::KeyShare,
            },
            None => return self.expected("UPDATE, NO KEY UPDATE, SHARE or KEY SHARE"),
        };
        let of = if self.parse_command("of").is_some() {
            self.parse_comma_separated(|p| p.parse_object_name())?
        } else {
            Vec::new()
        };
        let wait_policy = if self.parse_command("nowait").is_some() {
            Some(LockWait::Nowait)
        } else if self.parse_command("skip locked").is_some() {
            Some(LockWait::SkipLocked)
        } else {
            None
        };
        Ok(ForClause {
            lock_mode,
            of,
            wait_policy,
            comments,
        })
    }
}
