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

//! `INSERT`, `UPDATE`, `DELETE` and `MERGE`.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use crate::ast::{
    Assignment, AssignmentTarget, DeleteClause, DeleteQuery, InsertClause, InsertQuery,
    InsertSource, MergeAction, MergeQuery, MergeWhenClause, ReturningClause, SetClause,
    TableSource, UpdateClause, UpdateQuery, UsingClause, WithClause,
};
use crate::tokenizer::TokenType;

use super::{Parser, ParserError};

impl<'a> Parser<'a> {
    fn parse_optional_with(&mut self) -> Result<Option<WithClause>, ParserError> {
        if self.peek_token().is_some_and(|t| t.is_command("with")) {
            Ok(Some(self.parse_with_clause()?))
        } else {
            Ok(None)
        }
    }

    /// `[WITH ...] INSERT INTO table [(columns)]
    /// {VALUES ... | query | DEFAULT VALUES} [RETURNING ...]`
    pub fn parse_insert(&mut self) -> Result<InsertQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        let with = self.parse_optional_with()?;
        self.expect_command("insert into")?;
        let comments = self.prev_keyword_comments();
        let target = TableSource {
            name: self.parse_object_name()?,
        };
        let columns = if self.peek_token().is_some_and(|t| t.is(TokenType::OPEN_PAREN)) {
            Some(self.parse_parenthesized_idents(true)?)
        } else {
            None
        };
        let insert = InsertClause {
            target,
            columns,
            comments,
        };
        let source = self.parse_insert_source()?;
        let returning = self.parse_optional_returning()?;
        Ok(InsertQuery {
            with,
            insert,
            source,
            returning,
            header_comments,
        })
    }

    fn parse_insert_source(&mut self) -> Result<InsertSource, ParserError> {
        let Some(token) = self.peek_token() else {
            return self.expected("VALUES or a query");
        };
        if token.is_command("default values") {
            self.next_token();
            return Ok(InsertSource::DefaultValues);
        }
        if token.is_command("values") {
            return Ok(InsertSource::Values(self.parse_values_query()?));
        }
        if token.is_command("select") || token.is_command("with") || token.is(TokenType::OPEN_PAREN)
        {
            return Ok(InsertSource::Query(Box::new(self.parse_select_query()?)));
        }
        self.expected("VALUES or a query")
    }

    /// `RETURNING item [, item]*` after any DML statement.
    fn parse_optional_returning(&mut self) -> Result<Option<ReturningClause>, ParserError> {
        if self.parse_command("returning").is_none() {
            return Ok(None);
        }
        let comments = self.prev_keyword_comments();
        let items = self.parse_comma_separated(|p| p.parse_select_item())?;
        Ok(Some(ReturningClause { items, comments }))
    }

    /// `[WITH ...] UPDATE target SET assignments [FROM ...] [WHERE ...]
    /// [RETURNING ...]`
    pub fn parse_update(&mut self) -> Result<UpdateQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        let with = self.parse_optional_with()?;
        self.expect_command("update")?;
        let comments = self.prev_keyword_comments();
        let target = self.parse_source_expression()?;
        let update = UpdateClause { target, comments };
        let set = self.parse_set_clause()?;
        let from = if self.peek_token().is_some_and(|t| t.is_command("from")) {
            Some(self.parse_from_clause()?)
        } else {
            None
        };
        let where_clause = if self.peek_token().is_some_and(|t| t.is_command("where")) {
            Some(self.parse_where_clause()?)
        } else {
            None
        };
        let returning = self.parse_optional_returning()?;
        Ok(UpdateQuery {
            with,
            update,
            set,
            from,
            where_clause,
            returning,
            header_comments,
        })
    }

    /// `SET col = expr [, ...]`, including the tuple form
    /// `(a, b) = (1, 2)` and `(a, b) = (SELECT ...)`.
    pub(crate) fn parse_set_clause(&mut self) -> Result<SetClause, ParserError> {
        self.expect_command("set")?;
        let comments = self.prev_keyword_comments();
        let assignments = self.parse_comma_separated(|p| p.parse_assignment())?;
        Ok(SetClause {
            assignments,
            comments,
        })
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParserError> {
        let target = if self.parse_token(TokenType::OPEN_PAREN).is_some() {
            let columns = self.parse_comma_separated(|p| p.parse_object_name())?;
            self.expect_token(TokenType::CLOSE_PAREN, ")")?;
            AssignmentTarget::Tuple(columns)
        } else {
            AssignmentTarget::Column(self.parse_object_name()?)
        };
        self.expect_operator("=")?;
        let value = self.parse_expr()?;
        Ok(Assignment { target, value })
    }

    /// `[WITH ...] DELETE FROM target [USING sources] [WHERE ...]
    /// [RETURNING ...]`
    pub fn parse_delete(&mut self) -> Result<DeleteQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        let with = self.parse_optional_with()?;
        self.expect_command("delete from")?;
        let comments = self.prev_keyword_comments();
        let target = self.parse_source_expression()?;
        let delete = DeleteClause { target, comments };
        let using = if self.parse_command("using").is_some() {
            let comments = self.prev_keyword_comments();
            let sources = self.parse_comma_separated(|p| p.parse_source_expression())?;
            Some(UsingClause { sources, comments })
        } else {
            None
        };
        let where_clause = if self.peek_token().is_some_and(|t| t.is_command("where")) {
            Some(self.parse_where_clause()?)
        } else {
            None
        };
        let returning = self.parse_optional_returning()?;
        Ok(DeleteQuery {
            with,
            delete,
            using,
            where_clause,
            returning,
            header_comments,
        })
    }

    /// `[WITH ...] MERGE INTO target USING source ON condition
    /// {WHEN [NOT] MATCHED [AND cond] THEN action}+`
    pub fn parse_merge(&mut self) -> Result<MergeQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        let with = self.parse_optional_with()?;
        self.expect_command("merge into")?;
        let target = self.parse_source_expression()?;
        self.expect_command("using")?;
        let source = self.parse_source_expression()?;
        self.expect_command("on")?;
        let on = self.parse_expr()?;
        let mut when_clauses = Vec::new();
        while let Some(when) = self.parse_any_command(&["when matched", "when not matched"]) {
            let matched = when.value == "when matched";
            let comments = self.prev_keyword_comments();
            let condition = if self.parse_operator("and").is_some() {
                Some(self.parse_expr()?)
            } else {
                None
            };
            self.expect_command("then")?;
            let action = self.parse_merge_action()?;
            when_clauses.push(MergeWhenClause {
                matched,
                condition,
                action,
                comments,
            });
        }
        if when_clauses.is_empty() {
            return self.expected("WHEN MATCHED or WHEN NOT MATCHED");
        }
        Ok(MergeQuery {
            with,
            target,
            source,
            on,
            when_clauses,
            header_comments,
        })
    }

    fn parse_merge_action(&mut self) -> Result<MergeAction, ParserError> {
        if self.parse_command("do nothing").is_some() {
            return Ok(MergeAction::DoNothing);
        }
        if self.parse_command("update").is_some() {
            let set = self.parse_set_clause()?;
            return Ok(MergeAction::Update(set));
        }
        if self.parse_command("delete").is_some() {
            return Ok(MergeAction::Delete);
        }
        if self.parse_command("insert").is_some() {
            let columns = if self.peek_token().is_some_and(|t| t.is(TokenType::OPEN_PAREN)) {
                Some(self.parse_parenthesized_idents(true)?)
            } else {
                None
            };
            let source = if self.parse_command("default values").is_some() {
                InsertSource::DefaultValues
            } else {
                InsertSource::Values(self.parse_values_query()?)
            };
            return Ok(MergeAction::Insert { columns, source });
        }
        self.expected("UPDATE, DELETE, INSERT or DO NOTHING")
    }
}
