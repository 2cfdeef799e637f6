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

//! DDL and utility statement parsers. These follow the same
//! keyword-dispatch pattern as the query parsers: match the lead command,
//! then consume the clause chain.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use crate::ast::{
    AlterSequenceQuery, AlterTableOperation, AlterTableQuery, AnalyzeQuery, AnalyzeTarget,
    ClusterQuery, CreateIndexQuery, CreateSequenceQuery, CreateTableQuery, DropBehavior,
    DropObjectType, DropQuery, ExplainQuery, Ident, ReindexQuery, ReindexTarget, SequenceOption,
    TableConstraint,
};
use crate::tokenizer::TokenType;

use super::{Parser, ParserError};

impl<'a> Parser<'a> {
    /// `CREATE [TEMPORARY] TABLE [IF NOT EXISTS] name AS query`
    pub fn parse_create_table(&mut self) -> Result<CreateTableQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        let kw = match self.parse_any_command(&["create table", "create temporary table"]) {
            Some(kw) => kw,
            None => return self.expected("CREATE TABLE"),
        };
        let temporary = kw.value == "create temporary table";
        let if_not_exists = self.parse_command("if not exists").is_some();
        let name = self.parse_object_name()?;
        self.expect_command("as")?;
        let query = Box::new(self.parse_select_query()?);
        Ok(CreateTableQuery {
            temporary,
            if_not_exists,
            name,
            query,
            header_comments,
        })
    }

    /// `DROP {TABLE | INDEX | SCHEMA | CONSTRAINT} [IF EXISTS] names
    /// [CASCADE | RESTRICT]`
    pub fn parse_drop(&mut self) -> Result<DropQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        let kw = match self.parse_any_command(&[
            "drop table",
            "drop index",
            "drop schema",
            "drop constraint",
        ]) {
            Some(kw) => kw,
            None => return self.expected("DROP"),
        };
        let object_type = match kw.value.as_str() {
            "drop table" => DropObjectType::Table,
            "drop index" => DropObjectType::Index,
            "drop schema" => DropObjectType::Schema,
            _ => DropObjectType::Constraint,
        };
        let if_exists = self.parse_command("if exists").is_some();
        let names = self.parse_comma_separated(|p| p.parse_object_name())?;
        let behavior = self.parse_drop_behavior();
        Ok(DropQuery {
            object_type,
            if_exists,
            names,
            behavior,
            header_comments,
        })
    }

    fn parse_drop_behavior(&mut self) -> Option<DropBehavior> {
        if self.parse_command("cascade").is_some() {
            Some(DropBehavior::Cascade)
        } else if self.parse_command("restrict").is_some() {
            Some(DropBehavior::Restrict)
        } else {
            None
        }
    }

    /// `CREATE [UNIQUE] INDEX [IF NOT EXISTS] [name] ON table
    /// [USING method] (columns) [WHERE predicate]`
    pub fn parse_create_index(&mut self) -> Result<CreateIndexQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        let kw = match self.parse_any_command(&["create index", "create unique index"]) {
            Some(kw) => kw,
            None => return self.expected("CREATE INDEX"),
        };
        let unique = kw.value == "create unique index";
        let if_not_exists = self.parse_command("if not exists").is_some();
        let name = match self.peek_token() {
            Some(t) if t.is(TokenType::IDENTIFIER | TokenType::FUNCTION) => {
                Some(self.parse_identifier()?)
            }
            _ => None,
        };
        self.expect_command("on")?;
        let table = self.parse_object_name()?;
        let using = if self.parse_command("using").is_some() {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.expect_token(TokenType::OPEN_PAREN, "(")?;
        let columns = self.parse_comma_separated(|p| p.parse_order_by_item())?;
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        let where_clause = if self.parse_command("where").is_some() {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(CreateIndexQuery {
            unique,
            if_not_exists,
            name,
            table,
            using,
            columns,
            where_clause,
            header_comments,
        })
    }

    /// `ALTER TABLE [IF EXISTS] name operation [, operation]*`
    pub fn parse_alter_table(&mut self) -> Result<AlterTableQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        self.expect_command("alter table")?;
        let if_exists = self.parse_command("if exists").is_some();
        let name = self.parse_object_name()?;
        let operations = self.parse_comma_separated(|p| p.parse_alter_table_operation())?;
        Ok(AlterTableQuery {
            if_exists,
            name,
            operations,
            header_comments,
        })
    }

    fn parse_alter_table_operation(&mut self) -> Result<AlterTableOperation, ParserError> {
        if self.parse_command("add column").is_some() {
            let if_not_exists = self.parse_command("if not exists").is_some();
            let name = self.parse_identifier()?;
            let data_type = self.parse_type_value()?;
            let mut default = None;
            let mut not_null = false;
            loop {
                if default.is_none() && self.parse_word("default").is_some() {
                    default = Some(self.parse_expr()?);
                } else if !not_null && self.parse_operator("not").is_some() {
                    // `null` lexes as a literal, not an identifier
                    let null = self.expect_token(TokenType::LITERAL, "NULL")?;
                    if !null.value.eq_ignore_ascii_case("null") {
                        return self.expected("NULL");
                    }
                    not_null = true;
                } else {
                    break;
                }
            }
            return Ok(AlterTableOperation::AddColumn {
                if_not_exists,
                name,
                data_type,
                default,
                not_null,
            });
        }
        if self.parse_command("drop column").is_some() {
            let if_exists = self.parse_command("if exists").is_some();
            let name = self.parse_identifier()?;
            let behavior = self.parse_drop_behavior();
            return Ok(AlterTableOperation::DropColumn {
                if_exists,
                name,
                behavior,
            });
        }
        if self.parse_command("rename column").is_some() {
            let old_name = self.parse_identifier()?;
            self.expect_word("to")?;
            let new_name = self.parse_identifier()?;
            return Ok(AlterTableOperation::RenameColumn { old_name, new_name });
        }
        if self.parse_command("rename to").is_some() {
            let new_name = self.parse_object_name()?;
            return Ok(AlterTableOperation::RenameTable { new_name });
        }
        if self.parse_command("alter column").is_some() {
            let name = self.parse_identifier()?;
            if self.parse_word("type").is_some() {
                let data_type = self.parse_type_value()?;
                let using = if self.parse_command("using").is_some() {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                return Ok(AlterTableOperation::AlterColumnType {
                    name,
                    data_type,
                    using,
                });
            }
            if self.parse_command("set default").is_some() {
                let value = self.parse_expr()?;
                return Ok(AlterTableOperation::SetDefault { name, value });
            }
            if self.parse_command("drop default").is_some() {
                return Ok(AlterTableOperation::DropDefault { name });
            }
            if self.parse_command("set not null").is_some() {
                return Ok(AlterTableOperation::SetNotNull { name });
            }
            if self.parse_command("drop not null").is_some() {
                return Ok(AlterTableOperation::DropNotNull { name });
            }
            return self.expected("TYPE, SET or DROP");
        }
        if self.parse_command("add constraint").is_some() {
            let name = self.parse_identifier()?;
            let constraint = self.parse_table_constraint(Some(name))?;
            return Ok(AlterTableOperation::AddConstraint(constraint));
        }
        if self.parse_command("drop constraint").is_some() {
            let if_exists = self.parse_command("if exists").is_some();
            let name = self.parse_identifier()?;
            let behavior = self.parse_drop_behavior();
            return Ok(AlterTableOperation::DropConstraint {
                if_exists,
                name,
                behavior,
            });
        }
        self.expected("an ALTER TABLE operation")
    }

    fn parse_table_constraint(
        &mut self,
        name: Option<Ident>,
    ) -> Result<TableConstraint, ParserError> {
        if self.parse_command("check").is_some() {
            self.expect_token(TokenType::OPEN_PAREN, "(")?;
            let expr = Box::new(self.parse_expr()?);
            self.expect_token(TokenType::CLOSE_PAREN, ")")?;
            return Ok(TableConstraint::Check { name, expr });
        }
        if self.parse_command("unique").is_some() {
            let columns = self.parse_parenthesized_idents(false)?;
            return Ok(TableConstraint::Unique { name, columns });
        }
        if self.parse_command("primary key").is_some() {
            let columns = self.parse_parenthesized_idents(false)?;
            return Ok(TableConstraint::PrimaryKey { name, columns });
        }
        if self.parse_command("foreign key").is_some() {
            let columns = self.parse_parenthesized_idents(false)?;
            self.expect_command("references")?;
            let foreign_table = self.parse_object_name()?;
            let referred_columns =
                if self.peek_token().is_some_and(|t| t.is(TokenType::OPEN_PAREN)) {
                    self.parse_parenthesized_idents(false)?
                } else {
                    Vec::new()
                };
            return Ok(TableConstraint::ForeignKey {
                name,
                columns,
                foreign_table,
                referred_columns,
            });
        }
        self.expected("CHECK, UNIQUE, PRIMARY KEY or FOREIGN KEY")
    }

    /// `ANALYZE [VERBOSE] [table [(columns)]]`
    pub fn parse_analyze(&mut self) -> Result<AnalyzeQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        self.expect_command("analyze")?;
        let verbose = self.parse_command("verbose").is_some();
        let target = match self.peek_token() {
            Some(t) if t.is(TokenType::IDENTIFIER | TokenType::FUNCTION) => {
                let name = self.parse_object_name()?;
                let columns = if self.peek_token().is_some_and(|t| t.is(TokenType::OPEN_PAREN)) {
                    self.parse_parenthesized_idents(false)?
                } else {
                    Vec::new()
                };
                Some(AnalyzeTarget { name, columns })
            }
            _ => None,
        };
        Ok(AnalyzeQuery {
            verbose,
            target,
            header_comments,
        })
    }

    /// `EXPLAIN [ANALYZE] [VERBOSE] statement`
    pub fn parse_explain(&mut self) -> Result<ExplainQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        self.expect_command("explain")?;
        let analyze = self.parse_command("analyze").is_some();
        let verbose = self.parse_command("verbose").is_some();
        let statement = Box::new(self.parse_statement()?);
        Ok(ExplainQuery {
            analyze,
            verbose,
            statement,
            header_comments,
        })
    }

    /// `CREATE [TEMPORARY] SEQUENCE [IF NOT EXISTS] name [AS type]
    /// option*`
    pub fn parse_create_sequence(&mut self) -> Result<CreateSequenceQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        let kw = match self.parse_any_command(&["create sequence", "create temporary sequence"]) {
            Some(kw) => kw,
            None => return self.expected("CREATE SEQUENCE"),
        };
        let temporary = kw.value == "create temporary sequence";
        let if_not_exists = self.parse_command("if not exists").is_some();
        let name = self.parse_object_name()?;
        let data_type = if self.parse_command("as").is_some() {
            Some(self.parse_type_value()?)
        } else {
            None
        };
        let options = self.parse_sequence_options()?;
        Ok(CreateSequenceQuery {
            temporary,
            if_not_exists,
            name,
            data_type,
            options,
            header_comments,
        })
    }

    /// `ALTER SEQUENCE [IF EXISTS] name option*`
    pub fn parse_alter_sequence(&mut self) -> Result<AlterSequenceQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        self.expect_command("alter sequence")?;
        let if_exists = self.parse_command("if exists").is_some();
        let name = self.parse_object_name()?;
        let options = self.parse_sequence_options()?;
        Ok(AlterSequenceQuery {
            if_exists,
            name,
            options,
            header_comments,
        })
    }

    fn parse_sequence_options(&mut self) -> Result<Vec<SequenceOption>, ParserError> {
        let mut options = Vec::new();
        loop {
            if self.parse_word("increment").is_some() {
                let _ = self.parse_word("by");
                options.push(SequenceOption::IncrementBy(self.parse_expr()?));
            } else if self.parse_word("minvalue").is_some() {
                options.push(SequenceOption::MinValue(self.parse_expr()?));
            } else if self.parse_word("maxvalue").is_some() {
                options.push(SequenceOption::MaxValue(self.parse_expr()?));
            } else if self.parse_word("start").is_some() {
                let _ = self.parse_command("with");
                options.push(SequenceOption::StartWith(self.parse_expr()?));
            } else if self.parse_word("cache").is_some() {
                options.push(SequenceOption::Cache(self.parse_expr()?));
            } else if self.parse_word("cycle").is_some() {
                options.push(SequenceOption::Cycle);
            } else if self.parse_word("no").is_some() {
                if self.parse_word("minvalue").is_some() {
                    options.push(SequenceOption::NoMinValue);
                } else if self.parse_word("maxvalue").is_some() {
                    options.push(SequenceOption::NoMaxValue);
                } else {
                    self.expect_word("cycle")?;
                    options.push(SequenceOption::NoCycle);
                }
            } else if self.parse_word("owned").is_some() {
                self.expect_word("by")?;
                if self.parse_word("none").is_some() {
                    options.push(SequenceOption::OwnedByNone);
                } else {
                    options.push(SequenceOption::OwnedBy(self.parse_object_name()?));
                }
            } else if self.parse_word("restart").is_some() {
                let value = if self.parse_command("with").is_some() {
                    Some(self.parse_expr()?)
                } else if self.peek_token().is_some_and(|t| t.is(TokenType::LITERAL)) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                options.push(SequenceOption::RestartWith(value));
            } else {
                break;
            }
        }
        Ok(options)
    }

    /// `CLUSTER [VERBOSE] [table [USING index]]`
    pub fn parse_cluster(&mut self) -> Result<ClusterQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        self.expect_command("cluster")?;
        let verbose = self.parse_command("verbose").is_some();
        let table = match self.peek_token() {
            Some(t) if t.is(TokenType::IDENTIFIER | TokenType::FUNCTION) => {
                Some(self.parse_object_name()?)
            }
            _ => None,
        };
        let index = if table.is_some() && self.parse_command("using").is_some() {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(ClusterQuery {
            verbose,
            table,
            index,
            header_comments,
        })
    }

    /// `REINDEX {INDEX | TABLE | SCHEMA} name`
    pub fn parse_reindex(&mut self) -> Result<ReindexQuery, ParserError> {
        let header_comments = self.statement_header_comments();
        self.expect_command("reindex")?;
        let target_type = match self.parse_any_command(&["index", "table", "schema"]) {
            Some(t) => match t.value.as_str() {
                "index" => ReindexTarget::Index,
                "table" => ReindexTarget::Table,
                _ => ReindexTarget::Schema,
            },
            None => return self.expected("INDEX, TABLE or SCHEMA"),
        };
        let name = self.parse_object_name()?;
        Ok(ReindexQuery {
            target_type,
            name,
            header_comments,
        })
    }
}
