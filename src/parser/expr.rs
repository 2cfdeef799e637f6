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

//! Value expression parsing by precedence climbing.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec, vec::Vec};

use crate::ast::{
    BinaryOperator, CaseExpression, CaseWhen, ColumnReference, Expr, FunctionArg, FunctionCall,
    Ident, LiteralValue, ObjectName, OverTarget, ParameterExpression, TrimWhere, TypeValue,
    UnaryOperator, WindowFrame, WindowFrameBound, WindowFrameUnits, WindowSpec,
};
use crate::keywords::is_order_by_aggregate;
use crate::tokenizer::{Token, TokenType};

use super::{Parser, ParserError};

// Binding powers, loosest first. `BETWEEN` bounds parse at PREC_CMP so that
// the `AND` separating them can never be swallowed as a logical operator.
pub(crate) const PREC_OR: u8 = 5;
pub(crate) const PREC_AND: u8 = 10;
pub(crate) const PREC_NOT: u8 = 15;
pub(crate) const PREC_CMP: u8 = 20;
pub(crate) const PREC_CONCAT: u8 = 25;
pub(crate) const PREC_ADD: u8 = 30;
pub(crate) const PREC_MUL: u8 = 35;
pub(crate) const PREC_UNARY: u8 = 40;
pub(crate) const PREC_CAST: u8 = 50;
pub(crate) const PREC_SUBSCRIPT: u8 = 60;

impl<'a> Parser<'a> {
    /// Parses a value expression starting at the current index.
    pub fn parse_expr(&mut self) -> Result<Expr, ParserError> {
        self.parse_subexpr(0)
    }

    /// Parses an expression whose operators all bind tighter than
    /// `precedence`.
    pub(crate) fn parse_subexpr(&mut self, precedence: u8) -> Result<Expr, ParserError> {
        self.enter()?;
        let result = self.parse_subexpr_inner(precedence);
        self.exit();
        result
    }

    fn parse_subexpr_inner(&mut self, precedence: u8) -> Result<Expr, ParserError> {
        let mut expr = self.parse_prefix()?;
        loop {
            let next = self.next_precedence();
            if next <= precedence {
                break;
            }
            expr = self.parse_infix(expr, next)?;
        }
        Ok(expr)
    }

    fn next_precedence(&self) -> u8 {
        let Some(token) = self.peek_token() else {
            return 0;
        };
        if token.is(TokenType::OPEN_BRACKET) {
            return PREC_SUBSCRIPT;
        }
        if !token.token_type.contains(TokenType::OPERATOR) {
            return 0;
        }
        match token.value.as_str() {
            "or" => PREC_OR,
            "and" => PREC_AND,
            "=" | "<" | ">" | "<=" | ">=" | "<>" | "!=" => PREC_CMP,
            "is" | "is not" | "is null" | "is not null" | "is distinct from"
            | "is not distinct from" => PREC_CMP,
            "like" | "not like" | "ilike" | "not ilike" => PREC_CMP,
            "in" | "not in" | "between" | "not between" => PREC_CMP,
            "||" => PREC_CONCAT,
            "+" | "-" => PREC_ADD,
            "*" | "/" | "%" => PREC_MUL,
            "::" => PREC_CAST,
            "->" | "->>" => PREC_SUBSCRIPT,
            // `not` is prefix-only
            _ => 0,
        }
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParserError> {
        let Some(token) = self.peek_token() else {
            return self.expected("an expression");
        };
        if token.is(TokenType::LITERAL) {
            self.next_token();
            return Ok(Expr::Literal(literal_from_token(token)));
        }
        if token.is(TokenType::PARAMETER) {
            self.next_token();
            return Ok(Expr::Parameter(ParameterExpression::new(
                token.value.clone(),
            )));
        }
        if token.is(TokenType::OPEN_PAREN) {
            return self.parse_parenthesized_expr();
        }
        if token.token_type.contains(TokenType::OPERATOR) {
            return match token.value.as_str() {
                "not" => {
                    self.next_token();
                    let expr = self.parse_subexpr(PREC_NOT)?;
                    Ok(Expr::UnaryOp {
                        op: UnaryOperator::Not,
                        expr: Box::new(expr),
                    })
                }
                "+" | "-" => {
                    let op = if token.value == "+" {
                        UnaryOperator::Plus
                    } else {
                        UnaryOperator::Minus
                    };
                    self.next_token();
                    let expr = self.parse_subexpr(PREC_UNARY)?;
                    Ok(Expr::UnaryOp {
                        op,
                        expr: Box::new(expr),
                    })
                }
                "*" => {
                    self.next_token();
                    Ok(Expr::Wildcard {
                        qualifier: Vec::new(),
                    })
                }
                _ => self.expected("an expression"),
            };
        }
        if token.token_type.contains(TokenType::COMMAND) {
            return match token.value.as_str() {
                "case" => self.parse_case(),
                "cast" => self.parse_cast(),
                "array" => self.parse_array(),
                _ => self.expected("an expression"),
            };
        }
        if token.is(TokenType::TYPE) {
            return self.parse_type_prefix(token);
        }
        if token.is(TokenType::IDENTIFIER | TokenType::FUNCTION) {
            return self.parse_qualified_reference();
        }
        self.expected("an expression")
    }

    /// `(` expr `)`, `(` expr, expr `)` or `(` SELECT ... `)`.
    fn parse_parenthesized_expr(&mut self) -> Result<Expr, ParserError> {
        let open = self.expect_token(TokenType::OPEN_PAREN, "(")?;
        if self.peek_is_query_start() {
            let header = open.comments.clone();
            let mut query = self.parse_select_query()?;
            query.add_header_comments(reposition_before(header));
            self.expect_token(TokenType::CLOSE_PAREN, ")")?;
            return Ok(Expr::InlineQuery(Box::new(query)));
        }
        let first = self.parse_expr()?;
        if self.parse_token(TokenType::COMMA).is_some() {
            let mut fields = Vec::new();
            fields.push(first);
            fields.extend(self.parse_comma_separated(|p| p.parse_expr())?);
            self.expect_token(TokenType::CLOSE_PAREN, ")")?;
            return Ok(Expr::Tuple(fields));
        }
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        Ok(Expr::Nested(Box::new(first)))
    }

    /// True if the next token opens a query (`SELECT`, `VALUES`, `WITH`).
    pub(crate) fn peek_is_query_start(&self) -> bool {
        self.peek_token().is_some_and(|t| {
            t.is_command("select") || t.is_command("values") || t.is_command("with")
        })
    }

    /// A TYPE-flagged token in value position: a typed string like
    /// `DATE '2024-01-01'`, a bare type, or just a column that happens to
    /// share a type name.
    fn parse_type_prefix(&mut self, token: &'a Token) -> Result<Expr, ParserError> {
        let next = self.peek_nth(1);
        if next.is_some_and(is_plain_string_literal) {
            self.next_token();
            let literal = self.next_token().expect("peeked literal");
            return Ok(Expr::TypedString {
                data_type: TypeValue::new(token.value.clone()),
                value: unquote_string(&literal.value),
            });
        }
        if !token.token_type.contains(TokenType::IDENTIFIER) {
            // Multi-word spellings like `timestamp with time zone` can only
            // be types.
            let data_type = self.parse_type_value()?;
            return Ok(Expr::TypeValue(data_type));
        }
        if next.is_some_and(|t| t.is(TokenType::OPEN_PAREN)) {
            // `date(x)`: a call, not a parameterized type, in value position
            let name = self.ident_from_token(token);
            self.next_token();
            return self.parse_function_call(ObjectName(vec![name]));
        }
        self.parse_qualified_reference()
    }

    /// A possibly-qualified column reference, qualified wildcard, or
    /// function call.
    pub(crate) fn parse_qualified_reference(&mut self) -> Result<Expr, ParserError> {
        let mut parts: Vec<Ident> = Vec::new();
        loop {
            let Some(token) = self.peek_token() else {
                return self.expected("identifier");
            };
            if token.token_type.contains(TokenType::FUNCTION)
                && self.peek_nth(1).is_some_and(|t| t.is(TokenType::OPEN_PAREN))
            {
                let name = self.ident_from_token(token);
                self.next_token();
                parts.push(name);
                return self.parse_function_call(ObjectName(parts));
            }
            if token.is(TokenType::IDENTIFIER) {
                parts.push(self.ident_from_token(token));
                self.next_token();
            } else if token.is_operator("*") {
                self.next_token();
                return Ok(Expr::Wildcard { qualifier: parts });
            } else {
                return self.expected("identifier");
            }
            if self.parse_token(TokenType::DOT).is_none() {
                let name = parts.pop().expect("at least one part");
                return Ok(Expr::ColumnReference(ColumnReference {
                    namespaces: parts,
                    name,
                }));
            }
        }
    }

    fn parse_infix(&mut self, left: Expr, precedence: u8) -> Result<Expr, ParserError> {
        let token = self.next_token().expect("caller peeked an operator");
        if token.is(TokenType::OPEN_BRACKET) {
            let index = self.parse_expr()?;
            self.expect_token(TokenType::CLOSE_BRACKET, "]")?;
            return Ok(Expr::Subscript {
                expr: Box::new(left),
                index: Box::new(index),
            });
        }
        match token.value.as_str() {
            "::" => {
                let data_type = self.parse_type_value()?;
                Ok(Expr::Cast {
                    expr: Box::new(left),
                    data_type,
                })
            }
            "between" | "not between" => {
                let negated = token.value == "not between";
                let low = self.parse_subexpr(PREC_CMP)?;
                self.expect_operator("and")?;
                let high = self.parse_subexpr(PREC_CMP)?;
                Ok(Expr::Between {
                    expr: Box::new(left),
                    negated,
                    low: Box::new(low),
                    high: Box::new(high),
                })
            }
            "in" | "not in" => {
                let negated = token.value == "not in";
                self.expect_token(TokenType::OPEN_PAREN, "(")?;
                if self.peek_is_query_start() {
                    let subquery = self.parse_select_query()?;
                    self.expect_token(TokenType::CLOSE_PAREN, ")")?;
                    Ok(Expr::InSubquery {
                        expr: Box::new(left),
                        subquery: Box::new(subquery),
                        negated,
                    })
                } else {
                    let list = self.parse_comma_separated(|p| p.parse_expr())?;
                    self.expect_token(TokenType::CLOSE_PAREN, ")")?;
                    Ok(Expr::InList {
                        expr: Box::new(left),
                        list,
                        negated,
                    })
                }
            }
            "is null" | "is not null" => Ok(Expr::IsNull {
                expr: Box::new(left),
                negated: token.value == "is not null",
            }),
            "is distinct from" | "is not distinct from" => {
                let right = self.parse_subexpr(PREC_CMP)?;
                Ok(Expr::IsDistinctFrom {
                    left: Box::new(left),
                    right: Box::new(right),
                    negated: token.value == "is not distinct from",
                })
            }
            value => {
                let op = match value {
                    "+" => BinaryOperator::Plus,
                    "-" => BinaryOperator::Minus,
                    "*" => BinaryOperator::Multiply,
                    "/" => BinaryOperator::Divide,
                    "%" => BinaryOperator::Modulo,
                    "||" => BinaryOperator::StringConcat,
                    ">" => BinaryOperator::Gt,
                    "<" => BinaryOperator::Lt,
                    ">=" => BinaryOperator::GtEq,
                    "<=" => BinaryOperator::LtEq,
                    "=" => BinaryOperator::Eq,
                    "<>" | "!=" => BinaryOperator::NotEq,
                    "and" => BinaryOperator::And,
                    "or" => BinaryOperator::Or,
                    "is" => BinaryOperator::Is,
                    "is not" => BinaryOperator::IsNot,
                    "like" => BinaryOperator::Like,
                    "not like" => BinaryOperator::NotLike,
                    "ilike" => BinaryOperator::ILike,
                    "not ilike" => BinaryOperator::NotILike,
                    "->" => BinaryOperator::Arrow,
                    "->>" => BinaryOperator::LongArrow,
                    _ => return self.expected("an operator"),
                };
                let right = self.parse_subexpr(precedence)?;
                Ok(Expr::BinaryOp {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                })
            }
        }
    }

    /// `CASE [operand] WHEN ... THEN ... [ELSE ...] END`
    fn parse_case(&mut self) -> Result<Expr, ParserError> {
        self.expect_command("case")?;
        let operand = if self.peek_token().is_some_and(|t| t.is_command("when")) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        let mut when_clauses = Vec::new();
        while self.parse_command("when").is_some() {
            let condition = self.parse_expr()?;
            self.expect_command("then")?;
            let result = self.parse_expr()?;
            when_clauses.push(CaseWhen { condition, result });
        }
        if when_clauses.is_empty() {
            return self.expected("WHEN");
        }
        let else_result = if self.parse_command("else").is_some() {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_command("end")?;
        Ok(Expr::Case(CaseExpression {
            operand,
            when_clauses,
            else_result,
        }))
    }

    /// `CAST(expr AS type)`
    fn parse_cast(&mut self) -> Result<Expr, ParserError> {
        self.expect_command("cast")?;
        self.expect_token(TokenType::OPEN_PAREN, "(")?;
        let expr = self.parse_expr()?;
        self.expect_command("as")?;
        let data_type = self.parse_type_value()?;
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
        })
    }

    /// `ARRAY[...]` or `ARRAY(SELECT ...)`
    fn parse_array(&mut self) -> Result<Expr, ParserError> {
        self.expect_command("array")?;
        if self.parse_token(TokenType::OPEN_BRACKET).is_some() {
            if self.parse_token(TokenType::CLOSE_BRACKET).is_some() {
                return Ok(Expr::Array {
                    elements: Vec::new(),
                });
            }
            let elements = self.parse_comma_separated(|p| p.parse_expr())?;
            self.expect_token(TokenType::CLOSE_BRACKET, "]")?;
            return Ok(Expr::Array { elements });
        }
        self.expect_token(TokenType::OPEN_PAREN, "(")?;
        let query = self.parse_select_query()?;
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        Ok(Expr::ArraySubquery(Box::new(query)))
    }

    /// Parses a type: a TYPE token or a (qualified) custom type name, with
    /// optional arguments and `[]` array suffixes.
    pub(crate) fn parse_type_value(&mut self) -> Result<TypeValue, ParserError> {
        let name = if let Some(token) = self.parse_token(TokenType::TYPE) {
            token.value.clone()
        } else {
            let parts = self.parse_object_name()?;
            let mut name = String::new();
            for (i, part) in parts.0.iter().enumerate() {
                if i > 0 {
                    name.push('.');
                }
                name.push_str(&part.value);
            }
            name
        };
        let mut data_type = TypeValue::new(name);
        if self.parse_token(TokenType::OPEN_PAREN).is_some() {
            data_type.args = self.parse_comma_separated(|p| p.parse_expr())?;
            self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        }
        while self.peek_token().is_some_and(|t| t.is(TokenType::OPEN_BRACKET))
            && self
                .peek_nth(1)
                .is_some_and(|t| t.is(TokenType::CLOSE_BRACKET))
        {
            self.next_token();
            self.next_token();
            data_type.name.push_str("[]");
        }
        Ok(data_type)
    }

    /// Parses a call's argument list and trailing clauses; the opening
    /// paren is already consumed. The keyword-argument forms (`SUBSTRING`,
    /// `OVERLAY`, `TRIM`, `EXTRACT`, `POSITION`) divert to their own
    /// parsers.
    pub(crate) fn parse_function_call(&mut self, name: ObjectName) -> Result<Expr, ParserError> {
        self.expect_token(TokenType::OPEN_PAREN, "(")?;
        if name.0.len() == 1 && name.0[0].quote_style.is_none() {
            match name.0[0].value.to_lowercase().as_str() {
                "substring" => return self.parse_substring(),
                "overlay" => return self.parse_overlay(),
                "trim" => return self.parse_trim(),
                "extract" => return self.parse_extract(),
                "position" => return self.parse_position(),
                _ => {}
            }
        }
        let mut call = FunctionCall::new(name);
        call.distinct = self.parse_command("distinct").is_some();
        if !self.peek_token().is_some_and(|t| t.is(TokenType::CLOSE_PAREN)) {
            loop {
                if self.peek_token().is_some_and(|t| t.is_operator("*"))
                    && self
                        .peek_nth(1)
                        .is_some_and(|t| t.is(TokenType::CLOSE_PAREN | TokenType::COMMA))
                {
                    self.next_token();
                    call.args.push(FunctionArg::Wildcard);
                } else if self.peek_is_query_start() {
                    // `EXISTS (SELECT ...)` and friends: the subquery sits
                    // directly inside the call's own parentheses
                    let query = self.parse_select_query()?;
                    call.args
                        .push(FunctionArg::Expr(Expr::InlineQuery(Box::new(query))));
                } else {
                    call.args.push(FunctionArg::Expr(self.parse_expr()?));
                }
                if self.parse_token(TokenType::COMMA).is_none() {
                    break;
                }
            }
        }
        let aggregate_name = call.name.0.last().expect("non-empty name");
        if is_order_by_aggregate(&aggregate_name.value.to_lowercase())
            && self.parse_command("order by").is_some()
        {
            call.order_by = self.parse_comma_separated(|p| p.parse_order_by_item())?;
        }
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;

        if self.parse_command("within group").is_some() {
            self.expect_token(TokenType::OPEN_PAREN, "(")?;
            self.expect_command("order by")?;
            call.within_group = self.parse_comma_separated(|p| p.parse_order_by_item())?;
            self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        }
        if self.parse_command("filter").is_some() {
            self.expect_token(TokenType::OPEN_PAREN, "(")?;
            self.expect_command("where")?;
            call.filter = Some(Box::new(self.parse_expr()?));
            self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        }
        call.with_ordinality = self.parse_command("with ordinality").is_some();
        if self.parse_command("over").is_some() {
            if self.parse_token(TokenType::OPEN_PAREN).is_some() {
                call.over = Some(OverTarget::WindowSpec(self.parse_window_spec()?));
            } else {
                call.over = Some(OverTarget::WindowName(self.parse_identifier()?));
            }
        }
        Ok(Expr::Function(call))
    }

    /// Parses a window specification after its opening paren, consuming
    /// the closing paren.
    pub(crate) fn parse_window_spec(&mut self) -> Result<WindowSpec, ParserError> {
        let mut spec = WindowSpec::new();
        if self.parse_command("partition by").is_some() {
            spec.partition_by = self.parse_comma_separated(|p| p.parse_expr())?;
        }
        if self.parse_command("order by").is_some() {
            spec.order_by = self.parse_comma_separated(|p| p.parse_order_by_item())?;
        }
        if let Some(units) = self.parse_any_command(&["rows", "range", "groups"]) {
            let units = match units.value.as_str() {
                "rows" => WindowFrameUnits::Rows,
                "range" => WindowFrameUnits::Range,
                _ => WindowFrameUnits::Groups,
            };
            let frame = if self.parse_operator("between").is_some() {
                let start_bound = self.parse_frame_bound()?;
                self.expect_operator("and")?;
                let end_bound = Some(self.parse_frame_bound()?);
                WindowFrame {
                    units,
                    start_bound,
                    end_bound,
                }
            } else {
                WindowFrame {
                    units,
                    start_bound: self.parse_frame_bound()?,
                    end_bound: None,
                }
            };
            spec.frame = Some(frame);
        }
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        Ok(spec)
    }

    fn parse_frame_bound(&mut self) -> Result<WindowFrameBound, ParserError> {
        if self.parse_command("current row").is_some() {
            return Ok(WindowFrameBound::CurrentRow);
        }
        if self.parse_command("unbounded preceding").is_some() {
            return Ok(WindowFrameBound::Preceding(None));
        }
        if self.parse_command("unbounded following").is_some() {
            return Ok(WindowFrameBound::Following(None));
        }
        let offset = Box::new(self.parse_expr()?);
        if self.parse_command("preceding").is_some() {
            Ok(WindowFrameBound::Preceding(Some(offset)))
        } else if self.parse_command("following").is_some() {
            Ok(WindowFrameBound::Following(Some(offset)))
        } else {
            self.expected("PRECEDING or FOLLOWING")
        }
    }

    /// `SUBSTRING(x FROM a FOR b)` or `SUBSTRING(x, a, b)`; the opening
    /// paren is consumed.
    fn parse_substring(&mut self) -> Result<Expr, ParserError> {
        let expr = Box::new(self.parse_expr()?);
        let mut substring_from = None;
        let mut substring_for = None;
        if self.parse_command("from").is_some() {
            substring_from = Some(Box::new(self.parse_expr()?));
            if self.parse_command("for").is_some() {
                substring_for = Some(Box::new(self.parse_expr()?));
            }
        } else if self.parse_token(TokenType::COMMA).is_some() {
            substring_from = Some(Box::new(self.parse_expr()?));
            if self.parse_token(TokenType::COMMA).is_some() {
                substring_for = Some(Box::new(self.parse_expr()?));
            }
        }
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        Ok(Expr::Substring {
            expr,
            substring_from,
            substring_for,
        })
    }

    /// `OVERLAY(x PLACING y FROM a [FOR b])`
    fn parse_overlay(&mut self) -> Result<Expr, ParserError> {
        let expr = Box::new(self.parse_expr()?);
        self.expect_command("placing")?;
        let overlay_what = Box::new(self.parse_expr()?);
        self.expect_command("from")?;
        let overlay_from = Box::new(self.parse_expr()?);
        let overlay_for = if self.parse_command("for").is_some() {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        Ok(Expr::Overlay {
            expr,
            overlay_what,
            overlay_from,
            overlay_for,
        })
    }

    /// `TRIM([BOTH | LEADING | TRAILING] [chars FROM] s)`
    fn parse_trim(&mut self) -> Result<Expr, ParserError> {
        let trim_where = self
            .parse_any_command(&["both", "leading", "trailing"])
            .map(|t| match t.value.as_str() {
                "both" => TrimWhere::Both,
                "leading" => TrimWhere::Leading,
                _ => TrimWhere::Trailing,
            });
        if self.parse_command("from").is_some() {
            let expr = Box::new(self.parse_expr()?);
            self.expect_token(TokenType::CLOSE_PAREN, ")")?;
            return Ok(Expr::Trim {
                expr,
                trim_where,
                trim_what: None,
            });
        }
        let first = Box::new(self.parse_expr()?);
        let (expr, trim_what) = if self.parse_command("from").is_some() {
            (Box::new(self.parse_expr()?), Some(first))
        } else {
            (first, None)
        };
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        Ok(Expr::Trim {
            expr,
            trim_where,
            trim_what,
        })
    }

    /// `EXTRACT(field FROM x)`
    fn parse_extract(&mut self) -> Result<Expr, ParserError> {
        let field = self.parse_identifier()?;
        self.expect_command("from")?;
        let expr = Box::new(self.parse_expr()?);
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        Ok(Expr::Extract { field, expr })
    }

    /// `POSITION(x IN s)`
    fn parse_position(&mut self) -> Result<Expr, ParserError> {
        let expr = Box::new(self.parse_subexpr(PREC_CMP)?);
        self.expect_operator("in")?;
        let in_expr = Box::new(self.parse_expr()?);
        self.expect_token(TokenType::CLOSE_PAREN, ")")?;
        Ok(Expr::Position { expr, in_expr })
    }
}

/// A quoted string literal without a specifier prefix.
fn is_plain_string_literal(token: &Token) -> bool {
    token.token_type.contains(TokenType::LITERAL)
        && !token.token_type.contains(TokenType::STRING_SPECIFIER)
        && token.value.starts_with('\'')
}

/// Builds a literal from a LITERAL-flagged token.
fn literal_from_token(token: &Token) -> LiteralValue {
    let value = &token.value;
    if token.token_type.contains(TokenType::STRING_SPECIFIER) {
        let specifier = value.chars().next();
        return LiteralValue::String {
            value: unquote_string(&value[1..]),
            specifier,
        };
    }
    if value.starts_with('\'') {
        return LiteralValue::String {
            value: unquote_string(value),
            specifier: None,
        };
    }
    if value.eq_ignore_ascii_case("true") {
        return LiteralValue::Boolean(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return LiteralValue::Boolean(false);
    }
    if value.eq_ignore_ascii_case("null") {
        return LiteralValue::Null;
    }
    LiteralValue::Number(value.clone())
}

/// Strips the single quotes off a string lexeme and collapses `''`.
fn unquote_string(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\'' {
            chars.next();
        }
    }
    out
}

/// Re-tags comments as `before` comments for transfer onto a node that
/// follows them.
pub(crate) fn reposition_before(
    comments: Vec<crate::tokenizer::Comment>,
) -> Vec<crate::tokenizer::Comment> {
    comments
        .into_iter()
        .map(|c| crate::tokenizer::Comment::before(c.text))
        .collect()
}
