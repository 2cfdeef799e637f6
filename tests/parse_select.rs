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

#![warn(clippy::all)]
//! Tests for SELECT queries: clauses, expressions, CTEs, set operations.

use matches::assert_matches;
use pretty_assertions::assert_eq;

use sqltext::ast::*;
use sqltext::parser::ParserError;
use sqltext::test_utils::*;

#[test]
fn parse_simple_select() {
    let select = verified_select("SELECT a, b FROM t WHERE a = 1 ORDER BY b DESC NULLS LAST LIMIT 10");
    assert_eq!(select.select.items.len(), 2);
    assert_eq!(select.select.items[0].expr, col("a"));
    assert_eq!(select.select.items[1].expr, col("b"));

    let from = select.from.unwrap();
    assert_eq!(
        from.source.datasource,
        Datasource::Table(TableSource { name: "t".into() })
    );
    assert!(from.joins.is_empty());

    assert_eq!(
        select.where_clause.unwrap().condition,
        Expr::BinaryOp {
            left: boxed(col("a")),
            op: BinaryOperator::Eq,
            right: boxed(number("1")),
        }
    );

    let order_by = select.order_by.unwrap();
    assert_eq!(order_by.items.len(), 1);
    assert_eq!(order_by.items[0].expr, col("b"));
    assert_eq!(order_by.items[0].direction, Some(SortDirection::Desc));
    assert_eq!(order_by.items[0].nulls, Some(NullsPlacement::Last));

    assert_eq!(select.limit.unwrap().value, Some(number("10")));
}

#[test]
fn parse_wildcard_and_qualified_wildcard() {
    let select = verified_select("SELECT *, t.* FROM t");
    assert_eq!(
        select.select.items[0].expr,
        Expr::Wildcard { qualifier: vec![] }
    );
    assert_eq!(
        select.select.items[1].expr,
        Expr::Wildcard {
            qualifier: vec![Ident::new("t")]
        }
    );
}

#[test]
fn parse_column_aliases() {
    let select = verified_select("SELECT a AS x, b y FROM t");
    assert_eq!(select.select.items[0].alias, Some(Ident::new("x")));
    assert_eq!(select.select.items[1].alias, Some(Ident::new("y")));
}

#[test]
fn parse_quoted_identifiers() {
    let select = verified_select("SELECT \"my col\", `tick`, [bracket] FROM \"my table\"");
    assert_eq!(
        select.select.items[0].expr,
        Expr::ColumnReference(ColumnReference::new(Ident::with_quote('"', "my col")))
    );
    assert_eq!(
        select.select.items[1].expr,
        Expr::ColumnReference(ColumnReference::new(Ident::with_quote('`', "tick")))
    );
    assert_eq!(
        select.select.items[2].expr,
        Expr::ColumnReference(ColumnReference::new(Ident::with_quote('[', "bracket")))
    );
}

#[test]
fn parse_qualified_column_reference() {
    assert_eq!(
        verified_expr("db.s.t.c"),
        Expr::ColumnReference(ColumnReference {
            namespaces: vec![Ident::new("db"), Ident::new("s"), Ident::new("t")],
            name: Ident::new("c"),
        })
    );
}

#[test]
fn parse_distinct() {
    let select = verified_select("SELECT DISTINCT a FROM t");
    assert_eq!(select.select.distinct, Some(Distinct::Distinct));

    let select = verified_select("SELECT DISTINCT ON (a, b) a FROM t");
    assert_eq!(
        select.select.distinct,
        Some(Distinct::DistinctOn(vec![col("a"), col("b")]))
    );
}

#[test]
fn or_binds_looser_than_and() {
    assert_eq!(
        verified_expr("a OR b AND c"),
        Expr::BinaryOp {
            left: boxed(col("a")),
            op: BinaryOperator::Or,
            right: boxed(Expr::BinaryOp {
                left: boxed(col("b")),
                op: BinaryOperator::And,
                right: boxed(col("c")),
            }),
        }
    );
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(
        verified_expr("a + b * c"),
        Expr::BinaryOp {
            left: boxed(col("a")),
            op: BinaryOperator::Plus,
            right: boxed(Expr::BinaryOp {
                left: boxed(col("b")),
                op: BinaryOperator::Multiply,
                right: boxed(col("c")),
            }),
        }
    );
}

#[test]
fn between_upper_bound_stops_at_and() {
    assert_eq!(
        verified_expr("a BETWEEN 1 AND 2 OR x"),
        Expr::BinaryOp {
            left: boxed(Expr::Between {
                expr: boxed(col("a")),
                negated: false,
                low: boxed(number("1")),
                high: boxed(number("2")),
            }),
            op: BinaryOperator::Or,
            right: boxed(col("x")),
        }
    );
    assert_matches!(
        verified_expr("a NOT BETWEEN 1 AND 2"),
        Expr::Between { negated: true, .. }
    );
}

#[test]
fn multi_word_operators_resolve_with_backtracking() {
    assert_matches!(
        verified_expr("a IS NOT NULL"),
        Expr::IsNull { negated: true, .. }
    );
    assert_matches!(
        verified_expr("a IS NULL"),
        Expr::IsNull { negated: false, .. }
    );
    assert_matches!(
        verified_expr("a IS NOT DISTINCT FROM b"),
        Expr::IsDistinctFrom { negated: true, .. }
    );
    assert_matches!(
        verified_expr("a IS DISTINCT FROM b"),
        Expr::IsDistinctFrom { negated: false, .. }
    );
    assert_eq!(
        verified_expr("a IS NOT b"),
        Expr::BinaryOp {
            left: boxed(col("a")),
            op: BinaryOperator::IsNot,
            right: boxed(col("b")),
        }
    );
}

#[test]
fn parse_in_list_and_in_subquery() {
    let select = verified_select("SELECT 1 WHERE x NOT IN (1, 2)");
    assert_eq!(
        select.where_clause.unwrap().condition,
        Expr::InList {
            expr: boxed(col("x")),
            list: vec![number("1"), number("2")],
            negated: true,
        }
    );

    let select = verified_select("SELECT 1 WHERE x IN (SELECT y FROM t)");
    assert_matches!(
        select.where_clause.unwrap().condition,
        Expr::InSubquery { negated: false, .. }
    );
}

#[test]
fn parse_like_operators() {
    assert_matches!(
        verified_expr("a LIKE 'x%'"),
        Expr::BinaryOp {
            op: BinaryOperator::Like,
            ..
        }
    );
    assert_matches!(
        verified_expr("a NOT ILIKE 'x%'"),
        Expr::BinaryOp {
            op: BinaryOperator::NotILike,
            ..
        }
    );
}

#[test]
fn signed_numbers_and_casts() {
    let select = verified_select("SELECT 1.0 + .5, -3 :: int, 'x' || 'y'");
    assert_eq!(
        select.select.items[0].expr,
        Expr::BinaryOp {
            left: boxed(number("1.0")),
            op: BinaryOperator::Plus,
            right: boxed(number(".5")),
        }
    );
    assert_eq!(
        select.select.items[1].expr,
        Expr::Cast {
            expr: boxed(number("-3")),
            data_type: TypeValue::new("int"),
        }
    );
    assert_eq!(
        select.select.items[2].expr,
        Expr::BinaryOp {
            left: boxed(string("x")),
            op: BinaryOperator::StringConcat,
            right: boxed(string("y")),
        }
    );
}

#[test]
fn parse_cast_function_and_parameterized_types() {
    assert_eq!(
        verified_expr("CAST(a AS varchar(45))"),
        Expr::Cast {
            expr: boxed(col("a")),
            data_type: TypeValue {
                name: "varchar".to_string(),
                args: vec![number("45")],
            },
        }
    );
    assert_eq!(
        verified_expr("a :: timestamp with time zone"),
        Expr::Cast {
            expr: boxed(col("a")),
            data_type: TypeValue::new("timestamp with time zone"),
        }
    );
    assert_eq!(
        verified_expr("a :: int[]"),
        Expr::Cast {
            expr: boxed(col("a")),
            data_type: TypeValue::new("int[]"),
        }
    );
}

#[test]
fn parse_typed_strings() {
    assert_eq!(
        verified_expr("date '2024-01-01'"),
        Expr::TypedString {
            data_type: TypeValue::new("date"),
            value: "2024-01-01".to_string(),
        }
    );
    assert_eq!(
        verified_expr("interval '1 day'"),
        Expr::TypedString {
            data_type: TypeValue::new("interval"),
            value: "1 day".to_string(),
        }
    );
}

#[test]
fn parse_string_literals() {
    assert_eq!(verified_expr("'it''s'"), string("it's"));
    assert_eq!(
        verified_expr("E'a\\nb'"),
        Expr::Literal(LiteralValue::String {
            value: "a\\nb".to_string(),
            specifier: Some('E'),
        })
    );
    assert_eq!(verified_expr("true"), Expr::Literal(LiteralValue::Boolean(true)));
    assert_eq!(verified_expr("NULL"), Expr::Literal(LiteralValue::Null));
}

#[test]
fn parse_parameters() {
    assert_eq!(
        verified_expr("$1"),
        Expr::Parameter(ParameterExpression::new("$1"))
    );
    assert_eq!(
        verified_expr(":name"),
        Expr::Parameter(ParameterExpression::new(":name"))
    );
    assert_eq!(
        verified_expr("?"),
        Expr::Parameter(ParameterExpression::new("?"))
    );
}

#[test]
fn parse_case_expressions() {
    assert_eq!(
        verified_expr("CASE WHEN a THEN 1 ELSE 2 END"),
        Expr::Case(CaseExpression {
            operand: None,
            when_clauses: vec![CaseWhen {
                condition: col("a"),
                result: number("1"),
            }],
            else_result: Some(boxed(number("2"))),
        })
    );
    assert_eq!(
        verified_expr("CASE x WHEN 1 THEN 'one' END"),
        Expr::Case(CaseExpression {
            operand: Some(boxed(col("x"))),
            when_clauses: vec![CaseWhen {
                condition: number("1"),
                result: string("one"),
            }],
            else_result: None,
        })
    );
}

#[test]
fn parse_array_expressions() {
    assert_eq!(
        verified_expr("ARRAY[1, 2]"),
        Expr::Array {
            elements: vec![number("1"), number("2")],
        }
    );
    assert_matches!(verified_expr("ARRAY(SELECT a FROM t)"), Expr::ArraySubquery(_));
    assert_eq!(
        verified_expr("tags[1]"),
        Expr::Subscript {
            expr: boxed(col("tags")),
            index: boxed(number("1")),
        }
    );
}

#[test]
fn parse_json_arrows() {
    assert_eq!(
        verified_expr("payload -> 'a' ->> 'b'"),
        Expr::BinaryOp {
            left: boxed(Expr::BinaryOp {
                left: boxed(col("payload")),
                op: BinaryOperator::Arrow,
                right: boxed(string("a")),
            }),
            op: BinaryOperator::LongArrow,
            right: boxed(string("b")),
        }
    );
}

#[test]
fn parse_inline_query_and_tuple() {
    assert_matches!(verified_expr("(SELECT 1)"), Expr::InlineQuery(_));
    assert_eq!(
        verified_expr("(1, 2)"),
        Expr::Tuple(vec![number("1"), number("2")])
    );
    assert_eq!(verified_expr("(a)"), Expr::Nested(boxed(col("a"))));
}

#[test]
fn parse_aggregate_with_all_trailing_clauses() {
    let select = verified_select(
        "SELECT string_agg(name, ', ' ORDER BY id) FILTER (WHERE active) OVER (PARTITION BY g) FROM t",
    );
    let Expr::Function(call) = &select.select.items[0].expr else {
        panic!("expected a function call");
    };
    assert_eq!(call.name, ObjectName(vec![Ident::new("string_agg")]));
    assert_eq!(
        call.args,
        vec![
            FunctionArg::Expr(col("name")),
            FunctionArg::Expr(string(", ")),
        ]
    );
    assert_eq!(call.order_by.len(), 1);
    assert_eq!(call.order_by[0].expr, col("id"));
    assert_eq!(call.filter, Some(boxed(col("active"))));
    match call.over.as_ref().unwrap() {
        OverTarget::WindowSpec(spec) => {
            assert_eq!(spec.partition_by, vec![col("g")]);
            assert!(spec.order_by.is_empty());
            assert!(spec.frame.is_none());
        }
        other => panic!("expected a window spec, got {other:?}"),
    }
}

#[test]
fn internal_order_by_is_only_for_known_aggregates() {
    // `count` is not in the aggregate table, so ORDER BY inside its
    // argument list is a syntax error
    let err = sqltext::parse("SELECT count(a ORDER BY a) FROM t").unwrap_err();
    assert_matches!(err, ParserError::UnexpectedToken { .. });
}

#[test]
fn parse_count_star_and_distinct() {
    let expr = verified_expr("count(*)");
    let Expr::Function(call) = expr else {
        panic!("expected a function call");
    };
    assert_eq!(call.args, vec![FunctionArg::Wildcard]);

    let Expr::Function(call) = verified_expr("count(DISTINCT a)") else {
        panic!("expected a function call");
    };
    assert!(call.distinct);
    assert_eq!(call.args, vec![FunctionArg::Expr(col("a"))]);
}

#[test]
fn parse_within_group() {
    let Expr::Function(call) =
        verified_expr("percentile_cont(0.5) WITHIN GROUP (ORDER BY x)")
    else {
        panic!("expected a function call");
    };
    assert_eq!(call.within_group.len(), 1);
    assert_eq!(call.within_group[0].expr, col("x"));
}

#[test]
fn parse_window_frames() {
    let Expr::Function(call) =
        verified_expr("sum(x) OVER (ORDER BY d ROWS BETWEEN 1 PRECEDING AND CURRENT ROW)")
    else {
        panic!("expected a function call");
    };
    let OverTarget::WindowSpec(spec) = call.over.unwrap() else {
        panic!("expected a window spec");
    };
    let frame = spec.frame.unwrap();
    assert_eq!(frame.units, WindowFrameUnits::Rows);
    assert_eq!(frame.start_bound, WindowFrameBound::Preceding(Some(boxed(number("1")))));
    assert_eq!(frame.end_bound, Some(WindowFrameBound::CurrentRow));
}

#[test]
fn parse_named_windows() {
    let select = verified_select("SELECT sum(x) OVER w FROM t WINDOW w AS (PARTITION BY g)");
    let Expr::Function(call) = &select.select.items[0].expr else {
        panic!("expected a function call");
    };
    assert_eq!(call.over, Some(OverTarget::WindowName(Ident::new("w"))));
    let window = select.window.unwrap();
    assert_eq!(window.windows.len(), 1);
    assert_eq!(window.windows[0].name, Ident::new("w"));
    assert_eq!(window.windows[0].spec.partition_by, vec![col("g")]);
}

#[test]
fn parse_keyword_argument_functions() {
    assert_eq!(
        verified_expr("substring(name FROM 2 FOR 3)"),
        Expr::Substring {
            expr: boxed(col("name")),
            substring_from: Some(boxed(number("2"))),
            substring_for: Some(boxed(number("3"))),
        }
    );
    assert_eq!(
        verified_expr("substring(name, 2, 3)"),
        Expr::Substring {
            expr: boxed(col("name")),
            substring_from: Some(boxed(number("2"))),
            substring_for: Some(boxed(number("3"))),
        }
    );
    assert_eq!(
        verified_expr("overlay(a PLACING b FROM 3 FOR 4)"),
        Expr::Overlay {
            expr: boxed(col("a")),
            overlay_what: boxed(col("b")),
            overlay_from: boxed(number("3")),
            overlay_for: Some(boxed(number("4"))),
        }
    );
    assert_eq!(
        verified_expr("trim(LEADING 'x' FROM s)"),
        Expr::Trim {
            expr: boxed(col("s")),
            trim_where: Some(TrimWhere::Leading),
            trim_what: Some(boxed(string("x"))),
        }
    );
    assert_eq!(
        verified_expr("extract(year FROM d)"),
        Expr::Extract {
            field: Ident::new("year"),
            expr: boxed(col("d")),
        }
    );
    assert_eq!(
        verified_expr("position('x' IN s)"),
        Expr::Position {
            expr: boxed(string("x")),
            in_expr: boxed(col("s")),
        }
    );
}

#[test]
fn parse_exists_as_function_argument() {
    let select = verified_select("SELECT 1 WHERE exists (SELECT 1 FROM t)");
    let Expr::Function(call) = select.where_clause.unwrap().condition else {
        panic!("expected a function call");
    };
    assert_eq!(call.name, ObjectName(vec![Ident::new("exists")]));
    assert_matches!(call.args[0], FunctionArg::Expr(Expr::InlineQuery(_)));
}

#[test]
fn parse_joins() {
    let select = verified_select(
        "SELECT * FROM a \
         INNER JOIN b ON a.id = b.id \
         LEFT OUTER JOIN c USING (id) \
         CROSS JOIN d",
    );
    let from = select.from.unwrap();
    assert_eq!(from.joins.len(), 3);
    assert_eq!(from.joins[0].join_type, JoinType::Inner);
    assert_matches!(from.joins[0].condition, Some(JoinCondition::On(_)));
    assert_eq!(from.joins[1].join_type, JoinType::Left);
    assert_eq!(
        from.joins[1].condition,
        Some(JoinCondition::Using(vec![Ident::new("id")]))
    );
    assert_eq!(from.joins[2].join_type, JoinType::Cross);
    assert_eq!(from.joins[2].condition, None);
}

#[test]
fn comma_separated_sources_become_cross_joins() {
    let select = verified_select("SELECT * FROM a, b");
    let from = select.from.unwrap();
    assert_eq!(from.joins.len(), 1);
    assert_eq!(from.joins[0].join_type, JoinType::Cross);
    assert_eq!(
        from.joins[0].source.datasource,
        Datasource::Table(TableSource { name: "b".into() })
    );
}

#[test]
fn parse_subquery_source_with_aliases() {
    let select = verified_select("SELECT * FROM (SELECT a FROM t) AS s (x)");
    let from = select.from.unwrap();
    assert_matches!(from.source.datasource, Datasource::SubQuery(_));
    let alias = from.source.alias.unwrap();
    assert_eq!(alias.table_alias, Ident::new("s"));
    assert_eq!(alias.column_aliases, Some(vec![Ident::new("x")]));
}

#[test]
fn empty_column_alias_list_is_rejected() {
    let err = sqltext::parse("SELECT * FROM (SELECT a FROM t) s ()").unwrap_err();
    assert_matches!(err, ParserError::SemanticShape { .. });
}

#[test]
fn parse_parenthesized_join_tree() {
    let select = verified_select("SELECT * FROM (a JOIN b ON a.id = b.id) c");
    let from = select.from.unwrap();
    let Datasource::Paren(paren) = &from.source.datasource else {
        panic!("expected a parenthesized source");
    };
    assert_eq!(paren.joins.len(), 1);
    assert_eq!(from.source.alias.as_ref().unwrap().table_alias, Ident::new("c"));
}

#[test]
fn parse_lateral_function_source() {
    let select = verified_select("SELECT * FROM t, LATERAL generate_series(1, t.n) g");
    let from = select.from.unwrap();
    let join_source = &from.joins[0].source;
    assert!(join_source.lateral);
    assert_matches!(join_source.datasource, Datasource::Function(_));
    assert_eq!(
        join_source.alias.as_ref().unwrap().table_alias,
        Ident::new("g")
    );
}

#[test]
fn parse_with_ordinality_source() {
    let select = verified_select("SELECT * FROM unnest(xs) WITH ORDINALITY u");
    let from = select.from.unwrap();
    let Datasource::Function(call) = &from.source.datasource else {
        panic!("expected a function source");
    };
    assert!(call.with_ordinality);
}

#[test]
fn parse_group_by_and_having() {
    let select = verified_select("SELECT g, count(*) FROM t GROUP BY g HAVING count(*) > 1");
    assert_eq!(select.group_by.unwrap().items, vec![col("g")]);
    assert!(select.having.is_some());
}

#[test]
fn parse_limit_offset_fetch_for() {
    let select = verified_select(
        "SELECT a FROM t LIMIT ALL OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY FOR NO KEY UPDATE NOWAIT",
    );
    assert_eq!(select.limit.unwrap().value, None);
    let offset = select.offset.unwrap();
    assert_eq!(offset.value, number("5"));
    assert_eq!(offset.rows, Some(OffsetRows::Rows));
    let fetch = select.fetch.unwrap();
    assert!(!fetch.first);
    assert_eq!(fetch.quantity, Some(number("10")));
    assert!(!fetch.with_ties);
    let for_clause = select.for_clause.unwrap();
    assert_eq!(for_clause.lock_mode, LockMode::NoKeyUpdate);
    assert_eq!(for_clause.wait_policy, Some(LockWait::Nowait));
}

#[test]
fn parse_for_update_of() {
    let select = verified_select("SELECT a FROM t FOR UPDATE OF t SKIP LOCKED");
    let for_clause = select.for_clause.unwrap();
    assert_eq!(for_clause.lock_mode, LockMode::Update);
    assert_eq!(for_clause.of, vec![ObjectName::from("t")]);
    assert_eq!(for_clause.wait_policy, Some(LockWait::SkipLocked));
}

#[test]
fn set_operations_are_left_associative() {
    let query = parse_query("SELECT 1 UNION SELECT 2 UNION ALL SELECT 3");
    let SelectQuery::Binary(outer) = query else {
        panic!("expected a binary query");
    };
    assert_eq!(outer.op, SetOperator::Union);
    assert!(outer.all);
    let SelectQuery::Binary(inner) = outer.left else {
        panic!("expected a nested binary query");
    };
    assert_eq!(inner.op, SetOperator::Union);
    assert!(!inner.all);
    assert_matches!(inner.left, SelectQuery::Simple(_));
    assert_matches!(inner.right, SelectQuery::Simple(_));
    assert_matches!(outer.right, SelectQuery::Simple(_));
}

#[test]
fn parse_intersect_and_except() {
    let SelectQuery::Binary(q) = parse_query("SELECT 1 INTERSECT SELECT 2") else {
        panic!("expected a binary query");
    };
    assert_eq!(q.op, SetOperator::Intersect);
    let SelectQuery::Binary(q) = parse_query("SELECT 1 EXCEPT ALL SELECT 2") else {
        panic!("expected a binary query");
    };
    assert_eq!(q.op, SetOperator::Except);
    assert!(q.all);
}

#[test]
fn parse_values_as_statement() {
    let SelectQuery::Values(values) = parse_query("VALUES (1, 'a'), (2, 'b')") else {
        panic!("expected VALUES");
    };
    assert_eq!(
        values.rows,
        vec![
            vec![number("1"), string("a")],
            vec![number("2"), string("b")],
        ]
    );
}

#[test]
fn parse_recursive_cte() {
    let select = verified_select(
        "WITH RECURSIVE r(n) AS (SELECT 1 UNION SELECT n + 1 FROM r WHERE n < 10) SELECT * FROM r",
    );
    let with = select.with.unwrap();
    assert!(with.recursive);
    assert_eq!(with.tables.len(), 1);
    let cte = &with.tables[0];
    assert_eq!(cte.name, Ident::new("r"));
    assert_eq!(cte.columns, Some(vec![Ident::new("n")]));
    assert_eq!(cte.materialized, None);
    let Statement::Select(SelectQuery::Binary(inner)) = cte.query.as_ref() else {
        panic!("expected a binary query inside the CTE");
    };
    assert_eq!(inner.op, SetOperator::Union);
    assert!(!inner.all);
    let SelectQuery::Simple(left) = &inner.left else {
        panic!("expected SELECT 1 on the left");
    };
    assert_eq!(left.select.items[0].expr, number("1"));
    let SelectQuery::Simple(right) = &inner.right else {
        panic!("expected a SELECT on the right");
    };
    assert!(right.where_clause.is_some());

    assert_eq!(
        select.select.items[0].expr,
        Expr::Wildcard { qualifier: vec![] }
    );
}

#[test]
fn parse_materialized_ctes() {
    let select =
        verified_select("WITH a AS MATERIALIZED (SELECT 1), b AS NOT MATERIALIZED (SELECT 2) SELECT * FROM a");
    let with = select.with.unwrap();
    assert!(!with.recursive);
    assert_eq!(with.tables[0].materialized, Some(true));
    assert_eq!(with.tables[1].materialized, Some(false));
}

#[test]
fn cte_body_may_be_dml() {
    let select = verified_select(
        "WITH moved AS (DELETE FROM t WHERE old RETURNING id) SELECT * FROM moved",
    );
    let with = select.with.unwrap();
    assert_matches!(with.tables[0].query.as_ref(), Statement::Delete(_));
}

#[test]
fn cte_body_rejects_ddl() {
    let err = sqltext::parse("WITH x AS (DROP TABLE t) SELECT 1").unwrap_err();
    assert_matches!(err, ParserError::UnexpectedToken { .. });
}

#[test]
fn misordered_clauses_are_trailing_tokens() {
    let err = sqltext::parse("SELECT a FROM t LIMIT 1 WHERE a = 1").unwrap_err();
    assert_matches!(err, ParserError::TrailingTokens { .. });
}

#[test]
fn select_without_items_is_an_error() {
    let err = sqltext::parse("SELECT FROM t").unwrap_err();
    assert_matches!(err, ParserError::UnexpectedToken { .. });
}

#[test]
fn deep_nesting_is_bounded() {
    let mut sql = String::from("SELECT ");
    for _ in 0..300 {
        sql.push('(');
    }
    sql.push('1');
    for _ in 0..300 {
        sql.push(')');
    }
    let err = sqltext::parse(&sql).unwrap_err();
    assert_matches!(err, ParserError::SemanticShape { .. });
}
