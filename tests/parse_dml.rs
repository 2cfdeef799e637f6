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
//! Tests for INSERT, UPDATE, DELETE and MERGE.

use matches::assert_matches;
use pretty_assertions::assert_eq;

use sqltext::ast::*;
use sqltext::test_utils::*;

fn verified_insert(sql: &str) -> InsertQuery {
    match parse_one(sql) {
        Statement::Insert(q) => q,
        other => panic!("expected INSERT, got {other:?}"),
    }
}

fn verified_update(sql: &str) -> UpdateQuery {
    match parse_one(sql) {
        Statement::Update(q) => q,
        other => panic!("expected UPDATE, got {other:?}"),
    }
}

fn verified_delete(sql: &str) -> DeleteQuery {
    match parse_one(sql) {
        Statement::Delete(q) => q,
        other => panic!("expected DELETE, got {other:?}"),
    }
}

#[test]
fn parse_insert_values_returning() {
    let insert = verified_insert("INSERT INTO t(a, b) VALUES (1, 2), (3, 4) RETURNING a");
    assert_eq!(insert.insert.target, TableSource { name: "t".into() });
    assert_eq!(
        insert.insert.columns,
        Some(vec![Ident::new("a"), Ident::new("b")])
    );
    let InsertSource::Values(values) = &insert.source else {
        panic!("expected VALUES");
    };
    assert_eq!(
        values.rows,
        vec![
            vec![number("1"), number("2")],
            vec![number("3"), number("4")],
        ]
    );
    let returning = insert.returning.unwrap();
    assert_eq!(returning.items.len(), 1);
    assert_eq!(returning.items[0].expr, col("a"));
}

#[test]
fn insert_distinguishes_empty_and_absent_column_lists() {
    let insert = verified_insert("INSERT INTO t VALUES (1)");
    assert_eq!(insert.insert.columns, None);

    let insert = verified_insert("INSERT INTO t () VALUES (1)");
    assert_eq!(insert.insert.columns, Some(vec![]));
}

#[test]
fn parse_insert_from_query() {
    let insert = verified_insert("INSERT INTO t SELECT a FROM s");
    assert_matches!(insert.source, InsertSource::Query(_));
}

#[test]
fn parse_insert_default_values() {
    let insert = verified_insert("INSERT INTO t DEFAULT VALUES");
    assert_eq!(insert.source, InsertSource::DefaultValues);
}

#[test]
fn parse_insert_qualified_target() {
    let insert = verified_insert("INSERT INTO public.t VALUES (1)");
    assert_eq!(
        insert.insert.target.name,
        ObjectName(vec![Ident::new("public"), Ident::new("t")])
    );
}

#[test]
fn parse_update_with_from_and_where() {
    let update = verified_update("UPDATE t SET a = 1, b = a + 1 FROM s WHERE t.id = s.id RETURNING *");
    assert_eq!(
        update.update.target.datasource,
        Datasource::Table(TableSource { name: "t".into() })
    );
    assert_eq!(update.set.assignments.len(), 2);
    assert_eq!(
        update.set.assignments[0],
        Assignment {
            target: AssignmentTarget::Column("a".into()),
            value: number("1"),
        }
    );
    assert!(update.from.is_some());
    assert!(update.where_clause.is_some());
    assert_eq!(
        update.returning.unwrap().items[0].expr,
        Expr::Wildcard { qualifier: vec![] }
    );
}

#[test]
fn parse_update_tuple_assignments() {
    let update = verified_update("UPDATE t SET (a, b) = (1, 2), c = 3");
    assert_eq!(
        update.set.assignments[0],
        Assignment {
            target: AssignmentTarget::Tuple(vec!["a".into(), "b".into()]),
            value: Expr::Tuple(vec![number("1"), number("2")]),
        }
    );
    assert_eq!(
        update.set.assignments[1].target,
        AssignmentTarget::Column("c".into())
    );
}

#[test]
fn parse_update_tuple_from_subquery() {
    let update = verified_update("UPDATE t SET (a, b) = (SELECT x, y FROM s)");
    assert_matches!(update.set.assignments[0].value, Expr::InlineQuery(_));
}

#[test]
fn parse_delete_using() {
    let delete = verified_delete("DELETE FROM t USING u, v WHERE t.id = u.id RETURNING t.id");
    assert_eq!(
        delete.delete.target.datasource,
        Datasource::Table(TableSource { name: "t".into() })
    );
    let using = delete.using.unwrap();
    assert_eq!(using.sources.len(), 2);
    assert!(delete.where_clause.is_some());
    assert!(delete.returning.is_some());
}

#[test]
fn parse_bare_delete() {
    let delete = verified_delete("DELETE FROM t");
    assert!(delete.using.is_none());
    assert!(delete.where_clause.is_none());
    assert!(delete.returning.is_none());
}

#[test]
fn parse_with_led_dml() {
    let insert = verified_insert(
        "WITH moved AS (DELETE FROM t RETURNING id) INSERT INTO archive SELECT * FROM moved",
    );
    let with = insert.with.unwrap();
    assert_eq!(with.tables[0].name, Ident::new("moved"));
    assert_matches!(with.tables[0].query.as_ref(), Statement::Delete(_));
    assert_matches!(insert.source, InsertSource::Query(_));

    let update = verified_update("WITH w AS (SELECT 1 AS x) UPDATE t SET a = 2");
    assert!(update.with.is_some());

    let delete = verified_delete("WITH w AS (SELECT 1) DELETE FROM t");
    assert!(delete.with.is_some());
}

#[test]
fn parse_merge() {
    let sql = "MERGE INTO accounts a USING transfers t ON a.id = t.acct \
               WHEN MATCHED AND t.amount = 0 THEN DO NOTHING \
               WHEN MATCHED THEN UPDATE SET balance = a.balance + t.amount \
               WHEN NOT MATCHED THEN INSERT (id, balance) VALUES (t.acct, t.amount)";
    let Statement::Merge(merge) = parse_one(sql) else {
        panic!("expected MERGE");
    };
    assert_eq!(
        merge.target.alias.as_ref().unwrap().table_alias,
        Ident::new("a")
    );
    assert_eq!(
        merge.source.alias.as_ref().unwrap().table_alias,
        Ident::new("t")
    );
    assert_eq!(merge.when_clauses.len(), 3);

    assert!(merge.when_clauses[0].matched);
    assert!(merge.when_clauses[0].condition.is_some());
    assert_eq!(merge.when_clauses[0].action, MergeAction::DoNothing);

    assert!(merge.when_clauses[1].matched);
    assert!(merge.when_clauses[1].condition.is_none());
    assert_matches!(merge.when_clauses[1].action, MergeAction::Update(_));

    assert!(!merge.when_clauses[2].matched);
    match &merge.when_clauses[2].action {
        MergeAction::Insert { columns, source } => {
            assert_eq!(
                columns,
                &Some(vec![Ident::new("id"), Ident::new("balance")])
            );
            assert_matches!(source, InsertSource::Values(_));
        }
        other => panic!("expected INSERT action, got {other:?}"),
    }
}

#[test]
fn merge_requires_a_when_clause() {
    let err = sqltext::parse("MERGE INTO t USING s ON t.id = s.id").unwrap_err();
    assert_matches!(err, sqltext::parser::ParserError::UnexpectedEnd { .. });
}

#[test]
fn parse_merge_delete_action() {
    let sql = "MERGE INTO t USING s ON t.id = s.id WHEN MATCHED THEN DELETE";
    let Statement::Merge(merge) = parse_one(sql) else {
        panic!("expected MERGE");
    };
    assert_eq!(merge.when_clauses[0].action, MergeAction::Delete);
}
