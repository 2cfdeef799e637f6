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

//! This module defines the keyword vocabulary of the tokenizer:
//!
//! 1) `KEYWORD_PHRASES`, the command phrases recognized by the keyword trie.
//!    A phrase may span several words (`"group by"`, `"insert into"`,
//!    `"not materialized"`); the tokenizer folds a matched phrase into a
//!    single command token whose value is the lower-cased canonical form.
//!    This is not a list of *reserved* words: a word that only appears as a
//!    phrase prefix (`"left"`, `"nulls"`) still tokenizes as a plain
//!    identifier when the rest of the phrase does not follow.
//! 2) `OPERATOR_PHRASES`, the word-shaped operators resolved by the operator
//!    reader (`"is not"`, `"not in"`, `"between"`, ...).
//! 3) `TYPE_PHRASES`, SQL type names including the multi-word spellings
//!    (`"timestamp with time zone"`).
//! 4) `SYMBOL_OPERATORS`, the punctuation operators, longest first.
//! 5) `AGGREGATE_ORDER_BY_FUNCTIONS`, the aggregate functions for which an
//!    `ORDER BY` before the closing parenthesis belongs to the call itself.

/// Command phrases recognized by the keyword trie.
///
/// The list should be kept sorted; single-word entries coexist with phrases
/// that extend them (`"union"` / `"union all"`), which the trie reports as
/// partial-or-final matches.
pub const KEYWORD_PHRASES: &[&str] = &[
    "add column",
    "add constraint",
    "alter column",
    "alter sequence",
    "alter table",
    "analyze",
    "array",
    "as",
    "asc",
    "both",
    "cascade",
    "case",
    "cast",
    "check",
    "cluster",
    "create index",
    "create sequence",
    "create table",
    "create temporary sequence",
    "create temporary table",
    "create unique index",
    "cross join",
    "current row",
    "default values",
    "delete",
    "delete from",
    "desc",
    "distinct",
    "distinct on",
    "do nothing",
    "drop column",
    "drop constraint",
    "drop default",
    "drop index",
    "drop not null",
    "drop schema",
    "drop table",
    "else",
    "end",
    "except",
    "except all",
    "explain",
    "fetch",
    "filter",
    "first",
    "following",
    "for",
    "foreign key",
    "from",
    "full join",
    "full outer join",
    "group by",
    "groups",
    "having",
    "if exists",
    "if not exists",
    "index",
    "inner join",
    "insert",
    "insert into",
    "intersect",
    "intersect all",
    "into",
    "join",
    "key share",
    "lateral",
    "leading",
    "left join",
    "left outer join",
    "limit",
    "materialized",
    "merge into",
    "next",
    "no key update",
    "not materialized",
    "nowait",
    "nulls first",
    "nulls last",
    "of",
    "offset",
    "on",
    "only",
    "order by",
    "over",
    "partition by",
    "placing",
    "preceding",
    "primary key",
    "range",
    "recursive",
    "references",
    "reindex",
    "rename column",
    "rename to",
    "restrict",
    "returning",
    "row",
    "rows",
    "schema",
    "select",
    "set",
    "set default",
    "set not null",
    "share",
    "skip locked",
    "table",
    "then",
    "trailing",
    "unbounded following",
    "unbounded preceding",
    "union",
    "union all",
    "unique",
    "update",
    "using",
    "values",
    "verbose",
    "when",
    "when matched",
    "when not matched",
    "where",
    "window",
    "with",
    "with ordinality",
    "with ties",
    "within group",
];

/// Word-shaped operators resolved by the operator reader's own trie.
///
/// The multi-word entries are what make `a NOT IN (...)` and
/// `x IS NOT DISTINCT FROM y` single operator tokens; the reader rewinds to
/// the longest partial-or-final prefix on a failed extension, so
/// `x IS NOT NULL` and `x IS NOT b` both resolve without lookahead in the
/// parser.
pub const OPERATOR_PHRASES: &[&str] = &[
    "and",
    "between",
    "ilike",
    "in",
    "is",
    "is distinct from",
    "is not",
    "is not distinct from",
    "is not null",
    "is null",
    "like",
    "not",
    "not between",
    "not ilike",
    "not in",
    "not like",
    "or",
];

/// Punctuation operators, longest spelling first so that `->>` is not read
/// as `->` followed by `>`.
pub const SYMBOL_OPERATORS: &[&str] = &[
    "->>", "->", "::", "<=", ">=", "<>", "!=", "||", "=", "<", ">", "+", "-", "*", "/", "%",
];

/// SQL type names, single words and multi-word spellings alike. The type
/// reader runs before the function reader so that `numeric(10, 2)` never
/// tokenizes as a function call.
pub const TYPE_PHRASES: &[&str] = &[
    "bigint",
    "bigserial",
    "bit",
    "bit varying",
    "bool",
    "boolean",
    "bytea",
    "char",
    "character",
    "character varying",
    "date",
    "decimal",
    "double precision",
    "float",
    "int",
    "int2",
    "int4",
    "int8",
    "integer",
    "interval",
    "json",
    "jsonb",
    "money",
    "numeric",
    "real",
    "regclass",
    "serial",
    "smallint",
    "text",
    "time",
    "time with time zone",
    "time without time zone",
    "timestamp",
    "timestamp with time zone",
    "timestamp without time zone",
    "timestamptz",
    "uuid",
    "varchar",
    "xml",
];

/// Aggregate functions whose argument list may carry a trailing `ORDER BY`
/// that belongs to the call (`string_agg(name, ',' ORDER BY id)`).
///
/// The list should be kept sorted to allow binary search.
pub const AGGREGATE_ORDER_BY_FUNCTIONS: &[&str] = &[
    "array_agg",
    "json_agg",
    "json_object_agg",
    "jsonb_agg",
    "jsonb_object_agg",
    "string_agg",
    "xmlagg",
];

/// Returns true if `name` (already lower-cased) is an aggregate that accepts
/// an internal `ORDER BY`.
pub fn is_order_by_aggregate(name: &str) -> bool {
    AGGREGATE_ORDER_BY_FUNCTIONS.binary_search(&name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_list_is_sorted() {
        let mut sorted = AGGREGATE_ORDER_BY_FUNCTIONS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, AGGREGATE_ORDER_BY_FUNCTIONS);
    }

    #[test]
    fn finds_order_by_aggregates() {
        assert!(is_order_by_aggregate("string_agg"));
        assert!(is_order_by_aggregate("xmlagg"));
        assert!(!is_order_by_aggregate("count"));
    }
}
