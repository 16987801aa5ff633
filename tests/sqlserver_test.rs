//! SQL Server compilation tests.
//!
//! Covers TOP / ROW_NUMBER pagination, column shorthand expansion and inline
//! rendering for the T-SQL dialect.

use insta::assert_snapshot;
use sqlpress::clause::Condition;
use sqlpress::{compile, CompiledQuery, Dialect, Query, Value};

fn tsql(query: &Query) -> CompiledQuery {
    compile(query, Dialect::TSql).unwrap()
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_limit_uses_top() {
    let q = tsql(&Query::table("table").limit(1));
    assert_snapshot!(q.sql, @"SELECT TOP (@p0) * FROM [table]");
    assert_eq!(q.bindings, vec![Value::Int(1)]);
}

#[test]
fn test_distinct_precedes_top() {
    let q = tsql(&Query::table("table").distinct().limit(1));
    assert_snapshot!(q.sql, @"SELECT DISTINCT TOP (@p0) * FROM [table]");
    assert_eq!(q.bindings, vec![Value::Int(1)]);
}

#[test]
fn test_non_positive_offset_is_ignored() {
    for offset in [0, -1, -100] {
        let q = tsql(&Query::table("users").offset(offset));
        assert_eq!(q.sql, "SELECT * FROM [users]", "offset {}", offset);
        assert!(q.bindings.is_empty());
    }
}

#[test]
fn test_zero_limit_is_ignored() {
    let q = tsql(&Query::table("users").limit(0));
    assert_eq!(q.sql, "SELECT * FROM [users]");
    assert!(q.bindings.is_empty());
}

#[test]
fn test_positive_offset_uses_row_number() {
    for offset in [1_i64, 5, 100, 1_000_000] {
        let q = tsql(&Query::table("users").offset(offset));
        assert_eq!(
            q.sql,
            "SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY (SELECT 0)) AS [row_num] FROM [users]) AS [results_wrapper] WHERE [row_num] >= @p0"
        );
        assert_eq!(q.bindings, vec![Value::Int(offset + 1)]);
    }
}

#[test]
fn test_offset_threshold_inlined() {
    let q = tsql(&Query::table("users").offset(4));
    assert_eq!(
        q.to_string(),
        "SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY (SELECT 0)) AS [row_num] FROM [users]) AS [results_wrapper] WHERE [row_num] >= 5"
    );

    let q = tsql(&Query::table("users").offset(1_000_000));
    assert!(q.to_string().ends_with("WHERE [row_num] >= 1000001"));
}

#[test]
fn test_offset_and_limit() {
    let q = tsql(&Query::table("users").offset(10).limit(5));
    assert_snapshot!(q.sql, @"SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY (SELECT 0)) AS [row_num] FROM [users]) AS [results_wrapper] WHERE [row_num] >= @p0 AND [row_num] < @p1");
    assert_eq!(q.bindings, vec![Value::Int(11), Value::Int(16)]);
}

#[test]
fn test_top_binds_before_filters() {
    let q = tsql(&Query::table("users").where_eq("id", 7).limit(3));
    assert_snapshot!(q.sql, @"SELECT TOP (@p0) * FROM [users] WHERE [id] = @p1");
    assert_eq!(q.bindings, vec![Value::Int(3), Value::Int(7)]);
}

// ============================================================================
// Column shorthand
// ============================================================================

#[test]
fn test_shorthand_with_aliases() {
    let q = tsql(&Query::table("Test").select(&["Test.{ Code as Test, Test1 as FromValue }"]));
    assert_snapshot!(q.sql, @"SELECT [Test].[Code] AS [Test], [Test].[Test1] AS [FromValue] FROM [Test]");
}

#[test]
fn test_shorthand_without_aliases() {
    let q = tsql(&Query::table("Test").select(&["Test.{ Code, Test1 }"]));
    assert_snapshot!(q.sql, @"SELECT [Test].[Code], [Test].[Test1] FROM [Test]");
}

#[test]
fn test_shorthand_mixed_with_plain_columns() {
    let q = tsql(&Query::table("Test").select(&[
        "Test.{\n    AvailDate as Date,\n    Avail as Value\n}",
        "Test.FromValue as FromValue",
        "Test.{ ShouldCompile as ShouldCompile }",
    ]));
    assert_snapshot!(q.sql, @"SELECT [Test].[AvailDate] AS [Date], [Test].[Avail] AS [Value], [Test].[FromValue] AS [FromValue], [Test].[ShouldCompile] AS [ShouldCompile] FROM [Test]");
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_inline_rendering() {
    let q = tsql(&Query::table("users").where_eq("id", 5).limit(1));
    assert_eq!(q.to_string(), "SELECT TOP (1) * FROM [users] WHERE [id] = 5");
}

#[test]
fn test_inline_unicode_string() {
    let q = tsql(&Query::table("users").where_eq("name", "Zoë"));
    assert_eq!(
        q.to_inline_sql(),
        "SELECT * FROM [users] WHERE [name] = N'Zoë'"
    );
}

#[test]
fn test_schema_qualified_table() {
    let q = tsql(&Query::table("dbo.users").select(&["dbo.users.id"]));
    assert_snapshot!(q.sql, @"SELECT [dbo].[users].[id] FROM [dbo].[users]");
}

#[test]
fn test_join_with_aliases() {
    let q = tsql(
        &Query::table("users as u")
            .select(&["u.name", "o.total"])
            .inner_join("orders as o", "u.id", "o.user_id"),
    );
    assert_snapshot!(q.sql, @"SELECT [u].[name], [o].[total] FROM [users] AS [u] INNER JOIN [orders] AS [o] ON [u].[id] = [o].[user_id]");
}

#[test]
fn test_case_insensitive_like_lowers_both_sides() {
    let q = tsql(&Query::table("users").filter(Condition::ilike("name", "%AnN%")));
    assert_snapshot!(q.sql, @"SELECT * FROM [users] WHERE LOWER([name]) LIKE @p0");
    assert_eq!(q.bindings, vec![Value::from("%ann%")]);
}

#[test]
fn test_empty_in_list() {
    let q = tsql(&Query::table("users").filter(Condition::is_in("id", vec![])));
    assert_snapshot!(q.sql, @"SELECT * FROM [users] WHERE 1 = 0");
    assert!(q.bindings.is_empty());

    let q = tsql(&Query::table("users").filter(Condition::is_in("id", vec![]).not()));
    assert_snapshot!(q.sql, @"SELECT * FROM [users] WHERE 1 = 1");
}

#[test]
fn test_derived_table_shares_numbering() {
    let inner = Query::table("users").where_eq("a", 1);
    let q = tsql(&Query::new().from_subquery(inner, "x").where_eq("b", 2));
    assert_snapshot!(q.sql, @"SELECT * FROM (SELECT * FROM [users] WHERE [a] = @p0) AS [x] WHERE [b] = @p1");
    assert_eq!(q.bindings, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_ordered_paged_query_orders_by_ordinal() {
    let q = tsql(&Query::table("users").order_by("name").offset(2).limit(2));
    assert_snapshot!(q.sql, @"SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [name]) AS [row_num] FROM [users]) AS [results_wrapper] WHERE [row_num] >= @p0 AND [row_num] < @p1 ORDER BY [row_num]");
    assert_eq!(q.bindings, vec![Value::Int(3), Value::Int(5)]);
}

// ============================================================================
// Nested window emulation
// ============================================================================

#[test]
fn test_paged_derived_table_has_no_outer_order() {
    let inner = Query::table("users").order_by("name").offset(5);
    let q = tsql(&Query::new().from_subquery(inner, "x"));
    assert_snapshot!(q.sql, @"SELECT * FROM (SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [name]) AS [row_num] FROM [users]) AS [results_wrapper] WHERE [row_num] >= @p0) AS [x]");
    assert_eq!(q.bindings, vec![Value::Int(6)]);
}

#[test]
fn test_paged_cte_has_no_outer_order() {
    let paged = Query::table("users").order_by("name").offset(5);
    let q = tsql(&Query::table("p").with("p", paged));
    assert_snapshot!(q.sql, @"WITH [p] AS (SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [name]) AS [row_num] FROM [users]) AS [results_wrapper] WHERE [row_num] >= @p0) SELECT * FROM [p]");
    assert_eq!(q.bindings, vec![Value::Int(6)]);
}

#[test]
fn test_paged_union_arm_has_no_outer_order() {
    let arm = Query::table("b").order_by("id").offset(2).limit(3);
    let q = tsql(&Query::table("a").union(arm));
    assert_snapshot!(q.sql, @"SELECT * FROM [a] UNION (SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [id]) AS [row_num] FROM [b]) AS [results_wrapper] WHERE [row_num] >= @p0 AND [row_num] < @p1)");
    assert_eq!(q.bindings, vec![Value::Int(3), Value::Int(6)]);

    let q = tsql(
        &Query::table("a")
            .order_by("id")
            .offset(1)
            .union(Query::table("b")),
    );
    assert!(q.sql.starts_with("(SELECT * FROM (SELECT *, ROW_NUMBER()"));
    assert!(!q.sql.contains("ORDER BY [row_num]"));
}

#[test]
fn test_distinct_rows_numbered_after_deduplication() {
    let q = tsql(
        &Query::table("users")
            .select(&["users.city"])
            .distinct()
            .order_by("users.city")
            .offset(10),
    );
    assert_snapshot!(q.sql, @"SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [city]) AS [row_num] FROM (SELECT DISTINCT [users].[city] FROM [users]) AS [distinct_rows]) AS [results_wrapper] WHERE [row_num] >= @p0 ORDER BY [row_num]");
    assert_eq!(q.bindings, vec![Value::Int(11)]);
}

#[test]
fn test_distinct_window_orders_by_select_alias() {
    let q = tsql(
        &Query::table("users as u")
            .select(&["u.city as town"])
            .distinct()
            .order_by_desc("u.city")
            .offset(1)
            .limit(2),
    );
    assert_snapshot!(q.sql, @"SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [town] DESC) AS [row_num] FROM (SELECT DISTINCT [u].[city] AS [town] FROM [users] AS [u]) AS [distinct_rows]) AS [results_wrapper] WHERE [row_num] >= @p0 AND [row_num] < @p1 ORDER BY [row_num]");
    assert_eq!(q.bindings, vec![Value::Int(2), Value::Int(4)]);
}
