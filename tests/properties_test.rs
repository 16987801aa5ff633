//! Cross-dialect properties of the compiler.
//!
//! These hold for every dialect: placeholders line up with bindings, offsets
//! map monotonically onto thresholds, quoting is idempotent, shorthand is
//! equivalent to the spelled-out columns, raw text survives untouched, and
//! one compiler can be shared between threads.

use sqlpress::clause::{Condition, Operator};
use sqlpress::dialect::PlaceholderStyle;
use sqlpress::render::Renderer;
use sqlpress::{compile, Compiler, Dialect, Query, Value};

fn busy_query() -> Query {
    Query::table("orders as o")
        .select(&["o.id", "o.total"])
        .inner_join("customers as c", "c.id", "o.customer_id")
        .where_eq("o.status", 3)
        .filter(Condition::between("o.total", 10, 500))
        .filter(Condition::is_in("c.region", vec![1.into(), 2.into(), 7.into()]).or())
        .filter(Condition::value("o.placed", Operator::Gte, 20240101))
        .order_by_desc("o.total")
        .offset(40)
        .limit(20)
}

// ============================================================================
// Placeholder / binding alignment
// ============================================================================

#[test]
fn test_placeholders_align_with_bindings() {
    for dialect in Dialect::ALL {
        let q = compile(&busy_query(), dialect).unwrap();
        let profile = dialect.profile();

        match profile.placeholder {
            PlaceholderStyle::Question => {
                assert_eq!(q.sql.matches('?').count(), q.bindings.len(), "{}", dialect);
            }
            PlaceholderStyle::Numbered { .. } | PlaceholderStyle::Dollar => {
                for i in 0..q.bindings.len() {
                    let marker = profile.placeholder(i);
                    let found = q
                        .sql
                        .match_indices(&marker)
                        .any(|(at, _)| {
                            !q.sql[at + marker.len()..].starts_with(|c: char| c.is_ascii_digit())
                        });
                    assert!(found, "{} missing {} in {}", dialect, marker, q.sql);
                }
                let next = profile.placeholder(q.bindings.len());
                assert!(
                    !q.sql.contains(&format!("{} ", next)) && !q.sql.ends_with(&next),
                    "{} has unbound {}",
                    dialect,
                    next
                );
            }
        }
    }
}

#[test]
fn test_binding_order_follows_text() {
    for dialect in Dialect::ALL {
        let q = compile(&busy_query(), dialect).unwrap();
        let inline = q.to_inline_sql();
        let status = inline.find("= 3").unwrap();
        let between = inline.find("BETWEEN 10 AND 500").unwrap();
        let region = inline.find("(1, 2, 7)").unwrap();
        assert!(status < between && between < region, "{}: {}", dialect, inline);
    }
}

// ============================================================================
// Offset monotonicity
// ============================================================================

#[test]
fn test_offset_thresholds_are_monotonic() {
    let mut previous = 0;
    for k in 1..50_i64 {
        let q = compile(&Query::table("users").offset(k), Dialect::TSql).unwrap();
        let Value::Int(threshold) = q.bindings[0] else {
            panic!("threshold should be an integer binding");
        };
        assert_eq!(threshold, k + 1);
        assert!(threshold > previous);
        previous = threshold;

        let q = compile(&Query::table("users").offset(k), Dialect::Postgres).unwrap();
        assert_eq!(q.bindings, vec![Value::Int(k)]);
    }
}

#[test]
fn test_huge_offset_saturates() {
    let q = compile(
        &Query::table("users").offset(i64::MAX).limit(u64::MAX),
        Dialect::TSql,
    )
    .unwrap();
    assert_eq!(q.bindings, vec![Value::Int(i64::MAX), Value::Int(i64::MAX)]);
}

// ============================================================================
// Identifier quoting
// ============================================================================

#[test]
fn test_quoting_is_idempotent() {
    let names = [
        "users",
        "dbo.users",
        "db.dbo.users",
        "users.*",
        "*",
        "odd]name",
        "odd\"name",
        "odd`name",
        "with space",
    ];
    for dialect in Dialect::ALL {
        let renderer = Renderer::new(dialect.profile());
        for name in names {
            let once = renderer.quote(name);
            assert_eq!(renderer.quote(&once), once, "{} / {}", dialect, name);
        }
    }
}

// ============================================================================
// Shorthand equivalence
// ============================================================================

#[test]
fn test_shorthand_matches_explicit_columns() {
    let short = Query::table("T").select(&["T.{ A as X, B, C as Y }"]);
    let long = Query::table("T").select(&["T.A as X", "T.B", "T.C as Y"]);
    for dialect in Dialect::ALL {
        assert_eq!(
            compile(&short, dialect).unwrap().sql,
            compile(&long, dialect).unwrap().sql,
            "{}",
            dialect
        );
    }
}

// ============================================================================
// Raw passthrough
// ============================================================================

#[test]
fn test_raw_text_is_preserved() {
    let raw = "CAST(x AS  varchar(10)) AS \"Weird Name\"";
    for dialect in Dialect::ALL {
        let q = compile(&Query::table("t").select_raw(raw, vec![]), dialect).unwrap();
        assert!(q.sql.contains(raw), "{}: {}", dialect, q.sql);

        let spec = format!("raw:{}", raw);
        let q = compile(&Query::table("t").select(&[spec.as_str()]), dialect).unwrap();
        assert!(q.sql.contains(raw), "{}: {}", dialect, q.sql);
    }
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_compiler_across_threads() {
    let compiler = Compiler::new(Dialect::TSql);
    let expected = compiler.compile(&busy_query()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| compiler.compile(&busy_query()).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_every_dialect_compiles_busy_query() {
    for dialect in Dialect::ALL {
        let q = compile(&busy_query(), dialect).unwrap();
        assert!(!q.sql.is_empty());
        assert_eq!(q.dialect(), dialect);
        assert_eq!(q.named_bindings().len(), q.bindings.len());
    }
}
