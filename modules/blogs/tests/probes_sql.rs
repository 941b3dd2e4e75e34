#![allow(clippy::unwrap_used, clippy::expect_used)]

//! SQL emitted by SeaORM for each probe, captured from a live database.

mod support;

use std::sync::Arc;

use blogs::probes::{PredicateFamily, default_probes, run_probe, run_probes};
use sql_capture::{CaptureContext, SqlCaptureLayer, TraceFile};
use support::{inmem_db_with_trace, seeded_db, service};
use tracing_subscriber::layer::SubscriberExt;

#[tokio::test]
async fn probes_translate_to_expected_predicates() {
    let (db, _) = seeded_db().await;

    let report = CaptureContext::new()
        .scope(run_probes(&db, &default_probes(), "Name"))
        .await
        .unwrap();

    let own_columns = report.get("title_or_subtitle_contains").unwrap();
    assert_eq!(own_columns.observed, PredicateFamily::Like);
    assert!(own_columns.sql.contains("LIKE"));
    assert!(own_columns.sql.contains("%Name%"), "{}", own_columns.sql);
    assert!(own_columns.rows.is_empty());

    let joined = report.get("blog_name_contains").unwrap();
    assert_eq!(joined.observed, PredicateFamily::Like);
    assert_eq!(joined.rows.len(), 1);
    assert_eq!(
        joined.rows[0].blog.as_ref().and_then(|b| b.name.as_deref()),
        Some("BlogName")
    );

    let equality = report.get("blog_name_equals").unwrap();
    assert_eq!(equality.observed, PredicateFamily::Equality);
    assert!(!equality.sql.contains("LIKE"), "{}", equality.sql);
    assert!(equality.rows.is_empty());

    let combined = report.get("any_contains").unwrap();
    assert_eq!(combined.observed, PredicateFamily::Like);
    assert_eq!(combined.rows.len(), 1);

    assert!(report.all_satisfied());
    assert!(report.outcomes.iter().all(|o| o.summary() == "Sql ok"));
}

#[tokio::test]
async fn outcome_holds_only_its_own_statement() {
    let (db, _) = seeded_db().await;
    let probes = default_probes();

    let ctx = CaptureContext::new();
    let outcome = ctx
        .clone()
        .scope(async {
            service(&db)
                .seed(&blogs::SeedConfig::default())
                .await
                .unwrap();
            run_probe(&db, &probes[1], "Name").await.unwrap()
        })
        .await;

    assert_eq!(outcome.sql.matches("SELECT").count(), 1, "{}", outcome.sql);
    assert_eq!(ctx.commands().len(), 1);
    assert!(!ctx.commands()[0].failed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_contexts_do_not_leak() {
    let (db, _) = seeded_db().await;
    let probes = default_probes();
    let like = probes[0];
    let equality = probes[2];

    let like_db = db.clone();
    let like_task = tokio::spawn(
        CaptureContext::new().scope(async move { run_probe(&like_db, &like, "Name").await }),
    );
    let eq_db = db.clone();
    let eq_task = tokio::spawn(
        CaptureContext::new().scope(async move { run_probe(&eq_db, &equality, "Name").await }),
    );

    let like_outcome = like_task.await.unwrap().unwrap();
    let eq_outcome = eq_task.await.unwrap().unwrap();

    assert_eq!(like_outcome.observed, PredicateFamily::Like);
    assert_eq!(eq_outcome.observed, PredicateFamily::Equality);
    assert!(!eq_outcome.sql.contains("LIKE"));
    assert_eq!(like_outcome.sql.matches("SELECT").count(), 1);
}

#[tokio::test]
async fn trace_file_receives_captured_sql() {
    let dir = tempfile::tempdir().unwrap();
    let trace = Arc::new(TraceFile::open(dir.path().join("sql.txt")).unwrap());
    let db = inmem_db_with_trace(Some(Arc::clone(&trace))).await;
    let probes = default_probes();

    CaptureContext::new()
        .scope(run_probe(&db, &probes[0], "Name"))
        .await
        .unwrap();

    let content = std::fs::read_to_string(trace.path()).unwrap();
    assert!(content.contains("?1: %Name%"), "{content}");
    assert!(content.contains("LIKE"), "{content}");
    assert_eq!(trace.failed_writes(), 0);
}

#[tokio::test]
async fn probe_log_lines_are_captured_by_layer() {
    let subscriber = tracing_subscriber::registry().with(SqlCaptureLayer::new());
    let _guard = tracing::subscriber::set_default(subscriber);

    let (db, _) = seeded_db().await;
    let probes = default_probes();

    let ctx = CaptureContext::new();
    ctx.clone()
        .scope(run_probe(&db, &probes[2], "Name"))
        .await
        .unwrap();

    let log = ctx.log();
    assert!(log.contains("probe executed"), "{log}");
    assert!(log.contains("observed=equality"), "{log}");
    assert!(
        log.contains("description=joined blog name equals the search term"),
        "{log}"
    );
}
