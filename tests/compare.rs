//! End-to-end comparison scenarios over in-memory endpoints.

use mongo_cmp::compare_endpoints;
use mongo_cmp_collector::testing::{stats_doc, MemoryEndpoint, RecordingProgress};
use mongo_cmp_collector::{
    CollectionStatus, CollectorConfig, CompareError, DatabaseSelector, NoProgress, Side,
};
use mongo_cmp_diff::{JsonSink, ReportSink, Representation, TableSink, Verdict};
use mongo_cmp_endpoint::EndpointClient;

fn detailed() -> CollectorConfig {
    CollectorConfig::new(DatabaseSelector::All, true)
}

#[tokio::test]
async fn test_destination_only_database_is_reported_not_found_on_source() {
    let source = MemoryEndpoint::new("source")
        .with_collection("db1", "users", stats_doc(100, 4096, 512, 4608), 10)
        .with_collection("db1", "orders", stats_doc(50, 2048, 256, 2304), 5);
    let destination = MemoryEndpoint::new("destination")
        .with_collection("db1", "users", stats_doc(100, 4096, 512, 4608), 10)
        .with_collection("db1", "orders", stats_doc(50, 2048, 256, 2304), 5)
        .with_collection("db2", "logs", stats_doc(10, 10, 10, 20), 1)
        .with_collection("db2", "events", stats_doc(10, 10, 10, 20), 1);

    let report = compare_endpoints(&source, &destination, &detailed(), &NoProgress)
        .await
        .unwrap();

    assert_eq!(report.database_names().collect::<Vec<_>>(), vec!["db1", "db2"]);

    let db1 = report.database("db1").unwrap();
    assert_eq!(db1.rows.len(), 2);
    for row in &db1.rows {
        assert_eq!(row.verdict, Verdict::Same, "row {}", row.collection);
        assert_eq!(row.source, row.destination);
    }

    let db2 = report.database("db2").unwrap();
    assert_eq!(db2.collections().collect::<Vec<_>>(), vec!["logs", "events"]);
    for row in &db2.rows {
        assert_eq!(
            row.source,
            Representation::Status(CollectionStatus::NotFound)
        );
        assert!(matches!(row.destination, Representation::Stats(_)));
        assert_eq!(row.verdict, Verdict::Different);
    }
}

#[tokio::test]
async fn test_source_stats_failure_is_reported_and_not_counted() {
    let source = MemoryEndpoint::new("source")
        .with_collection("db1", "users", stats_doc(100, 4096, 512, 4608), 10)
        .failing_stats("db1", "users");
    let destination = MemoryEndpoint::new("destination").with_collection(
        "db1",
        "users",
        stats_doc(100, 4096, 512, 4608),
        10,
    );

    let report = compare_endpoints(&source, &destination, &detailed(), &NoProgress)
        .await
        .unwrap();

    let row = report.database("db1").unwrap().row("users").unwrap();
    assert_eq!(row.source.to_string(), "failed to get collection stats");
    assert!(matches!(row.destination, Representation::Stats(_)));
    assert_eq!(row.verdict, Verdict::NotApplicable);
    assert_eq!(source.calls().count_documents, 0);
    assert_eq!(destination.calls().count_documents, 1);
}

#[tokio::test]
async fn test_named_database_limits_both_sides() {
    let source = MemoryEndpoint::new("source")
        .with_collection("reports", "daily", stats_doc(1, 1, 1, 2), 1)
        .with_collection("shop", "orders", stats_doc(1, 1, 1, 2), 1)
        .with_collection("audit", "events", stats_doc(1, 1, 1, 2), 1);
    let destination = MemoryEndpoint::new("destination")
        .with_collection("reports", "daily", stats_doc(1, 1, 1, 2), 1)
        .with_collection("billing", "invoices", stats_doc(1, 1, 1, 2), 1);
    let config = CollectorConfig::new(DatabaseSelector::Named("reports".to_string()), true);

    let report = compare_endpoints(&source, &destination, &config, &NoProgress)
        .await
        .unwrap();

    assert_eq!(report.database_names().collect::<Vec<_>>(), vec!["reports"]);
    assert_eq!(source.calls().list_databases, 0);
    assert_eq!(destination.calls().list_databases, 0);
}

#[tokio::test]
async fn test_details_disabled_reports_skipped_without_stats_calls() {
    let source = MemoryEndpoint::new("source")
        .with_collection("db1", "users", stats_doc(1, 1, 1, 2), 1)
        .with_collection("db1", "orders", stats_doc(1, 1, 1, 2), 1);
    let destination = MemoryEndpoint::new("destination")
        .with_collection("db1", "users", stats_doc(1, 1, 1, 2), 1)
        .with_collection("db2", "logs", stats_doc(1, 1, 1, 2), 1);
    let config = CollectorConfig::new(DatabaseSelector::All, false);

    let report = compare_endpoints(&source, &destination, &config, &NoProgress)
        .await
        .unwrap();

    let users = report.database("db1").unwrap().row("users").unwrap();
    assert_eq!(users.source.status_label(), Some("skipped"));
    assert_eq!(users.destination.status_label(), Some("skipped"));

    // Presence differences are still visible without details.
    let orders = report.database("db1").unwrap().row("orders").unwrap();
    assert_eq!(orders.destination.status_label(), Some("not found"));
    assert_eq!(orders.verdict, Verdict::Different);

    for endpoint in [&source, &destination] {
        let calls = endpoint.calls();
        assert_eq!(calls.collection_stats, 0, "{}", endpoint.name());
        assert_eq!(calls.count_documents, 0, "{}", endpoint.name());
    }
}

#[tokio::test]
async fn test_destination_listing_failure_fails_comparison() {
    let source = MemoryEndpoint::new("source").with_collection(
        "db1",
        "users",
        stats_doc(1, 1, 1, 2),
        1,
    );
    let destination = MemoryEndpoint::new("destination").failing_list_databases();

    let err = compare_endpoints(&source, &destination, &detailed(), &NoProgress)
        .await
        .unwrap_err();

    assert_eq!(err.side(), Side::Destination);
    let message = format!("{:#}", anyhow::Error::from(err));
    assert!(message.starts_with("failed to collect stats from the destination database"));
    assert!(message.contains("list databases timed out"));
}

#[tokio::test]
async fn test_source_collection_listing_failure_fails_comparison() {
    let source = MemoryEndpoint::new("source")
        .with_collection("db1", "users", stats_doc(1, 1, 1, 2), 1)
        .failing_list_collections("db1");
    let destination = MemoryEndpoint::new("destination").with_collection(
        "db1",
        "users",
        stats_doc(1, 1, 1, 2),
        1,
    );

    let result = compare_endpoints(&source, &destination, &detailed(), &NoProgress).await;

    assert!(matches!(
        result,
        Err(CompareError::Collect {
            side: Side::Source,
            ..
        })
    ));
}

#[tokio::test]
async fn test_reports_render_in_both_formats() {
    let source = MemoryEndpoint::new("source")
        .with_collection("shop", "orders", stats_doc(100, 200, 30, 230), 7)
        .with_collection("shop", "carts", stats_doc(1, 1, 1, 2), 1)
        .failing_count("shop", "carts");
    let destination = MemoryEndpoint::new("destination")
        .with_collection("shop", "orders", stats_doc(100, 200, 30, 230), 6);
    let progress = RecordingProgress::default();

    let report = compare_endpoints(&source, &destination, &detailed(), &progress)
        .await
        .unwrap();

    let mut table = TableSink::new(Vec::new());
    table.render(&report).unwrap();
    let table = String::from_utf8(table.into_inner()).unwrap();
    assert!(table.contains("Database: shop"));
    assert!(table.contains("\"document_number\": \"failed to count\""));
    assert!(table.contains("\"document_number\": 7"));

    let mut json = JsonSink::new(Vec::new());
    json.render(&report).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json.into_inner()).unwrap();
    let rows = &value["databases"][0]["rows"];
    assert_eq!(rows[0]["verdict"], "different");
    assert_eq!(rows[1]["source"]["document_number"], "failed to count");
    assert_eq!(rows[1]["destination"], "not found");

    assert_eq!(progress.tracker("source: shop").unwrap().position, 2);
    assert_eq!(progress.tracker("destination: shop").unwrap().position, 1);
}
