//! Wiring of endpoints, collectors, diff and sink for one run.

use anyhow::Context;
use mongo_cmp_collector::{collect_both, CollectorConfig, CompareError, ProgressSink};
use mongo_cmp_diff::{diff, ReportSink, UnifiedReport};
use mongo_cmp_endpoint::{EndpointClient, MongoEndpoint};

use crate::config::CompareConfig;

/// Collect both endpoints concurrently and merge the snapshots.
pub async fn compare_endpoints<S, D>(
    source: &S,
    destination: &D,
    config: &CollectorConfig,
    progress: &dyn ProgressSink,
) -> Result<UnifiedReport, CompareError>
where
    S: EndpointClient + ?Sized,
    D: EndpointClient + ?Sized,
{
    let snapshots = collect_both(source, destination, config, progress).await?;
    Ok(diff(&snapshots.source, &snapshots.destination))
}

/// Connect to both deployments, compare them and render the report.
pub async fn run_compare(
    config: &CompareConfig,
    progress: &dyn ProgressSink,
    sink: &mut dyn ReportSink,
) -> anyhow::Result<UnifiedReport> {
    let source = MongoEndpoint::connect("source", &config.source_uri, config.endpoint)
        .await
        .context("failed to connect to the source database")?;
    let destination = MongoEndpoint::connect("destination", &config.destination_uri, config.endpoint)
        .await
        .context("failed to connect to the destination database")?;

    let report = compare_endpoints(&source, &destination, &config.collector, progress).await?;

    let summary = report.summary();
    tracing::info!(
        databases = summary.databases,
        collections = summary.collections,
        same = summary.same,
        different = summary.different,
        not_applicable = summary.not_applicable,
        "comparison finished"
    );

    sink.render(&report).context("failed to render report")?;
    Ok(report)
}
