//! Concurrent two-endpoint collection.

use mongo_cmp_endpoint::EndpointClient;

use crate::collector::StatsCollector;
use crate::config::CollectorConfig;
use crate::error::{CompareError, Side};
use crate::model::EndpointSnapshot;
use crate::progress::ProgressSink;

/// Snapshots of both endpoints of one comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSnapshots {
    pub source: EndpointSnapshot,
    pub destination: EndpointSnapshot,
}

/// Collect source and destination snapshots concurrently.
///
/// Both collectors share only the read-only config and the progress sink.
/// The first fatal failure on either side fails the comparison; the other
/// side's in-flight work is dropped and its result never consumed.
pub async fn collect_both<S, D>(
    source: &S,
    destination: &D,
    config: &CollectorConfig,
    progress: &dyn ProgressSink,
) -> Result<ClusterSnapshots, CompareError>
where
    S: EndpointClient + ?Sized,
    D: EndpointClient + ?Sized,
{
    let source_run = collect_side(source, config, progress, Side::Source);
    let destination_run = collect_side(destination, config, progress, Side::Destination);

    let (source, destination) = tokio::try_join!(source_run, destination_run)?;

    Ok(ClusterSnapshots {
        source,
        destination,
    })
}

async fn collect_side<C: EndpointClient + ?Sized>(
    client: &C,
    config: &CollectorConfig,
    progress: &dyn ProgressSink,
    side: Side,
) -> Result<EndpointSnapshot, CompareError> {
    StatsCollector::new(client, config, progress, side)
        .collect()
        .await
        .map_err(|source| CompareError::Collect { side, source })
}
