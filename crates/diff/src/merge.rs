//! Merging two endpoint snapshots.

use std::collections::HashSet;

use mongo_cmp_collector::{CollectionStat, CollectionStatus, DatabaseSnapshot, EndpointSnapshot};

use crate::relevant::RelevantStats;
use crate::report::{CollectionRow, DatabaseReport, Representation, UnifiedReport, Verdict};

/// Merge source and destination snapshots into a report.
///
/// Databases and collections are ordered source-first, then
/// destination-only names, each in their original order. The result depends
/// only on the inputs, so merging the same pair twice yields identical
/// reports.
pub fn diff(source: &EndpointSnapshot, destination: &EndpointSnapshot) -> UnifiedReport {
    let empty = DatabaseSnapshot::new();
    let databases = ordered_union(
        source.databases.iter().map(String::as_str),
        destination.databases.iter().map(String::as_str),
    )
    .into_iter()
    .map(|name| {
        let source_db = source.database(name).unwrap_or(&empty);
        let destination_db = destination.database(name).unwrap_or(&empty);
        DatabaseReport {
            name: name.to_string(),
            rows: diff_database(source_db, destination_db),
        }
    })
    .collect();

    UnifiedReport { databases }
}

fn diff_database(source: &DatabaseSnapshot, destination: &DatabaseSnapshot) -> Vec<CollectionRow> {
    ordered_union(source.names(), destination.names())
        .into_iter()
        .map(|name| {
            let source_stat = source.get(name);
            let destination_stat = destination.get(name);
            let source_rep = represent(source_stat);
            let destination_rep = represent(destination_stat);
            let verdict = verdict(
                status_of(source_stat),
                status_of(destination_stat),
                &source_rep,
                &destination_rep,
            );
            CollectionRow {
                collection: name.to_string(),
                source: source_rep,
                destination: destination_rep,
                verdict,
            }
        })
        .collect()
}

fn status_of(stat: Option<&CollectionStat>) -> CollectionStatus {
    stat.map_or(CollectionStatus::NotFound, |s| s.status)
}

fn represent(stat: Option<&CollectionStat>) -> Representation {
    let Some(stat) = stat else {
        return Representation::Status(CollectionStatus::NotFound);
    };
    match stat.status {
        CollectionStatus::Succeeded | CollectionStatus::FailedToCountDocuments => {
            Representation::Stats(RelevantStats::extract(stat))
        }
        CollectionStatus::FailedToGetStats
        | CollectionStatus::Skipped
        | CollectionStatus::NotFound => Representation::Status(stat.status),
    }
}

fn verdict(
    source: CollectionStatus,
    destination: CollectionStatus,
    source_rep: &Representation,
    destination_rep: &Representation,
) -> Verdict {
    use CollectionStatus::{NotFound, Succeeded};

    match (source, destination) {
        (NotFound, NotFound) => Verdict::NotApplicable,
        (NotFound, _) | (_, NotFound) => Verdict::Different,
        (Succeeded, Succeeded) if source_rep == destination_rep => Verdict::Same,
        (Succeeded, Succeeded) => Verdict::Different,
        _ => Verdict::NotApplicable,
    }
}

/// Names of `first` in order, then names only in `second`, without duplicates.
fn ordered_union<'a>(
    first: impl IntoIterator<Item = &'a str>,
    second: impl IntoIterator<Item = &'a str>,
) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|name| seen.insert(*name))
        .collect()
}
