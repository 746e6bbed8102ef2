//! CSV rendering of the group table and the final table.

use crate::logic::final_ranking::FinalStatsRow;
use crate::logic::standings::StandingsRow;
use serde::Serialize;
use std::io;

fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(io::Error::new(e.error().kind(), e.error().to_string())))?;
    String::from_utf8(bytes).map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Group table with a header row (name, team, played, ..., points, qualifies).
pub fn standings_csv(rows: &[StandingsRow]) -> Result<String, csv::Error> {
    to_csv(rows)
}

/// Final table with a header row (rank, name, team, played, won, ...).
/// Unresolved placements have empty name and team cells.
pub fn final_stats_csv(rows: &[FinalStatsRow]) -> Result<String, csv::Error> {
    to_csv(rows)
}
