//! CSV export of a workout, one row per exercise.

use crate::address::Coordinate;
use crate::{Result, Workout};
use std::io::Write;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    block: usize,
    block_label: &'a str,
    structure: Option<&'static str>,
    container: String,
    drag_id: String,
    name: &'a str,
    sets: Option<u32>,
    reps: Option<u32>,
    reps_range: Option<&'a str>,
    distance_m: Option<u32>,
    distance_range: Option<&'a str>,
    duration_sec: Option<u32>,
    rest_sec: Option<u32>,
    #[serde(rename = "type")]
    kind: Option<&'a str>,
}

/// Write every exercise of `workout` as CSV, in render order
///
/// Returns the number of rows written (excluding the header).
pub fn export_csv<W: Write>(workout: &Workout, writer: W) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    let mut rows = 0;
    for coord in workout.coordinates() {
        let Some(exercise) = workout.exercise(coord) else {
            continue;
        };
        let block = &workout.blocks[coord.block()];

        let container = match coord {
            Coordinate::BlockLevel { .. } => "loose".to_string(),
            Coordinate::InSuperset { superset, .. } => format!("superset {}", superset),
        };

        csv_writer.serialize(CsvRow {
            block: coord.block(),
            block_label: &block.label,
            structure: block.structure.map(|s| s.as_str()),
            container,
            drag_id: coord.to_string(),
            name: &exercise.name,
            sets: exercise.sets,
            reps: exercise.reps,
            reps_range: exercise.reps_range.as_deref(),
            distance_m: exercise.distance_m,
            distance_range: exercise.distance_range.as_deref(),
            duration_sec: exercise.duration_sec,
            rest_sec: exercise.rest_sec,
            kind: exercise.kind.as_deref(),
        })?;
        rows += 1;
    }

    csv_writer.flush()?;
    tracing::debug!("Exported {} exercises of {:?} to CSV", rows, workout.title);
    Ok(rows)
}
