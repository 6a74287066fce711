//! Structure-type transitions for blocks.
//!
//! Selecting a structure type labels the block and applies that type's
//! timing defaults:
//!
//! | Target   | time_work_sec | block rest | supersets                         |
//! |----------|---------------|------------|-----------------------------------|
//! | superset | unchanged     | unchanged  | always append a new empty one     |
//! | amrap    | 600           | none       | seed one if the block has none    |
//! | emom     | 60            | none       | seed one if the block has none    |
//! | for-time | none          | none       | seed one if the block has none    |
//! | tabata   | 20            | 10         | seed one; first superset rest 10  |
//! | circuit  | none          | 60         | seed one if the block has none    |
//!
//! Clearing the structure only resets `structure` and `time_work_sec`.
//! Existing supersets and exercises are kept.

use crate::{Error, Result, StructureType, Superset, Workout};

/// Timing values a structure type writes onto its block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructureDefaults {
    /// `None` leaves the block's values as they are
    pub timing: Option<BlockTiming>,
    /// Append a superset even when the block already has some
    pub always_add_superset: bool,
    /// Rest forced onto the block's first superset
    pub first_superset_rest_sec: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockTiming {
    pub time_work_sec: Option<u32>,
    pub rest_between_sec: Option<u32>,
}

impl StructureType {
    /// The defaults applied when a block enters this structure
    pub fn defaults(&self) -> StructureDefaults {
        let timing = |time_work_sec: Option<u32>, rest_between_sec: Option<u32>| {
            Some(BlockTiming {
                time_work_sec,
                rest_between_sec,
            })
        };

        match self {
            StructureType::Superset => StructureDefaults {
                timing: None,
                always_add_superset: true,
                first_superset_rest_sec: None,
            },
            StructureType::Amrap => StructureDefaults {
                timing: timing(Some(600), None),
                always_add_superset: false,
                first_superset_rest_sec: None,
            },
            StructureType::Emom => StructureDefaults {
                timing: timing(Some(60), None),
                always_add_superset: false,
                first_superset_rest_sec: None,
            },
            StructureType::ForTime => StructureDefaults {
                timing: timing(None, None),
                always_add_superset: false,
                first_superset_rest_sec: None,
            },
            StructureType::Tabata => StructureDefaults {
                timing: timing(Some(20), Some(10)),
                always_add_superset: false,
                first_superset_rest_sec: Some(10),
            },
            StructureType::Circuit => StructureDefaults {
                timing: timing(None, Some(60)),
                always_add_superset: false,
                first_superset_rest_sec: None,
            },
        }
    }
}

/// Set or clear a block's structure type
///
/// Returns `Error::Address` if `block_index` does not name a block.
pub fn set_structure_type(
    workout: &Workout,
    block_index: usize,
    structure: Option<StructureType>,
) -> Result<Workout> {
    let mut next = workout.clone();
    let block = next.blocks.get_mut(block_index).ok_or_else(|| {
        Error::Address(format!(
            "block {} does not exist ({} blocks)",
            block_index,
            workout.blocks.len()
        ))
    })?;

    let Some(structure) = structure else {
        block.structure = None;
        block.time_work_sec = None;
        tracing::info!("Cleared structure of block {} ({})", block_index, block.label);
        return Ok(next);
    };

    let defaults = structure.defaults();
    block.structure = Some(structure);

    if let Some(timing) = defaults.timing {
        block.time_work_sec = timing.time_work_sec;
        block.rest_between_sec = timing.rest_between_sec;
    }

    if defaults.always_add_superset || block.supersets.is_empty() {
        block.supersets.push(Superset::empty());
    }

    if let Some(rest) = defaults.first_superset_rest_sec {
        if let Some(first) = block.supersets.first_mut() {
            first.rest_between_sec = Some(rest);
        }
    }

    tracing::info!(
        "Set structure of block {} ({}) to {} with {} superset(s)",
        block_index,
        block.label,
        structure,
        block.supersets.len()
    );
    Ok(next)
}
