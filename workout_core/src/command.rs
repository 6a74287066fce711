//! Serializable edit commands and their dispatcher.
//!
//! Collaborators (the CLI, the edit journal) describe each user action as a
//! [`Command`] and run it through [`apply`]. Moves carry the rendering
//! layer's drag ids; a malformed id is a no-op, never an error.

use crate::address::parse_drag;
use crate::editor::{self, BlockPatch, ExerciseDefaults, ExercisePatch};
use crate::reorder::reorder_or_move;
use crate::structure::set_structure_type;
use crate::{Result, StructureType, Workout};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One user action against a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddBlock {
        label: String,
    },
    DeleteBlock {
        block: usize,
    },
    UpdateBlock {
        block: usize,
        patch: BlockPatch,
    },
    AddSuperset {
        block: usize,
    },
    DeleteSuperset {
        block: usize,
        superset: usize,
    },
    AddExercise {
        block: usize,
        #[serde(default)]
        superset: Option<usize>,
        name: String,
    },
    DeleteExercise {
        block: usize,
        #[serde(default)]
        superset: Option<usize>,
        index: usize,
    },
    UpdateExercise {
        block: usize,
        #[serde(default)]
        superset: Option<usize>,
        index: usize,
        patch: ExercisePatch,
    },
    SetSupersetRest {
        block: usize,
        superset: usize,
        seconds: Option<u32>,
    },
    SetStructure {
        block: usize,
        structure: Option<StructureType>,
    },
    /// Drag `source` (an exercise id) onto `target` (exercise or container id)
    Move {
        source: String,
        #[serde(default)]
        target: Option<String>,
    },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn container(superset: &Option<usize>) -> String {
            match superset {
                Some(s) => format!("superset {}", s),
                None => "loose list".to_string(),
            }
        }

        match self {
            Command::AddBlock { label } => write!(f, "add block {:?}", label),
            Command::DeleteBlock { block } => write!(f, "delete block {}", block),
            Command::UpdateBlock { block, .. } => write!(f, "update block {}", block),
            Command::AddSuperset { block } => write!(f, "add superset to block {}", block),
            Command::DeleteSuperset { block, superset } => {
                write!(f, "delete superset {} of block {}", superset, block)
            }
            Command::AddExercise {
                block,
                superset,
                name,
            } => write!(f, "add {:?} to block {} {}", name, block, container(superset)),
            Command::DeleteExercise {
                block,
                superset,
                index,
            } => write!(f, "delete exercise {} of block {} {}", index, block, container(superset)),
            Command::UpdateExercise {
                block,
                superset,
                index,
                ..
            } => write!(f, "update exercise {} of block {} {}", index, block, container(superset)),
            Command::SetSupersetRest {
                block,
                superset,
                seconds,
            } => write!(
                f,
                "set rest of superset {} in block {} to {:?}",
                superset, block, seconds
            ),
            Command::SetStructure { block, structure } => match structure {
                Some(s) => write!(f, "set structure of block {} to {}", block, s),
                None => write!(f, "clear structure of block {}", block),
            },
            Command::Move { source, target } => match target {
                Some(t) => write!(f, "move {} onto {}", source, t),
                None => write!(f, "move {} (no target)", source),
            },
        }
    }
}

/// Apply `command` using the standard new-exercise defaults
pub fn apply(workout: &Workout, command: &Command) -> Result<Workout> {
    apply_with(workout, command, &ExerciseDefaults::default())
}

/// Apply `command`, building new exercises from `defaults`
pub fn apply_with(
    workout: &Workout,
    command: &Command,
    defaults: &ExerciseDefaults,
) -> Result<Workout> {
    tracing::debug!("Applying: {}", command);

    match command {
        Command::AddBlock { label } => Ok(editor::add_block(workout, label)),
        Command::DeleteBlock { block } => editor::delete_block(workout, *block),
        Command::UpdateBlock { block, patch } => editor::update_block(workout, *block, patch),
        Command::AddSuperset { block } => editor::add_superset(workout, *block),
        Command::DeleteSuperset { block, superset } => {
            editor::delete_superset(workout, *block, *superset)
        }
        Command::AddExercise {
            block,
            superset,
            name,
        } => editor::add_exercise_with(workout, *block, *superset, name, defaults),
        Command::DeleteExercise {
            block,
            superset,
            index,
        } => editor::delete_exercise(workout, *block, *superset, *index),
        Command::UpdateExercise {
            block,
            superset,
            index,
            patch,
        } => editor::update_exercise(workout, *block, *superset, *index, patch),
        Command::SetSupersetRest {
            block,
            superset,
            seconds,
        } => editor::set_superset_rest(workout, *block, *superset, *seconds),
        Command::SetStructure { block, structure } => {
            set_structure_type(workout, *block, *structure)
        }
        Command::Move { source, target } => match parse_drag(source, target.as_deref()) {
            Some((source, target)) => Ok(reorder_or_move(workout, source, target)),
            None => Ok(workout.clone()),
        },
    }
}
