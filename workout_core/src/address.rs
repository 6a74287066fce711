//! Positional addressing for exercises and their containers.
//!
//! An exercise is never identified by a stored id. Its coordinate is derived
//! from where it sits in the tree and is recomputed for every render and
//! operation:
//! - `Coordinate::BlockLevel` for an exercise in a block's loose list
//! - `Coordinate::InSuperset` for an exercise inside one of the block's supersets
//!
//! The rendering layer works with string drag ids. [`DropTarget`] implements
//! `Display` to produce them and [`DropTarget::parse`] to read them back:
//!
//! | id                    | meaning                          |
//! |-----------------------|----------------------------------|
//! | `{b}-{s}-{e}`         | exercise `e` of superset `s`     |
//! | `{b}-block-{e}`       | loose exercise `e` of block `b`  |
//! | `superset-{b}-{s}`    | superset container               |
//! | `block-{b}-exercises` | block's loose-exercise container |
//!
//! Malformed ids parse to `None`; callers treat that as "apply nothing".

use crate::{Exercise, Superset, Workout};
use std::fmt;

/// Which collection of a block an exercise lives in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// The block's loose exercise list
    Loose,
    /// The superset at this index within the block
    Superset(usize),
}

impl Container {
    /// Build from the `superset_index: Option<usize>` form used by the editor API
    pub fn from_superset(superset: Option<usize>) -> Self {
        match superset {
            Some(idx) => Container::Superset(idx),
            None => Container::Loose,
        }
    }
}

/// Location of a single exercise
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coordinate {
    BlockLevel { block: usize, index: usize },
    InSuperset { block: usize, superset: usize, index: usize },
}

impl Coordinate {
    pub fn new(block: usize, container: Container, index: usize) -> Self {
        match container {
            Container::Loose => Coordinate::BlockLevel { block, index },
            Container::Superset(superset) => Coordinate::InSuperset {
                block,
                superset,
                index,
            },
        }
    }

    pub fn block(&self) -> usize {
        match *self {
            Coordinate::BlockLevel { block, .. } | Coordinate::InSuperset { block, .. } => block,
        }
    }

    pub fn container(&self) -> Container {
        match *self {
            Coordinate::BlockLevel { .. } => Container::Loose,
            Coordinate::InSuperset { superset, .. } => Container::Superset(superset),
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            Coordinate::BlockLevel { index, .. } | Coordinate::InSuperset { index, .. } => index,
        }
    }

    /// Parse an exercise drag id; container ids are rejected
    pub fn parse(id: &str) -> Option<Self> {
        match DropTarget::parse(id)? {
            DropTarget::Exercise(coord) => Some(coord),
            _ => None,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::BlockLevel { block, index } => write!(f, "{}-block-{}", block, index),
            Coordinate::InSuperset {
                block,
                superset,
                index,
            } => write!(f, "{}-{}-{}", block, superset, index),
        }
    }
}

/// Where a dragged exercise was dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Onto another exercise: take that exercise's position
    Exercise(Coordinate),
    /// Onto a superset container: append to it
    Superset { block: usize, superset: usize },
    /// Onto a block's loose-exercise zone: append to it
    BlockExercises { block: usize },
}

impl DropTarget {
    pub fn block(&self) -> usize {
        match *self {
            DropTarget::Exercise(coord) => coord.block(),
            DropTarget::Superset { block, .. } | DropTarget::BlockExercises { block } => block,
        }
    }

    pub fn container(&self) -> Container {
        match *self {
            DropTarget::Exercise(coord) => coord.container(),
            DropTarget::Superset { superset, .. } => Container::Superset(superset),
            DropTarget::BlockExercises { .. } => Container::Loose,
        }
    }

    /// Insertion index for exercise targets; `None` means append
    pub fn index(&self) -> Option<usize> {
        match self {
            DropTarget::Exercise(coord) => Some(coord.index()),
            _ => None,
        }
    }

    /// Parse any of the four drag id shapes
    pub fn parse(id: &str) -> Option<Self> {
        fn num(s: &str) -> Option<usize> {
            s.parse().ok()
        }

        let parts: Vec<&str> = id.trim().split('-').collect();

        match parts.as_slice() {
            ["superset", b, s] => Some(DropTarget::Superset {
                block: num(b)?,
                superset: num(s)?,
            }),
            ["block", b, "exercises"] => Some(DropTarget::BlockExercises { block: num(b)? }),
            [b, "block", e] => Some(DropTarget::Exercise(Coordinate::BlockLevel {
                block: num(b)?,
                index: num(e)?,
            })),
            [b, s, e] => Some(DropTarget::Exercise(Coordinate::InSuperset {
                block: num(b)?,
                superset: num(s)?,
                index: num(e)?,
            })),
            _ => None,
        }
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropTarget::Exercise(coord) => write!(f, "{}", coord),
            DropTarget::Superset { block, superset } => write!(f, "superset-{}-{}", block, superset),
            DropTarget::BlockExercises { block } => write!(f, "block-{}-exercises", block),
        }
    }
}

impl From<Coordinate> for DropTarget {
    fn from(coord: Coordinate) -> Self {
        DropTarget::Exercise(coord)
    }
}

/// Parse a drag gesture's source and target ids
///
/// Returns `None` when either id is malformed or the source is not an
/// exercise. A missing target id yields `Some((source, None))`, which the
/// reorder primitive treats as a no-op.
pub fn parse_drag(source_id: &str, target_id: Option<&str>) -> Option<(Coordinate, Option<DropTarget>)> {
    let Some(source) = Coordinate::parse(source_id) else {
        tracing::debug!("Ignoring drag with unrecognized source id {:?}", source_id);
        return None;
    };

    let target = match target_id {
        Some(id) => match DropTarget::parse(id) {
            Some(target) => Some(target),
            None => {
                tracing::debug!("Ignoring drag with unrecognized target id {:?}", id);
                return None;
            }
        },
        None => None,
    };

    Some((source, target))
}

// ============================================================================
// Lookup helpers
// ============================================================================

impl Workout {
    /// The exercise list addressed by `(block, container)`
    pub fn container(&self, block: usize, container: Container) -> Option<&Vec<Exercise>> {
        let block = self.blocks.get(block)?;
        match container {
            Container::Loose => Some(&block.exercises),
            Container::Superset(idx) => block.supersets.get(idx).map(|s| &s.exercises),
        }
    }

    /// Mutable form of [`Workout::container`]
    pub fn container_mut(&mut self, block: usize, container: Container) -> Option<&mut Vec<Exercise>> {
        let block = self.blocks.get_mut(block)?;
        match container {
            Container::Loose => Some(&mut block.exercises),
            Container::Superset(idx) => block.supersets.get_mut(idx).map(|s| &mut s.exercises),
        }
    }

    pub fn superset_mut(&mut self, block: usize, superset: usize) -> Option<&mut Superset> {
        self.blocks.get_mut(block)?.supersets.get_mut(superset)
    }

    /// The exercise at `coord`, if it still exists
    pub fn exercise(&self, coord: Coordinate) -> Option<&Exercise> {
        self.container(coord.block(), coord.container())?.get(coord.index())
    }

    /// Every exercise coordinate in render order
    ///
    /// Per block: loose exercises first, then each superset in order.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        let mut coords = Vec::with_capacity(self.exercise_count());
        for (b, block) in self.blocks.iter().enumerate() {
            for index in 0..block.exercises.len() {
                coords.push(Coordinate::BlockLevel { block: b, index });
            }
            for (s, superset) in block.supersets.iter().enumerate() {
                for index in 0..superset.exercises.len() {
                    coords.push(Coordinate::InSuperset {
                        block: b,
                        superset: s,
                        index,
                    });
                }
            }
        }
        coords
    }
}
