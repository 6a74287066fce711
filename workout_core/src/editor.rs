//! Exercise, superset and block editing operations.
//!
//! Every operation takes the current tree by reference, applies the edit to a
//! clone and returns the clone. The input snapshot is never modified.
//!
//! Indices come from the caller's own rendering of the tree. An index that
//! does not resolve is a contract violation and returns `Error::Address`.

use crate::address::Container;
use crate::{Block, Error, Exercise, Result, Superset, Workout};
use serde::{Deserialize, Serialize};

// ============================================================================
// New-exercise defaults
// ============================================================================

/// Measurements given to a freshly added exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseDefaults {
    #[serde(default = "default_sets")]
    pub sets: u32,
    #[serde(default = "default_reps")]
    pub reps: u32,
    #[serde(default = "default_rest_sec")]
    pub rest_sec: u32,
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,
}

impl Default for ExerciseDefaults {
    fn default() -> Self {
        Self {
            sets: default_sets(),
            reps: default_reps(),
            rest_sec: default_rest_sec(),
            kind: default_kind(),
        }
    }
}

fn default_sets() -> u32 {
    3
}

fn default_reps() -> u32 {
    10
}

fn default_rest_sec() -> u32 {
    60
}

fn default_kind() -> String {
    "strength".into()
}

impl ExerciseDefaults {
    /// Build a new exercise; distance and duration stay unset
    pub fn build(&self, name: impl Into<String>) -> Exercise {
        Exercise {
            name: name.into(),
            sets: Some(self.sets),
            reps: Some(self.reps),
            rest_sec: Some(self.rest_sec),
            kind: Some(self.kind.clone()),
            ..Exercise::default()
        }
    }
}

// ============================================================================
// Patches
// ============================================================================

/// Serde helper for tri-state fields: absent (keep), `null` (clear), value (set)
mod nullable {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Partial update for an exercise
///
/// The outer `Option` says whether the field is part of the update, the
/// inner one is the new value (`None` clears it).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExercisePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub sets: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub reps: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub reps_range: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub distance_m: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub distance_range: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub duration_sec: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub rest_sec: Option<Option<u32>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "nullable",
        rename = "type"
    )]
    pub kind: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "nullable",
        rename = "followAlongUrl"
    )]
    pub follow_along_url: Option<Option<String>>,
}

fn merge<T: Clone>(target: &mut Option<T>, update: &Option<Option<T>>) {
    if let Some(value) = update {
        *target = value.clone();
    }
}

impl ExercisePatch {
    /// Shallow-merge this patch into `exercise`
    ///
    /// Each measurement pair is exclusive: setting `reps` clears `distance_m`
    /// and `reps_range`, setting `reps_range` clears `reps`, and the same
    /// holds for `distance_m` / `distance_range`. Setting both sides of a
    /// pair in one patch is rejected.
    pub fn apply_to(&self, exercise: &mut Exercise) -> Result<()> {
        let sets_reps = matches!(self.reps, Some(Some(_)));
        let sets_reps_range = matches!(self.reps_range, Some(Some(_)));
        let sets_distance = matches!(self.distance_m, Some(Some(_)));
        let sets_distance_range = matches!(self.distance_range, Some(Some(_)));

        if sets_reps && sets_distance {
            return Err(Error::InvalidArgument(
                "an exercise is measured by reps or distance, not both".into(),
            ));
        }
        if sets_reps && sets_reps_range {
            return Err(Error::InvalidArgument(
                "reps and reps_range cannot both be set".into(),
            ));
        }
        if sets_distance && sets_distance_range {
            return Err(Error::InvalidArgument(
                "distance_m and distance_range cannot both be set".into(),
            ));
        }

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::InvalidArgument("exercise name cannot be empty".into()));
            }
            exercise.name = name.clone();
        }

        merge(&mut exercise.sets, &self.sets);
        merge(&mut exercise.reps, &self.reps);
        merge(&mut exercise.reps_range, &self.reps_range);
        merge(&mut exercise.distance_m, &self.distance_m);
        merge(&mut exercise.distance_range, &self.distance_range);
        merge(&mut exercise.duration_sec, &self.duration_sec);
        merge(&mut exercise.rest_sec, &self.rest_sec);
        merge(&mut exercise.kind, &self.kind);
        merge(&mut exercise.notes, &self.notes);
        merge(&mut exercise.follow_along_url, &self.follow_along_url);

        if sets_reps {
            exercise.distance_m = None;
            exercise.reps_range = None;
        }
        if sets_reps_range {
            exercise.reps = None;
        }
        if sets_distance {
            exercise.reps = None;
            exercise.distance_range = None;
        }
        if sets_distance_range {
            exercise.distance_m = None;
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial update for a block's label and timing metadata
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BlockPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub rounds: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub time_cap_sec: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub time_work_sec: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    pub rest_between_sec: Option<Option<u32>>,
}

impl BlockPatch {
    pub fn apply_to(&self, block: &mut Block) {
        if let Some(label) = &self.label {
            block.label = label.clone();
        }
        merge(&mut block.rounds, &self.rounds);
        merge(&mut block.time_cap_sec, &self.time_cap_sec);
        merge(&mut block.time_work_sec, &self.time_work_sec);
        merge(&mut block.rest_between_sec, &self.rest_between_sec);
    }
}

// ============================================================================
// Lookup helpers
// ============================================================================

fn block_mut(workout: &mut Workout, block: usize) -> Result<&mut Block> {
    let count = workout.blocks.len();
    workout
        .blocks
        .get_mut(block)
        .ok_or_else(|| Error::Address(format!("block {} does not exist ({} blocks)", block, count)))
}

fn container_mut(
    workout: &mut Workout,
    block: usize,
    superset: Option<usize>,
) -> Result<&mut Vec<Exercise>> {
    block_mut(workout, block)?;
    let container = Container::from_superset(superset);
    workout.container_mut(block, container).ok_or_else(|| {
        Error::Address(format!("superset {:?} does not exist in block {}", superset, block))
    })
}

fn exercise_out_of_range(index: usize, len: usize) -> Error {
    Error::Address(format!("exercise {} does not exist ({} exercises)", index, len))
}

// ============================================================================
// Exercise operations
// ============================================================================

/// Append a new exercise with the standard defaults
pub fn add_exercise(
    workout: &Workout,
    block: usize,
    superset: Option<usize>,
    name: &str,
) -> Result<Workout> {
    add_exercise_with(workout, block, superset, name, &ExerciseDefaults::default())
}

/// Append a new exercise built from `defaults`
pub fn add_exercise_with(
    workout: &Workout,
    block: usize,
    superset: Option<usize>,
    name: &str,
    defaults: &ExerciseDefaults,
) -> Result<Workout> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("exercise name cannot be empty".into()));
    }

    let mut next = workout.clone();
    container_mut(&mut next, block, superset)?.push(defaults.build(name));

    tracing::debug!("Added {:?} to block {} / superset {:?}", name, block, superset);
    Ok(next)
}

/// Remove the exercise at `index`
pub fn delete_exercise(
    workout: &Workout,
    block: usize,
    superset: Option<usize>,
    index: usize,
) -> Result<Workout> {
    let mut next = workout.clone();
    let list = container_mut(&mut next, block, superset)?;
    if index >= list.len() {
        return Err(exercise_out_of_range(index, list.len()));
    }

    let removed = list.remove(index);
    tracing::debug!("Deleted {:?} from block {} / superset {:?}", removed.name, block, superset);
    Ok(next)
}

/// Merge `patch` into the exercise at `index`
pub fn update_exercise(
    workout: &Workout,
    block: usize,
    superset: Option<usize>,
    index: usize,
    patch: &ExercisePatch,
) -> Result<Workout> {
    let mut next = workout.clone();
    let list = container_mut(&mut next, block, superset)?;
    let len = list.len();
    let exercise = list
        .get_mut(index)
        .ok_or_else(|| exercise_out_of_range(index, len))?;

    patch.apply_to(exercise)?;
    tracing::debug!("Updated {:?} in block {} / superset {:?}", exercise.name, block, superset);
    Ok(next)
}

/// Set a superset's own rest period
pub fn set_superset_rest(
    workout: &Workout,
    block: usize,
    superset: usize,
    seconds: Option<u32>,
) -> Result<Workout> {
    let mut next = workout.clone();
    block_mut(&mut next, block)?;
    let target = next.superset_mut(block, superset).ok_or_else(|| {
        Error::Address(format!("superset {} does not exist in block {}", superset, block))
    })?;

    target.rest_between_sec = seconds;
    Ok(next)
}

// ============================================================================
// Block and superset operations
// ============================================================================

/// Append an empty, unstructured block
pub fn add_block(workout: &Workout, label: &str) -> Workout {
    let mut next = workout.clone();
    next.blocks.push(Block::new(label));
    tracing::debug!("Added block {:?} at {}", label, next.blocks.len() - 1);
    next
}

/// Remove a block together with its supersets and exercises
pub fn delete_block(workout: &Workout, block: usize) -> Result<Workout> {
    let mut next = workout.clone();
    block_mut(&mut next, block)?;
    let removed = next.blocks.remove(block);
    tracing::debug!("Deleted block {} ({:?})", block, removed.label);
    Ok(next)
}

/// Merge `patch` into the block's label and timing
pub fn update_block(workout: &Workout, block: usize, patch: &BlockPatch) -> Result<Workout> {
    let mut next = workout.clone();
    patch.apply_to(block_mut(&mut next, block)?);
    Ok(next)
}

/// Append an empty superset with the default rest
pub fn add_superset(workout: &Workout, block: usize) -> Result<Workout> {
    let mut next = workout.clone();
    block_mut(&mut next, block)?.supersets.push(Superset::empty());
    Ok(next)
}

/// Remove a superset together with its exercises
pub fn delete_superset(workout: &Workout, block: usize, superset: usize) -> Result<Workout> {
    let mut next = workout.clone();
    let target = block_mut(&mut next, block)?;
    if superset >= target.supersets.len() {
        return Err(Error::Address(format!(
            "superset {} does not exist in block {}",
            superset, block
        )));
    }
    target.supersets.remove(superset);
    Ok(next)
}
