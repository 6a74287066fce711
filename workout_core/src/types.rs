//! Core domain types for the workout document.
//!
//! The document is a plain value tree:
//! - `Workout` owns an ordered list of `Block`s
//! - each `Block` owns loose `Exercise`s and an ordered list of `Superset`s
//! - each `Superset` owns its own ordered `Exercise`s
//!
//! Nothing in the tree carries a stored id. Exercises are located by their
//! position (see [`crate::address`]), and every edit produces a fresh clone.

use serde::{Deserialize, Serialize};

/// Rest applied after each exercise/round of a freshly created superset
pub const DEFAULT_SUPERSET_REST_SEC: u32 = 60;

// ============================================================================
// Exercise
// ============================================================================

/// One movement prescription
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    /// Free-form rep range such as "8-12"
    #[serde(default)]
    pub reps_range: Option<String>,
    #[serde(default)]
    pub distance_m: Option<u32>,
    #[serde(default)]
    pub distance_range: Option<String>,
    #[serde(default)]
    pub duration_sec: Option<u32>,
    #[serde(default)]
    pub rest_sec: Option<u32>,
    /// Exercise tag, e.g. "strength", "cardio", "warmup"
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, rename = "followAlongUrl")]
    pub follow_along_url: Option<String>,
}

impl Exercise {
    /// Create an exercise with only a name; every measurement is unset
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Superset
// ============================================================================

/// An ordered exercise group sharing a rest period
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Superset {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub rest_between_sec: Option<u32>,
}

impl Superset {
    /// An empty superset with the default rest period
    pub fn empty() -> Self {
        Self {
            exercises: Vec::new(),
            rest_between_sec: Some(DEFAULT_SUPERSET_REST_SEC),
        }
    }
}

// ============================================================================
// Block and structure
// ============================================================================

/// Block-level execution mode
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StructureType {
    Superset,
    Amrap,
    Emom,
    ForTime,
    Tabata,
    Circuit,
}

impl StructureType {
    /// All structure types in display order
    pub const ALL: [StructureType; 6] = [
        StructureType::Superset,
        StructureType::Amrap,
        StructureType::Emom,
        StructureType::ForTime,
        StructureType::Tabata,
        StructureType::Circuit,
    ];

    /// The serialized name ("for-time", "amrap", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureType::Superset => "superset",
            StructureType::Amrap => "amrap",
            StructureType::Emom => "emom",
            StructureType::ForTime => "for-time",
            StructureType::Tabata => "tabata",
            StructureType::Circuit => "circuit",
        }
    }

    /// Parse a structure name, accepting a few common spellings
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "superset" => Some(StructureType::Superset),
            "amrap" => Some(StructureType::Amrap),
            "emom" => Some(StructureType::Emom),
            "for-time" | "for_time" | "fortime" => Some(StructureType::ForTime),
            "tabata" => Some(StructureType::Tabata),
            "circuit" => Some(StructureType::Circuit),
            _ => None,
        }
    }
}

impl std::fmt::Display for StructureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled phase of the workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Block {
    pub label: String,
    /// Loose exercises, outside any superset
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub supersets: Vec<Superset>,
    #[serde(default)]
    pub structure: Option<StructureType>,
    #[serde(default)]
    pub time_work_sec: Option<u32>,
    /// Block-level rest; distinct from each superset's own rest
    #[serde(default)]
    pub rest_between_sec: Option<u32>,
    #[serde(default)]
    pub rounds: Option<u32>,
    #[serde(default)]
    pub time_cap_sec: Option<u32>,
}

impl Block {
    /// An empty, unstructured block
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Workout
// ============================================================================

/// The whole document; the unit of ownership for a caller
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Workout {
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Workout {
    /// A blank document with no blocks
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            blocks: Vec::new(),
        }
    }

    /// Total number of exercises across all blocks and supersets
    pub fn exercise_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| b.exercises.len() + b.supersets.iter().map(|s| s.exercises.len()).sum::<usize>())
            .sum()
    }
}
