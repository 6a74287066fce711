#![forbid(unsafe_code)]

//! Core document model and structure editor for workouts.
//!
//! This crate provides:
//! - Domain types (workouts, blocks, supersets, exercises)
//! - Positional addressing and drag-id parsing
//! - Pure tree-to-tree edit operations (reorder/move, structure, CRUD)
//! - Serializable commands and a dispatcher
//! - Templates, persistence, edit journal and CSV export

pub mod types;
pub mod error;
pub mod address;
pub mod reorder;
pub mod structure;
pub mod editor;
pub mod command;
pub mod templates;
pub mod config;
pub mod logging;
pub mod store;
pub mod journal;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use address::{parse_drag, Container, Coordinate, DropTarget};
pub use reorder::reorder_or_move;
pub use structure::set_structure_type;
pub use editor::{
    add_block, add_exercise, add_exercise_with, add_superset, delete_block, delete_exercise,
    delete_superset, set_superset_rest, update_block, update_exercise, BlockPatch,
    ExerciseDefaults, ExercisePatch,
};
pub use command::{apply, apply_with, Command};
pub use templates::{template, template_names};
pub use config::Config;
pub use journal::{read_entries, EditSink, JournalEntry, JsonlJournal};
pub use export::export_csv;
