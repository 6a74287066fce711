//! Built-in workout templates.
//!
//! A new document is started from one of these (or from `blank`) and then
//! reshaped with the editor operations.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Cached templates, built once and cloned out on request
static TEMPLATES: Lazy<BTreeMap<&'static str, Workout>> = Lazy::new(build_templates);

/// Names of every built-in template, sorted
pub fn template_names() -> Vec<&'static str> {
    TEMPLATES.keys().copied().collect()
}

/// A fresh copy of the named template
pub fn template(name: &str) -> Option<Workout> {
    TEMPLATES.get(name).cloned()
}

fn exercise(name: &str, sets: u32, reps: u32, rest_sec: u32, kind: &str) -> Exercise {
    Exercise {
        sets: Some(sets),
        reps: Some(reps),
        rest_sec: Some(rest_sec),
        kind: Some(kind.into()),
        ..Exercise::named(name)
    }
}

fn timed(name: &str, duration_sec: u32, kind: &str) -> Exercise {
    Exercise {
        duration_sec: Some(duration_sec),
        kind: Some(kind.into()),
        ..Exercise::named(name)
    }
}

fn build_templates() -> BTreeMap<&'static str, Workout> {
    let mut templates = BTreeMap::new();

    templates.insert("blank", Workout::new("Untitled Workout", "template:blank"));

    // ========================================================================
    // Strength day with two independent supersets
    // ========================================================================

    let warm_up = Block {
        exercises: vec![
            timed("Jumping Jacks", 60, "warmup"),
            Exercise {
                reps: Some(10),
                kind: Some("warmup".into()),
                ..Exercise::named("World's Greatest Stretch")
            },
        ],
        ..Block::new("Warm-Up")
    };

    let main = Block {
        structure: Some(StructureType::Superset),
        supersets: vec![
            Superset {
                exercises: vec![
                    exercise("Back Squat", 4, 6, 0, "strength"),
                    exercise("Box Jump", 4, 5, 0, "power"),
                ],
                rest_between_sec: Some(120),
            },
            Superset {
                exercises: vec![
                    exercise("Romanian Deadlift", 3, 8, 0, "strength"),
                    exercise("Pull-up", 3, 8, 0, "strength"),
                ],
                rest_between_sec: Some(90),
            },
        ],
        ..Block::new("Main Lifts")
    };

    templates.insert(
        "strength_superset",
        Workout {
            title: "Strength Supersets".into(),
            source: "template:strength_superset".into(),
            blocks: vec![warm_up, main],
        },
    );

    // ========================================================================
    // AMRAP conditioning
    // ========================================================================

    let amrap = Block {
        structure: Some(StructureType::Amrap),
        time_work_sec: Some(600),
        supersets: vec![Superset {
            exercises: vec![
                Exercise {
                    distance_m: Some(400),
                    kind: Some("cardio".into()),
                    ..Exercise::named("Run")
                },
                exercise("Kettlebell Swing", 1, 15, 0, "conditioning"),
                exercise("Burpee", 1, 10, 0, "conditioning"),
            ],
            rest_between_sec: None,
        }],
        ..Block::new("AMRAP 10")
    };

    templates.insert(
        "amrap_conditioning",
        Workout {
            title: "10-Minute AMRAP".into(),
            source: "template:amrap_conditioning".into(),
            blocks: vec![amrap],
        },
    );

    // ========================================================================
    // Tabata finisher
    // ========================================================================

    let tabata = Block {
        structure: Some(StructureType::Tabata),
        time_work_sec: Some(20),
        rest_between_sec: Some(10),
        rounds: Some(8),
        supersets: vec![Superset {
            exercises: vec![timed("Air Squat", 20, "conditioning"), timed("Mountain Climber", 20, "conditioning")],
            rest_between_sec: Some(10),
        }],
        ..Block::new("Tabata")
    };

    templates.insert(
        "tabata_finisher",
        Workout {
            title: "Tabata Finisher".into(),
            source: "template:tabata_finisher".into(),
            blocks: vec![tabata],
        },
    );

    templates
}
