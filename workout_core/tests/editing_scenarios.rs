//! End-to-end editing scenarios against the public API.
//!
//! These tests drive the editor the way a UI would: every action takes the
//! current snapshot and the returned tree replaces it.

use workout_core::*;

fn blank_with_block() -> Workout {
    let mut workout = Workout::new("Scenario", "test");
    workout.blocks.push(Block::new("Main"));
    workout
}

#[test]
fn test_push_ups_into_new_superset() {
    let w = blank_with_block();

    let w = add_exercise(&w, 0, None, "Push-ups").unwrap();
    assert_eq!(
        w.blocks[0].exercises,
        vec![Exercise {
            name: "Push-ups".into(),
            sets: Some(3),
            reps: Some(10),
            rest_sec: Some(60),
            kind: Some("strength".into()),
            ..Exercise::default()
        }]
    );

    let w = set_structure_type(&w, 0, Some(StructureType::Superset)).unwrap();
    assert_eq!(w.blocks[0].supersets, vec![Superset::empty()]);
    assert_eq!(w.blocks[0].supersets[0].rest_between_sec, Some(60));
    assert_eq!(w.blocks[0].exercises.len(), 1);
    assert_eq!(w.blocks[0].exercises[0].name, "Push-ups");

    let (source, target) = parse_drag("0-block-0", Some("superset-0-0")).unwrap();
    let w = reorder_or_move(&w, source, target);

    assert!(w.blocks[0].exercises.is_empty());
    assert_eq!(w.blocks[0].supersets[0].exercises.len(), 1);
    assert_eq!(w.blocks[0].supersets[0].exercises[0].name, "Push-ups");
}

#[test]
fn test_snapshots_are_never_altered() {
    let v0 = template("strength_superset").unwrap();
    let v0_copy = v0.clone();

    let v1 = set_structure_type(&v0, 1, Some(StructureType::Tabata)).unwrap();
    let v2 = reorder_or_move(
        &v1,
        Coordinate::InSuperset {
            block: 1,
            superset: 1,
            index: 0,
        },
        Some(DropTarget::Superset {
            block: 1,
            superset: 0,
        }),
    );
    let v3 = update_exercise(
        &v2,
        1,
        Some(0),
        0,
        &ExercisePatch {
            distance_m: Some(Some(200)),
            ..Default::default()
        },
    )
    .unwrap();
    let v4 = delete_block(&v3, 0).unwrap();

    assert_eq!(v0, v0_copy);
    assert_ne!(v1, v0);
    assert_eq!(v2.blocks[1].supersets[0].exercises.len(), 3);
    assert_eq!(v3.blocks[1].supersets[0].exercises[0].reps, None);
    assert_eq!(v4.blocks.len(), 1);
    // Earlier snapshots still hold their own content
    assert_eq!(v3.blocks.len(), 2);
    assert_eq!(v2.blocks[1].supersets[0].exercises[0].reps, Some(6));
}

#[test]
fn test_amrap_then_clear_keeps_exercises() {
    let w = blank_with_block();
    let w = set_structure_type(&w, 0, Some(StructureType::Amrap)).unwrap();
    let w = add_exercise(&w, 0, Some(0), "Wall Ball").unwrap();
    let w = add_exercise(&w, 0, Some(0), "Row").unwrap();
    assert_eq!(w.blocks[0].time_work_sec, Some(600));

    let cleared = set_structure_type(&w, 0, None).unwrap();
    assert_eq!(cleared.blocks[0].structure, None);
    assert_eq!(cleared.blocks[0].time_work_sec, None);
    assert_eq!(cleared.blocks[0].supersets, w.blocks[0].supersets);
}

#[test]
fn test_reps_distance_exclusion_through_commands() {
    let w = blank_with_block();
    let w = apply(
        &w,
        &Command::AddExercise {
            block: 0,
            superset: None,
            name: "Sled Push".into(),
        },
    )
    .unwrap();

    let to_distance: Command = serde_json::from_str(
        r#"{ "op": "update_exercise", "block": 0, "index": 0, "patch": { "distance_m": 400 } }"#,
    )
    .unwrap();
    let w = apply(&w, &to_distance).unwrap();
    assert_eq!(w.blocks[0].exercises[0].distance_m, Some(400));
    assert_eq!(w.blocks[0].exercises[0].reps, None);

    let to_reps: Command = serde_json::from_str(
        r#"{ "op": "update_exercise", "block": 0, "index": 0, "patch": { "reps": 12 } }"#,
    )
    .unwrap();
    let w = apply(&w, &to_reps).unwrap();
    assert_eq!(w.blocks[0].exercises[0].reps, Some(12));
    assert_eq!(w.blocks[0].exercises[0].distance_m, None);
    // Untouched fields survive both updates
    assert_eq!(w.blocks[0].exercises[0].sets, Some(3));
}

#[test]
fn test_stale_drag_after_delete_is_noop() {
    let w = template("amrap_conditioning").unwrap();

    // The UI rendered ids, then the last exercise was deleted elsewhere
    let stale_source = Coordinate::InSuperset {
        block: 0,
        superset: 0,
        index: 2,
    };
    let w = delete_exercise(&w, 0, Some(0), 2).unwrap();

    let next = reorder_or_move(&w, stale_source, Some(DropTarget::BlockExercises { block: 0 }));
    assert_eq!(next, w);
}
