//! Reorder and cross-container move of a single exercise.
//!
//! Given a source coordinate and a drop target, produce the next workout
//! snapshot. Cases are checked in order and the first match wins:
//!
//! 1. **No-op**: no destination, or destination is the source itself
//! 2. **Same container**: stable remove-then-insert within one list
//! 3. **Superset → other superset**: insert at the target exercise's index
//! 4. **Loose ↔ superset**: insert at the target exercise's index
//! 5. **Container drop**: append to the end of the dropped-on list
//!
//! The move is applied to a clone. Any lookup failure (stale drag state,
//! indices that no longer exist) is logged and the input is returned
//! unchanged, so callers never see a partially moved tree.

use crate::address::{Container, Coordinate, DropTarget};
use crate::{Error, Result, Workout};

/// Move the exercise at `source` to `destination` and return the new tree
pub fn reorder_or_move(
    workout: &Workout,
    source: Coordinate,
    destination: Option<DropTarget>,
) -> Workout {
    let Some(destination) = destination else {
        tracing::debug!("Drop without a destination for {}, ignoring", source);
        return workout.clone();
    };

    if destination == DropTarget::Exercise(source) {
        return workout.clone();
    }

    let mut next = workout.clone();
    match apply_move(&mut next, source, destination) {
        Ok(true) => next,
        Ok(false) => workout.clone(),
        Err(e) => {
            tracing::warn!(
                "Discarding move {} -> {}: {}. Keeping previous workout.",
                source,
                destination,
                e
            );
            workout.clone()
        }
    }
}

/// Apply the move in place; `Ok(false)` means nothing changed
fn apply_move(next: &mut Workout, source: Coordinate, destination: DropTarget) -> Result<bool> {
    let block = source.block();
    if destination.block() != block {
        tracing::debug!(
            "Cross-block move {} -> {} is not supported, ignoring",
            source,
            destination
        );
        return Ok(false);
    }

    let from = source.container();
    let to = destination.container();

    // Resolve the destination before touching the source list
    let dest_len = next
        .container(block, to)
        .ok_or_else(|| Error::Address(format!("no container {:?} in block {}", to, block)))?
        .len();

    let src_list = next
        .container_mut(block, from)
        .ok_or_else(|| Error::Address(format!("no container {:?} in block {}", from, block)))?;

    let src_idx = source.index();
    if src_idx >= src_list.len() {
        return Err(Error::Address(format!(
            "source index {} out of range ({} exercises)",
            src_idx,
            src_list.len()
        )));
    }

    if from == to {
        let len = src_list.len();
        let dst_idx = match destination.index() {
            Some(i) if i < len => i,
            Some(i) => {
                return Err(Error::Address(format!(
                    "destination index {} out of range ({} exercises)",
                    i, len
                )))
            }
            // Dropping on the own container moves the exercise to the end
            None => len - 1,
        };

        if dst_idx == src_idx {
            return Ok(false);
        }

        let exercise = src_list.remove(src_idx);
        src_list.insert(dst_idx, exercise);
        tracing::debug!("Reordered {:?} in block {}: {} -> {}", from, block, src_idx, dst_idx);
        return Ok(true);
    }

    if let Some(i) = destination.index() {
        if i >= dest_len {
            return Err(Error::Address(format!(
                "destination index {} out of range ({} exercises)",
                i, dest_len
            )));
        }
    }

    let exercise = src_list.remove(src_idx);
    let dest_list = next
        .container_mut(block, to)
        .ok_or_else(|| Error::Address(format!("no container {:?} in block {}", to, block)))?;

    match destination.index() {
        Some(i) => dest_list.insert(i, exercise),
        None => dest_list.push(exercise),
    }

    tracing::debug!(
        "Moved exercise in block {} from {} to {}",
        block,
        describe(from),
        describe(to)
    );
    Ok(true)
}

fn describe(container: Container) -> String {
    match container {
        Container::Loose => "loose list".to_string(),
        Container::Superset(idx) => format!("superset {}", idx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Block, Exercise, Superset};

    fn names(list: &[Exercise]) -> Vec<&str> {
        list.iter().map(|e| e.name.as_str()).collect()
    }

    fn superset(names: &[&str]) -> Superset {
        Superset {
            exercises: names.iter().map(|n| Exercise::named(*n)).collect(),
            rest_between_sec: Some(60),
        }
    }

    /// Block 0: loose [A, B, C], supersets [[D, E], [F], []]
    /// Block 1: loose [G], supersets [[H]]
    fn create_test_workout() -> Workout {
        let mut main = Block::new("Main");
        main.exercises = vec![
            Exercise::named("A"),
            Exercise::named("B"),
            Exercise::named("C"),
        ];
        main.supersets = vec![superset(&["D", "E"]), superset(&["F"]), superset(&[])];

        let mut finisher = Block::new("Finisher");
        finisher.exercises = vec![Exercise::named("G")];
        finisher.supersets = vec![superset(&["H"])];

        Workout {
            title: "Test".into(),
            source: "unit".into(),
            blocks: vec![main, finisher],
        }
    }

    fn loose(block: usize, index: usize) -> Coordinate {
        Coordinate::BlockLevel { block, index }
    }

    fn in_ss(block: usize, superset: usize, index: usize) -> Coordinate {
        Coordinate::InSuperset {
            block,
            superset,
            index,
        }
    }

    fn sorted_names(workout: &Workout) -> Vec<String> {
        let mut all: Vec<String> = workout
            .coordinates()
            .into_iter()
            .filter_map(|c| workout.exercise(c).map(|e| e.name.clone()))
            .collect();
        all.sort();
        all
    }

    #[test]
    fn test_same_coordinate_is_noop() {
        let workout = create_test_workout();
        for coord in workout.coordinates() {
            let next = reorder_or_move(&workout, coord, Some(coord.into()));
            assert_eq!(next, workout);
        }
    }

    #[test]
    fn test_missing_destination_is_noop() {
        let workout = create_test_workout();
        let next = reorder_or_move(&workout, loose(0, 1), None);
        assert_eq!(next, workout);
    }

    #[test]
    fn test_reorder_loose_forward_and_back() {
        let workout = create_test_workout();

        let next = reorder_or_move(&workout, loose(0, 0), Some(loose(0, 2).into()));
        assert_eq!(names(&next.blocks[0].exercises), ["B", "C", "A"]);

        let back = reorder_or_move(&next, loose(0, 2), Some(loose(0, 0).into()));
        assert_eq!(names(&back.blocks[0].exercises), ["A", "B", "C"]);
    }

    #[test]
    fn test_reorder_within_superset() {
        let workout = create_test_workout();
        let next = reorder_or_move(&workout, in_ss(0, 0, 1), Some(in_ss(0, 0, 0).into()));
        assert_eq!(names(&next.blocks[0].supersets[0].exercises), ["E", "D"]);
        assert_eq!(next.blocks[0].exercises, workout.blocks[0].exercises);
    }

    #[test]
    fn test_drop_on_own_container_moves_to_end() {
        let workout = create_test_workout();
        let next = reorder_or_move(
            &workout,
            loose(0, 0),
            Some(DropTarget::BlockExercises { block: 0 }),
        );
        assert_eq!(names(&next.blocks[0].exercises), ["B", "C", "A"]);
    }

    #[test]
    fn test_move_between_supersets_at_index() {
        let workout = create_test_workout();
        let next = reorder_or_move(&workout, in_ss(0, 1, 0), Some(in_ss(0, 0, 1).into()));

        assert_eq!(names(&next.blocks[0].supersets[0].exercises), ["D", "F", "E"]);
        assert!(next.blocks[0].supersets[1].exercises.is_empty());
    }

    #[test]
    fn test_drop_on_empty_superset_appends() {
        let workout = create_test_workout();
        let next = reorder_or_move(
            &workout,
            in_ss(0, 0, 0),
            Some(DropTarget::Superset { block: 0, superset: 2 }),
        );

        assert_eq!(names(&next.blocks[0].supersets[0].exercises), ["E"]);
        assert_eq!(names(&next.blocks[0].supersets[2].exercises), ["D"]);
    }

    #[test]
    fn test_loose_to_superset_at_index() {
        let workout = create_test_workout();
        let next = reorder_or_move(&workout, loose(0, 1), Some(in_ss(0, 0, 0).into()));

        assert_eq!(names(&next.blocks[0].exercises), ["A", "C"]);
        assert_eq!(names(&next.blocks[0].supersets[0].exercises), ["B", "D", "E"]);
    }

    #[test]
    fn test_superset_to_loose_container_appends() {
        let workout = create_test_workout();
        let next = reorder_or_move(
            &workout,
            in_ss(0, 0, 1),
            Some(DropTarget::BlockExercises { block: 0 }),
        );

        assert_eq!(names(&next.blocks[0].exercises), ["A", "B", "C", "E"]);
        assert_eq!(names(&next.blocks[0].supersets[0].exercises), ["D"]);
    }

    #[test]
    fn test_superset_to_empty_loose_list() {
        let mut workout = create_test_workout();
        workout.blocks[0].exercises.clear();

        let next = reorder_or_move(
            &workout,
            in_ss(0, 1, 0),
            Some(DropTarget::BlockExercises { block: 0 }),
        );
        assert_eq!(names(&next.blocks[0].exercises), ["F"]);
    }

    #[test]
    fn test_cross_block_move_is_ignored() {
        let workout = create_test_workout();

        let next = reorder_or_move(&workout, loose(0, 0), Some(DropTarget::BlockExercises { block: 1 }));
        assert_eq!(next, workout);

        let next = reorder_or_move(&workout, in_ss(1, 0, 0), Some(in_ss(0, 0, 0).into()));
        assert_eq!(next, workout);
    }

    #[test]
    fn test_stale_coordinates_leave_tree_unchanged() {
        crate::logging::init_test();
        let workout = create_test_workout();

        // Source index past the end
        let next = reorder_or_move(&workout, loose(0, 7), Some(loose(0, 0).into()));
        assert_eq!(next, workout);

        // Superset that no longer exists
        let next = reorder_or_move(
            &workout,
            loose(0, 0),
            Some(DropTarget::Superset { block: 0, superset: 9 }),
        );
        assert_eq!(next, workout);

        // Destination exercise past the end of another container
        let next = reorder_or_move(&workout, loose(0, 0), Some(in_ss(0, 1, 5).into()));
        assert_eq!(next, workout);

        // Block that no longer exists
        let next = reorder_or_move(&workout, loose(4, 0), Some(loose(4, 1).into()));
        assert_eq!(next, workout);
    }

    #[test]
    fn test_previous_snapshot_is_untouched() {
        let workout = create_test_workout();
        let before = workout.clone();

        let _ = reorder_or_move(&workout, loose(0, 0), Some(in_ss(0, 0, 0).into()));
        let _ = reorder_or_move(&workout, in_ss(0, 0, 0), Some(DropTarget::Superset { block: 0, superset: 2 }));

        assert_eq!(workout, before);
    }

    #[test]
    fn test_moves_conserve_exercises() {
        let mut workout = create_test_workout();
        let expected = sorted_names(&workout);
        let count = workout.exercise_count();

        let targets = |w: &Workout| -> Vec<DropTarget> {
            let mut t: Vec<DropTarget> = w.coordinates().into_iter().map(DropTarget::from).collect();
            for (b, block) in w.blocks.iter().enumerate() {
                t.push(DropTarget::BlockExercises { block: b });
                for s in 0..block.supersets.len() {
                    t.push(DropTarget::Superset { block: b, superset: s });
                }
            }
            t
        };

        // Deterministic walk over many source/target pairings
        for step in 0..200usize {
            let coords = workout.coordinates();
            let drops = targets(&workout);
            let source = coords[(step * 7) % coords.len()];
            let target = drops[(step * 13 + 3) % drops.len()];

            workout = reorder_or_move(&workout, source, Some(target));

            assert_eq!(workout.exercise_count(), count);
            assert_eq!(sorted_names(&workout), expected);
        }
    }
}
