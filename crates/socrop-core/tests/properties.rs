//! Property tests for the editor store and its history.

use kurbo::Point;
use proptest::prelude::*;
use socrop_core::{
    AdjustmentKey, AdjustmentPolicy, DEFAULT_HISTORY_LIMIT, EditorState, EditorStateStore,
    SerializableColor, StoreConfig, StrokeBuilder, TextOverlay, TextOverlayPatch,
};

#[derive(Debug, Clone)]
enum Op {
    SetAdjustment(AdjustmentKey, i32),
    ResetAdjustment(AdjustmentKey),
    ResetAll,
    Rotate,
    RotateBy(i32),
    FlipH,
    FlipV,
    AddText(String),
    ClearPaths,
    Intensity(i32),
}

fn key() -> impl Strategy<Value = AdjustmentKey> {
    prop::sample::select(AdjustmentKey::ALL.to_vec())
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (key(), -300i32..300).prop_map(|(k, v)| Op::SetAdjustment(k, v)),
        key().prop_map(Op::ResetAdjustment),
        Just(Op::ResetAll),
        Just(Op::Rotate),
        (-720i32..720).prop_map(Op::RotateBy),
        Just(Op::FlipH),
        Just(Op::FlipV),
        "[a-z]{1,8}".prop_map(Op::AddText),
        Just(Op::ClearPaths),
        (-50i32..150).prop_map(Op::Intensity),
    ]
}

fn apply(store: &mut EditorStateStore, op: &Op) {
    match op {
        Op::SetAdjustment(k, v) => store.set_adjustment(*k, *v),
        Op::ResetAdjustment(k) => store.reset_adjustment(*k),
        Op::ResetAll => store.reset_all_adjustments(),
        Op::Rotate => store.rotate(),
        Op::RotateBy(d) => store.rotate_by(*d),
        Op::FlipH => store.flip_horizontal(),
        Op::FlipV => store.flip_vertical(),
        Op::AddText(t) => store.add_text_overlay(TextOverlay::new(t.clone())),
        Op::ClearPaths => store.clear_draw_paths(),
        Op::Intensity(v) => store.set_filter_intensity(*v),
    }
}

fn loaded_store(config: StoreConfig) -> EditorStateStore {
    let mut store = EditorStateStore::with_config(config);
    store.set_image_uri(Some("file:///photo.jpg".into()));
    store
}

proptest! {
    #[test]
    fn clamp_policy_keeps_every_key_in_range(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = loaded_store(StoreConfig {
            adjustment_policy: AdjustmentPolicy::Clamp,
            ..StoreConfig::default()
        });
        for op in &ops {
            apply(&mut store, op);
            prop_assert!(store.state().adjustments.out_of_range().is_empty());
            prop_assert!((0..=100).contains(&store.state().filter_intensity));
        }
    }

    #[test]
    fn resets_always_land_on_zero(ops in prop::collection::vec(op(), 0..20), k in key()) {
        let mut store = loaded_store(StoreConfig::default());
        for op in &ops {
            apply(&mut store, op);
        }
        store.reset_adjustment(k);
        prop_assert_eq!(store.state().adjustments.get(k), 0);
        store.reset_all_adjustments();
        prop_assert!(store.state().adjustments.is_neutral());
        prop_assert_eq!(store.state().filter_intensity, 100);
        prop_assert!(store.state().active_filter.is_none());
    }

    #[test]
    fn history_never_exceeds_limit(commits in 1usize..200, limit in 1usize..100) {
        let mut store = loaded_store(StoreConfig {
            history_limit: limit,
            ..StoreConfig::default()
        });
        for _ in 0..commits {
            store.rotate_by(1);
            store.commit_to_history();
            prop_assert!(store.history_status().len <= limit);
        }
        let status = store.history_status();
        prop_assert_eq!(status.len, (commits + 1).min(limit));
        prop_assert_eq!(status.position, status.len - 1);
    }

    #[test]
    fn undo_then_redo_restores_every_snapshot(ops in prop::collection::vec(op(), 1..30)) {
        let mut store = loaded_store(StoreConfig::default());
        let mut snapshots = vec![store.snapshot()];
        for op in &ops {
            apply(&mut store, op);
            store.commit_to_history();
            snapshots.push(store.snapshot());
        }

        for expected in snapshots.iter().rev().skip(1) {
            prop_assert!(store.undo());
            prop_assert_eq!(store.state(), expected);
        }
        prop_assert!(!store.can_undo());

        for expected in snapshots.iter().skip(1) {
            prop_assert!(store.redo());
            prop_assert_eq!(store.state(), expected);
        }
        prop_assert!(!store.can_redo());
    }

    #[test]
    fn state_matches_history_after_commit_undo_redo(ops in prop::collection::vec(op(), 1..30), undos in 0usize..10) {
        let mut store = loaded_store(StoreConfig::default());
        for op in &ops {
            apply(&mut store, op);
            store.commit_to_history();
            prop_assert_eq!(store.state(), store.history().current());
        }
        for _ in 0..undos {
            store.undo();
            prop_assert_eq!(store.state(), store.history().current());
        }
        store.redo();
        prop_assert_eq!(store.state(), store.history().current());
    }

    #[test]
    fn commit_after_undo_drops_redo_branch(
        ops in prop::collection::vec(op(), 2..20),
        undos in 1usize..10,
        branch in op(),
    ) {
        let mut store = loaded_store(StoreConfig::default());
        for op in &ops {
            apply(&mut store, op);
            store.commit_to_history();
        }
        for _ in 0..undos {
            store.undo();
        }
        let position = store.history_status().position;
        apply(&mut store, &branch);
        store.commit_to_history();

        let status = store.history_status();
        prop_assert!(!status.can_redo);
        prop_assert_eq!(status.len, position + 2);
    }

    #[test]
    fn new_image_isolates_session(ops in prop::collection::vec(op(), 0..30), uri in "[a-z]{1,12}") {
        let mut store = loaded_store(StoreConfig::default());
        for op in &ops {
            apply(&mut store, op);
            store.commit_to_history();
        }
        store.set_image_uri(Some(uri.clone()));
        prop_assert_eq!(store.state(), &EditorState::with_image(Some(uri)));
        prop_assert!(!store.can_undo());
        prop_assert!(!store.can_redo());
        prop_assert_eq!(store.history_status().len, 1);
    }

    #[test]
    fn unknown_overlay_ids_change_nothing(texts in prop::collection::vec("[a-z]{1,8}", 0..5)) {
        let mut store = loaded_store(StoreConfig::default());
        for text in &texts {
            store.add_text_overlay(TextOverlay::new(text.clone()));
        }
        let before = store.snapshot();
        let stranger = uuid::Uuid::new_v4();
        let patch = TextOverlayPatch {
            text: Some("intruder".into()),
            opacity: Some(0.1),
            ..Default::default()
        };
        prop_assert!(!store.update_text_overlay(stranger, &patch));
        prop_assert!(!store.remove_text_overlay(stranger));
        prop_assert_eq!(store.state(), &before);
    }

    #[test]
    fn rotate_keeps_sign_and_settles(start in prop::num::i32::ANY) {
        let mut store = loaded_store(StoreConfig::default());
        store.rotate_by(start);
        store.rotate();
        let once = store.state().rotation;
        prop_assert_eq!(once, (start % 360 + 90) % 360);
        prop_assert!(once > -360 && once < 360);
        if start >= 0 {
            prop_assert!(once >= 0);
        }
        for _ in 0..4 {
            store.rotate();
        }
        prop_assert_eq!(store.state().rotation, once.rem_euclid(360));
    }

    #[test]
    fn strokes_need_two_points(points in prop::collection::vec((0.0f64..1.0, 0.0f64..1.0), 0..6)) {
        let mut store = loaded_store(StoreConfig::default());
        let mut stroke = StrokeBuilder::new(SerializableColor::white(), 4.0);
        for (x, y) in &points {
            stroke.push(Point::new(*x, *y));
        }
        if let Ok(path) = stroke.finish() {
            store.add_draw_path(path);
        }
        prop_assert_eq!(store.state().draw_paths.len(), usize::from(points.len() >= 2));
        prop_assert!(store.state().draw_paths.iter().all(|p| p.points().len() >= 2));
    }
}

#[test]
fn eighty_first_commit_evicts_the_oldest_state() {
    let mut store = loaded_store(StoreConfig::default());
    let initial = store.snapshot();
    for i in 1..=DEFAULT_HISTORY_LIMIT as i32 {
        store.rotate_by(i);
        store.commit_to_history();
    }
    assert_eq!(store.history_status().len, DEFAULT_HISTORY_LIMIT);
    while store.undo() {}
    assert_ne!(store.state(), &initial);
    assert_eq!(store.state().rotation, 1);
}

#[test]
fn four_quarter_turns_return_home() {
    let mut store = loaded_store(StoreConfig::default());
    for _ in 0..4 {
        store.rotate();
    }
    assert_eq!(store.state().rotation, 0);

    store.rotate_by(350);
    store.rotate();
    assert_eq!(store.state().rotation, 80);
}
