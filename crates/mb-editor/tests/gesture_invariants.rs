//! Property tests: invariants that hold after any sequence of board events.

use mb_core::{BoardConfig, Element, ElementId, Marker, Scene, Size};
use mb_editor::{Board, DropEffect, InputEvent, Modifiers, NodeLifecycle, ZoomDirection};
use proptest::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Op {
    Down(usize),
    Move(f64, f64, bool),
    Up(Option<usize>),
    DoubleClick(usize),
    Wheel(f64, bool),
    Zoom(bool),
    Reset,
    Frame(u64),
    Drop(f64, f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..32).prop_map(Op::Down),
        4 => (-200.0..200.0f64, -200.0..200.0f64, any::<bool>())
            .prop_map(|(x, y, pressed)| Op::Move(x, y, pressed)),
        3 => proptest::option::of(0usize..32).prop_map(Op::Up),
        1 => (0usize..32).prop_map(Op::DoubleClick),
        1 => (-300.0..300.0f64, any::<bool>()).prop_map(|(d, shift)| Op::Wheel(d, shift)),
        1 => any::<bool>().prop_map(Op::Zoom),
        1 => Just(Op::Reset),
        1 => (0u64..150).prop_map(Op::Frame),
        1 => (0.0..800.0f64, 0.0..600.0f64).prop_map(|(x, y)| Op::Drop(x, y)),
    ]
}

fn make_board() -> Board {
    let mut scene = Scene::new();
    let canvas = scene.add_element(scene.root(), Element::div()).unwrap();
    let mut board = Board::with_config(scene, BoardConfig::default()).unwrap();
    board.initialize(canvas, Size::new(800.0, 600.0)).unwrap();
    for (x, y) in [(0.0, 0.0), (400.0, 0.0)] {
        board.on_drop(x, y, DropEffect::Move, "<node/>").unwrap();
    }
    board
}

/// The canvas plus every element of every node.
fn pressable(board: &Board) -> Vec<ElementId> {
    let scene = board.scene();
    let mut out = Vec::new();
    let mut pending = scene.children(scene.root());
    while let Some(el) = pending.pop() {
        out.push(el);
        pending.extend(scene.children(el));
    }
    out.sort();
    out
}

fn to_event(op: &Op, targets: &[ElementId], x: f64, y: f64) -> InputEvent {
    let pick = |i: usize| targets[i % targets.len()];
    match *op {
        Op::Down(i) => InputEvent::pointer_down(x, y, pick(i)),
        Op::Move(mx, my, pressed) => InputEvent::pointer_move(mx, my, pressed),
        Op::Up(i) => InputEvent::pointer_up(x, y, i.map(pick)),
        Op::DoubleClick(i) => InputEvent::DoubleClick { target: pick(i) },
        Op::Wheel(delta, shift) => InputEvent::Wheel {
            x,
            y,
            delta_x: 0.0,
            delta_y: delta,
            modifiers: if shift { Modifiers::SHIFT } else { Modifiers::NONE },
        },
        Op::Zoom(zoom_in) => InputEvent::ZoomButton(if zoom_in {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        }),
        Op::Reset => InputEvent::ResetViewButton,
        Op::Frame(ms) => InputEvent::AnimationFrame {
            elapsed: Duration::from_millis(ms),
        },
        Op::Drop(dx, dy) => InputEvent::Drop {
            x: dx,
            y: dy,
            drop_effect: DropEffect::Move,
            payload: "<node/>".into(),
        },
    }
}

proptest! {
    #[test]
    fn gesture_invariants_hold(ops in proptest::collection::vec(op(), 1..60)) {
        let mut board = make_board();
        for op in &ops {
            let targets = pressable(&board);
            board.dispatch(to_event(op, &targets, 100.0, 100.0)).unwrap();

            let mode = board.mode().unwrap();
            let viewport = board.viewport().unwrap();
            prop_assert_eq!(viewport.is_enabled(), !mode.suppresses_pan_zoom(), "mode {}", mode.name());
            prop_assert!((0.4..=1.5).contains(&viewport.scale()));
            prop_assert_eq!(
                board.connections().unwrap().elements_draggable(),
                !mode.is_resizing()
            );

            let active: Vec<ElementId> = targets
                .iter()
                .copied()
                .filter(|el| board.scene().has_marker(*el, Marker::ActiveNode))
                .collect();
            prop_assert!(active.len() <= 1, "active markers on {:?}", active);
            let expected = board
                .nodes()
                .active_node()
                .and_then(|id| board.nodes().node(id))
                .map(|node| node.element);
            prop_assert_eq!(active.first().copied(), expected);
        }
        prop_assert!(board.connections().unwrap().connections().iter().all(|c| c.source != c.target));
    }
}
