//! Tests for panel lifecycle and tree surgery through DockState

mod common;

use common::{container, group_of, position_of, root, state_with, tab_ids};
use dockspace::model::{
    DockError, DockPosition, DockState, Edge, LayoutNode, Panel, PanelAction, PanelFlags,
    PanelId, PanelState, Rect, Size, SplitDirection,
};
use dockspace::view::{group_frames, DropTarget};

fn id(s: &str) -> PanelId {
    PanelId::new(s)
}

// ============================================================================
// Docking
// ============================================================================

#[test]
fn test_dock_into_empty_left_creates_single_group() {
    let mut state = DockState::default();
    state
        .add_panel(Panel::new("a", "A"), DockPosition::Left)
        .unwrap();

    match root(&state, DockPosition::Left) {
        LayoutNode::Group(group) => {
            assert_eq!(group.panels.len(), 1);
            assert_eq!(group.active_index, 0);
            assert_eq!(group.position, DockPosition::Left);
        }
        other => panic!("expected a group, got {:?}", other),
    }
    assert_eq!(state.active_panel(), Some(&id("a")));
    assert!(state.layout().validate().is_ok());
}

#[test]
fn test_second_panel_joins_existing_group_as_active_tab() {
    let state = state_with(&[("a", DockPosition::Left), ("b", DockPosition::Left)]);

    let g = group_of(&state, "a");
    assert_eq!(group_of(&state, "b"), g);
    assert_eq!(tab_ids(&state, g), vec!["a", "b"]);
    assert_eq!(state.layout().group(g).unwrap().active_index, 1);
}

#[test]
fn test_redundant_dock_only_activates() {
    let mut state = state_with(&[("a", DockPosition::Left), ("b", DockPosition::Left)]);
    let g = group_of(&state, "a");
    let before = state.layout().clone();

    let returned = state.dock_panel(&id("a"), DockPosition::Left).unwrap();

    assert_eq!(returned, g);
    assert_eq!(tab_ids(&state, g), vec!["a", "b"]);
    assert_eq!(state.layout().group(g).unwrap().active_index, 0);
    assert_eq!(state.layout().left.root.groups().len(), 1);
    assert_eq!(before.panel_ids(), state.layout().panel_ids());

    // Docking again where it already lives leaves the tree identical
    let before_second = state.layout().clone();
    state.dock_panel(&id("a"), DockPosition::Left).unwrap();
    assert_eq!(state.layout(), &before_second);
}

#[test]
fn test_dock_moves_between_regions_and_empties_source() {
    let mut state = state_with(&[("a", DockPosition::Left), ("b", DockPosition::Center)]);

    state.dock_panel(&id("a"), DockPosition::Bottom).unwrap();

    assert!(state.layout().left.root.is_empty());
    assert_eq!(position_of(&state, "a"), Some(DockPosition::Bottom));
    assert_eq!(
        state.layout().panel(&id("a")).unwrap().position,
        DockPosition::Bottom
    );
}

#[test]
fn test_duplicate_add_is_rejected() {
    let mut state = state_with(&[("a", DockPosition::Left)]);
    let err = state
        .add_panel(Panel::new("a", "Again"), DockPosition::Right)
        .unwrap_err();
    assert_eq!(err, DockError::DuplicatePanel(id("a")));
    assert!(state.layout().right.root.is_empty());
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_close_then_absent() {
    let mut state = state_with(&[("a", DockPosition::Left), ("b", DockPosition::Center)]);

    let panel = state.close_panel(&id("a")).unwrap();
    assert_eq!(panel.id(), &id("a"));
    assert!(!state.layout().contains_panel(&id("a")));
    assert!(state.layout().left.root.is_empty());

    let err = state.close_panel(&id("a")).unwrap_err();
    assert!(err.is_stale_reference());
}

#[test]
fn test_closing_one_side_of_split_collapses_it() {
    let mut state = state_with(&[("x", DockPosition::Center), ("y", DockPosition::Right)]);
    let g = group_of(&state, "x");
    state
        .move_panel(
            &id("y"),
            DropTarget::Split {
                group: g,
                side: Edge::Right,
            },
        )
        .unwrap();
    assert!(matches!(root(&state, DockPosition::Center), LayoutNode::Split(_)));

    state.close_panel(&id("y")).unwrap();
    match root(&state, DockPosition::Center) {
        LayoutNode::Group(group) => assert_eq!(group.id, g),
        other => panic!("expected the surviving group, got {:?}", other),
    }
}

#[test]
fn test_close_respects_flag() {
    let flags = PanelFlags {
        allow_close: false,
        ..PanelFlags::default()
    };
    let mut state = DockState::default();
    state
        .add_panel(Panel::new("pinned", "Pinned").with_flags(flags), DockPosition::Left)
        .unwrap();

    let err = state.close_panel(&id("pinned")).unwrap_err();
    assert_eq!(
        err,
        DockError::NotPermitted {
            panel: id("pinned"),
            action: PanelAction::Close
        }
    );
    assert!(state.layout().contains_panel(&id("pinned")));
}

#[test]
fn test_closing_active_panel_picks_neighbour() {
    let mut state = state_with(&[("a", DockPosition::Left), ("b", DockPosition::Left)]);
    state.close_panel(&id("b")).unwrap();
    assert_eq!(state.active_panel(), Some(&id("a")));
}

// ============================================================================
// Splits and tabs
// ============================================================================

#[test]
fn test_split_left_puts_new_group_first() {
    let mut state = state_with(&[("x", DockPosition::Center), ("y", DockPosition::Bottom)]);
    let g = group_of(&state, "x");

    state
        .move_panel(
            &id("y"),
            DropTarget::Split {
                group: g,
                side: Edge::Left,
            },
        )
        .unwrap();

    let LayoutNode::Split(split) = root(&state, DockPosition::Center) else {
        panic!("expected a split");
    };
    assert_eq!(split.direction, SplitDirection::Horizontal);
    assert_eq!(split.ratio, 0.5);
    match (&split.first, &split.second) {
        (LayoutNode::Group(first), LayoutNode::Group(second)) => {
            assert_eq!(first.panels[0].id(), &id("y"));
            assert_eq!(second.id, g);
        }
        other => panic!("unexpected children {:?}", other),
    }
    assert!(state.layout().bottom.root.is_empty());
    assert_eq!(position_of(&state, "y"), Some(DockPosition::Center));
}

#[test]
fn test_split_bottom_is_vertical_with_new_group_second() {
    let mut state = state_with(&[("x", DockPosition::Center), ("y", DockPosition::Left)]);
    let g = group_of(&state, "x");

    state
        .move_panel(
            &id("y"),
            DropTarget::Split {
                group: g,
                side: Edge::Bottom,
            },
        )
        .unwrap();

    let LayoutNode::Split(split) = root(&state, DockPosition::Center) else {
        panic!("expected a split");
    };
    assert_eq!(split.direction, SplitDirection::Vertical);
    assert!(matches!(&split.first, LayoutNode::Group(group) if group.id == g));
}

#[test]
fn test_splitting_own_sole_group_is_noop() {
    let mut state = state_with(&[("x", DockPosition::Center)]);
    let g = group_of(&state, "x");
    let version = state.version();

    state
        .move_panel(
            &id("x"),
            DropTarget::Split {
                group: g,
                side: Edge::Left,
            },
        )
        .unwrap();

    assert_eq!(state.version(), version);
    assert!(matches!(root(&state, DockPosition::Center), LayoutNode::Group(_)));
}

#[test]
fn test_split_of_stale_group_leaves_tree_untouched() {
    let mut state = state_with(&[("x", DockPosition::Center), ("y", DockPosition::Left)]);
    let before = state.layout().clone();

    let err = state
        .move_panel(
            &id("y"),
            DropTarget::Split {
                group: dockspace::model::GroupId(999),
                side: Edge::Left,
            },
        )
        .unwrap_err();

    assert_eq!(err, DockError::GroupNotFound(dockspace::model::GroupId(999)));
    assert_eq!(state.layout(), &before);
}

#[test]
fn test_tab_move_reorders_within_group() {
    let mut state = state_with(&[
        ("a", DockPosition::Left),
        ("b", DockPosition::Left),
        ("c", DockPosition::Left),
    ]);
    let g = group_of(&state, "a");

    state
        .move_panel(&id("c"), DropTarget::Tab { group: g, index: 0 })
        .unwrap();

    assert_eq!(tab_ids(&state, g), vec!["c", "a", "b"]);
    assert_eq!(state.layout().group(g).unwrap().active_index, 0);
}

#[test]
fn test_tab_index_is_clamped() {
    let mut state = state_with(&[("a", DockPosition::Left), ("z", DockPosition::Right)]);
    let g = group_of(&state, "a");

    state
        .move_panel(&id("z"), DropTarget::Tab { group: g, index: 42 })
        .unwrap();

    assert_eq!(tab_ids(&state, g), vec!["a", "z"]);
    assert!(state.layout().right.root.is_empty());
}

#[test]
fn test_tab_cycling_wraps() {
    let mut state = state_with(&[("a", DockPosition::Left), ("b", DockPosition::Left)]);
    let g = group_of(&state, "a");

    state.next_tab(g).unwrap();
    assert_eq!(state.active_panel(), Some(&id("a")));
    state.prev_tab(g).unwrap();
    assert_eq!(state.active_panel(), Some(&id("b")));
}

// ============================================================================
// Floating, minimize, maximize
// ============================================================================

#[test]
fn test_float_and_redock() {
    let mut state = state_with(&[("a", DockPosition::Left), ("b", DockPosition::Center)]);
    let frame = Rect::new(100.0, 120.0, 300.0, 200.0);

    let fg = state.float_panel(&id("a"), Some(frame)).unwrap();
    assert_eq!(position_of(&state, "a"), Some(DockPosition::Floating));
    let panel = state.layout().panel(&id("a")).unwrap();
    assert_eq!(panel.state, PanelState::Floating);
    assert_eq!(panel.floating_frame, Some(frame));
    assert_eq!(state.layout().group(fg).unwrap().frame, Some(frame));

    state.dock_panel(&id("a"), DockPosition::Right).unwrap();
    assert!(state.layout().floating.is_empty());
    let panel = state.layout().panel(&id("a")).unwrap();
    assert_eq!(panel.state, PanelState::Expanded);
    assert_eq!(panel.floating_frame, None);
}

#[test]
fn test_floating_group_cannot_be_split() {
    let mut state = state_with(&[("a", DockPosition::Left), ("b", DockPosition::Center)]);
    let fg = state.float_panel(&id("a"), None).unwrap();

    let err = state
        .move_panel(
            &id("b"),
            DropTarget::Split {
                group: fg,
                side: Edge::Left,
            },
        )
        .unwrap_err();
    assert_eq!(err, DockError::FloatingTarget(fg));
    assert_eq!(position_of(&state, "b"), Some(DockPosition::Center));
}

#[test]
fn test_float_respects_flag() {
    let flags = PanelFlags {
        allow_float: false,
        ..PanelFlags::default()
    };
    let mut state = DockState::default();
    state
        .add_panel(Panel::new("a", "A").with_flags(flags), DockPosition::Left)
        .unwrap();

    assert!(state.float_panel(&id("a"), None).is_err());
    assert_eq!(position_of(&state, "a"), Some(DockPosition::Left));
}

#[test]
fn test_move_floating_clamps_to_constraints() {
    let mut state = state_with(&[("a", DockPosition::Left)]);
    let fg = state.float_panel(&id("a"), None).unwrap();

    state
        .move_floating(fg, Rect::new(40.0, 50.0, 10.0, 10.0))
        .unwrap();

    let frame = state.layout().group(fg).unwrap().frame.unwrap();
    assert_eq!(frame, Rect::new(40.0, 50.0, 100.0, 50.0));
}

#[test]
fn test_minimize_and_restore_return_to_region() {
    let mut state = state_with(&[("a", DockPosition::Right), ("b", DockPosition::Center)]);

    state.minimize_panel(&id("a")).unwrap();
    assert!(state.layout().right.root.is_empty());
    assert_eq!(state.layout().minimized.len(), 1);
    assert_eq!(state.layout().minimized[0].state, PanelState::Minimized);

    state.restore_panel(&id("a")).unwrap();
    assert_eq!(position_of(&state, "a"), Some(DockPosition::Right));
    assert!(state.layout().minimized.is_empty());
    assert_eq!(
        state.layout().panel(&id("a")).unwrap().state,
        PanelState::Expanded
    );
}

#[test]
fn test_toggle_maximize() {
    let mut state = state_with(&[("a", DockPosition::Left), ("b", DockPosition::Center)]);

    assert!(state.toggle_maximize(&id("b")).unwrap());
    assert_eq!(state.maximized(), Some(&id("b")));
    assert_eq!(
        state.layout().panel(&id("b")).unwrap().state,
        PanelState::Maximized
    );

    // Maximizing another panel releases the first
    assert!(state.toggle_maximize(&id("a")).unwrap());
    assert_eq!(
        state.layout().panel(&id("b")).unwrap().state,
        PanelState::Expanded
    );

    assert!(!state.toggle_maximize(&id("a")).unwrap());
    assert_eq!(state.maximized(), None);
}

// ============================================================================
// Edges
// ============================================================================

#[test]
fn test_collapse_and_expand_edge() {
    let mut state = state_with(&[("a", DockPosition::Left)]);

    assert!(state.collapse_edge(Edge::Left));
    assert!(!state.collapse_edge(Edge::Left));
    assert_eq!(
        state.layout().panel(&id("a")).unwrap().state,
        PanelState::Collapsed
    );

    assert!(state.toggle_edge(Edge::Left));
    assert!(!state.layout().left.collapsed);
    assert_eq!(
        state.layout().panel(&id("a")).unwrap().state,
        PanelState::Expanded
    );

    // Empty edges cannot collapse
    assert!(!state.collapse_edge(Edge::Right));
}

#[test]
fn test_docking_into_collapsed_edge_expands_it() {
    let mut state = state_with(&[("a", DockPosition::Left), ("b", DockPosition::Center)]);
    state.collapse_edge(Edge::Left);

    state.dock_panel(&id("b"), DockPosition::Left).unwrap();

    assert!(!state.layout().left.collapsed);
    for panel in state.layout().panels_in(DockPosition::Left) {
        assert_eq!(panel.state, PanelState::Expanded);
    }
}

#[test]
fn test_edge_resize_clamps_to_floor() {
    let mut state = state_with(&[("a", DockPosition::Left), ("r", DockPosition::Right)]);

    state.start_resize(Edge::Left).unwrap();
    assert_eq!(state.update_resize(50.0, Edge::Left).unwrap(), 300.0);
    assert_eq!(state.update_resize(-1000.0, Edge::Left).unwrap(), 100.0);
    assert!(state.end_resize());

    // Right edge grows when its handle moves left
    state.start_resize(Edge::Right).unwrap();
    assert_eq!(state.update_resize(-30.0, Edge::Right).unwrap(), 280.0);
    assert!(state.end_resize());

    assert_eq!(
        state.update_resize(10.0, Edge::Right).unwrap_err(),
        DockError::NotResizing(Edge::Right)
    );
}

#[test]
fn test_split_ratio_is_clamped_by_min_pane() {
    let mut state = state_with(&[("x", DockPosition::Center), ("y", DockPosition::Left)]);
    let g = group_of(&state, "x");
    state
        .move_panel(
            &id("y"),
            DropTarget::Split {
                group: g,
                side: Edge::Right,
            },
        )
        .unwrap();
    let LayoutNode::Split(split) = root(&state, DockPosition::Center) else {
        panic!("expected a split");
    };
    let split_id = split.id;

    // Center is the full 1000 wide; 60 px floor on either side
    let stored = state.set_split_ratio(split_id, 0.01, container()).unwrap();
    assert!((stored - 0.06).abs() < 1e-6);
    let stored = state.set_split_ratio(split_id, 0.7, container()).unwrap();
    assert!((stored - 0.7).abs() < 1e-6);
}

#[test]
fn test_split_ratio_in_collapsed_edge_keeps_min_pane() {
    let mut state = state_with(&[("a", DockPosition::Left), ("b", DockPosition::Left)]);
    let g = group_of(&state, "a");
    state
        .move_panel(
            &id("b"),
            DropTarget::Split {
                group: g,
                side: Edge::Bottom,
            },
        )
        .unwrap();
    let LayoutNode::Split(split) = root(&state, DockPosition::Left) else {
        panic!("expected a split");
    };
    assert_eq!(split.direction, SplitDirection::Vertical);
    let split_id = split.id;

    assert!(state.collapse_edge(Edge::Left));
    // Measured against the full 800 high left edge: 60 px floor
    let stored = state.set_split_ratio(split_id, 0.0, container()).unwrap();
    assert!((stored - 0.075).abs() < 1e-6);

    assert!(state.expand_edge(Edge::Left));
    let frames: Vec<_> = group_frames(state.layout(), container())
        .into_iter()
        .filter(|frame| frame.position == DockPosition::Left)
        .collect();
    assert_eq!(frames.len(), 2);
    for frame in frames {
        assert!(frame.rect.height >= 60.0 - 1e-3, "{:?}", frame.rect);
    }
}

#[test]
fn test_split_ratio_without_extent_is_refused() {
    let mut state = state_with(&[("x", DockPosition::Center), ("y", DockPosition::Left)]);
    let g = group_of(&state, "x");
    state
        .move_panel(
            &id("y"),
            DropTarget::Split {
                group: g,
                side: Edge::Right,
            },
        )
        .unwrap();
    let LayoutNode::Split(split) = root(&state, DockPosition::Center) else {
        panic!("expected a split");
    };
    let (split_id, ratio) = (split.id, split.ratio);
    let version = state.version();

    assert_eq!(
        state.set_split_ratio(split_id, 0.0, Size::new(0.0, 0.0)),
        Err(DockError::NoSplitExtent(split_id))
    );
    assert_eq!(state.layout().split(split_id).unwrap().1.ratio, ratio);
    assert_eq!(state.version(), version);
}

#[test]
fn test_version_counts_committed_changes_only() {
    let mut state = state_with(&[("a", DockPosition::Left)]);
    let version = state.version();

    assert!(state.close_panel(&id("missing")).is_err());
    assert_eq!(state.version(), version);

    state.arm_drag(&id("a")).unwrap();
    state.cancel_drag();
    assert_eq!(state.version(), version);

    state.add_panel(Panel::new("b", "B"), DockPosition::Top).unwrap();
    assert_eq!(state.version(), version + 1);
}
