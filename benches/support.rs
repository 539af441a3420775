//! Shared helpers for benchmarks

use dockspace::model::{DockPosition, DockState, Edge, Panel, PanelId, Size};
use dockspace::view::DropTarget;

#[allow(dead_code)]
pub const CONTAINER: Size = Size {
    width: 1920.0,
    height: 1080.0,
};

/// A state with `panels` panels spread over every region, with the center
/// split into a grid of groups
#[allow(dead_code)]
pub fn make_state(panels: usize) -> DockState {
    let mut state = DockState::default();
    let positions = [
        DockPosition::Left,
        DockPosition::Right,
        DockPosition::Bottom,
        DockPosition::Center,
    ];
    for i in 0..panels {
        let id = format!("panel-{}", i);
        let _ = state.add_panel(Panel::new(id.as_str(), id.as_str()), positions[i % 4]);
    }

    // Split center panels off into their own groups, alternating sides
    let center_ids: Vec<PanelId> = state
        .layout()
        .panels_in(DockPosition::Center)
        .into_iter()
        .map(|p| p.id().clone())
        .collect();
    for (i, id) in center_ids.iter().enumerate().skip(1) {
        let Some(group) = state.layout().center.first_group().map(|g| g.id) else {
            break;
        };
        let side = if i % 2 == 0 { Edge::Right } else { Edge::Bottom };
        let _ = state.move_panel(id, DropTarget::Split { group, side });
    }
    state
}
