//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use dockspace::model::{
    DockPosition, DockState, GroupId, LayoutNode, Panel, PanelId, PanelLocation, Point,
    PointerEvent, PointerPhase, Size,
};

/// The container used by most scenarios
pub fn container() -> Size {
    Size::new(1000.0, 800.0)
}

/// State with the given panels added in order
pub fn state_with(panels: &[(&str, DockPosition)]) -> DockState {
    let mut state = DockState::default();
    for (id, position) in panels {
        state
            .add_panel(Panel::new(*id, id.to_uppercase()), *position)
            .unwrap();
    }
    state
}

/// Group currently holding a panel (docked or floating)
pub fn group_of(state: &DockState, id: &str) -> GroupId {
    match state.layout().find_panel(&PanelId::new(id)) {
        Some(PanelLocation::Docked { group, .. }) | Some(PanelLocation::Floating { group }) => {
            group
        }
        other => panic!("panel {} is not in a group: {:?}", id, other),
    }
}

/// Docked region of a panel
pub fn position_of(state: &DockState, id: &str) -> Option<DockPosition> {
    match state.layout().find_panel(&PanelId::new(id))? {
        PanelLocation::Docked { position, .. } => Some(position),
        PanelLocation::Floating { .. } => Some(DockPosition::Floating),
        PanelLocation::Minimized { .. } => None,
    }
}

/// Panel ids of a group, in tab order
pub fn tab_ids(state: &DockState, group: GroupId) -> Vec<String> {
    state
        .layout()
        .group(group)
        .map(|g| g.panels.iter().map(|p| p.id().to_string()).collect())
        .unwrap_or_default()
}

pub fn root(state: &DockState, position: DockPosition) -> &LayoutNode {
    state.layout().root(position).unwrap()
}

pub fn began(x: f32, y: f32) -> PointerEvent {
    PointerEvent::new(Point::new(x, y), container(), PointerPhase::Began)
}

pub fn moved(x: f32, y: f32) -> PointerEvent {
    PointerEvent::new(Point::new(x, y), container(), PointerPhase::Changed)
}

pub fn ended(x: f32, y: f32) -> PointerEvent {
    PointerEvent::new(Point::new(x, y), container(), PointerPhase::Ended)
}
