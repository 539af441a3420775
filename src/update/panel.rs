//! Panel lifecycle message handlers

use crate::commands::Cmd;
use crate::messages::PanelMsg;
use crate::model::DockState;

use super::absorb;

/// Handle panel messages (add, close, dock, float, tabs)
pub fn update_panel(state: &mut DockState, msg: PanelMsg) -> Option<Cmd> {
    match msg {
        PanelMsg::Add { panel, position } => {
            absorb(state.add_panel(panel.into_panel(), position));
        }
        PanelMsg::Activate(id) => {
            absorb(state.activate_panel(&id));
        }
        PanelMsg::Close(id) => {
            // The host gets the panel back through its own bookkeeping
            absorb(state.close_panel(&id));
        }
        PanelMsg::Float { panel, frame } => {
            absorb(state.float_panel(&panel, frame));
        }
        PanelMsg::Dock { panel, position } => {
            absorb(state.dock_panel(&panel, position));
        }
        PanelMsg::Move { panel, target } => {
            absorb(state.move_panel(&panel, target));
        }
        PanelMsg::Minimize(id) => {
            absorb(state.minimize_panel(&id));
        }
        PanelMsg::Restore(id) => {
            absorb(state.restore_panel(&id));
        }
        PanelMsg::ToggleMaximize(id) => {
            absorb(state.toggle_maximize(&id));
        }
        PanelMsg::NextTab(group) => {
            absorb(state.next_tab(group));
        }
        PanelMsg::PrevTab(group) => {
            absorb(state.prev_tab(group));
        }
        PanelMsg::MoveFloating { group, frame } => {
            absorb(state.move_floating(group, frame));
        }
    }
    // Committed changes are reported by the dispatcher
    None
}
