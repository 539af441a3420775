//! Region-level message handlers (edge collapse, snapshots)

use crate::commands::Cmd;
use crate::messages::LayoutMsg;
use crate::model::DockState;

/// Handle layout messages
pub fn update_layout(state: &mut DockState, msg: LayoutMsg) -> Option<Cmd> {
    match msg {
        LayoutMsg::CollapseEdge(edge) => {
            state.collapse_edge(edge);
        }
        LayoutMsg::ExpandEdge(edge) => {
            state.expand_edge(edge);
        }
        LayoutMsg::ToggleEdge(edge) => {
            state.toggle_edge(edge);
        }
        LayoutMsg::RestoreSnapshot(snapshot) => {
            state.restore_snapshot(&snapshot);
        }
    }
    None
}
