//! Drag gesture message handlers

use crate::commands::Cmd;
use crate::messages::DragMsg;
use crate::model::DockState;

use super::absorb;

/// Handle drag messages
///
/// Arming, starting and drop-zone changes are transient and only need a
/// repaint; a committed drop is reported by the dispatcher.
pub fn update_drag(state: &mut DockState, msg: DragMsg) -> Option<Cmd> {
    match msg {
        DragMsg::Arm(id) => absorb(state.arm_drag(&id)).map(|_| Cmd::Redraw),
        DragMsg::Start => absorb(state.start_drag()).map(|_| Cmd::Redraw),
        DragMsg::UpdateDropZone { pointer, container } => {
            match absorb(state.update_drop_zone(pointer, container)) {
                Some(true) => Some(Cmd::Redraw),
                _ => None,
            }
        }
        DragMsg::End => {
            // A tap or a drop on nothing still clears the drag feedback
            absorb(state.end_drag()).map(|_| Cmd::Redraw)
        }
        DragMsg::Cancel => state.cancel_drag().then_some(Cmd::Redraw),
        DragMsg::Pointer(event) => match absorb(state.handle_pointer(event)) {
            Some(true) => Some(Cmd::Redraw),
            _ => None,
        },
    }
}
