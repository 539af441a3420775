//! Edge and split resize message handlers

use crate::commands::Cmd;
use crate::messages::ResizeMsg;
use crate::model::DockState;

use super::absorb;

/// Handle resize messages
pub fn update_resize(state: &mut DockState, msg: ResizeMsg) -> Option<Cmd> {
    match msg {
        ResizeMsg::Start(edge) => absorb(state.start_resize(edge)).map(|_| Cmd::Redraw),
        ResizeMsg::Update { delta, edge } => {
            absorb(state.update_resize(delta, edge));
            None
        }
        ResizeMsg::End => state.end_resize().then_some(Cmd::Redraw),
        ResizeMsg::BeginSplit(split) => {
            absorb(state.begin_split_resize(split)).map(|_| Cmd::Redraw)
        }
        ResizeMsg::SetSplitRatio {
            split,
            ratio,
            container,
        } => {
            absorb(state.set_split_ratio(split, ratio, container));
            None
        }
        ResizeMsg::DragSplitter {
            split,
            pointer,
            container,
        } => {
            absorb(state.drag_splitter(split, pointer, container));
            None
        }
        ResizeMsg::EndSplit => state.end_split_resize().then_some(Cmd::Redraw),
    }
}
