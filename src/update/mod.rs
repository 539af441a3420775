//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Dock operations
//! that fail leave the layout untouched; the failure is logged at debug level
//! and the message becomes a no-op.

mod drag;
mod layout;
mod panel;
mod resize;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::{DockError, DockState};

#[cfg(debug_assertions)]
use crate::tracing::LayoutSummary;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use drag::update_drag;
pub use layout::update_layout;
pub use panel::update_panel;
pub use resize::update_resize;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(state: &mut DockState, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(state, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(state, msg)
    }
}

/// Inner update logic (no tracing)
///
/// A committed layout change always yields `PersistLayout`; handlers only
/// report transient changes themselves.
fn update_inner(state: &mut DockState, msg: Msg) -> Option<Cmd> {
    let version = state.version();
    let result = match msg {
        Msg::Panel(m) => panel::update_panel(state, m),
        Msg::Layout(m) => layout::update_layout(state, m),
        Msg::Drag(m) => drag::update_drag(state, m),
        Msg::Resize(m) => resize::update_resize(state, m),
    };

    if state.version() != version {
        Some(Cmd::PersistLayout)
    } else {
        result
    }
}

/// Log and swallow a dock error, keeping the success value
pub(crate) fn absorb<T>(result: Result<T, DockError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            if e.is_stale_reference() {
                tracing::debug!(stale = true, "Ignored message: {}", e);
            } else {
                tracing::debug!("Ignored message: {}", e);
            }
            None
        }
    }
}

/// Traced update wrapper (debug builds only)
///
/// Logs layout and drop-target diffs. Filters out noisy pointer samples.
#[cfg(debug_assertions)]
fn update_traced(state: &mut DockState, msg: Msg) -> Option<Cmd> {
    use crate::messages::DragMsg;

    let is_noisy = matches!(
        &msg,
        Msg::Drag(DragMsg::Pointer(_) | DragMsg::UpdateDropZone { .. })
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let summary_before = LayoutSummary::from_state(state);
    let target_before = state.drag().target();

    let result = update_inner(state, msg);

    if let Some(diff) = summary_before.diff(&LayoutSummary::from_state(state)) {
        debug!(target: "layout", %diff, "layout changed");
    }
    let target_after = state.drag().target();
    if target_before != target_after {
        debug!(
            target: "drop_zone",
            before = %target_before,
            after = %target_after,
            "drop target changed"
        );
    }

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments.
/// Example outputs:
/// - `Panel::Close(PanelId("terminal"))`
/// - `Resize::Start(Left)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Panel(m) => format!("Panel::{:?}", m),
        Msg::Layout(m) => format!("Layout::{:?}", m),
        Msg::Drag(m) => format!("Drag::{:?}", m),
        Msg::Resize(m) => format!("Resize::{:?}", m),
    }
}
