//! Dock model: panels, groups, the layout tree and the state that drives it
//!
//! Leaves first: [`Panel`] → [`PanelGroup`] → [`LayoutNode`] → [`DockLayout`]
//! → [`DockState`].

pub mod dock_layout;
pub mod dock_state;
pub mod error;
pub mod group;
pub mod layout_node;
pub mod panel;
pub mod primitives;
pub mod snapshot;

pub use dock_layout::{DockLayout, EdgeRegion, InvariantViolation, PanelLocation};
pub use dock_state::{DockState, DragState, PointerEvent, PointerPhase, ResizeState};
pub use error::{DockError, PanelAction};
pub use group::{GroupId, PanelGroup};
pub use layout_node::{
    clamp_split_ratio, LayoutIds, LayoutNode, SplitDirection, SplitId, SplitNode,
    DEFAULT_SPLIT_RATIO,
};
pub use panel::{
    ContentHandle, DockPosition, Edge, Panel, PanelConstraints, PanelFlags, PanelId, PanelState,
};
pub use primitives::{Point, Rect, Size};
pub use snapshot::{EdgeRecord, LayoutSnapshot, PanelRecord};
