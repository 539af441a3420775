//! Errors reported by dock operations
//!
//! Every operation that returns `Err` has left the layout untouched, so a
//! caller that ignores the error gets the same committed state as a silent
//! no-op. The update layer does exactly that and only logs the error.

use super::group::GroupId;
use super::layout_node::SplitId;
use super::panel::{Edge, PanelId};

/// A gesture or control forbidden by a panel's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Drag,
    Resize,
    Float,
    Close,
    Tab,
    Maximize,
}

impl std::fmt::Display for PanelAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PanelAction::Drag => "drag",
            PanelAction::Resize => "resize",
            PanelAction::Float => "float",
            PanelAction::Close => "close",
            PanelAction::Tab => "tab",
            PanelAction::Maximize => "maximize",
        };
        f.write_str(name)
    }
}

/// Why a dock operation was not applied
#[derive(Debug, Clone, PartialEq)]
pub enum DockError {
    /// The panel is not anywhere in the layout
    PanelNotFound(PanelId),
    /// The group is neither in the tree nor floating
    GroupNotFound(GroupId),
    /// The split is not in the tree
    SplitNotFound(SplitId),
    /// A panel with this ID already exists
    DuplicatePanel(PanelId),
    /// The panel's flags forbid the action
    NotPermitted { panel: PanelId, action: PanelAction },
    /// Floating groups cannot be split
    FloatingTarget(GroupId),
    /// The operation requires a different drag state
    NoActiveDrag,
    /// A resize update arrived for an edge that is not being resized
    NotResizing(Edge),
    /// The split has no length to measure a ratio against
    NoSplitExtent(SplitId),
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PanelNotFound(id) => write!(f, "panel not found: {}", id),
            Self::GroupNotFound(id) => write!(f, "group not found: {}", id.0),
            Self::SplitNotFound(id) => write!(f, "split not found: {}", id.0),
            Self::DuplicatePanel(id) => write!(f, "duplicate panel id: {}", id),
            Self::NotPermitted { panel, action } => {
                write!(f, "panel {} does not allow {}", panel, action)
            }
            Self::FloatingTarget(id) => write!(f, "group {} is floating and cannot be split", id.0),
            Self::NoActiveDrag => write!(f, "no drag in progress"),
            Self::NotResizing(edge) => write!(f, "{} edge is not being resized", edge),
            Self::NoSplitExtent(id) => write!(f, "split {} has no extent to resize", id.0),
        }
    }
}

impl std::error::Error for DockError {}

impl DockError {
    /// True for errors caused by an ID that no longer exists
    pub fn is_stale_reference(&self) -> bool {
        matches!(
            self,
            Self::PanelNotFound(_) | Self::GroupNotFound(_) | Self::SplitNotFound(_)
        )
    }
}
