//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Messages deserialize
//! from JSON so recorded sessions can be replayed.

use serde::{Deserialize, Serialize};

use crate::model::{
    DockPosition, Edge, GroupId, LayoutSnapshot, Panel, PanelConstraints, PanelFlags, PanelId,
    Point, PointerEvent, Rect, Size, SplitId,
};
use crate::view::DropTarget;

/// Description of a panel to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub id: PanelId,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub flags: PanelFlags,
    #[serde(default)]
    pub constraints: PanelConstraints,
}

impl PanelSpec {
    pub fn new(id: impl Into<PanelId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            flags: PanelFlags::default(),
            constraints: PanelConstraints::default(),
        }
    }

    pub fn into_panel(self) -> Panel {
        let panel = Panel::new(self.id, self.title)
            .with_flags(self.flags)
            .with_constraints(self.constraints);
        match self.icon {
            Some(icon) => panel.with_icon(icon),
            None => panel,
        }
    }
}

/// Panel lifecycle messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelMsg {
    /// Create a panel in a region
    Add {
        panel: PanelSpec,
        position: DockPosition,
    },
    Activate(PanelId),
    Close(PanelId),
    /// Detach into a floating window, optionally at a given frame
    Float {
        panel: PanelId,
        #[serde(default)]
        frame: Option<Rect>,
    },
    Dock {
        panel: PanelId,
        position: DockPosition,
    },
    /// Apply a drop target directly, without a drag gesture
    Move { panel: PanelId, target: DropTarget },
    Minimize(PanelId),
    Restore(PanelId),
    ToggleMaximize(PanelId),
    NextTab(GroupId),
    PrevTab(GroupId),
    MoveFloating { group: GroupId, frame: Rect },
}

/// Region-level messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMsg {
    CollapseEdge(Edge),
    ExpandEdge(Edge),
    ToggleEdge(Edge),
    /// Re-arrange registered panels to match a saved snapshot
    RestoreSnapshot(Box<LayoutSnapshot>),
}

/// Drag gesture messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMsg {
    Arm(PanelId),
    Start,
    UpdateDropZone { pointer: Point, container: Size },
    End,
    Cancel,
    /// Raw pointer sample; routed to drag or resize as appropriate
    Pointer(PointerEvent),
}

/// Edge and split resize messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMsg {
    Start(Edge),
    Update {
        delta: f32,
        edge: Edge,
    },
    End,
    BeginSplit(SplitId),
    SetSplitRatio {
        split: SplitId,
        ratio: f32,
        container: Size,
    },
    DragSplitter {
        split: SplitId,
        pointer: Point,
        container: Size,
    },
    EndSplit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Msg {
    /// Panel messages (add, close, dock, float)
    Panel(PanelMsg),
    /// Layout messages (edge collapse, snapshots)
    Layout(LayoutMsg),
    /// Drag messages (arm, drop-zone updates, commit)
    Drag(DragMsg),
    /// Resize messages (edges and splits)
    Resize(ResizeMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn add_panel(
        id: impl Into<PanelId>,
        title: impl Into<String>,
        position: DockPosition,
    ) -> Self {
        Msg::Panel(PanelMsg::Add {
            panel: PanelSpec::new(id, title),
            position,
        })
    }

    pub fn dock(panel: impl Into<PanelId>, position: DockPosition) -> Self {
        Msg::Panel(PanelMsg::Dock {
            panel: panel.into(),
            position,
        })
    }

    pub fn pointer(event: PointerEvent) -> Self {
        Msg::Drag(DragMsg::Pointer(event))
    }
}
