//! Serializable snapshot of layout parameters
//!
//! A snapshot records where each panel lives and how big the edges are. It
//! does not carry panel content: on restore, only panels the host has
//! already registered are moved, and records for unknown panels are skipped.

use serde::{Deserialize, Serialize};

use super::dock_layout::DockLayout;
use super::panel::{DockPosition, Edge, PanelId, PanelState};
use super::primitives::{Rect, Size};

/// Bumped when the snapshot shape changes incompatibly
pub const SNAPSHOT_FORMAT: u32 = 1;

/// Size and collapse state of one edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub size: f32,
    #[serde(default)]
    pub collapsed: bool,
}

/// Location and state of one panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRecord {
    pub id: PanelId,
    /// Docked region, `floating`, or where a minimized panel returns to
    pub position: DockPosition,
    pub state: PanelState,
    pub preferred_size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_frame: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub format: u32,
    pub left: EdgeRecord,
    pub right: EdgeRecord,
    pub top: EdgeRecord,
    pub bottom: EdgeRecord,
    /// Docked panels in region order, then floating, then minimized
    pub panels: Vec<PanelRecord>,
    #[serde(default)]
    pub active_panel: Option<PanelId>,
    #[serde(default)]
    pub maximized: Option<PanelId>,
}

impl LayoutSnapshot {
    /// Record the parameters of a layout
    pub fn capture(
        layout: &DockLayout,
        active_panel: Option<&PanelId>,
        maximized: Option<&PanelId>,
    ) -> Self {
        let edge = |edge: Edge| {
            let region = layout.edge(edge);
            EdgeRecord {
                size: region.size,
                collapsed: region.collapsed,
            }
        };
        let panels = layout
            .panel_ids()
            .iter()
            .filter_map(|id| layout.panel(id))
            .map(|panel| PanelRecord {
                id: panel.id().clone(),
                position: panel.position,
                state: panel.state,
                preferred_size: panel.preferred_size,
                floating_frame: panel.floating_frame,
            })
            .collect();

        Self {
            format: SNAPSHOT_FORMAT,
            left: edge(Edge::Left),
            right: edge(Edge::Right),
            top: edge(Edge::Top),
            bottom: edge(Edge::Bottom),
            panels,
            active_panel: active_panel.cloned(),
            maximized: maximized.cloned(),
        }
    }

    pub fn edge(&self, edge: Edge) -> EdgeRecord {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn record(&self, panel_id: &PanelId) -> Option<&PanelRecord> {
        self.panels.iter().find(|r| &r.id == panel_id)
    }
}
