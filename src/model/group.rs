//! Panel groups: panels sharing one tab strip

use serde::{Deserialize, Serialize};

use super::panel::{DockPosition, Panel, PanelId};
use super::primitives::Rect;

/// Unique identifier for a panel group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u64);

/// An ordered set of panels shown as one tab strip
///
/// Insertion order is tab order. A group that lives in the layout is never
/// empty; callers drop it as soon as its last panel leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelGroup {
    pub id: GroupId,
    pub panels: Vec<Panel>,
    pub active_index: usize,
    pub position: DockPosition,
    /// Window frame, only meaningful for floating groups
    pub frame: Option<Rect>,
}

impl PanelGroup {
    /// Create a group holding a single panel
    pub fn single(id: GroupId, panel: Panel, position: DockPosition) -> Self {
        Self {
            id,
            panels: vec![panel],
            active_index: 0,
            position,
            frame: None,
        }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Get the currently active panel
    pub fn active_panel(&self) -> Option<&Panel> {
        self.panels.get(self.active_index)
    }

    pub fn active_panel_id(&self) -> Option<&PanelId> {
        self.active_panel().map(Panel::id)
    }

    pub fn index_of(&self, panel_id: &PanelId) -> Option<usize> {
        self.panels.iter().position(|p| p.id() == panel_id)
    }

    pub fn contains(&self, panel_id: &PanelId) -> bool {
        self.index_of(panel_id).is_some()
    }

    pub fn panel(&self, panel_id: &PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id() == panel_id)
    }

    pub fn panel_mut(&mut self, panel_id: &PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id() == panel_id)
    }

    /// Append a panel as the last tab and make it active
    pub fn push(&mut self, panel: Panel) {
        self.panels.push(panel);
        self.active_index = self.panels.len() - 1;
    }

    /// Insert a panel at `min(index, len)` and make it active
    pub fn insert(&mut self, index: usize, panel: Panel) -> usize {
        let index = index.min(self.panels.len());
        self.panels.insert(index, panel);
        self.active_index = index;
        index
    }

    /// Remove a panel, keeping the active index pointing at a valid tab
    pub fn remove(&mut self, panel_id: &PanelId) -> Option<Panel> {
        let index = self.index_of(panel_id)?;
        let panel = self.panels.remove(index);
        if index < self.active_index {
            self.active_index -= 1;
        }
        if self.active_index >= self.panels.len() && !self.panels.is_empty() {
            self.active_index = self.panels.len() - 1;
        }
        if self.panels.is_empty() {
            self.active_index = 0;
        }
        Some(panel)
    }

    /// Make a panel the active tab; false if it is not in this group
    pub fn activate(&mut self, panel_id: &PanelId) -> bool {
        match self.index_of(panel_id) {
            Some(index) => {
                self.active_index = index;
                true
            }
            None => false,
        }
    }

    /// Cycle to the next tab
    pub fn next_tab(&mut self) {
        if self.panels.len() > 1 {
            self.active_index = (self.active_index + 1) % self.panels.len();
        }
    }

    /// Cycle to the previous tab
    pub fn prev_tab(&mut self) {
        if self.panels.len() > 1 {
            let len = self.panels.len();
            self.active_index = (self.active_index + len - 1) % len;
        }
    }
}
