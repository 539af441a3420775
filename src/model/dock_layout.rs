//! Dock layout: the five region roots plus floating and minimized panels
//!
//! A panel lives in exactly one of three places at any time: a group inside
//! one of the region trees, a floating group, or the minimized list. All
//! moves go through [`DockLayout::take_panel`] first so a panel is never owned
//! twice.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::group::{GroupId, PanelGroup};
use super::layout_node::{LayoutIds, LayoutNode, SplitId, SplitNode};
use super::panel::{DockPosition, Edge, Panel, PanelId, PanelState};
use super::primitives::Rect;
use crate::config::LayoutMetrics;

/// Offset between successive default floating windows
pub const FLOAT_CASCADE_STEP: f32 = 24.0;

/// One of the four outer regions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRegion {
    pub root: LayoutNode,
    /// Width for left/right, height for top/bottom
    pub size: f32,
    pub collapsed: bool,
}

impl EdgeRegion {
    pub fn new(size: f32) -> Self {
        Self {
            root: LayoutNode::Empty,
            size,
            collapsed: false,
        }
    }
}

/// Where a panel currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelLocation {
    Docked {
        position: DockPosition,
        group: GroupId,
    },
    Floating {
        group: GroupId,
    },
    Minimized {
        index: usize,
    },
}

/// The complete arrangement of panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockLayout {
    pub left: EdgeRegion,
    pub right: EdgeRegion,
    pub top: EdgeRegion,
    pub bottom: EdgeRegion,
    pub center: LayoutNode,
    /// Detached groups, in window stacking order (last is frontmost)
    pub floating: Vec<PanelGroup>,
    pub minimized: Vec<Panel>,
    pub ids: LayoutIds,
    /// Size floors; supplied by configuration, not persisted
    #[serde(skip, default)]
    pub metrics: LayoutMetrics,
}

impl Default for DockLayout {
    fn default() -> Self {
        Self::new(LayoutMetrics::default())
    }
}

impl DockLayout {
    pub fn new(metrics: LayoutMetrics) -> Self {
        let metrics = metrics.sanitized();
        Self {
            left: EdgeRegion::new(metrics.default_edge_size(Edge::Left)),
            right: EdgeRegion::new(metrics.default_edge_size(Edge::Right)),
            top: EdgeRegion::new(metrics.default_edge_size(Edge::Top)),
            bottom: EdgeRegion::new(metrics.default_edge_size(Edge::Bottom)),
            center: LayoutNode::Empty,
            floating: Vec::new(),
            minimized: Vec::new(),
            ids: LayoutIds::default(),
            metrics,
        }
    }

    // =========================================================================
    // Region access
    // =========================================================================

    pub fn edge(&self, edge: Edge) -> &EdgeRegion {
        match edge {
            Edge::Left => &self.left,
            Edge::Right => &self.right,
            Edge::Top => &self.top,
            Edge::Bottom => &self.bottom,
        }
    }

    pub fn edge_mut(&mut self, edge: Edge) -> &mut EdgeRegion {
        match edge {
            Edge::Left => &mut self.left,
            Edge::Right => &mut self.right,
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
        }
    }

    /// Root node of a docked region; `None` for `Floating`
    pub fn root(&self, position: DockPosition) -> Option<&LayoutNode> {
        match position.edge() {
            Some(edge) => Some(&self.edge(edge).root),
            None if position == DockPosition::Center => Some(&self.center),
            None => None,
        }
    }

    pub fn root_mut(&mut self, position: DockPosition) -> Option<&mut LayoutNode> {
        match position.edge() {
            Some(edge) => Some(&mut self.edge_mut(edge).root),
            None if position == DockPosition::Center => Some(&mut self.center),
            None => None,
        }
    }

    /// The five region roots in traversal order
    pub fn roots(&self) -> [(DockPosition, &LayoutNode); 5] {
        [
            (DockPosition::Left, &self.left.root),
            (DockPosition::Right, &self.right.root),
            (DockPosition::Top, &self.top.root),
            (DockPosition::Bottom, &self.bottom.root),
            (DockPosition::Center, &self.center),
        ]
    }

    fn roots_mut(&mut self) -> [&mut LayoutNode; 5] {
        [
            &mut self.left.root,
            &mut self.right.root,
            &mut self.top.root,
            &mut self.bottom.root,
            &mut self.center,
        ]
    }

    /// True when no panel exists anywhere
    pub fn is_empty(&self) -> bool {
        self.roots().iter().all(|(_, root)| root.is_empty())
            && self.floating.is_empty()
            && self.minimized.is_empty()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn find_panel(&self, panel_id: &PanelId) -> Option<PanelLocation> {
        for (position, root) in self.roots() {
            if let Some(group) = root.group_containing(panel_id) {
                return Some(PanelLocation::Docked {
                    position,
                    group: group.id,
                });
            }
        }
        if let Some(group) = self.floating.iter().find(|g| g.contains(panel_id)) {
            return Some(PanelLocation::Floating { group: group.id });
        }
        self.minimized
            .iter()
            .position(|p| p.id() == panel_id)
            .map(|index| PanelLocation::Minimized { index })
    }

    pub fn contains_panel(&self, panel_id: &PanelId) -> bool {
        self.find_panel(panel_id).is_some()
    }

    pub fn panel(&self, panel_id: &PanelId) -> Option<&Panel> {
        match self.find_panel(panel_id)? {
            PanelLocation::Docked { group, .. } | PanelLocation::Floating { group } => {
                self.group(group)?.panel(panel_id)
            }
            PanelLocation::Minimized { index } => self.minimized.get(index),
        }
    }

    pub fn panel_mut(&mut self, panel_id: &PanelId) -> Option<&mut Panel> {
        match self.find_panel(panel_id)? {
            PanelLocation::Docked { group, .. } | PanelLocation::Floating { group } => {
                self.group_mut(group)?.panel_mut(panel_id)
            }
            PanelLocation::Minimized { index } => self.minimized.get_mut(index),
        }
    }

    /// Find a group in the region trees or among the floating windows
    pub fn group(&self, group_id: GroupId) -> Option<&PanelGroup> {
        self.roots()
            .into_iter()
            .find_map(|(_, root)| root.group(group_id))
            .or_else(|| self.floating.iter().find(|g| g.id == group_id))
    }

    pub fn group_mut(&mut self, group_id: GroupId) -> Option<&mut PanelGroup> {
        if self.floating.iter().any(|g| g.id == group_id) {
            return self.floating.iter_mut().find(|g| g.id == group_id);
        }
        self.roots_mut()
            .into_iter()
            .find_map(|root| root.group_mut(group_id))
    }

    pub fn floating_group_mut(&mut self, group_id: GroupId) -> Option<&mut PanelGroup> {
        self.floating.iter_mut().find(|g| g.id == group_id)
    }

    /// Region a group belongs to
    pub fn group_position(&self, group_id: GroupId) -> Option<DockPosition> {
        self.group(group_id).map(|g| g.position)
    }

    pub fn split(&self, split_id: SplitId) -> Option<(DockPosition, &SplitNode)> {
        self.roots()
            .into_iter()
            .find_map(|(position, root)| root.split(split_id).map(|split| (position, split)))
    }

    pub fn split_mut(&mut self, split_id: SplitId) -> Option<&mut SplitNode> {
        self.roots_mut()
            .into_iter()
            .find_map(|root| root.split_mut(split_id))
    }

    /// Every panel ID: docked regions, then floating windows, then minimized
    pub fn panel_ids(&self) -> Vec<PanelId> {
        let docked = self
            .roots()
            .into_iter()
            .flat_map(|(_, root)| root.panels())
            .map(|p| p.id().clone())
            .collect::<Vec<_>>();
        docked
            .into_iter()
            .chain(
                self.floating
                    .iter()
                    .flat_map(|g| g.panels.iter())
                    .map(|p| p.id().clone()),
            )
            .chain(self.minimized.iter().map(|p| p.id().clone()))
            .collect()
    }

    /// Every group ID in render order, floating windows last
    pub fn group_ids(&self) -> Vec<GroupId> {
        let mut ids: Vec<GroupId> = self
            .roots()
            .into_iter()
            .flat_map(|(_, root)| root.groups())
            .map(|g| g.id)
            .collect();
        ids.extend(self.floating.iter().map(|g| g.id));
        ids
    }

    /// First visible panel: docked regions in order, then floating windows
    pub fn first_panel_id(&self) -> Option<PanelId> {
        self.roots()
            .into_iter()
            .find_map(|(_, root)| root.first_group().and_then(|g| g.active_panel_id().cloned()))
            .or_else(|| {
                self.floating
                    .iter()
                    .find_map(|g| g.active_panel_id().cloned())
            })
    }

    /// Panel IDs inside a region tree
    pub fn panels_in(&self, position: DockPosition) -> Vec<&Panel> {
        match position {
            DockPosition::Floating => self.floating.iter().flat_map(|g| g.panels.iter()).collect(),
            _ => self.root(position).map(LayoutNode::panels).unwrap_or_default(),
        }
    }

    // =========================================================================
    // Surgery
    // =========================================================================

    /// Detach a panel from wherever it lives.
    ///
    /// Empty groups and degenerate splits collapse; an emptied floating window
    /// is discarded.
    pub fn take_panel(&mut self, panel_id: &PanelId) -> Option<Panel> {
        match self.find_panel(panel_id)? {
            PanelLocation::Docked { position, .. } => {
                self.root_mut(position)?.remove_panel(panel_id)
            }
            PanelLocation::Floating { group } => {
                let index = self.floating.iter().position(|g| g.id == group)?;
                let panel = self.floating[index].remove(panel_id)?;
                if self.floating[index].is_empty() {
                    self.floating.remove(index);
                }
                Some(panel)
            }
            PanelLocation::Minimized { index } => Some(self.minimized.remove(index)),
        }
    }

    /// Place a panel in a region. `Floating` opens a new window.
    pub fn insert_panel(&mut self, panel: Panel, position: DockPosition) -> GroupId {
        if position == DockPosition::Floating {
            let frame = panel
                .floating_frame
                .unwrap_or_else(|| self.default_float_frame(&panel));
            return self.push_floating(panel, frame);
        }
        let root = match position.edge() {
            Some(Edge::Left) => &mut self.left.root,
            Some(Edge::Right) => &mut self.right.root,
            Some(Edge::Top) => &mut self.top.root,
            Some(Edge::Bottom) => &mut self.bottom.root,
            None => &mut self.center,
        };
        root.insert_panel(panel, position, &mut self.ids)
    }

    /// Open a new floating window holding one panel
    pub fn push_floating(&mut self, mut panel: Panel, frame: Rect) -> GroupId {
        panel.set_floating(frame);
        let group_id = self.ids.next_group_id();
        let mut group = PanelGroup::single(group_id, panel, DockPosition::Floating);
        group.frame = Some(frame);
        self.floating.push(group);
        group_id
    }

    /// Frame for a panel floated without an explicit one: its preferred
    /// size, cascaded from the top-left so windows don't stack exactly.
    pub fn default_float_frame(&self, panel: &Panel) -> Rect {
        let offset = FLOAT_CASCADE_STEP * (self.floating.len() + 1) as f32;
        let size = panel.constraints().clamp(panel.preferred_size);
        Rect::new(offset, offset, size.width, size.height)
    }

    /// Split a docked group, putting the panel on `side`
    pub fn split_group(
        &mut self,
        target: GroupId,
        panel: Panel,
        side: Edge,
    ) -> Result<GroupId, Panel> {
        let Self {
            left,
            right,
            top,
            bottom,
            center,
            ids,
            ..
        } = self;
        let mut panel = panel;
        for root in [
            &mut left.root,
            &mut right.root,
            &mut top.root,
            &mut bottom.root,
            center,
        ] {
            match root.split_group(target, panel, side, ids) {
                Ok(group_id) => return Ok(group_id),
                Err(returned) => panel = returned,
            }
        }
        Err(panel)
    }

    /// Insert a panel into an existing tab strip, docked or floating
    pub fn insert_into_group(
        &mut self,
        target: GroupId,
        mut panel: Panel,
        index: usize,
    ) -> Result<usize, Panel> {
        let Some(group) = self.group_mut(target) else {
            return Err(panel);
        };
        match group.frame {
            Some(frame) if group.position == DockPosition::Floating => panel.set_floating(frame),
            _ => panel.set_docked(group.position),
        }
        Ok(group.insert(index, panel))
    }

    /// Store an edge size, clamped to the edge's floor. Returns the stored size.
    pub fn set_edge_size(&mut self, edge: Edge, size: f32) -> f32 {
        let floor = self.metrics.min_edge_size(edge);
        let size = if size.is_finite() { size.max(floor) } else { floor };
        self.edge_mut(edge).size = size;
        size
    }

    /// Apply `f` to every panel in a region tree
    pub fn for_each_panel_in(&mut self, position: DockPosition, mut f: impl FnMut(&mut Panel)) {
        if let Some(root) = self.root_mut(position) {
            root.for_each_panel_mut(&mut f);
        }
    }

    /// Clear transient resize flags on every split
    pub fn clear_split_resizing(&mut self) {
        for root in self.roots_mut() {
            root.for_each_split_mut(&mut |split| split.is_resizing = false);
        }
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Check the structural invariants, returning the first violation found
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut seen_panels = HashSet::new();
        let mut seen_groups = HashSet::new();

        for (position, root) in self.roots() {
            validate_node(root, position, &mut seen_panels, &mut seen_groups)?;
        }

        for group in &self.floating {
            validate_group(group, DockPosition::Floating, &mut seen_panels, &mut seen_groups)?;
            if group.frame.is_none() {
                return Err(InvariantViolation::MissingFrame(group.id));
            }
            for panel in &group.panels {
                if panel.state != PanelState::Floating || panel.floating_frame.is_none() {
                    return Err(InvariantViolation::StateMismatch(panel.id().clone()));
                }
            }
        }

        for panel in &self.minimized {
            if !seen_panels.insert(panel.id().clone()) {
                return Err(InvariantViolation::DuplicatePanel(panel.id().clone()));
            }
            if panel.state != PanelState::Minimized {
                return Err(InvariantViolation::StateMismatch(panel.id().clone()));
            }
        }

        for edge in Edge::ALL {
            let size = self.edge(edge).size;
            if !(size >= self.metrics.min_edge_size(edge)) {
                return Err(InvariantViolation::EdgeBelowFloor { edge, size });
            }
        }

        Ok(())
    }

    /// Panic if the layout breaks an invariant.
    ///
    /// Called after every state transition in debug builds.
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        if let Err(violation) = self.validate() {
            panic!("dock layout invariant violated: {}", violation);
        }
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}

fn validate_node(
    node: &LayoutNode,
    position: DockPosition,
    panels: &mut HashSet<PanelId>,
    groups: &mut HashSet<GroupId>,
) -> Result<(), InvariantViolation> {
    match node {
        LayoutNode::Empty => Ok(()),
        LayoutNode::Group(group) => {
            validate_group(group, position, panels, groups)?;
            for panel in &group.panels {
                let state_ok = matches!(
                    panel.state,
                    PanelState::Expanded | PanelState::Collapsed | PanelState::Maximized
                );
                if !state_ok || panel.position != position {
                    return Err(InvariantViolation::StateMismatch(panel.id().clone()));
                }
            }
            Ok(())
        }
        LayoutNode::Split(split) => {
            if split.first.is_empty() || split.second.is_empty() {
                return Err(InvariantViolation::DegenerateSplit(split.id));
            }
            if !(0.0..=1.0).contains(&split.ratio) {
                return Err(InvariantViolation::RatioOutOfRange {
                    split: split.id,
                    ratio: split.ratio,
                });
            }
            validate_node(&split.first, position, panels, groups)?;
            validate_node(&split.second, position, panels, groups)
        }
    }
}

fn validate_group(
    group: &PanelGroup,
    position: DockPosition,
    panels: &mut HashSet<PanelId>,
    groups: &mut HashSet<GroupId>,
) -> Result<(), InvariantViolation> {
    if !groups.insert(group.id) {
        return Err(InvariantViolation::DuplicateGroup(group.id));
    }
    if group.is_empty() {
        return Err(InvariantViolation::EmptyGroup(group.id));
    }
    if group.active_index >= group.len() {
        return Err(InvariantViolation::ActiveIndexOutOfRange {
            group: group.id,
            index: group.active_index,
            len: group.len(),
        });
    }
    if group.position != position {
        return Err(InvariantViolation::GroupPositionMismatch(group.id));
    }
    for panel in &group.panels {
        if !panels.insert(panel.id().clone()) {
            return Err(InvariantViolation::DuplicatePanel(panel.id().clone()));
        }
    }
    Ok(())
}

/// A broken structural invariant
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    DuplicatePanel(PanelId),
    DuplicateGroup(GroupId),
    EmptyGroup(GroupId),
    ActiveIndexOutOfRange {
        group: GroupId,
        index: usize,
        len: usize,
    },
    GroupPositionMismatch(GroupId),
    DegenerateSplit(SplitId),
    RatioOutOfRange {
        split: SplitId,
        ratio: f32,
    },
    MissingFrame(GroupId),
    StateMismatch(PanelId),
    EdgeBelowFloor {
        edge: Edge,
        size: f32,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePanel(id) => write!(f, "panel {} appears more than once", id),
            Self::DuplicateGroup(id) => write!(f, "group {} appears more than once", id.0),
            Self::EmptyGroup(id) => write!(f, "group {} has no panels", id.0),
            Self::ActiveIndexOutOfRange { group, index, len } => write!(
                f,
                "group {} has active index {} but only {} panels",
                group.0, index, len
            ),
            Self::GroupPositionMismatch(id) => {
                write!(f, "group {} is stored outside its region", id.0)
            }
            Self::DegenerateSplit(id) => write!(f, "split {} has an empty child", id.0),
            Self::RatioOutOfRange { split, ratio } => {
                write!(f, "split {} has ratio {} outside [0, 1]", split.0, ratio)
            }
            Self::MissingFrame(id) => write!(f, "floating group {} has no frame", id.0),
            Self::StateMismatch(id) => {
                write!(f, "panel {} state does not match its location", id)
            }
            Self::EdgeBelowFloor { edge, size } => {
                write!(f, "{} edge size {} is below its floor", edge, size)
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}
