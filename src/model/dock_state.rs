//! Dock state: the orchestrator over a [`DockLayout`]
//!
//! All panel operations, the drag state machine and the resize gestures live
//! here. Every mutating operation returns `Result<_, DockError>`; an `Err`
//! means the layout was not touched. Each committed change bumps `version`
//! so hosts can poll for layout changes.
//!
//! Drag lifecycle:
//!
//! ```text
//! Idle --arm--> Armed --start--> Dragging --end/cancel--> Idle
//!                 \---------------end/cancel-----------------/
//! ```

use serde::{Deserialize, Serialize};

use super::dock_layout::{DockLayout, PanelLocation};
use super::error::{DockError, PanelAction};
use super::group::GroupId;
use super::layout_node::SplitId;
use super::panel::{DockPosition, Edge, Panel, PanelId, PanelState};
use super::primitives::{Point, Rect, Size};
use super::snapshot::LayoutSnapshot;
use crate::config::DockConfig;
use crate::view::{hit_test, split_bar, splitter_bars, DropTarget, DropZoneResolver, HitTarget};

// ============================================================================
// Transient state
// ============================================================================

/// Drag gesture state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed on a panel, not yet moved far enough to count as a drag
    Armed {
        panel: PanelId,
        origin: Option<Point>,
    },
    Dragging {
        panel: PanelId,
        target: DropTarget,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    pub fn panel(&self) -> Option<&PanelId> {
        match self {
            DragState::Idle => None,
            DragState::Armed { panel, .. } | DragState::Dragging { panel, .. } => Some(panel),
        }
    }

    /// Current drop target; `None` unless dragging
    pub fn target(&self) -> DropTarget {
        match self {
            DragState::Dragging { target, .. } => *target,
            _ => DropTarget::None,
        }
    }
}

/// Resize gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Edge(Edge),
    Split(SplitId),
}

/// Phase of a pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Began,
    Changed,
    Ended,
}

/// One pointer sample from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub location: Point,
    pub container: Size,
    pub phase: PointerPhase,
    /// Panel whose tab is under the pointer, reported by the host on `Began`
    #[serde(default)]
    pub panel: Option<PanelId>,
}

impl PointerEvent {
    pub fn new(location: Point, container: Size, phase: PointerPhase) -> Self {
        Self {
            location,
            container,
            phase,
            panel: None,
        }
    }

    pub fn on_panel(mut self, panel: impl Into<PanelId>) -> Self {
        self.panel = Some(panel.into());
        self
    }
}

// ============================================================================
// DockState
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct DockState {
    layout: DockLayout,
    config: DockConfig,
    drag: DragState,
    resize: ResizeState,
    active_panel: Option<PanelId>,
    maximized: Option<PanelId>,
    last_pointer: Option<Point>,
    version: u64,
}

impl DockState {
    pub fn new(config: DockConfig) -> Self {
        let config = config.sanitized();
        Self {
            layout: DockLayout::new(config.layout),
            config,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> &DockLayout {
        &self.layout
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn resize(&self) -> ResizeState {
        self.resize
    }

    pub fn active_panel(&self) -> Option<&PanelId> {
        self.active_panel.as_ref()
    }

    pub fn maximized(&self) -> Option<&PanelId> {
        self.maximized.as_ref()
    }

    /// Incremented on every committed layout change
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn resolver(&self) -> DropZoneResolver {
        DropZoneResolver::new(self.config.drop_zones)
    }

    /// Replace the configuration, re-clamping edge sizes to the new floors
    pub fn set_config(&mut self, config: DockConfig) {
        let config = config.sanitized();
        self.layout.metrics = config.layout;
        for edge in Edge::ALL {
            let size = self.layout.edge(edge).size;
            self.layout.set_edge_size(edge, size);
        }
        self.config = config;
        self.commit();
    }

    fn commit(&mut self) {
        self.version += 1;
        self.layout.assert_invariants();
    }

    fn panel_ref(&self, panel_id: &PanelId) -> Result<&Panel, DockError> {
        self.layout
            .panel(panel_id)
            .ok_or_else(|| DockError::PanelNotFound(panel_id.clone()))
    }

    fn locate(&self, panel_id: &PanelId) -> Result<PanelLocation, DockError> {
        self.layout
            .find_panel(panel_id)
            .ok_or_else(|| DockError::PanelNotFound(panel_id.clone()))
    }

    fn require(&self, panel_id: &PanelId, action: PanelAction) -> Result<(), DockError> {
        let flags = self.panel_ref(panel_id)?.flags();
        let allowed = match action {
            PanelAction::Drag => flags.allow_drag,
            PanelAction::Resize => flags.allow_resize,
            PanelAction::Float => flags.allow_float,
            PanelAction::Close => flags.allow_close,
            PanelAction::Tab => flags.allow_tabbing,
            PanelAction::Maximize => true,
        };
        if allowed {
            Ok(())
        } else {
            Err(DockError::NotPermitted {
                panel: panel_id.clone(),
                action,
            })
        }
    }

    /// Expand a collapsed edge so content placed there is visible
    fn reveal(&mut self, position: DockPosition) -> bool {
        let Some(edge) = position.edge() else {
            return false;
        };
        if !self.layout.edge(edge).collapsed {
            return false;
        }
        self.layout.edge_mut(edge).collapsed = false;
        self.layout.for_each_panel_in(position, |panel| {
            if panel.state == PanelState::Collapsed {
                panel.state = PanelState::Expanded;
            }
        });
        tracing::debug!("Expanded {} edge", edge);
        true
    }

    /// Detach a panel, dropping any maximize/drag references to it
    fn detach(&mut self, panel_id: &PanelId) -> Result<Panel, DockError> {
        let panel = self
            .layout
            .take_panel(panel_id)
            .ok_or_else(|| DockError::PanelNotFound(panel_id.clone()))?;
        if self.maximized.as_ref() == Some(panel_id) {
            self.maximized = None;
        }
        Ok(panel)
    }

    /// Pick a new active panel after `removed` left `group`
    fn repick_active(&mut self, removed: &PanelId, group: Option<GroupId>) {
        if self.active_panel.as_ref() != Some(removed) {
            return;
        }
        self.active_panel = group
            .and_then(|id| self.layout.group(id))
            .and_then(|g| g.active_panel_id().cloned())
            .or_else(|| self.layout.first_panel_id());
    }

    // =========================================================================
    // Panel lifecycle
    // =========================================================================

    /// Add a new panel to a region and make it active
    pub fn add_panel(
        &mut self,
        panel: Panel,
        position: DockPosition,
    ) -> Result<GroupId, DockError> {
        let panel_id = panel.id().clone();
        if self.layout.contains_panel(&panel_id) {
            return Err(DockError::DuplicatePanel(panel_id));
        }
        if position == DockPosition::Floating && !panel.flags().allow_float {
            return Err(DockError::NotPermitted {
                panel: panel_id,
                action: PanelAction::Float,
            });
        }
        self.reveal(position);
        let group = self.layout.insert_panel(panel, position);
        tracing::debug!("Added panel {} to {}", panel_id, position);
        self.active_panel = Some(panel_id);
        self.commit();
        Ok(group)
    }

    /// Make a panel the active one, revealing it if needed
    pub fn activate_panel(&mut self, panel_id: &PanelId) -> Result<(), DockError> {
        match self.locate(panel_id)? {
            PanelLocation::Minimized { .. } => {
                self.restore_panel(panel_id)?;
                return Ok(());
            }
            PanelLocation::Docked { position, group } => {
                self.reveal(position);
                if let Some(group) = self.layout.group_mut(group) {
                    group.activate(panel_id);
                }
            }
            PanelLocation::Floating { group } => {
                // Bring the window to the front
                if let Some(index) = self.layout.floating.iter().position(|g| g.id == group) {
                    let mut window = self.layout.floating.remove(index);
                    window.activate(panel_id);
                    self.layout.floating.push(window);
                }
            }
        }
        self.active_panel = Some(panel_id.clone());
        self.commit();
        Ok(())
    }

    /// Remove a panel from the layout and hand it back to the host
    pub fn close_panel(&mut self, panel_id: &PanelId) -> Result<Panel, DockError> {
        self.require(panel_id, PanelAction::Close)?;
        let group = match self.locate(panel_id)? {
            PanelLocation::Docked { group, .. } | PanelLocation::Floating { group } => Some(group),
            PanelLocation::Minimized { .. } => None,
        };
        if self.drag.panel() == Some(panel_id) {
            self.drag = DragState::Idle;
        }
        let panel = self.detach(panel_id)?;
        self.repick_active(panel_id, group);
        tracing::debug!("Closed panel {}", panel_id);
        self.commit();
        Ok(panel)
    }

    /// Detach a panel into its own floating window.
    ///
    /// Without a frame the panel keeps its last floating frame, or opens at
    /// its preferred size cascaded from the top-left.
    pub fn float_panel(
        &mut self,
        panel_id: &PanelId,
        frame: Option<Rect>,
    ) -> Result<GroupId, DockError> {
        self.require(panel_id, PanelAction::Float)?;
        let frame = frame.filter(|f| !f.is_degenerate());

        if let PanelLocation::Floating { group } = self.locate(panel_id)? {
            let alone = self.layout.group(group).is_some_and(|g| g.len() == 1);
            if alone {
                if let Some(frame) = frame {
                    self.move_floating(group, frame)?;
                }
                return Ok(group);
            }
        }

        let panel = self.detach(panel_id)?;
        let frame = frame
            .or(panel.floating_frame)
            .unwrap_or_else(|| self.layout.default_float_frame(&panel));
        let group = self.layout.push_floating(panel, frame);
        tracing::debug!("Floated panel {} at {:?}", panel_id, frame);
        self.active_panel = Some(panel_id.clone());
        self.commit();
        Ok(group)
    }

    /// Dock a panel into a region.
    ///
    /// Docking into the region the panel already lives in only activates it.
    pub fn dock_panel(
        &mut self,
        panel_id: &PanelId,
        position: DockPosition,
    ) -> Result<GroupId, DockError> {
        if position == DockPosition::Floating {
            return self.float_panel(panel_id, None);
        }
        if let PanelLocation::Docked {
            position: current,
            group,
        } = self.locate(panel_id)?
        {
            if current == position {
                self.activate_panel(panel_id)?;
                return Ok(group);
            }
        }

        let panel = self.detach(panel_id)?;
        self.reveal(position);
        let group = self.layout.insert_panel(panel, position);
        tracing::debug!("Docked panel {} to {}", panel_id, position);
        self.active_panel = Some(panel_id.clone());
        self.commit();
        Ok(group)
    }

    /// Apply a resolved drop target to a panel
    pub fn move_panel(&mut self, panel_id: &PanelId, target: DropTarget) -> Result<(), DockError> {
        match target {
            DropTarget::None => Ok(()),
            DropTarget::Dock { position } => self.dock_panel(panel_id, position).map(|_| ()),
            DropTarget::Tab { group, index } => self.move_to_tab(panel_id, group, index),
            DropTarget::Split { group, side } => self.move_to_split(panel_id, group, side),
        }
    }

    fn current_group(location: PanelLocation) -> Option<GroupId> {
        match location {
            PanelLocation::Docked { group, .. } | PanelLocation::Floating { group } => Some(group),
            PanelLocation::Minimized { .. } => None,
        }
    }

    fn move_to_tab(
        &mut self,
        panel_id: &PanelId,
        group: GroupId,
        index: usize,
    ) -> Result<(), DockError> {
        let location = self.locate(panel_id)?;
        let position = self
            .layout
            .group_position(group)
            .ok_or(DockError::GroupNotFound(group))?;

        if Self::current_group(location) == Some(group) {
            // Reorder within the same tab strip
            if let Some(target) = self.layout.group_mut(group) {
                if target.len() > 1 {
                    if let Some(panel) = target.remove(panel_id) {
                        target.insert(index, panel);
                    }
                }
                target.activate(panel_id);
            }
            self.active_panel = Some(panel_id.clone());
            self.commit();
            return Ok(());
        }

        self.require(panel_id, PanelAction::Tab)?;
        let panel = self.detach(panel_id)?;
        self.reveal(position);
        if let Err(panel) = self.layout.insert_into_group(group, panel, index) {
            self.put_back(panel);
            return Err(DockError::GroupNotFound(group));
        }
        tracing::debug!("Moved panel {} into group {} at {}", panel_id, group.0, index);
        self.active_panel = Some(panel_id.clone());
        self.commit();
        Ok(())
    }

    fn move_to_split(
        &mut self,
        panel_id: &PanelId,
        group: GroupId,
        side: Edge,
    ) -> Result<(), DockError> {
        let location = self.locate(panel_id)?;
        let (position, len) = self
            .layout
            .group(group)
            .map(|g| (g.position, g.len()))
            .ok_or(DockError::GroupNotFound(group))?;
        if position == DockPosition::Floating {
            return Err(DockError::FloatingTarget(group));
        }
        if Self::current_group(location) == Some(group) && len == 1 {
            // Splitting a group with its own sole panel changes nothing
            return Ok(());
        }

        let panel = self.detach(panel_id)?;
        self.reveal(position);
        if let Err(panel) = self.layout.split_group(group, panel, side) {
            self.put_back(panel);
            return Err(DockError::GroupNotFound(group));
        }
        tracing::debug!("Split group {} with panel {} on {}", group.0, panel_id, side);
        self.active_panel = Some(panel_id.clone());
        self.commit();
        Ok(())
    }

    /// Re-home a panel whose insertion failed after it was detached
    fn put_back(&mut self, panel: Panel) {
        let position = panel.position;
        tracing::warn!("Restoring panel {} to {} after failed move", panel.id(), position);
        self.layout.insert_panel(panel, position);
        self.commit();
    }

    // =========================================================================
    // Drag lifecycle
    // =========================================================================

    /// Press on a panel; becomes a drag once the pointer moves far enough
    pub fn arm_drag(&mut self, panel_id: &PanelId) -> Result<(), DockError> {
        self.require(panel_id, PanelAction::Drag)?;
        self.drag = DragState::Armed {
            panel: panel_id.clone(),
            origin: None,
        };
        tracing::debug!("Armed drag for {}", panel_id);
        Ok(())
    }

    pub fn start_drag(&mut self) -> Result<(), DockError> {
        match std::mem::take(&mut self.drag) {
            DragState::Idle => Err(DockError::NoActiveDrag),
            DragState::Armed { panel, .. } => {
                if !self.layout.contains_panel(&panel) {
                    return Err(DockError::PanelNotFound(panel));
                }
                tracing::debug!("Started drag of {}", panel);
                self.drag = DragState::Dragging {
                    panel,
                    target: DropTarget::None,
                };
                Ok(())
            }
            dragging @ DragState::Dragging { .. } => {
                self.drag = dragging;
                Ok(())
            }
        }
    }

    /// Re-resolve the drop target. Returns whether it changed.
    pub fn update_drop_zone(&mut self, pointer: Point, container: Size) -> Result<bool, DockError> {
        let resolved = self.resolver().resolve(pointer, container, &self.layout);
        match &mut self.drag {
            DragState::Dragging { target, .. } => {
                if *target == resolved {
                    return Ok(false);
                }
                *target = resolved;
                Ok(true)
            }
            _ => Err(DockError::NoActiveDrag),
        }
    }

    /// Finish the gesture, committing the move if there is a target.
    ///
    /// Returns whether the layout changed. Ending an armed drag is a tap.
    pub fn end_drag(&mut self) -> Result<bool, DockError> {
        self.last_pointer = None;
        match std::mem::take(&mut self.drag) {
            DragState::Idle => Err(DockError::NoActiveDrag),
            DragState::Armed { .. } => Ok(false),
            DragState::Dragging { target, .. } if target.is_none() => Ok(false),
            DragState::Dragging { panel, target } => {
                tracing::debug!("Dropping {} on {}", panel, target);
                let before = self.version;
                self.move_panel(&panel, target)?;
                Ok(self.version != before)
            }
        }
    }

    /// Abandon the gesture without touching the layout
    pub fn cancel_drag(&mut self) -> bool {
        self.last_pointer = None;
        let was_active = !self.drag.is_idle();
        self.drag = DragState::Idle;
        was_active
    }

    /// Route one pointer sample. Returns whether anything changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<bool, DockError> {
        let PointerEvent {
            location,
            container,
            phase,
            panel,
        } = event;
        match phase {
            PointerPhase::Began => {
                self.last_pointer = Some(location);
                if let Some(panel) = panel {
                    self.arm_drag(&panel)?;
                }
                if let DragState::Armed { origin, .. } = &mut self.drag {
                    *origin = Some(location);
                    return Ok(false);
                }
                match hit_test(&self.layout, container, location) {
                    Some(HitTarget::EdgeHandle(edge)) => self.start_resize(edge).map(|_| true),
                    Some(HitTarget::Splitter(split)) => {
                        self.begin_split_resize(split).map(|_| true)
                    }
                    Some(HitTarget::CollapsedEdge(edge)) => Ok(self.expand_edge(edge)),
                    _ => Ok(false),
                }
            }
            PointerPhase::Changed => {
                let previous = self.last_pointer.replace(location);
                if let DragState::Armed { origin, .. } = &mut self.drag {
                    let start = *origin.get_or_insert(previous.unwrap_or(location));
                    if location.distance_to(start) < self.config.drag.start_threshold {
                        return Ok(false);
                    }
                    self.start_drag()?;
                    self.update_drop_zone(location, container)?;
                    return Ok(true);
                }
                if !self.drag.is_idle() {
                    return self.update_drop_zone(location, container);
                }
                match self.resize {
                    ResizeState::Edge(edge) => {
                        let previous = previous.unwrap_or(location);
                        let delta = if edge.is_horizontal_extent() {
                            location.x - previous.x
                        } else {
                            location.y - previous.y
                        };
                        let before = self.layout.edge(edge).size;
                        Ok(self.update_resize(delta, edge)? != before)
                    }
                    ResizeState::Split(split) => {
                        self.drag_splitter(split, location, container).map(|_| true)
                    }
                    ResizeState::Idle => Ok(false),
                }
            }
            PointerPhase::Ended => {
                if matches!(self.drag, DragState::Dragging { .. }) {
                    self.update_drop_zone(location, container)?;
                }
                if !self.drag.is_idle() {
                    return self.end_drag();
                }
                self.last_pointer = None;
                Ok(self.end_resize() || self.end_split_resize())
            }
        }
    }

    // =========================================================================
    // Edge resize
    // =========================================================================

    pub fn start_resize(&mut self, edge: Edge) -> Result<(), DockError> {
        let locked = self
            .layout
            .panels_in(edge.position())
            .into_iter()
            .find(|p| !p.flags().allow_resize)
            .map(|p| p.id().clone());
        if let Some(panel) = locked {
            return Err(DockError::NotPermitted {
                panel,
                action: PanelAction::Resize,
            });
        }
        self.resize = ResizeState::Edge(edge);
        Ok(())
    }

    /// Move an edge's inner boundary by `delta`. Returns the stored size.
    ///
    /// Left/top edges grow with positive deltas; right/bottom edges have their
    /// handle on the far side and shrink.
    pub fn update_resize(&mut self, delta: f32, edge: Edge) -> Result<f32, DockError> {
        if self.resize != ResizeState::Edge(edge) {
            return Err(DockError::NotResizing(edge));
        }
        let delta = if delta.is_finite() { delta } else { 0.0 };
        let current = self.layout.edge(edge).size;
        let requested = if edge.is_leading() {
            current + delta
        } else {
            current - delta
        };
        let stored = self.layout.set_edge_size(edge, requested);
        if stored != current {
            self.commit();
        }
        Ok(stored)
    }

    pub fn end_resize(&mut self) -> bool {
        if matches!(self.resize, ResizeState::Edge(_)) {
            self.resize = ResizeState::Idle;
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Split resize
    // =========================================================================

    pub fn begin_split_resize(&mut self, split: SplitId) -> Result<(), DockError> {
        self.layout.clear_split_resizing();
        let node = self
            .layout
            .split_mut(split)
            .ok_or(DockError::SplitNotFound(split))?;
        node.is_resizing = true;
        self.resize = ResizeState::Split(split);
        Ok(())
    }

    /// Store a split ratio, clamped so both children keep the minimum pane size.
    ///
    /// Splits in a collapsed edge are measured at their expanded size. A split
    /// with no extent at all (degenerate container) is left alone.
    pub fn set_split_ratio(
        &mut self,
        split: SplitId,
        ratio: f32,
        container: Size,
    ) -> Result<f32, DockError> {
        if self.layout.split(split).is_none() {
            return Err(DockError::SplitNotFound(split));
        }
        let extent = split_bar(&self.layout, container, split)
            .map(|bar| bar.extent)
            .filter(|extent| extent.is_finite() && *extent > 0.0)
            .ok_or(DockError::NoSplitExtent(split))?;
        let min_size = self.config.layout.min_split_pane_size;
        let node = self
            .layout
            .split_mut(split)
            .ok_or(DockError::SplitNotFound(split))?;
        let before = node.ratio;
        let stored = node.set_ratio(ratio, extent, min_size);
        if stored != before {
            self.commit();
        }
        Ok(stored)
    }

    /// Put a split's divider under the pointer
    pub fn drag_splitter(
        &mut self,
        split: SplitId,
        pointer: Point,
        container: Size,
    ) -> Result<f32, DockError> {
        let bar = splitter_bars(&self.layout, container)
            .into_iter()
            .find(|bar| bar.split == split)
            .ok_or(DockError::SplitNotFound(split))?;
        self.set_split_ratio(split, bar.ratio_at(pointer), container)
    }

    pub fn end_split_resize(&mut self) -> bool {
        if matches!(self.resize, ResizeState::Split(_)) {
            self.layout.clear_split_resizing();
            self.resize = ResizeState::Idle;
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Minimize / maximize / collapse
    // =========================================================================

    pub fn minimize_panel(&mut self, panel_id: &PanelId) -> Result<(), DockError> {
        let location = self.locate(panel_id)?;
        if let PanelLocation::Minimized { .. } = location {
            return Ok(());
        }
        let mut panel = self.detach(panel_id)?;
        panel.state = PanelState::Minimized;
        self.layout.minimized.push(panel);
        self.repick_active(panel_id, Self::current_group(location));
        tracing::debug!("Minimized panel {}", panel_id);
        self.commit();
        Ok(())
    }

    /// Return a minimized panel to where it was
    pub fn restore_panel(&mut self, panel_id: &PanelId) -> Result<GroupId, DockError> {
        let index = match self.locate(panel_id)? {
            PanelLocation::Minimized { index } => index,
            PanelLocation::Docked { group, .. } | PanelLocation::Floating { group } => {
                return Ok(group);
            }
        };
        let panel = self.layout.minimized.remove(index);
        let position = panel.position;
        let group = if position == DockPosition::Floating {
            let frame = panel
                .floating_frame
                .unwrap_or_else(|| self.layout.default_float_frame(&panel));
            self.layout.push_floating(panel, frame)
        } else {
            self.reveal(position);
            self.layout.insert_panel(panel, position)
        };
        tracing::debug!("Restored panel {} to {}", panel_id, position);
        self.active_panel = Some(panel_id.clone());
        self.commit();
        Ok(group)
    }

    /// Toggle a docked panel's maximized state. Returns whether it is now maximized.
    pub fn toggle_maximize(&mut self, panel_id: &PanelId) -> Result<bool, DockError> {
        let location = self.locate(panel_id)?;

        if self.maximized.as_ref() == Some(panel_id) {
            if let Some(panel) = self.layout.panel_mut(panel_id) {
                panel.state = PanelState::Expanded;
            }
            self.maximized = None;
            self.commit();
            return Ok(false);
        }

        let PanelLocation::Docked { position, group } = location else {
            return Err(DockError::NotPermitted {
                panel: panel_id.clone(),
                action: PanelAction::Maximize,
            });
        };
        if let Some(previous) = self.maximized.take() {
            if let Some(panel) = self.layout.panel_mut(&previous) {
                panel.state = PanelState::Expanded;
            }
        }
        self.reveal(position);
        if let Some(group) = self.layout.group_mut(group) {
            group.activate(panel_id);
        }
        if let Some(panel) = self.layout.panel_mut(panel_id) {
            panel.state = PanelState::Maximized;
        }
        self.maximized = Some(panel_id.clone());
        self.active_panel = Some(panel_id.clone());
        self.commit();
        Ok(true)
    }

    /// Shrink an edge to its strip. Returns false if already collapsed or empty.
    pub fn collapse_edge(&mut self, edge: Edge) -> bool {
        let region = self.layout.edge(edge);
        if region.collapsed || region.root.is_empty() {
            return false;
        }
        let maximized = self.maximized.clone();
        let mut cleared_maximize = false;
        self.layout.edge_mut(edge).collapsed = true;
        self.layout.for_each_panel_in(edge.position(), |panel| {
            if Some(panel.id()) == maximized.as_ref() {
                cleared_maximize = true;
            }
            panel.state = PanelState::Collapsed;
        });
        if cleared_maximize {
            self.maximized = None;
        }
        tracing::debug!("Collapsed {} edge", edge);
        self.commit();
        true
    }

    pub fn expand_edge(&mut self, edge: Edge) -> bool {
        let changed = self.reveal(edge.position());
        if changed {
            self.commit();
        }
        changed
    }

    pub fn toggle_edge(&mut self, edge: Edge) -> bool {
        if self.layout.edge(edge).collapsed {
            self.expand_edge(edge)
        } else {
            self.collapse_edge(edge)
        }
    }

    // =========================================================================
    // Tabs and floating windows
    // =========================================================================

    pub fn next_tab(&mut self, group: GroupId) -> Result<(), DockError> {
        self.cycle_tab(group, true)
    }

    pub fn prev_tab(&mut self, group: GroupId) -> Result<(), DockError> {
        self.cycle_tab(group, false)
    }

    fn cycle_tab(&mut self, group: GroupId, forward: bool) -> Result<(), DockError> {
        let target = self
            .layout
            .group_mut(group)
            .ok_or(DockError::GroupNotFound(group))?;
        if forward {
            target.next_tab();
        } else {
            target.prev_tab();
        }
        self.active_panel = target.active_panel_id().cloned();
        self.commit();
        Ok(())
    }

    /// Move or resize a floating window.
    ///
    /// The size is clamped to the active panel's constraints.
    pub fn move_floating(&mut self, group: GroupId, frame: Rect) -> Result<(), DockError> {
        let window = self
            .layout
            .floating_group_mut(group)
            .ok_or(DockError::GroupNotFound(group))?;
        if !frame.x.is_finite() || !frame.y.is_finite() {
            return Ok(());
        }
        let size = window
            .active_panel()
            .map_or(frame.size(), |p| p.constraints().clamp(frame.size()));
        let frame = Rect::new(frame.x, frame.y, size.width, size.height);
        window.frame = Some(frame);
        for panel in &mut window.panels {
            panel.floating_frame = Some(frame);
        }
        self.commit();
        Ok(())
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::capture(
            &self.layout,
            self.active_panel.as_ref(),
            self.maximized.as_ref(),
        )
    }

    /// Re-arrange registered panels to match a snapshot.
    ///
    /// Panels without a record stay where they are; records for panels that
    /// are not registered are skipped. Returns the number of records applied.
    pub fn restore_snapshot(&mut self, snapshot: &LayoutSnapshot) -> usize {
        self.drag = DragState::Idle;
        self.resize = ResizeState::Idle;
        self.last_pointer = None;
        self.layout.clear_split_resizing();
        if let Some(previous) = self.maximized.take() {
            if let Some(panel) = self.layout.panel_mut(&previous) {
                panel.state = PanelState::Expanded;
            }
        }

        let mut applied = 0;
        for record in &snapshot.panels {
            let Some(mut panel) = self.layout.take_panel(&record.id) else {
                tracing::debug!("Skipping snapshot record for unknown panel {}", record.id);
                continue;
            };
            panel.preferred_size = panel.constraints().clamp(record.preferred_size);
            let frame = record.floating_frame.filter(|f| !f.is_degenerate());
            if record.state == PanelState::Minimized {
                panel.state = PanelState::Minimized;
                panel.position = record.position;
                panel.floating_frame = frame;
                self.layout.minimized.push(panel);
            } else if record.position == DockPosition::Floating {
                let frame = frame.unwrap_or_else(|| self.layout.default_float_frame(&panel));
                self.layout.push_floating(panel, frame);
            } else {
                self.layout.insert_panel(panel, record.position);
            }
            applied += 1;
        }

        for edge in Edge::ALL {
            let record = snapshot.edge(edge);
            self.layout.set_edge_size(edge, record.size);
            let collapsed = record.collapsed && !self.layout.edge(edge).root.is_empty();
            self.layout.edge_mut(edge).collapsed = collapsed;
            let state = if collapsed {
                PanelState::Collapsed
            } else {
                PanelState::Expanded
            };
            self.layout.for_each_panel_in(edge.position(), |panel| panel.state = state);
        }

        if let Some(id) = &snapshot.maximized {
            let visible = matches!(
                self.layout.find_panel(id),
                Some(PanelLocation::Docked { position, .. })
                    if position.edge().map_or(true, |e| !self.layout.edge(e).collapsed)
            );
            if visible {
                if let Some(panel) = self.layout.panel_mut(id) {
                    panel.state = PanelState::Maximized;
                }
                self.maximized = Some(id.clone());
            }
        }

        self.active_panel = snapshot
            .active_panel
            .clone()
            .filter(|id| self.layout.contains_panel(id))
            .or_else(|| self.layout.first_panel_id());

        tracing::info!("Restored {} of {} panel records", applied, snapshot.panels.len());
        self.commit();
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PanelFlags;

    fn id(s: &str) -> PanelId {
        PanelId::new(s)
    }

    fn state_with(panels: &[(&str, DockPosition)]) -> DockState {
        let mut state = DockState::default();
        for (panel, position) in panels {
            state.add_panel(Panel::new(*panel, *panel), *position).unwrap();
        }
        state
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut state = state_with(&[("a", DockPosition::Left)]);
        let version = state.version();
        assert_eq!(
            state.add_panel(Panel::new("a", "again"), DockPosition::Right),
            Err(DockError::DuplicatePanel(id("a")))
        );
        assert_eq!(state.version(), version);
    }

    #[test]
    fn test_close_repicks_active_from_group_survivors() {
        let mut state = state_with(&[
            ("a", DockPosition::Left),
            ("b", DockPosition::Left),
            ("c", DockPosition::Center),
        ]);
        state.activate_panel(&id("b")).unwrap();
        state.close_panel(&id("b")).unwrap();
        assert_eq!(state.active_panel(), Some(&id("a")));
    }

    #[test]
    fn test_close_respects_flag() {
        let mut state = DockState::default();
        let pinned = Panel::new("pinned", "Pinned").with_flags(PanelFlags {
            allow_close: false,
            ..PanelFlags::default()
        });
        state.add_panel(pinned, DockPosition::Center).unwrap();
        assert!(matches!(
            state.close_panel(&id("pinned")),
            Err(DockError::NotPermitted {
                action: PanelAction::Close,
                ..
            })
        ));
        assert!(state.layout().contains_panel(&id("pinned")));
    }

    #[test]
    fn test_update_resize_requires_matching_edge() {
        let mut state = state_with(&[("a", DockPosition::Left)]);
        assert_eq!(
            state.update_resize(10.0, Edge::Left),
            Err(DockError::NotResizing(Edge::Left))
        );
        state.start_resize(Edge::Left).unwrap();
        assert_eq!(
            state.update_resize(10.0, Edge::Right),
            Err(DockError::NotResizing(Edge::Right))
        );
        assert_eq!(state.update_resize(10.0, Edge::Left), Ok(260.0));
        assert!(state.end_resize());
        assert!(!state.end_resize());
    }

    #[test]
    fn test_restore_from_minimized_via_activate() {
        let mut state = state_with(&[("a", DockPosition::Bottom), ("b", DockPosition::Center)]);
        state.minimize_panel(&id("a")).unwrap();
        assert!(state.layout().bottom.root.is_empty());
        assert_eq!(
            state.layout().panel(&id("a")).map(|p| p.state),
            Some(PanelState::Minimized)
        );

        state.activate_panel(&id("a")).unwrap();
        assert_eq!(
            state.layout().find_panel(&id("a")).map(|l| matches!(
                l,
                PanelLocation::Docked {
                    position: DockPosition::Bottom,
                    ..
                }
            )),
            Some(true)
        );
        assert_eq!(state.active_panel(), Some(&id("a")));
    }

    #[test]
    fn test_maximize_toggle_and_floating_rejected() {
        let mut state = state_with(&[("a", DockPosition::Center), ("f", DockPosition::Floating)]);
        assert_eq!(state.toggle_maximize(&id("a")), Ok(true));
        assert_eq!(state.maximized(), Some(&id("a")));
        assert_eq!(state.toggle_maximize(&id("a")), Ok(false));
        assert_eq!(state.maximized(), None);
        assert!(state.toggle_maximize(&id("f")).is_err());
    }

    #[test]
    fn test_collapse_marks_panels_and_activate_expands() {
        let mut state = state_with(&[("a", DockPosition::Right)]);
        assert!(state.collapse_edge(Edge::Right));
        assert!(!state.collapse_edge(Edge::Right));
        assert_eq!(
            state.layout().panel(&id("a")).map(|p| p.state),
            Some(PanelState::Collapsed)
        );
        state.activate_panel(&id("a")).unwrap();
        assert!(!state.layout().right.collapsed);
        assert_eq!(
            state.layout().panel(&id("a")).map(|p| p.state),
            Some(PanelState::Expanded)
        );
        assert!(!state.collapse_edge(Edge::Left));
    }
}
