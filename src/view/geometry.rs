//! Region geometry for rendering and hit-testing
//!
//! Everything here is derived from layout parameters (edge sizes, collapse
//! flags, split ratios) and the container size. The host never hands rects
//! in; it asks for them.
//!
//! Region arrangement: left and right span the full container height, top and
//! bottom sit between them, the center takes what is left. Empty edges take
//! no space and collapsed edges shrink to a fixed strip.

use crate::model::{
    DockLayout, DockPosition, Edge, GroupId, LayoutNode, Point, Rect, Size, SplitDirection,
    SplitId,
};

// ============================================================================
// Regions
// ============================================================================

/// On-screen rectangles of the five docked regions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionRects {
    pub left: Option<Rect>,
    pub right: Option<Rect>,
    pub top: Option<Rect>,
    pub bottom: Option<Rect>,
    pub center: Rect,
}

impl RegionRects {
    pub fn edge(&self, edge: Edge) -> Option<Rect> {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn get(&self, position: DockPosition) -> Option<Rect> {
        match position.edge() {
            Some(edge) => self.edge(edge),
            None if position == DockPosition::Center => Some(self.center),
            None => None,
        }
    }
}

/// Size an edge occupies along its resize axis
pub fn edge_extent(layout: &DockLayout, edge: Edge) -> f32 {
    edge_span(layout, edge, false)
}

fn edge_span(layout: &DockLayout, edge: Edge, reveal_collapsed: bool) -> f32 {
    let region = layout.edge(edge);
    if region.root.is_empty() {
        0.0
    } else if region.collapsed && !reveal_collapsed {
        layout.metrics.collapsed_edge_size
    } else {
        region.size
    }
}

/// Compute the rectangle of every docked region
pub fn region_rects(layout: &DockLayout, container: Size) -> RegionRects {
    compute_region_rects(layout, container, false)
}

fn compute_region_rects(
    layout: &DockLayout,
    container: Size,
    reveal_collapsed: bool,
) -> RegionRects {
    let width = container.width.max(0.0);
    let height = container.height.max(0.0);
    let span = |edge: Edge| edge_span(layout, edge, reveal_collapsed);

    let left_w = span(Edge::Left).min(width);
    let right_w = span(Edge::Right).min(width - left_w);
    let inner_w = width - left_w - right_w;
    let top_h = span(Edge::Top).min(height);
    let bottom_h = span(Edge::Bottom).min(height - top_h);
    let inner_h = height - top_h - bottom_h;

    let present = |edge: Edge, rect: Rect| (!layout.edge(edge).root.is_empty()).then_some(rect);

    RegionRects {
        left: present(Edge::Left, Rect::new(0.0, 0.0, left_w, height)),
        right: present(Edge::Right, Rect::new(width - right_w, 0.0, right_w, height)),
        top: present(Edge::Top, Rect::new(left_w, 0.0, inner_w, top_h)),
        bottom: present(
            Edge::Bottom,
            Rect::new(left_w, height - bottom_h, inner_w, bottom_h),
        ),
        center: Rect::new(left_w, top_h, inner_w, inner_h),
    }
}

// ============================================================================
// Groups and splitters
// ============================================================================

/// Where a group is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupFrame {
    pub group: GroupId,
    pub position: DockPosition,
    pub rect: Rect,
}

/// Draggable divider between the two children of a split
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitterBar {
    pub split: SplitId,
    pub direction: SplitDirection,
    /// Hit/draw rectangle centred on the boundary between the children
    pub rect: Rect,
    /// Start of the split's own rectangle along the split axis
    pub origin: f32,
    /// Length of the split's own rectangle along the split axis
    pub extent: f32,
}

impl SplitterBar {
    /// Ratio the split would have if its boundary sat under `point`
    pub fn ratio_at(&self, point: Point) -> f32 {
        if self.extent <= 0.0 {
            return crate::model::DEFAULT_SPLIT_RATIO;
        }
        let along = match self.direction {
            SplitDirection::Horizontal => point.x,
            SplitDirection::Vertical => point.y,
        };
        (along - self.origin) / self.extent
    }
}

/// Frames of every group in the docked regions, in render order.
///
/// Collapsed edges show only their strip, so their groups have no frame.
pub fn group_frames(layout: &DockLayout, container: Size) -> Vec<GroupFrame> {
    let mut frames = Vec::new();
    let mut splitters = Vec::new();
    visit_regions(layout, container, false, &mut frames, &mut splitters);
    frames
}

/// Splitter bars of every visible split, in render order
pub fn splitter_bars(layout: &DockLayout, container: Size) -> Vec<SplitterBar> {
    let mut frames = Vec::new();
    let mut splitters = Vec::new();
    visit_regions(layout, container, false, &mut frames, &mut splitters);
    splitters
}

/// Splitter bar of one split as laid out with every edge expanded.
///
/// Unlike [`splitter_bars`] this also places splits inside collapsed edges,
/// at the size they will have once the edge opens again.
pub fn split_bar(layout: &DockLayout, container: Size, split: SplitId) -> Option<SplitterBar> {
    let mut frames = Vec::new();
    let mut splitters = Vec::new();
    visit_regions(layout, container, true, &mut frames, &mut splitters);
    splitters.into_iter().find(|bar| bar.split == split)
}

/// Frame of one group: docked groups by layout, floating groups by their window
pub fn group_frame(layout: &DockLayout, container: Size, group: GroupId) -> Option<Rect> {
    if let Some(window) = layout.floating.iter().find(|g| g.id == group) {
        return window.frame;
    }
    group_frames(layout, container)
        .into_iter()
        .find(|frame| frame.group == group)
        .map(|frame| frame.rect)
}

fn visit_regions(
    layout: &DockLayout,
    container: Size,
    reveal_collapsed: bool,
    frames: &mut Vec<GroupFrame>,
    splitters: &mut Vec<SplitterBar>,
) {
    let rects = compute_region_rects(layout, container, reveal_collapsed);
    let splitter_width = layout.metrics.splitter_width;
    for (position, root) in layout.roots() {
        let collapsed = position.edge().is_some_and(|edge| layout.edge(edge).collapsed);
        if collapsed && !reveal_collapsed {
            continue;
        }
        if let Some(rect) = rects.get(position) {
            layout_node_frames(root, position, rect, splitter_width, frames, splitters);
        }
    }
}

/// Split a rect between the two children of a split
pub fn split_rects(rect: Rect, direction: SplitDirection, ratio: f32) -> (Rect, Rect) {
    match direction {
        SplitDirection::Horizontal => {
            let first = rect.width * ratio;
            (
                Rect::new(rect.x, rect.y, first, rect.height),
                Rect::new(rect.x + first, rect.y, rect.width - first, rect.height),
            )
        }
        SplitDirection::Vertical => {
            let first = rect.height * ratio;
            (
                Rect::new(rect.x, rect.y, rect.width, first),
                Rect::new(rect.x, rect.y + first, rect.width, rect.height - first),
            )
        }
    }
}

/// Recursively compute frames for a node
fn layout_node_frames(
    node: &LayoutNode,
    position: DockPosition,
    rect: Rect,
    splitter_width: f32,
    frames: &mut Vec<GroupFrame>,
    splitters: &mut Vec<SplitterBar>,
) {
    match node {
        LayoutNode::Empty => {}
        LayoutNode::Group(group) => frames.push(GroupFrame {
            group: group.id,
            position,
            rect,
        }),
        LayoutNode::Split(split) => {
            let (first, second) = split_rects(rect, split.direction, split.ratio);
            let bar = match split.direction {
                SplitDirection::Horizontal => SplitterBar {
                    split: split.id,
                    direction: split.direction,
                    rect: Rect::new(
                        second.x - splitter_width / 2.0,
                        rect.y,
                        splitter_width,
                        rect.height,
                    ),
                    origin: rect.x,
                    extent: rect.width,
                },
                SplitDirection::Vertical => SplitterBar {
                    split: split.id,
                    direction: split.direction,
                    rect: Rect::new(
                        rect.x,
                        second.y - splitter_width / 2.0,
                        rect.width,
                        splitter_width,
                    ),
                    origin: rect.y,
                    extent: rect.height,
                },
            };
            splitters.push(bar);
            for (child, child_rect) in [(&split.first, first), (&split.second, second)] {
                layout_node_frames(child, position, child_rect, splitter_width, frames, splitters);
            }
        }
    }
}

// ============================================================================
// Edge handles
// ============================================================================

/// Resize handle on the inner side of each expanded, non-empty edge
pub fn edge_handles(layout: &DockLayout, container: Size) -> Vec<(Edge, Rect)> {
    let rects = region_rects(layout, container);
    let thickness = layout.metrics.splitter_width;
    let half = thickness / 2.0;
    Edge::ALL
        .into_iter()
        .filter(|edge| !layout.edge(*edge).collapsed)
        .filter_map(|edge| {
            let r = rects.edge(edge)?;
            let handle = match edge {
                Edge::Left => Rect::new(r.max_x() - half, r.y, thickness, r.height),
                Edge::Right => Rect::new(r.x - half, r.y, thickness, r.height),
                Edge::Top => Rect::new(r.x, r.max_y() - half, r.width, thickness),
                Edge::Bottom => Rect::new(r.x, r.y - half, r.width, thickness),
            };
            Some((edge, handle))
        })
        .collect()
}
