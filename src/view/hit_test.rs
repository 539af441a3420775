//! Hit-testing for pointer presses
//!
//! Determines which dock element is under a point so a press can be routed
//! to the right gesture: a splitter or edge handle starts a resize, a group
//! can start a panel drag. Floating windows sit above everything else.

use crate::model::{DockLayout, Edge, GroupId, Point, Size, SplitId};

use super::geometry::{edge_handles, group_frames, region_rects, splitter_bars};

/// What is under a point, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A floating window
    FloatingGroup(GroupId),
    /// Resize handle on the inner side of an edge region
    EdgeHandle(Edge),
    /// A splitter bar between split children
    Splitter(SplitId),
    /// The strip shown for a collapsed edge
    CollapsedEdge(Edge),
    /// A docked group
    Group(GroupId),
}

/// Hit-test floating windows, frontmost first
pub fn hit_test_floating(layout: &DockLayout, pt: Point) -> Option<HitTarget> {
    layout
        .floating
        .iter()
        .rev()
        .find(|g| g.frame.is_some_and(|frame| frame.contains(pt)))
        .map(|g| HitTarget::FloatingGroup(g.id))
}

pub fn hit_test_edge_handles(layout: &DockLayout, container: Size, pt: Point) -> Option<HitTarget> {
    edge_handles(layout, container)
        .into_iter()
        .find(|(_, rect)| rect.contains(pt))
        .map(|(edge, _)| HitTarget::EdgeHandle(edge))
}

pub fn hit_test_splitters(layout: &DockLayout, container: Size, pt: Point) -> Option<HitTarget> {
    splitter_bars(layout, container)
        .into_iter()
        .find(|bar| bar.rect.contains(pt))
        .map(|bar| HitTarget::Splitter(bar.split))
}

pub fn hit_test_collapsed_edges(
    layout: &DockLayout,
    container: Size,
    pt: Point,
) -> Option<HitTarget> {
    let rects = region_rects(layout, container);
    Edge::ALL
        .into_iter()
        .filter(|edge| layout.edge(*edge).collapsed)
        .find(|edge| rects.edge(*edge).is_some_and(|rect| rect.contains(pt)))
        .map(HitTarget::CollapsedEdge)
}

pub fn hit_test_groups(layout: &DockLayout, container: Size, pt: Point) -> Option<HitTarget> {
    group_frames(layout, container)
        .into_iter()
        .find(|frame| frame.rect.contains(pt))
        .map(|frame| HitTarget::Group(frame.group))
}

/// Find the highest-priority element at a point
pub fn hit_test(layout: &DockLayout, container: Size, pt: Point) -> Option<HitTarget> {
    if container.is_degenerate() || !pt.is_finite() {
        return None;
    }

    // 1. Floating windows cover the docked regions
    if let Some(target) = hit_test_floating(layout, pt) {
        return Some(target);
    }

    // 2. Edge handles straddle region boundaries, so they beat the groups
    if let Some(target) = hit_test_edge_handles(layout, container, pt) {
        return Some(target);
    }

    // 3. Splitters
    if let Some(target) = hit_test_splitters(layout, container, pt) {
        return Some(target);
    }

    // 4. Collapsed strips
    if let Some(target) = hit_test_collapsed_edges(layout, container, pt) {
        return Some(target);
    }

    // 5. Groups
    hit_test_groups(layout, container, pt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DockPosition, Panel};

    #[test]
    fn test_priority_order() {
        let mut layout = DockLayout::default();
        let left = layout.insert_panel(Panel::new("l", "l"), DockPosition::Left);
        let center = layout.insert_panel(Panel::new("c", "c"), DockPosition::Center);
        let container = Size::new(1000.0, 800.0);

        assert_eq!(
            hit_test(&layout, container, Point::new(249.0, 400.0)),
            Some(HitTarget::EdgeHandle(Edge::Left))
        );
        assert_eq!(
            hit_test(&layout, container, Point::new(100.0, 400.0)),
            Some(HitTarget::Group(left))
        );
        assert_eq!(
            hit_test(&layout, container, Point::new(600.0, 400.0)),
            Some(HitTarget::Group(center))
        );

        let window = layout.insert_panel(Panel::new("f", "f"), DockPosition::Floating);
        assert_eq!(
            hit_test(&layout, container, Point::new(100.0, 100.0)),
            Some(HitTarget::FloatingGroup(window))
        );
    }

    #[test]
    fn test_collapsed_strip() {
        let mut layout = DockLayout::default();
        layout.insert_panel(Panel::new("b", "b"), DockPosition::Bottom);
        layout.bottom.collapsed = true;
        let container = Size::new(1000.0, 800.0);
        assert_eq!(
            hit_test(&layout, container, Point::new(500.0, 790.0)),
            Some(HitTarget::CollapsedEdge(Edge::Bottom))
        );
        assert_eq!(hit_test(&layout, Size::new(0.0, 0.0), Point::new(1.0, 1.0)), None);
    }
}
