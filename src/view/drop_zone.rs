//! Drop-zone resolution for panel drags
//!
//! Classifies a pointer location into the docking action a drop there would
//! perform. Floating windows under the pointer always take a tab. Otherwise
//! the checks run in order:
//!
//! 1. Compass circles over the group under the pointer (split or join)
//! 2. Outer bands along the container boundary (dock as an edge region)
//! 3. The band along the hovered group's own boundary (split)
//! 4. Anywhere else over a group (join its tab strip)
//!
//! Within the outer threshold but closer to the content than the dock
//! distance is a safe zone that resolves to the center instead of an edge.

use serde::{Deserialize, Serialize};

use super::geometry::{group_frame, group_frames, region_rects, split_rects};
use crate::config::DropZoneTuning;
use crate::model::{DockLayout, DockPosition, Edge, GroupId, Point, Rect, Size, SplitDirection};

/// What a drop at the current pointer location would do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DropTarget {
    /// Nothing; releasing here cancels the move
    #[default]
    None,
    /// Dock into a region (appends to the region's first group)
    Dock { position: DockPosition },
    /// Join a group's tab strip at `index`
    Tab { group: GroupId, index: usize },
    /// Split a group, putting the dragged panel on `side`
    Split { group: GroupId, side: Edge },
}

impl DropTarget {
    pub fn is_none(&self) -> bool {
        matches!(self, DropTarget::None)
    }

    /// Group the target refers to, if any
    pub fn group(&self) -> Option<GroupId> {
        match self {
            DropTarget::Tab { group, .. } | DropTarget::Split { group, .. } => Some(*group),
            DropTarget::None | DropTarget::Dock { .. } => None,
        }
    }
}

impl std::fmt::Display for DropTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropTarget::None => write!(f, "none"),
            DropTarget::Dock { position } => write!(f, "dock {}", position),
            DropTarget::Tab { group, index } => write!(f, "tab group {} at {}", group.0, index),
            DropTarget::Split { group, side } => write!(f, "split group {} {}", group.0, side),
        }
    }
}

/// One of the five compass indicators drawn over a hovered group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassZone {
    Side(Edge),
    Center,
}

/// Centres of the compass circles for a group frame, center circle first
pub fn compass_zones(frame: Rect, tuning: &DropZoneTuning) -> [(CompassZone, Point); 5] {
    let radius = tuning.compass_diameter / 2.0;
    let offset = tuning.compass_inset + radius;
    let center = frame.center();
    [
        (CompassZone::Center, center),
        (
            CompassZone::Side(Edge::Left),
            Point::new(frame.x + offset, center.y),
        ),
        (
            CompassZone::Side(Edge::Right),
            Point::new(frame.max_x() - offset, center.y),
        ),
        (
            CompassZone::Side(Edge::Top),
            Point::new(center.x, frame.y + offset),
        ),
        (
            CompassZone::Side(Edge::Bottom),
            Point::new(center.x, frame.max_y() - offset),
        ),
    ]
}

/// The compass circle under `pointer`, if any
pub fn compass_hit(frame: Rect, pointer: Point, tuning: &DropZoneTuning) -> Option<CompassZone> {
    let radius = tuning.compass_diameter / 2.0;
    compass_zones(frame, tuning)
        .into_iter()
        .find(|(_, center)| pointer.distance_to(*center) <= radius)
        .map(|(zone, _)| zone)
}

/// Nearest side of `rect` to a point inside it, with its distance.
/// Ties go left, right, top, bottom.
fn nearest_side(rect: Rect, pointer: Point) -> (Edge, f32) {
    let candidates = [
        (Edge::Left, pointer.x - rect.x),
        (Edge::Right, rect.max_x() - pointer.x),
        (Edge::Top, pointer.y - rect.y),
        (Edge::Bottom, rect.max_y() - pointer.y),
    ];
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best
}

/// The group under the pointer: floating windows first (frontmost first),
/// then docked groups
enum Hover {
    Floating(GroupId, usize),
    Docked(GroupId, Rect),
}

/// Resolves pointer locations against a layout
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DropZoneResolver {
    pub tuning: DropZoneTuning,
}

impl DropZoneResolver {
    pub fn new(tuning: DropZoneTuning) -> Self {
        Self { tuning }
    }

    /// Classify `pointer` into a drop target.
    ///
    /// Degenerate containers and pointers outside the container resolve to
    /// `DropTarget::None`.
    pub fn resolve(&self, pointer: Point, container: Size, layout: &DockLayout) -> DropTarget {
        if container.is_degenerate() || !pointer.is_finite() {
            return DropTarget::None;
        }
        let bounds = Rect::from_size(container);
        if !bounds.contains(pointer) {
            return DropTarget::None;
        }

        let hover = self.hovered_group(pointer, container, layout);

        match hover {
            Some(Hover::Floating(group, len)) => {
                // Floating windows are not part of the tree; they can only take tabs
                return DropTarget::Tab { group, index: len };
            }
            Some(Hover::Docked(group, frame)) => {
                if let Some(zone) = compass_hit(frame, pointer, &self.tuning) {
                    return match zone {
                        CompassZone::Side(side) => DropTarget::Split { group, side },
                        CompassZone::Center => DropTarget::Tab {
                            group,
                            index: layout.group(group).map_or(0, |g| g.len()),
                        },
                    };
                }
            }
            None => {}
        }

        let (edge, distance) = nearest_side(bounds, pointer);
        if distance < self.tuning.edge_dock_distance() {
            return DropTarget::Dock {
                position: edge.position(),
            };
        }

        match hover {
            Some(Hover::Docked(group, frame)) => {
                let (side, distance) = nearest_side(frame, pointer);
                if distance < self.tuning.panel_edge_band {
                    DropTarget::Split { group, side }
                } else {
                    DropTarget::Tab { group, index: 0 }
                }
            }
            // Safe zone, or open space not covered by any group
            _ => DropTarget::Dock {
                position: DockPosition::Center,
            },
        }
    }

    fn hovered_group(&self, pointer: Point, container: Size, layout: &DockLayout) -> Option<Hover> {
        let floating = layout.floating.iter().rev().find(|group| {
            group
                .frame
                .is_some_and(|frame| !frame.is_degenerate() && frame.contains(pointer))
        });
        if let Some(group) = floating {
            return Some(Hover::Floating(group.id, group.len()));
        }
        group_frames(layout, container)
            .into_iter()
            .find(|frame| !frame.rect.is_degenerate() && frame.rect.contains(pointer))
            .map(|frame| Hover::Docked(frame.group, frame.rect))
    }
}

/// Rectangle a host should highlight for a drop target
pub fn drop_preview_rect(
    target: &DropTarget,
    container: Size,
    layout: &DockLayout,
) -> Option<Rect> {
    if container.is_degenerate() {
        return None;
    }
    match *target {
        DropTarget::None => None,
        DropTarget::Dock {
            position: DockPosition::Floating,
        } => None,
        DropTarget::Dock {
            position: DockPosition::Center,
        } => Some(region_rects(layout, container).center),
        DropTarget::Dock { position } => {
            let edge = position.edge()?;
            let rects = region_rects(layout, container);
            if let Some(rect) = rects.edge(edge).filter(|_| !layout.edge(edge).collapsed) {
                return Some(rect);
            }
            // Empty or collapsed edge: preview the size it will open at
            let size = layout.edge(edge).size;
            let (w, h) = (container.width, container.height);
            Some(match edge {
                Edge::Left => Rect::new(0.0, 0.0, size.min(w), h),
                Edge::Right => Rect::new((w - size).max(0.0), 0.0, size.min(w), h),
                Edge::Top => Rect::new(0.0, 0.0, w, size.min(h)),
                Edge::Bottom => Rect::new(0.0, (h - size).max(0.0), w, size.min(h)),
            })
        }
        DropTarget::Tab { group, .. } => group_frame(layout, container, group),
        DropTarget::Split { group, side } => {
            let frame = group_frame(layout, container, group)?;
            let (first, second) = split_rects(frame, SplitDirection::for_side(side), 0.5);
            Some(if side.is_leading() { first } else { second })
        }
    }
}
