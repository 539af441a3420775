//! Layout tree: recursive regions of groups and binary splits
//!
//! Every edge of the dock and the center region is rooted in a [`LayoutNode`].
//! The tree is kept minimal at all times:
//!
//! - a `Group` node always holds at least one panel
//! - a `Split` node never has two `Empty` children; when one side empties the
//!   split is replaced in its parent slot by the surviving child
//!
//! Surgery functions take ownership of the content they insert and hand it
//! back in the `Err` variant when the target cannot be found, so a failed
//! operation never drops a panel on the floor.

use serde::{Deserialize, Serialize};

use super::group::{GroupId, PanelGroup};
use super::panel::{DockPosition, Edge, Panel, PanelId};

/// Ratio given to each child of a freshly created split
pub const DEFAULT_SPLIT_RATIO: f32 = 0.5;

/// Direction for splitting a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitDirection {
    /// Children arranged left-to-right
    Horizontal,
    /// Children arranged top-to-bottom
    Vertical,
}

impl SplitDirection {
    /// Orientation of the split created when dropping onto `side` of a group
    pub fn for_side(side: Edge) -> Self {
        if side.is_horizontal_extent() {
            SplitDirection::Horizontal
        } else {
            SplitDirection::Vertical
        }
    }
}

/// Unique identifier for a split node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitId(pub u64);

/// Allocates group and split identifiers for one layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutIds {
    next_group: u64,
    next_split: u64,
}

impl Default for LayoutIds {
    fn default() -> Self {
        Self {
            next_group: 1,
            next_split: 1,
        }
    }
}

impl LayoutIds {
    /// Generate a new group ID
    pub fn next_group_id(&mut self) -> GroupId {
        let id = GroupId(self.next_group);
        self.next_group += 1;
        id
    }

    /// Generate a new split ID
    pub fn next_split_id(&mut self) -> SplitId {
        let id = SplitId(self.next_split);
        self.next_split += 1;
        id
    }
}

/// Two child regions sharing space along one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitNode {
    pub id: SplitId,
    pub direction: SplitDirection,
    /// Fraction of the space given to `first`, in `[0, 1]`
    pub ratio: f32,
    pub first: LayoutNode,
    pub second: LayoutNode,
    /// Set while the host drags this split's divider
    #[serde(skip)]
    pub is_resizing: bool,
}

impl SplitNode {
    pub fn new(
        id: SplitId,
        direction: SplitDirection,
        first: LayoutNode,
        second: LayoutNode,
    ) -> Self {
        Self {
            id,
            direction,
            ratio: DEFAULT_SPLIT_RATIO,
            first,
            second,
            is_resizing: false,
        }
    }

    /// Store a new ratio, clamped so both children keep `min_size` of `extent`
    pub fn set_ratio(&mut self, ratio: f32, extent: f32, min_size: f32) -> f32 {
        self.ratio = clamp_split_ratio(ratio, extent, min_size);
        self.ratio
    }
}

/// Clamp a split ratio so neither child drops below `min_size` along an axis
/// of length `extent`.
///
/// When the axis is too short (or unknown) to honour the floor for both
/// children, the split is centred. Non-finite ratios fall back to the default.
pub fn clamp_split_ratio(ratio: f32, extent: f32, min_size: f32) -> f32 {
    if !ratio.is_finite() {
        return DEFAULT_SPLIT_RATIO;
    }
    let ratio = ratio.clamp(0.0, 1.0);
    if !min_size.is_finite() || min_size <= 0.0 {
        return ratio;
    }
    if !extent.is_finite() || extent <= 2.0 * min_size {
        return DEFAULT_SPLIT_RATIO;
    }
    let bound = min_size / extent;
    ratio.clamp(bound, 1.0 - bound)
}

/// A node in the layout tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutNode {
    #[default]
    Empty,
    Group(PanelGroup),
    Split(Box<SplitNode>),
}

impl LayoutNode {
    pub fn is_empty(&self) -> bool {
        matches!(self, LayoutNode::Empty)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Find a group by ID (depth-first, first child first)
    pub fn group(&self, group_id: GroupId) -> Option<&PanelGroup> {
        match self {
            LayoutNode::Empty => None,
            LayoutNode::Group(group) => (group.id == group_id).then_some(group),
            LayoutNode::Split(split) => split
                .first
                .group(group_id)
                .or_else(|| split.second.group(group_id)),
        }
    }

    pub fn group_mut(&mut self, group_id: GroupId) -> Option<&mut PanelGroup> {
        match self {
            LayoutNode::Empty => None,
            LayoutNode::Group(group) => (group.id == group_id).then_some(group),
            LayoutNode::Split(split) => match split.first.group_mut(group_id) {
                Some(group) => Some(group),
                None => split.second.group_mut(group_id),
            },
        }
    }

    /// Find the group that owns a panel
    pub fn group_containing(&self, panel_id: &PanelId) -> Option<&PanelGroup> {
        match self {
            LayoutNode::Empty => None,
            LayoutNode::Group(group) => group.contains(panel_id).then_some(group),
            LayoutNode::Split(split) => split
                .first
                .group_containing(panel_id)
                .or_else(|| split.second.group_containing(panel_id)),
        }
    }

    pub fn group_containing_mut(&mut self, panel_id: &PanelId) -> Option<&mut PanelGroup> {
        match self {
            LayoutNode::Empty => None,
            LayoutNode::Group(group) => group.contains(panel_id).then_some(group),
            LayoutNode::Split(split) => match split.first.group_containing_mut(panel_id) {
                Some(group) => Some(group),
                None => split.second.group_containing_mut(panel_id),
            },
        }
    }

    pub fn contains_panel(&self, panel_id: &PanelId) -> bool {
        self.group_containing(panel_id).is_some()
    }

    /// First group in depth-first, first-child-preferred order
    pub fn first_group(&self) -> Option<&PanelGroup> {
        match self {
            LayoutNode::Empty => None,
            LayoutNode::Group(group) => Some(group),
            LayoutNode::Split(split) => split
                .first
                .first_group()
                .or_else(|| split.second.first_group()),
        }
    }

    pub fn first_group_mut(&mut self) -> Option<&mut PanelGroup> {
        match self {
            LayoutNode::Empty => None,
            LayoutNode::Group(group) => Some(group),
            LayoutNode::Split(split) => match split.first.first_group_mut() {
                Some(group) => Some(group),
                None => split.second.first_group_mut(),
            },
        }
    }

    pub fn split(&self, split_id: SplitId) -> Option<&SplitNode> {
        match self {
            LayoutNode::Split(split) if split.id == split_id => Some(&**split),
            LayoutNode::Split(split) => split
                .first
                .split(split_id)
                .or_else(|| split.second.split(split_id)),
            _ => None,
        }
    }

    pub fn split_mut(&mut self, split_id: SplitId) -> Option<&mut SplitNode> {
        match self {
            LayoutNode::Split(split) => {
                if split.id == split_id {
                    return Some(&mut **split);
                }
                match split.first.split_mut(split_id) {
                    Some(found) => Some(found),
                    None => split.second.split_mut(split_id),
                }
            }
            _ => None,
        }
    }

    /// Collect all groups in render order
    pub fn groups(&self) -> Vec<&PanelGroup> {
        let mut out = Vec::new();
        self.collect_groups(&mut out);
        out
    }

    fn collect_groups<'a>(&'a self, out: &mut Vec<&'a PanelGroup>) {
        match self {
            LayoutNode::Empty => {}
            LayoutNode::Group(group) => out.push(group),
            LayoutNode::Split(split) => {
                split.first.collect_groups(out);
                split.second.collect_groups(out);
            }
        }
    }

    /// Collect all panels in render order
    pub fn panels(&self) -> Vec<&Panel> {
        self.groups()
            .into_iter()
            .flat_map(|group| group.panels.iter())
            .collect()
    }

    /// Apply `f` to every panel in the subtree
    pub fn for_each_panel_mut(&mut self, f: &mut impl FnMut(&mut Panel)) {
        match self {
            LayoutNode::Empty => {}
            LayoutNode::Group(group) => group.panels.iter_mut().for_each(|p| f(p)),
            LayoutNode::Split(split) => {
                split.first.for_each_panel_mut(f);
                split.second.for_each_panel_mut(f);
            }
        }
    }

    /// Apply `f` to every split in the subtree
    pub fn for_each_split_mut(&mut self, f: &mut impl FnMut(&mut SplitNode)) {
        if let LayoutNode::Split(split) = self {
            f(split);
            split.first.for_each_split_mut(f);
            split.second.for_each_split_mut(f);
        }
    }

    /// Tree depth, counting a lone group as 1
    pub fn depth(&self) -> usize {
        match self {
            LayoutNode::Empty => 0,
            LayoutNode::Group(_) => 1,
            LayoutNode::Split(split) => 1 + split.first.depth().max(split.second.depth()),
        }
    }

    // =========================================================================
    // Surgery
    // =========================================================================

    /// Insert a panel into this region.
    ///
    /// - `Empty` becomes a new single-panel group
    /// - `Group` gets the panel appended and activated
    /// - `Split` appends to its first group, depth-first, first child first
    ///
    /// Returns the group that received the panel.
    pub fn insert_panel(
        &mut self,
        mut panel: Panel,
        position: DockPosition,
        ids: &mut LayoutIds,
    ) -> GroupId {
        panel.set_docked(position);
        if let Some(group) = self.first_group_mut() {
            group.push(panel);
            return group.id;
        }
        // Empty node, or a split that somehow holds no group
        let group_id = ids.next_group_id();
        *self = LayoutNode::Group(PanelGroup::single(group_id, panel, position));
        group_id
    }

    /// Remove a panel from the subtree, collapsing empty groups and splits
    pub fn remove_panel(&mut self, panel_id: &PanelId) -> Option<Panel> {
        match self {
            LayoutNode::Empty => None,
            LayoutNode::Group(group) => {
                let panel = group.remove(panel_id)?;
                if group.is_empty() {
                    *self = LayoutNode::Empty;
                }
                Some(panel)
            }
            LayoutNode::Split(split) => {
                let panel = match split.first.remove_panel(panel_id) {
                    Some(panel) => panel,
                    None => split.second.remove_panel(panel_id)?,
                };
                self.collapse_degenerate_split();
                Some(panel)
            }
        }
    }

    /// Replace a split with one empty child by its other child
    fn collapse_degenerate_split(&mut self) {
        let survivor = match self {
            LayoutNode::Split(split) if split.first.is_empty() => {
                std::mem::take(&mut split.second)
            }
            LayoutNode::Split(split) if split.second.is_empty() => {
                std::mem::take(&mut split.first)
            }
            _ => return,
        };
        *self = survivor;
    }

    /// Replace the target group's slot with a split holding `panel` on `side`.
    ///
    /// The panel gets a new single-panel group; the split takes half the
    /// target's space. Hands the panel back if the target is not in this
    /// subtree, without consuming any IDs.
    pub fn split_group(
        &mut self,
        target: GroupId,
        mut panel: Panel,
        side: Edge,
        ids: &mut LayoutIds,
    ) -> Result<GroupId, Panel> {
        let position = match self {
            LayoutNode::Group(group) if group.id == target => group.position,
            LayoutNode::Split(split) => {
                return match split.first.split_group(target, panel, side, ids) {
                    Ok(group_id) => Ok(group_id),
                    Err(panel) => split.second.split_group(target, panel, side, ids),
                };
            }
            _ => return Err(panel),
        };

        panel.set_docked(position);
        let group_id = ids.next_group_id();
        let incoming = LayoutNode::Group(PanelGroup::single(group_id, panel, position));
        let existing = std::mem::take(self);
        let (first, second) = if side.is_leading() {
            (incoming, existing)
        } else {
            (existing, incoming)
        };
        *self = LayoutNode::Split(Box::new(SplitNode::new(
            ids.next_split_id(),
            SplitDirection::for_side(side),
            first,
            second,
        )));
        Ok(group_id)
    }

    /// Insert a panel into an existing group's tab strip at `min(index, len)`.
    ///
    /// Returns the final index, or the panel if the group is not found.
    pub fn insert_into_group(
        &mut self,
        target: GroupId,
        panel: Panel,
        index: usize,
    ) -> Result<usize, Panel> {
        match self.group_mut(target) {
            Some(group) => Ok(group.insert(index, panel)),
            None => Err(panel),
        }
    }
}
