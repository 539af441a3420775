//! Layout dumps for development diagnostics
//!
//! Two forms: an indented text tree for terminals and a JSON document with
//! resolved frames for tooling. Both are used by the `dockspace` CLI.

use serde::Serialize;
use std::fmt::Write as _;

use crate::model::{
    DockLayout, DockPosition, DockState, LayoutNode, PanelGroup, PanelState, Rect, Size,
    SplitDirection,
};
use crate::view::{group_frames, region_rects, splitter_bars};

#[derive(Serialize)]
pub struct StateDump {
    pub version: u64,
    pub container: Size,
    pub active_panel: Option<String>,
    pub maximized: Option<String>,
    pub drag: String,
    pub regions: Vec<RegionDump>,
    pub floating: Vec<GroupDump>,
    pub minimized: Vec<String>,
}

#[derive(Serialize)]
pub struct RegionDump {
    pub position: DockPosition,
    /// Configured size; zero for the center
    pub size: f32,
    pub collapsed: bool,
    pub rect: Option<Rect>,
    pub tree: NodeDump,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeDump {
    Empty,
    Group(GroupDump),
    Split {
        id: u64,
        direction: SplitDirection,
        ratio: f32,
        splitter: Option<Rect>,
        first: Box<NodeDump>,
        second: Box<NodeDump>,
    },
}

#[derive(Serialize)]
pub struct GroupDump {
    pub id: u64,
    pub active_index: usize,
    pub rect: Option<Rect>,
    pub panels: Vec<PanelDump>,
}

#[derive(Serialize)]
pub struct PanelDump {
    pub id: String,
    pub title: String,
    pub state: PanelState,
}

impl StateDump {
    pub fn from_state(state: &DockState, container: Size) -> Self {
        let layout = state.layout();
        let rects = region_rects(layout, container);
        let frames = Frames::new(layout, container);

        let regions = DockPosition::DOCKED
            .iter()
            .map(|&position| {
                let (size, collapsed) = match position.edge() {
                    Some(edge) => {
                        let region = layout.edge(edge);
                        (region.size, region.collapsed)
                    }
                    None => (0.0, false),
                };
                RegionDump {
                    position,
                    size,
                    collapsed,
                    rect: rects.get(position),
                    tree: layout
                        .root(position)
                        .map(|root| node_dump(root, &frames))
                        .unwrap_or(NodeDump::Empty),
                }
            })
            .collect();

        Self {
            version: state.version(),
            container,
            active_panel: state.active_panel().map(|id| id.to_string()),
            maximized: state.maximized().map(|id| id.to_string()),
            drag: format!("{:?}", state.drag()),
            regions,
            floating: layout
                .floating
                .iter()
                .map(|group| group_dump(group, &frames))
                .collect(),
            minimized: layout.minimized.iter().map(|p| p.id().to_string()).collect(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

/// Resolved rectangles, looked up by id while walking the tree
struct Frames {
    groups: Vec<(u64, Rect)>,
    splits: Vec<(u64, Rect)>,
}

impl Frames {
    fn new(layout: &DockLayout, container: Size) -> Self {
        Self {
            groups: group_frames(layout, container)
                .into_iter()
                .map(|f| (f.group.0, f.rect))
                .collect(),
            splits: splitter_bars(layout, container)
                .into_iter()
                .map(|bar| (bar.split.0, bar.rect))
                .collect(),
        }
    }

    fn group(&self, id: u64) -> Option<Rect> {
        self.groups.iter().find(|(g, _)| *g == id).map(|(_, r)| *r)
    }

    fn splitter(&self, id: u64) -> Option<Rect> {
        self.splits.iter().find(|(s, _)| *s == id).map(|(_, r)| *r)
    }
}

fn node_dump(node: &LayoutNode, frames: &Frames) -> NodeDump {
    match node {
        LayoutNode::Empty => NodeDump::Empty,
        LayoutNode::Group(group) => NodeDump::Group(group_dump(group, frames)),
        LayoutNode::Split(split) => NodeDump::Split {
            id: split.id.0,
            direction: split.direction,
            ratio: split.ratio,
            splitter: frames.splitter(split.id.0),
            first: Box::new(node_dump(&split.first, frames)),
            second: Box::new(node_dump(&split.second, frames)),
        },
    }
}

fn group_dump(group: &PanelGroup, frames: &Frames) -> GroupDump {
    GroupDump {
        id: group.id.0,
        active_index: group.active_index,
        rect: frames.group(group.id.0).or(group.frame),
        panels: group
            .panels
            .iter()
            .map(|p| PanelDump {
                id: p.id().to_string(),
                title: p.title.clone(),
                state: p.state,
            })
            .collect(),
    }
}

// ============================================================================
// Text tree
// ============================================================================

/// Render the layout as an indented tree
///
/// ```text
/// left (250, expanded)
///   group 1 [explorer*, search]
/// center
///   split 3 horizontal 0.50
///     group 2 [editor*]
///     group 4 [preview*]
/// ```
pub fn render_tree(layout: &DockLayout) -> String {
    let mut out = String::new();

    for position in DockPosition::DOCKED {
        let Some(root) = layout.root(position).filter(|root| !root.is_empty()) else {
            continue;
        };
        match position.edge() {
            Some(edge) => {
                let region = layout.edge(edge);
                let state = if region.collapsed {
                    "collapsed"
                } else {
                    "expanded"
                };
                let _ = writeln!(out, "{} ({}, {})", position, region.size, state);
            }
            None => {
                let _ = writeln!(out, "{}", position);
            }
        }
        render_node(&mut out, root, 1);
    }

    if !layout.floating.is_empty() {
        let _ = writeln!(out, "floating");
        for group in &layout.floating {
            render_group(&mut out, group, 1);
        }
    }

    if !layout.minimized.is_empty() {
        let ids: Vec<&str> = layout.minimized.iter().map(|p| p.id().as_str()).collect();
        let _ = writeln!(out, "minimized [{}]", ids.join(", "));
    }

    out
}

fn render_node(out: &mut String, node: &LayoutNode, depth: usize) {
    match node {
        LayoutNode::Empty => {
            let _ = writeln!(out, "{}(empty)", indent(depth));
        }
        LayoutNode::Group(group) => render_group(out, group, depth),
        LayoutNode::Split(split) => {
            let direction = match split.direction {
                SplitDirection::Horizontal => "horizontal",
                SplitDirection::Vertical => "vertical",
            };
            let _ = writeln!(
                out,
                "{}split {} {} {:.2}",
                indent(depth),
                split.id.0,
                direction,
                split.ratio
            );
            render_node(out, &split.first, depth + 1);
            render_node(out, &split.second, depth + 1);
        }
    }
}

fn render_group(out: &mut String, group: &PanelGroup, depth: usize) {
    let tabs: Vec<String> = group
        .panels
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if i == group.active_index {
                format!("{}*", p.id())
            } else {
                p.id().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}group {} [{}]", indent(depth), group.id.0, tabs.join(", "));
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
