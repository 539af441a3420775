//! Panels: the leaf units of dockable content

use std::fmt;

use serde::{Deserialize, Serialize};

use super::primitives::{Rect, Size};

// ============================================================================
// Positions
// ============================================================================

/// Where a panel or region sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockPosition {
    Left,
    Right,
    Top,
    Bottom,
    Center,
    Floating,
}

impl DockPosition {
    /// The four edge positions plus center, in tree traversal order
    pub const DOCKED: [DockPosition; 5] = [
        DockPosition::Left,
        DockPosition::Right,
        DockPosition::Top,
        DockPosition::Bottom,
        DockPosition::Center,
    ];

    /// The edge this position refers to, if it is one
    pub fn edge(&self) -> Option<Edge> {
        match self {
            DockPosition::Left => Some(Edge::Left),
            DockPosition::Right => Some(Edge::Right),
            DockPosition::Top => Some(Edge::Top),
            DockPosition::Bottom => Some(Edge::Bottom),
            DockPosition::Center | DockPosition::Floating => None,
        }
    }

    pub fn is_docked(&self) -> bool {
        !matches!(self, DockPosition::Floating)
    }
}

impl fmt::Display for DockPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DockPosition::Left => "left",
            DockPosition::Right => "right",
            DockPosition::Top => "top",
            DockPosition::Bottom => "bottom",
            DockPosition::Center => "center",
            DockPosition::Floating => "floating",
        };
        f.write_str(name)
    }
}

/// One of the four outer edges of the dock container
///
/// Also used as the side of a split insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    pub fn position(&self) -> DockPosition {
        match self {
            Edge::Left => DockPosition::Left,
            Edge::Right => DockPosition::Right,
            Edge::Top => DockPosition::Top,
            Edge::Bottom => DockPosition::Bottom,
        }
    }

    /// Left/right edges are sized by width, top/bottom by height
    pub fn is_horizontal_extent(&self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    /// Whether the new content goes before the existing one when splitting
    pub fn is_leading(&self) -> bool {
        matches!(self, Edge::Left | Edge::Top)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.position().fmt(f)
    }
}

// ============================================================================
// Panel metadata
// ============================================================================

/// Unique, immutable identifier of a panel
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(String);

impl PanelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PanelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Lifecycle state of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    #[default]
    Expanded,
    Collapsed,
    Minimized,
    Floating,
    Maximized,
}

/// Size limits of a panel, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConstraints {
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    pub preferred_width: f32,
    pub preferred_height: f32,
}

impl Default for PanelConstraints {
    fn default() -> Self {
        Self {
            min_width: 100.0,
            min_height: 50.0,
            max_width: None,
            max_height: None,
            preferred_width: 250.0,
            preferred_height: 200.0,
        }
    }
}

impl PanelConstraints {
    /// Clamp a size into the min/max bounds
    pub fn clamp(&self, size: Size) -> Size {
        let width = clamp_axis(size.width, self.min_width, self.max_width);
        let height = clamp_axis(size.height, self.min_height, self.max_height);
        Size::new(width, height)
    }

    pub fn preferred(&self) -> Size {
        Size::new(self.preferred_width, self.preferred_height)
    }
}

fn clamp_axis(value: f32, min: f32, max: Option<f32>) -> f32 {
    let value = if value.is_finite() { value } else { min };
    let value = value.max(min);
    match max {
        Some(max) if max >= min => value.min(max),
        _ => value,
    }
}

/// Which gestures and controls are permitted on a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelFlags {
    pub allow_drag: bool,
    pub allow_resize: bool,
    pub allow_float: bool,
    pub allow_close: bool,
    pub allow_tabbing: bool,
}

impl Default for PanelFlags {
    fn default() -> Self {
        Self {
            allow_drag: true,
            allow_resize: true,
            allow_float: true,
            allow_close: true,
            allow_tabbing: true,
        }
    }
}

/// Host-owned handle to whatever renders the panel body. Never inspected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHandle(pub u64);

// ============================================================================
// Panel
// ============================================================================

/// A leaf unit of dockable content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    id: PanelId,
    pub title: String,
    pub icon: Option<String>,
    pub state: PanelState,
    /// Where the panel is docked, or where it returns to after being minimized
    pub position: DockPosition,
    pub preferred_size: Size,
    /// Only set while the panel is floating (or minimized from floating)
    pub floating_frame: Option<Rect>,
    constraints: PanelConstraints,
    flags: PanelFlags,
    content: ContentHandle,
}

impl Panel {
    pub fn new(id: impl Into<PanelId>, title: impl Into<String>) -> Self {
        let constraints = PanelConstraints::default();
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            state: PanelState::Expanded,
            position: DockPosition::Center,
            preferred_size: constraints.preferred(),
            floating_frame: None,
            constraints,
            flags: PanelFlags::default(),
            content: ContentHandle::default(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_constraints(mut self, constraints: PanelConstraints) -> Self {
        self.constraints = constraints;
        self.preferred_size = constraints.clamp(constraints.preferred());
        self
    }

    pub fn with_flags(mut self, flags: PanelFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_content(mut self, content: ContentHandle) -> Self {
        self.content = content;
        self
    }

    pub fn id(&self) -> &PanelId {
        &self.id
    }

    pub fn constraints(&self) -> &PanelConstraints {
        &self.constraints
    }

    pub fn flags(&self) -> PanelFlags {
        self.flags
    }

    pub fn content(&self) -> ContentHandle {
        self.content
    }

    /// Record a new docked location; clears any floating frame
    pub(crate) fn set_docked(&mut self, position: DockPosition) {
        self.position = position;
        self.state = PanelState::Expanded;
        self.floating_frame = None;
    }

    pub(crate) fn set_floating(&mut self, frame: Rect) {
        self.position = DockPosition::Floating;
        self.state = PanelState::Floating;
        self.floating_frame = Some(frame);
    }
}
