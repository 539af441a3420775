//! Geometry, hit-testing and drop-zone resolution
//!
//! Pure functions over a [`DockLayout`](crate::model::DockLayout) and a
//! container size. Nothing here mutates the layout.

pub mod drop_zone;
pub mod geometry;
pub mod hit_test;

pub use drop_zone::{compass_zones, drop_preview_rect, CompassZone, DropTarget, DropZoneResolver};
pub use geometry::{
    edge_handles, group_frame, group_frames, region_rects, split_bar, splitter_bars, GroupFrame,
    RegionRects, SplitterBar,
};
pub use hit_test::{hit_test, HitTarget};
