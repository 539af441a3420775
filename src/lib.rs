//! dockspace - Elm-style docking core for IDE-like panel layouts
//!
//! This crate provides the layout tree, tree surgery and drag-drop target
//! resolution for dockable panels. It owns no windows and draws nothing;
//! hosts feed it [`Msg`]s and render from the resulting [`DockState`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod debug_dump;
pub mod messages;
pub mod model;
pub mod persistence;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::DockConfig;
pub use messages::Msg;
pub use model::{DockLayout, DockState};
pub use view::{DropTarget, DropZoneResolver};
