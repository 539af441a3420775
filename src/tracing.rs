//! Tracing setup and layout diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=drop_zone=debug,message=debug` - scoped filtering
//! - `RUST_LOG=dockspace::model::dock_state=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/dockspace/logs/dockspace.log` with daily
//! rotation. File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{DockLayout, DockState, LayoutNode};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. The file layer
/// is skipped (with a warning on stderr) when no config directory exists.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight counts describing a layout, for diffing across updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSummary {
    pub docked_panels: usize,
    pub groups: usize,
    pub splits: usize,
    pub floating: usize,
    pub minimized: usize,
    pub collapsed_edges: usize,
}

impl LayoutSummary {
    pub fn from_layout(layout: &DockLayout) -> Self {
        let roots = layout.roots();
        Self {
            docked_panels: roots.iter().map(|(_, root)| root.panels().len()).sum(),
            groups: roots.iter().map(|(_, root)| root.groups().len()).sum(),
            splits: roots.iter().map(|(_, root)| count_splits(root)).sum(),
            floating: layout.floating.len(),
            minimized: layout.minimized.len(),
            collapsed_edges: crate::model::Edge::ALL
                .iter()
                .filter(|edge| layout.edge(**edge).collapsed)
                .count(),
        }
    }

    pub fn from_state(state: &DockState) -> Self {
        Self::from_layout(state.layout())
    }

    /// Generate a diff description between two summaries
    pub fn diff(&self, other: &LayoutSummary) -> Option<String> {
        let fields = [
            ("docked", self.docked_panels, other.docked_panels),
            ("groups", self.groups, other.groups),
            ("splits", self.splits, other.splits),
            ("floating", self.floating, other.floating),
            ("minimized", self.minimized, other.minimized),
            ("collapsed", self.collapsed_edges, other.collapsed_edges),
        ];
        let changes: Vec<String> = fields
            .iter()
            .filter(|(_, before, after)| before != after)
            .map(|(name, before, after)| format!("{}: {} → {}", name, before, after))
            .collect();

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn count_splits(node: &LayoutNode) -> usize {
    match node {
        LayoutNode::Split(split) => 1 + count_splits(&split.first) + count_splits(&split.second),
        _ => 0,
    }
}
