//! Dock configuration persistence
//!
//! Stores tuning values in `~/.config/dockspace/config.yaml`. Every field has a
//! default so partial files are fine.

use serde::{Deserialize, Serialize};

use crate::model::Edge;

/// Sizes and floors for edge regions and splits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Initial width of the left and right edges
    pub default_side_width: f32,
    /// Initial height of the top and bottom edges
    pub default_edge_height: f32,
    /// Floor for left/right edge widths
    pub min_edge_width: f32,
    /// Floor for top/bottom edge heights
    pub min_edge_height: f32,
    /// Thickness of a collapsed edge strip
    pub collapsed_edge_size: f32,
    /// Floor for either child of a split, along the split axis
    pub min_split_pane_size: f32,
    /// Thickness of the draggable bar between split children
    pub splitter_width: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            default_side_width: 250.0,
            default_edge_height: 200.0,
            min_edge_width: 100.0,
            min_edge_height: 50.0,
            collapsed_edge_size: 28.0,
            min_split_pane_size: 60.0,
            splitter_width: 6.0,
        }
    }
}

impl LayoutMetrics {
    /// Initial size of an edge along its resize axis
    pub fn default_edge_size(&self, edge: Edge) -> f32 {
        if edge.is_horizontal_extent() {
            self.default_side_width
        } else {
            self.default_edge_height
        }
    }

    /// Smallest size an expanded edge may be resized to
    pub fn min_edge_size(&self, edge: Edge) -> f32 {
        if edge.is_horizontal_extent() {
            self.min_edge_width
        } else {
            self.min_edge_height
        }
    }

    /// Replace unusable values with defaults and lift initial edge sizes to
    /// their floors
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let min_edge_width = checked(
            "layout.min_edge_width",
            self.min_edge_width,
            defaults.min_edge_width,
        );
        let min_edge_height = checked(
            "layout.min_edge_height",
            self.min_edge_height,
            defaults.min_edge_height,
        );
        let default_side_width = checked(
            "layout.default_side_width",
            self.default_side_width,
            defaults.default_side_width,
        );
        let default_edge_height = checked(
            "layout.default_edge_height",
            self.default_edge_height,
            defaults.default_edge_height,
        );

        Self {
            default_side_width: default_side_width.max(min_edge_width),
            default_edge_height: default_edge_height.max(min_edge_height),
            min_edge_width,
            min_edge_height,
            collapsed_edge_size: checked(
                "layout.collapsed_edge_size",
                self.collapsed_edge_size,
                defaults.collapsed_edge_size,
            ),
            min_split_pane_size: checked(
                "layout.min_split_pane_size",
                self.min_split_pane_size,
                defaults.min_split_pane_size,
            ),
            splitter_width: checked(
                "layout.splitter_width",
                self.splitter_width,
                defaults.splitter_width,
            ),
        }
    }
}

/// A config distance must be finite and non-negative
fn checked(name: &str, value: f32, default: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!("Invalid {} ({}), using {}", name, value, default);
        default
    }
}

/// Distances used when classifying a drag pointer into a drop target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropZoneTuning {
    /// Band along the container boundary that docks to an edge
    pub edge_threshold: f32,
    /// Inner part of the edge band that resolves to center instead
    pub safe_zone_inset: f32,
    /// Band along a panel's own boundary that splits the panel
    pub panel_edge_band: f32,
    /// Diameter of each compass indicator circle
    pub compass_diameter: f32,
    /// Gap between a panel edge and its side compass circle
    pub compass_inset: f32,
}

impl Default for DropZoneTuning {
    fn default() -> Self {
        Self {
            edge_threshold: 80.0,
            safe_zone_inset: 20.0,
            panel_edge_band: 40.0,
            compass_diameter: 40.0,
            compass_inset: 16.0,
        }
    }
}

impl DropZoneTuning {
    /// Distance from the container boundary below which a pointer docks to that edge
    pub fn edge_dock_distance(&self) -> f32 {
        (self.edge_threshold - self.safe_zone_inset).max(0.0)
    }

    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            edge_threshold: checked(
                "drop_zones.edge_threshold",
                self.edge_threshold,
                defaults.edge_threshold,
            ),
            safe_zone_inset: checked(
                "drop_zones.safe_zone_inset",
                self.safe_zone_inset,
                defaults.safe_zone_inset,
            ),
            panel_edge_band: checked(
                "drop_zones.panel_edge_band",
                self.panel_edge_band,
                defaults.panel_edge_band,
            ),
            compass_diameter: checked(
                "drop_zones.compass_diameter",
                self.compass_diameter,
                defaults.compass_diameter,
            ),
            compass_inset: checked(
                "drop_zones.compass_inset",
                self.compass_inset,
                defaults.compass_inset,
            ),
        }
    }
}

/// Pointer movement needed before a press turns into a drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragTuning {
    pub start_threshold: f32,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            start_threshold: 4.0,
        }
    }
}

/// Dock configuration that persists across sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    #[serde(default)]
    pub layout: LayoutMetrics,
    #[serde(default)]
    pub drop_zones: DropZoneTuning,
    #[serde(default)]
    pub drag: DragTuning,
}

impl DockConfig {
    /// Copy with every distance checked; see [`LayoutMetrics::sanitized`]
    pub fn sanitized(self) -> Self {
        Self {
            layout: self.layout.sanitized(),
            drop_zones: self.drop_zones.sanitized(),
            drag: DragTuning {
                start_threshold: checked(
                    "drag.start_threshold",
                    self.drag.start_threshold,
                    DragTuning::default().start_threshold,
                ),
            },
        }
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse config from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document parses as null; treat it as all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str::<Self>(content).map(Self::sanitized)
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_thresholds() {
        let config = DockConfig::default();
        assert_eq!(config.drop_zones.edge_threshold, 80.0);
        assert_eq!(config.drop_zones.edge_dock_distance(), 60.0);
        assert_eq!(config.drop_zones.panel_edge_band, 40.0);
        assert_eq!(config.layout.min_edge_width, 100.0);
        assert_eq!(config.layout.min_edge_height, 50.0);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = "drop_zones:\n  edge_threshold: 120\n";
        let config = DockConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.drop_zones.edge_threshold, 120.0);
        assert_eq!(config.drop_zones.safe_zone_inset, 20.0);
        assert_eq!(config.layout, LayoutMetrics::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(DockConfig::from_yaml("").unwrap(), DockConfig::default());
    }

    #[test]
    fn test_unusable_values_fall_back_to_defaults() {
        let yaml = "layout:\n  min_edge_width: .nan\n  splitter_width: -3\n\
                    drag:\n  start_threshold: .inf\n";
        let config = DockConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.layout.min_edge_width, 100.0);
        assert_eq!(config.layout.splitter_width, 6.0);
        assert_eq!(config.drag.start_threshold, 4.0);
    }

    #[test]
    fn test_default_edge_size_lifted_to_floor() {
        let metrics = LayoutMetrics {
            default_side_width: 80.0,
            min_edge_width: 150.0,
            ..LayoutMetrics::default()
        }
        .sanitized();
        assert_eq!(metrics.default_side_width, 150.0);
        assert_eq!(metrics.default_edge_height, 200.0);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(DockConfig::from_yaml("layout: [not, a, map]").is_err());
    }
}
