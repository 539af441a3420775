//! Tests for config file loading and saving

use dockspace::config::{DockConfig, DropZoneTuning};
use dockspace::model::{DockPosition, DockState, Edge, Panel, Point};
use dockspace::view::DropTarget;

#[test]
fn test_save_then_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let mut config = DockConfig::default();
    config.drop_zones.edge_threshold = 120.0;
    config.layout.default_side_width = 320.0;
    config.drag.start_threshold = 8.0;
    config.save_to(&path).unwrap();

    assert_eq!(DockConfig::load_from(&path), config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = DockConfig::load_from(&dir.path().join("absent.yaml"));
    assert_eq!(config, DockConfig::default());
}

#[test]
fn test_unparseable_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "drop_zones: [1, 2, 3]\n").unwrap();

    assert_eq!(DockConfig::load_from(&path), DockConfig::default());
}

#[test]
fn test_loaded_tuning_drives_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "drop_zones:\n  edge_threshold: 150\n  safe_zone_inset: 10\n",
    )
    .unwrap();

    let config = DockConfig::load_from(&path);
    assert_eq!(
        config.drop_zones,
        DropZoneTuning {
            edge_threshold: 150.0,
            safe_zone_inset: 10.0,
            ..DropZoneTuning::default()
        }
    );

    let state = DockState::new(config);
    let target = state.resolver().resolve(
        Point::new(130.0, 400.0),
        dockspace::model::Size::new(1000.0, 800.0),
        state.layout(),
    );
    assert_eq!(
        target,
        DropTarget::Dock {
            position: DockPosition::Left
        }
    );
}

#[test]
fn test_new_metrics_reclamp_edges() {
    let mut state = DockState::default();
    state
        .add_panel(Panel::new("a", "A"), DockPosition::Left)
        .unwrap();
    assert_eq!(state.layout().left.size, 250.0);

    let mut config = DockConfig::default();
    config.layout.min_edge_width = 400.0;
    state.set_config(config);

    assert_eq!(state.layout().edge(Edge::Left).size, 400.0);
    assert!(state.layout().validate().is_ok());
}

#[test]
fn test_nan_floor_in_config_does_not_break_layout() {
    let config = DockConfig::from_yaml("layout:\n  min_edge_width: .nan\n").unwrap();
    assert_eq!(config.layout.min_edge_width, 100.0);

    let mut state = DockState::new(config);
    state
        .add_panel(Panel::new("a", "A"), DockPosition::Left)
        .unwrap();
    assert_eq!(state.layout().left.size, 250.0);
    assert!(state.layout().validate().is_ok());
}

#[test]
fn test_hand_built_config_is_checked_on_use() {
    let mut config = DockConfig::default();
    config.layout.min_edge_height = f32::NAN;
    config.layout.default_side_width = 40.0;

    let mut state = DockState::new(config);
    assert_eq!(state.config().layout.min_edge_height, 50.0);
    state
        .add_panel(Panel::new("a", "A"), DockPosition::Left)
        .unwrap();
    state
        .add_panel(Panel::new("b", "B"), DockPosition::Bottom)
        .unwrap();
    assert_eq!(state.layout().left.size, 100.0);
    assert!(state.layout().validate().is_ok());
}
