//! dockspace inspector
//!
//! Drives the dock core from recorded message scripts so layouts can be
//! examined without a host UI.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use dockspace::cli::{CliArgs, Command, OutputArgs};
use dockspace::debug_dump::{render_tree, StateDump};
use dockspace::model::{DockPosition, DockState, LayoutSnapshot, Panel};
use dockspace::persistence::LayoutStore;
use dockspace::update::update;
use dockspace::view::drop_preview_rect;
use dockspace::{DockConfig, Msg};

fn main() -> Result<()> {
    dockspace::tracing::init();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => DockConfig::load_from(path),
        None => DockConfig::load(),
    };
    let output = args.command.output();
    let pointer = args.command.pointer();

    match args.command {
        Command::Replay { script, save, .. } => {
            let state = replay(&script, config)?;
            if let Some(path) = save {
                LayoutStore::at(&path)
                    .save(&state.snapshot())
                    .map_err(anyhow::Error::msg)?;
                eprintln!("Saved snapshot to {}", path.display());
            }
            print_state(&state, output);
        }
        Command::Resolve { script, .. } => {
            let state = match script {
                Some(script) => replay(&script, config)?,
                None => DockState::new(config),
            };
            let pointer = pointer.context("resolve needs a pointer location")?;
            let container = output.container();
            let target = state.resolver().resolve(pointer, container, state.layout());
            let preview = drop_preview_rect(&target, container, state.layout());

            if output.json {
                let value = serde_json::json!({
                    "pointer": pointer,
                    "container": container,
                    "target": target,
                    "preview": preview,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", target);
                if let Some(rect) = preview {
                    println!(
                        "preview: x={} y={} w={} h={}",
                        rect.x, rect.y, rect.width, rect.height
                    );
                }
            }
        }
        Command::Show { layout, .. } => {
            let store = match layout {
                Some(path) => LayoutStore::at(path),
                None => LayoutStore::default_location().context("No config directory available")?,
            };
            let snapshot = store
                .load()
                .with_context(|| format!("No usable layout at {}", store.path().display()))?;
            let state = state_from_snapshot(config, &snapshot)?;
            print_state(&state, output);
        }
    }

    Ok(())
}

/// Apply every message in a JSON script to a fresh state
fn replay(script: &Path, config: DockConfig) -> Result<DockState> {
    let content = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let messages: Vec<Msg> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse script {}", script.display()))?;

    let mut state = DockState::new(config);
    let mut persisted = 0usize;
    for msg in messages {
        if update(&mut state, msg).is_some_and(|cmd| cmd.needs_persist()) {
            persisted += 1;
        }
    }
    tracing::info!(
        "Replayed {} with {} committed changes (version {})",
        script.display(),
        persisted,
        state.version()
    );
    Ok(state)
}

/// Register each recorded panel, then let the snapshot arrange them
fn state_from_snapshot(config: DockConfig, snapshot: &LayoutSnapshot) -> Result<DockState> {
    let mut state = DockState::new(config);
    for record in &snapshot.panels {
        let panel = Panel::new(record.id.clone(), record.id.as_str());
        state.add_panel(panel, DockPosition::Center)?;
    }
    let applied = state.restore_snapshot(snapshot);
    tracing::debug!("Applied {} snapshot records", applied);
    Ok(state)
}

fn print_state(state: &DockState, output: OutputArgs) {
    if output.json {
        println!("{}", StateDump::from_state(state, output.container()).to_json());
    } else {
        print!("{}", render_tree(state.layout()));
    }
}
