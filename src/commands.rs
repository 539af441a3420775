//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The dock core performs no I/O itself; the host runs these.

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Transient state changed (drop highlight, resize feedback); repaint only
    Redraw,
    /// The committed layout changed; repaint and persist the snapshot
    PersistLayout,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw | Cmd::PersistLayout => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Check if the layout should be written to disk
    pub fn needs_persist(&self) -> bool {
        match self {
            Cmd::PersistLayout => true,
            Cmd::None | Cmd::Redraw => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_persist()),
        }
    }

    /// Combine two optional commands
    pub fn merge(a: Option<Cmd>, b: Option<Cmd>) -> Option<Cmd> {
        match (a, b) {
            (None, b) => b,
            (a, None) => a,
            (Some(a), Some(b)) => Some(Cmd::Batch(vec![a, b])),
        }
    }
}
