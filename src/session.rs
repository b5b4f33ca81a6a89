//! Editing sessions.
//!
//! A session holds the current configuration snapshot, the compiled output
//! for it, and a bounded history of earlier snapshots for undo. Snapshots are
//! never modified; an edit produces a new one and recompiles.

use crate::compiler::{compile_with, CompileOptions, Compiled};
use crate::endpoint::{Edit, EndpointConfig};
use std::collections::VecDeque;
use tracing::debug;

/// Earlier snapshots kept for undo. Older ones are discarded.
pub const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct EditSession {
    current: EndpointConfig,
    history: VecDeque<EndpointConfig>,
    version: usize,
    options: CompileOptions,
    compiled: Compiled,
}

impl EditSession {
    pub fn new(config: EndpointConfig) -> Self {
        Self::with_options(config, CompileOptions::default())
    }

    pub fn with_options(config: EndpointConfig, options: CompileOptions) -> Self {
        let compiled = compile_with(&config, &options);
        Self {
            current: config,
            history: VecDeque::new(),
            version: 0,
            options,
            compiled,
        }
    }

    /// The latest snapshot.
    pub fn current(&self) -> &EndpointConfig {
        &self.current
    }

    /// Output for the latest snapshot.
    pub fn compiled(&self) -> &Compiled {
        &self.compiled
    }

    /// Number of edits in effect since the session started.
    pub fn version(&self) -> usize {
        self.version
    }

    /// How many undo steps are available.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Apply an edit, producing a new snapshot, and recompile.
    pub fn apply(&mut self, edit: Edit) -> &Compiled {
        debug!(version = self.version + 1, ?edit, "Applying edit");
        let next = self.current.apply(edit);
        self.advance(next)
    }

    /// Replace the whole configuration, e.g. after loading a saved endpoint.
    pub fn replace(&mut self, config: EndpointConfig) -> &Compiled {
        self.advance(config)
    }

    fn advance(&mut self, next: EndpointConfig) -> &Compiled {
        self.compiled = compile_with(&next, &self.options);
        let previous = std::mem::replace(&mut self.current, next);
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(previous);
        self.version += 1;
        &self.compiled
    }

    /// Step back to the previous snapshot. Returns `None` when the history is empty.
    pub fn undo(&mut self) -> Option<&Compiled> {
        let previous = self.history.pop_back()?;
        self.current = previous;
        self.version -= 1;
        self.compiled = compile_with(&self.current, &self.options);
        Some(&self.compiled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::*;

    #[test]
    fn test_edits_recompile() {
        let mut session = EditSession::new(EndpointConfig::new("users"));
        assert_eq!(session.compiled().query, "SELECT * FROM users");

        session.apply(Edit::AddField);
        session.apply(Edit::UpdateField(0, FieldSpec::column("email")));
        assert_eq!(session.compiled().query, "SELECT email FROM users");
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn test_undo_restores_previous_output() {
        let mut session = EditSession::new(EndpointConfig::new("users"));
        session.apply(Edit::SetPrimaryTable("orders".into()));
        assert_eq!(session.compiled().query, "SELECT * FROM orders");

        let back = session.undo().unwrap();
        assert_eq!(back.query, "SELECT * FROM users");
        assert!(session.undo().is_none());
        assert_eq!(session.current().primary_table, "users");
    }

    #[test]
    fn test_output_matches_fresh_compile() {
        let mut session = EditSession::new(EndpointConfig::default());
        session.apply(Edit::SetPrimaryTable("users".into()));
        session.apply(Edit::AddFilter);
        session.apply(Edit::UpdateFilter(0, FilterSpec::new("age", FilterOp::Gt, "21")));
        assert_eq!(session.compiled(), &crate::compile(session.current()));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = EditSession::new(EndpointConfig::new("t0"));
        for n in 1..=HISTORY_LIMIT + 20 {
            session.apply(Edit::SetPrimaryTable(format!("t{n}")));
        }
        assert_eq!(session.undo_depth(), HISTORY_LIMIT);
        assert_eq!(session.version(), HISTORY_LIMIT + 20);

        while session.undo().is_some() {}
        assert_eq!(session.current().primary_table, "t20");
        assert_eq!(session.version(), 20);
        assert_eq!(session.compiled().query, "SELECT * FROM t20");
    }
}
