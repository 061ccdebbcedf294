// src/domain/id.rs
use crate::domain::{Note, NoteId};
use serde::{Deserialize, Serialize};

/// How `add_new` picks the id of a fresh note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdStrategy {
    /// Never reuses an id within a session.
    #[default]
    Monotonic,
    /// `id = list.len()` at creation time. After a deletion the new note can
    /// share its id with a surviving note.
    ListLength,
}

#[derive(Debug, Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,
    next: u64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy, next: 0 }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Re-seed from a list that replaced the current one wholesale.
    pub fn reseed(&mut self, notes: &[Note]) {
        self.next = notes.iter().map(|n| n.id.0 + 1).max().unwrap_or(0);
    }

    pub fn next_id(&mut self, notes: &[Note]) -> NoteId {
        match self.strategy {
            IdStrategy::ListLength => NoteId(notes.len() as u64),
            IdStrategy::Monotonic => {
                // A note may have been inserted with an id past the counter
                let floor = notes.iter().map(|n| n.id.0 + 1).max().unwrap_or(0);
                let id = self.next.max(floor);
                self.next = id + 1;
                NoteId(id)
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}
