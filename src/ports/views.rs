// src/ports/views.rs
//
// Text presenters for the sidebar and the board. Rendering is a pure
// function of the note list and local view state; every mutation goes
// through a `NoteOperations` capability.
use crate::application::note_list::NoteOperations;
use crate::domain::{Note, NoteId};
use std::fmt::Write;
use tracing::instrument;

pub const PLACEHOLDER: &str = "Write sth...";

/// What an editable entry can ask for on behalf of its own note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryIntent {
    Edit(String),
    Delete,
    TogglePin,
}

/// One editable note in the sidebar.
#[derive(Debug)]
pub struct NoteEntry<'a> {
    note: &'a Note,
    focused: bool,
}

impl<'a> NoteEntry<'a> {
    pub fn new(note: &'a Note, focused: bool) -> Self {
        Self { note, focused }
    }

    pub fn render(&self) -> String {
        let cursor = if self.focused { ">" } else { " " };
        let pin = if self.note.pin_status { "Unpin" } else { "Pin" };
        format!(
            "{cursor} #{id:<3} {body}  [Delete] [{pin}]",
            id = self.note.id,
            body = preview(&self.note.body),
        )
    }

    pub fn dispatch(&self, ops: &mut dyn NoteOperations, intent: EntryIntent) -> bool {
        dispatch(ops, self.note.id, intent)
    }
}

/// A note shown on the board.
#[derive(Debug)]
pub struct PinnedEntry<'a> {
    note: &'a Note,
}

impl<'a> PinnedEntry<'a> {
    pub fn new(note: &'a Note) -> Self {
        Self { note }
    }

    pub fn render(&self) -> String {
        format!("#{:<3} {}  [Unpin]", self.note.id, preview(&self.note.body))
    }

    pub fn unpin(&self, ops: &mut dyn NoteOperations) -> bool {
        ops.toggle_pin(self.note.id)
    }
}

fn dispatch(ops: &mut dyn NoteOperations, id: NoteId, intent: EntryIntent) -> bool {
    match intent {
        EntryIntent::Edit(body) => ops.change_body(id, &body),
        EntryIntent::Delete => ops.delete(id),
        EntryIntent::TogglePin => ops.toggle_pin(id),
    }
}

/// First line of the body, or the placeholder for an empty note.
fn preview(body: &str) -> String {
    match body.lines().next() {
        Some(line) if !body.trim().is_empty() => {
            let more = body.lines().nth(1).is_some();
            if more {
                format!("{line} ...")
            } else {
                line.to_string()
            }
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Sidebar view state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidebar {
    collapsed: bool,
    focused: Option<NoteId>,
}

impl Sidebar {
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Note that holds input focus: the one added last.
    pub fn focused(&self) -> Option<NoteId> {
        self.focused
    }

    pub fn focus(&mut self, id: Option<NoteId>) {
        self.focused = id;
    }

    /// The "Add New" control.
    pub fn add_new(&mut self, ops: &mut dyn NoteOperations) -> NoteId {
        let id = ops.add_new();
        self.focused = Some(id);
        id
    }

    pub fn dispatch(
        &mut self,
        ops: &mut dyn NoteOperations,
        id: NoteId,
        intent: EntryIntent,
    ) -> bool {
        let deleting = intent == EntryIntent::Delete;
        let changed = dispatch(ops, id, intent);
        if deleting && self.focused == Some(id) {
            self.focused = None;
        }
        changed
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render(&self, notes: &[Note]) -> String {
        let mut out = String::from("[Add New]");
        if self.collapsed {
            let _ = write!(out, "  ({} notes, collapsed)", notes.len());
            return out;
        }
        for note in notes {
            let entry = NoteEntry::new(note, self.focused == Some(note.id));
            out.push('\n');
            out.push_str(&entry.render());
        }
        out
    }
}

/// Read-only view of the pinned notes.
pub struct Board;

impl Board {
    /// Pinned notes in list order.
    pub fn pinned(notes: &[Note]) -> Vec<&Note> {
        notes.iter().filter(|n| n.pin_status).collect()
    }

    pub fn render(notes: &[Note]) -> String {
        let pinned = Self::pinned(notes);
        if pinned.is_empty() {
            return "Board is empty".to_string();
        }
        pinned
            .into_iter()
            .map(|n| PinnedEntry::new(n).render())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
