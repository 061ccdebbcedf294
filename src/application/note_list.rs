// src/application/note_list.rs
use crate::domain::{IdGenerator, IdStrategy, Note, NoteId};
use tracing::{debug, instrument};

/// The four mutating operations views may invoke.
///
/// Views receive this capability next to plain `Note` data instead of holding
/// callbacks inside each note. Every operation is total: an unknown id is a
/// no-op and the return value reports whether anything changed.
pub trait NoteOperations {
    fn add_new(&mut self) -> NoteId;
    fn change_body(&mut self, id: NoteId, body: &str) -> bool;
    fn delete(&mut self, id: NoteId) -> bool;
    fn toggle_pin(&mut self, id: NoteId) -> bool;
}

/// Ordered collection of notes owned by the UI role for one session.
#[derive(Debug, Clone, Default)]
pub struct NoteList {
    notes: Vec<Note>,
    ids: IdGenerator,
}

impl NoteList {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            notes: Vec::new(),
            ids: IdGenerator::new(strategy),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Pinned notes in list order.
    pub fn pinned(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|n| n.pin_status)
    }

    /// Wholesale replacement with data that came from storage.
    #[instrument(level = "debug", skip_all, fields(count = notes.len()))]
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.ids.reseed(&notes);
        self.notes = notes;
    }

    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.clone()
    }
}

impl NoteOperations for NoteList {
    fn add_new(&mut self) -> NoteId {
        let id = self.ids.next_id(&self.notes);
        self.notes.push(Note::new(id));
        debug!(%id, strategy = ?self.ids.strategy(), "Added note");
        id
    }

    fn change_body(&mut self, id: NoteId, body: &str) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.body = body.to_string();
                true
            }
            None => {
                debug!(%id, "change_body on unknown note ignored");
                false
            }
        }
    }

    fn delete(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        let removed = before - self.notes.len();
        if removed == 0 {
            debug!(%id, "delete on unknown note ignored");
        }
        removed > 0
    }

    fn toggle_pin(&mut self, id: NoteId) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.pin_status = !note.pin_status;
                true
            }
            None => {
                debug!(%id, "toggle_pin on unknown note ignored");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(ids: &[u64], strategy: IdStrategy) -> NoteList {
        let mut list = NoteList::new(strategy);
        list.replace_all(
            ids.iter()
                .map(|&id| Note {
                    id: NoteId(id),
                    body: format!("note {id}"),
                    pin_status: false,
                })
                .collect(),
        );
        list
    }

    fn ids(list: &NoteList) -> Vec<u64> {
        list.notes().iter().map(|n| n.id.0).collect()
    }

    #[test]
    fn given_empty_list_when_adding_then_appends_blank_unpinned_note() {
        // Arrange
        let mut list = NoteList::default();

        // Act
        let id = list.add_new();

        // Assert
        assert_eq!(id, NoteId(0));
        assert_eq!(list.notes(), &[Note::new(NoteId(0))]);
    }

    #[test]
    fn given_note_when_changing_body_then_replaces_body() {
        let mut list = list_with(&[0, 1], IdStrategy::Monotonic);

        assert!(list.change_body(NoteId(1), "updated"));

        assert_eq!(list.get(NoteId(1)).unwrap().body, "updated");
        assert_eq!(list.get(NoteId(0)).unwrap().body, "note 0");
    }

    #[test]
    fn given_three_notes_when_deleting_middle_then_keeps_relative_order() {
        // Arrange
        let mut list = list_with(&[0, 1, 2], IdStrategy::Monotonic);

        // Act
        let removed = list.delete(NoteId(1));

        // Assert
        assert!(removed);
        assert_eq!(ids(&list), vec![0, 2]);
    }

    #[test]
    fn given_missing_id_when_mutating_then_list_unchanged() {
        // Arrange
        let mut list = list_with(&[0, 1, 2], IdStrategy::Monotonic);
        let before = list.snapshot();

        // Act
        let changed = list.change_body(NoteId(42), "x")
            | list.delete(NoteId(42))
            | list.toggle_pin(NoteId(42));

        // Assert
        assert!(!changed);
        assert_eq!(list.notes(), before.as_slice());
    }

    #[test]
    fn given_note_when_toggling_pin_twice_then_restores_state() {
        let mut list = list_with(&[0], IdStrategy::Monotonic);

        list.toggle_pin(NoteId(0));
        assert!(list.get(NoteId(0)).unwrap().pin_status);

        list.toggle_pin(NoteId(0));
        assert!(!list.get(NoteId(0)).unwrap().pin_status);
    }

    #[test]
    fn given_mixed_pins_when_listing_pinned_then_keeps_list_order() {
        let mut list = list_with(&[0, 1, 2, 3], IdStrategy::Monotonic);
        list.toggle_pin(NoteId(3));
        list.toggle_pin(NoteId(1));

        let pinned: Vec<u64> = list.pinned().map(|n| n.id.0).collect();

        assert_eq!(pinned, vec![1, 3]);
    }

    #[test]
    fn given_monotonic_ids_when_adding_after_delete_then_ids_stay_unique() {
        // Arrange
        let mut list = list_with(&[0, 1], IdStrategy::Monotonic);

        // Act
        list.delete(NoteId(0));
        let id = list.add_new();

        // Assert
        assert_eq!(id, NoteId(2));
        assert_eq!(ids(&list), vec![1, 2]);
    }

    #[test]
    fn given_list_length_ids_when_adding_after_delete_then_ids_collide() {
        // Arrange
        let mut list = list_with(&[0, 1], IdStrategy::ListLength);

        // Act
        list.delete(NoteId(0));
        let id = list.add_new();

        // Assert
        assert_eq!(id, NoteId(1));
        assert_eq!(ids(&list), vec![1, 1]);
    }

    #[test]
    fn given_colliding_ids_when_changing_body_then_only_first_match_changes() {
        let mut list = list_with(&[0, 1], IdStrategy::ListLength);
        list.delete(NoteId(0));
        list.add_new();

        list.change_body(NoteId(1), "first");

        assert_eq!(list.notes()[0].body, "first");
        assert_eq!(list.notes()[1].body, "");
    }

    #[test]
    fn given_colliding_ids_when_deleting_then_removes_all_matches() {
        let mut list = list_with(&[0, 1], IdStrategy::ListLength);
        list.delete(NoteId(0));
        list.add_new();

        list.delete(NoteId(1));

        assert!(list.is_empty());
    }
}
