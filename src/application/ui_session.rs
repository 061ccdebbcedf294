// src/application/ui_session.rs
use crate::application::note_list::{NoteList, NoteOperations};
use crate::application::protocol::UiLink;
use crate::domain::{DomainError, IdStrategy, Note, NoteId, StorageEvent, UiEvent};
use crate::ports::views::{Board, EntryIntent, Sidebar};
use std::fmt;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, info, instrument};

/// A user action handled by the UI role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddNew,
    ChangeBody(NoteId, String),
    Delete(NoteId),
    TogglePin(NoteId),
    ShowSidebar,
    ShowBoard,
    Collapse,
    Expand,
    Help,
    Close,
}

pub const SHELL_HELP: &str = "\
Commands:
  add                 add a new note
  edit <id> <text>    replace the body of a note
  delete <id>         delete a note
  pin <id>            pin or unpin a note
  list                show the sidebar
  board               show pinned notes
  collapse | expand   collapse or expand the sidebar
  help                show this help
  quit                save and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseActionError(pub String);

impl fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseActionError {}

fn parse_id(arg: Option<&str>) -> Result<NoteId, ParseActionError> {
    let raw = arg.ok_or_else(|| ParseActionError("missing note id".to_string()))?;
    raw.parse::<u64>()
        .map(NoteId)
        .map_err(|_| ParseActionError(format!("invalid note id: {raw}")))
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();
        match command {
            "add" | "new" => Ok(Action::AddNew),
            "edit" => {
                let (id, body) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Ok(Action::ChangeBody(parse_id(Some(id))?, body.to_string()))
            }
            "delete" | "rm" => Ok(Action::Delete(parse_id(rest.split_whitespace().next())?)),
            "pin" | "unpin" => Ok(Action::TogglePin(parse_id(rest.split_whitespace().next())?)),
            "list" | "ls" => Ok(Action::ShowSidebar),
            "board" => Ok(Action::ShowBoard),
            "collapse" => Ok(Action::Collapse),
            "expand" => Ok(Action::Expand),
            "help" | "?" => Ok(Action::Help),
            "quit" | "exit" | "close" => Ok(Action::Close),
            other => Err(ParseActionError(format!("unknown command: {other}"))),
        }
    }
}

/// Where the UI role takes its actions from.
pub enum ActionSource<R> {
    /// A fixed list, e.g. from one command line invocation.
    Script(std::vec::IntoIter<Action>),
    /// One command per line, e.g. an interactive shell.
    Lines(Lines<R>),
}

impl ActionSource<tokio::io::Empty> {
    pub fn script(actions: Vec<Action>) -> Self {
        ActionSource::Script(actions.into_iter())
    }
}

impl<R: AsyncBufRead + Unpin> ActionSource<R> {
    pub fn lines(reader: R) -> Self {
        ActionSource::Lines(reader.lines())
    }

    /// Next action, or a parse error for a bad line. `None` at end of input.
    pub async fn next(&mut self) -> std::io::Result<Option<Result<Action, ParseActionError>>> {
        match self {
            ActionSource::Script(actions) => Ok(actions.next().map(Ok)),
            ActionSource::Lines(lines) => loop {
                match lines.next_line().await? {
                    None => return Ok(None),
                    Some(line) if line.trim().is_empty() => continue,
                    Some(line) => return Ok(Some(line.parse())),
                }
            },
        }
    }
}

/// Mutations that push the full list to storage once applied.
struct SyncedNotes<'a> {
    notes: &'a mut NoteList,
    link: &'a UiLink,
}

impl<'a> SyncedNotes<'a> {
    fn new(notes: &'a mut NoteList, link: &'a UiLink) -> Self {
        Self { notes, link }
    }

    fn push(&self) {
        debug!(count = self.notes.len(), "Pushing snapshot");
        self.link.send(UiEvent::Data(self.notes.snapshot()));
    }
}

impl NoteOperations for SyncedNotes<'_> {
    fn add_new(&mut self) -> NoteId {
        let id = self.notes.add_new();
        self.push();
        id
    }

    fn change_body(&mut self, id: NoteId, body: &str) -> bool {
        let changed = self.notes.change_body(id, body);
        self.push();
        changed
    }

    fn delete(&mut self, id: NoteId) -> bool {
        let changed = self.notes.delete(id);
        self.push();
        changed
    }

    fn toggle_pin(&mut self, id: NoteId) -> bool {
        let changed = self.notes.toggle_pin(id);
        self.push();
        changed
    }
}

/// The UI role: owns the note list for the session and the view state.
pub struct UiSession {
    notes: NoteList,
    sidebar: Sidebar,
    link: UiLink,
}

impl UiSession {
    pub fn new(link: UiLink, strategy: IdStrategy) -> Self {
        Self {
            notes: NoteList::new(strategy),
            sidebar: Sidebar::default(),
            link,
        }
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.notes()
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// Signal window-ready and take storage's reply as the initial state.
    #[instrument(level = "debug", skip(self))]
    pub async fn window_ready(&mut self) -> Result<(), DomainError> {
        self.link.send(UiEvent::Ready);
        let StorageEvent::Data(stored) = self.link.recv().await?;
        info!(count = stored.len(), "Received notes from storage");
        self.notes
            .replace_all(stored.into_iter().map(Note::from).collect());
        // Each mounted entry grabs focus, so the last one keeps it.
        self.sidebar.focus(self.notes.notes().last().map(|n| n.id));
        Ok(())
    }

    /// Mutation capability for views, pushing after every operation.
    pub fn operations(&mut self) -> impl NoteOperations + '_ {
        SyncedNotes::new(&mut self.notes, &self.link)
    }

    /// Apply one action and return what should be shown to the user.
    pub fn apply(&mut self, action: &Action) -> Option<String> {
        debug!(?action, "Applying action");
        match action {
            Action::AddNew => {
                let id = self
                    .sidebar
                    .add_new(&mut SyncedNotes::new(&mut self.notes, &self.link));
                Some(format!("Added note {id}"))
            }
            Action::ChangeBody(id, body) => {
                self.sidebar.dispatch(
                    &mut SyncedNotes::new(&mut self.notes, &self.link),
                    *id,
                    EntryIntent::Edit(body.clone()),
                );
                None
            }
            Action::Delete(id) => {
                self.sidebar.dispatch(
                    &mut SyncedNotes::new(&mut self.notes, &self.link),
                    *id,
                    EntryIntent::Delete,
                );
                None
            }
            Action::TogglePin(id) => {
                self.sidebar.dispatch(
                    &mut SyncedNotes::new(&mut self.notes, &self.link),
                    *id,
                    EntryIntent::TogglePin,
                );
                None
            }
            Action::ShowSidebar => Some(self.sidebar.render(self.notes.notes())),
            Action::ShowBoard => Some(Board::render(self.notes.notes())),
            Action::Collapse => {
                self.sidebar.set_collapsed(true);
                None
            }
            Action::Expand => {
                self.sidebar.set_collapsed(false);
                None
            }
            Action::Help => Some(SHELL_HELP.to_string()),
            Action::Close => None,
        }
    }

    /// Ask the storage role to save and exit.
    pub fn close(self) {
        info!("Closing session");
        self.link.send(UiEvent::Close);
    }
}
