// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::cli::args::{Args, Command};
use anyhow::{Context, Result};
use application::{Action, ActionSource, NoteStore, StorageSession, UiSession};
use domain::{IdStrategy, NoteId};
use infrastructure::{wire, Config, FileNoteStore};
use std::io::Write;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{debug, info};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting bulletin with arguments");

    // Initialize configuration
    let config = match &args.config {
        Some(path) => {
            debug!(?path, "Loading config");
            Config::load(path)?
        }
        None => Config::default(),
    };
    let dir = config.notes_dir(args.dir.as_deref())?;
    info!(dir = %dir.display(), "Using notes directory");

    // Initialize infrastructure
    let store = FileNoteStore::new(&dir).with_prune_stale(config.storage.prune_stale);
    let strategy = config.notes.id_strategy;
    let mut stdout = std::io::stdout();

    match args.command {
        Command::Serve => {
            let mut session = StorageSession::new(store);
            wire::serve(&mut session, tokio::io::stdin(), tokio::io::stdout())
                .await
                .context("Storage service failed")?;
        }
        Command::Shell => {
            writeln!(stdout, "Bulletin board at {} (type `help`)", dir.display())?;
            let input = ActionSource::lines(BufReader::new(tokio::io::stdin()));
            run_session(store, strategy, input, &mut stdout).await?;
        }
        command => {
            let input = ActionSource::script(one_shot_actions(command));
            run_session(store, strategy, input, &mut stdout).await?;
        }
    }

    Ok(())
}

/// Actions a single command line invocation performs inside one session.
pub fn one_shot_actions(command: Command) -> Vec<Action> {
    match command {
        Command::List { collapsed: true } => vec![Action::Collapse, Action::ShowSidebar],
        Command::List { collapsed: false } => vec![Action::ShowSidebar],
        Command::Board => vec![Action::ShowBoard],
        Command::Add => vec![Action::AddNew],
        Command::Edit { note_id, body } => vec![Action::ChangeBody(NoteId(note_id), body)],
        Command::Delete { note_id } => vec![Action::Delete(NoteId(note_id))],
        Command::Pin { note_id } => vec![Action::TogglePin(NoteId(note_id)), Action::ShowBoard],
        Command::Shell | Command::Serve => vec![],
    }
}

/// Run both roles on the current task until the input ends or asks to close.
///
/// Storage loads on window-ready, the UI applies every action and pushes its
/// list after each mutation, and storage saves the last snapshot on close.
/// Returns the storage session so callers can inspect what was persisted.
pub async fn run_session<S, R, W>(
    store: S,
    strategy: IdStrategy,
    mut input: ActionSource<R>,
    out: &mut W,
) -> Result<StorageSession<S>>
where
    S: NoteStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (ui_link, storage_link) = application::link();
    let mut storage = StorageSession::new(store);
    let mut ui = UiSession::new(ui_link, strategy);

    let ui_side = async move {
        ui.window_ready().await?;
        while let Some(next) = input.next().await? {
            match next {
                Ok(Action::Close) => break,
                Ok(action) => {
                    if let Some(text) = ui.apply(&action) {
                        writeln!(out, "{text}")?;
                    }
                }
                Err(e) => writeln!(out, "{e} (type `help` for commands)")?,
            }
        }
        ui.close();
        Ok::<_, anyhow::Error>(())
    };

    let (ui_result, saved) = tokio::join!(ui_side, storage.run(storage_link));
    let written = saved.context("Storage side failed")?;
    ui_result.context("UI side failed")?;
    info!(written, "Session finished");

    Ok(storage)
}
