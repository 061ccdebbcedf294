// src/infrastructure/wire.rs
//
// JSON Lines framing for running the storage role in its own process:
// one message per line, e.g. `{"channel":"data","payload":[...]}`.
use crate::application::{NoteStore, StorageLink, StorageSession};
use crate::domain::{DomainError, StorageEvent, UiEvent};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::sync::mpsc;
use tracing::{debug, error, instrument, trace};

pub struct FrameWriter<W> {
    inner: W,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub async fn send<M: Serialize>(&mut self, message: &M) -> Result<(), DomainError> {
        let mut line =
            serde_json::to_vec(message).map_err(|e| DomainError::Protocol(e.to_string()))?;
        line.push(b'\n');
        self.inner
            .write_all(&line)
            .await
            .map_err(|e| DomainError::Protocol(format!("write failed: {e}")))?;
        self.inner
            .flush()
            .await
            .map_err(|e| DomainError::Protocol(format!("flush failed: {e}")))
    }
}

pub struct FrameReader<R> {
    lines: Lines<BufReader<R>>,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            lines: BufReader::new(inner).lines(),
        }
    }

    /// Next decoded frame, `None` at end of stream. Blank lines are skipped.
    pub async fn next<M: DeserializeOwned>(&mut self) -> Result<Option<M>, DomainError> {
        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(|e| DomainError::Protocol(format!("read failed: {e}")))?;
            let Some(line) = line else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }
            trace!(%line, "Frame received");
            return serde_json::from_str(&line)
                .map(Some)
                .map_err(|e| DomainError::Protocol(format!("bad frame {line:?}: {e}")));
        }
    }
}

/// Forward decoded frames to the storage role until either side stops.
///
/// Nothing is read after `close`: the peer may keep its end open.
async fn pump_inbound<R: AsyncRead + Unpin>(
    reader: R,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
) -> Result<(), DomainError> {
    let mut frames = FrameReader::new(reader);
    loop {
        tokio::select! {
            frame = frames.next::<UiEvent>() => match frame? {
                Some(event) => {
                    let closing = event == UiEvent::Close;
                    if ui_tx.send(event).is_err() || closing {
                        return Ok(());
                    }
                }
                None => {
                    debug!("Peer closed the stream");
                    return Ok(());
                }
            },
            _ = ui_tx.closed() => return Ok(()),
        }
    }
}

/// Run the storage role against a framed peer until it closes, then save.
#[instrument(level = "debug", skip_all)]
pub async fn serve<S, R, W>(
    session: &mut StorageSession<S>,
    reader: R,
    writer: W,
) -> Result<usize, DomainError>
where
    S: NoteStore,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (storage_tx, mut storage_rx) = mpsc::unbounded_channel::<StorageEvent>();
    let link = StorageLink::from_parts(storage_tx, ui_rx);

    let outbound = async move {
        let mut frames = FrameWriter::new(writer);
        while let Some(event) = storage_rx.recv().await {
            frames.send(&event).await?;
        }
        Ok::<_, DomainError>(())
    };

    let (saved, inbound, outbound) =
        tokio::join!(session.run(link), pump_inbound(reader, ui_tx), outbound);
    if let Err(e) = &inbound {
        error!(error = %e, "Inbound stream failed");
    }
    if let Err(e) = &outbound {
        error!(error = %e, "Outbound stream failed");
    }
    let written = saved?;
    inbound?;
    outbound?;
    Ok(written)
}
