// src/application/protocol.rs
//
// In-process message channel between the UI role and the storage role.
// Delivery is at-most-once with no acknowledgement: a send to a peer that
// has gone away is logged and dropped.
use crate::domain::{DomainError, StorageEvent, UiEvent};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

/// The UI role's end of the channel.
#[derive(Debug)]
pub struct UiLink {
    outbox: UnboundedSender<UiEvent>,
    inbox: UnboundedReceiver<StorageEvent>,
}

/// The storage role's end of the channel.
#[derive(Debug)]
pub struct StorageLink {
    outbox: UnboundedSender<StorageEvent>,
    inbox: UnboundedReceiver<UiEvent>,
}

/// Create a connected pair of endpoints.
pub fn link() -> (UiLink, StorageLink) {
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let (storage_tx, storage_rx) = mpsc::unbounded_channel();
    (
        UiLink {
            outbox: ui_tx,
            inbox: storage_rx,
        },
        StorageLink {
            outbox: storage_tx,
            inbox: ui_rx,
        },
    )
}

impl UiLink {
    pub fn send(&self, event: UiEvent) {
        if let Err(e) = self.outbox.send(event) {
            warn!(channel = channel_name(&e.0), "Storage side closed, dropping message");
        }
    }

    pub async fn recv(&mut self) -> Result<StorageEvent, DomainError> {
        self.inbox
            .recv()
            .await
            .ok_or_else(|| DomainError::ChannelClosed("storage side went away".to_string()))
    }
}

impl StorageLink {
    /// Build from raw channel halves when bridging to a framed stream.
    pub fn from_parts(
        outbox: UnboundedSender<StorageEvent>,
        inbox: UnboundedReceiver<UiEvent>,
    ) -> Self {
        Self { outbox, inbox }
    }

    pub fn send(&self, event: StorageEvent) {
        if self.outbox.send(event).is_err() {
            warn!(channel = "data", "UI side closed, dropping message");
        }
    }

    /// Next event from the UI. A closed channel reads as `Close`.
    pub async fn recv(&mut self) -> UiEvent {
        self.inbox.recv().await.unwrap_or(UiEvent::Close)
    }
}

fn channel_name(event: &UiEvent) -> &'static str {
    match event {
        UiEvent::Ready => "ready",
        UiEvent::Data(_) => "data",
        UiEvent::Close => "close",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, NoteId};

    #[tokio::test]
    async fn given_linked_pair_when_ui_sends_then_storage_receives_in_order() {
        let (ui, mut storage) = link();

        ui.send(UiEvent::Ready);
        ui.send(UiEvent::Data(vec![Note::new(NoteId(0))]));

        assert_eq!(storage.recv().await, UiEvent::Ready);
        assert_eq!(
            storage.recv().await,
            UiEvent::Data(vec![Note::new(NoteId(0))])
        );
    }

    #[tokio::test]
    async fn given_ui_dropped_when_storage_receives_then_reads_close() {
        let (ui, mut storage) = link();
        drop(ui);

        assert_eq!(storage.recv().await, UiEvent::Close);
    }

    #[tokio::test]
    async fn given_storage_dropped_when_ui_receives_then_channel_closed() {
        let (mut ui, storage) = link();
        drop(storage);

        ui.send(UiEvent::Ready);
        let result = ui.recv().await;

        assert!(matches!(result, Err(DomainError::ChannelClosed(_))));
    }
}
