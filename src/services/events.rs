//! Change feed shared by the admin and patron surfaces

use tokio::sync::broadcast;
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream},
    Stream, StreamExt,
};

use crate::models::change::CatalogEvent;

#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<CatalogEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish to current subscribers; having none is not an error
    pub fn publish(&self, event: CatalogEvent) {
        let (book_id, kind) = (event.book_id(), event.kind());
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::debug!(book_id, kind, subscribers = delivered, "Published catalog change");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.sender.subscribe()
    }

    /// Changes from now on; a subscriber that falls behind skips what it missed
    pub fn stream(&self) -> impl Stream<Item = CatalogEvent> + Send + 'static {
        BroadcastStream::new(self.subscribe()).filter_map(|message| match message {
            Ok(change) => Some(change),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Change subscriber lagged behind");
                None
            }
        })
    }
}
