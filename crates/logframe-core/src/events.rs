use tokio::sync::broadcast;

/// Process-wide application events broadcast by the data-access layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A wrapped API call received HTTP 401 and the session was reset.
    /// Carries no payload; listeners typically navigate to the login view.
    Unauthorized,
}

/// Multi-listener event bus over a tokio broadcast channel.
///
/// Cloned into each component that publishes (the HTTP client, primarily);
/// interested parties subscribe on demand. Publishing with zero subscribers
/// is not an error.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: AppEvent) {
        // send only fails when there are no receivers
        let _ = self.tx.send(event);
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Number of currently attached subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
