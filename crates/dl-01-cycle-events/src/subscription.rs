//! # Phase Subscription
//!
//! Receiving side of the phase event stream.

use tokio::sync::broadcast;
use tracing::warn;

use crate::domain::{CycleError, Phase};

/// A phase transition, or the error that terminated the stream.
pub type PhaseEvent = Result<Phase, CycleError>;

/// A subscription handle for receiving phase events.
pub struct PhaseSubscription {
    /// `None` once the stream has terminated.
    receiver: Option<broadcast::Receiver<PhaseEvent>>,
}

impl PhaseSubscription {
    pub(crate) fn new(receiver: Option<broadcast::Receiver<PhaseEvent>>) -> Self {
        Self { receiver }
    }

    /// Receive the next phase event.
    ///
    /// # Returns
    ///
    /// - `Some(Ok(phase))` - The next transition
    /// - `Some(Err(error))` - The provider failed; every later call returns `None`
    /// - `None` - The provider was closed or dropped
    pub async fn recv(&mut self) -> Option<PhaseEvent> {
        let receiver = self.receiver.as_mut()?;
        let received = loop {
            match receiver.recv().await {
                Ok(event) => break Some(event),
                Err(broadcast::error::RecvError::Closed) => break None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(lagged = count, "Phase subscriber lagged, transitions dropped");
                    continue;
                }
            }
        };
        self.settle(received)
    }

    /// Try to receive the next phase event without waiting.
    ///
    /// `Ok(None)` means nothing is pending; `Err(CycleError::Closed)` means the
    /// stream has ended.
    pub fn try_recv(&mut self) -> Result<Option<PhaseEvent>, CycleError> {
        let Some(receiver) = self.receiver.as_mut() else {
            return Err(CycleError::Closed);
        };
        let received = loop {
            match receiver.try_recv() {
                Ok(event) => break Some(event),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => break None,
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            }
        };
        match self.settle(received) {
            Some(event) => Ok(Some(event)),
            None => Err(CycleError::Closed),
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.receiver.is_none()
    }

    fn settle(&mut self, received: Option<PhaseEvent>) -> Option<PhaseEvent> {
        if !matches!(received, Some(Ok(_))) {
            self.receiver = None;
        }
        received
    }
}
