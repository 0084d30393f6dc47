//! Subscription handle for change notifications.

use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A standing subscription to a stream of messages.
///
/// Each subscription gets its own channel; dropping it cancels the
/// subscription (the publisher prunes the dead sender on its next
/// publish). Designed for single-threaded consumption; bridge through a
/// channel if multiple consumers need the stream.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
