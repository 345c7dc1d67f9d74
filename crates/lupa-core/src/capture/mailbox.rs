use std::sync::{Condvar, Mutex};
use std::time::Duration;

use crate::frame::ColorFrame;

/// Event published by the acquisition thread.
#[derive(Debug)]
pub enum SourceEvent {
    /// A captured frame. Newer frames overwrite unconsumed older ones.
    Frame(ColorFrame),
    /// The device reported end-of-stream.
    Ended,
    /// Terminal failure (open or read); the source will not retry.
    Failed(String),
}

/// Single-slot "latest wins" handoff between the acquisition thread
/// and the processing/render thread.
///
/// The producer never blocks: publishing overwrites an unconsumed
/// value, so backpressure is implicit and the consumer is never more
/// than one frame behind. Not a queue by design.
#[derive(Default)]
pub struct FrameMailbox {
    slot: Mutex<Option<SourceEvent>>,
    available: Condvar,
}

impl FrameMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot contents and wake one waiting consumer.
    pub fn publish(&self, event: SourceEvent) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(event);
        self.available.notify_one();
    }

    /// Non-blocking take; `None` when nothing new has arrived.
    pub fn try_take(&self) -> Option<SourceEvent> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.take()
    }

    /// Blocking take with a timeout, for consumers without their own
    /// repaint loop.
    pub fn take_timeout(&self, timeout: Duration) -> Option<SourceEvent> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        let (mut slot, _) = self
            .available
            .wait_timeout_while(slot, timeout, |s| s.is_none())
            .unwrap_or_else(|e| e.into_inner());
        slot.take()
    }
}
