use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::capture::mailbox::{FrameMailbox, SourceEvent};
use crate::error::Result;
use crate::frame::ColorFrame;

/// Adjustable device properties. Writes are best-effort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceProperty {
    Focus,
    Exposure,
}

/// A capture device owned exclusively by the acquisition thread.
///
/// `read` returns `Ok(None)` at end-of-stream; the handle is released
/// when the device is dropped.
pub trait CaptureDevice: Send {
    fn read(&mut self) -> Result<Option<ColorFrame>>;

    fn set_property(&mut self, prop: DeviceProperty, value: f64) -> Result<()>;
}

/// Runs a capture device on its own thread and publishes frames to a
/// latest-wins mailbox at the device's own pace.
///
/// A slow consumer never stalls acquisition; an unconsumed frame is
/// simply overwritten by the next one.
pub struct FrameSource {
    mailbox: Arc<FrameMailbox>,
    run_flag: Arc<AtomicBool>,
    property_tx: mpsc::Sender<(DeviceProperty, f64)>,
    handle: Option<JoinHandle<()>>,
}

impl FrameSource {
    /// Spawn the acquisition thread. `open` runs on that thread; an
    /// open failure publishes a terminal `Failed` event and the thread
    /// exits without retrying. `interval` paces the read loop.
    pub fn start<F>(open: F, interval: Duration) -> FrameSource
    where
        F: FnOnce() -> Result<Box<dyn CaptureDevice>> + Send + 'static,
    {
        let mailbox = Arc::new(FrameMailbox::new());
        let run_flag = Arc::new(AtomicBool::new(true));
        let (property_tx, property_rx) = mpsc::channel::<(DeviceProperty, f64)>();

        let thread_mailbox = Arc::clone(&mailbox);
        let thread_flag = Arc::clone(&run_flag);

        let handle = std::thread::Builder::new()
            .name("lupa-capture".into())
            .spawn(move || {
                acquisition_loop(open, interval, &thread_mailbox, &thread_flag, &property_rx);
            })
            .expect("Failed to spawn capture thread");

        FrameSource {
            mailbox,
            run_flag,
            property_tx,
            handle: Some(handle),
        }
    }

    /// The mailbox consumers poll for frames and terminal events.
    pub fn mailbox(&self) -> Arc<FrameMailbox> {
        Arc::clone(&self.mailbox)
    }

    /// Queue a best-effort device property write. Rejections are
    /// logged by the acquisition thread, never fatal.
    pub fn set_property(&self, prop: DeviceProperty, value: f64) {
        let _ = self.property_tx.send((prop, value));
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Halt emission and block until the acquisition thread has fully
    /// exited, which guarantees the device handle is released before
    /// this returns. Idempotent.
    pub fn stop(&mut self) {
        self.run_flag.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FrameSource {
    fn drop(&mut self) {
        self.stop();
    }
}

fn acquisition_loop<F>(
    open: F,
    interval: Duration,
    mailbox: &FrameMailbox,
    run_flag: &AtomicBool,
    property_rx: &mpsc::Receiver<(DeviceProperty, f64)>,
) where
    F: FnOnce() -> Result<Box<dyn CaptureDevice>>,
{
    let mut device = match open() {
        Ok(d) => d,
        Err(e) => {
            warn!("capture open failed: {e}");
            mailbox.publish(SourceEvent::Failed(e.to_string()));
            return;
        }
    };

    let mut sequence: u64 = 0;

    while run_flag.load(Ordering::Acquire) {
        while let Ok((prop, value)) = property_rx.try_recv() {
            if let Err(e) = device.set_property(prop, value) {
                warn!("device property {prop:?}={value} rejected: {e}");
            }
        }

        match device.read() {
            Ok(Some(mut frame)) => {
                stamp(&mut frame, sequence);
                sequence += 1;
                mailbox.publish(SourceEvent::Frame(frame));
            }
            Ok(None) => {
                debug!("capture ended after {sequence} frames");
                mailbox.publish(SourceEvent::Ended);
                break;
            }
            Err(e) => {
                warn!("capture read failed: {e}");
                mailbox.publish(SourceEvent::Failed(e.to_string()));
                break;
            }
        }

        std::thread::sleep(interval);
    }
    // Device dropped here: the handle is free once stop() has joined.
}

fn stamp(frame: &mut ColorFrame, sequence: u64) {
    let timestamp_us = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_micros() as u64);
    for plane in [&mut frame.red, &mut frame.green, &mut frame.blue] {
        plane.metadata.frame_index = sequence;
        plane.metadata.timestamp_us = timestamp_us;
    }
}
