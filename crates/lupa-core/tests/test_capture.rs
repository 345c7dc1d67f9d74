use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ndarray::Array2;

use lupa_core::capture::{
    CaptureDevice, DeviceProperty, FrameMailbox, FrameSource, SourceEvent,
};
use lupa_core::error::{LupaError, Result};
use lupa_core::frame::{ColorFrame, Frame};

fn solid_frame(value: f32) -> ColorFrame {
    let plane = Frame::new(Array2::from_elem((4, 4), value), 8);
    ColorFrame::from_mono(&plane)
}

/// Test double: serves a fixed number of frames, then end-of-stream.
/// Records property writes and flags its own drop so tests can observe
/// the handle being released.
struct ScriptedDevice {
    remaining: usize,
    released: Arc<AtomicBool>,
    properties: Arc<Mutex<Vec<(DeviceProperty, f64)>>>,
    reject_exposure: bool,
}

impl ScriptedDevice {
    fn new(remaining: usize) -> (Self, Arc<AtomicBool>, Arc<Mutex<Vec<(DeviceProperty, f64)>>>) {
        let released = Arc::new(AtomicBool::new(false));
        let properties = Arc::new(Mutex::new(Vec::new()));
        let device = ScriptedDevice {
            remaining,
            released: Arc::clone(&released),
            properties: Arc::clone(&properties),
            reject_exposure: false,
        };
        (device, released, properties)
    }
}

impl Drop for ScriptedDevice {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

impl CaptureDevice for ScriptedDevice {
    fn read(&mut self) -> Result<Option<ColorFrame>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some(solid_frame(0.5)))
    }

    fn set_property(&mut self, prop: DeviceProperty, value: f64) -> Result<()> {
        if self.reject_exposure && prop == DeviceProperty::Exposure {
            return Err(LupaError::PropertySetFailure("exposure is locked".into()));
        }
        self.properties.lock().unwrap().push((prop, value));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mailbox
// ---------------------------------------------------------------------------

#[test]
fn test_mailbox_latest_wins() {
    let mailbox = FrameMailbox::new();

    let mut first = solid_frame(0.1);
    first.red.metadata.frame_index = 1;
    let mut second = solid_frame(0.2);
    second.red.metadata.frame_index = 2;

    mailbox.publish(SourceEvent::Frame(first));
    mailbox.publish(SourceEvent::Frame(second));

    match mailbox.try_take() {
        Some(SourceEvent::Frame(frame)) => assert_eq!(frame.red.metadata.frame_index, 2),
        other => panic!("expected the newer frame, got {other:?}"),
    }
    // The slot holds at most one event.
    assert!(mailbox.try_take().is_none());
}

#[test]
fn test_mailbox_take_timeout_expires() {
    let mailbox = FrameMailbox::new();
    let start = std::time::Instant::now();
    assert!(mailbox.take_timeout(Duration::from_millis(30)).is_none());
    assert!(start.elapsed() >= Duration::from_millis(25));
}

#[test]
fn test_mailbox_take_timeout_wakes_on_publish() {
    let mailbox = Arc::new(FrameMailbox::new());

    let producer = Arc::clone(&mailbox);
    let handle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(10));
        producer.publish(SourceEvent::Ended);
    });

    let event = mailbox.take_timeout(Duration::from_secs(5));
    assert!(matches!(event, Some(SourceEvent::Ended)));
    handle.join().unwrap();
}

// ---------------------------------------------------------------------------
// FrameSource lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_open_failure_is_terminal() {
    let mut source = FrameSource::start(
        || Err(LupaError::DeviceUnavailable("camera 0 is busy".into())),
        Duration::from_millis(1),
    );
    let mailbox = source.mailbox();

    match mailbox.take_timeout(Duration::from_secs(5)) {
        Some(SourceEvent::Failed(msg)) => assert!(msg.contains("camera 0")),
        other => panic!("expected a terminal failure, got {other:?}"),
    }

    // No retry: nothing further arrives.
    assert!(mailbox.take_timeout(Duration::from_millis(50)).is_none());

    source.stop();
    source.stop(); // idempotent
    assert!(!source.is_running());
}

#[test]
fn test_frames_arrive_in_order_without_repeats() {
    let (device, _, _) = ScriptedDevice::new(50);
    let mut source = FrameSource::start(
        move || Ok(Box::new(device) as Box<dyn CaptureDevice>),
        Duration::from_millis(1),
    );
    let mailbox = source.mailbox();

    let mut indices: Vec<u64> = Vec::new();
    loop {
        match mailbox.take_timeout(Duration::from_secs(5)) {
            Some(SourceEvent::Frame(frame)) => indices.push(frame.red.metadata.frame_index),
            Some(SourceEvent::Ended) => break,
            other => panic!("unexpected event {other:?}"),
        }
    }

    assert!(!indices.is_empty());
    // Strictly increasing: no frame is ever delivered twice, even if
    // some were overwritten before we consumed them.
    for pair in indices.windows(2) {
        assert!(pair[0] < pair[1], "indices not increasing: {indices:?}");
    }
    source.stop();
}

#[test]
fn test_slow_consumer_sees_only_the_latest() {
    let (device, _, _) = ScriptedDevice::new(1000);
    let mut source = FrameSource::start(
        move || Ok(Box::new(device) as Box<dyn CaptureDevice>),
        Duration::from_millis(1),
    );
    let mailbox = source.mailbox();

    // Let the producer run well ahead of us.
    std::thread::sleep(Duration::from_millis(50));

    let first = match mailbox.take_timeout(Duration::from_secs(5)) {
        Some(SourceEvent::Frame(frame)) => frame.red.metadata.frame_index,
        other => panic!("expected a frame, got {other:?}"),
    };

    std::thread::sleep(Duration::from_millis(50));

    let second = match mailbox.take_timeout(Duration::from_secs(5)) {
        Some(SourceEvent::Frame(frame)) => frame.red.metadata.frame_index,
        other => panic!("expected a frame, got {other:?}"),
    };

    // Intervening frames were overwritten, never queued.
    assert!(second > first);
    source.stop();
}

#[test]
fn test_stop_joins_and_releases_device() {
    let (device, released, _) = ScriptedDevice::new(usize::MAX);
    let mut source = FrameSource::start(
        move || Ok(Box::new(device) as Box<dyn CaptureDevice>),
        Duration::from_millis(1),
    );

    // Make sure the device actually opened and produced something.
    assert!(matches!(
        source.mailbox().take_timeout(Duration::from_secs(5)),
        Some(SourceEvent::Frame(_))
    ));
    assert!(source.is_running());

    source.stop();

    // stop() returns only after the acquisition thread exits, so the
    // device handle is guaranteed free here.
    assert!(released.load(Ordering::SeqCst));
    assert!(!source.is_running());
}

#[test]
fn test_drop_stops_the_source() {
    let (device, released, _) = ScriptedDevice::new(usize::MAX);
    {
        let source = FrameSource::start(
            move || Ok(Box::new(device) as Box<dyn CaptureDevice>),
            Duration::from_millis(1),
        );
        assert!(matches!(
            source.mailbox().take_timeout(Duration::from_secs(5)),
            Some(SourceEvent::Frame(_))
        ));
    }
    assert!(released.load(Ordering::SeqCst));
}

#[test]
fn test_property_writes_reach_the_device() {
    let (device, _, properties) = ScriptedDevice::new(usize::MAX);
    let mut source = FrameSource::start(
        move || Ok(Box::new(device) as Box<dyn CaptureDevice>),
        Duration::from_millis(1),
    );

    source.set_property(DeviceProperty::Focus, 128.0);

    // The write is applied before a subsequent read; wait for a couple
    // of loop iterations.
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    loop {
        if properties
            .lock()
            .unwrap()
            .contains(&(DeviceProperty::Focus, 128.0))
        {
            break;
        }
        assert!(std::time::Instant::now() < deadline, "property never applied");
        std::thread::sleep(Duration::from_millis(5));
    }
    source.stop();
}

#[test]
fn test_rejected_property_write_is_not_fatal() {
    let (mut device, _, _) = ScriptedDevice::new(usize::MAX);
    device.reject_exposure = true;
    let mut source = FrameSource::start(
        move || Ok(Box::new(device) as Box<dyn CaptureDevice>),
        Duration::from_millis(1),
    );
    let mailbox = source.mailbox();

    source.set_property(DeviceProperty::Exposure, 0.25);

    // Acquisition keeps producing frames after the rejection.
    std::thread::sleep(Duration::from_millis(30));
    assert!(matches!(
        mailbox.take_timeout(Duration::from_secs(5)),
        Some(SourceEvent::Frame(_))
    ));
    source.stop();
}
