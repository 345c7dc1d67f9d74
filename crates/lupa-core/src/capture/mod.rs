mod mailbox;
mod source;
mod synthetic;

pub use mailbox::{FrameMailbox, SourceEvent};
pub use source::{CaptureDevice, DeviceProperty, FrameSource};
pub use synthetic::SyntheticCamera;
