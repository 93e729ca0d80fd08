pub mod assertions;
pub mod recorders;

pub use recorders::{RecordingClock, RecordingModeHook};
