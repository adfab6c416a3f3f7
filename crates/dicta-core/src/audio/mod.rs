//! Microphone capture and WAV encoding.

mod devices;
mod recorder;
mod wav;

pub use devices::{AudioDeviceInfo, list_input_devices};
pub use recorder::{AudioRecorder, RecordingData};
pub use wav::encode_wav;
