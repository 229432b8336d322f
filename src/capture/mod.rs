//! Frame source adaptation.

mod camera_input;

pub use camera_input::CameraInput;
