//! Turnshot captures batches of rendered 3D assets to image files.
//!
//! A batch walks an asset catalog, poses each asset in the host scene, and
//! records frames from the render loop:
//!
//! - Per-asset work is sequenced on a cooperative [`TaskQueue`]: strictly
//!   one task at a time, one scheduler tick per rendered frame, suspension
//!   points expressed as explicit [`Wait`] descriptors.
//! - Frames flow through a [`CameraInput`] (decimating bridge from the
//!   frame signal) into a [`RecordSink`]; the shipped [`PngSink`] encodes
//!   on the producer's thread and hands payloads to a writer thread over a
//!   sentinel-terminated queue.
//! - [`CaptureSession`] composes the two shipped pipelines — timed clip
//!   capture and four-angle turntable stills — over host collaborators
//!   injected as [`Stage`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod scenario;

pub mod capture;
pub mod config;
pub mod encode;
pub mod sched;
pub mod scene;
pub mod session;

pub use crate::foundation::core::{FrameSize, Tick};
pub use crate::foundation::error::{TurnshotError, TurnshotResult};

pub use crate::capture::CameraInput;
pub use crate::config::CaptureConfig;
pub use crate::encode::png::{PngRecorderFactory, PngSink};
pub use crate::encode::sink::{
    InMemoryRecorderFactory, InMemorySink, RecordSink, RecorderFactory, ShotOutput, ShotRecord,
    SinkHandle,
};
pub use crate::scene::{
    AssetCatalog, AssetId, Clock, DirCatalog, FixedStepTicker, FrameSource, InstanceId,
    RealtimeClock, SceneHost, Ticker,
};
pub use crate::sched::{QueueRun, QueueStatus, Sequence, TaskQueue, Wait};
pub use crate::session::{CaptureSession, CaptureStats, SessionOpts, SessionStatus, Stage};
