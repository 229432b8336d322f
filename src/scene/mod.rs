//! Host-runtime collaborators.
//!
//! The rendering host (scene graph, camera framing math, asset storage,
//! render clock) is not reimplemented here; capture pipelines call into it
//! through these traits. Everything that is ambient in a typical engine
//! (the main camera, the render tick) is an explicitly injected value.

mod catalog;

pub use catalog::DirCatalog;

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::foundation::core::{FrameSize, Tick};
use crate::foundation::error::{TurnshotError, TurnshotResult};

/// Identifier of one capturable asset, as produced by an [`AssetCatalog`].
///
/// Shot file names derive from [`AssetId::name`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId {
    path: PathBuf,
}

impl AssetId {
    /// Wrap an asset path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The asset's path within its catalog.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name used for shot files (the file stem).
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("asset")
    }
}

/// Handle to a live instance of an asset in the host scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u64);

/// Enumerates the assets of a batch.
pub trait AssetCatalog {
    /// List the assets to capture, in capture order.
    ///
    /// An invalid catalog root surfaces a validation error; callers check
    /// this before any scenario work starts.
    fn enumerate(&self) -> TurnshotResult<Vec<AssetId>>;
}

/// Scene instantiation and manipulation, provided by the host runtime.
pub trait SceneHost {
    /// Spawn a live instance of the asset.
    fn instantiate(&mut self, asset: &AssetId) -> TurnshotResult<InstanceId>;

    /// Remove an instance from the scene.
    fn destroy(&mut self, instance: InstanceId);

    /// Set the instance's rotation about the vertical axis, in degrees.
    fn set_yaw_degrees(&mut self, instance: InstanceId, degrees: f32);

    /// Capture duration the asset declares for itself (its auto-despawn
    /// time), if any. Overrides the configured clip length.
    fn declared_clip_secs(&self, instance: InstanceId) -> Option<f64>;

    /// Frame the camera on the instance (bounding-box and field-of-view
    /// fitting happen behind this call).
    fn focus_camera(&mut self, instance: InstanceId) -> TurnshotResult<()>;
}

/// Pixel readback from the rendering camera or surface.
pub trait FrameSource {
    /// Dimensions of the frames this source produces.
    fn frame_size(&self) -> FrameSize;

    /// Read back the current frame as row-major RGBA8.
    fn capture(&mut self) -> TurnshotResult<&[u8]>;
}

/// Timestamp source for submitted frames.
pub trait Clock {
    /// Seconds since the clock's epoch.
    fn now_secs(&self) -> f64;
}

/// Wall-clock seconds since construction.
pub struct RealtimeClock {
    epoch: Instant,
}

impl RealtimeClock {
    /// Create a clock with its epoch at now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for RealtimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for RealtimeClock {
    fn now_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

/// The scheduling substrate: produces one [`Tick`] per rendered frame.
pub trait Ticker {
    /// Produce the next tick. `now_secs` must be non-decreasing.
    fn advance(&mut self) -> Tick;
}

/// Deterministic fixed-step tick source.
///
/// Tick time is computed as `index / ticks_per_second` rather than
/// accumulated, so long runs do not drift.
pub struct FixedStepTicker {
    index: u64,
    dt: f64,
}

impl FixedStepTicker {
    /// Create a ticker running at the given rate.
    pub fn new(ticks_per_second: u32) -> TurnshotResult<Self> {
        if ticks_per_second == 0 {
            return Err(TurnshotError::validation("ticks_per_second must be >= 1"));
        }
        Ok(Self {
            index: 0,
            dt: 1.0 / f64::from(ticks_per_second),
        })
    }
}

impl Ticker for FixedStepTicker {
    fn advance(&mut self) -> Tick {
        let tick = Tick {
            index: self.index,
            now_secs: self.index as f64 * self.dt,
        };
        self.index += 1;
        tick
    }
}
